//! Network parameter table.
//!
//! A [`NetworkParameters`] value carries every per-chain constant an encoder
//! needs. The same version byte can mean different things on different
//! networks, so nothing here is looked up by version alone.

#![forbid(unsafe_code)]

use log::debug;
use serde::{Deserialize, Serialize};
use utxo_addr_core::{Error, Result};

/// Name of the network selected when nothing else has been chosen.
pub const DEFAULT_NETWORK: &str = "bitcoin_main";

/// Longest hrp that still fits a P2WSH address (59 data symbols) in 90 characters.
pub const MAX_HRP_LEN: usize = 30;

/// Encoding used by the network-dispatching pkh/sh builders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PkhEncoding {
    /// Base58Check with the network's version bytes.
    #[default]
    Legacy,
    /// CashAddr under the network's cashaddr prefix.
    CashAddr,
}

/// Per-network address constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkParameters {
    pub name: String,
    pub p2pkh_version: u8,
    pub p2sh_version: u8,
    /// Bech32 human-readable prefix; `None` on chains without segwit.
    #[serde(default)]
    pub bech32_hrp: Option<String>,
    #[serde(default)]
    pub cashaddr_prefix: Option<String>,
    #[serde(default)]
    pub preferred_pkh_encoding: PkhEncoding,
}

impl NetworkParameters {
    pub fn is_cashaddr_network(&self) -> bool {
        self.preferred_pkh_encoding == PkhEncoding::CashAddr
    }

    /// Check the within-network uniqueness and well-formedness rules.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidNetworkParameters {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.p2pkh_version == self.p2sh_version {
            return Err(invalid("p2pkh and p2sh versions must differ"));
        }
        if let Some(hrp) = &self.bech32_hrp {
            let printable = hrp.bytes().all(|b| (33..=126).contains(&b));
            if hrp.is_empty() || !printable || hrp.bytes().any(|b| b.is_ascii_uppercase()) {
                return Err(invalid("bech32 hrp must be non-empty lowercase printable ASCII"));
            }
            if hrp.len() > MAX_HRP_LEN {
                return Err(invalid("bech32 hrp is too long for a P2WSH address"));
            }
        }
        if let Some(prefix) = &self.cashaddr_prefix {
            let alnum = prefix
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
            if prefix.is_empty() || !alnum {
                return Err(invalid("cashaddr prefix must be non-empty lowercase alphanumeric"));
            }
            if self.bech32_hrp.as_deref() == Some(prefix.as_str()) {
                return Err(invalid("bech32 hrp and cashaddr prefix must differ"));
            }
        }
        if self.is_cashaddr_network() && self.cashaddr_prefix.is_none() {
            return Err(invalid("cashaddr preference requires a cashaddr prefix"));
        }
        Ok(())
    }
}

fn legacy(name: &str, p2pkh: u8, p2sh: u8, hrp: Option<&str>) -> NetworkParameters {
    NetworkParameters {
        name: name.to_string(),
        p2pkh_version: p2pkh,
        p2sh_version: p2sh,
        bech32_hrp: hrp.map(str::to_string),
        cashaddr_prefix: None,
        preferred_pkh_encoding: PkhEncoding::Legacy,
    }
}

fn cash(name: &str, p2pkh: u8, p2sh: u8, prefix: &str) -> NetworkParameters {
    NetworkParameters {
        name: name.to_string(),
        p2pkh_version: p2pkh,
        p2sh_version: p2sh,
        bech32_hrp: None,
        cashaddr_prefix: Some(prefix.to_string()),
        preferred_pkh_encoding: PkhEncoding::CashAddr,
    }
}

pub fn bitcoin_main() -> NetworkParameters {
    legacy("bitcoin_main", 0x00, 0x05, Some("bc"))
}

pub fn bitcoin_test() -> NetworkParameters {
    legacy("bitcoin_test", 0x6f, 0xc4, Some("tb"))
}

pub fn bitcoin_reg() -> NetworkParameters {
    legacy("bitcoin_reg", 0x6f, 0xc4, Some("bcrt"))
}

pub fn bitcoin_cash_main() -> NetworkParameters {
    cash("bitcoin_cash_main", 0x00, 0x05, "bitcoincash")
}

pub fn bitcoin_cash_test() -> NetworkParameters {
    cash("bitcoin_cash_test", 0x6f, 0xc4, "bchtest")
}

pub fn bitcoin_cash_reg() -> NetworkParameters {
    cash("bitcoin_cash_reg", 0x6f, 0xc4, "bchreg")
}

pub fn litecoin_main() -> NetworkParameters {
    legacy("litecoin_main", 0x30, 0x32, Some("ltc"))
}

pub fn litecoin_test() -> NetworkParameters {
    legacy("litecoin_test", 0x6f, 0x3a, Some("tltc"))
}

/// Ordered name-to-parameters table.
#[derive(Clone, Debug, Default)]
pub struct NetworkRegistry {
    networks: Vec<NetworkParameters>,
}

impl NetworkRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in networks.
    pub fn builtin() -> Self {
        Self {
            networks: vec![
                bitcoin_main(),
                bitcoin_test(),
                bitcoin_reg(),
                bitcoin_cash_main(),
                bitcoin_cash_test(),
                bitcoin_cash_reg(),
                litecoin_main(),
                litecoin_test(),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Result<&NetworkParameters> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| Error::UnknownNetwork(name.to_string()))
    }

    /// Add a network. Names are unique; parameters must validate.
    pub fn register(&mut self, params: NetworkParameters) -> Result<()> {
        params.validate()?;
        if self.networks.iter().any(|n| n.name == params.name) {
            return Err(Error::DuplicateNetwork(params.name));
        }
        debug!("registered network {}", params.name);
        self.networks.push(params);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.iter().map(|n| n.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkParameters> {
        self.networks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_validate() {
        for params in NetworkRegistry::builtin().iter() {
            params.validate().unwrap();
        }
    }

    #[test]
    fn test_lookup() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(registry.get(DEFAULT_NETWORK).unwrap().bech32_hrp.as_deref(), Some("bc"));
        assert!(registry.get("bitcoin_cash_main").unwrap().is_cashaddr_network());
        assert_eq!(
            registry.get("dogecoin_main"),
            Err(Error::UnknownNetwork("dogecoin_main".to_string()))
        );
    }

    #[test]
    fn test_versions_collide_across_networks() {
        // Same bytes, different encodings: version alone cannot identify a network
        let btc = bitcoin_main();
        let bch = bitcoin_cash_main();
        assert_eq!(btc.p2pkh_version, bch.p2pkh_version);
        assert_eq!(btc.p2sh_version, bch.p2sh_version);
        assert_ne!(btc.preferred_pkh_encoding, bch.preferred_pkh_encoding);
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = NetworkRegistry::builtin();
        assert_eq!(
            registry.register(bitcoin_main()),
            Err(Error::DuplicateNetwork("bitcoin_main".to_string()))
        );
    }

    #[test]
    fn test_register_rejects_invalid() {
        let mut registry = NetworkRegistry::new();

        let mut same_versions = bitcoin_main();
        same_versions.name = "broken".to_string();
        same_versions.p2sh_version = same_versions.p2pkh_version;
        assert!(matches!(
            registry.register(same_versions),
            Err(Error::InvalidNetworkParameters { .. })
        ));

        let mut no_prefix = bitcoin_cash_main();
        no_prefix.cashaddr_prefix = None;
        assert!(matches!(
            registry.register(no_prefix),
            Err(Error::InvalidNetworkParameters { .. })
        ));

        let mut upper_hrp = bitcoin_main();
        upper_hrp.bech32_hrp = Some("BC".to_string());
        assert!(registry.register(upper_hrp).is_err());

        assert_eq!(registry.names().count(), 0);
    }

    #[test]
    fn test_hrp_length_bound() {
        let mut params = bitcoin_main();
        params.bech32_hrp = Some("a".repeat(MAX_HRP_LEN));
        params.validate().unwrap();

        // The longest valid hrp still encodes both witness program sizes
        let hrp = params.bech32_hrp.as_deref().unwrap();
        assert_eq!(crate::bech32::encode(hrp, 0, &[0u8; 32]).unwrap().len(), 90);
        assert!(crate::bech32::encode(hrp, 0, &[0u8; 20]).is_ok());

        params.bech32_hrp = Some("a".repeat(MAX_HRP_LEN + 1));
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidNetworkParameters { .. })
        ));

        params.bech32_hrp = Some("a".repeat(84));
        assert!(NetworkRegistry::new().register(params).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "name": "example_cash",
            "p2pkh_version": 28,
            "p2sh_version": 40,
            "cashaddr_prefix": "example",
            "preferred_pkh_encoding": "cash_addr"
        }"#;
        let params: NetworkParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.bech32_hrp, None);
        assert!(params.is_cashaddr_network());
        params.validate().unwrap();

        let encoded = serde_json::to_string(&params).unwrap();
        let decoded: NetworkParameters = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, params);
    }
}
