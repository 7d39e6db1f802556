//! Typed addresses and the canonical locking-script templates.
//!
//! Templates:
//! - P2PKH:  `OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG`
//! - P2SH:   `OP_HASH160 <20> OP_EQUAL`
//! - P2WPKH: `OP_0 <20>`
//! - P2WSH:  `OP_0 <32>`

#![forbid(unsafe_code)]

use log::trace;
use utxo_addr_core::{Error, Result};
use utxo_addr_script::opcodes::{OP_0, OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_EQUALVERIFY, OP_HASH160};

use crate::cashaddr::CashAddrType;
use crate::network::{NetworkParameters, PkhEncoding};
use crate::parser::Decoded;
use crate::{base58check, bech32, cashaddr};

pub const P2PKH_SCRIPT_LEN: usize = 25;
pub const P2SH_SCRIPT_LEN: usize = 23;
pub const P2WPKH_SCRIPT_LEN: usize = 22;
pub const P2WSH_SCRIPT_LEN: usize = 34;

/// Recognized script kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptKind {
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
}

/// An address bound to the encoding parameters it was built under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    LegacyP2pkh { version: u8, hash: [u8; 20] },
    LegacyP2sh { version: u8, hash: [u8; 20] },
    SegwitP2wpkh { hrp: String, program: [u8; 20] },
    SegwitP2wsh { hrp: String, program: [u8; 32] },
    CashP2pkh { prefix: String, hash: [u8; 20] },
    CashP2sh { prefix: String, hash: [u8; 20] },
}

fn array<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.try_into().ok()
}

fn hrp_of(network: &NetworkParameters) -> Result<String> {
    network
        .bech32_hrp
        .clone()
        .ok_or_else(|| Error::EncodingUnavailable {
            network: network.name.clone(),
            encoding: "bech32",
        })
}

fn cash_prefix_of(network: &NetworkParameters) -> Result<String> {
    network
        .cashaddr_prefix
        .clone()
        .ok_or_else(|| Error::EncodingUnavailable {
            network: network.name.clone(),
            encoding: "cashaddr",
        })
}

/// Split a script into its template kind and hash, if it matches one.
pub fn match_template(script: &[u8]) -> Option<(ScriptKind, &[u8])> {
    match script {
        [OP_DUP, OP_HASH160, 20, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG] if hash.len() == 20 => {
            Some((ScriptKind::P2pkh, hash))
        }
        [OP_HASH160, 20, hash @ .., OP_EQUAL] if hash.len() == 20 => Some((ScriptKind::P2sh, hash)),
        [OP_0, 20, program @ ..] if program.len() == 20 => Some((ScriptKind::P2wpkh, program)),
        [OP_0, 32, program @ ..] if program.len() == 32 => Some((ScriptKind::P2wsh, program)),
        _ => None,
    }
}

impl Address {
    /// Pay-to-pubkey-hash in the network's preferred encoding.
    pub fn pkh(network: &NetworkParameters, hash: [u8; 20]) -> Result<Self> {
        Ok(match network.preferred_pkh_encoding {
            PkhEncoding::Legacy => Self::LegacyP2pkh {
                version: network.p2pkh_version,
                hash,
            },
            PkhEncoding::CashAddr => Self::CashP2pkh {
                prefix: cash_prefix_of(network)?,
                hash,
            },
        })
    }

    /// Pay-to-script-hash in the network's preferred encoding.
    pub fn sh(network: &NetworkParameters, hash: [u8; 20]) -> Result<Self> {
        Ok(match network.preferred_pkh_encoding {
            PkhEncoding::Legacy => Self::LegacyP2sh {
                version: network.p2sh_version,
                hash,
            },
            PkhEncoding::CashAddr => Self::CashP2sh {
                prefix: cash_prefix_of(network)?,
                hash,
            },
        })
    }

    pub fn p2wpkh(network: &NetworkParameters, program: [u8; 20]) -> Result<Self> {
        Ok(Self::SegwitP2wpkh {
            hrp: hrp_of(network)?,
            program,
        })
    }

    pub fn p2wsh(network: &NetworkParameters, program: [u8; 32]) -> Result<Self> {
        Ok(Self::SegwitP2wsh {
            hrp: hrp_of(network)?,
            program,
        })
    }

    /// Address for a canonical output script.
    ///
    /// P2PKH and P2SH follow the network's preferred encoding, so on a
    /// cashaddr network they come back as CashAddr.
    pub fn from_script(script: &[u8], network: &NetworkParameters) -> Result<Self> {
        let (kind, hash) = match_template(script).ok_or(Error::UnparseableScript)?;
        trace!("script matched {:?} template", kind);

        match kind {
            ScriptKind::P2pkh => Self::pkh(network, array(hash).ok_or(Error::UnparseableScript)?),
            ScriptKind::P2sh => Self::sh(network, array(hash).ok_or(Error::UnparseableScript)?),
            ScriptKind::P2wpkh => {
                Self::p2wpkh(network, array(hash).ok_or(Error::UnparseableScript)?)
            }
            ScriptKind::P2wsh => Self::p2wsh(network, array(hash).ok_or(Error::UnparseableScript)?),
        }
    }

    /// Interpret a decoded string under `network`.
    ///
    /// Base58Check versions and the Bech32 hrp must belong to `network`.
    /// A CashAddr prefix must equal the network's cashaddr prefix; on a
    /// network without one, any prefix is accepted.
    pub fn from_decoded(decoded: Decoded, network: &NetworkParameters, input: &str) -> Result<Self> {
        network.validate()?;
        let unparseable = || Error::UnparseableAddress(input.to_string());

        match decoded {
            Decoded::Base58 { version, payload } => {
                let hash = array(&payload).ok_or_else(unparseable)?;
                if version == network.p2pkh_version {
                    Ok(Self::LegacyP2pkh { version, hash })
                } else if version == network.p2sh_version {
                    Ok(Self::LegacyP2sh { version, hash })
                } else {
                    Err(unparseable())
                }
            }
            Decoded::Bech32 {
                hrp,
                witness_version,
                program,
            } => {
                if witness_version != 0 || network.bech32_hrp.as_deref() != Some(hrp.as_str()) {
                    return Err(unparseable());
                }
                if let Some(program) = array::<20>(&program) {
                    Ok(Self::SegwitP2wpkh { hrp, program })
                } else if let Some(program) = array::<32>(&program) {
                    Ok(Self::SegwitP2wsh { hrp, program })
                } else {
                    Err(unparseable())
                }
            }
            Decoded::CashAddr { prefix, kind, hash, .. } => {
                if let Some(expected) = network.cashaddr_prefix.as_deref() {
                    if prefix != expected {
                        return Err(unparseable());
                    }
                }
                let hash = array(&hash).ok_or_else(unparseable)?;
                Ok(match kind {
                    CashAddrType::P2pkh => Self::CashP2pkh { prefix, hash },
                    CashAddrType::P2sh => Self::CashP2sh { prefix, hash },
                })
            }
        }
    }

    pub fn kind(&self) -> ScriptKind {
        match self {
            Self::LegacyP2pkh { .. } | Self::CashP2pkh { .. } => ScriptKind::P2pkh,
            Self::LegacyP2sh { .. } | Self::CashP2sh { .. } => ScriptKind::P2sh,
            Self::SegwitP2wpkh { .. } => ScriptKind::P2wpkh,
            Self::SegwitP2wsh { .. } => ScriptKind::P2wsh,
        }
    }

    /// The wrapped hash payload.
    pub fn hash(&self) -> &[u8] {
        match self {
            Self::LegacyP2pkh { hash, .. }
            | Self::LegacyP2sh { hash, .. }
            | Self::CashP2pkh { hash, .. }
            | Self::CashP2sh { hash, .. } => hash,
            Self::SegwitP2wpkh { program, .. } => program,
            Self::SegwitP2wsh { program, .. } => program,
        }
    }

    /// Canonical string form.
    pub fn encode(&self) -> Result<String> {
        match self {
            Self::LegacyP2pkh { version, hash } | Self::LegacyP2sh { version, hash } => {
                Ok(base58check::encode(*version, hash))
            }
            Self::SegwitP2wpkh { hrp, program } => bech32::encode(hrp, 0, program),
            Self::SegwitP2wsh { hrp, program } => bech32::encode(hrp, 0, program),
            Self::CashP2pkh { prefix, hash } => cashaddr::encode(prefix, CashAddrType::P2pkh, hash),
            Self::CashP2sh { prefix, hash } => cashaddr::encode(prefix, CashAddrType::P2sh, hash),
        }
    }

    /// Canonical locking script.
    pub fn script_pubkey(&self) -> Vec<u8> {
        let hash = self.hash();
        let mut script = Vec::with_capacity(P2WSH_SCRIPT_LEN);

        match self.kind() {
            ScriptKind::P2pkh => {
                script.extend_from_slice(&[OP_DUP, OP_HASH160, 20]);
                script.extend_from_slice(hash);
                script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
            }
            ScriptKind::P2sh => {
                script.extend_from_slice(&[OP_HASH160, 20]);
                script.extend_from_slice(hash);
                script.push(OP_EQUAL);
            }
            ScriptKind::P2wpkh | ScriptKind::P2wsh => {
                script.push(OP_0);
                script.push(hash.len() as u8);
                script.extend_from_slice(hash);
            }
        }
        script
    }
}
