//! Unified address parser.
//!
//! Decoders are tried in a fixed order (Base58Check, Bech32, CashAddr) and
//! the first success wins. Adding a format means adding an [`AddressDecoder`].

#![forbid(unsafe_code)]

use log::debug;
use utxo_addr_core::{Error, Result};
use utxo_addr_script::opcodes;

use crate::cashaddr::{self, CashAddrType};
use crate::network::NetworkParameters;
use crate::{base58check, bech32};

/// Which text encoding a string used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressFormat {
    Base58Check,
    Bech32,
    CashAddr,
}

/// A successfully decoded string, before any network interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    Base58 {
        version: u8,
        payload: Vec<u8>,
    },
    Bech32 {
        hrp: String,
        witness_version: u8,
        program: Vec<u8>,
    },
    CashAddr {
        prefix: String,
        version: u8,
        kind: CashAddrType,
        hash: Vec<u8>,
    },
}

impl Decoded {
    pub fn format(&self) -> AddressFormat {
        match self {
            Self::Base58 { .. } => AddressFormat::Base58Check,
            Self::Bech32 { .. } => AddressFormat::Bech32,
            Self::CashAddr { .. } => AddressFormat::CashAddr,
        }
    }

    /// Version marker followed by the hash.
    ///
    /// - Base58Check: `version || payload`
    /// - Bech32: `witness version opcode || program length || program`
    /// - CashAddr: `version byte || hash`
    pub fn versioned_payload(&self) -> Vec<u8> {
        match self {
            Self::Base58 { version, payload } => {
                let mut out = Vec::with_capacity(1 + payload.len());
                out.push(*version);
                out.extend_from_slice(payload);
                out
            }
            Self::Bech32 {
                witness_version,
                program,
                ..
            } => {
                let mut out = Vec::with_capacity(2 + program.len());
                // Decoding bounds both: version <= 16, program <= 40 bytes
                out.push(opcodes::push_num(*witness_version).unwrap_or(opcodes::OP_0));
                out.push(program.len() as u8);
                out.extend_from_slice(program);
                out
            }
            Self::CashAddr { version, hash, .. } => {
                let mut out = Vec::with_capacity(1 + hash.len());
                out.push(*version);
                out.extend_from_slice(hash);
                out
            }
        }
    }

    /// The hash alone, comparable across formats.
    pub fn hash(&self) -> &[u8] {
        match self {
            Self::Base58 { payload, .. } => payload,
            Self::Bech32 { program, .. } => program,
            Self::CashAddr { hash, .. } => hash,
        }
    }
}

/// One text encoding the parser can try.
pub trait AddressDecoder: Sync {
    fn format(&self) -> AddressFormat;

    /// Decode `address`, or report why it is not in this format.
    fn try_decode(&self, address: &str, network: &NetworkParameters) -> Result<Decoded>;
}

pub struct Base58CheckDecoder;

impl AddressDecoder for Base58CheckDecoder {
    fn format(&self) -> AddressFormat {
        AddressFormat::Base58Check
    }

    fn try_decode(&self, address: &str, _network: &NetworkParameters) -> Result<Decoded> {
        let (version, payload) = base58check::decode(address)?;
        Ok(Decoded::Base58 { version, payload })
    }
}

pub struct Bech32Decoder;

impl AddressDecoder for Bech32Decoder {
    fn format(&self) -> AddressFormat {
        AddressFormat::Bech32
    }

    fn try_decode(&self, address: &str, _network: &NetworkParameters) -> Result<Decoded> {
        let (hrp, witness_version, program) = bech32::decode(address)?;
        Ok(Decoded::Bech32 {
            hrp,
            witness_version,
            program,
        })
    }
}

/// Falls back to the network's cashaddr prefix when the string has none.
pub struct CashAddrDecoder;

impl AddressDecoder for CashAddrDecoder {
    fn format(&self) -> AddressFormat {
        AddressFormat::CashAddr
    }

    fn try_decode(&self, address: &str, network: &NetworkParameters) -> Result<Decoded> {
        let (prefix, kind, hash) = cashaddr::decode(address, network.cashaddr_prefix.as_deref())?;
        let version = cashaddr::version_byte(kind, hash.len())?;
        Ok(Decoded::CashAddr {
            prefix,
            version,
            kind,
            hash,
        })
    }
}

/// The default decoder order.
pub static DECODERS: [&dyn AddressDecoder; 3] =
    [&Base58CheckDecoder, &Bech32Decoder, &CashAddrDecoder];

/// Try `decoders` in order and return the first success.
pub fn parse_with(
    decoders: &[&dyn AddressDecoder],
    address: &str,
    network: &NetworkParameters,
) -> Result<Decoded> {
    for decoder in decoders {
        match decoder.try_decode(address, network) {
            Ok(decoded) => {
                debug!("{:?} decoded {}", decoder.format(), address);
                return Ok(decoded);
            }
            Err(e) => debug!("{:?} rejected {}: {}", decoder.format(), address, e),
        }
    }
    Err(Error::UnsupportedAddressFormat(address.to_string()))
}

/// Decode with the default decoder order.
pub fn parse_decoded(address: &str, network: &NetworkParameters) -> Result<Decoded> {
    parse_with(&DECODERS, address, network)
}

/// Versioned payload of `address`.
pub fn parse(address: &str, network: &NetworkParameters) -> Result<Vec<u8>> {
    parse_decoded(address, network).map(|d| d.versioned_payload())
}

/// Hash payload of `address` with the version marker stripped.
pub fn parse_hash(address: &str, network: &NetworkParameters) -> Result<Vec<u8>> {
    parse_decoded(address, network).map(|d| d.hash().to_vec())
}
