//! CashAddr encoding.
//!
//! Layout: `prefix` `:` `version byte || hash (5-bit groups)` `checksum (8 symbols)`.
//!
//! Version byte:
//! - bit 7: reserved, must be 0
//! - bits 3-6: type (0 = P2PKH, 1 = P2SH)
//! - bits 0-2: hash size class (20, 24, 28, 32, 40, 48, 56, 64 bytes)
//!
//! The checksum is a 40-bit BCH code over the low 5 bits of each prefix
//! character, a zero separator, and the payload.

#![forbid(unsafe_code)]

use utxo_addr_core::{Error, Result};

use crate::base32::{from_base32, from_symbols, to_base32, to_symbols};

pub const SEPARATOR: char = ':';

/// Checksum length in symbols.
pub const CHECKSUM_LEN: usize = 8;

const GENERATORS: [u64; 5] = [
    0x98_f2bc_8e61,
    0x79_b76d_99e2,
    0xf3_3e5f_b3c4,
    0xae_2eab_e2a8,
    0x1e_4f43_e470,
];

/// Hash sizes indexed by the low three version bits.
const HASH_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

/// Script type carried in the version byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CashAddrType {
    P2pkh,
    P2sh,
}

impl CashAddrType {
    /// Type bits (before shifting into place).
    pub const fn type_bits(self) -> u8 {
        match self {
            Self::P2pkh => 0,
            Self::P2sh => 1,
        }
    }

    fn from_type_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::P2pkh),
            1 => Some(Self::P2sh),
            _ => None,
        }
    }
}

/// Build the version byte for a hash of `hash_len` bytes.
pub fn version_byte(kind: CashAddrType, hash_len: usize) -> Result<u8> {
    let size_bits = HASH_SIZES
        .iter()
        .position(|&n| n == hash_len)
        .ok_or(Error::InvalidLength {
            got: hash_len,
            reason: "cashaddr hash must be 20, 24, 28, 32, 40, 48, 56 or 64 bytes",
        })?;
    Ok((kind.type_bits() << 3) | size_bits as u8)
}

fn polymod(values: impl IntoIterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 == 1 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

fn expand_prefix(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

fn check_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(Error::InvalidHrp);
    }
    Ok(())
}

/// Encode `hash` as a CashAddr string including the `prefix:` part.
pub fn encode(prefix: &str, kind: CashAddrType, hash: &[u8]) -> Result<String> {
    let prefix = prefix.to_ascii_lowercase();
    check_prefix(&prefix)?;

    let mut body = Vec::with_capacity(1 + hash.len());
    body.push(version_byte(kind, hash.len())?);
    body.extend_from_slice(hash);

    let mut payload = to_base32(&body);
    let pm = polymod(
        expand_prefix(&prefix)
            .chain(payload.iter().copied())
            .chain([0u8; CHECKSUM_LEN]),
    );
    for i in 0..CHECKSUM_LEN {
        payload.push(((pm >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8);
    }

    let mut encoded = String::with_capacity(prefix.len() + 1 + payload.len());
    encoded.push_str(&prefix);
    encoded.push(SEPARATOR);
    encoded.extend(to_symbols(&payload));
    Ok(encoded)
}

/// Decode to `(prefix, type, hash)`.
///
/// Without an explicit `prefix:` the string is checked against
/// `default_prefix`; with one, the embedded prefix is used as-is.
pub fn decode(s: &str, default_prefix: Option<&str>) -> Result<(String, CashAddrType, Vec<u8>)> {
    if let Some((pos, ch)) = s.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(Error::InvalidCharacter { ch, pos });
    }
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let (prefix, payload_str, offset) = match s.find(SEPARATOR) {
        Some(sep) => (s[..sep].to_string(), &s[sep + 1..], sep + 1),
        None => {
            let prefix = default_prefix.ok_or(Error::MissingSeparator)?;
            (prefix.to_ascii_lowercase(), s.as_str(), 0)
        }
    };
    check_prefix(&prefix)?;

    let payload = from_symbols(payload_str, offset)?;
    if payload.len() <= CHECKSUM_LEN {
        return Err(Error::InvalidLength {
            got: payload.len(),
            reason: "cashaddr payload is shorter than the checksum",
        });
    }

    if polymod(expand_prefix(&prefix).chain(payload.iter().copied())) != 0 {
        return Err(Error::InvalidChecksum);
    }

    let body = from_base32(&payload[..payload.len() - CHECKSUM_LEN])?;
    let (&version, hash) = body.split_first().ok_or(Error::InvalidLength {
        got: 0,
        reason: "cashaddr payload has no version byte",
    })?;

    if version & 0x80 != 0 {
        return Err(Error::InvalidVersionByte(version));
    }
    let kind = CashAddrType::from_type_bits((version >> 3) & 0x0f)
        .ok_or(Error::InvalidVersionByte(version))?;
    let expected = HASH_SIZES[(version & 0x07) as usize];
    if hash.len() != expected {
        return Err(Error::InvalidHashLength {
            expected,
            got: hash.len(),
        });
    }

    Ok((prefix, kind, hash.to_vec()))
}
