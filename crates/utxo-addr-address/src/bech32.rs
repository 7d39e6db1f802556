//! Bech32 segwit address encoding (BIP-173).
//!
//! Layout: `hrp` `1` `witness_version` `program (5-bit groups)` `checksum (6 symbols)`.
//! Only the original bech32 constant is implemented.

#![forbid(unsafe_code)]

use utxo_addr_core::{Error, Result};

use crate::base32::{from_base32, from_symbols, to_base32, to_symbols};

/// Separator between the human-readable prefix and the data part.
pub const SEPARATOR: char = '1';

/// Checksum length in symbols.
pub const CHECKSUM_LEN: usize = 6;

/// Shortest and longest encodable address.
pub const MIN_LEN: usize = 8;
pub const MAX_LEN: usize = 90;

const GENERATORS: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Highest witness version (OP_16).
const MAX_WITNESS_VERSION: u8 = 16;

fn polymod(values: impl IntoIterator<Item = u8>) -> u32 {
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ value as u32;
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// High bits of each hrp byte, a zero, then the low bits.
fn expand_hrp(hrp: &str) -> impl Iterator<Item = u8> + '_ {
    hrp.bytes()
        .map(|b| b >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.bytes().map(|b| b & 0x1f))
}

fn create_checksum(hrp: &str, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let values = expand_hrp(hrp)
        .chain(data.iter().copied())
        .chain([0u8; CHECKSUM_LEN]);
    let pm = polymod(values) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((pm >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
    }
    checksum
}

fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    polymod(expand_hrp(hrp).chain(data.iter().copied())) == 1
}

fn check_hrp(hrp: &str) -> Result<()> {
    if hrp.is_empty() || !hrp.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(Error::InvalidHrp);
    }
    Ok(())
}

fn check_program(witness_version: u8, program: &[u8]) -> Result<()> {
    if witness_version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidWitnessVersion(witness_version));
    }
    if !(2..=40).contains(&program.len()) {
        return Err(Error::InvalidLength {
            got: program.len(),
            reason: "witness program must be 2 to 40 bytes",
        });
    }
    if witness_version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(Error::InvalidLength {
            got: program.len(),
            reason: "version 0 witness program must be 20 or 32 bytes",
        });
    }
    Ok(())
}

/// Encode a witness program. The result is always lowercase.
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String> {
    let hrp = hrp.to_ascii_lowercase();
    check_hrp(&hrp)?;
    check_program(witness_version, program)?;

    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5 + CHECKSUM_LEN);
    data.push(witness_version);
    data.extend(to_base32(program));
    let checksum = create_checksum(&hrp, &data);
    data.extend_from_slice(&checksum);

    let mut encoded = String::with_capacity(hrp.len() + 1 + data.len());
    encoded.push_str(&hrp);
    encoded.push(SEPARATOR);
    encoded.extend(to_symbols(&data));

    if encoded.len() > MAX_LEN {
        return Err(Error::InvalidLength {
            got: encoded.len(),
            reason: "bech32 string exceeds 90 characters",
        });
    }
    Ok(encoded)
}

/// Decode to `(hrp, witness_version, program)`.
///
/// The returned hrp is lowercase. All-uppercase input is accepted; mixed case is not.
pub fn decode(s: &str) -> Result<(String, u8, Vec<u8>)> {
    if let Some((pos, ch)) = s.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(Error::InvalidCharacter { ch, pos });
    }
    if !(MIN_LEN..=MAX_LEN).contains(&s.len()) {
        return Err(Error::InvalidLength {
            got: s.len(),
            reason: "bech32 string must be 8 to 90 characters",
        });
    }
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let sep = s.rfind(SEPARATOR).ok_or(Error::MissingSeparator)?;
    let (hrp, data_part) = (&s[..sep], &s[sep + 1..]);
    check_hrp(hrp)?;
    if data_part.len() < CHECKSUM_LEN {
        return Err(Error::InvalidLength {
            got: data_part.len(),
            reason: "bech32 data part is shorter than the checksum",
        });
    }

    let data = from_symbols(data_part, sep + 1)?;
    if !verify_checksum(hrp, &data) {
        return Err(Error::InvalidChecksum);
    }

    let values = &data[..data.len() - CHECKSUM_LEN];
    let (&witness_version, program) = values.split_first().ok_or(Error::InvalidLength {
        got: 0,
        reason: "bech32 data part has no witness version",
    })?;
    if witness_version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidWitnessVersion(witness_version));
    }

    let program = from_base32(program)?;
    check_program(witness_version, &program)?;
    Ok((hrp.to_string(), witness_version, program))
}
