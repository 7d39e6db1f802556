//! 5-bit regrouping and the 32-symbol charset shared by Bech32 and CashAddr.

#![forbid(unsafe_code)]

use utxo_addr_core::{Error, Result};

/// Symbol alphabet. Both formats use the same one; they differ in checksum and framing.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const REVERSE_CHARSET: [i8; 128] = {
    let mut map = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        map[CHARSET[i] as usize] = i as i8;
        i += 1;
    }
    map
};

/// Map a lowercase symbol to its 5-bit value.
pub fn symbol_value(ch: char) -> Option<u8> {
    if !ch.is_ascii() {
        return None;
    }
    let value = REVERSE_CHARSET[ch as usize];
    if value < 0 {
        None
    } else {
        Some(value as u8)
    }
}

/// Map 5-bit values to symbols. Values are always < 32 here.
pub fn to_symbols(values: &[u8]) -> impl Iterator<Item = char> + '_ {
    values.iter().map(|&v| CHARSET[(v & 0x1f) as usize] as char)
}

/// Map symbols to 5-bit values. `offset` is added to reported error positions.
pub fn from_symbols(s: &str, offset: usize) -> Result<Vec<u8>> {
    s.chars()
        .enumerate()
        .map(|(i, ch)| {
            symbol_value(ch).ok_or(Error::InvalidCharacter {
                ch,
                pos: offset + i,
            })
        })
        .collect()
}

/// Regroup 8-bit bytes into 5-bit values, zero-padding the final group.
pub fn to_base32(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::with_capacity((data.len() * 8 + 4) / 5);

    for &byte in data {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(((acc >> bits) & 0x1f) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    if bits > 0 {
        result.push(((acc << (5 - bits)) & 0x1f) as u8);
    }

    result
}

/// Regroup 5-bit values into bytes.
///
/// Leftover bits must be fewer than 5 and all zero, otherwise
/// [`Error::InvalidPadding`].
pub fn from_base32(values: &[u8]) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::with_capacity(values.len() * 5 / 8);

    for &value in values {
        acc = (acc << 5) | (value & 0x1f) as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            result.push(((acc >> bits) & 0xff) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    if bits >= 5 || acc != 0 {
        return Err(Error::InvalidPadding);
    }

    Ok(result)
}
