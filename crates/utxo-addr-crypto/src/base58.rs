//! Base58 encoding (Bitcoin alphabet).
//!
//! Excludes 0, O, I, l to avoid confusion. Each leading zero byte maps to a
//! leading '1' and back, so the conversion is length-preserving for zeros.

#![forbid(unsafe_code)]

use utxo_addr_core::{Error, Result};

/// Base58 alphabet.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Reverse lookup for ASCII input; 0xff marks characters outside the alphabet.
const DECODE_MAP: [u8; 128] = {
    let mut map = [0xffu8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

/// Encode bytes to Base58 string.
pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    // log(256)/log(58) ≈ 1.37
    let size = (data.len() * 138 / 100) + 1;
    let mut buf = vec![0u8; size];

    for &byte in data {
        let mut carry = byte as u32;
        for digit in buf.iter_mut().rev() {
            carry += (*digit as u32) * 256;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
    }

    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());

    let mut result = String::with_capacity(leading_zeros + buf.len() - first_non_zero);
    for _ in 0..leading_zeros {
        result.push('1');
    }
    for &digit in &buf[first_non_zero..] {
        result.push(ALPHABET[digit as usize] as char);
    }

    result
}

/// Decode a Base58 string to bytes.
///
/// Fails with [`Error::InvalidCharacter`] on the first symbol outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let mut digits = Vec::with_capacity(s.len());
    for (pos, ch) in s.chars().enumerate() {
        let value = if ch.is_ascii() { DECODE_MAP[ch as usize] } else { 0xff };
        if value == 0xff {
            return Err(Error::InvalidCharacter { ch, pos });
        }
        digits.push(value);
    }

    let leading_ones = digits.iter().take_while(|&&d| d == 0).count();

    // log(58)/log(256) ≈ 0.733
    let size = (digits.len() * 733 / 1000) + 1;
    let mut buf = vec![0u8; size];

    for &digit in &digits {
        let mut carry = digit as u32;
        for byte in buf.iter_mut().rev() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
    }

    let first_non_zero = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());

    let mut result = vec![0u8; leading_ones];
    result.extend_from_slice(&buf[first_non_zero..]);
    Ok(result)
}
