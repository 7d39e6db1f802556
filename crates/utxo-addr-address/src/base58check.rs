//! Base58Check encoding.
//!
//! Format:
//! - Version byte (1 byte)
//! - Payload (hash, 20 bytes for standard addresses)
//! - Checksum: hash256(version || payload)[0:4] (4 bytes)
//! - Encoded: Base58(version || payload || checksum)

#![forbid(unsafe_code)]

use utxo_addr_core::{Error, Result};
use utxo_addr_crypto::{base58, hash256};

/// Checksum length in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Smallest decodable body: version byte plus checksum.
const MIN_DECODED_LEN: usize = 1 + CHECKSUM_LEN;

/// Longest string [`decode`] will convert; base58 conversion is quadratic in length.
pub const MAX_ENCODED_LEN: usize = 128;

/// Encode `payload` under `version`.
pub fn encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = hash256(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    base58::encode(&data)
}

/// Decode to `(version, payload)`, verifying the checksum.
pub fn decode(s: &str) -> Result<(u8, Vec<u8>)> {
    if s.len() > MAX_ENCODED_LEN {
        return Err(Error::InvalidLength {
            got: s.len(),
            reason: "base58check string exceeds 128 characters",
        });
    }

    let mut data = base58::decode(s)?;
    if data.len() < MIN_DECODED_LEN {
        return Err(Error::InvalidLength {
            got: data.len(),
            reason: "base58check needs a version byte and a 4-byte checksum",
        });
    }

    let body_len = data.len() - CHECKSUM_LEN;
    let expected = hash256(&data[..body_len]);
    if data[body_len..] != expected[..CHECKSUM_LEN] {
        return Err(Error::InvalidChecksum);
    }

    data.truncate(body_len);
    let payload = data.split_off(1);
    Ok((data[0], payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash_p2pkh() {
        assert_eq!(encode(0x00, &[0u8; 20]), "1111111111111111111114oLvT2");
        assert_eq!(encode(0x05, &[0u8; 20]), "31h1vYVSYuKP6AhS86fbRdMw9XHieotbST");
    }

    #[test]
    fn test_known_p2pkh() {
        let hash = hex::decode("76a04053bda0a88bda5177b86a15c3b29f559873").unwrap();
        assert_eq!(encode(0x00, &hash), "1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu");
        assert_eq!(decode("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu").unwrap(), (0x00, hash));
    }

    #[test]
    fn test_matches_bs58_check() {
        let hash = [0x42u8; 20];
        for version in [0x00, 0x05, 0x30, 0x6f, 0xc4] {
            let ours = encode(version, &hash);
            let reference = bs58::encode(&hash)
                .with_check_version(version)
                .into_string();
            assert_eq!(ours, reference);
        }
    }

    #[test]
    fn test_bad_checksum() {
        // Last character changed
        assert_eq!(
            decode("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggv"),
            Err(Error::InvalidChecksum)
        );
    }

    #[test]
    fn test_bad_character() {
        assert_eq!(
            decode("1BpEi6DfDAUFd7GtittLSdBeYJvcoaVgg0"),
            Err(Error::InvalidCharacter { ch: '0', pos: 33 })
        );
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(decode(""), Err(Error::InvalidLength { got: 0, .. })));
        assert!(matches!(decode("1111"), Err(Error::InvalidLength { got: 4, .. })));
    }

    #[test]
    fn test_oversized_input_rejected_before_decoding() {
        let long = "2".repeat(200_000);
        assert!(matches!(
            decode(&long),
            Err(Error::InvalidLength { got: 200_000, .. })
        ));
        assert!(matches!(
            decode(&"2".repeat(MAX_ENCODED_LEN + 1)),
            Err(Error::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_checksum_valid_junk_decodes() {
        let (version, payload) = decode("1111111111111111111111111111111111177fdsQ").unwrap();
        assert_eq!(version, 0x00);
        assert_eq!(payload, vec![0u8; 34]);
    }
}
