//! Composite digests used by address encodings.

#![forbid(unsafe_code)]

/// RIPEMD160(SHA256(data)). Public key and script hash for P2PKH, P2SH and P2WPKH.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    crate::ripemd160::digest(&crate::sha256::digest(data))
}

/// SHA256(SHA256(data)). Base58Check checksums take the first 4 bytes.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    crate::sha256::digest(&crate::sha256::digest(data))
}

/// Single SHA-256. Script hash for P2WSH.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    crate::sha256::digest(data)
}
