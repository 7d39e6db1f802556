//! Hash primitives for utxo-addr.
//!
//! All implementations are from scratch. Reference crates (sha2,
//! bitcoin_hashes, bs58) are dev-dependencies only.

#![forbid(unsafe_code)]

pub mod base58;
pub mod hash;
pub mod ripemd160;
pub mod sha256;

pub use hash::{hash160, hash256, sha256};
