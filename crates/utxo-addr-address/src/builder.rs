//! Address construction from public keys, scripts and hashes.

#![forbid(unsafe_code)]

use log::trace;
use utxo_addr_core::{Error, Result};
use utxo_addr_crypto::{hash160, sha256};
use utxo_addr_script::ScriptCompiler;

use crate::address::Address;
use crate::network::NetworkParameters;

/// What a script-hash address is built from.
///
/// Byte slices and arrays convert to [`ScriptSource::Bytes`] whatever their
/// length, so a 20-byte array is hashed as a script. Pass an existing hash as
/// [`ScriptSource::Hash`]. The key builders differ here: they take any 20-byte
/// input as a key hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptSource<'a> {
    /// Assembly text, compiled before hashing.
    Asm(&'a str),
    /// Serialized script, hashed as-is.
    Bytes(&'a [u8]),
    /// An existing script hash, used without hashing.
    Hash(&'a [u8]),
}

impl<'a> From<&'a str> for ScriptSource<'a> {
    fn from(asm: &'a str) -> Self {
        Self::Asm(asm)
    }
}

impl<'a> From<&'a String> for ScriptSource<'a> {
    fn from(asm: &'a String) -> Self {
        Self::Asm(asm)
    }
}

impl<'a> From<&'a [u8]> for ScriptSource<'a> {
    fn from(script: &'a [u8]) -> Self {
        Self::Bytes(script)
    }
}

impl<'a> From<&'a Vec<u8>> for ScriptSource<'a> {
    fn from(script: &'a Vec<u8>) -> Self {
        Self::Bytes(script)
    }
}

/// Always script bytes, even for `N == 20`.
impl<'a, const N: usize> From<&'a [u8; N]> for ScriptSource<'a> {
    fn from(script: &'a [u8; N]) -> Self {
        Self::Bytes(script)
    }
}

/// A 20-byte input is taken as an existing hash; anything else is a key to hash.
fn key_hash(pubkey_or_hash: &[u8]) -> [u8; 20] {
    match pubkey_or_hash.try_into() {
        Ok(hash) => hash,
        Err(_) => hash160(pubkey_or_hash),
    }
}

fn existing_hash<const N: usize>(hash: &[u8]) -> Result<[u8; N]> {
    hash.try_into().map_err(|_| Error::InvalidHashLength {
        expected: N,
        got: hash.len(),
    })
}

/// Digest a script source, compiling assembly first. Hash sources pass through.
fn script_digest<C, const N: usize>(
    compiler: &C,
    source: ScriptSource<'_>,
    digest: fn(&[u8]) -> [u8; N],
) -> Result<[u8; N]>
where
    C: ScriptCompiler + ?Sized,
{
    match source {
        ScriptSource::Hash(hash) => existing_hash(hash),
        ScriptSource::Bytes(script) => Ok(digest(script)),
        ScriptSource::Asm(asm) => {
            let script = compiler.compile(asm)?;
            trace!("hashing {}-byte script compiled from {:?}", script.len(), asm);
            Ok(digest(&script))
        }
    }
}

/// hash160 of the script, or the given 20-byte hash.
pub fn script_hash160<C>(compiler: &C, source: ScriptSource<'_>) -> Result<[u8; 20]>
where
    C: ScriptCompiler + ?Sized,
{
    script_digest(compiler, source, hash160)
}

/// sha256 of the script, or the given 32-byte hash.
pub fn script_sha256<C>(compiler: &C, source: ScriptSource<'_>) -> Result<[u8; 32]>
where
    C: ScriptCompiler + ?Sized,
{
    script_digest(compiler, source, sha256)
}

/// Base58Check P2PKH under the network's p2pkh version.
pub fn p2pkh(network: &NetworkParameters, pubkey_or_hash: &[u8]) -> Address {
    Address::LegacyP2pkh {
        version: network.p2pkh_version,
        hash: key_hash(pubkey_or_hash),
    }
}

/// Base58Check P2SH under the network's p2sh version.
pub fn p2sh<C>(network: &NetworkParameters, compiler: &C, source: ScriptSource<'_>) -> Result<Address>
where
    C: ScriptCompiler + ?Sized,
{
    Ok(Address::LegacyP2sh {
        version: network.p2sh_version,
        hash: script_hash160(compiler, source)?,
    })
}

/// Bech32 witness v0 key hash under the network's hrp.
pub fn p2wpkh(network: &NetworkParameters, pubkey_or_hash: &[u8]) -> Result<Address> {
    Address::p2wpkh(network, key_hash(pubkey_or_hash))
}

/// Bech32 witness v0 script hash under the network's hrp.
pub fn p2wsh<C>(network: &NetworkParameters, compiler: &C, source: ScriptSource<'_>) -> Result<Address>
where
    C: ScriptCompiler + ?Sized,
{
    Address::p2wsh(network, script_sha256(compiler, source)?)
}

/// P2PKH in the network's preferred encoding.
pub fn pkh(network: &NetworkParameters, pubkey_or_hash: &[u8]) -> Result<Address> {
    Address::pkh(network, key_hash(pubkey_or_hash))
}

/// P2SH in the network's preferred encoding.
pub fn sh<C>(network: &NetworkParameters, compiler: &C, source: ScriptSource<'_>) -> Result<Address>
where
    C: ScriptCompiler + ?Sized,
{
    Address::sh(network, script_hash160(compiler, source)?)
}
