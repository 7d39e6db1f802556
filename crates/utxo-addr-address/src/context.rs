//! Caller-held encoding context.
//!
//! An [`AddressContext`] owns the network parameters and the script compiler
//! every operation needs, so results depend on nothing but its arguments.
//! Prefer it over the process-wide selection in [`crate::active`] whenever
//! more than one network is in play.

#![forbid(unsafe_code)]

use utxo_addr_core::Result;
use utxo_addr_script::{Assembler, ScriptCompiler};

use crate::address::Address;
use crate::builder::{self, ScriptSource};
use crate::network::{NetworkParameters, NetworkRegistry};
use crate::parser::{self, Decoded};

#[derive(Clone, Debug)]
pub struct AddressContext<C = Assembler> {
    network: NetworkParameters,
    compiler: C,
}

impl AddressContext<Assembler> {
    /// Context for `network`, which must pass [`NetworkParameters::validate`].
    pub fn new(network: NetworkParameters) -> Result<Self> {
        Self::with_compiler(network, Assembler)
    }

    /// Context for a built-in network.
    pub fn builtin(name: &str) -> Result<Self> {
        Self::new(NetworkRegistry::builtin().get(name)?.clone())
    }
}

impl<C: ScriptCompiler> AddressContext<C> {
    pub fn with_compiler(network: NetworkParameters, compiler: C) -> Result<Self> {
        network.validate()?;
        Ok(Self { network, compiler })
    }

    pub fn network(&self) -> &NetworkParameters {
        &self.network
    }

    pub fn make_p2pkh_address(&self, pubkey_or_hash: &[u8]) -> Result<String> {
        builder::p2pkh(&self.network, pubkey_or_hash).encode()
    }

    /// `script` is assembly, script bytes or an existing hash; byte input,
    /// including a 20-byte array, is hashed (see [`ScriptSource`]).
    pub fn make_p2sh_address<'a>(&self, script: impl Into<ScriptSource<'a>>) -> Result<String> {
        builder::p2sh(&self.network, &self.compiler, script.into())?.encode()
    }

    pub fn make_p2wpkh_address(&self, pubkey_or_hash: &[u8]) -> Result<String> {
        builder::p2wpkh(&self.network, pubkey_or_hash)?.encode()
    }

    pub fn make_p2wsh_address<'a>(&self, script: impl Into<ScriptSource<'a>>) -> Result<String> {
        builder::p2wsh(&self.network, &self.compiler, script.into())?.encode()
    }

    /// Base58Check regardless of the network's preferred encoding.
    pub fn make_legacy_p2pkh_address(&self, pubkey_or_hash: &[u8]) -> Result<String> {
        self.make_p2pkh_address(pubkey_or_hash)
    }

    /// Base58Check regardless of the network's preferred encoding.
    pub fn make_legacy_p2sh_address<'a>(&self, script: impl Into<ScriptSource<'a>>) -> Result<String> {
        self.make_p2sh_address(script)
    }

    /// CashAddr on cashaddr networks, Base58Check elsewhere.
    pub fn make_pkh_address(&self, pubkey_or_hash: &[u8]) -> Result<String> {
        builder::pkh(&self.network, pubkey_or_hash)?.encode()
    }

    /// CashAddr on cashaddr networks, Base58Check elsewhere.
    pub fn make_sh_address<'a>(&self, script: impl Into<ScriptSource<'a>>) -> Result<String> {
        builder::sh(&self.network, &self.compiler, script.into())?.encode()
    }

    pub fn decode(&self, address: &str) -> Result<Decoded> {
        parser::parse_decoded(address, &self.network)
    }

    pub fn parse(&self, address: &str) -> Result<Vec<u8>> {
        parser::parse(address, &self.network)
    }

    pub fn parse_hash(&self, address: &str) -> Result<Vec<u8>> {
        parser::parse_hash(address, &self.network)
    }

    /// Decode and interpret `address` under this context's network.
    pub fn parse_address(&self, address: &str) -> Result<Address> {
        let decoded = self.decode(address)?;
        Address::from_decoded(decoded, &self.network, address)
    }

    pub fn from_output_script(&self, script: &[u8]) -> Result<String> {
        Address::from_script(script, &self.network)?.encode()
    }

    pub fn to_output_script(&self, address: &str) -> Result<Vec<u8>> {
        Ok(self.parse_address(address)?.script_pubkey())
    }
}
