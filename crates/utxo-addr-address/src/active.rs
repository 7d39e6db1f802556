//! Process-wide network selection.
//!
//! Every free function here snapshots the active network once and delegates
//! to an [`AddressContext`]. Selecting a network while another thread is
//! building addresses is a race on which network it sees; callers that mix
//! networks concurrently should hold their own [`AddressContext`] instead.

#![forbid(unsafe_code)]

use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use utxo_addr_core::Result;

use crate::builder::ScriptSource;
use crate::context::AddressContext;
use crate::network::{NetworkParameters, NetworkRegistry, DEFAULT_NETWORK};

struct Selection {
    registry: NetworkRegistry,
    active: NetworkParameters,
}

fn selection() -> &'static RwLock<Selection> {
    static SELECTION: OnceLock<RwLock<Selection>> = OnceLock::new();
    SELECTION.get_or_init(|| {
        let registry = NetworkRegistry::builtin();
        let active = registry
            .iter()
            .find(|n| n.name == DEFAULT_NETWORK)
            .cloned()
            .unwrap_or_else(crate::network::bitcoin_main);
        RwLock::new(Selection { registry, active })
    })
}

// Writers only replace whole fields, so a poisoned lock is still consistent.
fn read() -> RwLockReadGuard<'static, Selection> {
    selection().read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Selection> {
    selection().write().unwrap_or_else(PoisonError::into_inner)
}

/// Make `name` the active network.
pub fn select_network(name: &str) -> Result<()> {
    let mut selection = write();
    let params = selection.registry.get(name)?.clone();
    debug!("selected network {}", name);
    selection.active = params;
    Ok(())
}

/// A copy of the active network's parameters.
pub fn active_network() -> NetworkParameters {
    read().active.clone()
}

/// Add a network to the process-wide registry so it can be selected.
pub fn register_network(params: NetworkParameters) -> Result<()> {
    write().registry.register(params)
}

/// Names of every selectable network.
pub fn registered_networks() -> Vec<String> {
    read().registry.names().map(str::to_string).collect()
}

/// Context bound to the network active right now.
pub fn context() -> Result<AddressContext> {
    AddressContext::new(active_network())
}

/// Byte input is hashed as a script; wrap an existing hash in [`ScriptSource::Hash`].
pub fn make_p2sh_address<'a>(script: impl Into<ScriptSource<'a>>) -> Result<String> {
    context()?.make_p2sh_address(script)
}

pub fn make_p2wsh_address<'a>(script: impl Into<ScriptSource<'a>>) -> Result<String> {
    context()?.make_p2wsh_address(script)
}

pub fn make_p2pkh_address(pubkey_or_hash: &[u8]) -> Result<String> {
    context()?.make_p2pkh_address(pubkey_or_hash)
}

pub fn make_p2wpkh_address(pubkey_or_hash: &[u8]) -> Result<String> {
    context()?.make_p2wpkh_address(pubkey_or_hash)
}

pub fn make_legacy_p2sh_address<'a>(script: impl Into<ScriptSource<'a>>) -> Result<String> {
    context()?.make_legacy_p2sh_address(script)
}

pub fn make_sh_address<'a>(script: impl Into<ScriptSource<'a>>) -> Result<String> {
    context()?.make_sh_address(script)
}

pub fn make_legacy_p2pkh_address(pubkey_or_hash: &[u8]) -> Result<String> {
    context()?.make_legacy_p2pkh_address(pubkey_or_hash)
}

pub fn make_pkh_address(pubkey_or_hash: &[u8]) -> Result<String> {
    context()?.make_pkh_address(pubkey_or_hash)
}

pub fn parse(address: &str) -> Result<Vec<u8>> {
    context()?.parse(address)
}

pub fn parse_hash(address: &str) -> Result<Vec<u8>> {
    context()?.parse_hash(address)
}

pub fn from_output_script(script: &[u8]) -> Result<String> {
    context()?.from_output_script(script)
}

pub fn to_output_script(address: &str) -> Result<Vec<u8>> {
    context()?.to_output_script(address)
}
