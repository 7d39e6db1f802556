//! Address encoding for UTXO chains.
//!
//! Three text encodings (Base58Check, Bech32, CashAddr) over one network
//! parameter table, plus conversion to and from canonical output scripts.
//! Use [`AddressContext`] for explicit networks or the free functions for
//! the process-wide selection.

#![forbid(unsafe_code)]

pub mod active;
pub mod address;
pub mod base32;
pub mod base58check;
pub mod bech32;
pub mod builder;
pub mod cashaddr;
pub mod context;
pub mod network;
pub mod parser;

pub use active::{
    active_network, from_output_script, make_legacy_p2pkh_address, make_legacy_p2sh_address,
    make_p2pkh_address, make_p2sh_address, make_p2wpkh_address, make_p2wsh_address,
    make_pkh_address, make_sh_address, parse, parse_hash, register_network, registered_networks,
    select_network, to_output_script,
};
pub use address::{Address, ScriptKind};
pub use builder::ScriptSource;
pub use cashaddr::CashAddrType;
pub use context::AddressContext;
pub use network::{NetworkParameters, NetworkRegistry, PkhEncoding, DEFAULT_NETWORK};
pub use parser::{AddressDecoder, AddressFormat, Decoded};
pub use utxo_addr_core::{Error, Result};
