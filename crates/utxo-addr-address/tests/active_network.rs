//! Known-answer tests through the process-wide network selection.
//!
//! Selection is global, so every test takes `LOCK` and resets to
//! bitcoin_main when its guard drops.

mod common;

use std::sync::{Mutex, MutexGuard};

use common::*;
use utxo_addr_address as addr;
use utxo_addr_address::{Error, ScriptSource};

static LOCK: Mutex<()> = Mutex::new(());

struct Network {
    _lock: MutexGuard<'static, ()>,
}

impl Network {
    fn select(name: &str) -> Self {
        let lock = LOCK.lock().unwrap_or_else(|e| e.into_inner());
        addr::select_network(name).unwrap();
        Self { _lock: lock }
    }
}

impl Drop for Network {
    fn drop(&mut self) {
        addr::select_network("bitcoin_main").unwrap();
    }
}

#[test]
fn test_make_p2sh_address() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(addr::make_p2sh_address("OP_IF").unwrap(), OP_IF_P2SH);
}

#[test]
fn test_make_p2sh_address_msig() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(addr::make_p2sh_address(MSIG_TWO_TWO_SCRIPT).unwrap(), MSIG_TWO_TWO_P2SH);
}

#[test]
fn test_make_p2wsh_address() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(addr::make_p2wsh_address(MSIG_TWO_TWO_SCRIPT).unwrap(), P2WSH_ADDRESS);
}

#[test]
fn test_make_p2pkh_address() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(addr::make_p2pkh_address(&[0x00; 65]).unwrap(), P2PKH_0);
    assert_eq!(addr::make_p2pkh_address(&[0x11; 65]).unwrap(), P2PKH_1);
}

#[test]
fn test_make_p2wpkh_address() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(addr::make_p2wpkh_address(&unhex(PUBKEY)).unwrap(), P2WPKH_ADDRESS);
}

#[test]
fn test_parse() {
    let _net = Network::select("bitcoin_main");
    let cases = [
        (OP_IF_P2SH, format!("05{}", OP_IF_SCRIPT_HASH)),
        (MSIG_TWO_TWO_P2SH, format!("05{}", MSIG_TWO_TWO_SCRIPT_HASH)),
        (P2WSH_ADDRESS, format!("0020{}", P2WSH_SCRIPT_HASH)),
        (P2WPKH_ADDRESS, format!("0014{}", PUBKEY_HASH)),
        (P2PKH_0, format!("00{}", PKH_0)),
    ];
    for (address, expected) in cases {
        assert_eq!(hex::encode(addr::parse(address).unwrap()), expected, "{}", address);
    }

    let err = addr::parse("This is not a valid address.").unwrap_err();
    assert!(err.to_string().contains("Unsupported address format. Got: "));
}

#[test]
fn test_parse_hash() {
    let _net = Network::select("bitcoin_main");
    let cases = [
        (OP_IF_P2SH, OP_IF_SCRIPT_HASH),
        (MSIG_TWO_TWO_P2SH, MSIG_TWO_TWO_SCRIPT_HASH),
        (P2WSH_ADDRESS, P2WSH_SCRIPT_HASH),
        (P2WPKH_ADDRESS, PUBKEY_HASH),
        (P2PKH_0, PKH_0),
    ];
    for (address, expected) in cases {
        assert_eq!(hex::encode(addr::parse_hash(address).unwrap()), expected, "{}", address);
    }

    assert!(matches!(
        addr::parse("bc1blahblahblah"),
        Err(Error::UnsupportedAddressFormat(ref s)) if s == "bc1blahblahblah"
    ));
}

#[test]
fn test_parse_hash_cashaddr_network() {
    let _net = Network::select("bitcoin_cash_main");
    assert_eq!(hex::encode(addr::parse_hash(OP_IF_P2SH).unwrap()), OP_IF_SCRIPT_HASH);
    assert_eq!(hex::encode(addr::parse_hash(OP_IF_CASHADDR).unwrap()), OP_IF_SCRIPT_HASH);
    assert_eq!(
        hex::encode(addr::parse_hash(CASHADDR_P2PKH_ADDRESS).unwrap()),
        PUBKEY_HASH
    );
}

#[test]
fn test_cashaddrs() {
    let _net = Network::select("bitcoin_cash_main");
    assert_eq!(addr::make_legacy_p2sh_address("OP_IF").unwrap(), OP_IF_P2SH);
    assert_eq!(addr::make_sh_address("OP_IF").unwrap(), OP_IF_CASHADDR);
    assert_eq!(
        addr::make_legacy_p2pkh_address(&unhex(PUBKEY)).unwrap(),
        LEGACY_P2PKH_ADDRESS
    );
    assert_eq!(addr::make_pkh_address(&unhex(PUBKEY)).unwrap(), CASHADDR_P2PKH_ADDRESS);
}

#[test]
fn test_dispatching_builders_on_legacy_network() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(addr::make_sh_address("OP_IF").unwrap(), OP_IF_P2SH);
    assert_eq!(addr::make_pkh_address(&unhex(PUBKEY)).unwrap(), LEGACY_P2PKH_ADDRESS);
}

#[test]
fn test_from_output_script() {
    let _net = Network::select("bitcoin_main");
    let cases = [
        (OP_IF_OUTPUT_SCRIPT, OP_IF_P2SH),
        (P2WSH_OUTPUT_SCRIPT, P2WSH_ADDRESS),
        (PKH_0_OUTPUT_SCRIPT, P2PKH_0),
        (P2WPKH_OUTPUT_SCRIPT, P2WPKH_ADDRESS),
    ];
    for (script, expected) in cases {
        assert_eq!(addr::from_output_script(&unhex(script)).unwrap(), expected);
    }

    let err = addr::from_output_script(&[0x8e; 34]).unwrap_err();
    assert_eq!(err, Error::UnparseableScript);
    assert!(err.to_string().contains("Cannot parse address from script."));
}

#[test]
fn test_cashaddr_from_output_script() {
    let _net = Network::select("bitcoin_cash_main");
    assert_eq!(
        addr::from_output_script(&unhex(PKH_0_OUTPUT_SCRIPT)).unwrap(),
        P2PKH_0_CASHADDR
    );
    assert_eq!(
        addr::from_output_script(&unhex(OP_IF_OUTPUT_SCRIPT)).unwrap(),
        OP_IF_CASHADDR
    );
}

#[test]
fn test_to_output_script() {
    let _net = Network::select("bitcoin_main");
    let cases = [
        (OP_IF_P2SH, OP_IF_OUTPUT_SCRIPT),
        (P2WSH_ADDRESS, P2WSH_OUTPUT_SCRIPT),
        (P2PKH_0, PKH_0_OUTPUT_SCRIPT),
        (P2WPKH_ADDRESS, P2WPKH_OUTPUT_SCRIPT),
    ];
    for (address, expected) in cases {
        assert_eq!(hex::encode(addr::to_output_script(address).unwrap()), expected);
    }

    let err = addr::to_output_script(JUNK_BASE58).unwrap_err();
    assert!(matches!(err, Error::UnparseableAddress(_)));
    assert!(err.to_string().contains("Cannot parse output script from address."));
}

#[test]
fn test_cashaddr_to_output_script() {
    let _net = Network::select("bitcoin_cash_main");
    assert_eq!(
        hex::encode(addr::to_output_script(OP_IF_CASHADDR).unwrap()),
        OP_IF_OUTPUT_SCRIPT
    );
    assert_eq!(
        hex::encode(addr::to_output_script(P2PKH_0_CASHADDR).unwrap()),
        PKH_0_OUTPUT_SCRIPT
    );
}

#[test]
fn test_select_unknown_network() {
    let _net = Network::select("bitcoin_main");
    assert_eq!(
        addr::select_network("no_such_chain"),
        Err(Error::UnknownNetwork("no_such_chain".to_string()))
    );
    assert_eq!(addr::active_network().name, "bitcoin_main");
}

#[test]
fn test_register_and_select_custom_network() {
    let _net = Network::select("bitcoin_main");
    let params: addr::NetworkParameters = serde_json::from_str(
        r#"{"name": "custom_test_chain", "p2pkh_version": 30, "p2sh_version": 22, "bech32_hrp": "cst"}"#,
    )
    .unwrap();

    // Another test run in the same process may have registered it already
    match addr::register_network(params) {
        Ok(()) | Err(Error::DuplicateNetwork(_)) => {}
        Err(e) => panic!("unexpected error: {}", e),
    }
    assert!(addr::registered_networks().iter().any(|n| n == "custom_test_chain"));

    addr::select_network("custom_test_chain").unwrap();
    let address = addr::make_p2sh_address(ScriptSource::Hash(&unhex(OP_IF_SCRIPT_HASH))).unwrap();
    assert_eq!(address, "ACZiUr7z4fdyi14taUKsPKQrZhbD9kE8ER");
    assert_eq!(hex::encode(addr::parse(&address).unwrap()), format!("16{}", OP_IF_SCRIPT_HASH));
    assert!(addr::make_p2wpkh_address(&unhex(PUBKEY)).unwrap().starts_with("cst1q"));
}
