//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub const OP_IF_P2SH: &str = "3MpTk145zbm5odhRALfT9BnUs8DB5w4ydw";
pub const OP_IF_CASHADDR: &str = "bitcoincash:prwv474e2d35xuf77ju6r4zr5xmv4ryd6ynr4c5mld";
pub const OP_IF_SCRIPT_HASH: &str = "dccafab9536343713ef4b9a1d443a1b6ca8c8dd1";
pub const OP_IF_OUTPUT_SCRIPT: &str = "a914dccafab9536343713ef4b9a1d443a1b6ca8c8dd187";

pub const MSIG_TWO_TWO_SCRIPT: &str = "OP_2 \
    0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798 \
    02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5 \
    OP_2 OP_CHECKMULTISIG";
pub const MSIG_TWO_TWO_P2SH: &str = "33RQmypKhD6f4tMquiR5a3C6dRT7eBpaiG";
pub const MSIG_TWO_TWO_SCRIPT_HASH: &str = "12fcac201d73f5b5dba0f1f22c40f02da17bb4a4";

pub const P2WSH_ADDRESS: &str = "bc1qnwvyc7aw8m7acw3lpgs0lqdlaz0drls8luf72cs5nmn9f0kcghdse7d78q";
pub const P2WSH_SCRIPT_HASH: &str =
    "9b984c7bae3efddc3a3f0a20ff81bfe89ed1fe07ff13e562149ee654bed845db";
pub const P2WSH_OUTPUT_SCRIPT: &str =
    "00209b984c7bae3efddc3a3f0a20ff81bfe89ed1fe07ff13e562149ee654bed845db";

pub const P2PKH_0: &str = "13VmALKHkCdSN1JULkP6RqW3LcbpWvgryV";
pub const P2PKH_0_CASHADDR: &str = "bitcoincash:qqdkpscah22q836dsxhj2hcvxq9la4065v92pm9f84";
pub const PKH_0: &str = "1b60c31dba9403c74d81af255f0c300bfed5faa3";
pub const PKH_0_OUTPUT_SCRIPT: &str = "76a9141b60c31dba9403c74d81af255f0c300bfed5faa388ac";
pub const P2PKH_1: &str = "1N59mqr5yg38K11PTY2HdZTN7KmAHeCyHE";

/// secp256k1 generator, compressed.
pub const PUBKEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
pub const PUBKEY_HASH: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";
pub const P2WPKH_ADDRESS: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
pub const P2WPKH_OUTPUT_SCRIPT: &str = "0014751e76e8199196d454941c45d1b3a323f1433bd6";
pub const LEGACY_P2PKH_ADDRESS: &str = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH";
pub const CASHADDR_P2PKH_ADDRESS: &str = "bitcoincash:qp63uahgrxged4z5jswyt5dn5v3lzsem6cy4spdc2h";

/// Base58Check-valid, but 34 zero bytes under version 0x00.
pub const JUNK_BASE58: &str = "1111111111111111111111111111111111177fdsQ";

pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}
