//! Script assembler.
//!
//! Turns a whitespace-separated description such as
//! `OP_2 <pubkey hex> <pubkey hex> OP_2 OP_CHECKMULTISIG` into script bytes.
//! Tokens starting with `OP_` are looked up in the opcode table; every other
//! token is hex data and is emitted as a minimal push.

#![forbid(unsafe_code)]

use log::trace;
use utxo_addr_core::{Error, Result};

use crate::opcodes::{self, MAX_DIRECT_PUSH, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};

/// Something that can turn a script description into script bytes.
pub trait ScriptCompiler {
    fn compile(&self, description: &str) -> Result<Vec<u8>>;
}

/// The default [`ScriptCompiler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Assembler;

impl ScriptCompiler for Assembler {
    fn compile(&self, description: &str) -> Result<Vec<u8>> {
        compile(description)
    }
}

/// Compile a script description with the default assembler.
pub fn compile(description: &str) -> Result<Vec<u8>> {
    let mut script = Vec::new();

    for token in description.split_whitespace() {
        if token.starts_with("OP_") {
            let op = opcodes::by_name(token)
                .ok_or_else(|| Error::ScriptCompile(format!("unknown opcode {}", token)))?;
            script.push(op);
        } else {
            let data = hex::decode(token).map_err(|e| {
                Error::ScriptCompile(format!("invalid push data {}: {}", token, e))
            })?;
            push_bytes(&mut script, &data)?;
        }
    }

    trace!("compiled {:?} to {} bytes", description, script.len());
    Ok(script)
}

/// Append `data` to `script` behind the shortest push prefix that fits it.
pub fn push_bytes(script: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    let len = data.len();
    if len <= MAX_DIRECT_PUSH {
        script.push(len as u8);
    } else if len <= 0xff {
        script.push(OP_PUSHDATA1);
        script.push(len as u8);
    } else if len <= 0xffff {
        script.push(OP_PUSHDATA2);
        script.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        let len = u32::try_from(len)
            .map_err(|_| Error::ScriptCompile(format!("push of {} bytes is too large", len)))?;
        script.push(OP_PUSHDATA4);
        script.extend_from_slice(&len.to_le_bytes());
    }
    script.extend_from_slice(data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_opcode() {
        assert_eq!(compile("OP_IF").unwrap(), vec![0x63]);
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(compile("").unwrap(), Vec::<u8>::new());
        assert_eq!(compile("   ").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_p2pkh_template() {
        let script =
            compile("OP_DUP OP_HASH160 751e76e8199196d454941c45d1b3a323f1433bd6 OP_EQUALVERIFY OP_CHECKSIG")
                .unwrap();
        assert_eq!(
            hex::encode(script),
            "76a914751e76e8199196d454941c45d1b3a323f1433bd688ac"
        );
    }

    #[test]
    fn test_multisig() {
        let script = compile(
            "OP_2 \
             0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798 \
             02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5 \
             OP_2 OP_CHECKMULTISIG",
        )
        .unwrap();
        assert_eq!(script.len(), 71);
        assert_eq!(script[0], 0x52);
        assert_eq!(script[1], 0x21);
        assert_eq!(&script[69..], &[0x52, 0xae]);
    }

    #[test]
    fn test_push_prefixes() {
        let mut script = Vec::new();
        push_bytes(&mut script, &[0xaa; 75]).unwrap();
        assert_eq!(script[0], 75);

        let mut script = Vec::new();
        push_bytes(&mut script, &[0xaa; 76]).unwrap();
        assert_eq!(&script[..2], &[OP_PUSHDATA1, 76]);

        let mut script = Vec::new();
        push_bytes(&mut script, &[0xaa; 256]).unwrap();
        assert_eq!(&script[..3], &[OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(script.len(), 259);
    }

    #[test]
    fn test_unknown_opcode() {
        let err = compile("OP_IF OP_BOGUS").unwrap_err();
        assert!(matches!(err, Error::ScriptCompile(ref msg) if msg.contains("OP_BOGUS")));
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(compile("abc"), Err(Error::ScriptCompile(_))));
        assert!(matches!(compile("zz"), Err(Error::ScriptCompile(_))));
    }

    #[test]
    fn test_trait_object() {
        let compiler: &dyn ScriptCompiler = &Assembler;
        assert_eq!(compiler.compile("OP_1 OP_1 OP_EQUAL").unwrap(), vec![0x51, 0x51, 0x87]);
    }
}
