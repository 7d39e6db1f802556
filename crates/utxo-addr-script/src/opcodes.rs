//! Script opcode table.

#![forbid(unsafe_code)]

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_IF: u8 = 0x63;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// Largest push whose length is encoded in the opcode itself.
pub const MAX_DIRECT_PUSH: usize = 75;

/// Mnemonic to byte, including the common aliases.
const TABLE: &[(&str, u8)] = &[
    ("OP_0", OP_0),
    ("OP_FALSE", OP_0),
    ("OP_PUSHDATA1", OP_PUSHDATA1),
    ("OP_PUSHDATA2", OP_PUSHDATA2),
    ("OP_PUSHDATA4", OP_PUSHDATA4),
    ("OP_1NEGATE", 0x4f),
    ("OP_RESERVED", 0x50),
    ("OP_1", OP_1),
    ("OP_TRUE", OP_1),
    ("OP_2", 0x52),
    ("OP_3", 0x53),
    ("OP_4", 0x54),
    ("OP_5", 0x55),
    ("OP_6", 0x56),
    ("OP_7", 0x57),
    ("OP_8", 0x58),
    ("OP_9", 0x59),
    ("OP_10", 0x5a),
    ("OP_11", 0x5b),
    ("OP_12", 0x5c),
    ("OP_13", 0x5d),
    ("OP_14", 0x5e),
    ("OP_15", 0x5f),
    ("OP_16", OP_16),
    ("OP_NOP", 0x61),
    ("OP_VER", 0x62),
    ("OP_IF", OP_IF),
    ("OP_NOTIF", 0x64),
    ("OP_VERIF", 0x65),
    ("OP_VERNOTIF", 0x66),
    ("OP_ELSE", 0x67),
    ("OP_ENDIF", 0x68),
    ("OP_VERIFY", 0x69),
    ("OP_RETURN", 0x6a),
    ("OP_TOALTSTACK", 0x6b),
    ("OP_FROMALTSTACK", 0x6c),
    ("OP_2DROP", 0x6d),
    ("OP_2DUP", 0x6e),
    ("OP_3DUP", 0x6f),
    ("OP_2OVER", 0x70),
    ("OP_2ROT", 0x71),
    ("OP_2SWAP", 0x72),
    ("OP_IFDUP", 0x73),
    ("OP_DEPTH", 0x74),
    ("OP_DROP", 0x75),
    ("OP_DUP", OP_DUP),
    ("OP_NIP", 0x77),
    ("OP_OVER", 0x78),
    ("OP_PICK", 0x79),
    ("OP_ROLL", 0x7a),
    ("OP_ROT", 0x7b),
    ("OP_SWAP", 0x7c),
    ("OP_TUCK", 0x7d),
    ("OP_CAT", 0x7e),
    ("OP_SUBSTR", 0x7f),
    ("OP_SPLIT", 0x7f),
    ("OP_LEFT", 0x80),
    ("OP_NUM2BIN", 0x80),
    ("OP_RIGHT", 0x81),
    ("OP_BIN2NUM", 0x81),
    ("OP_SIZE", 0x82),
    ("OP_INVERT", 0x83),
    ("OP_AND", 0x84),
    ("OP_OR", 0x85),
    ("OP_XOR", 0x86),
    ("OP_EQUAL", OP_EQUAL),
    ("OP_EQUALVERIFY", OP_EQUALVERIFY),
    ("OP_RESERVED1", 0x89),
    ("OP_RESERVED2", 0x8a),
    ("OP_1ADD", 0x8b),
    ("OP_1SUB", 0x8c),
    ("OP_2MUL", 0x8d),
    ("OP_2DIV", 0x8e),
    ("OP_NEGATE", 0x8f),
    ("OP_ABS", 0x90),
    ("OP_NOT", 0x91),
    ("OP_0NOTEQUAL", 0x92),
    ("OP_ADD", 0x93),
    ("OP_SUB", 0x94),
    ("OP_MUL", 0x95),
    ("OP_DIV", 0x96),
    ("OP_MOD", 0x97),
    ("OP_LSHIFT", 0x98),
    ("OP_RSHIFT", 0x99),
    ("OP_BOOLAND", 0x9a),
    ("OP_BOOLOR", 0x9b),
    ("OP_NUMEQUAL", 0x9c),
    ("OP_NUMEQUALVERIFY", 0x9d),
    ("OP_NUMNOTEQUAL", 0x9e),
    ("OP_LESSTHAN", 0x9f),
    ("OP_GREATERTHAN", 0xa0),
    ("OP_LESSTHANOREQUAL", 0xa1),
    ("OP_GREATERTHANOREQUAL", 0xa2),
    ("OP_MIN", 0xa3),
    ("OP_MAX", 0xa4),
    ("OP_WITHIN", 0xa5),
    ("OP_RIPEMD160", 0xa6),
    ("OP_SHA1", 0xa7),
    ("OP_SHA256", 0xa8),
    ("OP_HASH160", OP_HASH160),
    ("OP_HASH256", 0xaa),
    ("OP_CODESEPARATOR", 0xab),
    ("OP_CHECKSIG", OP_CHECKSIG),
    ("OP_CHECKSIGVERIFY", 0xad),
    ("OP_CHECKMULTISIG", OP_CHECKMULTISIG),
    ("OP_CHECKMULTISIGVERIFY", 0xaf),
    ("OP_NOP1", 0xb0),
    ("OP_CHECKLOCKTIMEVERIFY", 0xb1),
    ("OP_NOP2", 0xb1),
    ("OP_CHECKSEQUENCEVERIFY", 0xb2),
    ("OP_NOP3", 0xb2),
    ("OP_NOP4", 0xb3),
    ("OP_NOP5", 0xb4),
    ("OP_NOP6", 0xb5),
    ("OP_NOP7", 0xb6),
    ("OP_NOP8", 0xb7),
    ("OP_NOP9", 0xb8),
    ("OP_NOP10", 0xb9),
];

/// Look up an opcode by mnemonic.
pub fn by_name(name: &str) -> Option<u8> {
    TABLE.iter().find(|(n, _)| *n == name).map(|&(_, op)| op)
}

/// Small-integer opcode for `n` in 0..=16 (OP_0, OP_1..OP_16).
pub const fn push_num(n: u8) -> Option<u8> {
    match n {
        0 => Some(OP_0),
        1..=16 => Some(OP_1 + n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(by_name("OP_FALSE"), by_name("OP_0"));
        assert_eq!(by_name("OP_TRUE"), by_name("OP_1"));
        assert_eq!(by_name("OP_NOP2"), by_name("OP_CHECKLOCKTIMEVERIFY"));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(by_name("OP_NOPE"), None);
        assert_eq!(by_name("op_if"), None);
    }

    #[test]
    fn test_push_num() {
        assert_eq!(push_num(0), Some(0x00));
        assert_eq!(push_num(1), Some(0x51));
        assert_eq!(push_num(16), Some(0x60));
        assert_eq!(push_num(17), None);
    }
}
