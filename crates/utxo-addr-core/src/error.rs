use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("network already registered: {0}")]
    DuplicateNetwork(String),

    #[error("invalid parameters for network {name}: {reason}")]
    InvalidNetworkParameters { name: String, reason: String },

    #[error("invalid character {ch:?} at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    #[error("invalid checksum")]
    InvalidChecksum,

    #[error("invalid padding")]
    InvalidPadding,

    #[error("invalid length {got}: {reason}")]
    InvalidLength { got: usize, reason: &'static str },

    #[error("mixed-case string")]
    MixedCase,

    #[error("missing separator")]
    MissingSeparator,

    #[error("invalid human-readable prefix")]
    InvalidHrp,

    #[error("invalid witness version {0}")]
    InvalidWitnessVersion(u8),

    #[error("invalid hash length {got}: expected {expected} bytes")]
    InvalidHashLength { expected: usize, got: usize },

    #[error("invalid version byte {0:#04x}")]
    InvalidVersionByte(u8),

    #[error("network {network} has no {encoding} encoding")]
    EncodingUnavailable { network: String, encoding: &'static str },

    #[error("Unsupported address format. Got: {0}")]
    UnsupportedAddressFormat(String),

    #[error("Cannot parse address from script.")]
    UnparseableScript,

    #[error("Cannot parse output script from address. Got: {0}")]
    UnparseableAddress(String),

    #[error("script compilation failed: {0}")]
    ScriptCompile(String),
}
