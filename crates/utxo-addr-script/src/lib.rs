//! Script opcodes and assembler.

#![forbid(unsafe_code)]

pub mod assembler;
pub mod opcodes;

pub use assembler::{compile, push_bytes, Assembler, ScriptCompiler};
