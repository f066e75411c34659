//! Flat byte-addressable memory for a small virtual machine.
//!
//! The interpreter that drives it lives elsewhere; this crate owns the
//! address space, loads code into it and decodes three-byte instructions.

pub mod vm;
