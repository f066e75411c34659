use std::io;

use thiserror::Error;

/// Failures surfaced by [`Memory`](super::Memory).
///
/// Every variant is fatal for the VM run that produced it.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("can't allocate {size} bytes for ram")]
    Allocation { size: usize },

    #[error("code source unavailable: {source}")]
    SourceUnavailable { source: io::Error },

    #[error("code does not fit in the {capacity} bytes of the code region")]
    CodeTooLarge { capacity: usize },

    #[error("memory overflow fetching instruction at {pos}")]
    MemoryOverflow { pos: isize },

    #[error("address {addr:#04x} out of range")]
    AddressOutOfRange { addr: u8 },
}

pub type Result<T> = std::result::Result<T, MemoryError>;
