pub mod error;
pub mod instruction;
pub mod ram;

pub use error::{MemoryError, Result};
pub use instruction::Instruction;
pub use ram::{Memory, CHUNK_SIZE, MAX_RAM, MAX_STACK};
