use std::fmt;

/// A raw instruction as fetched from memory.
///
/// No meaning is attached to the bytes here, the interpreter maps `opcode`
/// to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instruction {
    pub opcode: u8,
    pub arg1: u8,
    pub arg2: u8,
}

impl Instruction {
    /// Number of bytes an instruction occupies in memory.
    pub const WIDTH: usize = 3;

    pub fn new(opcode: u8, arg1: u8, arg2: u8) -> Self {
        Instruction { opcode, arg1, arg2 }
    }

    pub fn to_bytes(self) -> [u8; Self::WIDTH] {
        [self.opcode, self.arg1, self.arg2]
    }
}

impl From<[u8; Instruction::WIDTH]> for Instruction {
    fn from([opcode, arg1, arg2]: [u8; Instruction::WIDTH]) -> Self {
        Instruction::new(opcode, arg1, arg2)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x} {:02x} {:02x}", self.opcode, self.arg1, self.arg2)
    }
}
