use std::fs::File;
use std::io::{ErrorKind, Read};
use std::ops::Range;
use std::path::Path;

use tracing::{debug, warn};

use super::error::{MemoryError, Result};
use super::instruction::Instruction;

/// Total size of the address space, in bytes.
///
/// Byte load/store take a `u8` address, so 256 makes every address they can
/// express valid.
pub const MAX_RAM: usize = 256;

/// Size of the stack region. Loaded code starts right after it.
pub const MAX_STACK: usize = 64;

/// Bytes requested from the code source per read.
pub const CHUNK_SIZE: usize = 64;

/// The whole address space of the machine.
///
/// `[0, STACK)` is the stack region, owned by the interpreter.
/// `[STACK, RAM)` is the code region, filled by [`Memory::load_code`].
/// Neither region is protected: the split is a convention.
#[derive(Debug)]
pub struct Memory<const RAM: usize = MAX_RAM, const STACK: usize = MAX_STACK> {
    bytes: Box<[u8; RAM]>,
    code_len: usize,
}

impl<const RAM: usize, const STACK: usize> Memory<RAM, STACK> {
    const LAYOUT: () = assert!(STACK <= RAM, "stack region larger than ram");

    /// Create a new zero-filled memory.
    ///
    /// The buffer is reserved fallibly, so running out of memory is reported
    /// as [`MemoryError::Allocation`] instead of aborting.
    pub fn new() -> Result<Self> {
        let () = Self::LAYOUT;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(RAM)
            .map_err(|_| MemoryError::Allocation { size: RAM })?;
        buffer.resize(RAM, 0);
        let bytes = Box::<[u8; RAM]>::try_from(buffer.into_boxed_slice())
            .map_err(|_| MemoryError::Allocation { size: RAM })?;

        debug!(size = RAM, stack = STACK, "ram allocated");
        Ok(Memory { bytes, code_len: 0 })
    }

    /// Addresses reserved for the interpreter's stack.
    pub fn stack_region(&self) -> Range<usize> {
        0..STACK
    }

    /// Addresses available to loaded code.
    pub fn code_region(&self) -> Range<usize> {
        STACK..RAM
    }

    /// Number of code bytes placed by the last load.
    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// The entire address space, read-only.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Load code from `source` into the code region.
    ///
    /// The source is read in chunks of [`CHUNK_SIZE`] bytes and the result is
    /// written starting at address `STACK`. Returns the number of bytes loaded.
    ///
    /// A read error aborts the load with [`MemoryError::SourceUnavailable`] and
    /// leaves memory untouched. A source longer than the code region fills it
    /// up to the last address and fails with [`MemoryError::CodeTooLarge`].
    pub fn load_code<R: Read>(&mut self, mut source: R) -> Result<usize> {
        let capacity = RAM - STACK;
        let mut staged = Vec::with_capacity(capacity);
        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            let n = match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => return Err(MemoryError::SourceUnavailable { source }),
            };

            let room = capacity - staged.len();
            if n > room {
                staged.extend_from_slice(&chunk[..room]);
                self.commit(&staged);
                warn!(capacity, "code truncated at the end of ram");
                return Err(MemoryError::CodeTooLarge { capacity });
            }
            staged.extend_from_slice(&chunk[..n]);
        }

        self.commit(&staged);
        debug!(len = staged.len(), offset = STACK, "code loaded");
        Ok(staged.len())
    }

    /// Open `path` and load its raw bytes as code.
    ///
    /// Nothing is read if the file cannot be opened.
    pub fn load_code_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MemoryError::SourceUnavailable { source })?;
        debug!(path = %path.display(), "reading code file");
        self.load_code(file)
    }

    fn commit(&mut self, code: &[u8]) {
        self.bytes[STACK..STACK + code.len()].copy_from_slice(code);
        self.code_len = code.len();
    }

    /// Fetch the instruction stored at `pos`, `pos + 1` and `pos + 2`.
    pub fn fetch(&self, pos: isize) -> Result<Instruction> {
        let start = usize::try_from(pos)
            .ok()
            .filter(|start| start + Instruction::WIDTH <= RAM)
            .ok_or(MemoryError::MemoryOverflow { pos })?;

        Ok(Instruction::new(
            self.bytes[start],
            self.bytes[start + 1],
            self.bytes[start + 2],
        ))
    }

    /// Read a single byte from memory.
    ///
    /// `addr` is unsigned. Only layouts smaller than 256 bytes can fail.
    pub fn load(&self, addr: u8) -> Result<u8> {
        self.bytes
            .get(usize::from(addr))
            .copied()
            .ok_or(MemoryError::AddressOutOfRange { addr })
    }

    /// Write a single byte to memory. Both regions are writable.
    pub fn store(&mut self, addr: u8, value: u8) -> Result<()> {
        let slot = self
            .bytes
            .get_mut(usize::from(addr))
            .ok_or(MemoryError::AddressOutOfRange { addr })?;
        *slot = value;
        Ok(())
    }

    /// Release the memory. The instance is consumed.
    pub fn release(self) {
        debug!(size = RAM, "ram released");
    }
}
