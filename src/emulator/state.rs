//! All mutable hardware state, owned in one place.
//!
//! Bounds are enforced here so the executor never indexes memory or the
//! stack directly.

use crate::emulator::error::{EmulatorError, Result};
use crate::emulator::instruction::Reg;
use crate::emulator::screen::Screen;
use crate::emulator::timers::Timers;
use std::ops::{Index, IndexMut};

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PC_START as usize;
pub const FONT_START: u16 = 0x000;
pub const FONT_GLYPH_SIZE: u16 = 5;
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// `V0` through `VF`. Indexing with a `Reg` only looks at its low nibble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers([u8; NUM_REGISTERS]);

impl Registers {
    pub fn as_array(&self) -> &[u8; NUM_REGISTERS] {
        &self.0
    }
}

impl Index<Reg> for Registers {
    type Output = u8;

    fn index(&self, Reg(x): Reg) -> &u8 {
        &self.0[(x & 0xF) as usize]
    }
}

impl IndexMut<Reg> for Registers {
    fn index_mut(&mut self, Reg(x): Reg) -> &mut u8 {
        &mut self.0[(x & 0xF) as usize]
    }
}

/// Return addresses, at most 16 deep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stack {
    entries: [u16; STACK_SIZE],
    len: usize,
}

impl Stack {
    /// Push a return address. `callee` is only used for the error.
    pub fn push(&mut self, return_addr: u16, callee: u16) -> Result<()> {
        let slot = self
            .entries
            .get_mut(self.len)
            .ok_or(EmulatorError::StackOverflow { address: callee })?;
        *slot = return_addr;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.len == 0 {
            return Err(EmulatorError::StackUnderflow);
        }
        self.len -= 1;
        Ok(self.entries[self.len])
    }

    pub fn depth(&self) -> usize {
        self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    memory: [u8; MEM_SIZE],
    pub registers: Registers,
    pub i: u16,
    pub program_counter: u16,
    pub stack: Stack,
    pub screen: Screen,
    pub timers: Timers,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Power-on state: zeroed memory with the font at 0x000, zeroed registers,
    /// timers and stack, and the program counter at 0x200.
    pub fn new() -> State {
        let mut memory = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        State {
            memory,
            registers: Registers::default(),
            i: 0,
            program_counter: PC_START,
            stack: Stack::default(),
            screen: Screen::new(),
            timers: Timers::new(),
        }
    }

    /// Copy a program into memory at 0x200 and point the program counter at it.
    /// Nothing is touched if the program doesn't fit.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(EmulatorError::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        self.write(PC_START as usize, rom)?;
        self.program_counter = PC_START;
        Ok(())
    }

    pub fn memory(&self) -> &[u8; MEM_SIZE] {
        &self.memory
    }

    /// Borrow `len` bytes starting at `addr`.
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8]> {
        let range = Self::checked_range(addr, len)?;
        Ok(&self.memory[range])
    }

    /// Write `bytes` starting at `addr`. Either every byte is written or none is.
    pub fn write(&mut self, addr: usize, bytes: &[u8]) -> Result<()> {
        let range = Self::checked_range(addr, bytes.len())?;
        self.memory[range].copy_from_slice(bytes);
        Ok(())
    }

    fn checked_range(addr: usize, len: usize) -> Result<std::ops::Range<usize>> {
        match addr.checked_add(len) {
            Some(end) if end <= MEM_SIZE => Ok(addr..end),
            _ => Err(EmulatorError::AddressOutOfRange {
                address: addr.max(MEM_SIZE),
            }),
        }
    }

    /// Read the big-endian instruction word at the program counter and
    /// advance past it. The program counter is left alone on failure.
    pub fn fetch(&mut self) -> Result<u16> {
        let bytes = self.read(self.program_counter as usize, 2)?;
        let word = u16::from_be_bytes([bytes[0], bytes[1]]);
        self.program_counter = self.program_counter.wrapping_add(2);
        Ok(word)
    }

    /// Skip the next instruction.
    pub fn skip(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }
}
