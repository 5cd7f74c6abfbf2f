//! The CHIP-8 interpreter as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::error::Result;
use crate::emulator::input::{DummyInput, EmulatorInput, Keypad};
use crate::emulator::instruction::*;
use crate::emulator::output::{DummyOutput, EmulatorOutput};
use crate::emulator::quirks::{BorrowFlag, FlagWrite, Quirks, ShiftSource, SpriteEdges};
use crate::emulator::screen::{Screen, SCREEN_HEIGHT};
use crate::emulator::state::{State, FONT_GLYPH_SIZE, FONT_START, NUM_REGISTERS};
use crate::emulator::timers::Timers;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The carry, borrow and collision flag.
const VF: Reg = Reg(0xF);
const MAX_SPRITE_HEIGHT: usize = 15;

/// Whether the interpreter is executing instructions or parked on `FX0A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Waiting for a key to go down; its index goes into the register.
    AwaitingKey(Reg),
}

pub struct Emulator<I: EmulatorInput, O: EmulatorOutput> {
    state: State,
    quirks: Quirks,
    run_state: RunState,
    keypad: Keypad,
    previous_keypad: Keypad,
    rng: StdRng,
    rom: Vec<u8>,

    input: I,
    output: O,
}

impl Emulator<DummyInput, DummyOutput> {
    /// Create a new emulator with dummy input and output
    pub fn new() -> Self {
        Emulator::with_io(DummyInput, DummyOutput::new())
    }
}

impl Default for Emulator<DummyInput, DummyOutput> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EmulatorInput, O: EmulatorOutput> Emulator<I, O> {

    /// Create a new emulator with input and output
    pub fn with_io(input: I, output: O) -> Emulator<I, O> {
        Emulator {
            state: State::new(),
            quirks: Quirks::default(),
            run_state: RunState::Running,
            keypad: Keypad::default(),
            previous_keypad: Keypad::default(),
            rng: StdRng::from_entropy(),
            rom: Vec::new(),

            input,
            output,
        }
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Make `CXNN` deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.state.load_rom(program)?;
        self.rom = program.to_vec();
        log::debug!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Return to power-on state and load the last program again.
    pub fn reset(&mut self) -> Result<()> {
        log::debug!("Resetting");
        self.state = State::new();
        self.run_state = RunState::Running;
        self.keypad = Keypad::default();
        self.previous_keypad = Keypad::default();
        self.state.load_rom(&self.rom)
    }

    /// Perform a single cycle: refresh the keypad, then either keep waiting
    /// for a key or load an instruction and execute it.
    pub fn step(&mut self) -> Result<RunState> {
        self.previous_keypad = self.keypad;
        self.keypad = self.input.poll();

        if let RunState::AwaitingKey(x) = self.run_state {
            if let Some(key) = self.keypad.newly_pressed(&self.previous_keypad) {
                log::debug!("Key {:X} pressed, resuming", key);
                self.state.registers[x] = key;
                self.run_state = RunState::Running;
            }
            return Ok(self.run_state);
        }

        let pc = self.state.program_counter;
        self.fetch_and_execute().map_err(|err| {
            log::warn!("Instruction at {:#05x} failed: {}", pc, err);
            err
        })?;
        Ok(self.run_state)
    }

    fn fetch_and_execute(&mut self) -> Result<()> {
        // The program counter moves past the instruction before it runs
        let opcode = self.state.fetch()?;
        let instruction = Instruction::from_u16(opcode)?;
        log::trace!("{:#05x}: {:?}", self.state.program_counter.wrapping_sub(2), instruction);
        self.execute_single(instruction)
    }

    /// Count the delay and sound timers down. Call once per 60 Hz frame.
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Run one frame: `cycles` steps, a timer tick, and a render.
    pub fn run_frame(&mut self, cycles: u32) -> Result<()> {
        for _ in 0..cycles {
            self.step()?;
        }
        self.tick_timers();
        self.output.render(&self.state.screen);
        self.output.buzzer(self.state.timers.sound_active());
        Ok(())
    }

    /// Execute several instructions in order, stopping at the first failure.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<()> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {

            // Clear the screen
            Instruction::ClearScreen => self.state.screen.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                self.state.program_counter = self.state.stack.pop()?;
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.state.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.state.stack.push(self.state.program_counter, addr)?;
                self.state.program_counter = addr;
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(x, Const(n)) => {
                if self.state.registers[x] == n {
                    self.state.skip();
                }
            }

            Instruction::IfRegNeqConst(x, Const(n)) => {
                if self.state.registers[x] != n {
                    self.state.skip();
                }
            }

            Instruction::IfRegEqReg(x, y) => {
                if self.state.registers[x] == self.state.registers[y] {
                    self.state.skip();
                }
            }

            Instruction::SetRegToConst(x, Const(n)) => {
                self.state.registers[x] = n;
            }

            // Wraps around, VF is left alone
            Instruction::IncRegByConst(x, Const(n)) => {
                self.state.registers[x] = self.state.registers[x].wrapping_add(n);
            }

            Instruction::SetRegToReg(x, y) => {
                self.state.registers[x] = self.state.registers[y];
            }

            Instruction::BitwiseOr(x, y) => {
                self.state.registers[x] |= self.state.registers[y];
                self.reset_vf_after_logic();
            }

            Instruction::BitwiseAnd(x, y) => {
                self.state.registers[x] &= self.state.registers[y];
                self.reset_vf_after_logic();
            }

            Instruction::BitwiseXor(x, y) => {
                self.state.registers[x] ^= self.state.registers[y];
                self.reset_vf_after_logic();
            }

            // VF is 1 if there is a carry, 0 otherwise.
            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = self.state.registers[x].overflowing_add(self.state.registers[y]);
                self.write_with_flag(x, sum, carry as u8);
            }

            Instruction::DecRegByReg(x, y) => {
                let (difference, borrow) = self.state.registers[x].overflowing_sub(self.state.registers[y]);
                let flag = self.borrow_flag(borrow);
                self.write_with_flag(x, difference, flag);
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (difference, borrow) = self.state.registers[y].overflowing_sub(self.state.registers[x]);
                let flag = self.borrow_flag(borrow);
                self.write_with_flag(x, difference, flag);
            }

            // VF gets the bit shifted out
            Instruction::BitshiftRight(x, y) => {
                let value = self.shift_source(x, y);
                self.write_with_flag(x, value >> 1, value & 1);
            }

            Instruction::BitshiftLeft(x, y) => {
                let value = self.shift_source(x, y);
                self.write_with_flag(x, value << 1, value >> 7);
            }

            Instruction::IfRegNeqReg(x, y) => {
                if self.state.registers[x] != self.state.registers[y] {
                    self.state.skip();
                }
            }

            Instruction::SetI(Addr(addr)) => {
                self.state.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                // Only NNN is an address; a target past memory fails on the next fetch
                self.state.program_counter = self.state.registers[Reg(0)] as u16 + (addr & 0x0FFF);
            }

            Instruction::SetVxRand(x, Const(n)) => {
                self.state.registers[x] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(x, y, Const(sprite_height)) => {

                let x_coord = self.state.registers[x];
                let y_coord = self.state.registers[y];

                // Get sprite, each row is 8 bits. Clipped rows are never read.
                let mut height = (sprite_height as usize).min(MAX_SPRITE_HEIGHT);
                if self.quirks.sprite_edges == SpriteEdges::Clip {
                    height = height.min(SCREEN_HEIGHT - y_coord as usize % SCREEN_HEIGHT);
                }
                let mut sprite = [0; MAX_SPRITE_HEIGHT];
                sprite[..height].copy_from_slice(self.state.read(self.state.i as usize, height)?);
                let any_collisions = self.state.screen.draw_sprite(
                    x_coord,
                    y_coord,
                    &sprite[..height],
                    self.quirks.sprite_edges,
                );

                // Set VF collision flag
                self.state.registers[VF] = any_collisions as u8;
            }

            // Skip if the key in Vx is pressed
            Instruction::IfKeyEqVx(x) => {
                if self.keypad.is_pressed(self.state.registers[x]) {
                    self.state.skip();
                }
            }

            // Skip if the key in Vx isn't pressed
            Instruction::IfKeyNeqVx(x) => {
                if !self.keypad.is_pressed(self.state.registers[x]) {
                    self.state.skip();
                }
            }

            Instruction::SetRegToDelayTimer(x) => {
                self.state.registers[x] = self.state.timers.delay;
            }

            // Park until a key goes down, the program counter already points past us
            Instruction::SetRegToGetKey(x) => {
                log::debug!("Waiting for key into V{:X}", x.0 & 0xF);
                self.run_state = RunState::AwaitingKey(x);
            }

            Instruction::SetDelayTimerToReg(x) => {
                self.state.timers.delay = self.state.registers[x];
            }

            Instruction::SetSoundTimerToReg(x) => {
                self.state.timers.sound = self.state.registers[x];
            }

            Instruction::AddRegToI(x) => {
                self.state.i = self.state.i.wrapping_add(self.state.registers[x] as u16);
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(x) => {
                self.state.i = FONT_START + FONT_GLYPH_SIZE * self.state.registers[x] as u16;
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = self.state.registers[x];
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.state.write(self.state.i as usize, &digits)?;
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let count = (x & 0xF) as usize + 1;
                let registers = *self.state.registers.as_array();
                self.state.write(self.state.i as usize, &registers[..count])?;
                self.advance_i_after_load_store(count);
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = (x & 0xF) as usize + 1;
                let mut values = [0; NUM_REGISTERS];
                values[..count].copy_from_slice(self.state.read(self.state.i as usize, count)?);
                for (reg_no, value) in values[..count].iter().enumerate() {
                    self.state.registers[Reg(reg_no as u8)] = *value;
                }
                self.advance_i_after_load_store(count);
            }
        };

        Ok(())
    }

    fn write_with_flag(&mut self, x: Reg, result: u8, flag: u8) {
        match self.quirks.flag_write {
            FlagWrite::AfterResult => {
                self.state.registers[x] = result;
                self.state.registers[VF] = flag;
            }
            FlagWrite::BeforeResult => {
                self.state.registers[VF] = flag;
                self.state.registers[x] = result;
            }
        }
    }

    fn borrow_flag(&self, borrow: bool) -> u8 {
        match self.quirks.borrow_flag {
            BorrowFlag::SetOnNoBorrow => !borrow as u8,
            BorrowFlag::SetOnBorrow => borrow as u8,
        }
    }

    fn shift_source(&self, x: Reg, y: Reg) -> u8 {
        match self.quirks.shift_source {
            ShiftSource::Vx => self.state.registers[x],
            ShiftSource::Vy => self.state.registers[y],
        }
    }

    fn reset_vf_after_logic(&mut self) {
        if self.quirks.logic_resets_vf {
            self.state.registers[VF] = 0;
        }
    }

    fn advance_i_after_load_store(&mut self, count: usize) {
        if self.quirks.load_store_increments_i {
            self.state.i = self.state.i.wrapping_add(count as u16);
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn screen(&self) -> &Screen {
        &self.state.screen
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        self.state.registers.as_array()
    }

    pub fn pc(&self) -> u16 {
        self.state.program_counter
    }

    pub fn i(&self) -> u16 {
        self.state.i
    }

    pub fn timers(&self) -> &Timers {
        &self.state.timers
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
