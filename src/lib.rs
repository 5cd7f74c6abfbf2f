/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped to the left side of the keyboard (`1234`, `qwer`, `asdf`, `zxcv`),
and `Esc` quits.

# Library

If you are not interested in handling input (key presses and such),
then you can use `Emulator::new()` to get an emulator to work with.

The main way of running a program is to load instructions as bytes.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
emulator.step().unwrap(); // Will now clear the display
assert_eq!(emulator.pc(), 0x202);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.registers()[0xB], 35);
```

## Driving frames

An external driver runs a number of cycles per frame, ticks the timers once
and hands the display to the renderer. `Emulator::run_frame` does all three.

```rust
use chip8_vm::emulator::{Clock, Emulator};

let clock = Clock::default();
let mut emulator = Emulator::new();
emulator.load(&[0x12, 0x00]).unwrap(); // Jump to self
emulator.run_frame(clock.cycles_per_frame()).unwrap();
```

## Custom input and output

To get keypresses, you must implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively.
These tell the emulator which keys are currently held, and how to present a frame.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this, then do the following.

```ignore
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::with_io(MyInput::new(), MyOutput::new());
```

## Quirks

Interpreters disagree on a handful of instructions. Pick the behaviour a ROM expects
once, before running it.

```rust
use chip8_vm::emulator::{Emulator, Quirks, QuirkProfile};

let emulator = Emulator::new().with_quirks(Quirks::from(QuirkProfile::CosmacVip));
```
*/

pub mod emulator;
pub mod util;
