//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod clock;
pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod output;
pub mod quirks;
pub mod screen;
pub mod state;
pub mod timers;

pub use clock::Clock;
pub use emulator::{Emulator, RunState};
pub use error::{EmulatorError, Result};
pub use input::{DummyInput, EmulatorInput, Keypad};
pub use output::{DummyOutput, EmulatorOutput};
pub use quirks::{BorrowFlag, FlagWrite, QuirkProfile, Quirks, ShiftSource, SpriteEdges};
pub use screen::Screen;
pub use state::State;
pub use timers::Timers;
