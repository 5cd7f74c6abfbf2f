/// Everything that can make the virtual machine stop.
///
/// None of these are retried; a program that triggers one is assumed to be
/// buggy or to need a different interpreter, so the driver decides whether
/// to halt or reset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmulatorError {
    #[error("Unknown opcode {opcode:#06x}")]
    InvalidOpcode { opcode: u16 },

    #[error("Stack overflow when calling {address:#05x}")]
    StackOverflow { address: u16 },

    #[error("Stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("Memory access out of bounds at address {address:#06x}")]
    AddressOutOfRange { address: usize },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
