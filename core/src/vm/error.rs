//! Runtime execution errors.
//!
//! # Error Categories
//!
//! - **Faults**: the machine reached a state the instruction set defines as
//!   fatal (undefined operator, bad handle, index out of bounds, division by
//!   zero, unprintable output). There is no recovery opcode.
//!
//! - **Resource exceeded errors**: limits imposed by the embedding rather
//!   than by the instruction set (cycle limit, handle space).
//!
//! - **Interruption and channel errors**: the run was stopped from outside,
//!   or the byte channel itself failed.
//!
//! Running out of input is *not* an error; the Input operator defines it.

use crate::String;

/// A fatal condition defined by the instruction set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    /// The platter at `finger` carries operator 14 or 15.
    #[error("unknown opcode {opcode} in platter {word:#010x} at finger {finger}")]
    UnknownOpcode { opcode: u8, word: u32, finger: u32 },

    /// Array 0 is the target of an abandonment, or the handle is not live.
    #[error("invalid array handle {handle}")]
    InvalidHandle { handle: u32 },

    /// An array access past the end of a live array.
    #[error("index {index} out of bounds for array {handle} (length: {len})")]
    OutOfBounds { handle: u32, index: u32, len: usize },

    #[error("division by zero")]
    DivisionByZero,

    /// Output of a register value that does not fit in a byte.
    #[error("cannot output value {value}: not a byte")]
    InvalidByte { value: u32 },
}

/// Limits imposed on the machine rather than by the instruction set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceExceeded {
    /// The run exceeded `ExecutionOptions::max_cycles` without halting.
    #[error("cycle limit exceeded: machine did not halt within {limit} cycles")]
    CycleLimit { limit: u64 },

    /// Every non-zero array identifier is live.
    #[error("array handles exhausted: {live} arrays are live")]
    HandlesExhausted { live: usize },

    /// The allocator could not provide an array of the requested size.
    #[error("out of memory: cannot allocate an array of {size} platters")]
    OutOfMemory { size: u32 },
}

/// Failure reported by a byte channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("channel error: {message}")]
pub struct ChannelError {
    pub message: String,
}

impl ChannelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Why a run ended without reaching a Halt instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceeded),

    /// The external stop signal was raised.
    #[error("interrupted after {cycles} cycles")]
    Interrupted { cycles: u64 },

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

impl ExecutionError {
    /// Returns the fault, if this error is one.
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            ExecutionError::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}
