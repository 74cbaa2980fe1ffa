//! Public error type for the Platter API.
//!
//! Internal errors (loader, machine) convert into [`Error`] at the API
//! boundary. Every variant maps to a distinct process exit code so that a
//! runner can report *why* a scroll stopped.

use crate::String;
use crate::scroll::LoadError;
use crate::vm::{ExecutionError, Fault};

/// Process exit codes, one per failure category.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const LOAD: u8 = 10;
    pub const UNKNOWN_OPCODE: u8 = 11;
    pub const INVALID_HANDLE: u8 = 12;
    pub const OUT_OF_BOUNDS: u8 = 13;
    pub const DIVISION_BY_ZERO: u8 = 14;
    pub const INVALID_BYTE: u8 = 15;
    pub const RESOURCE_EXCEEDED: u8 = 16;
    pub const INTERRUPTED: u8 = 17;
    pub const CHANNEL: u8 = 18;
}

/// Public error type for all Platter operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The scroll bytes are not a valid program image.
    #[error("cannot load scroll: {0}")]
    Load(#[from] LoadError),

    /// The scroll file could not be read.
    #[error("cannot read scroll {path}: {message}")]
    Unreadable { path: String, message: String },

    /// The machine stopped without halting.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl From<Fault> for Error {
    fn from(fault: Fault) -> Self {
        Error::Execution(ExecutionError::Fault(fault))
    }
}

impl Error {
    /// Exit status for a process that ended with this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Load(_) | Error::Unreadable { .. } => exit_code::LOAD,
            Error::Execution(error) => match error {
                ExecutionError::Fault(fault) => match fault {
                    Fault::UnknownOpcode { .. } => exit_code::UNKNOWN_OPCODE,
                    Fault::InvalidHandle { .. } => exit_code::INVALID_HANDLE,
                    Fault::OutOfBounds { .. } => exit_code::OUT_OF_BOUNDS,
                    Fault::DivisionByZero => exit_code::DIVISION_BY_ZERO,
                    Fault::InvalidByte { .. } => exit_code::INVALID_BYTE,
                },
                ExecutionError::ResourceExceeded(_) => exit_code::RESOURCE_EXCEEDED,
                ExecutionError::Interrupted { .. } => exit_code::INTERRUPTED,
                ExecutionError::Channel(_) => exit_code::CHANNEL,
            },
        }
    }

    /// True for errors raised before the first instruction ran.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_) | Error::Unreadable { .. })
    }
}
