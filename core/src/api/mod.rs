//! Public API for running scrolls.
//!
//! The machine itself lives in [`crate::vm`]; this module gathers the pieces
//! an embedding needs: options, the public error type, and a one-call runner.
//!
//! # Example
//!
//! ```
//! use platter_core::api::{ExecutionOptions, run_scroll};
//! use platter_core::vm::BufferChannel;
//!
//! let scroll = [0xD0, 0x00, 0x00, 0x48, 0xA0, 0x00, 0x00, 0x00, 0x70, 0x00, 0x00, 0x00];
//! let mut channel = BufferChannel::new();
//! run_scroll(&scroll, &mut channel, ExecutionOptions::default()).unwrap();
//! assert_eq!(channel.output(), b"H");
//! ```

pub mod error;
pub mod options;

pub use error::{Error, exit_code};
pub use options::ExecutionOptions;

use crate::vm::{ByteChannel, Machine, RunSummary};

/// Loads `bytes` as a scroll and runs it to completion on `channel`.
pub fn run_scroll<C: ByteChannel>(
    bytes: &[u8],
    channel: C,
    options: ExecutionOptions,
) -> Result<RunSummary, Error> {
    let mut machine = Machine::from_scroll(bytes, channel, options)?;
    Ok(machine.run()?)
}
