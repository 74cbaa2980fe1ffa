//! Platter - an interpreter for the Universal Machine
//!
//! # Overview
//!
//! The machine runs scrolls: big-endian sequences of 32-bit platters. It has
//! eight registers, a heap of platter arrays addressed by 32-bit handles, and
//! a byte-wide I/O channel. Array 0 holds the running program and may be
//! rewritten while it runs.
//!
//! # Quick Start
//!
//! ```
//! use platter::{ExecutionOptions, run_scroll};
//! use platter::vm::BufferChannel;
//!
//! // Orthography r0 <- 'H'; Output r0; Halt
//! let scroll = [0xD0, 0x00, 0x00, 0x48, 0xA0, 0x00, 0x00, 0x00, 0x70, 0x00, 0x00, 0x00];
//!
//! let mut channel = BufferChannel::new();
//! let summary = run_scroll(&scroll, &mut channel, ExecutionOptions::default()).unwrap();
//! assert_eq!(channel.output(), b"H");
//! assert_eq!(summary.cycles, 3);
//! ```
//!
//! # Errors
//!
//! Every failure is an [`Error`], and every [`Error`] maps to a distinct
//! process exit code through [`Error::exit_code`]. Use [`render_error`] and
//! friends to print one for a human.

use std::io::{BufWriter, StdinLock, StdoutLock};
use std::path::Path;

use platter_core::vm::StdChannel;

mod error_renderer;

pub use error_renderer::{
    Report, render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from platter_core
pub use platter_core::api::{Error, ExecutionOptions, exit_code, run_scroll};
pub use platter_core::scroll::{self, LoadError};
pub use platter_core::vm::{self, Machine, Platter, RunSummary};

/// Reads a scroll file and decodes it into platters.
pub fn load_scroll_file(path: impl AsRef<Path>) -> Result<Vec<Platter>, Error> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|err| Error::Unreadable {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    Ok(scroll::load(&bytes)?)
}

/// A machine wired to the process's stdin and buffered stdout.
pub type StdioMachine = Machine<StdChannel<StdinLock<'static>, BufWriter<StdoutLock<'static>>>>;

/// Creates a machine for `program` that talks to stdin and stdout.
///
/// Both streams stay locked for the lifetime of the machine. Output is
/// flushed when a run ends and before every Input.
pub fn stdio_machine(program: Vec<Platter>, options: ExecutionOptions) -> StdioMachine {
    let channel = StdChannel::new(
        std::io::stdin().lock(),
        BufWriter::new(std::io::stdout().lock()),
    );
    Machine::new(program, channel, options)
}
