//! Register machine for the Universal Machine instruction set.
//!
//! # Architecture
//!
//! - **Registers**: eight unsigned 32-bit registers, zero at load time
//! - **Heap**: arrays of platters addressed by handle; handle 0 is the running program
//! - **Instruction format**: fixed 32-bit platters, see [`instruction_set`]
//! - **Execution model**: fetch from array 0 at the finger, advance the finger,
//!   then execute; Load Program replaces array 0 and sets the finger
//! - **I/O**: one byte at a time through a [`ByteChannel`]
//!
//! # Modules
//!
//! - [`instruction_set`]: operators, decoding and encoding
//! - [`heap`]: array heap with handle reuse
//! - [`runtime`]: the fetch-decode-execute loop

mod error;
pub mod heap;
pub mod instruction_set;
mod io;
mod listing;
mod registers;
pub mod runtime;
mod stats;


pub use error::{ChannelError, ExecutionError, Fault, ResourceExceeded};
pub use heap::Heap;
pub use instruction_set::{Instruction, MAX_IMMEDIATE, NUM_REGISTERS, Opcode, Platter, Reg};
pub use io::{BufferChannel, ByteChannel};
pub use listing::{Bits, Disassembly, Listing};
pub use registers::Registers;
pub use runtime::{END_OF_INPUT, Machine, RunSummary, Step};
pub use stats::ExecutionStats;

#[cfg(feature = "std")]
pub use io::StdChannel;
