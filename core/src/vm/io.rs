//! Byte I/O channel used by the Output and Input operators.
//!
//! The machine only ever moves single bytes. Running out of input is reported
//! as `Ok(None)`; the machine turns that into the all-ones sentinel. Errors
//! are reserved for channels that genuinely fail (a closed pipe, a broken
//! terminal) and end the run.

use super::error::ChannelError;
use crate::Vec;
use alloc::collections::VecDeque;

/// Sink and source of bytes for a running machine.
pub trait ByteChannel {
    /// Appends one byte to the output stream.
    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError>;

    /// Consumes one byte from the input stream, or `None` once it is exhausted.
    fn read_byte(&mut self) -> Result<Option<u8>, ChannelError>;

    /// Delivers any buffered output.
    fn flush(&mut self) -> Result<(), ChannelError> {
        Ok(())
    }
}

impl<T: ByteChannel + ?Sized> ByteChannel for &mut T {
    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
        (**self).write_byte(byte)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, ChannelError> {
        (**self).read_byte()
    }

    fn flush(&mut self) -> Result<(), ChannelError> {
        (**self).flush()
    }
}

/// In-memory channel: a fixed input queue and a growable output buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferChannel {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a channel whose input stream yields `input` and then ends.
    pub fn with_input(input: impl AsRef<[u8]>) -> Self {
        Self {
            input: input.as_ref().iter().copied().collect(),
            output: Vec::new(),
        }
    }

    /// Queues more input bytes.
    pub fn push_input(&mut self, bytes: impl AsRef<[u8]>) {
        self.input.extend(bytes.as_ref().iter().copied());
    }

    /// Bytes written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Removes and returns the bytes written so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.output)
    }

    /// Number of input bytes not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl ByteChannel for BufferChannel {
    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
        self.output.push(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, ChannelError> {
        Ok(self.input.pop_front())
    }
}

#[cfg(feature = "std")]
pub use std_channel::StdChannel;

#[cfg(feature = "std")]
mod std_channel {
    use super::{ByteChannel, ChannelError};
    use crate::ToString;
    use std::io::{ErrorKind, Read, Write};

    /// Channel over a [`Read`]/[`Write`] pair, typically stdin and stdout.
    ///
    /// Output is flushed before every read so that prompts reach an
    /// interactive user before the machine waits for a key.
    pub struct StdChannel<R, W> {
        reader: R,
        writer: W,
    }

    impl<R: Read, W: Write> StdChannel<R, W> {
        pub fn new(reader: R, writer: W) -> Self {
            Self { reader, writer }
        }

        pub fn into_inner(self) -> (R, W) {
            (self.reader, self.writer)
        }
    }

    fn channel_error(e: std::io::Error) -> ChannelError {
        ChannelError::new(e.to_string())
    }

    impl<R: Read, W: Write> ByteChannel for StdChannel<R, W> {
        fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
            self.writer.write_all(&[byte]).map_err(channel_error)
        }

        fn read_byte(&mut self) -> Result<Option<u8>, ChannelError> {
            self.writer.flush().map_err(channel_error)?;
            let mut buf = [0u8; 1];
            loop {
                match self.reader.read(&mut buf) {
                    Ok(0) => return Ok(None),
                    Ok(_) => return Ok(Some(buf[0])),
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(channel_error(e)),
                }
            }
        }

        fn flush(&mut self) -> Result<(), ChannelError> {
            self.writer.flush().map_err(channel_error)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_channel_yields_input_then_none() {
        let mut channel = BufferChannel::with_input("ab");
        assert_eq!(channel.read_byte(), Ok(Some(b'a')));
        assert_eq!(channel.read_byte(), Ok(Some(b'b')));
        assert_eq!(channel.read_byte(), Ok(None));
        assert_eq!(channel.remaining_input(), 0);
    }

    #[test]
    fn buffer_channel_collects_output() {
        let mut channel = BufferChannel::new();
        channel.write_byte(b'o').unwrap();
        channel.write_byte(b'k').unwrap();
        assert_eq!(channel.output(), b"ok");
        assert_eq!(channel.take_output(), b"ok".to_vec());
        assert!(channel.output().is_empty());
    }

    #[test]
    fn mutable_reference_is_a_channel() {
        fn echo_incremented(mut channel: impl ByteChannel) {
            let byte = channel.read_byte().unwrap().unwrap();
            channel.write_byte(byte + 1).unwrap();
        }

        let mut channel = BufferChannel::with_input([1]);
        echo_incremented(&mut channel);
        assert_eq!(channel.output(), &[2]);
    }
}
