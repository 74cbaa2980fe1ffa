//! Error rendering using miette
//!
//! Wraps [`Error`] in a [`Report`] that carries a stable diagnostic code and
//! a help line, then draws it with miette's graphical handler.

use std::fmt::Display;
use std::io::Write;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use platter_core::vm::{ExecutionError, Fault, ResourceExceeded};

use crate::Error;

/// An [`Error`] dressed up as a miette diagnostic.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Report(#[from] pub Error);

impl Report {
    fn code_str(&self) -> &'static str {
        let error = match &self.0 {
            Error::Load(_) => return "platter::load::malformed",
            Error::Unreadable { .. } => return "platter::load::unreadable",
            Error::Execution(error) => error,
        };
        if let Some(fault) = error.as_fault() {
            return match fault {
                Fault::UnknownOpcode { .. } => "platter::fault::unknown_opcode",
                Fault::InvalidHandle { .. } => "platter::fault::invalid_handle",
                Fault::OutOfBounds { .. } => "platter::fault::out_of_bounds",
                Fault::DivisionByZero => "platter::fault::division_by_zero",
                Fault::InvalidByte { .. } => "platter::fault::invalid_byte",
            };
        }
        match error {
            ExecutionError::ResourceExceeded(_) => "platter::resource_exceeded",
            ExecutionError::Interrupted { .. } => "platter::interrupted",
            _ => "platter::channel",
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        let help = match &self.0 {
            Error::Load(_) => "a scroll is a non-empty sequence of big-endian 32-bit platters",
            Error::Unreadable { .. } => return None,
            Error::Execution(error) => match error {
                ExecutionError::Fault(fault) => match fault {
                    Fault::UnknownOpcode { .. } => {
                        "operators 14 and 15 are undefined; try --disassemble to inspect the scroll"
                    }
                    Fault::InvalidHandle { .. } => {
                        "the array was never allocated, was already abandoned, or is array 0"
                    }
                    Fault::OutOfBounds { .. } => "arrays are indexed from 0 up to their length",
                    Fault::DivisionByZero => "the divisor register held 0",
                    Fault::InvalidByte { .. } => "Output only accepts values from 0 to 255",
                },
                ExecutionError::ResourceExceeded(ResourceExceeded::CycleLimit { .. }) => {
                    "raise --max-cycles or leave it unset to run without a limit"
                }
                ExecutionError::ResourceExceeded(ResourceExceeded::HandlesExhausted { .. }) => {
                    "the scroll never abandons the arrays it allocates"
                }
                ExecutionError::ResourceExceeded(ResourceExceeded::OutOfMemory { .. }) => {
                    "the Allocation size register probably holds a garbage value"
                }
                ExecutionError::Interrupted { .. } | ExecutionError::Channel(_) => return None,
            },
        };
        Some(help)
    }
}

impl Diagnostic for Report {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help_str()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use platter::{load_scroll_file, render_error};
///
/// if let Err(e) = load_scroll_file("sandmark.umz") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to(error, &mut std::io::stderr()).ok();
}

/// Render an error to a specific writer
///
/// This is useful when you want to control where the error is written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    writer.write_all(render(error, true).as_bytes())
}

/// Render an error to a String (useful for tests, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    render(error, true)
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    render(error, false)
}

fn render(error: &Error, use_color: bool) -> String {
    let theme = if use_color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let report = Report(error.clone());
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut out, &report)
        .is_err()
    {
        // Fall back to the plain message.
        out = format!("error: {error}\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use platter_core::scroll::LoadError;

    #[test]
    fn test_render_fault() {
        let output = render_error_to_string_no_color(&Fault::DivisionByZero.into());

        assert!(output.contains("division by zero"));
        assert!(output.contains("platter::fault::division_by_zero"));
        assert!(output.contains("divisor register"));
    }

    #[test]
    fn test_render_load_error() {
        let error = Error::Load(LoadError::Misaligned { len: 7 });
        let output = render_error_to_string_no_color(&error);

        assert!(output.contains("scroll length 7 is not a multiple of 4 bytes"));
        assert!(output.contains("platter::load::malformed"));
    }

    #[test]
    fn test_render_without_help() {
        let error = Error::Execution(ExecutionError::Interrupted { cycles: 12 });
        let report = Report(error.clone());
        assert!(report.help().is_none());

        let output = render_error_to_string_no_color(&error);
        assert!(output.contains("platter::interrupted"));
    }

    #[test]
    fn test_codes_per_category() {
        let code = |error: Error| Report(error).code_str();

        assert_eq!(
            code(Fault::OutOfBounds { handle: 1, index: 4, len: 2 }.into()),
            "platter::fault::out_of_bounds"
        );
        assert_eq!(
            code(ExecutionError::from(ResourceExceeded::OutOfMemory { size: u32::MAX }).into()),
            "platter::resource_exceeded"
        );
        assert_eq!(
            code(ExecutionError::from(platter_core::vm::ChannelError::new("broken pipe")).into()),
            "platter::channel"
        );
    }

    #[test]
    fn test_render_out_of_memory() {
        let error = Error::Execution(ResourceExceeded::OutOfMemory { size: 7 }.into());
        let output = render_error_to_string_no_color(&error);

        assert!(output.contains("cannot allocate an array of 7 platters"));
        assert!(output.contains("Allocation size register"));
    }

    #[test]
    fn test_render_to_writer_matches_string() {
        let error = Error::from(Fault::InvalidHandle { handle: 9 });
        let mut buf = Vec::new();
        render_error_to(&error, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), render_error_to_string(&error));
    }
}
