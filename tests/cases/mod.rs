//! Shared helpers for scroll-level tests.
//!
//! `scroll_case!` assembles a program from [`Instruction`]s, runs it on a
//! [`BufferChannel`] with the given input, and checks the output together
//! with either the cycle count or the exit code of the error.

#![allow(dead_code)]

pub use platter::vm::{BufferChannel, Instruction, Reg};
pub use platter::{Error, ExecutionOptions, Machine, Platter, exit_code};

pub fn r(index: u8) -> Reg {
    Reg::new(index)
}

pub fn assemble(instructions: &[Instruction]) -> Vec<Platter> {
    instructions.iter().map(|i| i.encode()).collect()
}

/// Runs `program` and returns the output together with the outcome.
pub fn run(program: Vec<Platter>, input: &[u8]) -> (Vec<u8>, Result<u64, Error>) {
    let mut machine = Machine::new(
        program,
        BufferChannel::with_input(input),
        ExecutionOptions::default(),
    );
    let result = machine
        .run()
        .map(|summary| summary.cycles)
        .map_err(Error::from);
    (machine.into_channel().take_output(), result)
}

macro_rules! scroll_case {
    (
        $name:ident,
        program: [$($instr:expr),* $(,)?],
        $(data: $data:expr,)?
        $(input: $input:expr,)?
        output: $output:expr,
        $(cycles: $cycles:expr,)?
        $(exit_code: $code:expr,)?
    ) => {
        #[test]
        fn $name() {
            #[allow(unused_mut)]
            let mut program = $crate::cases::assemble(&[$($instr),*]);
            $(program.extend_from_slice(&$data);)?
            #[allow(unused_variables)]
            let input: &[u8] = b"";
            $(let input: &[u8] = $input;)?

            let (output, result) = $crate::cases::run(program, input);
            let expected: &[u8] = $output;
            pretty_assertions::assert_eq!(
                String::from_utf8_lossy(&output),
                String::from_utf8_lossy(expected)
            );
            $(pretty_assertions::assert_eq!(result, Ok($cycles));)?
            $(pretty_assertions::assert_eq!(
                result.map_err(|e| e.exit_code()),
                Err($code)
            );)?
        }
    };
}
