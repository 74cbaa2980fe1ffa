use core::sync::atomic::{AtomicBool, Ordering};

use super::error::{ExecutionError, Fault, ResourceExceeded};
use super::heap::Heap;
use super::instruction_set::{Instruction, Platter};
use super::io::ByteChannel;
use super::registers::Registers;
use super::stats::ExecutionStats;

use crate::Vec;
use crate::api::ExecutionOptions;
use crate::scroll::{self, LoadError};

/// Value an Input instruction stores once the input stream is exhausted.
pub const END_OF_INPUT: u32 = u32::MAX;

/// Outcome of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine is ready to fetch another instruction.
    Continue,
    /// A Halt instruction was executed.
    Halted,
}

/// Summary of a run that reached a Halt instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of instructions fetched, including the Halt.
    pub cycles: u64,
}

/// The machine: registers, heap, finger and the byte channel it talks to.
///
/// All state is owned here and only changes through [`Machine::step`]. The
/// program is re-read from the heap on every fetch, so amendments to array 0
/// and Load Program take effect on the very next cycle.
pub struct Machine<C> {
    registers: Registers,
    heap: Heap,
    finger: u32,
    channel: C,
    options: ExecutionOptions,
    stats: Option<ExecutionStats>,
    cycles: u64,
    halted: bool,
    input_exhausted: bool,
}

impl<C: ByteChannel> Machine<C> {
    /// Creates a machine whose array 0 holds `program`, with the finger and
    /// all registers at zero.
    pub fn new(program: Vec<Platter>, channel: C, options: ExecutionOptions) -> Self {
        let stats = options.collect_stats.then(ExecutionStats::new);
        Self {
            registers: Registers::new(),
            heap: Heap::new(program),
            finger: 0,
            channel,
            options,
            stats,
            cycles: 0,
            halted: false,
            input_exhausted: false,
        }
    }

    /// Loads scroll bytes and creates a machine for them.
    pub fn from_scroll(
        bytes: &[u8],
        channel: C,
        options: ExecutionOptions,
    ) -> Result<Self, LoadError> {
        Ok(Self::new(scroll::load(bytes)?, channel, options))
    }

    /// Runs until Halt or an error.
    ///
    /// Output is flushed before returning, whatever the outcome.
    pub fn run(&mut self) -> Result<RunSummary, ExecutionError> {
        let result = self.run_loop(None);
        self.finish(result)
    }

    /// Like [`Machine::run`], but checks `stop` before every cycle and ends
    /// with [`ExecutionError::Interrupted`] once it is set.
    pub fn run_until(&mut self, stop: &AtomicBool) -> Result<RunSummary, ExecutionError> {
        let result = self.run_loop(Some(stop));
        self.finish(result)
    }

    fn run_loop(&mut self, stop: Option<&AtomicBool>) -> Result<RunSummary, ExecutionError> {
        loop {
            if let Some(stop) = stop {
                if stop.load(Ordering::Relaxed) {
                    return Err(ExecutionError::Interrupted {
                        cycles: self.cycles,
                    });
                }
            }
            if self.step()? == Step::Halted {
                return Ok(RunSummary {
                    cycles: self.cycles,
                });
            }
        }
    }

    fn finish(
        &mut self,
        result: Result<RunSummary, ExecutionError>,
    ) -> Result<RunSummary, ExecutionError> {
        let flushed = self.channel.flush();
        match &result {
            Ok(summary) => tracing::debug!(cycles = summary.cycles, "machine halted"),
            Err(error) => tracing::debug!(cycles = self.cycles, %error, "machine stopped"),
        }
        let summary = result?;
        flushed?;
        Ok(summary)
    }

    /// Executes one fetch-decode-execute cycle.
    ///
    /// Stepping a halted machine does nothing and reports [`Step::Halted`]
    /// again.
    pub fn step(&mut self) -> Result<Step, ExecutionError> {
        if self.halted {
            return Ok(Step::Halted);
        }
        if let Some(limit) = self.options.max_cycles {
            if self.cycles >= limit {
                return Err(ResourceExceeded::CycleLimit { limit }.into());
            }
        }

        let finger = self.finger;
        let word = self.heap.read(0, finger)?;
        self.finger = finger.wrapping_add(1);
        self.cycles += 1;

        let instruction = Instruction::decode(word).map_err(|opcode| Fault::UnknownOpcode {
            opcode,
            word,
            finger,
        })?;
        tracing::trace!(finger, ?instruction, registers = %self.registers, "step");

        if let Some(stats) = &mut self.stats {
            stats.record(instruction.opcode());
        }

        let step = self.execute(instruction)?;
        if step == Step::Halted {
            self.halted = true;
        }
        Ok(step)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<Step, ExecutionError> {
        let regs = &mut self.registers;

        use Instruction::*;
        match instruction {
            ConditionalMove { a, b, c } => {
                if regs.get(c) != 0 {
                    regs.set(a, regs.get(b));
                }
            }
            ArrayIndex { a, b, c } => {
                let value = self.heap.read(regs.get(b), regs.get(c))?;
                regs.set(a, value);
            }
            ArrayAmendment { a, b, c } => {
                self.heap.write(regs.get(a), regs.get(b), regs.get(c))?;
            }
            Addition { a, b, c } => {
                regs.set(a, regs.get(b).wrapping_add(regs.get(c)));
            }
            Multiplication { a, b, c } => {
                regs.set(a, regs.get(b).wrapping_mul(regs.get(c)));
            }
            Division { a, b, c } => {
                let quotient = regs
                    .get(b)
                    .checked_div(regs.get(c))
                    .ok_or(Fault::DivisionByZero)?;
                regs.set(a, quotient);
            }
            NotAnd { a, b, c } => {
                regs.set(a, !(regs.get(b) & regs.get(c)));
            }
            Halt => return Ok(Step::Halted),
            Allocation { b, c } => {
                let handle = self.heap.allocate(regs.get(c))?;
                tracing::trace!(handle, size = regs.get(c), "allocated array");
                regs.set(b, handle);
            }
            Abandonment { c } => {
                self.heap.deallocate(regs.get(c))?;
            }
            Output { c } => {
                let value = regs.get(c);
                let byte = u8::try_from(value).map_err(|_| Fault::InvalidByte { value })?;
                self.channel.write_byte(byte)?;
            }
            Input { c } => {
                let value = if self.input_exhausted {
                    END_OF_INPUT
                } else {
                    match self.channel.read_byte()? {
                        Some(byte) => u32::from(byte),
                        None => {
                            self.input_exhausted = true;
                            END_OF_INPUT
                        }
                    }
                };
                regs.set(c, value);
            }
            LoadProgram { b, c } => {
                let source = regs.get(b);
                if source != 0 {
                    self.heap.replace_program(source)?;
                    tracing::trace!(source, len = self.heap.program().len(), "loaded program");
                }
                self.finger = regs.get(c);
            }
            Orthography { a, value } => {
                regs.set(a, value);
            }
        }
        Ok(Step::Continue)
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Index of the next instruction to fetch from array 0.
    pub fn finger(&self) -> u32 {
        self.finger
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Number of instructions fetched so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Per-operator counters, when `collect_stats` is enabled.
    pub fn stats(&self) -> Option<&ExecutionStats> {
        self.stats.as_ref()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Discards the machine state and returns the channel.
    pub fn into_channel(self) -> C {
        self.channel
    }
}
