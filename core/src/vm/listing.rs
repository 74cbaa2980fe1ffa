use core::fmt;

use super::instruction_set::{Instruction, Platter};

/// Human readable renderings of a scroll.
///
/// Both listings borrow the platters and format lazily, so they can be
/// written straight to a terminal without building a string first.
pub struct Listing;

impl Listing {
    /// One line per platter: hex address, hex word, and the decoded instruction.
    ///
    /// Platters that do not decode (operators 14 and 15) are shown as
    /// `.data`, since scrolls freely mix code and data.
    pub fn disassemble(platters: &[Platter]) -> Disassembly<'_> {
        Disassembly { platters }
    }

    /// One 32-character bit string per platter.
    pub fn bits(platters: &[Platter]) -> Bits<'_> {
        Bits { platters }
    }
}

pub struct Disassembly<'a> {
    platters: &'a [Platter],
}

impl fmt::Display for Disassembly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (addr, &word) in self.platters.iter().enumerate() {
            match Instruction::decode(word) {
                Ok(instruction) => {
                    writeln!(f, "{:08x}:  {:08x}  {:?}", addr, word, instruction)?;
                }
                Err(_) => {
                    writeln!(f, "{:08x}:  {:08x}  .data 0x{:08x}", addr, word, word)?;
                }
            }
        }
        Ok(())
    }
}

pub struct Bits<'a> {
    platters: &'a [Platter],
}

impl fmt::Display for Bits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.platters {
            writeln!(f, "{:032b}", word)?;
        }
        Ok(())
    }
}
