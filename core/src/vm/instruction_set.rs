//! Platter VM Instructions - Fixed 32-bit Format
//!
//! Every instruction is exactly one platter (a big-endian 32-bit word). The
//! top four bits select the operator. Two layouts exist:
//!
//! # Standard Operators (0 - 12)
//!
//! ```text
//! ┌────────────┬─────────────────────────┬───────┬───────┬───────┐
//! │  Operator  │        (unused)         │   A   │   B   │   C   │
//! │ bits 31-28 │      bits 27-9          │ 8 - 6 │ 5 - 3 │ 2 - 0 │
//! └────────────┴─────────────────────────┴───────┴───────┴───────┘
//! ```
//!
//! # Orthography (13)
//!
//! ```text
//! ┌────────────┬───────┬──────────────────────────────────────────┐
//! │  Operator  │   A   │                 Value                    │
//! │ bits 31-28 │ 27-25 │               bits 24-0                  │
//! └────────────┴───────┴──────────────────────────────────────────┘
//! ```
//!
//! Operators 14 and 15 are undefined and fault when executed. Decoding is a
//! pure function of the bit pattern, so a platter can be decoded the same way
//! by the machine and by the disassembler.

use core::fmt;

/// A single 32-bit machine word.
pub type Platter = u32;

/// Number of general purpose registers.
pub const NUM_REGISTERS: usize = 8;

/// Largest value an Orthography instruction can load (25 bits).
pub const MAX_IMMEDIATE: u32 = (1 << 25) - 1;

const REGISTER_MASK: u32 = 0b111;

// Register fields are three bits wide, so every field names a valid register.
static_assertions::const_assert_eq!(REGISTER_MASK as usize + 1, NUM_REGISTERS);

/// Operator number carried in the top four bits of a platter.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    ConditionalMove = 0,
    ArrayIndex = 1,
    ArrayAmendment = 2,
    Addition = 3,
    Multiplication = 4,
    Division = 5,
    NotAnd = 6,
    Halt = 7,
    Allocation = 8,
    Abandonment = 9,
    Output = 10,
    Input = 11,
    LoadProgram = 12,
    Orthography = 13,
}

impl Opcode {
    /// Number of defined operators.
    pub const COUNT: usize = 14;

    /// All operators in numeric order.
    pub const ALL: [Opcode; Opcode::COUNT] = [
        Opcode::ConditionalMove,
        Opcode::ArrayIndex,
        Opcode::ArrayAmendment,
        Opcode::Addition,
        Opcode::Multiplication,
        Opcode::Division,
        Opcode::NotAnd,
        Opcode::Halt,
        Opcode::Allocation,
        Opcode::Abandonment,
        Opcode::Output,
        Opcode::Input,
        Opcode::LoadProgram,
        Opcode::Orthography,
    ];

    /// Returns the operator for a raw 4-bit number, if it is defined.
    pub const fn from_number(number: u8) -> Option<Opcode> {
        if (number as usize) < Opcode::COUNT {
            Some(Opcode::ALL[number as usize])
        } else {
            None
        }
    }

    /// Extracts the raw operator number from a platter.
    #[inline(always)]
    pub const fn number_of(word: Platter) -> u8 {
        (word >> 28) as u8
    }

    /// Human readable operator name.
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::ConditionalMove => "Conditional Move",
            Opcode::ArrayIndex => "Array Index",
            Opcode::ArrayAmendment => "Array Amendment",
            Opcode::Addition => "Addition",
            Opcode::Multiplication => "Multiplication",
            Opcode::Division => "Division",
            Opcode::NotAnd => "Not-And",
            Opcode::Halt => "Halt",
            Opcode::Allocation => "Allocation",
            Opcode::Abandonment => "Abandonment",
            Opcode::Output => "Output",
            Opcode::Input => "Input",
            Opcode::LoadProgram => "Load Program",
            Opcode::Orthography => "Orthography",
        }
    }

    /// Short assembly mnemonic used by listings.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::ConditionalMove => "cmov",
            Opcode::ArrayIndex => "index",
            Opcode::ArrayAmendment => "amend",
            Opcode::Addition => "add",
            Opcode::Multiplication => "mul",
            Opcode::Division => "div",
            Opcode::NotAnd => "nand",
            Opcode::Halt => "halt",
            Opcode::Allocation => "alloc",
            Opcode::Abandonment => "free",
            Opcode::Output => "out",
            Opcode::Input => "in",
            Opcode::LoadProgram => "load",
            Opcode::Orthography => "ortho",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register index (0-7).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    /// Creates a register index. Only the low three bits are kept.
    pub const fn new(index: u8) -> Self {
        Reg(index & REGISTER_MASK as u8)
    }

    #[inline(always)]
    const fn field(word: Platter, shift: u32) -> Self {
        Reg(((word >> shift) & REGISTER_MASK) as u8)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A decoded machine instruction.
///
/// Field names follow the encoding: `a`, `b` and `c` are the three register
/// fields of the standard layout. Their role differs per operator (for
/// example Allocation writes `b` and reads `c`; `a` is ignored).
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `if r[c] != 0 { r[a] = r[b] }`
    ConditionalMove { a: Reg, b: Reg, c: Reg },
    /// `r[a] = heap[r[b]][r[c]]`
    ArrayIndex { a: Reg, b: Reg, c: Reg },
    /// `heap[r[a]][r[b]] = r[c]`
    ArrayAmendment { a: Reg, b: Reg, c: Reg },
    /// `r[a] = r[b] + r[c]` (wrapping)
    Addition { a: Reg, b: Reg, c: Reg },
    /// `r[a] = r[b] * r[c]` (wrapping)
    Multiplication { a: Reg, b: Reg, c: Reg },
    /// `r[a] = r[b] / r[c]` (unsigned, faults on zero)
    Division { a: Reg, b: Reg, c: Reg },
    /// `r[a] = !(r[b] & r[c])`
    NotAnd { a: Reg, b: Reg, c: Reg },
    Halt,
    /// `r[b] = allocate(r[c])`
    Allocation { b: Reg, c: Reg },
    /// `deallocate(r[c])`
    Abandonment { c: Reg },
    /// Emit `r[c]` as a byte.
    Output { c: Reg },
    /// Read a byte into `r[c]`, or all ones once input is exhausted.
    Input { c: Reg },
    /// Replace array 0 with a copy of `heap[r[b]]` (unless `r[b] == 0`),
    /// then jump to `r[c]`.
    LoadProgram { b: Reg, c: Reg },
    /// `r[a] = value`
    Orthography { a: Reg, value: u32 },
}

impl Instruction {
    /// Decodes a platter.
    ///
    /// Returns the raw operator number when it is not a defined operator.
    #[inline]
    pub const fn decode(word: Platter) -> Result<Instruction, u8> {
        let a = Reg::field(word, 6);
        let b = Reg::field(word, 3);
        let c = Reg::field(word, 0);

        let opcode = match Opcode::from_number(Opcode::number_of(word)) {
            Some(opcode) => opcode,
            None => return Err(Opcode::number_of(word)),
        };

        Ok(match opcode {
            Opcode::ConditionalMove => Instruction::ConditionalMove { a, b, c },
            Opcode::ArrayIndex => Instruction::ArrayIndex { a, b, c },
            Opcode::ArrayAmendment => Instruction::ArrayAmendment { a, b, c },
            Opcode::Addition => Instruction::Addition { a, b, c },
            Opcode::Multiplication => Instruction::Multiplication { a, b, c },
            Opcode::Division => Instruction::Division { a, b, c },
            Opcode::NotAnd => Instruction::NotAnd { a, b, c },
            Opcode::Halt => Instruction::Halt,
            Opcode::Allocation => Instruction::Allocation { b, c },
            Opcode::Abandonment => Instruction::Abandonment { c },
            Opcode::Output => Instruction::Output { c },
            Opcode::Input => Instruction::Input { c },
            Opcode::LoadProgram => Instruction::LoadProgram { b, c },
            Opcode::Orthography => Instruction::Orthography {
                a: Reg::field(word, 25),
                value: word & MAX_IMMEDIATE,
            },
        })
    }

    /// Encodes the instruction as a platter. Unused fields are zero and an
    /// Orthography value is truncated to 25 bits.
    pub const fn encode(self) -> Platter {
        const fn abc(op: Opcode, a: Reg, b: Reg, c: Reg) -> Platter {
            ((op as u32) << 28) | ((a.0 as u32) << 6) | ((b.0 as u32) << 3) | c.0 as u32
        }
        const R0: Reg = Reg(0);

        match self {
            Instruction::ConditionalMove { a, b, c } => abc(Opcode::ConditionalMove, a, b, c),
            Instruction::ArrayIndex { a, b, c } => abc(Opcode::ArrayIndex, a, b, c),
            Instruction::ArrayAmendment { a, b, c } => abc(Opcode::ArrayAmendment, a, b, c),
            Instruction::Addition { a, b, c } => abc(Opcode::Addition, a, b, c),
            Instruction::Multiplication { a, b, c } => abc(Opcode::Multiplication, a, b, c),
            Instruction::Division { a, b, c } => abc(Opcode::Division, a, b, c),
            Instruction::NotAnd { a, b, c } => abc(Opcode::NotAnd, a, b, c),
            Instruction::Halt => abc(Opcode::Halt, R0, R0, R0),
            Instruction::Allocation { b, c } => abc(Opcode::Allocation, R0, b, c),
            Instruction::Abandonment { c } => abc(Opcode::Abandonment, R0, R0, c),
            Instruction::Output { c } => abc(Opcode::Output, R0, R0, c),
            Instruction::Input { c } => abc(Opcode::Input, R0, R0, c),
            Instruction::LoadProgram { b, c } => abc(Opcode::LoadProgram, R0, b, c),
            Instruction::Orthography { a, value } => {
                ((Opcode::Orthography as u32) << 28)
                    | ((a.0 as u32) << 25)
                    | (value & MAX_IMMEDIATE)
            }
        }
    }

    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::ConditionalMove { .. } => Opcode::ConditionalMove,
            Instruction::ArrayIndex { .. } => Opcode::ArrayIndex,
            Instruction::ArrayAmendment { .. } => Opcode::ArrayAmendment,
            Instruction::Addition { .. } => Opcode::Addition,
            Instruction::Multiplication { .. } => Opcode::Multiplication,
            Instruction::Division { .. } => Opcode::Division,
            Instruction::NotAnd { .. } => Opcode::NotAnd,
            Instruction::Halt => Opcode::Halt,
            Instruction::Allocation { .. } => Opcode::Allocation,
            Instruction::Abandonment { .. } => Opcode::Abandonment,
            Instruction::Output { .. } => Opcode::Output,
            Instruction::Input { .. } => Opcode::Input,
            Instruction::LoadProgram { .. } => Opcode::LoadProgram,
            Instruction::Orthography { .. } => Opcode::Orthography,
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match *self {
            Self::ConditionalMove { a, b, c }
            | Self::ArrayIndex { a, b, c }
            | Self::ArrayAmendment { a, b, c }
            | Self::Addition { a, b, c }
            | Self::Multiplication { a, b, c }
            | Self::Division { a, b, c }
            | Self::NotAnd { a, b, c } => write!(f, "{:5} {}, {}, {}", mnemonic, a, b, c),
            Self::Halt => write!(f, "{}", mnemonic),
            Self::Allocation { b, c } | Self::LoadProgram { b, c } => {
                write!(f, "{:5} {}, {}", mnemonic, b, c)
            }
            Self::Abandonment { c } | Self::Output { c } | Self::Input { c } => {
                write!(f, "{:5} {}", mnemonic, c)
            }
            Self::Orthography { a, value } => write!(f, "{:5} {}, {}", mnemonic, a, value),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format;

    #[test]
    fn decodes_standard_register_fields() {
        // add r1, r2, r3 = 0011 ... 001 010 011
        let word = 0x3000_0000 | (1 << 6) | (2 << 3) | 3;
        assert_eq!(
            Instruction::decode(word),
            Ok(Instruction::Addition {
                a: Reg::new(1),
                b: Reg::new(2),
                c: Reg::new(3)
            })
        );
    }

    #[test]
    fn ignores_unused_bits_in_standard_layout() {
        let noisy = 0x7FFF_FE00;
        assert_eq!(Instruction::decode(noisy), Ok(Instruction::Halt));
    }

    #[test]
    fn decodes_orthography_immediate() {
        let word = 0xD000_0048;
        assert_eq!(
            Instruction::decode(word),
            Ok(Instruction::Orthography {
                a: Reg::new(0),
                value: 72
            })
        );

        let word = 0xDFFF_FFFF;
        assert_eq!(
            Instruction::decode(word),
            Ok(Instruction::Orthography {
                a: Reg::new(7),
                value: MAX_IMMEDIATE
            })
        );
    }

    #[test]
    fn rejects_undefined_operators() {
        assert_eq!(Instruction::decode(0xE000_0000), Err(14));
        assert_eq!(Instruction::decode(0xF123_4567), Err(15));
    }

    #[test]
    fn encode_matches_reference_words() {
        let ortho = Instruction::Orthography {
            a: Reg::new(0),
            value: 72,
        };
        assert_eq!(ortho.encode(), 0xD000_0048);
        assert_eq!(Instruction::Output { c: Reg::new(0) }.encode(), 0xA000_0000);
        assert_eq!(Instruction::Halt.encode(), 0x7000_0000);
    }

    #[test]
    fn encode_truncates_oversized_immediate() {
        let ortho = Instruction::Orthography {
            a: Reg::new(2),
            value: u32::MAX,
        };
        let decoded = Instruction::decode(ortho.encode()).unwrap();
        assert_eq!(
            decoded,
            Instruction::Orthography {
                a: Reg::new(2),
                value: MAX_IMMEDIATE
            }
        );
    }

    #[test]
    fn opcode_numbers_match_table() {
        for (number, opcode) in Opcode::ALL.iter().enumerate() {
            assert_eq!(*opcode as usize, number);
            assert_eq!(Opcode::from_number(number as u8), Some(*opcode));
        }
        assert_eq!(Opcode::from_number(14), None);
    }

    #[test]
    fn debug_formatting() {
        let add = Instruction::Addition {
            a: Reg::new(1),
            b: Reg::new(2),
            c: Reg::new(3),
        };
        assert_eq!(format!("{:?}", add), "add   r1, r2, r3");
        assert_eq!(format!("{:?}", Instruction::Halt), "halt");
        assert_eq!(
            format!("{}", Instruction::Output { c: Reg::new(4) }),
            "out   r4"
        );
    }
}
