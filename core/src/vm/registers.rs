use super::instruction_set::{NUM_REGISTERS, Reg};

/// Register file: eight unsigned 32-bit registers, all zero at load time.
///
/// Register indices come from 3-bit instruction fields, so every [`Reg`] is
/// in range and access cannot fail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    regs: [u32; NUM_REGISTERS],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn get(&self, reg: Reg) -> u32 {
        self.regs[reg.index()]
    }

    #[inline(always)]
    pub fn set(&mut self, reg: Reg, value: u32) {
        self.regs[reg.index()] = value;
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.regs
    }
}

impl core::fmt::Display for Registers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, value) in self.regs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
