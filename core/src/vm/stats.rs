use super::instruction_set::Opcode;

/// Per-operator instruction counters.
///
/// Backed by a flat array indexed by [`Opcode`] discriminant so that counting
/// on the hot path is a single increment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionStats {
    counts: [u64; Opcode::COUNT],
}

impl Default for ExecutionStats {
    fn default() -> Self {
        Self {
            counts: [0; Opcode::COUNT],
        }
    }
}

impl ExecutionStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn record(&mut self, opcode: Opcode) {
        let slot = &mut self.counts[opcode as usize];
        *slot = slot.saturating_add(1);
    }

    /// Number of executed instructions with the given operator.
    pub fn count(&self, opcode: Opcode) -> u64 {
        self.counts[opcode as usize]
    }

    /// Total number of executed instructions.
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// Iterates over all operators and their counts, in operator order.
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, u64)> + '_ {
        Opcode::ALL.into_iter().zip(self.counts)
    }
}

impl core::fmt::Display for ExecutionStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.total();
        for (opcode, count) in self.iter().filter(|(_, count)| *count > 0) {
            let percent = count as f64 * 100.0 / total as f64;
            writeln!(f, "{:>16}  {:>12}  {:>6.2}%", opcode.name(), count, percent)?;
        }
        write!(f, "{:>16}  {:>12}", "Total", total)
    }
}
