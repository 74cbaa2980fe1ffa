//! Configuration options for running a scroll.

/// Configuration options for machine execution.
///
/// These options control resource limits and bookkeeping during a run. The
/// defaults run a scroll to completion with no extra bookkeeping, which is
/// what the instruction set itself specifies.
///
/// # Example
///
/// ```
/// use platter_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     max_cycles: Some(1_000_000),
///     collect_stats: true,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum number of instructions to execute before giving up.
    ///
    /// Set to `None` for unlimited execution (be careful with untrusted scrolls!).
    ///
    /// Default: None
    pub max_cycles: Option<u64>,

    /// Count executed instructions per operator.
    ///
    /// Default: false
    pub collect_stats: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            max_cycles: None,
            collect_stats: false,
        }
    }
}
