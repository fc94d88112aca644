//! Runtime configuration options

use crate::vm::OverflowPolicy;

/// Configuration options for the runtime
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    /// Log a summary of every program before it runs
    pub debug_mode: bool,
    /// Log each executed instruction together with memory
    pub trace_execution: bool,
    pub overflow_policy: OverflowPolicy,
}

impl RuntimeConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug mode
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Enable or disable per-instruction tracing
    pub fn with_trace_execution(mut self, trace_execution: bool) -> Self {
        self.trace_execution = trace_execution;
        self
    }

    /// Choose how ADD handles sums above 255
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }
}
