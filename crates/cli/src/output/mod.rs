//! Output formatting utilities
//!
//! Human-readable output with color and quiet switches, plus a spinner for
//! long transfers. Exit status is the machine-readable signal; there is no
//! structured output mode.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::Spinner;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppress non-error output
    pub quiet: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress spinners
    pub no_progress: bool,
}
