//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define the exit codes the binary terminates with.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Success is 0; every failure exits 1 after printing to stderr.

/// Exit codes for nimbus.
///
/// No failure in this tool is recoverable within the same invocation, so
/// scripts only need to distinguish success from failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - the message on stderr names the cause.
    GeneralError = 1,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}
