//! Error types for session response validation.
//!
//! Covers every way a session-tool invocation can fail before object parsing
//! starts. Once the envelope is accepted, the object stream parser itself
//! never fails; malformed structural input degrades to local line skips.

use thiserror::Error;

/// Errors raised while validating a session-tool response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The banner/version/build/prompt preamble did not match.
    ///
    /// The code (1-6) identifies the *last* preamble check that failed: the
    /// six checks run independently and a later failure overwrites an
    /// earlier one. This matches the session tool's historical contract and
    /// is relied upon by operator tooling, so it is not short-circuited.
    #[error("session preamble mismatch (check {code} failed)")]
    EnvelopeMismatch { code: u8 },

    /// An `Error` token appeared in the payload before the `information:`
    /// marker line.
    #[error("session output contains an embedded error report")]
    EmbeddedErrorToken,

    /// The session tool exited with an unusable status.
    ///
    /// Status 1 is still usable because scripts run with
    /// `set option on_error=continue`.
    #[error("session tool exited with status {status}")]
    ProcessFailure { status: i32 },

    /// The session tool produced no output at all.
    #[error("session tool produced no output")]
    EmptyOutput,
}

/// Convenience alias for results with [`SessionError`].
pub type Result<T> = std::result::Result<T, SessionError>;
