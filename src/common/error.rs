//! Error types for Pagelab.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in Pagelab.
///
/// Normal stepping never fails - trace exhaustion is a defined terminal
/// signal, not an error. The only failures are configuration mistakes,
/// which are rejected at construction/selection time rather than being
/// silently substituted with defaults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested trace length was zero.
    #[error("trace length must be positive, got {0}")]
    InvalidTraceLength(usize),

    /// The requested page space was zero.
    #[error("page space must be positive, got {0}")]
    InvalidPageSpace(u32),

    /// The requested frame capacity was zero.
    #[error("frame capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// A policy identifier did not name one of the five fixed policies.
    #[error("unknown replacement policy: {0:?}")]
    UnknownPolicy(String),
}
