// ── Core error types ──
//
// Building and committing cannot fail: store misses fall back to defaults
// and schema/form mismatches are bugs that panic. What remains is the
// presenter, which talks to a real terminal or window system.

use thiserror::Error;

/// Failure while showing a form to the user.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("presenter failed: {0}")]
    Other(String),
}

/// Failure of a configuration session. The store is never written when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not present the configuration dialog: {0}")]
    Present(#[from] PresentError),
}
