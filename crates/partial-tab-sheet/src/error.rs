use std::fmt;

/// Reasons a geometry operation could not run right now.
///
/// These are never surfaced to the host; operations log them and return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetError {
    NotAttached,
    MetricsUnavailable,
    Destroyed,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::NotAttached => write!(f, "window is not attached"),
            SheetError::MetricsUnavailable => write!(f, "display metrics are unavailable"),
            SheetError::Destroyed => write!(f, "strategy was destroyed"),
        }
    }
}

impl std::error::Error for SheetError {}
