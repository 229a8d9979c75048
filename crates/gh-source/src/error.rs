use std::fmt;

/// I/O and parse failures from a snapshot source (§7 "I/O errors").
/// These are logged and the affected security is skipped by the
/// batch driver; they never panic.
#[derive(Debug)]
pub enum SourceError {
    Io { path: String, source: std::io::Error },
    Parse { path: String, reason: String },
    /// The source has no more data to give for this security (the
    /// caller should have checked `is_exhausted` first).
    Exhausted,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => write!(f, "reading {path}: {source}"),
            SourceError::Parse { path, reason } => write!(f, "parsing {path}: {reason}"),
            SourceError::Exhausted => write!(f, "snapshot source exhausted"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
