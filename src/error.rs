//! Error type shared by the library and the `logsynth` binary.

use std::io;

/// Errors that can occur while building a script or writing its output
#[derive(Debug)]
pub enum SynthError {
    /// The output sink could not be opened or written
    Io { context: String, source: io::Error },
    /// A record could not be serialized
    Serialize(String),
    /// A category table is not strictly increasing within (0, 1]
    InvalidThresholds(String),
    /// A status table could not be turned into a weighted distribution
    InvalidWeights(String),
    /// The configured start time could not be parsed
    InvalidStart(String),
}

impl SynthError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { context, source } => write!(f, "{}: {}", context, source),
            Self::Serialize(e) => write!(f, "Serialization failed: {}", e),
            Self::InvalidThresholds(e) => write!(f, "Invalid category thresholds: {}", e),
            Self::InvalidWeights(e) => write!(f, "Invalid status weights: {}", e),
            Self::InvalidStart(e) => write!(f, "Invalid start time: {}", e),
        }
    }
}

impl std::error::Error for SynthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}
