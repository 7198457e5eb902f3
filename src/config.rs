//! Generator configuration
//!
//! Defaults reproduce the canonical demo log; the CLI may override the seed,
//! start time, sink and format.

use crate::error::SynthError;
use crate::output::OutputFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SEED: u64 = 42;

/// 2025-01-15T06:00:00Z
pub const DEFAULT_START_UNIX: i64 = 1_736_920_800;

pub const DEFAULT_OUTPUT: &str = "testdata/demo.log";

/// Output path that selects standard output
pub const STDOUT_PATH: &str = "-";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed for every random draw (default: 42)
    pub seed: u64,
    /// Clock origin (default: 2025-01-15T06:00:00Z)
    pub start: DateTime<Utc>,
    /// Output file, or `-` for stdout (default: testdata/demo.log)
    pub output: PathBuf,
    /// Line format (default: json)
    pub format: OutputFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            start: default_start(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::Json,
        }
    }
}

impl GeneratorConfig {
    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT_PATH
    }
}

pub fn default_start() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_START_UNIX, 0).unwrap_or_default()
}

/// Parse an RFC 3339 start time, normalized to UTC
pub fn parse_start(s: &str) -> Result<DateTime<Utc>, SynthError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SynthError::InvalidStart(format!("{:?}: {}", s, e)))
}
