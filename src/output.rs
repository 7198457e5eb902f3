//! Output stage
//!
//! Writes records one per line, in generation order, to a single sink and
//! fingerprints the bytes written so two runs can be compared at a glance.

use crate::core::{LogRecord, format_timestamp};
use crate::error::SynthError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// `<timestamp> [LEVEL] <service> - <message>`
    Pretty,
}

/// What a write produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub records: usize,
    pub bytes: u64,
    /// xxh3-64 of every byte written
    pub digest: u64,
}

/// Render a single record as one line, without the trailing newline
pub fn render_line(record: &LogRecord, format: OutputFormat) -> Result<String, SynthError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Pretty => Ok(format!(
            "{} [{}] {} - {}",
            format_timestamp(&record.timestamp),
            record.level.as_str().to_uppercase(),
            record.service_name().unwrap_or("unknown"),
            record.message
        )),
    }
}

/// Write `records` to `writer`, one line each
pub fn write_records<W: Write>(
    records: &[LogRecord],
    format: OutputFormat,
    writer: W,
) -> Result<WriteSummary, SynthError> {
    let mut writer = BufWriter::new(writer);
    let mut hasher = Xxh3::new();
    let mut bytes = 0u64;

    for record in records {
        let mut line = render_line(record, format)?;
        line.push('\n');
        writer
            .write_all(line.as_bytes())
            .map_err(|e| SynthError::io("Failed to write record", e))?;
        hasher.update(line.as_bytes());
        bytes += line.len() as u64;
    }

    writer
        .flush()
        .map_err(|e| SynthError::io("Failed to flush output", e))?;

    Ok(WriteSummary {
        records: records.len(),
        bytes,
        digest: hasher.digest(),
    })
}

/// Write `records` to a file, creating missing parent directories, or to
/// stdout when `path` is `-`
pub fn write_to_path(
    records: &[LogRecord],
    format: OutputFormat,
    path: &Path,
) -> Result<WriteSummary, SynthError> {
    if path.as_os_str() == crate::config::STDOUT_PATH {
        return write_records(records, format, io::stdout().lock());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SynthError::io(format!("Failed to create {}", parent.display()), e)
        })?;
    }

    let file = File::create(path)
        .map_err(|e| SynthError::io(format!("Failed to open {}", path.display()), e))?;
    write_records(records, format, file)
}
