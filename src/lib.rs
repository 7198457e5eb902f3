//! # logsynth - Synthetic Demo Log Generator
//!
//! Deterministic generation of a ~1000-line JSON log that tells the story of
//! a small API platform's morning: quiet traffic, a ramp-up, a database
//! incident, recovery and a normal afternoon.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          logsynth                             │
//! │                                                               │
//! │   GeneratorConfig ──► Synthesizer ──────────► write_records   │
//! │   (seed, start,        │  Sampler (rng)        (json/pretty,  │
//! │    output, format)     │  SimClock             xxh3 digest)   │
//! │                        │  records                             │
//! │                        ▼                                      │
//! │                      Script                                   │
//! │   quiet → health-gap → ramp-up → incident → recovery →        │
//! │   scheduled-jobs → afternoon                                  │
//! │   (anchors + WeightTable-driven Scenario per phase)           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logsynth::{GeneratorConfig, OutputFormat, engine, output};
//!
//! let config = GeneratorConfig::default();
//! let records = engine::synthesize(&config)?;
//! let summary = output::write_records(&records, OutputFormat::Json, std::io::stdout())?;
//! assert_eq!(summary.records, 937);
//! # Ok::<(), logsynth::SynthError>(())
//! ```

// Core types - single source of truth
pub mod core;

pub mod clock;
pub mod config;
pub mod error;
pub mod pools;
pub mod sampler;
pub mod weighted;

// Phase scripts and their weighted scenarios
pub mod scenarios;

// Generation loop
pub mod engine;

pub mod output;

// Re-exports for convenience
pub use crate::core::{Event, FieldValue, KeyValue, Level, LogRecord, format_timestamp};

pub use clock::{Delta, SimClock};
pub use config::GeneratorConfig;
pub use engine::{EngineStats, Synthesizer};
pub use error::SynthError;
pub use output::{OutputFormat, WriteSummary};
pub use sampler::{RequestContext, Sampler};
pub use scenarios::{Anchor, Phase, Scenario, Script, Traffic};
pub use weighted::{StatusTable, WeightTable};
