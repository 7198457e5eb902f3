//! Synthesis Engine
//!
//! Runs a [`Script`] phase by phase and accumulates the stamped records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Synthesizer                          │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────┐  │
//! │  │   Sampler   │  │  SimClock   │  │    Records      │  │
//! │  │ (seeded rng)│──│  (advance)  │──│  (accumulator)  │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────┘  │
//! │         ▲                                               │
//! │         │ anchors, then weighted ticks                  │
//! │  ┌─────────────────────────────────────────────────┐    │
//! │  │ quiet → gap → ramp-up → incident → recovery →   │    │
//! │  │ gap → afternoon                                 │    │
//! │  └─────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────┘
//! ```

use crate::clock::{Delta, SimClock};
use crate::config::GeneratorConfig;
use crate::core::{Event, Level, LogRecord, format_timestamp};
use crate::error::SynthError;
use crate::sampler::Sampler;
use crate::scenarios::{Phase, Script};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Engine statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub total_records: u64,
    pub anchor_records: u64,
    pub tick_records: u64,
    pub phases_completed: u64,
    pub by_level: BTreeMap<Level, u64>,
}

/// Generator context: owns the random source, the clock and the output
pub struct Synthesizer {
    sampler: Sampler,
    clock: SimClock,
    records: Vec<LogRecord>,
    stats: EngineStats,
}

impl Synthesizer {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            sampler: Sampler::new(config.seed),
            clock: SimClock::new(config.start),
            records: Vec::new(),
            stats: EngineStats::default(),
        }
    }

    /// Run every phase of `script` in order
    pub fn run(&mut self, script: &Script) {
        self.records.reserve(script.expected_records());
        for phase in script.phases() {
            self.run_phase(phase);
        }
    }

    /// Emit a phase's anchors, then its weighted traffic
    pub fn run_phase(&mut self, phase: &Phase) {
        let before = self.records.len();

        for anchor in &phase.anchors {
            let ts = self.clock.advance(&anchor.delta, self.sampler.rng_mut());
            let event = (anchor.build)(&mut self.sampler);
            self.push(ts, event);
            self.stats.anchor_records += 1;
        }

        if let Some(traffic) = &phase.traffic {
            for _ in 0..traffic.ticks {
                let ts = self.clock.advance(&traffic.delta, self.sampler.rng_mut());
                let event = traffic.scenario.tick(&mut self.sampler);
                self.push(ts, event);
                self.stats.tick_records += 1;
            }
        }

        self.stats.phases_completed += 1;
        let clock = format_timestamp(&self.clock.now());
        debug!(
            phase = phase.name,
            records = self.records.len() - before,
            clock = %clock,
            "Phase complete."
        );
    }

    /// Stamp and record a single event after advancing the clock
    pub fn emit(&mut self, delta: &Delta, event: Event) {
        let ts = self.clock.advance(delta, self.sampler.rng_mut());
        self.push(ts, event);
    }

    fn push(&mut self, ts: DateTime<Utc>, event: Event) {
        *self.stats.by_level.entry(event.level).or_insert(0) += 1;
        self.stats.total_records += 1;
        self.records.push(LogRecord::new(ts, event));
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LogRecord> {
        self.records
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Current simulated time
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }
}

/// Run the demo script with `config` and return the records
pub fn synthesize(config: &GeneratorConfig) -> Result<Vec<LogRecord>, SynthError> {
    let script = Script::demo()?;
    let mut engine = Synthesizer::new(config);
    engine.run(&script);
    Ok(engine.into_records())
}
