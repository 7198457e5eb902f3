//! Traffic Phases
//!
//! The demo log is a fixed narrative told in seven phases:
//! - **quiet**: early-morning trickle of successful requests
//! - **health-gap**: fifteen silent minutes ending in a health check
//! - **ramp-up**: morning traffic with sporadic timeouts and rate limiting
//! - **incident**: database pool exhaustion, circuit breaker, error storm
//! - **recovery**: pool and breaker restored, residual latency
//! - **scheduled-jobs**: twenty quiet minutes and two batch jobs
//! - **afternoon**: normal traffic with a sprinkle of every level
//!
//! Each phase is a list of scripted [`Anchor`]s followed by optional
//! [`Traffic`]: a tick count, a clock delta and a [`Scenario`] that turns one
//! weighted draw into one event.

pub mod afternoon;
pub mod incident;
pub mod milestones;
pub mod quiet;
pub mod ramp_up;
pub mod recovery;

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::error::SynthError;
use crate::sampler::{RequestContext, Sampler};
use crate::weighted::StatusTable;

pub use afternoon::Afternoon;
pub use incident::Incident;
pub use quiet::Quiet;
pub use ramp_up::RampUp;
pub use recovery::Recovery;

/// Trait for per-tick traffic generators
///
/// A scenario samples the request context, draws a category from its
/// weight table and synthesizes that category's event. The caller stamps
/// the event with the simulated time.
pub trait Scenario {
    /// Human-readable name of the scenario
    fn name(&self) -> &str;

    /// Generate the event for one tick
    fn tick(&self, sampler: &mut Sampler) -> Event;
}

/// Scripted record emitted unconditionally at a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub delta: Delta,
    pub build: fn(&mut Sampler) -> Event,
}

impl Anchor {
    pub const fn new(delta: Delta, build: fn(&mut Sampler) -> Event) -> Self {
        Self { delta, build }
    }
}

/// Weighted traffic loop of a phase
pub struct Traffic {
    pub ticks: usize,
    pub delta: Delta,
    pub scenario: Box<dyn Scenario>,
}

pub struct Phase {
    pub name: &'static str,
    pub anchors: Vec<Anchor>,
    pub traffic: Option<Traffic>,
}

impl Phase {
    /// Records this phase contributes to the output
    pub fn record_count(&self) -> usize {
        self.anchors.len() + self.traffic.as_ref().map_or(0, |t| t.ticks)
    }
}

/// Ordered phase sequence for one run
pub struct Script {
    phases: Vec<Phase>,
}

impl Script {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// The quiet → incident → recovery → afternoon narrative
    pub fn demo() -> Result<Self, SynthError> {
        Ok(Self::new(vec![
            Phase {
                name: "quiet",
                anchors: Vec::new(),
                traffic: Some(Traffic {
                    ticks: quiet::TICKS,
                    delta: quiet::DELTA,
                    scenario: Box::new(Quiet::new()?),
                }),
            },
            Phase {
                name: "health-gap",
                anchors: milestones::health_gap(),
                traffic: None,
            },
            Phase {
                name: "ramp-up",
                anchors: Vec::new(),
                traffic: Some(Traffic {
                    ticks: ramp_up::TICKS,
                    delta: ramp_up::DELTA,
                    scenario: Box::new(RampUp::new()?),
                }),
            },
            Phase {
                name: "incident",
                anchors: incident::anchors(),
                traffic: Some(Traffic {
                    ticks: incident::TICKS,
                    delta: incident::DELTA,
                    scenario: Box::new(Incident::new()?),
                }),
            },
            Phase {
                name: "recovery",
                anchors: recovery::anchors(),
                traffic: Some(Traffic {
                    ticks: recovery::TICKS,
                    delta: recovery::DELTA,
                    scenario: Box::new(Recovery::new()?),
                }),
            },
            Phase {
                name: "scheduled-jobs",
                anchors: milestones::scheduled_jobs(),
                traffic: None,
            },
            Phase {
                name: "afternoon",
                anchors: Vec::new(),
                traffic: Some(Traffic {
                    ticks: afternoon::TICKS,
                    delta: afternoon::DELTA,
                    scenario: Box::new(Afternoon::new()?),
                }),
            },
        ]))
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Total records a run of this script emits
    pub fn expected_records(&self) -> usize {
        self.phases.iter().map(Phase::record_count).sum()
    }
}

/// Status mix and latency of the request-completed fallback category
#[derive(Debug, Clone)]
pub struct RequestProfile {
    statuses: StatusTable,
    base_ms: i64,
    spread_ms: i64,
}

impl RequestProfile {
    pub fn new(statuses: &[(u16, u32)], base_ms: i64, spread_ms: i64) -> Result<Self, SynthError> {
        Ok(Self {
            statuses: StatusTable::new(statuses)?,
            base_ms,
            spread_ms,
        })
    }

    /// `<METHOD> <path> completed` with a weighted status and banded level
    pub fn completed(&self, req: RequestContext, sampler: &mut Sampler) -> Event {
        let status = self.statuses.draw(sampler.rng_mut());
        Event::new(
            Level::for_status(status),
            format!("{} {} completed", req.method, req.path),
        )
        .with("status", status)
        .with("duration", sampler.duration_ms(self.base_ms, self.spread_ms))
        .with("client_ip", req.client_ip)
        .with("service", req.service)
        .with("request_id", req.request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_script_order_and_size() {
        let script = Script::demo().unwrap();
        let names: Vec<&str> = script.phases().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec![
                "quiet",
                "health-gap",
                "ramp-up",
                "incident",
                "recovery",
                "scheduled-jobs",
                "afternoon"
            ]
        );

        let counts: Vec<usize> = script.phases().iter().map(Phase::record_count).collect();
        assert_eq!(counts, vec![80, 1, 200, 302, 152, 2, 200]);
        assert_eq!(script.expected_records(), 937);
    }

    #[test]
    fn test_gap_phases_have_no_traffic() {
        let script = Script::demo().unwrap();
        for phase in script.phases() {
            if phase.traffic.is_none() {
                assert!(!phase.anchors.is_empty(), "{} emits nothing", phase.name);
            }
        }
    }

    #[test]
    fn test_every_phase_falls_back_to_requests() {
        let quiet = Quiet::new().unwrap();
        assert_eq!(quiet.table().fallback(), quiet::QuietEvent::Request);
        assert_eq!(quiet.table().select(0.5), quiet::QuietEvent::Request);

        let ramp = RampUp::new().unwrap();
        assert_eq!(ramp.table().fallback(), ramp_up::RampUpEvent::Request);
        assert_eq!(ramp.table().thresholds().count(), 5);

        let incident = Incident::new().unwrap();
        assert_eq!(incident.table().fallback(), incident::IncidentEvent::Request);
        let last = incident.table().thresholds().last().unwrap();
        assert_eq!(last, (0.70, incident::IncidentEvent::SuspiciousLogin));

        let recovery = Recovery::new().unwrap();
        assert_eq!(recovery.table().select(0.12), recovery::RecoveryEvent::Request);

        let afternoon = Afternoon::new().unwrap();
        assert_eq!(afternoon.table().select(0.10), afternoon::AfternoonEvent::WebhookDelivered);
    }

    #[test]
    fn test_request_completed_fields() {
        let profile = RequestProfile::new(&[(404, 1)], 15, 100).unwrap();
        let mut sampler = Sampler::new(42);
        let req = sampler.request();
        let expected_message = format!("{} {} completed", req.method, req.path);

        let event = profile.completed(req, &mut sampler);
        assert_eq!(event.level, Level::Warn);
        assert_eq!(event.message, expected_message);
        let keys: Vec<&str> = event.fields.iter().map(|kv| kv.key).collect();
        assert_eq!(
            keys,
            vec!["status", "duration", "client_ip", "service", "request_id"]
        );
    }
}
