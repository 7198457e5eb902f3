//! Quiet gaps between traffic phases, each closed by scripted milestones

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::sampler::Sampler;
use crate::scenarios::Anchor;

/// Fifteen minutes of silence after the quiet morning
pub fn health_gap() -> Vec<Anchor> {
    vec![Anchor::new(Delta::minutes(15), health_check)]
}

/// Twenty minutes of silence after recovery, then two batch jobs
pub fn scheduled_jobs() -> Vec<Anchor> {
    vec![
        Anchor::new(Delta::minutes(20), cleanup_sessions),
        Anchor::new(Delta::seconds(30), aggregate_metrics),
    ]
}

fn health_check(_: &mut Sampler) -> Event {
    Event::new(Level::Info, "Health check passed")
        .with("service", "api-gateway")
        .with("endpoint", "/healthz")
}

fn cleanup_sessions(sampler: &mut Sampler) -> Event {
    Event::new(Level::Info, "Scheduled job: cleanup expired sessions")
        .with("service", "auth-service")
        .with("deleted", sampler.int(50..=300))
}

fn aggregate_metrics(sampler: &mut Sampler) -> Event {
    Event::new(Level::Info, "Scheduled job: aggregate daily metrics")
        .with("service", "api-gateway")
        .with("records_processed", sampler.int(10_000..=50_000))
}
