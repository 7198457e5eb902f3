//! Recovery after the incident

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::error::SynthError;
use crate::pools::DB_HOST;
use crate::sampler::{RequestContext, Sampler};
use crate::scenarios::{Anchor, RequestProfile, Scenario};
use crate::weighted::WeightTable;

pub const TICKS: usize = 150;
pub const DELTA: Delta = Delta::uniform(5, 25);

pub fn anchors() -> Vec<Anchor> {
    vec![
        Anchor::new(Delta::seconds(30), pool_recovered),
        Anchor::new(Delta::seconds(5), breaker_closed),
    ]
}

fn pool_recovered(_: &mut Sampler) -> Event {
    Event::new(Level::Info, "Database connection pool recovered")
        .with("service", "payment-service")
        .with("pool_size", 20i64)
        .with("active_connections", 8i64)
        .with("host", DB_HOST)
}

fn breaker_closed(_: &mut Sampler) -> Event {
    Event::new(Level::Info, "Circuit breaker CLOSED for payment-service")
        .with("service", "api-gateway")
        .with("failure_rate", "0.03")
        .with("threshold", "0.50")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryEvent {
    ElevatedLatency,
    StaleConnection,
    CacheWarmed,
    Request,
}

pub struct Recovery {
    table: WeightTable<RecoveryEvent>,
    requests: RequestProfile,
}

impl Recovery {
    pub fn new() -> Result<Self, SynthError> {
        Ok(Self {
            table: WeightTable::new(
                vec![
                    (0.05, RecoveryEvent::ElevatedLatency),
                    (0.08, RecoveryEvent::StaleConnection),
                    (0.12, RecoveryEvent::CacheWarmed),
                ],
                RecoveryEvent::Request,
            )?,
            requests: RequestProfile::new(
                &[(200, 70), (201, 10), (204, 5), (301, 3), (404, 2)],
                20,
                200,
            )?,
        })
    }

    pub fn table(&self) -> &WeightTable<RecoveryEvent> {
        &self.table
    }

    pub fn synthesize(
        &self,
        category: RecoveryEvent,
        req: RequestContext,
        sampler: &mut Sampler,
    ) -> Event {
        match category {
            RecoveryEvent::ElevatedLatency => Event::new(
                Level::Warn,
                format!("Elevated latency on {} queries", sampler.table()),
            )
            .with("service", req.service)
            .with("duration", format!("{}ms", sampler.int(500..=1500)))
            .with("request_id", req.request_id)
            .with("host", DB_HOST),
            RecoveryEvent::StaleConnection => Event::new(Level::Error, "Stale connection closed")
                .with("service", req.service)
                .with("target", DB_HOST)
                .with("idle_time", format!("{}s", sampler.int(300..=900))),
            RecoveryEvent::CacheWarmed => {
                Event::new(Level::Info, format!("Cache warmed for {} table", sampler.table()))
                    .with("service", req.service)
                    .with("entries", sampler.int(100..=5000))
            }
            RecoveryEvent::Request => self.requests.completed(req, sampler),
        }
    }
}

impl Scenario for Recovery {
    fn name(&self) -> &str {
        "Recovery"
    }

    fn tick(&self, sampler: &mut Sampler) -> Event {
        let req = sampler.request();
        let category = self.table.select(sampler.unit());
        self.synthesize(category, req, sampler)
    }
}
