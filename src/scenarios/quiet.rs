//! Early-morning quiet period

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::error::SynthError;
use crate::sampler::{RequestContext, Sampler};
use crate::scenarios::{RequestProfile, Scenario};
use crate::weighted::WeightTable;

pub const TICKS: usize = 80;
pub const DELTA: Delta = Delta::uniform(30, 90);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuietEvent {
    SlowQuery,
    CacheMiss,
    Request,
}

pub struct Quiet {
    table: WeightTable<QuietEvent>,
    requests: RequestProfile,
}

impl Quiet {
    pub fn new() -> Result<Self, SynthError> {
        Ok(Self {
            table: WeightTable::new(
                vec![(0.05, QuietEvent::SlowQuery), (0.08, QuietEvent::CacheMiss)],
                QuietEvent::Request,
            )?,
            requests: RequestProfile::new(
                &[(200, 70), (201, 10), (204, 5), (301, 3), (404, 2)],
                15,
                100,
            )?,
        })
    }

    pub fn table(&self) -> &WeightTable<QuietEvent> {
        &self.table
    }

    pub fn synthesize(
        &self,
        category: QuietEvent,
        req: RequestContext,
        sampler: &mut Sampler,
    ) -> Event {
        match category {
            QuietEvent::SlowQuery => {
                Event::new(Level::Warn, format!("Slow query on {} table", sampler.table()))
                    .with("service", req.service)
                    .with("duration", format!("{}ms", sampler.int(800..=3000)))
                    .with("request_id", req.request_id)
            }
            QuietEvent::CacheMiss => Event::new(
                Level::Debug,
                format!("Cache miss for key user:{}", sampler.int(1000..=9999)),
            )
            .with("service", "user-service")
            .with("request_id", req.request_id),
            QuietEvent::Request => self.requests.completed(req, sampler),
        }
    }
}

impl Scenario for Quiet {
    fn name(&self) -> &str {
        "Quiet Morning"
    }

    fn tick(&self, sampler: &mut Sampler) -> Event {
        let req = sampler.request();
        let category = self.table.select(sampler.unit());
        self.synthesize(category, req, sampler)
    }
}
