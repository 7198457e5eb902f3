//! Normal afternoon traffic

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::error::SynthError;
use crate::pools::FEATURE_FLAGS;
use crate::sampler::{RequestContext, Sampler};
use crate::scenarios::{RequestProfile, Scenario};
use crate::weighted::WeightTable;

pub const TICKS: usize = 200;
pub const DELTA: Delta = Delta::uniform(5, 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfternoonEvent {
    UnexpectedNull,
    DeprecatedApi,
    FeatureFlag,
    SqlTrace,
    WebhookDelivered,
    Request,
}

pub struct Afternoon {
    table: WeightTable<AfternoonEvent>,
    requests: RequestProfile,
}

impl Afternoon {
    pub fn new() -> Result<Self, SynthError> {
        Ok(Self {
            table: WeightTable::new(
                vec![
                    (0.02, AfternoonEvent::UnexpectedNull),
                    (0.05, AfternoonEvent::DeprecatedApi),
                    (0.08, AfternoonEvent::FeatureFlag),
                    (0.10, AfternoonEvent::SqlTrace),
                    (0.12, AfternoonEvent::WebhookDelivered),
                ],
                AfternoonEvent::Request,
            )?,
            requests: RequestProfile::new(
                &[(200, 65), (201, 10), (204, 5), (301, 3), (400, 5), (404, 2)],
                15,
                120,
            )?,
        })
    }

    pub fn table(&self) -> &WeightTable<AfternoonEvent> {
        &self.table
    }

    pub fn synthesize(
        &self,
        category: AfternoonEvent,
        req: RequestContext,
        sampler: &mut Sampler,
    ) -> Event {
        match category {
            AfternoonEvent::UnexpectedNull => Event::new(
                Level::Error,
                format!("Unexpected null in response from {}", sampler.service()),
            )
            .with("service", req.service)
            .with("field", "user.email")
            .with("request_id", req.request_id),
            AfternoonEvent::DeprecatedApi => Event::new(Level::Warn, "Deprecated API version called")
                .with("service", "api-gateway")
                .with("version", "v0")
                .with("path", req.path.replace("v1", "v0"))
                .with("client_ip", req.client_ip)
                .with("user_agent", sampler.user_agent()),
            AfternoonEvent::FeatureFlag => Event::new(Level::Debug, "Feature flag evaluated")
                .with("service", req.service)
                .with("flag", sampler.pick(FEATURE_FLAGS))
                .with("result", if sampler.coin() { "true" } else { "false" })
                .with("user_id", sampler.int(1000..=9999)),
            AfternoonEvent::SqlTrace => Event::new(Level::Trace, "SQL query executed")
                .with("service", req.service)
                .with("table", sampler.table())
                .with("duration", format!("{}ms", sampler.int(1..=50)))
                .with("rows", sampler.int(0..=100)),
            AfternoonEvent::WebhookDelivered => {
                Event::new(Level::Info, "Webhook delivered successfully")
                    .with("service", "notification-service")
                    .with(
                        "url",
                        format!("https://hooks.example.com/{}", sampler.id_fragment()),
                    )
                    .with("response_code", 200u16)
                    .with("duration", sampler.duration_ms(50, 300))
            }
            AfternoonEvent::Request => self.requests.completed(req, sampler),
        }
    }
}

impl Scenario for Afternoon {
    fn name(&self) -> &str {
        "Normal Afternoon"
    }

    fn tick(&self, sampler: &mut Sampler) -> Event {
        let req = sampler.request();
        let category = self.table.select(sampler.unit());
        self.synthesize(category, req, sampler)
    }
}
