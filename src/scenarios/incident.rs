//! Incident: database pool exhaustion and the error storm that follows

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::error::SynthError;
use crate::pools::{DB_HOST, SCRIPTED_USER_AGENT, SUSPICIOUS_IPS};
use crate::sampler::{RequestContext, Sampler};
use crate::scenarios::{Anchor, RequestProfile, Scenario};
use crate::weighted::WeightTable;

pub const TICKS: usize = 300;
pub const DELTA: Delta = Delta::uniform(2, 12);

/// Pool exhaustion two minutes after ramp-up, breaker trips one second later
pub fn anchors() -> Vec<Anchor> {
    vec![
        Anchor::new(Delta::minutes(2), pool_exhausted),
        Anchor::new(Delta::seconds(1), breaker_open),
    ]
}

fn pool_exhausted(_: &mut Sampler) -> Event {
    Event::new(Level::Error, "Database connection pool exhausted")
        .with("service", "payment-service")
        .with("pool_size", 20i64)
        .with("active_connections", 20i64)
        .with("waiting_queries", 47i64)
        .with("host", DB_HOST)
}

fn breaker_open(_: &mut Sampler) -> Event {
    Event::new(Level::Fatal, "Circuit breaker OPEN for payment-service")
        .with("service", "api-gateway")
        .with("failure_rate", "0.87")
        .with("threshold", "0.50")
        .with("consecutive_failures", 34i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentEvent {
    QueryTimeout,
    UpstreamUnavailable,
    ConnectionReset,
    Retry,
    PaymentFailed,
    QueueDepthCritical,
    NotificationFailed,
    SuspiciousLogin,
    Request,
}

pub struct Incident {
    table: WeightTable<IncidentEvent>,
    requests: RequestProfile,
}

impl Incident {
    pub fn new() -> Result<Self, SynthError> {
        Ok(Self {
            table: WeightTable::new(
                vec![
                    (0.25, IncidentEvent::QueryTimeout),
                    (0.40, IncidentEvent::UpstreamUnavailable),
                    (0.50, IncidentEvent::ConnectionReset),
                    (0.55, IncidentEvent::Retry),
                    (0.60, IncidentEvent::PaymentFailed),
                    (0.65, IncidentEvent::QueueDepthCritical),
                    (0.68, IncidentEvent::NotificationFailed),
                    (0.70, IncidentEvent::SuspiciousLogin),
                ],
                IncidentEvent::Request,
            )?,
            requests: RequestProfile::new(
                &[(200, 20), (500, 25), (502, 15), (503, 30), (504, 10)],
                100,
                10_000,
            )?,
        })
    }

    pub fn table(&self) -> &WeightTable<IncidentEvent> {
        &self.table
    }

    pub fn synthesize(
        &self,
        category: IncidentEvent,
        req: RequestContext,
        sampler: &mut Sampler,
    ) -> Event {
        match category {
            IncidentEvent::QueryTimeout => Event::new(
                Level::Error,
                format!("Database query timeout after {}ms", sampler.int(5000..=30000)),
            )
            .with("service", req.service)
            .with(
                "query",
                format!("SELECT * FROM {} WHERE id = $1", sampler.table()),
            )
            .with("host", DB_HOST)
            .with("request_id", req.request_id),
            IncidentEvent::UpstreamUnavailable => {
                Event::new(Level::Error, format!("{} {} failed", req.method, req.path))
                    .with("status", 503u16)
                    .with("duration", sampler.duration_ms(5000, 25000))
                    .with("client_ip", req.client_ip)
                    .with("service", req.service)
                    .with("request_id", req.request_id)
                    .with("error", "upstream service unavailable")
            }
            IncidentEvent::ConnectionReset => Event::new(Level::Error, "Connection reset by peer")
                .with("service", req.service)
                .with("target", DB_HOST)
                .with("request_id", req.request_id)
                .with("retry_attempt", sampler.int(1..=5)),
            IncidentEvent::Retry => Event::new(
                Level::Warn,
                format!(
                    "Retry attempt {} for request {}",
                    sampler.int(2..=5),
                    req.request_id
                ),
            )
            .with("service", req.service)
            .with("method", req.method)
            .with("path", req.path)
            .with("client_ip", req.client_ip),
            IncidentEvent::PaymentFailed => {
                let dollars = sampler.int(10..=500);
                let cents = sampler.int(0..=99);
                Event::new(Level::Error, "Payment processing failed")
                    .with("service", "payment-service")
                    .with("amount", format!("${}.{:02}", dollars, cents))
                    .with("currency", "USD")
                    .with("request_id", req.request_id)
                    .with("client_ip", req.client_ip)
                    .with("error", "database connection timeout")
            }
            IncidentEvent::QueueDepthCritical => {
                Event::new(Level::Warn, "Response queue depth critical")
                    .with("service", "api-gateway")
                    .with("queue_depth", sampler.int(500..=2000))
                    .with("max_depth", 1000i64)
            }
            IncidentEvent::NotificationFailed => {
                Event::new(Level::Error, "Failed to send notification")
                    .with("service", "notification-service")
                    .with("type", "email")
                    .with("recipient", sampler.email())
                    .with("error", "SMTP connection timeout")
                    .with("request_id", req.request_id)
            }
            IncidentEvent::SuspiciousLogin => {
                let source = sampler.pick(SUSPICIOUS_IPS);
                Event::new(
                    Level::Warn,
                    format!("Suspicious login attempt from {}", source),
                )
                .with("service", "auth-service")
                .with("client_ip", source)
                .with("user", "admin")
                .with("attempts", sampler.int(3..=15))
                .with("geo", "unknown")
                .with("user_agent", SCRIPTED_USER_AGENT)
            }
            IncidentEvent::Request => self.requests.completed(req, sampler),
        }
    }
}

impl Scenario for Incident {
    fn name(&self) -> &str {
        "Database Incident"
    }

    fn tick(&self, sampler: &mut Sampler) -> Event {
        let req = sampler.request();
        let category = self.table.select(sampler.unit());
        self.synthesize(category, req, sampler)
    }
}
