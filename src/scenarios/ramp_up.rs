//! Morning ramp-up

use crate::clock::Delta;
use crate::core::{Event, Level};
use crate::error::SynthError;
use crate::sampler::{RequestContext, Sampler};
use crate::scenarios::{RequestProfile, Scenario};
use crate::weighted::WeightTable;

pub const TICKS: usize = 200;
pub const DELTA: Delta = Delta::uniform(10, 40);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampUpEvent {
    ConnectionRefused,
    RequestTimeout,
    RateLimitApproaching,
    TokenRefreshed,
    UserRegistered,
    Request,
}

pub struct RampUp {
    table: WeightTable<RampUpEvent>,
    requests: RequestProfile,
}

impl RampUp {
    pub fn new() -> Result<Self, SynthError> {
        Ok(Self {
            table: WeightTable::new(
                vec![
                    (0.03, RampUpEvent::ConnectionRefused),
                    (0.08, RampUpEvent::RequestTimeout),
                    (0.12, RampUpEvent::RateLimitApproaching),
                    (0.15, RampUpEvent::TokenRefreshed),
                    (0.17, RampUpEvent::UserRegistered),
                ],
                RampUpEvent::Request,
            )?,
            requests: RequestProfile::new(
                &[
                    (200, 60),
                    (201, 10),
                    (204, 5),
                    (301, 3),
                    (400, 5),
                    (404, 3),
                    (500, 1),
                ],
                20,
                150,
            )?,
        })
    }

    pub fn table(&self) -> &WeightTable<RampUpEvent> {
        &self.table
    }

    /// `user_agent` is drawn every tick but only attached to request records
    pub fn synthesize(
        &self,
        category: RampUpEvent,
        req: RequestContext,
        user_agent: &'static str,
        sampler: &mut Sampler,
    ) -> Event {
        match category {
            RampUpEvent::ConnectionRefused => {
                Event::new(Level::Error, "Connection refused to downstream service")
                    .with("service", req.service)
                    .with("target", format!("{}:8080", sampler.service()))
                    .with("request_id", req.request_id)
                    .with("client_ip", req.client_ip)
            }
            RampUpEvent::RequestTimeout => Event::new(
                Level::Warn,
                format!("Request timeout after {}ms", sampler.int(5000..=30000)),
            )
            .with("service", req.service)
            .with("method", req.method)
            .with("path", req.path)
            .with("request_id", req.request_id)
            .with("client_ip", req.client_ip),
            RampUpEvent::RateLimitApproaching => Event::new(
                Level::Warn,
                format!("Rate limit approaching for {}", req.client_ip),
            )
            .with("service", "api-gateway")
            .with("current_rate", format!("{}/100", sampler.int(80..=99)))
            .with("client_ip", req.client_ip),
            RampUpEvent::TokenRefreshed => Event::new(
                Level::Debug,
                format!("JWT token refreshed for user {}", sampler.int(1000..=9999)),
            )
            .with("service", "auth-service")
            .with("token_expiry", "3600s")
            .with("client_ip", req.client_ip),
            RampUpEvent::UserRegistered => Event::new(Level::Info, "New user registered")
                .with("service", "user-service")
                .with("user_id", sampler.uuid().to_string())
                .with("email", sampler.email())
                .with("client_ip", req.client_ip),
            RampUpEvent::Request => self
                .requests
                .completed(req, sampler)
                .with("user_agent", user_agent),
        }
    }
}

impl Scenario for RampUp {
    fn name(&self) -> &str {
        "Morning Ramp-Up"
    }

    fn tick(&self, sampler: &mut Sampler) -> Event {
        let req = sampler.request();
        let user_agent = sampler.user_agent();
        let category = self.table.select(sampler.unit());
        self.synthesize(category, req, user_agent, sampler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::SERVICES;

    #[test]
    fn test_connection_refused_targets_known_service() {
        let ramp = RampUp::new().unwrap();
        let mut sampler = Sampler::new(3);
        let req = sampler.request();
        let event = ramp.synthesize(RampUpEvent::ConnectionRefused, req, "curl/8.4.0", &mut sampler);

        assert_eq!(event.level, Level::Error);
        let target = event
            .fields
            .iter()
            .find(|kv| kv.key == "target")
            .and_then(|kv| kv.value.as_str())
            .unwrap();
        let (host, port) = target.split_once(':').unwrap();
        assert!(SERVICES.contains(&host));
        assert_eq!(port, "8080");
    }

    #[test]
    fn test_request_carries_user_agent_last() {
        let ramp = RampUp::new().unwrap();
        let mut sampler = Sampler::new(3);
        let req = sampler.request();
        let event = ramp.synthesize(RampUpEvent::Request, req, "okhttp/4.12.0", &mut sampler);

        let last = event.fields.last().unwrap();
        assert_eq!(last.key, "user_agent");
        assert_eq!(last.value.as_str(), Some("okhttp/4.12.0"));
    }

    #[test]
    fn test_rate_limit_names_client() {
        let ramp = RampUp::new().unwrap();
        let mut sampler = Sampler::new(8);
        let req = sampler.request();
        let ip = req.client_ip;
        let event = ramp.synthesize(RampUpEvent::RateLimitApproaching, req, "curl/8.4.0", &mut sampler);
        assert_eq!(event.message, format!("Rate limit approaching for {}", ip));
    }
}
