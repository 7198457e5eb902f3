//! Seeded field sampler
//!
//! All randomness in a run flows through one [`Sampler`], including UUIDs,
//! so a fixed seed reproduces the output byte for byte.

use crate::pools::{self, Endpoint, ID_FRAGMENT_LEN, ID_PLACEHOLDER};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use uuid::{Builder, Uuid};

/// Per-tick request context, drawn before the category roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: &'static str,
    /// Path with any placeholder already filled in
    pub path: String,
    pub service: &'static str,
    pub request_id: String,
    pub client_ip: &'static str,
}

#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Uniform draw in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    pub fn int(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.rng.random_range(range)
    }

    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Uniform pick from a non-empty pool
    pub fn pick<T: Copy>(&mut self, pool: &[T]) -> T {
        pool[self.rng.random_range(0..pool.len())]
    }

    /// Version-4 UUID built from the seeded stream
    pub fn uuid(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.random()).into_uuid()
    }

    /// Short hex identifier for URL paths
    pub fn id_fragment(&mut self) -> String {
        let mut id = self.uuid().simple().to_string();
        id.truncate(ID_FRAGMENT_LEN);
        id
    }

    /// `<n>ms` with n in `[base_ms, base_ms + spread_ms]`
    pub fn duration_ms(&mut self, base_ms: i64, spread_ms: i64) -> String {
        format!("{}ms", base_ms + self.int(0..=spread_ms))
    }

    pub fn client_ip(&mut self) -> &'static str {
        self.pick(pools::CLIENT_IPS)
    }

    pub fn user_agent(&mut self) -> &'static str {
        self.pick(pools::USER_AGENTS)
    }

    pub fn table(&mut self) -> &'static str {
        self.pick(pools::DB_TABLES)
    }

    pub fn service(&mut self) -> &'static str {
        self.pick(pools::SERVICES)
    }

    pub fn email(&mut self) -> String {
        format!("user{}@example.com", self.int(100..=999))
    }

    /// Pick an endpoint and fill its placeholder, if any
    pub fn endpoint(&mut self) -> (Endpoint, String) {
        let ep = self.pick(pools::ENDPOINTS);
        let path = if ep.path.contains(ID_PLACEHOLDER) {
            ep.path.replace(ID_PLACEHOLDER, &self.id_fragment())
        } else {
            ep.path.to_string()
        };
        (ep, path)
    }

    /// Draw the endpoint, request id and client address for one tick
    pub fn request(&mut self) -> RequestContext {
        let (ep, path) = self.endpoint();
        let request_id = self.uuid().to_string();
        let client_ip = self.client_ip();
        RequestContext {
            method: ep.method,
            path,
            service: ep.service,
            request_id,
            client_ip,
        }
    }
}
