//! Candidate pools
//!
//! Static lookup lists consulted when synthesizing fields. Nothing here is
//! mutated at runtime, and every pool is non-empty.

/// Placeholder segment in endpoint templates, replaced per request
pub const ID_PLACEHOLDER: &str = "{id}";

/// Hex characters of a generated UUID kept when filling a path placeholder
pub const ID_FRAGMENT_LEN: usize = 8;

pub const DB_HOST: &str = "db-primary.internal:5432";

pub const SERVICES: &[&str] = &[
    "api-gateway",
    "auth-service",
    "user-service",
    "payment-service",
    "notification-service",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: &'static str,
    /// Path template, may contain [`ID_PLACEHOLDER`]
    pub path: &'static str,
    /// Service that owns the route
    pub service: &'static str,
}

const fn endpoint(method: &'static str, path: &'static str, service: &'static str) -> Endpoint {
    Endpoint {
        method,
        path,
        service,
    }
}

pub const ENDPOINTS: &[Endpoint] = &[
    endpoint("GET", "/api/v1/users", "user-service"),
    endpoint("GET", "/api/v1/users/{id}", "user-service"),
    endpoint("POST", "/api/v1/users", "user-service"),
    endpoint("POST", "/api/v1/auth/login", "auth-service"),
    endpoint("POST", "/api/v1/auth/refresh", "auth-service"),
    endpoint("GET", "/api/v1/orders", "payment-service"),
    endpoint("POST", "/api/v1/orders", "payment-service"),
    endpoint("POST", "/api/v1/payments/charge", "payment-service"),
    endpoint("GET", "/api/v1/notifications", "notification-service"),
    endpoint("POST", "/api/v1/notifications/send", "notification-service"),
    endpoint("GET", "/healthz", "api-gateway"),
    endpoint("GET", "/api/v1/products", "api-gateway"),
    endpoint("GET", "/api/v1/products/{id}", "api-gateway"),
    endpoint("DELETE", "/api/v1/users/{id}", "user-service"),
    endpoint("PATCH", "/api/v1/users/{id}", "user-service"),
];

/// Client addresses. The last two double as known-bad actors for the
/// threat-intel lookup demo.
pub const CLIENT_IPS: &[&str] = &[
    "192.168.1.42",
    "10.0.3.17",
    "172.16.0.100",
    "10.0.3.18",
    "203.0.113.50",
    "198.51.100.23",
    "192.168.1.105",
    "10.0.3.22",
    "172.16.0.55",
    "192.168.2.200",
    "10.0.3.99",
    "203.0.113.12",
    "45.33.32.156",
    "185.220.101.1",
];

/// Abuse-listed host and Tor exit node
pub const SUSPICIOUS_IPS: &[&str] = &["45.33.32.156", "185.220.101.1"];

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "curl/8.4.0",
    "PostmanRuntime/7.36.0",
    "python-requests/2.31.0",
    "Go-http-client/2.0",
    "okhttp/4.12.0",
];

/// User agent attached to scripted brute-force attempts
pub const SCRIPTED_USER_AGENT: &str = "python-requests/2.31.0";

pub const DB_TABLES: &[&str] = &[
    "users",
    "orders",
    "payments",
    "sessions",
    "notifications",
    "products",
];

pub const FEATURE_FLAGS: &[&str] = &["dark_mode", "new_checkout", "beta_api"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspicious_ips_are_in_client_pool() {
        for ip in SUSPICIOUS_IPS {
            assert!(CLIENT_IPS.contains(ip));
        }
    }

    #[test]
    fn test_endpoints_are_owned_by_known_services() {
        for ep in ENDPOINTS {
            assert!(SERVICES.contains(&ep.service), "{} has unknown owner", ep.path);
            assert!(ep.path.starts_with('/'));
        }
        assert!(ENDPOINTS.iter().any(|ep| ep.path.contains(ID_PLACEHOLDER)));
    }
}
