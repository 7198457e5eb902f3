use logsynth::config::{DEFAULT_START_UNIX, default_start};
use logsynth::engine::synthesize;
use logsynth::output::write_records;
use logsynth::pools::{ID_PLACEHOLDER, SUSPICIOUS_IPS};
use logsynth::{GeneratorConfig, Level, OutputFormat, Script};
use serde_json::Value;

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "fatal"];

fn render(config: &GeneratorConfig) -> (String, u64) {
    let records = synthesize(config).expect("demo script builds");
    let mut buf = Vec::new();
    let summary = write_records(&records, OutputFormat::Json, &mut buf).expect("in-memory write");
    (String::from_utf8(buf).expect("utf-8 output"), summary.digest)
}

fn parsed_lines(text: &str) -> Vec<Value> {
    text.lines()
        .map(|line| serde_json::from_str(line).expect("every line is a JSON object"))
        .collect()
}

#[test]
fn test_same_seed_is_byte_identical() {
    let config = GeneratorConfig::default();
    let (first, first_digest) = render(&config);
    let (second, second_digest) = render(&config);

    assert_eq!(first, second);
    assert_eq!(first_digest, second_digest);
}

#[test]
fn test_record_count_matches_script() {
    let (text, _) = render(&GeneratorConfig::default());
    let expected = Script::demo().unwrap().expected_records();

    assert_eq!(expected, 80 + 1 + 200 + 2 + 300 + 2 + 150 + 2 + 200);
    assert_eq!(text.lines().count(), expected);
}

#[test]
fn test_required_fields_lead_every_line() {
    let (text, _) = render(&GeneratorConfig::default());

    for line in text.lines() {
        assert!(
            line.starts_with(r#"{"timestamp":""#),
            "timestamp must come first: {}",
            line
        );
        let ts_end = line.find(r#"","level":""#).expect("level follows timestamp");
        let rest = &line[ts_end..];
        assert!(rest.contains(r#"","message":""#), "message follows level: {}", line);
    }

    for value in parsed_lines(&text) {
        let obj = value.as_object().unwrap();
        assert!(obj.get("timestamp").and_then(Value::as_str).is_some());
        assert!(obj.get("message").and_then(Value::as_str).is_some());
        let level = obj.get("level").and_then(Value::as_str).unwrap();
        assert!(LEVELS.contains(&level), "unknown level {}", level);
    }
}

#[test]
fn test_timestamps_are_non_decreasing_millisecond_utc() {
    let (text, _) = render(&GeneratorConfig::default());
    let stamps: Vec<String> = parsed_lines(&text)
        .iter()
        .map(|v| v["timestamp"].as_str().unwrap().to_string())
        .collect();

    for ts in &stamps {
        // 2025-01-15T06:00:45.000Z
        assert_eq!(ts.len(), 24, "{}", ts);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[19..20], ".");
    }
    for pair in stamps.windows(2) {
        // fixed-width UTC layout sorts lexically
        assert!(pair[0] <= pair[1], "{} then {}", pair[0], pair[1]);
    }
}

#[test]
fn test_no_placeholder_survives() {
    let (text, _) = render(&GeneratorConfig::default());
    assert!(!text.contains(ID_PLACEHOLDER));

    let mut templated = 0;
    for value in parsed_lines(&text) {
        let message = value["message"].as_str().unwrap();
        for prefix in ["/api/v1/users/", "/api/v1/products/"] {
            if let Some(idx) = message.find(prefix) {
                let tail = &message[idx + prefix.len()..];
                let id: String = tail.chars().take_while(|c| *c != ' ').collect();
                assert_eq!(id.len(), 8, "{}", message);
                assert!(id.chars().all(|c| c.is_ascii_hexdigit()), "{}", message);
                templated += 1;
            }
        }
    }
    assert!(templated > 0, "expected some templated endpoints");
}

#[test]
fn test_first_record_opens_quiet_phase() {
    let (text, _) = render(&GeneratorConfig::default());
    let first = &parsed_lines(&text)[0];

    let ts = chrono::DateTime::parse_from_rfc3339(first["timestamp"].as_str().unwrap())
        .unwrap()
        .timestamp();
    let offset = ts - DEFAULT_START_UNIX;
    assert!((30..=90).contains(&offset), "first tick {}s after start", offset);

    let message = first["message"].as_str().unwrap();
    assert!(
        message.ends_with(" completed")
            || message.starts_with("Slow query on ")
            || message.starts_with("Cache miss for key user:"),
        "unexpected quiet-phase record: {}",
        message
    );
}

#[test]
fn test_narrative_anchors_in_order() {
    let records = synthesize(&GeneratorConfig::default()).unwrap();
    let position = |msg: &str| {
        records
            .iter()
            .position(|r| r.message == msg)
            .unwrap_or_else(|| panic!("missing anchor {:?}", msg))
    };

    let health = position("Health check passed");
    let exhausted = position("Database connection pool exhausted");
    let opened = position("Circuit breaker OPEN for payment-service");
    let recovered = position("Database connection pool recovered");
    let closed = position("Circuit breaker CLOSED for payment-service");
    let cleanup = position("Scheduled job: cleanup expired sessions");
    let metrics = position("Scheduled job: aggregate daily metrics");

    assert_eq!(health, 80);
    assert_eq!(exhausted, 281);
    assert_eq!(opened, exhausted + 1);
    assert_eq!(recovered, opened + 301);
    assert_eq!(closed, recovered + 1);
    assert_eq!(cleanup, closed + 151);
    assert_eq!(metrics, cleanup + 1);
    assert_eq!(records.len() - metrics - 1, 200);

    let gap = records[health].timestamp - records[health - 1].timestamp;
    assert_eq!(gap, chrono::TimeDelta::minutes(15));
    let gap = records[cleanup].timestamp - records[cleanup - 1].timestamp;
    assert_eq!(gap, chrono::TimeDelta::minutes(20));
    assert_eq!(records[opened].level, Level::Fatal);
}

#[test]
fn test_every_level_is_represented() {
    let records = synthesize(&GeneratorConfig::default()).unwrap();
    for level in Level::ALL.into_iter().filter(|l| *l != Level::Trace) {
        assert!(
            records.iter().any(|r| r.level == level),
            "no {} records",
            level
        );
    }

    // trace only comes from the afternoon SQL category (2% of 200 ticks)
    let traced = [42, 7, 1234].into_iter().any(|seed| {
        let config = GeneratorConfig {
            seed,
            ..GeneratorConfig::default()
        };
        synthesize(&config)
            .unwrap()
            .iter()
            .any(|r| r.level == Level::Trace)
    });
    assert!(traced);
}

#[test]
fn test_suspicious_logins_only_from_reserved_ips() {
    let records = synthesize(&GeneratorConfig::default()).unwrap();
    for record in records
        .iter()
        .filter(|r| r.message.starts_with("Suspicious login attempt"))
    {
        let ip = record.get_field("client_ip").and_then(|v| v.as_str()).unwrap();
        assert!(SUSPICIOUS_IPS.contains(&ip));
    }
}

#[test]
fn test_start_time_shifts_whole_log() {
    let base = synthesize(&GeneratorConfig::default()).unwrap();
    let config = GeneratorConfig {
        start: default_start() + chrono::TimeDelta::days(1),
        ..GeneratorConfig::default()
    };
    let shifted = synthesize(&config).unwrap();

    assert_eq!(base.len(), shifted.len());
    for (a, b) in base.iter().zip(&shifted) {
        assert_eq!(b.timestamp - a.timestamp, chrono::TimeDelta::days(1));
        assert_eq!(a.message, b.message);
    }
}
