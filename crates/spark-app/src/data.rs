//! Bundled demo rows

/// One morning of request latency, irregularly sampled
pub const LATENCY_ROWS: &str = r#"[
    { "date": "2024-03-04T06:00:00Z", "value": 118, "host": "edge-1" },
    { "date": "2024-03-04T06:20:00Z", "value": 124, "host": "edge-1" },
    { "date": "2024-03-04T07:00:00Z", "value": 131, "host": "edge-2" },
    { "date": "2024-03-04T07:40:00Z", "value": 187, "host": "edge-2" },
    { "date": "2024-03-04T08:00:00Z", "value": 164, "host": "edge-1" },
    { "date": "2024-03-04T09:00:00Z", "value": 142, "host": "edge-3" },
    { "date": "2024-03-04T09:30:00Z", "value": 139, "host": "edge-3" },
    { "date": "2024-03-04T10:45:00Z", "value": 151, "host": "edge-1" },
    { "date": "2024-03-04T11:00:00Z", "value": 127, "host": "edge-2" },
    { "date": "2024-03-04T12:00:00Z", "value": 121, "host": "edge-2" }
]"#;

/// Daily signups with custom column names
pub const SIGNUP_ROWS: &str = r#"[
    { "day": "2024-02-01", "signups": "42" },
    { "day": "2024-02-04", "signups": "57" },
    { "day": "2024-02-08", "signups": "51" },
    { "day": "2024-02-12", "signups": "73" },
    { "day": "2024-02-15", "signups": "68" },
    { "day": "2024-02-19", "signups": "90" },
    { "day": "2024-02-23", "signups": "84" },
    { "day": "2024-02-27", "signups": "102" }
]"#;

/// Malformed on purpose: exercises the error path
pub const BROKEN_ROWS: &str = r#"[{ "date": "yesterday", "value": 1 }]"#;
