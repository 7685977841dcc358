// Timestamp handling for backend-provided date strings.
// The backend is not consistent about these; anything unparseable renders
// as "recently" rather than failing.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a backend timestamp. Accepts RFC 3339 and the bare
/// `YYYY-MM-DDTHH:MM:SS` form (treated as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

/// Human-readable age of a timestamp (e.g. "5m ago").
/// Unparseable, missing, or future timestamps render as "recently".
pub fn format_time_ago(s: &str) -> String {
    match parse_timestamp(s) {
        Some(dt) => {
            let diff = Utc::now().timestamp() - dt.timestamp();
            if diff < 0 {
                "recently".to_string()
            } else {
                format_relative(diff)
            }
        }
        None => "recently".to_string(),
    }
}

fn format_relative(secs: i64) -> String {
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86400)
    }
}
