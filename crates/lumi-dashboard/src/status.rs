//! Agent status published by the heartbeat through `status.json`.

use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Local timestamp in the format the dashboard front end expects
pub fn iso_timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Status reported when no usable status file exists
pub fn idle_status(now: DateTime<Local>) -> Map<String, Value> {
    let mut status = Map::new();
    status.insert("status".to_string(), Value::from("idle"));
    status.insert("message".to_string(), Value::from("Ready for new tasks"));
    status.insert("last_updated".to_string(), Value::from(iso_timestamp(now)));
    status
}

/// Read the status file
///
/// A missing file, unreadable file, invalid JSON or a top-level value other
/// than an object all fall back to [`idle_status`].
pub fn read_status(path: &Path, now: DateTime<Local>) -> Map<String, Value> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!("No status file at {}: {}", path.display(), e);
            return idle_status(now);
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(status)) => status,
        Ok(_) => {
            debug!("Status file {} is not a JSON object", path.display());
            idle_status(now)
        }
        Err(e) => {
            debug!("Invalid status file {}: {}", path.display(), e);
            idle_status(now)
        }
    }
}

/// Body of `GET /api/status`: a fresh timestamp overlaid with the status
/// fields, which win on conflict
pub fn status_response(path: &Path, now: DateTime<Local>) -> Value {
    let mut body = Map::new();
    body.insert("timestamp".to_string(), Value::from(iso_timestamp(now)));
    body.extend(read_status(path, now));
    Value::Object(body)
}
