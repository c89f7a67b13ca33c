use serde::Serialize;
use serde_json::{Error as JsonError, Value};
use std::fmt;

// Requests the client can send to the status server
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StatusRequest {
    GetPlaylistStatus,
}

impl StatusRequest {
    pub fn to_json(&self) -> Result<String, JsonError> {
        serde_json::to_string(self)
    }
}

/// Last status payload pushed by the server.
///
/// The payload is kept as the server sent it. The only field checked is
/// `status`, which must be present and not `null`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct StatusSnapshot(Value);

impl StatusSnapshot {
    /// Wraps `value` if it is an object with a defined `status` field.
    pub fn from_value(value: Value) -> Option<Self> {
        match value.get("status") {
            Some(status) if !status.is_null() => Some(StatusSnapshot(value)),
            _ => None,
        }
    }

    /// Parses raw message text. `Ok(None)` means well-formed JSON that is
    /// not a status message.
    pub fn parse(text: &str) -> Result<Option<Self>, JsonError> {
        let value = serde_json::from_str::<Value>(text)?;
        Ok(Self::from_value(value))
    }

    pub fn status(&self) -> &Value {
        &self.0["status"]
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            Value::String(status) => write!(f, "{}", status),
            other => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_is_well_formed_json() {
        let payload = StatusRequest::GetPlaylistStatus.to_json().unwrap();
        assert_eq!(payload, r#"{"type":"GetPlaylistStatus"}"#);
        let back: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(back, json!({ "type": "GetPlaylistStatus" }));
    }

    #[test]
    fn object_with_status_is_a_snapshot() {
        let snapshot = StatusSnapshot::parse(r#"{"status":"playing","position":12}"#)
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.status(), &json!("playing"));
        assert_eq!(snapshot.get("position"), Some(&json!(12)));
        assert_eq!(snapshot.as_value(), &json!({ "status": "playing", "position": 12 }));
    }

    #[test]
    fn falsy_status_values_still_count() {
        for status in [json!(""), json!(0), json!(false), json!({})] {
            let value = json!({ "status": status });
            assert!(StatusSnapshot::from_value(value).is_some());
        }
    }

    #[test]
    fn missing_or_null_status_is_not_a_snapshot() {
        assert_eq!(StatusSnapshot::parse(r#"{"unrelated":true}"#).unwrap(), None);
        assert_eq!(StatusSnapshot::parse(r#"{"status":null}"#).unwrap(), None);
    }

    #[test]
    fn non_objects_are_not_snapshots() {
        for text in ["[1,2,3]", "\"status\"", "42", "null"] {
            assert_eq!(StatusSnapshot::parse(text).unwrap(), None, "{}", text);
        }
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(StatusSnapshot::parse(r#"{"GetPlaylistStatus"}"#).is_err());
        assert!(StatusSnapshot::parse("").is_err());
    }

    #[test]
    fn display_shows_status() {
        let playing = StatusSnapshot::from_value(json!({ "status": "idle" })).unwrap();
        assert_eq!(playing.to_string(), "idle");
        let numeric = StatusSnapshot::from_value(json!({ "status": 3 })).unwrap();
        assert_eq!(numeric.to_string(), "3");
    }
}
