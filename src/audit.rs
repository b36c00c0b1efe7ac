//! Authentication audit events in OCSF (Open Cybersecurity Schema Framework)
//! Authentication (3001) shape, emitted as one JSON line on the `ocsf`
//! tracing target. Emission never fails the request.

use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};

const CLASS_AUTHENTICATION: u32 = 3001;
const AUTH_PROTOCOL_OAUTH2: u32 = 10;

/// Lifecycle step being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Authorization code exchanged for a token (OCSF "Authentication Ticket").
    TokenExchange,
    /// Long-lived token refreshed (OCSF "Service Ticket").
    TokenRefresh,
    Logoff,
}

impl Activity {
    fn id_and_name(self) -> (u32, &'static str) {
        match self {
            Activity::Logoff => (2, "Logoff"),
            Activity::TokenExchange => (3, "Authentication Ticket"),
            Activity::TokenRefresh => (4, "Service Ticket"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Build the event JSON. Split from [`record`] for testing.
pub fn event(activity: Activity, outcome: Outcome, username: Option<&str>, message: &str) -> Value {
    let (activity_id, activity_name) = activity.id_and_name();
    let (status_id, status, severity_id, severity) = match outcome {
        Outcome::Success => (1, "Success", 1, "Informational"),
        Outcome::Failure => (2, "Failure", 3, "Medium"),
    };
    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    let mut event = json!({
        "class_uid": CLASS_AUTHENTICATION,
        "class_name": "Authentication",
        "activity_id": activity_id,
        "activity_name": activity_name,
        "severity_id": severity_id,
        "severity": severity,
        "status_id": status_id,
        "status": status,
        "time": time,
        "metadata": {
            "product": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            }
        },
        "auth_protocol_id": AUTH_PROTOCOL_OAUTH2,
        "auth_protocol": "OAuth 2.0",
        "service": {"name": "Instagram"},
        "message": message,
    });

    if let Some(name) = username {
        event["actor"] = json!({"user": {"name": name, "type_id": 1, "type": "User"}});
    }
    event
}

/// Emit an audit event.
pub fn record(activity: Activity, outcome: Outcome, username: Option<&str>, message: &str) {
    if let Ok(line) = serde_json::to_string(&event(activity, outcome, username, message)) {
        tracing::info!(target: "ocsf", "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_success_event() {
        let ev = event(
            Activity::TokenExchange,
            Outcome::Success,
            Some("alice"),
            "OAuth token exchange succeeded",
        );
        assert_eq!(ev["class_uid"], 3001);
        assert_eq!(ev["activity_id"], 3);
        assert_eq!(ev["status"], "Success");
        assert_eq!(ev["severity"], "Informational");
        assert_eq!(ev["actor"]["user"]["name"], "alice");
        assert_eq!(ev["metadata"]["product"]["name"], "ig-media-viewer");
    }

    #[test]
    fn test_failure_event_without_actor() {
        let ev = event(Activity::TokenRefresh, Outcome::Failure, None, "nope");
        assert_eq!(ev["activity_name"], "Service Ticket");
        assert_eq!(ev["status_id"], 2);
        assert_eq!(ev["severity_id"], 3);
        assert!(ev.get("actor").is_none());
    }

    #[test]
    fn test_logoff_event() {
        let ev = event(Activity::Logoff, Outcome::Success, Some("bob"), "User logged out");
        assert_eq!(ev["activity_id"], 2);
        assert_eq!(ev["message"], "User logged out");
    }
}
