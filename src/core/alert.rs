// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Alert delivery - log first, then notify the UI

use std::sync::Arc;

use tracing::info;

use super::{UiBus, UiEvent};
use crate::db::{EventCategory, EventLog, StoreError};

/// Logs alert messages and forwards them to the UI queue.
/// Stateless beyond its log handle and bus sender.
pub struct AlertSystem {
    system_name: String,
    log: Arc<EventLog>,
    bus: Arc<UiBus>,
}

impl AlertSystem {
    /// Alert sink writing to `log` and posting on `bus`
    pub fn new(system_name: &str, log: Arc<EventLog>, bus: Arc<UiBus>) -> Self {
        Self {
            system_name: system_name.to_string(),
            log,
            bus,
        }
    }

    /// Persist an ALERT event, then post it to the UI. Returns the timestamp
    /// of the logged entry.
    pub fn trigger_alert(&self, message: &str) -> Result<String, StoreError> {
        let timestamp = self
            .log
            .write(EventCategory::Alert, &format!("Alert triggered: {message}"))?;

        info!("[{}] ALERT: {}", self.system_name, message);

        self.bus.post(UiEvent::Alert {
            message: message.to_string(),
            timestamp: timestamp.clone(),
        });

        Ok(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_trigger_logs_then_notifies() {
        let dir = tempdir().unwrap();
        let log = Arc::new(EventLog::open(dir.path().join("events.db")).unwrap());
        let bus = Arc::new(UiBus::new());
        let rx = bus.receiver();

        let alerts = AlertSystem::new("TestGuard", Arc::clone(&log), bus);
        let timestamp = alerts.trigger_alert("Motion detected at Front Door").unwrap();

        let events = log.recent(1).unwrap();
        assert_eq!(events[0].category, EventCategory::Alert);
        assert!(events[0].description.contains("Motion detected at Front Door"));
        assert_eq!(events[0].timestamp, timestamp);

        match rx.try_recv().unwrap() {
            UiEvent::Alert { message, timestamp: ts } => {
                assert_eq!(message, "Motion detected at Front Door");
                assert_eq!(ts, timestamp);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
