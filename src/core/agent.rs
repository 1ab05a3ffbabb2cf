// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Security agent - sole observer of every sensor

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::error;

use super::{AlertSystem, UiBus, UiEvent, UpdateKind};
use crate::db::{EventCategory, EventLog, StoreError};
use crate::sensors::{Observer, SensorEvent, SensorKind};

/// Holds the armed/disarmed state and decides what a motion notification
/// turns into: an alert when armed, a plain motion update when not.
///
/// The armed flag is read on sensor threads while arm/disarm calls come from
/// the UI thread; a motion event racing a disarm may be processed under
/// either state, which is acceptable here.
pub struct SecurityAgent {
    name: String,
    armed: AtomicBool,
    log: Arc<EventLog>,
    alerts: Arc<AlertSystem>,
    bus: Arc<UiBus>,
}

impl SecurityAgent {
    /// Agent starting disarmed
    pub fn new(name: &str, log: Arc<EventLog>, alerts: Arc<AlertSystem>, bus: Arc<UiBus>) -> Self {
        Self {
            name: name.to_string(),
            armed: AtomicBool::new(false),
            log,
            alerts,
            bus,
        }
    }

    /// Agent display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current armed state
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Relaxed)
    }

    /// Arm the system, logging one SYSTEM event. Returns its timestamp.
    pub fn arm(&self) -> Result<String, StoreError> {
        self.armed.store(true, Ordering::Relaxed);
        self.log.write(
            EventCategory::System,
            &format!("Security system ARMED by agent {}", self.name),
        )
    }

    /// Disarm the system, logging one SYSTEM event. Returns its timestamp.
    pub fn disarm(&self) -> Result<String, StoreError> {
        self.armed.store(false, Ordering::Relaxed);
        self.log.write(
            EventCategory::System,
            &format!("Security system DISARMED by agent {}", self.name),
        )
    }
}

impl Observer for SecurityAgent {
    fn update(&self, event: &SensorEvent) {
        if event.kind != SensorKind::Motion || !event.detected {
            return;
        }

        let message = format!("Motion detected at {} by {}", event.location, event.sensor_name);

        // Log-then-notify: the MOTION record lands before any UI event or
        // alert referencing it.
        let timestamp = match self.log.write(EventCategory::Motion, &message) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                // Sensor threads have no caller to surface this to
                error!("dropping motion notification, log write failed: {e}");
                return;
            }
        };

        if self.is_armed() {
            if let Err(e) = self.alerts.trigger_alert(&message) {
                error!("alert delivery failed: {e}");
            }
            self.bus.post(UiEvent::SensorUpdate {
                kind: UpdateKind::Alert,
                location: event.location.clone(),
                timestamp,
            });
        } else {
            self.bus.post(UiEvent::SensorUpdate {
                kind: UpdateKind::Motion,
                location: event.location.clone(),
                timestamp,
            });
        }
    }
}
