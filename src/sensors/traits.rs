// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Sensor traits and notification types

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Sensor kinds supported by HomeGuard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    /// Passive infrared motion detector
    Motion,
    /// Door/window contact; opens and closes, no motion trigger path
    Contact,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Motion => f.write_str("motion"),
            SensorKind::Contact => f.write_str("contact"),
        }
    }
}

/// Payload delivered to observers when a sensor raises a detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorEvent {
    /// Kind of the raising sensor
    pub kind: SensorKind,
    /// Name of the raising sensor
    pub sensor_name: String,
    /// Location the sensor covers
    pub location: String,
    /// When the detection was raised
    pub timestamp: DateTime<Local>,
    /// Whether anything was actually detected
    pub detected: bool,
}

/// An entity registered to receive sensor notifications.
///
/// `update` runs synchronously on the notifying sensor's own thread, so
/// implementations must be thread-safe and must not block for long.
pub trait Observer: Send + Sync {
    /// Handle one sensor notification
    fn update(&self, event: &SensorEvent);
}

/// Trait for all sensors
pub trait Sensor: Send + Sync {
    /// Sensor display name
    fn name(&self) -> &str;

    /// Physical location the sensor covers
    fn location(&self) -> &str;

    /// What kind of sensor this is
    fn kind(&self) -> SensorKind;

    /// Register an observer. The list is append-only; observers are notified
    /// in registration order.
    fn add_observer(&self, observer: Arc<dyn Observer>);

    /// Spawn the background monitoring loop. No-op if already monitoring.
    fn start_monitoring(&self);

    /// Ask the monitoring loop to exit and wait (bounded) for it to do so
    fn stop_monitoring(&self);

    /// Manual trigger path, bypassing the detection roll. Returns `false`
    /// for sensors without one.
    fn simulate_detection(&self) -> bool {
        false
    }
}
