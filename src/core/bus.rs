// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! UI event queue bridging sensor threads and the UI thread
//!
//! Sensor and agent code never touches UI state directly. It posts immutable
//! [`UiEvent`] records onto this queue; the UI thread's own loop drains them.

use crossbeam::channel::{unbounded, Receiver, Sender};

use super::SystemState;

/// Which kind of sensor update the UI should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Motion observed while disarmed
    Motion,
    /// Motion observed while armed (intrusion)
    Alert,
}

/// Events delivered to the UI thread
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A sensor raised motion; `kind` says whether it escalated
    SensorUpdate {
        /// Whether this update is an intrusion or plain motion
        kind: UpdateKind,
        /// Location the sensor covers
        location: String,
        /// Timestamp of the persisted MOTION entry
        timestamp: String,
    },
    /// An alert fired while armed
    Alert {
        /// Alert message as logged
        message: String,
        /// Timestamp of the persisted ALERT entry
        timestamp: String,
    },
    /// The system's visible state changed
    StateChanged(SystemState),
}

/// Unbounded multi-producer queue of UI events
pub struct UiBus {
    tx: Sender<UiEvent>,
    rx: Receiver<UiEvent>,
}

impl UiBus {
    /// Fresh bus with its own channel
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Post an event; delivery is best-effort and never blocks the producer
    pub fn post(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }

    /// Receiver handle for the UI thread's loop
    pub fn receiver(&self) -> Receiver<UiEvent> {
        self.rx.clone()
    }
}

impl Default for UiBus {
    fn default() -> Self {
        Self::new()
    }
}
