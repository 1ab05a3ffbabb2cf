// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Core security pipeline - agent, alerting, and the composition root

mod agent;
mod alert;
mod bus;
mod system;

pub use agent::SecurityAgent;
pub use alert::AlertSystem;
pub use bus::{UiBus, UiEvent, UpdateKind};
pub use system::{SecuritySystem, DEFAULT_EVENT_LIMIT};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Externally visible system state, derived from the running flag and the
/// agent's armed flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemState {
    /// Monitoring is stopped
    Inactive,
    /// Monitoring running, motion escalates to alerts
    ActiveArmed,
    /// Monitoring running, motion is logged only
    ActiveDisarmed,
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemState::Inactive => f.write_str("INACTIVE"),
            SystemState::ActiveArmed => f.write_str("ACTIVE-ARMED"),
            SystemState::ActiveDisarmed => f.write_str("ACTIVE-DISARMED"),
        }
    }
}
