// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Sensor module - simulated detection hardware

mod motion;
mod traits;

pub use motion::{MotionSensor, DEFAULT_DETECTION_PROBABILITY};
pub use traits::{Observer, Sensor, SensorEvent, SensorKind};
