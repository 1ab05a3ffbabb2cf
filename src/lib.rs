// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! HomeGuard - Simulated Home Security System
//!
//! A single-process simulation of a home security installation: motion
//! sensors raise observer notifications from their own monitoring threads,
//! a security agent decides whether each one becomes an alert, and every
//! decision persists to an append-only SQLite log before the UI hears
//! about it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                   SecuritySystem                      │
//! ├───────────────────────────────────────────────────────┤
//! │  ┌──────────┐     ┌──────────┐     ┌─────────────┐    │
//! │  │ Sensors  │ ──> │ Security │ ──> │ AlertSystem │    │
//! │  │ (threads)│     │  Agent   │     └──────┬──────┘    │
//! │  └──────────┘     └────┬─────┘            │           │
//! │                        ↓                  ↓           │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │         EventLog (append-only SQLite)           │  │
//! │  └─────────────────────────────────────────────────┘  │
//! │                        ↓                              │
//! │  ┌─────────────────────────────────────────────────┐  │
//! │  │      UiBus  ──>  console loop (main thread)     │  │
//! │  └─────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod core;
pub mod db;
pub mod sensors;
pub mod ui;

// Re-exports for convenience
pub use config::Config;
pub use self::core::{
    AlertSystem, SecurityAgent, SecuritySystem, SystemState, UiBus, UiEvent, UpdateKind,
};
pub use db::{Event, EventCategory, EventLog, StoreError};
pub use sensors::{MotionSensor, Observer, Sensor, SensorEvent, SensorKind};

/// HomeGuard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// HomeGuard name
pub const NAME: &str = "HomeGuard";
