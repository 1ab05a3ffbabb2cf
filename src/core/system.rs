// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Security system - composition and lifecycle root

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::Receiver;
use tracing::info;

use super::{AlertSystem, SecurityAgent, SystemState, UiBus, UiEvent};
use crate::config::Config;
use crate::db::{Event, EventCategory, EventLog, StoreError};
use crate::sensors::{MotionSensor, Observer, Sensor};

/// Default number of events returned to the UI
pub const DEFAULT_EVENT_LIMIT: usize = 20;

/// Owns the event log, the agent, the alert system, and the sensor set.
/// All UI-thread commands enter through this type.
pub struct SecuritySystem {
    system_name: String,
    log: Arc<EventLog>,
    agent: Arc<SecurityAgent>,
    bus: Arc<UiBus>,
    sensors: Vec<Arc<dyn Sensor>>,
    running: AtomicBool,
}

impl SecuritySystem {
    /// System with an empty sensor set, logging to `db_path`
    pub fn new(
        system_name: &str,
        agent_name: &str,
        db_path: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        let log = Arc::new(EventLog::open(db_path)?);
        let bus = Arc::new(UiBus::new());
        let alerts = Arc::new(AlertSystem::new(system_name, Arc::clone(&log), Arc::clone(&bus)));
        let agent = Arc::new(SecurityAgent::new(
            agent_name,
            Arc::clone(&log),
            alerts,
            Arc::clone(&bus),
        ));

        Ok(Self {
            system_name: system_name.to_string(),
            log,
            agent,
            bus,
            sensors: Vec::new(),
            running: AtomicBool::new(false),
        })
    }

    /// Build a system from configuration, including its sensor set
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let mut system = Self::new(&config.system_name, &config.agent_name, config.db_path())?;

        let min = Duration::from_secs_f64(config.monitor.interval_min_secs);
        let max = Duration::from_secs_f64(config.monitor.interval_max_secs);

        for spec in &config.sensors {
            let probability = spec
                .probability
                .unwrap_or(config.monitor.detection_probability);
            let mut sensor = MotionSensor::with_probability(&spec.name, &spec.location, probability);
            sensor.set_interval(min, max);
            system.add_sensor(Arc::new(sensor))?;
        }

        Ok(system)
    }

    /// System display name
    pub fn name(&self) -> &str {
        &self.system_name
    }

    /// Register a sensor with the agent as its observer
    pub fn add_sensor(&mut self, sensor: Arc<dyn Sensor>) -> Result<(), StoreError> {
        sensor.add_observer(Arc::clone(&self.agent) as Arc<dyn Observer>);
        self.log.write(
            EventCategory::System,
            &format!("Added {} sensor at {}", sensor.name(), sensor.location()),
        )?;
        self.sensors.push(sensor);
        Ok(())
    }

    /// Number of registered sensors
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Registered sensors, in registration order
    pub fn sensors(&self) -> &[Arc<dyn Sensor>] {
        &self.sensors
    }

    /// Start monitoring on every registered sensor. No-op when running.
    pub fn start(&self) -> Result<(), StoreError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Starting {} security system...", self.system_name);
        for sensor in &self.sensors {
            sensor.start_monitoring();
            info!("  - {} at {} is active", sensor.name(), sensor.location());
        }

        self.log.write(
            EventCategory::System,
            &format!("{} monitoring started", self.system_name),
        )?;
        self.bus.post(UiEvent::StateChanged(self.state()));
        Ok(())
    }

    /// Stop monitoring on every sensor, waiting (bounded) for each loop to
    /// exit so no notification lands in a torn-down agent. Idempotent.
    pub fn stop(&self) -> Result<(), StoreError> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Stopping {} security system...", self.system_name);
        for sensor in &self.sensors {
            sensor.stop_monitoring();
        }

        self.log.write(
            EventCategory::System,
            &format!("{} monitoring stopped", self.system_name),
        )?;
        self.bus.post(UiEvent::StateChanged(self.state()));
        info!("System shutdown complete");
        Ok(())
    }

    /// Arm the agent and notify the UI of the state change
    pub fn arm_system(&self) -> Result<String, StoreError> {
        let timestamp = self.agent.arm()?;
        self.bus.post(UiEvent::StateChanged(self.state()));
        Ok(timestamp)
    }

    /// Disarm the agent and notify the UI of the state change
    pub fn disarm_system(&self) -> Result<String, StoreError> {
        let timestamp = self.agent.disarm()?;
        self.bus.post(UiEvent::StateChanged(self.state()));
        Ok(timestamp)
    }

    /// Manually trigger the sensor at `index`. Returns `false` (and writes
    /// nothing) for an out-of-range index or a sensor with no trigger path.
    pub fn simulate_motion(&self, index: usize) -> bool {
        match self.sensors.get(index) {
            Some(sensor) => sensor.simulate_detection(),
            None => false,
        }
    }

    /// Up to `limit` persisted events, most recent first
    pub fn recent_events(&self, limit: usize) -> Result<Vec<Event>, StoreError> {
        self.log.recent(limit)
    }

    /// Current visible state
    pub fn state(&self) -> SystemState {
        if !self.running.load(Ordering::SeqCst) {
            SystemState::Inactive
        } else if self.agent.is_armed() {
            SystemState::ActiveArmed
        } else {
            SystemState::ActiveDisarmed
        }
    }

    /// Receiver for the UI thread's event loop
    pub fn subscribe(&self) -> Receiver<UiEvent> {
        self.bus.receiver()
    }
}

impl Drop for SecuritySystem {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UpdateKind;
    use tempfile::tempdir;

    fn system_with_door() -> (tempfile::TempDir, SecuritySystem) {
        let dir = tempdir().unwrap();
        let mut system =
            SecuritySystem::new("TestGuard", "MainAgent", dir.path().join("events.db")).unwrap();
        system
            .add_sensor(Arc::new(MotionSensor::new("Door", "Front")))
            .unwrap();
        (dir, system)
    }

    #[test]
    fn test_armed_intrusion_scenario() {
        let (_dir, system) = system_with_door();
        let rx = system.subscribe();

        system.arm_system().unwrap();
        assert!(system.simulate_motion(0));

        // Most-recent-first: ALERT, MOTION, SYSTEM(ARMED), SYSTEM(added)
        let events = system.recent_events(DEFAULT_EVENT_LIMIT).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].category, EventCategory::Alert);
        assert!(events[0].description.contains("Front"));
        assert_eq!(events[1].category, EventCategory::Motion);
        assert!(events[1].description.contains("Motion detected at Front"));
        assert_eq!(events[2].category, EventCategory::System);
        assert!(events[2].description.contains("ARMED"));
        assert_eq!(events[3].category, EventCategory::System);
        assert!(events[3].description.contains("Added Door sensor"));

        let posted: Vec<UiEvent> = rx.try_iter().collect();
        assert!(matches!(posted[0], UiEvent::StateChanged(_)));
        assert!(matches!(posted[1], UiEvent::Alert { .. }));
        match &posted[2] {
            UiEvent::SensorUpdate { kind, location, .. } => {
                assert_eq!(*kind, UpdateKind::Alert);
                assert_eq!(location, "Front");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_disarmed_motion_scenario() {
        let (_dir, system) = system_with_door();
        let rx = system.subscribe();

        system.disarm_system().unwrap();
        assert!(system.simulate_motion(0));

        let events = system.recent_events(DEFAULT_EVENT_LIMIT).unwrap();
        assert!(events.iter().all(|e| e.category != EventCategory::Alert));
        assert_eq!(events[0].category, EventCategory::Motion);

        let posted: Vec<UiEvent> = rx.try_iter().collect();
        assert!(matches!(posted[0], UiEvent::StateChanged(_)));
        match &posted[1] {
            UiEvent::SensorUpdate { kind, location, .. } => {
                assert_eq!(*kind, UpdateKind::Motion);
                assert_eq!(location, "Front");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(posted.len(), 2);
    }

    #[test]
    fn test_simulate_motion_on_a_non_motion_sensor_is_a_silent_failure() {
        use crate::sensors::SensorKind;

        // A sensor kind with no manual trigger path; simulate_detection
        // stays at the trait default.
        struct ContactSensor;

        impl Sensor for ContactSensor {
            fn name(&self) -> &str {
                "Window Contact"
            }

            fn location(&self) -> &str {
                "Kitchen"
            }

            fn kind(&self) -> SensorKind {
                SensorKind::Contact
            }

            fn add_observer(&self, _observer: Arc<dyn Observer>) {}

            fn start_monitoring(&self) {}

            fn stop_monitoring(&self) {}
        }

        let (_dir, mut system) = system_with_door();
        system.add_sensor(Arc::new(ContactSensor)).unwrap();

        let before = system.recent_events(DEFAULT_EVENT_LIMIT).unwrap().len();
        assert!(!system.simulate_motion(1));
        assert_eq!(system.recent_events(DEFAULT_EVENT_LIMIT).unwrap().len(), before);

        // The motion sensor at index 0 still has its trigger path
        assert!(system.simulate_motion(0));
    }

    #[test]
    fn test_simulate_motion_out_of_range_is_a_silent_failure() {
        let (_dir, system) = system_with_door();
        let before = system.recent_events(DEFAULT_EVENT_LIMIT).unwrap().len();

        assert!(!system.simulate_motion(5));

        let after = system.recent_events(DEFAULT_EVENT_LIMIT).unwrap().len();
        assert_eq!(before, after);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (_dir, system) = system_with_door();

        system.start().unwrap();
        system.stop().unwrap();

        let count = system.recent_events(DEFAULT_EVENT_LIMIT).unwrap().len();
        system.stop().unwrap();
        system.stop().unwrap();
        assert_eq!(system.recent_events(DEFAULT_EVENT_LIMIT).unwrap().len(), count);
    }

    #[test]
    fn test_state_is_derived_from_running_and_armed() {
        let (_dir, system) = system_with_door();
        assert_eq!(system.state(), SystemState::Inactive);

        system.arm_system().unwrap();
        assert_eq!(system.state(), SystemState::Inactive);

        system.start().unwrap();
        assert_eq!(system.state(), SystemState::ActiveArmed);

        system.disarm_system().unwrap();
        assert_eq!(system.state(), SystemState::ActiveDisarmed);

        system.stop().unwrap();
        assert_eq!(system.state(), SystemState::Inactive);
    }

    #[test]
    fn test_arm_disarm_final_state_matches_last_call() {
        let (_dir, system) = system_with_door();
        let system_entries_before = count_system_entries(&system);

        system.arm_system().unwrap();
        system.arm_system().unwrap();
        system.disarm_system().unwrap();
        system.arm_system().unwrap();
        system.start().unwrap();
        assert_eq!(system.state(), SystemState::ActiveArmed);

        // One SYSTEM entry per arm/disarm call (plus one for start)
        assert_eq!(count_system_entries(&system), system_entries_before + 5);
    }

    fn count_system_entries(system: &SecuritySystem) -> usize {
        system
            .recent_events(100)
            .unwrap()
            .iter()
            .filter(|e| e.category == EventCategory::System)
            .count()
    }

    #[test]
    fn test_from_config_builds_sensor_set() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.data_dir = dir.path().to_path_buf();

        let system = SecuritySystem::from_config(&config).unwrap();
        assert_eq!(system.sensor_count(), config.sensors.len());
        assert!(system.sensor_count() > 0);
        assert_eq!(system.sensors()[0].location(), "Front Door");
    }
}
