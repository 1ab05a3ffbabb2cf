// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Simulated motion sensor with a probabilistic detection loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use tracing::{debug, warn};

use super::{Observer, Sensor, SensorEvent, SensorKind};

/// Chance per wake-up that the sensor reports motion
pub const DEFAULT_DETECTION_PROBABILITY: f64 = 0.3;

const DEFAULT_INTERVAL_MIN: Duration = Duration::from_secs(3);
const DEFAULT_INTERVAL_MAX: Duration = Duration::from_secs(10);

/// How long `stop_monitoring` waits for the loop to acknowledge exit
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

struct Worker {
    handle: JoinHandle<()>,
    wake_tx: Sender<()>,
    done_rx: Receiver<()>,
}

type ObserverList = Arc<RwLock<Vec<Arc<dyn Observer>>>>;

/// Simulated motion sensor.
///
/// While monitoring, a background thread sleeps a random duration inside the
/// configured interval and then rolls the detection probability; on success
/// every observer is notified on that thread, in registration order.
/// `simulate_detection` is the manual trigger path used by the UI.
pub struct MotionSensor {
    name: String,
    location: String,
    detection_probability: f64,
    interval_min: Duration,
    interval_max: Duration,
    active: Arc<AtomicBool>,
    observers: ObserverList,
    worker: Mutex<Option<Worker>>,
}

impl MotionSensor {
    /// Sensor with the default detection probability
    pub fn new(name: &str, location: &str) -> Self {
        Self::with_probability(name, location, DEFAULT_DETECTION_PROBABILITY)
    }

    /// Sensor with an explicit detection probability, clamped to [0, 1]
    pub fn with_probability(name: &str, location: &str, detection_probability: f64) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            detection_probability: detection_probability.clamp(0.0, 1.0),
            interval_min: DEFAULT_INTERVAL_MIN,
            interval_max: DEFAULT_INTERVAL_MAX,
            active: Arc::new(AtomicBool::new(false)),
            observers: Arc::new(RwLock::new(Vec::new())),
            worker: Mutex::new(None),
        }
    }

    /// Override the sleep interval between detection attempts
    pub fn set_interval(&mut self, min: Duration, max: Duration) {
        self.interval_min = min;
        self.interval_max = max.max(min);
    }

    /// Whether the monitoring loop is (supposed to be) running
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn notify_observers(observers: &ObserverList, event: &SensorEvent) {
        for observer in observers.read().iter() {
            observer.update(event);
        }
    }

    fn detection_event(sensor_name: &str, location: &str) -> SensorEvent {
        SensorEvent {
            kind: SensorKind::Motion,
            sensor_name: sensor_name.to_string(),
            location: location.to_string(),
            timestamp: Local::now(),
            detected: true,
        }
    }
}

impl Sensor for MotionSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Motion
    }

    fn add_observer(&self, observer: Arc<dyn Observer>) {
        self.observers.write().push(observer);
    }

    fn start_monitoring(&self) {
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return;
        }

        self.active.store(true, Ordering::SeqCst);

        let (wake_tx, wake_rx) = bounded::<()>(1);
        let (done_tx, done_rx) = bounded::<()>(1);

        let active = Arc::clone(&self.active);
        let observers = Arc::clone(&self.observers);
        let name = self.name.clone();
        let location = self.location.clone();
        let probability = self.detection_probability;
        let (min, max) = (self.interval_min, self.interval_max);

        let handle = thread::spawn(move || {
            let mut rng = rand::thread_rng();
            debug!("monitoring loop started for {name}");

            while active.load(Ordering::SeqCst) {
                let sleep = min + (max - min).mul_f64(rng.gen::<f64>());

                // recv_timeout doubles as an interruptible sleep; a wake-up
                // message means stop was requested and the flag decides what
                // happens. A disconnected wake channel means this worker was
                // abandoned by a timed-out stop: the flag may already belong
                // to a replacement loop, so exit outright.
                match wake_rx.recv_timeout(sleep) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }

                if !active.load(Ordering::SeqCst) {
                    break;
                }

                if rng.gen::<f64>() < probability {
                    let event = Self::detection_event(&name, &location);
                    Self::notify_observers(&observers, &event);
                }
            }

            debug!("monitoring loop exited for {name}");
            let _ = done_tx.send(());
        });

        *worker = Some(Worker {
            handle,
            wake_tx,
            done_rx,
        });
    }

    fn stop_monitoring(&self) {
        self.active.store(false, Ordering::SeqCst);

        let worker = self.worker.lock().take();
        let Some(worker) = worker else {
            return;
        };

        let _ = worker.wake_tx.try_send(());
        match worker.done_rx.recv_timeout(JOIN_TIMEOUT) {
            Ok(()) => {
                let _ = worker.handle.join();
            }
            Err(_) => {
                // Best-effort join; the loop observes the flag on its next
                // wake-up and exits on its own.
                warn!(
                    "monitoring loop for {} did not stop within {:?}",
                    self.name, JOIN_TIMEOUT
                );
            }
        }
    }

    fn simulate_detection(&self) -> bool {
        let event = Self::detection_event(&self.name, &self.location);
        Self::notify_observers(&self.observers, &event);
        true
    }
}

impl Drop for MotionSensor {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}
