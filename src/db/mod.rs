// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! Append-only event log backed by SQLite

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Local;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Wall-clock timestamp format used for every persisted event
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Event log failures, surfaced synchronously to the caller (no retry)
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite-level failure
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem failure while preparing the store
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted row carries a category this build does not know
    #[error("unknown event category in store: {0}")]
    UnknownCategory(String),
}

/// Category of a persisted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    /// Lifecycle and arm/disarm transitions
    System,
    /// A sensor reported motion
    Motion,
    /// Motion while armed, escalated
    Alert,
}

impl EventCategory {
    /// Uppercase tag stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::System => "SYSTEM",
            EventCategory::Motion => "MOTION",
            EventCategory::Alert => "ALERT",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SYSTEM" => Ok(EventCategory::System),
            "MOTION" => Ok(EventCategory::Motion),
            "ALERT" => Ok(EventCategory::Alert),
            other => Err(StoreError::UnknownCategory(other.to_string())),
        }
    }
}

/// A single persisted event. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic id assigned by the store
    pub id: i64,
    /// Wall-clock timestamp, second precision
    pub timestamp: String,
    /// What kind of occurrence this records
    pub category: EventCategory,
    /// Human-readable description
    pub description: String,
}

/// Append-only store of timestamped events.
///
/// All writes serialize through a single mutex so concurrent sensor threads
/// cannot interleave records. Each operation opens and drops its own
/// connection rather than holding one across calls; event rates are a few
/// per second at most, so the per-write open cost is acceptable.
pub struct EventLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl EventLog {
    /// Open the log at `path`, creating the events table if absent
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL
            );
            "#,
        )?;

        info!("Event log opened at {:?}", path);
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Append one event, returning its timestamp
    pub fn write(&self, category: EventCategory, description: &str) -> Result<String, StoreError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();

        {
            let _guard = self.lock.lock();
            let conn = Connection::open(&self.path)?;
            conn.execute(
                "INSERT INTO events (timestamp, category, description) VALUES (?1, ?2, ?3)",
                params![timestamp, category.as_str(), description],
            )?;
        }

        debug!("{} - {}: {}", timestamp, category, description);
        Ok(timestamp)
    }

    /// Fetch up to `limit` events, most recent first
    pub fn recent(&self, limit: usize) -> Result<Vec<Event>, StoreError> {
        let _guard = self.lock.lock();
        let conn = Connection::open(&self.path)?;

        let mut stmt = conn.prepare(
            "SELECT id, timestamp, category, description FROM events \
             ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp, category, description) = row?;
            events.push(Event {
                id,
                timestamp,
                category: category.parse()?,
                description,
            });
        }

        Ok(events)
    }

    /// Total number of persisted events
    pub fn count(&self) -> Result<usize, StoreError> {
        let _guard = self.lock.lock();
        let conn = Connection::open(&self.path)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_temp() -> (tempfile::TempDir, EventLog) {
        let dir = tempdir().unwrap();
        let log = EventLog::open(dir.path().join("events.db")).unwrap();
        (dir, log)
    }

    #[test]
    fn test_write_and_recent() {
        let (_dir, log) = open_temp();

        log.write(EventCategory::System, "system started").unwrap();
        log.write(EventCategory::Motion, "motion at Front Door").unwrap();

        let events = log.recent(20).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, EventCategory::Motion);
        assert_eq!(events[1].category, EventCategory::System);
        assert!(events[0].id > events[1].id);
    }

    #[test]
    fn test_recent_respects_limit() {
        let (_dir, log) = open_temp();

        for i in 0..5 {
            log.write(EventCategory::System, &format!("entry {i}")).unwrap();
        }

        let events = log.recent(2).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].description, "entry 4");
        assert_eq!(events[1].description, "entry 3");
        assert!(events[0].timestamp >= events[1].timestamp);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let (_dir, log) = open_temp();

        log.write(EventCategory::Alert, "first").unwrap();
        log.write(EventCategory::Alert, "second").unwrap();
        log.write(EventCategory::Alert, "third").unwrap();

        let events = log.recent(3).unwrap();
        assert_eq!(events[0].description, "third");
        assert!(events[0].id > events[1].id && events[1].id > events[2].id);
    }

    #[test]
    fn test_reopen_preserves_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.db");

        {
            let log = EventLog::open(&path).unwrap();
            log.write(EventCategory::System, "before reopen").unwrap();
        }

        let log = EventLog::open(&path).unwrap();
        assert_eq!(log.count().unwrap(), 1);
        assert_eq!(log.recent(1).unwrap()[0].description, "before reopen");
    }

    #[test]
    fn test_category_round_trip() {
        for cat in [EventCategory::System, EventCategory::Motion, EventCategory::Alert] {
            assert_eq!(cat.as_str().parse::<EventCategory>().unwrap(), cat);
        }
        assert!("BOGUS".parse::<EventCategory>().is_err());
    }
}
