//! Record and level types for captured log events.
//!
//! A [`Record`] is one immutable log event: timestamp, severity, message,
//! and an ordered list of structured attributes. Records are constructed by
//! the recorder's accept path and never mutated afterwards; attribute values
//! are owned [`serde_json::Value`] snapshots taken at accept time, so a
//! stored record holds no live references into producer state.
//!
//! # Export shape
//!
//! A record serializes as a single flat JSON object:
//!
//! ```json
//! {"time": 1700000000000000000, "level": "INFO", "msg": "started", "request.id": 7}
//! ```
//!
//! `time` is nanoseconds since the Unix epoch, `level` is the uppercase level
//! name, and every attribute appears as an additional field in insertion
//! order. Group nesting is represented by dotted key prefixes, never nested
//! objects; the keys stored on a record are already fully qualified.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered severity of a log event.
///
/// Levels order as `Debug < Info < Warn < Error`, and the derived `Ord`
/// drives the recorder's threshold filter. The serialized form is the
/// uppercase name (`"DEBUG"`, `"INFO"`, `"WARN"`, `"ERROR"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Fine-grained diagnostic detail.
    Debug,
    /// Routine operational events.
    Info,
    /// Something unexpected that the process survived.
    Warn,
    /// A failure the producer considered an error.
    Error,
}

impl Level {
    /// Returns the stable uppercase name used in JSON export.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A key/value attribute pair attached to a record.
///
/// Keys are plain strings, fully group-qualified by the time they are stored.
/// Duplicate keys are allowed; insertion order is preserved.
pub type Attr = (String, serde_json::Value);

/// One immutable captured log event.
#[derive(Debug, Clone)]
pub struct Record {
    /// Event creation time in nanoseconds since the Unix epoch.
    pub time_ns: u64,
    /// Severity of the event.
    pub level: Level,
    /// The log message text.
    pub message: String,
    /// Ordered, fully-qualified attribute pairs.
    pub attrs: Vec<Attr>,
}

impl Record {
    /// Creates a record from its parts.
    pub fn new(time_ns: u64, level: Level, message: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            time_ns,
            level,
            message: message.into(),
            attrs,
        }
    }
}

// Hand-rolled so attributes flatten into the same object as the reserved
// fields instead of nesting under an "attrs" key.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.attrs.len()))?;
        map.serialize_entry("time", &self.time_ns)?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("msg", &self.message)?;
        for (key, value) in &self.attrs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
