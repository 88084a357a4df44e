//! Recorder module tying the ring store, level filter, and context together.
//!
//! This module provides the top-level API. A [`Recorder`] is a cheaply
//! cloneable handle over one shared ring store; each handle additionally
//! carries its own immutable [`Context`](crate::context::Context) of group
//! prefix and bound attributes.
//!
//! # Design
//!
//! The recorder is the only writer of the ring:
//! - `accept` applies the level threshold, merges context, stamps the time,
//!   and appends. It never fails and never applies back-pressure; once the
//!   ring is full the oldest record is silently overwritten.
//! - `with_group` / `with_attrs` derive new views sharing the same ring.
//!   Derivation is pure and lock-free.
//! - The read accessors (`records`, `iter`, `to_json`, `write_to`) all work
//!   on snapshots; see [`crate::export`].
//!
//! # Thread Safety
//!
//! A single mutex serializes push and snapshot, so cursor, count, and slot
//! contents are always mutually consistent and a reader never sees a
//! half-written slot. The lock is held only for the O(1) push or the
//! snapshot copy, never across JSON encoding or sink I/O. Lock poisoning is
//! absorbed: every critical section leaves the ring in a consistent state,
//! so a poisoned lock carries no torn data.
//!
//! # Example
//!
//! ```rust
//! use flightlog::{Level, Recorder};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), flightlog::FlightlogError> {
//! let recorder = Recorder::new(100)?;
//!
//! recorder.accept(Level::Info, "server started", &[("port".to_string(), json!(8080))]);
//! recorder.accept(Level::Warn, "high latency", &[("ms".to_string(), json!(250))]);
//!
//! assert_eq!(recorder.len(), 2);
//! for record in recorder.records() {
//!     println!("{}: {}", record.level, record.message);
//! }
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::context::Context;
use crate::error::Result;
use crate::export::{self, Records};
use crate::layer::RecorderLayer;
use crate::record::{Attr, Level, Record};
use crate::ring::RecordRing;

/// Configuration recognized at recorder construction.
#[derive(Debug, Clone, Copy)]
pub struct RecorderOptions {
    /// Minimum level to record; events below it are silently dropped and
    /// consume no ring slot.
    pub threshold: Level,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            threshold: Level::Info,
        }
    }
}

/// State shared by every cloned view of one recorder.
#[derive(Debug)]
struct Shared {
    /// Minimum level to record, fixed at construction.
    threshold: Level,
    /// The ring store; the mutex serializes push and snapshot.
    ring: Mutex<RecordRing>,
}

/// In-memory flight recorder handle for structured log events.
///
/// Cloning shares the underlying ring store; derived views produced by
/// [`Recorder::with_group`] and [`Recorder::with_attrs`] also share it while
/// carrying their own accumulated context. Multiple independent recorders
/// per process are fine — nothing here is global.
#[derive(Debug, Clone)]
pub struct Recorder {
    shared: Arc<Shared>,
    context: Context,
}

impl Recorder {
    /// Creates a recorder retaining the most recent `capacity` events, with
    /// the default [`Level::Info`] threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`](crate::error::ConfigError)
    /// if `capacity` is zero; no usable recorder is produced.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_options(capacity, RecorderOptions::default())
    }

    /// Creates a recorder with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`](crate::error::ConfigError)
    /// if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flightlog::{Level, Recorder, RecorderOptions};
    ///
    /// let recorder = Recorder::with_options(10, RecorderOptions { threshold: Level::Error })?;
    /// recorder.accept(Level::Info, "ignored", &[]);
    /// assert_eq!(recorder.len(), 0);
    /// # Ok::<(), flightlog::FlightlogError>(())
    /// ```
    pub fn with_options(capacity: usize, options: RecorderOptions) -> Result<Self> {
        let ring = RecordRing::new(capacity)?;
        Ok(Self {
            shared: Arc::new(Shared {
                threshold: options.threshold,
                ring: Mutex::new(ring),
            }),
            context: Context::new(),
        })
    }

    /// Returns whether events at `level` would be recorded.
    ///
    /// Producers can consult this before building expensive attribute values
    /// for a level that is disabled.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.shared.threshold
    }

    /// Records one event with the current time.
    ///
    /// Below-threshold events are a silent no-op and consume no ring slot.
    /// Bound context attributes are merged ahead of the call-site attributes,
    /// call-site keys are qualified with the group prefix, and the oldest
    /// record is evicted if the ring is full. Never fails.
    pub fn accept(&self, level: Level, message: &str, attrs: &[Attr]) {
        self.accept_at(level, message, attrs, now_ns());
    }

    /// Records one event with an explicit timestamp in nanoseconds since the
    /// Unix epoch.
    ///
    /// Same semantics as [`Recorder::accept`]; the logging front-end hands
    /// the event time through here, and tests use it for determinism.
    pub fn accept_at(&self, level: Level, message: &str, attrs: &[Attr], time_ns: u64) {
        if !self.enabled(level) {
            return;
        }

        let record = Record::new(time_ns, level, message, self.context.merge(attrs));
        self.ring().push(record);
    }

    /// Derives a view whose subsequent attribute keys are namespaced under
    /// `name`, sharing the same ring store.
    ///
    /// The receiver is unaffected; an empty name derives an equivalent view.
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            context: self.context.with_group(name),
        }
    }

    /// Derives a view with additional attributes bound into every record it
    /// accepts, sharing the same ring store.
    ///
    /// The receiver is unaffected.
    pub fn with_attrs(&self, attrs: &[Attr]) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            context: self.context.with_attrs(attrs),
        }
    }

    /// Returns the number of records currently stored.
    pub fn len(&self) -> usize {
        self.ring().len()
    }

    /// Returns whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.ring().is_empty()
    }

    /// Returns the fixed capacity set at construction.
    pub fn capacity(&self) -> usize {
        self.ring().capacity()
    }

    /// Discards all stored records, keeping the capacity. Useful for reuse
    /// across test cases.
    pub fn clear(&self) {
        self.ring().clear();
    }

    /// Returns the stored records in chronological order, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.ring().snapshot()
    }

    /// Returns a lazy iterator over a point-in-time snapshot, oldest first.
    ///
    /// Each call starts a fresh traversal over a fresh snapshot; appends made
    /// after the call do not appear mid-iteration, and the iterator can be
    /// dropped early at no cost.
    pub fn iter(&self) -> Records {
        Records::new(self.records())
    }

    /// Serializes the stored records as a JSON array of flat objects.
    ///
    /// Each object carries `time` (nanoseconds since the Unix epoch, `u64`),
    /// `level` (uppercase name), `msg`, and one field per attribute with
    /// dotted group-prefixed keys. This shape is stable.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`](crate::error::ExportError) if an
    /// attribute value cannot be encoded; no partial output is produced and
    /// the stored records are unaffected.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(export::encode_json(&self.records())?)
    }

    /// Serializes as [`Recorder::to_json`] and writes the bytes into `sink`
    /// in one operation, returning the byte count written.
    ///
    /// The snapshot is taken and encoded before any I/O starts; the store
    /// lock is never held across the write.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialize`](crate::error::ExportError) if
    /// encoding fails, or [`ExportError::Write`](crate::error::ExportError)
    /// wrapping the sink's error together with the partial byte count. The
    /// stored records are unaffected either way and the export can be
    /// retried.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flightlog::{Level, Recorder};
    ///
    /// let recorder = Recorder::new(10)?;
    /// recorder.accept(Level::Info, "first", &[]);
    ///
    /// let mut buf = Vec::new();
    /// let written = recorder.write_to(&mut buf)?;
    /// assert_eq!(written as usize, buf.len());
    /// # Ok::<(), flightlog::FlightlogError>(())
    /// ```
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<u64> {
        Ok(export::write_json(&self.records(), sink)?)
    }

    /// Returns a [`tracing_subscriber::Layer`](tracing_subscriber::layer::Layer)
    /// forwarding `tracing` events into this recorder.
    pub fn layer(&self) -> RecorderLayer {
        RecorderLayer::new(self.clone())
    }

    fn ring(&self) -> MutexGuard<'_, RecordRing> {
        // A poisoned lock cannot hold torn state: push and snapshot leave the
        // ring consistent at every step that could panic.
        self.shared.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Current time in nanoseconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)] // u64 nanoseconds reach past year 2500
fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
