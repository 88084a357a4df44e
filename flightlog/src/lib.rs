//! # flightlog
//!
//! In-memory, fixed-capacity flight recorder for structured log events.
//!
//! flightlog keeps the most recent N log events in a ring buffer and exposes
//! them for inspection: ordered snapshot, lazy iteration, JSON export, and
//! streaming write-out. It is built for diagnostic use — tests that want to
//! assert on emitted logs, and "flight recorder" postmortem dumps where the
//! last K events leading to a failure matter but a full persisted log stream
//! does not.
//!
//! ## Key Properties
//!
//! - Bounded, predictable memory — the newest `capacity` events are kept,
//!   the oldest are silently overwritten, nothing ever grows
//! - Level threshold filter on the write path; dropped events consume no slot
//! - Immutable derived views (`with_group` / `with_attrs`) accumulate dotted
//!   group namespaces and bound attributes without touching the parent
//! - Safe under concurrent producers; exports read consistent snapshots and
//!   never hold the store lock across encoding or I/O
//! - Plugs into `tracing` as a subscriber layer; no global state, any number
//!   of independent recorders per process
//!
//! ## Quick Start
//!
//! ```rust
//! use flightlog::{Level, Recorder};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), flightlog::FlightlogError> {
//! // Keep the last 100 events at the default Info threshold
//! let recorder = Recorder::new(100)?;
//!
//! recorder.accept(Level::Info, "server started", &[("port".to_string(), json!(8080))]);
//! recorder.accept(Level::Warn, "high latency", &[("ms".to_string(), json!(250))]);
//!
//! assert_eq!(recorder.len(), 2);
//!
//! // Dump everything as a JSON array of flat objects
//! let json = recorder.to_json()?;
//! assert!(!json.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! As a `tracing` layer:
//!
//! ```rust
//! use flightlog::Recorder;
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! # fn main() -> Result<(), flightlog::FlightlogError> {
//! let recorder = Recorder::new(100)?;
//! let subscriber = tracing_subscriber::registry().with(recorder.layer());
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!(port = 8080, "server started");
//! });
//!
//! assert_eq!(recorder.records()[0].message, "server started");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`Recorder`] — Top-level handle; filtering, context merge, accessors
//! - [`Record`] — One immutable captured event
//! - [`RecorderLayer`] — `tracing_subscriber` layer feeding a recorder
//!
//! ## Modules
//!
//! For lower-level access, the individual modules are also public:
//!
//! - [`recorder`] — Recorder handle, options, accept path
//! - [`record`] — Record and level types
//! - [`ring`] — Fixed-capacity ring buffer with overwrite-oldest eviction
//! - [`context`] — Accumulated grouping and bound attributes
//! - [`export`] — Snapshot iteration and JSON export
//! - [`layer`] — `tracing` bridge
//! - [`error`] — Error types

pub mod context;
pub mod error;
pub mod export;
pub mod layer;
pub mod record;
pub mod recorder;
pub mod ring;

// Re-export primary API types at crate root for convenience.
pub use error::{ConfigError, ExportError, FlightlogError, Result};
pub use export::Records;
pub use layer::RecorderLayer;
pub use record::{Attr, Level, Record};
pub use recorder::{Recorder, RecorderOptions};
