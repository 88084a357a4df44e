//! `tracing` bridge: a subscriber layer that records events into a recorder.
//!
//! [`RecorderLayer`] is the host-framework face of the recorder. Composed
//! into a `tracing_subscriber` stack, it forwards each event into a
//! [`Recorder`]: the event's `message` field becomes the record message,
//! every other field becomes an attribute, and the event level is mapped
//! onto [`Level`] (`TRACE` and `DEBUG` both land on [`Level::Debug`]).
//!
//! Nothing here is global; each layer wraps one recorder handle, so a
//! process (or a test) can run any number of independent recorders.
//!
//! # Example
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
//! assert_eq!(recorder.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context as LayerContext, Layer};

use crate::record::{Attr, Level};
use crate::recorder::Recorder;

/// A `tracing_subscriber` layer forwarding events into a [`Recorder`].
#[derive(Debug, Clone)]
pub struct RecorderLayer {
    recorder: Recorder,
}

impl RecorderLayer {
    /// Wraps a recorder handle. [`Recorder::layer`] is the usual entry point.
    pub fn new(recorder: Recorder) -> Self {
        Self { recorder }
    }
}

impl<S: Subscriber> Layer<S> for RecorderLayer {
    // The threshold is applied inside on_event rather than via event_enabled:
    // a false event_enabled vote would disable the event for every other
    // layer in the stack, and recorders with different thresholds must be
    // able to share one subscriber.
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let level = map_level(event.metadata().level());
        if !self.recorder.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.recorder.accept(level, &visitor.message, &visitor.attrs);
    }
}

/// Maps a `tracing` verbosity level onto the recorder's ordered severity.
fn map_level(level: &tracing::Level) -> Level {
    if *level == tracing::Level::ERROR {
        Level::Error
    } else if *level == tracing::Level::WARN {
        Level::Warn
    } else if *level == tracing::Level::INFO {
        Level::Info
    } else {
        // TRACE and DEBUG both map to the lowest recorded severity.
        Level::Debug
    }
}

/// Collects an event's fields: `message` becomes the record message, every
/// other field an attribute. Primitive field types are captured natively;
/// anything else falls back to its `Debug` rendering as a JSON string.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    attrs: Vec<Attr>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: serde_json::Value) {
        self.attrs.push((field.name().to_string(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, serde_json::Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, serde_json::Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push(field, serde_json::Value::from(value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push(field, serde_json::Value::from(format!("{value:?}")));
        }
    }
}
