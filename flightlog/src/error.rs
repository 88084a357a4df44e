//! Error types for the flightlog recorder.

use thiserror::Error;

/// The main error type for all flightlog operations.
///
/// Only construction and export can fail. The write path (`accept`/`push`)
/// and the in-memory read accessors are infallible by contract: a record
/// dropped by the level filter is a silent no-op, not an error.
#[derive(Error, Debug)]
pub enum FlightlogError {
    /// Error validating recorder configuration at construction.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error during JSON export or streaming write-out.
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors that can occur when constructing a recorder.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The requested ring capacity is zero.
    ///
    /// A zero-size ring can never hold a record, so construction is
    /// rejected outright rather than returning a recorder that drops
    /// everything.
    #[error("invalid capacity: {capacity} (must be > 0)")]
    InvalidCapacity {
        /// The rejected capacity value.
        capacity: usize,
    },
}

/// Errors that can occur during export operations (read path).
///
/// A failed export never disturbs the ring contents; the same export can be
/// retried after the external cause is fixed.
#[derive(Error, Debug)]
pub enum ExportError {
    /// An attribute value could not be encoded as JSON.
    ///
    /// Encoding is all-or-nothing: no partial output is produced.
    #[error("failed to serialize records: {source}")]
    Serialize {
        /// The underlying JSON serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The output sink failed while the encoded bytes were being written.
    ///
    /// Carries the number of bytes that had been accepted by the sink before
    /// the failure, so callers that care about partial writes can see how far
    /// the write got. No retry is performed here.
    #[error("output sink write failed after {written} bytes: {source}")]
    Write {
        /// Bytes successfully written before the failure.
        written: u64,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for `Result<T, FlightlogError>`.
pub type Result<T> = std::result::Result<T, FlightlogError>;
