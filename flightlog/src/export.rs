//! Export operations over the recorded contents.
//!
//! Everything here is read-only: each exporter works on a point-in-time
//! snapshot copied out of the ring, so encoding and I/O never run while the
//! store lock is held, and a failed export leaves the ring untouched and
//! retryable.
//!
//! # Design
//!
//! - [`Records`] is a lazy, owning iterator over one snapshot. Each call to
//!   [`crate::Recorder::iter`] starts a fresh traversal over a fresh
//!   snapshot; writes that land after the snapshot was taken are not
//!   observed mid-iteration.
//! - [`encode_json`] materializes the snapshot as one JSON array of
//!   flattened record objects, all-or-nothing.
//! - [`write_json`] streams those bytes into any [`std::io::Write`] sink,
//!   tracking how many bytes the sink accepted so a failure can report the
//!   partial count.

use std::io::{self, Write};

use crate::error::ExportError;
use crate::record::Record;

/// Owning iterator over a point-in-time snapshot of recorded events,
/// oldest first.
///
/// Finite and restartable: it was built from a snapshot, so it is unaffected
/// by appends that happen during iteration, and dropping it early costs
/// nothing.
#[derive(Debug)]
pub struct Records {
    inner: std::vec::IntoIter<Record>,
}

impl Records {
    pub(crate) fn new(snapshot: Vec<Record>) -> Self {
        Self {
            inner: snapshot.into_iter(),
        }
    }
}

impl Iterator for Records {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Records {}

/// Encodes a snapshot as a JSON array of flattened record objects.
pub(crate) fn encode_json(records: &[Record]) -> Result<Vec<u8>, ExportError> {
    serde_json::to_vec(records).map_err(|e| ExportError::Serialize { source: e })
}

/// Encodes a snapshot and writes the bytes into `sink` in one operation.
///
/// Returns the number of bytes written. `ErrorKind::Interrupted` writes are
/// retried; any other sink failure (including a zero-length write) surfaces
/// as [`ExportError::Write`] carrying the partial count.
pub(crate) fn write_json<W: Write>(records: &[Record], sink: &mut W) -> Result<u64, ExportError> {
    let encoded = encode_json(records)?;

    let mut written = 0u64;
    let mut remaining: &[u8] = &encoded;
    while !remaining.is_empty() {
        match sink.write(remaining) {
            Ok(0) => {
                return Err(ExportError::Write {
                    written,
                    source: io::Error::new(
                        io::ErrorKind::WriteZero,
                        "sink accepted zero bytes",
                    ),
                });
            }
            Ok(n) => {
                written += n as u64;
                remaining = &remaining[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(ExportError::Write { written, source: e }),
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use serde_json::json;

    fn sample() -> Vec<Record> {
        vec![
            Record::new(1, Level::Info, "first", vec![("a".to_string(), json!(1))]),
            Record::new(2, Level::Warn, "second", Vec::new()),
        ]
    }

    /// Write sink that fails once it has accepted `limit` bytes.
    struct ChokedSink {
        accepted: Vec<u8>,
        limit: usize,
    }

    impl Write for ChokedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted.len() >= self.limit {
                return Err(io::Error::other("sink full"));
            }
            let n = buf.len().min(self.limit - self.accepted.len());
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_empty_snapshot() {
        let bytes = encode_json(&[]).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_encode_is_an_array_of_flat_objects() {
        let bytes = encode_json(&sample()).unwrap();
        let decoded: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0]["msg"], "first");
        assert_eq!(decoded[0]["level"], "INFO");
        assert_eq!(decoded[0]["a"], 1);
        assert_eq!(decoded[1]["msg"], "second");
    }

    #[test]
    fn test_write_reports_full_byte_count() {
        let records = sample();
        let expected = encode_json(&records).unwrap();

        let mut sink = Vec::new();
        let written = write_json(&records, &mut sink).unwrap();

        assert_eq!(written, expected.len() as u64);
        assert_eq!(sink, expected);
    }

    #[test]
    fn test_write_failure_carries_partial_count() {
        let records = sample();
        let mut sink = ChokedSink {
            accepted: Vec::new(),
            limit: 10,
        };

        let err = write_json(&records, &mut sink).unwrap_err();
        match err {
            ExportError::Write { written, .. } => assert_eq!(written, 10),
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn test_records_iterator_is_exact_size() {
        let mut iter = Records::new(sample());
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next().unwrap().message, "first");
        assert_eq!(iter.len(), 1);
    }
}
