//! Ring buffer for stored log records.
//!
//! This module provides the fixed-capacity circular record store. It
//! implements overwrite-oldest eviction with an explicit slot array and two
//! cursors, so the eviction rule is exact and testable regardless of any
//! container's growth semantics.
//!
//! # Design
//!
//! The ring is a preallocated slot vector plus two integers:
//! - `write_cursor` is the next insertion slot, advanced mod capacity.
//! - `count` is the number of valid records so far, saturating at capacity.
//!
//! The buffer is "filling" while `count < capacity` (valid records occupy
//! slots `0..count`) and "wrapping" once full (the oldest record sits at
//! `write_cursor`, which is `(write_cursor - count) mod capacity` when
//! `count == capacity`). Snapshots read forward from the oldest slot, so
//! callers always observe chronological insertion order.
//!
//! # Thread Safety
//!
//! `RecordRing` itself is single-threaded. The recorder wraps it in a mutex
//! and serializes `push` and `snapshot` as atomic units; see
//! [`crate::recorder`].

use crate::error::{ConfigError, Result};
use crate::record::Record;

/// Fixed-capacity circular buffer of records with overwrite-oldest eviction.
#[derive(Debug)]
pub struct RecordRing {
    /// Preallocated slots; `None` only while the ring is still filling.
    slots: Vec<Option<Record>>,
    /// Next insertion slot, in `0..capacity`.
    write_cursor: usize,
    /// Number of valid records, `<= capacity`.
    count: usize,
}

impl RecordRing {
    /// Creates an empty ring with the given fixed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flightlog::ring::RecordRing;
    ///
    /// let ring = RecordRing::new(100)?;
    /// assert_eq!(ring.capacity(), 100);
    /// assert!(ring.is_empty());
    /// # Ok::<(), flightlog::FlightlogError>(())
    /// ```
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity { capacity }.into());
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            write_cursor: 0,
            count: 0,
        })
    }

    /// Inserts a record at the write cursor, evicting the oldest record if
    /// the ring is full.
    ///
    /// Always succeeds; there is no back-pressure. Overwriting is silent.
    pub fn push(&mut self, record: Record) {
        self.slots[self.write_cursor] = Some(record);
        self.write_cursor = (self.write_cursor + 1) % self.slots.len();
        if self.count < self.slots.len() {
            self.count += 1;
        }
    }

    /// Returns a copy of the current contents in chronological order,
    /// oldest first.
    ///
    /// When the ring has wrapped, the oldest record sits at the write cursor;
    /// before that, valid records occupy slots `0..count`.
    pub fn snapshot(&self) -> Vec<Record> {
        let capacity = self.slots.len();
        let start = if self.count == capacity {
            self.write_cursor
        } else {
            0
        };

        let mut records = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let slot = (start + i) % capacity;
            if let Some(record) = &self.slots[slot] {
                records.push(record.clone());
            }
        }
        records
    }

    /// Returns the number of records currently stored.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns the fixed capacity set at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether the ring contains no records.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns whether the ring is at capacity, i.e. the next push evicts.
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Discards all stored records, keeping the capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.write_cursor = 0;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;

    fn record(n: u64) -> Record {
        Record::new(n, Level::Info, format!("event {n}"), Vec::new())
    }

    fn messages(ring: &RecordRing) -> Vec<String> {
        ring.snapshot().into_iter().map(|r| r.message).collect()
    }

    #[test]
    fn test_empty_ring() {
        let ring = RecordRing::new(10).unwrap();

        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.capacity(), 10);
        assert!(ring.snapshot().is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(RecordRing::new(0).is_err());
    }

    #[test]
    fn test_single_push() {
        let mut ring = RecordRing::new(10).unwrap();
        ring.push(record(1));

        assert!(!ring.is_empty());
        assert_eq!(ring.len(), 1);
        assert_eq!(messages(&ring), vec!["event 1"]);
    }

    #[test]
    fn test_order_preserved_while_filling() {
        let mut ring = RecordRing::new(5).unwrap();
        for n in 1..=3 {
            ring.push(record(n));
        }

        assert_eq!(ring.len(), 3);
        assert!(!ring.is_full());
        assert_eq!(messages(&ring), vec!["event 1", "event 2", "event 3"]);
    }

    #[test]
    fn test_exactly_full() {
        let mut ring = RecordRing::new(3).unwrap();
        for n in 1..=3 {
            ring.push(record(n));
        }

        assert!(ring.is_full());
        assert_eq!(ring.len(), 3);
        assert_eq!(messages(&ring), vec!["event 1", "event 2", "event 3"]);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut ring = RecordRing::new(3).unwrap();
        for n in 1..=5 {
            ring.push(record(n));
        }

        // 1 and 2 were evicted; capacity never grows.
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.capacity(), 3);
        assert_eq!(messages(&ring), vec!["event 3", "event 4", "event 5"]);
    }

    #[test]
    fn test_wraps_repeatedly() {
        let mut ring = RecordRing::new(2).unwrap();
        for n in 1..=7 {
            ring.push(record(n));
        }

        assert_eq!(messages(&ring), vec!["event 6", "event 7"]);
    }

    #[test]
    fn test_capacity_one() {
        let mut ring = RecordRing::new(1).unwrap();
        ring.push(record(1));
        ring.push(record(2));

        assert_eq!(ring.len(), 1);
        assert_eq!(messages(&ring), vec!["event 2"]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut ring = RecordRing::new(3).unwrap();
        ring.push(record(1));

        let before = ring.snapshot();
        ring.push(record(2));

        // The earlier snapshot is unaffected by later pushes.
        assert_eq!(before.len(), 1);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut ring = RecordRing::new(3).unwrap();
        for n in 1..=5 {
            ring.push(record(n));
        }

        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 3);

        ring.push(record(9));
        assert_eq!(messages(&ring), vec!["event 9"]);
    }
}
