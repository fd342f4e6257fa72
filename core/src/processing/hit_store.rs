use serde::{Deserialize, Serialize};
use std::collections::vec_deque::{self, VecDeque};

/// One recorded echo. Never mutated once stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub angle_rad: f64,
    pub distance_cm: f64,
    pub created_at: f64,
    pub sequence: u64,
}

/// Bounded FIFO of recent echoes that evicts the oldest hit when full.
pub struct HitStore {
    hits: VecDeque<Hit>,
    max_capacity: usize,
    next_sequence: u64,
    evicted: u64,
}

impl HitStore {
    pub fn with_capacity(max_capacity: usize) -> Self {
        let max_capacity = max_capacity.max(1);
        Self {
            hits: VecDeque::with_capacity(max_capacity),
            max_capacity,
            next_sequence: 1,
            evicted: 0,
        }
    }

    /// Appends a hit with a fresh sequence number, dropping the oldest first
    /// if the store is full.
    pub fn record(&mut self, angle_rad: f64, distance_cm: f64, now: f64) -> &Hit {
        if self.hits.len() >= self.max_capacity {
            self.hits.pop_front();
            self.evicted += 1;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.hits.push_back(Hit {
            angle_rad,
            distance_cm,
            created_at: now,
            sequence,
        });
        &self.hits[self.hits.len() - 1]
    }

    /// Read-only view in insertion order, stable for as long as it is borrowed.
    pub fn snapshot(&self) -> HitSnapshot<'_> {
        HitSnapshot { hits: &self.hits }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Sequence of the most recently recorded hit, 0 before the first one.
    pub fn last_sequence(&self) -> u64 {
        self.next_sequence - 1
    }
}

#[derive(Clone, Copy)]
pub struct HitSnapshot<'a> {
    hits: &'a VecDeque<Hit>,
}

impl<'a> HitSnapshot<'a> {
    /// Oldest first; call `.rev()` for newest first.
    pub fn iter(&self) -> vec_deque::Iter<'a, Hit> {
        self.hits.iter()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_start_at_one_and_increase() {
        let mut store = HitStore::with_capacity(8);
        assert_eq!(store.last_sequence(), 0);
        assert_eq!(store.record(0.1, 10.0, 0.0).sequence, 1);
        assert_eq!(store.record(0.2, 20.0, 0.1).sequence, 2);
        assert_eq!(store.last_sequence(), 2);
        let seqs: Vec<u64> = store.snapshot().iter().map(|h| h.sequence).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        const MAX_HITS: usize = 4000;
        let mut store = HitStore::with_capacity(MAX_HITS);
        for i in 0..=MAX_HITS {
            store.record(0.5, 50.0, i as f64);
        }
        assert_eq!(store.len(), MAX_HITS);
        assert_eq!(store.evicted(), 1);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.iter().next().unwrap().sequence, 2);
        assert_eq!(
            snapshot.iter().next_back().unwrap().sequence,
            MAX_HITS as u64 + 1
        );
    }

    #[test]
    fn snapshot_reverses_to_newest_first() {
        let mut store = HitStore::with_capacity(3);
        for i in 0..5 {
            store.record(0.0, i as f64, i as f64);
        }
        let newest: Vec<u64> = store.snapshot().iter().rev().map(|h| h.sequence).collect();
        assert_eq!(newest, vec![5, 4, 3]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut store = HitStore::with_capacity(0);
        store.record(0.0, 1.0, 0.0);
        store.record(0.0, 2.0, 0.0);
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
    }
}
