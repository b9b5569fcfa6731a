//! Bounded, incrementally updated tracker for the most frequent words.

use std::collections::HashMap;

use tracing::debug;

/// Limit applied when the caller asks for zero words.
pub const DEFAULT_WORD_LIMIT: usize = 10;

#[derive(Debug, Clone)]
struct Slot {
    word: String,
    priority: u64,
    seq: u64,
}

/// Tracks the words with the highest counts seen so far without ever
/// rescanning the full word table.
///
/// `counts` is authoritative. The heap holds at most `limit` words as an
/// indexed binary min-heap ordered by `(priority, seq)`, with `position`
/// mapping each tracked word to its heap slot so priorities can be updated
/// by key in O(log limit). The `seq` component makes eviction among
/// equal-priority entries deterministic: the earliest-admitted entry goes
/// first.
#[derive(Debug, Clone)]
pub struct TopWords {
    limit: usize,
    next_seq: u64,
    counts: HashMap<String, u64>,
    heap: Vec<Slot>,
    position: HashMap<String, usize>,
}

impl TopWords {
    /// Create a tracker keeping at most `limit` words. A limit of zero
    /// falls back to [`DEFAULT_WORD_LIMIT`].
    pub fn new(limit: usize) -> Self {
        let limit = if limit == 0 { DEFAULT_WORD_LIMIT } else { limit };
        Self {
            limit,
            next_seq: 0,
            counts: HashMap::new(),
            heap: Vec::new(),
            position: HashMap::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Authoritative word counts, including words that are not tracked.
    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    pub fn tracked_len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Record one occurrence of `word`.
    ///
    /// An untracked word is admitted when the heap has room, or when its
    /// count has reached the authoritative count of the current minimum.
    /// Admission beyond capacity evicts exactly one entry, the minimum.
    pub fn record(&mut self, word: &str) {
        let count = {
            let entry = self.counts.entry(word.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        if let Some(&pos) = self.position.get(word) {
            // already tracked: refresh the priority in place; counts only
            // grow, so the slot can only sink in a min-heap
            self.heap[pos].priority = count;
            self.sift_down(pos);
            return;
        }

        let admit = if self.heap.len() < self.limit {
            true
        } else {
            match self.heap.first() {
                Some(min) => count >= self.counts[&min.word],
                None => true,
            }
        };

        if admit {
            let pos = self.heap.len();
            self.position.insert(word.to_string(), pos);
            self.heap.push(Slot {
                word: word.to_string(),
                priority: count,
                seq: self.next_seq,
            });
            self.next_seq += 1;
            self.sift_up(pos);
        }

        if self.heap.len() > self.limit
            && let Some(evicted) = self.pop_min()
        {
            debug!(
                "evicted '{}' (count {}) from the tracked set",
                evicted.word, self.counts[&evicted.word]
            );
        }
    }

    /// The tracked words paired with their authoritative counts.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.heap
            .iter()
            .map(|slot| (slot.word.clone(), self.counts[&slot.word]))
            .collect()
    }

    fn pop_min(&mut self) -> Option<Slot> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let slot = self.heap.pop()?;
        self.position.remove(&slot.word);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(slot)
    }

    fn key(&self, pos: usize) -> (u64, u64) {
        (self.heap[pos].priority, self.heap[pos].seq)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.position.insert(self.heap[a].word.clone(), a);
        self.position.insert(self.heap[b].word.clone(), b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.key(pos) >= self.key(parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < self.heap.len() && self.key(left) < self.key(smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.key(right) < self.key(smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

impl Default for TopWords {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LIMIT)
    }
}
