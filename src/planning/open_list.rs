//! Open list with lazy invalidation.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Snapshot of a node's keys at push time.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub f: f32,
    pub h: f32,
    pub g: f32,
    pub idx: u32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.h == other.h && self.idx == other.idx
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior: lowest f first, ties to
        // the lower h, remaining ties to the smaller row-major cell index
        // so pop order is a fixed total order.
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.h.partial_cmp(&self.h).unwrap_or(Ordering::Equal))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue over open search nodes.
///
/// There is no decrease-key: improving a node pushes a duplicate entry with
/// the better keys, and the superseded entry is recognized at pop time (its
/// snapshot no longer matches the arena) and skipped. Clearing keeps the
/// heap's capacity for the next search.
pub(crate) struct OpenList {
    heap: BinaryHeap<OpenEntry>,
}

impl OpenList {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, entry: OpenEntry) {
        self.heap.push(entry);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Number of entries, counting superseded duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[allow(dead_code)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
