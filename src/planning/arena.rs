//! Per-cell search bookkeeping, reused across searches.

/// One cell's search state.
///
/// A slot is live only while its stamp matches the arena's current search
/// stamp; stale slots read back as untouched without being rewritten.
#[derive(Clone, Copy)]
struct NodeSlot {
    g: f32,
    parent: u32,
    stamp: u32,
    closed: bool,
}

const EMPTY_SLOT: NodeSlot = NodeSlot {
    g: f32::INFINITY,
    parent: 0,
    stamp: 0,
    closed: false,
};

/// Flat per-cell node store sized to the grid.
///
/// Allocated once and shared by every search an engine runs; starting a new
/// search bumps the version stamp instead of clearing memory, so back-to-back
/// goals cost no allocation and no O(cells) reset.
pub(crate) struct NodeArena {
    slots: Vec<NodeSlot>,
    stamp: u32,
}

impl NodeArena {
    pub fn new(cell_count: usize) -> Self {
        debug_assert!(cell_count <= u32::MAX as usize);
        Self {
            slots: vec![EMPTY_SLOT; cell_count],
            stamp: 0,
        }
    }

    /// Start a new search; every slot of the previous one goes stale in O(1).
    pub fn begin_search(&mut self) {
        if self.stamp == u32::MAX {
            // Stamp wrapped: clear everything so old stamps cannot alias.
            self.slots.fill(EMPTY_SLOT);
            self.stamp = 0;
        }
        self.stamp += 1;
    }

    #[inline]
    fn live(&self, idx: usize) -> bool {
        self.slots[idx].stamp == self.stamp
    }

    /// Cost from start, infinite for untouched cells.
    #[inline]
    pub fn g(&self, idx: usize) -> f32 {
        if self.live(idx) {
            self.slots[idx].g
        } else {
            f32::INFINITY
        }
    }

    #[inline]
    pub fn parent(&self, idx: usize) -> Option<usize> {
        if self.live(idx) {
            Some(self.slots[idx].parent as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_closed(&self, idx: usize) -> bool {
        self.live(idx) && self.slots[idx].closed
    }

    /// Record a cost and parent for a cell, reviving a stale slot.
    #[inline]
    pub fn relax(&mut self, idx: usize, g: f32, parent: usize) {
        self.slots[idx] = NodeSlot {
            g,
            parent: parent as u32,
            stamp: self.stamp,
            closed: false,
        };
    }

    /// Finalize a cell. Only live cells are ever closed.
    #[inline]
    pub fn close(&mut self, idx: usize) {
        self.slots[idx].closed = true;
    }
}
