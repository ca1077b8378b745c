//! Fixed-capacity rotation of display slots.

use crate::decode::Post;

/// Index of a display slot within the strip.
pub type SlotIndex = usize;

/// Strictly increasing insertion stamp, used only for presentation order
/// (most recent drawn frontmost). Never reset for the life of the display.
pub type FreshnessRank = u64;

/// One reusable display position.
///
/// Created only by [`RotatingDisplay`] at construction; mutated only by
/// `append`. An empty slot has `rank` 0 and no post.
#[derive(Debug, Clone, Default)]
pub struct DisplaySlot {
    post: Option<Post>,
    rank: FreshnessRank,
}

impl DisplaySlot {
    /// The post currently held, if any.
    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    /// Freshness rank of the held post; 0 while the slot has never been
    /// written.
    pub fn rank(&self) -> FreshnessRank {
        self.rank
    }
}

/// Bounded, always-fresh view of the last N posts.
///
/// Strict FIFO over appends: the write cursor advances by exactly one slot
/// per append regardless of content, so the Nth-oldest post is always the
/// next evicted. There is no remove operation; eviction happens only by
/// overwrite.
#[derive(Debug)]
pub struct RotatingDisplay {
    slots: Vec<DisplaySlot>,
    cursor: usize,
    next_rank: FreshnessRank,
}

impl RotatingDisplay {
    /// Default number of slots on the strip.
    pub const DEFAULT_CAPACITY: usize = 5;

    /// Creates a display with `capacity` empty slots.
    ///
    /// # Panics
    /// Panics if `capacity` is 0; a strip needs at least one slot.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "display capacity must be at least 1");
        Self {
            slots: vec![DisplaySlot::default(); capacity],
            cursor: 0,
            next_rank: 1,
        }
    }

    /// Installs `post` in the slot at the cursor, evicting whatever the
    /// slot held before.
    ///
    /// Total: always succeeds, always touches exactly one slot. Returns the
    /// slot written and the rank stamped on it, strictly greater than every
    /// rank handed out before.
    pub fn append(&mut self, post: Post) -> (SlotIndex, FreshnessRank) {
        let index = self.cursor;
        let rank = self.next_rank;

        self.slots[index] = DisplaySlot {
            post: Some(post),
            rank,
        };
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.next_rank += 1;

        (index, rank)
    }

    /// Snapshot of all slots, for initial render and tests.
    pub fn slots(&self) -> &[DisplaySlot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for RotatingDisplay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
