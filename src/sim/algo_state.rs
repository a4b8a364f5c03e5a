//! AlgoState - one policy's independent replacement state machine.
//!
//! Each [`AlgoState`] owns a fixed-capacity table of
//! [`Frame`](crate::sim::Frame) slots plus counters and the
//! policy-specific cursors (FIFO's load counter doubles as the
//! insertion timestamp for everyone; CLOCK adds a hand). The
//! [`PageManager`](crate::sim::PageManager) feeds every state the same
//! instruction stream, so differences in their tables are purely down
//! to the replacement discipline.

use crate::common::PageId;
use crate::sim::{Frame, FrameView, Policy, PolicyStats};
use crate::trace::Operation;

/// Whether an access found its page resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    /// Page was resident; no table change beyond metadata.
    Hit,
    /// Page faulted and was loaded, possibly evicting a victim.
    Miss,
}

/// The result of processing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Hit or miss.
    pub status: AccessStatus,
    /// The page evicted to make room, if any.
    pub evicted: Option<PageId>,
    /// Whether the eviction had to write a dirty page back.
    pub write_back: bool,
}

/// One policy's frame table, counters and cursors.
///
/// # Lifecycle
/// The table starts empty. A slot goes `Empty -> Occupied` on a miss
/// with a free slot, or `Occupied(old) -> Occupied(new)` on a miss
/// with eviction; slots never empty out while the simulation runs.
/// [`AlgoState::reset`] returns everything to the initial state.
#[derive(Debug)]
pub struct AlgoState {
    /// Which discipline this state applies. Immutable after construction.
    policy: Policy,

    /// Fixed-length table; `None` marks a free slot.
    frames: Vec<Option<Frame>>,

    /// Hit/miss/write-back counters.
    stats: PolicyStats,

    /// Monotonic load sequence; bumps on every miss.
    load_counter: u64,

    /// CLOCK's circulating pointer. Always in `[0, capacity)`.
    clock_hand: usize,
}

impl AlgoState {
    /// Create an empty state machine for `policy`.
    ///
    /// # Panics
    /// Panics if `capacity` is 0. The public constructor boundary
    /// ([`PageManager::new`](crate::sim::PageManager::new)) rejects
    /// that with a descriptive error first.
    pub fn new(policy: Policy, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            policy,
            frames: (0..capacity).map(|_| None).collect(),
            stats: PolicyStats::new(),
            load_counter: 0,
            clock_hand: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The policy this state applies.
    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Number of slots in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// The counters accumulated so far.
    #[inline]
    pub fn stats(&self) -> &PolicyStats {
        &self.stats
    }

    /// Read-only view of the frame table.
    #[inline]
    pub fn frames(&self) -> &[Option<Frame>] {
        &self.frames
    }

    /// CLOCK's current hand position.
    #[inline]
    pub fn clock_hand(&self) -> usize {
        self.clock_hand
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.frames.iter().flatten().count()
    }

    // ========================================================================
    // Processing
    // ========================================================================

    /// Process one access.
    ///
    /// `time` is the orchestrator's wall clock, identical across all
    /// policies for the same instruction. `future` is the decoded page
    /// sequence *after* this instruction - only OPT consults it.
    pub fn process(
        &mut self,
        page_id: PageId,
        op: Operation,
        time: u64,
        future: Option<&[PageId]>,
    ) -> Outcome {
        self.stats.total_count += 1;

        let resident = self
            .frames
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|f| f.page_id == page_id));

        match resident {
            Some(idx) => self.handle_hit(idx, op, time),
            None => self.handle_miss(page_id, op, time, future),
        }
    }

    /// Hit path: refresh metadata, never evict.
    fn handle_hit(&mut self, idx: usize, op: Operation, time: u64) -> Outcome {
        if let Some(frame) = self.frames[idx].as_mut() {
            frame.last_access = time;

            match self.policy {
                // A touch re-arms the second chance.
                Policy::Clock => frame.ref_bit = true,
                // A second touch proves the page hot.
                Policy::LinuxNg => frame.active_list = true,
                Policy::Fifo | Policy::Lru | Policy::Opt => {}
            }

            if op == Operation::Write {
                frame.dirty = true;
            }
        }

        if self.policy == Policy::LinuxNg {
            self.rebalance_lists();
        }

        Outcome {
            status: AccessStatus::Hit,
            evicted: None,
            write_back: false,
        }
    }

    /// Miss path: fill a free slot or evict, then install the page.
    fn handle_miss(
        &mut self,
        page_id: PageId,
        op: Operation,
        time: u64,
        future: Option<&[PageId]>,
    ) -> Outcome {
        self.stats.miss_count += 1;
        self.load_counter += 1;

        let mut evicted = None;
        let mut write_back = false;

        let slot = match self.frames.iter().position(|s| s.is_none()) {
            Some(free) => free,
            None => {
                let victim = self
                    .policy
                    .select_victim(&mut self.frames, self.clock_hand, future);

                if let Some(old) = self.frames[victim].as_ref() {
                    evicted = Some(old.page_id);
                    if old.dirty {
                        self.stats.write_back_count += 1;
                        write_back = true;
                    }
                }

                victim
            }
        };

        self.frames[slot] = Some(Frame::load(
            page_id,
            self.load_counter,
            time,
            op == Operation::Write,
        ));

        // The hand parks just past the replacement, even when the miss
        // landed in a free slot.
        if self.policy == Policy::Clock {
            self.clock_hand = (slot + 1) % self.frames.len();
        }

        Outcome {
            status: AccessStatus::Miss,
            evicted,
            write_back,
        }
    }

    /// Keep LINUX_NG's active list at no more than half the table.
    ///
    /// When a promotion pushes the active count past `capacity / 2`,
    /// the stalest active frame is demoted back to inactive. One
    /// demotion per promotion keeps the lists in balance.
    fn rebalance_lists(&mut self) {
        let limit = self.frames.len() / 2;

        let mut active_count = 0;
        let mut stalest: Option<(usize, u64)> = None;

        for (i, frame) in self.frames.iter().enumerate() {
            let Some(frame) = frame else { continue };
            if !frame.active_list {
                continue;
            }
            active_count += 1;
            if stalest.is_none_or(|(_, t)| frame.last_access < t) {
                stalest = Some((i, frame.last_access));
            }
        }

        if active_count > limit {
            if let Some((idx, _)) = stalest {
                if let Some(frame) = self.frames[idx].as_mut() {
                    frame.active_list = false;
                }
            }
        }
    }

    // ========================================================================
    // Projections
    // ========================================================================

    /// Project the next victim without touching any state.
    ///
    /// Returns `None` while any slot is still free - there is no
    /// replacement pressure to predict yet. CLOCK uses a dry-run scan;
    /// the other policies' victim rules are side-effect-free already.
    pub fn predict_next_victim(&self, future: Option<&[PageId]>) -> Option<usize> {
        if self.frames.iter().any(|slot| slot.is_none()) {
            return None;
        }

        Some(self.policy.peek_victim(&self.frames, self.clock_hand, future))
    }

    /// Per-slot display projection at `time`. Read-only; cannot fail.
    pub fn snapshot(&self, time: u64) -> Vec<Option<FrameView>> {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.as_ref().map(|frame| {
                    let is_hand = self.policy == Policy::Clock && i == self.clock_hand;
                    FrameView::project(self.policy, frame, time, is_hand)
                })
            })
            .collect()
    }

    /// Return to the freshly constructed state: empty table, zeroed
    /// counters, hand at slot 0.
    pub fn reset(&mut self) {
        for slot in &mut self.frames {
            *slot = None;
        }
        self.stats.reset();
        self.load_counter = 0;
        self.clock_hand = 0;
    }
}
