//! Frame - a slot in a policy's resident-page table.
//!
//! A [`Frame`] records one resident page plus the metadata the
//! replacement policies select victims by. It is a passive record:
//! all behavior lives in the owning
//! [`AlgoState`](crate::sim::AlgoState).

use crate::common::PageId;

/// One resident page in a policy's table.
///
/// Every field is always present; policies simply ignore the ones they
/// do not consult (`active_list` is only meaningful to LINUX_NG,
/// `ref_bit` only to CLOCK). Each frame is exclusively owned by exactly
/// one slot of exactly one table - policies never share frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The resident page. Unique within the owning table.
    pub page_id: PageId,

    /// Monotonic insertion sequence number (FIFO's eviction key).
    pub loaded_at: u64,

    /// Wall-clock timestamp of the most recent touch.
    pub last_access: u64,

    /// Second-chance reference bit (CLOCK).
    pub ref_bit: bool,

    /// Set on any write; eviction of a dirty frame costs a write-back.
    pub dirty: bool,

    /// Active-list membership (LINUX_NG). New frames start inactive.
    pub active_list: bool,
}

impl Frame {
    /// Create a freshly loaded frame.
    ///
    /// New frames arrive referenced (`ref_bit = true`), on the
    /// inactive list, and dirty only when loaded by a write.
    #[inline]
    pub fn load(page_id: PageId, loaded_at: u64, time: u64, dirty: bool) -> Self {
        Self {
            page_id,
            loaded_at,
            last_access: time,
            ref_bit: true,
            dirty,
            active_list: false,
        }
    }
}
