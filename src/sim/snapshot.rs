//! Read-only per-slot projections for presentation layers.

use crate::common::PageId;
use crate::sim::{Frame, Policy};

/// What one occupied slot looks like from the outside.
///
/// The annotation is policy-specific: FIFO shows the insertion
/// sequence, LRU the idle time, CLOCK the reference bit, LINUX_NG the
/// list membership plus idle time, and OPT a fixed tag (it has no
/// per-frame state worth showing). A dirty frame shows `DIRTY`
/// regardless of policy, since the pending write-back is the most
/// important thing about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    /// The resident page.
    pub page_id: PageId,

    /// Policy-specific metadata text.
    pub annotation: String,

    /// True only for CLOCK's current hand position.
    pub is_hand: bool,

    /// Whether the frame has a pending write-back.
    pub is_dirty: bool,

    /// Whether the frame sits on LINUX_NG's active list.
    pub is_active_list: bool,
}

impl FrameView {
    /// Project one occupied slot. Read-only; cannot fail.
    pub(crate) fn project(policy: Policy, frame: &Frame, time: u64, is_hand: bool) -> Self {
        let annotation = if frame.dirty {
            "DIRTY".to_string()
        } else {
            match policy {
                Policy::Fifo => format!("SEQ:{}", frame.loaded_at),
                Policy::Lru => format!("IDLE:{}", time - frame.last_access),
                Policy::Opt => "OPT".to_string(),
                Policy::Clock => format!("REF:{}", u8::from(frame.ref_bit)),
                Policy::LinuxNg => {
                    let list = if frame.active_list { "ACT" } else { "INA" };
                    format!("{}:{}", list, time - frame.last_access)
                }
            }
        };

        Self {
            page_id: frame.page_id,
            annotation,
            is_hand,
            is_dirty: frame.dirty,
            is_active_list: frame.active_list,
        }
    }
}
