//! Two-list (active/inactive) victim selection.
//!
//! Approximates the Linux page cache's split between an active list of
//! proven-hot frames and an inactive list of everything else. Eviction
//! drains the inactive list first; the active list is only raided when
//! nothing inactive remains.

use crate::sim::Frame;

/// Select a victim, preferring inactive frames.
///
/// Among the preferred pool (inactive frames, or all frames when the
/// whole table is active) the minimum `last_access` wins, so each list
/// is itself evicted in LRU order.
pub(crate) fn select(frames: &[Option<Frame>]) -> usize {
    let occupied = || {
        frames
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|f| (i, f)))
    };

    let has_inactive = occupied().any(|(_, f)| !f.active_list);

    occupied()
        .filter(|(_, f)| !has_inactive || !f.active_list)
        .min_by_key(|&(_, f)| f.last_access)
        .map(|(i, _)| i)
        .unwrap_or(0)
}
