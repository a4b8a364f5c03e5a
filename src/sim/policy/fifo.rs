//! FIFO (First-In-First-Out) victim selection.
//!
//! Evicts the longest-resident frame, ignoring how recently (or how
//! often) it was touched. This indifference to reuse is exactly what
//! makes FIFO exhibit Belady's anomaly.

use crate::sim::Frame;

/// Select the occupied slot with the minimum insertion sequence number.
///
/// Ties cannot occur: `loaded_at` is strictly increasing across misses.
pub(crate) fn select(frames: &[Option<Frame>]) -> usize {
    frames
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().map(|f| (i, f.loaded_at)))
        .min_by_key(|&(_, loaded_at)| loaded_at)
        .map(|(i, _)| i)
        .unwrap_or(0)
}
