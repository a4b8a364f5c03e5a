//! LRU (Least Recently Used) victim selection.

use crate::sim::Frame;

/// Select the occupied slot with the minimum `last_access` timestamp.
pub(crate) fn select(frames: &[Option<Frame>]) -> usize {
    frames
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.as_ref().map(|f| (i, f.last_access)))
        .min_by_key(|&(_, last_access)| last_access)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PageId;

    fn frame(page: u32, last_access: u64) -> Option<Frame> {
        Some(Frame {
            page_id: PageId::new(page),
            loaded_at: 0,
            last_access,
            ref_bit: true,
            dirty: false,
            active_list: false,
        })
    }

    #[test]
    fn test_lru_picks_stalest_frame() {
        let frames = vec![frame(10, 8), frame(11, 2), frame(12, 5)];
        assert_eq!(select(&frames), 1);
    }

    #[test]
    fn test_lru_ignores_load_order() {
        let mut frames = vec![frame(10, 1), frame(11, 9)];
        // Loaded earliest but touched latest: must survive.
        frames[0].as_mut().unwrap().loaded_at = 0;
        frames[0].as_mut().unwrap().last_access = 100;
        assert_eq!(select(&frames), 1);
    }

    #[test]
    fn test_lru_skips_empty_slots() {
        let frames = vec![None, frame(11, 7), frame(12, 3)];
        assert_eq!(select(&frames), 2);
    }

    #[test]
    fn test_lru_tie_resolves_to_lowest_slot() {
        let frames = vec![frame(10, 4), frame(11, 4)];
        assert_eq!(select(&frames), 0);
    }
}
