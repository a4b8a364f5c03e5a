//! OPT (Belady optimal) victim selection.
//!
//! Evicts the frame whose page is next used farthest in the future.
//! This needs lookahead no real system has, which is what makes it the
//! theoretical lower bound every other policy is measured against.

use crate::common::PageId;
use crate::sim::Frame;

/// Distance assigned to a page that never appears again.
///
/// Larger than any real index into the future sequence, so
/// never-reused pages are preferred victims.
const NEVER_REUSED: usize = usize::MAX;

/// Select the occupied slot whose page is reused farthest away.
///
/// `future` is the decoded page sequence *after* the instruction being
/// processed. Ties - including several never-reused pages - resolve to
/// the lowest slot index: a candidate only replaces the current best on
/// a strictly greater distance.
pub(crate) fn select(frames: &[Option<Frame>], future: Option<&[PageId]>) -> usize {
    let Some(future) = future else {
        return 0;
    };

    let mut victim = 0;
    let mut max_dist = None;

    for (i, slot) in frames.iter().enumerate() {
        let Some(frame) = slot else { continue };
        let dist = future
            .iter()
            .position(|&p| p == frame.page_id)
            .unwrap_or(NEVER_REUSED);

        if max_dist.is_none_or(|best| dist > best) {
            max_dist = Some(dist);
            victim = i;
        }
    }

    victim
}
