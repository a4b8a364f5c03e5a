//! CLOCK (second chance) victim selection.
//!
//! A hand circulates over the frame table. Frames with their reference
//! bit set get a second chance: the bit is cleared and the hand moves
//! on. The first frame found with a clear bit is the victim.

use crate::sim::Frame;

/// Select a victim by scanning from the hand, clearing reference bits.
///
/// The hand itself is re-parked by the owning state machine after the
/// replacement lands, so only the bits are mutated here. The scan is
/// bounded to `2 * capacity + 1` visits. A full table of set bits is
/// drained within one lap, so the bound never binds in practice; if it
/// somehow does, the last-visited slot is returned as a safety valve
/// rather than looping forever.
pub(crate) fn select(frames: &mut [Option<Frame>], hand: usize) -> usize {
    let capacity = frames.len();
    let mut pos = hand;

    for _ in 0..(2 * capacity + 1) {
        let Some(frame) = frames[pos].as_mut() else {
            // An empty slot needs no second chance.
            return pos;
        };

        if frame.ref_bit {
            frame.ref_bit = false;
            pos = (pos + 1) % capacity;
        } else {
            return pos;
        }
    }

    pos
}

/// Dry-run projection of [`select`].
///
/// Performs the same circular scan but leaves reference bits and the
/// hand untouched, so predictions do not perturb the simulation. With
/// every bit set the scan exhausts its bound and lands back on the
/// hand - the same slot the real scan would evict after clearing.
pub(crate) fn peek(frames: &[Option<Frame>], hand: usize) -> usize {
    let capacity = frames.len();
    let mut pos = hand;

    for _ in 0..(2 * capacity) {
        let clear = frames[pos].as_ref().is_none_or(|f| !f.ref_bit);
        if clear {
            return pos;
        }
        pos = (pos + 1) % capacity;
    }

    pos
}
