//! Replacement policy implementations.
//!
//! [`Policy`] is a closed enum - victim selection dispatches by `match`
//! with one implementation per variant, so there is no default
//! fallthrough to silently mis-handle an unknown policy name.
//!
//! Implemented disciplines:
//! - [`fifo`] - evict the longest-resident frame
//! - [`lru`] - evict the least recently touched frame
//! - [`opt`] - Belady optimal, evict the page used farthest in the future
//! - [`clock`] - second chance via a circulating hand and reference bits
//! - [`linux_ng`] - two-list (active/inactive) LRU approximation

pub(crate) mod clock;
pub(crate) mod fifo;
pub(crate) mod linux_ng;
pub(crate) mod lru;
pub(crate) mod opt;

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, PageId};
use crate::sim::Frame;

/// The five fixed replacement policies.
///
/// Identity is immutable after an
/// [`AlgoState`](crate::sim::AlgoState) is constructed. The `Ord`
/// derive follows declaration order, which is also the deterministic
/// order the [`PageManager`](crate::sim::PageManager) feeds policies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Policy {
    /// First-in-first-out.
    Fifo,
    /// Least recently used.
    Lru,
    /// Belady optimal (requires lookahead).
    Opt,
    /// Second chance with a circulating hand.
    Clock,
    /// Active/inactive two-list approximation.
    LinuxNg,
}

impl Policy {
    /// Every policy, in the fixed fan-out order.
    pub const ALL: [Policy; 5] = [
        Policy::Fifo,
        Policy::Lru,
        Policy::Opt,
        Policy::Clock,
        Policy::LinuxNg,
    ];

    /// Canonical identifier for this policy.
    pub fn name(self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::Lru => "LRU",
            Policy::Opt => "OPT",
            Policy::Clock => "CLOCK",
            Policy::LinuxNg => "LINUX_NG",
        }
    }

    /// Whether victim selection needs the future page sequence.
    ///
    /// Only OPT looks ahead; everyone else decides from resident state.
    #[inline]
    pub fn needs_lookahead(self) -> bool {
        matches!(self, Policy::Opt)
    }

    /// Select a victim slot from a full table.
    ///
    /// Only CLOCK mutates state here (reference bits); every other
    /// policy is a pure scan. `future` is consulted only by OPT.
    pub(crate) fn select_victim(
        self,
        frames: &mut [Option<Frame>],
        clock_hand: usize,
        future: Option<&[PageId]>,
    ) -> usize {
        match self {
            Policy::Fifo => fifo::select(frames),
            Policy::Lru => lru::select(frames),
            Policy::Opt => opt::select(frames, future),
            Policy::Clock => clock::select(frames, clock_hand),
            Policy::LinuxNg => linux_ng::select(frames),
        }
    }

    /// Project the victim slot without mutating anything.
    ///
    /// For CLOCK this is a dry-run scan that leaves reference bits and
    /// the hand untouched; the other policies' rules are already
    /// side-effect-free and are simply reused.
    pub(crate) fn peek_victim(
        self,
        frames: &[Option<Frame>],
        clock_hand: usize,
        future: Option<&[PageId]>,
    ) -> usize {
        match self {
            Policy::Fifo => fifo::select(frames),
            Policy::Lru => lru::select(frames),
            Policy::Opt => opt::select(frames, future),
            Policy::Clock => clock::peek(frames, clock_hand),
            Policy::LinuxNg => linux_ng::select(frames),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = Error;

    /// Parse a canonical policy identifier.
    ///
    /// Anything but the five fixed names is rejected - selection must
    /// fail fast rather than silently substituting a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIFO" => Ok(Policy::Fifo),
            "LRU" => Ok(Policy::Lru),
            "OPT" => Ok(Policy::Opt),
            "CLOCK" => Ok(Policy::Clock),
            "LINUX_NG" => Ok(Policy::LinuxNg),
            other => Err(Error::UnknownPolicy(other.to_string())),
        }
    }
}
