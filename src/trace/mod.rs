//! Instruction stream generation.
//!
//! A trace is a finite, ordered sequence of [`Instruction`]s. Order is
//! semantically load-bearing: FIFO, LRU, OPT and CLOCK all depend on
//! access order, so a trace is generated once and then only consumed.
//!
//! Two generators are provided:
//! - [`TraceSource::random_trace`] - a hot/cold mix modeling a skewed
//!   working set
//! - [`TraceSource::anomaly_trace`] - the fixed reference sequence that
//!   reproduces Belady's anomaly under FIFO

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::config::{
    COLD_PAGE_MAX, COLD_WRITE_PROB, HOT_ACCESS_PROB, HOT_PAGE_COUNT, HOT_WRITE_PROB,
};
use crate::common::{Address, PageId};

/// The fixed page sequence demonstrating Belady's anomaly.
///
/// With FIFO replacement this sequence faults 9 times in 3 frames but
/// 10 times in 4 frames.
pub const ANOMALY_PAGES: [u32; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

/// Kind of memory access an instruction performs.
///
/// Writes mark the touched frame dirty, which makes its eventual
/// eviction cost a write-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => write!(f, "R"),
            Operation::Write => write!(f, "W"),
        }
    }
}

/// One memory access: an encoded address plus the operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Encoded address; decode with [`Address::page`].
    pub addr: Address,
    /// Whether the access reads or writes the page.
    pub op: Operation,
}

impl Instruction {
    /// Create a new instruction.
    #[inline]
    pub fn new(addr: Address, op: Operation) -> Self {
        Self { addr, op }
    }

    /// The page this instruction touches.
    #[inline]
    pub fn page(&self) -> PageId {
        self.addr.page()
    }
}

/// Which generator produced the active trace.
///
/// [`PageManager::reset`](crate::sim::PageManager::reset) regenerates
/// the trace according to this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Random hot/cold mix.
    Random,
    /// The fixed Belady anomaly sequence.
    Anomaly,
}

/// Produces instruction sequences.
///
/// Owns a seedable RNG so tests can assert exact traces; production
/// callers construct with [`TraceSource::new`] and get OS entropy.
/// Traces are finite and non-restartable - regeneration requires
/// calling the generator again.
#[derive(Debug)]
pub struct TraceSource {
    rng: StdRng,
    trace_length: usize,
}

impl TraceSource {
    /// Create a trace source seeded from the operating system.
    pub fn new(trace_length: usize) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            trace_length,
        }
    }

    /// Create a trace source with a fixed seed.
    ///
    /// Two sources built with the same seed and length produce the
    /// same sequence of traces.
    pub fn with_seed(trace_length: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            trace_length,
        }
    }

    /// Number of instructions per generated random trace.
    #[inline]
    pub fn trace_length(&self) -> usize {
        self.trace_length
    }

    /// Generate a random hot/cold instruction mix.
    ///
    /// Each instruction is hot with probability 0.8: a page drawn
    /// uniformly from `[0, 40)`, written with probability 0.5. The
    /// rest are cold: a page from `[40, 200]`, written with
    /// probability 0.1 (cold data is read-mostly).
    pub fn random_trace(&mut self) -> Vec<Instruction> {
        (0..self.trace_length)
            .map(|_| {
                let (page, write_prob) = if self.rng.random_bool(HOT_ACCESS_PROB) {
                    (self.rng.random_range(0..HOT_PAGE_COUNT), HOT_WRITE_PROB)
                } else {
                    (
                        self.rng.random_range(HOT_PAGE_COUNT..=COLD_PAGE_MAX),
                        COLD_WRITE_PROB,
                    )
                };
                let op = if self.rng.random_bool(write_prob) {
                    Operation::Write
                } else {
                    Operation::Read
                };
                Instruction::new(Address::from_page(PageId::new(page)), op)
            })
            .collect()
    }

    /// The fixed Belady anomaly sequence, all reads.
    ///
    /// Addresses are `page × 10`; see [`ANOMALY_PAGES`].
    pub fn anomaly_trace() -> Vec<Instruction> {
        ANOMALY_PAGES
            .iter()
            .map(|&p| Instruction::new(Address::from_page(PageId::new(p)), Operation::Read))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_trace_length_and_ranges() {
        let mut source = TraceSource::with_seed(500, 7);
        let trace = source.random_trace();
        assert_eq!(trace.len(), 500);

        for inst in &trace {
            let page = inst.page().0;
            assert!(page <= COLD_PAGE_MAX, "page {} out of range", page);
            // Addresses always decode back to the drawn page.
            assert_eq!(inst.addr.0, page * 10);
        }
    }

    #[test]
    fn test_random_trace_is_deterministic_under_seed() {
        let a = TraceSource::with_seed(200, 42).random_trace();
        let b = TraceSource::with_seed(200, 42).random_trace();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_trace_differs_across_seeds() {
        let a = TraceSource::with_seed(200, 1).random_trace();
        let b = TraceSource::with_seed(200, 2).random_trace();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_trace_mixes_hot_and_cold() {
        let trace = TraceSource::with_seed(2000, 3).random_trace();
        let hot = trace
            .iter()
            .filter(|i| i.page().0 < HOT_PAGE_COUNT)
            .count();
        let cold = trace.len() - hot;

        // With p=0.8 over 2000 draws, both sides are essentially
        // guaranteed to be populated and hot must dominate.
        assert!(hot > cold);
        assert!(cold > 0);
    }

    #[test]
    fn test_anomaly_trace_matches_reference_sequence() {
        let trace = TraceSource::anomaly_trace();
        assert_eq!(trace.len(), 12);

        for (inst, &page) in trace.iter().zip(ANOMALY_PAGES.iter()) {
            assert_eq!(inst.page(), PageId::new(page));
            assert_eq!(inst.addr.0, page * 10);
            assert_eq!(inst.op, Operation::Read);
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", Operation::Read), "R");
        assert_eq!(format!("{}", Operation::Write), "W");
    }
}
