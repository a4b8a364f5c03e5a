//! PageManager - drives one trace through every policy in lockstep.
//!
//! The [`PageManager`] owns the instruction trace, a wall clock, and
//! one [`AlgoState`](crate::sim::AlgoState) per policy. Each
//! [`step`](PageManager::step) feeds the identical `(page, op, time)`
//! to all five policies, so the per-policy outcomes in a
//! [`StepReport`] are directly comparable.

use std::collections::BTreeMap;

use crate::common::{Address, Error, PageId, Result};
use crate::sim::{AccessStatus, AlgoState, FrameView, Policy};
use crate::trace::{Instruction, Operation, TraceMode, TraceSource};

/// One policy's share of a [`StepReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyStepResult {
    /// Hit or miss for this instruction.
    pub status: AccessStatus,
    /// Page evicted this step, if any.
    pub evicted: Option<PageId>,
    /// Whether the eviction cost a write-back.
    pub write_back: bool,
    /// Cumulative miss rate in percent (0.0 before any access).
    pub miss_rate: f64,
    /// Cumulative miss count.
    pub miss_count: u64,
    /// Cumulative write-back count.
    pub write_back_count: u64,
}

/// Everything a presentation layer needs about one simulation step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// The raw encoded instruction address.
    pub addr: Address,
    /// The decoded page id.
    pub page_id: PageId,
    /// Read or write.
    pub op: Operation,
    /// Per-policy outcomes, keyed in the fixed [`Policy::ALL`] order.
    pub results: BTreeMap<Policy, PolicyStepResult>,
    /// The policy whose table is projected below.
    pub view_policy: Policy,
    /// The view policy's table, one entry per slot.
    pub memory: Vec<Option<FrameView>>,
    /// The view policy's projected next victim slot, if the table is full.
    pub next_victim: Option<usize>,
    /// Cursor position after this step (== number of consumed instructions).
    pub cursor: usize,
}

/// Orchestrates the lockstep simulation.
///
/// # Usage
/// ```
/// use pagelab::sim::{PageManager, Policy};
///
/// let mut pm = PageManager::with_seed(100, 32, 4, 1).unwrap();
/// pm.set_view_policy(Policy::Clock);
///
/// let mut steps = 0;
/// while pm.step().is_some() {
///     steps += 1;
/// }
/// assert_eq!(steps, 100);
/// ```
#[derive(Debug)]
pub struct PageManager {
    /// Frames per policy table. Immutable after construction.
    capacity: usize,

    /// Size of the simulated page id space. Immutable after construction.
    page_space: u32,

    /// Regenerates traces on [`reset`](PageManager::reset).
    source: TraceSource,

    /// Which generator produced the active trace.
    mode: TraceMode,

    /// The active trace. Immutable between resets.
    instructions: Vec<Instruction>,

    /// Next unconsumed instruction index.
    cursor: usize,

    /// Shared timestamp; bumps once per processed instruction.
    wall_clock: u64,

    /// One state machine per policy, keyed in deterministic order.
    algos: BTreeMap<Policy, AlgoState>,

    /// Which policy's snapshot/prediction the report carries.
    view_policy: Policy,
}

impl PageManager {
    /// Create a manager with an OS-seeded random trace.
    ///
    /// # Errors
    /// Fails fast on a zero `trace_length`, `page_space` or `capacity`
    /// rather than silently substituting defaults.
    ///
    /// # Example
    /// ```
    /// use pagelab::common::config::{DEFAULT_CAPACITY, DEFAULT_PAGE_SPACE, DEFAULT_TRACE_LENGTH};
    /// use pagelab::sim::PageManager;
    ///
    /// let pm = PageManager::new(DEFAULT_TRACE_LENGTH, DEFAULT_PAGE_SPACE, DEFAULT_CAPACITY).unwrap();
    /// assert_eq!(pm.trace().len(), DEFAULT_TRACE_LENGTH);
    ///
    /// assert!(PageManager::new(0, 32, 4).is_err());
    /// ```
    pub fn new(trace_length: usize, page_space: u32, capacity: usize) -> Result<Self> {
        Self::with_source(TraceSource::new(trace_length), page_space, capacity)
    }

    /// Create a manager whose traces are reproducible from `seed`.
    pub fn with_seed(
        trace_length: usize,
        page_space: u32,
        capacity: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::with_source(TraceSource::with_seed(trace_length, seed), page_space, capacity)
    }

    fn with_source(mut source: TraceSource, page_space: u32, capacity: usize) -> Result<Self> {
        if source.trace_length() == 0 {
            return Err(Error::InvalidTraceLength(0));
        }
        if page_space == 0 {
            return Err(Error::InvalidPageSpace(0));
        }
        if capacity == 0 {
            return Err(Error::InvalidCapacity(0));
        }

        let instructions = source.random_trace();
        let algos = Policy::ALL
            .iter()
            .map(|&policy| (policy, AlgoState::new(policy, capacity)))
            .collect();

        Ok(Self {
            capacity,
            page_space,
            source,
            mode: TraceMode::Random,
            instructions,
            cursor: 0,
            wall_clock: 0,
            algos,
            view_policy: Policy::Fifo,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Frames per policy table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of the simulated page id space.
    #[inline]
    pub fn page_space(&self) -> u32 {
        self.page_space
    }

    /// Instructions per generated random trace.
    #[inline]
    pub fn trace_length(&self) -> usize {
        self.source.trace_length()
    }

    /// The active trace.
    #[inline]
    pub fn trace(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Next unconsumed instruction index.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The shared timestamp, bumped once per processed instruction.
    #[inline]
    pub fn wall_clock(&self) -> u64 {
        self.wall_clock
    }

    /// Which generator produced the active trace.
    #[inline]
    pub fn mode(&self) -> TraceMode {
        self.mode
    }

    /// The policy whose snapshot/prediction reports carry.
    #[inline]
    pub fn view_policy(&self) -> Policy {
        self.view_policy
    }

    /// One policy's state machine.
    pub fn algo(&self, policy: Policy) -> &AlgoState {
        &self.algos[&policy]
    }

    // ========================================================================
    // View selection
    // ========================================================================

    /// Select which policy's snapshot and prediction `step()` returns.
    ///
    /// Affects reporting only - the simulation itself always runs all
    /// five policies.
    pub fn set_view_policy(&mut self, policy: Policy) {
        self.view_policy = policy;
    }

    /// Select the view policy by its canonical identifier.
    ///
    /// # Errors
    /// [`Error::UnknownPolicy`] for anything but the five fixed names.
    pub fn select_view_policy(&mut self, name: &str) -> Result<()> {
        self.view_policy = name.parse()?;
        Ok(())
    }

    // ========================================================================
    // Trace control
    // ========================================================================

    /// Swap in the fixed Belady anomaly sequence and restart the run.
    ///
    /// Resets every policy state and the cursor; `capacity` and
    /// `page_space` are unchanged. The wall clock keeps running -
    /// policies only compare timestamps relatively, so the offset is
    /// harmless.
    pub fn load_fixed_anomaly_sequence(&mut self) {
        self.mode = TraceMode::Anomaly;
        self.instructions = TraceSource::anomaly_trace();
        self.cursor = 0;
        self.reset_algos();
    }

    /// Regenerate the trace per the current mode and restart everything.
    ///
    /// Counters, tables, cursor and wall clock return to zero;
    /// `capacity`, `page_space`, `trace_length` and the view selection
    /// are preserved.
    pub fn reset(&mut self) {
        self.instructions = match self.mode {
            TraceMode::Random => self.source.random_trace(),
            TraceMode::Anomaly => TraceSource::anomaly_trace(),
        };
        self.cursor = 0;
        self.wall_clock = 0;
        self.reset_algos();
    }

    /// Reinitialize every policy state, leaving trace and cursor alone.
    pub fn reset_algos(&mut self) {
        for algo in self.algos.values_mut() {
            algo.reset();
        }
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Advance the simulation by one instruction.
    ///
    /// Feeds the identical `(page, op, wall_clock)` to every policy in
    /// [`Policy::ALL`] order, then assembles the report for the current
    /// view policy. Returns `None` once the trace is exhausted; an
    /// exhausted step mutates nothing.
    pub fn step(&mut self) -> Option<StepReport> {
        let inst = *self.instructions.get(self.cursor)?;
        let page_id = inst.page();
        self.wall_clock += 1;

        // The decoded suffix after the current instruction. Computed
        // lazily, at most once per step - only OPT consumes it.
        let mut future: Option<Vec<PageId>> = None;
        let instructions = &self.instructions;
        let cursor = self.cursor;

        let mut results = BTreeMap::new();
        for (&policy, algo) in self.algos.iter_mut() {
            let lookahead = if policy.needs_lookahead() {
                if future.is_none() {
                    future = Some(decode_suffix(instructions, cursor + 1));
                }
                future.as_deref()
            } else {
                None
            };

            let outcome = algo.process(page_id, inst.op, self.wall_clock, lookahead);
            let stats = algo.stats();
            results.insert(
                policy,
                PolicyStepResult {
                    status: outcome.status,
                    evicted: outcome.evicted,
                    write_back: outcome.write_back,
                    miss_rate: stats.miss_rate(),
                    miss_count: stats.miss_count,
                    write_back_count: stats.write_back_count,
                },
            );
        }

        self.cursor += 1;

        // Prediction for the view policy. The suffix after the consumed
        // instruction is exactly the one OPT already saw, so reuse it.
        let view = &self.algos[&self.view_policy];
        let pred_future = if self.view_policy.needs_lookahead() {
            Some(future.unwrap_or_else(|| decode_suffix(&self.instructions, self.cursor)))
        } else {
            None
        };

        let next_victim = view.predict_next_victim(pred_future.as_deref());
        let memory = view.snapshot(self.wall_clock);

        Some(StepReport {
            addr: inst.addr,
            page_id,
            op: inst.op,
            results,
            view_policy: self.view_policy,
            memory,
            next_victim,
            cursor: self.cursor,
        })
    }
}

/// Decode the page sequence of `instructions[from..]`.
fn decode_suffix(instructions: &[Instruction], from: usize) -> Vec<PageId> {
    instructions[from..].iter().map(|i| i.page()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(capacity: usize) -> PageManager {
        PageManager::with_seed(50, 32, capacity, 99).unwrap()
    }

    #[test]
    fn test_construction_rejects_zero_config() {
        assert_eq!(
            PageManager::new(0, 32, 4).unwrap_err(),
            Error::InvalidTraceLength(0)
        );
        assert_eq!(
            PageManager::new(100, 0, 4).unwrap_err(),
            Error::InvalidPageSpace(0)
        );
        assert_eq!(
            PageManager::new(100, 32, 0).unwrap_err(),
            Error::InvalidCapacity(0)
        );
    }

    #[test]
    fn test_initial_state() {
        let pm = manager(4);
        assert_eq!(pm.cursor(), 0);
        assert_eq!(pm.wall_clock(), 0);
        assert_eq!(pm.view_policy(), Policy::Fifo);
        assert_eq!(pm.mode(), TraceMode::Random);
        assert_eq!(pm.trace().len(), 50);
        for policy in Policy::ALL {
            assert_eq!(pm.algo(policy).stats().total_count, 0);
        }
    }

    #[test]
    fn test_step_reports_decoded_instruction() {
        let mut pm = manager(4);
        let first = pm.trace()[0];

        let report = pm.step().unwrap();
        assert_eq!(report.addr, first.addr);
        assert_eq!(report.page_id, first.page());
        assert_eq!(report.op, first.op);
        assert_eq!(report.cursor, 1);
    }

    #[test]
    fn test_step_feeds_every_policy() {
        let mut pm = manager(4);
        let report = pm.step().unwrap();

        assert_eq!(report.results.len(), Policy::ALL.len());
        for policy in Policy::ALL {
            assert_eq!(pm.algo(policy).stats().total_count, 1);
        }
        // First access of an empty table faults everywhere.
        for result in report.results.values() {
            assert_eq!(result.status, AccessStatus::Miss);
            assert_eq!(result.miss_count, 1);
            assert_eq!(result.miss_rate, 100.0);
        }
    }

    #[test]
    fn test_wall_clock_ticks_once_per_step() {
        let mut pm = manager(4);
        pm.step();
        pm.step();
        assert_eq!(pm.wall_clock(), 2);
    }

    #[test]
    fn test_exhaustion_returns_none_without_mutation() {
        let mut pm = manager(4);
        while pm.step().is_some() {}

        let cursor = pm.cursor();
        let clock = pm.wall_clock();
        let totals: Vec<u64> = Policy::ALL
            .iter()
            .map(|&p| pm.algo(p).stats().total_count)
            .collect();

        assert!(pm.step().is_none());
        assert!(pm.step().is_none());

        assert_eq!(pm.cursor(), cursor);
        assert_eq!(pm.wall_clock(), clock);
        let totals_after: Vec<u64> = Policy::ALL
            .iter()
            .map(|&p| pm.algo(p).stats().total_count)
            .collect();
        assert_eq!(totals, totals_after);
    }

    #[test]
    fn test_policies_stay_in_lockstep() {
        let mut pm = manager(3);
        for _ in 0..20 {
            pm.step();
        }
        for policy in Policy::ALL {
            assert_eq!(pm.algo(policy).stats().total_count, 20);
        }
    }

    #[test]
    fn test_view_policy_selection() {
        let mut pm = manager(4);
        pm.set_view_policy(Policy::Clock);

        let report = pm.step().unwrap();
        assert_eq!(report.view_policy, Policy::Clock);
        assert_eq!(report.memory.len(), 4);
    }

    #[test]
    fn test_view_selection_by_name_fails_fast() {
        let mut pm = manager(4);
        pm.select_view_policy("LRU").unwrap();
        assert_eq!(pm.view_policy(), Policy::Lru);

        let err = pm.select_view_policy("RANDOM").unwrap_err();
        assert_eq!(err, Error::UnknownPolicy("RANDOM".to_string()));
        // Failed selection leaves the previous view in place.
        assert_eq!(pm.view_policy(), Policy::Lru);
    }

    #[test]
    fn test_view_does_not_affect_simulation() {
        let mut a = manager(3);
        let mut b = manager(3);
        b.set_view_policy(Policy::Opt);

        while let (Some(_), Some(_)) = (a.step(), b.step()) {}

        for policy in Policy::ALL {
            assert_eq!(
                a.algo(policy).stats().miss_count,
                b.algo(policy).stats().miss_count
            );
        }
    }

    #[test]
    fn test_load_anomaly_sequence() {
        let mut pm = manager(3);
        for _ in 0..10 {
            pm.step();
        }

        pm.load_fixed_anomaly_sequence();

        assert_eq!(pm.mode(), TraceMode::Anomaly);
        assert_eq!(pm.trace().len(), 12);
        assert_eq!(pm.cursor(), 0);
        assert_eq!(pm.capacity(), 3);
        assert_eq!(pm.page_space(), 32);
        for policy in Policy::ALL {
            assert_eq!(pm.algo(policy).stats().total_count, 0);
            assert_eq!(pm.algo(policy).occupied_count(), 0);
        }
    }

    #[test]
    fn test_reset_preserves_mode() {
        let mut pm = manager(3);
        pm.load_fixed_anomaly_sequence();
        while pm.step().is_some() {}

        pm.reset();

        assert_eq!(pm.mode(), TraceMode::Anomaly);
        assert_eq!(pm.trace().len(), 12);
        assert_eq!(pm.cursor(), 0);
        assert_eq!(pm.wall_clock(), 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut pm = manager(3);
        for _ in 0..10 {
            pm.step();
        }

        pm.reset();
        let trace_after_one = pm.trace().to_vec();
        let snapshot_one = (pm.cursor(), pm.wall_clock());

        // A second reset must leave the same observable state (the
        // regenerated trace differs - randomness - but every counter,
        // cursor and table is identical).
        pm.reset();
        assert_eq!((pm.cursor(), pm.wall_clock()), snapshot_one);
        for policy in Policy::ALL {
            assert_eq!(pm.algo(policy).stats().total_count, 0);
            assert_eq!(pm.algo(policy).occupied_count(), 0);
            assert_eq!(pm.algo(policy).clock_hand(), 0);
        }
        assert_eq!(pm.trace().len(), trace_after_one.len());
    }

    #[test]
    fn test_reset_algos_leaves_trace_and_cursor() {
        let mut pm = manager(3);
        pm.step();
        pm.step();
        let trace_before = pm.trace().to_vec();

        pm.reset_algos();

        assert_eq!(pm.cursor(), 2);
        assert_eq!(pm.trace(), &trace_before[..]);
        for policy in Policy::ALL {
            assert_eq!(pm.algo(policy).stats().total_count, 0);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let run = |seed: u64| {
            let mut pm = PageManager::with_seed(200, 32, 4, seed).unwrap();
            while pm.step().is_some() {}
            Policy::ALL.map(|p| pm.algo(p).stats().miss_count)
        };

        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_opt_view_reports_prediction_once_full() {
        let mut pm = manager(2);
        pm.set_view_policy(Policy::Opt);

        let first = pm.step().unwrap();
        // One slot still free: no pressure, no prediction.
        assert_eq!(first.next_victim, None);

        let mut last = None;
        while let Some(report) = pm.step() {
            last = Some(report);
        }
        let last = last.unwrap();
        // Table has been full for a long time; prediction must point
        // at a real slot.
        assert!(last.next_victim.unwrap() < 2);
    }
}
