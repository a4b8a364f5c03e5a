//! Configuration constants for Pagelab.

/// Number of distinct "hot" pages.
///
/// Hot pages occupy the id range `[0, HOT_PAGE_COUNT)`. The random trace
/// generator draws from this range with probability [`HOT_ACCESS_PROB`],
/// producing the small, frequently-touched working set that replacement
/// policies are supposed to keep resident.
pub const HOT_PAGE_COUNT: u32 = 40;

/// Largest "cold" page id (inclusive).
///
/// Cold pages occupy `[HOT_PAGE_COUNT, COLD_PAGE_MAX]` and are drawn
/// rarely, standing in for the long tail of a working set.
pub const COLD_PAGE_MAX: u32 = 200;

/// Probability that a random instruction touches a hot page.
pub const HOT_ACCESS_PROB: f64 = 0.8;

/// Probability that a hot access is a write.
pub const HOT_WRITE_PROB: f64 = 0.5;

/// Probability that a cold access is a write.
///
/// Cold data is mostly read-only, so this is much lower than
/// [`HOT_WRITE_PROB`].
pub const COLD_WRITE_PROB: f64 = 0.1;

/// Stride between consecutive page addresses.
///
/// Instructions carry an [`Address`](crate::common::Address) equal to
/// `page_id × ADDRESS_STRIDE`; decoding divides back down. The classical
/// Belady demonstration is defined over this encoding, so it is preserved
/// exactly.
pub const ADDRESS_STRIDE: u32 = 10;

/// Default number of instructions in a generated trace.
pub const DEFAULT_TRACE_LENGTH: usize = 2000;

/// Default size of the simulated page space.
pub const DEFAULT_PAGE_SPACE: u32 = 32;

/// Default number of frames in each policy's table.
pub const DEFAULT_CAPACITY: usize = 4;
