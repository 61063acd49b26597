//! Approximate pattern-in-text scanners.
//!
//! ## Implemented
//!
//! - [`WuManber`]: bit-parallel dynamic programming, one machine word per
//!   error level, O(1) row update per text character for patterns up to 63
//!   characters (longer patterns fall back to a banded row DP)
//! - [`UkkonenAStar`]: A* over the edit-DP graph with the remaining pattern
//!   length as an admissible heuristic
//!
//! Both report [`Match`]es in scalar-value (char) positions with exclusive
//! ends, deduplicated by `(start, end, distance)`.

mod ukkonen;
mod wumanber;

pub use ukkonen::UkkonenAStar;
pub use wumanber::WuManber;

/// A single scanner hit: `text[start..end]` matches the pattern with
/// `distance` errors. Positions count scalar values, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub distance: usize,
}
