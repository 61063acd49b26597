//! A* search over the edit-DP graph, one episode per text start position.

use super::Match;
use crate::error::{MatchError, Result};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Approximate scanner that runs A* from every text position.
///
/// States are `(i, j)` pairs of pattern and text indices; a match move
/// costs 0 and insert/delete/substitute cost 1. The heuristic is the
/// remaining pattern length `|pattern| − i`, which never overestimates, so
/// the first goal popped per start position carries the minimal distance.
#[derive(Debug, Clone)]
pub struct UkkonenAStar {
    pattern: Vec<char>,
    max_dist: usize,
}

/// Open-list entry ordered by ascending `f = g + h`, ties broken toward
/// larger `g` to prefer deeper nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    f: usize,
    g: usize,
    i: usize,
    j: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl UkkonenAStar {
    /// Compile a non-empty pattern with an error budget.
    pub fn new(pattern: &str, max_dist: usize) -> Result<Self> {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() {
            return Err(MatchError::EmptyPattern);
        }
        Ok(Self { pattern, max_dist })
    }

    /// All matches with distance ≤ the budget, deduplicated by
    /// `(start, end, distance)`. Positions count scalar values.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<Match> {
        let text: Vec<char> = text.chars().collect();
        let (m, n) = (self.pattern.len(), text.len());

        let mut matches = Vec::new();
        let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();

        for start in 0..n {
            let mut open = BinaryHeap::new();
            open.push(State {
                f: m,
                g: 0,
                i: 0,
                j: start,
            });
            let mut visited: HashSet<(usize, usize)> = HashSet::new();

            while let Some(state) = open.pop() {
                if state.g > self.max_dist {
                    continue;
                }

                if state.i == m {
                    if seen.insert((start, state.j, state.g)) {
                        matches.push(Match {
                            start,
                            end: state.j,
                            distance: state.g,
                        });
                    }
                    break;
                }

                if !visited.insert((state.i, state.j)) {
                    continue;
                }

                // Free match move along the diagonal.
                if state.j < n && text[state.j] == self.pattern[state.i] {
                    open.push(self.successor(state.i + 1, state.j + 1, state.g));
                }

                if state.g < self.max_dist {
                    // Delete from the pattern.
                    open.push(self.successor(state.i + 1, state.j, state.g + 1));
                    // Insert a text character.
                    if state.j < n {
                        open.push(self.successor(state.i, state.j + 1, state.g + 1));
                    }
                    // Substitute.
                    if state.j < n {
                        open.push(self.successor(state.i + 1, state.j + 1, state.g + 1));
                    }
                }
            }
        }

        matches
    }

    fn successor(&self, i: usize, j: usize, g: usize) -> State {
        let h = self.pattern.len() - i;
        State { f: g + h, g, i, j }
    }
}
