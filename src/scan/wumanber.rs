//! Wu–Manber bit-parallel approximate scanner.
//!
//! The DP row for each error level `k` lives in one 64-bit word `R[k]`,
//! bit `i` cleared when some match of `pattern[0..=i]` with ≤ k errors ends
//! at the current text position. One character costs one shift-and-mask
//! update per error level, so the scan is O(text · max_errors) regardless
//! of pattern length — up to the 63-character word-width cap, beyond which
//! search falls back to a banded row DP.
//!
//! # References
//!
//! - Wu & Manber (1992). "Fast text searching allowing errors"

use super::Match;
use crate::error::{MatchError, Result};
use std::collections::{HashMap, HashSet};

/// Longest pattern the single-word bit-parallel path can handle: the match
/// bit must stay below the shift.
const BIT_PARALLEL_MAX: usize = 63;

/// Approximate scanner for one pattern over arbitrary texts.
#[derive(Debug, Clone)]
pub struct WuManber {
    pattern: Vec<char>,
    alphabet: HashMap<char, usize>,
    /// Per alphabet ordinal: bit `i` cleared iff `pattern[i] == c`. Empty
    /// when the pattern is too long for the bit-parallel path.
    masks: Vec<u64>,
}

impl WuManber {
    /// Compile a non-empty pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() {
            return Err(MatchError::EmptyPattern);
        }

        let mut alphabet = HashMap::new();
        for &ch in &pattern {
            let next = alphabet.len();
            alphabet.entry(ch).or_insert(next);
        }

        let masks = if pattern.len() <= BIT_PARALLEL_MAX {
            let mut masks = vec![!0u64; alphabet.len()];
            for (i, ch) in pattern.iter().enumerate() {
                masks[alphabet[ch]] &= !(1u64 << i);
            }
            masks
        } else {
            Vec::new()
        };

        Ok(Self {
            pattern,
            alphabet,
            masks,
        })
    }

    /// All matches of the pattern in `text` with at most `max_errors`
    /// edits, deduplicated by `(start, end, distance)`.
    #[must_use]
    pub fn search(&self, text: &str, max_errors: usize) -> Vec<Match> {
        let text: Vec<char> = text.chars().collect();
        if max_errors == 0 {
            self.exact_search(&text)
        } else if self.pattern.len() <= BIT_PARALLEL_MAX {
            self.bit_parallel_search(&text, max_errors)
        } else {
            self.dp_search(&text, max_errors)
        }
    }

    /// Naive scalar scan; handles arbitrarily long patterns.
    fn exact_search(&self, text: &[char]) -> Vec<Match> {
        let m = self.pattern.len();
        if text.len() < m {
            return Vec::new();
        }

        (0..=text.len() - m)
            .filter(|&i| text[i..i + m] == self.pattern[..])
            .map(|i| Match {
                start: i,
                end: i + m,
                distance: 0,
            })
            .collect()
    }

    fn bit_parallel_search(&self, text: &[char], max_errors: usize) -> Vec<Match> {
        let m = self.pattern.len();
        let match_bit = 1u64 << (m - 1);

        let mut matches = Vec::new();
        let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();

        // R[k] starts with the low k bits cleared: a prefix of length k is
        // reachable with k deletions before any text is read.
        let mut r: Vec<u64> = (0..=max_errors)
            .map(|k| !((1u64 << k) - 1))
            .collect();

        for (j, &c) in text.iter().enumerate() {
            let char_mask = self
                .alphabet
                .get(&c)
                .map_or(!0u64, |&idx| self.masks[idx]);

            let mut old_r = r[0];
            r[0] = ((r[0] << 1) | 1) & char_mask;

            for k in 1..=max_errors {
                let tmp = r[k];
                r[k] = ((r[k] << 1) & char_mask) | old_r | ((old_r | r[k - 1]) << 1) | 1;
                old_r = tmp;
            }

            for (k, &rk) in r.iter().enumerate() {
                if rk & match_bit == 0 {
                    let start = (j + 1).saturating_sub(m);
                    if seen.insert((start, j + 1, k)) {
                        matches.push(Match {
                            start,
                            end: j + 1,
                            distance: k,
                        });
                    }
                    break;
                }
            }
        }

        matches
    }

    /// Banded Sellers row DP for patterns past the word width. Tracks the
    /// text index where each alignment began, so starts are exact rather
    /// than clamped.
    fn dp_search(&self, text: &[char], max_errors: usize) -> Vec<Match> {
        let m = self.pattern.len();
        let mut matches = Vec::new();
        let mut seen: HashSet<(usize, usize, usize)> = HashSet::new();

        let mut prev: Vec<usize> = (0..=m).collect();
        let mut curr: Vec<usize> = vec![0; m + 1];
        let mut prev_start: Vec<usize> = vec![0; m + 1];
        let mut curr_start: Vec<usize> = vec![0; m + 1];

        for (j, &c) in text.iter().enumerate() {
            curr[0] = 0;
            curr_start[0] = j + 1;

            for i in 1..=m {
                let cost = usize::from(self.pattern[i - 1] != c);

                let diagonal = prev[i - 1] + cost;
                let insertion = prev[i] + 1;
                let deletion = curr[i - 1] + 1;

                if diagonal <= insertion && diagonal <= deletion {
                    curr[i] = diagonal;
                    curr_start[i] = prev_start[i - 1];
                } else if insertion <= deletion {
                    curr[i] = insertion;
                    curr_start[i] = prev_start[i];
                } else {
                    curr[i] = deletion;
                    curr_start[i] = curr_start[i - 1];
                }
            }

            if curr[m] <= max_errors && seen.insert((curr_start[m], j + 1, curr[m])) {
                matches.push(Match {
                    start: curr_start[m],
                    end: j + 1,
                    distance: curr[m],
                });
            }

            std::mem::swap(&mut prev, &mut curr);
            std::mem::swap(&mut prev_start, &mut curr_start);
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pattern() {
        assert!(matches!(WuManber::new(""), Err(MatchError::EmptyPattern)));
    }

    #[test]
    fn exact_match_at_start() {
        let wm = WuManber::new("hello").unwrap();
        let matches = wm.search("hello world", 0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0], Match { start: 0, end: 5, distance: 0 });
    }

    #[test]
    fn exact_match_twice() {
        let wm = WuManber::new("hello").unwrap();
        let matches = wm.search("hello hello", 0);
        let starts: Vec<usize> = matches.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 6]);
    }

    #[test]
    fn one_deletion_is_found() {
        let wm = WuManber::new("hello").unwrap();
        let matches = wm.search("helo world", 1);
        assert!(!matches.is_empty());
        assert!(
            matches.iter().any(|m| m.start <= 1 && m.distance == 1),
            "got {matches:?}"
        );
    }

    #[test]
    fn one_substitution_is_found() {
        let wm = WuManber::new("hello").unwrap();
        let matches = wm.search("hllo world", 1);
        assert!(matches.iter().any(|m| m.distance == 1), "got {matches:?}");
    }

    #[test]
    fn no_match_beyond_budget() {
        let wm = WuManber::new("hello").unwrap();
        assert!(wm.search("xyzzy", 1).is_empty());
    }

    #[test]
    fn results_are_deduplicated() {
        let wm = WuManber::new("hello").unwrap();
        let matches = wm.search("hello hello", 2);
        let mut keys: Vec<(usize, usize, usize)> = matches
            .iter()
            .map(|m| (m.start, m.end, m.distance))
            .collect();
        let before = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn long_pattern_falls_back_to_dp() {
        let pattern: String = "abcdefghij".repeat(7); // 70 chars, past the word width
        let wm = WuManber::new(&pattern).unwrap();

        let mut text = String::from("zz");
        text.push_str(&pattern);
        text.push_str("zz");

        let matches = wm.search(&text, 1);
        assert!(
            matches
                .iter()
                .any(|m| m.start == 2 && m.end == 2 + pattern.len() && m.distance == 0),
            "got {matches:?}"
        );

        // One substitution inside the long pattern.
        let mut typo = text.clone();
        typo.replace_range(10..11, "Q");
        let matches = wm.search(&typo, 1);
        assert!(matches.iter().any(|m| m.distance == 1), "got {matches:?}");
    }

    #[test]
    fn unicode_positions_count_scalars() {
        let wm = WuManber::new("héllo").unwrap();
        let matches = wm.search("ab héllo", 0);
        assert_eq!(matches, vec![Match { start: 3, end: 8, distance: 0 }]);
    }
}
