//! FM-index: Burrows–Wheeler backward search.

use super::sorted_positions;
use crate::error::{MatchError, Result};
use std::collections::HashMap;

/// Sentinel appended to the text before the BWT. Must sort strictly below
/// every byte of the text, so the text is assumed not to contain `$` or
/// anything below it.
const SENTINEL: u8 = b'$';

/// Occurrence-counting index over the Burrows–Wheeler transform of
/// `text + '$'`.
///
/// Stores the BWT, the C-table (`first_occ[c]` = number of symbols strictly
/// less than `c`), per-byte prefix counts (`occ[c][i]` = count of `c` in
/// `BWT[0..i)`), and a suffix array sampled every `sample_rate` rows for
/// [`FMIndex::locate`].
#[derive(Debug, Clone)]
pub struct FMIndex {
    bwt: Vec<u8>,
    first_occ: HashMap<u8, usize>,
    occ: HashMap<u8, Vec<usize>>,
    sa_samples: Vec<usize>,
    sample_rate: usize,
}

impl FMIndex {
    /// Build the index over `text`, sampling the suffix array every
    /// `sample_rate ≥ 1` rows.
    pub fn new(text: &str, sample_rate: usize) -> Result<Self> {
        if sample_rate == 0 {
            return Err(MatchError::InvalidParameter(
                "sample_rate must be at least 1".to_string(),
            ));
        }

        let mut padded = text.as_bytes().to_vec();
        padded.push(SENTINEL);
        let n = padded.len();

        let sa = sorted_positions(&padded);

        let mut bwt = Vec::with_capacity(n);
        let mut sa_samples = Vec::with_capacity(n.div_ceil(sample_rate));
        for (row, &suffix) in sa.iter().enumerate() {
            if suffix == 0 {
                bwt.push(padded[n - 1]);
            } else {
                bwt.push(padded[suffix - 1]);
            }
            if row % sample_rate == 0 {
                sa_samples.push(suffix);
            }
        }

        let mut counts: HashMap<u8, usize> = HashMap::new();
        for &c in &bwt {
            *counts.entry(c).or_insert(0) += 1;
        }

        let mut symbols: Vec<u8> = counts.keys().copied().collect();
        symbols.sort_unstable();

        let mut first_occ = HashMap::new();
        let mut total = 0;
        for &c in &symbols {
            first_occ.insert(c, total);
            total += counts[&c];
        }

        let mut occ: HashMap<u8, Vec<usize>> = HashMap::new();
        for &c in &symbols {
            let mut running = 0;
            let mut prefix = Vec::with_capacity(n + 1);
            for &b in &bwt {
                prefix.push(running);
                if b == c {
                    running += 1;
                }
            }
            prefix.push(running);
            occ.insert(c, prefix);
        }

        Ok(Self {
            bwt,
            first_occ,
            occ,
            sa_samples,
            sample_rate,
        })
    }

    /// Number of occurrences of `pattern` in the text.
    ///
    /// Backward search narrows the row range `[sp, ep]` one pattern byte at
    /// a time; a byte absent from the text empties the range immediately.
    #[must_use]
    pub fn count(&self, pattern: &str) -> usize {
        self.row_range(pattern)
            .map_or(0, |(sp, ep)| ep - sp + 1)
    }

    /// Byte positions of every occurrence of `pattern`, ascending.
    ///
    /// Each matching row walks the LF-mapping until it lands on a sampled
    /// row, then offsets the sampled position by the number of steps taken.
    #[must_use]
    pub fn locate(&self, pattern: &str) -> Vec<usize> {
        let Some((sp, ep)) = self.row_range(pattern) else {
            return Vec::new();
        };

        let n = self.bwt.len();
        let mut positions: Vec<usize> = (sp..=ep)
            .map(|row| {
                let mut row = row;
                let mut steps = 0;
                while row % self.sample_rate != 0 {
                    let c = self.bwt[row];
                    row = self.first_occ[&c] + self.occ[&c][row];
                    steps += 1;
                }
                // Each LF step moves one text position backwards, modulo
                // the padded length.
                (self.sa_samples[row / self.sample_rate] + steps) % n
            })
            .collect();

        positions.sort_unstable();
        positions
    }

    fn row_range(&self, pattern: &str) -> Option<(usize, usize)> {
        let pat = pattern.as_bytes();
        let (&last, rest) = pat.split_last()?;

        let first = *self.first_occ.get(&last)?;
        let occ = self.occ.get(&last)?;

        let mut sp = first;
        let mut ep = (first + occ[self.bwt.len()]).checked_sub(1)?;

        for &c in rest.iter().rev() {
            if sp > ep {
                return None;
            }
            let first = *self.first_occ.get(&c)?;
            let occ = self.occ.get(&c)?;
            sp = first + occ[sp];
            ep = (first + occ[ep + 1]).checked_sub(1)?;
        }

        (sp <= ep).then_some((sp, ep))
    }
}
