//! MinHash LSH for near-duplicate document retrieval.
//!
//! Each added text is shingled into overlapping windows of scalars, each
//! shingle hashed to 64 bits, and each of the `L` tables folds `H` min-hash
//! values into a single bucket key. Two documents land in the same bucket of
//! a table exactly when their min-hash signatures for that table agree, which
//! happens with probability governed by their Jaccard similarity — so bucket
//! collisions are a cheap, recall-oriented prefilter and every candidate is
//! confirmed by an exact Jaccard recomputation over the shingle sets.

use super::hash64;
use crate::error::{MatchError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Modulus of the universal hash family `h(x) = (a·x + b) mod p`.
/// The first prime above 2^32, so 32-bit shingle hashes spread cleanly.
const UNIVERSAL_HASH_PRIME: u64 = 4_294_967_311;

#[derive(Debug, Clone, Copy)]
struct HashFunc {
    a: u64,
    b: u64,
}

impl HashFunc {
    #[inline]
    fn eval(self, x: u64) -> u64 {
        self.a.wrapping_mul(x).wrapping_add(self.b) % UNIVERSAL_HASH_PRIME
    }
}

/// Banked MinHash index over text shingles.
///
/// The corpus is retained verbatim for the exact Jaccard confirmation pass.
/// Ids are insertion ordinals.
#[derive(Debug, Clone)]
pub struct LSHIndex {
    num_tables: usize,
    shingle_size: usize,
    /// One bucket map per table: folded signature → posting list.
    tables: Vec<HashMap<u64, Vec<usize>>>,
    /// `num_tables` banks of `num_hashes` functions each.
    hash_funcs: Vec<Vec<HashFunc>>,
    corpus: Vec<String>,
}

impl LSHIndex {
    /// Create an index with `num_tables` banks of `num_hashes` hash
    /// functions over shingles of `shingle_size` scalars. Coefficients are
    /// drawn from OS entropy; use [`LSHIndex::with_seed`] for reproducible
    /// indices.
    pub fn new(num_tables: usize, num_hashes: usize, shingle_size: usize) -> Result<Self> {
        Self::from_rng(num_tables, num_hashes, shingle_size, StdRng::from_entropy())
    }

    /// Like [`LSHIndex::new`] with a deterministic seed, so two indices
    /// built from the same corpus produce identical bucket keys.
    pub fn with_seed(
        num_tables: usize,
        num_hashes: usize,
        shingle_size: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::from_rng(
            num_tables,
            num_hashes,
            shingle_size,
            StdRng::seed_from_u64(seed),
        )
    }

    fn from_rng(
        num_tables: usize,
        num_hashes: usize,
        shingle_size: usize,
        mut rng: StdRng,
    ) -> Result<Self> {
        if num_tables == 0 {
            return Err(MatchError::InvalidParameter(
                "num_tables must be at least 1".to_string(),
            ));
        }
        if num_hashes == 0 {
            return Err(MatchError::InvalidParameter(
                "num_hashes must be at least 1".to_string(),
            ));
        }
        if shingle_size == 0 {
            return Err(MatchError::InvalidParameter(
                "shingle_size must be at least 1".to_string(),
            ));
        }

        let hash_funcs = (0..num_tables)
            .map(|_| {
                (0..num_hashes)
                    .map(|_| HashFunc {
                        a: rng.gen(),
                        b: rng.gen(),
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            num_tables,
            shingle_size,
            tables: vec![HashMap::new(); num_tables],
            hash_funcs,
            corpus: Vec::new(),
        })
    }

    /// Add a document, returning its id (insertion ordinal).
    pub fn add(&mut self, text: &str) -> usize {
        let id = self.corpus.len();
        self.corpus.push(text.to_string());

        let shingles = self.shingles(text);
        for (table, funcs) in self.tables.iter_mut().zip(&self.hash_funcs) {
            let key = bucket_key(&shingles, funcs);
            table.entry(key).or_default().push(id);
        }

        id
    }

    /// Ids of documents with Jaccard similarity ≥ `threshold`, most similar
    /// first.
    #[must_use]
    pub fn query(&self, text: &str, threshold: f64) -> Vec<usize> {
        self.query_with_similarity(text, threshold)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// Like [`LSHIndex::query`], returning `(id, jaccard)` pairs.
    ///
    /// A candidate must collect bucket votes from at least
    /// `threshold · num_tables` tables, then survive an exact Jaccard check
    /// against the stored text.
    #[must_use]
    pub fn query_with_similarity(&self, text: &str, threshold: f64) -> Vec<(usize, f64)> {
        let shingles = self.shingles(text);

        let mut table_hits: HashMap<usize, usize> = HashMap::new();
        for (table, funcs) in self.tables.iter().zip(&self.hash_funcs) {
            let key = bucket_key(&shingles, funcs);
            if let Some(ids) = table.get(&key) {
                for &id in ids {
                    *table_hits.entry(id).or_insert(0) += 1;
                }
            }
        }

        let mut results: Vec<(usize, f64)> = table_hits
            .into_iter()
            .filter(|&(_, votes)| votes as f64 / self.num_tables as f64 >= threshold)
            .filter_map(|(id, _)| {
                let similarity = self.jaccard_similarity(text, &self.corpus[id]);
                (similarity >= threshold).then_some((id, similarity))
            })
            .collect();

        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        results
    }

    /// Exact Jaccard similarity of two texts' shingle sets.
    #[must_use]
    pub fn jaccard_similarity(&self, text1: &str, text2: &str) -> f64 {
        let set1: std::collections::HashSet<u64> = self.shingles(text1).into_iter().collect();
        let set2: std::collections::HashSet<u64> = self.shingles(text2).into_iter().collect();

        let intersection = set1.intersection(&set2).count();
        let union = set1.len() + set2.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Hash every window of `shingle_size` scalars. A text shorter than one
    /// window produces a single shingle covering the whole text.
    fn shingles(&self, text: &str) -> Vec<u64> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < self.shingle_size {
            return vec![hash64(text)];
        }

        chars
            .windows(self.shingle_size)
            .map(|window| {
                let shingle: String = window.iter().collect();
                hash64(&shingle)
            })
            .collect()
    }
}

/// Fold one bank's min-hashes into a single 64-bit bucket key.
fn bucket_key(shingles: &[u64], funcs: &[HashFunc]) -> u64 {
    let mut mins = vec![u64::MAX; funcs.len()];
    for &shingle in shingles {
        for (min, func) in mins.iter_mut().zip(funcs) {
            let hash = func.eval(shingle);
            if hash < *min {
                *min = hash;
            }
        }
    }

    let mut key = 0u64;
    for min in mins {
        key = key.wrapping_mul(31).wrapping_add(min);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(LSHIndex::new(0, 3, 3).is_err());
        assert!(LSHIndex::new(5, 0, 3).is_err());
        assert!(LSHIndex::new(5, 3, 0).is_err());
    }

    #[test]
    fn finds_similar_documents() {
        let mut lsh = LSHIndex::with_seed(5, 3, 3, 42).unwrap();
        let texts = [
            "The quick brown fox",
            "The quick brown dog",
            "A slow green turtle",
            "The fast brown fox",
        ];
        for text in texts {
            lsh.add(text);
        }

        let results = lsh.query("The quick brown fox", 0.3);
        assert!(!results.is_empty());
        assert_eq!(results[0], 0, "exact duplicate should rank first");
    }

    #[test]
    fn identical_seeds_produce_identical_buckets() {
        let corpus = ["alpha beta gamma", "alpha beta delta", "omega psi chi"];
        let build = || {
            let mut lsh = LSHIndex::with_seed(8, 4, 3, 7).unwrap();
            for text in corpus {
                lsh.add(text);
            }
            lsh
        };
        let (a, b) = (build(), build());

        for (ta, tb) in a.tables.iter().zip(&b.tables) {
            assert_eq!(ta, tb);
        }
        assert_eq!(
            a.query_with_similarity("alpha beta gamma", 0.2),
            b.query_with_similarity("alpha beta gamma", 0.2)
        );
    }

    #[test]
    fn jaccard_confirmation_orders_by_similarity() {
        let mut lsh = LSHIndex::with_seed(10, 2, 3, 99).unwrap();
        lsh.add("the quick brown fox jumps");
        lsh.add("the quick brown fox jumpz");
        lsh.add("entirely unrelated content");

        let results = lsh.query_with_similarity("the quick brown fox jumps", 0.1);
        assert!(results.len() >= 2, "got {results:?}");
        for pair in results.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        assert!((results[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn short_text_hashes_whole_string() {
        let mut lsh = LSHIndex::with_seed(4, 2, 8, 1).unwrap();
        let id = lsh.add("ab");
        let results = lsh.query("ab", 0.9);
        assert_eq!(results, vec![id]);
    }
}
