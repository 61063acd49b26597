//! SimHash fingerprints for near-duplicate scans.
//!
//! Each document is tokenized, every token hashed to 64 bits, and bit `i`
//! of the fingerprint is the sign of a per-bit vote: +1 when bit `i` of a
//! token hash is set, −1 otherwise. Similar token bags therefore produce
//! fingerprints at small Hamming distance, and querying is a linear scan
//! over one word per document.

use super::{hamming_distance, hash64, tokenize};
use crate::error::{MatchError, Result};

/// SimHash index: parallel arrays of (text, 64-bit fingerprint).
#[derive(Debug, Clone)]
pub struct SimHashIndex {
    hash_bits: u32,
    corpus: Vec<String>,
    fingerprints: Vec<u64>,
}

impl SimHashIndex {
    /// Create an index using the low `hash_bits` bits of each token hash,
    /// `1 ≤ hash_bits ≤ 64`. 64 is the usual choice.
    pub fn new(hash_bits: u32) -> Result<Self> {
        if hash_bits == 0 || hash_bits > 64 {
            return Err(MatchError::InvalidParameter(format!(
                "hash_bits must be in 1..=64, got {hash_bits}"
            )));
        }
        Ok(Self {
            hash_bits,
            corpus: Vec::new(),
            fingerprints: Vec::new(),
        })
    }

    /// Add a document, returning its id (insertion ordinal).
    pub fn add(&mut self, text: &str) -> usize {
        let id = self.corpus.len();
        self.corpus.push(text.to_string());
        self.fingerprints.push(self.fingerprint(text));
        id
    }

    /// Compute the fingerprint of a text without storing it.
    #[must_use]
    pub fn fingerprint(&self, text: &str) -> u64 {
        let mut votes = vec![0i64; self.hash_bits as usize];

        for token in tokenize(text) {
            let hash = hash64(&token);
            for (i, vote) in votes.iter_mut().enumerate() {
                if (hash >> i) & 1 == 1 {
                    *vote += 1;
                } else {
                    *vote -= 1;
                }
            }
        }

        let mut fingerprint = 0u64;
        for (i, &vote) in votes.iter().enumerate() {
            if vote > 0 {
                fingerprint |= 1 << i;
            }
        }
        fingerprint
    }

    /// Ids of all documents whose fingerprint differs from the query's in
    /// at most `max_hamming` bits, in insertion order.
    #[must_use]
    pub fn query(&self, text: &str, max_hamming: usize) -> Vec<usize> {
        let query_hash = self.fingerprint(text);
        self.fingerprints
            .iter()
            .enumerate()
            .filter(|&(_, &hash)| hamming_distance(query_hash, hash) <= max_hamming)
            .map(|(id, _)| id)
            .collect()
    }

    /// Like [`SimHashIndex::query`], returning `(id, distance)` pairs
    /// ordered by ascending Hamming distance.
    #[must_use]
    pub fn query_with_distance(&self, text: &str, max_hamming: usize) -> Vec<(usize, usize)> {
        let query_hash = self.fingerprint(text);
        let mut results: Vec<(usize, usize)> = self
            .fingerprints
            .iter()
            .enumerate()
            .filter_map(|(id, &hash)| {
                let dist = hamming_distance(query_hash, hash);
                (dist <= max_hamming).then_some((id, dist))
            })
            .collect();

        results.sort_by_key(|&(_, dist)| dist);
        results
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
}
