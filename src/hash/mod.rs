//! Hash-based similarity indices and their shared primitives.
//!
//! ## Implemented
//!
//! - [`LSHIndex`]: banked MinHash over character shingles, for Jaccard
//!   similarity between documents
//! - [`SimHashIndex`]: 64-bit locality-sensitive fingerprints whose Hamming
//!   distance tracks token-level similarity
//!
//! | Algorithm | Sketch | Similarity | Best for |
//! |-----------|--------|------------|----------|
//! | MinHash   | banked bucket keys | Jaccard | near-duplicate retrieval |
//! | SimHash   | one 64-bit word | cosine-ish (Hamming) | fingerprint scans |
//!
//! The primitives below are shared by both: a stable 64-bit string hash
//! (xxh64 — stability across processes is part of the signature contract),
//! Hamming distance on words, and a Unicode tokenizer.
//!
//! # References
//!
//! - Broder (1997). "On the resemblance and containment of documents"
//! - Charikar (2002). "Similarity estimation techniques from rounding
//!   algorithms"

mod lsh;
mod simhash;

pub use lsh::LSHIndex;
pub use simhash::SimHashIndex;

use xxhash_rust::xxh64::xxh64;

/// Stable, fast, non-cryptographic 64-bit hash of a string.
#[inline]
#[must_use]
pub fn hash64(s: &str) -> u64 {
    xxh64(s.as_bytes(), 0)
}

/// Number of differing bits between two words, via the Kernighan
/// bit-clear loop.
#[must_use]
pub fn hamming_distance(a: u64, b: u64) -> usize {
    let mut xor = a ^ b;
    let mut count = 0;
    while xor != 0 {
        count += 1;
        xor &= xor - 1;
    }
    count
}

/// Split `text` into lowercase words of Unicode letters and digits.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
