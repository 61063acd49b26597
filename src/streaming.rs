//! Streaming updates for BK-trees.
//!
//! # The Problem
//!
//! A single BK-tree degrades as it grows from an unbounded stream: inserts
//! walk ever-longer root paths, and the tree cannot be shared for reading
//! while a writer holds it. Rebuilding from scratch per batch is worse.
//!
//! # Architecture
//!
//! ```text
//! Stream of words
//!     │  (fixed-size chunks)
//!     ▼
//! ┌──────────────┐
//! │  BKTree #1   │
//! ├──────────────┤
//! │  BKTree #2   │  ◄── each chunk builds a private tree
//! ├──────────────┤
//! │     ...      │
//! └──────────────┘
//!     │
//!     ▼  search fans out over every tree, deduplicating words
//! ```
//!
//! Chunks are disjoint trees, so loading a chunk never touches existing
//! trees and a reader-writer lock around the tree list is the only shared
//! state. Queries cost one sub-tree search per chunk; for chunk sizes in
//! the tens of thousands this stays far cheaper than the distance
//! computations themselves.

use crate::bktree::BKTree;
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// A sequence of disjoint BK-trees built from fixed-size chunks of a word
/// stream.
///
/// `add_chunk` and `search` take `&self` and may be called concurrently
/// from multiple threads; a chunk becomes visible to searches atomically
/// once its tree is built.
#[derive(Debug, Default)]
pub struct StreamingBKTree {
    trees: RwLock<Vec<BKTree>>,
}

impl StreamingBKTree {
    /// Create an empty streaming index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: RwLock::new(Vec::new()),
        }
    }

    /// Build a private BK-tree from `words` and append it.
    ///
    /// The tree is constructed outside the lock; only the append is
    /// serialized.
    pub fn add_chunk<S: AsRef<str>>(&self, words: &[S]) {
        let mut tree = BKTree::new();
        for word in words {
            tree.add(word.as_ref());
        }

        let mut trees = self.trees.write().unwrap_or_else(PoisonError::into_inner);
        trees.push(tree);
    }

    /// All words within `max_distance` of `query` across every chunk.
    /// Words duplicated across chunks are reported once.
    #[must_use]
    pub fn search(&self, query: &str, max_distance: usize) -> Vec<String> {
        let trees = self.trees.read().unwrap_or_else(PoisonError::into_inner);

        let mut seen: HashSet<&str> = HashSet::new();
        let mut results = Vec::new();
        for tree in trees.iter() {
            for word in tree.search(query, max_distance) {
                if seen.insert(word) {
                    results.push(word.to_string());
                }
            }
        }

        results
    }

    /// Number of chunks loaded so far.
    #[must_use]
    pub fn num_chunks(&self) -> usize {
        self.trees.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Total words across all chunks (duplicates across chunks counted per
    /// chunk).
    #[must_use]
    pub fn size(&self) -> usize {
        self.trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(BKTree::size)
            .sum()
    }
}
