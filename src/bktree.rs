//! BK-tree: a metric tree for distance-bounded string lookup.
//!
//! Every edge is labeled with the distance between its endpoints' words.
//! A query `q` with budget `k` visits a node `n`, computes `d = dist(n, q)`,
//! and only needs to descend into children whose edge label lies in
//! `[d − k, d + k]` — everything outside that window is excluded by the
//! triangle inequality.
//!
//! The kernel must therefore be a true metric. The default is
//! [`levenshtein`]; see [`BKTree::with_distance`] for the caveats around
//! substituting your own.
//!
//! # References
//!
//! - Burkhard & Keller (1973). "Some approaches to best-match file searching"

use crate::distance::{levenshtein, DistanceFn};
use smallvec::SmallVec;

/// A node in the tree. Children are addressed by arena index, so the whole
/// structure is two flat allocations and trivially serializable.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Node {
    word: String,
    /// `(edge_distance, child_index)` pairs. No two children of the same
    /// parent share an edge distance.
    children: SmallVec<[(usize, u32); 4]>,
}

/// BK-tree index over a set of words.
///
/// Duplicate insertions are ignored; results come back in traversal order,
/// not sorted by distance. Callers needing a ranked list sort externally.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BKTree {
    nodes: Vec<Node>,
    /// Not serialized: a deserialized tree falls back to Levenshtein, which
    /// is the only kernel that round-trips safely.
    #[cfg_attr(feature = "serde", serde(skip, default = "default_kernel"))]
    distance: DistanceFn,
}

#[cfg(feature = "serde")]
fn default_kernel() -> DistanceFn {
    levenshtein
}

impl Default for BKTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BKTree {
    /// Create an empty tree with the default Levenshtein kernel.
    #[must_use]
    pub fn new() -> Self {
        Self::with_distance(levenshtein)
    }

    /// Create an empty tree with a custom distance kernel.
    ///
    /// The kernel **must** be a true metric (identity, symmetry, triangle
    /// inequality) or pruning will silently drop results. In particular,
    /// [`crate::distance::damerau_levenshtein`] violates the triangle
    /// inequality and is not a safe choice here.
    #[must_use]
    pub fn with_distance(distance: DistanceFn) -> Self {
        Self {
            nodes: Vec::new(),
            distance,
        }
    }

    /// Insert a word. Duplicates (distance 0 to an existing word) are
    /// ignored.
    pub fn add(&mut self, word: &str) {
        if self.nodes.is_empty() {
            self.nodes.push(Node {
                word: word.to_string(),
                children: SmallVec::new(),
            });
            return;
        }

        let mut cur = 0usize;
        loop {
            let dist = (self.distance)(&self.nodes[cur].word, word);
            if dist == 0 {
                return;
            }

            let existing = self.nodes[cur]
                .children
                .iter()
                .find(|&&(edge, _)| edge == dist)
                .map(|&(_, child)| child);

            match existing {
                Some(child) => cur = child as usize,
                None => {
                    let idx = self.nodes.len() as u32;
                    self.nodes.push(Node {
                        word: word.to_string(),
                        children: SmallVec::new(),
                    });
                    self.nodes[cur].children.push((dist, idx));
                    return;
                }
            }
        }
    }

    /// All words within `max_distance` of `query`, in traversal order.
    #[must_use]
    pub fn search(&self, query: &str, max_distance: usize) -> Vec<&str> {
        self.search_with_scores(query, max_distance)
            .into_iter()
            .map(|(word, _)| word)
            .collect()
    }

    /// Like [`BKTree::search`], returning `(word, distance)` pairs.
    #[must_use]
    pub fn search_with_scores(&self, query: &str, max_distance: usize) -> Vec<(&str, usize)> {
        let mut results = Vec::new();
        if self.nodes.is_empty() {
            return results;
        }

        let mut stack: Vec<u32> = vec![0];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            let dist = (self.distance)(&node.word, query);
            if dist <= max_distance {
                results.push((node.word.as_str(), dist));
            }

            let lo = dist.saturating_sub(max_distance);
            let hi = dist + max_distance;
            for &(edge, child) in &node.children {
                if edge >= lo && edge <= hi {
                    stack.push(child);
                }
            }
        }

        results
    }

    /// Number of distinct words in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
