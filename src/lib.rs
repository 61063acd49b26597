//! fuzzkit: approximate string matching primitives.
//!
//! Provides standalone implementations of the classic fuzzy-matching index
//! structures and the distance kernels they are built on:
//!
//! - **Distance kernels**: [`distance`] (Levenshtein, Damerau–Levenshtein,
//!   Myers)
//! - **Metric-space lookup**: [`bktree`], with a chunked [`streaming`]
//!   wrapper
//! - **Gram-based**: [`ngram`] (n-gram/trigram inverted index, q-gram
//!   profiles)
//! - **Sketch-based**: [`hash`] (MinHash LSH, SimHash)
//! - **Substring**: [`suffix`] (suffix array, FM-index)
//! - **Scanners**: [`scan`] (Wu–Manber bit-parallel, Ukkonen A*)
//!
//! # Which Index Should I Use?
//!
//! | Situation | Recommendation |
//! |-----------|----------------|
//! | **Dictionary lookup within k edits** | [`bktree::BKTree`] |
//! | **Fuzzy containment / autocomplete-ish** | [`ngram::TrigramIndex`] |
//! | **Near-duplicate documents** | [`hash::LSHIndex`] |
//! | **Cheap fingerprint dedup scans** | [`hash::SimHashIndex`] |
//! | **Exact substring positions** | [`suffix::SuffixArray`] |
//! | **Occurrence counting on big texts** | [`suffix::FMIndex`] |
//! | **Pattern in text with ≤ k errors** | [`scan::WuManber`] |
//!
//! ## Recommendation Logic
//!
//! 1. **Start with the BK-tree** when the corpus is a word list and queries
//!    carry an edit budget. It answers exactly, and pruning keeps it far
//!    below a linear scan for small budgets.
//!
//! 2. **Use the trigram index** when matches are phrase- or document-sized
//!    and you want a score rather than a hard edit bound; confirm with
//!    [`ngram::TrigramIndex::search_with_distance`] when you need both.
//!
//! 3. **Use MinHash LSH** once documents (not words) are the unit and the
//!    corpus is too large to compare pairwise. SimHash is the cheaper,
//!    coarser cousin: one 64-bit word per document.
//!
//! 4. **Reach for the scanners** when there is no corpus at all — one long
//!    text, one pattern, and an error budget.
//!
//! # Critical Nuances
//!
//! ## Metric requirements
//!
//! BK-tree pruning is only sound for true metrics.
//! [`distance::damerau_levenshtein`] breaks the triangle inequality, so a
//! tree built over it may silently miss results; the default kernel is
//! plain Levenshtein for exactly this reason.
//!
//! ## Build once, query many
//!
//! Most indices here take `&mut self` to mutate and `&self` to query, and
//! after construction can be shared freely across threads for reading.
//! Two carry their own reader-writer lock so add and search may interleave
//! from different threads on a shared reference: [`ngram::NGramIndex`]
//! (and its trigram specialization), and [`streaming::StreamingBKTree`],
//! which fans queries out over immutable sub-trees.
//!
//! ## ASCII fast paths
//!
//! Kernels and gram extraction check for ASCII input and run byte-wise when
//! they can, falling back to materialized scalar sequences otherwise so
//! edits and grams align on character boundaries. The duplication is
//! deliberate; resist unifying it.

pub mod bktree;
pub mod distance;
pub mod error;
pub mod hash;
pub mod ngram;
pub mod scan;
pub mod sort;
pub mod streaming;
pub mod suffix;

// Re-exports
pub use bktree::BKTree;
pub use distance::{damerau_levenshtein, levenshtein, myers, DistanceFn};
pub use error::{MatchError, Result};
pub use hash::{LSHIndex, SimHashIndex};
pub use ngram::{NGramIndex, NGramMatch, QGramProfile, TrigramIndex};
pub use scan::{Match, UkkonenAStar, WuManber};
pub use sort::{bitonic_sort, FuzzyMatch};
pub use streaming::StreamingBKTree;
pub use suffix::{FMIndex, SuffixArray};
