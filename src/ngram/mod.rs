//! N-gram inverted index for fuzzy containment search.
//!
//! Texts are normalized, sliced into overlapping n-grams, and each gram's
//! postings list records which documents produced it. A query is scored by
//! the fraction of *its* grams that hit a document, so the score is in
//! `[0, 1]` and a threshold of `1.0` demands every query gram be present.
//!
//! ## Implemented
//!
//! - [`NGramIndex`]: the general index for any `n ≥ 1`
//! - [`TrigramIndex`]: the `n = 3` specialization with an edit-distance
//!   confirmation pass
//! - [`QGramProfile`]: per-text q-gram multisets with L1 distance and
//!   cosine similarity
//!
//! Postings keep duplicate ids on purpose: a document that contains a gram
//! twice counts twice when hits are tallied.
//!
//! Unlike the other corpus indices in this crate, the n-gram index guards
//! its state with a reader-writer lock: `add` and `search` both take
//! `&self`, writers serialize, readers share, and any mix of the two from
//! different threads is safe.

mod qgram;

pub use qgram::QGramProfile;

use crate::distance::levenshtein;
use crate::error::{MatchError, Result};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A single n-gram search hit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NGramMatch {
    /// Caller-supplied document id.
    pub id: usize,
    /// Fraction of query grams found in the document (or, after a
    /// [`TrigramIndex::search_with_distance`] pass, an edit-distance score).
    pub score: f64,
    /// The original, unnormalized document text.
    pub text: String,
}

/// Postings and corpus, everything the lock protects.
#[derive(Debug, Default)]
struct State {
    grams: HashMap<String, Vec<usize>>,
    /// id → (original text, scalar length).
    corpus: HashMap<usize, (String, usize)>,
}

/// N-gram inverted index.
///
/// Ids are caller-supplied and need not be dense; adding a text under an
/// existing id replaces the stored text but leaves stale postings behind,
/// so rebuild via [`NGramIndex::clear`] to shrink or reassign.
///
/// Mutators and queries alike take `&self`: the index holds its own
/// reader-writer lock, so a shared reference can be handed to several
/// threads and `add`/`search` may interleave freely. Concurrent searches
/// run in parallel; writers serialize.
#[derive(Debug)]
pub struct NGramIndex {
    n: usize,
    normalize: bool,
    state: RwLock<State>,
}

impl NGramIndex {
    /// Create an index over grams of `n` scalars, `n ≥ 1`. Normalization
    /// defaults to on.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(MatchError::InvalidParameter(
                "n-gram size must be at least 1".to_string(),
            ));
        }
        Ok(Self::unvalidated(n))
    }

    fn unvalidated(n: usize) -> Self {
        Self {
            n,
            normalize: true,
            state: RwLock::new(State::default()),
        }
    }

    /// Enable or disable normalization. When off, only lowercasing is
    /// applied before gram extraction.
    ///
    /// Takes `&mut self`: flipping normalization mid-stream would make old
    /// postings unreachable, so it is a construction-time choice.
    pub fn set_normalization(&mut self, enabled: bool) {
        self.normalize = enabled;
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a text under a caller-supplied id.
    pub fn add(&self, text: &str, id: usize) {
        let processed = self.process(text);
        let grams = generate_ngrams(&processed, self.n);

        let mut state = self.write();
        state
            .corpus
            .insert(id, (text.to_string(), text.chars().count()));
        for gram in grams {
            state.grams.entry(gram).or_default().push(id);
        }
    }

    /// Add several texts, assigning sequential ids starting from the
    /// current size.
    ///
    /// The whole batch goes in under one write hold, so the assigned id
    /// range stays contiguous even with concurrent writers.
    pub fn batch_add<S: AsRef<str>>(&self, texts: &[S]) {
        let mut state = self.write();
        let start = state.corpus.len();

        for (i, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            let processed = self.process(text);

            state
                .corpus
                .insert(start + i, (text.to_string(), text.chars().count()));
            for gram in generate_ngrams(&processed, self.n) {
                state.grams.entry(gram).or_default().push(start + i);
            }
        }
    }

    /// Documents whose gram overlap with the query reaches `threshold`,
    /// scored by hit fraction of query grams, descending.
    #[must_use]
    pub fn search(&self, query: &str, threshold: f64) -> Vec<NGramMatch> {
        let processed = self.process(query);
        let query_grams = generate_ngrams(&processed, self.n);
        if query_grams.is_empty() {
            return Vec::new();
        }

        let state = self.read();

        let mut hits: HashMap<usize, usize> = HashMap::new();
        for gram in &query_grams {
            if let Some(ids) = state.grams.get(gram) {
                for &id in ids {
                    *hits.entry(id).or_insert(0) += 1;
                }
            }
        }

        let total = query_grams.len() as f64;
        let mut results: Vec<NGramMatch> = hits
            .into_iter()
            .filter_map(|(id, count)| {
                let score = count as f64 / total;
                if score < threshold {
                    return None;
                }
                state.corpus.get(&id).map(|(text, _)| NGramMatch {
                    id,
                    score,
                    text: text.clone(),
                })
            })
            .collect();
        drop(state);

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results
    }

    /// Like [`NGramIndex::search`], projecting only the ids.
    #[must_use]
    pub fn search_ids(&self, query: &str, threshold: f64) -> Vec<usize> {
        self.search(query, threshold).into_iter().map(|m| m.id).collect()
    }

    /// Jaccard similarity of the deduplicated n-gram sets of two texts,
    /// processed the same way indexed texts are. Pure on its arguments;
    /// never touches the corpus.
    #[must_use]
    pub fn jaccard_similarity(&self, text1: &str, text2: &str) -> f64 {
        let grams1 = generate_ngrams(&self.process(text1), self.n);
        let grams2 = generate_ngrams(&self.process(text2), self.n);

        let set1: std::collections::HashSet<&str> =
            grams1.iter().map(String::as_str).collect();
        let set2: std::collections::HashSet<&str> =
            grams2.iter().map(String::as_str).collect();

        let intersection = set1.intersection(&set2).count();
        let union = set1.len() + set2.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn size(&self) -> usize {
        self.read().corpus.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().corpus.is_empty()
    }

    /// Drop all documents and postings.
    pub fn clear(&self) {
        let mut state = self.write();
        state.grams.clear();
        state.corpus.clear();
    }

    fn process(&self, text: &str) -> String {
        if self.normalize {
            normalize_text(text)
        } else {
            text.to_lowercase()
        }
    }

    pub(crate) fn stored_len(&self, id: usize) -> Option<usize> {
        self.read().corpus.get(&id).map(|&(_, len)| len)
    }
}

/// Lowercase and keep only letters, digits, and spaces.
fn normalize_text(text: &str) -> String {
    if text.is_ascii() {
        return normalize_ascii(text);
    }

    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch.is_whitespace() {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

fn normalize_ascii(text: &str) -> String {
    let mut result = Vec::with_capacity(text.len());
    for &c in text.as_bytes() {
        match c {
            b'a'..=b'z' | b'0'..=b'9' | b' ' => result.push(c),
            b'A'..=b'Z' => result.push(c + 32),
            _ => {}
        }
    }
    // Only ASCII bytes were kept.
    String::from_utf8(result).unwrap_or_default()
}

/// Slice `text` into grams of `n` scalars. A text shorter than `n` yields a
/// single gram equal to the whole text.
fn generate_ngrams(text: &str, n: usize) -> Vec<String> {
    if text.is_ascii() {
        let bytes = text.as_bytes();
        if bytes.len() < n {
            return vec![text.to_string()];
        }
        return (0..=bytes.len() - n)
            .map(|i| text[i..i + n].to_string())
            .collect();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() < n {
        return vec![text.to_string()];
    }
    chars
        .windows(n)
        .map(|window| window.iter().collect())
        .collect()
}

/// Trigram index (`n = 3`) with an edit-distance confirmation pass.
///
/// Derefs to [`NGramIndex`], so all base operations are available.
#[derive(Debug)]
pub struct TrigramIndex {
    inner: NGramIndex,
}

impl Default for TrigramIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TrigramIndex {
    /// Create an empty trigram index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: NGramIndex::unvalidated(3),
        }
    }

    /// Candidates within `max_distance` edits of `query`.
    ///
    /// Pre-filters by trigram similarity at `1 − 0.3·max_distance`, confirms
    /// with Levenshtein, and re-scores each survivor as
    /// `1 − dist / max(|query|, |text|)` before re-sorting.
    #[must_use]
    pub fn search_with_distance(&self, query: &str, max_distance: usize) -> Vec<NGramMatch> {
        let min_similarity = 1.0 - 0.3 * max_distance as f64;
        let candidates = self.inner.search(query, min_similarity);
        let query_len = query.chars().count();

        let mut results: Vec<NGramMatch> = candidates
            .into_iter()
            .filter_map(|mut candidate| {
                let dist = levenshtein(query, &candidate.text);
                if dist > max_distance {
                    return None;
                }
                let text_len = self
                    .inner
                    .stored_len(candidate.id)
                    .unwrap_or_else(|| candidate.text.chars().count());
                let denom = query_len.max(text_len).max(1);
                candidate.score = 1.0 - dist as f64 / denom as f64;
                Some(candidate)
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results
    }
}

impl Deref for TrigramIndex {
    type Target = NGramIndex;

    fn deref(&self) -> &NGramIndex {
        &self.inner
    }
}

impl DerefMut for TrigramIndex {
    fn deref_mut(&mut self) -> &mut NGramIndex {
        &mut self.inner
    }
}
