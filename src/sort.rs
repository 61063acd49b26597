//! Bitonic sort over scored matches.
//!
//! A bitonic network only needs compare-and-swap at fixed positions, which
//! makes it a drop-in for SIMD or GPU experiments; this scalar rendition
//! exists so those paths have a correctness reference. It is equivalent to
//! a descending stable sort on score.

/// A scored match record, as produced by re-ranking passes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzyMatch {
    pub text: String,
    pub score: f64,
    pub distance: usize,
}

/// Sort matches by score descending.
///
/// The input is padded to the next power of two with sentinel entries of
/// score −1; the padding is dropped from the output, so real scores must be
/// non-negative.
#[must_use]
pub fn bitonic_sort(matches: Vec<FuzzyMatch>) -> Vec<FuzzyMatch> {
    if matches.is_empty() {
        return matches;
    }

    let mut size = 1;
    while size < matches.len() {
        size *= 2;
    }

    let mut items = matches;
    items.resize_with(size, || FuzzyMatch {
        text: String::new(),
        score: -1.0,
        distance: usize::MAX,
    });

    sort_range(&mut items, 0, size, true);

    items.retain(|item| item.score >= 0.0);
    items
}

/// `descending == true` sorts the range largest-score-first.
fn sort_range(items: &mut [FuzzyMatch], low: usize, count: usize, descending: bool) {
    if count > 1 {
        let half = count / 2;
        sort_range(items, low, half, true);
        sort_range(items, low + half, half, false);
        merge_range(items, low, count, descending);
    }
}

fn merge_range(items: &mut [FuzzyMatch], low: usize, count: usize, descending: bool) {
    if count > 1 {
        let half = count / 2;
        for i in low..low + half {
            if descending == (items[i].score < items[i + half].score) {
                items.swap(i, i + half);
            }
        }
        merge_range(items, low, half, descending);
        merge_range(items, low + half, half, descending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(scores: &[f64]) -> Vec<FuzzyMatch> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| FuzzyMatch {
                text: format!("match{i}"),
                score,
                distance: i,
            })
            .collect()
    }

    #[test]
    fn sorts_descending_and_drops_padding() {
        let sorted = bitonic_sort(matches(&[0.5, 0.8, 0.3, 0.9, 0.6]));
        let scores: Vec<f64> = sorted.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.9, 0.8, 0.6, 0.5, 0.3]);
    }

    #[test]
    fn already_power_of_two() {
        let sorted = bitonic_sort(matches(&[0.1, 0.4, 0.2, 0.3]));
        let scores: Vec<f64> = sorted.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.4, 0.3, 0.2, 0.1]);
    }

    #[test]
    fn empty_and_singleton() {
        assert!(bitonic_sort(Vec::new()).is_empty());
        let one = bitonic_sort(matches(&[0.7]));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].score, 0.7);
    }

    #[test]
    fn agrees_with_comparison_sort() {
        let input = matches(&[0.12, 0.99, 0.0, 0.5, 0.5, 0.31, 0.87]);
        let mut expected: Vec<f64> = input.iter().map(|m| m.score).collect();
        expected.sort_by(|a, b| b.partial_cmp(a).unwrap());

        let got: Vec<f64> = bitonic_sort(input).iter().map(|m| m.score).collect();
        assert_eq!(got, expected);
    }
}
