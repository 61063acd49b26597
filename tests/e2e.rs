//! End-to-end scenarios exercising several index structures together.

use fuzzkit::{
    bitonic_sort, levenshtein, BKTree, FMIndex, FuzzyMatch, LSHIndex, NGramIndex, QGramProfile,
    SimHashIndex, SuffixArray, TrigramIndex, UkkonenAStar, WuManber,
};
use std::collections::HashSet;

#[test]
fn typo_correction_via_trigram_index() {
    let ti = TrigramIndex::new();
    ti.batch_add(&["algorithm", "logarithm", "rhythm", "arithmetic"]);

    let results = ti.search_with_distance("algoritm", 2);
    let top = results
        .iter()
        .find(|r| r.text == "algorithm")
        .expect("algorithm should survive the distance filter");
    assert!(top.score > 0.0);

    // Everything returned is actually within the edit budget.
    for r in &results {
        assert!(levenshtein("algoritm", &r.text) <= 2);
    }
}

#[test]
fn qgram_profiles_rank_related_texts_closer() {
    let base = QGramProfile::new("hello world", 2).unwrap();
    let near = QGramProfile::new("hello there", 2).unwrap();
    let far = QGramProfile::new("goodbye world", 2).unwrap();

    assert!(base.l1_distance(&near) < base.l1_distance(&far));
    assert!(base.cosine_similarity(&near) > base.cosine_similarity(&far));
}

#[test]
fn bitonic_sort_ranks_scored_matches() {
    let matches: Vec<FuzzyMatch> = [0.5, 0.8, 0.3, 0.9, 0.6]
        .iter()
        .enumerate()
        .map(|(i, &score)| FuzzyMatch {
            text: format!("match{}", i + 1),
            score,
            distance: i,
        })
        .collect();

    let sorted = bitonic_sort(matches);
    let scores: Vec<f64> = sorted.iter().map(|m| m.score).collect();
    assert_eq!(scores, vec![0.9, 0.8, 0.6, 0.5, 0.3]);
}

#[test]
fn dictionary_lookup_agrees_between_bktree_and_trigram() {
    let dictionary = [
        "apple", "apply", "ample", "maple", "grape", "grace", "trace", "track",
    ];

    let mut tree = BKTree::new();
    let ti = TrigramIndex::new();
    for word in dictionary {
        tree.add(word);
    }
    ti.batch_add(&dictionary);

    let from_tree: HashSet<String> = tree
        .search("aple", 1)
        .into_iter()
        .map(str::to_string)
        .collect();
    let from_trigrams: HashSet<String> = ti
        .search_with_distance("aple", 1)
        .into_iter()
        .map(|r| r.text)
        .collect();

    // The BK-tree is exact; the trigram path may prefilter away candidates
    // but must never invent one.
    assert!(from_trigrams.is_subset(&from_tree));
    let expected: HashSet<String> = ["apple", "ample", "maple"].map(str::to_string).into();
    assert_eq!(from_tree, expected);
    assert!(from_trigrams.contains("maple"));
}

#[test]
fn near_duplicate_detection_lsh_and_simhash_agree() {
    let corpus = [
        "The quick brown fox jumps over the lazy dog",
        "The quick brown fox jumped over the lazy dog",
        "Pack my box with five dozen liquor jugs",
        "How vexingly quick daft zebras jump",
    ];

    let mut lsh = LSHIndex::with_seed(8, 3, 3, 1234).unwrap();
    let mut sh = SimHashIndex::new(64).unwrap();
    for text in corpus {
        lsh.add(text);
        sh.add(text);
    }

    let query = corpus[0];
    let lsh_hits: HashSet<usize> = lsh.query(query, 0.5).into_iter().collect();
    let sh_hits: HashSet<usize> = sh.query(query, 10).into_iter().collect();

    // Both must surface the exact duplicate and its one-word variant.
    assert!(lsh_hits.contains(&0));
    assert!(sh_hits.contains(&0));
    assert!(sh_hits.contains(&1));
    // Unrelated pangrams stay out of the SimHash ball.
    assert!(!sh_hits.contains(&2));
}

#[test]
fn substring_hunt_across_suffix_structures_and_scanners() {
    let text = "This is a patern in the text with pattern too";

    // Exact positions via the suffix array.
    let sa = SuffixArray::new(text);
    let exact: HashSet<usize> = sa.search("pattern").into_iter().collect();
    assert_eq!(exact, HashSet::from([34]));

    // Occurrence counting via the FM-index.
    let fm = FMIndex::new(text, 2).unwrap();
    assert_eq!(fm.count("pattern"), 1);
    assert_eq!(fm.count("patern"), 1);
    assert_eq!(fm.locate("pattern"), vec![34]);

    // Approximate hits via both scanners.
    let ua = UkkonenAStar::new("pattern", 2).unwrap();
    let astar_matches = ua.search(text);
    assert!(astar_matches.iter().any(|m| m.distance == 0));
    assert!(astar_matches.iter().any(|m| m.distance == 1));

    let wm = WuManber::new("pattern").unwrap();
    let wm_matches = wm.search(text, 1);
    assert!(wm_matches.iter().any(|m| m.distance == 0 && m.start == 34));
    assert!(wm_matches.iter().any(|m| m.distance == 1));
}

#[test]
fn ngram_index_backs_a_reranking_pipeline() {
    let ng = NGramIndex::new(3).unwrap();
    let corpus = [
        "fuzzy string matching",
        "fuzzy text searching",
        "exact string matching",
        "binary tree traversal",
    ];
    for (id, text) in corpus.iter().enumerate() {
        ng.add(text, id);
    }

    let candidates = ng.search("fuzzy string watching", 0.3);
    assert!(!candidates.is_empty());

    // Re-rank the candidate set with the bitonic helper.
    let reranked = bitonic_sort(
        candidates
            .iter()
            .map(|c| FuzzyMatch {
                text: c.text.clone(),
                score: c.score,
                distance: levenshtein("fuzzy string watching", &c.text),
            })
            .collect(),
    );

    assert_eq!(reranked[0].text, "fuzzy string matching");
    for pair in reranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
