use linkrec_core::query::{suggest, MAX_CANDIDATE_TERMS};
use linkrec_core::{build_index, IndexSnapshot, RawDocument};

fn page(path: &str, title: &str, body: &str) -> RawDocument {
    RawDocument {
        path: path.to_string(),
        html: format!(
            "<html><head><title>{title}</title></head><body><p>{body}</p></body></html>"
        ),
    }
}

fn garden_corpus() -> Vec<RawDocument> {
    vec![
        page("blogs/a.html", "", "the quick garden design garden"),
        page("blogs/b.html", "", "garden design thinking"),
        page("blogs/c.html", "", "unrelated topic here"),
    ]
}

#[test]
fn build_then_suggest_ranks_concentrated_documents_first() {
    let index = build_index(garden_corpus());
    assert_eq!(index.doc_count, 3);

    let results = suggest(&index, "garden design experiment", false, 3, 0.3);
    let design_slugs: Vec<&str> = results
        .iter()
        .filter(|s| s.term == "design")
        .map(|s| s.slug.as_str())
        .collect();
    assert_eq!(design_slugs, vec!["/blogs/b.html", "/blogs/a.html"]);
}

#[test]
fn rebuild_is_deterministic() {
    let a = build_index(garden_corpus());
    let b = build_index(garden_corpus());
    assert_eq!(a.doc_count, b.doc_count);
    assert_eq!(a.df, b.df);
    // BTreeMap-backed vectors serialize to identical bytes.
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn every_result_clears_threshold_and_topk() {
    let index = build_index(garden_corpus());
    let topk = 2;
    let threshold = 0.35;
    let results = suggest(&index, "garden design quick thinking", false, topk, threshold);
    assert!(!results.is_empty());
    for s in &results {
        assert!(s.score >= threshold, "{} scored {}", s.term, s.score);
        assert!(s.score <= 1.0 + 1e-9);
    }
    for term in ["garden", "design", "quick", "thinking"] {
        assert!(results.iter().filter(|s| s.term == term).count() <= topk);
    }
}

#[test]
fn output_is_grouped_by_candidate_term_rank() {
    let index = build_index(garden_corpus());
    let results = suggest(&index, "garden design experiment", false, 3, 0.3);
    let mut term_order: Vec<&str> = Vec::new();
    for s in &results {
        if term_order.last() != Some(&s.term.as_str()) {
            term_order.push(&s.term);
        }
    }
    let mut deduped = term_order.clone();
    deduped.dedup();
    // A term never reappears after another term has started.
    assert_eq!(term_order, deduped);
}

#[test]
fn empty_corpus_end_to_end() {
    let index = build_index(Vec::new());
    assert_eq!(index.doc_count, 0);
    assert!(index.df.is_empty());
    assert!(suggest(&index, "garden design", false, 3, 0.0).is_empty());
}

#[test]
fn stopword_only_query_end_to_end() {
    let index = build_index(garden_corpus());
    let results = suggest(&index, "the and of with 的 因为", false, 3, 0.0);
    assert!(results.is_empty());
}

#[test]
fn mixed_script_corpus_round_trip() {
    let index = build_index(vec![
        page("blogs/cha.html", "茶道笔记", "关于茶道与器物的记录"),
        page("blogs/garden.html", "Garden", "garden design notes"),
    ]);
    let results = suggest(&index, "研究茶道", false, 3, 0.2);
    assert!(results.iter().any(|s| s.slug == "/blogs/cha.html"));
    assert!(!results.iter().any(|s| s.slug == "/blogs/garden.html" && s.score > 0.0));
}

#[test]
fn candidate_fanout_never_exceeds_cap() {
    let index = build_index(garden_corpus());
    let big_query: String = ('a'..='z')
        .flat_map(|c1| ('a'..='b').map(move |c2| format!("word{c1}{c2} ")))
        .collect();
    let results = suggest(&index, &big_query, false, 3, 0.0);
    let mut terms: Vec<&str> = results.iter().map(|s| s.term.as_str()).collect();
    terms.dedup();
    assert!(terms.len() <= MAX_CANDIDATE_TERMS);
}

#[test]
fn snapshot_invariants_hold_for_a_real_build() {
    let index: IndexSnapshot = build_index(garden_corpus());
    assert_eq!(index.doc_count, index.entries.len());
    for entry in &index.entries {
        for term in entry.vector.terms() {
            assert!(index.df.contains_key(term));
        }
        if !entry.vector.is_empty() {
            assert!((entry.vector.norm() - 1.0).abs() < 1e-9);
        }
    }
}
