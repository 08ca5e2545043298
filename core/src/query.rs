//! Query phase: candidate concept terms out of a draft, retrieval per term.

use std::cmp::Ordering;

use crate::extract::{collapse_whitespace, strip_html, strip_links};
use crate::index::IndexSnapshot;
use crate::tokenizer::tokenize;
use crate::vector::{smoothed_idf, TermCounts};

/// Fan-out cap: only the most distinctive query terms seek links.
pub const MAX_CANDIDATE_TERMS: usize = 12;
/// Character budget for the display tip.
const TIP_CHARS: usize = 24;

/// One recommended link: a concept term matched to an indexed page.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub term: String,
    pub slug: String,
    pub score: f64,
    pub tip: String,
}

/// Rank the query's distinct terms by `tf * idf` (query-side tf, corpus-side
/// df) and keep the top [`MAX_CANDIDATE_TERMS`]. Ties break on term order so
/// runs are reproducible.
pub fn candidate_terms(counts: &TermCounts, index: &IndexSnapshot) -> Vec<String> {
    if counts.is_empty() {
        return Vec::new();
    }
    let total = f64::from(counts.total());
    let mut scored: Vec<(&str, f64)> = counts
        .iter()
        .map(|(term, count)| {
            let df = index.df.get(term).copied().unwrap_or(0);
            let tf = f64::from(count) / total;
            (term, tf * smoothed_idf(df, index.doc_count))
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_CANDIDATE_TERMS)
        .map(|(term, _)| term.to_string())
        .collect()
}

/// Score one query document against the index.
///
/// Already-linked text is stripped first so only currently unlinked concepts
/// seed candidates. Each candidate term retrieves independently: its
/// single-term query vector normalizes to weight 1.0, so cosine against an
/// entry reduces to the entry's stored weight for that term. Per term, at
/// most `topk_per_term` entries at or above `threshold` are kept; the output
/// is grouped by candidate-term rank, then per-term similarity rank.
pub fn suggest(
    index: &IndexSnapshot,
    content: &str,
    is_html: bool,
    topk_per_term: usize,
    threshold: f64,
) -> Vec<Suggestion> {
    let unlinked = strip_links(content);
    let text = if is_html {
        strip_html(&unlinked)
    } else {
        collapse_whitespace(&unlinked)
    };

    let counts = TermCounts::from_terms(tokenize(&text));
    let mut suggestions = Vec::new();
    for term in candidate_terms(&counts, index) {
        let query_vec = TermCounts::from_terms([term.as_str()]).tf_idf(&index.df, index.doc_count);
        let mut sims: Vec<(usize, f64)> = index
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, query_vec.dot(&entry.vector)))
            .collect();
        sims.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        for (i, score) in sims.into_iter().take(topk_per_term) {
            if score < threshold {
                break;
            }
            let entry = &index.entries[i];
            let source = if entry.desc.is_empty() { &entry.title } else { &entry.desc };
            let tip: String = source.trim().chars().take(TIP_CHARS).collect();
            suggestions.push(Suggestion {
                term: term.clone(),
                slug: entry.slug.clone(),
                score,
                tip,
            });
        }
    }
    suggestions
}
