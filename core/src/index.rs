//! Corpus indexing: raw pages in, persisted vector-space snapshot out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::extract::{extract_description, extract_title, strip_html};
use crate::tokenizer::tokenize;
use crate::vector::{TermCounts, TermVector};

/// Characters of stripped body text tokenized alongside the title.
const SNIPPET_CHARS: usize = 200;

/// One page as read from disk, before any processing.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Path relative to the site root, `/`-separated. Stable document id.
    pub path: String,
    /// Raw HTML contents.
    pub html: String,
}

/// One indexed page: display metadata plus its unit-normalized vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    pub path: String,
    pub slug: String,
    pub title: String,
    pub desc: String,
    pub vector: TermVector,
}

/// The persisted aggregate: the only state shared between the build and
/// query phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub doc_count: usize,
    pub df: BTreeMap<String, u32>,
    pub entries: Vec<DocEntry>,
}

/// Build a snapshot from raw documents.
///
/// Each document contributes its title concatenated with the first
/// 200 characters of body text; term weights are smoothed TF-IDF,
/// unit-normalized per document. Document frequencies are aggregated in a
/// single reduction after all per-document tallies are known.
pub fn build_index(documents: Vec<RawDocument>) -> IndexSnapshot {
    let mut entries: Vec<DocEntry> = Vec::with_capacity(documents.len());
    let mut tallies: Vec<TermCounts> = Vec::with_capacity(documents.len());

    for doc in documents {
        let title = extract_title(&doc.html);
        let snippet: String = strip_html(&doc.html).chars().take(SNIPPET_CHARS).collect();
        let desc = extract_description(&doc.html);
        let text = format!("{} {}", title, snippet);
        tallies.push(TermCounts::from_terms(tokenize(text.trim())));
        let slug = format!("/{}", doc.path);
        entries.push(DocEntry {
            path: doc.path,
            slug,
            title,
            desc,
            vector: TermVector::default(),
        });
    }

    let doc_count = entries.len();
    let mut df: BTreeMap<String, u32> = BTreeMap::new();
    for tally in &tallies {
        tally.merge_into_df(&mut df);
    }

    for (entry, tally) in entries.iter_mut().zip(&tallies) {
        entry.vector = tally.tf_idf(&df, doc_count);
    }

    tracing::debug!(docs = doc_count, terms = df.len(), "corpus vectorized");
    IndexSnapshot { doc_count, df, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, title: &str, body: &str) -> RawDocument {
        RawDocument {
            path: path.to_string(),
            html: format!("<html><title>{title}</title><body><p>{body}</p></body></html>"),
        }
    }

    #[test]
    fn df_counts_and_doc_count() {
        let snapshot = build_index(vec![
            page("blogs/a.html", "", "the quick garden design garden"),
            page("blogs/b.html", "", "garden design thinking"),
            page("blogs/c.html", "", "unrelated topic here"),
        ]);
        assert_eq!(snapshot.doc_count, 3);
        assert_eq!(snapshot.df.get("garden"), Some(&2));
        assert_eq!(snapshot.df.get("design"), Some(&2));
        assert_eq!(snapshot.df.get("quick"), Some(&1));
        assert_eq!(snapshot.df.get("thinking"), Some(&1));
        assert_eq!(snapshot.df.get("the"), None);
    }

    #[test]
    fn entry_fields_come_from_markup() {
        let snapshot = build_index(vec![page("blogs/tea.html", "Tea Notes", "tea ritual")]);
        let entry = &snapshot.entries[0];
        assert_eq!(entry.path, "blogs/tea.html");
        assert_eq!(entry.slug, "/blogs/tea.html");
        assert_eq!(entry.title, "Tea Notes");
        // No meta description, so desc falls back to stripped body text,
        // which begins with the title.
        assert!(entry.desc.starts_with("Tea Notes"));
    }

    #[test]
    fn vectors_are_unit_norm_and_title_terms_count() {
        let snapshot = build_index(vec![
            page("a.html", "Garden", "design"),
            page("b.html", "", "pottery"),
        ]);
        for entry in &snapshot.entries {
            assert!((entry.vector.norm() - 1.0).abs() < 1e-9);
        }
        assert!(snapshot.entries[0].vector.weight("garden") > 0.0);
    }

    #[test]
    fn every_vector_term_has_positive_df() {
        let snapshot = build_index(vec![
            page("a.html", "Garden", "design and tea 设计思维"),
            page("b.html", "Tea", "ritual"),
        ]);
        for entry in &snapshot.entries {
            for term in entry.vector.terms() {
                assert!(snapshot.df.get(term).copied().unwrap_or(0) > 0, "missing df for {term}");
            }
        }
    }

    #[test]
    fn termless_document_keeps_empty_vector() {
        let snapshot = build_index(vec![page("a.html", "", "of to in")]);
        assert_eq!(snapshot.doc_count, 1);
        assert!(snapshot.entries[0].vector.is_empty());
        assert!(snapshot.df.is_empty());
    }

    #[test]
    fn empty_corpus_is_a_valid_snapshot() {
        let snapshot = build_index(Vec::new());
        assert_eq!(snapshot.doc_count, 0);
        assert!(snapshot.df.is_empty());
        assert!(snapshot.entries.is_empty());
    }
}
