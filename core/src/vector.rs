//! Sparse term statistics: integer counts and weighted vectors.
//!
//! Both types wrap a `BTreeMap` so that iteration, and therefore serialized
//! snapshot bytes, are deterministic across rebuilds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smoothed inverse document frequency: `ln((N+1)/(df+1)) + 1`.
///
/// The add-one smoothing on both sides keeps the weight strictly positive
/// even when a term appears in every document or the corpus is tiny; a term
/// unseen in the corpus (`df = 0`) gets the maximal value.
pub fn smoothed_idf(df: u32, doc_count: usize) -> f64 {
    ((doc_count as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// Term -> occurrence count for one document (or one query).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounts {
    counts: BTreeMap<String, u32>,
    total: u32,
}

impl TermCounts {
    /// Tally a token stream; multiplicity is preserved in `total`.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts = BTreeMap::new();
        let mut total = 0u32;
        for term in terms {
            *counts.entry(term.into()).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of tokens tallied, duplicates included.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Fold this document's distinct terms into a corpus-wide document
    /// frequency table. Called once per document, after tallying, so the df
    /// aggregation is a single reduction step.
    pub fn merge_into_df(&self, df: &mut BTreeMap<String, u32>) {
        for term in self.counts.keys() {
            *df.entry(term.clone()).or_insert(0) += 1;
        }
    }

    /// TF-IDF weights against the given corpus statistics, unit-normalized.
    ///
    /// Terms missing from `df` count as `df = 0`; smoothing keeps every
    /// weight positive. An empty tally yields the empty vector.
    pub fn tf_idf(&self, df: &BTreeMap<String, u32>, doc_count: usize) -> TermVector {
        let mut vector = TermVector::default();
        if self.total == 0 {
            return vector;
        }
        let total = f64::from(self.total);
        for (term, &count) in &self.counts {
            let term_df = df.get(term).copied().unwrap_or(0);
            let tf = f64::from(count) / total;
            vector
                .weights
                .insert(term.clone(), tf * smoothed_idf(term_df, doc_count));
        }
        vector.normalize();
        vector
    }
}

/// Term -> non-negative weight, unit Euclidean norm unless empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean norm. The empty vector stays empty, which
    /// downstream treats as "zero similarity to everything".
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        for w in self.weights.values_mut() {
            *w /= norm;
        }
    }

    /// Dot product over shared terms. Both sides are pre-normalized, so this
    /// is cosine similarity with no division at comparison time.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(term, w)| large.weights.get(term).map(|v| w * v))
            .sum()
    }
}
