use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref LATIN_RE: Regex = Regex::new(r"[a-z]{3,}").expect("valid regex");
    static ref IDEOGRAPH_RE: Regex = Regex::new(r"[一-鿿]+").expect("valid regex");
    static ref EN_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while",
            "of", "for", "to", "in", "on", "at", "by", "with", "as",
            "is", "are", "was", "were", "be", "been", "being",
            "this", "that", "these", "those", "from", "into", "over", "under", "about",
            "can", "could", "should", "would", "may", "might", "not", "no", "yes",
            "just", "very", "more", "most", "less", "least", "same", "different",
            "other", "another", "which", "who", "whom", "whose", "where", "why", "how",
        ];
        words.iter().copied().collect()
    };
    static ref ZH_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "的", "一", "是", "在", "不", "了", "有", "和", "就", "都", "而",
            "及", "与", "为", "之", "于", "亦", "也", "又", "还", "很",
            "并", "或", "则", "被", "把", "向", "给", "等", "这", "那",
            "及其", "并且", "如果", "那么", "那些", "这些",
            "因为", "所以", "通过", "可能", "可以",
        ];
        words.iter().copied().collect()
    };
}

/// Shortest and longest ideographic n-gram emitted for a contiguous run.
const NGRAM_MIN: usize = 2;
const NGRAM_MAX: usize = 4;

fn is_en_stopword(term: &str) -> bool { EN_STOPWORDS.contains(term) }
fn is_zh_stopword(term: &str) -> bool { ZH_STOPWORDS.contains(term) }

/// Tokenize mixed-script text into index terms.
///
/// Latin terms are maximal alphabetic runs of length >= 3, lowercased after
/// NFKC folding. Ideographic runs of length >= 2 yield every contiguous
/// substring of 2 to 4 characters (a segmentation-free n-gram approximation
/// of word boundaries). Stop words in either script are dropped. Output
/// order is all Latin terms first, then ideographic terms, so builds are
/// reproducible; duplicates are kept because multiplicity is the
/// term-frequency signal.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();

    let mut terms: Vec<String> = Vec::new();
    for mat in LATIN_RE.find_iter(&normalized) {
        let term = mat.as_str();
        if is_en_stopword(term) {
            continue;
        }
        terms.push(term.to_string());
    }
    for run in IDEOGRAPH_RE.find_iter(&normalized) {
        let chars: Vec<char> = run.as_str().chars().collect();
        if chars.len() < NGRAM_MIN {
            continue;
        }
        let max_n = NGRAM_MAX.min(chars.len());
        for n in NGRAM_MIN..=max_n {
            for window in chars.windows(n) {
                let gram: String = window.iter().collect();
                if is_zh_stopword(&gram) {
                    continue;
                }
                terms.push(gram);
            }
        }
    }
    terms
}
