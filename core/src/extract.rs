//! Plain-text extraction from HTML and markdown sources.
//!
//! Regex-based on purpose: the corpus is a set of static pages produced by a
//! known generator, not arbitrary web HTML, so a full DOM parser is not
//! needed to pull a title, a description, and a body snippet.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCRIPT_RE: Regex =
        Regex::new(r"(?is)<script[\s\S]*?</script>").expect("valid regex");
    static ref STYLE_RE: Regex =
        Regex::new(r"(?is)<style[\s\S]*?</style>").expect("valid regex");
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").expect("valid regex");
    static ref WS_RE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref TITLE_RE: Regex =
        Regex::new(r"(?is)<title>([\s\S]*?)</title>").expect("valid regex");
    static ref H1_RE: Regex =
        Regex::new(r"(?is)<h1[^>]*>([\s\S]*?)</h1>").expect("valid regex");
    static ref META_DESC_RE: Regex =
        Regex::new(r#"(?i)<meta[^>]+name="description"[^>]+content="([^"]*)""#)
            .expect("valid regex");
    static ref MD_LINK_RE: Regex =
        Regex::new(r"\[[^\]]+\]\([^)]+\)").expect("valid regex");
    static ref ANCHOR_RE: Regex =
        Regex::new(r"(?is)<a[\s\S]*?>[\s\S]*?</a>").expect("valid regex");
    static ref NUM_ENTITY_RE: Regex =
        Regex::new(r"&#([xX]?[0-9a-fA-F]+);").expect("valid regex");
}

/// Decode the handful of HTML entities that actually occur in the corpus,
/// plus numeric character references.
fn unescape_entities(text: &str) -> String {
    let decoded = NUM_ENTITY_RE.replace_all(text, |caps: &regex::Captures| {
        let body = &caps[1];
        let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()
        } else {
            body.parse::<u32>().ok()
        };
        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });
    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WS_RE.replace_all(text, " ").trim().to_string()
}

/// Strip script/style blocks and all markup, decode entities, collapse
/// whitespace. The result is the document's plain body text.
pub fn strip_html(html: &str) -> String {
    let text = SCRIPT_RE.replace_all(html, " ");
    let text = STYLE_RE.replace_all(&text, " ");
    let text = TAG_RE.replace_all(&text, " ");
    collapse_whitespace(&unescape_entities(&text))
}

/// First `<title>` content, else first `<h1>` with inner markup stripped,
/// else empty.
pub fn extract_title(html: &str) -> String {
    if let Some(caps) = TITLE_RE.captures(html) {
        return collapse_whitespace(&unescape_entities(&caps[1]));
    }
    if let Some(caps) = H1_RE.captures(html) {
        return strip_html(&caps[1]);
    }
    String::new()
}

/// The `<meta name="description">` content, else the first 150 characters of
/// the stripped body text. Display-only; never fed to the tokenizer.
pub fn extract_description(html: &str) -> String {
    if let Some(caps) = META_DESC_RE.captures(html) {
        return caps[1].trim().to_string();
    }
    strip_html(html).chars().take(150).collect()
}

/// Remove markdown `[text](url)` spans and HTML anchor elements, anchor text
/// included. Text that already carries a link must not seed new link
/// candidates.
pub fn strip_links(text: &str) -> String {
    let text = MD_LINK_RE.replace_all(text, " ");
    ANCHOR_RE.replace_all(&text, " ").to_string()
}
