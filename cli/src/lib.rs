//! Command logic for the two batch phases. Kept out of `main.rs` so
//! integration tests can drive the commands directly.

use anyhow::{bail, Context, Result};
use std::fs::{self, create_dir_all, File};
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

use linkrec_core::persist::{load_snapshot, save_snapshot};
use linkrec_core::query::suggest;
use linkrec_core::{build_index, RawDocument};

fn is_page_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
    )
}

/// Path relative to `base`, `/`-separated regardless of platform.
fn relative_slash_path(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

/// Scan `root/blogs_dir` for pages, build the vector-space index, write the
/// snapshot to `out`. Returns the number of indexed documents.
///
/// Unreadable pages are logged and skipped; the build only fails if every
/// candidate page is unreadable.
pub fn run_build_index(root: &Path, blogs_dir: &str, out: &Path) -> Result<usize> {
    let dir = root.join(blogs_dir);
    if !dir.is_dir() {
        bail!("blogs directory not found: {}", dir.display());
    }

    let mut candidates: Vec<_> = WalkDir::new(&dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir() && is_page_extension(e.path()))
        .map(|e| e.into_path())
        .collect();
    candidates.sort();

    let total = candidates.len();
    let mut documents: Vec<RawDocument> = Vec::with_capacity(total);
    let mut skipped = 0usize;
    for path in candidates {
        // Lossy decode: a stray invalid byte must not drop a whole page.
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable page");
                skipped += 1;
                continue;
            }
        };
        let Some(rel) = relative_slash_path(root, &path) else {
            tracing::warn!(path = %path.display(), "skipping page outside site root");
            skipped += 1;
            continue;
        };
        documents.push(RawDocument {
            path: rel,
            html: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    if documents.is_empty() && total > 0 {
        bail!("no readable pages under {}", dir.display());
    }

    let snapshot = build_index(documents);
    save_snapshot(out, &snapshot)?;
    tracing::info!(
        docs = snapshot.doc_count,
        skipped,
        out = %out.display(),
        "index written"
    );
    Ok(snapshot.doc_count)
}

/// Load the snapshot, score `input` against it, write the markdown report.
/// Returns the number of report rows.
pub fn run_suggest(
    index_path: &Path,
    input: &Path,
    report: &Path,
    topk_per_term: usize,
    threshold: f64,
) -> Result<usize> {
    let snapshot = load_snapshot(index_path)?;
    let bytes =
        fs::read(input).with_context(|| format!("reading input {}", input.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    let rows = suggest(
        &snapshot,
        &content,
        is_page_extension(input),
        topk_per_term,
        threshold,
    );
    if rows.is_empty() {
        tracing::info!(input = %input.display(), "no suggestions above threshold");
    }

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(report)
        .with_context(|| format!("creating report {}", report.display()))?;
    writeln!(file, "| Term | Slug | Score | Tip |")?;
    writeln!(file, "| :---: | :---: | :---: | :---: |")?;
    for s in &rows {
        writeln!(file, "| **{}** | `{}` | {:.2} | {} |", s.term, s.slug, s.score, s.tip)?;
    }
    tracing::info!(rows = rows.len(), report = %report.display(), "report written");
    Ok(rows.len())
}
