use anyhow::{bail, Context, Result};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::index::IndexSnapshot;

/// Check the structural invariants the query phase relies on.
pub fn validate(snapshot: &IndexSnapshot) -> Result<()> {
    if snapshot.doc_count != snapshot.entries.len() {
        bail!(
            "doc_count {} does not match {} entries",
            snapshot.doc_count,
            snapshot.entries.len()
        );
    }
    for entry in &snapshot.entries {
        for term in entry.vector.terms() {
            if !snapshot.df.contains_key(term) {
                bail!("vector term {:?} of {} missing from df table", term, entry.path);
            }
        }
    }
    Ok(())
}

/// Write the snapshot as pretty-printed JSON. Map keys are ordered, so an
/// unchanged corpus serializes to identical bytes.
pub fn save_snapshot(path: &Path, snapshot: &IndexSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)
        .with_context(|| format!("serializing snapshot to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Load and validate a snapshot. A malformed snapshot is fatal: the index is
/// the query phase's entire input.
pub fn load_snapshot(path: &Path) -> Result<IndexSnapshot> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let snapshot: IndexSnapshot = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    validate(&snapshot).with_context(|| format!("invalid snapshot {}", path.display()))?;
    Ok(snapshot)
}
