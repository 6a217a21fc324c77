// src/dedup.rs
use std::collections::HashSet;

use crate::config::options::EntryOrder;
use crate::data::{Entry, RunResult};
use crate::progress::Progress;

/// Collapse entries to distinct canonical forms in one pass.
/// Identity is exact string equality; nothing is normalized.
pub fn dedupe(
    entries: Vec<Entry>,
    order: EntryOrder,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> RunResult {
    let total = entries.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut unique: Vec<String> = Vec::with_capacity(total);
    let mut collisions = 0usize;

    for entry in entries {
        let canonical = entry.into_canonical();
        if seen.contains(&canonical) {
            collisions += 1;
            tracing::warn!(entry = %canonical, "duplicate entry");
            if let Some(p) = progress.as_deref_mut() {
                p.duplicate(&canonical);
            }
            continue;
        }
        seen.insert(canonical.clone());
        unique.push(canonical);
    }

    if order == EntryOrder::Sorted {
        unique.sort_unstable();
    }

    RunResult { total, unique, collisions }
}
