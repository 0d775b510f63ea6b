//! Target state index: the dedup key set derived from existing entries.

use std::collections::BTreeSet;

use tracing::debug;

use moodsync_model::StoreError;

use crate::normalize::normalize_dedup_key;
use crate::traits::TargetStore;

/// Build the complete set of dedup keys currently present in the store.
///
/// Pages through the store's query operation until no next cursor is
/// returned. Entries without a recognizable Date are skipped silently;
/// they cannot participate in dedup. Any page failure propagates: a
/// partial index would produce false negatives and duplicate entries.
pub fn build_dedup_index<S: TargetStore>(
    store: &S,
    page_size: u32,
) -> Result<BTreeSet<String>, StoreError> {
    let mut keys = BTreeSet::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;
    loop {
        let page = store.query_page(page_size, cursor.as_deref())?;
        pages += 1;
        for entry in &page.entries {
            let Some(date) = entry.date.as_deref() else {
                continue;
            };
            if let Some(key) = normalize_dedup_key(date) {
                keys.insert(key);
            }
        }
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    debug!(pages, key_count = keys.len(), "built dedup index");
    Ok(keys)
}
