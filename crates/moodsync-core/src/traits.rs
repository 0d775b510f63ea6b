//! External collaborator seams.
//!
//! The sync engine receives these as explicit handles instead of reaching
//! for process-wide clients, so tests substitute in-memory doubles.

use serde_json::Value;

use moodsync_model::{QueryPage, RawRow, SchemaMap, StoreError, TitleError};

/// The remote structured database receiving synchronized entries.
pub trait TargetStore {
    /// Schema snapshot, property name to property type. Diagnostic only.
    fn fetch_schema(&self) -> Result<SchemaMap, StoreError>;

    /// Fetch one page of existing entries. `cursor` is the previous page's
    /// `next_cursor`; `None` starts from the beginning.
    fn query_page(&self, page_size: u32, cursor: Option<&str>) -> Result<QueryPage, StoreError>;

    /// Create one entry from a prepared property payload.
    fn create_entry(&self, properties: &Value) -> Result<(), StoreError>;
}

/// External text-generation capability producing a per-record title.
///
/// Takes the *raw* row: the title instructions reference the source Notes
/// phrasing, not the normalized record.
pub trait TitleGenerator {
    fn generate(&self, row: &RawRow) -> Result<String, TitleError>;
}
