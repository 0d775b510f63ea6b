#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// Target schema snapshot: property name to property type.
///
/// Fetched once at run start for diagnostic display; never enforced.
pub type SchemaMap = BTreeMap<String, String>;

/// One entry returned by the target store's query operation.
///
/// The store returns much more, but the Date property is the only field
/// the pipeline consumes; everything else is dropped by the client parser.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetEntry {
    /// The entry's Date property as returned by the store, if it has one.
    pub date: Option<String>,
}

/// One page of paginated query results.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QueryPage {
    pub entries: Vec<TargetEntry>,
    /// Cursor for the next page; `None` terminates pagination.
    pub next_cursor: Option<String>,
}
