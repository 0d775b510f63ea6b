#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use crate::FieldValue;

static MISSING: FieldValue = FieldValue::Missing;

/// A deterministic row identifier used for log provenance.
///
/// Derived from the source identifier and record number so a row keeps the
/// same id across runs; rendered as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId([u8; 16]);

impl RowId {
    pub fn from_first_16_bytes_of_sha256(digest: [u8; 32]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One raw record from the source export: column name to cell value.
///
/// Immutable once read; the transformer and title generator only borrow it.
#[derive(Debug, Clone)]
pub struct RawRow {
    id: RowId,
    cells: BTreeMap<String, FieldValue>,
}

impl RawRow {
    pub fn new(id: RowId, cells: BTreeMap<String, FieldValue>) -> Self {
        Self { id, cells }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Look up a cell by column name; unknown columns read as `Missing`.
    pub fn get(&self, column: &str) -> &FieldValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    /// Select the first non-missing cell among the given column names.
    ///
    /// Used for columns that were renamed between export versions
    /// (`Places` vs `Tags (Places)`).
    pub fn first_of(&self, columns: &[&str]) -> &FieldValue {
        for column in columns {
            let value = self.get(column);
            if !value.is_missing() {
                return value;
            }
        }
        &MISSING
    }

    /// Iterate cells in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
