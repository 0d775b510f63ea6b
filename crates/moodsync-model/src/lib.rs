pub mod entry;
pub mod error;
pub mod record;
pub mod row;
pub mod value;

pub use entry::{QueryPage, SchemaMap, TargetEntry};
pub use error::{StoreError, TitleError};
pub use record::CanonicalRecord;
pub use row::{RawRow, RowId};
pub use value::{FieldValue, format_numeric};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_page_round_trips_through_json() {
        let page = QueryPage {
            entries: vec![
                TargetEntry {
                    date: Some("2024-07-05T08:30:00.000+00:00".to_string()),
                },
                TargetEntry { date: None },
            ],
            next_cursor: Some("abc".to_string()),
        };
        let json = serde_json::to_string(&page).expect("serialize page");
        let round: QueryPage = serde_json::from_str(&json).expect("deserialize page");
        assert_eq!(round, page);
    }
}
