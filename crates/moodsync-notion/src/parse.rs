//! Response decoding, split from transport so it is testable offline.

use serde_json::Value;

use moodsync_model::{QueryPage, SchemaMap, StoreError, TargetEntry};

/// Target property holding the entry timestamp.
pub const DATE_PROPERTY: &str = "Date and time";

/// Decode a database-retrieve response into a property-name → type map.
pub fn parse_schema_response(value: &Value) -> Result<SchemaMap, StoreError> {
    let properties = value
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| StoreError::Malformed("schema response missing properties".to_string()))?;
    let mut schema = SchemaMap::new();
    for (name, property) in properties {
        let kind = property
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        schema.insert(name.clone(), kind.to_string());
    }
    Ok(schema)
}

/// Decode a database-query response into one page of entries.
///
/// Only the Date property is kept per entry; the cursor is surfaced only
/// when the store reports more pages.
pub fn parse_query_response(value: &Value) -> Result<QueryPage, StoreError> {
    let results = value
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Malformed("query response missing results".to_string()))?;
    let entries = results
        .iter()
        .map(|entry| TargetEntry {
            date: entry
                .pointer(&format!("/properties/{DATE_PROPERTY}/date/start"))
                .and_then(Value::as_str)
                .map(String::from),
        })
        .collect();
    let has_more = value
        .get("has_more")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let next_cursor = if has_more {
        value
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(String::from)
    } else {
        None
    };
    Ok(QueryPage {
        entries,
        next_cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_maps_property_names_to_types() {
        let response = json!({
            "properties": {
                "Title": { "id": "title", "type": "title" },
                "Date and time": { "id": "abc", "type": "date" },
                "Emotions": { "id": "def", "type": "multi_select" }
            }
        });
        let schema = parse_schema_response(&response).expect("schema");
        assert_eq!(schema.get("Title").map(String::as_str), Some("title"));
        assert_eq!(schema.get("Date and time").map(String::as_str), Some("date"));
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn schema_without_properties_is_malformed() {
        assert!(matches!(
            parse_schema_response(&json!({ "object": "error" })),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn query_page_extracts_dates_and_cursor() {
        let response = json!({
            "results": [
                { "properties": { "Date and time": { "date": { "start": "2024-07-05T08:30:00.000+00:00" } } } },
                { "properties": { "Title": { "title": [] } } }
            ],
            "has_more": true,
            "next_cursor": "cursor-2"
        });
        let page = parse_query_response(&response).expect("page");
        assert_eq!(
            page.entries,
            vec![
                TargetEntry {
                    date: Some("2024-07-05T08:30:00.000+00:00".to_string())
                },
                TargetEntry { date: None }
            ]
        );
        assert_eq!(page.next_cursor.as_deref(), Some("cursor-2"));
    }

    #[test]
    fn final_page_has_no_cursor() {
        let response = json!({
            "results": [],
            "has_more": false,
            "next_cursor": null
        });
        let page = parse_query_response(&response).expect("page");
        assert_eq!(page.next_cursor, None);
    }
}
