//! Target property payload construction.
//!
//! A field enters the payload only when present; absent fields are omitted
//! entirely rather than written as null, so the store's own defaults apply.

use serde_json::{Map, Value, json};

use moodsync_model::CanonicalRecord;

use crate::normalize::split_multi;

/// Map a canonical record into the target store's property-value shape.
pub fn build_properties(record: &CanonicalRecord) -> Value {
    let mut properties = Map::new();

    if let Some(name) = &record.name {
        properties.insert(
            "Title".to_string(),
            json!({ "title": [{ "text": { "content": name } }] }),
        );
    }
    if let Some(date) = &record.date {
        // Start timestamp only; the source has no end-timestamp notion.
        properties.insert("Date and time".to_string(), json!({ "date": { "start": date } }));
    }
    insert_multi_select(&mut properties, "Places", record.places.as_deref());
    insert_multi_select(&mut properties, "People", record.people.as_deref());
    insert_multi_select(&mut properties, "Events", record.events.as_deref());
    insert_multi_select(&mut properties, "Emotions", record.mood.as_deref());
    if let Some(notes) = &record.notes {
        properties.insert(
            "Notes".to_string(),
            json!({ "rich_text": [{ "text": { "content": notes } }] }),
        );
    }
    insert_number(&mut properties, "Sleep hours", record.sleep);
    insert_number(&mut properties, "Meditation", record.meditation);
    insert_number(&mut properties, "Exercise", record.exercise);
    insert_number(&mut properties, "Steps", record.steps);
    insert_number(&mut properties, "Temperature", record.temperature);
    if let Some(weather) = &record.weather {
        properties.insert("Weather".to_string(), json!({ "select": { "name": weather } }));
    }

    Value::Object(properties)
}

fn insert_multi_select(properties: &mut Map<String, Value>, name: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    let options: Vec<Value> = split_multi(value)
        .into_iter()
        .map(|token| json!({ "name": token }))
        .collect();
    properties.insert(name.to_string(), json!({ "multi_select": options }));
}

fn insert_number(properties: &mut Map<String, Value>, name: &str, value: Option<f64>) {
    let Some(value) = value else { return };
    properties.insert(name.to_string(), json!({ "number": value }));
}
