//! Raw row to canonical record transformation.
//!
//! Column selection handles exports that renamed the tag columns between
//! versions (`Places` vs `Tags (Places)`). The title (`name`) field is left
//! unset here: title generation inspects the whole raw row and runs later
//! in the pipeline.

use thiserror::Error;

use moodsync_model::{CanonicalRecord, FieldValue, RawRow, RowId, format_numeric};

use crate::normalize::{fahrenheit_to_celsius, parse_timestamp, round_two_decimal};

pub const DATE_COLUMN: &str = "Date";

const MOOD_COLUMNS: &[&str] = &["Mood"];
const PLACES_COLUMNS: &[&str] = &["Places", "Tags (Places)"];
const PEOPLE_COLUMNS: &[&str] = &["People", "Tags (People)"];
const EVENTS_COLUMNS: &[&str] = &["Events", "Tags (Events)"];
const EXERCISE_COLUMNS: &[&str] = &["Exercise"];
const SLEEP_COLUMNS: &[&str] = &["Sleep"];
const STEPS_COLUMNS: &[&str] = &["Steps"];
const MEDITATION_COLUMNS: &[&str] = &["Meditation"];
const WEATHER_COLUMNS: &[&str] = &["Weather"];
const NOTES_COLUMNS: &[&str] = &["Notes"];
const TEMPERATURE_COLUMNS: &[&str] = &["Temperature (F)", "Temperature"];

/// Structural failure: the row cannot participate in the pipeline at all.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The Date column is missing or unparseable. Without a date the record
    /// has no dedup identity, so writing it would duplicate on every rerun.
    #[error("row {row_id}: date {raw:?} did not parse")]
    UndatedRow { row_id: RowId, raw: String },
}

/// Build one canonical record from a raw row.
///
/// Every field except the date recovers from malformed input by going
/// absent. Rounding reproduces the source system: sleep and steps round to
/// two decimals, temperature converts °F→°C then rounds, exercise and
/// meditation pass through unrounded.
pub fn transform_row(row: &RawRow) -> Result<CanonicalRecord, TransformError> {
    let raw_date = row.get(DATE_COLUMN);
    let date = raw_date.as_str().and_then(parse_timestamp);
    let Some(date) = date else {
        return Err(TransformError::UndatedRow {
            row_id: row.id(),
            raw: raw_date.to_string(),
        });
    };

    Ok(CanonicalRecord {
        name: None,
        date: Some(date),
        mood: string_field(row.first_of(MOOD_COLUMNS)),
        places: string_field(row.first_of(PLACES_COLUMNS)),
        people: string_field(row.first_of(PEOPLE_COLUMNS)),
        events: string_field(row.first_of(EVENTS_COLUMNS)),
        exercise: numeric_field(row.first_of(EXERCISE_COLUMNS)),
        sleep: numeric_field(row.first_of(SLEEP_COLUMNS)).map(round_two_decimal),
        steps: numeric_field(row.first_of(STEPS_COLUMNS)).map(round_two_decimal),
        meditation: numeric_field(row.first_of(MEDITATION_COLUMNS)),
        weather: string_field(row.first_of(WEATHER_COLUMNS)),
        notes: string_field(row.first_of(NOTES_COLUMNS)),
        temperature: numeric_field(row.first_of(TEMPERATURE_COLUMNS))
            .map(|fahrenheit| round_two_decimal(fahrenheit_to_celsius(fahrenheit))),
    })
}

fn string_field(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(text) => Some(text.clone()),
        FieldValue::Number(number) if !number.is_nan() => Some(format_numeric(*number)),
        _ => None,
    }
}

fn numeric_field(value: &FieldValue) -> Option<f64> {
    value.as_f64().filter(|parsed| !parsed.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(cells: &[(&str, &str)]) -> RawRow {
        let cells: BTreeMap<String, FieldValue> = cells
            .iter()
            .map(|(name, value)| {
                let cell = if value.is_empty() {
                    FieldValue::Missing
                } else {
                    FieldValue::Text((*value).to_string())
                };
                ((*name).to_string(), cell)
            })
            .collect();
        RawRow::new(RowId::from_first_16_bytes_of_sha256([7u8; 32]), cells)
    }

    #[test]
    fn full_row_transforms() {
        let record = transform_row(&row(&[
            ("Date", "2024 Fri Jul 05 08:30 AM"),
            ("Mood", "Calm;Content"),
            ("Tags (Places)", "Home"),
            ("Tags (People)", "Alex"),
            ("Tags (Events)", "Breakfast"),
            ("Exercise", "0.5"),
            ("Sleep", "7.456"),
            ("Steps", "10412.129"),
            ("Meditation", "15"),
            ("Weather", "Sunny"),
            ("Notes", "slow morning"),
            ("Temperature (F)", "98.6"),
        ]))
        .expect("transform");

        assert_eq!(record.date.as_deref(), Some("2024-07-05T08:30:00Z"));
        assert_eq!(record.name, None, "title is generated later");
        assert_eq!(record.mood.as_deref(), Some("Calm;Content"));
        assert_eq!(record.places.as_deref(), Some("Home"));
        assert_eq!(record.sleep, Some(7.46));
        assert_eq!(record.steps, Some(10412.13));
        assert_eq!(record.meditation, Some(15.0));
        assert_eq!(record.temperature, Some(37.0));
        assert_eq!(record.notes.as_deref(), Some("slow morning"));
    }

    #[test]
    fn primary_column_wins_over_alternate() {
        let record = transform_row(&row(&[
            ("Date", "2024 Fri Jul 05 08:30 AM"),
            ("Places", "Office"),
            ("Tags (Places)", "Home"),
        ]))
        .expect("transform");
        assert_eq!(record.places.as_deref(), Some("Office"));
    }

    #[test]
    fn unparseable_date_is_a_structural_error() {
        let error = transform_row(&row(&[("Date", "not a date"), ("Mood", "Calm")]))
            .expect_err("undated row must not transform");
        assert!(matches!(error, TransformError::UndatedRow { .. }));

        let error = transform_row(&row(&[("Mood", "Calm")])).expect_err("missing date column");
        assert!(matches!(error, TransformError::UndatedRow { .. }));
    }

    #[test]
    fn malformed_numerics_go_absent() {
        let record = transform_row(&row(&[
            ("Date", "2024 Fri Jul 05 08:30 AM"),
            ("Sleep", "plenty"),
            ("Steps", "nan"),
            ("Temperature (F)", ""),
        ]))
        .expect("transform");
        assert_eq!(record.sleep, None);
        assert_eq!(record.steps, None, "NaN is the missing-data sentinel");
        assert_eq!(record.temperature, None);
    }

    #[test]
    fn absent_cells_stay_absent() {
        let record =
            transform_row(&row(&[("Date", "2024 Fri Jul 05 08:30 AM")])).expect("transform");
        assert_eq!(record.mood, None);
        assert_eq!(record.weather, None);
        assert_eq!(record.notes, None);
        assert_eq!(record.exercise, None);
    }
}
