#![deny(unsafe_code)]

/// The normalized, internal representation of one diary entry.
///
/// Multi-valued fields (`mood`, `places`, `people`, `events`) keep the
/// source's semicolon-delimited encoding; the payload builder splits them.
/// `None` always means the source cell was genuinely absent; the
/// transformer never fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanonicalRecord {
    /// Generated display title; populated by the title generator, not the
    /// transformer.
    pub name: Option<String>,
    /// Canonical UTC RFC 3339 timestamp (`YYYY-MM-DDTHH:MM:SSZ`).
    pub date: Option<String>,
    pub mood: Option<String>,
    pub places: Option<String>,
    pub people: Option<String>,
    pub events: Option<String>,
    pub exercise: Option<f64>,
    pub sleep: Option<f64>,
    pub steps: Option<f64>,
    pub meditation: Option<f64>,
    pub weather: Option<String>,
    pub notes: Option<String>,
    /// Degrees Celsius, converted from the source's Fahrenheit column.
    pub temperature: Option<f64>,
}

impl CanonicalRecord {
    /// The uniqueness criterion for skip-on-rerun logic.
    pub fn dedup_key(&self) -> Option<&str> {
        self.date.as_deref()
    }
}
