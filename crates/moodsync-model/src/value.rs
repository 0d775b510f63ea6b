#![deny(unsafe_code)]

use std::fmt;

/// A dynamically-typed scalar read from one source cell.
///
/// `Missing` is distinct from an empty string and from zero: the source
/// export leaves cells blank when no data was recorded, and downstream
/// stages must never synthesize a value for those cells.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Missing,
}

impl FieldValue {
    /// Presence rule for payload construction.
    ///
    /// The asymmetry is deliberate and preserved from the source system:
    /// an empty string is still "present" (it was recorded, just blank),
    /// while a NaN numeric is the missing-data sentinel and is absent.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(_) => true,
            Self::Number(value) => !value.is_nan(),
            Self::Missing => false,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Borrow the text content, if this cell holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Coerce to a floating value.
    ///
    /// Text cells are parsed after trimming; blank or unparseable text
    /// yields `None`. Note that `"nan"` parses to a NaN float, which the
    /// presence rule then treats as absent.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()
            }
            Self::Missing => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Number(value) => write!(f, "{}", format_numeric(*value)),
            Self::Missing => Ok(()),
        }
    }
}

/// Render a float without a trailing `.0` for whole values.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_present() {
        assert!(FieldValue::Text(String::new()).is_present());
    }

    #[test]
    fn nan_number_is_absent() {
        assert!(!FieldValue::Number(f64::NAN).is_present());
        assert!(FieldValue::Number(0.0).is_present());
    }

    #[test]
    fn missing_is_absent() {
        assert!(!FieldValue::Missing.is_present());
    }

    #[test]
    fn text_parses_to_float() {
        assert_eq!(FieldValue::Text(" 7.25 ".to_string()).as_f64(), Some(7.25));
        assert_eq!(FieldValue::Text("n/a".to_string()).as_f64(), None);
        assert_eq!(FieldValue::Text(String::new()).as_f64(), None);
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(format_numeric(8.0), "8");
        assert_eq!(format_numeric(7.25), "7.25");
    }
}
