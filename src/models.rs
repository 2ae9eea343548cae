use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A response field the user can choose to display
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Numbers,
    #[serde(rename = "alphabets")]
    Alphabets,
    #[serde(rename = "highest_lowercase_alphabet")]
    HighestLowercaseAlphabet,
}

impl Field {
    /// The fixed universe, in display order
    pub const ALL: [Field; 3] = [Field::Numbers, Field::Alphabets, Field::HighestLowercaseAlphabet];

    /// Key in the response body (also the checklist label)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Numbers => "numbers",
            Field::Alphabets => "alphabets",
            Field::HighestLowercaseAlphabet => "highest_lowercase_alphabet",
        }
    }

    /// Label used in the filtered response
    pub fn label(&self) -> &'static str {
        match self {
            Field::Numbers => "Numbers",
            Field::Alphabets => "Alphabets",
            Field::HighestLowercaseAlphabet => "Highest lowercase alphabet",
        }
    }

    /// Caption of the selection badge
    pub fn badge(&self) -> &'static str {
        match self {
            Field::Numbers => "Numbers",
            Field::Alphabets => "alphabets",
            Field::HighestLowercaseAlphabet => "highest_lowercase_alphabet",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Field::Numbers => 0,
            Field::Alphabets => 1,
            Field::HighestLowercaseAlphabet => 2,
        }
    }
}

/// The set of fields picked for display. Only membership matters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedFields(BTreeSet<Field>);

impl SelectedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the field if absent, remove it if present
    pub fn toggle(&mut self, field: Field) {
        if !self.0.remove(&field) {
            self.0.insert(field);
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected fields in universe order
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl FromIterator<Field> for SelectedFields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        SelectedFields(iter.into_iter().collect())
    }
}

/// Response body as returned by the endpoint, stored without validation
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsePayload(pub Value);

impl ResponsePayload {
    pub fn new(value: Value) -> Self {
        ResponsePayload(value)
    }

    /// Falsy bodies (`null`, `false`, `0`, `""`) count as no response at all
    pub fn is_present(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.as_str())
    }

    /// Display text for a field; sequences are joined with ", ",
    /// a missing key yields an empty string
    pub fn display(&self, field: Field) -> String {
        self.get(field).map(display_value).unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Whole floats print without a fractional part (`2.0` shows as `2`)
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => String::from("0"),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// Transport details of the stored response
#[derive(Clone, Debug)]
pub struct ResponseMeta {
    pub status: u16,
    pub time_ms: u64,
    pub received_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut selected: SelectedFields = [Field::Alphabets].into_iter().collect();
        let before = selected.clone();
        selected.toggle(Field::Numbers);
        assert!(selected.contains(Field::Numbers));
        selected.toggle(Field::Numbers);
        assert_eq!(selected, before);
    }

    #[test]
    fn test_iter_follows_universe_order() {
        let mut selected = SelectedFields::new();
        selected.toggle(Field::HighestLowercaseAlphabet);
        selected.toggle(Field::Numbers);
        let order: Vec<Field> = selected.iter().collect();
        assert_eq!(order, vec![Field::Numbers, Field::HighestLowercaseAlphabet]);
    }

    #[test]
    fn test_display_whole_floats_as_integers() {
        let payload = ResponsePayload::new(json!({ "numbers": [2.0, 2.5, -0.0, 1e20, 4] }));
        assert_eq!(payload.display(Field::Numbers), "2, 2.5, 0, 100000000000000000000, 4");
    }

    #[test]
    fn test_falsy_bodies_are_absent() {
        for body in [json!(""), json!(false), json!(0), json!(0.0), Value::Null] {
            assert!(!ResponsePayload::new(body.clone()).is_present(), "{body}");
        }
        for body in [json!("ok"), json!(true), json!(1), json!([]), json!({})] {
            assert!(ResponsePayload::new(body.clone()).is_present(), "{body}");
        }
    }

    #[test]
    fn test_display_joins_sequences() {
        let payload = ResponsePayload::new(json!({
            "numbers": [2, "4"],
            "alphabets": ["a", "b"],
            "highest_lowercase_alphabet": ["b"]
        }));
        assert_eq!(payload.display(Field::Numbers), "2, 4");
        assert_eq!(payload.display(Field::Alphabets), "a, b");
        assert_eq!(payload.display(Field::HighestLowercaseAlphabet), "b");
    }

    #[test]
    fn test_display_missing_key_is_empty() {
        let payload = ResponsePayload::new(json!({ "is_success": true }));
        assert_eq!(payload.display(Field::Numbers), "");
        assert!(payload.is_present());
        assert!(!ResponsePayload::new(Value::Null).is_present());
    }

    #[test]
    fn test_field_serde_keys() {
        let text = serde_json::to_string(&Field::HighestLowercaseAlphabet).unwrap();
        assert_eq!(text, "\"highest_lowercase_alphabet\"");
        let field: Field = serde_json::from_str("\"numbers\"").unwrap();
        assert_eq!(field, Field::Numbers);
    }
}
