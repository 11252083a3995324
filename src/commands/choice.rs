//! Option choices and their wire values
//!
//! - **Version**: 1.0.1
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.1: Reject non-finite number choices in debug builds
//! - 1.0.0: Typed choice values, snowflake ids serialized as strings

use serde::{Serialize, Serializer};
use std::fmt;

/// Opaque platform identifier (user, role, channel or mentionable id)
///
/// Discord snowflakes exceed the safe integer range of JSON consumers, so
/// they always travel as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(pub u64);

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Snowflake(id)
    }
}

/// A choice value as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Integer(i64),
    /// Must be finite: JSON has no NaN or infinity and `serde_json` writes
    /// them as `null`, which the platform rejects
    Number(f64),
    String(String),
    Boolean(bool),
    Id(Snowflake),
}

impl ChoiceValue {
    /// Whether the value serializes to itself rather than `null`
    pub fn is_representable(&self) -> bool {
        match self {
            ChoiceValue::Number(n) => n.is_finite(),
            _ => true,
        }
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        ChoiceValue::Integer(value)
    }
}

impl From<f64> for ChoiceValue {
    fn from(value: f64) -> Self {
        ChoiceValue::Number(value)
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        ChoiceValue::String(value)
    }
}

impl From<bool> for ChoiceValue {
    fn from(value: bool) -> Self {
        ChoiceValue::Boolean(value)
    }
}

impl From<Snowflake> for ChoiceValue {
    fn from(value: Snowflake) -> Self {
        ChoiceValue::Id(value)
    }
}

/// Built `{name, value}` pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceRecord {
    pub name: String,
    pub value: ChoiceValue,
}

/// Display key -> value map that remembers first-insertion order
///
/// Re-adding an existing key replaces its value in place (last write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct Choices<T> {
    entries: Vec<(String, T)>,
}

impl<T> Choices<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: String, value: T) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T: Clone + Into<ChoiceValue>> Choices<T> {
    pub fn build(&self) -> Vec<ChoiceRecord> {
        self.entries
            .iter()
            .map(|(name, value)| ChoiceRecord {
                name: name.clone(),
                value: value.clone().into(),
            })
            .collect()
    }
}

impl<T> Default for Choices<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_choices_overwrite_keeps_position() {
        let mut choices = Choices::new();
        choices.insert("a".to_string(), 1_i64);
        choices.insert("b".to_string(), 2);
        choices.insert("a".to_string(), 3);

        let keys: Vec<&str> = choices.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(choices.get("a"), Some(&3));
        assert_eq!(choices.len(), 2);
    }

    #[test]
    fn test_choices_allow_duplicate_values() {
        let mut choices = Choices::new();
        choices.insert("first".to_string(), "same".to_string());
        choices.insert("second".to_string(), "same".to_string());
        assert_eq!(choices.len(), 2);
    }

    #[test]
    fn test_non_finite_number_is_not_representable() {
        assert!(ChoiceValue::from(2.5).is_representable());
        assert!(!ChoiceValue::from(f64::NAN).is_representable());
        assert!(!ChoiceValue::from(f64::INFINITY).is_representable());
        assert!(!ChoiceValue::from(f64::NEG_INFINITY).is_representable());
        assert!(ChoiceValue::from(i64::MAX).is_representable());
        assert!(ChoiceValue::from("nan".to_string()).is_representable());

        // What slips through in release builds
        assert_eq!(
            serde_json::to_value(ChoiceValue::from(f64::NAN)).unwrap(),
            json!(null)
        );
    }

    #[test]
    fn test_snowflake_serializes_as_string() {
        let record = ChoiceRecord {
            name: "admin".to_string(),
            value: Snowflake(80351110224678912).into(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"name": "admin", "value": "80351110224678912"})
        );
    }

    #[test]
    fn test_choice_values_serialize_untagged() {
        assert_eq!(serde_json::to_value(ChoiceValue::Integer(7)).unwrap(), json!(7));
        assert_eq!(serde_json::to_value(ChoiceValue::Number(1.5)).unwrap(), json!(1.5));
        assert_eq!(serde_json::to_value(ChoiceValue::Boolean(true)).unwrap(), json!(true));
        assert_eq!(
            serde_json::to_value(ChoiceValue::String("x".into())).unwrap(),
            json!("x")
        );
    }
}
