use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NULL_FIELD: &str = "Field may not be null.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for errors that concern the payload as a whole.
pub const SCHEMA_KEY: &str = "_schema";

/// Field name -> human readable messages, returned verbatim as a 400 body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(SCHEMA_KEY, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Reads required fields out of a JSON object, collecting every problem
/// instead of stopping at the first one.
pub struct PayloadReader<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> PayloadReader<'a> {
    /// Fails with an `_schema` error when the payload is not a JSON object.
    pub fn new(payload: &'a Value) -> Result<Self, FieldErrors> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                errors: FieldErrors::new(),
            }),
            _ => Err(FieldErrors::schema(INVALID_INPUT)),
        }
    }

    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.object.get(field) {
            None => {
                self.errors.add(field, MISSING_FIELD);
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NULL_FIELD);
                None
            }
            Some(value) => Some(value),
        }
    }

    pub fn string(&mut self, field: &str) -> Option<String> {
        match self.required(field)? {
            Value::String(value) => Some(value.clone()),
            _ => {
                self.errors.add(field, "Not a valid string.");
                None
            }
        }
    }

    pub fn integer(&mut self, field: &str) -> Option<i32> {
        let value = self.required(field)?;
        let parsed = match value {
            Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(text) => text.trim().parse::<i32>().ok(),
            _ => None,
        };

        if parsed.is_none() {
            self.errors.add(field, "Not a valid integer.");
        }
        parsed
    }

    pub fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let parsed = match self.required(field)? {
            Value::String(text) => parse_date(text),
            _ => None,
        };

        if parsed.is_none() {
            self.errors.add(field, "Not a valid date.");
        }
        parsed
    }

    pub fn time(&mut self, field: &str) -> Option<NaiveTime> {
        let parsed = match self.required(field)? {
            Value::String(text) => parse_time(text),
            _ => None,
        };

        if parsed.is_none() {
            self.errors.add(field, "Not a valid time.");
        }
        parsed
    }

    /// Flags every key that is not part of the input schema, including the
    /// system-assigned identifiers.
    pub fn reject_unknown(&mut self, allowed: &[&str]) {
        for key in self.object.keys() {
            if !allowed.contains(&key.as_str()) {
                self.errors.add(key, UNKNOWN_FIELD);
            }
        }
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        // chrono encodes a leap second as nanoseconds past one billion
        .filter(|time| time.nanosecond() < 1_000_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_non_object_payload_is_schema_error() {
        let errors = PayloadReader::new(&json!(["name"])).err().unwrap();
        assert_eq!(errors.messages(SCHEMA_KEY), &[INVALID_INPUT.to_string()]);
    }

    #[test]
    fn test_collects_all_field_errors() {
        let payload = json!({ "name": 42, "date": "yesterday", "extra": true });
        let mut reader = PayloadReader::new(&payload).unwrap();

        assert_eq!(reader.string("name"), None);
        assert_eq!(reader.string("email"), None);
        assert_eq!(reader.date("date"), None);
        reader.reject_unknown(&["name", "email", "date"]);

        let errors = reader.finish().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["date", "email", "extra", "name"]);
        assert_eq!(errors.messages("email"), &[MISSING_FIELD.to_string()]);
        assert_eq!(errors.messages("extra"), &[UNKNOWN_FIELD.to_string()]);
    }

    #[test]
    fn test_null_is_reported_separately_from_missing() {
        let payload = json!({ "name": null });
        let mut reader = PayloadReader::new(&payload).unwrap();
        reader.string("name");

        let errors = reader.finish().unwrap_err();
        assert_eq!(errors.messages("name"), &[NULL_FIELD.to_string()]);
    }

    #[test]
    fn test_integer_accepts_numeric_strings() {
        let payload = json!({ "a": 7, "b": "12", "c": 1.5, "d": true, "e": 9_999_999_999i64 });
        let mut reader = PayloadReader::new(&payload).unwrap();

        assert_eq!(reader.integer("a"), Some(7));
        assert_eq!(reader.integer("b"), Some(12));
        assert_eq!(reader.integer("c"), None);
        assert_eq!(reader.integer("d"), None);
        assert_eq!(reader.integer("e"), None);
    }

    #[test]
    fn test_time_formats() {
        assert_eq!(parse_time("14:30:00"), NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(parse_time("07:05"), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time("23:59:59.250"), NaiveTime::from_hms_milli_opt(23, 59, 59, 250));
        assert_eq!(parse_time("25:00:00"), None);
        assert_eq!(parse_time("noon"), None);
        assert_eq!(parse_time("23:59:60"), None);
        assert_eq!(parse_time("12:00:60.5"), None);
    }

    #[test]
    fn test_date_format() {
        assert_eq!(parse_date("2024-01-15"), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(parse_date("15/01/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }
}
