use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use super::{Descriptor, mismatch};
use crate::error::CoercionError;
use crate::validation::{Breadcrumb, kind_of};

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("UUID pattern is valid")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

const TRUTHY: &[&str] = &["true", "1", "yes", "y", "t", "on"];
const FALSY: &[&str] = &["false", "0", "no", "n", "f", "off"];

/// Exactly `true` or `false`.
///
/// Coercion understands the usual textual and numeric spellings
/// (`"true"`, `"1"`, `1`, `"no"`, `"off"`, ...). Anything else is ambiguous
/// and fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanType;

impl Descriptor for BooleanType {
    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        if !value.is_boolean() {
            mismatch(at, errors, "boolean", value);
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let parsed = match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => match number.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Value::String(text) => {
                let text = text.trim().to_ascii_lowercase();
                if TRUTHY.contains(&text.as_str()) {
                    Some(true)
                } else if FALSY.contains(&text.as_str()) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        };
        parsed
            .map(Value::Bool)
            .ok_or_else(|| CoercionError::new(value, "boolean", "ambiguous boolean value"))
    }

    fn to_json_schema(&self) -> Value {
        json!({ "type": "boolean" })
    }
}

/// Calendar dates in ISO-8601 form (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateType;

impl DateType {
    /// Parses `text` as a date. Full timestamps are accepted and truncated
    /// to the date they name in their own offset: `2024-05-01T23:30:00-05:00`
    /// is `2024-05-01`.
    pub fn parse(text: &str) -> Result<NaiveDate, String> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, "%Y-%m-%d").or_else(|date_err| {
            if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
                return Ok(timestamp.date_naive());
            }
            DateTimeType::parse(text)
                .map(|timestamp| timestamp.date_naive())
                .map_err(|_| date_err.to_string())
        })
    }
}

impl Descriptor for DateType {
    fn type_name(&self) -> &'static str {
        "date"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Value::String(text) = value else {
            mismatch(at, errors, "date string", value);
            return;
        };
        if let Err(reason) = Self::parse(text) {
            at.report(errors, format_args!("invalid date: {reason}"));
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let Value::String(text) = value else {
            return Err(CoercionError::new(
                value,
                "date",
                format!("cannot convert {} to date", kind_of(value)),
            ));
        };
        Self::parse(text)
            .map(|date| json!(date.format("%Y-%m-%d").to_string()))
            .map_err(|reason| CoercionError::new(value, "date", reason))
    }

    fn to_json_schema(&self) -> Value {
        json!({ "type": "string", "format": "date" })
    }
}

/// Timestamps in ISO-8601 / RFC 3339 form.
///
/// Values without an offset are read as UTC. Coercion normalizes to an
/// RFC 3339 string in UTC (`2024-05-01T12:00:00Z`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeType;

impl DateTimeType {
    /// Parses `text` as a timestamp.
    pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
        let text = text.trim();
        let rfc3339_err = match DateTime::parse_from_rfc3339(text) {
            Ok(parsed) => return Ok(parsed.with_timezone(&Utc)),
            Err(err) => err,
        };
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .map_err(|_| rfc3339_err.to_string())
    }
}

impl Descriptor for DateTimeType {
    fn type_name(&self) -> &'static str {
        "datetime"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        let Value::String(text) = value else {
            mismatch(at, errors, "datetime string", value);
            return;
        };
        if let Err(reason) = Self::parse(text) {
            at.report(errors, format_args!("invalid datetime: {reason}"));
        }
    }

    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let Value::String(text) = value else {
            return Err(CoercionError::new(
                value,
                "datetime",
                format!("cannot convert {} to datetime", kind_of(value)),
            ));
        };
        Self::parse(text)
            .map(|timestamp| json!(timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
            .map_err(|reason| CoercionError::new(value, "datetime", reason))
    }

    fn to_json_schema(&self) -> Value {
        json!({ "type": "string", "format": "date-time" })
    }
}

/// Hyphenated hexadecimal UUIDs (`8-4-4-4-12`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidType;

impl Descriptor for UuidType {
    fn type_name(&self) -> &'static str {
        "uuid"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        match value {
            Value::String(text) if UUID_PATTERN.is_match(text) => {}
            Value::String(_) => at.report(errors, "must be a valid UUID"),
            other => mismatch(at, errors, "string", other),
        }
    }

    /// Trims and lowercases; no other conversion.
    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        normalized_text(value, "uuid").map(|text| json!(text.to_ascii_lowercase()))
    }

    fn to_json_schema(&self) -> Value {
        json!({ "type": "string", "format": "uuid" })
    }
}

/// Email addresses, checked with a practical subset of RFC 5322.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailType;

impl Descriptor for EmailType {
    fn type_name(&self) -> &'static str {
        "email"
    }

    fn validate_at(&self, value: &Value, at: &Breadcrumb, errors: &mut Vec<String>) {
        match value {
            Value::String(text) if EMAIL_PATTERN.is_match(text) => {}
            Value::String(_) => at.report(errors, "must be a valid email address"),
            other => mismatch(at, errors, "string", other),
        }
    }

    /// Trims and lowercases the domain; the local part is kept as written.
    fn coerce(&self, value: &Value) -> Result<Value, CoercionError> {
        let text = normalized_text(value, "email")?;
        let normalized = match text.rsplit_once('@') {
            Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
            None => text,
        };
        Ok(json!(normalized))
    }

    fn to_json_schema(&self) -> Value {
        json!({ "type": "string", "format": "email" })
    }
}

fn normalized_text(value: &Value, target: &'static str) -> Result<String, CoercionError> {
    match value {
        Value::String(text) => Ok(text.trim().to_string()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(CoercionError::new(
            value,
            target,
            format!("cannot convert {} to {target}", kind_of(other)),
        )),
    }
}
