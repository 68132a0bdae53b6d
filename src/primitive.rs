use crate::{DecodeError, Decoder, ErrorKind};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

// JavaScript's Date range: 100,000,000 days either side of the epoch.
const MAX_TIMESTAMP_MILLIS: f64 = 8.64e15;

#[derive(Clone, Copy, Debug, Default)]
pub struct StringDecoder;

#[derive(Clone, Copy, Debug, Default)]
pub struct NumberDecoder;

#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanDecoder;

#[derive(Clone, Copy, Debug, Default)]
pub struct UndefDecoder;

#[derive(Clone, Copy, Debug, Default)]
pub struct NilDecoder;

#[derive(Clone, Copy, Debug, Default)]
pub struct DateDecoder;

pub fn string() -> StringDecoder {
    StringDecoder
}

pub fn number() -> NumberDecoder {
    NumberDecoder
}

pub fn boolean() -> BooleanDecoder {
    BooleanDecoder
}

/// Accepts only an absent value.
pub fn undef() -> UndefDecoder {
    UndefDecoder
}

/// Accepts only JSON `null`.
pub fn nil() -> NilDecoder {
    NilDecoder
}

/// Accepts RFC 3339 text, a bare `YYYY-MM-DD` date, or a number of
/// milliseconds since the Unix epoch.
pub fn date() -> DateDecoder {
    DateDecoder
}

impl Decoder for StringDecoder {
    type Output = String;

    fn decode_input(&self, input: Option<&Value>) -> Result<String, DecodeError> {
        match input {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(DecodeError::type_mismatch("string", input)),
        }
    }
}

impl Decoder for NumberDecoder {
    type Output = f64;

    fn decode_input(&self, input: Option<&Value>) -> Result<f64, DecodeError> {
        match input.and_then(Value::as_f64) {
            Some(n) => Ok(n),
            None => Err(DecodeError::type_mismatch("number", input)),
        }
    }
}

impl Decoder for BooleanDecoder {
    type Output = bool;

    fn decode_input(&self, input: Option<&Value>) -> Result<bool, DecodeError> {
        match input {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(DecodeError::type_mismatch("boolean", input)),
        }
    }
}

impl Decoder for UndefDecoder {
    type Output = ();

    fn decode_input(&self, input: Option<&Value>) -> Result<(), DecodeError> {
        match input {
            None => Ok(()),
            Some(_) => Err(DecodeError::type_mismatch("absent", input)),
        }
    }
}

impl Decoder for NilDecoder {
    type Output = ();

    fn decode_input(&self, input: Option<&Value>) -> Result<(), DecodeError> {
        match input {
            Some(Value::Null) => Ok(()),
            _ => Err(DecodeError::type_mismatch("null", input)),
        }
    }
}

impl Decoder for DateDecoder {
    type Output = DateTime<Utc>;

    fn decode_input(&self, input: Option<&Value>) -> Result<DateTime<Utc>, DecodeError> {
        match input {
            Some(Value::String(s)) => parse_timestamp(s),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(millis) => timestamp_from_millis(millis),
                None => Err(invalid_timestamp(n.to_string(), "not representable")),
            },
            _ => Err(DecodeError::type_mismatch("string or number", input)),
        }
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DecodeError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(datetime) => Ok(datetime.with_timezone(&Utc)),
        Err(err) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| invalid_timestamp(format!("{:?}", s), &err.to_string())),
    }
}

fn timestamp_from_millis(millis: f64) -> Result<DateTime<Utc>, DecodeError> {
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MILLIS {
        return Err(invalid_timestamp(millis.to_string(), "out of range"));
    }

    Utc.timestamp_millis_opt(millis.trunc() as i64)
        .single()
        .ok_or_else(|| invalid_timestamp(millis.to_string(), "out of range"))
}

fn invalid_timestamp(found: String, reason: &str) -> DecodeError {
    DecodeError::new(ErrorKind::InvalidTimestamp {
        found,
        reason: reason.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;
    use serde_json::json;

    fn samples() -> Vec<Option<Value>> {
        vec![
            None,
            Some(json!(null)),
            Some(json!(true)),
            Some(json!(-2.5)),
            Some(json!("text")),
            Some(json!([1])),
            Some(json!({ "a": 1 })),
        ]
    }

    fn assert_accepts_only<D: Decoder>(decoder: D, expected: &'static str, accepted: Kind) {
        for sample in samples() {
            let found = Kind::of(sample.as_ref());
            let result = decoder.decode_input(sample.as_ref());

            if found == accepted {
                assert!(result.is_ok(), "{} should accept {}", expected, found);
            } else {
                assert_eq!(
                    ErrorKind::TypeMismatch { expected, found },
                    result.err().unwrap().kind
                );
            }
        }
    }

    #[test]
    fn kinds() {
        assert_accepts_only(string(), "string", Kind::String);
        assert_accepts_only(number(), "number", Kind::Number);
        assert_accepts_only(boolean(), "boolean", Kind::Boolean);
        assert_accepts_only(undef(), "absent", Kind::Absent);
        assert_accepts_only(nil(), "null", Kind::Null);
    }

    #[test]
    fn values_unchanged() {
        assert_eq!("text", string().decode(&json!("text")).unwrap());
        assert_eq!(-2.5, number().decode(&json!(-2.5)).unwrap());
        assert_eq!(7.0, number().decode(&json!(7)).unwrap());
        assert!(!boolean().decode(&json!(false)).unwrap());
        assert!(undef().decode_absent().is_ok());
        assert!(nil().decode(&json!(null)).is_ok());
    }

    #[test]
    fn date_from_text() {
        assert_eq!(
            Utc.with_ymd_and_hms(2020, 1, 2, 1, 4, 5).unwrap(),
            date().decode(&json!("2020-01-02T03:04:05+02:00")).unwrap()
        );
        assert_eq!(
            Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap(),
            date().decode(&json!("1999-12-31")).unwrap()
        );
    }

    #[test]
    fn date_from_millis() {
        assert_eq!(
            Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap(),
            date().decode(&json!(1000)).unwrap()
        );
        assert_eq!(
            Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap(),
            date().decode(&json!(1000.9)).unwrap()
        );
    }

    #[test]
    fn date_rejects() {
        match date().decode(&json!("yesterday")).unwrap_err().kind {
            ErrorKind::InvalidTimestamp { found, .. } => assert_eq!("\"yesterday\"", found),
            kind => panic!("unexpected error kind: {:?}", kind),
        }

        match date().decode(&json!(1e16)).unwrap_err().kind {
            ErrorKind::InvalidTimestamp { reason, .. } => assert_eq!("out of range", reason),
            kind => panic!("unexpected error kind: {:?}", kind),
        }

        assert_eq!(
            ErrorKind::TypeMismatch {
                expected: "string or number",
                found: Kind::Boolean,
            },
            date().decode(&json!(true)).unwrap_err().kind
        );
    }
}
