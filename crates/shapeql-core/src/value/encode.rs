use crate::value::Value;
use std::fmt::{self, Write as _};
use thiserror::Error as ThisError;
use time::{
    Date, Time,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

///
/// EncodeError
///

#[derive(Debug, ThisError)]
pub enum EncodeError {
    #[error("float literal must be finite")]
    NonFiniteFloat,

    #[error("'{name}' is not a valid enum literal")]
    InvalidEnumName { name: String },

    #[error("'{key}' is not a valid input object field name")]
    InvalidObjectKey { key: String },

    #[error("text encoding failed: {0}")]
    Text(#[from] serde_json::Error),

    #[error("date-time encoding failed: {0}")]
    DateTime(#[from] time::error::Format),

    #[error("{0}")]
    Custom(String),
}

///
/// LiteralEncoder
///
/// Turns a parameter value into text that is spliced verbatim into a
/// parameter list. The compiler makes no other assumption about the output.
/// Encoders run before the query's registry is read, so an encoder may
/// register scalars on it.
///

pub trait LiteralEncoder: Send + Sync {
    fn encode(&self, value: &Value) -> Result<String, EncodeError>;
}

impl<F> LiteralEncoder for F
where
    F: Fn(&Value) -> Result<String, EncodeError> + Send + Sync,
{
    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        self(value)
    }
}

///
/// GraphqlLiteralEncoder
///
/// Default encoder: JSON-style primitives, bare enum names, quoted ISO-8601
/// dates, `[a,b]` lists and `{k:v}` input objects.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GraphqlLiteralEncoder;

impl GraphqlLiteralEncoder {
    fn write(self, value: &Value, out: &mut String) -> Result<(), EncodeError> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => push_display(out, b),
            Value::Int(n) => push_display(out, n),
            Value::Uint(n) => push_display(out, n),
            Value::Int128(n) => push_display(out, n),
            Value::Uint128(n) => push_display(out, n),
            Value::Float(f) => {
                let number = serde_json::Number::from_f64(*f).ok_or(EncodeError::NonFiniteFloat)?;
                push_display(out, &number);
            }
            Value::Number(n) => push_display(out, n),
            Value::Text(s) => out.push_str(&serde_json::to_string(s)?),
            Value::Enum(name) => {
                if !is_graphql_name(name) {
                    return Err(EncodeError::InvalidEnumName { name: name.clone() });
                }
                out.push_str(name);
            }
            Value::Date(d) => push_quoted(out, format_date(*d)?),
            Value::Time(t) => push_quoted(out, format_time(*t)?),
            Value::LocalDateTime(dt) => {
                let (date, time) = (format_date(dt.date())?, format_time(dt.time())?);
                push_quoted(out, format_args!("{date}T{time}"));
            }
            Value::DateTime(dt) => push_quoted(out, dt.format(&Rfc3339)?),
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write(item, out)?;
                }
                out.push(']');
            }
            Value::Object(entries) => {
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if !is_graphql_name(key) {
                        return Err(EncodeError::InvalidObjectKey { key: key.clone() });
                    }
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(key);
                    out.push(':');
                    self.write(item, out)?;
                }
                out.push('}');
            }
        }

        Ok(())
    }
}

impl LiteralEncoder for GraphqlLiteralEncoder {
    fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        let mut out = String::new();
        self.write(value, &mut out)?;

        Ok(out)
    }
}

/// GraphQL `Name`: `[_A-Za-z][_0-9A-Za-z]*`.
#[must_use]
pub fn is_graphql_name(s: &str) -> bool {
    let mut chars = s.chars();

    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

// writing into a String cannot fail
fn push_display(out: &mut String, value: &impl fmt::Display) {
    let _ = write!(out, "{value}");
}

fn push_quoted(out: &mut String, value: impl fmt::Display) {
    let _ = write!(out, "\"{value}\"");
}

///
/// Date and time formats
///

// ISO-8601 calendar date, `2021-03-19`; negative years keep four digits: `-0001-01-01`
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

// shortest fraction that keeps every non-zero digit: `08:30:00.25`
const TIME_FRACTION_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:1+]");

fn format_date(date: Date) -> Result<String, EncodeError> {
    Ok(date.format(DATE_FORMAT)?)
}

fn format_time(time: Time) -> Result<String, EncodeError> {
    let format = if time.nanosecond() > 0 {
        TIME_FRACTION_FORMAT
    } else {
        TIME_FORMAT
    };

    Ok(time.format(format)?)
}
