//! Resolution of loosely-typed date of birth input into a single calendar date.
//!
//! Digit-only input must be exactly eight digits and is read as `YYYYMMDD`, then `DDMMYYYY`.
//! Anything else is matched against a fixed list of structured formats in order, and only when
//! none of them accepts the whole input is the free-text parser consulted.

pub mod free_text;

#[cfg(test)]
mod test;

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::MalformedDataError;

/// Representations a caller may supply a date of birth in.
#[derive(Clone, Debug, PartialEq)]
pub enum DateOfBirth {
    Date(Date),
    DateTime(OffsetDateTime),
    PrimitiveDateTime(PrimitiveDateTime),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<Date> for DateOfBirth {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<OffsetDateTime> for DateOfBirth {
    fn from(value: OffsetDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<PrimitiveDateTime> for DateOfBirth {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::PrimitiveDateTime(value)
    }
}

impl From<i32> for DateOfBirth {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for DateOfBirth {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for DateOfBirth {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for DateOfBirth {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DateOfBirth {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DateOfBirth {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// How a candidate format turns the input into a date.
#[derive(Clone, Copy)]
enum Interpreter {
    Date(&'static [BorrowedFormatItem<'static>]),
    Rfc3339,
    Iso8601,
}

impl Interpreter {
    fn interpret(self, input: &str) -> Option<Date> {
        match self {
            Interpreter::Date(description) => Date::parse(input, description).ok(),
            Interpreter::Rfc3339 => OffsetDateTime::parse(input, &Rfc3339)
                .ok()
                .map(|value| value.date()),
            Interpreter::Iso8601 => OffsetDateTime::parse(input, &Iso8601::DEFAULT)
                .ok()
                .map(|value| value.date()),
        }
    }
}

/// Structured formats, tried in order. Day-first wins over month-first for
/// inputs such as `01/02/2003`.
const CANDIDATE_FORMATS: [(&str, Interpreter); 8] = [
    (
        "YYYY-MM-DD",
        Interpreter::Date(format_description!(
            "[year]-[month padding:none]-[day padding:none]"
        )),
    ),
    (
        "YYYY/MM/DD",
        Interpreter::Date(format_description!(
            "[year]/[month padding:none]/[day padding:none]"
        )),
    ),
    (
        "DD/MM/YYYY",
        Interpreter::Date(format_description!(
            "[day padding:none]/[month padding:none]/[year]"
        )),
    ),
    (
        "DD-MM-YYYY",
        Interpreter::Date(format_description!(
            "[day padding:none]-[month padding:none]-[year]"
        )),
    ),
    (
        "MM/DD/YYYY",
        Interpreter::Date(format_description!(
            "[month padding:none]/[day padding:none]/[year]"
        )),
    ),
    (
        "MM-DD-YYYY",
        Interpreter::Date(format_description!(
            "[month padding:none]-[day padding:none]-[year]"
        )),
    ),
    ("RFC 3339", Interpreter::Rfc3339),
    ("ISO 8601", Interpreter::Iso8601),
];

const NUMERIC_FORMATS: [(&str, &[BorrowedFormatItem<'static>]); 2] = [
    ("YYYYMMDD", format_description!("[year][month][day]")),
    ("DDMMYYYY", format_description!("[day][month][year]")),
];

pub fn normalize(input: impl Into<DateOfBirth>) -> Result<Date, MalformedDataError> {
    normalize_at(input, OffsetDateTime::now_utc())
}

/// Same as [`normalize`], with `now` used for relative expressions and the future-date check.
pub fn normalize_at(
    input: impl Into<DateOfBirth>,
    now: OffsetDateTime,
) -> Result<Date, MalformedDataError> {
    let now = now.to_offset(UtcOffset::UTC);
    let text = match input.into() {
        DateOfBirth::Date(value) => return Ok(value),
        DateOfBirth::DateTime(value) => return Ok(value.date()),
        DateOfBirth::PrimitiveDateTime(value) => return Ok(value.date()),
        DateOfBirth::Integer(value) => value.to_string(),
        DateOfBirth::Float(value) if value.is_finite() => value.to_string(),
        DateOfBirth::Float(_) => return Err(MalformedDataError::UnsupportedInput),
        DateOfBirth::Text(value) => value,
    };
    let text = text.trim();

    if !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit()) {
        return normalize_numeric(text);
    }

    if let Some((name, date)) = CANDIDATE_FORMATS
        .iter()
        .find_map(|(name, interpreter)| interpreter.interpret(text).map(|date| (name, date)))
    {
        tracing::trace!(format = *name, "date of birth matched structured format");
        return Ok(date);
    }

    let parsed =
        free_text::parse(text, now).map_err(|source| MalformedDataError::InvalidString {
            input: text.to_owned(),
            source,
        })?;

    if parsed > now {
        return Err(MalformedDataError::FutureDate(parsed.date()));
    }

    Ok(parsed.date())
}

/// `DD/MM/YYYY`, as expected by the update service query.
pub fn format_for_query(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

fn normalize_numeric(text: &str) -> Result<Date, MalformedDataError> {
    if text.len() != 8 {
        return Err(MalformedDataError::UnsupportedNumericLength(text.len()));
    }

    NUMERIC_FORMATS
        .iter()
        .find_map(|(_, description)| Date::parse(text, *description).ok())
        .ok_or_else(|| MalformedDataError::InvalidNumericDate(text.to_owned()))
}
