//! Permissive, locale-independent date parsing used as the last resort for date of birth input.

use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc2822;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Error)]
pub enum FreeTextError {
    #[error("empty date expression")]
    Empty,
    #[error("unrecognised date expression")]
    Unrecognised,
    #[error("date out of range")]
    OutOfRange,
    #[error("invalid calendar date: {0}")]
    InvalidDate(#[from] time::error::ComponentRange),
}

const DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!(
        "[year]-[month padding:none]-[day padding:none] [hour padding:none]:[minute][optional [:[second]]]"
    ),
    format_description!(
        "[year]-[month padding:none]-[day padding:none]T[hour]:[minute][optional [:[second]]]"
    ),
];

const DOTTED_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none].[month padding:none].[year]");

const MONTHS: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, PartialEq)]
enum Token {
    Month(Month),
    Number { value: u32, digits: usize },
}

/// Parses `input` into a date-time, midnight when no time of day is given.
/// Input carrying an offset keeps it; anything else is read as UTC.
/// Relative expressions are resolved against `now`.
pub(crate) fn parse(input: &str, now: OffsetDateTime) -> Result<OffsetDateTime, FreeTextError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FreeTextError::Empty);
    }

    let lowercase = input.to_ascii_lowercase();
    if let Some(value) = parse_relative(&lowercase, now)? {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = OffsetDateTime::parse(input, &Rfc2822) {
        return Ok(value);
    }

    if let Some(value) = DATE_TIME_FORMATS
        .iter()
        .find_map(|description| PrimitiveDateTime::parse(input, *description).ok())
    {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = Date::parse(input, DOTTED_FORMAT) {
        return Ok(value.midnight().assume_utc());
    }

    parse_textual(&lowercase).map(|date| date.midnight().assume_utc())
}

fn parse_relative(
    input: &str,
    now: OffsetDateTime,
) -> Result<Option<PrimitiveDateTime>, FreeTextError> {
    let today = now.date();

    let value = match input {
        "now" => PrimitiveDateTime::new(today, now.time()),
        "today" | "midnight" => today.midnight(),
        "yesterday" => today
            .previous_day()
            .ok_or(FreeTextError::OutOfRange)?
            .midnight(),
        "tomorrow" => today.next_day().ok_or(FreeTextError::OutOfRange)?.midnight(),
        _ => return Ok(None),
    };

    Ok(Some(value))
}

/// Day, month name and four-digit year in any order, e.g. `Saturday 1st January, 2000`,
/// `Jan-01-2000` or `2000 jan 1`.
fn parse_textual(input: &str) -> Result<Date, FreeTextError> {
    let mut month = None;
    let mut numbers = Vec::new();

    for word in input
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | '/' | '.'))
        .filter(|word| !word.is_empty())
    {
        if is_weekday(word) {
            continue;
        }

        match tokenize(word).ok_or(FreeTextError::Unrecognised)? {
            Token::Month(value) if month.is_none() => month = Some(value),
            Token::Month(_) => return Err(FreeTextError::Unrecognised),
            Token::Number { value, digits } => numbers.push((value, digits)),
        }
    }

    let month = month.ok_or(FreeTextError::Unrecognised)?;
    let (year, day) = match numbers.as_slice() {
        [(year, 4), (day, 1..=2)] | [(day, 1..=2), (year, 4)] => (*year, *day),
        _ => return Err(FreeTextError::Unrecognised),
    };

    let year = i32::try_from(year).map_err(|_| FreeTextError::OutOfRange)?;
    let day = u8::try_from(day).map_err(|_| FreeTextError::OutOfRange)?;

    Ok(Date::from_calendar_date(year, month, day)?)
}

fn tokenize(word: &str) -> Option<Token> {
    if let Some(month) = month_from_name(word) {
        return Some(Token::Month(month));
    }

    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word);

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    Some(Token::Number {
        value: digits.parse().ok()?,
        digits: digits.len(),
    })
}

/// Full English month name or any prefix of at least three letters.
fn month_from_name(word: &str) -> Option<Month> {
    if word.len() < 3 {
        return None;
    }

    MONTHS
        .iter()
        .find(|(name, _)| name.starts_with(word))
        .map(|(_, month)| *month)
}

fn is_weekday(word: &str) -> bool {
    word.len() >= 3 && WEEKDAYS.iter().any(|name| name.starts_with(word))
}
