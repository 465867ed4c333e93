use rstest::rstest;
use time::macros::{date, datetime};
use time::{Date, Month, OffsetDateTime};

use super::{DateOfBirth, format_for_query, normalize, normalize_at};
use crate::error::MalformedDataError;

const NOW: OffsetDateTime = datetime!(2024-06-15 10:30 UTC);

#[rstest]
#[case("20000101", date!(2000 - 01 - 01))]
#[case("19991231", date!(1999 - 12 - 31))]
#[case("31121999", date!(1999 - 12 - 31))]
#[case("01022003", date!(2003 - 02 - 01))]
#[case(" 20000101 ", date!(2000 - 01 - 01))]
fn test_eight_digit_dates(#[case] input: &str, #[case] expected: Date) {
    assert_eq!(normalize_at(input, NOW).unwrap(), expected);
}

#[test]
fn test_eight_digit_prefers_year_first() {
    // valid both as 2012-10-11 and as 20 December 1011
    assert_eq!(
        normalize_at("20121011", NOW).unwrap(),
        date!(2012 - 10 - 11)
    );
}

#[rstest]
#[case("20001301")]
#[case("32132000")]
#[case("00000000")]
#[case("99999999")]
fn test_invalid_eight_digit_dates(#[case] input: &str) {
    assert!(matches!(
        normalize_at(input, NOW),
        Err(MalformedDataError::InvalidNumericDate(value)) if value == input
    ));
}

#[rstest]
#[case("1", 1)]
#[case("2000", 4)]
#[case("2000011", 7)]
#[case("200001011", 9)]
#[case("012345678901", 12)]
fn test_other_numeric_lengths_rejected(#[case] input: &str, #[case] length: usize) {
    assert!(matches!(
        normalize_at(input, NOW),
        Err(MalformedDataError::UnsupportedNumericLength(value)) if value == length
    ));
}

#[test]
fn test_numeric_inputs() {
    assert_eq!(normalize_at(20000101, NOW).unwrap(), date!(2000 - 01 - 01));
    assert_eq!(
        normalize_at(20000101_i64, NOW).unwrap(),
        date!(2000 - 01 - 01)
    );
    assert_eq!(
        normalize_at(20000101.0, NOW).unwrap(),
        date!(2000 - 01 - 01)
    );
    assert!(matches!(
        normalize_at(123, NOW),
        Err(MalformedDataError::UnsupportedNumericLength(3))
    ));
    assert!(normalize_at(20000101.5, NOW).is_err());
    assert!(matches!(
        normalize_at(f64::NAN, NOW),
        Err(MalformedDataError::UnsupportedInput)
    ));
    assert!(matches!(
        normalize_at(f64::INFINITY, NOW),
        Err(MalformedDataError::UnsupportedInput)
    ));
}

#[test]
fn test_date_values_pass_through() {
    assert_eq!(
        normalize_at(date!(1980 - 05 - 17), NOW).unwrap(),
        date!(1980 - 05 - 17)
    );
    assert_eq!(
        normalize_at(datetime!(1980-05-17 23:59 +02:00), NOW).unwrap(),
        date!(1980 - 05 - 17)
    );
    assert_eq!(
        normalize_at(datetime!(1980-05-17 08:00), NOW).unwrap(),
        date!(1980 - 05 - 17)
    );
    // structured values are never checked against now
    assert_eq!(
        normalize_at(date!(2030 - 01 - 01), NOW).unwrap(),
        date!(2030 - 01 - 01)
    );
}

#[rstest]
#[case("2000-01-01", date!(2000 - 01 - 01))]
#[case("2000-1-5", date!(2000 - 01 - 05))]
#[case("2000/01/31", date!(2000 - 01 - 31))]
#[case("31/01/2000", date!(2000 - 01 - 31))]
#[case("31-01-2000", date!(2000 - 01 - 31))]
#[case("01/31/2000", date!(2000 - 01 - 31))]
#[case("01-31-2000", date!(2000 - 01 - 31))]
#[case("2000-01-01T10:00:00+01:00", date!(2000 - 01 - 01))]
#[case("2000-01-01T23:30:00.123Z", date!(2000 - 01 - 01))]
fn test_structured_formats(#[case] input: &str, #[case] expected: Date) {
    assert_eq!(normalize_at(input, NOW).unwrap(), expected);
}

#[test]
fn test_day_first_wins_for_ambiguous_dates() {
    assert_eq!(
        normalize_at("01/02/2003", NOW).unwrap(),
        date!(2003 - 02 - 01)
    );
    assert_eq!(
        normalize_at("01-02-2003", NOW).unwrap(),
        date!(2003 - 02 - 01)
    );
}

#[rstest]
#[case("2000-02-30")]
#[case("32/01/2000")]
#[case("2000-13-01")]
#[case("201001-01-01")]
#[case("31/31/2000")]
#[case("garbage")]
#[case("")]
fn test_unresolvable_strings(#[case] input: &str) {
    assert!(matches!(
        normalize_at(input, NOW),
        Err(MalformedDataError::InvalidString { .. })
    ));
}

#[test]
fn test_free_text_fallback() {
    assert_eq!(
        normalize_at("1st January 2000", NOW).unwrap(),
        date!(2000 - 01 - 01)
    );
    assert_eq!(
        normalize_at("2000-01-01 12:00", NOW).unwrap(),
        date!(2000 - 01 - 01)
    );
}

#[test]
fn test_timestamp_forms_keep_their_own_date() {
    let rfc3339 = normalize_at("2000-01-01T23:00:00-02:00", NOW).unwrap();
    let rfc2822 = normalize_at("Sat, 01 Jan 2000 23:00:00 -0200", NOW).unwrap();

    assert_eq!(rfc3339, date!(2000 - 01 - 01));
    assert_eq!(rfc2822, rfc3339);
}

#[test]
fn test_free_text_future_check_compares_instants() {
    // 2024-06-15 09:00 UTC, already past
    assert_eq!(
        normalize_at("Sat, 15 Jun 2024 11:00:00 +0200", NOW).unwrap(),
        date!(2024 - 06 - 15)
    );
    // 2024-06-15 11:00 UTC, still ahead
    assert!(matches!(
        normalize_at("Sat, 15 Jun 2024 08:00:00 -0300", NOW),
        Err(MalformedDataError::FutureDate(value)) if value == date!(2024 - 06 - 15)
    ));
}

#[test]
fn test_free_text_in_future_rejected() {
    assert!(matches!(
        normalize_at("tomorrow", NOW),
        Err(MalformedDataError::FutureDate(value)) if value == date!(2024 - 06 - 16)
    ));
    assert!(matches!(
        normalize_at("2024-06-15 10:31", NOW),
        Err(MalformedDataError::FutureDate(_))
    ));
    assert!(matches!(
        normalize_at("1 July 2024", NOW),
        Err(MalformedDataError::FutureDate(_))
    ));
}

#[test]
fn test_free_text_up_to_now_accepted() {
    assert_eq!(normalize_at("now", NOW).unwrap(), date!(2024 - 06 - 15));
    assert_eq!(normalize_at("today", NOW).unwrap(), date!(2024 - 06 - 15));
    assert_eq!(
        normalize_at("2024-06-15 10:30", NOW).unwrap(),
        date!(2024 - 06 - 15)
    );
}

#[test]
fn test_structured_dates_in_future_accepted() {
    assert_eq!(
        normalize_at("2099-01-01", NOW).unwrap(),
        date!(2099 - 01 - 01)
    );
}

#[test]
fn test_normalize_uses_current_time() {
    assert!(matches!(
        normalize(DateOfBirth::Text("tomorrow".to_string())),
        Err(MalformedDataError::FutureDate(_))
    ));
    assert_eq!(
        normalize("2000-01-01").unwrap(),
        date!(2000 - 01 - 01)
    );
}

#[test]
fn test_format_for_query() {
    assert_eq!(format_for_query(date!(2000 - 01 - 01)), "01/01/2000");
    assert_eq!(format_for_query(date!(1985 - 11 - 23)), "23/11/1985");
    assert_eq!(
        format_for_query(Date::from_calendar_date(987, Month::March, 4).unwrap()),
        "04/03/0987"
    );
}
