use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use time::Date;

time::serde::format_description!(print_date_format, Date, "[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize)]
pub enum StatusCheckResultType {
    #[strum(serialize = "SUCCESS")]
    #[serde(rename = "SUCCESS")]
    Success,
    #[strum(serialize = "FAILURE")]
    #[serde(rename = "FAILURE")]
    Failure,
}

/// Disclosure status of the certificate, not to be confused with the HTTP status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    BlankNoNewInfo,
    NonBlankNoNewInfo,
    NewInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheckResult {
    pub result_type: StatusCheckResultType,
    pub status: StatusCode,
    pub forename: String,
    pub surname: String,
    #[serde(with = "print_date_format")]
    pub print_date: Date,
}

impl StatusCheckResult {
    /// No new information has been added since the certificate was printed.
    pub fn is_current(&self) -> bool {
        self.result_type == StatusCheckResultType::Success && self.status != StatusCode::NewInfo
    }

    /// The certificate is current and carries no information at all.
    pub fn is_clear(&self) -> bool {
        self.result_type == StatusCheckResultType::Success
            && self.status == StatusCode::BlankNoNewInfo
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use time::macros::date;

    use super::*;

    fn result(result_type: StatusCheckResultType, status: StatusCode) -> StatusCheckResult {
        StatusCheckResult {
            result_type,
            status,
            forename: "JOHN".to_string(),
            surname: "SMITH".to_string(),
            print_date: date!(2020 - 01 - 01),
        }
    }

    #[rstest]
    #[case(StatusCheckResultType::Success, StatusCode::BlankNoNewInfo, true, true)]
    #[case(StatusCheckResultType::Success, StatusCode::NonBlankNoNewInfo, true, false)]
    #[case(StatusCheckResultType::Success, StatusCode::NewInfo, false, false)]
    #[case(StatusCheckResultType::Failure, StatusCode::BlankNoNewInfo, false, false)]
    #[case(StatusCheckResultType::Failure, StatusCode::NonBlankNoNewInfo, false, false)]
    #[case(StatusCheckResultType::Failure, StatusCode::NewInfo, false, false)]
    fn test_derived_flags(
        #[case] result_type: StatusCheckResultType,
        #[case] status: StatusCode,
        #[case] current: bool,
        #[case] clear: bool,
    ) {
        let result = result(result_type, status);
        assert_eq!(result.is_current(), current);
        assert_eq!(result.is_clear(), clear);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(StatusCode::NonBlankNoNewInfo.to_string(), "NON_BLANK_NO_NEW_INFO");
        assert_eq!(
            "BLANK_NO_NEW_INFO".parse::<StatusCode>().unwrap(),
            StatusCode::BlankNoNewInfo
        );
        assert_eq!(StatusCheckResultType::Failure.as_ref(), "FAILURE");
        assert!("success".parse::<StatusCheckResultType>().is_err());
        assert!("NEWINFO".parse::<StatusCode>().is_err());
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(result(
            StatusCheckResultType::Success,
            StatusCode::NewInfo,
        ))
        .unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "resultType": "SUCCESS",
                "status": "NEW_INFO",
                "forename": "JOHN",
                "surname": "SMITH",
                "printDate": "2020-01-01",
            })
        );
    }
}
