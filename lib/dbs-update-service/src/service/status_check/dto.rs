use serde::Serialize;

/// Query of `GET /crsc/api/status/{certificateId}`; field order is the wire order.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatusCheckQueryDTO<'a> {
    pub has_agreed_terms_and_conditions: bool,
    pub organisation_name: &'a str,
    pub employee_forename: &'a str,
    pub employee_surname: &'a str,
    pub surname: &'a str,
    pub date_of_birth: String,
}
