use std::collections::HashMap;

use itertools::Itertools;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::InvalidResponseError;
use crate::model::status_check::{StatusCheckResult, StatusCheckResultType, StatusCode};

const ROOT_ELEMENT: &str = "statusCheckResult";

const RESULT_TYPE: &str = "statusCheckResultType";
const STATUS: &str = "status";
const FORENAME: &str = "forename";
const SURNAME: &str = "surname";
const PRINT_DATE: &str = "printDate";

const PRINT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parses and validates the body of a successful status check response.
pub fn parse_status_check_result(xml: &str) -> Result<StatusCheckResult, InvalidResponseError> {
    let document = read_document(xml)?;

    if document.root != ROOT_ELEMENT {
        return Err(InvalidResponseError::UnexpectedRoot(document.root));
    }

    let result_type = document.required(RESULT_TYPE, false)?;
    let status = document.required(STATUS, false)?;
    let forename = document.required(FORENAME, true)?;
    let surname = document.required(SURNAME, true)?;
    let print_date = document.required(PRINT_DATE, false)?;

    let result_type = result_type
        .parse::<StatusCheckResultType>()
        .map_err(|_| InvalidResponseError::UnknownResultType(result_type.to_owned()))?;
    let status = status
        .parse::<StatusCode>()
        .map_err(|_| InvalidResponseError::UnknownStatus(status.to_owned()))?;
    let print_date = Date::parse(print_date, PRINT_DATE_FORMAT)
        .map_err(|_| InvalidResponseError::InvalidPrintDate(print_date.to_owned()))?;

    Ok(StatusCheckResult {
        result_type,
        status,
        forename: forename.to_owned(),
        surname: surname.to_owned(),
        print_date,
    })
}

/// Root element name and the direct text of its children, first occurrence of each name.
#[derive(Debug)]
struct Document {
    root: String,
    children: HashMap<String, String>,
}

impl Document {
    fn required(&self, name: &'static str, trim: bool) -> Result<&str, InvalidResponseError> {
        self.children
            .get(name)
            .map(|value| if trim { value.trim() } else { value.as_str() })
            .filter(|value| !value.is_empty())
            .ok_or(InvalidResponseError::MissingField(name))
    }
}

#[derive(Debug)]
struct Diagnostic {
    message: String,
    line: usize,
    column: usize,
}

impl Diagnostic {
    fn at<P>(xml: &str, position: P, message: impl Into<String>) -> Self
    where
        usize: TryFrom<P>,
    {
        let position = usize::try_from(position)
            .unwrap_or(usize::MAX)
            .min(xml.len());
        let consumed = &xml.as_bytes()[..position];
        let line_start = consumed
            .iter()
            .rposition(|byte| *byte == b'\n')
            .map_or(0, |index| index + 1);

        Self {
            message: message.into(),
            line: consumed.iter().filter(|byte| **byte == b'\n').count() + 1,
            column: position - line_start + 1,
        }
    }
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Unknown parse error".to_string();
    }

    diagnostics
        .iter()
        .map(|diagnostic| {
            format!(
                "{} at line {}, col {}",
                diagnostic.message.trim(),
                diagnostic.line,
                diagnostic.column
            )
        })
        .join("; ")
}

fn read_document(xml: &str) -> Result<Document, InvalidResponseError> {
    let mut reader = Reader::from_str(xml);

    let mut diagnostics = Vec::new();
    let mut root: Option<String> = None;
    let mut children = HashMap::new();
    let mut current_child: Option<(String, String)> = None;
    let mut depth = 0usize;

    loop {
        let position = reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(error) => {
                diagnostics.push(Diagnostic::at(xml, reader.error_position(), error.to_string()));
                break;
            }
        };

        let opens_element = matches!(event, Event::Start(_));

        match event {
            Event::Start(element) | Event::Empty(element) if depth == 0 => {
                if root.is_some() {
                    diagnostics.push(Diagnostic::at(
                        xml,
                        position,
                        "Extra content at the end of the document",
                    ));
                    break;
                }
                root = Some(String::from_utf8_lossy(element.name().as_ref()).into_owned());
                if opens_element {
                    depth += 1;
                }
            }
            Event::Start(element) => {
                if depth == 1 {
                    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                    current_child = Some((name, String::new()));
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 1 {
                    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                    children.entry(name).or_insert_with(String::new);
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 1 {
                    if let Some((name, text)) = current_child.take() {
                        children.entry(name).or_insert(text);
                    }
                }
            }
            Event::Text(text) => {
                let text = match text.unescape() {
                    Ok(text) => text,
                    Err(error) => {
                        diagnostics.push(Diagnostic::at(xml, position, error.to_string()));
                        break;
                    }
                };

                if depth == 0 && !text.trim().is_empty() {
                    diagnostics.push(Diagnostic::at(
                        xml,
                        position,
                        "Content outside of the root element",
                    ));
                    break;
                }
                if depth == 2 {
                    if let Some((_, value)) = current_child.as_mut() {
                        value.push_str(&text);
                    }
                }
            }
            Event::CData(data) => {
                if depth == 2 {
                    if let Some((_, value)) = current_child.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
            }
            Event::Eof => {
                if root.is_none() {
                    diagnostics.push(Diagnostic::at(xml, position, "Document is empty"));
                } else if depth > 0 {
                    diagnostics.push(Diagnostic::at(xml, position, "Premature end of data"));
                }
                break;
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
    }

    match root {
        Some(root) if diagnostics.is_empty() => Ok(Document { root, children }),
        _ => Err(InvalidResponseError::Xml(format_diagnostics(&diagnostics))),
    }
}
