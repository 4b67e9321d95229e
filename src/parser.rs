//!
//! Response parser
//!
use std::collections::HashMap;
use std::io::Read;

use bytes::Bytes;
use thiserror::Error;

use crate::attribute::{IppAttribute, IppAttributeGroup, IppAttributes};
use crate::model::DelimiterTag;
use crate::reader::IppReader;
use crate::value::IppValue;

/// Errors produced while decoding the IPP wire format.
#[derive(Debug, Error)]
pub enum IppParseError {
    #[error("unexpected end of data: {0}")]
    Io(#[from] std::io::Error),

    #[error("string of length {len} exceeds the maximum of {max} bytes for this attribute")]
    InvalidStringLength { len: usize, max: u16 },

    #[error("value is not valid UTF-8")]
    InvalidUtf8,

    #[error("attribute value is truncated or has an unexpected width")]
    Truncated,

    #[error("\"{0}\" is not a valid integer value")]
    InvalidInteger(String),
}

/// Parse an IPP wire message into an [`IppRequestResponse`]-shaped attribute
/// tree, without collapsing groups the way [`parse_response`] does.
///
/// [`IppRequestResponse`]: crate::request::IppRequestResponse
pub struct IppParser<R> {
    reader: IppReader<R>,
}

/// Parsed message: header fields plus the raw attribute tree.
pub struct ParsedMessage {
    pub version: (u8, u8),
    pub status_or_operation: i16,
    pub request_id: i32,
    pub attributes: IppAttributes,
}

impl<R: Read> IppParser<R> {
    pub fn new(reader: IppReader<R>) -> IppParser<R> {
        IppParser { reader }
    }

    /// Parse a full message: header, attribute groups, end-of-attributes.
    /// Does not consume any trailing document data; call
    /// [`IppReader::read_to_end`] on the returned reader for that (exposed
    /// via [`Self::into_reader`]).
    pub fn parse(mut self) -> Result<ParsedMessage, IppParseError> {
        let major = self.reader.read_i8()?;
        let minor = self.reader.read_i8()?;
        let status_or_operation = self.reader.read_i16()?;
        let request_id = self.reader.read_i32()?;

        let mut attributes = IppAttributes::new();
        // The group currently being filled. Every delimiter tag, including a
        // repeat of one already seen, starts a fresh group (spec `§4.3` step
        // 3: "start a fresh current-map") so that e.g. a `Get-Jobs` response
        // with several `job-attributes` delimiters keeps each job separate
        // instead of merging them into one.
        let mut current_group = IppAttributeGroup::new(DelimiterTag::OperationAttributes);
        let mut last_name: Option<String> = None;

        loop {
            let tag_byte = self.reader.read_u8()?;

            if tag_byte == DelimiterTag::EndOfAttributes as u8 {
                break;
            }

            if let Some(delim) = delimiter_from_u8(tag_byte) {
                if !current_group.attributes().is_empty() {
                    attributes.groups_mut().push(current_group);
                }
                current_group = IppAttributeGroup::new(delim);
                last_name = None;
                continue;
            }

            // Not a delimiter: `tag_byte` is this attribute's value-tag.
            let name_len = self.reader.read_u16()? as usize;
            let name_bytes = self.reader.read_exact_vec(name_len)?;
            let name = String::from_utf8(name_bytes).map_err(|_| IppParseError::InvalidUtf8)?;

            let value_len = self.reader.read_u16()? as usize;
            let value_bytes = self.reader.read_exact_vec(value_len)?;
            let value = IppValue::parse(tag_byte, Bytes::from(value_bytes))?;

            if !name.is_empty() {
                current_group.attributes_mut().insert(name.clone(), IppAttribute::new(name.clone(), value));
                last_name = Some(name);
            } else if let Some(ref prev) = last_name {
                append_additional_value(&mut current_group, prev, value);
            }
        }

        if !current_group.attributes().is_empty() {
            attributes.groups_mut().push(current_group);
        }

        Ok(ParsedMessage {
            version: (major as u8, minor as u8),
            status_or_operation,
            request_id,
            attributes,
        })
    }

    pub fn into_reader(self) -> IppReader<R> {
        self.reader
    }
}

fn delimiter_from_u8(byte: u8) -> Option<DelimiterTag> {
    match byte {
        0x01 => Some(DelimiterTag::OperationAttributes),
        0x02 => Some(DelimiterTag::JobAttributes),
        0x04 => Some(DelimiterTag::PrinterAttributes),
        0x05 => Some(DelimiterTag::UnsupportedAttributes),
        _ => None,
    }
}

/// Promote the attribute named `name` in `group` to (or append to) an
/// `IppValue::Array`, implementing the additional-value encoding rule
/// (spec `§3.2`/`§4.3`).
fn append_additional_value(group: &mut IppAttributeGroup, name: &str, value: IppValue) {
    let existing = group
        .attributes_mut()
        .remove(name)
        .expect("additional-value attribute must follow a named attribute");

    let merged = match existing.into_value() {
        IppValue::Array(mut values) => {
            values.push(value);
            IppValue::Array(values)
        }
        other => IppValue::Array(vec![other, value]),
    };

    group.attributes_mut().insert(name.to_owned(), IppAttribute::new(name, merged));
}

/// High-level response map (spec `§3.5`): a single operation-attributes map,
/// repeated job/printer attribute groups, any unsupported-attributes groups,
/// and trailing document data.
#[derive(Clone, Debug, Default)]
pub struct IppResponse {
    pub version: (u8, u8),
    pub status_code: i16,
    pub request_id: i32,
    pub operation_attributes: HashMap<String, IppValue>,
    pub jobs: Vec<HashMap<String, IppValue>>,
    pub printers: Vec<HashMap<String, IppValue>>,
    pub unsupported_attributes: Vec<HashMap<String, IppValue>>,
    pub data: Vec<u8>,
}

impl IppResponse {
    pub fn status(&self) -> crate::model::StatusCode {
        crate::model::StatusCode(self.status_code)
    }

    /// Opportunistically bridge `name`'s value in `group` to a symbolic
    /// label, for the enum-bridged attribute names (spec `§4.3`/`§9`). Looks
    /// at operation attributes only; callers projecting job/printer groups
    /// should call [`crate::model::bridge_enum_label`] directly with the
    /// relevant map.
    pub fn enum_label(&self, name: &str) -> Option<String> {
        enum_label_in(&self.operation_attributes, name)
    }
}

/// Bridge `name`'s raw `Enum` value in `map` to a symbolic label, if both
/// the attribute and its value are present (spec `§4.3`/`§9`).
pub fn enum_label_in(map: &HashMap<String, IppValue>, name: &str) -> Option<String> {
    let raw = map.get(name)?.as_int()?;
    crate::model::bridge_enum_label(name, raw)
}

fn group_to_map(group: &IppAttributeGroup) -> HashMap<String, IppValue> {
    group
        .attributes()
        .values()
        .map(|a| (a.name().to_owned(), a.value().clone()))
        .collect()
}

/// Parse a raw IPP response byte stream into an [`IppResponse`] (spec `§4.3`).
///
/// When `contains_data` is `true`, any bytes following the end-of-attributes
/// marker are captured as [`IppResponse::data`].
pub fn parse_response(raw: &[u8], contains_data: bool) -> Result<IppResponse, IppParseError> {
    let mut cursor = std::io::Cursor::new(raw);
    let parser = IppParser::new(IppReader::new(&mut cursor));
    let parsed = parser.parse()?;

    let mut operation_attributes = HashMap::new();
    let mut jobs = Vec::new();
    let mut printers = Vec::new();
    let mut unsupported_attributes = Vec::new();

    for group in parsed.attributes.groups() {
        let map = group_to_map(group);
        match group.tag() {
            DelimiterTag::OperationAttributes => {
                if operation_attributes.is_empty() {
                    operation_attributes = map;
                }
            }
            DelimiterTag::JobAttributes => jobs.push(map),
            DelimiterTag::PrinterAttributes => printers.push(map),
            DelimiterTag::UnsupportedAttributes => unsupported_attributes.push(map),
            DelimiterTag::EndOfAttributes => {}
        }
    }

    let data = if contains_data {
        let pos = cursor.position() as usize;
        raw[pos.min(raw.len())..].to_vec()
    } else {
        Vec::new()
    };

    Ok(IppResponse {
        version: parsed.version,
        status_code: parsed.status_or_operation,
        request_id: parsed.request_id,
        operation_attributes,
        jobs,
        printers,
        unsupported_attributes,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DelimiterTag as DT;
    use crate::request::IppRequestResponse;
    use crate::value::IppValue;

    #[test]
    fn parses_single_attribute() {
        let mut req = IppRequestResponse::new((2, 0), crate::model::Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(42);
        req.operation_attributes_mut()
            .insert("attributes-charset", IppValue::Charset("utf-8".try_into().unwrap()));
        let bytes = req.to_bytes();

        let response = parse_response(&bytes, false).expect("parse");
        assert_eq!(response.request_id, 42);
        assert_eq!(
            response.operation_attributes.get("attributes-charset").and_then(|v| v.as_text()),
            Some("utf-8")
        );
    }

    #[test]
    fn collapses_multi_value_into_array() {
        let mut req = IppRequestResponse::new((2, 0), crate::model::Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(1);
        req.operation_attributes_mut().insert(
            "requested-attributes",
            IppValue::Array(vec![
                IppValue::Keyword("a".try_into().unwrap()),
                IppValue::Keyword("b".try_into().unwrap()),
                IppValue::Keyword("c".try_into().unwrap()),
            ]),
        );
        let bytes = req.to_bytes();

        let response = parse_response(&bytes, false).unwrap();
        let values = response.operation_attributes.get("requested-attributes").unwrap();
        assert_eq!(values.as_values().len(), 3);
    }

    #[test]
    fn groups_jobs_and_printers_separately() {
        let mut req = IppRequestResponse::new((2, 0), crate::model::Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(7);
        req.printer_attributes_mut()
            .insert("printer-name", IppValue::NameWithoutLanguage("printer1".try_into().unwrap()));
        let bytes = req.to_bytes();

        let response = parse_response(&bytes, false).unwrap();
        assert_eq!(response.printers.len(), 1);
        assert!(response.jobs.is_empty());
        assert_eq!(
            response.printers[0].get("printer-name").and_then(|v| v.as_text()),
            Some("printer1")
        );
        let _ = DT::JobAttributes;
    }

    #[test]
    fn repeated_delimiter_keeps_each_group_separate() {
        use crate::attribute::{IppAttribute, IppAttributeGroup};

        let mut req = IppRequestResponse::new((2, 0), crate::model::Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(9);

        let mut first = IppAttributeGroup::new(DT::JobAttributes);
        first
            .attributes_mut()
            .insert("job-id", IppAttribute::new("job-id", IppValue::Integer(1)));
        first.attributes_mut().insert(
            "job-name",
            IppAttribute::new("job-name", IppValue::NameWithoutLanguage("first".try_into().unwrap())),
        );

        let mut second = IppAttributeGroup::new(DT::JobAttributes);
        second
            .attributes_mut()
            .insert("job-id", IppAttribute::new("job-id", IppValue::Integer(2)));
        second.attributes_mut().insert(
            "job-name",
            IppAttribute::new("job-name", IppValue::NameWithoutLanguage("second".try_into().unwrap())),
        );

        req.attributes.groups_mut().push(first);
        req.attributes.groups_mut().push(second);
        let bytes = req.to_bytes();

        let response = parse_response(&bytes, false).unwrap();
        assert_eq!(response.jobs.len(), 2);
        assert_eq!(response.jobs[0].get("job-id").and_then(|v| v.as_int()), Some(1));
        assert_eq!(response.jobs[0].get("job-name").and_then(|v| v.as_text()), Some("first"));
        assert_eq!(response.jobs[1].get("job-id").and_then(|v| v.as_int()), Some(2));
        assert_eq!(response.jobs[1].get("job-name").and_then(|v| v.as_text()), Some("second"));
    }

    #[test]
    fn enum_attributes_bridge_to_symbolic_labels() {
        let mut req = IppRequestResponse::new((2, 0), crate::model::Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(1);
        req.operation_attributes_mut().insert("printer-state", IppValue::Enum(4));
        let bytes = req.to_bytes();

        let response = parse_response(&bytes, false).unwrap();
        assert_eq!(response.enum_label("printer-state"), Some("printing".to_owned()));
        assert_eq!(response.enum_label("printer-uri"), None);
    }
}
