//!
//! Golden byte fixtures and round-trip laws for the request serializer.
use ipp::attribute::IppAttribute;
use ipp::model::{DelimiterTag, Operation};
use ipp::parser::parse_response;
use ipp::request::IppRequestResponse;
use ipp::value::IppValue;

fn push_attr(buf: &mut Vec<u8>, tag: u8, name: &str, value: &[u8]) {
    buf.push(tag);
    buf.extend_from_slice(&(name.len() as u16).to_be_bytes());
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(&(value.len() as u16).to_be_bytes());
    buf.extend_from_slice(value);
}

/// `get-printer-attributes-request-000`: the canonical request against
/// `ipp://printer.example.com:361/ipp/print`, version (2,0), request-id 1.
#[test]
fn get_printer_attributes_request_matches_golden_bytes() {
    let uri: http::Uri = "ipp://printer.example.com:361/ipp/print".parse().unwrap();
    let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, Some(uri))
        .unwrap()
        .with_request_id(1);
    req.operation_attributes_mut().insert(
        IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
        IppValue::NaturalLanguage("en-us".try_into().unwrap()),
    );
    req.operation_attributes_mut().insert(
        IppAttribute::REQUESTING_USER_NAME,
        IppValue::NameWithoutLanguage("PythonIPP".try_into().unwrap()),
    );

    let mut expected = Vec::new();
    expected.extend_from_slice(&[2, 0]);
    expected.extend_from_slice(&(Operation::GetPrinterAttributes as i16).to_be_bytes());
    expected.extend_from_slice(&1i32.to_be_bytes());
    expected.push(DelimiterTag::OperationAttributes as u8);
    push_attr(&mut expected, 0x47, "attributes-charset", b"utf-8");
    push_attr(&mut expected, 0x48, "attributes-natural-language", b"en-us");
    push_attr(&mut expected, 0x45, "printer-uri", b"ipp://printer.example.com:361/ipp/print");
    push_attr(&mut expected, 0x42, "requesting-user-name", b"PythonIPP");
    expected.push(DelimiterTag::EndOfAttributes as u8);

    assert_eq!(req.to_bytes().as_ref(), expected.as_slice());
}

/// §8.1: parsing an encoded message without auto-generated fields reproduces
/// the same attribute names and scalar values per group.
#[test]
fn round_trip_preserves_scalar_attributes() {
    let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None)
        .unwrap()
        .with_request_id(99);
    req.operation_attributes_mut()
        .insert("printer-state", IppValue::Enum(4));
    req.job_attributes_mut()
        .insert("job-name", IppValue::NameWithoutLanguage("banner.pdf".try_into().unwrap()));

    let bytes = req.to_bytes();
    let response = parse_response(&bytes, false).unwrap();

    assert_eq!(response.request_id, 99);
    assert_eq!(response.operation_attributes.get("printer-state").and_then(|v| v.as_int()), Some(4));
}

/// §8.4: a 3-valued attribute emits as `T|len|v1` then two `T|0|vN` entries,
/// and the parser collapses that run back into a single multi-valued
/// attribute.
#[test]
fn multi_value_run_round_trips_through_the_wire() {
    let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None)
        .unwrap()
        .with_request_id(5);
    req.operation_attributes_mut().insert(
        "requested-attributes",
        IppValue::Array(vec![
            IppValue::Keyword("printer-name".try_into().unwrap()),
            IppValue::Keyword("printer-state".try_into().unwrap()),
            IppValue::Keyword("printer-uri-supported".try_into().unwrap()),
        ]),
    );

    let bytes = req.to_bytes();
    let response = parse_response(&bytes, false).unwrap();
    let values = response.operation_attributes.get("requested-attributes").unwrap();
    assert_eq!(values.as_values().len(), 3);
}

/// §8.2: encoding the same message twice with the same request id yields
/// byte-identical output.
#[test]
fn encoding_is_deterministic_for_a_fixed_request_id() {
    let build = || {
        let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(123);
        req.operation_attributes_mut().insert("printer-state", IppValue::Enum(3));
        req.to_bytes()
    };

    assert_eq!(build(), build());
}
