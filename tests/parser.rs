//!
//! Golden fixture parsing (§8.3): responses are built with the serializer
//! rather than shipped as binary files, then run back through the parser.
use ipp::model::{DelimiterTag, StatusCode};
use ipp::parser::parse_response;
use ipp::request::IppRequestResponse;
use ipp::value::IppValue;

fn kw(s: &str) -> IppValue {
    IppValue::Keyword(s.try_into().unwrap())
}

fn text(s: &str) -> IppValue {
    IppValue::TextWithoutLanguage(s.try_into().unwrap())
}

fn uri(s: &str) -> IppValue {
    IppValue::Uri(s.try_into().unwrap())
}

/// `get-printer-attributes-epsonxp6000.bin`
#[test]
fn epson_xp6000_fixture_parses() {
    let mut resp = IppRequestResponse::new_response((2, 0), StatusCode::SUCCESSFUL_OK.0, 1);
    let mut printers = resp.printer_attributes_mut();
    printers
        .insert("printer-make-and-model", text("EPSON XP-6000 Series"))
        .insert(
            "marker-names",
            IppValue::Array(vec![text("Black"), text("Cyan"), text("Magenta"), text("Photo Black"), text("Yellow")]),
        )
        .insert(
            "marker-levels",
            IppValue::Array(vec![
                IppValue::Integer(27),
                IppValue::Integer(99),
                IppValue::Integer(83),
                IppValue::Integer(6),
                IppValue::Integer(64),
            ]),
        )
        .insert("printer-state-reasons", kw("marker-supply-low-warning"))
        .insert(
            "printer-uri-supported",
            IppValue::Array(vec![uri("ipps://printer.local/ipp/print"), uri("ipp://printer.local/ipp/print")]),
        )
        .insert("uri-security-supported", IppValue::Array(vec![kw("tls"), kw("none")]));

    let bytes = resp.to_bytes();
    let parsed = parse_response(&bytes, false).unwrap();
    assert_eq!(parsed.printers.len(), 1);

    let printer = ipp::printer::Printer::from_map(&parsed.printers[0]);
    assert_eq!(printer.info.model, Some("XP-6000 Series".to_owned()));
    assert_eq!(printer.markers.len(), 5);
    let names: Vec<&str> = printer.markers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Black", "Cyan", "Magenta", "Photo Black", "Yellow"]);
    let levels: Vec<i32> = printer.markers.iter().map(|m| m.level).collect();
    assert_eq!(levels, [27, 99, 83, 6, 64]);
    assert_eq!(printer.state.reasons.as_deref(), Some("marker-supply-low-warning"));
    assert_eq!(printer.uris.len(), 2);
    assert_eq!(printer.uris[0].security.as_deref(), Some("tls"));
    assert_eq!(printer.uris[1].security, None);
}

/// `get-printer-attributes-brother-mfcj5320dw.bin`
#[test]
fn brother_mfcj5320dw_fixture_parses() {
    let mut resp = IppRequestResponse::new_response((2, 0), StatusCode::SUCCESSFUL_OK.0, 2);
    resp.printer_attributes_mut()
        .insert("printer-make-and-model", text("Brother MFC-J5320DW"))
        .insert("printer-uuid", uri("urn:uuid:e3248000-80ce-11db-8000-30055ce13be2"));

    let bytes = resp.to_bytes();
    let parsed = parse_response(&bytes, false).unwrap();

    assert_eq!(parsed.version, (2, 0));
    assert_eq!(parsed.status_code, StatusCode::SUCCESSFUL_OK.0);
    let printer = ipp::printer::Printer::from_map(&parsed.printers[0]);
    assert_eq!(printer.info.name, "Brother MFC-J5320DW");
    assert_eq!(printer.info.uuid.as_deref(), Some("e3248000-80ce-11db-8000-30055ce13be2"));
}

/// `get-printer-attributes-kyocera-ecosys-m2540dn-001.bin`: a
/// substituted-attributes response carrying an `unsupported-attributes`
/// group naming the rejected `requested-attributes` keywords.
#[test]
fn kyocera_unsupported_attributes_are_reported() {
    let mut resp = IppRequestResponse::new_response(
        (2, 0),
        StatusCode::SUCCESSFUL_OK_IGNORED_OR_SUBSTITUTED_ATTRIBUTES.0,
        3,
    );
    resp.attributes.add(
        DelimiterTag::UnsupportedAttributes,
        ipp::attribute::IppAttribute::new(
            "requested-attributes",
            IppValue::Array(vec![
                kw("printer-type"),
                kw("printer-state-reason"),
                kw("device-uri"),
                kw("printer-is-shared"),
            ]),
        ),
    );

    let bytes = resp.to_bytes();
    let parsed = parse_response(&bytes, false).unwrap();

    assert_eq!(parsed.status_code, StatusCode::SUCCESSFUL_OK_IGNORED_OR_SUBSTITUTED_ATTRIBUTES.0);
    assert_eq!(parsed.unsupported_attributes.len(), 1);
    let names: Vec<&str> = parsed.unsupported_attributes[0]
        .get("requested-attributes")
        .unwrap()
        .as_values()
        .into_iter()
        .filter_map(|v| v.as_text())
        .collect();
    assert_eq!(names, ["printer-type", "printer-state-reason", "device-uri", "printer-is-shared"]);
}

/// `get-printer-attributes-error-0x0503.bin`: version-not-supported status.
#[test]
fn version_mismatch_status_code_round_trips() {
    let resp = IppRequestResponse::new_response((2, 0), StatusCode::SERVER_ERROR_VERSION_NOT_SUPPORTED.0, 4);
    let bytes = resp.to_bytes();
    let parsed = parse_response(&bytes, false).unwrap();
    assert_eq!(parsed.status(), StatusCode::SERVER_ERROR_VERSION_NOT_SUPPORTED);
}
