//!
//! Printer-attribute projection boundary cases (§8.5).
use std::collections::HashMap;

use ipp::printer::Printer;
use ipp::value::IppValue;

fn kw(s: &str) -> IppValue {
    IppValue::Keyword(s.try_into().unwrap())
}

#[test]
fn empty_marker_names_yields_no_markers() {
    let mut data = HashMap::new();
    data.insert("marker-names".to_owned(), IppValue::Array(Vec::new()));
    let printer = Printer::from_map(&data);
    assert!(printer.markers.is_empty());
}

#[test]
fn non_list_marker_names_yields_no_markers() {
    let mut data = HashMap::new();
    data.insert("marker-names".to_owned(), IppValue::Integer(-1));
    let printer = Printer::from_map(&data);
    assert!(printer.markers.is_empty());
}

#[test]
fn single_marker_name_with_missing_companions_gets_defaults() {
    let mut data = HashMap::new();
    data.insert("marker-names".to_owned(), IppValue::Array(vec![kw("Black")]));
    let printer = Printer::from_map(&data);
    assert_eq!(printer.markers.len(), 1);
    let marker = &printer.markers[0];
    assert_eq!(marker.name, "Black");
    assert_eq!(marker.level, -2);
    assert_eq!(marker.low_level, 0);
    assert_eq!(marker.high_level, 100);
    assert_eq!(marker.marker_type, "unknown");
}

#[test]
fn extra_companion_entries_are_truncated_to_names_length() {
    let mut data = HashMap::new();
    data.insert("marker-names".to_owned(), IppValue::Array(vec![kw("Black")]));
    data.insert(
        "marker-levels".to_owned(),
        IppValue::Array(vec![IppValue::Integer(50), IppValue::Integer(99), IppValue::Integer(10)]),
    );
    let printer = Printer::from_map(&data);
    assert_eq!(printer.markers.len(), 1);
    assert_eq!(printer.markers[0].level, 50);
}

#[test]
fn printer_state_reasons_none_projects_to_no_reasons() {
    let mut data = HashMap::new();
    data.insert("printer-state-reasons".to_owned(), kw("none"));
    let printer = Printer::from_map(&data);
    assert_eq!(printer.state.reasons, None);
}

#[test]
fn device_id_overrides_make_and_model() {
    let mut data = HashMap::new();
    data.insert(
        "printer-make-and-model".to_owned(),
        IppValue::TextWithoutLanguage("Generic Printer".try_into().unwrap()),
    );
    data.insert(
        "printer-device-id".to_owned(),
        IppValue::TextWithoutLanguage("MFG:Kyocera;MDL:ECOSYS M2540dn;CMD:PJL,PCL,PCLXL;".try_into().unwrap()),
    );
    let printer = Printer::from_map(&data);
    assert_eq!(printer.info.command_set.as_deref(), Some("PJL,PCL,PCLXL"));
}
