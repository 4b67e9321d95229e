//!
//! Printer attribute projection
//!
//! Turns the flat attribute map a `Get-Printer-Attributes` response carries
//! into a small set of structs a caller actually wants to read, collapsing
//! the vendor-specific quirks (IEEE 1284 device ids, parallel marker/URI
//! arrays, the `"none"` keyword convention) along the way.
use std::collections::HashMap;

use http::Uri;

use crate::value::IppValue;

const PRINTER_STATE_LABELS: &[(i32, &str)] = &[(3, "idle"), (4, "printing"), (5, "stopped")];
const KNOWN_MAKES: &[&str] = &["brother", "canon", "epson", "hp", "xerox"];

fn text(data: &HashMap<String, IppValue>, key: &str) -> Option<String> {
    data.get(key).and_then(|v| v.as_text()).map(str::to_owned)
}

fn string_list(data: &HashMap<String, IppValue>, key: &str) -> Vec<String> {
    match data.get(key) {
        Some(v) => v.as_values().into_iter().filter_map(|v| v.as_text()).map(str::to_owned).collect(),
        None => Vec::new(),
    }
}

fn int_list(data: &HashMap<String, IppValue>, key: &str) -> Vec<i32> {
    match data.get(key) {
        Some(v) => v.as_values().into_iter().filter_map(|v| v.as_int()).collect(),
        None => Vec::new(),
    }
}

/// Split a free-form `printer-make-and-model` string into (make, model).
///
/// Recognizes a short list of well-known brand prefixes; otherwise splits on
/// the first run of whitespace.
pub fn parse_make_and_model(make_and_model: &str) -> (String, String) {
    let trimmed = make_and_model.trim();
    if trimmed.is_empty() {
        return ("Unknown".to_owned(), "Unknown".to_owned());
    }

    let lower = trimmed.to_lowercase();
    for known in KNOWN_MAKES {
        if lower.starts_with(known) {
            let (make, model) = trimmed.split_at(known.len());
            return (make.to_owned(), model.trim().to_owned());
        }
    }

    match trimmed.split_once(char::is_whitespace) {
        Some((make, model)) => (make.to_owned(), model.trim().to_owned()),
        None => (trimmed.to_owned(), "Unknown".to_owned()),
    }
}

/// Parse an IEEE 1284 device id (`printer-device-id`) into its `KEY:value`
/// fields, aliasing the common abbreviations (`MFG`/`MDL`/`CMD`) onto their
/// spelled-out names when those aren't already present.
pub fn parse_ieee1284_device_id(device_id: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let trimmed = device_id.trim_matches(';');
    if trimmed.is_empty() {
        return fields;
    }

    for field in trimmed.split(';') {
        if field.is_empty() {
            continue;
        }
        if let Some((key, value)) = field.split_once(':') {
            fields.insert(key.trim().to_owned(), value.trim().to_owned());
        }
    }

    for (alias, canonical) in [("MFG", "MANUFACTURER"), ("MDL", "MODEL"), ("CMD", "COMMAND SET")] {
        let aliased = fields.get(alias).filter(|v| !v.is_empty()).cloned();
        if let Some(value) = aliased {
            if fields.get(canonical).map(|v| v.is_empty()).unwrap_or(true) {
                fields.insert(canonical.to_owned(), value);
            }
        }
    }

    fields
}

/// Identity/location attributes describing the printer itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Info {
    pub name: String,
    pub printer_name: String,
    pub printer_uri_supported: Vec<String>,
    pub uptime: i32,
    pub command_set: Option<String>,
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub printer_info: Option<String>,
    pub serial: Option<String>,
    pub uuid: Option<String>,
    pub version: Option<String>,
    pub more_info: Option<String>,
}

impl Info {
    /// Project `Info` out of a raw attribute map (spec `§4.4`).
    pub fn from_map(data: &HashMap<String, IppValue>) -> Info {
        let printer_name = text(data, "printer-name").unwrap_or_default();
        let mut effective_printer_name = printer_name.clone();
        let make_model = text(data, "printer-make-and-model").unwrap_or_default();
        let device_id = text(data, "printer-device-id").unwrap_or_default();
        let uri_supported = string_list(data, "printer-uri-supported");

        // If one of the printer's advertised URIs' path already names the
        // printer, "printer-name" is redundant with it; suppress it so the
        // display-name fallback below doesn't pick a path fragment.
        for uri in &uri_supported {
            let path = uri.parse::<Uri>().ok().map(|u| u.path().to_owned()).unwrap_or_default();
            if path.trim_matches('/') == effective_printer_name.trim_matches('/') {
                effective_printer_name.clear();
                break;
            }
        }

        let (mut make, mut model) = parse_make_and_model(&make_model);
        let device_info = parse_ieee1284_device_id(&device_id);

        let mut name_parts = Vec::new();
        let mut command_set = None;
        let mut serial = None;

        if let Some(mfg) = device_info.get("MFG").filter(|v| !v.is_empty()) {
            make = mfg.clone();
            name_parts.push(make.clone());
        }
        if let Some(mdl) = device_info.get("MDL").filter(|v| !v.is_empty()) {
            model = mdl.clone();
            name_parts.push(model.clone());
        }
        if let Some(cmd) = device_info.get("CMD").filter(|v| !v.is_empty()) {
            command_set = Some(cmd.clone());
        }
        if let Some(sn) = device_info.get("SN").filter(|v| !v.is_empty()) {
            serial = Some(sn.clone());
        }

        let name = if !make_model.is_empty() {
            make_model
        } else if name_parts.len() == 2 {
            name_parts.join(" ")
        } else if !effective_printer_name.is_empty() {
            effective_printer_name
        } else {
            "IPP Printer".to_owned()
        };

        Info {
            name,
            printer_name,
            printer_uri_supported: uri_supported,
            uptime: data.get("printer-up-time").and_then(|v| v.as_int()).unwrap_or(0),
            command_set,
            location: text(data, "printer-location"),
            manufacturer: Some(make),
            model: Some(model),
            printer_info: text(data, "printer-info"),
            serial,
            // `urn:uuid:<uuid>` -> `<uuid>`.
            uuid: text(data, "printer-uuid").map(|u| u.trim_start_matches("urn:uuid:").to_owned()),
            version: text(data, "printer-firmware-string-version"),
            more_info: text(data, "printer-more-info"),
        }
    }
}

/// One marker (ink/toner) reservoir.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub marker_id: usize,
    pub marker_type: String,
    pub name: String,
    pub color: String,
    pub level: i32,
    pub low_level: i32,
    pub high_level: i32,
}

/// One advertised printer URI and the authentication/security it requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrinterUri {
    pub uri: String,
    pub authentication: Option<String>,
    pub security: Option<String>,
}

/// The printer's current operational state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub printer_state: String,
    pub reasons: Option<String>,
    pub message: Option<String>,
}

impl State {
    pub fn from_map(data: &HashMap<String, IppValue>) -> State {
        let state = data.get("printer-state").and_then(|v| v.as_int()).unwrap_or(0);
        let label = PRINTER_STATE_LABELS
            .iter()
            .find(|(code, _)| *code == state)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| state.to_string());

        let reasons = text(data, "printer-state-reasons").filter(|r| r != "none");

        State {
            printer_state: label,
            reasons,
            message: text(data, "printer-state-message"),
        }
    }
}

/// The full projection of a single printer's attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Printer {
    pub info: Info,
    pub markers: Vec<Marker>,
    pub state: State,
    pub uris: Vec<PrinterUri>,
}

impl Printer {
    pub fn from_map(data: &HashMap<String, IppValue>) -> Printer {
        Printer {
            info: Info::from_map(data),
            markers: merge_marker_data(data),
            state: State::from_map(data),
            uris: merge_uri_data(data),
        }
    }
}

/// Merge the parallel `marker-*` arrays into one `Marker` per reservoir
/// (spec `§4.4`/`§5`). `marker-names` sets the reservoir count; every other
/// array is truncated to it and missing entries fall back to documented
/// defaults before the result is sorted by name.
fn merge_marker_data(data: &HashMap<String, IppValue>) -> Vec<Marker> {
    let marker_names = string_list(data, "marker-names");
    let count = marker_names.len();
    if count == 0 {
        return Vec::new();
    }

    let mut colors = vec![String::new(); count];
    let mut levels = vec![-2; count];
    let mut types = vec!["unknown".to_owned(); count];
    let mut highs = vec![100; count];
    let mut lows = vec![0; count];

    for (i, v) in string_list(data, "marker-colors").into_iter().enumerate().take(count) {
        colors[i] = v;
    }
    for (i, v) in int_list(data, "marker-levels").into_iter().enumerate().take(count) {
        levels[i] = v;
    }
    for (i, v) in int_list(data, "marker-high-levels").into_iter().enumerate().take(count) {
        highs[i] = v;
    }
    for (i, v) in int_list(data, "marker-low-levels").into_iter().enumerate().take(count) {
        lows[i] = v;
    }
    for (i, v) in string_list(data, "marker-types").into_iter().enumerate().take(count) {
        types[i] = v;
    }

    let mut markers: Vec<Marker> = (0..count)
        .map(|i| Marker {
            marker_id: i,
            marker_type: types[i].clone(),
            name: marker_names[i].clone(),
            color: colors[i].clone(),
            level: levels[i],
            high_level: highs[i],
            low_level: lows[i],
        })
        .collect();
    markers.sort_by(|a, b| a.name.cmp(&b.name));
    markers
}

/// Merge `printer-uri-supported` with the parallel `uri-authentication-supported`
/// and `uri-security-supported` arrays, mapping the literal `"none"` keyword
/// to `None` (spec `§4.4`).
fn merge_uri_data(data: &HashMap<String, IppValue>) -> Vec<PrinterUri> {
    let uris = string_list(data, "printer-uri-supported");
    let count = uris.len();
    if count == 0 {
        return Vec::new();
    }

    let mut auth = vec![None; count];
    let mut security = vec![None; count];

    for (i, v) in string_list(data, "uri-authentication-supported").into_iter().enumerate().take(count) {
        auth[i] = if v != "none" { Some(v) } else { None };
    }
    for (i, v) in string_list(data, "uri-security-supported").into_iter().enumerate().take(count) {
        security[i] = if v != "none" { Some(v) } else { None };
    }

    (0..count)
        .map(|i| PrinterUri {
            uri: uris[i].clone(),
            authentication: auth[i].clone(),
            security: security[i].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::IppValue;

    fn kw(s: &str) -> IppValue {
        IppValue::Keyword(s.try_into().unwrap())
    }

    #[test]
    fn splits_known_brand_prefix() {
        assert_eq!(
            parse_make_and_model("HP LaserJet 4000"),
            ("HP".to_owned(), "LaserJet 4000".to_owned())
        );
    }

    #[test]
    fn splits_unknown_brand_on_first_whitespace() {
        assert_eq!(
            parse_make_and_model("Kyocera ECOSYS M2540dn"),
            ("Kyocera".to_owned(), "ECOSYS M2540dn".to_owned())
        );
    }

    #[test]
    fn empty_make_and_model_is_unknown() {
        assert_eq!(parse_make_and_model("  "), ("Unknown".to_owned(), "Unknown".to_owned()));
    }

    #[test]
    fn device_id_aliases_abbreviations() {
        let fields = parse_ieee1284_device_id("MFG:Brother;MDL:MFC-J5320DW;CMD:PJL,PCL;SN:12345;");
        assert_eq!(fields.get("MANUFACTURER").map(String::as_str), Some("Brother"));
        assert_eq!(fields.get("MODEL").map(String::as_str), Some("MFC-J5320DW"));
        assert_eq!(fields.get("COMMAND SET").map(String::as_str), Some("PJL,PCL"));
        assert_eq!(fields.get("SN").map(String::as_str), Some("12345"));
    }

    #[test]
    fn marker_arrays_merge_with_defaults_and_truncate() {
        let mut data = HashMap::new();
        data.insert(
            "marker-names".to_owned(),
            IppValue::Array(vec![kw("black"), kw("cyan"), kw("magenta")]),
        );
        data.insert("marker-colors".to_owned(), IppValue::Array(vec![kw("#000000")]));
        data.insert(
            "marker-levels".to_owned(),
            IppValue::Array(vec![IppValue::Integer(80), IppValue::Integer(40)]),
        );

        let markers = merge_marker_data(&data);
        assert_eq!(markers.len(), 3);
        // sorted by name: black, cyan, magenta
        assert_eq!(markers[0].name, "black");
        assert_eq!(markers[0].color, "#000000");
        assert_eq!(markers[0].level, 80);
        assert_eq!(markers[1].level, 40);
        assert_eq!(markers[2].level, -2);
        assert_eq!(markers[2].color, "");
    }

    #[test]
    fn uri_none_keyword_becomes_null() {
        let mut data = HashMap::new();
        data.insert(
            "printer-uri-supported".to_owned(),
            IppValue::Array(vec![kw("ipp://printer.local/ipp/print")]),
        );
        data.insert("uri-authentication-supported".to_owned(), IppValue::Array(vec![kw("none")]));
        data.insert("uri-security-supported".to_owned(), IppValue::Array(vec![kw("tls")]));

        let uris = merge_uri_data(&data);
        assert_eq!(uris.len(), 1);
        assert_eq!(uris[0].authentication, None);
        assert_eq!(uris[0].security, Some("tls".to_owned()));
    }

    #[test]
    fn printer_name_suppressed_when_uri_path_matches() {
        let mut data = HashMap::new();
        data.insert("printer-name".to_owned(), IppValue::NameWithoutLanguage("print".try_into().unwrap()));
        data.insert(
            "printer-uri-supported".to_owned(),
            IppValue::Array(vec![kw("ipp://printer.local/print")]),
        );

        let info = Info::from_map(&data);
        assert_eq!(info.name, "IPP Printer");
    }

    #[test]
    fn state_maps_numeric_code_to_label_and_strips_none_reason() {
        let mut data = HashMap::new();
        data.insert("printer-state".to_owned(), IppValue::Enum(3));
        data.insert("printer-state-reasons".to_owned(), kw("none"));

        let state = State::from_map(&data);
        assert_eq!(state.printer_state, "idle");
        assert_eq!(state.reasons, None);
    }
}
