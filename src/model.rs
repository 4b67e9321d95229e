//!
//! Tag and enumeration registry
//!
use std::collections::HashMap;

use enum_primitive_derive::Primitive;
use once_cell::sync::Lazy;

/// Attribute group delimiter, marks the start of a new group of attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(u8)]
pub enum DelimiterTag {
    OperationAttributes = 0x01,
    JobAttributes = 0x02,
    EndOfAttributes = 0x03,
    PrinterAttributes = 0x04,
    UnsupportedAttributes = 0x05,
}

/// IPP value tags, as defined by RFC 8010 section 3.5.2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(u8)]
pub enum ValueTag {
    Unsupported = 0x10,
    Unknown = 0x12,
    NoValue = 0x13,
    Integer = 0x21,
    Boolean = 0x22,
    Enum = 0x23,
    OctetStringUnspecified = 0x30,
    DateTime = 0x31,
    Resolution = 0x32,
    RangeOfInteger = 0x33,
    BegCollection = 0x34,
    TextWithLanguage = 0x35,
    NameWithLanguage = 0x36,
    EndCollection = 0x37,
    TextWithoutLanguage = 0x41,
    NameWithoutLanguage = 0x42,
    ReservedString = 0x43,
    Keyword = 0x44,
    Uri = 0x45,
    UriScheme = 0x46,
    Charset = 0x47,
    NaturalLanguage = 0x48,
    MimeMediaType = 0x49,
    MemberAttrName = 0x4a,
}

/// IPP operation ids. Covers RFC 8011 operations plus the CUPS extension
/// block already used by [`crate::operation::cups`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i16)]
pub enum Operation {
    PrintJob = 0x0002,
    PrintUri = 0x0003,
    ValidateJob = 0x0004,
    CreateJob = 0x0005,
    SendDocument = 0x0006,
    SendUri = 0x0007,
    CancelJob = 0x0008,
    GetJobAttributes = 0x0009,
    GetJobs = 0x000a,
    GetPrinterAttributes = 0x000b,
    HoldJob = 0x000c,
    ReleaseJob = 0x000d,
    RestartJob = 0x000e,
    PausePrinter = 0x0010,
    ResumePrinter = 0x0011,
    PurgeJobs = 0x0012,
    CupsGetDefault = 0x4001,
    CupsGetPrinters = 0x4002,
    CupsAddModifyPrinter = 0x4003,
    CupsDeletePrinter = 0x4004,
    CupsGetClasses = 0x4005,
    CupsAddModifyClass = 0x4006,
    CupsDeleteClass = 0x4007,
    CupsAcceptJobs = 0x4008,
    CupsRejectJobs = 0x4009,
}

/// IPP status codes. The successful-ok family spans `0x0000..0x0200`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i16);

impl StatusCode {
    pub const SUCCESSFUL_OK: StatusCode = StatusCode(0x0000);
    pub const SUCCESSFUL_OK_IGNORED_OR_SUBSTITUTED_ATTRIBUTES: StatusCode = StatusCode(0x0001);
    pub const SUCCESSFUL_OK_CONFLICTING_ATTRIBUTES: StatusCode = StatusCode(0x0002);
    pub const SERVER_ERROR_VERSION_NOT_SUPPORTED: StatusCode = StatusCode(0x0503);

    /// `true` for any code in the successful-ok family `[0x0000, 0x0200)`.
    pub fn is_success(&self) -> bool {
        (0..0x0200).contains(&self.0)
    }
}

impl From<i16> for StatusCode {
    fn from(code: i16) -> Self {
        StatusCode(code)
    }
}

/// Printer state, as reported in the `printer-state` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i32)]
pub enum PrinterState {
    Idle = 3,
    Processing = 4,
    Stopped = 5,
}

impl PrinterState {
    /// Symbolic name used by the printer projection (`idle`/`printing`/`stopped`).
    pub fn label(&self) -> &'static str {
        match self {
            PrinterState::Idle => "idle",
            PrinterState::Processing => "printing",
            PrinterState::Stopped => "stopped",
        }
    }
}

/// Job state, as reported in the `job-state` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i32)]
pub enum JobState {
    Pending = 3,
    PendingHeld = 4,
    Processing = 5,
    ProcessingStopped = 6,
    Canceled = 7,
    Aborted = 8,
    Completed = 9,
}

/// Document state, as reported in the `document-state` attribute (PWG 5100.11).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i32)]
pub enum DocumentState {
    Pending = 3,
    Processing = 5,
    Canceled = 7,
    Aborted = 8,
    Completed = 9,
}

/// `finishings` / `finishings-default` enum values (RFC 8011 section 5.2.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i32)]
pub enum Finishings {
    None = 3,
    Staple = 4,
    Punch = 5,
    Cover = 6,
    Bind = 7,
    SaddleStitch = 8,
    EdgeStitch = 9,
    Fold = 10,
    Trim = 11,
    Bale = 12,
    Booklet = 13,
    JobOffset = 14,
    StapleTopLeft = 20,
    StapleBottomLeft = 21,
    StapleTopRight = 22,
    StapleBottomRight = 23,
}

/// `orientation-requested` enum values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i32)]
pub enum Orientation {
    Portrait = 3,
    Landscape = 4,
    ReverseLandscape = 5,
    ReversePortrait = 6,
    None = 7,
}

/// `print-quality` enum values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Primitive)]
#[repr(i32)]
pub enum PrintQuality {
    Draft = 3,
    Normal = 4,
    High = 5,
}

/// Attribute names whose enum values are opportunistically bridged to a
/// symbolic enumeration by the parser (spec `§4.3`/`§9`).
pub const ENUM_BRIDGED_ATTRIBUTES: &[&str] = &[
    "job-state",
    "printer-state",
    "document-state",
    "operations-supported",
    "finishings",
    "orientation-requested",
    "print-quality",
];

/// Default attribute-name -> value-tag map, used by the serializer when the
/// caller doesn't supply an explicit tag for an attribute.
pub static DEFAULT_ATTRIBUTE_TAG_MAP: Lazy<HashMap<&'static str, ValueTag>> = Lazy::new(|| {
    use ValueTag::*;
    HashMap::from([
        ("attributes-charset", Charset),
        ("attributes-natural-language", NaturalLanguage),
        ("charset-configured", Charset),
        ("charset-supported", Charset),
        ("compression", Keyword),
        ("compression-supported", Keyword),
        ("copies", Integer),
        ("copies-default", Integer),
        ("copies-supported", RangeOfInteger),
        ("document-format", MimeMediaType),
        ("document-format-default", MimeMediaType),
        ("document-format-supported", MimeMediaType),
        ("document-name", NameWithoutLanguage),
        ("finishings", Enum),
        ("finishings-default", Enum),
        ("finishings-supported", Enum),
        ("generated-natural-language-supported", NaturalLanguage),
        ("ipp-versions-supported", Keyword),
        ("job-id", Integer),
        ("job-ids", Integer),
        ("job-name", NameWithoutLanguage),
        ("job-state", Enum),
        ("job-state-reasons", Keyword),
        ("job-uri", Uri),
        ("last-document", Boolean),
        ("limit", Integer),
        ("media", Keyword),
        ("media-default", Keyword),
        ("media-supported", Keyword),
        ("multiple-document-handling", Keyword),
        ("natural-language-configured", NaturalLanguage),
        ("operations-supported", Enum),
        ("orientation-requested", Enum),
        ("orientation-requested-default", Enum),
        ("orientation-requested-supported", Enum),
        ("print-quality", Enum),
        ("print-quality-default", Enum),
        ("print-quality-supported", Enum),
        ("printer-device-id", TextWithoutLanguage),
        ("printer-info", TextWithoutLanguage),
        ("printer-is-accepting-jobs", Boolean),
        ("printer-location", TextWithoutLanguage),
        ("printer-make-and-model", TextWithoutLanguage),
        ("printer-more-info", Uri),
        ("printer-name", NameWithoutLanguage),
        ("printer-resolution", Resolution),
        ("printer-state", Enum),
        ("printer-state-message", TextWithoutLanguage),
        ("printer-state-reasons", Keyword),
        ("printer-up-time", Integer),
        ("printer-uri", Uri),
        ("printer-uri-supported", Uri),
        ("printer-uuid", Uri),
        ("requested-attributes", Keyword),
        ("requesting-user-name", NameWithoutLanguage),
        ("sides", Keyword),
        ("sides-default", Keyword),
        ("sides-supported", Keyword),
        ("status-message", TextWithoutLanguage),
        ("uri-authentication-supported", Keyword),
        ("uri-security-supported", Keyword),
        ("which-jobs", Keyword),
    ])
});

/// The default `requested-attributes` value used by `IppClient::printer()`.
pub const DEFAULT_PRINTER_ATTRIBUTES: &[&str] = &[
    "all",
    "media-col-database",
];

/// Look up the default value-tag for a well-known attribute name.
pub fn default_tag_for(name: &str) -> Option<ValueTag> {
    DEFAULT_ATTRIBUTE_TAG_MAP.get(name).copied()
}

/// Opportunistically bridge an `Enum`-tagged attribute's raw integer to a
/// symbolic label, for the attribute names listed in
/// [`ENUM_BRIDGED_ATTRIBUTES`]. Returns `None` for attributes this crate
/// doesn't know the enumeration of, or for a code the enumeration doesn't
/// define — bridging never fails the parse (spec `§4.3`/`§9`).
pub fn bridge_enum_label(name: &str, raw: i32) -> Option<String> {
    use crate::FromPrimitive;

    match name {
        "job-state" => JobState::from_i32(raw).map(|s| format!("{s:?}")),
        "printer-state" => PrinterState::from_i32(raw).map(|s| s.label().to_owned()),
        "document-state" => DocumentState::from_i32(raw).map(|s| format!("{s:?}")),
        "finishings" | "finishings-default" | "finishings-supported" => Finishings::from_i32(raw).map(|s| format!("{s:?}")),
        "orientation-requested" | "orientation-requested-default" | "orientation-requested-supported" => {
            Orientation::from_i32(raw).map(|s| format!("{s:?}"))
        }
        "print-quality" | "print-quality-default" | "print-quality-supported" => {
            PrintQuality::from_i32(raw).map(|s| format!("{s:?}"))
        }
        "operations-supported" => Operation::from_i16(raw as i16).map(|s| format!("{s:?}")),
        _ => None,
    }
}
