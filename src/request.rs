//!
//! Request/response envelope and wire serializer
//!
use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};
use http::Uri;

use crate::{
    attribute::{IppAttribute, IppAttributes},
    error::Error,
    model::{default_tag_for, DelimiterTag, Operation, ValueTag},
    parser::IppParseError,
    value::{IppName, IppString, IppValue},
};

/// A minimal xorshift32 PRNG, used only to pick request ids. Not
/// cryptographically meaningful: request ids exist to pair a response with
/// the request that produced it, nothing more.
struct XorShift32(u32);

impl XorShift32 {
    fn seeded(seed: u32) -> Self {
        XorShift32(if seed == 0 { 0x9e3779b9 } else { seed })
    }

    fn from_time() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0x9e3779b9);
        Self::seeded(nanos)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

fn generate_request_id() -> i32 {
    let value = XorShift32::from_time().next_u32();
    // Spec `§4.2`: unspecified request ids are drawn from [10000, 99999].
    (10000 + (value % 90000)) as i32
}

/// A thin handle over one attribute group of an in-progress request, letting
/// callers build a group attribute-by-attribute without naming the backing
/// `IppAttributes`/`DelimiterTag` pair at each call site.
pub struct GroupBuilder<'a> {
    attributes: &'a mut IppAttributes,
    tag: DelimiterTag,
}

impl<'a> GroupBuilder<'a> {
    fn new(attributes: &'a mut IppAttributes, tag: DelimiterTag) -> Self {
        GroupBuilder { attributes, tag }
    }

    /// Add or replace an attribute in this group.
    pub fn insert(&mut self, name: impl Into<String>, value: IppValue) -> &mut Self {
        self.attributes.add(self.tag, IppAttribute::new(name.into(), value));
        self
    }

    /// Add an attribute given only its name and a bare string value,
    /// resolving the wire tag to use from `tag` if given, otherwise from the
    /// default attribute-name table (spec `§4.1`/`§4.2`). Fails with
    /// [`Error::UnsupportedAttribute`] when neither source names a tag for
    /// `name` — the caller must then supply one explicitly or use
    /// [`Self::insert`] with an already-tagged [`IppValue`].
    pub fn insert_auto(&mut self, name: impl Into<String>, raw: &str, tag: Option<ValueTag>) -> Result<&mut Self, Error> {
        let name = name.into();
        let resolved = tag.or_else(|| default_tag_for(&name)).ok_or_else(|| Error::UnsupportedAttribute(name.clone()))?;
        let value = IppValue::from_tag_and_text(resolved, raw).map_err(Error::ParseError)?;
        self.insert(name, value);
        Ok(self)
    }

    /// Add a collection-valued attribute. `tag` must be
    /// [`ValueTag::BegCollection`] — the only value tag a collection attribute
    /// can carry (spec `§4.2`: "If value is a nested map (collection):
    /// require tag == begin-collection; otherwise fail with
    /// `DatatypeMismatch`").
    pub fn insert_collection(
        &mut self,
        name: impl Into<String>,
        tag: ValueTag,
        members: BTreeMap<IppName, IppValue>,
    ) -> Result<&mut Self, Error> {
        let name = name.into();
        if !matches!(tag, ValueTag::BegCollection) {
            return Err(Error::DatatypeMismatch(name));
        }
        self.insert(name, IppValue::Collection(members));
        Ok(self)
    }
}

/// An IPP request (client -> server) or response (server -> client).
///
/// The wire format is identical in both directions (spec `§3.1`): a version,
/// a 16-bit field that is either the operation id or the status code, a
/// request id, one or more attribute groups, and an optional trailing data
/// segment.
#[derive(Clone, Debug)]
pub struct IppRequestResponse {
    pub version: (u8, u8),
    pub operation_or_status: i16,
    pub request_id: i32,
    pub attributes: IppAttributes,
    pub data: Option<Bytes>,
}

impl IppRequestResponse {
    /// Build a new request for `operation`, optionally targeting a printer
    /// URI. Fails if `printer_uri` doesn't fit the `uri` attribute's length
    /// bound.
    pub fn new(version: (u8, u8), operation: Operation, printer_uri: Option<Uri>) -> Result<Self, IppParseError> {
        let printer_uri = printer_uri.map(IppString::try_from).transpose()?;
        Ok(Self::new_internal(version, operation, printer_uri))
    }

    /// Build a new request from an already-validated printer URI string.
    pub fn new_internal(version: (u8, u8), operation: Operation, printer_uri: Option<IppString>) -> Self {
        let mut attributes = IppAttributes::new();
        attributes.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(
                IppAttribute::ATTRIBUTES_CHARSET,
                IppValue::Charset("utf-8".try_into().expect("\"utf-8\" fits the charset bound")),
            ),
        );
        attributes.add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(
                IppAttribute::ATTRIBUTES_NATURAL_LANGUAGE,
                IppValue::NaturalLanguage("en".try_into().expect("\"en\" fits the language bound")),
            ),
        );
        if let Some(uri) = printer_uri {
            attributes.add(
                DelimiterTag::OperationAttributes,
                IppAttribute::new(IppAttribute::PRINTER_URI, IppValue::Uri(uri)),
            );
        }

        IppRequestResponse {
            version,
            operation_or_status: operation as i16,
            request_id: generate_request_id(),
            attributes,
            data: None,
        }
    }

    /// Build an empty response envelope carrying a status code, ready to
    /// have attribute groups added before serializing.
    pub fn new_response(version: (u8, u8), status_code: i16, request_id: i32) -> Self {
        IppRequestResponse {
            version,
            operation_or_status: status_code,
            request_id,
            attributes: IppAttributes::new(),
            data: None,
        }
    }

    /// Override the auto-generated request id, e.g. to reproduce a captured
    /// exchange or drive a deterministic test.
    pub fn with_request_id(mut self, request_id: i32) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn operation(&self) -> Option<Operation> {
        crate::FromPrimitive::from_i16(self.operation_or_status)
    }

    pub fn status(&self) -> crate::model::StatusCode {
        crate::model::StatusCode(self.operation_or_status)
    }

    pub fn operation_attributes_mut(&mut self) -> GroupBuilder<'_> {
        GroupBuilder::new(&mut self.attributes, DelimiterTag::OperationAttributes)
    }

    pub fn job_attributes_mut(&mut self) -> GroupBuilder<'_> {
        GroupBuilder::new(&mut self.attributes, DelimiterTag::JobAttributes)
    }

    pub fn printer_attributes_mut(&mut self) -> GroupBuilder<'_> {
        GroupBuilder::new(&mut self.attributes, DelimiterTag::PrinterAttributes)
    }

    /// Serialize header, attribute groups, and any trailing data to the wire
    /// format (spec `§3.1`/`§3.4`).
    pub fn to_bytes(&self) -> Bytes {
        let mut buffer = BytesMut::new();
        buffer.put_u8(self.version.0);
        buffer.put_u8(self.version.1);
        buffer.put_i16(self.operation_or_status);
        buffer.put_i32(self.request_id);
        buffer.put(self.attributes.to_bytes());
        if let Some(ref data) = self.data {
            buffer.put(data.clone());
        }
        buffer.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_header_before_attributes() {
        let req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None)
            .unwrap()
            .with_request_id(7);
        let bytes = req.to_bytes();
        assert_eq!(&bytes[0..2], &[2, 0]);
        assert_eq!(i16::from_be_bytes([bytes[2], bytes[3]]), Operation::GetPrinterAttributes as i16);
        assert_eq!(i32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 7);
    }

    #[test]
    fn request_ids_fall_within_the_documented_range() {
        let a = generate_request_id();
        let b = generate_request_id();
        assert!((10000..=99999).contains(&a));
        assert!((10000..=99999).contains(&b));
    }

    #[test]
    fn insert_auto_resolves_tag_from_default_table() {
        let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None).unwrap();
        req.operation_attributes_mut()
            .insert_auto("printer-state", "4", None)
            .expect("printer-state has a default tag");
        let group = req
            .attributes
            .groups_of(DelimiterTag::OperationAttributes)
            .next()
            .unwrap();
        assert_eq!(group.attributes().get("printer-state").unwrap().value().as_int(), Some(4));
    }

    #[test]
    fn insert_auto_fails_for_unknown_attribute_with_no_tag() {
        let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None).unwrap();
        let err = req
            .operation_attributes_mut()
            .insert_auto("x-vendor-thing", "whatever", None)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAttribute(name) if name == "x-vendor-thing"));
    }

    #[test]
    fn insert_collection_rejects_non_collection_tag() {
        let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None).unwrap();
        let err = req
            .operation_attributes_mut()
            .insert_collection("media-col", ValueTag::Integer, BTreeMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::DatatypeMismatch(name) if name == "media-col"));
    }

    #[test]
    fn insert_collection_accepts_begin_collection_tag() {
        let mut req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, None).unwrap();
        req.operation_attributes_mut()
            .insert_collection("media-col", ValueTag::BegCollection, BTreeMap::new())
            .expect("begin-collection tag is accepted");
        let group = req
            .attributes
            .groups_of(DelimiterTag::OperationAttributes)
            .next()
            .unwrap();
        assert!(group.attributes().contains_key("media-col"));
    }

    #[test]
    fn printer_uri_attribute_is_added_when_present() {
        let uri: Uri = "ipp://printer.local/ipp/print".parse().unwrap();
        let req = IppRequestResponse::new((2, 0), Operation::GetPrinterAttributes, Some(uri)).unwrap();
        let group = req
            .attributes
            .groups_of(DelimiterTag::OperationAttributes)
            .next()
            .unwrap();
        assert!(group.attributes().contains_key(IppAttribute::PRINTER_URI));
    }
}
