//!
//! A client-side implementation of the Internet Printing Protocol: wire
//! codec, attribute model, and (behind the `async-client` feature) an async
//! request runtime for talking to IPP printers and print servers.
//!
//! Start at [`model`] for the tag/enum registry, [`value`] for the wire
//! value codec, [`request`] to build a request, [`parser`] to decode a
//! response, and [`client`] to send one over HTTP.

pub mod attribute;
pub mod error;
pub mod model;
pub mod operation;
pub mod parser;
pub mod printer;
pub mod reader;
pub mod request;
pub mod value;

#[cfg(feature = "async-client")]
pub mod client;

pub use error::Error;
pub use num_traits::FromPrimitive;

pub use attribute::{IppAttribute, IppAttributeGroup, IppAttributes};
pub use model::{DelimiterTag, Operation, StatusCode, ValueTag};
pub use model::{bridge_enum_label, ENUM_BRIDGED_ATTRIBUTES};
pub use parser::{IppParseError, IppResponse};
pub use printer::Printer;
pub use request::IppRequestResponse;
pub use value::IppValue;

#[cfg(feature = "async-client")]
pub use client::{IppClient, IppClientBuilder};
