//!
//! IPP operation builders
//!
//! Each operation knows how to turn itself into an [`IppRequestResponse`]
//! ready for [`IppRequestResponse::to_bytes`]. `GetPrinterAttributes` is the
//! one [`crate::client::IppClient`] calls directly; the rest (RFC 8011
//! §4.2-§4.4 job/printer control operations) are provided so callers aren't
//! limited to hand-building [`IppAttributes`] for the common cases.

pub mod cups;

use http::Uri;

use crate::{
    attribute::IppAttribute,
    model::Operation,
    parser::IppParseError,
    request::IppRequestResponse,
    value::{IppString, IppValue},
};

/// Anything that can be turned into a wire-ready IPP request.
pub trait IppOperation {
    /// Consume `self`, producing the request envelope to serialize.
    fn into_ipp_request(self) -> IppRequestResponse;

    /// Protocol version to declare on the request. Defaults to `(2, 0)`,
    /// the version every fixture in spec `§8.3` uses.
    fn version(&self) -> (u8, u8) {
        (2, 0)
    }
}

fn requested_attributes_value(names: &[&str]) -> IppValue {
    IppValue::Array(
        names
            .iter()
            .map(|n| IppValue::Keyword((*n).try_into().expect("requested-attributes name fits the keyword bound")))
            .collect(),
    )
}

/// `Get-Printer-Attributes` (RFC 8011 §4.2.5).
pub struct GetPrinterAttributes {
    printer_uri: IppString,
    requested_attributes: Vec<String>,
}

impl GetPrinterAttributes {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            requested_attributes: Vec::new(),
        })
    }

    pub fn with_requested_attributes(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.requested_attributes = names.into_iter().map(Into::into).collect();
        self
    }
}

impl IppOperation for GetPrinterAttributes {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::GetPrinterAttributes, Some(self.printer_uri));
        if !self.requested_attributes.is_empty() {
            let names: Vec<&str> = self.requested_attributes.iter().map(String::as_str).collect();
            req.operation_attributes_mut()
                .insert(IppAttribute::REQUESTED_ATTRIBUTES, requested_attributes_value(&names));
        }
        req
    }
}

/// `Validate-Job` (RFC 8011 §4.2.3): check whether a job would be accepted
/// without actually submitting one.
pub struct ValidateJob {
    printer_uri: IppString,
    job_name: Option<IppValue>,
    document_format: Option<IppValue>,
}

impl ValidateJob {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            job_name: None,
            document_format: None,
        })
    }

    pub fn with_job_name(mut self, name: impl AsRef<str>) -> Result<Self, IppParseError> {
        self.job_name = Some(IppValue::NameWithoutLanguage(name.as_ref().try_into()?));
        Ok(self)
    }

    pub fn with_document_format(mut self, mime: impl AsRef<str>) -> Result<Self, IppParseError> {
        self.document_format = Some(IppValue::MimeMediaType(mime.as_ref().try_into()?));
        Ok(self)
    }
}

impl IppOperation for ValidateJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::ValidateJob, Some(self.printer_uri));
        if let Some(name) = self.job_name {
            req.job_attributes_mut().insert(IppAttribute::JOB_NAME, name);
        }
        if let Some(format) = self.document_format {
            req.operation_attributes_mut().insert(IppAttribute::DOCUMENT_FORMAT, format);
        }
        req
    }
}

/// `Print-Job` (RFC 8011 §4.2.1): submit a single document for immediate
/// printing. The document bytes travel as the request's trailing `data`.
pub struct PrintJob {
    printer_uri: IppString,
    document: bytes::Bytes,
    job_name: Option<IppValue>,
    document_format: Option<IppValue>,
}

impl PrintJob {
    pub fn new(printer_uri: Uri, document: impl Into<bytes::Bytes>) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            document: document.into(),
            job_name: None,
            document_format: None,
        })
    }

    pub fn with_job_name(mut self, name: impl AsRef<str>) -> Result<Self, IppParseError> {
        self.job_name = Some(IppValue::NameWithoutLanguage(name.as_ref().try_into()?));
        Ok(self)
    }

    pub fn with_document_format(mut self, mime: impl AsRef<str>) -> Result<Self, IppParseError> {
        self.document_format = Some(IppValue::MimeMediaType(mime.as_ref().try_into()?));
        Ok(self)
    }
}

impl IppOperation for PrintJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::PrintJob, Some(self.printer_uri));
        if let Some(name) = self.job_name {
            req.job_attributes_mut().insert(IppAttribute::JOB_NAME, name);
        }
        if let Some(format) = self.document_format {
            req.operation_attributes_mut().insert(IppAttribute::DOCUMENT_FORMAT, format);
        }
        req.with_data(self.document)
    }
}

/// `Create-Job` (RFC 8011 §4.2.4): reserve a job without sending a document,
/// to be followed by one or more `Send-Document` operations.
pub struct CreateJob {
    printer_uri: IppString,
    job_name: Option<IppValue>,
}

impl CreateJob {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            job_name: None,
        })
    }

    pub fn with_job_name(mut self, name: impl AsRef<str>) -> Result<Self, IppParseError> {
        self.job_name = Some(IppValue::NameWithoutLanguage(name.as_ref().try_into()?));
        Ok(self)
    }
}

impl IppOperation for CreateJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::CreateJob, Some(self.printer_uri));
        if let Some(name) = self.job_name {
            req.job_attributes_mut().insert(IppAttribute::JOB_NAME, name);
        }
        req
    }
}

/// `Send-Document` (RFC 8011 §4.3.1): attach a document to a job created by
/// `Create-Job`.
pub struct SendDocument {
    printer_uri: IppString,
    job_id: i32,
    document: bytes::Bytes,
    last_document: bool,
}

impl SendDocument {
    pub fn new(printer_uri: Uri, job_id: i32, document: impl Into<bytes::Bytes>, last_document: bool) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            job_id,
            document: document.into(),
            last_document,
        })
    }
}

impl IppOperation for SendDocument {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::SendDocument, Some(self.printer_uri));
        req.operation_attributes_mut()
            .insert(IppAttribute::JOB_ID, IppValue::Integer(self.job_id))
            .insert(IppAttribute::LAST_DOCUMENT, IppValue::Boolean(self.last_document));
        req.with_data(self.document)
    }
}

/// `Send-URI` (RFC 8011 §4.3.2): like `Send-Document`, but the document is
/// referenced by URI instead of carried in the request body.
pub struct SendUri {
    printer_uri: IppString,
    job_id: i32,
    document_uri: IppValue,
    last_document: bool,
}

impl SendUri {
    pub fn new(printer_uri: Uri, job_id: i32, document_uri: Uri, last_document: bool) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            job_id,
            document_uri: IppValue::Uri(document_uri.try_into()?),
            last_document,
        })
    }
}

impl IppOperation for SendUri {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::SendUri, Some(self.printer_uri));
        req.operation_attributes_mut()
            .insert(IppAttribute::JOB_ID, IppValue::Integer(self.job_id))
            .insert(IppAttribute::LAST_DOCUMENT, IppValue::Boolean(self.last_document));
        req.with_data(self.document_uri.to_string().into_bytes())
    }
}

/// One target of a per-job operation: either a `job-uri`, or a
/// `printer-uri`/`job-id` pair (RFC 8011 §3.1.5).
pub enum JobTarget {
    JobUri(Uri),
    PrinterAndId(Uri, i32),
}

fn job_target_request(version: (u8, u8), operation: Operation, target: JobTarget) -> Result<IppRequestResponse, IppParseError> {
    match target {
        JobTarget::JobUri(uri) => {
            let mut req = IppRequestResponse::new_internal(version, operation, None);
            req.operation_attributes_mut()
                .insert(IppAttribute::JOB_URI, IppValue::Uri(uri.try_into()?));
            Ok(req)
        }
        JobTarget::PrinterAndId(printer_uri, job_id) => {
            let mut req = IppRequestResponse::new(version, operation, Some(printer_uri))?;
            req.operation_attributes_mut().insert(IppAttribute::JOB_ID, IppValue::Integer(job_id));
            Ok(req)
        }
    }
}

/// `Cancel-Job` (RFC 8011 §4.3.3).
pub struct CancelJob(JobTarget);

impl CancelJob {
    pub fn new(target: JobTarget) -> Self {
        Self(target)
    }
}

impl IppOperation for CancelJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        job_target_request(self.version(), Operation::CancelJob, self.0).expect("job target URI length check missing")
    }
}

/// `Get-Job-Attributes` (RFC 8011 §4.3.4).
pub struct GetJobAttributes {
    target: JobTarget,
    requested_attributes: Vec<String>,
}

impl GetJobAttributes {
    pub fn new(target: JobTarget) -> Self {
        Self {
            target,
            requested_attributes: Vec::new(),
        }
    }

    pub fn with_requested_attributes(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.requested_attributes = names.into_iter().map(Into::into).collect();
        self
    }
}

impl IppOperation for GetJobAttributes {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req =
            job_target_request(self.version(), Operation::GetJobAttributes, self.target).expect("job target URI length check missing");
        if !self.requested_attributes.is_empty() {
            let names: Vec<&str> = self.requested_attributes.iter().map(String::as_str).collect();
            req.operation_attributes_mut()
                .insert(IppAttribute::REQUESTED_ATTRIBUTES, requested_attributes_value(&names));
        }
        req
    }
}

/// `Hold-Job` (RFC 8011 §4.3.6).
pub struct HoldJob(JobTarget);

impl HoldJob {
    pub fn new(target: JobTarget) -> Self {
        Self(target)
    }
}

impl IppOperation for HoldJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        job_target_request(self.version(), Operation::HoldJob, self.0).expect("job target URI length check missing")
    }
}

/// `Release-Job` (RFC 8011 §4.3.7).
pub struct ReleaseJob(JobTarget);

impl ReleaseJob {
    pub fn new(target: JobTarget) -> Self {
        Self(target)
    }
}

impl IppOperation for ReleaseJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        job_target_request(self.version(), Operation::ReleaseJob, self.0).expect("job target URI length check missing")
    }
}

/// `Restart-Job` (PWG 5100.11 §5.1), a CUPS/PWG extension kept alongside the
/// core RFC 8011 set since [`model::Operation`] already declares its id.
///
/// [`model::Operation`]: crate::model::Operation
pub struct RestartJob(JobTarget);

impl RestartJob {
    pub fn new(target: JobTarget) -> Self {
        Self(target)
    }
}

impl IppOperation for RestartJob {
    fn into_ipp_request(self) -> IppRequestResponse {
        job_target_request(self.version(), Operation::RestartJob, self.0).expect("job target URI length check missing")
    }
}

/// `Get-Jobs` (RFC 8011 §4.2.6): list jobs queued at a printer.
pub struct GetJobs {
    printer_uri: IppString,
    which_jobs: Option<IppValue>,
    my_jobs: Option<bool>,
    limit: Option<i32>,
}

impl GetJobs {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self {
            printer_uri: printer_uri.try_into()?,
            which_jobs: None,
            my_jobs: None,
            limit: None,
        })
    }

    pub fn with_which_jobs(mut self, which: impl AsRef<str>) -> Result<Self, IppParseError> {
        self.which_jobs = Some(IppValue::Keyword(which.as_ref().try_into()?));
        Ok(self)
    }

    pub fn with_my_jobs(mut self, my_jobs: bool) -> Self {
        self.my_jobs = Some(my_jobs);
        self
    }

    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl IppOperation for GetJobs {
    fn into_ipp_request(self) -> IppRequestResponse {
        let mut req = IppRequestResponse::new_internal(self.version(), Operation::GetJobs, Some(self.printer_uri));
        let mut ops = req.operation_attributes_mut();
        if let Some(which) = self.which_jobs {
            ops.insert("which-jobs", which);
        }
        if let Some(my_jobs) = self.my_jobs {
            ops.insert("my-jobs", IppValue::Boolean(my_jobs));
        }
        if let Some(limit) = self.limit {
            ops.insert(IppAttribute::LIMIT, IppValue::Integer(limit));
        }
        req
    }
}

/// `Pause-Printer` (RFC 8011 §4.4.2).
pub struct PausePrinter(IppString);

impl PausePrinter {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self(printer_uri.try_into()?))
    }
}

impl IppOperation for PausePrinter {
    fn into_ipp_request(self) -> IppRequestResponse {
        IppRequestResponse::new_internal(self.version(), Operation::PausePrinter, Some(self.0))
    }
}

/// `Resume-Printer` (RFC 8011 §4.4.3).
pub struct ResumePrinter(IppString);

impl ResumePrinter {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self(printer_uri.try_into()?))
    }
}

impl IppOperation for ResumePrinter {
    fn into_ipp_request(self) -> IppRequestResponse {
        IppRequestResponse::new_internal(self.version(), Operation::ResumePrinter, Some(self.0))
    }
}

/// `Purge-Jobs` (RFC 8011 §4.4.4, deprecated by PWG 5100.11 in favor of
/// `Cancel-Jobs` but still widely implemented).
pub struct PurgeJobs(IppString);

impl PurgeJobs {
    pub fn new(printer_uri: Uri) -> Result<Self, IppParseError> {
        Ok(Self(printer_uri.try_into()?))
    }
}

impl IppOperation for PurgeJobs {
    fn into_ipp_request(self) -> IppRequestResponse {
        IppRequestResponse::new_internal(self.version(), Operation::PurgeJobs, Some(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DelimiterTag as DT;

    #[test]
    fn get_printer_attributes_sets_requested_attributes() {
        let uri: Uri = "ipp://printer.local/ipp/print".parse().unwrap();
        let req = GetPrinterAttributes::new(uri)
            .unwrap()
            .with_requested_attributes(["all", "media-col-database"])
            .into_ipp_request();

        let group = req.attributes.groups_of(DT::OperationAttributes).next().unwrap();
        let attr = group.attributes().get(IppAttribute::REQUESTED_ATTRIBUTES).unwrap();
        assert_eq!(attr.value().as_values().len(), 2);
    }

    #[test]
    fn print_job_carries_document_as_trailing_data() {
        let uri: Uri = "ipp://printer.local/ipp/print".parse().unwrap();
        let req = PrintJob::new(uri, b"%PDF-1.4 ...".to_vec()).unwrap().into_ipp_request();
        assert_eq!(req.data.as_deref(), Some(&b"%PDF-1.4 ..."[..]));
    }

    #[test]
    fn cancel_job_by_uri_sets_job_uri_not_printer_uri() {
        let uri: Uri = "ipp://printer.local/ipp/print/job/42".parse().unwrap();
        let req = CancelJob::new(JobTarget::JobUri(uri)).into_ipp_request();
        let group = req.attributes.groups_of(DT::OperationAttributes).next().unwrap();
        assert!(group.attributes().contains_key(IppAttribute::JOB_URI));
        assert!(!group.attributes().contains_key(IppAttribute::PRINTER_URI));
    }

    #[test]
    fn cancel_job_by_printer_and_id_sets_both() {
        let uri: Uri = "ipp://printer.local/ipp/print".parse().unwrap();
        let req = CancelJob::new(JobTarget::PrinterAndId(uri, 7)).into_ipp_request();
        let group = req.attributes.groups_of(DT::OperationAttributes).next().unwrap();
        assert!(group.attributes().contains_key(IppAttribute::PRINTER_URI));
        assert_eq!(
            group.attributes().get(IppAttribute::JOB_ID).and_then(|a| a.value().as_int()),
            Some(7)
        );
    }
}
