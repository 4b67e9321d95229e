//!
//! Request runtime: composes the serializer, an HTTP transport, and the
//! parser into the three operations a caller actually wants
//! (`execute`/`raw`/`printer`).
use base64::Engine;
use http::Uri;
use log::{debug, trace};

use crate::{
    attribute::IppAttribute,
    error::Error,
    model::{DEFAULT_PRINTER_ATTRIBUTES, Operation, StatusCode},
    operation::IppOperation,
    parser::{IppResponse, parse_response},
    printer::Printer,
    request::IppRequestResponse,
    value::IppValue,
};

const DEFAULT_BASE_PATH: &str = "/ipp/print";
const DEFAULT_PORT: u16 = 631;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 8;

/// Builds an [`IppClient`].
///
/// Mirrors the constructor arguments of the Python client this crate's
/// behavior is grounded on (`host`, `base_path`, `port`, `tls`,
/// `verify_ssl`, `username`/`password`, `request_timeout`, `user_agent`,
/// an optionally pre-built HTTP client).
pub struct IppClientBuilder {
    host: String,
    base_path: String,
    port: u16,
    tls: bool,
    verify_ssl: bool,
    username: Option<String>,
    password: Option<String>,
    request_timeout: std::time::Duration,
    user_agent: String,
    http_client: Option<reqwest::Client>,
}

impl IppClientBuilder {
    /// Start a builder for `host`. If `host` begins with `ipp://` or
    /// `ipps://`, its host, port, base path, and TLS flag are derived from
    /// the URI and override the defaults (spec `§4.5`).
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();

        let (host, base_path, port, tls) = if let Ok(uri) = host.parse::<Uri>() {
            match uri.scheme_str() {
                Some("ipp") | Some("ipps") => {
                    let tls = uri.scheme_str() == Some("ipps");
                    let authority_host = uri.host().unwrap_or(&host).to_owned();
                    let port = uri.port_u16().unwrap_or(if tls { 631 } else { DEFAULT_PORT });
                    let path = if uri.path().is_empty() { DEFAULT_BASE_PATH.to_owned() } else { uri.path().to_owned() };
                    (authority_host, path, port, tls)
                }
                _ => (host, DEFAULT_BASE_PATH.to_owned(), DEFAULT_PORT, false),
            }
        } else {
            (host, DEFAULT_BASE_PATH.to_owned(), DEFAULT_PORT, false)
        };

        IppClientBuilder {
            host,
            base_path,
            port,
            tls,
            verify_ssl: false,
            username: None,
            password: None,
            request_timeout: std::time::Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: format!("ipp-rs/{}", env!("CARGO_PKG_VERSION")),
            http_client: None,
        }
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    pub fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Supply an externally owned HTTP client. The built [`IppClient`] will
    /// not close it; the caller retains ownership (spec `§4.5`/`§5`).
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<IppClient, Error> {
        let (http_client, owns_client) = match self.http_client {
            Some(client) => (client, false),
            None => {
                let client = reqwest::Client::builder()
                    .danger_accept_invalid_certs(!self.verify_ssl)
                    .build()
                    .map_err(|e| Error::ConnectionError(e.to_string()))?;
                (client, true)
            }
        };

        let scheme = if self.tls { "ipps" } else { "ipp" };
        let printer_uri: Uri = format!("{scheme}://{}:{}{}", self.host, self.port, self.base_path)
            .parse()
            .map_err(|_| Error::ConnectionError("invalid derived printer-uri".to_owned()))?;

        Ok(IppClient {
            host: self.host,
            base_path: self.base_path,
            port: self.port,
            tls: self.tls,
            printer_uri,
            username: self.username,
            password: self.password,
            request_timeout: self.request_timeout,
            user_agent: self.user_agent,
            http_client,
            owns_client,
        })
    }
}

/// A handle to an IPP printer or print server, reachable over HTTP(S).
///
/// Owns (or borrows, if supplied via [`IppClientBuilder::http_client`]) a
/// [`reqwest::Client`]; [`IppClient::close`] only releases a client it owns
/// (spec `§4.5`/`§5`: "when a handle creates its own client, it owns it
/// exclusively and must release it on close").
pub struct IppClient {
    host: String,
    base_path: String,
    port: u16,
    tls: bool,
    printer_uri: Uri,
    username: Option<String>,
    password: Option<String>,
    request_timeout: std::time::Duration,
    user_agent: String,
    http_client: reqwest::Client,
    owns_client: bool,
}

impl IppClient {
    pub fn new(host: impl Into<String>) -> Result<Self, Error> {
        IppClientBuilder::new(host).build()
    }

    pub fn builder(host: impl Into<String>) -> IppClientBuilder {
        IppClientBuilder::new(host)
    }

    pub fn printer_uri(&self) -> &Uri {
        &self.printer_uri
    }

    fn url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}{}", self.host, self.port, self.base_path)
    }

    /// Build the request template every operation starts from: version,
    /// `attributes-charset`/`attributes-natural-language`/`printer-uri`/
    /// `requesting-user-name`, in that order (spec `§4.5`).
    fn template(&self, operation: Operation) -> Result<IppRequestResponse, Error> {
        let mut req = IppRequestResponse::new(
            (2, 0),
            operation,
            Some(self.printer_uri.clone()),
        )
        .map_err(Error::ParseError)?;
        req.operation_attributes_mut().insert(
            IppAttribute::REQUESTING_USER_NAME,
            IppValue::NameWithoutLanguage("ipp-rs".try_into().map_err(Error::ParseError)?),
        );
        Ok(req)
    }

    async fn send(&self, body: bytes::Bytes) -> Result<(reqwest::StatusCode, Option<String>, bytes::Bytes), Error> {
        let mut builder = self
            .http_client
            .post(self.url())
            .timeout(self.request_timeout)
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/ipp")
            .header("Accept", "application/ipp, text/plain, */*")
            .body(body);

        if let (Some(user), Some(pass)) = (&self.username, &self.password) {
            let credentials = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
            builder = builder.header("Authorization", format!("Basic {credentials}"));
        }

        debug!("POST {} ({} byte request)", self.url(), body.len());

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::ConnectionError("timeout".to_owned())
            } else {
                Error::ConnectionError("transport".to_owned())
            }
        })?;

        let status = response.status();

        if status.as_u16() == 426 {
            let upgrade = response.headers().get("Upgrade").and_then(|v| v.to_str().ok()).map(str::to_owned);
            return Err(Error::ConnectionUpgradeRequired { upgrade });
        }

        let content_type = response.headers().get("Content-Type").and_then(|v| v.to_str().ok()).map(str::to_owned);

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ResponseError {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| Error::ConnectionError(e.to_string()))?;
        trace!("received {} byte response", bytes.len());
        Ok((status, content_type, bytes))
    }

    /// Serialize `operation`'s request (merged over the runtime's template),
    /// send it, parse the response, and validate its status code
    /// (spec `§4.5`/`§7`).
    pub async fn execute(&self, request: IppRequestResponse) -> Result<IppResponse, Error> {
        let bytes = request.to_bytes();
        let (_, _, body) = self.send(bytes).await?;

        let response = parse_response(&body, false)?;

        let status = response.status();
        if status == StatusCode::SERVER_ERROR_VERSION_NOT_SUPPORTED {
            return Err(Error::VersionNotSupported);
        }
        if !status.is_success() {
            return Err(Error::ProtocolError {
                status_code: response.status_code,
            });
        }

        Ok(response)
    }

    /// Same pipeline as [`Self::execute`], but returns the raw response body
    /// without parsing it.
    pub async fn raw(&self, request: IppRequestResponse) -> Result<bytes::Bytes, Error> {
        let bytes = request.to_bytes();
        let (_, _, body) = self.send(bytes).await?;
        Ok(body)
    }

    /// Build a request for `operation` starting from this client's template,
    /// send it through [`Self::execute`], and return the parsed response.
    pub async fn execute_operation(&self, operation: impl IppOperation) -> Result<IppResponse, Error> {
        self.execute(operation.into_ipp_request()).await
    }

    /// `Get-Printer-Attributes` against this client's printer, projected
    /// into a [`Printer`] (spec `§4.5`).
    pub async fn printer(&self) -> Result<Printer, Error> {
        let mut request = self.template(Operation::GetPrinterAttributes)?;
        let names: Vec<IppValue> = DEFAULT_PRINTER_ATTRIBUTES
            .iter()
            .map(|n| IppValue::Keyword((*n).try_into().expect("default requested-attributes fit the keyword bound")))
            .collect();
        request
            .operation_attributes_mut()
            .insert(IppAttribute::REQUESTED_ATTRIBUTES, IppValue::Array(names));

        let response = self.execute(request).await?;
        let parsed = response.printers.first().cloned().unwrap_or_default();
        Ok(Printer::from_map(&parsed))
    }

    /// Release the HTTP client, if this handle owns one (spec `§4.5`/`§5`).
    /// A no-op when the client was supplied externally.
    pub async fn close(self) {
        if self.owns_client {
            drop(self.http_client);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// A tiny single-shot HTTP responder, since the teacher carries no
    /// HTTP-mocking crate. Reads one request, writes back a fixed response,
    /// then closes.
    fn spawn_responder(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response);
                let _ = stream.flush();
            }
        });
        format!("ipp://{}:{}/ipp/print", addr.ip(), addr.port())
    }

    #[test]
    fn builder_derives_host_port_path_from_ipp_uri() {
        let client = IppClientBuilder::new("ipp://printer.local:1631/ipp/other").build().unwrap();
        assert_eq!(client.host, "printer.local");
        assert_eq!(client.port, 1631);
        assert_eq!(client.base_path, "/ipp/other");
        assert!(!client.tls);
    }

    #[test]
    fn builder_detects_tls_scheme() {
        let client = IppClientBuilder::new("ipps://printer.local/ipp/print").build().unwrap();
        assert!(client.tls);
        assert_eq!(client.port, 631);
    }

    #[tokio::test]
    async fn http_404_surfaces_as_response_error() {
        let body = b"HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found";
        let uri = spawn_responder(body);
        let client = IppClientBuilder::new(uri).request_timeout(std::time::Duration::from_secs(2)).build().unwrap();

        let req = client.template(Operation::GetPrinterAttributes).unwrap();
        let err = client.execute(req).await.unwrap_err();
        match err {
            Error::ResponseError { status, .. } => assert_eq!(status, 404),
            other => panic!("expected ResponseError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_426_surfaces_as_upgrade_required() {
        let body = b"HTTP/1.1 426 Upgrade Required\r\nUpgrade: TLS/1.2\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        let uri = spawn_responder(body);
        let client = IppClientBuilder::new(uri).request_timeout(std::time::Duration::from_secs(2)).build().unwrap();

        let req = client.template(Operation::GetPrinterAttributes).unwrap();
        let err = client.execute(req).await.unwrap_err();
        match err {
            Error::ConnectionUpgradeRequired { upgrade } => assert_eq!(upgrade, Some("TLS/1.2".to_owned())),
            other => panic!("expected ConnectionUpgradeRequired, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_ipp_body_surfaces_as_parse_error() {
        let body = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 9\r\nConnection: close\r\n\r\nSurprise!";
        let uri = spawn_responder(body);
        let client = IppClientBuilder::new(uri).request_timeout(std::time::Duration::from_secs(2)).build().unwrap();

        let req = client.template(Operation::GetPrinterAttributes).unwrap();
        let err = client.execute(req).await.unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
