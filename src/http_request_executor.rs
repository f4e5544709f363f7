use std::io::Read;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::info;

use crate::errors::ExecutionError;
use crate::http_request::HttpRequest;
use crate::http_response::HttpResponse;

/// Status line and headers of a response whose body has not been read yet.
pub struct TransportResponse {
    pub status_code: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

/// Something that can put a request on the wire.
///
/// `send` returns once status and headers are in; the body is read afterwards
/// through [`TransportResponse::body`].
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, ExecutionError>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// `timeout` bounds the whole exchange, body included. `None` waits forever.
    pub fn new(timeout: Option<Duration>) -> Result<ReqwestTransport, ExecutionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ExecutionError::BuildClient { source })?;
        Ok(ReqwestTransport { client })
    }

    fn headers(request: &HttpRequest) -> Result<HeaderMap, ExecutionError> {
        let mut map = HeaderMap::new();
        for (name, value) in &request.headers {
            let invalid = || ExecutionError::InvalidHeader { name: name.clone() };
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?,
                HeaderValue::from_str(value).map_err(|_| invalid())?,
            );
        }
        Ok(map)
    }

    fn build(&self, request: &HttpRequest) -> Result<reqwest::blocking::RequestBuilder, ExecutionError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            ExecutionError::InvalidMethod {
                method: request.method.clone(),
            }
        })?;
        let url = reqwest::Url::parse(&request.url).map_err(|source| ExecutionError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;

        let mut builder = self
            .client
            .request(method, url)
            .headers(Self::headers(request)?);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}

fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("<unknown status code>")
        .to_string()
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<TransportResponse, ExecutionError> {
        let res = self
            .build(request)?
            .send()
            .map_err(|source| ExecutionError::Transport {
                url: request.url.clone(),
                source,
            })?;

        let status = res.status();
        let headers = res
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Ok(TransportResponse {
            status_code: status.as_u16(),
            status_text: status_text(status),
            headers,
            body: Box::new(res),
        })
    }
}

/// Sends `request` once and collects the whole response.
///
/// `elapsed` covers the call up to status and headers; reading the body is
/// not counted.
pub fn execute_http_request<T: Transport + ?Sized>(
    request: &HttpRequest,
    transport: &T,
) -> Result<HttpResponse, ExecutionError> {
    info!(method = %request.method, url = %request.url, "sending request");

    let start = Instant::now();
    let mut res = transport.send(request)?;
    let elapsed = start.elapsed();

    let mut body = Vec::new();
    res.body
        .read_to_end(&mut body)
        .map_err(|source| ExecutionError::ReadBody { source })?;

    info!(
        status = res.status_code,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        bytes = body.len(),
        "response received"
    );

    Ok(HttpResponse {
        status_code: res.status_code,
        status_text: res.status_text,
        headers: res.headers,
        body,
        elapsed,
    })
}
