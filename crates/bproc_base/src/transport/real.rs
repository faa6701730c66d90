use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::error::BprocResult;

use super::http::{
    HttpBody, HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpStatus, TransportFault,
};
use super::traits::HttpTransport;

/* Blocking reqwest keeps the whole layer synchronous. No timeout is
configured here; the client's own defaults apply. Non-2xx responses come
back as responses, never as faults. */

/// Concrete transport implementation issuing real network requests.
///
/// Bodies are sent as-is; a non-empty body without an explicit Content-Type
/// is labeled `application/json`, which is the only body format this layer
/// produces. Response header names arrive lowercased.
#[derive(Debug)]
pub struct RealTransport {
    client: Client,
}

impl RealTransport {
    /// Create a new RealTransport.
    pub fn new() -> BprocResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| crate::err!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

impl HttpTransport for RealTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFault> {
        let mut builder = match request.method() {
            HttpMethod::Get => self.client.get(request.url()),
            HttpMethod::Post => self.client.post(request.url()),
        };

        let has_content_type = request.headers().contains("Content-Type")
            || request.headers().contains("content-type");
        if !request.body().is_empty() && !has_content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        }
        for (key, value) in request.headers().all() {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if !request.body().is_empty() {
            builder = builder.body(request.body().as_bytes().to_vec());
        }

        debug!("executing request");
        let response = builder.send().map_err(|e| {
            debug!(error = %e, "request failed without a response");
            TransportFault::new(e.to_string())
        })?;

        let status = HttpStatus::from(response.status().as_u16());
        let mut headers = HttpHeaders::new();
        for (name, value) in response.headers() {
            match value.to_str() {
                Ok(v) => headers.insert(name.as_str(), v),
                Err(_) => debug!(header = %name, "skipping non-UTF-8 header value"),
            }
        }

        let bytes = response.bytes().map_err(|e| {
            debug!(error = %e, "failed to read response body");
            TransportFault::new(e.to_string())
        })?;

        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            "response received"
        );
        let mut http_response =
            HttpResponse::new(status).with_body(HttpBody::from_bytes(bytes.to_vec()));
        *http_response.headers_mut() = headers;
        Ok(http_response)
    }
}
