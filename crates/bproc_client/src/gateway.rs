use serde::Serialize;

use bproc_base::diagnostics::{DiagnosticEvent, DiagnosticsHandle};
use bproc_base::transport::{HttpBody, HttpMethod, HttpRequest, TransportFault, TransportHandle};

use crate::endpoint::EndpointConfig;
use crate::outcome::RequestOutcome;

/* The gateway is the single place UI actions talk to the backend from.
Every call returns a RequestOutcome; nothing escapes as a panic or a
propagated error. Responses are passed through unreshaped, whatever their
status. */

/// Issues backend requests and normalizes whatever happens into a
/// [`RequestOutcome`].
///
/// The gateway owns URL construction: callers hand over the route path
/// ("version", "compile"), the injected [`EndpointConfig`] contributes the
/// host. It adds no headers, retries nothing, and validates nothing.
#[derive(Debug)]
pub struct ApiGateway {
    endpoint: EndpointConfig,
    transport: TransportHandle,
    diagnostics: DiagnosticsHandle,
}

impl ApiGateway {
    /// Create a gateway over the given endpoint, transport and diagnostics
    /// sink.
    pub fn new(
        endpoint: EndpointConfig,
        transport: TransportHandle,
        diagnostics: DiagnosticsHandle,
    ) -> Self {
        Self {
            endpoint,
            transport,
            diagnostics,
        }
    }

    /// Get the endpoint configuration this gateway addresses.
    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// Issue a GET request to `{host}/{path}`.
    ///
    /// Both outcomes are reported to the diagnostics sink.
    pub fn get(&self, path: &str) -> RequestOutcome {
        let url = self.endpoint.url_for(path);
        match self.transport.execute(HttpRequest::get(&url)) {
            Ok(response) => {
                self.diagnostics.record(DiagnosticEvent::RequestSucceeded {
                    method: HttpMethod::Get,
                    url,
                    status: response.status(),
                });
                RequestOutcome::Success(response)
            }
            Err(fault) => {
                self.diagnostics.record(DiagnosticEvent::RequestFailed {
                    method: HttpMethod::Get,
                    url,
                    fault: fault.message().to_string(),
                });
                RequestOutcome::Failure(fault)
            }
        }
    }

    /// Issue a POST request to `{host}/{path}` with the payload serialized
    /// as JSON.
    ///
    /// A payload that cannot be serialized becomes a failure outcome; the
    /// transport is never invoked in that case. Only failures are reported
    /// to the diagnostics sink; successful posts are not recorded.
    pub fn post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> RequestOutcome {
        let url = self.endpoint.url_for(path);
        let body = match serde_json::to_vec(payload) {
            Ok(bytes) => bytes,
            Err(e) => {
                let fault =
                    TransportFault::new(format!("Failed to serialize request payload: {}", e));
                self.diagnostics.record(DiagnosticEvent::RequestFailed {
                    method: HttpMethod::Post,
                    url,
                    fault: fault.message().to_string(),
                });
                return RequestOutcome::Failure(fault);
            }
        };

        let request = HttpRequest::post(&url).with_body(HttpBody::from_bytes(body));
        match self.transport.execute(request) {
            Ok(response) => RequestOutcome::Success(response),
            Err(fault) => {
                self.diagnostics.record(DiagnosticEvent::RequestFailed {
                    method: HttpMethod::Post,
                    url,
                    fault: fault.message().to_string(),
                });
                RequestOutcome::Failure(fault)
            }
        }
    }
}
