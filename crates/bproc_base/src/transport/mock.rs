use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::Mutex;

use super::http::{HttpMethod, HttpRequest, HttpResponse, TransportFault};
use super::traits::HttpTransport;

/* MockTransport keeps everything behind Arc<Mutex<T>> so a clone handed to
the code under test and the copy kept by the test observe the same state.
Queued faults take priority over stubbed responses and are consumed one per
request. */

/// In-memory transport implementation for testing.
///
/// Serves stubbed responses keyed by method and URL, records every request
/// it sees, and can be told to fail upcoming requests with injected faults.
/// No network access happens at any point.
///
/// # Examples
///
/// ```
/// use bproc_base::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockTransport};
///
/// let mock = MockTransport::new();
/// mock.add_response(
///     HttpMethod::Get,
///     "http://localhost:8998/api/version",
///     HttpResponse::text("1.0.0"),
/// );
/// let response = mock.execute(HttpRequest::get("http://localhost:8998/api/version")).unwrap();
/// assert_eq!(response.body().as_string(), Some("1.0.0".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<(HttpMethod, String), HttpResponse>>>,
    faults: Arc<Mutex<VecDeque<TransportFault>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Create a new empty MockTransport.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            faults: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stub a response for the given method and URL.
    ///
    /// Stubbed responses are served repeatedly; the most recent stub for a
    /// given method and URL wins.
    pub fn add_response(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        response: HttpResponse,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert((method, url.into()), response);
    }

    /// Queue a fault for the next request.
    ///
    /// Each queued fault fails exactly one request, in queue order, before
    /// any stubbed responses are consulted.
    pub fn fail_next(&self, fault: TransportFault) {
        self.faults.lock().unwrap().push_back(fault);
    }

    /// Get a snapshot of all requests executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFault> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(fault) = self.faults.lock().unwrap().pop_front() {
            return Err(fault);
        }

        let responses = self.responses.lock().unwrap();
        let key = (*request.method(), request.url().to_string());
        match responses.get(&key) {
            Some(response) => Ok(response.clone()),
            None => Err(TransportFault::new(format!(
                "No response registered for {} {}",
                request.method(),
                request.url()
            ))),
        }
    }
}
