use std::sync::Arc;

use super::http::{HttpRequest, HttpResponse, TransportFault};

/* The transport is the seam between outcome handling and the actual HTTP
client. Code depends on the HttpTransport trait; RealTransport talks to the
network, MockTransport serves canned responses for tests. */

/// Trait for executing HTTP requests.
///
/// Implement this trait to provide custom transport behavior. Two
/// implementations are provided:
/// - `RealTransport`: issues real network requests via blocking reqwest
/// - `MockTransport`: in-memory implementation for testing
pub trait HttpTransport: std::fmt::Debug + Send + Sync + 'static {
    /// Execute a request and return the response or a fault.
    ///
    /// `Err` covers exactly the failures the transport itself considers
    /// fatal. The real transport only fails when no usable response came
    /// back; a response with an error status is still `Ok`. A transport is
    /// free to draw that line elsewhere, and callers must not assume `Ok`
    /// implies a 2xx status.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportFault>;
}

/// Handle to a transport implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn HttpTransport>` for cheap cloning and
/// thread-safe sharing. Can be cloned and passed around freely without
/// lifetime concerns.
///
/// # Examples
///
/// ```
/// use bproc_base::transport::{MockTransport, TransportHandle};
///
/// let transport = TransportHandle::new(MockTransport::new());
/// let transport_clone = transport.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct TransportHandle(Arc<dyn HttpTransport>);

impl TransportHandle {
    /// Create a new TransportHandle from an HttpTransport implementation.
    pub fn new(transport: impl HttpTransport + 'static) -> Self {
        Self(Arc::new(transport))
    }
}

impl std::ops::Deref for TransportHandle {
    type Target = dyn HttpTransport;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
