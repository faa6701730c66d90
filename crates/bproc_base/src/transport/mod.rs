/* The transport module is the seam between the client layer and the network.
Code depends on the HttpTransport trait, not on a concrete HTTP client:
RealTransport issues blocking network requests, MockTransport serves stubbed
responses and records traffic for tests. */

pub mod http;
pub mod mock;
pub mod real;
mod traits;

pub use http::{
    HttpBody, HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpStatus, TransportFault,
};
pub use mock::MockTransport;
pub use real::RealTransport;
pub use traits::{HttpTransport, TransportHandle};
