/* bproc_base holds the foundations shared by all crates: error handling,
tracing setup, the HTTP transport seam and the diagnostics sink. Nothing in
here knows about the editor domain. */

pub mod diagnostics;
pub mod error;
pub mod tracing;
pub mod transport;

// Re-export commonly used types for convenience
pub use diagnostics::{
    DiagnosticEvent, DiagnosticsHandle, DiagnosticsSink, RecordingSink, TracingSink,
};
pub use error::{BprocError, BprocResult, ResultExt};
pub use transport::{HttpTransport, MockTransport, RealTransport, TransportHandle};
