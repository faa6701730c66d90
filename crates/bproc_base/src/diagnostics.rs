use std::sync::Arc;
use std::sync::Mutex;

use tracing::{debug, error};

use crate::transport::http::{HttpMethod, HttpStatus};

/* Request outcome reporting goes through a sink trait so the destination is
swappable: TracingSink forwards to the tracing subscriber, RecordingSink
keeps events in memory for assertions. What gets recorded is part of the
caller's contract; how an event is rendered is not. */

/// A finished request, as reported to the diagnostics sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// The transport produced a response (any status).
    RequestSucceeded {
        method: HttpMethod,
        url: String,
        status: HttpStatus,
    },
    /// The transport produced a fault instead of a response.
    RequestFailed {
        method: HttpMethod,
        url: String,
        fault: String,
    },
}

/// Trait for receiving diagnostic events.
pub trait DiagnosticsSink: std::fmt::Debug + Send + Sync + 'static {
    /// Record a single event.
    fn record(&self, event: DiagnosticEvent);
}

/// Handle to a diagnostics sink, enabling shared ownership.
///
/// Internally wraps `Arc<dyn DiagnosticsSink>` for cheap cloning and
/// thread-safe sharing.
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle(Arc<dyn DiagnosticsSink>);

impl DiagnosticsHandle {
    /// Create a new DiagnosticsHandle from a DiagnosticsSink implementation.
    pub fn new(sink: impl DiagnosticsSink + 'static) -> Self {
        Self(Arc::new(sink))
    }
}

impl std::ops::Deref for DiagnosticsHandle {
    type Target = dyn DiagnosticsSink;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// Sink that forwards events to the tracing subscriber.
///
/// Successes are recorded at debug level, failures at error level, both
/// with structured fields.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new TracingSink.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::RequestSucceeded {
                method,
                url,
                status,
            } => {
                debug!(method = %method, url = %url, status = status.as_u16(), "request completed");
            }
            DiagnosticEvent::RequestFailed { method, url, fault } => {
                error!(method = %method, url = %url, fault = %fault, "request failed");
            }
        }
    }
}

/// Sink that keeps every event in memory.
///
/// Clones share the same storage, so a copy can be handed to the code under
/// test while the test keeps another for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<DiagnosticEvent>>>,
}

impl RecordingSink {
    /// Create a new empty RecordingSink.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a snapshot of all recorded events, in record order.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&self, event: DiagnosticEvent) {
        self.events.lock().unwrap().push(event);
    }
}
