use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

/// Message shown for every feature that exists in the surface but has no
/// behavior yet. Deliberately generic; it never names the feature.
pub const NOT_IMPLEMENTED_MESSAGE: &str = "Feature not implemented yet!";

/// Trait for interrupting the user with a message.
pub trait UserNotifier: std::fmt::Debug + Send + Sync + 'static {
    /// Show the message and return once the user has acknowledged it.
    fn alert(&self, message: &str);
}

/// Entry point wired to every stubbed action.
///
/// Shows the fixed [`NOT_IMPLEMENTED_MESSAGE`] and returns nothing; the
/// caller proceeds as if the action completed.
pub fn not_implemented(notifier: &dyn UserNotifier) {
    notifier.alert(NOT_IMPLEMENTED_MESSAGE);
}

/// Notifier that writes to stderr and waits for Enter.
///
/// The wait makes the alert blocking the way a modal dialog is. When stdin
/// is closed, the read returns immediately and the acknowledgment is
/// skipped.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    /// Create a new TerminalNotifier.
    pub fn new() -> Self {
        Self
    }
}

impl UserNotifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
        eprint!("Press Enter to continue: ");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    }
}

/// Notifier that keeps every alert in memory.
///
/// Clones share the same storage, mirroring how the other recording test
/// doubles in this workspace behave.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Create a new empty RecordingNotifier.
    pub fn new() -> Self {
        Self {
            alerts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a snapshot of all alerts shown so far, in order.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    /// Get the number of alerts shown so far.
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}

impl UserNotifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
