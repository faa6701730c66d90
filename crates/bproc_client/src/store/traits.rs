/* The editor state container is a key-value space shared by otherwise
unrelated UI pieces. EditorState abstracts the backing storage; StateHandle
adds cheap cloning and change observation on top.

Reading a missing field is absence, not an error. Storage is infallible by
contract, so the trait has no error channel. */

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

/// Trait for editor state storage implementations.
///
/// Fields are named by plain strings and hold JSON values. Writing a field
/// replaces any previous value.
pub trait EditorState: Send + Sync + 'static {
    /// Retrieve the value of a field.
    ///
    /// # Returns
    /// * `Some(value)` - if the field is set
    /// * `None` - if the field has never been set or was removed
    fn get(&self, field: &str) -> Option<Value>;

    /// Set a field to the given value, replacing any previous value.
    fn set(&mut self, field: &str, value: Value);

    /// Remove a field.
    ///
    /// # Returns
    /// The removed value if the field was set.
    fn remove(&mut self, field: &str) -> Option<Value>;

    /// List the names of all set fields. Order is not guaranteed.
    fn fields(&self) -> Vec<String>;

    /// Remove all fields.
    fn clear(&mut self);

    /// Get the number of set fields.
    fn len(&self) -> usize;

    /// Returns true if no field is set.
    fn is_empty(&self) -> bool;
}

/// Notification that a field changed.
///
/// Carries the field name only; observers read the current value through
/// their own handle if they need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChangeEvent {
    /// Name of the field that was set or removed.
    pub field: String,
}

/// Callback invoked when observed state changes.
pub type StateChangeCallback = Arc<dyn Fn(StateChangeEvent) + Send + Sync>;

/// A thread-safe handle to the shared editor state.
///
/// StateHandle provides cheap cloning (via Arc) and interior mutability
/// (via RwLock), so every component holds its own handle to the same
/// underlying container. Writes notify registered observers.
///
/// This follows the same pattern as `TransportHandle` in bproc_base.
#[derive(Clone)]
pub struct StateHandle {
    store: Arc<RwLock<dyn EditorState>>,
    observers: Arc<Mutex<Vec<StateChangeCallback>>>,
}

impl StateHandle {
    /// Create a new StateHandle wrapping the given storage implementation.
    pub fn new<S: EditorState>(store: S) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieve the value of a field.
    ///
    /// See [`EditorState::get`] for details.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.store.read().get(field)
    }

    /// Set a field and notify observers.
    ///
    /// See [`EditorState::set`] for details.
    pub fn set(&self, field: impl Into<String>, value: Value) {
        let field = field.into();
        self.store.write().set(&field, value);
        self.notify(&field);
    }

    /// Remove a field, notifying observers if it was set.
    ///
    /// See [`EditorState::remove`] for details.
    pub fn remove(&self, field: &str) -> Option<Value> {
        let removed = self.store.write().remove(field);
        if removed.is_some() {
            self.notify(field);
        }
        removed
    }

    /// List the names of all set fields.
    ///
    /// See [`EditorState::fields`] for details.
    pub fn fields(&self) -> Vec<String> {
        self.store.read().fields()
    }

    /// Remove all fields. Observers are not notified.
    ///
    /// See [`EditorState::clear`] for details.
    pub fn clear(&self) {
        self.store.write().clear()
    }

    /// Get the number of set fields.
    ///
    /// See [`EditorState::len`] for details.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Check if no field is set.
    ///
    /// See [`EditorState::is_empty`] for details.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Register an observer called on every set and on every effective remove.
    ///
    /// Observers registered on any clone of this handle see changes made
    /// through every other clone.
    pub fn observe(&self, callback: impl Fn(StateChangeEvent) + Send + Sync + 'static) {
        self.observers.lock().push(Arc::new(callback));
    }

    // Runs observers without holding any lock, so an observer may read or
    // write the state it observes.
    fn notify(&self, field: &str) {
        let observers: Vec<StateChangeCallback> = self.observers.lock().clone();
        for observer in observers {
            observer(StateChangeEvent {
                field: field.to_string(),
            });
        }
    }
}

impl std::fmt::Debug for StateHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateHandle")
            .field("fields", &self.store.read().len())
            .field("observers", &self.observers.lock().len())
            .finish()
    }
}
