use std::collections::HashMap;

use serde_json::Value;

use crate::store::traits::EditorState;

/// An in-memory editor state backed by a HashMap.
///
/// Values are stored as owned JSON; reads hand out clones, so the container
/// owns its own copies and callers can never mutate it behind its back.
///
/// # Example
///
/// ```
/// use bproc_client::store::{EditorState, InMemoryState};
/// use serde_json::json;
///
/// let mut state = InMemoryState::new();
/// state.set("lastError", json!("connection refused"));
///
/// assert_eq!(state.get("lastError"), Some(json!("connection refused")));
/// assert_eq!(state.get("lastResponse"), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryState {
    values: HashMap<String, Value>,
}

impl InMemoryState {
    /// Create a new, empty in-memory state.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Create a new state with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
        }
    }
}

impl EditorState for InMemoryState {
    fn get(&self, field: &str) -> Option<Value> {
        self.values.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    fn remove(&mut self, field: &str) -> Option<Value> {
        self.values.remove(field)
    }

    fn fields(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
