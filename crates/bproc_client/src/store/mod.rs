pub mod memory;
pub mod traits;

pub use memory::InMemoryState;
pub use traits::{EditorState, StateChangeCallback, StateChangeEvent, StateHandle};

/// Names of the shared state fields this layer reads and writes.
///
/// The container itself accepts any field name; these are the ones with an
/// agreed meaning between the editor surface and this layer.
pub mod fields {
    /// The compile type choices offered by the editor, stored as a JSON
    /// array of `{"id": ..., "checked": ...}` objects in display order.
    pub const COMPILE_TYPE_OPTIONS: &str = "compileTypeOptions";

    /// The last backend response, stored as `{"status": ..., "body": ...}`.
    pub const LAST_RESPONSE: &str = "lastResponse";

    /// The message of the last transport fault.
    pub const LAST_ERROR: &str = "lastError";
}
