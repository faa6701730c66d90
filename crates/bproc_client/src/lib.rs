pub mod compile_type;
pub mod endpoint;
pub mod gateway;
pub mod notify;
pub mod outcome;
pub mod store;

pub use compile_type::{
    COMPILE_TYPE_MARKER, ChoiceState, CompileTypeToken, FormReader, selected_token,
};
pub use endpoint::{API_PREFIX, BASE_URL_ENV, EndpointConfig};
pub use gateway::ApiGateway;
pub use notify::{
    NOT_IMPLEMENTED_MESSAGE, RecordingNotifier, TerminalNotifier, UserNotifier, not_implemented,
};
pub use outcome::RequestOutcome;
pub use store::{EditorState, InMemoryState, StateChangeEvent, StateHandle, fields};
