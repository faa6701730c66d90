/* Compile type selection is pure logic over (id, checked) pairs; only the
FormReader at the bottom knows the pairs live in the shared state container.

Canonicalization rule, in this order: lowercase the whole control id, then
remove every occurrence of "cmp". "CmpAsm" and "CMPasm" both canonicalize
to "asm". */

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::{StateHandle, fields};

/// Marker removed from lowercased control ids during canonicalization.
pub const COMPILE_TYPE_MARKER: &str = "cmp";

/// One selectable compile type option, as the editor surface presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceState {
    /// Control id of the option, e.g. `"CmpAsm"`.
    pub id: String,
    /// Whether the option is currently selected.
    pub checked: bool,
}

impl ChoiceState {
    /// Create a choice state.
    pub fn new(id: impl Into<String>, checked: bool) -> Self {
        Self {
            id: id.into(),
            checked,
        }
    }
}

/// Canonical compile type identifier derived from a control id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompileTypeToken(String);

impl CompileTypeToken {
    /// Canonicalize a control id: lowercase it, then remove every
    /// occurrence of [`COMPILE_TYPE_MARKER`].
    ///
    /// An id consisting of the marker alone canonicalizes to the empty
    /// token; that is a token, not absence.
    pub fn from_control_id(id: &str) -> Self {
        Self(id.to_lowercase().replace(COMPILE_TYPE_MARKER, ""))
    }

    /// Get the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompileTypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Determine the selected compile type from an ordered option list.
///
/// The first checked option wins; options after it are not inspected.
/// Returns `None` when nothing is checked.
pub fn selected_token(options: &[ChoiceState]) -> Option<CompileTypeToken> {
    options
        .iter()
        .find(|option| option.checked)
        .map(|option| CompileTypeToken::from_control_id(&option.id))
}

/// Reads the compile type selection out of the shared editor state.
///
/// This is the only piece of selection handling that touches the
/// container; everything above it works on plain [`ChoiceState`] slices.
#[derive(Debug)]
pub struct FormReader {
    state: StateHandle,
}

impl FormReader {
    /// Create a reader over the given state handle.
    pub fn new(state: StateHandle) -> Self {
        Self { state }
    }

    /// Get the currently selected compile type, if any.
    ///
    /// An absent options field, a field that does not parse as an option
    /// list, and a list with nothing checked all yield `None`.
    pub fn compile_type(&self) -> Option<CompileTypeToken> {
        let value = self.state.get(fields::COMPILE_TYPE_OPTIONS)?;
        let options: Vec<ChoiceState> = match serde_json::from_value(value) {
            Ok(options) => options,
            Err(e) => {
                debug!(error = %e, "compile type options field is malformed");
                return None;
            }
        };
        selected_token(&options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryState;
    use serde_json::json;

    #[test]
    fn test_canonicalize_strips_marker_prefix() {
        assert_eq!(CompileTypeToken::from_control_id("CmpAsm").as_str(), "asm");
        assert_eq!(CompileTypeToken::from_control_id("CmpBin").as_str(), "bin");
    }

    #[test]
    fn test_canonicalize_lowercases_before_removing() {
        // "CMPasm" only contains the marker after lowercasing
        assert_eq!(CompileTypeToken::from_control_id("CMPasm").as_str(), "asm");
        assert_eq!(CompileTypeToken::from_control_id("cMpRun").as_str(), "run");
    }

    #[test]
    fn test_canonicalize_removes_every_occurrence() {
        assert_eq!(CompileTypeToken::from_control_id("CmpCmpX").as_str(), "x");
        assert_eq!(
            CompileTypeToken::from_control_id("MyCmpThing").as_str(),
            "mything"
        );
    }

    #[test]
    fn test_canonicalize_id_without_marker() {
        assert_eq!(
            CompileTypeToken::from_control_id("Debug").as_str(),
            "debug"
        );
    }

    #[test]
    fn test_canonicalize_marker_alone_is_the_empty_token() {
        let token = CompileTypeToken::from_control_id("Cmp");
        assert_eq!(token.as_str(), "");
    }

    #[test]
    fn test_canonicalization_examples() {
        let ids = ["CmpAsm", "CmpBin", "CMPRun", "Cmp", "Verify"];
        let tokens: Vec<String> = ids
            .iter()
            .map(|id| CompileTypeToken::from_control_id(id).as_str().to_string())
            .collect();
        expect_test::expect![[r#"
            [
                "asm",
                "bin",
                "run",
                "",
                "verify",
            ]
        "#]]
        .assert_debug_eq(&tokens);
    }

    #[test]
    fn test_token_display_and_serde() {
        let token = CompileTypeToken::from_control_id("CmpAsm");
        assert_eq!(format!("{}", token), "asm");
        assert_eq!(serde_json::to_value(&token).unwrap(), json!("asm"));
    }

    #[test]
    fn test_selected_token_first_checked_wins() {
        let options = vec![
            ChoiceState::new("CmpAsm", false),
            ChoiceState::new("CmpBin", true),
            ChoiceState::new("CmpRun", true),
        ];
        assert_eq!(
            selected_token(&options),
            Some(CompileTypeToken::from_control_id("CmpBin"))
        );
    }

    #[test]
    fn test_selected_token_nothing_checked() {
        let options = vec![
            ChoiceState::new("CmpAsm", false),
            ChoiceState::new("CmpBin", false),
        ];
        assert_eq!(selected_token(&options), None);
    }

    #[test]
    fn test_selected_token_empty_list() {
        assert_eq!(selected_token(&[]), None);
    }

    fn create_test_reader() -> (FormReader, StateHandle) {
        let state = StateHandle::new(InMemoryState::new());
        (FormReader::new(state.clone()), state)
    }

    #[test]
    fn test_form_reader_returns_selected_token() {
        let (reader, state) = create_test_reader();
        state.set(
            fields::COMPILE_TYPE_OPTIONS,
            json!([
                {"id": "CmpAsm", "checked": false},
                {"id": "CmpBin", "checked": true},
            ]),
        );

        assert_eq!(
            reader.compile_type(),
            Some(CompileTypeToken::from_control_id("CmpBin"))
        );
    }

    #[test]
    fn test_form_reader_absent_field_is_none() {
        let (reader, _state) = create_test_reader();
        assert_eq!(reader.compile_type(), None);
    }

    #[test]
    fn test_form_reader_malformed_field_is_none() {
        let (reader, state) = create_test_reader();
        state.set(fields::COMPILE_TYPE_OPTIONS, json!("not an option list"));
        assert_eq!(reader.compile_type(), None);

        state.set(fields::COMPILE_TYPE_OPTIONS, json!([{"id": "CmpAsm"}]));
        assert_eq!(reader.compile_type(), None);
    }

    #[test]
    fn test_form_reader_nothing_checked_is_none() {
        let (reader, state) = create_test_reader();
        state.set(
            fields::COMPILE_TYPE_OPTIONS,
            json!([{"id": "CmpAsm", "checked": false}]),
        );
        assert_eq!(reader.compile_type(), None);
    }

    #[test]
    fn test_form_reader_tolerates_extra_keys() {
        let (reader, state) = create_test_reader();
        state.set(
            fields::COMPILE_TYPE_OPTIONS,
            json!([{"id": "CmpAsm", "checked": true, "label": "Assembly"}]),
        );
        assert_eq!(
            reader.compile_type(),
            Some(CompileTypeToken::from_control_id("CmpAsm"))
        );
    }

    #[test]
    fn test_form_reader_sees_live_state() {
        let (reader, state) = create_test_reader();
        state.set(
            fields::COMPILE_TYPE_OPTIONS,
            json!([{"id": "CmpAsm", "checked": true}]),
        );
        assert_eq!(reader.compile_type().unwrap().as_str(), "asm");

        // Selection moves, the reader follows
        state.set(
            fields::COMPILE_TYPE_OPTIONS,
            json!([
                {"id": "CmpAsm", "checked": false},
                {"id": "CmpBin", "checked": true},
            ]),
        );
        assert_eq!(reader.compile_type().unwrap().as_str(), "bin");
    }
}
