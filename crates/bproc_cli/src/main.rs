/* The CLI is intentionally minimal: one action per invocation, no argument
parsing crate, configuration through a single environment variable.

Exit codes:
- 0: the action completed (backend answered 2xx, or the action is a local stub)
- 1: transport fault, non-2xx answer, unreadable source file, or bad usage
*/

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use serde_json::{Value, json};
use tracing::debug;

use bproc_base::error::{BprocError, BprocResult, ErrorKind, ResultExt};
use bproc_base::tracing::init_tracing;
use bproc_base::{DiagnosticsHandle, RealTransport, TracingSink, TransportHandle};
use bproc_client::store::{InMemoryState, StateHandle, fields};
use bproc_client::{
    ApiGateway, ChoiceState, EndpointConfig, FormReader, RequestOutcome, TerminalNotifier,
    not_implemented,
};

/// Where the backend listens when nothing else is configured.
const DEFAULT_BASE_URL: &str = "http://localhost:8998";

const USAGE: &str = "\
Usage: bproc <action>

Actions:
  help             Show the backend compiler's usage text
  version          Show the backend compiler's version
  instruction-set  Show the instruction set reference
  compile <file>   Compile a source file
  run              Run the compiled program

The backend base URL is taken from BPROC_BASE_URL when set.
";

fn main() {
    init_tracing().unwrap();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(action) = args.first() else {
        eprint!("{}", USAGE);
        process::exit(1);
    };

    let endpoint = resolve_endpoint();
    debug!(host = %endpoint.host(), "resolved backend endpoint");

    let transport = match RealTransport::new() {
        Ok(transport) => TransportHandle::new(transport),
        Err(e) => {
            eprintln!("Error: Failed to set up HTTP transport: {}", e);
            process::exit(1);
        }
    };
    let gateway = ApiGateway::new(
        endpoint,
        transport,
        DiagnosticsHandle::new(TracingSink::new()),
    );
    let state = StateHandle::new(InMemoryState::new());
    seed_default_options(&state);

    let code = match action.as_str() {
        "help" => fetch(&gateway, &state, "help"),
        "version" => fetch(&gateway, &state, "version"),
        "instruction-set" => fetch(&gateway, &state, "instruction-set"),
        "compile" => match args.get(1) {
            Some(file) => compile(&gateway, &state, PathBuf::from(file)),
            None => {
                eprintln!("Error: compile needs a source file argument");
                eprint!("{}", USAGE);
                1
            }
        },
        "run" => {
            not_implemented(&TerminalNotifier::new());
            0
        }
        unknown => {
            eprintln!("Error: Unknown action '{}'", unknown);
            eprint!("{}", USAGE);
            1
        }
    };
    process::exit(code);
}

/// The library's empty-base default addresses the embedding page's own
/// origin; a terminal has no origin, so an unset variable falls back to the
/// backend's default listen address instead.
fn resolve_endpoint() -> EndpointConfig {
    let from_env = EndpointConfig::from_env();
    if from_env.base_url().is_empty() {
        EndpointConfig::new(DEFAULT_BASE_URL)
    } else {
        from_env
    }
}

/// The editor surface normally owns this field; the CLI seeds it so compile
/// has a selection to read. An already-present value is left alone.
fn seed_default_options(state: &StateHandle) {
    if state.get(fields::COMPILE_TYPE_OPTIONS).is_none() {
        let options = vec![
            ChoiceState::new("CmpAsm", true),
            ChoiceState::new("CmpBin", false),
        ];
        match serde_json::to_value(&options) {
            Ok(value) => state.set(fields::COMPILE_TYPE_OPTIONS, value),
            Err(e) => debug!(error = %e, "failed to seed compile type options"),
        }
    }
}

fn fetch(gateway: &ApiGateway, state: &StateHandle, path: &str) -> i32 {
    let outcome = gateway.get(path);
    apply_outcome(state, outcome);
    report(state)
}

fn compile(gateway: &ApiGateway, state: &StateHandle, path: PathBuf) -> i32 {
    let source = match read_source(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let reader = FormReader::new(state.clone());
    let Some(compile_type) = reader.compile_type() else {
        eprintln!("Error: No compile type selected");
        return 1;
    };

    println!("Compiling {} as '{}'", path.display(), compile_type);
    let outcome = gateway.post(
        "compile",
        &json!({
            "source": source,
            "compileType": compile_type.as_str(),
        }),
    );
    apply_outcome(state, outcome);
    report(state)
}

fn read_source(path: &Path) -> BprocResult<String> {
    fs::read_to_string(path)
        .map_err(|e| {
            Box::new(BprocError::new(ErrorKind::FileError {
                path: path.to_path_buf(),
                source: e,
            }))
        })
        .context("Failed to read source file")
}

/// Write the outcome into the shared state. Exactly one of the two fields
/// is set afterwards.
fn apply_outcome(state: &StateHandle, outcome: RequestOutcome) {
    match outcome {
        RequestOutcome::Success(response) => {
            state.set(
                fields::LAST_RESPONSE,
                json!({
                    "status": response.status().as_u16(),
                    "body": response.body().as_string(),
                }),
            );
            state.remove(fields::LAST_ERROR);
        }
        RequestOutcome::Failure(fault) => {
            state.set(fields::LAST_ERROR, json!(fault.message()));
            state.remove(fields::LAST_RESPONSE);
        }
    }
}

/// Report from the shared state rather than from the outcome directly, so
/// what is printed is exactly what any other state observer would see.
fn report(state: &StateHandle) -> i32 {
    if let Some(error) = state.get(fields::LAST_ERROR) {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        eprintln!("Error: {}", message);
        return 1;
    }

    let Some(stored) = state.get(fields::LAST_RESPONSE) else {
        return 0;
    };
    if let Some(body) = stored.get("body").and_then(Value::as_str) {
        if !body.is_empty() {
            println!("{}", body);
        }
    }
    let status = stored.get("status").and_then(Value::as_u64).unwrap_or_default();
    if (200..300).contains(&status) {
        0
    } else {
        eprintln!("Backend answered with status {}", status);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bproc_base::diagnostics::RecordingSink;
    use bproc_base::transport::{HttpMethod, HttpResponse, MockTransport, TransportFault};
    use std::io::Write;

    fn create_test_gateway(mock: MockTransport) -> ApiGateway {
        ApiGateway::new(
            EndpointConfig::new("http://localhost:8998"),
            TransportHandle::new(mock),
            DiagnosticsHandle::new(RecordingSink::new()),
        )
    }

    fn create_test_state() -> StateHandle {
        let state = StateHandle::new(InMemoryState::new());
        seed_default_options(&state);
        state
    }

    #[test]
    fn test_resolve_endpoint_prefers_env_and_falls_back() {
        // Set and unset phases share one test so nothing races on the variable
        unsafe { env::set_var(bproc_client::BASE_URL_ENV, "http://backend.example") };
        assert_eq!(resolve_endpoint().host(), "http://backend.example/api");

        unsafe { env::remove_var(bproc_client::BASE_URL_ENV) };
        assert_eq!(resolve_endpoint().host(), "http://localhost:8998/api");
    }

    #[test]
    fn test_seed_default_options_leaves_existing_value_alone() {
        let state = StateHandle::new(InMemoryState::new());
        state.set(fields::COMPILE_TYPE_OPTIONS, json!([{"id": "CmpBin", "checked": true}]));
        seed_default_options(&state);

        assert_eq!(
            state.get(fields::COMPILE_TYPE_OPTIONS),
            Some(json!([{"id": "CmpBin", "checked": true}]))
        );
    }

    #[test]
    fn test_seeded_selection_is_asm() {
        let state = create_test_state();
        let reader = FormReader::new(state.clone());
        assert_eq!(reader.compile_type().unwrap().as_str(), "asm");
    }

    #[test]
    fn test_fetch_stores_response_and_clears_error() {
        let mock = MockTransport::new();
        mock.add_response(
            HttpMethod::Get,
            "http://localhost:8998/api/version",
            HttpResponse::text("1.0.0"),
        );
        let gateway = create_test_gateway(mock);
        let state = create_test_state();
        state.set(fields::LAST_ERROR, json!("stale"));

        let code = fetch(&gateway, &state, "version");

        assert_eq!(code, 0);
        assert_eq!(
            state.get(fields::LAST_RESPONSE),
            Some(json!({"status": 200, "body": "1.0.0"}))
        );
        assert_eq!(state.get(fields::LAST_ERROR), None);
    }

    #[test]
    fn test_fetch_stores_fault_and_clears_response() {
        let mock = MockTransport::new();
        mock.fail_next(TransportFault::new("connection refused"));
        let gateway = create_test_gateway(mock);
        let state = create_test_state();
        state.set(fields::LAST_RESPONSE, json!({"status": 200, "body": "stale"}));

        let code = fetch(&gateway, &state, "version");

        assert_eq!(code, 1);
        assert_eq!(state.get(fields::LAST_ERROR), Some(json!("connection refused")));
        assert_eq!(state.get(fields::LAST_RESPONSE), None);
    }

    #[test]
    fn test_fetch_non_success_status_exits_nonzero_but_keeps_response() {
        let mock = MockTransport::new();
        mock.add_response(
            HttpMethod::Get,
            "http://localhost:8998/api/help",
            HttpResponse::internal_error().with_body("boom"),
        );
        let gateway = create_test_gateway(mock);
        let state = create_test_state();

        let code = fetch(&gateway, &state, "help");

        assert_eq!(code, 1);
        assert_eq!(
            state.get(fields::LAST_RESPONSE),
            Some(json!({"status": 500, "body": "boom"}))
        );
        assert_eq!(state.get(fields::LAST_ERROR), None);
    }

    #[test]
    fn test_compile_posts_source_with_seeded_compile_type() {
        let mock = MockTransport::new();
        mock.add_response(
            HttpMethod::Post,
            "http://localhost:8998/api/compile",
            HttpResponse::json("{\"ok\": true}"),
        );
        let gateway = create_test_gateway(mock.clone());
        let state = create_test_state();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "10 PRINT \"HI\"").unwrap();

        let code = compile(&gateway, &state, file.path().to_path_buf());

        assert_eq!(code, 0);
        let recorded = mock.requests();
        assert_eq!(recorded.len(), 1);
        let body: Value = serde_json::from_slice(recorded[0].body().as_bytes()).unwrap();
        assert_eq!(
            body,
            json!({"source": "10 PRINT \"HI\"", "compileType": "asm"})
        );
    }

    #[test]
    fn test_compile_missing_file_fails_without_a_request() {
        let mock = MockTransport::new();
        let gateway = create_test_gateway(mock.clone());
        let state = create_test_state();

        let code = compile(&gateway, &state, PathBuf::from("/definitely/not/here.bas"));

        assert_eq!(code, 1);
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_compile_without_selection_fails_without_a_request() {
        let mock = MockTransport::new();
        let gateway = create_test_gateway(mock.clone());
        let state = StateHandle::new(InMemoryState::new());
        state.set(fields::COMPILE_TYPE_OPTIONS, json!([{"id": "CmpAsm", "checked": false}]));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "10 END").unwrap();

        let code = compile(&gateway, &state, file.path().to_path_buf());

        assert_eq!(code, 1);
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_read_source_error_names_the_file() {
        let error = read_source(Path::new("/definitely/not/here.bas")).unwrap_err();
        let display = error.to_string();
        assert!(display.contains("Failed to read source file"));
        assert!(display.contains("/definitely/not/here.bas"));
    }
}
