//! Boundary between the UI layer and the prompt library
//!
//! This module is the only surface a UI needs:
//! - `setup` to open the library from a JSON configuration
//! - `call` for command dispatch
//! - `autocomplete` for prompt title completion
//!
//! Errors never cross this boundary as `Err`: `call` turns them into
//! structured error objects the UI can render as warnings.

use serde_json::{json, Value};
use tracing::warn;

use crate::commands::{self, CommandContext};
use crate::config::LibraryConfig;
use crate::errors::{PromptLibError, Result};
use crate::library::PromptLibrary;
use crate::logging;
use crate::runtime;
use crate::session::PromptSession;

/// Open the prompt library
///
/// # Arguments
/// * `config` - JSON object with any `LibraryConfig` fields; gaps are filled
///   from the environment and defaults
///
/// Installs the tracing subscriber and opens the database on the shared
/// runtime.
pub fn setup(config: Value) -> Result<PromptLibrary> {
    let config = LibraryConfig::from_json(config)?;
    logging::init_tracing(&config.log_level, config.log_format);
    runtime::block_on(PromptLibrary::open(&config))
}

/// Main entry point for command execution
///
/// # Arguments
/// * `library` - Shared library returned by [`setup`]
/// * `session` - The calling UI session
/// * `command` - Command name in format "category.action" (e.g., "prompts.create")
/// * `args` - Command arguments as JSON object
///
/// # Returns
/// Result as JSON object, or an error object
pub fn call(
    library: &PromptLibrary,
    session: &mut PromptSession,
    command: &str,
    args: Value,
) -> Value {
    let mut ctx = CommandContext::new(library, session);

    match commands::dispatch(&mut ctx, command, args) {
        Ok(result) => result,
        Err(err) => {
            if err.is_recoverable() {
                warn!(command, category = err.category(), "{}", err);
            } else {
                tracing::error!(command, category = err.category(), "{}", err);
            }
            create_error_object(&err)
        },
    }
}

/// Autocomplete handler for prompt titles
///
/// # Arguments
/// * `session` - Session whose cached titles are searched
/// * `prefix` - User-typed prefix, matched case-insensitively
///
/// # Returns
/// Matching titles in alphabetical order
pub fn autocomplete(session: &PromptSession, prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    session
        .cache()
        .entries()
        .keys()
        .filter(|title| title.to_lowercase().starts_with(&prefix))
        .cloned()
        .collect()
}

/// Create a structured error object for the UI
///
/// Returns an object with fields:
/// - `error`: true (marker that this is an error response)
/// - `message`: user-friendly error message
/// - `category`: error category for logging/handling
/// - `severity`: "warning" for recoverable errors, "error" otherwise
fn create_error_object(err: &PromptLibError) -> Value {
    json!({
        "error": true,
        "message": err.user_message(),
        "category": err.category(),
        "severity": if err.is_recoverable() { "warning" } else { "error" },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    // ========================================
    // call() function tests
    // ========================================

    #[test]
    fn test_call_unknown_command_returns_error_object() {
        let (_dir, library) = test_support::library();
        let mut session = library.new_session();

        let obj = call(&library, &mut session, "unknown.command", json!({}));

        assert_eq!(obj["error"], true, "error field should be true");
        assert!(
            obj["message"].as_str().unwrap().contains("unknown.command"),
            "message should contain command name"
        );
        assert_eq!(obj["category"], "command", "category should be 'command'");
        assert_eq!(obj["severity"], "error");
    }

    #[test]
    fn test_call_validation_error_is_warning() {
        let (_dir, library) = test_support::library();
        let mut session = library.new_session();
        call(&library, &mut session, "session.sign_in", json!({"user": "alice"}));

        let obj = call(
            &library,
            &mut session,
            "prompts.create",
            json!({"title": "   ", "text": "body"}),
        );
        assert_eq!(obj["error"], true);
        assert_eq!(obj["category"], "validation");
        assert_eq!(obj["severity"], "warning");
        assert_eq!(obj["message"], "Title cannot be empty");
    }

    #[test]
    fn test_call_success_passes_result_through() {
        let (_dir, library) = test_support::library();
        let mut session = library.new_session();

        let obj = call(&library, &mut session, "ping", json!({"k": 1}));
        assert_eq!(obj["pong"], true);
        assert!(obj.get("error").is_none());
    }

    // ========================================
    // autocomplete() function tests
    // ========================================

    #[test]
    fn test_autocomplete_matches_prefix_case_insensitively() {
        let (_dir, library) = test_support::library();
        let mut session = library.new_session();
        call(&library, &mut session, "session.sign_in", json!({"user": "alice"}));
        for title in ["Greeting", "greet back", "Summary"] {
            call(
                &library,
                &mut session,
                "prompts.create",
                json!({"title": title, "text": "x"}),
            );
        }

        assert_eq!(
            autocomplete(&session, "GREE"),
            vec!["Greeting".to_string(), "greet back".to_string()]
        );
        assert_eq!(autocomplete(&session, "").len(), 3);
        assert!(autocomplete(&session, "zzz").is_empty());
    }

    #[test]
    fn test_autocomplete_anonymous_session_is_empty() {
        let (_dir, library) = test_support::library();
        let session = library.new_session();
        assert!(autocomplete(&session, "a").is_empty());
    }

    // ========================================
    // setup() tests
    // ========================================

    #[test]
    fn test_setup_opens_configured_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prompts.db");

        let library = setup(json!({ "database_path": path, "max_connections": 1 })).unwrap();
        assert!(path.exists());

        let mut session = library.new_session();
        let obj = call(&library, &mut session, "prompts.list", json!({}));
        assert_eq!(obj["prompts"], json!([]));
    }

    #[test]
    fn test_setup_rejects_invalid_config() {
        let result = setup(json!("not an object"));
        assert!(matches!(result, Err(PromptLibError::ConfigError(_))));
    }
}
