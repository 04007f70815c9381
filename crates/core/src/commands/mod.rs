//! Command registry and dispatch system
//!
//! This module provides a static registry of commands that the UI layer can
//! call. Commands are registered as "category.action" (e.g., "prompts.list",
//! "session.sign_in") and dispatched to handler functions together with the
//! caller's [`CommandContext`].
//!
//! ## Adding a new command
//!
//! 1. Create handler function: `pub fn my_command(ctx: &mut CommandContext<'_>, args: Value) -> Result<Value>`
//! 2. Register in `REGISTRY`: `("category.action", my_command as CommandHandler)`
//! 3. Add tests for the command

pub mod prompts;
pub mod session;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

use crate::db::prompts::UserId;
use crate::errors::{PromptLibError, Result};
use crate::library::PromptLibrary;
use crate::session::PromptSession;

/// What a handler runs against: the shared library and the caller's session
pub struct CommandContext<'a> {
    pub library: &'a PromptLibrary,
    pub session: &'a mut PromptSession,
}

impl<'a> CommandContext<'a> {
    pub fn new(library: &'a PromptLibrary, session: &'a mut PromptSession) -> Self {
        Self { library, session }
    }
}

/// Type alias for command handler functions
///
/// All command handlers take the context and a JSON Value (arguments) and
/// return a Result<Value>
pub type CommandHandler = fn(&mut CommandContext<'_>, Value) -> Result<Value>;

/// Static command registry
///
/// Maps command names to handler functions. Initialized lazily on first access.
static REGISTRY: Lazy<HashMap<&'static str, CommandHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Health check
    map.insert("ping", ping as CommandHandler);

    // Prompt management
    map.insert("prompts.list", prompts::list as CommandHandler);
    map.insert("prompts.create", prompts::create as CommandHandler);
    map.insert("prompts.select", prompts::select as CommandHandler);
    map.insert("prompts.update", prompts::update as CommandHandler);
    map.insert("prompts.request_delete", prompts::request_delete as CommandHandler);
    map.insert("prompts.cancel_delete", prompts::cancel_delete as CommandHandler);
    map.insert("prompts.confirm_delete", prompts::confirm_delete as CommandHandler);
    map.insert("prompts.close", prompts::close as CommandHandler);

    // Chat dropdown
    map.insert("prompts.use", prompts::use_prompt as CommandHandler);
    map.insert("prompts.choices", prompts::choices as CommandHandler);

    // Session lifecycle
    map.insert("session.sign_in", session::sign_in as CommandHandler);
    map.insert("session.sign_out", session::sign_out as CommandHandler);
    map.insert("session.sync", session::sync as CommandHandler);

    map
});

/// Dispatch a command by name
///
/// Looks up the command in the registry and executes it with the provided arguments.
///
/// # Arguments
/// * `ctx` - Library and session the command acts on
/// * `command` - Command name (e.g., "ping", "prompts.create")
/// * `args` - Command arguments as JSON Value
///
/// # Returns
/// Command result as JSON Value, or error if command not found
pub fn dispatch(ctx: &mut CommandContext<'_>, command: &str, args: Value) -> Result<Value> {
    match REGISTRY.get(command) {
        Some(handler) => {
            tracing::debug!(command, "dispatching command");
            handler(ctx, args)
        },
        None => Err(PromptLibError::CommandNotFound(command.to_string())),
    }
}

/// List all available commands
///
/// Returns a sorted list of all registered command names.
pub fn list_commands() -> Vec<String> {
    let mut commands: Vec<String> = REGISTRY.keys().map(|&k| k.to_string()).collect();
    commands.sort();
    commands
}

// ============================================================================
// Argument helpers
// ============================================================================

/// Required string argument
pub(crate) fn arg_str<'v>(args: &'v Value, command: &str, key: &str) -> Result<&'v str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| PromptLibError::invalid_args(command, format!("Missing {}", key)))
}

/// Optional string argument, empty when absent or null
pub(crate) fn arg_str_or_empty<'v>(args: &'v Value, command: &str, key: &str) -> Result<&'v str> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(PromptLibError::invalid_args(
            command,
            format!("{} must be a string", key),
        )),
    }
}

/// Required integer argument
pub(crate) fn arg_i64(args: &Value, command: &str, key: &str) -> Result<i64> {
    args.get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| PromptLibError::invalid_args(command, format!("Missing {}", key)))
}

/// User id given either as a string or an integer
pub(crate) fn arg_user(args: &Value, command: &str, key: &str) -> Result<UserId> {
    match args.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(UserId::from(s.trim())),
        Some(Value::Number(n)) if n.is_i64() => Ok(UserId::from(n.as_i64().unwrap_or_default())),
        _ => Err(PromptLibError::invalid_args(command, format!("Missing {}", key))),
    }
}

// ============================================================================
// Test Commands
// ============================================================================

/// Ping command - simple test to verify command dispatch works
///
/// Returns the input arguments with an added "pong" field.
///
/// # Example
/// ```json
/// // Input:  {"message": "hello"}
/// // Output: {"message": "hello", "pong": true}
/// ```
fn ping(_ctx: &mut CommandContext<'_>, args: Value) -> Result<Value> {
    let mut result = match args {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    result.insert("pong".to_string(), Value::Bool(true));
    Ok(Value::Object(result))
}

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::db::Db;
    use crate::library::PromptLibrary;
    use crate::runtime;

    /// Library on a temp database, opened on the shared runtime
    pub fn library() -> (TempDir, PromptLibrary) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.db");
        let db = runtime::block_on(Db::open(path, 2)).unwrap();
        (dir, PromptLibrary::from_db(db))
    }
}
