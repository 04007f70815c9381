//! Integration tests for the prompt library
//!
//! These tests drive the library only through the public bridge:
//! - Per-owner title uniqueness
//! - Edit/delete flow of the management panel
//! - Dropdown cache across sessions of the same user

use promptlib_core::bridge::{autocomplete, call, setup};
use promptlib_core::PromptLibrary;
use serde_json::{json, Value};
use tempfile::TempDir;

fn open_library() -> (TempDir, PromptLibrary) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prompts.db");
    let library = setup(json!({ "database_path": path, "log_level": "warn" }))
        .expect("library should open");
    (dir, library)
}

fn is_error(value: &Value) -> bool {
    value.get("error") == Some(&json!(true))
}

#[test]
fn test_duplicate_titles_are_per_owner() {
    println!("\n=== Test: Duplicate Titles Per Owner ===");

    let (_dir, library) = open_library();
    let mut user1 = library.new_session();
    let mut user2 = library.new_session();

    call(&library, &mut user1, "session.sign_in", json!({"user": 1}));
    call(&library, &mut user2, "session.sign_in", json!({"user": 2}));

    let first = call(
        &library,
        &mut user1,
        "prompts.create",
        json!({"title": "Greeting", "text": "Hello!"}),
    );
    assert!(!is_error(&first), "first create should succeed: {}", first);

    let duplicate = call(
        &library,
        &mut user1,
        "prompts.create",
        json!({"title": "Greeting", "text": "Hi"}),
    );
    assert!(is_error(&duplicate));
    assert_eq!(duplicate["category"], "duplicate_title");
    assert_eq!(duplicate["severity"], "warning");

    let listed = call(&library, &mut user1, "prompts.list", json!({}));
    assert_eq!(listed["prompts"].as_array().map(Vec::len), Some(1));

    let other_owner = call(
        &library,
        &mut user2,
        "prompts.create",
        json!({"title": "Greeting", "text": "Hi"}),
    );
    assert!(!is_error(&other_owner), "other owner may reuse the title");
    println!("✅ Same title accepted for a different owner");
}

#[test]
fn test_title_length_boundary() {
    println!("\n=== Test: Title Length Boundary ===");

    let (_dir, library) = open_library();
    let mut session = library.new_session();
    call(&library, &mut session, "session.sign_in", json!({"user": "alice"}));

    let ok = call(
        &library,
        &mut session,
        "prompts.create",
        json!({"title": "x".repeat(40), "text": "body"}),
    );
    assert!(!is_error(&ok));

    let too_long = call(
        &library,
        &mut session,
        "prompts.create",
        json!({"title": "y".repeat(41), "text": "body"}),
    );
    assert!(is_error(&too_long));
    assert_eq!(too_long["category"], "validation");
}

#[test]
fn test_edit_and_delete_through_panel() {
    println!("\n=== Test: Edit And Delete Through Panel ===");

    let (_dir, library) = open_library();
    let mut session = library.new_session();
    call(&library, &mut session, "session.sign_in", json!({"user": "alice"}));

    let created = call(
        &library,
        &mut session,
        "prompts.create",
        json!({"title": "Summarize", "text": "Summarize the text"}),
    );
    let id = created["prompts"][0]["id"].as_i64().expect("id");

    let selected = call(&library, &mut session, "prompts.select", json!({"id": id}));
    assert_eq!(selected["form"]["title"], "Summarize");
    assert_eq!(selected["panels"]["edit_panel"], true);

    let updated = call(
        &library,
        &mut session,
        "prompts.update",
        json!({"title": "Summary", "text": "Summarize briefly"}),
    );
    assert_eq!(updated["notice"]["message"], "Prompt updated successfully");
    assert_eq!(updated["prompts"][0]["id"], id);
    assert_eq!(updated["prompts"][0]["title"], "Summary");

    let confirm_too_early = call(&library, &mut session, "prompts.confirm_delete", json!({}));
    assert!(is_error(&confirm_too_early));

    call(&library, &mut session, "prompts.request_delete", json!({}));
    let deleted = call(&library, &mut session, "prompts.confirm_delete", json!({}));
    assert_eq!(deleted["selected_id"], -1);
    assert_eq!(deleted["prompts"], json!([]));

    let reselect = call(&library, &mut session, "prompts.select", json!({"id": id}));
    assert!(is_error(&reselect));
    assert_eq!(reselect["category"], "not_found");
    println!("✅ Deleted prompt can no longer be selected");
}

#[test]
fn test_dropdown_follows_library_changes() {
    println!("\n=== Test: Dropdown Follows Library Changes ===");

    let (_dir, library) = open_library();
    let mut manager = library.new_session();
    let mut chat = library.new_session();

    call(&library, &mut chat, "session.sign_in", json!({"user": "alice"}));
    call(&library, &mut manager, "session.sign_in", json!({"user": "alice"}));

    call(
        &library,
        &mut manager,
        "prompts.create",
        json!({"title": "b", "text": "y"}),
    );
    call(
        &library,
        &mut manager,
        "prompts.create",
        json!({"title": "a", "text": "x"}),
    );

    let synced = call(&library, &mut chat, "session.sync", json!({}));
    assert_eq!(synced["choices"], json!(["", "a", "b"]));

    let used = call(
        &library,
        &mut chat,
        "prompts.use",
        json!({"title": "a", "input": "typed"}),
    );
    assert_eq!(used["input"], "x");

    let untouched = call(
        &library,
        &mut chat,
        "prompts.use",
        json!({"title": "", "input": "typed"}),
    );
    assert_eq!(untouched["input"], "typed");

    assert_eq!(autocomplete(&chat, "a"), vec!["a".to_string()]);

    call(&library, &mut chat, "session.sign_out", json!({}));
    assert!(autocomplete(&chat, "").is_empty());
    println!("✅ Chat dropdown tracked the manager's edits");
}
