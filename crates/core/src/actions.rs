//! UI actions over the prompt library
//!
//! Every mutating action runs the same sequence:
//!
//! 1. validate the input (and the session state it depends on)
//! 2. mutate the store
//! 3. publish `onPromptLibraryChanged` so other sessions can [`sync`]
//! 4. refresh the owner's list and this session's cache
//!
//! The result is an [`ActionOutcome`]: plain data describing what the
//! rendering layer should show next. Nothing here touches widgets.

use serde::Serialize;
use tracing::{info, warn};

use crate::db::prompts::{Prompt, PromptSummary, UserId};
use crate::errors::{PromptLibError, Result};
use crate::events::LibraryEvent;
use crate::library::PromptLibrary;
use crate::session::{PanelVisibility, PromptSession, Selection};

// ============================================================================
// Outcome types
// ============================================================================

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Info(String),
    Warning(String),
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice::Info(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice::Warning(message.into())
    }
}

/// Values for the title/text editors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditForm {
    pub title: String,
    pub text:  String,
}

impl EditForm {
    pub fn cleared() -> Self {
        Self::default()
    }
}

impl From<&Prompt> for EditForm {
    fn from(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            text:  prompt.text.clone(),
        }
    }
}

/// Everything the rendering layer needs after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub notice:      Option<Notice>,
    /// Refreshed management list, when it may have changed
    pub prompts:     Option<Vec<PromptSummary>>,
    pub selection:   Selection,
    pub selected_id: i64,
    pub panels:      PanelVisibility,
    /// New editor contents; `None` leaves the editors untouched
    pub form:        Option<EditForm>,
    /// Dropdown choices from the session cache
    pub choices:     Vec<String>,
}

impl ActionOutcome {
    fn from_session(session: &PromptSession) -> Self {
        let selection = session.selection();
        Self {
            notice: None,
            prompts: None,
            selection,
            selected_id: selection.selected_id(),
            panels: selection.panels(),
            form: None,
            choices: session.cache().choices(),
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    fn with_prompts(mut self, prompts: Vec<PromptSummary>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    fn with_form(mut self, form: EditForm) -> Self {
        self.form = Some(form);
        self
    }
}

/// Result of picking a prompt from the chat dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsePromptOutcome {
    /// Dropdown value after the pick (always reset to the empty choice)
    pub dropdown: String,
    /// New chat input
    pub input:    String,
}

// ============================================================================
// Pipeline steps
// ============================================================================

fn require_user(session: &PromptSession) -> Result<UserId> {
    session.user().cloned().ok_or_else(|| {
        PromptLibError::ValidationError("Please sign in to manage prompts".to_string())
    })
}

fn require_selected(session: &PromptSession) -> Result<i64> {
    session
        .selection()
        .id()
        .ok_or_else(|| PromptLibError::ValidationError("No prompt is selected".to_string()))
}

/// Load prompt `id`, hiding prompts owned by someone else
async fn owned_prompt(library: &PromptLibrary, user: &UserId, id: i64) -> Result<Prompt> {
    let prompt = library.store().get_by_id(id).await?;
    if &prompt.user != user {
        return Err(PromptLibError::NotFound { id });
    }
    Ok(prompt)
}

/// A vanished row sends the panel back to `Unselected`
fn reset_on_not_found<T>(session: &mut PromptSession, result: Result<T>) -> Result<T> {
    if let Err(PromptLibError::NotFound { id }) = &result {
        warn!(id = *id, "selected prompt no longer exists");
        session.set_selection(Selection::Unselected);
    }
    result
}

async fn refresh(library: &PromptLibrary, session: &mut PromptSession) -> Result<Vec<PromptSummary>> {
    session.reload(library.store()).await?;
    library.store().list_by_user(session.user()).await
}

fn notify_changed(session: &PromptSession, user: UserId) {
    session.publish(LibraryEvent::LibraryChanged { user });
}

// ============================================================================
// Management actions
// ============================================================================

/// Current management list for the signed-in user
pub async fn list_prompts(library: &PromptLibrary, session: &PromptSession) -> Result<ActionOutcome> {
    let prompts = library.store().list_by_user(session.user()).await?;
    Ok(ActionOutcome::from_session(session).with_prompts(prompts))
}

/// Save a new prompt for the signed-in user
pub async fn create_prompt(
    library: &PromptLibrary,
    session: &mut PromptSession,
    title: &str,
    text: &str,
) -> Result<ActionOutcome> {
    let user = require_user(session)?;
    let prompt = library.store().create(&user, title, text).await?;
    notify_changed(session, user);
    let prompts = refresh(library, session).await?;

    info!(id = prompt.id, "created prompt from session");
    Ok(ActionOutcome::from_session(session)
        .with_notice(Notice::info("Prompt created successfully"))
        .with_prompts(prompts)
        .with_form(EditForm::cleared()))
}

/// Select row `id` of the management list; a negative id clears the selection
pub async fn select_prompt(
    library: &PromptLibrary,
    session: &mut PromptSession,
    id: i64,
) -> Result<ActionOutcome> {
    if id < 0 {
        session.set_selection(Selection::Unselected);
        return Ok(ActionOutcome::from_session(session).with_form(EditForm::cleared()));
    }

    let user = require_user(session)?;
    let result = owned_prompt(library, &user, id).await;
    let prompt = reset_on_not_found(session, result)?;

    session.set_selection(Selection::select(id));
    Ok(ActionOutcome::from_session(session).with_form(EditForm::from(&prompt)))
}

/// Save edits to the selected prompt
pub async fn update_selected(
    library: &PromptLibrary,
    session: &mut PromptSession,
    title: &str,
    text: &str,
) -> Result<ActionOutcome> {
    let user = require_user(session)?;
    let id = require_selected(session)?;

    let result = owned_prompt(library, &user, id).await;
    reset_on_not_found(session, result)?;

    let result = library.store().update(id, title, text).await;
    let prompt = reset_on_not_found(session, result)?;
    notify_changed(session, user);

    let prompts = refresh(library, session).await?;

    Ok(ActionOutcome::from_session(session)
        .with_notice(Notice::info("Prompt updated successfully"))
        .with_prompts(prompts)
        .with_form(EditForm::from(&prompt)))
}

/// Ask for delete confirmation on the selected prompt
pub fn request_delete(session: &mut PromptSession) -> Result<ActionOutcome> {
    let next = session.selection().request_delete()?;
    session.set_selection(next);
    Ok(ActionOutcome::from_session(session))
}

pub fn cancel_delete(session: &mut PromptSession) -> ActionOutcome {
    session.set_selection(session.selection().cancel_delete());
    ActionOutcome::from_session(session)
}

/// Delete the prompt awaiting confirmation
pub async fn confirm_delete(
    library: &PromptLibrary,
    session: &mut PromptSession,
) -> Result<ActionOutcome> {
    let user = require_user(session)?;
    let (next, id) = session.selection().confirm_delete()?;

    let result = owned_prompt(library, &user, id).await;
    reset_on_not_found(session, result)?;

    let result = library.store().delete(id).await;
    reset_on_not_found(session, result)?;

    session.set_selection(next);
    notify_changed(session, user);
    let prompts = refresh(library, session).await?;

    Ok(ActionOutcome::from_session(session)
        .with_notice(Notice::info("Prompt deleted successfully"))
        .with_prompts(prompts)
        .with_form(EditForm::cleared()))
}

pub fn close_selection(session: &mut PromptSession) -> ActionOutcome {
    session.set_selection(session.selection().close());
    ActionOutcome::from_session(session).with_form(EditForm::cleared())
}

// ============================================================================
// Chat dropdown & session lifecycle
// ============================================================================

/// Resolve a dropdown pick to chat input text
///
/// An empty or unknown title leaves `current_input` as it is.
pub fn use_prompt(session: &PromptSession, title: &str, current_input: &str) -> UsePromptOutcome {
    UsePromptOutcome {
        dropdown: String::new(),
        input:    session.cache().resolve(title, current_input).to_string(),
    }
}

pub async fn sign_in(
    library: &PromptLibrary,
    session: &mut PromptSession,
    user: UserId,
) -> Result<ActionOutcome> {
    session.sign_in(library.store(), user.clone()).await?;
    let prompts = library.store().list_by_user(Some(&user)).await?;
    session.publish(LibraryEvent::SignedIn { user });

    Ok(ActionOutcome::from_session(session)
        .with_prompts(prompts)
        .with_form(EditForm::cleared()))
}

pub fn sign_out(session: &mut PromptSession) -> ActionOutcome {
    if let Some(user) = session.sign_out() {
        session.publish(LibraryEvent::SignedOut { user });
    }

    ActionOutcome::from_session(session)
        .with_prompts(Vec::new())
        .with_form(EditForm::cleared())
}

/// Apply events from other sessions; the list is included when it changed
pub async fn sync(library: &PromptLibrary, session: &mut PromptSession) -> Result<ActionOutcome> {
    let outcome = if session.sync(library.store()).await? {
        let prompts = library.store().list_by_user(session.user()).await?;
        ActionOutcome::from_session(session).with_prompts(prompts)
    } else {
        ActionOutcome::from_session(session)
    };
    Ok(outcome)
}
