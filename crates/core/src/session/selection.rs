//! Selection state of the prompt management panel
//!
//! ```text
//!   Unselected ──select──▶ Selected ──request_delete──▶ PendingDelete
//!       ▲                    ▲  │                          │   │
//!       │                    │  └──close──▶ Unselected     │   │
//!       │                    └─────────cancel_delete───────┘   │
//!       └───────────────────────confirm_delete─────────────────┘
//! ```

use serde::Serialize;

use crate::errors::{PromptLibError, Result};

/// Id reported while nothing is selected
pub const NO_SELECTION: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Unselected,
    Selected { id: i64 },
    PendingDelete { id: i64 },
}

/// Which parts of the panel the rendering layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelVisibility {
    /// Title/text editors plus the save/delete/close row
    pub edit_panel:      bool,
    pub delete_button:   bool,
    /// "Confirm delete" and "Cancel"
    pub confirm_buttons: bool,
}

impl Selection {
    /// Select row `id`; a negative id clears the selection
    pub fn select(id: i64) -> Self {
        if id < 0 {
            Selection::Unselected
        } else {
            Selection::Selected { id }
        }
    }

    pub fn selected_id(&self) -> i64 {
        match self {
            Selection::Unselected => NO_SELECTION,
            Selection::Selected { id } | Selection::PendingDelete { id } => *id,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Selection::Unselected => None,
            Selection::Selected { id } | Selection::PendingDelete { id } => Some(*id),
        }
    }

    pub fn request_delete(self) -> Result<Self> {
        match self {
            Selection::Unselected => Err(PromptLibError::ValidationError(
                "No prompt is selected".to_string(),
            )),
            Selection::Selected { id } | Selection::PendingDelete { id } => {
                Ok(Selection::PendingDelete { id })
            },
        }
    }

    pub fn cancel_delete(self) -> Self {
        match self {
            Selection::PendingDelete { id } => Selection::Selected { id },
            other => other,
        }
    }

    /// Leave `PendingDelete`, returning the id that must now be deleted
    pub fn confirm_delete(self) -> Result<(Self, i64)> {
        match self {
            Selection::PendingDelete { id } => Ok((Selection::Unselected, id)),
            _ => Err(PromptLibError::ValidationError(
                "Deletion has not been requested".to_string(),
            )),
        }
    }

    pub fn close(self) -> Self {
        Selection::Unselected
    }

    pub fn panels(&self) -> PanelVisibility {
        match self {
            Selection::Unselected => PanelVisibility {
                edit_panel:      false,
                delete_button:   true,
                confirm_buttons: false,
            },
            Selection::Selected { .. } => PanelVisibility {
                edit_panel:      true,
                delete_button:   true,
                confirm_buttons: false,
            },
            Selection::PendingDelete { .. } => PanelVisibility {
                edit_panel:      true,
                delete_button:   false,
                confirm_buttons: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(Selection::select(-1), Selection::Unselected);
        assert_eq!(Selection::select(0), Selection::Selected { id: 0 });
        assert_eq!(Selection::select(5).selected_id(), 5);
        assert_eq!(Selection::Unselected.selected_id(), NO_SELECTION);
    }

    #[test]
    fn test_delete_confirmation_flow() {
        let pending = Selection::select(3).request_delete().unwrap();
        assert_eq!(pending, Selection::PendingDelete { id: 3 });
        assert!(pending.panels().confirm_buttons);
        assert!(!pending.panels().delete_button);

        assert_eq!(pending.cancel_delete(), Selection::Selected { id: 3 });

        let (after, id) = pending.confirm_delete().unwrap();
        assert_eq!(after, Selection::Unselected);
        assert_eq!(id, 3);
    }

    #[test]
    fn test_request_delete_without_selection() {
        let result = Selection::Unselected.request_delete();
        assert!(matches!(result, Err(PromptLibError::ValidationError(_))));
    }

    #[test]
    fn test_confirm_requires_pending_state() {
        assert!(Selection::Unselected.confirm_delete().is_err());
        assert!(Selection::select(1).confirm_delete().is_err());
    }

    #[test]
    fn test_cancel_and_close_outside_pending() {
        assert_eq!(Selection::Unselected.cancel_delete(), Selection::Unselected);
        assert_eq!(Selection::select(2).cancel_delete(), Selection::Selected { id: 2 });
        assert_eq!(Selection::select(2).close(), Selection::Unselected);
        assert_eq!(
            Selection::PendingDelete { id: 2 }.close(),
            Selection::Unselected
        );
    }

    #[test]
    fn test_panel_visibility() {
        let hidden = Selection::Unselected.panels();
        assert!(!hidden.edit_panel);
        assert!(!hidden.confirm_buttons);

        let shown = Selection::select(1).panels();
        assert!(shown.edit_panel);
        assert!(shown.delete_button);
        assert!(!shown.confirm_buttons);
    }

    #[test]
    fn test_serialization() {
        let value = serde_json::to_value(Selection::PendingDelete { id: 4 }).unwrap();
        assert_eq!(value["state"], "pending_delete");
        assert_eq!(value["id"], 4);
    }
}
