use crate::{
    config::keys::Command,
    recovery::RecoveryAction,
    state::{AppState, ErrorReason, Selection},
};

/// Which screen is showing. Derived from [`AppState`] and used to pick key
/// bindings, hints and the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenStatus {
    Error {
        reason: ErrorReason,
        compare_url: Option<String>,
        recovery: Option<RecoveryAction>,
    },
    SelectingBranch,
    SelectingTemplate,
    Editing,
    /// Blocking while the PR is created; only a hard quit gets through
    Creating,
    Success {
        url: String,
    },
    Failed {
        error: String,
        compare_url: Option<String>,
    },
}

impl ScreenStatus {
    pub fn project(state: &AppState) -> Self {
        match state {
            AppState::Error {
                reason,
                compare_url,
            } => ScreenStatus::Error {
                reason: *reason,
                compare_url: compare_url.clone(),
                recovery: reason.recovery(),
            },
            AppState::Creating { .. } => ScreenStatus::Creating,
            AppState::Success { url } => ScreenStatus::Success { url: url.clone() },
            AppState::Failed { error, compare_url } => ScreenStatus::Failed {
                error: error.clone(),
                compare_url: compare_url.clone(),
            },
            AppState::Interactive(session) => match session.selection {
                Selection::Template { .. } => ScreenStatus::Editing,
                Selection::Branch(_) => ScreenStatus::SelectingTemplate,
                Selection::Nothing => ScreenStatus::SelectingBranch,
            },
        }
    }

    /// Stable kebab-case name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ScreenStatus::Error { .. } => "error",
            ScreenStatus::SelectingBranch => "selecting-branch",
            ScreenStatus::SelectingTemplate => "selecting-template",
            ScreenStatus::Editing => "editing",
            ScreenStatus::Creating => "creating",
            ScreenStatus::Success { .. } => "success",
            ScreenStatus::Failed { .. } => "failed",
        }
    }

    /// Commands to show in the footer bar, in display order.
    pub fn footer_commands(&self) -> &'static [Command] {
        match self {
            ScreenStatus::SelectingBranch => &[
                Command::MoveUp,
                Command::MoveDown,
                Command::Select,
                Command::Quit,
            ],
            ScreenStatus::SelectingTemplate => &[
                Command::MoveUp,
                Command::MoveDown,
                Command::Select,
                Command::GoBack,
                Command::Quit,
            ],
            ScreenStatus::Editing => &[Command::Save, Command::GoBack, Command::Quit],
            ScreenStatus::Error {
                recovery: Some(_), ..
            } => &[Command::Confirm, Command::Decline, Command::Quit],
            ScreenStatus::Error { recovery: None, .. }
            | ScreenStatus::Success { .. }
            | ScreenStatus::Failed { .. }
            | ScreenStatus::Creating => &[Command::Quit],
        }
    }
}
