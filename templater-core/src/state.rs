use crate::{
    action::{Action, EditAction},
    editor::EditBuffer,
    gh::PullRequestSummary,
    recovery::RecoveryAction,
    template::Template,
};

/// Why the app could not start an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReason {
    NotGitRepo,
    GhNotInstalled,
    GhNotAuthenticated,
    NoTemplates,
    NoBranches,
}

impl ErrorReason {
    pub fn title(self) -> &'static str {
        match self {
            ErrorReason::NotGitRepo => "Not a Git Repository",
            ErrorReason::GhNotInstalled => "GitHub CLI Not Installed",
            ErrorReason::GhNotAuthenticated => "GitHub CLI Not Authenticated",
            ErrorReason::NoTemplates => "No PR Templates Found",
            ErrorReason::NoBranches => "No Remote Branches Found",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorReason::NotGitRepo => "This directory is not a git repository.",
            ErrorReason::GhNotInstalled => "GitHub CLI (gh) is required to create pull requests.",
            ErrorReason::GhNotAuthenticated => "You need to authenticate with GitHub CLI first.",
            ErrorReason::NoTemplates => "No pull request templates were found in this repository.",
            ErrorReason::NoBranches => "No remote branches were found to merge into.",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            ErrorReason::NotGitRepo => "Navigate to a git repository and try again.",
            ErrorReason::GhNotInstalled => "Would you like to open the installation page?",
            ErrorReason::GhNotAuthenticated => "Would you like to run 'gh auth login'?",
            ErrorReason::NoTemplates => "Would you like to create a default template?",
            ErrorReason::NoBranches => {
                "Make sure you've pushed your branch and that the remote is configured."
            }
        }
    }

    pub fn recovery(self) -> Option<RecoveryAction> {
        match self {
            ErrorReason::GhNotInstalled => Some(RecoveryAction::OpenInstallPage),
            ErrorReason::GhNotAuthenticated => Some(RecoveryAction::AuthLogin),
            ErrorReason::NoTemplates => Some(RecoveryAction::ScaffoldTemplate),
            ErrorReason::NotGitRepo | ErrorReason::NoBranches => None,
        }
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorReason::NotGitRepo => "not-git-repo",
            ErrorReason::GhNotInstalled => "gh-not-installed",
            ErrorReason::GhNotAuthenticated => "gh-not-authenticated",
            ErrorReason::NoTemplates => "no-templates",
            ErrorReason::NoBranches => "no-branches",
        };
        f.write_str(s)
    }
}

/// What the user has picked so far. A template can only be chosen after a
/// branch, and the edit buffer only exists while a template is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Nothing,
    Branch(String),
    Template {
        branch: String,
        template: Template,
        editor: EditBuffer,
    },
}

/// Data for the interactive phase: everything discovered at startup plus the
/// user's current picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub current_branch: Option<String>,
    pub username: Option<String>,
    pub recent_prs: Vec<PullRequestSummary>,
    pub branches: Vec<String>,
    pub templates: Vec<Template>,
    pub branch_focus: usize,
    pub template_focus: usize,
    pub selection: Selection,
}

impl Session {
    pub fn new(
        current_branch: Option<String>,
        branches: Vec<String>,
        templates: Vec<Template>,
    ) -> Self {
        Self {
            current_branch,
            username: None,
            recent_prs: Vec::new(),
            branches,
            templates,
            branch_focus: 0,
            template_focus: 0,
            selection: Selection::Nothing,
        }
    }

    pub fn selected_branch(&self) -> Option<&str> {
        match &self.selection {
            Selection::Nothing => None,
            Selection::Branch(branch) | Selection::Template { branch, .. } => Some(branch),
        }
    }

    pub fn selected_template(&self) -> Option<&Template> {
        match &self.selection {
            Selection::Template { template, .. } => Some(template),
            _ => None,
        }
    }

    pub fn editor(&self) -> Option<&EditBuffer> {
        match &self.selection {
            Selection::Template { editor, .. } => Some(editor),
            _ => None,
        }
    }

    /// The edit buffer flattened to text, empty when nothing is being edited.
    pub fn editor_content(&self) -> String {
        self.editor().map(EditBuffer::to_text).unwrap_or_default()
    }

    /// Pick the target branch. With a single template there is nothing to
    /// choose, so editing starts right away.
    pub fn select_branch(&mut self, branch: &str) {
        self.template_focus = 0;
        self.selection = match self.templates.as_slice() {
            [only] => Selection::Template {
                branch: branch.to_string(),
                template: only.clone(),
                editor: EditBuffer::new(&only.content),
            },
            _ => Selection::Branch(branch.to_string()),
        };
    }

    pub fn select_template(&mut self, index: usize) {
        let Some(branch) = self.selected_branch().map(str::to_string) else {
            log::warn!("Ignoring template selection without a target branch");
            return;
        };
        let Some(template) = self.templates.get(index).cloned() else {
            return;
        };
        self.template_focus = index;
        self.selection = Selection::Template {
            branch,
            editor: EditBuffer::new(&template.content),
            template,
        };
    }

    pub fn deselect_branch(&mut self) {
        self.selection = Selection::Nothing;
    }

    pub fn deselect_template(&mut self) {
        if let Selection::Template { branch, .. } = &self.selection {
            self.selection = Selection::Branch(branch.clone());
        }
    }

    /// Apply a navigation or editing action. Saving and quitting are handled
    /// by the state machine.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_focus(false),
            Action::MoveDown => self.move_focus(true),
            Action::Select => match &self.selection {
                Selection::Nothing => {
                    if let Some(branch) = self.branches.get(self.branch_focus).cloned() {
                        self.select_branch(&branch);
                    }
                }
                Selection::Branch(_) => self.select_template(self.template_focus),
                Selection::Template { .. } => {}
            },
            Action::GoBack => match &self.selection {
                Selection::Nothing => {}
                Selection::Branch(_) => self.deselect_branch(),
                Selection::Template { .. } => self.deselect_template(),
            },
            Action::Edit(edit) => self.edit(edit),
            Action::Save | Action::Quit | Action::Confirm | Action::Decline => {}
        }
    }

    fn edit(&mut self, edit: EditAction) {
        if let Selection::Template { editor, .. } = &mut self.selection {
            editor.apply(edit);
        }
    }

    /// Move the focused row of the visible list, wrapping at both ends.
    fn move_focus(&mut self, down: bool) {
        let (focus, len) = match &self.selection {
            Selection::Nothing => (&mut self.branch_focus, self.branches.len()),
            Selection::Branch(_) => (&mut self.template_focus, self.templates.len()),
            Selection::Template { .. } => return,
        };
        if len == 0 {
            return;
        }
        *focus = if down {
            (*focus + 1) % len
        } else {
            (*focus + len - 1) % len
        };
    }
}

/// The whole application state. Each variant carries only what its screen needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Picking a branch, picking a template, or editing
    Interactive(Session),
    /// Waiting for `gh pr create`
    Creating { target_branch: String, title: String },
    Success { url: String },
    Failed {
        error: String,
        compare_url: Option<String>,
    },
    /// A startup check failed before any session began
    Error {
        reason: ErrorReason,
        compare_url: Option<String>,
    },
}

impl AppState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AppState::Interactive(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn template(name: &str, content: &str) -> Template {
        Template {
            name: name.to_string(),
            path: PathBuf::from(format!(".github/PULL_REQUEST_TEMPLATE/{name}.md")),
            content: content.to_string(),
        }
    }

    fn session(templates: Vec<Template>) -> Session {
        Session::new(
            Some("feature-x".to_string()),
            vec!["develop".into(), "main".into(), "feature-x".into()],
            templates,
        )
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut s = session(vec![template("a", ""), template("b", "")]);
        s.apply(Action::MoveUp);
        assert_eq!(s.branch_focus, 2);
        s.apply(Action::MoveDown);
        assert_eq!(s.branch_focus, 0);
        s.apply(Action::MoveDown);
        assert_eq!(s.branch_focus, 1);
    }

    #[test]
    fn test_select_focused_branch() {
        let mut s = session(vec![template("a", ""), template("b", "")]);
        s.apply(Action::MoveDown);
        s.apply(Action::Select);
        assert_eq!(s.selection, Selection::Branch("main".to_string()));
    }

    #[test]
    fn test_template_focus_moves_after_branch_selected() {
        let mut s = session(vec![template("a", ""), template("b", "B body")]);
        s.select_branch("develop");
        s.apply(Action::MoveDown);
        assert_eq!(s.template_focus, 1);
        assert_eq!(s.branch_focus, 0);
        s.apply(Action::Select);
        assert_eq!(s.selected_template().map(|t| t.name.as_str()), Some("b"));
        assert_eq!(s.editor_content(), "B body");
    }

    #[test]
    fn test_single_template_skips_template_selection() {
        let mut s = session(vec![template("only", "# Only")]);
        s.select_branch("main");
        assert_eq!(s.selected_template().map(|t| t.name.as_str()), Some("only"));
        assert_eq!(s.editor_content(), "# Only");
    }

    #[test]
    fn test_select_template_requires_branch() {
        let mut s = session(vec![template("a", ""), template("b", "")]);
        s.select_template(0);
        assert_eq!(s.selection, Selection::Nothing);
    }

    #[test]
    fn test_go_back_steps_through_selection() {
        let mut s = session(vec![template("a", "x"), template("b", "y")]);
        s.select_branch("main");
        s.select_template(1);
        s.apply(Action::GoBack);
        assert_eq!(s.selection, Selection::Branch("main".to_string()));
        s.apply(Action::GoBack);
        assert_eq!(s.selection, Selection::Nothing);
        s.apply(Action::GoBack);
        assert_eq!(s.selection, Selection::Nothing);
    }

    #[test]
    fn test_reselecting_template_reseeds_editor() {
        let mut s = session(vec![template("a", "first"), template("b", "second")]);
        s.select_branch("main");
        s.select_template(0);
        s.apply(Action::Edit(EditAction::Insert('!')));
        assert_eq!(s.editor_content(), "!first");

        s.deselect_template();
        s.select_template(0);
        assert_eq!(s.editor_content(), "first");
        assert_eq!(s.editor().map(EditBuffer::cursor), Some((0, 0)));
    }

    #[test]
    fn test_edits_ignored_outside_editor() {
        let mut s = session(vec![template("a", ""), template("b", "")]);
        s.apply(Action::Edit(EditAction::Insert('x')));
        assert_eq!(s.selection, Selection::Nothing);
        assert_eq!(s.editor_content(), "");
    }

    #[test]
    fn test_selecting_branch_resets_template_focus() {
        let mut s = session(vec![template("a", ""), template("b", "")]);
        s.select_branch("main");
        s.apply(Action::MoveDown);
        s.deselect_branch();
        s.select_branch("develop");
        assert_eq!(s.template_focus, 0);
    }

    #[test]
    fn test_error_reason_recovery() {
        assert_eq!(ErrorReason::NotGitRepo.recovery(), None);
        assert_eq!(ErrorReason::NoBranches.recovery(), None);
        assert_eq!(
            ErrorReason::GhNotAuthenticated.recovery(),
            Some(RecoveryAction::AuthLogin)
        );
        assert_eq!(ErrorReason::GhNotAuthenticated.to_string(), "gh-not-authenticated");
    }
}
