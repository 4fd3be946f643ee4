use crate::{
    action::Action,
    branch::prioritize_branches,
    constants::{RECENT_PR_LIMIT, SUCCESS_EXIT_DELAY},
    context::AppContext,
    draft::{PullRequestDraft, derive_title},
    event::AppEvent,
    gh::SubmitResult,
    recovery::RecoveryAction,
    state::{AppState, ErrorReason, Session},
    status::ScreenStatus,
};
use std::{thread, time::Duration};

/// Work the runtime must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run `gh pr create` in the background and report back with
    /// [`AppEvent::SubmissionFinished`]
    Submit(PullRequestDraft),
    /// Send [`AppEvent::AutoExitElapsed`] after the delay
    ScheduleExit(Duration),
    Exit(u8),
    /// Leave the UI, then run the action
    Recover(RecoveryAction),
}

/// Owns the [`AppState`] and performs every transition.
pub struct StateMachine {
    state: AppState,
    ctx: AppContext,
}

impl StateMachine {
    pub fn new(state: AppState, ctx: AppContext) -> Self {
        Self { state, ctx }
    }

    /// Run the startup checks in order and stop at the first one that fails.
    pub fn initialize(ctx: AppContext) -> Self {
        let state = Self::check_readiness(&ctx);
        match &state {
            AppState::Error { reason, .. } => log::warn!("Startup check failed: {reason}"),
            _ => log::info!("Startup checks passed"),
        }
        Self { state, ctx }
    }

    fn check_readiness(ctx: &AppContext) -> AppState {
        let root = ctx.repo_root.as_path();
        let error = |reason| AppState::Error {
            reason,
            compare_url: ctx.git.compare_url(root),
        };

        if !ctx.git.is_repo_root(root) {
            return AppState::Error {
                reason: ErrorReason::NotGitRepo,
                compare_url: None,
            };
        }
        if !ctx.gh.is_installed() {
            return error(ErrorReason::GhNotInstalled);
        }
        if !ctx.gh.is_authenticated() {
            return error(ErrorReason::GhNotAuthenticated);
        }

        let templates = ctx.templates.discover(root);
        if templates.is_empty() {
            return error(ErrorReason::NoTemplates);
        }

        let current_branch = ctx.git.current_branch(root);
        let branches = prioritize_branches(ctx.git.remote_branches(root));
        if branches.is_empty() {
            return error(ErrorReason::NoBranches);
        }
        log::info!(
            "Found {} target branch(es), current branch {current_branch:?}",
            branches.len()
        );

        let mut session = Session::new(current_branch, branches, templates);
        let (username, recent_prs) = thread::scope(|s| {
            let username = s.spawn(|| ctx.gh.user_handle());
            let recent_prs = ctx.gh.recent_pull_requests(root, RECENT_PR_LIMIT);
            (username.join().ok().flatten(), recent_prs)
        });
        session.username = username;
        session.recent_prs = recent_prs;

        AppState::Interactive(session)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn status(&self) -> ScreenStatus {
        ScreenStatus::project(&self.state)
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        if action == Action::Quit {
            return Some(Effect::Exit(0));
        }

        match &mut self.state {
            AppState::Interactive(session) => {
                if action == Action::Save {
                    let text = session.editor_content();
                    return self.save(&text);
                }
                session.apply(action);
                None
            }
            AppState::Error { reason, .. } => {
                let recovery = reason.recovery()?;
                match action {
                    Action::Confirm => Some(Effect::Recover(recovery)),
                    Action::Decline => Some(Effect::Exit(0)),
                    _ => None,
                }
            }
            AppState::Creating { .. } | AppState::Success { .. } | AppState::Failed { .. } => None,
        }
    }

    /// Leave the editor and start creating the PR from `text`. Without a
    /// selected branch and template this fails locally and `gh` is never called.
    pub fn save(&mut self, text: &str) -> Option<Effect> {
        let AppState::Interactive(session) = &self.state else {
            log::warn!("Ignoring save outside the interactive phase");
            return None;
        };

        let Some(base) = session.selected_branch() else {
            self.fail("No target branch selected. Please select a branch first.");
            return None;
        };
        if session.selected_template().is_none() {
            self.fail("No template selected. Please select a template first.");
            return None;
        }

        let draft = PullRequestDraft {
            base: base.to_string(),
            title: derive_title(text, session.current_branch.as_deref()),
            body: text.to_string(),
        };
        log::info!("Submitting PR '{}' into {}", draft.title, draft.base);
        self.state = AppState::Creating {
            target_branch: draft.base.clone(),
            title: draft.title.clone(),
        };
        Some(Effect::Submit(draft))
    }

    /// Blocking call to the PR collaborator. Meant for a background thread.
    pub fn submit(ctx: &AppContext, draft: &PullRequestDraft) -> SubmitResult {
        ctx.gh
            .create_pull_request(&ctx.repo_root, &draft.base, &draft.title, &draft.body)
    }

    /// Apply a background event.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::SubmissionFinished(result)
                if matches!(self.state, AppState::Creating { .. }) =>
            {
                match result {
                    SubmitResult::Created { url } => {
                        log::info!("Created PR {url}");
                        self.state = AppState::Success { url };
                        Some(Effect::ScheduleExit(SUCCESS_EXIT_DELAY))
                    }
                    SubmitResult::Failed { error } => {
                        self.fail(&error);
                        None
                    }
                }
            }
            AppEvent::AutoExitElapsed if matches!(self.state, AppState::Success { .. }) => {
                Some(Effect::Exit(0))
            }
            event => {
                log::warn!("Ignoring {event:?} in {} state", self.status().name());
                None
            }
        }
    }

    fn fail(&mut self, error: &str) {
        log::warn!("PR creation failed: {error}");
        self.state = AppState::Failed {
            error: error.to_string(),
            compare_url: self.ctx.git.compare_url(&self.ctx.repo_root),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action::EditAction,
        gh::{PullRequestSummary, mock::MockGhProvider},
        git::mock::MockGitProvider,
        template::{Template, mock::MockTemplateProvider},
    };
    use std::{path::PathBuf, sync::Arc};

    const COMPARE: &str = "https://github.com/org/repo/compare";

    fn template(name: &str, content: &str) -> Template {
        Template {
            name: name.to_string(),
            path: PathBuf::from(format!(".github/PULL_REQUEST_TEMPLATE/{name}.md")),
            content: content.to_string(),
        }
    }

    fn ready_git() -> MockGitProvider {
        MockGitProvider {
            is_repo: true,
            current_branch: Some("feature-x".to_string()),
            remote_branches: vec!["main".into(), "develop".into(), "feature-x".into()],
            compare_url: Some(COMPARE.to_string()),
            ..Default::default()
        }
    }

    struct Fixture {
        git: Arc<MockGitProvider>,
        gh: Arc<MockGhProvider>,
        templates: Arc<MockTemplateProvider>,
    }

    impl Fixture {
        fn new(git: MockGitProvider, gh: MockGhProvider, templates: Vec<Template>) -> Self {
            Self {
                git: Arc::new(git),
                gh: Arc::new(gh),
                templates: Arc::new(MockTemplateProvider::with_templates(templates)),
            }
        }

        fn ready(templates: Vec<Template>) -> Self {
            Self::new(ready_git(), MockGhProvider::ready(), templates)
        }

        fn context(&self) -> AppContext {
            AppContext {
                repo_root: PathBuf::from("/repo"),
                git: self.git.clone(),
                gh: self.gh.clone(),
                templates: self.templates.clone(),
            }
        }

        fn machine(&self) -> StateMachine {
            StateMachine::initialize(self.context())
        }
    }

    fn two_templates() -> Vec<Template> {
        vec![template("bugfix", "# Fix\n"), template("feature", "# Feature\n\nDetails")]
    }

    #[test]
    fn test_happy_path() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();

        assert_eq!(machine.status(), ScreenStatus::SelectingBranch);
        let session = machine.state().session().unwrap();
        assert_eq!(session.branches, vec!["develop", "main", "feature-x"]);

        machine.apply(Action::Select);
        assert_eq!(machine.status(), ScreenStatus::SelectingTemplate);
        assert_eq!(
            machine.state().session().unwrap().selected_branch(),
            Some("develop")
        );

        machine.apply(Action::MoveDown);
        machine.apply(Action::Select);
        assert_eq!(machine.status(), ScreenStatus::Editing);
        assert_eq!(
            machine.state().session().unwrap().editor_content(),
            "# Feature\n\nDetails"
        );

        let effect = machine.save("# My Title\nBody");
        assert_eq!(
            effect,
            Some(Effect::Submit(PullRequestDraft {
                base: "develop".to_string(),
                title: "My Title".to_string(),
                body: "# My Title\nBody".to_string(),
            }))
        );
        assert_eq!(machine.status(), ScreenStatus::Creating);

        let url = "https://github.com/org/repo/pull/42".to_string();
        let effect = machine.handle_event(AppEvent::SubmissionFinished(SubmitResult::Created {
            url: url.clone(),
        }));
        assert_eq!(effect, Some(Effect::ScheduleExit(Duration::from_secs(3))));
        assert_eq!(machine.status(), ScreenStatus::Success { url });

        assert_eq!(
            machine.handle_event(AppEvent::AutoExitElapsed),
            Some(Effect::Exit(0))
        );
    }

    #[test]
    fn test_save_action_uses_edited_buffer() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();
        machine.apply(Action::Select);
        machine.apply(Action::Select);
        machine.apply(Action::Edit(EditAction::Insert('#')));
        machine.apply(Action::Edit(EditAction::Insert(' ')));
        machine.apply(Action::Edit(EditAction::Insert('X')));
        machine.apply(Action::Edit(EditAction::SplitLine));

        let Some(Effect::Submit(draft)) = machine.apply(Action::Save) else {
            panic!("expected a submission");
        };
        assert_eq!(draft.body, "# X\n# Fix\n");
        assert_eq!(draft.title, "X");
    }

    #[test]
    fn test_submit_calls_collaborator() {
        let fixture = Fixture::ready(two_templates());
        let draft = PullRequestDraft {
            base: "main".into(),
            title: "T".into(),
            body: "B".into(),
        };
        let result = StateMachine::submit(&fixture.context(), &draft);
        assert!(matches!(result, SubmitResult::Created { .. }));
        let submissions = fixture.gh.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].base, "main");
        assert_eq!(submissions[0].body, "B");
    }

    #[test]
    fn test_single_template_skips_to_editing() {
        let fixture = Fixture::ready(vec![template("only", "# Only")]);
        let mut machine = fixture.machine();
        machine.apply(Action::MoveDown);
        machine.apply(Action::Select);
        assert_eq!(machine.status(), ScreenStatus::Editing);
        assert_eq!(
            machine.state().session().unwrap().selected_branch(),
            Some("main")
        );
    }

    #[test]
    fn test_save_without_branch_fails_without_submitting() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();

        assert_eq!(machine.save("# Title"), None);
        match machine.status() {
            ScreenStatus::Failed { error, compare_url } => {
                assert!(error.contains("branch"), "error was: {error}");
                assert_eq!(compare_url.as_deref(), Some(COMPARE));
            }
            other => panic!("expected failed, got {other:?}"),
        }
        assert!(fixture.gh.submissions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_save_without_template_fails() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();
        machine.apply(Action::Select);

        machine.apply(Action::Save);
        assert!(matches!(
            machine.status(),
            ScreenStatus::Failed { error, .. } if error.contains("template")
        ));
    }

    #[test]
    fn test_submission_failure_recomputes_compare_url() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();
        machine.apply(Action::Select);
        machine.apply(Action::Select);
        machine.apply(Action::Save);

        let effect = machine.handle_event(AppEvent::SubmissionFinished(SubmitResult::Failed {
            error: "no commits between main and feature-x".into(),
        }));
        assert_eq!(effect, None);
        assert_eq!(
            machine.status(),
            ScreenStatus::Failed {
                error: "no commits between main and feature-x".into(),
                compare_url: Some(COMPARE.into()),
            }
        );
    }

    #[test]
    fn test_deselect_template_and_branch() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();
        machine.apply(Action::Select);
        machine.apply(Action::Select);
        machine.apply(Action::GoBack);
        assert_eq!(machine.status(), ScreenStatus::SelectingTemplate);
        machine.apply(Action::GoBack);
        assert_eq!(machine.status(), ScreenStatus::SelectingBranch);
    }

    #[test]
    fn test_not_a_repo_stops_immediately() {
        let fixture = Fixture::new(
            MockGitProvider::default(),
            MockGhProvider::ready(),
            two_templates(),
        );
        let machine = fixture.machine();
        assert_eq!(
            machine.status(),
            ScreenStatus::Error {
                reason: ErrorReason::NotGitRepo,
                compare_url: None,
                recovery: None,
            }
        );
        assert_eq!(*fixture.git.calls.lock().unwrap(), vec!["is_repo_root"]);
        assert!(fixture.gh.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unauthenticated_reports_compare_url() {
        let gh = MockGhProvider {
            installed: true,
            ..Default::default()
        };
        let fixture = Fixture::new(ready_git(), gh, two_templates());
        let machine = fixture.machine();
        assert_eq!(
            machine.status(),
            ScreenStatus::Error {
                reason: ErrorReason::GhNotAuthenticated,
                compare_url: Some(COMPARE.to_string()),
                recovery: Some(RecoveryAction::AuthLogin),
            }
        );
        assert_eq!(
            *fixture.gh.calls.lock().unwrap(),
            vec!["is_installed", "is_authenticated"]
        );
        assert!(fixture.templates.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_gh_missing() {
        let fixture = Fixture::new(ready_git(), MockGhProvider::default(), two_templates());
        let machine = fixture.machine();
        assert!(matches!(
            machine.status(),
            ScreenStatus::Error {
                reason: ErrorReason::GhNotInstalled,
                ..
            }
        ));
    }

    #[test]
    fn test_no_templates() {
        let fixture = Fixture::ready(Vec::new());
        let machine = fixture.machine();
        assert!(matches!(
            machine.status(),
            ScreenStatus::Error {
                reason: ErrorReason::NoTemplates,
                recovery: Some(RecoveryAction::ScaffoldTemplate),
                ..
            }
        ));
        assert!(!fixture.git.calls.lock().unwrap().contains(&"remote_branches"));
    }

    #[test]
    fn test_no_branches() {
        let git = MockGitProvider {
            remote_branches: Vec::new(),
            ..ready_git()
        };
        let fixture = Fixture::new(git, MockGhProvider::ready(), two_templates());
        let machine = fixture.machine();
        assert!(matches!(
            machine.status(),
            ScreenStatus::Error {
                reason: ErrorReason::NoBranches,
                recovery: None,
                ..
            }
        ));
        assert!(!fixture.gh.calls.lock().unwrap().contains(&"user_handle"));
    }

    #[test]
    fn test_enrichment_fills_session() {
        let gh = MockGhProvider {
            user_handle: Some("octocat".into()),
            recent_prs: vec![PullRequestSummary {
                number: 1,
                title: "First".into(),
                url: "https://github.com/org/repo/pull/1".into(),
                head_branch: "feature-x".into(),
                base_branch: "main".into(),
                created_at: "2024-01-01T00:00:00Z".into(),
            }],
            ..MockGhProvider::ready()
        };
        let fixture = Fixture::new(ready_git(), gh, two_templates());
        let machine = fixture.machine();
        let session = machine.state().session().unwrap();
        assert_eq!(session.username.as_deref(), Some("octocat"));
        assert_eq!(session.recent_prs.len(), 1);
    }

    #[test]
    fn test_enrichment_failure_does_not_block() {
        let fixture = Fixture::ready(two_templates());
        let machine = fixture.machine();
        let session = machine.state().session().unwrap();
        assert_eq!(session.username, None);
        assert!(session.recent_prs.is_empty());
        assert_eq!(machine.status(), ScreenStatus::SelectingBranch);
    }

    #[test]
    fn test_recovery_confirm_and_decline() {
        let fixture = Fixture::ready(Vec::new());
        let mut machine = fixture.machine();
        assert_eq!(machine.apply(Action::MoveDown), None);
        assert_eq!(
            machine.apply(Action::Confirm),
            Some(Effect::Recover(RecoveryAction::ScaffoldTemplate))
        );
        assert_eq!(machine.apply(Action::Decline), Some(Effect::Exit(0)));
    }

    #[test]
    fn test_error_without_recovery_ignores_confirm() {
        let fixture = Fixture::new(
            MockGitProvider::default(),
            MockGhProvider::ready(),
            two_templates(),
        );
        let mut machine = fixture.machine();
        assert_eq!(machine.apply(Action::Confirm), None);
        assert_eq!(machine.apply(Action::Quit), Some(Effect::Exit(0)));
    }

    #[test]
    fn test_creating_ignores_navigation() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();
        machine.apply(Action::Select);
        machine.apply(Action::Select);
        machine.apply(Action::Save);

        assert_eq!(machine.apply(Action::GoBack), None);
        assert_eq!(machine.apply(Action::Save), None);
        assert_eq!(machine.status(), ScreenStatus::Creating);
        assert_eq!(machine.apply(Action::Quit), Some(Effect::Exit(0)));
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let fixture = Fixture::ready(two_templates());
        let mut machine = fixture.machine();
        assert_eq!(machine.handle_event(AppEvent::AutoExitElapsed), None);
        assert_eq!(
            machine.handle_event(AppEvent::SubmissionFinished(SubmitResult::Created {
                url: "https://github.com/org/repo/pull/9".into(),
            })),
            None
        );
        assert_eq!(machine.status(), ScreenStatus::SelectingBranch);
    }
}
