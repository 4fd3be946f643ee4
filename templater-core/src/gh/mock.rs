use super::{PullRequestSummary, SubmitResult, provider::GhProvider};
use std::{path::Path, sync::Mutex};

/// Arguments of a recorded `create_pull_request` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub base: String,
    pub title: String,
    pub body: String,
}

#[derive(Default)]
pub struct MockGhProvider {
    pub installed: bool,
    pub authenticated: bool,
    pub user_handle: Option<String>,
    pub recent_prs: Vec<PullRequestSummary>,
    /// Returned by the next submission; a created PR when unset
    pub submit_result: Mutex<Option<SubmitResult>>,
    pub submissions: Mutex<Vec<Submission>>,
    pub auth_login_result: bool,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockGhProvider {
    /// Installed and authenticated.
    pub fn ready() -> Self {
        Self {
            installed: true,
            authenticated: true,
            ..Default::default()
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GhProvider for MockGhProvider {
    fn is_installed(&self) -> bool {
        self.record("is_installed");
        self.installed
    }

    fn is_authenticated(&self) -> bool {
        self.record("is_authenticated");
        self.authenticated
    }

    fn user_handle(&self) -> Option<String> {
        self.record("user_handle");
        self.user_handle.clone()
    }

    fn recent_pull_requests(&self, _repo_path: &Path, limit: usize) -> Vec<PullRequestSummary> {
        self.record("recent_pull_requests");
        self.recent_prs.iter().take(limit).cloned().collect()
    }

    fn create_pull_request(
        &self,
        _repo_path: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> SubmitResult {
        self.record("create_pull_request");
        self.submissions.lock().unwrap().push(Submission {
            base: base.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });
        self.submit_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| SubmitResult::Created {
                url: "https://github.com/mock/repo/pull/1".to_string(),
            })
    }

    fn auth_login(&self) -> bool {
        self.record("auth_login");
        self.auth_login_result
    }
}
