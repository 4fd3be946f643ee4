use super::provider::GitProvider;
use std::{path::Path, sync::Mutex};

#[derive(Default)]
pub struct MockGitProvider {
    pub is_repo: bool,
    pub current_branch: Option<String>,
    pub remote_branches: Vec<String>,
    pub compare_url: Option<String>,
    /// Names of the methods called, in order
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockGitProvider {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitProvider for MockGitProvider {
    fn is_repo_root(&self, _repo_path: &Path) -> bool {
        self.record("is_repo_root");
        self.is_repo
    }

    fn current_branch(&self, _repo_path: &Path) -> Option<String> {
        self.record("current_branch");
        self.current_branch.clone()
    }

    fn remote_branches(&self, _repo_path: &Path) -> Vec<String> {
        self.record("remote_branches");
        self.remote_branches.clone()
    }

    fn compare_url(&self, _repo_path: &Path) -> Option<String> {
        self.record("compare_url");
        self.compare_url.clone()
    }
}
