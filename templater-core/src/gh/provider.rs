use super::{PullRequestSummary, SubmitResult};
use std::path::Path;

/// The GitHub CLI as seen by the rest of the app. Failures collapse into
/// sentinels; nothing here returns an error.
pub trait GhProvider: Send + Sync {
    fn is_installed(&self) -> bool;
    fn is_authenticated(&self) -> bool;
    fn user_handle(&self) -> Option<String>;
    fn recent_pull_requests(&self, repo_path: &Path, limit: usize) -> Vec<PullRequestSummary>;
    fn create_pull_request(
        &self,
        repo_path: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> SubmitResult;
    /// Run the interactive `gh auth login` flow. Needs the real terminal.
    fn auth_login(&self) -> bool;
}
