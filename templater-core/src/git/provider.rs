use std::path::Path;

/// Read-only view of the repository the tool is run in. Every method collapses
/// failures into a sentinel instead of returning an error.
pub trait GitProvider: Send + Sync {
    /// `false` when `repo_path` is not inside a git repository or git cannot run.
    fn is_repo_root(&self, repo_path: &Path) -> bool;
    /// `None` on a detached HEAD or on error.
    fn current_branch(&self, repo_path: &Path) -> Option<String>;
    /// Remote-tracking branch names without the remote prefix.
    fn remote_branches(&self, repo_path: &Path) -> Vec<String>;
    /// Manual PR creation page for `origin`, when it points at GitHub.
    fn compare_url(&self, repo_path: &Path) -> Option<String>;
}
