use super::{compare_url_from_remote, parse_remote_refs, provider::GitProvider};
use std::{path::Path, process::Command};

pub struct CliGitProvider;

impl GitProvider for CliGitProvider {
    fn is_repo_root(&self, repo_path: &Path) -> bool {
        let output = Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(repo_path)
            .output();

        match output {
            Ok(output) => output.status.success(),
            Err(e) => {
                log::warn!("Failed to run git: {e}");
                false
            }
        }
    }

    fn current_branch(&self, repo_path: &Path) -> Option<String> {
        let output = Command::new("git")
            .args(["branch", "--show-current"])
            .current_dir(repo_path)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }
        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if branch.is_empty() { None } else { Some(branch) }
    }

    fn remote_branches(&self, repo_path: &Path) -> Vec<String> {
        let output = Command::new("git")
            .args(["for-each-ref", "--format=%(refname)", "refs/remotes"])
            .current_dir(repo_path)
            .output();

        let Ok(output) = output else {
            return Vec::new();
        };
        if !output.status.success() {
            log::debug!(
                "git for-each-ref failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Vec::new();
        }

        parse_remote_refs(&String::from_utf8_lossy(&output.stdout))
    }

    fn compare_url(&self, repo_path: &Path) -> Option<String> {
        let output = Command::new("git")
            .args(["remote", "get-url", "origin"])
            .current_dir(repo_path)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }
        compare_url_from_remote(&String::from_utf8_lossy(&output.stdout))
    }
}
