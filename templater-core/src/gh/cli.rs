use super::{PullRequestSummary, SubmitResult, parse_create_output, parse_pr_list, provider::GhProvider};
use std::{
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

pub struct CliGhProvider;

impl GhProvider for CliGhProvider {
    fn is_installed(&self) -> bool {
        Command::new("gh")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn is_authenticated(&self) -> bool {
        Command::new("gh")
            .args(["auth", "status"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn user_handle(&self) -> Option<String> {
        let output = Command::new("gh")
            .args(["api", "user", "--jq", ".login"])
            .output()
            .ok()?;

        if !output.status.success() {
            log::debug!(
                "gh api user failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }
        let login = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if login.is_empty() { None } else { Some(login) }
    }

    fn recent_pull_requests(&self, repo_path: &Path, limit: usize) -> Vec<PullRequestSummary> {
        let output = Command::new("gh")
            .args([
                "pr",
                "list",
                "--author",
                "@me",
                "--limit",
                &limit.to_string(),
                "--json",
                "number,title,url,headRefName,baseRefName,createdAt",
            ])
            .current_dir(repo_path)
            .output();

        let Ok(output) = output else {
            return Vec::new();
        };
        if !output.status.success() {
            return Vec::new();
        }

        parse_pr_list(&String::from_utf8_lossy(&output.stdout))
    }

    fn create_pull_request(
        &self,
        repo_path: &Path,
        base: &str,
        title: &str,
        body: &str,
    ) -> SubmitResult {
        log::info!("Creating PR against {base}: {title}");

        let child = Command::new("gh")
            .args(["pr", "create", "--base", base, "--title", title, "--body-file", "-"])
            .current_dir(repo_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                log::error!("Failed to spawn gh: {e}");
                return SubmitResult::Failed {
                    error: e.to_string(),
                };
            }
        };

        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(body.as_bytes())
        {
            log::warn!("Failed to write PR body to gh: {e}");
        }

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => {
                return SubmitResult::Failed {
                    error: e.to_string(),
                };
            }
        };

        let result = parse_create_output(
            output.status.success(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        );
        if let SubmitResult::Failed { error } = &result {
            log::warn!("gh pr create failed: {error}");
        }
        result
    }

    fn auth_login(&self) -> bool {
        match Command::new("gh").args(["auth", "login"]).status() {
            Ok(status) => status.success(),
            Err(e) => {
                log::error!("Failed to run gh auth login: {e}");
                false
            }
        }
    }
}
