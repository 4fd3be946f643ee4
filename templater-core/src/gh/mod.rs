pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::CliGhProvider;
pub use provider::GhProvider;

use crate::constants::CREATE_PR_FALLBACK_ERROR;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static PR_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://github\.com/\S+").expect("static regex is valid"));

/// Outcome of a `gh pr create` call. Every failure mode lands in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Created { url: String },
    Failed { error: String },
}

/// One entry of `gh pr list --json number,title,url,headRefName,baseRefName,createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(rename = "headRefName")]
    pub head_branch: String,
    #[serde(rename = "baseRefName")]
    pub base_branch: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

pub fn parse_pr_list(json: &str) -> Vec<PullRequestSummary> {
    match serde_json::from_str(json) {
        Ok(prs) => prs,
        Err(e) => {
            log::debug!("Failed to parse gh pr list output: {e}");
            Vec::new()
        }
    }
}

/// Interpret the result of `gh pr create`. `gh` prints the new PR's URL on
/// stdout; anything else is reported back verbatim.
pub fn parse_create_output(success: bool, stdout: &str, stderr: &str) -> SubmitResult {
    let stdout = stdout.trim();
    let stderr = stderr.trim();

    if !success {
        let error = [stderr, stdout]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(CREATE_PR_FALLBACK_ERROR);
        return SubmitResult::Failed {
            error: error.to_string(),
        };
    }

    match PR_URL.find(stdout) {
        Some(m) => SubmitResult::Created {
            url: m.as_str().to_string(),
        },
        None => {
            let shown = if stdout.is_empty() { "No output" } else { stdout };
            SubmitResult::Failed {
                error: format!("PR creation output: {shown}. URL not found."),
            }
        }
    }
}
