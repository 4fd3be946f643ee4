pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::CliGitProvider;
pub use provider::GitProvider;

use regex::Regex;
use std::sync::LazyLock;

static GITHUB_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[:/](.+?)(?:\.git)?$").expect("static regex is valid")
});

/// Parse `git for-each-ref --format=%(refname) refs/remotes` output into branch
/// names with the remote prefix stripped. Symbolic `HEAD` refs are dropped and a
/// branch present on several remotes is listed once.
pub fn parse_remote_refs(output: &str) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        let short = line.strip_prefix("refs/remotes/").unwrap_or(line);
        // Strip the remote prefix (e.g. "origin/feature/x" -> "feature/x")
        let Some((_, branch)) = short.split_once('/') else {
            continue;
        };
        if branch.is_empty() || branch == "HEAD" {
            continue;
        }
        if !branches.iter().any(|b| b == branch) {
            branches.push(branch.to_string());
        }
    }

    branches
}

/// Turn an origin URL (ssh or https) into the GitHub compare page for that repository.
pub fn compare_url_from_remote(remote_url: &str) -> Option<String> {
    let captures = GITHUB_REMOTE.captures(remote_url.trim())?;
    let slug = captures.get(1)?.as_str();
    Some(format!("https://github.com/{slug}/compare"))
}
