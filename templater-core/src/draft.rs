use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s*(.+)$").expect("static regex is valid"));

/// Everything `gh pr create` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub base: String,
    pub title: String,
    pub body: String,
}

/// The first `# heading` in the body, or a title naming the head branch.
pub fn derive_title(body: &str, current_branch: Option<&str>) -> String {
    if let Some(title) = HEADING
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
    {
        return title.to_string();
    }
    format!("PR from {}", current_branch.unwrap_or("current branch"))
}
