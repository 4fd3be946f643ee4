use std::time::Duration;

/// Name given to templates discovered as a single file rather than inside a
/// template directory.
pub const DEFAULT_TEMPLATE_NAME: &str = "Pull Request Template";

/// Directory holding multiple named templates, relative to the repository root.
pub const TEMPLATE_DIR: &str = ".github/PULL_REQUEST_TEMPLATE";

/// Single-file template locations, checked in order after [`TEMPLATE_DIR`].
pub const TEMPLATE_FILES: &[&str] = &[
    ".github/PULL_REQUEST_TEMPLATE.md",
    ".github/pull_request_template.md",
    "PULL_REQUEST_TEMPLATE.md",
    "pull_request_template.md",
    "docs/PULL_REQUEST_TEMPLATE.md",
    "docs/pull_request_template.md",
];

/// Where the "create a default template" recovery writes its file.
pub const SCAFFOLD_TEMPLATE_PATH: &str = ".github/PULL_REQUEST_TEMPLATE.md";

pub const SCAFFOLD_TEMPLATE_CONTENT: &str = "# Pull Request

## Description

<!-- Describe your changes here -->

## Type of Change

- [ ] Bug fix
- [ ] New feature
- [ ] Breaking change
- [ ] Documentation update

## Checklist

- [ ] Code follows project style guidelines
- [ ] Self-review completed
- [ ] Documentation updated
";

pub const GH_INSTALL_URL: &str = "https://cli.github.com";

/// How long the success screen stays up before the process exits on its own.
pub const SUCCESS_EXIT_DELAY: Duration = Duration::from_secs(3);

pub const RECENT_PR_LIMIT: usize = 5;

pub const CREATE_PR_FALLBACK_ERROR: &str = "Failed to create PR";
