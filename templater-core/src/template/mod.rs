pub mod fs;
pub mod mock;
pub mod provider;

pub use fs::FsTemplateProvider;
pub use provider::TemplateProvider;

use std::path::PathBuf;

/// A discovered PR template. `path` identifies it; two templates with the same
/// name can come from different files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl Template {
    /// Path relative to `root` for display, or the full path when it lives elsewhere.
    pub fn display_path(&self, root: &std::path::Path) -> String {
        self.path
            .strip_prefix(root)
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}
