use super::Template;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub trait TemplateProvider: Send + Sync {
    /// Every template on the search path, in search order. Empty when none exist.
    fn discover(&self, repo_path: &Path) -> Vec<Template>;
    /// Write the default template and return where it went.
    fn scaffold_default(&self, repo_path: &Path) -> Result<PathBuf>;
}
