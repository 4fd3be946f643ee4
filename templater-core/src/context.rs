use crate::{
    gh::{CliGhProvider, GhProvider},
    git::{CliGitProvider, GitProvider},
    template::{FsTemplateProvider, TemplateProvider},
};
use std::{path::PathBuf, sync::Arc};

/// External collaborators plus the directory they operate on.
#[derive(Clone)]
pub struct AppContext {
    pub repo_root: PathBuf,
    pub git: Arc<dyn GitProvider>,
    pub gh: Arc<dyn GhProvider>,
    pub templates: Arc<dyn TemplateProvider>,
}

impl AppContext {
    /// Real `git`, `gh` and filesystem collaborators rooted at `repo_root`.
    pub fn from_cli(repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            git: Arc::new(CliGitProvider),
            gh: Arc::new(CliGhProvider),
            templates: Arc::new(FsTemplateProvider),
        }
    }
}
