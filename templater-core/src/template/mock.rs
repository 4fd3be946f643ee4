use super::{Template, provider::TemplateProvider};
use anyhow::Result;
use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

#[derive(Default)]
pub struct MockTemplateProvider {
    pub templates: Vec<Template>,
    pub scaffold_result: Mutex<Option<Result<PathBuf>>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockTemplateProvider {
    pub fn with_templates(templates: Vec<Template>) -> Self {
        Self {
            templates,
            ..Default::default()
        }
    }
}

impl TemplateProvider for MockTemplateProvider {
    fn discover(&self, _repo_path: &Path) -> Vec<Template> {
        self.calls.lock().unwrap().push("discover");
        self.templates.clone()
    }

    fn scaffold_default(&self, repo_path: &Path) -> Result<PathBuf> {
        self.calls.lock().unwrap().push("scaffold_default");
        self.scaffold_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(repo_path.join(".github/PULL_REQUEST_TEMPLATE.md")))
    }
}
