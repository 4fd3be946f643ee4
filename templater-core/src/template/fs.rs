use super::{Template, provider::TemplateProvider};
use crate::constants::{
    DEFAULT_TEMPLATE_NAME, SCAFFOLD_TEMPLATE_CONTENT, SCAFFOLD_TEMPLATE_PATH, TEMPLATE_DIR,
    TEMPLATE_FILES,
};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct FsTemplateProvider;

impl FsTemplateProvider {
    fn dir_templates(dir: &Path) -> Vec<Template> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        paths.sort();

        paths
            .into_iter()
            .filter_map(|path| {
                let name = path.file_stem()?.to_string_lossy().to_string();
                let content = read_template(&path)?;
                Some(Template {
                    name,
                    path,
                    content,
                })
            })
            .collect()
    }
}

fn read_template(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::warn!("Skipping unreadable template {}: {e}", path.display());
            None
        }
    }
}

impl TemplateProvider for FsTemplateProvider {
    fn discover(&self, repo_path: &Path) -> Vec<Template> {
        let mut templates = Self::dir_templates(&repo_path.join(TEMPLATE_DIR));
        let mut seen: Vec<PathBuf> = templates
            .iter()
            .filter_map(|t| t.path.canonicalize().ok())
            .collect();

        for relative in TEMPLATE_FILES {
            let path = repo_path.join(relative);
            if !path.is_file() {
                continue;
            }
            // Case-insensitive file systems resolve several spellings to one file
            if let Ok(canonical) = path.canonicalize() {
                if seen.contains(&canonical) {
                    continue;
                }
                seen.push(canonical);
            }
            if let Some(content) = read_template(&path) {
                templates.push(Template {
                    name: DEFAULT_TEMPLATE_NAME.to_string(),
                    path,
                    content,
                });
            }
        }

        log::info!("Discovered {} PR template(s)", templates.len());
        templates
    }

    fn scaffold_default(&self, repo_path: &Path) -> Result<PathBuf> {
        let path = repo_path.join(SCAFFOLD_TEMPLATE_PATH);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, SCAFFOLD_TEMPLATE_CONTENT)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote default template to {}", path.display());
        Ok(path)
    }
}
