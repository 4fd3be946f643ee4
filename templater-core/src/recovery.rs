use crate::{constants::GH_INSTALL_URL, context::AppContext};
use anyhow::{Result, bail};
use std::process::Command;

/// A fix offered on a precondition error screen. Runs only after the user
/// confirms it and the terminal has been handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    OpenInstallPage,
    AuthLogin,
    ScaffoldTemplate,
}

impl RecoveryAction {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryAction::OpenInstallPage => "open install page",
            RecoveryAction::AuthLogin => "run auth login",
            RecoveryAction::ScaffoldTemplate => "create template",
        }
    }

    /// Run the action. The caller turns `Ok` into exit code 0 and `Err` into 1.
    pub fn perform(self, ctx: &AppContext) -> Result<String> {
        log::info!("Running recovery action: {}", self.label());
        match self {
            RecoveryAction::OpenInstallPage => {
                if !open_in_browser(GH_INSTALL_URL) {
                    log::warn!("Could not open {GH_INSTALL_URL} in a browser");
                }
                Ok(format!("Install the GitHub CLI from {GH_INSTALL_URL}"))
            }
            RecoveryAction::AuthLogin => {
                if ctx.gh.auth_login() {
                    Ok("Authenticated with GitHub CLI".to_string())
                } else {
                    bail!("gh auth login did not complete")
                }
            }
            RecoveryAction::ScaffoldTemplate => {
                let path = ctx.templates.scaffold_default(&ctx.repo_root)?;
                Ok(format!("Created {}", path.display()))
            }
        }
    }
}

/// Hand a URL to the platform opener. Returns whether the opener reported success.
pub fn open_in_browser(url: &str) -> bool {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    Command::new(opener)
        .arg(url)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gh::mock::MockGhProvider, git::mock::MockGitProvider,
        template::mock::MockTemplateProvider,
    };
    use std::{path::PathBuf, sync::Arc};

    fn context(gh: MockGhProvider, templates: MockTemplateProvider) -> AppContext {
        AppContext {
            repo_root: PathBuf::from("/repo"),
            git: Arc::new(MockGitProvider::default()),
            gh: Arc::new(gh),
            templates: Arc::new(templates),
        }
    }

    #[test]
    fn test_auth_login_success() {
        let gh = MockGhProvider {
            auth_login_result: true,
            ..Default::default()
        };
        let ctx = context(gh, MockTemplateProvider::default());
        assert!(RecoveryAction::AuthLogin.perform(&ctx).is_ok());
    }

    #[test]
    fn test_auth_login_failure() {
        let ctx = context(MockGhProvider::default(), MockTemplateProvider::default());
        assert!(RecoveryAction::AuthLogin.perform(&ctx).is_err());
    }

    #[test]
    fn test_scaffold_reports_path() {
        let ctx = context(MockGhProvider::default(), MockTemplateProvider::default());
        let message = RecoveryAction::ScaffoldTemplate.perform(&ctx).unwrap();
        assert_eq!(message, "Created /repo/.github/PULL_REQUEST_TEMPLATE.md");
    }

    #[test]
    fn test_scaffold_failure_propagates() {
        let templates = MockTemplateProvider::default();
        *templates.scaffold_result.lock().unwrap() = Some(Err(anyhow::anyhow!("read-only")));
        let ctx = context(MockGhProvider::default(), templates);
        let err = RecoveryAction::ScaffoldTemplate.perform(&ctx).unwrap_err();
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(RecoveryAction::OpenInstallPage.label(), "open install page");
        assert_eq!(RecoveryAction::AuthLogin.label(), "run auth login");
        assert_eq!(RecoveryAction::ScaffoldTemplate.label(), "create template");
    }
}
