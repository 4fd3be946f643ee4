use ratatui::style::Color;
use templater_core::config::{NamedColor, ThemeColor, ThemeConfig};

const PRODUCTION_BRANCHES: &[&str] = &["main", "master", "production"];
const STABLE_BRANCHES: &[&str] = &["develop", "dev", "staging"];
const FEATURE_PREFIXES: &[&str] = &["feature/", "feat/", "fix/", "bugfix/", "hotfix/"];

pub struct Theme {
    pub accent: Color,
    pub secondary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
    pub title: Color,
    pub hint: Color,
    pub highlight_fg: Color,
    pub branch_production: Color,
    pub branch_stable: Color,
    pub branch_feature: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            accent: to_ratatui_color(&config.accent),
            secondary: to_ratatui_color(&config.secondary),
            success: to_ratatui_color(&config.success),
            error: to_ratatui_color(&config.error),
            warning: to_ratatui_color(&config.warning),
            muted: to_ratatui_color(&config.muted),
            border: to_ratatui_color(&config.border),
            title: to_ratatui_color(&config.title),
            hint: to_ratatui_color(&config.hint),
            highlight_fg: to_ratatui_color(&config.highlight_fg),
            branch_production: to_ratatui_color(&config.branch_production),
            branch_stable: to_ratatui_color(&config.branch_stable),
            branch_feature: to_ratatui_color(&config.branch_feature),
        }
    }

    /// Colour a branch name by its role: release lines, integration lines,
    /// topic branches, anything else.
    pub fn branch_color(&self, branch: &str) -> Color {
        if PRODUCTION_BRANCHES.contains(&branch) {
            self.branch_production
        } else if STABLE_BRANCHES.contains(&branch) {
            self.branch_stable
        } else if FEATURE_PREFIXES.iter().any(|p| branch.starts_with(p)) {
            self.branch_feature
        } else {
            self.accent
        }
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
        },
    }
}
