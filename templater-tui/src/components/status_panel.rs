use super::dialog::Dialog;
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Padding,
};
use std::time::Duration;
use templater_core::{
    config::{Command, KeysConfig},
    recovery::RecoveryAction,
    status::ScreenStatus,
};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL_MS: u128 = 80;

pub fn spinner_frame(elapsed: Duration) -> &'static str {
    let idx = (elapsed.as_millis() / SPINNER_INTERVAL_MS) % SPINNER_FRAMES.len() as u128;
    SPINNER_FRAMES[usize::try_from(idx).unwrap_or(0)]
}

fn bold(text: impl Into<String>, theme_color: ratatui::style::Color) -> Line<'static> {
    Line::styled(
        text.into(),
        Style::default()
            .fg(theme_color)
            .add_modifier(Modifier::BOLD),
    )
}

fn manual_link(url: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("Create a PR manually: "),
        Span::styled(url.to_string(), Style::default().fg(theme.secondary)),
    ])
}

/// Prompt naming the keys that accept or decline the recovery action.
fn recovery_prompt(
    action: RecoveryAction,
    status: &ScreenStatus,
    keys: &KeysConfig,
    theme: &Theme,
) -> Line<'static> {
    let keymap = keys.keymap_for_status(status);
    let key = |command: Command| {
        KeysConfig::find_key(&keymap, &command).map_or_else(|| "?".to_string(), |k| k.to_string())
    };
    let hint = Style::default().fg(theme.hint).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(key(Command::Confirm), hint),
        Span::raw(format!(": {}   ", action.label())),
        Span::styled(key(Command::Decline), hint),
        Span::raw(": exit"),
    ])
}

/// Precondition failure screen. Does nothing for any other status.
pub fn draw_error(f: &mut Frame, area: Rect, status: &ScreenStatus, keys: &KeysConfig, theme: &Theme) {
    let ScreenStatus::Error {
        reason,
        compare_url,
        recovery,
    } = status
    else {
        return;
    };

    let mut lines = vec![
        Line::raw(reason.message()),
        Line::raw(""),
        Line::styled(reason.help(), Style::default().fg(theme.muted)),
    ];
    if let Some(action) = recovery {
        lines.push(Line::raw(""));
        lines.push(recovery_prompt(*action, status, keys, theme));
    }
    if let Some(url) = compare_url {
        lines.push(Line::raw(""));
        lines.push(manual_link(url, theme));
    }

    Dialog::new(lines)
        .title(bold(format!(" {} ", reason.title()), theme.error))
        .border_color(theme.error)
        .render(f, area);
}

pub fn draw_failed(f: &mut Frame, area: Rect, error: &str, compare_url: Option<&str>, theme: &Theme) {
    // gh reports on several lines; keep them apart
    let mut lines: Vec<Line> = error
        .lines()
        .map(|line| Line::styled(line.to_string(), Style::default().fg(theme.error)))
        .collect();
    if let Some(url) = compare_url {
        lines.push(Line::raw(""));
        lines.push(Line::raw("You can create the PR manually:"));
        lines.push(Line::styled(
            url.to_string(),
            Style::default().fg(theme.secondary),
        ));
    }

    Dialog::new(lines)
        .title(bold(" Failed to Create Pull Request ", theme.error))
        .border_color(theme.error)
        .render(f, area);
}

pub fn draw_success(f: &mut Frame, area: Rect, url: &str, theme: &Theme) {
    let lines = vec![
        Line::raw("Your pull request has been created successfully."),
        Line::raw(""),
        Line::styled(
            url.to_string(),
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Line::raw(""),
        Line::styled("Auto-exiting in a few seconds...", Style::default().fg(theme.muted)),
    ];

    Dialog::new(lines)
        .title(bold(" Pull Request Created ", theme.success))
        .border_color(theme.success)
        .padding(Padding::new(2, 2, 1, 1))
        .alignment(Alignment::Center)
        .render(f, area);
}

pub fn draw_creating(
    f: &mut Frame,
    area: Rect,
    target_branch: &str,
    title: &str,
    elapsed: Duration,
    theme: &Theme,
) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                spinner_frame(elapsed),
                Style::default().fg(theme.accent),
            ),
            Span::raw(" Creating pull request..."),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Into: ", Style::default().fg(theme.muted)),
            Span::styled(
                target_branch.to_string(),
                Style::default().fg(theme.branch_color(target_branch)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Title: ", Style::default().fg(theme.muted)),
            Span::raw(title.to_string()),
        ]),
    ];

    Dialog::new(lines)
        .title(bold(" Creating ", theme.accent))
        .border_color(theme.accent)
        .render(f, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_string;
    use templater_core::state::ErrorReason;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(Duration::ZERO), SPINNER_FRAMES[0]);
        assert_eq!(spinner_frame(Duration::from_millis(85)), SPINNER_FRAMES[1]);
        assert_eq!(spinner_frame(Duration::from_millis(800)), SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_error_with_recovery_prompt() {
        let keys = KeysConfig::default();
        let theme = Theme::default();
        let output = render_to_string(100, 20, |f| {
            let status = ScreenStatus::Error {
                reason: ErrorReason::GhNotInstalled,
                compare_url: Some("https://github.com/o/r/compare".into()),
                recovery: ErrorReason::GhNotInstalled.recovery(),
            };
            draw_error(f, f.area(), &status, &keys, &theme);
        });

        assert!(output.contains("GitHub CLI Not Installed"));
        assert!(output.contains("Would you like to open the installation page?"));
        assert!(output.contains("y: open install page"));
        assert!(output.contains("n: exit"));
        assert!(output.contains("Create a PR manually: https://github.com/o/r/compare"));
    }

    #[test]
    fn test_error_without_recovery() {
        let keys = KeysConfig::default();
        let theme = Theme::default();
        let output = render_to_string(100, 20, |f| {
            let status = ScreenStatus::Error {
                reason: ErrorReason::NotGitRepo,
                compare_url: None,
                recovery: None,
            };
            draw_error(f, f.area(), &status, &keys, &theme);
        });

        assert!(output.contains("Not a Git Repository"));
        assert!(!output.contains("exit"));
        assert!(!output.contains("manually"));
    }

    #[test]
    fn test_failed_shows_error_and_fallback() {
        let theme = Theme::default();
        let output = render_to_string(100, 20, |f| {
            draw_failed(
                f,
                f.area(),
                "a pull request already exists",
                Some("https://github.com/o/r/compare"),
                &theme,
            );
        });

        assert!(output.contains("Failed to Create Pull Request"));
        assert!(output.contains("a pull request already exists"));
        assert!(output.contains("You can create the PR manually:"));
        assert!(output.contains("https://github.com/o/r/compare"));
    }

    #[test]
    fn test_failed_keeps_multiline_errors_apart() {
        let theme = Theme::default();
        let output = render_to_string(100, 20, |f| {
            draw_failed(
                f,
                f.area(),
                "a pull request for branch \"feat/x\" already exists:\nhttps://github.com/o/r/pull/7",
                None,
                &theme,
            );
        });

        let error_row = output
            .lines()
            .find(|row| row.contains("already exists:"))
            .unwrap();
        assert!(!error_row.contains("https://"), "row was: {error_row}");
        assert!(
            output
                .lines()
                .any(|row| row.contains("│ https://github.com/o/r/pull/7"))
        );
    }

    #[test]
    fn test_success_shows_url() {
        let theme = Theme::default();
        let output = render_to_string(100, 20, |f| {
            draw_success(f, f.area(), "https://github.com/o/r/pull/7", &theme);
        });

        assert!(output.contains("Pull Request Created"));
        assert!(output.contains("https://github.com/o/r/pull/7"));
        assert!(output.contains("Auto-exiting in a few seconds..."));

        // Vertical padding leaves an empty row under the title border
        let rows: Vec<&str> = output.lines().collect();
        let title_row = rows
            .iter()
            .position(|row| row.contains("Pull Request Created"))
            .unwrap();
        let below = rows[title_row + 1].replace(['│', ' '], "");
        assert!(below.is_empty(), "row was: {}", rows[title_row + 1]);
    }

    #[test]
    fn test_creating_shows_target() {
        let theme = Theme::default();
        let output = render_to_string(100, 20, |f| {
            draw_creating(f, f.area(), "develop", "Add login", Duration::ZERO, &theme);
        });

        assert!(output.contains("Creating pull request..."));
        assert!(output.contains("Into: develop"));
        assert!(output.contains("Title: Add login"));
    }
}
