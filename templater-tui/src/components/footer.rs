use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use templater_core::{config::KeysConfig, status::ScreenStatus};

/// `(key, description)` pairs for the commands shown on this screen. Commands
/// without a binding are left out.
pub fn hints(status: &ScreenStatus, keys: &KeysConfig) -> Vec<(String, &'static str)> {
    let keymap = keys.keymap_for_status(status);
    status
        .footer_commands()
        .iter()
        .filter_map(|command| {
            KeysConfig::find_key(&keymap, command)
                .map(|key| (key.to_string(), command.description()))
        })
        .collect()
}

pub fn draw(f: &mut Frame, area: Rect, status: &ScreenStatus, keys: &KeysConfig, theme: &Theme) {
    let mut spans = Vec::new();
    for (i, (key, description)) in hints(status, keys).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(theme.muted)));
        }
        spans.push(Span::styled(
            key,
            Style::default().fg(theme.hint).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(": {description}"),
            Style::default().fg(theme.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
