use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

const LOGO: [&str; 4] = [
    "▗▄▄▄▖▗▄▄▄▖▗▖  ▗▖▗▄▄▖ ▗▖    ▗▄▖▗▄▄▄▖▗▄▄▄▖▗▄▄▖ ",
    "  █  ▐▌   ▐▛▚▞▜▌▐▌ ▐▌▐▌   ▐▌ ▐▌ █  ▐▌   ▐▌ ▐▌",
    "  █  ▐▛▀▀▘▐▌  ▐▌▐▛▀▘ ▐▌   ▐▛▀▜▌ █  ▐▛▀▀▘▐▛▀▚▖",
    "  █  ▐▙▄▄▖▐▌  ▐▌▐▌   ▐▙▄▄▖▐▌ ▐▌ █  ▐▙▄▄▖▐▌ ▐▌",
];

/// Rows the banner needs, including a blank line below it.
pub const HEIGHT: u16 = 5;

pub fn draw(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = LOGO
        .iter()
        .map(|row| {
            Line::styled(
                *row,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
