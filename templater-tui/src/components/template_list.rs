use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use std::path::Path;
use templater_core::state::Session;

pub fn draw(f: &mut Frame, area: Rect, session: &Session, repo_root: &Path, theme: &Theme) {
    let items: Vec<ListItem> = session
        .templates
        .iter()
        .map(|template| {
            ListItem::new(Line::from(vec![
                Span::raw(template.name.as_str()),
                Span::styled(
                    format!("  {}", template.display_path(repo_root)),
                    Style::default().fg(theme.muted),
                ),
            ]))
        })
        .collect();

    let title = match session.selected_branch() {
        Some(branch) => format!(" Template for PR into {branch} "),
        None => " Template ".to_string(),
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.secondary)),
        )
        .highlight_style(
            Style::default()
                .bg(theme.secondary)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select((!session.templates.is_empty()).then_some(session.template_focus));
    f.render_stateful_widget(list, area, &mut list_state);
}
