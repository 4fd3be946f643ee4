use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use templater_core::state::Session;

pub fn draw(f: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let current = session.current_branch.as_deref();
    let items: Vec<ListItem> = session
        .branches
        .iter()
        .map(|branch| {
            let mut spans = vec![Span::styled(
                branch.as_str(),
                Style::default().fg(theme.branch_color(branch)),
            )];
            if current == Some(branch.as_str()) {
                spans.push(Span::styled(
                    " (current)",
                    Style::default().fg(theme.muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(
        " Target branch for {} ({}) ",
        current.unwrap_or("current branch"),
        session.branches.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.accent)),
        )
        .highlight_style(
            Style::default()
                .bg(theme.accent)
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select((!session.branches.is_empty()).then_some(session.branch_focus));
    f.render_stateful_widget(list, area, &mut list_state);
}
