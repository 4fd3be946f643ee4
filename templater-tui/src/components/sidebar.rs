use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};
use templater_core::state::Session;

pub const WIDTH: u16 = 34;

fn heading<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::styled(
        text,
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    )
}

fn greeting(session: &Session) -> String {
    match &session.username {
        Some(user) => format!("Welcome back, {user}!"),
        None => "Welcome!".to_string(),
    }
}

fn branch_line<'a>(session: &'a Session, theme: &Theme) -> Line<'a> {
    let current = session.current_branch.as_deref().unwrap_or("(detached)");
    let target = match session.selected_branch() {
        Some(target) => Span::styled(target, Style::default().fg(theme.branch_color(target))),
        None => Span::styled("[selecting]", Style::default().fg(theme.warning)),
    };
    Line::from(vec![
        Span::styled(current, Style::default().fg(theme.branch_color(current))),
        Span::styled(" → ", Style::default().fg(theme.muted)),
        target,
    ])
}

fn activity_lines<'a>(session: &'a Session, theme: &Theme) -> Vec<Line<'a>> {
    let Some(last) = session.recent_prs.first() else {
        return vec![Line::styled(
            "No recent PRs",
            Style::default().fg(theme.muted),
        )];
    };
    vec![
        Line::raw(format!("{} PR(s) recently", session.recent_prs.len())),
        Line::from(vec![
            Span::styled("Last: ", Style::default().fg(theme.muted)),
            Span::styled(
                last.head_branch.as_str(),
                Style::default().fg(theme.branch_color(&last.head_branch)),
            ),
            Span::styled(" → ", Style::default().fg(theme.muted)),
            Span::styled(
                last.base_branch.as_str(),
                Style::default().fg(theme.branch_color(&last.base_branch)),
            ),
        ]),
    ]
}

pub fn draw(f: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let mut lines = vec![
        Line::styled(
            greeting(session),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        heading("Branches", theme),
        branch_line(session, theme),
    ];

    if let Some(template) = session.selected_template() {
        lines.push(Line::raw(""));
        lines.push(heading("Template", theme));
        lines.push(Line::raw(template.name.as_str()));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Recent activity", theme));
    lines.extend(activity_lines(session, theme));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .padding(Padding::horizontal(1));
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}
