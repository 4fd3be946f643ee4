use super::{centered_fixed_rect, dialog_width};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// A bordered, centered popup sized to its wrapped content.
pub struct Dialog<'a> {
    lines: Vec<Line<'a>>,
    border_color: Color,
    title: Option<Line<'a>>,
    padding: Padding,
    alignment: Alignment,
}

impl<'a> Dialog<'a> {
    #[must_use]
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self {
            lines,
            border_color: Color::White,
            title: None,
            padding: Padding::horizontal(1),
            alignment: Alignment::Left,
        }
    }

    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<Line<'a>>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// `(width, height)` of the popup on a terminal `terminal_width` columns wide.
    pub fn size(&self, terminal_width: u16) -> (u16, u16) {
        let width = dialog_width(terminal_width);
        let h_chrome = 2 + self.padding.left + self.padding.right;
        let v_chrome = 2 + self.padding.top + self.padding.bottom;
        let text_width = width.saturating_sub(h_chrome).max(1);

        let content: u16 = self
            .lines
            .iter()
            .map(|line| wrapped_height(line, text_width))
            .sum();

        (width, content.saturating_add(v_chrome))
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (width, height) = self.size(area.width);
        let popup = centered_fixed_rect(width, height, area);
        f.render_widget(Clear, popup);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .padding(self.padding);
        if let Some(title) = &self.title {
            block = block.title(title.clone());
        }

        let paragraph = Paragraph::new(self.lines.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(self.alignment);
        f.render_widget(paragraph, popup);
    }
}

/// Rows a line occupies when word-wrapped to `max_width` display columns.
/// Words wider than a row are split across as many rows as they need.
pub fn wrapped_height(line: &Line, max_width: u16) -> u16 {
    let max = usize::from(max_width.max(1));
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

    let mut rows: usize = 1;
    let mut col: usize = 0;
    for word in text.split(' ') {
        let w = word.width();
        let needed = if col == 0 { w } else { w + 1 };
        if col + needed <= max {
            col += needed;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        col = w;
        while col > max {
            rows += 1;
            col -= max;
        }
    }

    u16::try_from(rows).unwrap_or(u16::MAX)
}
