use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use templater_core::{editor::EditBuffer, template::Template};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Smallest offset that keeps `pos` inside a window of `size` cells.
fn scroll_offset(pos: usize, size: usize) -> usize {
    if size == 0 {
        return pos;
    }
    pos.saturating_sub(size - 1)
}

/// Display width of the first `col` graphemes of `line`.
fn cursor_x(line: &str, col: usize) -> usize {
    line.graphemes(true).take(col).map(UnicodeWidthStr::width).sum()
}

pub fn draw(f: &mut Frame, area: Rect, buffer: &EditBuffer, template: &Template, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Editing: {} ", template.name))
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);

    let (row, col) = buffer.cursor();
    let x = cursor_x(&buffer.lines()[row], col);
    let row_offset = scroll_offset(row, inner.height.into());
    let col_offset = scroll_offset(x, inner.width.into());

    let lines: Vec<Line> = buffer.lines().iter().map(|l| Line::raw(l.as_str())).collect();
    let scroll = (
        u16::try_from(row_offset).unwrap_or(u16::MAX),
        u16::try_from(col_offset).unwrap_or(u16::MAX),
    );
    f.render_widget(Paragraph::new(lines).block(block).scroll(scroll), area);

    if inner.width > 0 && inner.height > 0 {
        let dx = u16::try_from(x - col_offset).unwrap_or(inner.width - 1);
        let dy = u16::try_from(row - row_offset).unwrap_or(inner.height - 1);
        f.set_cursor_position(Position::new(inner.x + dx, inner.y + dy));
    }
}
