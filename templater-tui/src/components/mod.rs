use ratatui::layout::Rect;

pub mod branch_list;
pub mod dialog;
pub mod editor;
pub mod footer;
pub mod logo;
pub mod sidebar;
pub mod status_panel;
pub mod template_list;

/// Center a rect of an exact size, shrinking it to fit `r`.
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Dialogs take most of a narrow terminal but stop growing on wide ones.
pub fn dialog_width(terminal_width: u16) -> u16 {
    (terminal_width.saturating_mul(7) / 10).clamp(terminal_width.min(40), 80)
}

#[cfg(test)]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        output.push('\n');
    }
    output
}
