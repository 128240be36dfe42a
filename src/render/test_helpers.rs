use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Buffer rows as text, right-trimmed, with trailing blank rows dropped
fn buffer_text(buf: &Buffer) -> String {
    let width = buf.area.width as usize;
    let mut rows: Vec<String> = buf
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>().trim_end().to_string())
        .collect();
    while rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }
    rows.join("\n")
}

/// Draw into an in-memory terminal and return the plain text (no styles)
pub fn render_to_string<F>(w: u16, h: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            draw(frame, area);
        })
        .unwrap();
    buffer_text(terminal.backend().buffer())
}
