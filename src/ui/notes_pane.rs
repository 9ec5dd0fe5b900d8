use crate::ui::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_notes_pane(f: &mut Frame, palette: &Palette, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::styled("Notes are in development", palette.hint_style()),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(" Notes ", palette.title_style())),
    );
    f.render_widget(paragraph, area);
}
