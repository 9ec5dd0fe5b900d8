use crate::app::AppState;
use crate::domain::{Tab, UiMode, ViewMode};
use crate::ui::styles::Palette;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Key hints for the current tab, view and form
pub fn hints(app: &AppState) -> &'static [&'static str] {
    match app.ui_mode {
        UiMode::EditingTask => &["type title", "Tab done", "Ctrl+D delete", "Enter save", "Esc cancel"],
        UiMode::AddingInterval => &["Tab next field", "Enter add", "Esc cancel"],
        UiMode::GoToDate => &["YYYY-MM-DD", "Enter go", "Esc cancel"],
        UiMode::Normal => match (app.tab, app.snapshot.mode) {
            (Tab::Calendar, ViewMode::Calendar) => &[
                "←/→/↑/↓ date",
                "[/] month",
                "t today",
                "g go to",
                "Enter day view",
                "1/2/3 tabs",
                "q quit",
            ],
            (Tab::Calendar, ViewMode::Day) => &[
                "↑/↓ cursor",
                "←/→ day",
                "Tab focus",
                "a add",
                "i interval",
                "Space done",
                "e edit",
                "x delete",
                "+/- zoom",
                "Esc month",
                "q quit",
            ],
            (Tab::Notes, _) => &["1/2/3 tabs", "q quit"],
            (Tab::Settings, _) => &["↑/↓ select", "Enter toggle", "1/2/3 tabs", "q quit"],
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let text = format!(" {}", hints(app).join("   "));
    let paragraph = Paragraph::new(Line::raw(text)).style(palette.hint_style());
    f.render_widget(paragraph, area);
}
