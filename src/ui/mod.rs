pub mod calendar_pane;
pub mod day_pane;
pub mod forms;
pub mod keybindings;
pub mod layout;
pub mod notes_pane;
pub mod settings_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Tab, UiMode, ViewMode};
use calendar_pane::render_calendar_pane;
use day_pane::render_day_pane;
use forms::{render_date_prompt, render_edit_form, render_interval_form};
use keybindings::render_keybindings;
use layout::create_layout;
use notes_pane::render_notes_pane;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
    Frame,
};
use settings_pane::render_settings_pane;
use styles::Palette;

/// Main render function - draws the entire UI from the latest snapshot
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let palette = Palette::new(app.settings.dark_theme, app.settings.dynamic_color);
    let layout = create_layout(size);

    f.render_widget(Block::default().style(palette.default_style()), size);

    render_keybindings(f, app, &palette, layout.keybindings_area);
    render_tabs(f, app, &palette, layout.tabs_area);

    match app.tab {
        Tab::Calendar => match app.snapshot.mode {
            ViewMode::Calendar => render_calendar_pane(f, app, &palette, layout.content_area),
            ViewMode::Day => render_day_pane(f, app, &palette, layout.content_area),
        },
        Tab::Notes => render_notes_pane(f, &palette, layout.content_area),
        Tab::Settings => render_settings_pane(f, app, &palette, layout.content_area),
    }

    render_status(f, app, &palette, layout.status_area);

    match app.ui_mode {
        UiMode::Normal => {}
        UiMode::EditingTask => render_edit_form(f, app, &palette, size),
        UiMode::AddingInterval => render_interval_form(f, app, &palette, size),
        UiMode::GoToDate => render_date_prompt(f, app, &palette, size),
    }
}

fn render_tabs(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::raw(format!("{} {}", i + 1, tab.label())))
        .collect();
    let selected = Tab::all().iter().position(|t| *t == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(palette.hint_style())
        .highlight_style(palette.title_style());
    f.render_widget(tabs, area);
}

fn render_status(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let snapshot = &app.snapshot;
    let mut spans = vec![Span::styled(
        format!(
            " {} · {} · {} tasks",
            snapshot.selected_date.format("%Y-%m-%d"),
            snapshot.mode.name(),
            snapshot.tasks_for_selected_date.len()
        ),
        palette.hint_style(),
    )];
    if let Some(message) = &app.status_message {
        let style = if message.starts_with("Error") {
            palette.error_style()
        } else {
            palette.title_style()
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(message.as_str(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
