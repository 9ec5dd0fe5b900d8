use crate::app::AppState;
use crate::config::Settings;
use crate::ui::styles::Palette;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// (label, value) for each row, in `SETTINGS_ROWS` order
pub fn settings_rows(settings: &Settings, current_zoom: f32) -> Vec<(&'static str, String)> {
    vec![
        ("Dark theme", on_off(settings.dark_theme).to_string()),
        ("Dynamic colours", on_off(settings.dynamic_color).to_string()),
        ("Week starts on", settings.week_start.name().to_string()),
        (
            "Default zoom",
            format!("{:.2} (Enter stores current {:.2})", settings.default_zoom, current_zoom),
        ),
    ]
}

pub fn render_settings_pane(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let items: Vec<ListItem> = settings_rows(&app.settings, app.snapshot.pixels_per_minute)
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let style = if index == app.settings_index {
                palette.selected_style()
            } else {
                palette.default_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<18}", label), style),
                Span::styled(value, style),
            ]))
        })
        .collect();

    let title = match &app.settings_path {
        Some(path) => format!(" Settings · {} ", path.display()),
        None => " Settings ".to_string(),
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(title, palette.title_style())),
    );
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SETTINGS_ROWS;

    #[test]
    fn test_settings_rows() {
        let rows = settings_rows(&Settings::default(), 1.6);
        assert_eq!(rows.len(), SETTINGS_ROWS);
        assert_eq!(rows[0].1, "on");
        assert_eq!(rows[2].1, "Monday");
        assert!(rows[3].1.starts_with("1.20"));
    }
}
