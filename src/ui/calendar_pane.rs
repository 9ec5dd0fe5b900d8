use crate::app::AppState;
use crate::domain::{done_badge, time_range_text, weekday_header, MonthGrid, Task};
use crate::ui::layout::split_calendar;
use crate::ui::styles::Palette;
use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Width of one day cell, including padding
const CELL_WIDTH: usize = 5;

/// Render the month grid and, below it, the selected date's tasks
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let snapshot = &app.snapshot;
    let week_start = app.settings.week_start.weekday();
    let grid = MonthGrid::build(snapshot.display_month, week_start);

    let (grid_area, list_area) = split_calendar(area, grid.rows as u16);

    let mut lines = vec![header_line(week_start, palette)];
    for row in 0..grid.rows {
        let spans = grid
            .week(row)
            .iter()
            .flat_map(|cell| match cell {
                Some(date) => {
                    let style = if *date == snapshot.selected_date {
                        palette.selected_style()
                    } else if *date == app.today {
                        palette.today_style()
                    } else {
                        palette.default_style()
                    };
                    day_cell_spans(*date, snapshot.has_tasks_on(*date), style, palette).to_vec()
                }
                None => vec![Span::raw(" ".repeat(CELL_WIDTH))],
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    let title = format!(" {} ", snapshot.display_month.title());
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(title, palette.title_style())),
    );
    f.render_widget(paragraph, grid_area);

    render_day_list(f, app, palette, list_area);
}

fn render_day_list(f: &mut Frame, app: &AppState, palette: &Palette, area: Rect) {
    let snapshot = &app.snapshot;
    let items: Vec<ListItem> = if snapshot.tasks_for_selected_date.is_empty() {
        vec![ListItem::new(Line::styled("  No tasks", palette.hint_style()))]
    } else {
        snapshot
            .tasks_for_selected_date
            .iter()
            .map(|task| ListItem::new(task_line(task, palette)))
            .collect()
    };

    let title = format!(" {} ", snapshot.selected_date.format("%A, %-d %B %Y"));
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(title, palette.title_style())),
    );
    f.render_widget(list, area);
}

/// One agenda row: badge, time range, title
pub fn task_line<'a>(task: &'a Task, palette: &Palette) -> Line<'a> {
    let title_style = if task.is_done {
        palette.done_style()
    } else {
        palette.default_style()
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(done_badge(task), palette.badge_style(task.is_done)),
        Span::raw(" "),
        Span::styled(format!("{:<13}", time_range_text(task)), palette.hint_style()),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
    ])
}

fn header_line(week_start: Weekday, palette: &Palette) -> Line<'static> {
    let spans = weekday_header(week_start)
        .iter()
        .map(|day| Span::styled(weekday_cell_text(*day), palette.hint_style()))
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Two-letter weekday name padded to a cell
pub fn weekday_cell_text(day: Weekday) -> String {
    let name: String = day.to_string().chars().take(2).collect();
    format!(" {:>2}  ", name)
}

/// Day number padded to a cell, with a dot when the day has tasks.
/// The dot keeps the cell's background.
pub fn day_cell_spans(date: NaiveDate, has_tasks: bool, style: Style, palette: &Palette) -> [Span<'static>; 3] {
    let marker = if has_tasks { "•" } else { " " };
    [
        Span::styled(format!(" {:>2}", date.day()), style),
        Span::styled(marker, style.patch(palette.marker_style())),
        Span::styled(" ", style),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_text(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_day_cell_spans() {
        let palette = Palette::new(true, true);
        let date = NaiveDate::from_ymd_opt(2026, 10, 4).unwrap();
        let empty = day_cell_spans(date, false, palette.default_style(), &palette);
        assert_eq!(cell_text(&empty), "  4  ");

        let busy = day_cell_spans(date, true, palette.default_style(), &palette);
        assert_eq!(cell_text(&busy), "  4• ");
        assert_eq!(cell_text(&busy).chars().count(), CELL_WIDTH);
    }

    #[test]
    fn test_marker_keeps_selected_background() {
        let palette = Palette::new(true, true);
        let date = NaiveDate::from_ymd_opt(2026, 10, 4).unwrap();
        let selected = palette.selected_style();
        let spans = day_cell_spans(date, true, selected, &palette);

        assert_eq!(spans[0].style, selected);
        assert_eq!(spans[1].style.fg, palette.marker_style().fg);
        assert_eq!(spans[1].style.bg, selected.bg);
    }

    #[test]
    fn test_weekday_cell_text() {
        assert_eq!(weekday_cell_text(Weekday::Mon), " Mo  ");
        assert_eq!(weekday_cell_text(Weekday::Sun).chars().count(), CELL_WIDTH);
    }

    #[test]
    fn test_task_line_contains_range() {
        let palette = Palette::new(true, true);
        let start = chrono::NaiveTime::from_hms_opt(11, 30, 0).unwrap();
        let end = chrono::NaiveTime::from_hms_opt(12, 15, 0).unwrap();
        let task = Task::interval("Product sync", start, end);
        let line = task_line(&task, &palette);

        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("11:30 – 12:15"));
        assert!(text.contains("Product sync"));
    }
}
