use crate::app::AppState;
use crate::domain::{done_badge, format_time, truncate_string};
use crate::timeline::{
    block_span, hour_labels, layout_tasks, max_columns, time_of_minute, TaskLayout, TimelineScale,
    MINUTES_PER_DAY,
};
use crate::ui::styles::Palette;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Cursor marker, time label and separator
const GUTTER_WIDTH: u16 = 8;

/// A block's slice of one timeline row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSegment {
    /// Index into the day's task list
    pub task_index: usize,
    pub x: u16,
    pub width: u16,
    /// First row of the block, where the title goes
    pub is_head: bool,
}

/// Number of rows the whole day takes
pub fn row_count(row_minutes: i64) -> usize {
    let row_minutes = row_minutes.max(1);
    ((MINUTES_PER_DAY + row_minutes - 1) / row_minutes) as usize
}

/// Cut the laid-out blocks into terminal rows. Vertical extent comes from
/// the block's drawn span, horizontal extent from the shared column width.
/// Where two blocks land on the same cells the later one is kept.
pub fn timeline_rows(
    layouts: &[TaskLayout<'_>],
    scale: &TimelineScale,
    row_minutes: i64,
    canvas_width: u16,
) -> Vec<Vec<RowSegment>> {
    let row_minutes = row_minutes.max(1);
    let total = row_count(row_minutes);
    let mut rows: Vec<Vec<RowSegment>> = vec![Vec::new(); total];
    let columns = max_columns(layouts);

    for (index, layout) in layouts.iter().enumerate() {
        let rect = scale.block_rect(layout, canvas_width as f32, columns);
        let x = (rect.x.floor() as u16).min(canvas_width);
        let right = ((rect.x + rect.width).floor() as u16).min(canvas_width);
        let width = right.saturating_sub(x).max(u16::from(x < canvas_width));
        if width == 0 {
            continue;
        }

        let (start, duration) = block_span(layout.task);
        let top = (start / row_minutes) as usize;
        let bottom = ((start + duration + row_minutes - 1) / row_minutes) as usize;
        let bottom = bottom.max(top + 1).min(total);

        for (row, segments) in rows.iter_mut().enumerate().take(bottom).skip(top) {
            segments.retain(|s| s.x + s.width <= x || s.x >= x + width);
            segments.push(RowSegment {
                task_index: index,
                x,
                width,
                is_head: row == top,
            });
        }
    }

    for segments in &mut rows {
        segments.sort_by_key(|s| s.x);
    }
    rows
}

/// Hour that starts inside the row, if any
pub fn hour_in_row(row: usize, row_minutes: i64) -> Option<i64> {
    let first = row as i64 * row_minutes;
    let hour_minute = (first + 59) / 60 * 60;
    (hour_minute < first + row_minutes && hour_minute < MINUTES_PER_DAY).then_some(hour_minute / 60)
}

/// Keep the cursor row on screen with the least scrolling
pub fn scroll_to_cursor(scroll: usize, cursor_row: usize, visible: usize, total: usize) -> usize {
    if visible == 0 {
        return cursor_row;
    }
    let scroll = if cursor_row < scroll {
        cursor_row
    } else if cursor_row >= scroll + visible {
        cursor_row + 1 - visible
    } else {
        scroll
    };
    scroll.min(total.saturating_sub(visible))
}

fn fit(text: &str, width: usize) -> String {
    let text = truncate_string(text, width);
    let pad = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(pad))
}

/// Render the selected date's timeline
pub fn render_day_pane(f: &mut Frame, app: &mut AppState, palette: &Palette, area: Rect) {
    let snapshot = app.snapshot.clone();
    let tasks = &snapshot.tasks_for_selected_date;
    let scale = app.scale();
    let row_minutes = app.row_minutes();

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;
    let canvas_width = inner_width.saturating_sub(GUTTER_WIDTH);

    let labels = hour_labels();
    let layouts = layout_tasks(tasks);
    let rows = timeline_rows(&layouts, &scale, row_minutes, canvas_width);
    let cursor_row = app.cursor_row().min(rows.len().saturating_sub(1));
    app.timeline_scroll = scroll_to_cursor(app.timeline_scroll, cursor_row, inner_height, rows.len());

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(app.timeline_scroll)
        .take(inner_height)
        .map(|(row, segments)| {
            let is_cursor = row == cursor_row;
            let mut spans = Vec::with_capacity(segments.len() * 2 + 2);

            if is_cursor {
                let label = format_time(time_of_minute(app.cursor_minute));
                spans.push(Span::styled(format!("▶{label} "), palette.cursor_style()));
            } else if let Some(hour) = hour_in_row(row, row_minutes) {
                spans.push(Span::styled(format!(" {} ", labels[hour as usize]), palette.hour_label_style()));
            } else {
                spans.push(Span::raw("       "));
            }
            spans.push(Span::styled("│", palette.border_style()));

            let gap_char = if is_cursor { "─" } else { " " };
            let gap_style = if is_cursor {
                palette.cursor_style()
            } else {
                palette.default_style()
            };

            let mut pos = 0u16;
            for segment in segments {
                if segment.x > pos {
                    spans.push(Span::styled(gap_char.repeat((segment.x - pos) as usize), gap_style));
                }
                let task = &tasks[segment.task_index];
                let text = if segment.is_head {
                    format!("{} {}", done_badge(task), task.title)
                } else {
                    String::new()
                };
                let focused = app.focused_task == Some(task.id);
                spans.push(Span::styled(
                    fit(&text, segment.width as usize),
                    palette.block_style(&task.id, task.is_done, focused),
                ));
                pos = segment.x + segment.width;
            }
            if pos < canvas_width {
                spans.push(Span::styled(gap_char.repeat((canvas_width - pos) as usize), gap_style));
            }

            Line::from(spans)
        })
        .collect();

    let title = format!(
        " {} · zoom {:.2} · {} min/row ",
        snapshot.selected_date.format("%a %-d %b %Y"),
        snapshot.pixels_per_minute,
        row_minutes,
    );
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(title, palette.title_style())),
    );
    f.render_widget(paragraph, area);
}
