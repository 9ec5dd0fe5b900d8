use super::layout::{TaskLayout, DEFAULT_SPAN_MINUTES};
use crate::domain::Task;
use chrono::NaiveTime;

/// Smallest zoom, in pixels per minute
pub const MIN_ZOOM: f32 = 0.6;
/// Largest zoom, in pixels per minute
pub const MAX_ZOOM: f32 = 3.5;
/// Zoom on a fresh session
pub const DEFAULT_ZOOM: f32 = 1.2;
/// Number of stops on the zoom control
pub const ZOOM_STOPS: u32 = 8;

/// Shortest height a block is drawn with
pub const MIN_RENDER_MINUTES: i64 = 12;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Distance between two adjacent zoom stops
pub fn zoom_step() -> f32 {
    (MAX_ZOOM - MIN_ZOOM) / (ZOOM_STOPS - 1) as f32
}

/// Vertical extent of a block in minutes: (start, drawn duration).
/// Zero and negative durations are drawn `MIN_RENDER_MINUTES` tall. A point
/// task's span does not wrap at midnight; it runs past the last minute.
pub fn block_span(task: &Task) -> (i64, i64) {
    let start = task.start_minute();
    let end = task.end_minute().unwrap_or(start + DEFAULT_SPAN_MINUTES);
    let duration = (end - start).max(MIN_RENDER_MINUTES);
    (start, duration)
}

/// Pixel placement of a task block inside the day canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Maps minutes and columns to canvas coordinates at one zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    pub pixels_per_minute: f32,
}

impl TimelineScale {
    pub fn new(pixels_per_minute: f32) -> Self {
        Self { pixels_per_minute }
    }

    pub fn offset_of_minute(&self, minute: i64) -> f32 {
        minute as f32 * self.pixels_per_minute
    }

    /// Minute under a vertical offset, clamped into the day
    pub fn minute_at_offset(&self, y: f32) -> i64 {
        if self.pixels_per_minute <= 0.0 || !y.is_finite() {
            return 0;
        }
        ((y / self.pixels_per_minute).round() as i64).clamp(0, MINUTES_PER_DAY - 1)
    }

    /// Minutes covered by one row of `row_pixels` height
    pub fn minutes_per_row(&self, row_pixels: f32) -> f32 {
        if self.pixels_per_minute <= 0.0 {
            return MINUTES_PER_DAY as f32;
        }
        row_pixels / self.pixels_per_minute
    }

    /// Block placement for a laid-out task. Column width is shared across the
    /// whole day: `width / max_columns`.
    pub fn block_rect(&self, layout: &TaskLayout<'_>, canvas_width: f32, max_columns: usize) -> BlockRect {
        let column_width = canvas_width / max_columns.max(1) as f32;
        let (start, duration) = block_span(layout.task);
        BlockRect {
            x: column_width * layout.column as f32,
            y: self.offset_of_minute(start),
            width: column_width,
            height: duration as f32 * self.pixels_per_minute,
        }
    }
}

/// Time of day for a minute index, clamped into the day
pub fn time_of_minute(minute: i64) -> NaiveTime {
    let minute = minute.clamp(0, MINUTES_PER_DAY - 1) as u32;
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Labels for the 25 hour lines, 00:00 through the closing 00:00
pub fn hour_labels() -> Vec<String> {
    (0..=24).map(|hour| format!("{:02}:00", hour % 24)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::layout_tasks;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_zoom_step_spans_range() {
        let total = zoom_step() * (ZOOM_STOPS - 1) as f32;
        assert!((MIN_ZOOM + total - MAX_ZOOM).abs() < 1e-5);
    }

    #[test]
    fn test_block_span_minimum_height() {
        let point = Task::point("Ping", hm(9, 0));
        assert_eq!(block_span(&point), (540, 15));

        let short = Task::interval("Short", hm(9, 0), hm(9, 5));
        assert_eq!(block_span(&short), (540, 12));

        let inverted = Task::interval("Inverted", hm(10, 0), hm(9, 0));
        assert_eq!(block_span(&inverted), (600, 12));

        let long = Task::interval("Long", hm(14, 0), hm(16, 0));
        assert_eq!(block_span(&long), (840, 120));
    }

    #[test]
    fn test_block_span_of_late_point_runs_past_midnight() {
        let late = Task::point("Late", hm(23, 50));
        assert_eq!(block_span(&late), (1430, 15));
    }

    #[test]
    fn test_minute_at_offset_rounds_and_clamps() {
        let scale = TimelineScale::new(2.0);
        assert_eq!(scale.minute_at_offset(0.0), 0);
        assert_eq!(scale.minute_at_offset(121.0), 61);
        assert_eq!(scale.minute_at_offset(-40.0), 0);
        assert_eq!(scale.minute_at_offset(1_000_000.0), 1439);
        assert_eq!(time_of_minute(scale.minute_at_offset(1080.0)), hm(9, 0));
    }

    #[test]
    fn test_minutes_per_row() {
        assert_eq!(TimelineScale::new(1.2).minutes_per_row(18.0).round(), 15.0);
        assert_eq!(TimelineScale::new(0.6).minutes_per_row(18.0).round(), 30.0);
    }

    #[test]
    fn test_block_rect_uses_day_wide_column_width() {
        let tasks = vec![
            Task::interval("A", hm(10, 0), hm(11, 0)),
            Task::interval("B", hm(10, 30), hm(11, 30)),
            Task::point("C", hm(20, 0)),
        ];
        let layouts = layout_tasks(&tasks);
        let scale = TimelineScale::new(1.0);

        let b = scale.block_rect(&layouts[1], 200.0, 2);
        assert_eq!(b, BlockRect { x: 100.0, y: 630.0, width: 100.0, height: 60.0 });

        // C is alone but still gets half the width
        let c = scale.block_rect(&layouts[2], 200.0, 2);
        assert_eq!(c.width, 100.0);
        assert_eq!(c.x, 0.0);
    }

    #[test]
    fn test_hour_labels() {
        let labels = hour_labels();
        assert_eq!(labels.len(), 25);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[13], "13:00");
        assert_eq!(labels[24], "00:00");
    }

    #[test]
    fn test_time_of_minute_clamps() {
        assert_eq!(time_of_minute(-5), hm(0, 0));
        assert_eq!(time_of_minute(5000), hm(23, 59));
    }
}
