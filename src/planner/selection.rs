use crate::domain::{ViewMode, YearMonth};
use crate::timeline::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use chrono::NaiveDate;
use tracing::debug;

/// What the user is looking at. Setters return true when the value changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    selected_date: NaiveDate,
    display_month: YearMonth,
    mode: ViewMode,
    zoom: f32,
}

impl Selection {
    /// Calendar mode on `today`, default zoom
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            display_month: YearMonth::from_date(today),
            mode: ViewMode::Calendar,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn display_month(&self) -> YearMonth {
        self.display_month
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Pixels per minute on the day timeline
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.selected_date == date {
            return false;
        }
        debug!(%date, "selecting date");
        self.selected_date = date;
        true
    }

    pub fn shift_month(&mut self, delta: i64) -> bool {
        let next = self.display_month.plus_months(delta);
        if next == self.display_month {
            return false;
        }
        debug!(delta, month = %next.title(), "shifting displayed month");
        self.display_month = next;
        true
    }

    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        debug!(mode = mode.name(), "switching view mode");
        self.mode = mode;
        true
    }

    /// Clamp into `[MIN_ZOOM, MAX_ZOOM]`; NaN leaves the zoom unchanged
    pub fn set_zoom(&mut self, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let clamped = value.clamp(MIN_ZOOM, MAX_ZOOM);
        if clamped == self.zoom {
            return false;
        }
        debug!(requested = value, zoom = clamped, "setting zoom");
        self.zoom = clamped;
        true
    }
}
