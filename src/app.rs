use crate::config::{save_settings, Settings};
use crate::domain::{
    format_time, parse_date, parse_time, Tab, Task, UiMode, ViewMode, YearMonth,
};
use crate::error::InputError;
use crate::planner::{Planner, Subscription, UiSnapshot};
use crate::timeline::{time_of_minute, zoom_step, TimelineScale, MINUTES_PER_DAY};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::debug;
use uuid::Uuid;

/// How long the event loop waits for a key before re-checking the snapshot
pub const POLL_INTERVAL: StdDuration = StdDuration::from_millis(250);

/// Height of one terminal row in timeline pixels
pub const ROW_PIXELS: f32 = 18.0;

/// Length of a new interval proposed by the form, in minutes
const DEFAULT_INTERVAL_MINUTES: i64 = 60;

/// Rows on the settings tab, in display order
pub const SETTINGS_ROWS: usize = 4;

/// Edit sheet for an existing task
#[derive(Debug, Clone)]
pub struct EditForm {
    pub task_id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub done: bool,
    pub original_done: bool,
}

/// Fields of the interval form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalField {
    Start,
    End,
    Title,
}

impl IntervalField {
    fn next(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Title,
            Self::Title => Self::Start,
        }
    }
}

/// Form for a new interval task on the selected date
#[derive(Debug, Clone)]
pub struct IntervalForm {
    pub start: String,
    pub end: String,
    pub title: String,
    pub field: IntervalField,
    pub error: Option<InputError>,
}

impl IntervalForm {
    pub fn active_text(&mut self) -> &mut String {
        match self.field {
            IntervalField::Start => &mut self.start,
            IntervalField::End => &mut self.end,
            IntervalField::Title => &mut self.title,
        }
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }
}

/// Go-to-date prompt
#[derive(Debug, Clone)]
pub struct DatePrompt {
    pub text: String,
    pub error: Option<InputError>,
}

/// Main application state
pub struct AppState {
    pub planner: Planner,
    pub subscription: Subscription,
    /// Latest snapshot received from the planner; everything renders from this
    pub snapshot: Arc<UiSnapshot>,
    pub today: NaiveDate,
    pub tab: Tab,
    pub ui_mode: UiMode,
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub settings_index: usize,
    /// Cursor position in the day view, minute of day
    pub cursor_minute: i64,
    pub focused_task: Option<Uuid>,
    /// First visible timeline row
    pub timeline_scroll: usize,
    pub edit_form: Option<EditForm>,
    pub interval_form: Option<IntervalForm>,
    pub date_prompt: Option<DatePrompt>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        planner: Planner,
        settings: Settings,
        settings_path: Option<PathBuf>,
        today: NaiveDate,
        cursor_minute: i64,
    ) -> Self {
        planner.set_zoom(settings.default_zoom);
        let mut subscription = planner.subscribe();
        let snapshot = subscription.borrow_and_mark();

        Self {
            planner,
            subscription,
            snapshot,
            today,
            tab: Tab::Calendar,
            ui_mode: UiMode::Normal,
            settings,
            settings_path,
            settings_index: 0,
            cursor_minute: cursor_minute.clamp(0, MINUTES_PER_DAY - 1),
            focused_task: None,
            timeline_scroll: 0,
            edit_form: None,
            interval_form: None,
            date_prompt: None,
            status_message: None,
        }
    }

    /// Pull the newest snapshot if one was published since the last call.
    /// Returns true when the view has to be redrawn from fresh state.
    pub fn refresh(&mut self) -> bool {
        let Some(snapshot) = self.subscription.changed() else {
            return false;
        };
        self.snapshot = snapshot;

        let still_there = self
            .focused_task
            .is_some_and(|id| self.snapshot.tasks_for_selected_date.iter().any(|t| t.id == id));
        if !still_there {
            self.focused_task = None;
        }
        true
    }

    pub fn scale(&self) -> TimelineScale {
        TimelineScale::new(self.snapshot.pixels_per_minute)
    }

    pub fn focused(&self) -> Option<&Task> {
        let id = self.focused_task?;
        self.snapshot.tasks_for_selected_date.iter().find(|t| t.id == id)
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.status_message = None;
    }

    // Calendar navigation

    /// Move the selected date and keep the displayed month on it
    pub fn move_selected_date(&mut self, days: i64) {
        let Some(date) = self
            .snapshot
            .selected_date
            .checked_add_signed(Duration::days(days))
        else {
            return;
        };
        self.go_to_date(date);
    }

    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.planner.select_date(date);
        let shown = self.snapshot.display_month;
        if !shown.contains(date) {
            self.planner.shift_month(shown.months_until(YearMonth::from_date(date)));
        }
        self.refresh();
    }

    pub fn shift_month(&mut self, delta: i64) {
        self.planner.shift_month(delta);
        self.refresh();
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.planner.set_mode(mode);
        self.refresh();
    }

    // Day view

    /// Whole minutes shown per timeline row at the current zoom
    pub fn row_minutes(&self) -> i64 {
        (self.scale().minutes_per_row(ROW_PIXELS).round() as i64).max(1)
    }

    pub fn cursor_row(&self) -> usize {
        (self.cursor_minute / self.row_minutes()) as usize
    }

    /// Move the cursor by whole timeline rows
    pub fn move_cursor(&mut self, rows: i64) {
        let scale = self.scale();
        let row = self.cursor_row() as i64 + rows;
        let top = scale.offset_of_minute(row * self.row_minutes());
        self.cursor_minute = scale.minute_at_offset(top);
    }

    pub fn zoom_in(&mut self) {
        self.planner.set_zoom(self.snapshot.pixels_per_minute + zoom_step());
        self.refresh();
    }

    pub fn zoom_out(&mut self) {
        self.planner.set_zoom(self.snapshot.pixels_per_minute - zoom_step());
        self.refresh();
    }

    pub fn add_point_at_cursor(&mut self) {
        let date = self.snapshot.selected_date;
        let id = self.planner.add_point(date, time_of_minute(self.cursor_minute));
        self.refresh();
        self.focused_task = Some(id);
    }

    /// Step the focus through the selected day's tasks in display order
    pub fn cycle_focus(&mut self, forward: bool) {
        let tasks = &self.snapshot.tasks_for_selected_date;
        if tasks.is_empty() {
            self.focused_task = None;
            return;
        }

        let current = self
            .focused_task
            .and_then(|id| tasks.iter().position(|t| t.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => tasks.len() - 1,
            (Some(i), true) => (i + 1) % tasks.len(),
            (Some(i), false) => (i + tasks.len() - 1) % tasks.len(),
        };

        let task = &tasks[next];
        self.focused_task = Some(task.id);
        self.cursor_minute = task.start_minute();
    }

    pub fn toggle_focused_done(&mut self) {
        if let Some(id) = self.focused_task {
            self.planner.toggle_done(id, self.snapshot.selected_date);
            self.refresh();
        }
    }

    pub fn delete_focused(&mut self) {
        if let Some(id) = self.focused_task.take() {
            self.planner.delete(id, self.snapshot.selected_date);
            self.refresh();
        }
    }

    // Edit sheet

    pub fn open_edit_form(&mut self) {
        let date = self.snapshot.selected_date;
        let Some(form) = self.focused().map(|task| EditForm {
            task_id: task.id,
            date,
            title: task.title.clone(),
            done: task.is_done,
            original_done: task.is_done,
        }) else {
            return;
        };
        self.edit_form = Some(form);
        self.ui_mode = UiMode::EditingTask;
    }

    /// Apply the edit sheet: title first, then done if it was flipped
    pub fn save_edit_form(&mut self) {
        let Some(form) = self.edit_form.take() else {
            self.ui_mode = UiMode::Normal;
            return;
        };
        self.planner.update_title(form.task_id, &form.title, form.date);
        if form.done != form.original_done {
            self.planner.toggle_done(form.task_id, form.date);
        }
        self.ui_mode = UiMode::Normal;
        self.refresh();
    }

    pub fn delete_from_edit_form(&mut self) {
        if let Some(form) = self.edit_form.take() {
            self.planner.delete(form.task_id, form.date);
            self.focused_task = None;
        }
        self.ui_mode = UiMode::Normal;
        self.refresh();
    }

    // Interval form

    pub fn open_interval_form(&mut self) {
        let start = time_of_minute(self.cursor_minute);
        let end = time_of_minute(self.cursor_minute + DEFAULT_INTERVAL_MINUTES);
        self.interval_form = Some(IntervalForm {
            start: format_time(start),
            end: format_time(end),
            title: String::new(),
            field: IntervalField::Title,
            error: None,
        });
        self.ui_mode = UiMode::AddingInterval;
    }

    /// Validate and submit the interval form. On bad input the form stays
    /// open with the error shown.
    pub fn submit_interval_form(&mut self) {
        let Some(form) = self.interval_form.as_mut() else {
            self.ui_mode = UiMode::Normal;
            return;
        };

        match validate_interval(form) {
            Ok((start, end, title)) => {
                let date = self.snapshot.selected_date;
                let id = self.planner.add_interval(date, start, end, &title, false);
                self.interval_form = None;
                self.ui_mode = UiMode::Normal;
                self.refresh();
                self.focused_task = Some(id);
                self.cursor_minute = crate::domain::minute_of_day(start);
            }
            Err(err) => {
                debug!(error = %err, "interval form rejected");
                form.error = Some(err);
            }
        }
    }

    // Go-to-date prompt

    pub fn open_date_prompt(&mut self) {
        self.date_prompt = Some(DatePrompt {
            text: self.snapshot.selected_date.format("%Y-%m-%d").to_string(),
            error: None,
        });
        self.ui_mode = UiMode::GoToDate;
    }

    pub fn submit_date_prompt(&mut self) {
        let Some(prompt) = self.date_prompt.as_mut() else {
            self.ui_mode = UiMode::Normal;
            return;
        };
        match parse_date(&prompt.text) {
            Ok(date) => {
                self.date_prompt = None;
                self.ui_mode = UiMode::Normal;
                self.go_to_date(date);
            }
            Err(err) => prompt.error = Some(err),
        }
    }

    pub fn cancel_form(&mut self) {
        self.edit_form = None;
        self.interval_form = None;
        self.date_prompt = None;
        self.ui_mode = UiMode::Normal;
    }

    // Settings

    pub fn move_settings_selection(&mut self, delta: i64) {
        let rows = SETTINGS_ROWS as i64;
        self.settings_index = ((self.settings_index as i64 + delta).rem_euclid(rows)) as usize;
    }

    /// Flip the selected setting and persist the file
    pub fn activate_setting(&mut self) -> Result<()> {
        match self.settings_index {
            0 => self.settings.dark_theme = !self.settings.dark_theme,
            1 => self.settings.dynamic_color = !self.settings.dynamic_color,
            2 => self.settings.week_start = self.settings.week_start.toggled(),
            _ => self.settings.default_zoom = self.snapshot.pixels_per_minute,
        }
        self.save_settings()
    }

    fn save_settings(&mut self) -> Result<()> {
        let Some(path) = &self.settings_path else {
            return Ok(());
        };
        save_settings(path, &self.settings)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        self.status_message = Some("Settings saved".to_string());
        Ok(())
    }
}

/// Parse the interval form into (start, end, title)
pub fn validate_interval(
    form: &IntervalForm,
) -> Result<(chrono::NaiveTime, chrono::NaiveTime, String), InputError> {
    let start = parse_time(&form.start)?;
    let end = parse_time(&form.end)?;
    if end <= start {
        return Err(InputError::EmptyInterval {
            start: format_time(start),
            end: format_time(end),
        });
    }
    let title = form.title.trim();
    if title.is_empty() {
        return Err(InputError::EmptyTitle);
    }
    Ok((start, end, title.to_string()))
}
