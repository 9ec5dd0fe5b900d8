use super::enums::TaskKind;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minutes since midnight for a time of day (seconds are dropped)
pub fn minute_of_day(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

/// A task scheduled on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID, also the lookup key for edits and deletes
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Point or interval
    pub kind: TaskKind,
    /// Start time of day
    pub start: NaiveTime,
    /// End time of day (interval tasks only)
    pub end: Option<NaiveTime>,
    /// Completion flag
    pub is_done: bool,
}

impl Task {
    pub fn point(title: impl Into<String>, start: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind: TaskKind::Point,
            start,
            end: None,
            is_done: false,
        }
    }

    /// An interval task. `end` is taken as given, even when it is not after `start`.
    pub fn interval(title: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind: TaskKind::Interval,
            start,
            end: Some(end),
            is_done: false,
        }
    }

    /// Set the completion flag (builder style, used when seeding)
    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Copy of this task with a new title
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Copy of this task with the completion flag flipped
    pub fn with_done_toggled(&self) -> Self {
        Self {
            is_done: !self.is_done,
            ..self.clone()
        }
    }

    pub fn start_minute(&self) -> i64 {
        minute_of_day(self.start)
    }

    pub fn end_minute(&self) -> Option<i64> {
        self.end.map(minute_of_day)
    }
}
