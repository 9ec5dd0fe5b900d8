use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Shape of a task on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// A single moment with no duration
    Point,
    /// A start and an end time
    Interval,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Interval => "interval",
        }
    }
}

/// Which view the calendar tab is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    /// Month grid with the selected day's task list
    Calendar,
    /// Single-day timeline
    Day,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Calendar => "Calendar",
            Self::Day => "Day",
        }
    }
}

/// Top-level navigation destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Calendar,
    Notes,
    Settings,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Calendar => "Calendar",
            Tab::Notes => "Notes",
            Tab::Settings => "Settings",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Calendar, Tab::Notes, Tab::Settings]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    EditingTask,
    AddingInterval,
    GoToDate,
}

/// First day of the week in the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Sunday => "Sunday",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Monday => Self::Sunday,
            Self::Sunday => Self::Monday,
        }
    }
}
