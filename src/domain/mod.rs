pub mod calendar;
pub mod enums;
pub mod task;
pub mod views;

pub use calendar::{weekday_header, MonthGrid, YearMonth};
pub use enums::{Tab, UiMode, ViewMode, WeekStart};
pub use task::{minute_of_day, Task};
pub use views::{done_badge, format_time, parse_date, parse_time, time_range_text, truncate_string};
