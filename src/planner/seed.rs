use crate::domain::Task;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::BTreeMap;

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Demonstration tasks for `today` and the day after
pub fn demo_tasks(today: NaiveDate) -> BTreeMap<NaiveDate, Vec<Task>> {
    let mut map = BTreeMap::new();
    map.insert(
        today,
        vec![
            Task::point("Check email", hm(9, 0)),
            Task::interval("Product sync", hm(11, 30), hm(12, 15)),
            Task::interval("Design work", hm(14, 0), hm(16, 0)).done(true),
            Task::point("Evening run", hm(19, 30)),
        ],
    );
    if let Some(tomorrow) = today.checked_add_signed(Duration::days(1)) {
        map.insert(
            tomorrow,
            vec![
                Task::interval("Task review", hm(10, 0), hm(11, 0)),
                Task::interval("Gym", hm(18, 0), hm(19, 0)),
            ],
        );
    }
    map
}
