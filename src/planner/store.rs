use crate::domain::Task;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Title given to tasks created by tapping the timeline
pub const DEFAULT_TASK_TITLE: &str = "New task";

/// Shared, immutable list of one date's tasks
pub type DayTasks = Arc<Vec<Task>>;

/// Shared, immutable date -> tasks mapping
pub type TaskMap = Arc<BTreeMap<NaiveDate, DayTasks>>;

/// Tasks keyed by calendar date, each list in insertion order.
///
/// Mutations replace the whole list for one date and leave every other
/// date's `Arc` untouched, so readers holding an older map keep a
/// consistent view. Unknown ids are ignored.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    by_date: TaskMap,
}

impl TaskStore {
    pub fn from_map(map: BTreeMap<NaiveDate, Vec<Task>>) -> Self {
        let by_date = map.into_iter().map(|(date, tasks)| (date, Arc::new(tasks))).collect();
        Self {
            by_date: Arc::new(by_date),
        }
    }

    /// Cheap handle to the current mapping
    pub fn map(&self) -> TaskMap {
        Arc::clone(&self.by_date)
    }

    /// Tasks on `date` in insertion order (empty if none)
    pub fn tasks_on(&self, date: NaiveDate) -> &[Task] {
        self.by_date.get(&date).map(|list| list.as_slice()).unwrap_or(&[])
    }

    pub fn find(&self, date: NaiveDate, task_id: Uuid) -> Option<&Task> {
        self.tasks_on(date).iter().find(|t| t.id == task_id)
    }

    /// Append a point task titled `DEFAULT_TASK_TITLE`; returns its id
    pub fn add_point(&mut self, date: NaiveDate, time: NaiveTime) -> Uuid {
        self.push(date, Task::point(DEFAULT_TASK_TITLE, time))
    }

    /// Append an interval task; returns its id
    pub fn add_interval(
        &mut self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        title: impl Into<String>,
        is_done: bool,
    ) -> Uuid {
        self.push(date, Task::interval(title, start, end).done(is_done))
    }

    /// Append an existing task to `date`'s list
    pub fn push(&mut self, date: NaiveDate, task: Task) -> Uuid {
        let id = task.id;
        debug!(%date, %id, title = %task.title, kind = task.kind.label(), "adding task");
        let mut list: Vec<Task> = self.tasks_on(date).to_vec();
        list.push(task);
        self.install(date, list);
        id
    }

    /// Returns true when a task was renamed
    pub fn update_title(&mut self, task_id: Uuid, title: &str, date: NaiveDate) -> bool {
        self.update_task(date, task_id, |task| task.with_title(title))
    }

    /// Returns true when a task was toggled
    pub fn toggle_done(&mut self, task_id: Uuid, date: NaiveDate) -> bool {
        self.update_task(date, task_id, Task::with_done_toggled)
    }

    /// Returns true when a task was removed
    pub fn delete(&mut self, task_id: Uuid, date: NaiveDate) -> bool {
        if self.find(date, task_id).is_none() {
            debug!(%date, %task_id, "delete ignored, no such task");
            return false;
        }
        let list: Vec<Task> = self
            .tasks_on(date)
            .iter()
            .filter(|t| t.id != task_id)
            .cloned()
            .collect();
        debug!(%date, %task_id, "deleting task");
        self.install(date, list);
        true
    }

    fn update_task<F>(&mut self, date: NaiveDate, task_id: Uuid, transform: F) -> bool
    where
        F: Fn(&Task) -> Task,
    {
        if self.find(date, task_id).is_none() {
            debug!(%date, %task_id, "update ignored, no such task");
            return false;
        }
        let list: Vec<Task> = self
            .tasks_on(date)
            .iter()
            .map(|t| if t.id == task_id { transform(t) } else { t.clone() })
            .collect();
        debug!(%date, %task_id, "updating task");
        self.install(date, list);
        true
    }

    fn install(&mut self, date: NaiveDate, list: Vec<Task>) {
        Arc::make_mut(&mut self.by_date).insert(date, Arc::new(list));
    }
}

#[cfg(test)]
impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayTasks> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.values().map(|list| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::TaskKind;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_add_point_uses_default_title() {
        let mut store = TaskStore::new();
        let id = store.add_point(day(14), hm(9, 0));

        let task = store.find(day(14), id).unwrap();
        assert_eq!(task.title, DEFAULT_TASK_TITLE);
        assert_eq!(task.kind, TaskKind::Point);
        assert!(!task.is_done);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut store = TaskStore::new();
        store.add_interval(day(14), hm(14, 0), hm(15, 0), "Afternoon", false);
        store.add_interval(day(14), hm(8, 0), hm(9, 0), "Morning", true);

        let titles: Vec<_> = store.tasks_on(day(14)).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Afternoon", "Morning"]);
        assert!(store.tasks_on(day(14))[1].is_done);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_mutation_leaves_other_dates_shared() {
        let mut store = TaskStore::new();
        store.add_point(day(14), hm(9, 0));
        store.add_point(day(15), hm(9, 0));
        let before = Arc::clone(store.day(day(15)).unwrap());

        store.add_point(day(14), hm(10, 0));

        assert!(Arc::ptr_eq(&before, store.day(day(15)).unwrap()));
    }

    #[test]
    fn test_old_map_handle_is_not_affected() {
        let mut store = TaskStore::new();
        let id = store.add_point(day(14), hm(9, 0));
        let old = store.map();

        store.update_title(id, "Renamed", day(14));

        assert_eq!(old[&day(14)][0].title, DEFAULT_TASK_TITLE);
        assert_eq!(store.tasks_on(day(14))[0].title, "Renamed");
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = TaskStore::new();
        store.add_point(day(14), hm(9, 0));
        let before = Arc::clone(store.day(day(14)).unwrap());

        assert!(!store.delete(Uuid::new_v4(), day(14)));

        let after = store.day(day(14)).unwrap();
        assert!(Arc::ptr_eq(&before, after));
        assert_eq!(before.as_slice(), after.as_slice());
    }

    #[test]
    fn test_delete_is_scoped_by_date() {
        let mut store = TaskStore::new();
        let id = store.add_point(day(14), hm(9, 0));

        assert!(!store.delete(id, day(15)));
        assert_eq!(store.tasks_on(day(14)).len(), 1);

        assert!(store.delete(id, day(14)));
        assert!(store.tasks_on(day(14)).is_empty());
    }

    #[test]
    fn test_toggle_done_twice() {
        let mut store = TaskStore::new();
        let id = store.add_point(day(14), hm(9, 0));

        assert!(store.toggle_done(id, day(14)));
        assert!(store.find(day(14), id).unwrap().is_done);
        assert!(store.toggle_done(id, day(14)));
        assert!(!store.find(day(14), id).unwrap().is_done);
    }

    #[test]
    fn test_update_title_only_changes_title() {
        let mut store = TaskStore::new();
        let id = store.add_interval(day(14), hm(11, 30), hm(12, 15), "Call", true);
        let before = store.find(day(14), id).unwrap().clone();

        store.update_title(id, "Product call", day(14));

        let after = store.find(day(14), id).unwrap();
        assert_eq!(after.title, "Product call");
        assert_eq!(after.id, before.id);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.start, before.start);
        assert_eq!(after.end, before.end);
        assert_eq!(after.is_done, before.is_done);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = TaskStore::new();
        store.add_point(day(14), hm(9, 0));
        let before = store.map();

        assert!(!store.update_title(Uuid::new_v4(), "x", day(14)));
        assert!(!store.toggle_done(Uuid::new_v4(), day(20)));

        assert!(Arc::ptr_eq(&before, &store.map()));
    }
}
