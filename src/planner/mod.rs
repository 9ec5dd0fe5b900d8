//! Session state of the planner: the task store, the selection, and the
//! snapshot stream derived from both.
//!
//! Every mutation takes the source lock, applies the change, and (when
//! something actually changed) composes and publishes a fresh
//! [`UiSnapshot`] before releasing it. Publication order therefore matches
//! mutation order, and a snapshot never mixes two states.

pub mod seed;
pub mod selection;
pub mod snapshot;
pub mod store;

pub use selection::Selection;
pub use snapshot::{SnapshotHub, Subscription, UiSnapshot};
pub use store::TaskStore;

use crate::domain::{Task, ViewMode};
use chrono::{NaiveDate, NaiveTime};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

struct Sources {
    store: TaskStore,
    selection: Selection,
}

/// Session-lifetime owner of all mutable planner state
pub struct Planner {
    sources: Mutex<Sources>,
    hub: SnapshotHub,
}

impl Planner {
    pub fn with_tasks(today: NaiveDate, tasks: BTreeMap<NaiveDate, Vec<Task>>) -> Self {
        let store = TaskStore::from_map(tasks);
        let selection = Selection::new(today);
        let hub = SnapshotHub::new(UiSnapshot::compose(&store, &selection));
        Self {
            sources: Mutex::new(Sources { store, selection }),
            hub,
        }
    }

    /// Planner seeded with the demonstration tasks
    pub fn with_demo_data(today: NaiveDate) -> Self {
        Self::with_tasks(today, seed::demo_tasks(today))
    }

    pub fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    pub fn snapshot(&self) -> Arc<UiSnapshot> {
        self.hub.latest()
    }

    /// Add a point task and select its date in one step
    pub fn add_point(&self, date: NaiveDate, time: NaiveTime) -> Uuid {
        self.apply(|s| {
            let id = s.store.add_point(date, time);
            s.selection.select_date(date);
            (id, true)
        })
    }

    pub fn add_interval(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        title: &str,
        is_done: bool,
    ) -> Uuid {
        self.apply(|s| (s.store.add_interval(date, start, end, title, is_done), true))
    }

    pub fn update_title(&self, task_id: Uuid, title: &str, date: NaiveDate) {
        self.apply(|s| ((), s.store.update_title(task_id, title, date)));
    }

    pub fn toggle_done(&self, task_id: Uuid, date: NaiveDate) {
        self.apply(|s| ((), s.store.toggle_done(task_id, date)));
    }

    pub fn delete(&self, task_id: Uuid, date: NaiveDate) {
        self.apply(|s| ((), s.store.delete(task_id, date)));
    }

    pub fn select_date(&self, date: NaiveDate) {
        self.apply(|s| ((), s.selection.select_date(date)));
    }

    pub fn shift_month(&self, delta: i64) {
        self.apply(|s| ((), s.selection.shift_month(delta)));
    }

    pub fn set_mode(&self, mode: ViewMode) {
        self.apply(|s| ((), s.selection.set_mode(mode)));
    }

    pub fn set_zoom(&self, value: f32) {
        self.apply(|s| ((), s.selection.set_zoom(value)));
    }

    fn apply<R>(&self, mutate: impl FnOnce(&mut Sources) -> (R, bool)) -> R {
        let mut sources = self.sources.lock();
        let (result, changed) = mutate(&mut sources);
        if changed {
            self.hub
                .publish(UiSnapshot::compose(&sources.store, &sources.selection));
        }
        result
    }
}

#[cfg(test)]
impl Planner {
    /// Empty planner with `today` selected
    pub fn new(today: NaiveDate) -> Self {
        Self::with_tasks(today, BTreeMap::new())
    }
}
