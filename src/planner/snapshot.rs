use super::selection::Selection;
use super::store::{TaskMap, TaskStore};
use crate::domain::{Task, ViewMode, YearMonth};
use chrono::NaiveDate;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use tracing::trace;

/// Everything the screens need, derived from the store and the selection
#[derive(Debug, Clone)]
pub struct UiSnapshot {
    pub selected_date: NaiveDate,
    pub display_month: YearMonth,
    pub mode: ViewMode,
    /// Tasks on the selected date, ascending by start time (stable)
    pub tasks_for_selected_date: Vec<Task>,
    /// All tasks by date
    pub tasks_by_date: TaskMap,
    /// Timeline zoom in pixels per minute
    pub pixels_per_minute: f32,
}

impl UiSnapshot {
    pub fn compose(store: &TaskStore, selection: &Selection) -> Self {
        let selected_date = selection.selected_date();
        let mut tasks_for_selected_date = store.tasks_on(selected_date).to_vec();
        tasks_for_selected_date.sort_by_key(|t| t.start);

        Self {
            selected_date,
            display_month: selection.display_month(),
            mode: selection.mode(),
            tasks_for_selected_date,
            tasks_by_date: store.map(),
            pixels_per_minute: selection.zoom(),
        }
    }

    pub fn has_tasks_on(&self, date: NaiveDate) -> bool {
        self.tasks_by_date
            .get(&date)
            .is_some_and(|list| !list.is_empty())
    }
}

struct Slot {
    version: u64,
    value: Arc<UiSnapshot>,
}

struct Shared {
    slot: Mutex<Slot>,
    changed: Condvar,
}

/// Single-writer, many-reader holder of the latest snapshot.
///
/// Publishing swaps in a new `Arc` under a short lock, so a reader always
/// gets a whole snapshot, never a mix of two.
#[derive(Clone)]
pub struct SnapshotHub {
    shared: Arc<Shared>,
}

impl SnapshotHub {
    pub fn new(initial: UiSnapshot) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    version: 0,
                    value: Arc::new(initial),
                }),
                changed: Condvar::new(),
            }),
        }
    }

    pub fn publish(&self, snapshot: UiSnapshot) {
        let mut slot = self.shared.slot.lock();
        slot.version += 1;
        slot.value = Arc::new(snapshot);
        trace!(version = slot.version, "published snapshot");
        drop(slot);
        self.shared.changed.notify_all();
    }

    pub fn latest(&self) -> Arc<UiSnapshot> {
        Arc::clone(&self.shared.slot.lock().value)
    }

    /// New subscriber; its first `changed()` yields the current snapshot
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            shared: Arc::clone(&self.shared),
            seen: None,
        }
    }
}

/// Always-latest view of a `SnapshotHub`. Intermediate snapshots published
/// between two reads are skipped.
pub struct Subscription {
    shared: Arc<Shared>,
    seen: Option<u64>,
}

impl Subscription {
    /// Latest snapshot, marking it as seen
    pub fn borrow_and_mark(&mut self) -> Arc<UiSnapshot> {
        let slot = self.shared.slot.lock();
        self.seen = Some(slot.version);
        Arc::clone(&slot.value)
    }

    /// Latest snapshot if it has not been seen yet
    pub fn changed(&mut self) -> Option<Arc<UiSnapshot>> {
        let slot = self.shared.slot.lock();
        if self.seen == Some(slot.version) {
            return None;
        }
        self.seen = Some(slot.version);
        Some(Arc::clone(&slot.value))
    }
}

#[cfg(test)]
impl Subscription {
    /// Block up to `timeout` for an unseen snapshot
    pub fn wait_changed(&mut self, timeout: std::time::Duration) -> Option<Arc<UiSnapshot>> {
        let mut slot = self.shared.slot.lock();
        if self.seen == Some(slot.version) {
            let seen = self.seen;
            self.shared
                .changed
                .wait_while_for(&mut slot, |s| Some(s.version) == seen, timeout);
            if self.seen == Some(slot.version) {
                return None;
            }
        }
        self.seen = Some(slot.version);
        Some(Arc::clone(&slot.value))
    }
}
