use crate::domain::{minute_of_day, Task};
use chrono::Duration;

/// Length given to tasks without an end time when packing columns
pub const DEFAULT_SPAN_MINUTES: i64 = 15;

/// Column placement of one task on the day timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLayout<'a> {
    pub task: &'a Task,
    /// Zero-based column
    pub column: usize,
    /// Peak number of tasks active alongside this one, itself included
    pub columns_in_group: usize,
}

/// End minute used for packing. Point tasks and open intervals span
/// `DEFAULT_SPAN_MINUTES` as time-of-day arithmetic, so a point close to
/// midnight ends early the same day. The task itself is not changed.
pub fn layout_end_minute(task: &Task) -> i64 {
    task.end_minute()
        .unwrap_or_else(|| minute_of_day(task.start + Duration::minutes(DEFAULT_SPAN_MINUTES)))
}

/// Assign side-by-side columns to time-overlapping tasks.
///
/// Tasks are swept in start order (ties keep input order) over half-open
/// `[start, end)` intervals. Each task takes the lowest column not held by a
/// still-active task, and every active task's group width is raised to the
/// current active count. Output order matches `tasks`.
pub fn layout_tasks(tasks: &[Task]) -> Vec<TaskLayout<'_>> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by_key(|&i| tasks[i].start_minute());

    let mut columns = vec![0usize; tasks.len()];
    let mut widths = vec![1usize; tasks.len()];
    // (task index, column)
    let mut active: Vec<(usize, usize)> = Vec::new();

    for index in order {
        let start = tasks[index].start_minute();
        active.retain(|&(other, _)| layout_end_minute(&tasks[other]) > start);

        let column = first_free_column(&active);
        active.push((index, column));
        columns[index] = column;

        let overlap = active.len();
        for &(other, _) in &active {
            widths[other] = widths[other].max(overlap);
        }
    }

    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| TaskLayout {
            task,
            column: columns[i],
            columns_in_group: widths[i],
        })
        .collect()
}

fn first_free_column(active: &[(usize, usize)]) -> usize {
    let mut column = 0;
    while active.iter().any(|&(_, used)| used == column) {
        column += 1;
    }
    column
}

/// Widest group on the day, at least 1
pub fn max_columns(layouts: &[TaskLayout<'_>]) -> usize {
    layouts
        .iter()
        .map(|l| l.columns_in_group)
        .max()
        .unwrap_or(1)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn placements(tasks: &[Task]) -> Vec<(usize, usize)> {
        layout_tasks(tasks)
            .iter()
            .map(|l| (l.column, l.columns_in_group))
            .collect()
    }

    #[test]
    fn test_separate_tasks_share_column_zero() {
        let tasks = vec![
            Task::point("Check email", hm(9, 0)),
            Task::interval("Product call", hm(11, 30), hm(12, 15)),
            Task::interval("Design work", hm(14, 0), hm(16, 0)),
            Task::point("Run", hm(19, 30)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 1), (0, 1), (0, 1), (0, 1)]);
    }

    #[test]
    fn test_two_overlapping_intervals() {
        let tasks = vec![
            Task::interval("Review", hm(10, 0), hm(11, 0)),
            Task::interval("Standup", hm(10, 30), hm(11, 30)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let tasks = vec![
            Task::interval("A", hm(10, 0), hm(11, 0)),
            Task::interval("B", hm(11, 0), hm(12, 0)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_point_task_spans_fifteen_minutes() {
        let tasks = vec![
            Task::point("Ping", hm(9, 0)),
            Task::point("Inside", hm(9, 14)),
            Task::point("After", hm(9, 15)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 2), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_output_follows_input_order() {
        let tasks = vec![
            Task::interval("Late", hm(10, 30), hm(11, 30)),
            Task::interval("Early", hm(10, 0), hm(11, 0)),
        ];
        let layouts = layout_tasks(&tasks);
        assert_eq!(layouts[0].task.title, "Late");
        assert_eq!(layouts[0].column, 1);
        assert_eq!(layouts[1].task.title, "Early");
        assert_eq!(layouts[1].column, 0);
    }

    #[test]
    fn test_equal_starts_keep_input_order() {
        let tasks = vec![
            Task::interval("First", hm(8, 0), hm(9, 0)),
            Task::interval("Second", hm(8, 0), hm(9, 0)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_freed_column_is_reused() {
        // A holds 0, B takes 1, A ends, C reuses 0 while B is still active
        let tasks = vec![
            Task::interval("A", hm(9, 0), hm(10, 0)),
            Task::interval("B", hm(9, 30), hm(11, 0)),
            Task::interval("C", hm(10, 0), hm(10, 30)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 2), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_group_width_is_peak_while_active() {
        // Long task sees three simultaneous tasks after its own start
        let tasks = vec![
            Task::interval("Long", hm(9, 0), hm(12, 0)),
            Task::interval("Short", hm(9, 0), hm(9, 30)),
            Task::interval("Mid", hm(10, 0), hm(11, 0)),
            Task::interval("Tiny", hm(10, 15), hm(10, 45)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_inverted_interval_is_evicted_at_its_end() {
        let tasks = vec![
            Task::interval("Inverted", hm(10, 0), hm(9, 0)),
            Task::point("Next", hm(10, 0)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_point_near_midnight_wraps_its_end() {
        let late = Task::point("Late", hm(23, 50));
        assert_eq!(layout_end_minute(&late), 5);

        // Wrapped end is before any later start, so Late is already gone
        let tasks = vec![late, Task::interval("Later", hm(23, 55), hm(23, 59))];
        assert_eq!(placements(&tasks), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_seconds_do_not_reorder_same_minute() {
        let tasks = vec![
            Task::interval("First", NaiveTime::from_hms_opt(9, 0, 40).unwrap(), hm(9, 30)),
            Task::interval("Second", NaiveTime::from_hms_opt(9, 0, 10).unwrap(), hm(9, 30)),
        ];
        assert_eq!(placements(&tasks), vec![(0, 2), (1, 2)]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let tasks = vec![
            Task::interval("A", hm(9, 0), hm(10, 0)),
            Task::point("B", hm(9, 10)),
            Task::interval("C", hm(9, 5), hm(9, 50)),
        ];
        assert_eq!(placements(&tasks), placements(&tasks));
    }

    #[test]
    fn test_empty_day() {
        let layouts = layout_tasks(&[]);
        assert!(layouts.is_empty());
        assert_eq!(max_columns(&layouts), 1);
    }

    fn scattered_tasks() -> Vec<Task> {
        let mut tasks = Vec::new();
        for i in 0..40u32 {
            let start = hm(8 + (i * 7) % 10, (i * 13) % 60);
            if i % 3 == 0 {
                tasks.push(Task::point(format!("p{}", i), start));
            } else {
                let minutes = 20 + (i * 11) % 90;
                let end = start + chrono::Duration::minutes(minutes as i64);
                tasks.push(Task::interval(format!("i{}", i), start, end));
            }
        }
        tasks.push(Task::point("late", hm(23, 50)));
        tasks.push(Task::interval("night", hm(23, 40), hm(23, 58)));
        tasks.push(Task::interval("inverted", hm(12, 0), hm(11, 0)));
        tasks
    }

    /// Checks the packing rules against a brute-force sweep
    #[test]
    fn test_columns_never_collide_for_overlapping_tasks() {
        let tasks = scattered_tasks();
        let layouts = layout_tasks(&tasks);
        for (a, la) in layouts.iter().enumerate() {
            let (sa, ea) = (la.task.start_minute(), layout_end_minute(la.task));
            for (b, lb) in layouts.iter().enumerate() {
                if a == b {
                    continue;
                }
                let (sb, eb) = (lb.task.start_minute(), layout_end_minute(lb.task));
                if sa < eb && sb < ea {
                    assert_ne!(la.column, lb.column, "{} and {} collide", la.task.title, lb.task.title);
                }
            }
            assert!(la.column < la.columns_in_group);
        }
    }

    /// Recomputes every group width as the largest active set seen at any
    /// start while the task was still active
    #[test]
    fn test_group_width_matches_peak_active_set() {
        let tasks = scattered_tasks();
        let key = |i: usize| (tasks[i].start_minute(), i);
        let start = |i: usize| tasks[i].start_minute();
        let end = |i: usize| layout_end_minute(&tasks[i]);

        // Tasks placed at or before `s` that have not ended by its start
        let active_at = |s: usize| {
            (0..tasks.len())
                .filter(|&u| key(u) <= key(s) && (u == s || end(u) > start(s)))
                .count()
        };

        let layouts = layout_tasks(&tasks);
        for t in 0..tasks.len() {
            let peak = (0..tasks.len())
                .filter(|&s| key(s) >= key(t) && (s == t || end(t) > start(s)))
                .map(&active_at)
                .max()
                .unwrap();
            assert_eq!(layouts[t].columns_in_group, peak, "width of {}", tasks[t].title);
        }
    }
}
