//! # Task Progress Calculation
//!
//! The progress of a team task is derived from its sub-tasks on every read
//! and never persisted.

use entity::TaskStatus;

/// Completion percentage for a task, from its own status and its sub-tasks.
///
/// A task with no sub-tasks is all-or-nothing: 100 when the task itself is
/// DONE, 0 otherwise. With sub-tasks, progress is the share of DONE
/// sub-tasks, truncated to an integer (1 of 3 done is 33, never 34).
#[must_use]
pub fn task_progress(task_status: TaskStatus, sub_task_statuses: &[TaskStatus]) -> u8 {
    if sub_task_statuses.is_empty() {
        return if task_status == TaskStatus::Done { 100 } else { 0 };
    }

    let done = sub_task_statuses
        .iter()
        .filter(|s| **s == TaskStatus::Done)
        .count();

    ((100 * done) / sub_task_statuses.len()) as u8
}
