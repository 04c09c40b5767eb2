//! Turns "row moved from A to B" into a new task order.

use uuid::Uuid;

use crate::model::Task;

/// Notification payload for a completed reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    pub ordered_ids: Vec<Uuid>,
    pub moved_id: Uuid,
}

/// Move the row at `from` so it ends up at index `to`. Other rows keep their
/// relative order. Returns `None` for out-of-range or equal indices.
pub fn move_row(tasks: &mut Vec<Task>, from: usize, to: usize) -> Option<OrderChange> {
    if from == to || from >= tasks.len() || to >= tasks.len() {
        return None;
    }

    let task = tasks.remove(from);
    let moved_id = task.id;
    tasks.insert(to, task);

    Some(OrderChange {
        ordered_ids: tasks.iter().map(|t| t.id).collect(),
        moved_id,
    })
}

/// Indices for a drop of row `active` onto row `over`.
pub fn resolve_drop(tasks: &[Task], active: Uuid, over: Uuid) -> Option<(usize, usize)> {
    let from = tasks.iter().position(|t| t.id == active)?;
    let to = tasks.iter().position(|t| t.id == over)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Task> {
        (0..n)
            .map(|i| Task::unscheduled(format!("Row {i}")).with_base_index(i))
            .collect()
    }

    #[test]
    fn moving_down_shifts_the_rows_between() {
        let mut tasks = rows(10);
        let before: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();

        let change = move_row(&mut tasks, 2, 5).unwrap();
        assert_eq!(change.moved_id, before[2]);
        assert_eq!(tasks[5].id, before[2]);

        let order: Vec<usize> = tasks.iter().map(|t| t.base_index).collect();
        assert_eq!(order, vec![0, 1, 3, 4, 5, 2, 6, 7, 8, 9]);
        assert_eq!(change.ordered_ids, tasks.iter().map(|t| t.id).collect::<Vec<_>>());
    }

    #[test]
    fn moving_up() {
        let mut tasks = rows(5);
        move_row(&mut tasks, 4, 0).unwrap();
        let order: Vec<usize> = tasks.iter().map(|t| t.base_index).collect();
        assert_eq!(order, vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn invalid_moves_leave_order_alone() {
        let mut tasks = rows(3);
        let before = tasks.clone();
        assert!(move_row(&mut tasks, 1, 1).is_none());
        assert!(move_row(&mut tasks, 3, 0).is_none());
        assert!(move_row(&mut tasks, 0, 7).is_none());
        assert_eq!(tasks, before);
    }

    #[test]
    fn unknown_ids_do_not_resolve() {
        let tasks = rows(3);
        assert_eq!(resolve_drop(&tasks, tasks[0].id, tasks[2].id), Some((0, 2)));
        assert_eq!(resolve_drop(&tasks, Uuid::new_v4(), tasks[2].id), None);
    }
}
