//! Board state transitions
//!
//! [`reduce`] is a pure function: it maps the current board sequence and a
//! tagged action to a new sequence, copy-on-write, with no side effects.
//! Every operation is total - unknown board or task ids leave the state
//! unchanged rather than erroring, and nothing in here panics.

use tracing::debug;

use crate::domain::{Board, Task, TaskStatus};

/// A state transition, one variant per user operation.
///
/// The two `Reorder*` variants accept the caller's sequence wholesale.
/// Callers are trusted to supply a true permutation of the existing items;
/// the reducer performs no set-equality validation.
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole state (session start)
    Initialize { boards: Vec<Board> },

    /// Append a new board with a fresh id and no tasks
    AddBoard { title: String },

    /// Replace the title of the matching board
    EditBoardTitle { id: String, new_title: String },

    /// Remove the matching board and all of its tasks
    DeleteBoard { id: String },

    /// Replace the board order with a caller-supplied permutation
    ReorderBoards { boards: Vec<Board> },

    /// Append a new task (fresh id, derived status) to the named board
    AddTask { board_id: String, title: String },

    /// Replace the title of the matching task; id and board_id untouched
    EditTask {
        board_id: String,
        task_id: String,
        new_title: String,
    },

    /// Remove the matching task from the named board
    DeleteTask { board_id: String, task_id: String },

    /// Replace the named board's task order with a caller-supplied permutation
    ReorderTasks { board_id: String, tasks: Vec<Task> },

    /// Transfer a task to another board, recomputing its owner and status.
    /// Inserts at `position` (clamped) or appends when `None`.
    MoveTask {
        task_id: String,
        source_board_id: String,
        target_board_id: String,
        position: Option<usize>,
    },
}

/// Compute the next board sequence from the current one and an action
pub fn reduce(state: &[Board], action: Action) -> Vec<Board> {
    match action {
        Action::Initialize { boards } => {
            debug!(count = boards.len(), "reduce: Initialize");
            boards
        }

        Action::AddBoard { title } => {
            debug!(%title, "reduce: AddBoard");
            let mut next = state.to_vec();
            next.push(Board::new(title));
            next
        }

        Action::EditBoardTitle { id, new_title } => {
            debug!(%id, %new_title, "reduce: EditBoardTitle");
            state
                .iter()
                .map(|board| {
                    if board.id == id {
                        Board {
                            title: new_title.clone(),
                            ..board.clone()
                        }
                    } else {
                        board.clone()
                    }
                })
                .collect()
        }

        Action::DeleteBoard { id } => {
            debug!(%id, "reduce: DeleteBoard");
            state.iter().filter(|board| board.id != id).cloned().collect()
        }

        Action::ReorderBoards { boards } => {
            debug!(count = boards.len(), "reduce: ReorderBoards");
            boards
        }

        Action::AddTask { board_id, title } => {
            debug!(%board_id, %title, "reduce: AddTask");
            let Some(board) = state.iter().find(|b| b.id == board_id) else {
                debug!(%board_id, "reduce: AddTask target board not found, state unchanged");
                return state.to_vec();
            };
            let task = Task::new(board_id.as_str(), title, TaskStatus::for_board_title(&board.title));
            state
                .iter()
                .map(|b| {
                    if b.id == board_id {
                        let mut tasks = b.tasks.clone();
                        tasks.push(task.clone());
                        Board { tasks, ..b.clone() }
                    } else {
                        b.clone()
                    }
                })
                .collect()
        }

        Action::EditTask {
            board_id,
            task_id,
            new_title,
        } => {
            debug!(%board_id, %task_id, %new_title, "reduce: EditTask");
            state
                .iter()
                .map(|board| {
                    if board.id != board_id {
                        return board.clone();
                    }
                    let tasks = board
                        .tasks
                        .iter()
                        .map(|task| {
                            if task.id == task_id {
                                Task {
                                    title: new_title.clone(),
                                    ..task.clone()
                                }
                            } else {
                                task.clone()
                            }
                        })
                        .collect();
                    Board {
                        tasks,
                        ..board.clone()
                    }
                })
                .collect()
        }

        Action::DeleteTask { board_id, task_id } => {
            debug!(%board_id, %task_id, "reduce: DeleteTask");
            state
                .iter()
                .map(|board| {
                    if board.id != board_id {
                        return board.clone();
                    }
                    let tasks = board.tasks.iter().filter(|t| t.id != task_id).cloned().collect();
                    Board {
                        tasks,
                        ..board.clone()
                    }
                })
                .collect()
        }

        Action::ReorderTasks { board_id, tasks } => {
            debug!(%board_id, count = tasks.len(), "reduce: ReorderTasks");
            state
                .iter()
                .map(|board| {
                    if board.id == board_id {
                        Board {
                            tasks: tasks.clone(),
                            ..board.clone()
                        }
                    } else {
                        board.clone()
                    }
                })
                .collect()
        }

        Action::MoveTask {
            task_id,
            source_board_id,
            target_board_id,
            position,
        } => {
            debug!(%task_id, %source_board_id, %target_board_id, ?position, "reduce: MoveTask");
            let Some(source) = state.iter().find(|b| b.id == source_board_id) else {
                debug!(%source_board_id, "reduce: MoveTask source board not found, state unchanged");
                return state.to_vec();
            };
            let Some(target) = state.iter().find(|b| b.id == target_board_id) else {
                debug!(%target_board_id, "reduce: MoveTask target board not found, state unchanged");
                return state.to_vec();
            };
            let Some(task) = source.tasks.iter().find(|t| t.id == task_id) else {
                debug!(%task_id, "reduce: MoveTask task not in source board, state unchanged");
                return state.to_vec();
            };

            let moved = Task {
                board_id: target.id.clone(),
                status: TaskStatus::for_board_title(&target.title),
                ..task.clone()
            };

            state
                .iter()
                .map(|board| {
                    if board.id == source_board_id && board.id == target_board_id {
                        // Same-board move: reposition without losing the task
                        let mut tasks: Vec<Task> =
                            board.tasks.iter().filter(|t| t.id != task_id).cloned().collect();
                        let at = position.unwrap_or(tasks.len()).min(tasks.len());
                        tasks.insert(at, moved.clone());
                        Board {
                            tasks,
                            ..board.clone()
                        }
                    } else if board.id == source_board_id {
                        let tasks = board.tasks.iter().filter(|t| t.id != task_id).cloned().collect();
                        Board {
                            tasks,
                            ..board.clone()
                        }
                    } else if board.id == target_board_id {
                        let mut tasks = board.tasks.clone();
                        let at = position.unwrap_or(tasks.len()).min(tasks.len());
                        tasks.insert(at, moved.clone());
                        Board {
                            tasks,
                            ..board.clone()
                        }
                    } else {
                        board.clone()
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn board(id: &str, title: &str) -> Board {
        Board::with_id(id, title)
    }

    fn task(id: &str, board_id: &str, title: &str) -> Task {
        Task::with_id(id, board_id, title, TaskStatus::Todo)
    }

    fn total_tasks(state: &[Board]) -> usize {
        state.iter().map(|b| b.tasks.len()).sum()
    }

    #[test]
    fn test_add_board_appends() {
        let state = vec![board("b1", "To do")];
        let next = reduce(&state, Action::AddBoard { title: "Backlog".into() });
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].id, "b1");
        assert_eq!(next[1].title, "Backlog");
        assert!(next[1].tasks.is_empty());
        // Input untouched
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_edit_board_title() {
        let state = vec![board("b1", "To do"), board("b2", "Done")];
        let next = reduce(
            &state,
            Action::EditBoardTitle {
                id: "b2".into(),
                new_title: "Finished".into(),
            },
        );
        assert_eq!(next[1].title, "Finished");
        assert_eq!(next[1].id, "b2");
        assert_eq!(next[0].title, "To do");
    }

    #[test]
    fn test_edit_board_unknown_id_is_noop() {
        let state = vec![board("b1", "To do")];
        let next = reduce(
            &state,
            Action::EditBoardTitle {
                id: "missing".into(),
                new_title: "X".into(),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_delete_board_cascades() {
        let mut b1 = board("b1", "To do");
        b1.tasks.push(task("t1", "b1", "Buy milk"));
        b1.tasks.push(task("t2", "b1", "Walk dog"));
        let state = vec![b1, board("b2", "Done")];

        let next = reduce(&state, Action::DeleteBoard { id: "b1".into() });
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "b2");
        assert_eq!(total_tasks(&next), 0);
    }

    #[test]
    fn test_delete_board_unknown_id_is_noop() {
        let state = vec![board("b1", "To do")];
        let next = reduce(&state, Action::DeleteBoard { id: "missing".into() });
        assert_eq!(next, state);
    }

    #[test]
    fn test_reorder_boards_replaces_sequence() {
        let state = vec![board("b1", "To do"), board("b2", "Done")];
        let reversed = vec![state[1].clone(), state[0].clone()];
        let next = reduce(&state, Action::ReorderBoards { boards: reversed });
        assert_eq!(next[0].id, "b2");
        assert_eq!(next[1].id, "b1");
    }

    #[test]
    fn test_add_task_derives_status() {
        let state = vec![board("b1", "In Progress")];
        let next = reduce(
            &state,
            Action::AddTask {
                board_id: "b1".into(),
                title: "Buy milk".into(),
            },
        );
        let added = &next[0].tasks[0];
        assert_eq!(added.title, "Buy milk");
        assert_eq!(added.board_id, "b1");
        assert_eq!(added.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_add_task_unknown_board_is_noop() {
        let state = vec![board("b1", "To do")];
        let next = reduce(
            &state,
            Action::AddTask {
                board_id: "missing".into(),
                title: "Buy milk".into(),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_move_task_appends_and_restatuses() {
        // Two boards b1 ("To do") and b2 ("Done"), task t1 in b1
        let mut b1 = board("b1", "To do");
        b1.tasks.push(task("t1", "b1", "Buy milk"));
        let state = vec![b1, board("b2", "Done")];

        let next = reduce(
            &state,
            Action::MoveTask {
                task_id: "t1".into(),
                source_board_id: "b1".into(),
                target_board_id: "b2".into(),
                position: None,
            },
        );

        assert!(next[0].tasks.is_empty());
        assert_eq!(next[1].tasks.len(), 1);
        assert_eq!(next[1].tasks[0].board_id, "b2");
        assert_eq!(next[1].tasks[0].status, TaskStatus::Done);
        assert_eq!(next[1].tasks[0].id, "t1");
    }

    #[test]
    fn test_move_task_explicit_position() {
        let mut b1 = board("b1", "To do");
        b1.tasks.push(task("t1", "b1", "Buy milk"));
        let mut b2 = board("b2", "Done");
        b2.tasks.push(task("t2", "b2", "Walk dog"));
        b2.tasks.push(task("t3", "b2", "Water plants"));
        let state = vec![b1, b2];

        let next = reduce(
            &state,
            Action::MoveTask {
                task_id: "t1".into(),
                source_board_id: "b1".into(),
                target_board_id: "b2".into(),
                position: Some(1),
            },
        );
        let ids: Vec<&str> = next[1].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1", "t3"]);
    }

    #[test]
    fn test_move_task_position_clamped() {
        let mut b1 = board("b1", "To do");
        b1.tasks.push(task("t1", "b1", "Buy milk"));
        let state = vec![b1, board("b2", "Done")];

        let next = reduce(
            &state,
            Action::MoveTask {
                task_id: "t1".into(),
                source_board_id: "b1".into(),
                target_board_id: "b2".into(),
                position: Some(99),
            },
        );
        assert_eq!(next[1].tasks.len(), 1);
    }

    #[test]
    fn test_move_task_same_board_repositions() {
        let mut b1 = board("b1", "To do");
        b1.tasks.push(task("t1", "b1", "Buy milk"));
        b1.tasks.push(task("t2", "b1", "Walk dog"));
        b1.tasks.push(task("t3", "b1", "Water plants"));
        let state = vec![b1];

        let next = reduce(
            &state,
            Action::MoveTask {
                task_id: "t3".into(),
                source_board_id: "b1".into(),
                target_board_id: "b1".into(),
                position: Some(0),
            },
        );
        let ids: Vec<&str> = next[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t1", "t2"]);
        assert_eq!(total_tasks(&next), 3);
    }

    #[test]
    fn test_move_task_missing_pieces_are_noops() {
        let mut b1 = board("b1", "To do");
        b1.tasks.push(task("t1", "b1", "Buy milk"));
        let state = vec![b1, board("b2", "Done")];

        for (task_id, source, target) in [
            ("t1", "missing", "b2"),
            ("t1", "b1", "missing"),
            ("missing", "b1", "b2"),
            ("t1", "b2", "b1"), // task not in the named source
        ] {
            let next = reduce(
                &state,
                Action::MoveTask {
                    task_id: task_id.into(),
                    source_board_id: source.into(),
                    target_board_id: target.into(),
                    position: None,
                },
            );
            assert_eq!(next, state, "expected no-op for ({task_id}, {source}, {target})");
        }
    }

    // Concrete scenario: add, edit, then cascade-delete on a single board
    #[test]
    fn test_single_board_task_lifecycle() {
        let state = vec![board("b1", "To do")];

        let state = reduce(
            &state,
            Action::AddTask {
                board_id: "b1".into(),
                title: "Buy milk".into(),
            },
        );
        assert_eq!(state[0].tasks.len(), 1);
        let added = state[0].tasks[0].clone();
        assert_eq!(added.title, "Buy milk");
        assert_eq!(added.board_id, "b1");
        assert_eq!(added.status, TaskStatus::Todo);

        let state = reduce(
            &state,
            Action::EditTask {
                board_id: "b1".into(),
                task_id: added.id.clone(),
                new_title: "Buy oat milk".into(),
            },
        );
        assert_eq!(state[0].tasks[0].title, "Buy oat milk");
        assert_eq!(state[0].tasks[0].id, added.id);
        assert_eq!(state[0].tasks[0].board_id, "b1");

        let state = reduce(&state, Action::DeleteBoard { id: "b1".into() });
        assert!(state.is_empty());
    }

    #[test]
    fn test_delete_then_add_inverse() {
        let state = vec![board("b1", "To do"), board("b2", "Done")];
        let grown = reduce(&state, Action::AddBoard { title: "Backlog".into() });
        let new_id = grown[2].id.clone();
        let shrunk = reduce(&grown, Action::DeleteBoard { id: new_id });
        assert_eq!(shrunk, state);
    }

    // === Property tests ===

    fn arb_state() -> impl Strategy<Value = Vec<Board>> {
        prop::collection::vec(prop::collection::vec("[a-z]{1,8}", 0..5usize), 1..4usize).prop_map(
            |board_tasks| {
                board_tasks
                    .into_iter()
                    .enumerate()
                    .map(|(i, titles)| {
                        let board_id = format!("board-{i}");
                        let mut board = Board::with_id(board_id.as_str(), format!("Board {i}"));
                        board.tasks = titles
                            .into_iter()
                            .enumerate()
                            .map(|(j, title)| {
                                Task::with_id(
                                    format!("task-{i}-{j}"),
                                    board_id.as_str(),
                                    title,
                                    TaskStatus::Todo,
                                )
                            })
                            .collect();
                        board
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_identity_reorder_is_deep_equal(state in arb_state()) {
            let next = reduce(&state, Action::ReorderBoards { boards: state.clone() });
            prop_assert_eq!(next, state);
        }

        #[test]
        fn prop_move_preserves_total_task_count(
            state in arb_state(),
            src in 0usize..4,
            dst in 0usize..4,
            pick in 0usize..5,
        ) {
            let source = state[src % state.len()].clone();
            let target = state[dst % state.len()].clone();
            let task_id = source
                .tasks
                .get(pick % source.tasks.len().max(1))
                .map(|t| t.id.clone())
                .unwrap_or_else(|| "missing".to_string());

            let before = total_tasks(&state);
            let next = reduce(&state, Action::MoveTask {
                task_id: task_id.clone(),
                source_board_id: source.id.clone(),
                target_board_id: target.id.clone(),
                position: None,
            });
            prop_assert_eq!(total_tasks(&next), before);

            if task_id != "missing" {
                let moved = next.iter().flat_map(|b| &b.tasks).find(|t| t.id == task_id);
                prop_assert!(moved.is_some());
                prop_assert_eq!(&moved.unwrap().board_id, &target.id);
            }
        }

        #[test]
        fn prop_cascade_delete_leaves_no_orphans(state in arb_state(), pick in 0usize..4) {
            let victim = state[pick % state.len()].id.clone();
            let next = reduce(&state, Action::DeleteBoard { id: victim.clone() });
            prop_assert!(next.iter().all(|b| b.id != victim));
            prop_assert!(next.iter().flat_map(|b| &b.tasks).all(|t| t.board_id != victim));
        }

        #[test]
        fn prop_state_serde_round_trip(state in arb_state()) {
            let json = serde_json::to_string(&state).unwrap();
            let back: Vec<Board> = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, state);
        }
    }
}
