//! End-to-end board scenarios and invariant checks

use kanban_engine::storage::{BOARDS_KEY, LEGACY_TASKS_KEY};
use kanban_engine::{
    board::{ArchiveBoard, CreateBoard, DeleteBoard, SelectBoard, UnarchiveBoard, UpdateBoard},
    column::{AddColumn, DeleteColumn},
    migration::serialize_state,
    task::{AddTask, ClearCompleted, DeleteTask, MoveTask, UpdateTask},
    AppState, BoardId, BoardType, CollectingNotifier, ColumnId, KanbanContext, KanbanError, MemoryStorage,
    Priority, TaskId,
};

fn fresh() -> KanbanContext {
    KanbanContext::open(MemoryStorage::new(), CollectingNotifier::new()).unwrap()
}

fn ids(ctx: &KanbanContext, column: &str) -> Vec<String> {
    ctx.state()
        .active_board()
        .unwrap()
        .tasks_in(&ColumnId::from(column))
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

fn add(ctx: &mut KanbanContext, column: &str, text: &str) -> String {
    let value = ctx.process(&AddTask::new(column, text)).unwrap();
    value["id"].as_str().unwrap().to_string()
}

#[test_log::test]
fn test_add_buy_milk() {
    let mut ctx = fresh();
    let value = ctx
        .process(&AddTask::new("todo", "Buy milk").with_priority(Priority::Low))
        .unwrap();
    let id = value["id"].as_str().unwrap().to_string();

    let board = ctx.state().active_board().unwrap();
    let todo = board.tasks_in(&ColumnId::from("todo"));
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].id, id.as_str());
    assert_eq!(todo[0].text, "Buy milk");
    assert_eq!(todo[0].column_id, "todo");
    assert_eq!(todo[0].priority, Priority::Low);
    assert!(todo[0].tags.is_empty());
}

#[test_log::test]
fn test_move_to_doing() {
    let mut ctx = fresh();
    let milk = add(&mut ctx, "todo", "Buy milk");
    let existing = add(&mut ctx, "doing", "Already going");

    ctx.process(&MoveTask::new(milk.as_str(), "doing")).unwrap();
    assert!(ids(&ctx, "todo").is_empty());
    assert_eq!(ids(&ctx, "doing"), vec![existing, milk.clone()]);

    let task = ctx
        .state()
        .active_board()
        .unwrap()
        .find_task(&TaskId::from(milk.as_str()))
        .unwrap();
    assert_eq!(task.column_id, "doing");
}

#[test_log::test]
fn test_archive_guard_on_sole_board() {
    let mut ctx = fresh();
    let before = ctx.state().clone();

    let result = ctx.process(&ArchiveBoard::new("board-1"));
    assert!(matches!(result, Err(KanbanError::LastActiveBoard { .. })));
    assert_eq!(ctx.state(), &before);
    assert_eq!(ctx.storage().load(BOARDS_KEY).unwrap(), None);
}

#[test_log::test]
fn test_archive_sequence_keeps_one_board_active() {
    let mut ctx = fresh();
    let second = ctx.process(&CreateBoard::new("Second")).unwrap();
    let second = second["id"].as_str().unwrap().to_string();

    ctx.process(&ArchiveBoard::new("board-1")).unwrap();
    assert_eq!(ctx.state().active_board.as_ref().unwrap().as_str(), second);
    let after_first = ctx.state().clone();

    let result = ctx.process(&ArchiveBoard::new(second.as_str()));
    assert!(matches!(result, Err(KanbanError::LastActiveBoard { .. })));
    assert_eq!(ctx.state(), &after_first);
    assert!(!ctx.state().find_board(&BoardId::from(second.as_str())).unwrap().archived);
    assert!(ctx.state().is_consistent());
}

#[test_log::test]
fn test_delete_column_cascade() {
    let mut ctx = fresh();
    let board_id = ctx.state().boards[0].id.clone();
    let col = ctx
        .process(&AddColumn::new(board_id.clone(), "Blocked"))
        .unwrap();
    let col = col["id"].as_str().unwrap().to_string();
    add(&mut ctx, col.as_str(), "stuck 1");
    add(&mut ctx, col.as_str(), "stuck 2");
    add(&mut ctx, "todo", "free");

    ctx.process(&DeleteColumn::new(board_id, col.as_str())).unwrap();

    let board = ctx.state().active_board().unwrap();
    assert_eq!(board.columns.len(), 3);
    assert!(!board.tasks.contains_key(&ColumnId::from(col.as_str())));
    assert_eq!(board.task_count(), 1);
    assert!(board.is_consistent());
}

#[test_log::test]
fn test_legacy_blob_migration() {
    let legacy = r#"{"todo":[{"id":"a","text":"one"}],"doing":[{"id":"b","text":"two","priority":"high"}],"done":[]}"#;
    let storage = MemoryStorage::new().with_entry(LEGACY_TASKS_KEY, legacy);
    let ctx = KanbanContext::open(storage, CollectingNotifier::new()).unwrap();

    let state = ctx.state();
    assert_eq!(state.boards.len(), 1);
    let board = &state.boards[0];
    assert_eq!(board.id, "board-1");
    assert_eq!(board.title, "Personal Board");
    assert_eq!(board.columns.len(), 3);
    assert_eq!(ids(&ctx, "todo"), vec!["a"]);
    assert_eq!(ids(&ctx, "doing"), vec!["b"]);
    assert_eq!(board.tasks_in(&ColumnId::from("doing"))[0].priority, Priority::High);

    // Persisted immediately, and persisting again changes nothing
    let saved = ctx.storage().load(BOARDS_KEY).unwrap().unwrap();
    assert_eq!(saved, serialize_state(state).unwrap());
    let reopened = KanbanContext::open(
        MemoryStorage::new().with_entry(BOARDS_KEY, saved.as_str()),
        CollectingNotifier::new(),
    )
    .unwrap();
    assert_eq!(serialize_state(reopened.state()).unwrap(), saved);
}

#[test_log::test]
fn test_reorder_preserves_counts() {
    let mut ctx = fresh();
    let ids_added: Vec<String> = (0..5).map(|i| add(&mut ctx, "todo", &format!("t{i}"))).collect();

    ctx.process(&MoveTask::new(ids_added[4].as_str(), ids_added[0].as_str()))
        .unwrap();
    ctx.process(&MoveTask::new(ids_added[1].as_str(), ids_added[3].as_str()))
        .unwrap();

    let mut after = ids(&ctx, "todo");
    assert_eq!(after.len(), 5);
    assert_eq!(after[0], ids_added[4]);
    after.sort();
    let mut expected = ids_added.clone();
    expected.sort();
    assert_eq!(after, expected);
}

#[test_log::test]
fn test_invariants_hold_through_a_session() {
    let mut ctx = fresh();
    let check = |ctx: &KanbanContext| {
        let state: &AppState = ctx.state();
        assert!(state.is_consistent(), "inconsistent state: {state:?}");
    };

    ctx.process(&CreateBoard::new("Work").with_type(BoardType::Advanced))
        .unwrap();
    check(&ctx);
    let work = ctx.state().active_board.clone().unwrap();
    let review = ctx.process(&AddColumn::new(work.clone(), "Review")).unwrap();
    let review = review["id"].as_str().unwrap().to_string();
    check(&ctx);

    let a = add(&mut ctx, "todo", "a");
    let b = add(&mut ctx, "todo", "b");
    let c = add(&mut ctx, review.as_str(), "c");
    ctx.process(&MoveTask::new(a.as_str(), c.as_str())).unwrap();
    ctx.process(&MoveTask::new(b.as_str(), "done")).unwrap();
    ctx.process(&UpdateTask::new("done", b.as_str()).with_priority(Priority::High))
        .unwrap();
    check(&ctx);

    // Cannot go standard with four columns
    let switched = ctx.process(&UpdateBoard::new(work.clone()).with_type(BoardType::Standard));
    assert!(matches!(switched, Err(KanbanError::TypeSwitch { .. })));

    ctx.process(&ClearCompleted::new()).unwrap();
    ctx.process(&DeleteTask::new(review.as_str(), c.as_str())).unwrap();
    ctx.process(&DeleteColumn::new(work.clone(), review.as_str())).unwrap();
    check(&ctx);

    ctx.process(&SelectBoard::new("board-1")).unwrap();
    ctx.process(&ArchiveBoard::new("board-1")).unwrap();
    assert_eq!(ctx.state().active_board.as_ref(), Some(&work));
    ctx.process(&UnarchiveBoard::new("board-1")).unwrap();
    assert_eq!(ctx.state().active_board.as_ref(), Some(&work));
    ctx.process(&DeleteBoard::new(work.clone())).unwrap();
    check(&ctx);
    assert_eq!(ctx.state().active_board.as_ref().map(|id| id.as_str()), Some("board-1"));

    // Only a, moved into the review column, was lost with it
    assert_eq!(ctx.state().boards.len(), 1);
}

#[test_log::test]
fn test_noop_moves_leave_state_untouched() {
    let mut ctx = fresh();
    let a = add(&mut ctx, "todo", "a");
    let before = ctx.state().clone();
    let logged = ctx.activity(None).len();

    ctx.process(&MoveTask::new("ghost", "doing")).unwrap();
    ctx.process(&MoveTask::new(a.as_str(), "nowhere")).unwrap();
    ctx.process(&MoveTask::new(a.as_str(), a.as_str())).unwrap();

    assert_eq!(ctx.state(), &before);
    assert_eq!(ctx.activity(None).len(), logged);
}
