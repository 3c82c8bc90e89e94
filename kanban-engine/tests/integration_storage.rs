//! Integration tests for file-backed persistence and migration on load

use kanban_engine::storage::{BOARDS_KEY, LEGACY_TASKS_KEY, TAGS_KEY};
use kanban_engine::{
    board::CreateBoard,
    column::AddColumn,
    tag::{AddTag, DeleteTag},
    task::{AddTask, MoveTask},
    BoardType, ColumnId, FileStorage, KanbanContext, StorageAdapter, TagId, TracingNotifier,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> KanbanContext {
    KanbanContext::open(FileStorage::new(dir.path()), TracingNotifier).unwrap()
}

#[test_log::test]
fn test_state_survives_reopen() {
    let temp = TempDir::new().unwrap();

    let board_id = {
        let mut ctx = open(&temp);
        let created = ctx
            .process(&CreateBoard::new("Project").with_type(BoardType::Advanced))
            .unwrap();
        let board_id = created["id"].as_str().unwrap().to_string();
        let column = ctx.process(&AddColumn::new(board_id.as_str(), "Review")).unwrap();
        let task = ctx.process(&AddTask::new("todo", "Write docs")).unwrap();
        ctx.process(&MoveTask::new(
            task["id"].as_str().unwrap(),
            column["id"].as_str().unwrap(),
        ))
        .unwrap();
        board_id
    };

    assert!(temp.path().join("kanban-boards.json").exists());

    let ctx = open(&temp);
    let state = ctx.state();
    assert_eq!(state.boards.len(), 2);
    assert_eq!(state.active_board.as_ref().map(|id| id.as_str()), Some(board_id.as_str()));

    let board = state.active_board().unwrap();
    assert_eq!(board.columns.len(), 4);
    let review = &board.columns[3].id;
    assert_eq!(board.tasks_in(review)[0].text, "Write docs");
    assert_eq!(board.tasks_in(review)[0].column_id, *review);
    assert!(state.is_consistent());
}

#[test_log::test]
fn test_reopen_does_not_rewrite_current_state() {
    let temp = TempDir::new().unwrap();
    {
        let mut ctx = open(&temp);
        ctx.process(&AddTask::new("todo", "x")).unwrap();
    }
    let storage = FileStorage::new(temp.path());
    let before = storage.load(BOARDS_KEY).unwrap().unwrap();

    let ctx = open(&temp);
    let after = ctx.storage().load(BOARDS_KEY).unwrap().unwrap();
    assert_eq!(before, after);
}

#[test_log::test]
fn test_legacy_file_is_migrated_and_persisted() {
    let temp = TempDir::new().unwrap();
    let mut storage = FileStorage::new(temp.path());
    storage
        .save(
            LEGACY_TASKS_KEY,
            r#"{"todo":[{"id":1,"text":"Old task","columnId":"todo"}],"doing":[],"done":[]}"#,
        )
        .unwrap();

    let ctx = open(&temp);
    let board = ctx.state().active_board().unwrap();
    assert_eq!(board.title, "Personal Board");
    assert_eq!(board.tasks_in(&ColumnId::from("todo"))[0].text, "Old task");

    let saved = storage.load(BOARDS_KEY).unwrap().unwrap();
    assert!(saved.contains("Old task"));
}

#[test_log::test]
fn test_tag_registry_persists_separately() {
    let temp = TempDir::new().unwrap();
    let kept_id = {
        let mut ctx = open(&temp);
        let bug = ctx.process_tags(&AddTag::new("bug")).unwrap();
        let kept = ctx.process_tags(&AddTag::new("feature").with_color("lime")).unwrap();
        ctx.process_tags(&DeleteTag::new(bug["id"].as_str().unwrap())).unwrap();
        kept["id"].as_str().unwrap().to_string()
    };

    assert!(temp.path().join("kanban-tags.json").exists());
    let ctx = open(&temp);
    assert_eq!(ctx.tags().len(), 1);
    let tag = ctx.tags().get(&TagId::from(kept_id.as_str())).unwrap();
    assert_eq!(tag.label, "feature");
    assert_eq!(tag.color, "lime");

    let raw = ctx.storage().load(TAGS_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));
}
