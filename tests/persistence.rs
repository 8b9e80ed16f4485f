//! Round-trip and scenario tests for the task file, driven through the
//! public library API.

use std::fs;

use pretty_assertions::assert_eq;
use tasknest::io::store_io::{TaskFile, parse_store, serialize_store};
use tasknest::model::{Locale, SortMode, TaskList, TaskRecord, TaskStore};
use tasknest::session::Session;
use tempfile::TempDir;

fn record(description: &str, priority: &str, date: &str, completed: bool) -> TaskRecord {
    TaskRecord {
        description: description.to_string(),
        priority: priority.to_string(),
        date: date.to_string(),
        completed,
    }
}

fn mixed_store() -> TaskStore {
    let mut store = TaskStore::new();
    store.insert(
        "Work".into(),
        [
            record("Write report", "High", "2024-01-01", false),
            record("Write report", "Low", "2024-01-09", true),
            record("  padded  ", "Medium", "2024-02-29", false),
        ]
        .into_iter()
        .collect(),
    );
    store.insert("Empty".into(), TaskList::new());
    store.insert(
        "طالب".into(),
        [
            record("واجب منزلي", "عالي", "2024-03-01", false),
            record("Quote \"and\" backslash \\", "منخفض", "not-a-date", true),
        ]
        .into_iter()
        .collect(),
    );
    store
}

#[test]
fn save_then_load_reproduces_store() {
    let tmp = TempDir::new().unwrap();
    let file = TaskFile::new(tmp.path().join("tasks.json"));
    let store = mixed_store();

    file.save(&store).unwrap();
    let loaded = file.load().unwrap();

    assert_eq!(loaded, store);
    assert_eq!(
        loaded.category_names().collect::<Vec<_>>(),
        vec!["Work", "Empty", "طالب"]
    );
}

#[test]
fn saved_document_is_stable_across_cycles() {
    let first = serialize_store(&mixed_store()).unwrap();
    let second = serialize_store(&parse_store(&first).unwrap()).unwrap();
    assert_eq!(second, first);
}

#[test]
fn document_written_by_hand_survives_a_cycle() {
    let source = "\
{
    \"Home\": [
        {
            \"description\": \"Clean\",
            \"priority\": \"Medium\",
            \"date\": \"2024-05-01\",
            \"completed\": false
        }
    ],
    \"مشاريع\": []
}
";
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.json");
    fs::write(&path, source).unwrap();

    let file = TaskFile::new(&path);
    let store = file.load().unwrap();
    file.save(&store).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), source);
}

#[test]
fn uncompleted_view_spans_categories_in_order() {
    let tmp = TempDir::new().unwrap();
    let mut session =
        Session::open(TaskFile::new(tmp.path().join("tasks.json")), Locale::English).unwrap();
    session.create_category("Work").unwrap();
    session.create_category("Home").unwrap();
    session.add_task("Work", "A", "High", "2024-01-01", false).unwrap();
    session.add_task("Work", "B", "Low", "2024-01-02", true).unwrap();
    session.add_task("Home", "C", "Medium", "2024-01-03", false).unwrap();

    let pending: Vec<String> = session
        .uncompleted_tasks()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(pending, vec!["A", "C"]);

    let done: Vec<String> = session
        .completed_tasks()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(done, vec!["B"]);
}

#[test]
fn sorted_order_is_what_gets_saved() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.json");
    let mut session = Session::open(TaskFile::new(&path), Locale::English).unwrap();
    session.create_category("Work").unwrap();
    session.add_task("Work", "Buy milk", "Low", "2024-01-05", false).unwrap();
    session.add_task("Work", "Write report", "High", "2024-01-01", false).unwrap();

    session.sort_category("Work", SortMode::Date).unwrap();
    drop(session);

    let reopened = Session::open(TaskFile::new(&path), Locale::English).unwrap();
    let order: Vec<String> = reopened
        .list_category("Work")
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(order, vec!["Write report", "Buy milk"]);
}

#[test]
fn search_matches_substring_ignoring_case() {
    let tmp = TempDir::new().unwrap();
    let mut session =
        Session::open(TaskFile::new(tmp.path().join("tasks.json")), Locale::English).unwrap();
    session.create_category("Work").unwrap();
    session.add_task("Work", "Buy milk", "Low", "2024-01-05", false).unwrap();
    session.add_task("Work", "Write report", "High", "2024-01-01", false).unwrap();

    let hit = session.search("repo").unwrap();
    assert_eq!(hit.category, "Work");
    assert_eq!(hit.task.description, "Write report");
}

#[test]
fn reset_then_load_is_empty() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.json");
    let file = TaskFile::new(&path);
    file.save(&mixed_store()).unwrap();

    let mut session = Session::open(file.clone(), Locale::English).unwrap();
    assert_eq!(session.categories().len(), 3);
    session.reset().unwrap();

    let loaded = file.load().unwrap();
    assert!(loaded.is_empty());
    assert_eq!(loaded.category_names().count(), 0);
}

#[test]
fn malformed_file_is_not_replaced() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tasks.json");
    let broken = r#"{"Work": [{"description": "x", "priority": "High"}]}"#;
    fs::write(&path, broken).unwrap();

    assert!(Session::open(TaskFile::new(&path), Locale::English).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}
