use crate::model::store::TaskStore;
use crate::model::task::TaskRecord;

/// A task found by description search, with the category it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub category: String,
    pub task: TaskRecord,
}

/// Case-insensitive substring search on descriptions.
///
/// Categories are scanned in creation order and the first matching task of the
/// first category with any match is returned; later matches are not reported.
/// Blank search text never matches.
pub fn search_description(store: &TaskStore, text: &str) -> Option<SearchHit> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    store.iter().find_map(|(category, list)| {
        list.tasks()
            .iter()
            .find(|t| t.description.to_lowercase().contains(&needle))
            .map(|task| SearchHit {
                category: category.to_string(),
                task: task.clone(),
            })
    })
}

/// All tasks not yet completed, across categories in creation order.
pub fn uncompleted_tasks(store: &TaskStore) -> Vec<TaskRecord> {
    collect_by_completion(store, false)
}

/// All completed tasks, across categories in creation order.
pub fn completed_tasks(store: &TaskStore) -> Vec<TaskRecord> {
    collect_by_completion(store, true)
}

fn collect_by_completion(store: &TaskStore, completed: bool) -> Vec<TaskRecord> {
    store
        .iter()
        .flat_map(|(_, list)| list.tasks().iter())
        .filter(|t| t.completed == completed)
        .cloned()
        .collect()
}
