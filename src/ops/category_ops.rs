use crate::model::store::TaskStore;
use crate::model::task_list::{TaskList, completion};

/// Error type for category operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("category already exists or has an empty name: {0:?}")]
    DuplicateCategory(String),
    #[error("category not found: {0}")]
    UnknownCategory(String),
}

/// Completion summary for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    /// Percentage of completed tasks, 0 for an empty category
    pub completion_rate: f64,
}

/// Create an empty category. The name is trimmed before use.
/// Returns the name as stored.
pub fn create_category(store: &mut TaskStore, name: &str) -> Result<String, CategoryError> {
    let name = name.trim();
    if name.is_empty() || store.contains(name) {
        return Err(CategoryError::DuplicateCategory(name.to_string()));
    }
    store.insert(name.to_string(), TaskList::new());
    Ok(name.to_string())
}

/// Remove a category and all of its tasks.
pub fn remove_category(store: &mut TaskStore, name: &str) -> Result<TaskList, CategoryError> {
    store
        .remove(name)
        .ok_or_else(|| CategoryError::UnknownCategory(name.to_string()))
}

/// Look up a category's list, failing with `UnknownCategory`.
pub fn require_category<'a>(
    store: &'a mut TaskStore,
    name: &str,
) -> Result<&'a mut TaskList, CategoryError> {
    store
        .get_mut(name)
        .ok_or_else(|| CategoryError::UnknownCategory(name.to_string()))
}

/// Completion summary for one category.
pub fn category_stats(store: &TaskStore, name: &str) -> Result<CategoryStats, CategoryError> {
    let list = store
        .get(name)
        .ok_or_else(|| CategoryError::UnknownCategory(name.to_string()))?;
    Ok(stats_for(name, list))
}

/// Completion summaries for every category, in creation order.
pub fn all_stats(store: &TaskStore) -> Vec<CategoryStats> {
    store.iter().map(|(name, list)| stats_for(name, list)).collect()
}

fn stats_for(name: &str, list: &TaskList) -> CategoryStats {
    let (completed, completion_rate) = completion(list.tasks());
    CategoryStats {
        name: name.to_string(),
        total: list.len(),
        completed,
        completion_rate,
    }
}
