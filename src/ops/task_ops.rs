use crate::model::store::TaskStore;
use crate::model::task::{Locale, Priority, SortMode, TaskRecord, parse_date};
use crate::model::task_list::SortError;
use crate::ops::category_ops::{CategoryError, require_category};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task description is empty")]
    EmptyDescription,
    #[error("unrecognised priority: {0:?} (expected high, medium or low)")]
    InvalidPriority(String),
    #[error("invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Sort(#[from] SortError),
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build a validated record from user input.
///
/// The priority may be given in either locale or as an English keyword; it is
/// stored with the label of `locale`. The date must be `YYYY-MM-DD`.
pub fn new_task(
    description: &str,
    priority: &str,
    date: &str,
    locale: Locale,
) -> Result<TaskRecord, TaskError> {
    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    let level =
        Priority::parse_input(priority).ok_or_else(|| TaskError::InvalidPriority(priority.into()))?;
    if parse_date(date).is_none() {
        return Err(TaskError::InvalidDate(date.to_string()));
    }
    Ok(TaskRecord::new(description, level.label(locale), date))
}

// ---------------------------------------------------------------------------
// Per-category operations
// ---------------------------------------------------------------------------

/// Append a task to a category.
pub fn add_task(store: &mut TaskStore, category: &str, task: TaskRecord) -> Result<(), TaskError> {
    require_category(store, category)?.add(task);
    Ok(())
}

/// Remove the first task with this description from a category.
/// A missing description is not an error; the removed record is returned if any.
pub fn delete_task(
    store: &mut TaskStore,
    category: &str,
    description: &str,
) -> Result<Option<TaskRecord>, TaskError> {
    Ok(require_category(store, category)?.remove(description))
}

/// Reorder a category's tasks.
pub fn sort_category(store: &mut TaskStore, category: &str, mode: SortMode) -> Result<(), TaskError> {
    let list = require_category(store, category)?;
    match mode {
        SortMode::Date => list.sort_by_date()?,
        SortMode::Priority => list.sort_by_priority()?,
        SortMode::Alphabetical => list.sort_alphabetically(),
    }
    Ok(())
}

/// Snapshot of a category's tasks; empty if the category does not exist.
pub fn list_category(store: &TaskStore, category: &str) -> Vec<TaskRecord> {
    store
        .get(category)
        .map(|list| list.find_all())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Cross-category operations
// ---------------------------------------------------------------------------

/// Mark the first task with this description done in every category.
/// Returns the number of categories in which a task was marked.
pub fn mark_done(store: &mut TaskStore, description: &str) -> usize {
    store
        .iter_mut()
        .map(|(_, list)| list.mark_done(description))
        .filter(|marked| *marked)
        .count()
}
