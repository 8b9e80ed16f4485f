use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::task_list::TaskList;

/// All categories and their task lists, in creation order.
///
/// Serialises as a JSON object whose keys are category names and whose
/// values are arrays of task records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    categories: IndexMap<String, TaskList>,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::default()
    }

    /// Category names in creation order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(|k| k.as_str())
    }

    /// `(name, list)` pairs in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaskList)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut TaskList)> {
        self.categories.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&TaskList> {
        self.categories.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TaskList> {
        self.categories.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Insert or replace a category's list. Replacing keeps the original position.
    pub fn insert(&mut self, name: String, list: TaskList) {
        self.categories.insert(name, list);
    }

    /// Remove a category, keeping the remaining ones in order
    pub fn remove(&mut self, name: &str) -> Option<TaskList> {
        self.categories.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of tasks across all categories
    pub fn task_count(&self) -> usize {
        self.categories.values().map(TaskList::len).sum()
    }
}
