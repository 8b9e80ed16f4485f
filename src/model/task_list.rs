use serde::{Deserialize, Serialize};

use super::task::TaskRecord;

/// A sort key could not be computed for one of the records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("unrecognised priority label {label:?} on task {description:?}")]
    InvalidPriorityLabel { description: String, label: String },
    #[error("invalid date {date:?} on task {description:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat { description: String, date: String },
}

/// Ordered tasks of one category.
///
/// Insertion order is the iteration order until a sort is applied. Lookups by
/// description are linear scans that act on the first match only, so
/// duplicate descriptions are allowed and only the earliest one is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<TaskRecord>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    /// Append a record at the end. No uniqueness check.
    pub fn add(&mut self, record: TaskRecord) {
        self.tasks.push(record);
    }

    /// Snapshot of all records in current order
    pub fn find_all(&self) -> Vec<TaskRecord> {
        self.tasks.clone()
    }

    /// Borrowing view of the records in current order
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Mark the first record with this description completed.
    /// Returns whether a record matched.
    pub fn mark_done(&mut self, description: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.description == description) {
            Some(task) => {
                task.completed = true;
                true
            }
            None => false,
        }
    }

    /// Remove the first record with this description, keeping the rest in order.
    /// Returns the removed record.
    pub fn remove(&mut self, description: &str) -> Option<TaskRecord> {
        let idx = self.tasks.iter().position(|t| t.description == description)?;
        Some(self.tasks.remove(idx))
    }

    /// Stable sort, ascending by calendar date.
    /// Leaves the list untouched if any date fails to parse.
    pub fn sort_by_date(&mut self) -> Result<(), SortError> {
        self.sort_by_computed_key(|t| {
            t.due_date().ok_or_else(|| SortError::InvalidDateFormat {
                description: t.description.clone(),
                date: t.date.clone(),
            })
        })
    }

    /// Stable sort, descending by priority rank (High, Medium, Low).
    /// Leaves the list untouched if any label is unrecognised.
    pub fn sort_by_priority(&mut self) -> Result<(), SortError> {
        self.sort_by_computed_key(|t| {
            t.priority_level()
                .map(|p| std::cmp::Reverse(p.rank()))
                .ok_or_else(|| SortError::InvalidPriorityLabel {
                    description: t.description.clone(),
                    label: t.priority.clone(),
                })
        })
    }

    /// Stable sort, ascending by description using byte-wise comparison.
    pub fn sort_alphabetically(&mut self) {
        self.tasks.sort_by(|a, b| a.description.as_bytes().cmp(b.description.as_bytes()));
    }

    /// Compute every key first so a failure leaves the order intact, then
    /// reorder with the stable `sort_by_key`.
    fn sort_by_computed_key<K, F>(&mut self, key: F) -> Result<(), SortError>
    where
        K: Ord,
        F: Fn(&TaskRecord) -> Result<K, SortError>,
    {
        let keys = self.tasks.iter().map(&key).collect::<Result<Vec<K>, _>>()?;
        let mut keyed: Vec<(K, TaskRecord)> = keys.into_iter().zip(self.tasks.drain(..)).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        self.tasks = keyed.into_iter().map(|(_, t)| t).collect();
        Ok(())
    }
}

impl FromIterator<TaskRecord> for TaskList {
    fn from_iter<I: IntoIterator<Item = TaskRecord>>(iter: I) -> Self {
        let mut list = TaskList::new();
        for record in iter {
            list.add(record);
        }
        list
    }
}

/// Count of completed records and completion percentage (0 when empty)
pub fn completion(tasks: &[TaskRecord]) -> (usize, f64) {
    let done = tasks.iter().filter(|t| t.completed).count();
    if tasks.is_empty() {
        return (0, 0.0);
    }
    (done, done as f64 / tasks.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(desc: &str, pri: &str, date: &str) -> TaskRecord {
        TaskRecord::new(desc, pri, date)
    }

    fn descriptions(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.description.as_str()).collect()
    }

    fn sample() -> TaskList {
        [
            task("Buy milk", "Low", "2024-01-05"),
            task("Write report", "High", "2024-01-01"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut list = TaskList::new();
        for name in ["c", "a", "b", "a"] {
            list.add(task(name, "Low", "2024-01-01"));
        }
        assert_eq!(descriptions(&list), vec!["c", "a", "b", "a"]);
        assert_eq!(list.find_all().len(), 4);
    }

    #[test]
    fn test_find_all_is_a_snapshot() {
        let mut list = sample();
        let snapshot = list.find_all();
        list.mark_done("Buy milk");
        assert!(!snapshot[0].completed);
        assert!(list.tasks()[0].completed);
    }

    #[test]
    fn test_mark_done_first_match_only() {
        let mut list = TaskList::new();
        list.add(task("dup", "Low", "2024-01-01"));
        list.add(task("dup", "High", "2024-01-02"));
        assert!(list.mark_done("dup"));
        assert!(list.tasks()[0].completed);
        assert!(!list.tasks()[1].completed);
    }

    #[test]
    fn test_mark_done_idempotent() {
        let mut list = sample();
        list.mark_done("Write report");
        let after_first = list.clone();
        list.mark_done("Write report");
        assert_eq!(list, after_first);
    }

    #[test]
    fn test_mark_done_miss_is_noop() {
        let mut list = sample();
        let before = list.clone();
        assert!(!list.mark_done("nothing"));
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_first_duplicate() {
        let mut list = TaskList::new();
        list.add(task("x", "Low", "2024-01-01"));
        list.add(task("dup", "Low", "2024-01-02"));
        list.add(task("y", "Low", "2024-01-03"));
        list.add(task("dup", "High", "2024-01-04"));
        let removed = list.remove("dup").unwrap();
        assert_eq!(removed.date, "2024-01-02");
        assert_eq!(list.len(), 3);
        assert_eq!(descriptions(&list), vec!["x", "y", "dup"]);
        assert_eq!(list.tasks()[2].priority, "High");
    }

    #[test]
    fn test_remove_head_and_miss() {
        let mut list = sample();
        assert!(list.remove("Buy milk").is_some());
        assert_eq!(descriptions(&list), vec!["Write report"]);
        assert!(list.remove("Buy milk").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_sort_by_date_example() {
        let mut list = sample();
        list.sort_by_date().unwrap();
        assert_eq!(descriptions(&list), vec!["Write report", "Buy milk"]);
    }

    #[test]
    fn test_sort_by_priority_example() {
        let mut list = sample();
        list.sort_by_priority().unwrap();
        assert_eq!(descriptions(&list), vec!["Write report", "Buy milk"]);
    }

    #[test]
    fn test_sort_by_priority_mixed_locales() {
        let mut list: TaskList = [
            task("a", "منخفض", "2024-01-01"),
            task("b", "Medium", "2024-01-01"),
            task("c", "عالي", "2024-01-01"),
        ]
        .into_iter()
        .collect();
        list.sort_by_priority().unwrap();
        assert_eq!(descriptions(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sorts_are_stable() {
        let mut list: TaskList = [
            task("b", "High", "2024-02-01"),
            task("a", "Low", "2024-01-01"),
            task("c", "High", "2024-02-01"),
            task("d", "Low", "2024-01-01"),
        ]
        .into_iter()
        .collect();

        let mut by_date = list.clone();
        by_date.sort_by_date().unwrap();
        assert_eq!(descriptions(&by_date), vec!["a", "d", "b", "c"]);

        list.sort_by_priority().unwrap();
        assert_eq!(descriptions(&list), vec!["b", "c", "a", "d"]);

        let mut same: TaskList = [
            TaskRecord { completed: true, ..task("same", "Low", "2024-01-01") },
            task("same", "High", "2024-01-02"),
        ]
        .into_iter()
        .collect();
        same.sort_alphabetically();
        assert!(same.tasks()[0].completed);
        assert_eq!(same.tasks()[1].priority, "High");
    }

    #[test]
    fn test_sort_alphabetically_is_bytewise() {
        let mut list: TaskList = [
            task("banana", "Low", "2024-01-01"),
            task("Cherry", "Low", "2024-01-01"),
            task("apple", "Low", "2024-01-01"),
            task("Été", "Low", "2024-01-01"),
        ]
        .into_iter()
        .collect();
        list.sort_alphabetically();
        // Uppercase ASCII sorts before lowercase; non-ASCII after both
        assert_eq!(descriptions(&list), vec!["Cherry", "apple", "banana", "Été"]);
    }

    #[test]
    fn test_sort_by_date_invalid_is_error_and_untouched() {
        let mut list = sample();
        list.add(task("Bad", "Low", "2024/01/03"));
        let before = list.clone();
        let err = list.sort_by_date().unwrap_err();
        assert_eq!(
            err,
            SortError::InvalidDateFormat {
                description: "Bad".into(),
                date: "2024/01/03".into(),
            }
        );
        assert_eq!(list, before);

        let mut signed = sample();
        signed.add(task("Signed", "Low", "+2024-01-03"));
        assert!(matches!(
            signed.sort_by_date(),
            Err(SortError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_sort_by_priority_unknown_label() {
        let mut list = sample();
        list.add(task("Odd", "Urgent", "2024-01-03"));
        let before = list.clone();
        assert!(matches!(
            list.sort_by_priority(),
            Err(SortError::InvalidPriorityLabel { ref label, .. }) if label == "Urgent"
        ));
        assert_eq!(list, before);
    }

    #[test]
    fn test_completion() {
        let mut list = sample();
        assert_eq!(completion(list.tasks()), (0, 0.0));
        list.mark_done("Buy milk");
        assert_eq!(completion(list.tasks()), (1, 50.0));
        assert_eq!(completion(&[]), (0, 0.0));
    }
}
