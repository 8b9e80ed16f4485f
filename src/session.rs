//! The handle the presentation layer talks to.
//!
//! A [`Session`] owns one loaded [`TaskStore`] and the [`TaskFile`] it came
//! from. Every mutating call runs the operation and then writes the whole
//! store back before returning; if either step fails the in-memory store is
//! restored to what it was before the call.

use std::path::Path;

use crate::io::lock::{FileLock, LockError};
use crate::io::store_io::{StoreError, TaskFile};
use crate::model::store::TaskStore;
use crate::model::task::{Locale, SortMode, TaskRecord};
use crate::ops::category_ops::{self, CategoryError, CategoryStats};
use crate::ops::search::{self, SearchHit};
use crate::ops::task_ops::{self, TaskError};

/// Error type for session calls
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("task not found: {0:?}")]
    NotFound(String),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lock(#[from] LockError),
}

#[derive(Debug)]
pub struct Session {
    store: TaskStore,
    file: TaskFile,
    locale: Locale,
    _lock: Option<FileLock>,
}

impl Session {
    /// Load the store from `file`.
    pub fn open(file: TaskFile, locale: Locale) -> Result<Self, SessionError> {
        let store = file.load()?;
        Ok(Session {
            store,
            file,
            locale,
            _lock: None,
        })
    }

    /// Take the file's write lock, then load. The lock is held until the
    /// session is dropped, so no other process can write in between.
    pub fn open_locked(file: TaskFile, locale: Locale) -> Result<Self, SessionError> {
        let lock = FileLock::acquire_default(file.path())?;
        let mut session = Session::open(file, locale)?;
        session._lock = Some(lock);
        Ok(session)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    /// Create an empty category; returns the (trimmed) stored name.
    pub fn create_category(&mut self, name: &str) -> Result<String, SessionError> {
        let created = self.mutate(|store| Ok(category_ops::create_category(store, name)?))?;
        tracing::info!(category = %created, "category created");
        Ok(created)
    }

    /// Remove a category and its tasks.
    pub fn remove_category(&mut self, name: &str) -> Result<usize, SessionError> {
        let removed = self.mutate(|store| Ok(category_ops::remove_category(store, name)?))?;
        tracing::info!(category = name, tasks = removed.len(), "category removed");
        Ok(removed.len())
    }

    /// Category names in creation order
    pub fn categories(&self) -> Vec<String> {
        self.store.category_names().map(str::to_string).collect()
    }

    pub fn category_stats(&self) -> Vec<CategoryStats> {
        category_ops::all_stats(&self.store)
    }

    /// Percentage of completed tasks in a category; 0 when it is empty.
    pub fn completion_rate(&self, category: &str) -> Result<f64, SessionError> {
        Ok(category_ops::category_stats(&self.store, category)?.completion_rate)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Validate and append a task to a category. Returns the stored record.
    pub fn add_task(
        &mut self,
        category: &str,
        description: &str,
        priority: &str,
        date: &str,
        completed: bool,
    ) -> Result<TaskRecord, SessionError> {
        let mut task = task_ops::new_task(description, priority, date, self.locale)?;
        task.completed = completed;
        let stored = task.clone();
        self.mutate(|store| Ok(task_ops::add_task(store, category, task)?))?;
        tracing::debug!(category, description, "task added");
        Ok(stored)
    }

    /// Remove the first task with this description from a category.
    pub fn delete_task(
        &mut self,
        category: &str,
        description: &str,
    ) -> Result<Option<TaskRecord>, SessionError> {
        let removed =
            self.mutate(|store| Ok(task_ops::delete_task(store, category, description)?))?;
        if removed.is_none() {
            tracing::warn!(category, description, "no task to delete");
        }
        Ok(removed)
    }

    /// Mark the first matching task done in every category.
    /// Returns the number of tasks marked.
    pub fn mark_done(&mut self, description: &str) -> Result<usize, SessionError> {
        let marked = self.mutate(|store| Ok(task_ops::mark_done(store, description)))?;
        if marked == 0 {
            tracing::warn!(description, "no task to mark done");
        }
        Ok(marked)
    }

    /// Snapshot of a category's tasks; empty for an unknown category.
    pub fn list_category(&self, category: &str) -> Vec<TaskRecord> {
        task_ops::list_category(&self.store, category)
    }

    /// Reorder a category and persist the new order.
    pub fn sort_category(&mut self, category: &str, mode: SortMode) -> Result<(), SessionError> {
        self.mutate(|store| Ok(task_ops::sort_category(store, category, mode)?))
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// First task whose description contains `text`, ignoring case.
    pub fn search(&self, text: &str) -> Result<SearchHit, SessionError> {
        search::search_description(&self.store, text).ok_or_else(|| {
            tracing::warn!(text, "search found nothing");
            SessionError::NotFound(text.to_string())
        })
    }

    pub fn uncompleted_tasks(&self) -> Vec<TaskRecord> {
        search::uncompleted_tasks(&self.store)
    }

    pub fn completed_tasks(&self) -> Vec<TaskRecord> {
        search::completed_tasks(&self.store)
    }

    /// Drop every category and persist the empty store.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.mutate(|store| {
            store.clear();
            Ok(())
        })?;
        tracing::info!(path = %self.file.path().display(), "store reset");
        Ok(())
    }

    /// Run `op` against the store and save. On any failure the store is
    /// put back as it was.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut TaskStore) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let before = self.store.clone();
        let result = op(&mut self.store).and_then(|value| {
            self.file.save(&self.store)?;
            Ok(value)
        });
        if result.is_err() {
            self.store = before;
        }
        result
    }
}
