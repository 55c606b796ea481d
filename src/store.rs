// In-memory task store with a filtered, date-sorted view

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::filter::Filter;
use crate::models::{Task, TaskId, parse_date};
use chrono::NaiveDate;
use tracing::debug;

/// Owner of every task and of the current view filter
///
/// Insertion order is kept and only used to break ties between tasks that
/// share a due date.
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
    next_id: u64,
    clock: Box<dyn Clock>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Empty store reading "today" from the local system clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Empty store with an injected date source
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            tasks: Vec::new(),
            filter: Filter::default(),
            next_id: 1,
            clock,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a pending task from raw input
    ///
    /// `text` is trimmed and must not be empty. `due_date` must be a
    /// `YYYY-MM-DD` date. Nothing is stored when either check fails.
    pub fn add(&mut self, text: &str, due_date: &str) -> Result<Task, StoreError> {
        let text = Self::validate_text(text)?;
        let due_date = Self::validate_due_date(due_date)?;
        Ok(self.insert(text, due_date))
    }

    /// Create a pending task with an already parsed due date
    pub fn add_dated(&mut self, text: &str, due_date: NaiveDate) -> Result<Task, StoreError> {
        let text = Self::validate_text(text)?;
        Ok(self.insert(text, due_date))
    }

    /// Flip a task between pending and completed, returning the updated task
    pub fn toggle(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))?;

        task.toggle_status();
        debug!(id = %id, status = %task.status(), "toggle: status changed");

        Ok(task.clone())
    }

    /// Delete a task
    pub fn remove(&mut self, id: TaskId) -> Result<(), StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.tasks.remove(index);
        debug!(id = %id, text = removed.text(), remaining = self.tasks.len(), "remove: task deleted");

        Ok(())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(from = %self.filter, to = %filter, "set_filter");
        self.filter = filter;
    }

    /// Select a filter by name; unknown names leave the current filter in place
    pub fn set_filter_named(&mut self, name: &str) -> Result<(), StoreError> {
        let filter = name.parse()?;
        self.set_filter(filter);
        Ok(())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Tasks passing the current filter, ascending by due date
    ///
    /// Equal due dates keep insertion order. Overdue flags are evaluated
    /// against the store's clock when the view is built.
    pub fn view(&self) -> View<'_> {
        let mut entries: Vec<&Task> = self.tasks.iter().filter(|t| self.filter.matches(t)).collect();
        entries.sort_by_key(|t| t.due_date());

        View {
            entries,
            today: self.clock.today(),
            filter: self.filter,
            total: self.tasks.len(),
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// All tasks in insertion order, unfiltered
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Current calendar day according to the store's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn insert(&mut self, text: String, due_date: NaiveDate) -> Task {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task::new(id, text, due_date);
        self.tasks.push(task.clone());
        debug!(id = %id, due_date = %due_date, count = self.tasks.len(), "add: task created");

        task
    }

    fn validate_text(text: &str) -> Result<String, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::Validation("task text cannot be empty".to_string()));
        }
        Ok(text.to_string())
    }

    fn validate_due_date(due_date: &str) -> Result<NaiveDate, StoreError> {
        if due_date.trim().is_empty() {
            return Err(StoreError::Validation("due date is required".to_string()));
        }
        parse_date(due_date).map_err(|e| {
            StoreError::Validation(format!("invalid due date {:?} (expected YYYY-MM-DD): {}", due_date, e))
        })
    }
}

/// One row of a [`View`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewEntry<'a> {
    pub task: &'a Task,
    pub is_overdue: bool,
}

/// Filtered, sorted snapshot of a store
///
/// Borrowing the store keeps mutations out while a view is alive. It can be
/// iterated any number of times.
#[derive(Debug, Clone)]
pub struct View<'a> {
    entries: Vec<&'a Task>,
    today: NaiveDate,
    filter: Filter,
    total: usize,
}

impl<'a> View<'a> {
    pub fn iter(&self) -> impl Iterator<Item = ViewEntry<'a>> + '_ {
        let today = self.today;
        self.entries.iter().map(move |&task| ViewEntry {
            task,
            is_overdue: task.is_overdue(today),
        })
    }

    /// Number of tasks in the view
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tasks in the store, regardless of filter
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}
