use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Result, TaskMasterError};
use crate::model::{NewTask, Task, TaskId, TaskUpdate};
use crate::storage::TaskStorage;

/// The in-memory collection, kept in insertion order.
///
/// Ids are only unique because `add` allocates them as `max + 1`; tasks
/// loaded from disk are taken as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Loads the collection, returning the recovery note if the file was
    /// unreadable and had to be treated as empty.
    pub fn load_from(storage: &dyn TaskStorage) -> Result<(Self, Option<String>)> {
        let report = storage.load_report()?;
        let list = Self::new(report.tasks);

        let duplicates = list.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(
                "{} contains repeated task IDs {:?}; edits apply to the first match",
                storage.describe(),
                duplicates
            );
        }

        Ok((list, report.recovered))
    }

    pub fn save_to(&self, storage: &dyn TaskStorage) -> Result<()> {
        storage.save(&self.tasks)
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_id(&self) -> Result<TaskId> {
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        max.checked_add(1).ok_or_else(|| {
            TaskMasterError::InvalidInput(format!(
                "Cannot allocate a task ID after {}; the largest ID is in use",
                max
            ))
        })
    }

    fn get_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskMasterError::TaskNotFound(id))
    }

    pub fn add(&mut self, new_task: NewTask) -> Result<&Task> {
        let mut task = Task::new(self.next_id()?, new_task.title);
        task.priority = new_task.priority;
        task.due_date = new_task.due_date;
        task.tag = new_task.tag;
        debug!("Adding task {} '{}'", task.id, task.title);

        let index = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[index])
    }

    pub fn update(&mut self, id: TaskId, update: TaskUpdate) -> Result<&Task> {
        let task = self.get_mut(id)?;

        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = due_date;
        }
        if let Some(tag) = update.tag {
            task.tag = tag;
        }

        debug!("Updated task {}", id);
        Ok(&*task)
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskMasterError::TaskNotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    pub fn duplicate_ids(&self) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for task in &self.tasks {
            if !seen.insert(task.id) && !duplicates.contains(&task.id) {
                duplicates.push(task.id);
            }
        }
        duplicates
    }
}
