use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Order the tasks were added in
    #[default]
    Insertion,
    Priority,
    DueDate,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insertion => "added",
            Self::Priority => "priority",
            Self::DueDate => "due date",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Insertion => Self::Priority,
            Self::Priority => Self::DueDate,
            Self::DueDate => Self::Insertion,
        }
    }
}

pub fn sort_tasks(tasks: Vec<Task>, key: SortKey) -> Vec<Task> {
    match key {
        SortKey::Insertion => tasks,
        SortKey::Priority => sort_by_priority(tasks),
        SortKey::DueDate => sort_by_due_date(tasks),
    }
}

pub fn sort_by_priority(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|t| t.priority.rank());
    tasks
}

/// Sorts on the due-date text; tasks without a due date come first.
pub fn sort_by_due_date(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| due_key(a).cmp(&due_key(b)));
    tasks
}

fn due_key(task: &Task) -> std::borrow::Cow<'_, str> {
    task.due_date
        .as_ref()
        .map(|d| d.as_key())
        .unwrap_or_default()
}

pub fn is_overdue(task: &Task) -> bool {
    is_overdue_on(task, Local::now().date_naive())
}

pub fn is_overdue_on(task: &Task, today: NaiveDate) -> bool {
    task.due_date
        .as_ref()
        .and_then(|d| d.date())
        .map_or(false, |d| d < today)
}

/// Display colour name for a priority.
pub fn priority_color(priority: &Priority) -> &'static str {
    match priority {
        Priority::Critical => "red",
        Priority::High => "yellow",
        Priority::Medium => "cyan",
        Priority::Low => "green",
        Priority::Other(_) => "black",
    }
}
