use chrono::Local;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::helpers::{sort_tasks, SortKey};
use crate::model::{DueDate, NewTask, Priority, Task, TaskId, TaskUpdate, DATE_FORMAT, SUGGESTED_TAGS};
use crate::storage::TaskStorage;
use crate::task_list::TaskList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Form,
    Help,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Priority,
    Tag,
    DueDate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Priority,
        FormField::Tag,
        FormField::DueDate,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Title | FormField::DueDate)
    }
}

/// Add/edit dialog state. `editing` is `None` when adding.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub editing: Option<TaskId>,
    pub title: String,
    pub priority: Priority,
    pub tag: Option<String>,
    pub due: String,
    pub focus: FormField,
}

impl TaskForm {
    pub fn blank() -> Self {
        Self {
            editing: None,
            title: String::new(),
            priority: Priority::default(),
            tag: None,
            due: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            focus: FormField::Title,
        }
    }

    pub fn for_task(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            priority: task.priority.clone(),
            tag: task.tag.clone(),
            due: task
                .due_date
                .as_ref()
                .map(|d| d.as_key().into_owned())
                .unwrap_or_default(),
            focus: FormField::Title,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::DueDate => Some(&mut self.due),
            FormField::Priority | FormField::Tag => None,
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Priority => {
                self.priority = if forward {
                    self.priority.next()
                } else {
                    self.priority.previous()
                };
            }
            FormField::Tag => self.tag = cycle_tag(self.tag.as_deref(), forward),
            FormField::Title | FormField::DueDate => {}
        }
    }
}

/// Steps through no tag and the suggested tags. A custom tag steps as if it
/// were "no tag".
fn cycle_tag(current: Option<&str>, forward: bool) -> Option<String> {
    let choices = SUGGESTED_TAGS.len() + 1;
    let index = current
        .and_then(|t| SUGGESTED_TAGS.iter().position(|s| *s == t))
        .map_or(0, |i| i + 1);

    let next = if forward {
        (index + 1) % choices
    } else {
        (index + choices - 1) % choices
    };

    match next {
        0 => None,
        i => Some(SUGGESTED_TAGS[i - 1].to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

pub struct App {
    pub mode: AppMode,
    pub tasks: TaskList,
    pub selected: usize,
    pub sort: SortKey,
    pub form: Option<TaskForm>,
    pub confirm_message: String,
    pending_delete: Option<TaskId>,
    pub status_message: Option<(String, StatusLevel)>,
    storage: Box<dyn TaskStorage>,
    load_failed: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(storage: Box<dyn TaskStorage>, config: &Config) -> Self {
        Self {
            mode: AppMode::Normal,
            tasks: TaskList::default(),
            selected: 0,
            sort: config.general.default_sort,
            form: None,
            confirm_message: String::new(),
            pending_delete: None,
            status_message: None,
            storage,
            load_failed: false,
            should_quit: false,
        }
    }

    pub fn storage_name(&self) -> String {
        self.storage.describe()
    }

    /// Tasks in display order.
    pub fn visible_tasks(&self) -> Vec<Task> {
        sort_tasks(self.tasks.as_slice().to_vec(), self.sort)
    }

    pub fn selected_task(&self) -> Option<Task> {
        self.visible_tasks().into_iter().nth(self.selected)
    }

    fn select_id(&mut self, id: TaskId) {
        if let Some(row) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.selected = row;
        }
    }

    fn clamp_selection(&mut self) {
        if self.tasks.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len() - 1;
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((message.into(), level));
    }

    /// Replaces the list with the stored one. On error the list is kept and
    /// saving stays blocked until a load succeeds.
    pub fn load(&mut self) -> Result<()> {
        match TaskList::load_from(self.storage.as_ref()) {
            Ok((tasks, recovered)) => {
                self.tasks = tasks;
                self.load_failed = false;
                self.clamp_selection();
                if let Some(note) = recovered {
                    self.set_status(note, StatusLevel::Warning);
                }
                Ok(())
            }
            Err(e) => {
                self.load_failed = true;
                Err(e)
            }
        }
    }

    pub fn reload(&mut self) {
        if let Err(e) = self.load() {
            self.set_status(format!("Error loading tasks: {}", e), StatusLevel::Error);
        }
    }

    /// Writes the whole list; a failed write leaves the in-memory list as is.
    fn persist(&mut self, success: impl Into<String>) {
        if self.load_failed {
            warn!("Not saving: {} failed to load", self.storage.describe());
            self.set_status(
                "Not saved: the task file failed to load. Fix it and press r to reload.",
                StatusLevel::Error,
            );
            return;
        }

        match self.tasks.save_to(self.storage.as_ref()) {
            Ok(()) => self.set_status(success, StatusLevel::Success),
            Err(e) => {
                warn!("Saving tasks failed: {}", e);
                self.set_status(format!("Failed to save tasks: {}", e), StatusLevel::Error);
            }
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.tasks.len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn cycle_sort(&mut self) {
        let current = self.selected_task().map(|t| t.id);
        self.sort = self.sort.next();
        if let Some(id) = current {
            self.select_id(id);
        }
        self.set_status(format!("Sorted by {}", self.sort.label()), StatusLevel::Info);
    }

    pub fn start_add(&mut self) {
        self.form = Some(TaskForm::blank());
        self.mode = AppMode::Form;
    }

    pub fn start_edit(&mut self) {
        match self.selected_task() {
            Some(task) => {
                self.form = Some(TaskForm::for_task(&task));
                self.mode = AppMode::Form;
            }
            None => self.set_status("Please select a task to edit.", StatusLevel::Warning),
        }
    }

    pub fn toggle_selected_task(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status("Please select a task to mark as complete.", StatusLevel::Warning);
            return;
        };

        match self.tasks.toggle(task.id) {
            Ok(true) => self.persist("Task completed"),
            Ok(false) => self.persist("Task marked as pending"),
            Err(e) => self.set_status(format!("Failed to toggle task: {}", e), StatusLevel::Error),
        }
    }

    pub fn start_delete_confirmation(&mut self) {
        match self.selected_task() {
            Some(task) => {
                self.confirm_message = format!("Delete \"{}\"?", task.title);
                self.pending_delete = Some(task.id);
                self.mode = AppMode::Confirm;
            }
            None => self.set_status("Please select a task to delete.", StatusLevel::Warning),
        }
    }

    pub fn execute_confirm(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            match self.tasks.remove(id) {
                Ok(task) => {
                    debug!("Deleted task {}", task.id);
                    self.clamp_selection();
                    self.persist(format!("Deleted: {}", task.title));
                }
                Err(e) => {
                    self.set_status(format!("Failed to delete task: {}", e), StatusLevel::Error)
                }
            }
        }
        self.confirm_message.clear();
        self.mode = AppMode::Normal;
    }

    pub fn cancel_confirm(&mut self) {
        self.pending_delete = None;
        self.confirm_message.clear();
        self.mode = AppMode::Normal;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = AppMode::Normal;
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.focus = form.focus.next();
        }
    }

    pub fn form_previous_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.focus = form.focus.previous();
        }
    }

    pub fn form_cycle(&mut self, forward: bool) {
        if let Some(form) = self.form.as_mut() {
            form.cycle(forward);
        }
    }

    pub fn form_push(&mut self, c: char) {
        if let Some(text) = self.form.as_mut().and_then(TaskForm::text_mut) {
            text.push(c);
        }
    }

    pub fn form_pop(&mut self) {
        if let Some(text) = self.form.as_mut().and_then(TaskForm::text_mut) {
            text.pop();
        }
    }

    /// Validates the form and applies it. Invalid input keeps the form open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            self.mode = AppMode::Normal;
            return;
        };

        let title = form.title.trim().to_string();
        if title.is_empty() {
            self.set_status("Title cannot be empty", StatusLevel::Error);
            return;
        }

        let due_date = match DueDate::parse_input(&form.due, Local::now().date_naive()) {
            Ok(d) => d,
            Err(e) => {
                self.set_status(e.to_string(), StatusLevel::Error);
                return;
            }
        };

        self.form = None;
        self.mode = AppMode::Normal;

        match form.editing {
            Some(id) => {
                let update = TaskUpdate {
                    title: Some(title),
                    priority: Some(form.priority),
                    due_date: Some(due_date),
                    tag: Some(form.tag),
                };
                match self.tasks.update(id, update) {
                    Ok(task) => {
                        let message = format!("Updated: {}", task.title);
                        self.persist(message);
                    }
                    Err(e) => {
                        self.set_status(format!("Failed to update task: {}", e), StatusLevel::Error)
                    }
                }
            }
            None => {
                let new_task = NewTask {
                    title,
                    priority: form.priority,
                    due_date,
                    tag: form.tag,
                };
                match self.tasks.add(new_task) {
                    Ok(task) => {
                        let (id, message) = (task.id, format!("Created: {}", task.title));
                        self.select_id(id);
                        self.persist(message);
                    }
                    Err(e) => {
                        self.set_status(format!("Failed to add task: {}", e), StatusLevel::Error)
                    }
                }
            }
        }
    }

    pub fn toggle_help(&mut self) {
        if self.mode == AppMode::Help {
            self.mode = AppMode::Normal;
        } else {
            self.mode = AppMode::Help;
        }
    }
}
