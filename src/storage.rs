use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TaskMasterError};
use crate::model::Task;

pub const DEFAULT_DATA_PATH: &str = "data/tasks.json";

/// Outcome of a load. `recovered` is set when an unreadable file was
/// replaced by an empty collection.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub recovered: Option<String>,
}

pub trait TaskStorage {
    fn describe(&self) -> String;

    fn load_report(&self) -> Result<LoadReport>;
    fn save(&self, tasks: &[Task]) -> Result<()>;

    fn load(&self) -> Result<Vec<Task>> {
        Ok(self.load_report()?.tasks)
    }
}

pub struct JsonFileConfig {
    pub path: PathBuf,
}

impl JsonFileConfig {
    pub fn from_config(config: &Config, override_path: Option<PathBuf>) -> Self {
        let path = override_path.unwrap_or_else(|| {
            PathBuf::from(shellexpand::tilde(&config.storage.path).into_owned())
        });
        Self { path }
    }
}

/// The whole collection as one pretty-printed JSON array.
pub struct JsonFileStorage {
    config: JsonFileConfig,
}

impl JsonFileStorage {
    pub fn new(config: JsonFileConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn parse(&self, content: &str) -> Result<LoadReport> {
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(e) if e.is_syntax() || e.is_eof() => {
                // Unreadable file degrades to an empty list; the next save overwrites it
                warn!(
                    "Ignoring corrupt task file {}: {}",
                    self.config.path.display(),
                    e
                );
                return Ok(LoadReport {
                    tasks: Vec::new(),
                    recovered: Some(format!(
                        "{} is not valid JSON ({}); starting with an empty list",
                        self.config.path.display(),
                        e
                    )),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(TaskMasterError::Format(format!(
                    "{} should hold a JSON array of tasks, found {}",
                    self.config.path.display(),
                    json_kind(&other)
                )))
            }
        };

        let tasks = items
            .into_iter()
            .map(Task::from_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(LoadReport {
            tasks,
            recovered: None,
        })
    }
}

impl TaskStorage for JsonFileStorage {
    fn describe(&self) -> String {
        self.path().display().to_string()
    }

    fn load_report(&self) -> Result<LoadReport> {
        if !self.config.path.exists() {
            debug!("No task file at {}", self.config.path.display());
            return Ok(LoadReport::default());
        }

        let content = fs::read_to_string(&self.config.path)?;
        let report = self.parse(&content)?;
        debug!(
            "Loaded {} tasks from {}",
            report.tasks.len(),
            self.config.path.display()
        );
        Ok(report)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.config.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let values = tasks
            .iter()
            .map(Task::to_value)
            .collect::<Result<Vec<_>>>()?;
        let json = serde_json::to_string_pretty(&Value::Array(values))?;
        fs::write(&self.config.path, json)?;
        debug!("Saved {} tasks to {}", tasks.len(), self.config.path.display());
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
