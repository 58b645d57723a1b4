use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::info;

mod cli;
mod config;
mod error;
mod helpers;
mod model;
mod storage;
mod task_list;
mod tui;

use cli::{Cli, Command, ListFilter};
use config::Config;
use error::{Result, TaskMasterError};
use helpers::{is_overdue_on, priority_color, sort_tasks};
use model::{DueDate, NewTask, Priority, Task, TaskUpdate};
use storage::{JsonFileConfig, JsonFileStorage, TaskStorage};
use task_list::TaskList;

fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout belongs to the TUI and to `list`
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Starting taskmaster v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(1);
        }
    };

    // TTY = TUI, non-TTY = plain listing
    let is_tty = atty::is(atty::Stream::Stdout);
    if !is_tty {
        colored::control::set_override(false);
    }
    let command = cli.command.unwrap_or(if is_tty {
        Command::Tui
    } else {
        Command::List {
            filter: ListFilter::All,
            sort: None,
            format: "text".into(),
        }
    });

    let storage = JsonFileStorage::new(JsonFileConfig::from_config(&config, cli.data));

    match run(command, config, storage) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(command: Command, config: Config, storage: JsonFileStorage) -> Result<()> {
    match command {
        Command::Tui => {
            tui::run(storage, config)?;
        }
        Command::List {
            filter,
            sort,
            format,
        } => {
            let today = Local::now().date_naive();

            let tasks: Vec<Task> = storage
                .load()?
                .into_iter()
                .filter(|t| matches_filter(t, filter, today))
                .collect();
            let tasks = sort_tasks(tasks, sort.unwrap_or(config.general.default_sort));

            match format.as_str() {
                "json" => {
                    let json = serde_json::to_string_pretty(&tasks)?;
                    println!("{}", json);
                }
                _ => {
                    if tasks.is_empty() {
                        println!("No tasks found.");
                    } else {
                        for task in &tasks {
                            println!("{}", format_task_line(task, today));
                        }
                    }
                }
            }
        }
        Command::Add {
            title,
            priority,
            due,
            tag,
        } => {
            let title = title.join(" ");
            if title.trim().is_empty() {
                return Err(TaskMasterError::InvalidInput("Title cannot be empty".into()));
            }

            let new_task = NewTask {
                title,
                priority: Priority::parse_level(&priority)?,
                due_date: parse_due(due.as_deref())?,
                tag,
            };

            let (mut tasks, _) = TaskList::load_from(&storage)?;
            let task = tasks.add(new_task)?.clone();
            tasks.save_to(&storage)?;
            println!("✓ Created task: {} (ID: {})", task.title, task.id);
        }
        Command::Edit {
            id,
            title,
            priority,
            due,
            tag,
            clear_due,
            clear_tag,
        } => {
            let update = TaskUpdate {
                title,
                priority: priority.as_deref().map(Priority::parse_level).transpose()?,
                due_date: if clear_due {
                    Some(None)
                } else {
                    due.as_deref().map(|d| parse_due(Some(d))).transpose()?
                },
                tag: if clear_tag { Some(None) } else { tag.map(Some) },
            };

            if update.is_empty() {
                return Err(TaskMasterError::InvalidInput("Nothing to change".into()));
            }

            let (mut tasks, _) = TaskList::load_from(&storage)?;
            let task = tasks.update(id, update)?.clone();
            tasks.save_to(&storage)?;
            println!("✓ Updated task: {}", task);
        }
        Command::Toggle { id } => {
            let (mut tasks, _) = TaskList::load_from(&storage)?;
            let completed = tasks.toggle(id)?;
            tasks.save_to(&storage)?;
            if completed {
                println!("✓ Task {} marked complete", id);
            } else {
                println!("↩ Task {} marked pending", id);
            }
        }
        Command::Delete { id } => {
            let (mut tasks, _) = TaskList::load_from(&storage)?;
            let task = tasks.remove(id)?;
            tasks.save_to(&storage)?;
            println!("✗ Deleted task: {} (ID: {})", task.title, task.id);
        }
        Command::Config => {
            let config_toml = toml::to_string_pretty(&config).map_err(|e| {
                TaskMasterError::Config(format!("Failed to serialize config: {}", e))
            })?;
            println!("{}", config_toml);
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

fn parse_due(input: Option<&str>) -> Result<Option<DueDate>> {
    match input {
        Some(text) => DueDate::parse_input(text, Local::now().date_naive()),
        None => Ok(None),
    }
}

fn matches_filter(task: &Task, filter: ListFilter, today: NaiveDate) -> bool {
    match filter {
        ListFilter::All => true,
        ListFilter::Pending => !task.completed,
        ListFilter::Done => task.completed,
        ListFilter::Overdue => !task.completed && is_overdue_on(task, today),
    }
}

fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let checkbox = if task.completed { "✔" } else { " " };
    let priority = format!("Priority: {}", task.priority).color(priority_color(&task.priority));

    let due = match &task.due_date {
        Some(d) if is_overdue_on(task, today) => d.as_key().red().bold().to_string(),
        Some(d) => d.as_key().into_owned(),
        None => "none".to_string(),
    };

    let tag = task
        .tag
        .as_ref()
        .map(|t| format!(" [Tag: {}]", t))
        .unwrap_or_default();

    format!(
        "[{}] {}: {} ({}, Due: {}){}",
        checkbox, task.id, task.title, priority, due, tag
    )
}
