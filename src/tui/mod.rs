use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::storage::JsonFileStorage;
use crate::tui::app::{App, AppMode, StatusLevel};
use crate::tui::keybindings::{Action, KeyBindings};
use crate::tui::theme::Theme;

pub mod app;
pub mod keybindings;
pub mod theme;
pub mod ui;
pub mod views;

const TICK_RATE: Duration = Duration::from_millis(250);

pub fn run(storage: JsonFileStorage, config: Config) -> Result<()> {
    let theme = Theme::load(&config.general.theme, config.themes_dir().as_deref());
    let mut app = App::new(Box::new(storage), &config);
    // Fail before touching the terminal, like the CLI commands do
    app.load()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal even when the loop fails
    let result = event_loop(&mut terminal, &mut app, &theme);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, theme: &Theme) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app, theme))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = handle_key(key, app) {
                    debug!("Action {:?} in {:?} mode", action, app.mode);
                    process_action(action, app);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(key: KeyEvent, app: &App) -> Option<Action> {
    match app.mode {
        AppMode::Normal => KeyBindings::handle_normal(key),
        AppMode::Form => KeyBindings::handle_form(key),
        AppMode::Help => KeyBindings::handle_help(key),
        AppMode::Confirm => KeyBindings::handle_confirm(key),
    }
}

fn process_action(action: Action, app: &mut App) {
    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::MoveUp => {
            app.move_selection_up();
        }
        Action::MoveDown => {
            app.move_selection_down();
        }
        Action::AddTask => {
            app.start_add();
        }
        Action::EditTask => {
            app.start_edit();
        }
        Action::ToggleTask => {
            app.toggle_selected_task();
        }
        Action::DeleteTask => {
            app.start_delete_confirmation();
        }
        Action::CycleSort => {
            app.cycle_sort();
        }
        Action::Reload => {
            app.status_message = None;
            app.reload();
            if app.status_message.is_none() {
                app.set_status("Tasks reloaded", StatusLevel::Info);
            }
        }
        Action::Help => {
            app.toggle_help();
        }
        Action::Cancel => match app.mode {
            AppMode::Help => app.mode = AppMode::Normal,
            AppMode::Confirm => app.cancel_confirm(),
            _ => app.cancel_form(),
        },
        Action::Submit => {
            if app.mode == AppMode::Confirm {
                app.execute_confirm();
            } else {
                app.submit_form();
            }
        }
        Action::NextField => app.form_next_field(),
        Action::PreviousField => app.form_previous_field(),
        Action::CycleForward => app.form_cycle(true),
        Action::CycleBackward => app.form_cycle(false),
        Action::Backspace => app.form_pop(),
        Action::Char(c) => app.form_push(c),
    }
}
