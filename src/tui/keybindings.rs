use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    AddTask,
    EditTask,
    ToggleTask,
    DeleteTask,
    CycleSort,
    Reload,
    Help,
    Cancel,
    Submit,
    NextField,
    PreviousField,
    CycleForward,
    CycleBackward,
    Backspace,
    Char(char),
}

pub struct KeyBindings;

impl KeyBindings {
    pub fn handle_normal(key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),

            // Actions
            KeyCode::Char('a') | KeyCode::Char('+') => Some(Action::AddTask),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::EditTask),
            KeyCode::Char('x') | KeyCode::Char(' ') => Some(Action::ToggleTask),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteTask),
            KeyCode::Char('s') => Some(Action::CycleSort),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('?') => Some(Action::Help),

            _ => None,
        }
    }

    pub fn handle_form(key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PreviousField),
            KeyCode::Right => Some(Action::CycleForward),
            KeyCode::Left => Some(Action::CycleBackward),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Char(c)),
            _ => None,
        }
    }

    pub fn handle_confirm(key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        }
    }

    pub fn handle_help(_key: KeyEvent) -> Option<Action> {
        // Any key closes help
        Some(Action::Cancel)
    }
}
