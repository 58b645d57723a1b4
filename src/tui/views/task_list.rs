use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::helpers::is_overdue;
use crate::model::Task;
use crate::tui::app::{App, StatusLevel};
use crate::tui::theme::Theme;

pub fn draw_task_list(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let task_area = chunks[0];
    let status_area = chunks[1];

    let tasks = app.visible_tasks();

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new("No tasks yet. Press 'a' to add a task.").style(theme.style_muted())]
    } else {
        tasks
            .iter()
            .map(|task| ListItem::new(format_task_line(task, theme)))
            .collect()
    };

    let pending = tasks.iter().filter(|t| !t.completed).count();
    let tasks_block = Block::default()
        .title(format!(
            " Task Master ({} open / {}) · sorted by {} ",
            pending,
            tasks.len(),
            app.sort.label()
        ))
        .title_bottom(Line::from(format!(" {} ", app.storage_name())).right_aligned())
        .borders(Borders::ALL)
        .border_style(theme.style_muted());

    let list = List::new(items)
        .block(tasks_block)
        .highlight_style(theme.style_selected().add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if !tasks.is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, task_area, &mut state);

    let status_text = if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme.style_default(),
            StatusLevel::Success => theme.style_success(),
            StatusLevel::Warning => theme.style_warning(),
            StatusLevel::Error => theme.style_error(),
        };
        Line::from(vec![Span::styled(msg.clone(), style)])
    } else {
        Line::from(vec![
            Span::styled("↑/↓", theme.style_accent()),
            Span::styled(" navigate  ", theme.style_muted()),
            Span::styled("a", theme.style_accent()),
            Span::styled(" add  ", theme.style_muted()),
            Span::styled("e", theme.style_accent()),
            Span::styled(" edit  ", theme.style_muted()),
            Span::styled("x", theme.style_accent()),
            Span::styled(" complete  ", theme.style_muted()),
            Span::styled("d", theme.style_accent()),
            Span::styled(" delete  ", theme.style_muted()),
            Span::styled("s", theme.style_accent()),
            Span::styled(" sort  ", theme.style_muted()),
            Span::styled("?", theme.style_accent()),
            Span::styled(" help", theme.style_muted()),
        ])
    };

    let status_bar = Paragraph::new(Text::from(vec![status_text])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.style_muted()),
    );
    f.render_widget(status_bar, status_area);
}

fn format_task_line<'a>(task: &'a Task, theme: &Theme) -> Line<'a> {
    let (checkbox, checkbox_style) = if task.completed {
        ("[✔] ", theme.style_success())
    } else {
        ("[ ] ", theme.style_default())
    };

    let title_style = if task.completed {
        theme.style_muted().add_modifier(Modifier::CROSSED_OUT)
    } else {
        theme.style_default()
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(checkbox, checkbox_style),
        Span::styled(task.title.as_str(), title_style),
        Span::raw("  ("),
        Span::styled(
            format!("Priority: {}", task.priority),
            theme.style_priority(&task.priority),
        ),
        Span::raw(", Due: "),
    ];

    match &task.due_date {
        Some(due) if is_overdue(task) => spans.push(Span::styled(
            format!("{} overdue", due),
            theme.style_error().add_modifier(Modifier::BOLD),
        )),
        Some(due) => spans.push(Span::raw(due.to_string())),
        None => spans.push(Span::styled("none", theme.style_muted())),
    }
    spans.push(Span::raw(")"));

    if let Some(tag) = &task.tag {
        spans.push(Span::styled(format!("  #{}", tag), theme.style_highlight()));
    }

    Line::from(spans)
}

pub fn draw_help(f: &mut Frame, theme: &Theme, area: Rect) {
    let bindings = [
        ("j, ↓", "Move selection down"),
        ("k, ↑", "Move selection up"),
        ("a, +", "Add a task"),
        ("e, Enter", "Edit selected task"),
        ("x, space", "Toggle complete/pending"),
        ("d, Del", "Delete selected task"),
        ("s", "Cycle sort: added / priority / due date"),
        ("r", "Reload from disk"),
        ("?", "Toggle this help"),
        ("q, Esc", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keybindings",
            theme.style_accent().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];

    for (keys, description) in bindings {
        help_text.push(Line::from(vec![
            Span::styled(format!("{:<10}", keys), theme.style_accent()),
            Span::styled(description, theme.style_default()),
        ]));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![Span::styled(
        "In the form: Tab moves between fields, ←/→ change priority and tag",
        theme.style_muted(),
    )]));

    let help_paragraph = Paragraph::new(Text::from(help_text)).block(
        Block::default()
            .title(" Help (any key to close) ")
            .borders(Borders::ALL)
            .border_style(theme.style_accent()),
    );

    let area = super::centered_rect(60, 60, area);
    f.render_widget(Clear, area);
    f.render_widget(help_paragraph, area);
}
