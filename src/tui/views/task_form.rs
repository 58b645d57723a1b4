use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::{FormField, TaskForm};
use crate::tui::theme::Theme;

const LABEL_WIDTH: u16 = 12;

pub fn draw_form(f: &mut Frame, form: &TaskForm, theme: &Theme, area: Rect) {
    let title = if form.editing.is_some() {
        " Edit Task "
    } else {
        " Add New Task "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.style_accent());

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| field_line(form, *field, theme))
        .collect();

    let popup = super::centered_rect(60, 30, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(theme.style_default()),
        popup,
    );

    if form.focus.is_text() {
        let row = FormField::ALL
            .iter()
            .position(|field| *field == form.focus)
            .unwrap_or(0) as u16;
        let text_len = match form.focus {
            FormField::Title => form.title.chars().count(),
            _ => form.due.chars().count(),
        } as u16;
        f.set_cursor_position((popup.x + 1 + LABEL_WIDTH + text_len, popup.y + 1 + row));
    }

    let hint = match form.focus {
        FormField::Title => "Tab next field · Enter save · Esc cancel",
        FormField::Priority | FormField::Tag => "←/→ change · Tab next field · Enter save",
        FormField::DueDate => "YYYY-MM-DD, today, tomorrow, or empty for none",
    };

    let hint_area = Rect {
        x: popup.x,
        y: popup.y + popup.height,
        width: popup.width,
        height: 1,
    };
    if hint_area.y < area.y + area.height {
        f.render_widget(
            Paragraph::new(hint)
                .style(theme.style_muted())
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}

fn field_line<'a>(form: &'a TaskForm, field: FormField, theme: &Theme) -> Line<'a> {
    let focused = form.focus == field;
    let label_style = if focused {
        theme.style_accent().add_modifier(Modifier::BOLD)
    } else {
        theme.style_muted()
    };

    let (label, value) = match field {
        FormField::Title => ("Title:", Span::styled(form.title.as_str(), theme.style_default())),
        FormField::Priority => (
            "Priority:",
            Span::styled(
                choice(form.priority.as_str(), focused),
                theme.style_priority(&form.priority),
            ),
        ),
        FormField::Tag => (
            "Tag:",
            Span::styled(
                choice(form.tag.as_deref().unwrap_or("None"), focused),
                theme.style_highlight(),
            ),
        ),
        FormField::DueDate => ("Due Date:", Span::styled(form.due.as_str(), theme.style_default())),
    };

    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH as usize), label_style),
        value,
    ])
}

fn choice(value: &str, focused: bool) -> String {
    if focused {
        format!("< {} >", value)
    } else {
        value.to_string()
    }
}
