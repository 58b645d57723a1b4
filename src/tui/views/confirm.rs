use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;
use crate::tui::theme::Theme;

pub fn draw_delete_confirm(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(" Confirm Delete ")
        .borders(Borders::ALL)
        .border_style(theme.style_error());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(app.confirm_message.clone(), theme.style_default())),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme.style_accent()),
            Span::styled(" / Enter = delete    ", theme.style_muted()),
            Span::styled("n", theme.style_accent()),
            Span::styled(" / Esc = keep", theme.style_muted()),
        ]),
    ];

    let text = Paragraph::new(lines)
        .block(block)
        .style(theme.style_default())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let popup = super::centered_rect(50, 25, area);
    f.render_widget(Clear, popup);
    f.render_widget(text, popup);
}
