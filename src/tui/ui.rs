use ratatui::Frame;

use crate::tui::app::{App, AppMode};
use crate::tui::theme::Theme;
use crate::tui::views::{confirm, task_form, task_list};

pub fn render(f: &mut Frame, app: &App, theme: &Theme) {
    let area = f.area();

    f.render_widget(
        ratatui::widgets::Block::default().style(theme.style_default()),
        area,
    );

    task_list::draw_task_list(f, app, theme, area);

    match app.mode {
        AppMode::Normal => {}
        AppMode::Form => {
            if let Some(form) = &app.form {
                task_form::draw_form(f, form, theme, area);
            }
        }
        AppMode::Help => task_list::draw_help(f, theme, area),
        AppMode::Confirm => confirm::draw_delete_confirm(f, app, theme, area),
    }
}
