use ratatui::style::{Color, Style};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::helpers::priority_color;
use crate::model::Priority;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Built-in "dark" or "light", or `<themes_dir>/<name>.toml`.
    pub fn load(name: &str, themes_dir: Option<&Path>) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            custom => themes_dir
                .and_then(|dir| Self::try_custom(&dir.join(format!("{}.toml", custom))))
                .unwrap_or_else(|| {
                    warn!("Theme '{}' not found, using dark", custom);
                    Self::dark()
                }),
        }
    }

    fn try_custom(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<ThemeOverrides>(&content) {
            Ok(overrides) => Some(overrides.apply()),
            Err(e) => {
                warn!("Ignoring theme {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 30, 30),
            foreground: Color::Rgb(220, 220, 220),
            accent: Color::Rgb(0, 120, 215),
            success: Color::Rgb(95, 135, 95),
            warning: Color::Rgb(218, 165, 32),
            error: Color::Rgb(205, 92, 92),
            muted: Color::Rgb(128, 128, 128),
            highlight: Color::Rgb(147, 112, 219),
            selection_bg: Color::Rgb(0, 120, 215),
            selection_fg: Color::Rgb(255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(255, 255, 255),
            foreground: Color::Rgb(50, 50, 50),
            accent: Color::Rgb(0, 120, 215),
            success: Color::Rgb(34, 139, 34),
            warning: Color::Rgb(218, 165, 32),
            error: Color::Rgb(220, 20, 60),
            muted: Color::Rgb(128, 128, 128),
            highlight: Color::Rgb(138, 43, 226),
            selection_bg: Color::Rgb(0, 120, 215),
            selection_fg: Color::Rgb(255, 255, 255),
        }
    }

    pub fn style_default(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn style_selected(&self) -> Style {
        Style::default().bg(self.selection_bg).fg(self.selection_fg)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn style_success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn style_warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn style_error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn style_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn style_highlight(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    pub fn style_priority(&self, priority: &Priority) -> Style {
        let color = priority_color(priority).parse().unwrap_or(Color::Black);
        Style::default().fg(color)
    }
}

/// A theme file: a built-in base plus any colours to replace.
///
/// Colours are ratatui colour strings such as `"#0078d7"`, `"red"` or `"7"`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeOverrides {
    base: Option<String>,
    background: Option<String>,
    foreground: Option<String>,
    accent: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    error: Option<String>,
    muted: Option<String>,
    highlight: Option<String>,
    selection_bg: Option<String>,
    selection_fg: Option<String>,
}

impl ThemeOverrides {
    fn apply(self) -> Theme {
        let mut theme = match self.base.as_deref() {
            Some("light") => Theme::light(),
            _ => Theme::dark(),
        };

        let slots = [
            (&mut theme.background, self.background, "background"),
            (&mut theme.foreground, self.foreground, "foreground"),
            (&mut theme.accent, self.accent, "accent"),
            (&mut theme.success, self.success, "success"),
            (&mut theme.warning, self.warning, "warning"),
            (&mut theme.error, self.error, "error"),
            (&mut theme.muted, self.muted, "muted"),
            (&mut theme.highlight, self.highlight, "highlight"),
            (&mut theme.selection_bg, self.selection_bg, "selection_bg"),
            (&mut theme.selection_fg, self.selection_fg, "selection_fg"),
        ];
        for (slot, value, key) in slots {
            let Some(value) = value else { continue };
            match value.parse::<Color>() {
                Ok(color) => *slot = color,
                Err(_) => warn!("Theme colour {} = '{}' is not a colour", key, value),
            }
        }
        theme
    }
}
