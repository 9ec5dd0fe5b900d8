use ratatui::style::{Color, Modifier, Style};
use uuid::Uuid;

/// Colours for one theme, derived from the dark-theme and dynamic-colour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub done: Color,
    pub error: Color,
    pub modal_bg: Color,
}

impl Palette {
    /// Dynamic colour keeps the terminal's own foreground and background
    pub fn new(dark_theme: bool, dynamic_color: bool) -> Self {
        match (dark_theme, dynamic_color) {
            (true, true) => Self {
                fg: Color::Reset,
                bg: Color::Reset,
                accent: Color::LightCyan,
                muted: Color::DarkGray,
                highlight_fg: Color::Black,
                highlight_bg: Color::LightCyan,
                done: Color::Green,
                error: Color::LightRed,
                modal_bg: Color::Reset,
            },
            (false, true) => Self {
                fg: Color::Reset,
                bg: Color::Reset,
                accent: Color::Blue,
                muted: Color::Gray,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
                done: Color::Green,
                error: Color::Red,
                modal_bg: Color::Reset,
            },
            (true, false) => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                highlight_fg: Color::Black,
                highlight_bg: Color::LightCyan,
                done: Color::Green,
                error: Color::Red,
                modal_bg: Color::DarkGray,
            },
            (false, false) => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                highlight_fg: Color::White,
                highlight_bg: Color::Blue,
                done: Color::Green,
                error: Color::Red,
                modal_bg: Color::Gray,
            },
        }
    }

    /// Default text style
    pub fn default_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Selected row highlight style
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style for panes
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn modal_bg_style(&self) -> Style {
        Style::default().bg(self.modal_bg).fg(self.fg)
    }

    pub fn modal_title_style(&self) -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Finished tasks are dimmed
    pub fn done_style(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn badge_style(&self, is_done: bool) -> Style {
        if is_done {
            Style::default().fg(self.done)
        } else {
            Style::default().fg(self.muted)
        }
    }

    /// Today's cell in the month grid
    pub fn today_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Marker for days that have tasks
    pub fn marker_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn hour_label_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Task block on the timeline
    pub fn block_style(&self, id: &Uuid, is_done: bool, is_focused: bool) -> Style {
        if is_focused {
            return self.selected_style();
        }
        let style = Style::default().fg(Color::Black).bg(task_color_from_id(id));
        if is_done {
            style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
        } else {
            style
        }
    }
}

/// Stable block colour for a task
pub fn task_color_from_id(id: &Uuid) -> Color {
    let hash = id.as_bytes().iter().fold(0u32, |acc, &b| acc.wrapping_add(b as u32));

    let palette = [
        Color::Cyan,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::LightCyan,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
    ];

    palette[(hash as usize) % palette.len()]
}
