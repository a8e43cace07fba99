use ratatui::style::Color;
use std::str::FromStr;

use crate::notice::NoticeLevel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeName {
    Default,
    Monokai,
    Matrix,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Monokai => "monokai",
            Self::Matrix => "matrix",
        }
    }

    pub fn all_themes() -> &'static [ThemeName] {
        &[ThemeName::Default, ThemeName::Monokai, ThemeName::Matrix]
    }

    /// Comma separated theme names, for help and error text
    pub fn available() -> String {
        Self::all_themes()
            .iter()
            .map(|theme| theme.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ThemeName {
    type Err = String;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_themes()
            .iter()
            .copied()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid theme '{}'. Available themes: {}", s, Self::available()))
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Element colors
    pub element_bg: Color,
    pub element_fg: Color,
    pub element_pending_bg: Color,
    pub element_pending_fg: Color,
    pub index_text: Color,
    pub node_arrow: Color,

    // UI element colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub border_normal: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_accent: Color,
    pub background: Color,

    // Tabs and input
    pub tab_active: Color,
    pub input_editing: Color,

    // Status indicators
    pub status_full: Color,
    pub status_empty: Color,

    // Notices
    pub notice_error: Color,
    pub notice_success: Color,
    pub notice_info: Color,
}

impl Theme {
    pub fn new(theme_name: ThemeName) -> Self {
        match theme_name {
            ThemeName::Default => Self::default_theme(),
            ThemeName::Monokai => Self::monokai_theme(),
            ThemeName::Matrix => Self::matrix_theme(),
        }
    }

    fn default_theme() -> Self {
        Self {
            element_bg: Color::Rgb(191, 219, 254),        // Light blue
            element_fg: Color::Rgb(30, 64, 175),          // Deep blue
            element_pending_bg: Color::Rgb(254, 202, 202), // Light red
            element_pending_fg: Color::Rgb(239, 68, 68),  // Red
            index_text: Color::Rgb(52, 152, 219),         // Dodger blue
            node_arrow: Color::Rgb(149, 165, 166),        // Concrete gray

            header_fg: Color::Rgb(236, 240, 241), // Clouds white
            header_bg: Color::Rgb(0, 0, 0),
            border_normal: Color::Rgb(149, 165, 166), // Concrete gray
            border_focused: Color::Rgb(59, 130, 246), // Blue
            text_primary: Color::Rgb(236, 240, 241),  // Clouds white
            text_secondary: Color::Rgb(189, 195, 199), // Silver
            text_accent: Color::Rgb(59, 130, 246),    // Blue
            background: Color::Rgb(0, 0, 0),

            tab_active: Color::Rgb(59, 130, 246),
            input_editing: Color::Rgb(241, 196, 15), // Sun flower yellow

            status_full: Color::Rgb(231, 76, 60),    // Alizarin red
            status_empty: Color::Rgb(149, 165, 166), // Concrete gray

            notice_error: Color::Rgb(239, 68, 68),   // Red
            notice_success: Color::Rgb(34, 197, 94), // Green
            notice_info: Color::Rgb(107, 114, 128),  // Gray
        }
    }

    fn monokai_theme() -> Self {
        Self {
            element_bg: Color::Rgb(73, 72, 62),          // Monokai selection
            element_fg: Color::Rgb(102, 217, 239),       // Monokai cyan
            element_pending_bg: Color::Rgb(117, 113, 94), // Monokai gray
            element_pending_fg: Color::Rgb(249, 38, 114), // Monokai pink
            index_text: Color::Rgb(253, 151, 31),        // Monokai orange
            node_arrow: Color::Rgb(117, 113, 94),        // Monokai gray

            header_fg: Color::Rgb(248, 248, 242), // Monokai white
            header_bg: Color::Rgb(39, 40, 34),    // Monokai dark bg
            border_normal: Color::Rgb(117, 113, 94),
            border_focused: Color::Rgb(166, 226, 46), // Monokai green
            text_primary: Color::Rgb(248, 248, 242),
            text_secondary: Color::Rgb(253, 151, 31),
            text_accent: Color::Rgb(166, 226, 46),
            background: Color::Rgb(39, 40, 34),

            tab_active: Color::Rgb(166, 226, 46),
            input_editing: Color::Rgb(230, 219, 116), // Monokai yellow

            status_full: Color::Rgb(249, 38, 114),
            status_empty: Color::Rgb(117, 113, 94),

            notice_error: Color::Rgb(249, 38, 114),
            notice_success: Color::Rgb(166, 226, 46),
            notice_info: Color::Rgb(174, 129, 255), // Monokai purple
        }
    }

    fn matrix_theme() -> Self {
        Self {
            element_bg: Color::Rgb(0, 60, 15),
            element_fg: Color::Rgb(0, 255, 65), // Bright matrix green
            element_pending_bg: Color::Rgb(60, 0, 0),
            element_pending_fg: Color::Rgb(255, 0, 0),
            index_text: Color::Rgb(0, 150, 35),
            node_arrow: Color::Rgb(0, 120, 30),

            header_fg: Color::Rgb(0, 255, 65),
            header_bg: Color::Rgb(0, 0, 0),
            border_normal: Color::Rgb(0, 150, 35),
            border_focused: Color::Rgb(0, 255, 65),
            text_primary: Color::Rgb(0, 200, 50),
            text_secondary: Color::Rgb(0, 150, 35),
            text_accent: Color::Rgb(0, 255, 65),
            background: Color::Rgb(0, 0, 0),

            tab_active: Color::Rgb(0, 255, 65),
            input_editing: Color::Rgb(0, 255, 100),

            status_full: Color::Rgb(255, 0, 0),
            status_empty: Color::Rgb(0, 100, 25),

            notice_error: Color::Rgb(255, 0, 0),
            notice_success: Color::Rgb(0, 255, 65),
            notice_info: Color::Rgb(0, 180, 40),
        }
    }

    pub fn get_notice_color(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Error => self.notice_error,
            NoticeLevel::Success => self.notice_success,
            NoticeLevel::Info => self.notice_info,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeName::Default)
    }
}
