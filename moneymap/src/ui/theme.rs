//! Palettes for the light and dark themes, plus shared layout constants.
//!
//! Every color a screen uses comes from the active [`Palette`], so switching
//! the effective theme restyles the whole UI on the next frame.

use crate::appearance::EffectiveTheme;
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

/// Height of the navigation bar at the top
pub const NAVBAR_HEIGHT: u16 = 3;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of summary cards
pub const SUMMARY_CARD_HEIGHT: u16 = 3;

/// Height of a bordered single-line form field
pub const FORM_FIELD_HEIGHT: u16 = 3;

// =============================================================================
// Palettes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    /// Amounts coming in
    pub positive: Color,
    /// Amounts going out
    pub negative: Color,
    pub zero: Color,
    pub selection_bg: Color,
    pub header: Color,
    pub help_text: Color,
    pub title: Color,
    pub loading: Color,
    pub border_danger: Color,
    pub border_info: Color,
    pub border_accent: Color,
    pub input_focused: Color,
    pub form_field_bg: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Reset,
    text: Color::White,
    positive: Color::Green,
    negative: Color::Red,
    zero: Color::DarkGray,
    selection_bg: Color::DarkGray,
    header: Color::Yellow,
    help_text: Color::Gray,
    title: Color::Cyan,
    loading: Color::Yellow,
    border_danger: Color::Red,
    border_info: Color::Blue,
    border_accent: Color::Cyan,
    input_focused: Color::Yellow,
    form_field_bg: Color::DarkGray,
};

pub const LIGHT: Palette = Palette {
    background: Color::White,
    text: Color::Black,
    positive: Color::Rgb(22, 128, 61),
    negative: Color::Rgb(185, 28, 28),
    zero: Color::Gray,
    selection_bg: Color::Rgb(219, 234, 254),
    header: Color::Rgb(30, 64, 175),
    help_text: Color::DarkGray,
    title: Color::Rgb(37, 99, 235),
    loading: Color::Rgb(180, 83, 9),
    border_danger: Color::Rgb(220, 38, 38),
    border_info: Color::Rgb(37, 99, 235),
    border_accent: Color::Rgb(79, 70, 229),
    input_focused: Color::Rgb(37, 99, 235),
    form_field_bg: Color::Rgb(229, 231, 235),
};

pub fn palette(theme: EffectiveTheme) -> &'static Palette {
    match theme {
        EffectiveTheme::Light => &LIGHT,
        EffectiveTheme::Dark => &DARK,
    }
}

// =============================================================================
// Style Functions
// =============================================================================

impl Palette {
    /// Base style painted under every screen
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Style for selected/highlighted rows in tables and lists
    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for table headers
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn help_text_style(&self) -> Style {
        Style::default().fg(self.help_text)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Style for loading/status messages
    pub fn loading_style(&self) -> Style {
        Style::default().fg(self.loading)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.negative)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.positive)
            .add_modifier(Modifier::BOLD)
    }

    pub fn form_field_focused_style(&self) -> Style {
        Style::default()
            .fg(self.input_focused)
            .bg(self.form_field_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn form_field_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for danger/warning borders (sign-out confirmation)
    pub fn danger_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_info)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_border_style(&self) -> Style {
        Style::default().fg(self.border_accent)
    }

    /// Positive = income color, negative = expense color, zero = muted
    pub fn amount_color(&self, cents: i64) -> Color {
        if cents > 0 {
            self.positive
        } else if cents < 0 {
            self.negative
        } else {
            self.zero
        }
    }
}
