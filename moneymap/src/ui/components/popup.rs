//! Modal frames drawn over the current screen.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::theme::Palette;

/// What a popup is for. Decides its size and border color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    /// Yes/no question before a destructive action such as signing out
    Confirm,
    /// Single email prompt on the sign-in page
    EmailPrompt,
    /// Multi-field entry: new transaction, password change
    Form,
    Help,
}

impl PopupKind {
    /// Share of the parent area as (width %, height %)
    fn percent(self) -> (u16, u16) {
        match self {
            Self::Confirm => (50, 30),
            Self::EmailPrompt => (60, 40),
            Self::Form => (60, 70),
            Self::Help => (80, 80),
        }
    }

    /// Smallest (width, height) that still fits the content
    fn min_size(self) -> (u16, u16) {
        match self {
            Self::Confirm => (40, 7),
            Self::EmailPrompt => (44, 10),
            Self::Form => (48, 18),
            Self::Help => (50, 12),
        }
    }

    fn border_style(self, palette: &Palette) -> Style {
        match self {
            Self::Confirm => palette.danger_border_style(),
            Self::EmailPrompt | Self::Form => palette.info_border_style(),
            Self::Help => palette.accent_border_style(),
        }
    }
}

/// Centered area for a popup of `kind`, never smaller than its minimum
/// unless the parent itself is smaller
pub fn popup_area(kind: PopupKind, parent: Rect) -> Rect {
    let (percent_x, percent_y) = kind.percent();
    let (min_width, min_height) = kind.min_size();

    let scaled =
        |length: u16, percent: u16| (u32::from(length) * u32::from(percent) / 100) as u16;
    let width = scaled(parent.width, percent_x).max(min_width).min(parent.width);
    let height = scaled(parent.height, percent_y).max(min_height).min(parent.height);

    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

/// Clear the popup area, draw its titled border and return the inner area
pub fn render_popup_frame(
    f: &mut Frame,
    palette: &Palette,
    kind: PopupKind,
    title: &str,
) -> Rect {
    let area = popup_area(kind, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.trim()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(kind.border_style(palette));

    let inner = block.inner(area);
    f.render_widget(block, area);

    inner
}
