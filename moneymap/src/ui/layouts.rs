//! Reusable layout builders for consistent screen structure.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HELP_BAR_HEIGHT, NAVBAR_HEIGHT, SCREEN_MARGIN, TITLE_HEIGHT};

/// The parts of the frame a screen draws into, below the navbar
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    pub title: Rect,
    pub content: Rect,
    pub help: Rect,
}

/// Standard screen layout with navbar, title, content area, and help bar.
///
/// Returns a tuple of (navbar_area, title_area, content_area, help_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT),
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(8),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Navbar area plus what is left for the current screen
pub fn app_layout(area: Rect) -> (Rect, ScreenAreas) {
    let (navbar, title, content, help) = screen_layout(area);
    (
        navbar,
        ScreenAreas {
            title,
            content,
            help,
        },
    )
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Center a fixed-width column inside `area`, used by the auth forms
pub fn centered_column(width: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(area)[1]
}
