//! Bottom row of key hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

/// A key and what it does, e.g. `("a", "Add transaction")`
pub type KeyHint = (&'static str, &'static str);

const SEPARATOR: &str = "  ";

pub const SIGN_IN_HINTS: &[KeyHint] = &[
    ("Tab", "Next field"),
    ("Enter", "Sign in"),
    ("Ctrl+G", "Google"),
    ("Ctrl+R", "Reset password"),
    ("Ctrl+T", "Theme"),
];

pub const REGISTER_HINTS: &[KeyHint] = &[
    ("Tab", "Next field"),
    ("Enter", "Create account"),
    ("Esc", "Back"),
    ("Ctrl+T", "Theme"),
];

/// Hints typed into a transaction form. `submit` names what Enter does.
pub fn transaction_form_hints(submit: &'static str, dismiss: &'static str) -> [KeyHint; 4] {
    [
        ("Tab", "Next field"),
        ("←/→", "Change"),
        ("Enter", submit),
        ("Esc", dismiss),
    ]
}

/// Lay the hints out on one line, dropping trailing hints that would not
/// fit in `width` columns
pub fn hint_line(hints: &[KeyHint], palette: &Palette, width: u16) -> Line<'static> {
    let width = usize::from(width);
    let mut spans = Vec::new();
    let mut used = 0;

    for (key, action) in hints {
        let separator = if spans.is_empty() { 0 } else { SEPARATOR.len() };
        let needed = separator + key.chars().count() + 1 + action.chars().count();
        if used + needed > width {
            break;
        }
        if separator > 0 {
            spans.push(Span::raw(SEPARATOR));
        }
        spans.push(Span::styled(*key, palette.header_style()));
        spans.push(Span::styled(format!(" {action}"), palette.help_text_style()));
        used += needed;
    }

    Line::from(spans)
}

pub fn render_help_bar(f: &mut Frame, area: Rect, palette: &Palette, hints: &[KeyHint]) {
    let line = hint_line(hints, palette, area.width.saturating_sub(2));
    let help = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}
