//! Bordered single-line inputs shared by every form.

use ratatui::prelude::Rect;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;
use crate::ui::utils;

/// How a field's value is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    /// A value picked with ←/→ instead of typed
    Choice,
}

pub struct Field<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub kind: FieldKind,
    pub focused: bool,
}

impl<'a> Field<'a> {
    pub fn text(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            label,
            value,
            kind: FieldKind::Text,
            focused,
        }
    }

    pub fn secret(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            label,
            value,
            kind: FieldKind::Secret,
            focused,
        }
    }

    pub fn choice(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            label,
            value,
            kind: FieldKind::Choice,
            focused,
        }
    }
}

pub fn render_field(f: &mut Frame, area: Rect, palette: &Palette, field: &Field) {
    let shown = match field.kind {
        FieldKind::Text => field.value.to_string(),
        FieldKind::Secret => utils::mask(field.value),
        FieldKind::Choice => format!("◀ {} ▶", field.value),
    };

    let (style, border_style) = if field.focused {
        (palette.form_field_focused_style(), palette.accent_border_style())
    } else {
        (palette.form_field_style(), palette.help_text_style())
    };

    let mut spans = vec![Span::styled(shown, style)];
    if field.focused && field.kind != FieldKind::Choice {
        spans.push(Span::styled("█", palette.loading_style()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(field.label),
    );

    f.render_widget(paragraph, area);
}

/// Inline error under a form, if any
pub fn render_form_error(f: &mut Frame, area: Rect, palette: &Palette, error: Option<&str>) {
    if let Some(error) = error {
        f.render_widget(
            Paragraph::new(Span::styled(error.to_string(), palette.error_style())),
            area,
        );
    }
}
