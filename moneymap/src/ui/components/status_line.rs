use ratatui::prelude::Rect;
use ratatui::{layout::Alignment, text::Span, widgets::Paragraph, Frame};

use crate::preferences::{StatusKind, StatusMessage};
use crate::ui::theme::Palette;

/// One-line toast for a transient status message
pub fn render_status(f: &mut Frame, area: Rect, palette: &Palette, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };

    let style = match status.kind {
        StatusKind::Success => palette.success_style(),
        StatusKind::Error => palette.error_style(),
    };

    f.render_widget(
        Paragraph::new(Span::styled(status.text.clone(), style)).alignment(Alignment::Center),
        area,
    );
}
