//! Shared screen title component with loading indicator.

use ratatui::prelude::Rect;
use ratatui::{text::Span, widgets::Paragraph, Frame};

use crate::state::LoadingState;
use crate::ui::layouts;
use crate::ui::theme::Palette;

use super::loading_indicator;

/// Render a screen title with the loading spinner in the top-right corner.
pub fn render_screen_title(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    title: &str,
    loading_state: &LoadingState,
) {
    let (title_area, indicator_area) = layouts::title_with_loading(area);

    f.render_widget(
        Paragraph::new(Span::styled(title.to_string(), palette.title_style())),
        title_area,
    );
    loading_indicator::render_loading_indicator(f, indicator_area, palette, loading_state);
}
