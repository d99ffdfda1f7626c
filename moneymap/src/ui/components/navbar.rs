//! Top navigation bar: brand, menu entries for the current visitor, theme.

use ratatui::prelude::Rect;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::navigation::{self, MenuAction};
use crate::state::AppState;
use crate::ui::theme::Palette;

pub fn render_navbar(f: &mut Frame, area: Rect, palette: &Palette, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.accent_border_style());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(32),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled("MoneyMap", palette.title_style())),
        chunks[0],
    );

    let current = state.location().route();
    let mut spans = Vec::new();
    for (index, item) in navigation::menu(state.is_authenticated()).iter().enumerate() {
        let active = matches!(item.action, MenuAction::Go(route) if Some(route) == current);
        let style = if active {
            palette.selection_style().add_modifier(Modifier::UNDERLINED)
        } else {
            palette.form_field_style()
        };
        spans.push(Span::styled(format!("{}", index + 1), palette.header_style()));
        spans.push(Span::styled(format!(" {} ", item.label), style));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

    let who = match &state.session.user {
        Some(user) => user.name.clone(),
        None if state.session.is_loading => "…".to_string(),
        None => "Guest".to_string(),
    };
    let right = Line::from(vec![
        Span::styled(who, palette.form_field_style()),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", state.appearance.preference),
            palette.help_text_style(),
        ),
    ])
    .right_aligned();
    f.render_widget(Paragraph::new(right), chunks[2]);
}
