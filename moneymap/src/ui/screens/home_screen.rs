use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::state::{HomeState, LoadingState, FEATURES};
use crate::ui::components::{help_bar, screen_title};
use crate::ui::layouts::ScreenAreas;
use crate::ui::theme::Palette;

pub fn render(
    f: &mut Frame,
    areas: &ScreenAreas,
    palette: &Palette,
    state: &HomeState,
    signed_in_as: Option<&str>,
) {
    screen_title::render_screen_title(
        f,
        areas.title,
        palette,
        "Welcome to MoneyMap",
        &LoadingState::NotStarted,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(areas.content);

    let greeting = match signed_in_as {
        Some(name) => format!("Hello, {}! Pick up where you left off.", name),
        None => "Track income and expenses, and see where your money goes.".to_string(),
    };
    let intro = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(greeting, palette.form_field_style())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = FEATURES
        .iter()
        .map(|feature| {
            ListItem::new(vec![
                Line::from(Span::styled(feature.name, palette.header_style())),
                Line::from(Span::styled(
                    format!("  {}", feature.description),
                    palette.help_text_style(),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Features"))
        .highlight_style(palette.selection_style())
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    help_bar::render_help_bar(
        f,
        areas.help,
        palette,
        &[("j/k", "Select"), ("Enter", "Open"), ("?", "Help")],
    );
}
