use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::components::popup::{self, PopupKind};
use crate::ui::theme::Palette;

/// Yes/no popup asked before ending the session
pub fn render_sign_out_confirmation(f: &mut Frame, palette: &Palette) {
    let inner = popup::render_popup_frame(f, palette, PopupKind::Confirm, "Sign Out");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Question
            Constraint::Length(1), // Empty line
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    let question = Paragraph::new("Are you sure you want to sign out?")
        .style(palette.loading_style().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(question, chunks[0]);

    let instructions = Line::from(vec![
        Span::styled(
            "[Y]es ",
            Style::default()
                .fg(palette.positive)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("/ "),
        Span::styled(
            "[N]o ",
            Style::default()
                .fg(palette.negative)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("/ "),
        Span::styled("[Esc]", palette.help_text_style()),
        Span::raw(" Cancel"),
    ]);
    f.render_widget(
        Paragraph::new(instructions).alignment(Alignment::Center),
        chunks[2],
    );
}
