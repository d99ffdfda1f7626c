use ratatui::Frame;

use crate::state::RestoringState;
use crate::ui::components::empty_state::{self, Placeholder};
use crate::ui::components::{help_bar, screen_title};
use crate::ui::layouts::ScreenAreas;
use crate::ui::theme::Palette;

pub fn render(f: &mut Frame, areas: &ScreenAreas, palette: &Palette, state: &RestoringState) {
    screen_title::render_screen_title(f, areas.title, palette, "MoneyMap", &state.loading);
    empty_state::render_placeholder(f, areas.content, palette, "Status", Placeholder::Restoring);
    help_bar::render_help_bar(f, areas.help, palette, &[("q", "Quit")]);
}
