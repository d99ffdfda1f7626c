pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::state::AppState;
use ratatui::{widgets::Block, Frame};
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState) {
    let palette = theme::palette(state.appearance.effective());
    f.render_widget(Block::default().style(palette.base_style()), f.area());

    let (navbar_area, areas) = layouts::app_layout(f.area());
    components::navbar::render_navbar(f, navbar_area, palette, state);

    let currency = state.settings.currency;
    match state.current_screen() {
        Screen::Restoring(restoring) => {
            restoring_screen::render(f, &areas, palette, restoring);
        }
        Screen::Home(home) => {
            let name = state.session.user.as_ref().map(|user| user.name.as_str());
            home_screen::render(f, &areas, palette, home, name);
        }
        Screen::Login(login) => {
            login_screen::render(f, &areas, palette, login);
        }
        Screen::Register(register) => {
            register_screen::render(f, &areas, palette, register);
        }
        Screen::Dashboard(dashboard) => {
            dashboard_screen::render(f, &areas, palette, dashboard, currency);
        }
        Screen::Transactions(transactions) => {
            transactions_screen::render(f, &areas, palette, transactions, currency);
        }
        Screen::Settings(settings) => {
            settings_screen::render(f, &areas, palette, settings, &state.appearance);
        }
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, palette, state);
    }
}
