use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::state::{AppState, SettingsTab};
use crate::ui::components::popup::{self, PopupKind};
use crate::ui::{screens::Screen, theme::Palette};

pub fn render_help_popup(f: &mut Frame, palette: &Palette, state: &AppState) {
    let help_items = get_help_items(state);

    let inner = popup::render_popup_frame(
        f,
        palette,
        PopupKind::Help,
        "Help (press ? or Esc to close)",
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), palette.header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(palette.form_field_style());

    f.render_widget(list, inner);
}

pub fn get_help_items(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match state.current_screen() {
        Screen::Restoring(..) => {
            items.push(("", "Restoring your session..."));
        }
        Screen::Home(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter", "Open selected feature"));
        }
        Screen::Login(..) => {
            items.push(("Tab/↓", "Next field"));
            items.push(("Shift+Tab/↑", "Previous field"));
            items.push(("Enter", "Sign in"));
            items.push(("Ctrl+G", "Continue with Google"));
            items.push(("Ctrl+R", "Reset password"));
            items.push(("Ctrl+N", "Create an account"));
            items.push(("Ctrl+L", "Clear field"));
            items.push(("Esc", "Close dialog / go back"));
        }
        Screen::Register(..) => {
            items.push(("Tab/↓", "Next field"));
            items.push(("Shift+Tab/↑", "Previous field"));
            items.push(("Enter", "Create account"));
            items.push(("Ctrl+L", "Clear field"));
            items.push(("Esc", "Go back"));
        }
        Screen::Dashboard(..) => {
            items.push(("a", "Add a transaction"));
            items.push(("Tab/↓", "Next field (while adding)"));
            items.push(("←/→/Space", "Change type or category"));
            items.push(("Enter", "Save transaction"));
            items.push(("Esc", "Stop adding"));
        }
        Screen::Transactions(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("a/n", "Add a transaction"));
            items.push(("←/→/Space", "Change type or category (in form)"));
            items.push(("Enter", "Save transaction (in form)"));
            items.push(("Esc", "Close form"));
        }
        Screen::Settings(settings) => {
            items.push(("Tab/Shift+Tab", "Switch tab"));
            match settings.tab {
                SettingsTab::Profile => {
                    items.push(("e", "Edit profile"));
                    items.push(("Enter", "Save profile (while editing)"));
                    items.push(("Esc", "Cancel editing"));
                }
                SettingsTab::Preferences => {
                    items.push(("↑/k ↓/j", "Move between settings"));
                    items.push(("←/→/Space", "Change value"));
                    items.push(("s", "Save settings"));
                }
                SettingsTab::Security => {
                    items.push(("p", "Change password"));
                    items.push(("o", "Sign out"));
                }
            }
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("1-9 / Alt+1-9", "Open menu entry"));
    items.push(("t / Ctrl+T", "Cycle theme (light, dark, system)"));
    items.push(("h/←/Esc", "Navigate back"));
    items.push(("?", "Toggle this help"));
    items.push(("q / Ctrl+C", "Quit application"));

    items
}
