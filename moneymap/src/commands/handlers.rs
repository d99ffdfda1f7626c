use crate::events::AppCommand;
use crate::input::{menu_index, Key, KeyEvent};
use crate::navigation::Route;
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: Ctrl+C always quits, even mid-form
    if event.ctrl_char() == Some('c') {
        return Some(AppCommand::Quit);
    }

    // Priority 1: Help popup swallows everything else
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 2: Chords that work on every screen, forms included
    if let Some(index) = event.alt_digit() {
        return Some(AppCommand::SelectMenuItem(index));
    }
    if event.ctrl_char() == Some('t') {
        return Some(AppCommand::CycleTheme);
    }

    // Priority 3: Sign-out confirmation popup
    if let Screen::Settings(settings) = state.current_screen() {
        if settings.confirm_sign_out {
            return match key {
                Key::Char('y') | Key::Char('Y') | Key::Enter => Some(AppCommand::SignOut),
                Key::Char('n') | Key::Char('N') | Key::Esc => Some(AppCommand::CloseDialog),
                _ => None,
            };
        }
    }

    // Priority 4: A form that takes typed input
    if let Some(form) = state.active_form() {
        if form.captures_keys() {
            return handle_form_keys(event, form, state);
        }
    }

    // Priority 5: Screen-specific keys
    if let Some(command) = handle_screen_keys(key, state) {
        return Some(command);
    }

    match key {
        // Global help toggle
        Key::Char('?') => Some(AppCommand::ToggleHelp),

        // Global quit command
        Key::Char('q') => Some(AppCommand::Quit),

        Key::Char('t') => Some(AppCommand::CycleTheme),

        // Menu entries by position
        Key::Char(c) if c.is_ascii_digit() => menu_index(c).map(AppCommand::SelectMenuItem),

        Key::Esc | Key::Char('h') | Key::Left => Some(AppCommand::NavigateBack),

        _ => None,
    }
}

fn handle_screen_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    match (state.current_screen(), key) {
        // Home: pick a feature card
        (Screen::Home(_), Key::Char('j') | Key::Down) => Some(AppCommand::SelectNext),
        (Screen::Home(_), Key::Char('k') | Key::Up) => Some(AppCommand::SelectPrevious),
        (Screen::Home(_), Key::Enter | Key::Char('l') | Key::Right) => {
            Some(AppCommand::OpenSelected)
        }

        // Dashboard: focus the quick-add form
        (Screen::Dashboard(_), Key::Char('a') | Key::Char('n')) => Some(AppCommand::FocusForm),

        // Transactions: table navigation and the add dialog
        (Screen::Transactions(_), Key::Char('a') | Key::Char('n')) => {
            Some(AppCommand::OpenTransactionForm)
        }
        (Screen::Transactions(_), Key::Char('j') | Key::Down) => Some(AppCommand::SelectNext),
        (Screen::Transactions(_), Key::Char('k') | Key::Up) => Some(AppCommand::SelectPrevious),

        (Screen::Settings(settings), key) => handle_settings_keys(key, settings),

        _ => None,
    }
}

fn handle_settings_keys(key: Key, settings: &SettingsState) -> Option<AppCommand> {
    match (settings.tab, key) {
        (_, Key::Tab) => Some(AppCommand::SwitchSettingsTab { forward: true }),
        (_, Key::BackTab) => Some(AppCommand::SwitchSettingsTab { forward: false }),

        (SettingsTab::Profile, Key::Char('e')) => Some(AppCommand::EditProfile),

        (SettingsTab::Preferences, Key::Char('j') | Key::Down) => {
            Some(AppCommand::NavigateFormField { forward: true })
        }
        (SettingsTab::Preferences, Key::Char('k') | Key::Up) => {
            Some(AppCommand::NavigateFormField { forward: false })
        }
        (SettingsTab::Preferences, Key::Right | Key::Char('l') | Key::Char(' ')) => {
            Some(AppCommand::CycleFormFieldValue { forward: true })
        }
        (SettingsTab::Preferences, Key::Left) => {
            Some(AppCommand::CycleFormFieldValue { forward: false })
        }
        (SettingsTab::Preferences, Key::Char('s') | Key::Enter) => Some(AppCommand::SaveSettings),

        (SettingsTab::Security, Key::Char('p')) => Some(AppCommand::OpenPasswordDialog),
        (SettingsTab::Security, Key::Char('o')) => Some(AppCommand::RequestSignOut),

        _ => None,
    }
}

/// Keys while a form has focus: everything printable is typed into it
fn handle_form_keys(event: KeyEvent, form: &dyn Form, state: &AppState) -> Option<AppCommand> {
    if let Some(c) = event.ctrl_char() {
        return handle_form_chord(c, state);
    }

    match event.key {
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),
        Key::Enter => submit_command(state),
        Key::Esc => Some(dismiss_command(state)),
        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        Key::Left | Key::Right if !form.focused_is_text() => Some(AppCommand::CycleFormFieldValue {
            forward: event.key == Key::Right,
        }),
        Key::Char(' ') if !form.focused_is_text() => {
            Some(AppCommand::CycleFormFieldValue { forward: true })
        }
        Key::Char(c) if form.focused_is_text() => Some(AppCommand::AppendFormFieldChar { c }),
        _ => None,
    }
}

fn handle_form_chord(c: char, state: &AppState) -> Option<AppCommand> {
    match (state.current_screen(), c) {
        (_, 'l') => Some(AppCommand::ClearFormField),

        // Sign-in page shortcuts, only while no dialog is open
        (Screen::Login(login), 'g') if login.dialog.is_none() => {
            Some(AppCommand::OpenGoogleDialog)
        }
        (Screen::Login(login), 'r') if login.dialog.is_none() => {
            Some(AppCommand::OpenResetDialog)
        }
        (Screen::Login(login), 'n') if login.dialog.is_none() => Some(AppCommand::Navigate {
            location: Route::Register.into(),
            replace: false,
        }),

        _ => None,
    }
}

fn submit_command(state: &AppState) -> Option<AppCommand> {
    match state.current_screen() {
        Screen::Login(login) => Some(match login.dialog.as_ref().map(|d| d.kind) {
            Some(EmailDialogKind::Google) => AppCommand::SubmitGoogleLogin,
            Some(EmailDialogKind::PasswordReset) => AppCommand::SubmitPasswordReset,
            None => AppCommand::SubmitLogin,
        }),
        Screen::Register(_) => Some(AppCommand::SubmitRegister),
        Screen::Dashboard(_) | Screen::Transactions(_) => Some(AppCommand::SubmitTransactionForm),
        Screen::Settings(settings) if settings.password_dialog.is_some() => {
            Some(AppCommand::SubmitPasswordChange)
        }
        Screen::Settings(settings) if settings.profile_form.is_some() => {
            Some(AppCommand::SaveProfile)
        }
        _ => None,
    }
}

/// Esc closes the innermost layer; the bare auth pages go back instead
fn dismiss_command(state: &AppState) -> AppCommand {
    match state.current_screen() {
        Screen::Login(login) if login.dialog.is_none() => AppCommand::NavigateBack,
        Screen::Register(_) => AppCommand::NavigateBack,
        _ => AppCommand::CloseDialog,
    }
}
