use super::{AppState, LoadingState};
use crate::events::{AppCommand, DataEvent};
use crate::preferences::{StatusMessage, PASSWORD_CHANGED, PROFILE_UPDATED, SETTINGS_SAVED};
use crate::ui::screens::Screen;
use moneymap_auth::SessionSnapshot;
use std::time::Instant;

pub const RESET_EMAIL_SENT: &str = "Password reset email sent";

/// State transition for data events.
///
/// Returns the command to run next when the event changes where the user
/// should be (or how the app should look).
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) -> Option<AppCommand> {
    let now = Instant::now();

    match event {
        // Stored session resolved; re-guard whatever was requested meanwhile
        DataEvent::SessionRestored { user } => {
            state.session = SessionSnapshot {
                user,
                is_loading: false,
            };
            Some(AppCommand::Navigate {
                location: state.location().clone(),
                replace: true,
            })
        }

        DataEvent::SignedIn { user, target } => {
            tracing::info!("Signed in as {}", user.email);
            state.session = SessionSnapshot {
                user: Some(user),
                is_loading: false,
            };
            Some(AppCommand::Navigate {
                location: target,
                replace: true,
            })
        }

        DataEvent::AuthFailed { error } => {
            match state.current_screen_mut() {
                Screen::Login(login) => match &mut login.dialog {
                    Some(dialog) => {
                        dialog.submitting = LoadingState::NotStarted;
                        dialog.error = Some(error);
                    }
                    None => {
                        login.form.submitting = LoadingState::NotStarted;
                        login.form.error = Some(error);
                    }
                },
                Screen::Register(register) => {
                    register.form.submitting = LoadingState::NotStarted;
                    register.form.error = Some(error);
                }
                _ => tracing::debug!("Auth error with no form on screen: {}", error),
            }
            None
        }

        DataEvent::PasswordResetSent { email } => {
            tracing::info!("Password reset requested for {}", email);
            if let Screen::Login(login) = state.current_screen_mut() {
                login.dialog = None;
                login.notice = Some(StatusMessage::success(RESET_EMAIL_SENT, now));
            }
            None
        }

        DataEvent::OsColorSchemeChanged { prefers_dark } => {
            Some(AppCommand::ApplyOsColorScheme { prefers_dark })
        }

        DataEvent::SettingsSaved { settings } => {
            state.settings = settings;
            if let Screen::Settings(settings_state) = state.current_screen_mut() {
                settings_state.preferences.settings = settings;
                settings_state.saving = LoadingState::Loaded;
                settings_state.status = Some(StatusMessage::success(SETTINGS_SAVED, now));
            }
            None
        }

        DataEvent::ProfileSaved { profile } => {
            if let Screen::Settings(settings_state) = state.current_screen_mut() {
                settings_state.profile = profile;
                settings_state.profile_form = None;
                settings_state.saving = LoadingState::Loaded;
                settings_state.status = Some(StatusMessage::success(PROFILE_UPDATED, now));
            }
            None
        }

        DataEvent::PasswordChanged => {
            if let Screen::Settings(settings_state) = state.current_screen_mut() {
                settings_state.password_dialog = None;
                settings_state.saving = LoadingState::Loaded;
                settings_state.status = Some(StatusMessage::success(PASSWORD_CHANGED, now));
            }
            None
        }

        DataEvent::PreferencesFailed { error } => {
            if let Screen::Settings(settings_state) = state.current_screen_mut() {
                settings_state.saving = LoadingState::Error(error.clone());
                settings_state.status = Some(StatusMessage::error(error, now));
            }
            None
        }
    }
}
