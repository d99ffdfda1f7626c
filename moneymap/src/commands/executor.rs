use crate::background::TaskSpawner;
use crate::events::{AppCommand, DataEvent};
use crate::navigation::{self, GuardOutcome, Location, MenuAction, Route};
use crate::services::Services;
use crate::state::validators;
use crate::state::*;
use crate::ui::screens::Screen;
use chrono::NaiveDate;
use moneymap_ledger::InsertPosition;

/// A redirect chain longer than this means the guards disagree with each other
const MAX_REDIRECTS: usize = 4;

/// Execute a command by updating state and spawning background tasks
pub fn execute_command<T: TaskSpawner>(
    command: AppCommand,
    state: &mut AppState,
    tasks: &mut T,
    services: &Services,
) {
    match command {
        // ====================================================================
        // Navigation
        // ====================================================================
        AppCommand::Navigate { location, replace } => {
            navigate(state, services, location, replace);
        }

        AppCommand::NavigateBack => {
            // Re-run the guards: the page we return to may no longer be allowed
            if let Some(location) = state.pop_history() {
                navigate(state, services, location, true);
            }
        }

        AppCommand::SelectMenuItem(index) => {
            let Some(item) = navigation::menu(state.is_authenticated()).get(index) else {
                tracing::debug!("No menu entry at position {}", index + 1);
                return;
            };
            match item.action {
                MenuAction::Go(route) => navigate(state, services, route.into(), false),
                MenuAction::SignOut => execute_command(AppCommand::SignOut, state, tasks, services),
            }
        }

        AppCommand::SelectNext => match state.current_screen_mut() {
            Screen::Home(home) => {
                home.selected = (home.selected + 1) % FEATURES.len();
            }
            Screen::Transactions(transactions) => transactions.select_next(),
            _ => {}
        },

        AppCommand::SelectPrevious => match state.current_screen_mut() {
            Screen::Home(home) => {
                home.selected = (home.selected + FEATURES.len() - 1) % FEATURES.len();
            }
            Screen::Transactions(transactions) => transactions.select_prev(),
            _ => {}
        },

        AppCommand::OpenSelected => {
            if let Screen::Home(home) = state.current_screen() {
                if let Some(feature) = home.selected_feature() {
                    let location = feature.route.into();
                    navigate(state, services, location, false);
                }
            }
        }

        // ====================================================================
        // Session
        // ====================================================================
        AppCommand::RestoreSession => {
            let services = services.clone();
            tasks.spawn_task("restore_session", services.restore_session());
        }

        AppCommand::SubmitLogin => {
            let target = navigation::post_login_target(state.location());
            let Screen::Login(login) = state.current_screen_mut() else {
                return;
            };
            match validators::validate_login(&login.form) {
                Ok((email, password)) => {
                    login.form.error = None;
                    login.form.submitting = LoadingState::loading();
                    tracing::info!("Signing in as {}", email);
                    tasks.spawn_task(
                        "sign_in",
                        services.clone().sign_in(email, password, target),
                    );
                }
                Err(error) => login.form.error = Some(error),
            }
        }

        AppCommand::SubmitRegister => {
            let target = navigation::post_login_target(state.location());
            let Screen::Register(register) = state.current_screen_mut() else {
                return;
            };
            match validators::validate_registration(&register.form) {
                Ok(registration) => {
                    register.form.error = None;
                    register.form.submitting = LoadingState::loading();
                    tracing::info!("Registering {}", registration.email);
                    tasks.spawn_task(
                        "register",
                        services.clone().register(
                            registration.name,
                            registration.email,
                            registration.password,
                            target,
                        ),
                    );
                }
                Err(error) => register.form.error = Some(error),
            }
        }

        AppCommand::OpenGoogleDialog => open_email_dialog(state, EmailDialogKind::Google),
        AppCommand::OpenResetDialog => open_email_dialog(state, EmailDialogKind::PasswordReset),

        AppCommand::SubmitGoogleLogin => {
            let target = navigation::post_login_target(state.location());
            let Some(dialog) = login_dialog_mut(state) else {
                return;
            };
            match validators::validate_google_email(&dialog.email) {
                Ok(email) => {
                    dialog.error = None;
                    dialog.submitting = LoadingState::loading();
                    tasks.spawn_task(
                        "google_sign_in",
                        services.clone().sign_in_with_google(email, target),
                    );
                }
                Err(error) => dialog.error = Some(error),
            }
        }

        AppCommand::SubmitPasswordReset => {
            let Some(dialog) = login_dialog_mut(state) else {
                return;
            };
            match validators::validate_reset_email(&dialog.email) {
                Ok(email) => {
                    dialog.error = None;
                    dialog.submitting = LoadingState::loading();
                    tasks.spawn_task("password_reset", services.clone().reset_password(email));
                }
                Err(error) => dialog.error = Some(error),
            }
        }

        AppCommand::CloseDialog => match state.current_screen_mut() {
            Screen::Login(login) => login.dialog = None,
            Screen::Dashboard(dashboard) => dashboard.form_focused = false,
            Screen::Transactions(transactions) => transactions.form = None,
            Screen::Settings(settings) => {
                if settings.confirm_sign_out {
                    settings.confirm_sign_out = false;
                } else if settings.password_dialog.is_some() {
                    settings.password_dialog = None;
                } else {
                    settings.profile_form = None;
                }
            }
            _ => {}
        },

        AppCommand::RequestSignOut => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.confirm_sign_out = true;
            }
        }

        AppCommand::SignOut => {
            // Results still in flight belong to the old session
            tasks.cancel_all();
            if let Err(e) = services.session.logout() {
                tracing::error!("Failed to clear stored session: {}", e);
            }
            state.session = services.session.snapshot();
            state.clear_history();
            tracing::info!("Signed out");
            navigate(state, services, Route::Login.into(), true);
        }

        // ====================================================================
        // Form editing
        // ====================================================================
        AppCommand::FocusForm => {
            if let Screen::Dashboard(dashboard) = state.current_screen_mut() {
                dashboard.form_focused = true;
            }
        }

        AppCommand::NavigateFormField { forward } => {
            if let Some(form) = state.active_form_mut() {
                if forward {
                    form.focus_next();
                } else {
                    form.focus_previous();
                }
            }
        }

        AppCommand::AppendFormFieldChar { c } => {
            if let Some(input) = state.active_form_mut().and_then(|f| f.focused_input()) {
                input.push(c);
            }
        }

        AppCommand::DeleteFormFieldChar => {
            if let Some(input) = state.active_form_mut().and_then(|f| f.focused_input()) {
                input.pop();
            }
        }

        AppCommand::ClearFormField => {
            if let Some(input) = state.active_form_mut().and_then(|f| f.focused_input()) {
                input.clear();
            }
        }

        AppCommand::CycleFormFieldValue { forward } => {
            if let Some(form) = state.active_form_mut() {
                form.cycle_focused(forward);
            }
        }

        // ====================================================================
        // Transactions
        // ====================================================================
        AppCommand::OpenTransactionForm => {
            if let Screen::Transactions(transactions) = state.current_screen_mut() {
                transactions.form = Some(TransactionForm::new(transactions.today));
            }
        }

        AppCommand::SubmitTransactionForm => submit_transaction_form(state, services),

        // ====================================================================
        // Settings
        // ====================================================================
        AppCommand::SwitchSettingsTab { forward } => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.tab = settings.tab.cycle(forward);
            }
        }

        AppCommand::EditProfile => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.profile_form = Some(ProfileForm::from_profile(&settings.profile));
            }
        }

        AppCommand::SaveProfile => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                let Some(form) = &settings.profile_form else {
                    return;
                };
                let profile = form.apply_to(&settings.profile);
                settings.saving = LoadingState::loading();
                tasks.spawn_task("save_profile", services.clone().save_profile(profile));
            }
        }

        AppCommand::SaveSettings => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.saving = LoadingState::loading();
                let pending = settings.preferences.settings;
                tasks.spawn_task("save_settings", services.clone().save_settings(pending));
            }
        }

        AppCommand::OpenPasswordDialog => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                settings.password_dialog = Some(PasswordForm::default());
            }
        }

        AppCommand::SubmitPasswordChange => {
            if let Screen::Settings(settings) = state.current_screen_mut() {
                let Some(dialog) = settings.password_dialog.as_mut() else {
                    return;
                };
                match validators::validate_password_change(dialog) {
                    Ok(()) => {
                        dialog.error = None;
                        settings.saving = LoadingState::loading();
                        tasks.spawn_task("change_password", services.clone().change_password());
                    }
                    Err(error) => dialog.error = Some(error),
                }
            }
        }

        // ====================================================================
        // Appearance
        // ====================================================================
        AppCommand::CycleTheme => {
            match services.theme.cycle() {
                Ok(preference) => tracing::info!("Theme preference is now {}", preference),
                Err(e) => tracing::warn!("Failed to persist theme preference: {}", e),
            }
            state.appearance = services.theme.snapshot();
        }

        AppCommand::ApplyOsColorScheme { prefers_dark } => {
            if services.theme.set_os_prefers_dark(prefers_dark) {
                tracing::debug!("Effective theme changed with the OS color scheme");
            }
            state.appearance = services.theme.snapshot();
        }

        // ====================================================================
        // System
        // ====================================================================
        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
        }

        AppCommand::Quit => {
            state.should_quit = true;
        }
    }
}

/// Run the reducer, then whatever it asks for next
pub fn process_data_event<T: TaskSpawner>(
    event: DataEvent,
    state: &mut AppState,
    tasks: &mut T,
    services: &Services,
) {
    if let Some(command) = reducer::reduce_data_event(state, event) {
        execute_command(command, state, tasks, services);
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Guard `location`, follow redirects, and show the resulting page
fn navigate(state: &mut AppState, services: &Services, location: Location, replace: bool) {
    // Re-selecting the current page rebuilds it instead of stacking a copy
    let replace = replace || &location == state.location();
    let mut location = location;

    for _ in 0..MAX_REDIRECTS {
        match navigation::guard(&location, &state.session) {
            GuardOutcome::Render(route) => {
                let screen = build_screen(route, state, services);
                show_page(state, Page { location, screen }, replace);
                return;
            }
            GuardOutcome::Redirect(next) => {
                tracing::debug!("Redirecting {} -> {}", location, next);
                location = next;
            }
            GuardOutcome::Wait => {
                tracing::debug!("Waiting for session before showing {}", location);
                let screen = Screen::Restoring(RestoringState::default());
                show_page(state, Page { location, screen }, replace);
                return;
            }
        }
    }

    tracing::warn!("Too many redirects while navigating to {}", location);
}

fn show_page(state: &mut AppState, page: Page, replace: bool) {
    state.help_visible = false;
    if replace {
        state.replace_page(page);
    } else {
        state.push_page(page);
    }
}

/// Fresh page-local state for `route`
fn build_screen(route: Route, state: &mut AppState, services: &Services) -> Screen {
    let user = state.session.user.clone();
    let today = today();

    match (route, user) {
        (Route::Home, _) => Screen::Home(HomeState::default()),
        (Route::Login, _) => Screen::Login(Box::default()),
        (Route::Register, _) => Screen::Register(Box::default()),
        (Route::Dashboard, Some(user)) => Screen::Dashboard(Box::new(DashboardState::new(
            services.ledger.load(&user),
            today,
        ))),
        (Route::Transactions, Some(user)) => Screen::Transactions(Box::new(
            TransactionsState::new(services.ledger.load(&user), today),
        )),
        (Route::Settings, Some(user)) => {
            state.settings = services.preferences.load_settings();
            let profile = services.preferences.load_profile(Some(&user), today);
            Screen::Settings(Box::new(SettingsState::new(profile, state.settings)))
        }
        // Guards only render protected routes with a user present
        (route, None) => {
            tracing::warn!("Rendering {} without a session", route.path());
            Screen::Home(HomeState::default())
        }
    }
}

fn open_email_dialog(state: &mut AppState, kind: EmailDialogKind) {
    if let Screen::Login(login) = state.current_screen_mut() {
        login.dialog = Some(EmailDialog::new(kind));
    }
}

fn login_dialog_mut(state: &mut AppState) -> Option<&mut EmailDialog> {
    match state.current_screen_mut() {
        Screen::Login(login) => login.dialog.as_mut(),
        _ => None,
    }
}

/// Validate the visible transaction form and add it to the user's ledger.
/// The dashboard appends, the transactions page prepends and closes its
/// dialog.
fn submit_transaction_form(state: &mut AppState, services: &Services) {
    let Some(user) = state.session.user.clone() else {
        return;
    };

    match state.current_screen_mut() {
        Screen::Dashboard(dashboard) => {
            let result = validators::validate_transaction_form(&dashboard.form).and_then(|draft| {
                services
                    .ledger
                    .add(&user, draft, InsertPosition::Back)
                    .map_err(|e| e.to_string())
            });
            match result {
                Ok(ledger) => {
                    dashboard.ledger = ledger;
                    dashboard.form = TransactionForm::new(dashboard.today);
                }
                Err(error) => dashboard.form.error = Some(error),
            }
        }
        Screen::Transactions(transactions) => {
            let Some(form) = transactions.form.as_mut() else {
                return;
            };
            let result = validators::validate_transaction_form(form).and_then(|draft| {
                services
                    .ledger
                    .add(&user, draft, InsertPosition::Front)
                    .map_err(|e| e.to_string())
            });
            match result {
                Ok(ledger) => {
                    let added = ledger.transactions().first().map(|t| t.id);
                    transactions.ledger = ledger;
                    transactions.form = None;
                    if let Some(id) = added {
                        transactions.select_transaction(id);
                    }
                }
                Err(error) => form.error = Some(error),
            }
        }
        _ => {}
    }
}
