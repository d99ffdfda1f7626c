use moneymap::appearance::{ThemePreference, THEME_KEY};
use moneymap::input::{Key, KeyEvent};
use moneymap::ledger_store::LedgerStore;
use moneymap::navigation::Location;
use moneymap::preferences::{Currency, SETTINGS_KEY};
use moneymap::services::Storage;
use moneymap::state::reducer::RESET_EMAIL_SENT;
use moneymap::state::validators::{ENTER_VALID_EMAIL, FILL_ALL_FIELDS};
use moneymap::testing::TestApp;
use moneymap::ui::screens::Screen;
use moneymap_auth::{KeyValueStore, SESSION_KEY};

fn login_screen() -> std::mem::Discriminant<Screen> {
    std::mem::discriminant(&Screen::Login(Box::default()))
}

/// Fill in the login form that is currently shown and submit it
fn sign_in(app: &mut TestApp, email: &str) {
    app.type_text(email);
    app.send_key(Key::Tab);
    app.type_text("correct horse");
    app.send_key(Key::Enter);
}

fn signed_in_at(path: &str) -> TestApp {
    let mut app = TestApp::start_at("/login");
    sign_in(&mut app, "jane@example.com");
    app.execute(moneymap::events::AppCommand::Navigate {
        location: Location::parse(path),
        replace: false,
    });
    app
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    // Initially should not quit
    app.assert_not_quit();

    // Press 'q' to quit
    app.send_key(Key::Char('q'));

    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();
    assert!(!app.state().help_visible);

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_typing_q_in_a_form_does_not_quit() {
    let mut app = TestApp::start_at("/login");
    app.type_text("q@example.com");

    app.assert_not_quit();
    let Screen::Login(login) = app.state().current_screen() else {
        panic!("expected login screen");
    };
    assert_eq!(login.form.email, "q@example.com");
}

// ============================================================================
// Guards and redirects
// ============================================================================

#[test]
fn test_deep_link_returns_after_sign_in() {
    let mut app = TestApp::start_at("/transactions");

    app.assert_screen_type(login_screen());
    assert_eq!(app.location().to_string(), "/login?redirect=%2Ftransactions");

    sign_in(&mut app, "jane@example.com");

    assert!(app.state().is_authenticated());
    assert!(matches!(app.state().current_screen(), Screen::Transactions(_)));
    assert_eq!(app.location().path(), "/transactions");
}

#[test]
fn test_sign_in_without_redirect_lands_on_dashboard() {
    let mut app = TestApp::start_at("/login");
    sign_in(&mut app, "jane@example.com");

    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));
}

#[test]
fn test_signed_in_user_is_kept_off_guest_pages() {
    let mut app = signed_in_at("/register");

    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));

    app.execute(moneymap::events::AppCommand::Navigate {
        location: Location::parse("/login"),
        replace: false,
    });
    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));
}

#[test]
fn test_stored_session_is_restored_on_start() {
    let first = signed_in_at("/dashboard");
    let storage = first.storage().clone();

    let app = TestApp::start_with(storage, "/settings");

    assert!(app.state().is_authenticated());
    assert!(matches!(app.state().current_screen(), Screen::Settings(_)));
}

#[test]
fn test_sign_out_from_menu() {
    let mut app = signed_in_at("/dashboard");
    assert!(app.storage().contains(SESSION_KEY));

    // Dashboard, Transactions, Settings, Sign out
    app.send_key(Key::Char('4'));

    assert!(!app.state().is_authenticated());
    app.assert_screen_type(login_screen());
    assert_eq!(app.location().path(), "/login");
    assert!(!app.storage().contains(SESSION_KEY));

    // Nothing to go back to
    app.send_key(Key::Esc);
    app.assert_screen_type(login_screen());
}

#[test]
fn test_sign_out_from_settings_asks_first() {
    let mut app = signed_in_at("/settings");

    // Profile -> Preferences -> Security
    app.send_keys(&[Key::Tab, Key::Tab]);
    app.send_key(Key::Char('o'));
    let Screen::Settings(settings) = app.state().current_screen() else {
        panic!("expected settings screen");
    };
    assert!(settings.confirm_sign_out);

    app.send_key(Key::Char('n'));
    assert!(app.state().is_authenticated());

    app.send_key(Key::Char('o'));
    app.send_key(Key::Char('y'));
    assert!(!app.state().is_authenticated());
    app.assert_screen_type(login_screen());
}

// ============================================================================
// Login page dialogs
// ============================================================================

#[test]
fn test_empty_login_shows_inline_error() {
    let mut app = TestApp::start_at("/login");
    app.send_key(Key::Enter);

    let Screen::Login(login) = app.state().current_screen() else {
        panic!("expected login screen");
    };
    assert_eq!(login.form.error.as_deref(), Some(FILL_ALL_FIELDS));
    assert!(!app.state().is_authenticated());
}

#[test]
fn test_google_dialog_validates_email() {
    let mut app = TestApp::start_at("/login");
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('g')));
    app.type_text("not-an-email");
    app.send_key(Key::Enter);

    let Screen::Login(login) = app.state().current_screen() else {
        panic!("expected login screen");
    };
    let dialog = login.dialog.as_ref().expect("dialog stays open");
    assert_eq!(dialog.error.as_deref(), Some(ENTER_VALID_EMAIL));

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('l')));
    app.type_text("jane@gmail.com");
    app.send_key(Key::Enter);

    assert!(app.state().is_authenticated());
    assert!(matches!(app.state().current_screen(), Screen::Dashboard(_)));
}

#[test]
fn test_password_reset_shows_notice() {
    let mut app = TestApp::start_at("/login");
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('r')));
    app.type_text("jane@example.com");
    app.send_key(Key::Enter);

    let Screen::Login(login) = app.state().current_screen() else {
        panic!("expected login screen");
    };
    assert!(login.dialog.is_none());
    assert_eq!(
        login.notice.as_ref().map(|n| n.text.as_str()),
        Some(RESET_EMAIL_SENT)
    );
    assert!(!app.state().is_authenticated());
}

// ============================================================================
// Transactions
// ============================================================================

#[test]
fn test_dashboard_appends_new_transaction() {
    let mut app = signed_in_at("/dashboard");

    app.send_key(Key::Char('a'));
    app.type_text("Coffee");
    app.send_key(Key::Tab);
    app.type_text("4.50");
    app.send_key(Key::Enter);

    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("expected dashboard screen");
    };
    assert_eq!(dashboard.ledger.len(), 9);
    let added = dashboard.ledger.transactions().last().unwrap();
    assert_eq!(added.description, "Coffee");
    assert_eq!(added.amount.cents(), 450);
    assert!(dashboard.form.description.is_empty());

    let user = app.state().session.user.clone().unwrap();
    assert!(app.storage().contains(&LedgerStore::<Storage>::key_for(&user)));
}

#[test]
fn test_transactions_page_prepends_and_closes_form() {
    let mut app = signed_in_at("/transactions");

    app.send_key(Key::Char('a'));
    app.type_text("Bonus");
    app.send_key(Key::Tab);
    app.type_text("250");
    // Kind: expense -> income
    app.send_key(Key::Tab);
    app.send_key(Key::Right);
    app.send_key(Key::Enter);

    let Screen::Transactions(transactions) = app.state().current_screen() else {
        panic!("expected transactions screen");
    };
    assert!(transactions.form.is_none());
    let added = &transactions.ledger.transactions()[0];
    assert_eq!(added.description, "Bonus");
    assert!(added.kind.is_income());
}

#[test]
fn test_selection_lands_on_backdated_transaction() {
    let mut app = signed_in_at("/transactions");

    app.send_key(Key::Char('a'));
    app.type_text("Old refund");
    app.send_key(Key::Tab);
    app.type_text("12");
    // Kind -> Category -> Date
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('l')));
    app.type_text("2020-01-01");
    app.send_key(Key::Enter);

    let Screen::Transactions(transactions) = app.state().current_screen() else {
        panic!("expected transactions screen");
    };
    assert!(transactions.form.is_none());
    assert_eq!(transactions.ledger.transactions()[0].description, "Old refund");

    // Oldest date, so last in the table even though it was prepended
    let selected = transactions.table_state.borrow().selected();
    assert_eq!(selected, Some(transactions.ledger.len() - 1));
    assert_eq!(
        transactions.selected_transaction().map(|t| t.description.as_str()),
        Some("Old refund")
    );
}

#[test]
fn test_invalid_amount_keeps_form_open() {
    let mut app = signed_in_at("/transactions");

    app.send_key(Key::Char('a'));
    app.type_text("Lunch");
    app.send_key(Key::Tab);
    app.type_text("abc");
    app.send_key(Key::Enter);

    let Screen::Transactions(transactions) = app.state().current_screen() else {
        panic!("expected transactions screen");
    };
    let form = transactions.form.as_ref().expect("form stays open");
    assert!(form.error.is_some());
    assert_eq!(transactions.ledger.len(), 8);
}

#[test]
fn test_ledgers_are_kept_per_user() {
    let mut app = signed_in_at("/dashboard");
    app.send_key(Key::Char('a'));
    app.type_text("Coffee");
    app.send_key(Key::Tab);
    app.type_text("3");
    app.send_key(Key::Enter);
    app.send_key(Key::Esc);

    // Sign out and in as someone else
    app.send_key(Key::Char('4'));
    sign_in(&mut app, "sam@example.com");

    let Screen::Dashboard(dashboard) = app.state().current_screen() else {
        panic!("expected dashboard screen");
    };
    assert_eq!(dashboard.ledger.len(), 8);
}

// ============================================================================
// Settings and appearance
// ============================================================================

#[test]
fn test_theme_cycle_persists_explicit_choices_only() {
    let mut app = TestApp::new();
    assert_eq!(app.state().appearance.preference, ThemePreference::System);

    app.send_key(Key::Char('t'));
    assert_eq!(app.state().appearance.preference, ThemePreference::Light);
    assert_eq!(app.storage().get(THEME_KEY).unwrap().as_deref(), Some("light"));

    app.send_key(Key::Char('t'));
    assert_eq!(app.storage().get(THEME_KEY).unwrap().as_deref(), Some("dark"));

    app.send_key(Key::Char('t'));
    assert_eq!(app.state().appearance.preference, ThemePreference::System);
    assert!(!app.storage().contains(THEME_KEY));
}

#[test]
fn test_saving_preferences_changes_currency() {
    let mut app = signed_in_at("/settings");

    app.send_key(Key::Tab);
    app.send_key(Key::Right);
    app.send_key(Key::Char('s'));

    assert_eq!(app.state().settings.currency, Currency::Eur);
    assert!(app.storage().contains(SETTINGS_KEY));
    let Screen::Settings(settings) = app.state().current_screen() else {
        panic!("expected settings screen");
    };
    assert!(settings.status.is_some());
}

#[test]
fn test_profile_edit_is_saved() {
    let mut app = signed_in_at("/settings");

    app.send_key(Key::Char('e'));
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('l')));
    app.type_text("Jane Doe");
    app.send_key(Key::Enter);

    let Screen::Settings(settings) = app.state().current_screen() else {
        panic!("expected settings screen");
    };
    assert!(settings.profile_form.is_none());
    assert_eq!(settings.profile.name, "Jane Doe");
}
