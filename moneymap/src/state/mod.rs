pub mod reducer;
pub mod validators;

use crate::appearance::ThemeSnapshot;
use crate::navigation::{Location, Route};
use crate::preferences::{AppSettings, StatusMessage, UserProfile};
use crate::ui::screens::Screen;
use chrono::NaiveDate;
use moneymap_auth::SessionSnapshot;
use moneymap_ledger::{Category, Ledger, Transaction, TransactionId, TransactionKind};
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn loading() -> Self {
        Self::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    fn throbber_mut(&mut self) -> Option<&mut ThrobberState> {
        match self {
            Self::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }
}

/// Step through `all` from `current`, wrapping at both ends
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let index = all.iter().position(|item| *item == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    all[next]
}

/// A form that takes keyboard input one field at a time
pub trait Form {
    fn focus_next(&mut self);
    fn focus_previous(&mut self);

    /// Text buffer of the focused field, None when it is a choice field
    fn focused_input(&mut self) -> Option<&mut String>;

    fn focused_is_text(&self) -> bool;

    /// Step the value of a choice field
    fn cycle_focused(&mut self, _forward: bool) {}

    /// Whether the form takes every key while it is active
    fn captures_keys(&self) -> bool {
        true
    }
}

// ============================================================================
// Sign in / sign up
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub submitting: LoadingState,
}

impl Form for LoginForm {
    fn focus_next(&mut self) {
        self.focus = cycle(&[LoginField::Email, LoginField::Password], self.focus, true);
    }

    fn focus_previous(&mut self) {
        self.focus = cycle(&[LoginField::Email, LoginField::Password], self.focus, false);
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        Some(match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        })
    }

    fn focused_is_text(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailDialogKind {
    Google,
    PasswordReset,
}

/// Single-field email prompt layered over the sign-in page
#[derive(Debug, Clone, PartialEq)]
pub struct EmailDialog {
    pub kind: EmailDialogKind,
    pub email: String,
    pub error: Option<String>,
    pub submitting: LoadingState,
}

impl EmailDialog {
    pub fn new(kind: EmailDialogKind) -> Self {
        Self {
            kind,
            email: String::new(),
            error: None,
            submitting: LoadingState::NotStarted,
        }
    }
}

impl Form for EmailDialog {
    fn focus_next(&mut self) {}

    fn focus_previous(&mut self) {}

    fn focused_input(&mut self) -> Option<&mut String> {
        Some(&mut self.email)
    }

    fn focused_is_text(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub form: LoginForm,
    pub dialog: Option<EmailDialog>,
    /// Confirmation shown after a password reset request
    pub notice: Option<StatusMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Name,
    Email,
    Password,
    Confirm,
}

impl RegisterField {
    const ALL: [RegisterField; 4] = [
        RegisterField::Name,
        RegisterField::Email,
        RegisterField::Password,
        RegisterField::Confirm,
    ];
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub focus: RegisterField,
    pub error: Option<String>,
    pub submitting: LoadingState,
}

impl Form for RegisterForm {
    fn focus_next(&mut self) {
        self.focus = cycle(&RegisterField::ALL, self.focus, true);
    }

    fn focus_previous(&mut self) {
        self.focus = cycle(&RegisterField::ALL, self.focus, false);
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        Some(match self.focus {
            RegisterField::Name => &mut self.name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::Confirm => &mut self.confirm,
        })
    }

    fn focused_is_text(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterState {
    pub form: RegisterForm,
}

// ============================================================================
// Transactions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Description,
    Amount,
    Kind,
    Category,
    Date,
}

impl TransactionField {
    const ALL: [TransactionField; 5] = [
        TransactionField::Description,
        TransactionField::Amount,
        TransactionField::Kind,
        TransactionField::Category,
        TransactionField::Date,
    ];
}

/// Form state for a new transaction; amount and date stay raw text until
/// submitted
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: String,
    pub focus: TransactionField,
    pub error: Option<String>,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            kind: TransactionKind::default(),
            category: Category::default(),
            date: today.format("%Y-%m-%d").to_string(),
            focus: TransactionField::default(),
            error: None,
        }
    }
}

impl Form for TransactionForm {
    fn focus_next(&mut self) {
        self.focus = cycle(&TransactionField::ALL, self.focus, true);
    }

    fn focus_previous(&mut self) {
        self.focus = cycle(&TransactionField::ALL, self.focus, false);
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            TransactionField::Description => Some(&mut self.description),
            TransactionField::Amount => Some(&mut self.amount),
            TransactionField::Date => Some(&mut self.date),
            TransactionField::Kind | TransactionField::Category => None,
        }
    }

    fn focused_is_text(&self) -> bool {
        !matches!(
            self.focus,
            TransactionField::Kind | TransactionField::Category
        )
    }

    fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            TransactionField::Kind => self.kind = self.kind.toggle(),
            TransactionField::Category if forward => self.category = self.category.next(),
            TransactionField::Category => self.category = self.category.previous(),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub ledger: Ledger,
    pub form: TransactionForm,
    /// The quick-add form only takes keys while focused
    pub form_focused: bool,
    pub today: NaiveDate,
}

impl DashboardState {
    pub fn new(ledger: Ledger, today: NaiveDate) -> Self {
        Self {
            ledger,
            form: TransactionForm::new(today),
            form_focused: false,
            today,
        }
    }

    /// Month the trailing monthly totals end at: that of the newest
    /// transaction, so older ledgers still show their activity
    pub fn monthly_totals_through(&self) -> NaiveDate {
        self.ledger
            .transactions()
            .iter()
            .map(|t| t.date)
            .max()
            .unwrap_or(self.today)
    }
}

#[derive(Debug, Clone)]
pub struct TransactionsState {
    pub ledger: Ledger,
    pub table_state: RefCell<TableState>,
    pub form: Option<TransactionForm>,
    pub today: NaiveDate,
}

impl TransactionsState {
    pub fn new(ledger: Ledger, today: NaiveDate) -> Self {
        let selected = if ledger.is_empty() { None } else { Some(0) };
        Self {
            ledger,
            table_state: RefCell::new(TableState::default().with_selected(selected)),
            form: None,
            today,
        }
    }

    /// Transactions in table order, newest date first. The selection
    /// indexes into this list.
    pub fn rows(&self) -> Vec<&Transaction> {
        self.ledger.by_date_desc()
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        let index = self.table_state.borrow().selected()?;
        self.rows().get(index).copied()
    }

    /// Move the selection onto the row showing `id`
    pub fn select_transaction(&self, id: TransactionId) {
        let index = self.rows().iter().position(|t| t.id == id);
        self.table_state.borrow_mut().select(index);
    }
}

impl PartialEq for TransactionsState {
    fn eq(&self, other: &Self) -> bool {
        self.ledger == other.ledger
            && self.form == other.form
            && self.table_state.borrow().selected() == other.table_state.borrow().selected()
    }
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select(Some(self.num_items() - 1));
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

impl Scrollable for TransactionsState {
    fn num_items(&self) -> usize {
        self.ledger.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Profile,
    Preferences,
    Security,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [
        SettingsTab::Profile,
        SettingsTab::Preferences,
        SettingsTab::Security,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profile",
            SettingsTab::Preferences => "Preferences",
            SettingsTab::Security => "Security",
        }
    }

    pub fn cycle(&self, forward: bool) -> Self {
        cycle(&Self::ALL, *self, forward)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Email,
    Phone,
    Location,
    Bio,
}

impl ProfileField {
    const ALL: [ProfileField; 5] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Location,
        ProfileField::Bio,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub focus: ProfileField,
    pub error: Option<String>,
}

impl ProfileForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            focus: ProfileField::default(),
            error: None,
        }
    }

    /// The edited profile; the join date is not editable
    pub fn apply_to(&self, profile: &UserProfile) -> UserProfile {
        UserProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            location: self.location.trim().to_string(),
            bio: self.bio.clone(),
            join_date: profile.join_date,
        }
    }
}

impl Form for ProfileForm {
    fn focus_next(&mut self) {
        self.focus = cycle(&ProfileField::ALL, self.focus, true);
    }

    fn focus_previous(&mut self) {
        self.focus = cycle(&ProfileField::ALL, self.focus, false);
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        Some(match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Location => &mut self.location,
            ProfileField::Bio => &mut self.bio,
        })
    }

    fn focused_is_text(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferenceField {
    #[default]
    Currency,
    Notifications,
}

/// Pending edits of the application settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreferencesForm {
    pub settings: AppSettings,
    pub focus: PreferenceField,
}

impl Form for PreferencesForm {
    fn focus_next(&mut self) {
        self.focus = cycle(
            &[PreferenceField::Currency, PreferenceField::Notifications],
            self.focus,
            true,
        );
    }

    fn focus_previous(&mut self) {
        self.focus = cycle(
            &[PreferenceField::Currency, PreferenceField::Notifications],
            self.focus,
            false,
        );
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        None
    }

    fn focused_is_text(&self) -> bool {
        false
    }

    fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            PreferenceField::Currency if forward => {
                self.settings.currency = self.settings.currency.next()
            }
            PreferenceField::Currency => {
                self.settings.currency = self.settings.currency.previous()
            }
            PreferenceField::Notifications => {
                self.settings.notifications = !self.settings.notifications
            }
        }
    }

    fn captures_keys(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordField {
    #[default]
    Current,
    New,
    Confirm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current: String,
    pub new_password: String,
    pub confirm: String,
    pub focus: PasswordField,
    pub error: Option<String>,
}

impl PasswordForm {
    const FIELDS: [PasswordField; 3] = [
        PasswordField::Current,
        PasswordField::New,
        PasswordField::Confirm,
    ];
}

impl Form for PasswordForm {
    fn focus_next(&mut self) {
        self.focus = cycle(&Self::FIELDS, self.focus, true);
    }

    fn focus_previous(&mut self) {
        self.focus = cycle(&Self::FIELDS, self.focus, false);
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        Some(match self.focus {
            PasswordField::Current => &mut self.current,
            PasswordField::New => &mut self.new_password,
            PasswordField::Confirm => &mut self.confirm,
        })
    }

    fn focused_is_text(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    pub tab: SettingsTab,
    pub profile: UserProfile,
    /// Present while the profile is being edited
    pub profile_form: Option<ProfileForm>,
    pub preferences: PreferencesForm,
    pub password_dialog: Option<PasswordForm>,
    pub confirm_sign_out: bool,
    pub saving: LoadingState,
    pub status: Option<StatusMessage>,
}

impl SettingsState {
    pub fn new(profile: UserProfile, settings: AppSettings) -> Self {
        Self {
            tab: SettingsTab::default(),
            profile,
            profile_form: None,
            preferences: PreferencesForm {
                settings,
                focus: PreferenceField::default(),
            },
            password_dialog: None,
            confirm_sign_out: false,
            saving: LoadingState::NotStarted,
            status: None,
        }
    }
}

// ============================================================================
// Home and startup
// ============================================================================

/// A feature card on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub name: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        name: "Dashboard",
        description: "View your financial overview and analytics",
        route: Route::Dashboard,
    },
    Feature {
        name: "Transactions",
        description: "Manage your income and expenses",
        route: Route::Transactions,
    },
    Feature {
        name: "Profile",
        description: "Update your account settings",
        route: Route::Settings,
    },
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub selected: usize,
}

impl HomeState {
    pub fn selected_feature(&self) -> Option<&'static Feature> {
        FEATURES.get(self.selected)
    }
}

/// Shown while a protected page waits for the stored session
#[derive(Debug, Clone, PartialEq)]
pub struct RestoringState {
    pub loading: LoadingState,
}

impl Default for RestoringState {
    fn default() -> Self {
        Self {
            loading: LoadingState::loading(),
        }
    }
}

// ============================================================================
// Application state
// ============================================================================

/// What is on screen and the address it was reached by
#[derive(Debug, Clone)]
pub struct Page {
    pub location: Location,
    pub screen: Screen,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub page: Page,
    /// Earlier locations, most recent last
    pub history: Vec<Location>,

    pub session: SessionSnapshot,
    pub appearance: ThemeSnapshot,
    pub settings: AppSettings,

    // UI state
    pub help_visible: bool,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            page: Page {
                location: Location::root(),
                screen: Screen::Restoring(RestoringState::default()),
            },
            history: Vec::new(),
            session: SessionSnapshot {
                user: None,
                is_loading: true,
            },
            appearance: ThemeSnapshot::default(),
            settings: AppSettings::default(),
            help_visible: false,
            should_quit: false,
        }
    }

    pub fn current_screen(&self) -> &Screen {
        &self.page.screen
    }

    pub fn current_screen_mut(&mut self) -> &mut Screen {
        &mut self.page.screen
    }

    pub fn location(&self) -> &Location {
        &self.page.location
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Show a new page, remembering the current one for back navigation
    pub fn push_page(&mut self, page: Page) {
        tracing::debug!(
            "Navigating {} -> {}, stack depth: {}",
            self.page.location,
            page.location,
            self.history.len() + 1
        );
        let previous = std::mem::replace(&mut self.page, page);
        self.history.push(previous.location);
    }

    /// Show a new page in place of the current one
    pub fn replace_page(&mut self, page: Page) {
        tracing::debug!("Replacing {} with {}", self.page.location, page.location);
        self.page = page;
    }

    /// Location to go back to, if any
    pub fn pop_history(&mut self) -> Option<Location> {
        let location = self.history.pop();
        if location.is_none() {
            tracing::debug!("Cannot navigate back, already at first page");
        }
        location
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The form that currently receives typed input
    pub fn active_form(&self) -> Option<&dyn Form> {
        match self.current_screen() {
            Screen::Login(login) => match &login.dialog {
                Some(dialog) => Some(dialog),
                None => Some(&login.form),
            },
            Screen::Register(register) => Some(&register.form),
            Screen::Dashboard(dashboard) if dashboard.form_focused => Some(&dashboard.form),
            Screen::Transactions(transactions) => {
                transactions.form.as_ref().map(|form| form as &dyn Form)
            }
            Screen::Settings(settings) => {
                if let Some(dialog) = &settings.password_dialog {
                    return Some(dialog);
                }
                match settings.tab {
                    SettingsTab::Profile => {
                        settings.profile_form.as_ref().map(|form| form as &dyn Form)
                    }
                    SettingsTab::Preferences => Some(&settings.preferences),
                    SettingsTab::Security => None,
                }
            }
            _ => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self.current_screen_mut() {
            Screen::Login(login) => match &mut login.dialog {
                Some(dialog) => Some(dialog),
                None => Some(&mut login.form),
            },
            Screen::Register(register) => Some(&mut register.form),
            Screen::Dashboard(dashboard) if dashboard.form_focused => Some(&mut dashboard.form),
            Screen::Transactions(transactions) => {
                transactions.form.as_mut().map(|form| form as &mut dyn Form)
            }
            Screen::Settings(settings) => {
                if let Some(dialog) = &mut settings.password_dialog {
                    return Some(dialog);
                }
                match settings.tab {
                    SettingsTab::Profile => settings
                        .profile_form
                        .as_mut()
                        .map(|form| form as &mut dyn Form),
                    SettingsTab::Preferences => Some(&mut settings.preferences),
                    SettingsTab::Security => None,
                }
            }
            _ => None,
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Restoring(state) => state.loading.throbber_mut(),
            Screen::Login(state) => match &mut state.dialog {
                Some(dialog) => dialog.submitting.throbber_mut(),
                None => state.form.submitting.throbber_mut(),
            },
            Screen::Register(state) => state.form.submitting.throbber_mut(),
            Screen::Settings(state) => state.saving.throbber_mut(),
            Screen::Home(_) | Screen::Dashboard(_) | Screen::Transactions(_) => None,
        }
    }

    /// Drop transient messages whose time is up
    pub fn expire_status(&mut self, now: Instant) {
        match self.current_screen_mut() {
            Screen::Settings(state) => {
                if state.status.as_ref().is_some_and(|s| s.is_expired(now)) {
                    state.status = None;
                }
            }
            Screen::Login(state) => {
                if state.notice.as_ref().is_some_and(|s| s.is_expired(now)) {
                    state.notice = None;
                }
            }
            _ => {}
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
