use crate::navigation::Location;
use crate::preferences::{AppSettings, UserProfile};
use moneymap_auth::User;

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Navigation
    Navigate { location: Location, replace: bool },
    NavigateBack,
    SelectMenuItem(usize),
    SelectNext,
    SelectPrevious,
    OpenSelected,

    // Session
    RestoreSession,
    SubmitLogin,
    SubmitRegister,
    OpenGoogleDialog,
    SubmitGoogleLogin,
    OpenResetDialog,
    SubmitPasswordReset,
    CloseDialog,
    RequestSignOut,
    SignOut,

    // Form editing (applies to whichever form has focus)
    FocusForm,
    NavigateFormField { forward: bool },
    AppendFormFieldChar { c: char },
    DeleteFormFieldChar,
    ClearFormField,
    CycleFormFieldValue { forward: bool },

    // Transactions
    OpenTransactionForm,
    SubmitTransactionForm,

    // Settings
    SwitchSettingsTab { forward: bool },
    EditProfile,
    SaveProfile,
    SaveSettings,
    OpenPasswordDialog,
    SubmitPasswordChange,

    // Appearance
    CycleTheme,
    ApplyOsColorScheme { prefers_dark: bool },

    // System
    ToggleHelp,
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Session
    SessionRestored { user: Option<User> },
    SignedIn { user: User, target: Location },
    AuthFailed { error: String },
    PasswordResetSent { email: String },

    // Appearance
    OsColorSchemeChanged { prefers_dark: bool },

    // Settings page
    SettingsSaved { settings: AppSettings },
    ProfileSaved { profile: UserProfile },
    PasswordChanged,
    PreferencesFailed { error: String },
}
