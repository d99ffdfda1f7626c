pub mod dashboard_screen;
pub mod home_screen;
pub mod login_screen;
pub mod register_screen;
pub mod restoring_screen;
pub mod settings_screen;
pub mod transactions_screen;

use crate::state::{
    DashboardState, HomeState, LoginState, RegisterState, RestoringState, SettingsState,
    TransactionsState,
};

#[derive(Debug, Clone)]
pub enum Screen {
    Restoring(RestoringState),
    Home(HomeState),
    Login(Box<LoginState>),
    Register(Box<RegisterState>),
    Dashboard(Box<DashboardState>),
    Transactions(Box<TransactionsState>),
    Settings(Box<SettingsState>),
}
