mod app;
pub mod app_core;
pub mod appearance;
pub mod background;
pub mod commands;
pub mod events;
pub mod input;
pub mod ledger_store;
pub mod logging;
pub mod navigation;
pub mod preferences;
pub mod services;
pub mod state;
pub mod ui;

pub use app::App;

// Always expose testing module (integration tests need it)
pub mod testing;
