// Client settings shared with the application
mod config;
mod error;
mod models;

// Session service boundary (mock today, network client later)
mod service;
mod session;
pub mod storage;

pub use config::Settings;
pub use error::{AuthError, StorageError};
pub use models::{local_part, user_id_for, AuthProvider, PasswordReset, User};
pub use secrecy::{ExposeSecret, SecretString};
pub use service::{simulate_latency, MockSessionService, SessionService};
pub use session::{SessionSnapshot, SessionStore, SESSION_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
