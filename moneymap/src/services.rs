//! Stores and mock backends shared by the executor and its background tasks.

use crate::appearance::ThemeStore;
use crate::events::DataEvent;
use crate::ledger_store::LedgerStore;
use crate::navigation::Location;
use crate::preferences::{AppSettings, PreferenceStore, UserProfile};
use moneymap_auth::{
    simulate_latency, KeyValueStore, MemoryStore, MockSessionService, SecretString, SessionStore,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

pub type Storage = Arc<dyn KeyValueStore>;
pub type Session = SessionStore<MockSessionService, Storage>;

/// Cheap to clone; every clone shares the same stores
#[derive(Clone)]
pub struct Services {
    pub session: Arc<Session>,
    pub theme: Arc<ThemeStore<Storage>>,
    pub ledger: Arc<LedgerStore<Storage>>,
    pub preferences: Arc<PreferenceStore<Storage>>,
    latency: Duration,
    data_tx: UnboundedSender<DataEvent>,
}

impl Services {
    pub fn new(storage: Storage, latency: Duration, data_tx: UnboundedSender<DataEvent>) -> Self {
        Self {
            session: Arc::new(SessionStore::new(
                MockSessionService::new(latency),
                storage.clone(),
            )),
            theme: Arc::new(ThemeStore::new(storage.clone())),
            ledger: Arc::new(LedgerStore::new(storage.clone())),
            preferences: Arc::new(PreferenceStore::new(storage)),
            latency,
            data_tx,
        }
    }

    /// In-memory storage and no simulated delay
    pub fn in_memory(data_tx: UnboundedSender<DataEvent>) -> (Self, MemoryStore) {
        let storage = MemoryStore::new();
        let services = Self::new(Arc::new(storage.clone()), Duration::ZERO, data_tx);
        (services, storage)
    }

    pub async fn restore_session(self) {
        let user = self.session.restore().await;
        self.send(DataEvent::SessionRestored { user });
    }

    pub async fn sign_in(self, email: String, password: SecretString, target: Location) {
        let event = match self.session.login(&email, &password).await {
            Ok(user) => DataEvent::SignedIn { user, target },
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                DataEvent::AuthFailed {
                    error: e.to_string(),
                }
            }
        };
        self.send(event);
    }

    pub async fn register(
        self,
        name: String,
        email: String,
        password: SecretString,
        target: Location,
    ) {
        let event = match self.session.register(&name, &email, &password).await {
            Ok(user) => DataEvent::SignedIn { user, target },
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                DataEvent::AuthFailed {
                    error: e.to_string(),
                }
            }
        };
        self.send(event);
    }

    pub async fn sign_in_with_google(self, email: String, target: Location) {
        let event = match self.session.login_with_google(&email).await {
            Ok(user) => DataEvent::SignedIn { user, target },
            Err(e) => {
                tracing::warn!("Google sign-in failed: {}", e);
                DataEvent::AuthFailed {
                    error: e.to_string(),
                }
            }
        };
        self.send(event);
    }

    pub async fn reset_password(self, email: String) {
        let event = match self.session.reset_password(&email).await {
            Ok(_) => DataEvent::PasswordResetSent { email },
            Err(e) => DataEvent::AuthFailed {
                error: e.to_string(),
            },
        };
        self.send(event);
    }

    pub async fn save_settings(self, settings: AppSettings) {
        simulate_latency(self.latency).await;
        let event = match self.preferences.save_settings(&settings) {
            Ok(()) => DataEvent::SettingsSaved { settings },
            Err(e) => {
                tracing::error!("Failed to save settings: {}", e);
                DataEvent::PreferencesFailed {
                    error: e.to_string(),
                }
            }
        };
        self.send(event);
    }

    pub async fn save_profile(self, profile: UserProfile) {
        simulate_latency(self.latency).await;
        let event = match self.preferences.save_profile(&profile) {
            Ok(()) => DataEvent::ProfileSaved { profile },
            Err(e) => {
                tracing::error!("Failed to save profile: {}", e);
                DataEvent::PreferencesFailed {
                    error: e.to_string(),
                }
            }
        };
        self.send(event);
    }

    /// Nothing is stored: there is no credential to change
    pub async fn change_password(self) {
        simulate_latency(self.latency).await;
        tracing::info!("Password change accepted");
        self.send(DataEvent::PasswordChanged);
    }

    fn send(&self, event: DataEvent) {
        if self.data_tx.send(event).is_err() {
            tracing::warn!("Dropping data event, receiver is gone");
        }
    }
}
