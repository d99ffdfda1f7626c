use crate::error::AuthError;
use crate::models::{user_id_for, PasswordReset, User};
use crate::service::SessionService;
use crate::storage::KeyValueStore;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

/// Storage key of the persisted session record
pub const SESSION_KEY: &str = "user";

/// What consumers observe of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// Derived from `user`, never stored on its own
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Current user plus its persisted copy.
///
/// Every successful mutation writes storage first and then publishes the new
/// snapshot, so the two never disagree once a call returns.
pub struct SessionStore<S, K> {
    service: S,
    storage: K,
    state: watch::Sender<SessionSnapshot>,
}

impl<S: SessionService, K: KeyValueStore> SessionStore<S, K> {
    pub fn new(service: S, storage: K) -> Self {
        let (state, _) = watch::channel(SessionSnapshot {
            user: None,
            is_loading: true,
        });
        Self {
            service,
            storage,
            state,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Load the persisted session record.
    ///
    /// Runs once at startup. Loading ends on the first call whatever the
    /// outcome; later calls only report the current user.
    pub async fn restore(&self) -> Option<User> {
        if !self.is_loading() {
            return self.user();
        }

        let user = match self.storage.get_json::<User>(SESSION_KEY) {
            Ok(Some(mut user)) => {
                if user.id.is_empty() {
                    user.id = user_id_for(&user.email);
                }
                match self.service.resume(user).await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        tracing::warn!("Discarding stored session: {}", e);
                        None
                    }
                }
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read stored session: {}", e);
                None
            }
        };

        match &user {
            Some(user) => tracing::info!("Restored session for {}", user.email),
            None => tracing::info!("No stored session"),
        }

        self.state.send_modify(|state| {
            state.user = user.clone();
            state.is_loading = false;
        });
        user
    }

    /// Sign in with email and password.
    ///
    /// The email is trimmed of surrounding whitespace and otherwise passed
    /// through unchanged.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let email = require(email, "email")?;
        require(password.expose_secret(), "password")?;

        let user = self.service.login(email, password).await?;
        self.establish(user)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError> {
        let name = require(name, "name")?;
        let email = require(email, "email")?;
        require(password.expose_secret(), "password")?;

        let user = self.service.register(name, email, password).await?;
        self.establish(user)
    }

    pub async fn login_with_google(&self, email: &str) -> Result<User, AuthError> {
        let email = require(email, "email")?;
        if !email.contains('@') {
            return Err(AuthError::InvalidInput(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        let user = self.service.login_with_google(email).await?;
        self.establish(user)
    }

    pub async fn reset_password(&self, email: &str) -> Result<PasswordReset, AuthError> {
        let email = require(email, "email")?;
        self.service.reset_password(email).await
    }

    /// Forget the current user, in storage and in memory
    pub fn logout(&self) -> Result<(), AuthError> {
        self.storage.remove(SESSION_KEY)?;
        self.state.send_modify(|state| {
            state.user = None;
            state.is_loading = false;
        });
        tracing::info!("Signed out");
        Ok(())
    }

    fn establish(&self, user: User) -> Result<User, AuthError> {
        self.storage.set_json(SESSION_KEY, &user)?;
        self.state.send_modify(|state| {
            state.user = Some(user.clone());
            state.is_loading = false;
        });
        tracing::info!("Signed in as {}", user.email);
        Ok(user)
    }
}

/// Non-blank field value with surrounding whitespace removed
fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthProvider;
    use crate::service::MockSessionService;
    use crate::storage::MemoryStore;

    fn store(storage: &MemoryStore) -> SessionStore<MockSessionService, MemoryStore> {
        SessionStore::new(MockSessionService::instant(), storage.clone())
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[tokio::test]
    async fn starts_loading_until_restore() {
        let storage = MemoryStore::new();
        let session = store(&storage);
        assert!(session.is_loading());
        assert!(!session.is_authenticated());

        assert_eq!(session.restore().await, None);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn login_persists_and_publishes_user() {
        let storage = MemoryStore::new();
        let session = store(&storage);
        session.restore().await;
        let mut rx = session.subscribe();

        let user = session
            .login("jane.doe@example.com", &secret("pw"))
            .await
            .unwrap();

        assert_eq!(user.email, "jane.doe@example.com");
        assert_eq!(user.name, "jane.doe");
        assert!(session.is_authenticated());
        assert_eq!(
            storage.get_json::<User>(SESSION_KEY).unwrap(),
            Some(user.clone())
        );

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().user, Some(user));
    }

    #[tokio::test]
    async fn login_keeps_email_and_derives_name_from_local_part() {
        let cases = [
            ("jane.doe+bills@example.com", "jane.doe+bills"),
            ("sam@mail.co.uk", "sam"),
            ("Mixed.Case@Example.COM", "Mixed.Case"),
            ("a@b", "a"),
        ];

        for (email, name) in cases {
            let storage = MemoryStore::new();
            let session = store(&storage);

            let user = session.login(email, &secret("pw")).await.unwrap();
            assert_eq!(user.email, email, "email for {email:?}");
            assert_eq!(user.name, name, "name for {email:?}");
            assert_eq!(
                storage.get_json::<User>(SESSION_KEY).unwrap().map(|u| u.email),
                Some(email.to_string())
            );
        }
    }

    #[tokio::test]
    async fn login_trims_surrounding_whitespace_from_email() {
        let storage = MemoryStore::new();
        let session = store(&storage);

        let user = session
            .login("  jane@example.com\t", &secret("pw"))
            .await
            .unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.name, "jane");
        assert_eq!(
            storage.get_json::<User>(SESSION_KEY).unwrap().map(|u| u.email),
            Some("jane@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn login_requires_email_and_password() {
        let storage = MemoryStore::new();
        let session = store(&storage);

        assert!(matches!(
            session.login("", &secret("pw")).await,
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            session.login("jane@example.com", &secret("")).await,
            Err(AuthError::MissingField("password"))
        ));
        assert!(storage.is_empty());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn register_uses_given_name() {
        let storage = MemoryStore::new();
        let session = store(&storage);

        let user = session
            .register("Jane Doe", "jane@example.com", &secret("pw"))
            .await
            .unwrap();
        assert_eq!(user.name, "Jane Doe");

        assert!(matches!(
            session.register(" ", "jane@example.com", &secret("pw")).await,
            Err(AuthError::MissingField("name"))
        ));
    }

    #[tokio::test]
    async fn google_login_requires_at_sign() {
        let storage = MemoryStore::new();
        let session = store(&storage);

        for bad in ["jane", "example.com", "jane.example.com"] {
            assert!(matches!(
                session.login_with_google(bad).await,
                Err(AuthError::InvalidInput(_))
            ));
        }
        assert!(matches!(
            session.login_with_google("").await,
            Err(AuthError::MissingField("email"))
        ));

        let user = session.login_with_google("jane@gmail.com").await.unwrap();
        assert_eq!(user.provider, Some(AuthProvider::Google));
        assert_eq!(user.name, "jane");
    }

    #[tokio::test]
    async fn reset_password_always_succeeds() {
        let storage = MemoryStore::new();
        let session = store(&storage);

        let reset = session.reset_password("jane@example.com").await.unwrap();
        assert!(reset.success);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_storage_and_fresh_restore_is_anonymous() {
        let storage = MemoryStore::new();
        let session = store(&storage);
        session.restore().await;
        session.login("jane@example.com", &secret("pw")).await.unwrap();

        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));

        let fresh = store(&storage);
        assert_eq!(fresh.restore().await, None);
    }

    #[tokio::test]
    async fn fresh_store_restores_same_identity() {
        let storage = MemoryStore::new();
        let session = store(&storage);
        let user = session.login("jane@example.com", &secret("pw")).await.unwrap();

        let fresh = store(&storage);
        assert_eq!(fresh.restore().await, Some(user.clone()));
        assert_eq!(fresh.user(), Some(user));
    }

    #[tokio::test]
    async fn malformed_record_restores_as_anonymous() {
        let storage = MemoryStore::new();
        storage.set(SESSION_KEY, "not json").unwrap();

        let session = store(&storage);
        assert_eq!(session.restore().await, None);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn record_without_id_gets_one_from_email() {
        let storage = MemoryStore::new();
        storage
            .set(SESSION_KEY, r#"{"email":"jane@example.com","name":"jane"}"#)
            .unwrap();

        let user = store(&storage).restore().await.unwrap();
        assert_eq!(user.id, user_id_for("jane@example.com"));
    }

    #[tokio::test]
    async fn restore_finishes_loading_only_once() {
        let storage = MemoryStore::new();
        let session = store(&storage);
        let mut rx = session.subscribe();

        session.restore().await;
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        session.restore().await;
        assert!(!rx.has_changed().unwrap());
    }
}
