use super::{simulate_latency, SessionService};
use crate::error::AuthError;
use crate::models::{local_part, AuthProvider, PasswordReset, User};
use secrecy::SecretString;
use std::time::Duration;

/// Local stand-in for an authentication backend. Accepts any credentials.
#[derive(Debug, Clone, Default)]
pub struct MockSessionService {
    latency: Duration,
}

impl MockSessionService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// No simulated delay, for tests
    pub fn instant() -> Self {
        Self::default()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl SessionService for MockSessionService {
    async fn login(&self, email: &str, _password: &SecretString) -> Result<User, AuthError> {
        simulate_latency(self.latency).await;
        tracing::debug!("Mock login for {}", email);
        Ok(User::synthetic(email, local_part(email)))
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &SecretString,
    ) -> Result<User, AuthError> {
        simulate_latency(self.latency).await;
        tracing::debug!("Mock registration for {}", email);
        Ok(User::synthetic(email, name))
    }

    async fn login_with_google(&self, email: &str) -> Result<User, AuthError> {
        simulate_latency(self.latency).await;
        tracing::debug!("Mock Google sign-in for {}", email);
        let mut user = User::synthetic(email, local_part(email));
        user.provider = Some(AuthProvider::Google);
        Ok(user)
    }

    async fn reset_password(&self, email: &str) -> Result<PasswordReset, AuthError> {
        simulate_latency(self.latency).await;
        tracing::info!("Password reset requested for {}", email);
        Ok(PasswordReset { success: true })
    }

    async fn resume(&self, user: User) -> Result<User, AuthError> {
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password() -> SecretString {
        SecretString::from("hunter2".to_string())
    }

    #[tokio::test]
    async fn login_derives_name_from_local_part() {
        let service = MockSessionService::instant();
        let user = service.login("jane.doe@example.com", &password()).await.unwrap();

        assert_eq!(user.email, "jane.doe@example.com");
        assert_eq!(user.name, "jane.doe");
        assert_eq!(user.provider(), AuthProvider::Local);
    }

    #[tokio::test]
    async fn register_keeps_given_name() {
        let service = MockSessionService::instant();
        let user = service
            .register("Jane Doe", "jane@example.com", &password())
            .await
            .unwrap();
        assert_eq!(user.name, "Jane Doe");
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_applied() {
        let service = MockSessionService::new(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();

        let reset = service.reset_password("jane@example.com").await.unwrap();

        assert!(reset.success);
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
