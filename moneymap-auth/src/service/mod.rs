//! Session service boundary.
//!
//! [`SessionService`] is what a network client would implement. The only
//! implementation today is [`MockSessionService`], which fabricates users
//! locally after a simulated delay.

mod mock;

pub use mock::MockSessionService;

use crate::error::AuthError;
use crate::models::{PasswordReset, User};
use secrecy::SecretString;
use std::future::Future;
use std::time::Duration;

pub trait SessionService: Send + Sync {
    fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    fn login_with_google(&self, email: &str)
        -> impl Future<Output = Result<User, AuthError>> + Send;

    fn reset_password(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<PasswordReset, AuthError>> + Send;

    /// Revalidate a session record read back from storage
    fn resume(&self, user: User) -> impl Future<Output = Result<User, AuthError>> + Send;
}

/// Sleep for `latency`, returning immediately when it is zero
pub async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
