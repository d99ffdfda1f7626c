use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the user signed in. A record without a provider is a local account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Google,
}

/// Session record, persisted as JSON under the session key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AuthProvider>,
}

impl User {
    /// Build the mock identity for an email address
    pub fn synthetic(email: &str, name: impl Into<String>) -> Self {
        Self {
            id: user_id_for(email),
            email: email.to_string(),
            name: name.into(),
            avatar: None,
            provider: None,
        }
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider.unwrap_or(AuthProvider::Local)
    }
}

/// Response of the password reset stub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub success: bool,
}

/// Everything before the first `@`, or the whole input when there is none
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Deterministic user id: the same address always maps to the same id
pub fn user_id_for(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{normalized}").as_bytes()).to_string()
}
