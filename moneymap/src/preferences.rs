//! Application settings and the user profile, both kept in durable storage.

use chrono::NaiveDate;
use moneymap_auth::{local_part, KeyValueStore, StorageError, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

pub const SETTINGS_KEY: &str = "appSettings";
pub const PROFILE_KEY: &str = "userProfile";

/// How long a status message stays on screen
pub const STATUS_TTL: Duration = Duration::from_secs(3);

pub const SETTINGS_SAVED: &str = "Settings saved!";
pub const PROFILE_UPDATED: &str = "Profile updated!";
pub const PASSWORD_CHANGED: &str = "Password changed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Inr];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
        }
    }

    pub fn next(&self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub currency: Currency,
    pub notifications: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub join_date: NaiveDate,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: String::new(),
            bio: String::new(),
            join_date: chrono::Local::now().date_naive(),
        }
    }
}

impl UserProfile {
    /// Profile of a user who never saved one: their capitalized email local
    /// part as the name, joining today
    pub fn for_user(user: &User, today: NaiveDate) -> Self {
        Self {
            name: capitalize(local_part(&user.email)),
            email: user.email.clone(),
            join_date: today,
            ..Default::default()
        }
    }

    pub fn member_since(&self) -> String {
        self.join_date.format("%B %-d, %Y").to_string()
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reads are forgiving: missing or malformed records yield defaults
pub struct PreferenceStore<K> {
    storage: K,
}

impl<K: KeyValueStore> PreferenceStore<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }

    pub fn load_settings(&self) -> AppSettings {
        match self.storage.get_json::<AppSettings>(SETTINGS_KEY) {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read settings: {}", e);
                AppSettings::default()
            }
        }
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        self.storage.set_json(SETTINGS_KEY, settings)?;
        tracing::info!("Saved settings: {:?}", settings);
        Ok(())
    }

    pub fn load_profile(&self, user: Option<&User>, today: NaiveDate) -> UserProfile {
        let stored = self
            .storage
            .get_json::<UserProfile>(PROFILE_KEY)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read profile: {}", e);
                None
            });

        stored.unwrap_or_else(|| match user {
            Some(user) => UserProfile::for_user(user, today),
            None => UserProfile {
                join_date: today,
                ..Default::default()
            },
        })
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.storage.set_json(PROFILE_KEY, profile)?;
        tracing::info!("Saved profile for {}", profile.email);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A transient message shown on the settings page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
            expires_at: now + STATUS_TTL,
        }
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
            expires_at: now + STATUS_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
