//! Light/dark theme preference and its resolution against the OS signal.

use moneymap_auth::{KeyValueStore, StorageError};
use std::fmt;
use tokio::sync::watch;

/// Storage key of the explicit theme choice. Absent means "system".
pub const THEME_KEY: &str = "moneymap-theme";

/// Environment override for the terminal's color scheme (`dark` or `light`)
pub const COLOR_SCHEME_ENV: &str = "MONEYMAP_COLOR_SCHEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    /// No explicit choice: follow the OS
    #[default]
    System,
}

impl ThemePreference {
    /// light → dark → system → light
    pub fn next(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Only explicit choices are ever stored; anything else reads as absent
    pub fn from_stored(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectiveTheme {
    #[default]
    Light,
    Dark,
}

impl EffectiveTheme {
    pub fn resolve(preference: ThemePreference, os_prefers_dark: bool) -> Self {
        match preference {
            ThemePreference::Light => Self::Light,
            ThemePreference::Dark => Self::Dark,
            ThemePreference::System if os_prefers_dark => Self::Dark,
            ThemePreference::System => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeSnapshot {
    pub preference: ThemePreference,
    pub os_prefers_dark: bool,
    pub ready: bool,
}

impl ThemeSnapshot {
    pub fn effective(&self) -> EffectiveTheme {
        EffectiveTheme::resolve(self.preference, self.os_prefers_dark)
    }
}

/// Theme preference backed by durable storage.
///
/// Consumers subscribe to the effective theme, which is only re-sent when it
/// actually changes.
pub struct ThemeStore<K> {
    storage: K,
    state: watch::Sender<ThemeSnapshot>,
    effective: watch::Sender<EffectiveTheme>,
}

impl<K: KeyValueStore> ThemeStore<K> {
    pub fn new(storage: K) -> Self {
        let (state, _) = watch::channel(ThemeSnapshot::default());
        let (effective, _) = watch::channel(EffectiveTheme::default());
        Self {
            storage,
            state,
            effective,
        }
    }

    /// Read the stored choice and record the OS signal
    pub fn init(&self, os_prefers_dark: bool) -> ThemeSnapshot {
        let preference = match self.storage.get(THEME_KEY) {
            Ok(Some(value)) => ThemePreference::from_stored(&value).unwrap_or_else(|| {
                tracing::warn!("Ignoring unknown stored theme '{}'", value);
                ThemePreference::System
            }),
            Ok(None) => ThemePreference::System,
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                ThemePreference::System
            }
        };

        self.state.send_replace(ThemeSnapshot {
            preference,
            os_prefers_dark,
            ready: true,
        });
        self.publish();
        tracing::info!(
            "Theme initialized: preference {}, effective {:?}",
            preference,
            self.effective()
        );
        self.snapshot()
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        *self.state.borrow()
    }

    pub fn preference(&self) -> ThemePreference {
        self.state.borrow().preference
    }

    pub fn effective(&self) -> EffectiveTheme {
        self.state.borrow().effective()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    pub fn subscribe(&self) -> watch::Receiver<EffectiveTheme> {
        self.effective.subscribe()
    }

    /// Advance to the next preference and persist it. Choosing "system"
    /// deletes the stored value.
    pub fn cycle(&self) -> Result<ThemePreference, StorageError> {
        let next = self.preference().next();
        match next {
            ThemePreference::System => self.storage.remove(THEME_KEY)?,
            explicit => self.storage.set(THEME_KEY, explicit.as_str())?,
        }

        self.state.send_modify(|state| state.preference = next);
        self.publish();
        tracing::info!("Theme preference is now {}", next);
        Ok(next)
    }

    /// Record a change of the OS signal. Returns whether the effective theme
    /// changed, which only happens while following the system.
    pub fn set_os_prefers_dark(&self, prefers_dark: bool) -> bool {
        self.state.send_modify(|state| state.os_prefers_dark = prefers_dark);
        self.publish()
    }

    fn publish(&self) -> bool {
        let effective = self.effective();
        self.effective.send_if_modified(|current| {
            if *current == effective {
                return false;
            }
            *current = effective;
            true
        })
    }
}

/// Read the OS color-scheme signal from the process environment
pub fn os_prefers_dark() -> bool {
    detect_prefers_dark(|name| std::env::var(name).ok())
}

/// `MONEYMAP_COLOR_SCHEME` wins; otherwise the background index in
/// `COLORFGBG` (as set by rxvt, konsole and others) decides; otherwise light.
pub fn detect_prefers_dark(lookup: impl Fn(&str) -> Option<String>) -> bool {
    if let Some(value) = lookup(COLOR_SCHEME_ENV) {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => return true,
            "light" => return false,
            other => tracing::debug!("Ignoring {}={}", COLOR_SCHEME_ENV, other),
        }
    }

    lookup("COLORFGBG")
        .and_then(|value| {
            value
                .rsplit(';')
                .next()
                .and_then(|bg| bg.trim().parse::<u8>().ok())
        })
        .map(|bg| matches!(bg, 0..=6 | 8))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymap_auth::MemoryStore;

    fn store(storage: &MemoryStore, os_prefers_dark: bool) -> ThemeStore<MemoryStore> {
        let store = ThemeStore::new(storage.clone());
        store.init(os_prefers_dark);
        store
    }

    #[test]
    fn absent_preference_follows_os() {
        let storage = MemoryStore::new();
        let theme = store(&storage, true);

        assert!(theme.is_ready());
        assert_eq!(theme.preference(), ThemePreference::System);
        assert_eq!(theme.effective(), EffectiveTheme::Dark);
    }

    #[test]
    fn unknown_stored_value_reads_as_system() {
        let storage = MemoryStore::new();
        storage.set(THEME_KEY, "system").unwrap();
        assert_eq!(store(&storage, false).preference(), ThemePreference::System);

        storage.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(store(&storage, false).preference(), ThemePreference::System);
    }

    #[test]
    fn cycle_is_a_three_cycle_and_never_stores_system() {
        for start in ["light", "dark", ""] {
            let storage = MemoryStore::new();
            if !start.is_empty() {
                storage.set(THEME_KEY, start).unwrap();
            }
            let theme = store(&storage, false);
            let initial = theme.preference();

            for _ in 0..3 {
                let next = theme.cycle().unwrap();
                match next {
                    ThemePreference::System => assert!(!storage.contains(THEME_KEY)),
                    explicit => assert_eq!(
                        storage.get(THEME_KEY).unwrap().as_deref(),
                        Some(explicit.as_str())
                    ),
                }
            }

            assert_eq!(theme.preference(), initial);
        }
    }

    #[test]
    fn cycle_order() {
        let storage = MemoryStore::new();
        storage.set(THEME_KEY, "light").unwrap();
        let theme = store(&storage, false);

        assert_eq!(theme.cycle().unwrap(), ThemePreference::Dark);
        assert_eq!(theme.cycle().unwrap(), ThemePreference::System);
        assert_eq!(theme.cycle().unwrap(), ThemePreference::Light);
    }

    #[test]
    fn os_signal_flips_effective_only_under_system() {
        let storage = MemoryStore::new();
        let theme = store(&storage, false);
        let mut rx = theme.subscribe();
        rx.borrow_and_update();

        assert!(theme.set_os_prefers_dark(true));
        assert_eq!(theme.effective(), EffectiveTheme::Dark);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), EffectiveTheme::Dark);

        // explicit light overrides the OS
        theme.cycle().unwrap();
        assert_eq!(theme.preference(), ThemePreference::Light);
        assert_eq!(theme.effective(), EffectiveTheme::Light);
        rx.borrow_and_update();

        assert!(!theme.set_os_prefers_dark(false));
        assert!(!theme.set_os_prefers_dark(true));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn os_signal_is_recorded_under_explicit_preference() {
        let storage = MemoryStore::new();
        let theme = store(&storage, false);
        theme.cycle().unwrap();

        assert!(!theme.set_os_prefers_dark(true));
        assert!(theme.snapshot().os_prefers_dark);
        assert_eq!(theme.effective(), EffectiveTheme::Light);

        // back to following the system picks up the recorded signal
        theme.cycle().unwrap();
        theme.cycle().unwrap();
        assert_eq!(theme.preference(), ThemePreference::System);
        assert_eq!(theme.effective(), EffectiveTheme::Dark);
    }

    #[test]
    fn repeated_os_signal_is_not_republished() {
        let storage = MemoryStore::new();
        let theme = store(&storage, true);
        let mut rx = theme.subscribe();
        rx.borrow_and_update();

        assert!(!theme.set_os_prefers_dark(true));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn detects_color_scheme_from_environment() {
        let env = |pairs: &'static [(&'static str, &'static str)]| {
            move |name: &str| {
                pairs
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value.to_string())
            }
        };

        assert!(!detect_prefers_dark(env(&[])));
        assert!(detect_prefers_dark(env(&[(COLOR_SCHEME_ENV, "Dark")])));
        assert!(!detect_prefers_dark(env(&[
            (COLOR_SCHEME_ENV, "light"),
            ("COLORFGBG", "15;0"),
        ])));
        assert!(detect_prefers_dark(env(&[("COLORFGBG", "15;0")])));
        assert!(detect_prefers_dark(env(&[("COLORFGBG", "15;default;8")])));
        assert!(!detect_prefers_dark(env(&[("COLORFGBG", "0;15")])));
        assert!(!detect_prefers_dark(env(&[("COLORFGBG", "0;7")])));
        assert!(!detect_prefers_dark(env(&[("COLORFGBG", "garbage")])));
    }
}
