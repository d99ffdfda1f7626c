//! Per-user transaction ledger persistence.

use moneymap_auth::{KeyValueStore, StorageError, User};
use moneymap_ledger::{fixtures, InsertPosition, Ledger, LedgerError, NewTransaction};
use thiserror::Error;

const LEDGER_KEY_PREFIX: &str = "transactions";

#[derive(Error, Debug)]
pub enum LedgerStoreError {
    #[error("{0}")]
    Invalid(#[from] LedgerError),

    #[error("Failed to save transactions: {0}")]
    Storage(#[from] StorageError),
}

/// Loads and saves each user's ledger under `transactions:<user id>`
pub struct LedgerStore<K> {
    storage: K,
}

impl<K: KeyValueStore> LedgerStore<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }

    pub fn key_for(user: &User) -> String {
        format!("{}:{}", LEDGER_KEY_PREFIX, user.id)
    }

    /// The user's saved ledger, or the starter ledger when nothing usable is
    /// stored
    pub fn load(&self, user: &User) -> Ledger {
        let key = Self::key_for(user);
        match self.storage.get_json::<Ledger>(&key) {
            Ok(Some(ledger)) => {
                tracing::debug!("Loaded {} transactions for {}", ledger.len(), user.email);
                ledger
            }
            Ok(None) => {
                tracing::info!("No saved transactions for {}, using starter ledger", user.email);
                fixtures::starter_ledger()
            }
            Err(e) => {
                tracing::warn!("Failed to read transactions for {}: {}", user.email, e);
                fixtures::starter_ledger()
            }
        }
    }

    pub fn save(&self, user: &User, ledger: &Ledger) -> Result<(), StorageError> {
        self.storage.set_json(&Self::key_for(user), ledger)
    }

    /// Validate the draft, insert it and persist the result. Nothing is
    /// written when the draft is rejected.
    pub fn add(
        &self,
        user: &User,
        draft: NewTransaction,
        position: InsertPosition,
    ) -> Result<Ledger, LedgerStoreError> {
        let mut ledger = self.load(user);
        let added = ledger.add(draft, position)?;
        tracing::info!(
            "Added {} '{}' of {} for {}",
            added.kind,
            added.description,
            added.amount,
            user.email
        );

        self.save(user, &ledger)?;
        Ok(ledger)
    }
}
