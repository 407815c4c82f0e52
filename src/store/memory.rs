// 🗂️ In-memory account store
//
// Volatile: a restart loses everything. The map is the authoritative copy;
// callers get clones.

use crate::entities::Account;
use crate::outcome::{ErrorInfo, ErrorKind, Outcome};
use crate::store::{ensure_same_id, AccountStore};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Account store backed by a `HashMap` behind a `RwLock`.
///
/// Cloning shares the same underlying map.
#[derive(Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountStore {
    /// Create new empty store
    pub fn new() -> Self {
        InMemoryAccountStore {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create(&self, account: Account) -> Outcome<Account> {
        let mut accounts = self.accounts.write().map_err(|e| {
            tracing::error!("account map lock poisoned during create: {}", e);
            ErrorInfo::from_fault(ErrorKind::CreateFailed, "Failed to create account", e)
        })?;

        if accounts.insert(account.id().to_string(), account.clone()).is_some() {
            tracing::debug!(id = %account.id(), "replaced existing account entry");
        }

        Ok(account)
    }

    fn read(&self, id: &str) -> Outcome<Account> {
        let accounts = self.accounts.read().map_err(|e| {
            tracing::error!("account map lock poisoned during read: {}", e);
            ErrorInfo::from_fault(ErrorKind::ReadFailed, "Failed to read account", e)
        })?;

        accounts
            .get(id)
            .cloned()
            .ok_or_else(|| ErrorInfo::not_found(id))
    }

    fn update(&self, id: &str, account: Account) -> Outcome<Account> {
        let mut accounts = self.accounts.write().map_err(|e| {
            tracing::error!("account map lock poisoned during update: {}", e);
            ErrorInfo::from_fault(ErrorKind::UpdateFailed, "Failed to update account", e)
        })?;

        match accounts.get_mut(id) {
            Some(slot) => {
                ensure_same_id(id, &account)?;
                *slot = account.clone();
                Ok(account)
            }
            None => Err(ErrorInfo::not_found(id)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AccountProps, AccountUpdate};

    fn create_test_account(name: &str) -> Account {
        Account::create(AccountProps::new(name, "owner-1")).unwrap()
    }

    fn poison(store: &InMemoryAccountStore) {
        let accounts = Arc::clone(&store.accounts);
        let _ = std::thread::spawn(move || {
            let _guard = accounts.write().unwrap();
            panic!("poison the account map");
        })
        .join();
    }

    #[test]
    fn test_create_then_read_round_trip() {
        let store = InMemoryAccountStore::new();
        let account = create_test_account("Checking");

        let created = store.create(account.clone()).unwrap();
        let read = store.read(created.id()).unwrap();

        assert_eq!(read, account);
    }

    #[test]
    fn test_create_overwrites_existing_key() {
        let store = InMemoryAccountStore::new();
        let account = create_test_account("Checking");
        store.create(account.clone()).unwrap();

        let renamed = account.update(AccountUpdate::name("Renamed")).unwrap();
        store.create(renamed.clone()).unwrap();

        assert_eq!(store.read(account.id()).unwrap(), renamed);
    }

    #[test]
    fn test_read_unknown_id_not_found() {
        let store = InMemoryAccountStore::new();
        let error = store.read("missing").unwrap_err();
        assert_eq!(error.kind, ErrorKind::AccountNotFound);
    }

    #[test]
    fn test_update_unknown_id_not_found() {
        let store = InMemoryAccountStore::new();
        let account = create_test_account("Checking");

        let error = store.update("missing", account).unwrap_err();
        assert_eq!(error.kind, ErrorKind::AccountNotFound);
        assert!(store.read("missing").is_err());
    }

    #[test]
    fn test_update_replaces_snapshot() {
        let store = InMemoryAccountStore::new();
        let account = create_test_account("Checking");
        store.create(account.clone()).unwrap();

        let greeted = account
            .update(AccountUpdate::welcome_message("Welcome aboard"))
            .unwrap();
        let stored = store.update(account.id(), greeted.clone()).unwrap();

        assert_eq!(stored, greeted);
        assert_eq!(store.read(account.id()).unwrap(), greeted);
    }

    #[test]
    fn test_update_with_foreign_id_rejected() {
        let store = InMemoryAccountStore::new();
        let account = create_test_account("Checking");
        let other = create_test_account("Other");
        store.create(account.clone()).unwrap();

        let error = store.update(account.id(), other).unwrap_err();
        assert_eq!(error.kind, ErrorKind::UpdateFailed);
        assert!(error.details.is_some());
        assert_eq!(store.read(account.id()).unwrap(), account);
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryAccountStore::new();
        let other = store.clone();
        let account = create_test_account("Shared");

        store.create(account.clone()).unwrap();
        assert_eq!(other.read(account.id()).unwrap(), account);
    }

    #[test]
    fn test_poisoned_lock_becomes_failure() {
        let store = InMemoryAccountStore::new();
        let account = create_test_account("Checking");
        store.create(account.clone()).unwrap();
        poison(&store);

        let error = store.create(account.clone()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::CreateFailed);
        assert!(error.details.is_some());

        let error = store.read(account.id()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::ReadFailed);

        let error = store.update(account.id(), account.clone()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::UpdateFailed);
    }
}
