use std::sync::Arc;

use crate::entities::{Account, AccountProps, AccountUpdate};
use crate::outcome::{ErrorCategory, ErrorInfo, Outcome};
use crate::store::AccountStore;

/// Service for managing bank accounts
///
/// Composes entity validation with store access. Failures from either side are
/// passed through unchanged.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    /// Create a new AccountService over an injected store
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Create a new account
    pub fn create(&self, props: AccountProps) -> Outcome<Account> {
        tracing::info!(
            "Creating account: name={:?}, owner={:?}",
            props.name,
            props.owner
        );

        let account = Account::create(props).inspect_err(log_failure)?;

        let created = self.store.create(account).inspect_err(log_failure)?;
        tracing::info!("Created account: {} with ID: {}", created.name(), created.id());

        Ok(created)
    }

    /// Get an account by ID
    pub fn read(&self, id: &str) -> Outcome<Account> {
        tracing::debug!("Getting account: {}", id);

        self.store.read(id).inspect_err(log_failure)
    }

    /// Update an existing account
    pub fn update(&self, id: &str, changes: AccountUpdate) -> Outcome<Account> {
        tracing::info!("Updating account: {}", id);

        let current = self.store.read(id).inspect_err(log_failure)?;
        let next = current.update(changes).inspect_err(log_failure)?;

        let updated = self.store.update(id, next).inspect_err(log_failure)?;
        tracing::info!("Updated account: {} with ID: {}", updated.name(), updated.id());

        Ok(updated)
    }
}

fn log_failure(error: &ErrorInfo) {
    match error.category() {
        ErrorCategory::Infrastructure => tracing::error!("Account operation failed: {}", error),
        ErrorCategory::Validation | ErrorCategory::NotFound => {
            tracing::warn!("Account operation rejected: {}", error)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
