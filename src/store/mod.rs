// 🗃️ Account Storage - one contract, swappable backends
//
// Every backend returns the same Outcome semantics:
// - `create` overwrites silently when the id already exists
// - `read` and `update` report AccountNotFound for an unknown id
// - `update` refuses a value whose id differs from the key (ids never change)
// - unexpected faults come back as CreateFailed / ReadFailed / UpdateFailed, never raised

pub mod memory;
pub mod sqlite;

use crate::entities::Account;
use crate::outcome::{ErrorInfo, ErrorKind, Outcome};

pub use memory::InMemoryAccountStore;
pub use sqlite::SqliteAccountStore;

/// Keyed persistence for account snapshots.
///
/// Implementations must be safe to share between threads; concurrent hosts hand a
/// single store to many request handlers.
pub trait AccountStore: Send + Sync {
    /// Insert `account` under its id, replacing any existing entry
    fn create(&self, account: Account) -> Outcome<Account>;

    /// Fetch the current snapshot for `id`
    fn read(&self, id: &str) -> Outcome<Account>;

    /// Replace the snapshot stored under `id` with `account`.
    ///
    /// The store does not merge fields; callers pass the complete new value.
    /// An unknown `id` is AccountNotFound; an existing `id` with a different
    /// `account.id()` is UpdateFailed and leaves the stored value untouched.
    fn update(&self, id: &str, account: Account) -> Outcome<Account>;
}

/// Shared check run by every backend once `id` is known to exist.
pub(crate) fn ensure_same_id(id: &str, account: &Account) -> Outcome<()> {
    if account.id() == id {
        return Ok(());
    }

    tracing::error!("refusing to store account {} under key {}", account.id(), id);
    Err(ErrorInfo::new(
        ErrorKind::UpdateFailed,
        format!("Account id {} does not match key {}", account.id(), id),
    )
    .with_details(serde_json::json!({ "key": id, "accountId": account.id() })))
}
