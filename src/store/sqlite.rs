// 🗄️ SQLite account store
//
// Durable drop-in for the in-memory store: same contract, same Outcome semantics.
// One `accounts` table keyed by id; WAL journal mode like the rest of our SQLite usage.

use crate::entities::account::StoredAccount;
use crate::entities::Account;
use crate::outcome::{ErrorInfo, ErrorKind, Outcome};
use crate::store::{ensure_same_id, AccountStore};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// Account store backed by a single SQLite connection.
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
}

impl SqliteAccountStore {
    /// Open (or create) the database file at `path` and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open account database at {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// Private in-memory database, mostly useful for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn).context("Failed to initialise account schema")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        kind: ErrorKind,
        message: &str,
        op: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Outcome<T> {
        let conn = self.conn.lock().map_err(|e| {
            tracing::error!("{}: connection lock poisoned: {}", message, e);
            ErrorInfo::from_fault(kind, message, e)
        })?;

        op(&conn).map_err(|e| {
            tracing::error!("{}: {}", message, e);
            ErrorInfo::from_fault(kind, message, e)
        })
    }
}

pub fn setup_database(conn: &Connection) -> rusqlite::Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            balance INTEGER NOT NULL,
            owner TEXT NOT NULL,
            sort_code TEXT NOT NULL,
            account_number TEXT NOT NULL,
            welcome_message TEXT
        )",
        [],
    )?;

    Ok(())
}

fn balance_column(account: &Account, kind: ErrorKind) -> Outcome<i64> {
    i64::try_from(account.balance()).map_err(|e| {
        ErrorInfo::from_fault(kind, "Account balance does not fit the balance column", e)
    })
}

impl AccountStore for SqliteAccountStore {
    fn create(&self, account: Account) -> Outcome<Account> {
        let balance = balance_column(&account, ErrorKind::CreateFailed)?;

        self.with_conn(ErrorKind::CreateFailed, "Failed to create account", |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO accounts (
                    id, name, balance, owner, sort_code, account_number, welcome_message
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    account.id(),
                    account.name(),
                    balance,
                    account.owner(),
                    account.sort_code(),
                    account.account_number(),
                    account.welcome_message(),
                ],
            )
        })?;

        Ok(account)
    }

    fn read(&self, id: &str) -> Outcome<Account> {
        let row = self.with_conn(ErrorKind::ReadFailed, "Failed to read account", |conn| {
            conn.query_row(
                "SELECT id, name, balance, owner, sort_code, account_number, welcome_message
                 FROM accounts
                 WHERE id = ?1",
                params![id],
                |row| {
                    Ok(StoredAccount {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        balance: row.get(2)?,
                        owner: row.get(3)?,
                        sort_code: row.get(4)?,
                        account_number: row.get(5)?,
                        welcome_message: row.get(6)?,
                    })
                },
            )
            .optional()
        })?;

        let row = row.ok_or_else(|| ErrorInfo::not_found(id))?;

        Account::from_stored(row).map_err(|fault| {
            tracing::error!("corrupt account row: {}", fault);
            ErrorInfo::from_fault(ErrorKind::ReadFailed, "Stored account is corrupt", fault)
        })
    }

    fn update(&self, id: &str, account: Account) -> Outcome<Account> {
        let balance = balance_column(&account, ErrorKind::UpdateFailed)?;

        self.with_conn(ErrorKind::UpdateFailed, "Failed to update account", |conn| {
            let exists = conn
                .query_row("SELECT 1 FROM accounts WHERE id = ?1", params![id], |_| Ok(()))
                .optional()?
                .is_some();
            if !exists {
                return Ok(Err(ErrorInfo::not_found(id)));
            }
            if let Err(mismatch) = ensure_same_id(id, &account) {
                return Ok(Err(mismatch));
            }

            conn.execute(
                "UPDATE accounts
                 SET name = ?2, balance = ?3, owner = ?4, sort_code = ?5,
                     account_number = ?6, welcome_message = ?7
                 WHERE id = ?1",
                params![
                    id,
                    account.name(),
                    balance,
                    account.owner(),
                    account.sort_code(),
                    account.account_number(),
                    account.welcome_message(),
                ],
            )?;
            Ok(Ok(()))
        })??;

        Ok(account)
    }
}

// ============================================================================
// TESTS
// ============================================================================
