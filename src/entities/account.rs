// 💳 Account Entity - immutable value, validated construction only
//
// "Account id is IDENTITY (never changes), everything else is a VALUE"
//
// - id, sort_code, account_number are assigned once in `create`
// - owner and balance are never touched by `update`
// - `update` returns a NEW Account; nothing is mutated in place

use crate::outcome::{ErrorInfo, ErrorKind, Outcome};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const SORT_CODE_LEN: usize = 6;
pub const ACCOUNT_NUMBER_LEN: usize = 8;

const SORT_CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;
const ACCOUNT_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 10_000_000..=99_999_999;

// ============================================================================
// INPUT PROPS
// ============================================================================

/// Input for [`Account::create`]. `None` and `Some("")` are both treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProps {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl AccountProps {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            owner: Some(owner.into()),
        }
    }
}

/// Partial change set for [`Account::update`]. Omitted fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub welcome_message: Option<String>,
}

impl AccountUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            welcome_message: None,
        }
    }

    pub fn welcome_message(message: impl Into<String>) -> Self {
        Self {
            name: None,
            welcome_message: Some(message.into()),
        }
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// Bank account value.
///
/// Fields are private: the only ways to obtain an `Account` are [`Account::create`],
/// [`Account::update`] on an existing value, and stores restoring a row they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: String,
    name: String,
    /// Minor units; starts at 0
    balance: u64,
    owner: String,
    sort_code: String,
    account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    welcome_message: Option<String>,
}

impl Account {
    /// Validate `props` and build a fresh account with generated identifiers.
    ///
    /// Name is checked before owner; the first failure wins.
    pub fn create(props: AccountProps) -> Outcome<Account> {
        Self::create_with_rng(props, &mut rand::rng())
    }

    /// Same as [`Account::create`] with a caller-supplied random source.
    pub fn create_with_rng<R: Rng>(props: AccountProps, rng: &mut R) -> Outcome<Account> {
        let name = match props.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(ErrorInfo::new(
                    ErrorKind::InvalidAccountName,
                    "Account name is required",
                ))
            }
        };

        let owner = match props.owner {
            Some(owner) if !owner.is_empty() => owner,
            _ => {
                return Err(ErrorInfo::new(
                    ErrorKind::InvalidAccountOwner,
                    "Account owner is required",
                ))
            }
        };

        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            balance: 0,
            owner,
            sort_code: rng.random_range(SORT_CODE_RANGE).to_string(),
            account_number: rng.random_range(ACCOUNT_NUMBER_RANGE).to_string(),
            welcome_message: None,
        };

        tracing::debug!(id = %account.id, "built account value");
        Ok(account)
    }

    /// Derive a new value from `self` with `changes` applied.
    ///
    /// An explicitly empty name is applied as given; only a warning is logged.
    pub fn update(&self, changes: AccountUpdate) -> Outcome<Account> {
        if matches!(changes.name.as_deref(), Some("")) {
            tracing::warn!(id = %self.id, "account name set to empty string on update");
        }

        Ok(Account {
            id: self.id.clone(),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            balance: self.balance,
            owner: self.owner.clone(),
            sort_code: self.sort_code.clone(),
            account_number: self.account_number.clone(),
            welcome_message: changes
                .welcome_message
                .or_else(|| self.welcome_message.clone()),
        })
    }

    /// Rebuild an account from a persisted row, re-checking the identifier invariants.
    pub(crate) fn from_stored(row: StoredAccount) -> Result<Account, String> {
        if !is_digits(&row.sort_code, SORT_CODE_LEN) {
            return Err(format!("invalid sort code {:?} for account {}", row.sort_code, row.id));
        }
        if !is_digits(&row.account_number, ACCOUNT_NUMBER_LEN) {
            return Err(format!(
                "invalid account number {:?} for account {}",
                row.account_number, row.id
            ));
        }
        let balance = u64::try_from(row.balance)
            .map_err(|_| format!("negative balance {} for account {}", row.balance, row.id))?;

        Ok(Account {
            id: row.id,
            name: row.name,
            balance,
            owner: row.owner,
            sort_code: row.sort_code,
            account_number: row.account_number,
            welcome_message: row.welcome_message,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn sort_code(&self) -> &str {
        &self.sort_code
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn welcome_message(&self) -> Option<&str> {
        self.welcome_message.as_deref()
    }
}

/// Raw column values as a store holds them.
#[derive(Debug, Clone)]
pub(crate) struct StoredAccount {
    pub id: String,
    pub name: String,
    pub balance: i64,
    pub owner: String,
    pub sort_code: String,
    pub account_number: String,
    pub welcome_message: Option<String>,
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_account() -> Account {
        Account::create(AccountProps::new("Test Account", "u1")).unwrap()
    }

    #[test]
    fn test_account_creation() {
        let account = create_test_account();

        assert!(!account.id().is_empty());
        assert_eq!(account.name(), "Test Account");
        assert_eq!(account.owner(), "u1");
        assert_eq!(account.balance(), 0);
        assert!(is_digits(account.sort_code(), SORT_CODE_LEN));
        assert!(is_digits(account.account_number(), ACCOUNT_NUMBER_LEN));
        assert!(account.welcome_message().is_none());
    }

    #[test]
    fn test_generated_codes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let account =
                Account::create_with_rng(AccountProps::new("Range", "owner"), &mut rng).unwrap();
            let sort_code: u32 = account.sort_code().parse().unwrap();
            let account_number: u32 = account.account_number().parse().unwrap();
            assert!(SORT_CODE_RANGE.contains(&sort_code));
            assert!(ACCOUNT_NUMBER_RANGE.contains(&account_number));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let first = create_test_account();
        let second = create_test_account();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_missing_name_rejected() {
        let error = Account::create(AccountProps {
            name: None,
            owner: Some("u1".to_string()),
        })
        .unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidAccountName);

        let error = Account::create(AccountProps::new("", "u1")).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidAccountName);
    }

    #[test]
    fn test_missing_owner_rejected() {
        let error = Account::create(AccountProps {
            name: Some("Savings".to_string()),
            owner: None,
        })
        .unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidAccountOwner);

        let error = Account::create(AccountProps::new("Savings", "")).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidAccountOwner);
    }

    #[test]
    fn test_name_checked_before_owner() {
        let error = Account::create(AccountProps::default()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidAccountName);
    }

    #[test]
    fn test_update_changes_only_name() {
        let account = create_test_account();
        let updated = account.update(AccountUpdate::name("Renamed")).unwrap();

        assert_eq!(updated.name(), "Renamed");
        assert_eq!(updated.id(), account.id());
        assert_eq!(updated.owner(), account.owner());
        assert_eq!(updated.balance(), account.balance());
        assert_eq!(updated.sort_code(), account.sort_code());
        assert_eq!(updated.account_number(), account.account_number());
        assert_eq!(updated.welcome_message(), account.welcome_message());

        // Original value untouched
        assert_eq!(account.name(), "Test Account");
    }

    #[test]
    fn test_update_keeps_omitted_fields() {
        let account = create_test_account();
        let greeted = account
            .update(AccountUpdate::welcome_message("Hello!"))
            .unwrap();
        assert_eq!(greeted.welcome_message(), Some("Hello!"));
        assert_eq!(greeted.name(), "Test Account");

        let renamed = greeted.update(AccountUpdate::name("Other")).unwrap();
        assert_eq!(renamed.welcome_message(), Some("Hello!"));

        let unchanged = renamed.update(AccountUpdate::default()).unwrap();
        assert_eq!(unchanged, renamed);
    }

    #[test]
    fn test_update_applies_explicit_empty_name() {
        let account = create_test_account();
        let blanked = account.update(AccountUpdate::name("")).unwrap();
        assert_eq!(blanked.name(), "");
    }

    #[test]
    fn test_serializes_camel_case() {
        let account = create_test_account()
            .update(AccountUpdate::welcome_message("Hi"))
            .unwrap();
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["sortCode"], account.sort_code());
        assert_eq!(json["accountNumber"], account.account_number());
        assert_eq!(json["welcomeMessage"], "Hi");
        assert_eq!(json["balance"], 0);
    }

    #[test]
    fn test_update_props_deserialize_camel_case() {
        let changes: AccountUpdate =
            serde_json::from_str(r#"{"welcomeMessage":"Welcome"}"#).unwrap();
        assert_eq!(changes, AccountUpdate::welcome_message("Welcome"));
    }

    #[test]
    fn test_from_stored_rejects_corrupt_rows() {
        let account = create_test_account();
        let row = StoredAccount {
            id: account.id().to_string(),
            name: account.name().to_string(),
            balance: 0,
            owner: account.owner().to_string(),
            sort_code: account.sort_code().to_string(),
            account_number: account.account_number().to_string(),
            welcome_message: None,
        };
        assert_eq!(Account::from_stored(row.clone()).unwrap(), account);

        let short_code = StoredAccount {
            sort_code: "123".to_string(),
            ..row.clone()
        };
        assert!(Account::from_stored(short_code).is_err());

        let letters = StoredAccount {
            account_number: "1234abcd".to_string(),
            ..row.clone()
        };
        assert!(Account::from_stored(letters).is_err());

        let negative = StoredAccount { balance: -1, ..row };
        assert!(Account::from_stored(negative).is_err());
    }
}
