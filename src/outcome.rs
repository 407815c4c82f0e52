// 📦 Outcome - uniform success/failure contract
// Every operation in the crate returns an Outcome; failures are values, never panics.

use serde::Serialize;
use std::fmt;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Account name missing or empty at creation
    InvalidAccountName,

    /// Account owner missing or empty at creation
    InvalidAccountOwner,

    /// No account stored under the requested id
    AccountNotFound,

    /// Store fault while inserting
    CreateFailed,

    /// Store fault while reading (including corrupt stored rows)
    ReadFailed,

    /// Store fault while overwriting
    UpdateFailed,
}

/// Coarse classification hosts use to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-correctable input problem
    Validation,
    /// Referenced entity is absent
    NotFound,
    /// Unexpected fault captured inside a store
    Infrastructure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidAccountName => "InvalidAccountName",
            ErrorKind::InvalidAccountOwner => "InvalidAccountOwner",
            ErrorKind::AccountNotFound => "AccountNotFound",
            ErrorKind::CreateFailed => "CreateFailed",
            ErrorKind::ReadFailed => "ReadFailed",
            ErrorKind::UpdateFailed => "UpdateFailed",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidAccountName | ErrorKind::InvalidAccountOwner => {
                ErrorCategory::Validation
            }
            ErrorKind::AccountNotFound => ErrorCategory::NotFound,
            ErrorKind::CreateFailed | ErrorKind::ReadFailed | ErrorKind::UpdateFailed => {
                ErrorCategory::Infrastructure
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ERROR INFO
// ============================================================================

/// Structured failure payload carried by every failed [`Outcome`].
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Attach an opaque payload, typically a captured fault.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Wrap an unexpected fault as an infrastructure failure of `kind`.
    pub fn from_fault(kind: ErrorKind, message: impl Into<String>, fault: impl fmt::Display) -> Self {
        Self::new(kind, message).with_details(serde_json::json!({ "fault": fault.to_string() }))
    }

    pub fn not_found(id: &str) -> Self {
        Self::new(ErrorKind::AccountNotFound, format!("Account not found: {}", id))
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Either `Ok(content)` or `Err(ErrorInfo)`, never both.
pub type Outcome<T> = std::result::Result<T, ErrorInfo>;

pub fn succeeded<T>(content: T) -> Outcome<T> {
    Ok(content)
}

pub fn failed<T>(error: ErrorInfo) -> Outcome<T> {
    Err(error)
}

/// Default status classification for transport mapping.
///
/// Success maps to 200 and failure to 400. Hosts are free to apply a finer policy
/// (the HTTP host maps not-found to 404 and infrastructure faults to 500).
pub trait OutcomeStatus {
    fn status(&self) -> u16;
}

impl<T> OutcomeStatus for Outcome<T> {
    fn status(&self) -> u16 {
        match self {
            Ok(_) => 200,
            Err(_) => 400,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
