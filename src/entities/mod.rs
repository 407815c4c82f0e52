// Entity Models
//
// Identity is assigned once; values only change by deriving a new instance.

pub mod account;

pub use account::{Account, AccountProps, AccountUpdate};
