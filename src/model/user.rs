//! User account model.

use crate::model::UserId;

/// A registered account.
///
/// `password_hash` is the stored credential digest; it never crosses a
/// serialization boundary, so this type deliberately carries no serde
/// derives.
#[derive(Debug, Clone)]
pub struct User {
    /// Row id.
    pub id: UserId,

    /// Email as registered (unique, case-sensitive).
    pub email: String,

    /// Hex digest of the peppered password.
    pub password_hash: String,

    /// Creation timestamp (Unix milliseconds).
    pub created_at: i64,
}
