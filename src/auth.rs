//! Identity service: registration, login, and the session identity.
//!
//! ## Credential digest
//!
//! Passwords are stored as the lowercase hex SHA-256 of the password
//! concatenated with a fixed, compiled-in pepper. There is no per-user
//! salt and no key stretching. The scheme is carried forward unchanged
//! because the digest is part of the on-disk credential format and
//! changing it would orphan every existing account. It is weak by modern
//! standards: identical passwords share digests, and offline guessing is
//! cheap once the pepper is known. Replacing it requires a hash
//! versioning migration.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::model::UserId;
use crate::storage::Database;

/// Compiled-in pepper; part of the stored credential format.
const PASSWORD_PEPPER: &str = "theatre_app_pepper_2024";

/// Minimum accepted password length, in characters.
const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// The cached session identity.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Row id of the logged-in user.
    pub id: UserId,

    /// Email as stored.
    pub email: String,
}

/// Identity service bound to one store.
///
/// Holds the process-wide "current user" between login and logout. The
/// current *project* selection is interaction state and lives with the
/// caller.
pub struct AuthService {
    db: Database,
    current_user: Option<CurrentUser>,
}

impl AuthService {
    /// Create a service over the given store handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db,
            current_user: None,
        }
    }

    /// Register a new account. Does not log the user in.
    ///
    /// The email is validated exactly as given; the entry surface is
    /// expected to trim surrounding whitespace.
    ///
    /// # Errors
    ///
    /// `InvalidEmail` for a malformed address, `WeakPassword` under 6
    /// characters, `EmailTaken` for an exact-match existing email (also
    /// when the insert loses a race to a concurrent registration), or a
    /// storage failure.
    pub fn register(&self, email: &str, password: &str) -> Result<UserId> {
        if !EMAIL_RE.is_match(email) {
            return Err(Error::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::WeakPassword);
        }
        if self.email_taken(email)? {
            return Err(Error::EmailTaken);
        }

        let now = chrono::Utc::now().timestamp_millis();
        let inserted = self.db.insert(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![email, hash_password(password), now],
        );
        match inserted {
            Ok(id) => Ok(id),
            Err(Error::Storage(err)) if is_constraint_violation(&err) => Err(Error::EmailTaken),
            Err(err) => Err(err),
        }
    }

    /// Log in, caching the identity as current on success.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when no account matches the email + digest
    /// pair (unknown email and wrong password are indistinguishable), or
    /// a storage failure.
    pub fn login(&mut self, email: &str, password: &str) -> Result<UserId> {
        let row = self.db.query_row_opt(
            "SELECT id, email FROM users WHERE email = ?1 AND password_hash = ?2",
            rusqlite::params![email, hash_password(password)],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )?;

        match row {
            Some((id, email)) => {
                self.current_user = Some(CurrentUser { id, email });
                Ok(id)
            }
            None => Err(Error::InvalidCredentials),
        }
    }

    /// Clear the cached identity unconditionally.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// The identity cached by the last successful login, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    fn email_taken(&self, email: &str) -> Result<bool> {
        let row = self.db.query_row_opt(
            "SELECT 1 FROM users WHERE email = ?1",
            rusqlite::params![email],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(row.is_some())
    }
}

/// Lowercase hex SHA-256 digest of the peppered password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(PASSWORD_PEPPER.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ffi::ErrorCode::ConstraintViolation,
                ..
            },
            _,
        )
    )
}
