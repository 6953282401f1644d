//! # Account Repository
//!
//! Shop accounts with argon2-hashed passwords.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register(email, password, business)                                   │
//! │     └── argon2 hash with random salt ──► INSERT accounts               │
//! │                                                                         │
//! │  authenticate(email, password)                                         │
//! │     ├── no row for email        ──► None                               │
//! │     ├── hash does not verify    ──► None                               │
//! │     └── verified                ──► Some(Account)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Emails are trimmed and lowercased before they are stored or looked up.

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// A shop account. The password hash never leaves this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub business_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: String,
    email: String,
    business_name: String,
    created_at: DateTime<Utc>,
    password_hash: String,
}

impl From<CredentialRow> for Account {
    fn from(row: CredentialRow) -> Self {
        Account {
            id: row.id,
            email: row.email,
            business_name: row.business_name,
            created_at: row.created_at,
        }
    }
}

/// Repository for account operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Creates an account.
    ///
    /// Fails with [`DbError::UniqueViolation`] when the email is taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        business_name: &str,
    ) -> DbResult<Account> {
        let email = normalize_email(email);
        let account = Account {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            business_name: business_name.trim().to_string(),
            created_at: Utc::now(),
        };
        let password_hash = hash_password(password)?;

        sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, business_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&account.id)
        .bind(&account.email)
        .bind(&password_hash)
        .bind(&account.business_name)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("email", &email),
            other => other,
        })?;

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Checks credentials. `None` when the email is unknown or the password
    /// does not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> DbResult<Option<Account>> {
        let email = normalize_email(email);

        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT id, email, business_name, created_at, password_hash
             FROM accounts
             WHERE email = ?1",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            debug!("Login attempt for unknown email");
            return Ok(None);
        };

        if !verify_password(password, &row.password_hash) {
            warn!(account_id = %row.id, "Login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(row.into()))
    }

    /// Gets an account by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Account>> {
        let account: Option<Account> = sqlx::query_as(
            "SELECT id, email, business_name, created_at
             FROM accounts
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
