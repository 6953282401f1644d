//! # Account Commands
//!
//! Shop accounts let an operator keep a copy of their settings and restore
//! it on another machine.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  account register / login                                               │
//! │     └── settings["session.account_id"] = account.id                     │
//! │                                                                         │
//! │  account push  ── local ShopSettings ──► profiles[account.id]           │
//! │  account pull  ── profiles[account.id] ──► local ShopSettings           │
//! │                                                                         │
//! │  account logout                                                         │
//! │     └── settings["session.account_id"] deleted                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use super::Output;
use crate::error::{AppError, AppResult};
use crate::state::Session;
use glazier_core::validation::{validate_email, validate_password};
use glazier_core::ValidationError;
use glazier_db::Account;

/// Settings key holding the logged-in account id.
pub const SESSION_ACCOUNT_KEY: &str = "session.account_id";

/// Creates an account and logs in as it.
pub async fn register(
    session: &Session,
    email: &str,
    password: &str,
    business_name: &str,
) -> AppResult<String> {
    validate_email(email)?;
    validate_password(password)?;
    if business_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "business name".to_string(),
        }
        .into());
    }

    let account = session
        .db()
        .accounts()
        .register(email, password, business_name)
        .await?;
    start_session(session, &account).await?;

    Ok(format!("Account created for {}", account.email))
}

/// Logs in.
pub async fn login(session: &Session, email: &str, password: &str) -> AppResult<String> {
    debug!("account login command");

    let account = session
        .db()
        .accounts()
        .authenticate(email, password)
        .await?
        .ok_or_else(|| AppError::auth("Invalid email or password"))?;
    start_session(session, &account).await?;

    Ok(format!("Logged in as {} ({})", account.email, account.business_name))
}

/// Logs out. Local settings are kept.
pub async fn logout(session: &Session) -> AppResult<String> {
    let was_logged_in = session.db().settings().delete(SESSION_ACCOUNT_KEY).await?;

    if was_logged_in {
        info!("Logged out");
        Ok("Logged out".to_string())
    } else {
        Ok("Not logged in".to_string())
    }
}

/// Saves the local settings to the account profile.
pub async fn push(session: &Session) -> AppResult<String> {
    let account = require_account(session).await?;

    session
        .db()
        .profiles()
        .upsert(&account.id, &session.settings)
        .await?;

    info!(account_id = %account.id, "Settings pushed");
    Ok(format!("Settings saved to {}", account.email))
}

/// Replaces the local settings with the account profile.
pub async fn pull(session: &mut Session) -> AppResult<String> {
    let account = require_account(session).await?;

    let settings = session
        .db()
        .profiles()
        .get(&account.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile", &account.email))?;

    session.settings = settings;
    session.save_settings().await?;

    info!(account_id = %account.id, "Settings pulled");
    Ok(format!("Settings restored from {}", account.email))
}

/// Login state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<Account>,
}

/// Shows who is logged in.
pub async fn status(session: &Session, output: Output) -> AppResult<String> {
    let account = current_account(session).await?;

    let view = StatusView {
        logged_in: account.is_some(),
        account,
    };

    output.render(&view, || match &view.account {
        Some(account) => format!(
            "Logged in as {} ({})",
            account.email, account.business_name
        ),
        None => "Not logged in".to_string(),
    })
}

async fn start_session(session: &Session, account: &Account) -> AppResult<()> {
    session
        .db()
        .settings()
        .set(SESSION_ACCOUNT_KEY, &account.id)
        .await?;

    info!(account_id = %account.id, "Logged in");
    Ok(())
}

async fn current_account(session: &Session) -> AppResult<Option<Account>> {
    let Some(id) = session.db().settings().get(SESSION_ACCOUNT_KEY).await? else {
        return Ok(None);
    };

    // A marker left behind by a deleted account counts as logged out
    Ok(session.db().accounts().get_by_id(&id).await?)
}

async fn require_account(session: &Session) -> AppResult<Account> {
    current_account(session)
        .await?
        .ok_or_else(|| AppError::auth("Not logged in. Run `glazier account login` first"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::session;
    use crate::error::ErrorCode;
    use glazier_core::ShopSettings;

    #[tokio::test]
    async fn test_register_logs_in() {
        let session = session().await;

        register(&session, "ventas@vidrieria.com", "secreto", "Vidriería Misiones")
            .await
            .unwrap();

        let text = status(&session, Output::Text).await.unwrap();
        assert_eq!(text, "Logged in as ventas@vidrieria.com (Vidriería Misiones)");
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let session = session().await;

        let err = register(&session, "no-es-email", "secreto", "A").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register(&session, "a@b.com", "123", "A").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register(&session, "a@b.com", "secreto", " ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_login_logout() {
        let session = session().await;
        register(&session, "a@b.com", "secreto", "A").await.unwrap();
        logout(&session).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&status(&session, Output::Json).await.unwrap()).unwrap();
        assert_eq!(json["loggedIn"], false);

        let err = login(&session, "a@b.com", "otra").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);

        login(&session, "A@B.com", "secreto").await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&status(&session, Output::Json).await.unwrap()).unwrap();
        assert_eq!(json["loggedIn"], true);
        assert_eq!(json["account"]["email"], "a@b.com");

        assert_eq!(logout(&session).await.unwrap(), "Logged out");
        assert_eq!(logout(&session).await.unwrap(), "Not logged in");
    }

    #[tokio::test]
    async fn test_push_then_pull() {
        let mut session = session().await;

        let err = push(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);

        register(&session, "a@b.com", "secreto", "A").await.unwrap();
        let err = pull(&mut session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        session.settings.margin = "65".to_string();
        session.settings.shop_name = "Cristalería Sur".to_string();
        push(&session).await.unwrap();

        session.reset_settings().await.unwrap();
        assert_eq!(session.settings, ShopSettings::default());

        pull(&mut session).await.unwrap();
        assert_eq!(session.settings.margin, "65");
        let stored = session.db().settings().load().await.unwrap();
        assert_eq!(stored.shop_name, "Cristalería Sur");
    }
}
