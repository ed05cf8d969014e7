//! Player session establishment: authenticate, then seed from the ledger.

use anyhow::{Context, Result};
use tracing::{info, warn};

use client_blockchain_core::{AuthMode, IdentityService, LedgerReader};
use runtime::SessionContext;

use crate::config::Credentials;

/// Authenticates `credentials` and reads the player's ledger state.
///
/// Without credentials the session is a guest session with no wallet. A
/// failed ledger read does not abort the login: the game then starts from
/// room 0 at full health.
pub async fn establish_session<S>(
    service: &S,
    credentials: Option<&Credentials>,
    session_id: &str,
) -> Result<SessionContext>
where
    S: IdentityService + LedgerReader + ?Sized,
{
    let Some(credentials) = credentials else {
        info!(target: "bootstrap::session", session = session_id, "starting guest session");
        return Ok(SessionContext::new(session_id));
    };

    let auth = match credentials.mode {
        AuthMode::Signup => service
            .sign_up(&credentials.email, &credentials.password)
            .await
            .with_context(|| format!("sign-up failed for {}", credentials.email))?,
        AuthMode::Login => service
            .log_in(&credentials.email, &credentials.password)
            .await
            .with_context(|| format!("login failed for {}", credentials.email))?,
    };

    let mut context = SessionContext::from_auth(session_id, &auth);
    let Some(account) = context.account.clone() else {
        warn!(
            target: "bootstrap::session",
            user = %auth.user_id,
            "account has no wallet, room advances will fail"
        );
        return Ok(context);
    };

    match service.read_state(&account).await {
        Ok(vivi) => {
            info!(
                target: "bootstrap::session",
                user = %account.user_id,
                room = vivi.room,
                health = vivi.health_points,
                "loaded ledger state"
            );
            context.vivi = Some(vivi);
        }
        Err(err) => {
            warn!(
                target: "bootstrap::session",
                user = %account.user_id,
                %err,
                "could not read ledger state, starting fresh"
            );
        }
    }

    Ok(context)
}
