//! Central auth gate for screens and commands
//!
//! The gate is evaluated here, in the routing layer, rather than by each
//! view: a requested screen either resolves to itself (allowed) or to the
//! login screen (redirected). Presence of a live stored session alone gates
//! access; the token's authenticity is never validated against the backend.
//!
//! One-shot commands go through [`guard_command`], which turns the redirect
//! into an auth-required error naming the login command.

use crate::cli::Commands;
use crate::error::{ProspectError, Result};
use crate::screen::Tab;
use crate::session::Session;

/// A navigable screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Entry screen deciding between login and dashboard
    Splash,
    /// Login form
    Login,
    /// Password-reset request form
    ForgotPassword,
    /// Dashboard with the given active tab
    Dashboard(Tab),
}

impl Screen {
    /// Whether this screen sits behind the auth gate
    pub fn requires_session(&self) -> bool {
        matches!(self, Screen::Dashboard(_))
    }
}

/// Resolve a requested screen through the auth gate.
///
/// Evaluated once per navigation: a protected screen without a live session
/// resolves to [`Screen::Login`] and the protected screen is never shown.
/// Unprotected screens always resolve to themselves.
///
/// # Examples
///
/// ```
/// use prospect::router::{resolve, Screen};
/// use prospect::screen::Tab;
///
/// let requested = Screen::Dashboard(Tab::Commercials);
/// assert_eq!(resolve(requested, None), Screen::Login);
/// ```
pub fn resolve(requested: Screen, session: Option<&Session>) -> Screen {
    if requested.requires_session() && session.is_none() {
        tracing::debug!(?requested, "No session, redirecting to login");
        return Screen::Login;
    }
    requested
}

/// Resolve the entry screen from the stored session.
///
/// With a live session the user lands on the dashboard's default tab;
/// without one, on the login screen.
pub fn resolve_start(session: Option<&Session>, default_tab: Tab) -> Screen {
    match session {
        Some(_) => Screen::Dashboard(default_tab),
        None => Screen::Login,
    }
}

/// Gate a one-shot command on the stored session.
///
/// # Errors
///
/// Returns [`ProspectError::AuthRequired`] when the command needs a session
/// and none is stored (or the stored one is expired).
pub fn guard_command(command: &Commands, session: Option<&Session>) -> Result<()> {
    if command.requires_session() && session.is_none() {
        tracing::warn!("Rejected command without a stored session");
        return Err(ProspectError::AuthRequired(
            "no stored session, run `prospect login --email <EMAIL> --password <PASSWORD>` first"
                .to_string(),
        )
        .into());
    }
    Ok(())
}

/// Unwrap the stored session for a command the guard already admitted.
///
/// # Errors
///
/// Returns [`ProspectError::AuthRequired`] when no session is present, with
/// the same message as [`guard_command`].
pub fn require_session(session: Option<Session>) -> Result<Session> {
    session.ok_or_else(|| {
        ProspectError::AuthRequired(
            "no stored session, run `prospect login --email <EMAIL> --password <PASSWORD>` first"
                .to_string(),
        )
        .into()
    })
}
