//! Session persistence for the logged-in responsable
//!
//! This module provides storage and retrieval of the authentication session:
//! the bearer token returned by `responsableLogin` together with the opaque
//! user payload that came with it, an explicit creation timestamp, and an
//! explicit expiry.
//!
//! Sessions are serialized to JSON in a single file under the platform data
//! directory. The file is the process-shared storage scope: every command
//! reading it sees the same session, and logout removes it for all of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::types::Utilisateur;
use crate::config::SessionConfig;
use crate::error::{ProspectError, Result};

/// File name of the stored session inside the session directory
const SESSION_FILE: &str = "session.json";

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An authenticated session for the Prospect backend.
///
/// The `user` slot holds the entire login response payload, untyped. The
/// backend has shipped several shapes for it over time, so no schema is
/// enforced at write time; [`Session::profile`] offers a tolerant typed view
/// for the screens that need a display name or the user's id.
///
/// `expires_at` is computed client side at login from the configured session
/// TTL; the backend itself returns no expiry.
///
/// # Examples
///
/// ```
/// use prospect::session::Session;
///
/// let payload = serde_json::json!({"token": "abc123", "utilisateur": {
///     "id": 1, "nom": "Dubois", "prenom": "Jean", "email": "jean@example.com"
/// }});
/// let session = Session::from_login_payload(payload, 24).unwrap();
///
/// assert_eq!(session.token, "abc123");
/// assert!(!session.is_expired());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued by `responsableLogin`.
    pub token: String,

    /// The full login response payload, stored opaque.
    pub user: serde_json::Value,

    /// UTC timestamp at which the session was created.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,

    /// UTC timestamp at which the session expires.
    ///
    /// When `None`, the session never expires. Stored as epoch seconds via
    /// the `chrono` serde helpers so it survives the JSON round-trip.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Builds a session from a successful login response.
    ///
    /// Extracts the `token` field and keeps the whole payload as the opaque
    /// `user` slot. The expiry is stamped `ttl_hours` from now.
    ///
    /// # Arguments
    ///
    /// * `payload` - The JSON body returned by `POST /responsableLogin`.
    /// * `ttl_hours` - Configured session lifetime in hours.
    ///
    /// # Errors
    ///
    /// Returns [`ProspectError::Session`] when the payload carries no string
    /// `token` field.
    pub fn from_login_payload(payload: serde_json::Value, ttl_hours: i64) -> Result<Self> {
        let token = payload
            .get("token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ProspectError::Session("Login response contains no token".to_string())
            })?
            .to_string();

        let now = Utc::now();
        Ok(Self {
            token,
            user: payload,
            created_at: now,
            expires_at: Some(now + chrono::Duration::hours(ttl_hours)),
        })
    }

    /// Returns `true` when the session is expired or about to expire.
    ///
    /// A 60-second buffer is applied so that a request started just before
    /// the boundary is not sent with a token the backend already rejects.
    /// Sessions with no `expires_at` value are considered perpetually valid.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            None => false,
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(60);
                Utc::now() >= expires_at - buffer
            }
        }
    }

    /// Best-effort typed view of the opaque user payload.
    ///
    /// Tolerates both shapes the backend has shipped: a payload with a
    /// nested `utilisateur` object, and a payload that itself is the
    /// utilisateur. Returns `None` when neither deserializes.
    pub fn profile(&self) -> Option<Utilisateur> {
        if let Some(nested) = self.user.get("utilisateur") {
            if let Ok(profile) = serde_json::from_value::<Utilisateur>(nested.clone()) {
                return Some(profile);
            }
        }
        serde_json::from_value::<Utilisateur>(self.user.clone()).ok()
    }

    /// Display name for the logged-in responsable.
    ///
    /// Falls back to the email, then to a generic label, when the payload
    /// has no usable profile.
    pub fn display_name(&self) -> String {
        match self.profile() {
            Some(profile) => format!("{} {}", profile.prenom, profile.nom),
            None => self
                .user
                .get("email")
                .and_then(|e| e.as_str())
                .unwrap_or("responsable")
                .to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// File-backed accessor for the stored session.
///
/// The store owns only the directory path; every operation re-reads or
/// rewrites the session file so concurrent commands observe last-write-wins
/// semantics, matching the shared-storage behavior of the web dashboard.
///
/// # Examples
///
/// ```no_run
/// use prospect::config::SessionConfig;
/// use prospect::session::SessionStore;
///
/// # fn example() -> prospect::error::Result<()> {
/// let store = SessionStore::from_config(&SessionConfig::default())?;
/// match store.load()? {
///     Some(session) => println!("Logged in as {}", session.display_name()),
///     None => println!("Not logged in"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at an explicit directory.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Creates a store from the session configuration.
    ///
    /// Uses the configured directory when set (the config layer also maps
    /// `PROSPECT_SESSION_DIR` into it), otherwise the platform data
    /// directory for the application.
    ///
    /// # Errors
    ///
    /// Returns [`ProspectError::Session`] when no platform data directory
    /// can be determined.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        if let Some(dir) = &config.directory {
            return Ok(Self::new(dir.clone()));
        }

        let dirs = directories::ProjectDirs::from("com", "prospect", "prospect").ok_or_else(
            || ProspectError::Session("Could not determine platform data directory".to_string()),
        )?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    /// Path of the session file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Persists the session, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an IO error when the directory or file cannot be written.
    pub fn save(&self, session: &Session) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(self.path(), json)?;
        tracing::debug!(path = %self.path().display(), "Session saved");
        Ok(())
    }

    /// Loads whatever session is on disk.
    ///
    /// Returns `Ok(None)` when no session file exists, allowing callers to
    /// distinguish "not logged in" from a genuine storage error. An expired
    /// session is still returned here so that status displays can report it;
    /// use [`SessionStore::load_active`] for gate checks.
    ///
    /// # Errors
    ///
    /// Returns [`ProspectError::Session`] when the file exists but holds
    /// malformed JSON.
    pub fn load(&self) -> Result<Option<Session>> {
        let path = self.path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_str(&contents).map_err(|e| {
            ProspectError::Session(format!("Malformed session file {}: {}", path.display(), e))
        })?;
        Ok(Some(session))
    }

    /// Loads the session, treating an expired one as absent.
    ///
    /// This is the load the auth gate uses: presence of a live session alone
    /// grants access.
    pub fn load_active(&self) -> Result<Option<Session>> {
        match self.load()? {
            Some(session) if session.is_expired() => {
                tracing::debug!("Stored session is expired, treating as absent");
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Removes the stored session.
    ///
    /// This is a no-op when no session exists, so logout is safe to run
    /// twice.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => {
                tracing::debug!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Directory the store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
