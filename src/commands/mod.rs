/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes a handler module per command family:

- `auth`          — Login, logout, status, password flows and profile
- `commercials`   — Commercial list/show/add/update/delete
- `quotas`        — Quota list/add/update/delete
- `prospections`  — Prospection CRUD and follow-up notes
- `permissions`   — Permission listing and grants
- `dash`          — Interactive dashboard (readline loop)
- `dash_commands` — Slash-command parser for the dashboard

These handlers are intentionally small and use the library components:
the API client, the session store, and the routing guard.
*/

use colored::Colorize;

pub mod auth;
pub mod commercials;
pub mod dash;
pub mod dash_commands;
pub mod permissions;
pub mod prospections;
pub mod quotas;

/// Serialize a serializable value into pretty JSON string.
///
/// Returns the JSON string or the serde_json error.
pub(crate) fn serialize_pretty<T: serde::Serialize + ?Sized>(
    value: &T,
) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Print a green success notification
pub(crate) fn print_success(message: &str) {
    println!("{}", message.green());
}

/// Print a red error notification to stderr
pub(crate) fn print_error(message: &str) {
    eprintln!("{}", format!("Erreur: {}", message).red());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_pretty_roundtrip() {
        let value = serde_json::json!({"id": 1, "nom": "Dubois"});
        let json = serialize_pretty(&value).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_notifications_do_not_panic() {
        print_success("Connexion réussie.");
        print_error("Identifiants invalides");
    }
}
