//! Permission commands
//!
//! The permission catalogue is a fixed list maintained by the backend, so
//! listing takes no filter. Granting assigns a set of permissions to one
//! commercial by id.

use crate::api::types::{GrantPermissionsRequest, Permission};
use crate::api::ApiClient;
use crate::cli::PermissionCommand;
use crate::commands::{print_success, serialize_pretty};
use crate::config::Config;
use crate::error::{ProspectError, Result};
use crate::session::Session;
use prettytable::{cell, row, Table};

/// Dispatch a `permissions` subcommand against the backend
///
/// # Errors
///
/// Returns an error if the client cannot be built, if no permission id was
/// provided to `grant`, or if the backend rejects the request.
pub async fn run(command: PermissionCommand, config: &Config, session: &Session) -> Result<()> {
    let client = ApiClient::new(&config.api)?.with_token(&session.token);

    match command {
        PermissionCommand::List { json } => list(&client, json).await,
        PermissionCommand::Grant {
            commercial_id,
            permissions,
        } => grant(&client, commercial_id, permissions).await,
    }
}

/// List the permission catalogue
pub(crate) async fn list(client: &ApiClient, json: bool) -> Result<()> {
    tracing::debug!("permissions::list flags - json: {}", json);
    tracing::info!("Listing permissions from {}", client.base_url());

    let permissions = client.list_permissions().await?;

    if permissions.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("Aucune permission disponible.");
        }
        return Ok(());
    }

    if json {
        output_permissions_json(&permissions)?;
    } else {
        output_permissions_table(&permissions);
    }

    Ok(())
}

/// Grant a set of permissions to a commercial
async fn grant(client: &ApiClient, commercial_id: u64, permissions: Vec<u64>) -> Result<()> {
    if permissions.is_empty() {
        return Err(ProspectError::validation(
            "permissions",
            "Fournissez au moins une permission (-p <id>)",
        )
        .into());
    }
    tracing::info!(
        "Granting {} permission(s) to commercial {}",
        permissions.len(),
        commercial_id
    );

    let count = permissions.len();
    client
        .grant_permissions(commercial_id, &GrantPermissionsRequest { permissions })
        .await?;

    print_success(&format!(
        "{} permission(s) accordée(s) au commercial {}.",
        count, commercial_id
    ));
    Ok(())
}

/// Output permissions in JSON format
///
/// # Errors
///
/// Returns `ProspectError::Serialization` if serialization fails
fn output_permissions_json(permissions: &[Permission]) -> Result<()> {
    let json = serialize_pretty(permissions).map_err(ProspectError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Output permissions in table format
fn output_permissions_table(permissions: &[Permission]) {
    let mut table = Table::new();
    table.add_row(row!["ID", "Libellé"]);

    for permission in permissions {
        table.add_row(row![permission.id, permission.libelle_perm]);
    }

    println!("\nPermissions:\n");
    table.printstd();
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_permissions() -> Vec<Permission> {
        vec![
            Permission {
                id: 1,
                libelle_perm: "Ajouter prospection".to_string(),
            },
            Permission {
                id: 2,
                libelle_perm: "Modifier prospection".to_string(),
            },
        ]
    }

    #[test]
    fn test_output_permissions_json_round_trips() {
        let permissions = sample_permissions();
        let json = serialize_pretty(&permissions).unwrap();
        let parsed: Vec<Permission> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].libelle_perm, "Ajouter prospection");
    }

    #[test]
    fn test_output_permissions_table_smoke() {
        output_permissions_table(&sample_permissions());
    }

    #[test]
    fn test_output_permissions_json_empty_array() {
        let permissions: Vec<Permission> = vec![];
        let json = serialize_pretty(&permissions).unwrap();
        assert_eq!(json, "[]");
    }
}
