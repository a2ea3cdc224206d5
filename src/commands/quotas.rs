//! Quota management commands
//!
//! This module provides commands for managing quotas assigned to the
//! commerciaux: listing with an optional substring filter, adding a quota
//! for a commercial, updating the target or actual counts, and deletion.
//! The displayed status is always computed from the counts; any status the
//! backend stored alongside is ignored. Every mutation is followed by a
//! full re-fetch of the collection.

use crate::api::types::{AddQuotaRequest, Quota, QuotaUpdate};
use crate::api::ApiClient;
use crate::cli::QuotaCommand;
use crate::commands::{print_success, serialize_pretty};
use crate::config::Config;
use crate::error::{ProspectError, Result};
use crate::filter;
use crate::session::Session;
use colored::Colorize;
use prettytable::{cell, row, Table};

/// Dispatch a `quotas` subcommand against the backend
///
/// # Errors
///
/// Returns an error if the client cannot be built, if validation fails, or
/// if the backend rejects the request.
pub async fn run(command: QuotaCommand, config: &Config, session: &Session) -> Result<()> {
    let client = ApiClient::new(&config.api)?.with_token(&session.token);

    match command {
        QuotaCommand::List { filter, json } => list(&client, filter.as_deref(), json).await,
        QuotaCommand::Add {
            commercial_id,
            date_debut,
            date_fin,
            nombre_fixe,
        } => add(&client, commercial_id, date_debut, date_fin, nombre_fixe).await,
        QuotaCommand::Update {
            id,
            date_debut,
            date_fin,
            nombre_fixe,
            nombre_fait,
        } => update(&client, id, date_debut, date_fin, nombre_fixe, nombre_fait).await,
        QuotaCommand::Delete { id } => delete(&client, id).await,
    }
}

/// List quotas, optionally narrowed by a case-insensitive substring filter
/// over the owning commercial's name and the period dates.
pub(crate) async fn list(client: &ApiClient, filter: Option<&str>, json: bool) -> Result<()> {
    tracing::debug!("quotas::list flags - filter: {:?}, json: {}", filter, json);
    tracing::info!("Listing quotas from {}", client.base_url());

    let quotas = client.list_quotas().await?;
    let rows = filter::filter_rows(&quotas, filter.unwrap_or(""));

    if rows.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("Aucun quota trouvé.");
        }
        return Ok(());
    }

    if json {
        output_quotas_json(&rows)?;
    } else {
        output_quotas_table(&rows);
    }

    Ok(())
}

/// Assign a new quota to a commercial and re-fetch the collection
async fn add(
    client: &ApiClient,
    commercial_id: u64,
    date_debut: String,
    date_fin: String,
    nombre_fixe: u32,
) -> Result<()> {
    tracing::info!(
        "Adding quota for commercial {} ({} to {})",
        commercial_id,
        date_debut,
        date_fin
    );

    client
        .add_quota(&AddQuotaRequest {
            commercial_id,
            date_debut,
            date_fin,
            nombre_fixe,
        })
        .await?;

    print_success("Quota ajouté.");
    list(client, None, false).await
}

/// Update the provided fields of a quota and re-fetch the collection.
/// At least one field must be provided.
async fn update(
    client: &ApiClient,
    id: u64,
    date_debut: Option<String>,
    date_fin: Option<String>,
    nombre_fixe: Option<u32>,
    nombre_fait: Option<u32>,
) -> Result<()> {
    if date_debut.is_none() && date_fin.is_none() && nombre_fixe.is_none() && nombre_fait.is_none()
    {
        return Err(ProspectError::validation(
            "update",
            "Fournissez au moins un champ à mettre à jour",
        )
        .into());
    }
    tracing::info!("Updating quota {}", id);

    client
        .update_quota(
            id,
            &QuotaUpdate {
                date_debut,
                date_fin,
                nombre_fixe,
                nombre_fait,
            },
        )
        .await?;

    print_success(&format!("Quota {} mis à jour.", id));
    list(client, None, false).await
}

/// Delete a quota and re-fetch the collection
async fn delete(client: &ApiClient, id: u64) -> Result<()> {
    tracing::info!("Deleting quota {}", id);

    client.delete_quota(id).await?;

    print_success(&format!("Quota {} supprimé.", id));
    list(client, None, false).await
}

/// Output quotas in JSON format
///
/// # Errors
///
/// Returns `ProspectError::Serialization` if serialization fails
fn output_quotas_json(quotas: &[&Quota]) -> Result<()> {
    let json = serialize_pretty(quotas).map_err(ProspectError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Output quotas in table format
fn output_quotas_table(quotas: &[&Quota]) {
    let mut table = Table::new();
    table.add_row(row![
        "ID",
        "Commercial",
        "Début",
        "Fin",
        "Objectif",
        "Réalisé",
        "Statut"
    ]);

    for quota in quotas {
        let commercial = quota
            .commercial
            .as_ref()
            .map(|c| c.full_name())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            quota.id,
            commercial,
            quota.date_debut,
            quota.date_fin,
            quota.nombre_fixe,
            quota.nombre_fait,
            format_statut(quota)
        ]);
    }

    println!("\nQuotas:\n");
    table.printstd();
    println!();
}

/// Format the computed status with its color
fn format_statut(quota: &Quota) -> String {
    if quota.is_reached() {
        quota.progress_status().green().to_string()
    } else {
        quota.progress_status().red().to_string()
    }
}
