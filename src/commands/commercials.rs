//! Commercial management commands
//!
//! This module provides commands for managing the commerciaux roster:
//! listing with an optional substring filter, showing one record with its
//! assigned quotas, and the add/update/delete mutations. Every mutation is
//! followed by a full re-fetch of the collection so the user sees the
//! backend's current state rather than a locally patched copy.

use crate::api::types::{Commercial, CommercialRequest, CommercialUpdate};
use crate::api::ApiClient;
use crate::cli::CommercialCommand;
use crate::commands::{print_success, serialize_pretty};
use crate::config::Config;
use crate::error::{ProspectError, Result};
use crate::filter;
use crate::session::Session;
use crate::validation;
use prettytable::{cell, row, Table};

/// Dispatch a `commercials` subcommand against the backend
///
/// # Errors
///
/// Returns an error if the client cannot be built, if validation fails, or
/// if the backend rejects the request.
pub async fn run(command: CommercialCommand, config: &Config, session: &Session) -> Result<()> {
    let client = ApiClient::new(&config.api)?.with_token(&session.token);

    match command {
        CommercialCommand::List { filter, json } => list(&client, filter.as_deref(), json).await,
        CommercialCommand::Show { id, json } => show(&client, id, json).await,
        CommercialCommand::Add {
            nom,
            prenom,
            email,
            telephone,
        } => add(&client, nom, prenom, email, telephone).await,
        CommercialCommand::Update {
            id,
            nom,
            prenom,
            email,
            telephone,
        } => update(&client, id, nom, prenom, email, telephone).await,
        CommercialCommand::Delete { id } => delete(&client, id).await,
    }
}

/// List commerciaux, optionally narrowed by a case-insensitive substring
/// filter over nom, prénom, and email.
pub(crate) async fn list(client: &ApiClient, filter: Option<&str>, json: bool) -> Result<()> {
    tracing::debug!(
        "commercials::list flags - filter: {:?}, json: {}",
        filter,
        json
    );
    tracing::info!("Listing commercials from {}", client.base_url());

    let commercials = client.list_commercials().await?;
    let rows = filter::filter_rows(&commercials, filter.unwrap_or(""));

    if rows.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("Aucun commercial trouvé.");
        }
        return Ok(());
    }

    if json {
        output_commercials_json(&rows)?;
    } else {
        output_commercials_table(&rows);
    }

    Ok(())
}

/// Show one commercial with their assigned quotas
async fn show(client: &ApiClient, id: u64, json: bool) -> Result<()> {
    tracing::info!("Fetching commercial {}", id);

    let commercial = client.get_commercial(id).await?;

    if json {
        let out = serialize_pretty(&commercial).map_err(ProspectError::Serialization)?;
        println!("{}", out);
    } else {
        output_commercial_detailed(&commercial);
    }

    Ok(())
}

/// Create a commercial and re-fetch the roster
async fn add(
    client: &ApiClient,
    nom: String,
    prenom: String,
    email: String,
    telephone: Option<String>,
) -> Result<()> {
    validation::validate_email(&email)?;
    tracing::info!("Adding commercial {} {}", prenom, nom);

    client
        .add_commercial(&CommercialRequest {
            nom,
            prenom,
            email,
            telephone,
        })
        .await?;

    print_success("Commercial ajouté.");
    list(client, None, false).await
}

/// Update the provided fields of a commercial and re-fetch the roster.
/// At least one field must be provided.
async fn update(
    client: &ApiClient,
    id: u64,
    nom: Option<String>,
    prenom: Option<String>,
    email: Option<String>,
    telephone: Option<String>,
) -> Result<()> {
    if nom.is_none() && prenom.is_none() && email.is_none() && telephone.is_none() {
        return Err(ProspectError::validation(
            "update",
            "Fournissez au moins un champ à mettre à jour",
        )
        .into());
    }
    if let Some(email) = &email {
        validation::validate_email(email)?;
    }
    tracing::info!("Updating commercial {}", id);

    client
        .update_commercial(
            id,
            &CommercialUpdate {
                nom,
                prenom,
                email,
                telephone,
            },
        )
        .await?;

    print_success(&format!("Commercial {} mis à jour.", id));
    list(client, None, false).await
}

/// Delete a commercial and re-fetch the roster
async fn delete(client: &ApiClient, id: u64) -> Result<()> {
    tracing::info!("Deleting commercial {}", id);

    client.delete_commercial(id).await?;

    print_success(&format!("Commercial {} supprimé.", id));
    list(client, None, false).await
}

/// Output commerciaux in JSON format
///
/// # Errors
///
/// Returns `ProspectError::Serialization` if serialization fails
fn output_commercials_json(commercials: &[&Commercial]) -> Result<()> {
    let json = serialize_pretty(commercials).map_err(ProspectError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Output commerciaux in table format
fn output_commercials_table(commercials: &[&Commercial]) {
    let mut table = Table::new();
    table.add_row(row![
        "ID",
        "Nom",
        "Prénom",
        "Email",
        "Téléphone",
        "Quotas"
    ]);

    for commercial in commercials {
        let telephone = commercial.utilisateur.telephone.as_deref().unwrap_or("-");
        table.add_row(row![
            commercial.id,
            commercial.utilisateur.nom,
            commercial.utilisateur.prenom,
            commercial.utilisateur.email,
            telephone,
            commercial.quotas.len()
        ]);
    }

    println!("\nCommerciaux:\n");
    table.printstd();
    println!();
}

/// Output one commercial in detailed format, with their quotas
fn output_commercial_detailed(commercial: &Commercial) {
    println!("\nFiche commercial ({})\n", commercial.full_name());
    println!("Id:        {}", commercial.id);
    println!("Nom:       {}", commercial.utilisateur.nom);
    println!("Prénom:    {}", commercial.utilisateur.prenom);
    println!("Email:     {}", commercial.utilisateur.email);
    println!(
        "Téléphone: {}",
        commercial.utilisateur.telephone.as_deref().unwrap_or("-")
    );

    if commercial.quotas.is_empty() {
        println!("\nAucun quota assigné.");
    } else {
        let mut table = Table::new();
        table.add_row(row!["ID", "Début", "Fin", "Objectif", "Réalisé", "Statut"]);
        for quota in &commercial.quotas {
            table.add_row(row![
                quota.id,
                quota.date_debut,
                quota.date_fin,
                quota.nombre_fixe,
                quota.nombre_fait,
                quota.progress_status()
            ]);
        }
        println!("\nQuotas assignés:\n");
        table.printstd();
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Quota, Utilisateur};

    fn sample_commercial(id: u64, nom: &str, prenom: &str, email: &str) -> Commercial {
        Commercial {
            id,
            utilisateur: Utilisateur {
                id: id + 100,
                nom: nom.to_string(),
                prenom: prenom.to_string(),
                email: email.to_string(),
                telephone: None,
            },
            quotas: vec![],
        }
    }

    #[test]
    fn test_output_commercials_json_round_trips() {
        let a = sample_commercial(1, "Dupont", "Alice", "alice@exemple.fr");
        let b = sample_commercial(2, "Martin", "Bruno", "bruno@exemple.fr");
        let rows: Vec<&Commercial> = vec![&a, &b];

        let json = serialize_pretty(&rows).unwrap();
        let parsed: Vec<Commercial> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].utilisateur.nom, "Dupont");
        assert_eq!(parsed[1].utilisateur.email, "bruno@exemple.fr");
    }

    #[test]
    fn test_output_commercials_table_smoke() {
        let mut a = sample_commercial(1, "Dupont", "Alice", "alice@exemple.fr");
        a.utilisateur.telephone = Some("0601020304".to_string());
        let rows: Vec<&Commercial> = vec![&a];
        output_commercials_table(&rows);
    }

    #[test]
    fn test_output_commercial_detailed_with_quotas() {
        let mut commercial = sample_commercial(3, "Durand", "Chloé", "chloe@exemple.fr");
        commercial.quotas.push(Quota {
            id: 9,
            date_debut: "2024-01-01".to_string(),
            date_fin: "2024-03-31".to_string(),
            nombre_fixe: 10,
            nombre_fait: 4,
            statut: None,
            commercial: None,
        });
        output_commercial_detailed(&commercial);
    }

    #[test]
    fn test_filtered_rows_serialize_as_plain_array() {
        let a = sample_commercial(1, "Dupont", "Alice", "alice@exemple.fr");
        let b = sample_commercial(2, "Martin", "Bruno", "bruno@exemple.fr");
        let all = vec![a, b];

        let rows = filter::filter_rows(&all, "dupont");
        assert_eq!(rows.len(), 1);
        let json = serialize_pretty(&rows).unwrap();
        assert!(json.contains("\"Dupont\""));
        assert!(!json.contains("\"Martin\""));
    }
}
