//! Prospection management commands
//!
//! This module provides commands for managing prospection visits and their
//! suivis (follow-up notes): listing with an optional substring filter,
//! showing one visit with its suivis, the add/update/delete mutations, and
//! appending a suivi to an existing visit. Every mutation is followed by a
//! full re-fetch so the user sees the backend's current state.

use crate::api::types::{
    Prospection, ProspectionRequest, ProspectionStatut, ProspectionUpdate, SuiviRequest,
};
use crate::api::ApiClient;
use crate::cli::ProspectionCommand;
use crate::commands::{print_success, serialize_pretty};
use crate::config::Config;
use crate::error::{ProspectError, Result};
use crate::filter;
use crate::session::Session;
use prettytable::{cell, row, Table};

/// Dispatch a `prospections` subcommand against the backend
///
/// # Errors
///
/// Returns an error if the client cannot be built, if validation fails, or
/// if the backend rejects the request.
pub async fn run(command: ProspectionCommand, config: &Config, session: &Session) -> Result<()> {
    let client = ApiClient::new(&config.api)?.with_token(&session.token);

    match command {
        ProspectionCommand::List { filter, json } => list(&client, filter.as_deref(), json).await,
        ProspectionCommand::Show { id, json } => show(&client, id, json).await,
        ProspectionCommand::Add {
            commercial_id,
            date_heure,
            societe,
            personne_rencontree,
            contact,
            fonction,
        } => {
            add(
                &client,
                commercial_id,
                date_heure,
                societe,
                personne_rencontree,
                contact,
                fonction,
            )
            .await
        }
        ProspectionCommand::Update {
            id,
            date_heure,
            societe,
            personne_rencontree,
            contact,
            fonction,
            statut,
        } => {
            update(
                &client,
                id,
                date_heure,
                societe,
                personne_rencontree,
                contact,
                fonction,
                statut,
            )
            .await
        }
        ProspectionCommand::Delete { id } => delete(&client, id).await,
        ProspectionCommand::Suivi {
            id,
            commentaire,
            date,
        } => add_suivi(&client, id, commentaire, date).await,
    }
}

/// List prospections, optionally narrowed by a case-insensitive substring
/// filter over the commercial's name, the société, and the contact person.
pub(crate) async fn list(client: &ApiClient, filter: Option<&str>, json: bool) -> Result<()> {
    tracing::debug!(
        "prospections::list flags - filter: {:?}, json: {}",
        filter,
        json
    );
    tracing::info!("Listing prospections from {}", client.base_url());

    let prospections = client.list_prospections().await?;
    let rows = filter::filter_rows(&prospections, filter.unwrap_or(""));

    if rows.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("Aucune prospection trouvée.");
        }
        return Ok(());
    }

    if json {
        output_prospections_json(&rows)?;
    } else {
        output_prospections_table(&rows);
    }

    Ok(())
}

/// Show one prospection with its suivis
async fn show(client: &ApiClient, id: u64, json: bool) -> Result<()> {
    tracing::info!("Fetching prospection {}", id);

    let prospection = client.get_prospection(id).await?;

    if json {
        let out = serialize_pretty(&prospection).map_err(ProspectError::Serialization)?;
        println!("{}", out);
    } else {
        output_prospection_detailed(&prospection);
    }

    Ok(())
}

/// Record a new prospection visit and re-fetch the collection
async fn add(
    client: &ApiClient,
    commercial_id: u64,
    date_heure: String,
    societe: String,
    personne_rencontree: String,
    contact: Option<String>,
    fonction: Option<String>,
) -> Result<()> {
    tracing::info!(
        "Adding prospection at {} for commercial {}",
        societe,
        commercial_id
    );

    client
        .add_prospection(&ProspectionRequest {
            commercial_id,
            date_heure,
            societe,
            personne_rencontree,
            contact_pers_rencont: contact,
            fonction_pers_rencont: fonction,
        })
        .await?;

    print_success("Prospection ajoutée.");
    list(client, None, false).await
}

/// Update the provided fields of a prospection and re-fetch the collection.
/// At least one field must be provided; the statut is parsed from its
/// French label before submission.
#[allow(clippy::too_many_arguments)]
async fn update(
    client: &ApiClient,
    id: u64,
    date_heure: Option<String>,
    societe: Option<String>,
    personne_rencontree: Option<String>,
    contact: Option<String>,
    fonction: Option<String>,
    statut: Option<String>,
) -> Result<()> {
    if date_heure.is_none()
        && societe.is_none()
        && personne_rencontree.is_none()
        && contact.is_none()
        && fonction.is_none()
        && statut.is_none()
    {
        return Err(ProspectError::validation(
            "update",
            "Fournissez au moins un champ à mettre à jour",
        )
        .into());
    }

    let statut = match statut {
        Some(raw) => Some(
            ProspectionStatut::parse_str(&raw)
                .map_err(|e| ProspectError::validation("statut", &e))?,
        ),
        None => None,
    };
    tracing::info!("Updating prospection {}", id);

    client
        .update_prospection(
            id,
            &ProspectionUpdate {
                date_heure,
                societe,
                personne_rencontree,
                contact_pers_rencont: contact,
                fonction_pers_rencont: fonction,
                statut,
            },
        )
        .await?;

    print_success(&format!("Prospection {} mise à jour.", id));
    list(client, None, false).await
}

/// Delete a prospection and re-fetch the collection
async fn delete(client: &ApiClient, id: u64) -> Result<()> {
    tracing::info!("Deleting prospection {}", id);

    client.delete_prospection(id).await?;

    print_success(&format!("Prospection {} supprimée.", id));
    list(client, None, false).await
}

/// Append a suivi to a prospection and re-fetch that prospection.
/// The date defaults to today when not provided.
async fn add_suivi(
    client: &ApiClient,
    id: u64,
    commentaire: String,
    date: Option<String>,
) -> Result<()> {
    let date_suivi = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    tracing::info!("Adding suivi to prospection {} on {}", id, date_suivi);

    client
        .add_suivi(
            id,
            &SuiviRequest {
                date_suivi,
                commentaire,
            },
        )
        .await?;

    print_success("Suivi ajouté.");
    show(client, id, false).await
}

/// Output prospections in JSON format
///
/// # Errors
///
/// Returns `ProspectError::Serialization` if serialization fails
fn output_prospections_json(prospections: &[&Prospection]) -> Result<()> {
    let json = serialize_pretty(prospections).map_err(ProspectError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Output prospections in table format
fn output_prospections_table(prospections: &[&Prospection]) {
    let mut table = Table::new();
    table.add_row(row![
        "ID",
        "Date",
        "Commercial",
        "Société",
        "Personne",
        "Contact",
        "Statut",
        "Suivis"
    ]);

    for prospection in prospections {
        let commercial = match prospection.commercial_name() {
            name if name.is_empty() => "-".to_string(),
            name => name,
        };
        let contact = prospection.contact_pers_rencont.as_deref().unwrap_or("-");
        let statut = prospection
            .statut
            .as_ref()
            .map(|s| s.colored_label())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            prospection.id,
            prospection.date_heure,
            commercial,
            prospection.societe,
            prospection.personne_rencontree,
            contact,
            statut,
            prospection.suivis.len()
        ]);
    }

    println!("\nProspections:\n");
    table.printstd();
    println!();
}

/// Output one prospection in detailed format, with its suivis
fn output_prospection_detailed(prospection: &Prospection) {
    println!("\nFiche prospection ({})\n", prospection.societe);
    println!("Id:         {}", prospection.id);
    println!("Date:       {}", prospection.date_heure);
    println!("Société:    {}", prospection.societe);
    println!("Personne:   {}", prospection.personne_rencontree);
    println!(
        "Contact:    {}",
        prospection.contact_pers_rencont.as_deref().unwrap_or("-")
    );
    println!(
        "Fonction:   {}",
        prospection.fonction_pers_rencont.as_deref().unwrap_or("-")
    );
    let commercial = prospection.commercial_name();
    if !commercial.is_empty() {
        println!("Commercial: {}", commercial);
    }
    if let Some(statut) = &prospection.statut {
        println!("Statut:     {}", statut.colored_label());
    }

    if prospection.suivis.is_empty() {
        println!("\nAucun suivi enregistré.");
    } else {
        let mut table = Table::new();
        table.add_row(row!["ID", "Date", "Commentaire"]);
        for suivi in &prospection.suivis {
            table.add_row(row![suivi.id, suivi.date_suivi, suivi.commentaire]);
        }
        println!("\nSuivis:\n");
        table.printstd();
    }

    println!();
}
