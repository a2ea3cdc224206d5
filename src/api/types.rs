//! Backend entity and wire types
//!
//! This module defines every JSON type exchanged with the prospection
//! backend. All types derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize` unless noted otherwise. Field names match the backend's
//! French snake_case keys verbatim, so no `rename_all` is needed. Optional
//! fields omit their key from JSON when `None` via
//! `#[serde(skip_serializing_if = "Option::is_none")]`.
//!
//! Entities are backend-owned: the client holds a transient copy per list
//! render and never persists them.

use serde::{Deserialize, Serialize};
use std::fmt;

use colored::Colorize;

use crate::filter::Searchable;

// ---------------------------------------------------------------------------
// Route constants
// ---------------------------------------------------------------------------

/// Login for the responsable role.
pub const ROUTE_LOGIN: &str = "/responsableLogin";
/// Request a password reset email.
pub const ROUTE_RESET_PASSWORD: &str = "/resetPassword";
/// Change the password of the user with the appended id.
pub const ROUTE_CHANGE_PASSWORD: &str = "/changePassword";
/// Commercial collection; append `/{id}` for a single commercial.
pub const ROUTE_COMMERCIALS: &str = "/responsable/commercials";
/// Quota collection; append `/{id}` for a single quota.
pub const ROUTE_QUOTAS: &str = "/responsable/quotas";
/// Create a quota for a commercial.
pub const ROUTE_ADD_QUOTA: &str = "/responsable/addquota";
/// Prospection collection; append `/{id}` for a single prospection.
pub const ROUTE_PROSPECTIONS: &str = "/responsable/prospections";
/// Add a follow-up note to the prospection with the appended id.
pub const ROUTE_SUIVIS: &str = "/responsable/suivis";
/// Permission collection.
pub const ROUTE_PERMISSIONS: &str = "/responsable/permissions";
/// Grant permissions to the commercial with the appended id.
pub const ROUTE_ADD_PERMISSION: &str = "/responsable/addPermission";

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Account data nested inside a [`Commercial`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utilisateur {
    pub id: u64,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

impl Utilisateur {
    /// Display name in `prenom nom` order
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

/// A sales representative managed by the responsable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commercial {
    pub id: u64,
    pub utilisateur: Utilisateur,
    #[serde(default)]
    pub quotas: Vec<Quota>,
}

impl Commercial {
    pub fn full_name(&self) -> String {
        self.utilisateur.full_name()
    }
}

impl Searchable for Commercial {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.utilisateur.nom.clone(),
            self.utilisateur.prenom.clone(),
            self.utilisateur.email.clone(),
        ]
    }
}

/// A prospection target/actual count over a date range
///
/// The list endpoint joins each quota with its owning commercial; quotas
/// nested inside a [`Commercial`] omit that back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quota {
    pub id: u64,
    pub date_debut: String,
    pub date_fin: String,
    pub nombre_fixe: u32,
    pub nombre_fait: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commercial: Option<Box<Commercial>>,
}

impl Quota {
    /// Whether the actual count has reached the target
    pub fn is_reached(&self) -> bool {
        self.nombre_fait >= self.nombre_fixe
    }

    /// Display status computed from the counts, not from any stored field.
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect::api::types::Quota;
    ///
    /// let quota = Quota {
    ///     id: 1,
    ///     date_debut: "2024-01-01".to_string(),
    ///     date_fin: "2024-03-31".to_string(),
    ///     nombre_fixe: 10,
    ///     nombre_fait: 10,
    ///     statut: None,
    ///     commercial: None,
    /// };
    /// assert_eq!(quota.progress_status(), "Atteint");
    /// ```
    pub fn progress_status(&self) -> &'static str {
        if self.is_reached() {
            "Atteint"
        } else {
            "Non atteint"
        }
    }

    fn commercial_name(&self) -> String {
        self.commercial
            .as_ref()
            .map(|c| c.full_name())
            .unwrap_or_default()
    }
}

impl Searchable for Quota {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.commercial_name(),
            self.date_debut.clone(),
            self.date_fin.clone(),
        ]
    }
}

/// Lifecycle status of a prospection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProspectionStatut {
    #[serde(rename = "En cours")]
    EnCours,
    #[serde(rename = "Terminé")]
    Termine,
    #[serde(rename = "Annulé")]
    Annule,
}

impl ProspectionStatut {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProspectionStatut::EnCours => "En cours",
            ProspectionStatut::Termine => "Terminé",
            ProspectionStatut::Annule => "Annulé",
        }
    }

    /// Parse a user-supplied status, tolerating case and missing accents
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "en cours" | "en-cours" | "encours" => Ok(ProspectionStatut::EnCours),
            "terminé" | "termine" => Ok(ProspectionStatut::Termine),
            "annulé" | "annule" => Ok(ProspectionStatut::Annule),
            other => Err(format!(
                "Unknown status '{}'. Valid values: En cours, Terminé, Annulé",
                other
            )),
        }
    }

    /// Status text with its display color applied
    pub fn colored_label(&self) -> String {
        match self {
            ProspectionStatut::EnCours => self.as_str().yellow().to_string(),
            ProspectionStatut::Termine => self.as_str().green().to_string(),
            ProspectionStatut::Annule => self.as_str().red().to_string(),
        }
    }
}

impl fmt::Display for ProspectionStatut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded sales visit to a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospection {
    pub id: u64,
    pub date_heure: String,
    pub personne_rencontree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_pers_rencont: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonction_pers_rencont: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commercial: Option<Box<Commercial>>,
    pub societe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<ProspectionStatut>,
    #[serde(default)]
    pub suivis: Vec<Suivi>,
}

impl Prospection {
    pub fn commercial_name(&self) -> String {
        self.commercial
            .as_ref()
            .map(|c| c.full_name())
            .unwrap_or_default()
    }
}

impl Searchable for Prospection {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.commercial_name(),
            self.societe.clone(),
            self.contact_pers_rencont.clone().unwrap_or_default(),
        ]
    }
}

/// A follow-up note attached to a prospection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suivi {
    pub id: u64,
    pub date_suivi: String,
    pub commentaire: String,
}

/// A grantable permission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub libelle_perm: String,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /responsableLogin`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub mot_de_passe: String,
}

/// Body of `POST /resetPassword`
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// Body of `POST /changePassword/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub ancien_mot_de_passe: String,
    pub nouveau_mot_de_passe: String,
}

/// Body of `POST /responsable/commercials`
#[derive(Debug, Clone, Serialize)]
pub struct CommercialRequest {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// Partial body of `PUT /responsable/commercials/{id}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommercialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// Body of `POST /responsable/addquota`
#[derive(Debug, Clone, Serialize)]
pub struct AddQuotaRequest {
    pub commercial_id: u64,
    pub date_debut: String,
    pub date_fin: String,
    pub nombre_fixe: u32,
}

/// Partial body of `PUT /responsable/quotas/{id}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuotaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_fixe: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_fait: Option<u32>,
}

/// Body of `POST /responsable/prospections`
#[derive(Debug, Clone, Serialize)]
pub struct ProspectionRequest {
    pub commercial_id: u64,
    pub date_heure: String,
    pub societe: String,
    pub personne_rencontree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_pers_rencont: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonction_pers_rencont: Option<String>,
}

/// Partial body of `PUT /responsable/prospections/{id}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProspectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_heure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub societe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personne_rencontree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_pers_rencont: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonction_pers_rencont: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<ProspectionStatut>,
}

/// Body of `POST /responsable/suivis/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct SuiviRequest {
    pub date_suivi: String,
    pub commentaire: String,
}

/// Body of `POST /responsable/addPermission/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct GrantPermissionsRequest {
    pub permissions: Vec<u64>,
}
