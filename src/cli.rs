//! Command-line interface definition for Prospect
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, CRUD on the managed entities,
//! and the interactive dashboard.

use clap::{Parser, Subcommand};

/// Prospect - administrative dashboard CLI
///
/// Manage commerciaux, quotas, prospections and permissions against the
/// Prospect backend API.
#[derive(Parser, Debug, Clone)]
#[command(name = "prospect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/prospect.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the backend API base URL from config
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Prospect
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in as responsable and store the session
    Login {
        /// Responsable email address
        #[arg(short, long)]
        email: String,

        /// Password (validated locally before submission)
        #[arg(short, long)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show whether a session is stored and for whom
    Status,

    /// Request a password-reset email
    ForgotPassword {
        /// Email address to send the reset link to
        #[arg(short, long)]
        email: String,
    },

    /// Change the logged-in responsable's password
    ChangePassword {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,

        /// Confirmation of the new password
        #[arg(long)]
        confirm: String,
    },

    /// Show the logged-in responsable's profile
    Profile {
        /// Print raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive dashboard
    Dash,

    /// Manage commerciaux
    Commercials {
        /// Commercial subcommand
        #[command(subcommand)]
        command: CommercialCommand,
    },

    /// Manage quotas
    Quotas {
        /// Quota subcommand
        #[command(subcommand)]
        command: QuotaCommand,
    },

    /// Manage prospections and their suivis
    Prospections {
        /// Prospection subcommand
        #[command(subcommand)]
        command: ProspectionCommand,
    },

    /// Manage permissions
    Permissions {
        /// Permission subcommand
        #[command(subcommand)]
        command: PermissionCommand,
    },
}

/// Commercial management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum CommercialCommand {
    /// List commerciaux
    List {
        /// Case-insensitive filter over nom, prenom and email
        #[arg(short, long)]
        filter: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one commercial with its quotas
    Show {
        /// Commercial id
        id: u64,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a commercial
    Add {
        /// Family name
        #[arg(long)]
        nom: String,

        /// Given name
        #[arg(long)]
        prenom: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number
        #[arg(long)]
        telephone: Option<String>,
    },

    /// Update a commercial
    Update {
        /// Commercial id
        id: u64,

        /// Family name
        #[arg(long)]
        nom: Option<String>,

        /// Given name
        #[arg(long)]
        prenom: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        telephone: Option<String>,
    },

    /// Delete a commercial
    Delete {
        /// Commercial id
        id: u64,
    },
}

/// Quota management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum QuotaCommand {
    /// List quotas
    List {
        /// Case-insensitive filter over commercial name and date range
        #[arg(short, long)]
        filter: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Assign a quota to a commercial
    Add {
        /// Commercial id the quota belongs to
        #[arg(long)]
        commercial_id: u64,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        date_debut: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        date_fin: String,

        /// Target number of prospections
        #[arg(long)]
        nombre_fixe: u32,
    },

    /// Update a quota
    Update {
        /// Quota id
        id: u64,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        date_debut: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        date_fin: Option<String>,

        /// Target number of prospections
        #[arg(long)]
        nombre_fixe: Option<u32>,

        /// Achieved number of prospections
        #[arg(long)]
        nombre_fait: Option<u32>,
    },

    /// Delete a quota
    Delete {
        /// Quota id
        id: u64,
    },
}

/// Prospection management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProspectionCommand {
    /// List prospections
    List {
        /// Case-insensitive filter over commercial name, société and contact
        #[arg(short, long)]
        filter: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one prospection with its suivis
    Show {
        /// Prospection id
        id: u64,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Record a prospection visit
    Add {
        /// Commercial id who made the visit
        #[arg(long)]
        commercial_id: u64,

        /// Visit date and time
        #[arg(long)]
        date_heure: String,

        /// Company visited
        #[arg(long)]
        societe: String,

        /// Person met during the visit
        #[arg(long)]
        personne_rencontree: String,

        /// Contact details of the person met
        #[arg(long)]
        contact: Option<String>,

        /// Role of the person met
        #[arg(long)]
        fonction: Option<String>,
    },

    /// Update a prospection
    Update {
        /// Prospection id
        id: u64,

        /// Visit date and time
        #[arg(long)]
        date_heure: Option<String>,

        /// Company visited
        #[arg(long)]
        societe: Option<String>,

        /// Person met during the visit
        #[arg(long)]
        personne_rencontree: Option<String>,

        /// Contact details of the person met
        #[arg(long)]
        contact: Option<String>,

        /// Role of the person met
        #[arg(long)]
        fonction: Option<String>,

        /// Status: "En cours", "Terminé" or "Annulé"
        #[arg(long)]
        statut: Option<String>,
    },

    /// Delete a prospection
    Delete {
        /// Prospection id
        id: u64,
    },

    /// Attach a suivi (follow-up note) to a prospection
    Suivi {
        /// Prospection id
        id: u64,

        /// Follow-up note text
        #[arg(long)]
        commentaire: String,

        /// Follow-up date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Permission management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PermissionCommand {
    /// List available permissions
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Grant permissions to a commercial
    Grant {
        /// Commercial id receiving the permissions
        commercial_id: u64,

        /// Permission id (repeatable)
        #[arg(short = 'p', long = "permission")]
        permissions: Vec<u64>,
    },
}

impl Commands {
    /// Whether the dispatch-layer guard requires a stored session
    ///
    /// Commands on the login side of the gate (login, logout, status,
    /// forgot-password) run without one; the interactive dashboard routes
    /// its own screens through the guard and is admitted here.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Commands::Login { .. }
                | Commands::Logout
                | Commands::Status
                | Commands::ForgotPassword { .. }
                | Commands::Dash
        )
    }
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/prospect.yaml".to_string()),
            verbose: false,
            api_base_url: None,
            command: Commands::Status,
        }
    }
}
