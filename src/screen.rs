//! Dashboard tab types and utilities
//!
//! This module defines the tabs available inside the interactive dashboard:
//! commerciaux, quotas, prospections, permissions and the profile view.
//! Tab state lives in memory only; it is never persisted between sessions.

use colored::Colorize;
use std::fmt;

/// A tab of the interactive dashboard
///
/// Determines which entity list (or the profile view) is active and which
/// fixed field set the local filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Sales representatives list
    Commercials,

    /// Quota list with computed status
    Quotas,

    /// Prospection visits list
    Prospections,

    /// Permission management
    Permissions,

    /// Profile of the logged-in responsable
    Profile,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commercials => write!(f, "COMMERCIAUX"),
            Self::Quotas => write!(f, "QUOTAS"),
            Self::Prospections => write!(f, "PROSPECTIONS"),
            Self::Permissions => write!(f, "PERMISSIONS"),
            Self::Profile => write!(f, "PROFIL"),
        }
    }
}

impl Tab {
    /// Parse a tab from a string
    ///
    /// Accepts the config spelling and the French display spelling.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the tab
    ///
    /// # Returns
    ///
    /// Returns the parsed Tab or an error if the string is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect::screen::Tab;
    ///
    /// let tab = Tab::parse_str("commercials").unwrap();
    /// assert_eq!(tab, Tab::Commercials);
    ///
    /// let tab = Tab::parse_str("commerciaux").unwrap();
    /// assert_eq!(tab, Tab::Commercials);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "commercials" | "commerciaux" => Ok(Self::Commercials),
            "quotas" => Ok(Self::Quotas),
            "prospections" => Ok(Self::Prospections),
            "permissions" => Ok(Self::Permissions),
            "profile" | "profil" => Ok(Self::Profile),
            other => Err(format!("Unknown tab: {}", other)),
        }
    }

    /// Get a user-friendly description of this tab
    pub fn description(&self) -> &'static str {
        match self {
            Self::Commercials => "Liste des commerciaux",
            Self::Quotas => "Liste des quotas",
            Self::Prospections => "Liste des prospections",
            Self::Permissions => "Gestion des permissions",
            Self::Profile => "Profil du responsable",
        }
    }

    /// Get a colored tag representation of this tab
    ///
    /// # Returns
    ///
    /// A colored string suitable for display in terminal output
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Commercials => format!("[{}]", "COMMERCIAUX".cyan()),
            Self::Quotas => format!("[{}]", "QUOTAS".green()),
            Self::Prospections => format!("[{}]", "PROSPECTIONS".yellow()),
            Self::Permissions => format!("[{}]", "PERMISSIONS".purple()),
            Self::Profile => format!("[{}]", "PROFIL".blue()),
        }
    }

    /// All tabs in display order
    pub fn all() -> [Tab; 5] {
        [
            Self::Commercials,
            Self::Quotas,
            Self::Prospections,
            Self::Permissions,
            Self::Profile,
        ]
    }
}

/// Current dashboard state
///
/// Tracks the active tab and the filter text applied to it. The filter is
/// per tab and resets on every tab switch, matching the behavior of a list
/// view whose search box is discarded when the view unmounts.
#[derive(Debug, Clone)]
pub struct DashState {
    /// The active tab
    pub tab: Tab,
    /// Filter applied to the active tab's list
    pub filter: Option<String>,
}

impl DashState {
    /// Create a new dashboard state on the given tab with no filter
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect::screen::{DashState, Tab};
    ///
    /// let state = DashState::new(Tab::Commercials);
    /// assert_eq!(state.tab, Tab::Commercials);
    /// assert!(state.filter.is_none());
    /// ```
    pub fn new(tab: Tab) -> Self {
        Self { tab, filter: None }
    }

    /// Switch to a new tab, clearing the filter
    ///
    /// # Returns
    ///
    /// The old tab that was replaced
    pub fn switch_tab(&mut self, new_tab: Tab) -> Tab {
        let old_tab = self.tab;
        self.tab = new_tab;
        self.filter = None;
        old_tab
    }

    /// Set or clear the filter on the active tab
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
    }

    /// Format a prompt string with the active tab and filter
    ///
    /// # Returns
    ///
    /// A formatted prompt string like "[COMMERCIAUX] >> " or
    /// "[COMMERCIAUX][filtre: dubois] >> "
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect::screen::{DashState, Tab};
    ///
    /// let mut state = DashState::new(Tab::Quotas);
    /// assert_eq!(state.format_prompt(), "[QUOTAS] >> ");
    ///
    /// state.set_filter(Some("2024".to_string()));
    /// assert_eq!(state.format_prompt(), "[QUOTAS][filtre: 2024] >> ");
    /// ```
    pub fn format_prompt(&self) -> String {
        match &self.filter {
            Some(filter) => format!("[{}][filtre: {}] >> ", self.tab, filter),
            None => format!("[{}] >> ", self.tab),
        }
    }

    /// Format a prompt string with colored tab indicator
    pub fn format_colored_prompt(&self) -> String {
        match &self.filter {
            Some(filter) => format!(
                "{}[{}] >> ",
                self.tab.colored_tag(),
                format!("filtre: {}", filter).yellow()
            ),
            None => format!("{} >> ", self.tab.colored_tag()),
        }
    }

    /// Get the current status as a formatted string
    pub fn status(&self) -> String {
        format!(
            "Onglet: {} ({})\nFiltre: {}",
            self.tab,
            self.tab.description(),
            self.filter.as_deref().unwrap_or("(aucun)")
        )
    }
}
