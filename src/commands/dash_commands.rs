//! Dashboard command parser for the interactive dashboard
//!
//! This module parses the commands that can be entered at the dashboard
//! prompt. Dashboard commands allow users to:
//! - Switch between the entity tabs (commerciaux, quotas, prospections,
//!   permissions, profil)
//! - Set or clear the filter applied to the active list
//! - Refresh the active list from the backend
//! - View the dashboard status, display help, log out, or exit
//!
//! Commands are prefixed with `/` and are case-insensitive. Any input that
//! does not start with `/` is treated as filter text for the active tab,
//! the way typing in a list view's search box narrows it.

use crate::screen::Tab;
use thiserror::Error;

/// Errors that can occur when parsing dashboard commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Commande inconnue: {0}\n\nTapez '/help' pour voir les commandes disponibles")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Argument non supporté pour {command}: {arg}\n\nTapez '/help' pour voir l'usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("La commande {command} requiert un argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Commands that can be executed at the dashboard prompt
///
/// These commands change which tab is active, narrow the active list, or
/// control the session, rather than being sent to the backend directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashCommand {
    /// Switch to a different tab
    ///
    /// Switching tabs clears the active filter, matching a list view whose
    /// search box is discarded when the view unmounts.
    SwitchTab(Tab),

    /// Filter the active tab's list
    ///
    /// The filter is a case-insensitive substring match over the fixed
    /// field set of the active tab.
    Filter(String),

    /// Clear the filter on the active tab
    ClearFilter,

    /// Re-fetch the active tab's list from the backend
    Refresh,

    /// Display the active tab and filter
    ShowStatus,

    /// Display help information
    ///
    /// Shows all available dashboard commands and their usage.
    Help,

    /// Log out and return to the login screen
    ///
    /// Clears the stored session before leaving the dashboard.
    Logout,

    /// Exit the dashboard
    ///
    /// Gracefully closes the interactive session.
    Exit,
}

/// Parse a user input string into a dashboard command
///
/// Commands are case-insensitive and may have multiple aliases. Input that
/// does not start with `/` (and is not `exit`/`quit`) is filter text.
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(DashCommand) for valid commands and filter text.
/// Returns Err(CommandError) for invalid commands or invalid arguments.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not
/// a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an
/// invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument
/// but none was provided.
///
/// # Command Examples
///
/// Tab switching:
/// - `/onglet quotas` or `/quotas` - Switch to the quotas tab
/// - `/commerciaux`, `/prospections`, `/permissions`, `/profil` - Shorthands
///
/// Filtering:
/// - `dupont` or `/filtre dupont` - Narrow the active list
/// - `/filtre` - Clear the active filter
///
/// Other commands:
/// - `/refresh` - Re-fetch the active list
/// - `/status` - Show the active tab and filter
/// - `/logout` - Log out and return to the login screen
/// - `exit` or `quit` - Exit the dashboard
///
/// # Examples
///
/// ```
/// use prospect::commands::dash_commands::{parse_dash_command, DashCommand};
/// use prospect::screen::Tab;
///
/// let cmd = parse_dash_command("/quotas").unwrap();
/// assert_eq!(cmd, DashCommand::SwitchTab(Tab::Quotas));
///
/// let cmd = parse_dash_command("dupont").unwrap();
/// assert_eq!(cmd, DashCommand::Filter("dupont".to_string()));
///
/// // Invalid command returns error
/// assert!(parse_dash_command("/foo").is_err());
/// ```
pub fn parse_dash_command(input: &str) -> Result<DashCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // Anything that doesn't start with "/" is filter text (except exit/quit)
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        if trimmed.is_empty() {
            return Ok(DashCommand::ClearFilter);
        }
        return Ok(DashCommand::Filter(trimmed.to_string()));
    }

    match lower.as_str() {
        // Tab switching shorthands
        "/commerciaux" | "/commercials" => Ok(DashCommand::SwitchTab(Tab::Commercials)),
        "/quotas" => Ok(DashCommand::SwitchTab(Tab::Quotas)),
        "/prospections" => Ok(DashCommand::SwitchTab(Tab::Prospections)),
        "/permissions" => Ok(DashCommand::SwitchTab(Tab::Permissions)),
        "/profil" | "/profile" => Ok(DashCommand::SwitchTab(Tab::Profile)),

        // Handle /onglet with its argument
        "/onglet" => Err(CommandError::MissingArgument {
            command: "/onglet".to_string(),
            usage: "/onglet <commerciaux|quotas|prospections|permissions|profil>".to_string(),
        }),
        input if input.starts_with("/onglet ") => {
            let arg = input[8..].trim();
            Tab::parse_str(arg)
                .map(DashCommand::SwitchTab)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/onglet".to_string(),
                    arg: arg.to_string(),
                })
        }

        // Handle tab shorthands given an argument they don't take
        input if input.starts_with("/commerciaux ") || input.starts_with("/commercials ") => {
            let arg = input[13..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/commerciaux".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/quotas ") => {
            let arg = input[8..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/quotas".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/prospections ") => {
            let arg = input[14..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/prospections".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/permissions ") => {
            let arg = input[13..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/permissions".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/profil ") => {
            let arg = input[8..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/profil".to_string(),
                arg: arg.to_string(),
            })
        }
        input if input.starts_with("/profile ") => {
            let arg = input[9..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/profil".to_string(),
                arg: arg.to_string(),
            })
        }

        // Filtering
        "/filtre" | "/filter" => Ok(DashCommand::ClearFilter),
        input if input.starts_with("/filtre ") || input.starts_with("/filter ") => {
            let text = input[8..].trim();
            if text.is_empty() {
                Ok(DashCommand::ClearFilter)
            } else {
                Ok(DashCommand::Filter(text.to_string()))
            }
        }

        // List refresh
        "/refresh" | "/actualiser" => Ok(DashCommand::Refresh),

        // Status and help
        "/status" => Ok(DashCommand::ShowStatus),
        "/help" | "/?" | "/aide" => Ok(DashCommand::Help),

        // Session control
        "/logout" | "/deconnexion" | "/déconnexion" => Ok(DashCommand::Logout),
        "exit" | "quit" | "/exit" | "/quit" => Ok(DashCommand::Exit),

        // Unknown command starting with "/"
        input => {
            let cmd = input.split_whitespace().next().unwrap_or(input);
            Err(CommandError::UnknownCommand(cmd.to_string()))
        }
    }
}

/// Display help text for dashboard commands
///
/// Shows all available dashboard commands with their descriptions
/// and usage examples.
///
/// # Examples
///
/// ```
/// use prospect::commands::dash_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Commandes du tableau de bord
============================

ONGLETS:
  /commerciaux    - Afficher la liste des commerciaux
  /quotas         - Afficher la liste des quotas
  /prospections   - Afficher la liste des prospections
  /permissions    - Afficher la gestion des permissions
  /profil         - Afficher le profil du responsable
  /onglet <nom>   - Forme longue: /onglet quotas

FILTRE:
  <texte>         - Filtrer la liste active (saisie libre)
  /filtre <texte> - Même effet que la saisie libre
  /filtre         - Effacer le filtre actif

LISTE:
  /refresh        - Recharger la liste active depuis le serveur
  /actualiser     - Même effet que /refresh

SESSION:
  /status         - Afficher l'onglet et le filtre actifs
  /logout         - Se déconnecter et revenir à l'écran de connexion
  /help           - Afficher cette aide
  /?              - Même effet que /help

SORTIE:
  exit            - Quitter le tableau de bord
  quit            - Même effet que exit

NOTES:
  - Les commandes sont insensibles à la casse
  - Le filtre est une recherche par sous-chaîne, insensible à la casse
  - Changer d'onglet efface le filtre actif
  - Les listes sont rechargées depuis le serveur après chaque modification
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_shorthand_commerciaux() {
        let cmd = parse_dash_command("/commerciaux").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Commercials));
    }

    #[test]
    fn test_parse_tab_shorthand_commercials_alias() {
        let cmd = parse_dash_command("/commercials").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Commercials));
    }

    #[test]
    fn test_parse_tab_shorthand_quotas() {
        let cmd = parse_dash_command("/quotas").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Quotas));
    }

    #[test]
    fn test_parse_tab_shorthand_prospections() {
        let cmd = parse_dash_command("/prospections").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Prospections));
    }

    #[test]
    fn test_parse_tab_shorthand_permissions() {
        let cmd = parse_dash_command("/permissions").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Permissions));
    }

    #[test]
    fn test_parse_tab_shorthand_profil() {
        let cmd = parse_dash_command("/profil").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Profile));
    }

    #[test]
    fn test_parse_tab_shorthand_profile_alias() {
        let cmd = parse_dash_command("/profile").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Profile));
    }

    #[test]
    fn test_parse_onglet_with_tab_name() {
        let cmd = parse_dash_command("/onglet quotas").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Quotas));
    }

    #[test]
    fn test_parse_onglet_accepts_french_spelling() {
        let cmd = parse_dash_command("/onglet commerciaux").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Commercials));
    }

    #[test]
    fn test_parse_onglet_no_arg_returns_error() {
        let result = parse_dash_command("/onglet");
        assert!(result.is_err());
        if let Err(CommandError::MissingArgument { command, .. }) = result {
            assert_eq!(command, "/onglet");
        } else {
            panic!("Expected MissingArgument error");
        }
    }

    #[test]
    fn test_parse_onglet_invalid_arg_returns_error() {
        let result = parse_dash_command("/onglet rapports");
        assert!(result.is_err());
        if let Err(CommandError::UnsupportedArgument { command, arg }) = result {
            assert_eq!(command, "/onglet");
            assert_eq!(arg, "rapports");
        } else {
            panic!("Expected UnsupportedArgument error");
        }
    }

    #[test]
    fn test_parse_tab_shorthand_with_arg_returns_error() {
        let result = parse_dash_command("/quotas 2024");
        assert!(result.is_err());
        if let Err(CommandError::UnsupportedArgument { command, arg }) = result {
            assert_eq!(command, "/quotas");
            assert_eq!(arg, "2024");
        } else {
            panic!("Expected UnsupportedArgument error");
        }
    }

    #[test]
    fn test_parse_filtre_with_text() {
        let cmd = parse_dash_command("/filtre dupont").unwrap();
        assert_eq!(cmd, DashCommand::Filter("dupont".to_string()));
    }

    #[test]
    fn test_parse_filter_alias_with_text() {
        let cmd = parse_dash_command("/filter acme").unwrap();
        assert_eq!(cmd, DashCommand::Filter("acme".to_string()));
    }

    #[test]
    fn test_parse_filtre_lowercases_text() {
        let cmd = parse_dash_command("/filtre ACME").unwrap();
        assert_eq!(cmd, DashCommand::Filter("acme".to_string()));
    }

    #[test]
    fn test_parse_filtre_bare_clears_filter() {
        let cmd = parse_dash_command("/filtre").unwrap();
        assert_eq!(cmd, DashCommand::ClearFilter);
    }

    #[test]
    fn test_parse_plain_text_is_filter() {
        let cmd = parse_dash_command("dupont").unwrap();
        assert_eq!(cmd, DashCommand::Filter("dupont".to_string()));
    }

    #[test]
    fn test_parse_plain_text_preserves_case() {
        let cmd = parse_dash_command("Entreprise A").unwrap();
        assert_eq!(cmd, DashCommand::Filter("Entreprise A".to_string()));
    }

    #[test]
    fn test_parse_empty_string_clears_filter() {
        let cmd = parse_dash_command("").unwrap();
        assert_eq!(cmd, DashCommand::ClearFilter);
    }

    #[test]
    fn test_parse_whitespace_only_clears_filter() {
        let cmd = parse_dash_command("   ").unwrap();
        assert_eq!(cmd, DashCommand::ClearFilter);
    }

    #[test]
    fn test_parse_refresh() {
        let cmd = parse_dash_command("/refresh").unwrap();
        assert_eq!(cmd, DashCommand::Refresh);
    }

    #[test]
    fn test_parse_refresh_french_alias() {
        let cmd = parse_dash_command("/actualiser").unwrap();
        assert_eq!(cmd, DashCommand::Refresh);
    }

    #[test]
    fn test_parse_show_status() {
        let cmd = parse_dash_command("/status").unwrap();
        assert_eq!(cmd, DashCommand::ShowStatus);
    }

    #[test]
    fn test_parse_help() {
        let cmd = parse_dash_command("/help").unwrap();
        assert_eq!(cmd, DashCommand::Help);
    }

    #[test]
    fn test_parse_help_shorthand() {
        let cmd = parse_dash_command("/?").unwrap();
        assert_eq!(cmd, DashCommand::Help);
    }

    #[test]
    fn test_parse_help_french_alias() {
        let cmd = parse_dash_command("/aide").unwrap();
        assert_eq!(cmd, DashCommand::Help);
    }

    #[test]
    fn test_parse_logout() {
        let cmd = parse_dash_command("/logout").unwrap();
        assert_eq!(cmd, DashCommand::Logout);
    }

    #[test]
    fn test_parse_logout_french_alias() {
        let cmd = parse_dash_command("/deconnexion").unwrap();
        assert_eq!(cmd, DashCommand::Logout);
    }

    #[test]
    fn test_parse_logout_accented_alias() {
        let cmd = parse_dash_command("/Déconnexion").unwrap();
        assert_eq!(cmd, DashCommand::Logout);
    }

    #[test]
    fn test_parse_exit() {
        let cmd = parse_dash_command("exit").unwrap();
        assert_eq!(cmd, DashCommand::Exit);
    }

    #[test]
    fn test_parse_exit_with_slash() {
        let cmd = parse_dash_command("/exit").unwrap();
        assert_eq!(cmd, DashCommand::Exit);
    }

    #[test]
    fn test_parse_quit() {
        let cmd = parse_dash_command("quit").unwrap();
        assert_eq!(cmd, DashCommand::Exit);
    }

    #[test]
    fn test_parse_quit_with_slash() {
        let cmd = parse_dash_command("/quit").unwrap();
        assert_eq!(cmd, DashCommand::Exit);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            parse_dash_command("/QUOTAS").unwrap(),
            DashCommand::SwitchTab(Tab::Quotas)
        );
        assert_eq!(
            parse_dash_command("/Onglet PROFIL").unwrap(),
            DashCommand::SwitchTab(Tab::Profile)
        );
        assert_eq!(parse_dash_command("EXIT").unwrap(), DashCommand::Exit);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let cmd = parse_dash_command("  /quotas  ").unwrap();
        assert_eq!(cmd, DashCommand::SwitchTab(Tab::Quotas));
    }

    #[test]
    fn test_parse_unknown_command_returns_error() {
        let result = parse_dash_command("/foo");
        assert!(result.is_err());
        if let Err(CommandError::UnknownCommand(cmd)) = result {
            assert_eq!(cmd, "/foo");
        } else {
            panic!("Expected UnknownCommand error");
        }
    }

    #[test]
    fn test_parse_unknown_command_keeps_first_word() {
        let result = parse_dash_command("/foo bar baz");
        assert!(result.is_err());
        if let Err(CommandError::UnknownCommand(cmd)) = result {
            assert_eq!(cmd, "/foo");
        } else {
            panic!("Expected UnknownCommand error");
        }
    }

    #[test]
    fn test_unknown_command_message_mentions_help() {
        let err = parse_dash_command("/foo").unwrap_err();
        assert!(err.to_string().contains("/help"));
    }

    #[test]
    fn test_print_help_does_not_panic() {
        print_help();
    }
}
