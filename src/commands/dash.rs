//! Interactive dashboard handler
//!
//! Runs a readline-based loop over the application's screens. Every pass
//! routes the requested screen through the auth gate, so the dashboard is
//! reachable only with a live session and a logout lands back on the login
//! screen. Inside the dashboard, input is parsed as a dashboard command and
//! the active tab's list is re-fetched from the backend whenever the tab,
//! the filter, or the backend data changes.
//!
//! Fetch failures inside the dashboard are shown as notifications and the
//! loop keeps running; they never terminate the session.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::ApiClient;
use crate::commands::dash_commands::{parse_dash_command, print_help, DashCommand};
use crate::commands::{
    auth, commercials, permissions, print_error, print_success, prospections, quotas,
};
use crate::config::Config;
use crate::error::{ProspectError, Result};
use crate::router::{self, Screen};
use crate::screen::{DashState, Tab};
use crate::session::{Session, SessionStore};

/// How the login screen ended
enum LoginOutcome {
    /// Credentials accepted; carries the stored session
    LoggedIn(Session),
    /// User asked for the password-reset screen
    Forgot,
    /// User left the application
    Exit,
}

/// How the dashboard screen ended
enum DashOutcome {
    /// User left the application
    Exit,
    /// User logged out; the stored session is already cleared
    Logout,
}

/// Start the interactive dashboard
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
///
/// # Examples
///
/// ```
/// use prospect::commands::dash;
/// use prospect::config::Config;
///
/// // In application code:
/// // dash::run(Config::default()).await?;
/// ```
pub async fn run(config: Config) -> Result<()> {
    tracing::info!("Starting interactive dashboard");

    let store = SessionStore::from_config(&config.session)?;
    let mut session = store.load_active()?;

    let default_tab = Tab::parse_str(&config.dash.default_tab).map_err(ProspectError::Config)?;

    let mut rl = DefaultEditor::new()?;

    if config.dash.show_banner {
        print_welcome_banner();
    }

    let mut screen = Screen::Splash;
    loop {
        screen = router::resolve(screen, session.as_ref());
        match screen {
            Screen::Splash => {
                screen = router::resolve_start(session.as_ref(), default_tab);
            }
            Screen::Login => match login_screen(&mut rl, &config, &store).await? {
                LoginOutcome::LoggedIn(new_session) => {
                    session = Some(new_session);
                    screen = Screen::Dashboard(default_tab);
                }
                LoginOutcome::Forgot => {
                    screen = Screen::ForgotPassword;
                }
                LoginOutcome::Exit => break,
            },
            Screen::ForgotPassword => {
                forgot_screen(&mut rl, &config).await?;
                screen = Screen::Login;
            }
            Screen::Dashboard(tab) => {
                let active = match session.as_ref() {
                    Some(active) => active,
                    None => {
                        screen = Screen::Login;
                        continue;
                    }
                };
                match dashboard_screen(&mut rl, &config, &store, active, tab).await? {
                    DashOutcome::Exit => break,
                    DashOutcome::Logout => {
                        session = None;
                        screen = Screen::Login;
                    }
                }
            }
        }
    }

    println!("Au revoir !");
    Ok(())
}

/// Run the login screen until the user logs in, asks for a reset, or leaves
async fn login_screen(
    rl: &mut DefaultEditor,
    config: &Config,
    store: &SessionStore,
) -> Result<LoginOutcome> {
    println!("\nConnexion responsable");
    println!("Tapez '/forgot' pour réinitialiser votre mot de passe, 'exit' pour quitter.\n");

    loop {
        let email = match rl.readline("Email: ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                return Ok(LoginOutcome::Exit);
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                return Ok(LoginOutcome::Exit);
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                return Ok(LoginOutcome::Exit);
            }
        };

        let lower = email.to_lowercase();
        if lower == "exit" || lower == "quit" {
            return Ok(LoginOutcome::Exit);
        }
        if lower == "/forgot" || lower == "/oublie" {
            return Ok(LoginOutcome::Forgot);
        }
        if email.is_empty() {
            continue;
        }

        let password = match rl.readline("Mot de passe: ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(LoginOutcome::Exit);
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                return Ok(LoginOutcome::Exit);
            }
        };

        match auth::login(config, store, &email, &password).await {
            Ok(session) => return Ok(LoginOutcome::LoggedIn(session)),
            Err(e) => {
                print_error(&e.to_string());
                println!();
            }
        }
    }
}

/// Run the password-reset screen, then return to the login screen
async fn forgot_screen(rl: &mut DefaultEditor, config: &Config) -> Result<()> {
    println!("\nRéinitialisation du mot de passe");
    println!("Entrez votre email, ou laissez vide pour revenir à la connexion.\n");

    loop {
        let email = match rl.readline("Email: ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                return Ok(());
            }
        };

        if email.is_empty() {
            return Ok(());
        }

        match auth::forgot_password(config, &email).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                print_error(&e.to_string());
                println!();
            }
        }
    }
}

/// Run the dashboard loop for a logged-in responsable
async fn dashboard_screen(
    rl: &mut DefaultEditor,
    config: &Config,
    store: &SessionStore,
    session: &Session,
    initial_tab: Tab,
) -> Result<DashOutcome> {
    let mut state = DashState::new(initial_tab);
    refresh_view(config, session, &state).await;

    loop {
        let prompt = state.format_colored_prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                match parse_dash_command(trimmed) {
                    Ok(DashCommand::SwitchTab(tab)) => {
                        let old_tab = state.switch_tab(tab);
                        tracing::debug!("Switched tab from {} to {}", old_tab, tab);
                        refresh_view(config, session, &state).await;
                    }
                    Ok(DashCommand::Filter(text)) => {
                        if matches!(state.tab, Tab::Permissions | Tab::Profile) {
                            println!("L'onglet {} ne prend pas de filtre.", state.tab);
                            continue;
                        }
                        state.set_filter(Some(text));
                        refresh_view(config, session, &state).await;
                    }
                    Ok(DashCommand::ClearFilter) => {
                        state.set_filter(None);
                        refresh_view(config, session, &state).await;
                    }
                    Ok(DashCommand::Refresh) => {
                        refresh_view(config, session, &state).await;
                    }
                    Ok(DashCommand::ShowStatus) => {
                        print_status_display(&state, session, config);
                    }
                    Ok(DashCommand::Help) => {
                        print_help();
                    }
                    Ok(DashCommand::Logout) => {
                        store.clear()?;
                        print_success("Déconnexion réussie.");
                        return Ok(DashOutcome::Logout);
                    }
                    Ok(DashCommand::Exit) => return Ok(DashOutcome::Exit),
                    Err(e) => {
                        print_error(&e.to_string());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                return Ok(DashOutcome::Exit);
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                return Ok(DashOutcome::Exit);
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                return Ok(DashOutcome::Exit);
            }
        }
    }
}

/// Re-fetch and render the active tab, notifying on failure.
///
/// A failed fetch never terminates the dashboard; the error is shown and
/// the prompt comes back.
async fn refresh_view(config: &Config, session: &Session, state: &DashState) {
    if let Err(e) = render_tab(config, session, state.tab, state.filter.as_deref()).await {
        print_error(&e.to_string());
    }
}

/// Fetch and render one tab's content
async fn render_tab(
    config: &Config,
    session: &Session,
    tab: Tab,
    filter: Option<&str>,
) -> Result<()> {
    let client = ApiClient::new(&config.api)?.with_token(&session.token);

    match tab {
        Tab::Commercials => commercials::list(&client, filter, false).await,
        Tab::Quotas => quotas::list(&client, filter, false).await,
        Tab::Prospections => prospections::list(&client, filter, false).await,
        Tab::Permissions => permissions::list(&client, false).await,
        Tab::Profile => auth::profile(session, false),
    }
}

/// Display welcome banner at the start of the interactive dashboard
///
/// Shows a formatted banner with the application name and basic
/// instructions.
fn print_welcome_banner() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║        Prospect - Tableau de bord du responsable             ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Tapez '/help' pour la liste des commandes, 'exit' pour quitter\n");
}

/// Display detailed status information about the current dashboard session
///
/// Shows the active tab, the filter, the logged-in responsable and the
/// backend in use. This is called when the user types the '/status'
/// command.
fn print_status_display(state: &DashState, session: &Session, config: &Config) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Prospect - Etat de la session               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!(
        "Onglet:    {} ({})",
        state.tab.colored_tag(),
        state.tab.description()
    );
    println!("Filtre:    {}", state.filter.as_deref().unwrap_or("(aucun)"));
    println!("Connecté:  {}", session.display_name());
    println!("API:       {}", config.api.base_url);
    println!("Invite:    {}", state.format_colored_prompt());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        let payload = serde_json::json!({
            "token": "tok_abc123",
            "utilisateur": {
                "id": 7,
                "nom": "Dubois",
                "prenom": "Jean",
                "email": "jean.dubois@example.com"
            }
        });
        Session::from_login_payload(payload, 24).unwrap()
    }

    /// Invalid default tab should return an error before any prompt is shown
    #[tokio::test]
    async fn test_run_rejects_invalid_default_tab() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.session.directory = Some(dir.path().to_path_buf());
        config.dash.default_tab = "rapports".to_string();

        let res = run(config).await;
        assert!(res.is_err());
    }

    #[test]
    fn test_print_welcome_banner_does_not_panic() {
        print_welcome_banner();
    }

    #[test]
    fn test_print_status_display_does_not_panic() {
        let mut state = DashState::new(Tab::Quotas);
        state.set_filter(Some("2024".to_string()));
        print_status_display(&state, &sample_session(), &Config::default());
    }

    #[tokio::test]
    async fn test_render_profile_tab_needs_no_network() {
        let session = sample_session();
        let config = Config::default();
        let result = render_tab(&config, &session, Tab::Profile, None).await;
        assert!(result.is_ok());
    }
}
