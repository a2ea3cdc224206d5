//! Prospect - administrative dashboard CLI
//!
//! Main entry point: loads configuration, gates the requested command on
//! the stored session, and dispatches to the command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prospect::cli::{Cli, Commands};
use prospect::commands;
use prospect::config::Config;
use prospect::router;
use prospect::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration
    let config_path = cli.config.as_deref().unwrap_or("config/prospect.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    // Load the stored session once; the guard rejects protected commands
    // when none is present
    let store = SessionStore::from_config(&config.session)?;
    let session = store.load_active()?;
    router::guard_command(&cli.command, session.as_ref())?;

    // Execute command
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&config, &store, &email, &password).await?;
            Ok(())
        }
        Commands::Logout => commands::auth::logout(&store),
        Commands::Status => commands::auth::status(&config, &store),
        Commands::ForgotPassword { email } => {
            commands::auth::forgot_password(&config, &email).await
        }
        Commands::ChangePassword {
            current,
            new,
            confirm,
        } => {
            let session = router::require_session(session)?;
            commands::auth::change_password(&config, &store, &session, &current, &new, &confirm)
                .await
        }
        Commands::Profile { json } => {
            let session = router::require_session(session)?;
            commands::auth::profile(&session, json)
        }
        Commands::Dash => {
            tracing::info!("Starting interactive dashboard");
            commands::dash::run(config).await
        }
        Commands::Commercials { command } => {
            let session = router::require_session(session)?;
            commands::commercials::run(command, &config, &session).await
        }
        Commands::Quotas { command } => {
            let session = router::require_session(session)?;
            commands::quotas::run(command, &config, &session).await
        }
        Commands::Prospections { command } => {
            let session = router::require_session(session)?;
            commands::prospections::run(command, &config, &session).await
        }
        Commands::Permissions { command } => {
            let session = router::require_session(session)?;
            commands::permissions::run(command, &config, &session).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `--verbose` raises the default level to debug; `RUST_LOG` still wins
/// when set.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "prospect=debug"
    } else {
        "prospect=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
