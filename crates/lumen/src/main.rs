mod cli;
mod commands;
mod error;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lumen_api::{BridgeClient, TransportConfig};

use crate::cli::{Cli, RunCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let command = cli.run_command();

    // No action and no forced setup: show help, exit 0.
    if command.is_none() && !cli.setup {
        use clap::CommandFactory;
        Cli::command().print_long_help()?;
        return Ok(());
    }

    let transport = TransportConfig::with_timeout(Duration::from_secs(cli.timeout));
    let http = transport
        .build_client()
        .map_err(|e| CliError::BridgeUnreachable {
            reason: e.to_string(),
        })?;

    // Bootstrap: config (wizard on first run), then pairing if needed.
    let config = commands::setup::configure(cli.setup, &http).await?;
    let config = commands::setup::ensure_credential(config, &http).await?;

    let Some(command) = command else {
        // --setup alone: configuration and pairing are the whole run.
        eprintln!("Setup complete.");
        return Ok(());
    };

    let base = commands::setup::bridge_base_url(&config.ip)?;
    let username = config.api_key.clone().unwrap_or_default();
    let bridge = BridgeClient::with_client(http, base, username);

    // One fresh topology snapshot per invocation, never cached.
    let rooms = lumen_core::fetch(&bridge).await?;

    tracing::debug!(?command, "dispatching command");
    match command {
        RunCommand::Rooms => {
            commands::rooms::list_rooms(&rooms);
            Ok(())
        }
        RunCommand::Lights { room } => commands::rooms::list_lights(&room, &rooms),
        RunCommand::TurnOn { name, color } => {
            commands::control::turn_on(&bridge, &rooms, &name, color).await
        }
        RunCommand::TurnOff { name } => commands::control::turn_off(&bridge, &rooms, &name).await,
    }
}
