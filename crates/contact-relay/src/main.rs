use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use contact_relay::{Relay, SmtpMailer, config::Config, observability, router};

/// contact-relay - forwards Parfumis contact submissions by mail
#[derive(Parser)]
#[command(name = "contact-relay")]
#[command(about = "Mail relay for the Parfumis contact wizard", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load and validate the configuration, then exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;

    observability::init_tracing(
        "contact-relay",
        &config.observability.log_level,
        config.observability.json,
    )?;

    let warnings = config.validate().map_err(|e| anyhow::anyhow!(e))?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::CheckConfig => {
            tracing::info!(
                host = %config.server.host,
                port = config.server.port,
                smtp_host = %config.mail.smtp_host,
                from = %config.mail.from_address,
                "configuration is valid"
            );
            Ok(())
        }
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let mailer = SmtpMailer::new(&config.mail)?;
    let relay = Relay::new(Arc::new(mailer), config.mail.from_address);
    let app = router(Arc::new(relay));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!(address = %listener.local_addr()?, "contact relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("contact relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
