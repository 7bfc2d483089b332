mod transport;
mod wizard;

use clap::{Parser, Subcommand, ValueEnum};
use contact_flow::{Advance, FlowCatalog, FlowEngine, Notice, catalog_schema};
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use transport::{CliSubmitter, DEFAULT_RELAY_URL, DryRunSubmitter, HttpSubmitter};
use wizard::{
    ScreenFormat, Verbosity, WizardCommand, WizardPresenter, control_input, parse_command,
    resolve_reason,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Parfumis contact wizard CLI",
    long_about = "Walks through the Parfumis contact flows in a text shell and provides catalog helpers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

impl From<RenderMode> for ScreenFormat {
    fn from(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Text => ScreenFormat::Text,
            RenderMode::Json => ScreenFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the contact wizard in a text shell.
    Wizard {
        /// Optional catalog JSON replacing the built-in flows.
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,
        /// Base URL of the relay (defaults to PARFUMIS_RELAY_URL or http://localhost:8888).
        #[arg(long, value_name = "URL")]
        relay_url: Option<String>,
        /// Print the submission instead of posting it.
        #[arg(long)]
        dry_run: bool,
        /// Show verbose output (input hints, relay acknowledgements, debug logs).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Render output mode for each screen.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Print a catalog as JSON.
    Catalog {
        /// Catalog JSON to print instead of the built-in flows.
        #[arg(long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,
    },
    /// Print the JSON Schema of the catalog format.
    Schema,
    /// Check that a catalog file can drive the wizard.
    Validate {
        /// Path to the catalog JSON.
        #[arg(long, value_name = "CATALOG")]
        catalog: PathBuf,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard {
            catalog,
            relay_url,
            dry_run,
            verbose,
            format,
        } => {
            init_tracing(verbose);
            run_wizard(catalog, relay_url, dry_run, verbose, format)
        }
        Command::Catalog { catalog } => run_catalog(catalog),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&catalog_schema())?);
            Ok(())
        }
        Command::Validate { catalog } => run_validate(&catalog),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_catalog(path: Option<&Path>) -> CliResult<FlowCatalog> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(FlowCatalog::from_json_str(&contents)?)
        }
        None => Ok(FlowCatalog::builtin()),
    }
}

fn run_catalog(path: Option<PathBuf>) -> CliResult<()> {
    let catalog = load_catalog(path.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn run_validate(path: &Path) -> CliResult<()> {
    match load_catalog(Some(path)) {
        Ok(catalog) => {
            println!("Catalog result: valid");
            for code in catalog.reasons() {
                let steps = catalog.flow(code).map(|flow| flow.steps.len()).unwrap_or(0);
                println!("  {} ({} steps)", code, steps);
            }
            Ok(())
        }
        Err(err) => {
            println!("Catalog result: invalid");
            println!("  {}", err);
            Err("catalog validation failed".into())
        }
    }
}

fn resolve_relay_url(flag: Option<String>) -> String {
    flag.or_else(|| env::var("PARFUMIS_RELAY_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string())
}

fn run_wizard(
    catalog_path: Option<PathBuf>,
    relay_url: Option<String>,
    dry_run: bool,
    verbose: bool,
    format: RenderMode,
) -> CliResult<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let submitter = if dry_run {
        CliSubmitter::DryRun(DryRunSubmitter)
    } else {
        CliSubmitter::Http(HttpSubmitter::new(resolve_relay_url(relay_url)))
    };
    let presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), format.into());
    let mut engine = FlowEngine::new(catalog, submitter);

    let mut screen = engine.start();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        presenter.show_screen(&screen);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            println!();
            break;
        };
        let command = parse_command(&line);
        if command == Some(WizardCommand::Exit) {
            return Err("wizard aborted by user".into());
        }

        if engine.session().current_index().is_none() {
            match resolve_reason(engine.catalog(), &line) {
                Some(code) => {
                    engine.choose_reason(&code)?;
                }
                None => presenter.show_unknown_reason(),
            }
        } else if command == Some(WizardCommand::Back) {
            engine.retreat()?;
        } else {
            let prefilled = engine.control_value();
            let value = engine
                .current_step()
                .and_then(|step| control_input(step, &line, prefilled));
            match engine.press_enter(value.as_deref()) {
                Ok(Some(Advance::Submitted(ack))) => {
                    presenter.show_notice(&Notice::ThankYou);
                    presenter.show_acknowledgement(&ack.message);
                }
                Ok(_) => {}
                Err(err) => match err.notice() {
                    Some(notice) => {
                        presenter.show_notice(&notice);
                        presenter.show_error_detail(&err.to_string());
                    }
                    None => return Err(err.into()),
                },
            }
        }

        screen = engine.render();
    }

    Ok(())
}
