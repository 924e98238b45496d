//! Trip map CLI
//!
//! Drives the trip map headlessly: plans a trip, replays a command script,
//! renders the bundled sample or a trip by id, and prints the scene.

#![allow(clippy::print_stdout)]

mod scene;
mod script;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::{CommandOutcome, MapSession, TripOrchestrator, TripTransportPort};
use clap::{Parser, Subcommand};
use domain::{FormField, GeoPoint, MapCommand, parse_point};
use infrastructure::{
    AppConfig, HeadlessSurface, LogFormat, TripServiceAdapter, init_logging, load_sample_trip,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::scene::OutputFormat;

/// Trip map CLI
#[derive(Parser)]
#[command(name = "tripmap-cli")]
#[command(author, version, about = "Plan public transport trips on a headless map", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (text or json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Configuration file (default: ./tripmap.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Trip service base URL, overriding the configuration
    #[arg(long, global = true, env = "TRIPMAP_BASE_URL")]
    base_url: Option<String>,

    /// How to print the resulting map
    #[arg(short, long, global = true, value_enum, default_value_t)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place start and end, submit, and print the stops
    ///
    /// Example: tripmap-cli plan --from 51.1090,17.0410 --to 51.1045,17.0285
    Plan {
        /// Start point as LAT,LON
        #[arg(long, value_parser = parse_lat_lon)]
        from: GeoPoint,

        /// End point as LAT,LON
        #[arg(long, value_parser = parse_lat_lon)]
        to: GeoPoint,

        /// Departure time (RFC 3339 or local "YYYY-MM-DDTHH:MM"); defaults to now
        #[arg(short, long)]
        departure: Option<String>,
    },

    /// Replay a command script, one command per line
    ///
    /// Reads standard input when no file is given.
    Replay {
        /// Script file
        script: Option<PathBuf>,
    },

    /// Render the bundled sample trip without contacting the service
    Sample,

    /// Render every stop of one trip
    Trip {
        /// Trip identifier as returned by the service
        trip_id: String,
    },

    /// Check whether the trip service answers
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Parse `LAT,LON` into a point
fn parse_lat_lon(text: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{text}'"))?;
    parse_point(lat, lon).map_err(|e| e.to_string())
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };

    if let Some(base_url) = &cli.base_url {
        config.trip_service.base_url.clone_from(base_url);
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if cli.verbose > 0 {
        config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    }

    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

struct App {
    orchestrator: TripOrchestrator<HeadlessSurface>,
    adapter: Arc<TripServiceAdapter>,
}

impl App {
    fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let session_config = config.session_config().map_err(anyhow::Error::msg)?;
        let adapter = Arc::new(TripServiceAdapter::from_config(&config.trip_service)?);
        let transport: Arc<dyn TripTransportPort> = adapter.clone();

        let session = MapSession::new(HeadlessSurface::new(), session_config);
        let orchestrator = TripOrchestrator::new(Arc::new(Mutex::new(session)), transport)
            .with_sample(load_sample_trip()?);

        Ok(Self {
            orchestrator,
            adapter,
        })
    }

    /// Dispatch one command; user-visible failures stay in the session notice
    async fn run(&self, command: MapCommand) -> Option<CommandOutcome> {
        debug!(%command, "Dispatching");
        match self.orchestrator.dispatch(command).await {
            Ok(outcome) => {
                debug!(?outcome, "Command handled");
                Some(outcome)
            },
            Err(e) => {
                warn!(error = %e, "Command failed");
                None
            },
        }
    }

    fn print(&self, format: OutputFormat) -> anyhow::Result<()> {
        let session = self.orchestrator.session();
        let rendered = scene::render(&session.lock(), format)?;
        println!("{}", rendered.trim_end());
        Ok(())
    }

    /// Fail the process when the session ended with a notice
    fn finish(&self) -> anyhow::Result<()> {
        let session = self.orchestrator.session();
        let notice = session.lock().notice().cloned();
        match notice {
            Some(notice) => anyhow::bail!(notice.message),
            None => Ok(()),
        }
    }
}

async fn read_script(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            use tokio::io::AsyncReadExt;
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read standard input")?;
            Ok(text)
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let app = App::new(&config)?;

    match cli.command {
        Commands::Plan {
            from,
            to,
            departure,
        } => {
            app.run(MapCommand::Click { point: from }).await;
            app.run(MapCommand::Click { point: to }).await;
            if let Some(value) = departure {
                if app
                    .run(MapCommand::FieldEdit {
                        field: FormField::Departure,
                        value: value.clone(),
                    })
                    .await
                    != Some(CommandOutcome::Applied)
                {
                    anyhow::bail!("invalid departure time: {value}");
                }
            }
            if let Some(CommandOutcome::Rendered { stops }) = app.run(MapCommand::Submit).await {
                info!(stops, "Trip planned");
            }
            app.print(cli.output)?;
        },

        Commands::Replay { script } => {
            let text = read_script(script.as_deref()).await?;
            let commands = script::parse_script(&text)?;
            info!(commands = commands.len(), "Replaying script");
            for command in commands {
                app.run(command).await;
            }
            app.print(cli.output)?;
        },

        Commands::Sample => {
            app.run(MapCommand::ShowSample).await;
            app.print(cli.output)?;
        },

        Commands::Trip { trip_id } => {
            let stops = app.adapter.trip_stops(&trip_id).await?;
            let session = app.orchestrator.session();
            let rendered = session.lock().apply_stops(stops);
            info!(%trip_id, stops = rendered, "Trip rendered");
            app.print(cli.output)?;
        },

        Commands::Health => {
            if app.orchestrator.is_available().await {
                println!("Trip service at {} is reachable", config.trip_service.base_url);
            } else {
                anyhow::bail!(
                    "trip service at {} is unreachable",
                    config.trip_service.base_url
                );
            }
        },
    }

    app.finish()
}
