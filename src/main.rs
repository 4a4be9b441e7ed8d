//! EarthWheel CLI - spin the globe and serve travel weather.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;

use earthwheel::globe::spawn_render_loop;
use earthwheel::{
    DestinationResolver, FjallWeatherStore, NominatimGeocoder, OfflineGeocoder, Region,
    ReverseGeocoder, Scene, ShareTarget, SpinController, WeatherRecord, WeatherStore,
    WheelConfig, WheelError, logging, share_action, weather,
};

/// Earth wheel destination picker and weather proxy.
#[derive(Parser)]
#[command(name = "earthwheel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user config directory).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the weather proxy.
    Serve {
        /// Port to listen on, overriding the configuration.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load weather records from a JSON array into the store.
    Seed {
        /// JSON file holding an array of weather records.
        file: PathBuf,
    },

    /// Print the latest stored weather for a city.
    Weather {
        /// City name, matched exactly.
        city: String,
    },

    /// Spin the wheel once and print where it landed.
    Spin {
        /// Region to sample the destination from.
        #[arg(short, long, default_value = "global")]
        region: Region,

        /// Skip reverse geocoding and land on a fallback destination.
        #[arg(long)]
        offline: bool,

        /// Viewport width in pixels used to size the globe.
        #[arg(long, default_value = "1280")]
        width: f64,
    },

    /// Print how to share a destination on a platform.
    Share {
        /// facebook, twitter or instagram.
        #[arg(short, long)]
        target: ShareTarget,

        /// Destination address, e.g. "Kyoto, Japan".
        #[arg(short, long)]
        address: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Print the full error chain, followed by a hint when the cause is one of ours
fn report(error: &anyhow::Error) {
    eprintln!("Error: {error:#}");
    if let Some(cause) = error.downcast_ref::<WheelError>() {
        eprintln!("{}", cause.user_message());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = WheelConfig::load_from_path(cli.config)?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Seed { file } => seed(&config, &file).await,
        Commands::Weather { city } => show_weather(&config, &city).await,
        Commands::Spin {
            region,
            offline,
            width,
        } => spin(&config, region, offline, width).await,
        Commands::Share { target, address } => {
            println!("{}", share_action(target, &address, &config.share.base_url));
            Ok(())
        }
    }
}

fn open_store(config: &WheelConfig) -> Result<Arc<dyn WeatherStore>> {
    let store = FjallWeatherStore::open(&config.store.path)
        .with_context(|| format!("Failed to open weather store at {}", config.store.path))?;
    Ok(Arc::new(store))
}

async fn serve(mut config: WheelConfig, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    let store = open_store(&config)?;
    weather::run(&config.server, store).await
}

async fn seed(config: &WheelConfig, file: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<WeatherRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an array of weather records", file.display()))?;

    let store = open_store(config)?;
    let count = records.len();
    for record in records {
        store.put(record).await?;
    }

    info!("Seeded {} weather records", count);
    println!("Seeded {count} weather records");
    Ok(())
}

async fn show_weather(config: &WheelConfig, city: &str) -> Result<()> {
    let store = open_store(config)?;
    let record = store
        .latest(city)
        .await?
        .ok_or_else(|| anyhow!("No weather data for {city}"))?;
    println!("{}", record.summary());
    Ok(())
}

async fn spin(config: &WheelConfig, region: Region, offline: bool, width: f64) -> Result<()> {
    let geocoder: Arc<dyn ReverseGeocoder> = if offline {
        Arc::new(OfflineGeocoder)
    } else {
        Arc::new(NominatimGeocoder::new(&config.geocoding)?)
    };

    let scene = Scene::from_config(config, width)?.into_handle();
    let render = spawn_render_loop(Arc::clone(&scene), config.spin.frame_interval());
    let resolver = DestinationResolver::new(geocoder, config.geocoding.timeout());
    let controller = SpinController::new(scene, resolver, config.spin.clone());

    let outcome = controller.spin(region).await;
    render.abort();

    let outcome = outcome.context("A spin was already running")?;
    println!("Landed on {}", outcome.location.address);
    println!("Coordinates: {}", outcome.destination.coordinate.format_coordinates());
    if outcome.destination.from_fallback {
        println!("(fallback destination)");
    }
    println!(
        "Share: {}",
        earthwheel::share::share_url(&config.share.base_url, &outcome.location.address)
    );
    Ok(())
}
