#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the AQI heatmap toolchain.

use std::path::PathBuf;

use aqi_map_cli::{DEFAULT_REGIONAL_SEED, RegionalOptions, WorldOptions, run_regional, run_world};
use aqi_map_fetch::{API_KEY_ENV, AirQualityClient};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aqi_map", about = "AQI heatmap generation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a regional AQI heatmap over the Dallas-Fort Worth area
    Regional {
        /// Grid resolution (the grid is NxN)
        #[arg(long, default_value = "50")]
        grid_size: usize,
        /// Path to a KNN model artifact; the fallback formula is used
        /// when absent or unloadable
        #[arg(long)]
        model: Option<PathBuf>,
        /// Output PNG path
        #[arg(long, default_value = "aqi_heatmap.png")]
        output: PathBuf,
        /// Optional path for a JSON statistics file
        #[arg(long)]
        stats: Option<PathBuf>,
        /// PRNG seed, fixed by default for reproducible output
        #[arg(long, default_value_t = DEFAULT_REGIONAL_SEED)]
        seed: u64,
        /// Rendered pixels per grid cell
        #[arg(long, default_value = "12")]
        cell_px: u32,
    },
    /// Generate a world-scale AQI heatmap
    World {
        /// Longitude resolution (latitude gets half as many samples)
        #[arg(long, default_value = "180")]
        grid_size: usize,
        /// Path to a KNN model artifact; the fallback formula is used
        /// when absent or unloadable
        #[arg(long)]
        model: Option<PathBuf>,
        /// Output PNG path
        #[arg(long, default_value = "world_aqi_heatmap.png")]
        output: PathBuf,
        /// Optional path for a JSON statistics file
        #[arg(long)]
        stats: Option<PathBuf>,
        /// Optional PRNG seed; unseeded by default
        #[arg(long)]
        seed: Option<u64>,
        /// Rendered pixels per grid cell
        #[arg(long, default_value = "6")]
        cell_px: u32,
    },
    /// Fetch current air-quality data for a coordinate and store the raw
    /// JSON to a timestamped file
    Fetch {
        /// Latitude in degrees
        #[arg(long, default_value = "32.7767")]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, default_value = "-96.7970")]
        lon: f64,
        /// Directory for the timestamped JSON file
        #[arg(long, default_value = "data/raw")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Regional {
            grid_size,
            model,
            output,
            stats,
            seed,
            cell_px,
        } => {
            run_regional(&RegionalOptions {
                grid_size,
                model_path: model,
                output,
                stats_output: stats,
                seed,
                cell_px,
            })?;
        }
        Commands::World {
            grid_size,
            model,
            output,
            stats,
            seed,
            cell_px,
        } => {
            run_world(&WorldOptions {
                grid_size,
                model_path: model,
                output,
                stats_output: stats,
                seed,
                cell_px,
            })?;
        }
        Commands::Fetch {
            lat,
            lon,
            output_dir,
        } => {
            let api_key = std::env::var(API_KEY_ENV)
                .map_err(|_| format!("{API_KEY_ENV} environment variable is not set"))?;
            let client = AirQualityClient::new(api_key);
            let path = client.fetch_and_store(lat, lon, &output_dir).await?;
            log::info!("Raw air-quality data stored at {}", path.display());
        }
    }

    Ok(())
}
