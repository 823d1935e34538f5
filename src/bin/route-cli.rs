use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use route_planner::config::{load_config, PlannerConfig};
use route_planner::geo::{decode_polyline_with_precision, haversine_distance_km, DEFAULT_PRECISION};
use route_planner::model::{Coordinate, CustomAddress, StartLocation, StationDirectory};
use route_planner::observability::logging;
use route_planner::routing::BatchSummary;
use route_planner::{BatchAggregator, RoutingWorker, Shutdown, WorkerRequest, WorkerResponse};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Plan multi-destination routes from the command line", long_about = None)]
struct Cli {
    /// Planner config (TOML); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route from one start location to the selected stations and addresses
    Plan {
        /// JSON array of stations
        #[arg(long)]
        stations: PathBuf,
        /// JSON array of custom addresses
        #[arg(long)]
        custom: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, default_value = "")]
        address: String,
        /// Station id to route to (repeatable)
        #[arg(long = "station")]
        station_ids: Vec<String>,
        /// Custom address id to route to (repeatable)
        #[arg(long = "custom-id")]
        custom_ids: Vec<String>,
        /// Send the batch to a running server instead of computing it locally
        #[arg(long)]
        server: Option<String>,
    },
    /// Great-circle distance in km
    Distance {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lng1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lng2: f64,
    },
    /// Decode an encoded polyline into coordinates
    Decode {
        polyline: String,
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };

    match cli.command {
        Commands::Plan {
            stations,
            custom,
            lat,
            lng,
            address,
            station_ids,
            custom_ids,
            server,
        } => {
            let directory = StationDirectory::load_from_file(&stations)?;
            let custom_addresses = match custom {
                Some(path) => load_custom_addresses(&path)?,
                None => Vec::new(),
            };
            let request = WorkerRequest {
                start_location: Some(StartLocation::new(Coordinate::new(lat, lng), address)),
                destination_station_ids: station_ids,
                destination_custom_address_ids: custom_ids,
                all_known_stations: directory.all().to_vec(),
                all_known_custom_addresses: custom_addresses,
            };

            let response = match server {
                Some(url) => plan_remote(&url, &request).await?,
                None => plan_local(&config, request).await?,
            };
            print_response(&response)?;
        }
        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            let km = haversine_distance_km(Coordinate::new(lat1, lng1), Coordinate::new(lat2, lng2));
            println!("{km:.3}");
        }
        Commands::Decode { polyline, precision } => {
            let points = decode_polyline_with_precision(&polyline, precision)?;
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
    }

    Ok(())
}

fn load_custom_addresses(path: &Path) -> Result<Vec<CustomAddress>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

async fn plan_local(
    config: &PlannerConfig,
    request: WorkerRequest,
) -> Result<WorkerResponse, Box<dyn std::error::Error>> {
    logging::init_logging(&config.observability);

    let shutdown = Shutdown::new();
    let aggregator = Arc::new(BatchAggregator::from_config(config)?);
    let (worker, task) = RoutingWorker::spawn(aggregator, config.worker.queue_depth, shutdown.subscribe());

    let response = worker.calculate(request).await;

    shutdown.trigger();
    task.await?;
    Ok(response)
}

async fn plan_remote(url: &str, request: &WorkerRequest) -> Result<WorkerResponse, Box<dyn std::error::Error>> {
    let res = reqwest::Client::new()
        .post(format!("{}/api/v1/routes", url.trim_end_matches('/')))
        .json(request)
        .send()
        .await?;
    if !res.status().is_success() {
        eprintln!("Error: server returned status {}", res.status());
    }
    Ok(res.json().await?)
}

fn print_response(response: &WorkerResponse) -> Result<(), Box<dyn std::error::Error>> {
    match response {
        WorkerResponse::Success { route_results } => {
            let output = json!({
                "route_results": route_results,
                "summary": BatchSummary::from_results(route_results),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        WorkerResponse::Error { message } => Err(message.clone().into()),
    }
}
