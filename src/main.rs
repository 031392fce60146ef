use clap::Parser;
use dist_cities::app::{handle_fatal_error, init_logging, AppConfig};
use dist_cities::{compute_max_distance, DistanceReport, PointStore, RunConfig};
use std::path::PathBuf;
use tracing::debug;

/// Maximum great-circle distance between any two cities
#[derive(Parser)]
#[command(name = "dist-cities", version)]
#[command(about = "Find the two cities furthest apart using a pool of workers", long_about = None)]
struct Cli {
    /// Point file: one `latitude longitude name` record per line
    #[arg(default_value = "cities.txt")]
    input: PathBuf,

    /// Number of workers (default: available CPU cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Sphere radius in kilometres
    #[arg(long)]
    radius: Option<f64>,

    /// Fail if the workers have not finished within this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app_config = AppConfig::new(cli.verbose).with_json_output(cli.json);
    init_logging(&app_config);

    match run(&cli).await {
        Ok(report) => {
            if let Err(e) = print_report(&report, &app_config) {
                handle_fatal_error(e, app_config.verbose);
            }
        }
        Err(e) => handle_fatal_error(e, app_config.verbose),
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    config.merge_env_vars()?;

    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(radius) = cli.radius {
        config.earth_radius_km = radius;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }

    config.validate()?;
    debug!("Effective run configuration: {:?}", config);
    Ok(config)
}

async fn run(cli: &Cli) -> anyhow::Result<DistanceReport> {
    let config = build_config(cli)?;
    let store = PointStore::load(&cli.input)?;
    Ok(compute_max_distance(&store, &config).await?)
}

fn print_report(report: &DistanceReport, app_config: &AppConfig) -> anyhow::Result<()> {
    if app_config.json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Maximum distance: {:.0} km", report.max_distance_km);
    println!("Computing time: {:.3} sec", report.elapsed_seconds);
    println!(
        "Farthest pair: {} - {}",
        report.farthest_pair.first, report.farthest_pair.second
    );
    Ok(())
}
