use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use epi_forecast::algorithm::Calibrator;
use epi_forecast::async_io::{cross_validate_async, simulate_async};
use epi_forecast::{EngineConfig, HistoricalOutbreakRecord, load_historical_records};
use log::info;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

const USAGE: &str = "usage: epi-forecast <dataset.json|dataset.parquet> <disease> [region] [horizon_days]";
const DEFAULT_HORIZON_DAYS: i32 = 90;
const TASK_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

struct Args {
    dataset: PathBuf,
    disease: String,
    region: Option<String>,
    horizon_days: i32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let (Some(dataset), Some(disease)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let region = args.next().filter(|r| !r.is_empty() && r != "-");
    let horizon_days = match args.next() {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid horizon_days: {value}"))?,
        None => DEFAULT_HORIZON_DAYS,
    };
    Ok(Args {
        dataset: PathBuf::from(dataset),
        disease,
        region,
        horizon_days,
    })
}

/// Largest recorded case count for the disease, used to size the forecast population
fn reference_cases(records: &[HistoricalOutbreakRecord], disease: &str) -> f64 {
    records
        .iter()
        .filter(|r| r.is_disease(disease))
        .map(|r| r.case_count as f64)
        .fold(0.0, f64::max)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = EngineConfig::from_env();
    let start = Instant::now();

    let records = load_historical_records(&args.dataset)
        .with_context(|| format!("failed to load {}", args.dataset.display()))?;

    let calibrator = Calibrator::new(config.calibration.clone());
    let parameters = calibrator.calibrate(&args.disease, args.region.as_deref(), &records);

    let cases = reference_cases(&records, &args.disease).max(1.0);
    let population = cases * config.validation.population_multiplier;
    let initial_infected = (cases * config.validation.initial_infected_fraction).max(1.0);
    let seir = parameters.to_seir_parameters(population, initial_infected, 0.0, 0.0);

    let forecast = simulate_async(seir, args.horizon_days, config.simulation.clone(), TASK_TIMEOUT).await?;
    let validation = cross_validate_async(
        args.disease.clone(),
        records.into(),
        config.validation.clone(),
        TASK_TIMEOUT,
    )
    .await?;

    if let Some(report) = validation.report() {
        info!("\n{}", report.summary());
    }

    let output = serde_json::json!({
        "disease": args.disease,
        "region": args.region,
        "parameters": parameters,
        "forecast": {
            "population": forecast.population,
            "horizon_days": forecast.horizon_days(),
            "peak_day": forecast.peak_day,
            "peak_infected": forecast.peak_infected,
            "r0": forecast.r0,
            "total_new_cases": forecast.total_new_cases(),
            "confidence_bands": forecast.confidence_bands(),
        },
        "validation": validation,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!("Completed in {:?}", start.elapsed());
    Ok(())
}
