//! Loading and exporting historical outbreak and symptom datasets
//!
//! Historical records are read from JSON arrays or Parquet files whose
//! columns match the field names of [`HistoricalOutbreakRecord`]. Parquet
//! batches are converted with `serde_arrow`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use arrow_schema::FieldRef;
use itertools::Itertools;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::{ForecastError, Result};
use crate::models::{HistoricalOutbreakRecord, SymptomReport};
use crate::utils::logging::{
    create_spinner, finish_progress_bar, log_operation_complete, log_operation_start, log_warning,
};

/// Supported dataset encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Parquet,
}

impl DatasetFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(ForecastError::invalid_input(format!(
                "Unsupported dataset format: {}",
                path.display()
            ))),
        }
    }
}

/// Load historical outbreak records from a JSON or Parquet file
pub fn load_historical_records(path: &Path) -> Result<Vec<HistoricalOutbreakRecord>> {
    let start = Instant::now();
    let subject = path.display().to_string();
    log_operation_start("Loading historical outbreaks", &subject);

    let records = match DatasetFormat::from_path(path)? {
        DatasetFormat::Json => read_json(path)?,
        DatasetFormat::Parquet => read_parquet_records(path)?,
    };

    log_operation_complete(
        "Loaded historical outbreaks",
        &subject,
        records.len(),
        Some(start.elapsed()),
    );
    Ok(records)
}

/// Load every Parquet file in a directory in parallel
///
/// Files are read in name order so the combined record order is stable.
pub fn load_historical_records_dir(dir: &Path) -> Result<Vec<HistoricalOutbreakRecord>> {
    if !dir.is_dir() {
        return Err(ForecastError::invalid_input(format!(
            "Directory does not exist: {}",
            dir.display()
        )));
    }

    let files = find_parquet_files(dir)?;
    if files.is_empty() {
        log_warning("No Parquet files found", Some(&dir.display().to_string()));
        return Ok(Vec::new());
    }

    let spinner = create_spinner(Some(&format!("Reading {} Parquet files", files.len())));
    let per_file = files
        .par_iter()
        .map(|path| read_parquet_records(path))
        .collect::<Result<Vec<_>>>();
    finish_progress_bar(&spinner, None);
    let per_file = per_file?;

    let records = per_file.into_iter().flatten().collect_vec();
    log::info!(
        "Loaded {} historical outbreaks from {} Parquet files in {}",
        records.len(),
        files.len(),
        dir.display()
    );
    Ok(records)
}

/// Write historical outbreak records to a Parquet file
pub fn write_historical_records_parquet(
    path: &Path,
    records: &[HistoricalOutbreakRecord],
) -> Result<()> {
    let batch = records_to_batch(records)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    log::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Load symptom reports from a JSON array
pub fn load_symptom_reports(path: &Path) -> Result<Vec<SymptomReport>> {
    let start = Instant::now();
    let subject = path.display().to_string();
    log_operation_start("Loading symptom reports", &subject);
    let reports: Vec<SymptomReport> = read_json(path)?;
    log_operation_complete(
        "Loaded symptom reports",
        &subject,
        reports.len(),
        Some(start.elapsed()),
    );
    Ok(reports)
}

/// Convert records into a single Arrow record batch
pub fn records_to_batch(records: &[HistoricalOutbreakRecord]) -> Result<RecordBatch> {
    let fields = Vec::<FieldRef>::from_type::<HistoricalOutbreakRecord>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &records)?)
}

/// Convert an Arrow record batch into records
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<HistoricalOutbreakRecord>> {
    Ok(serde_arrow::from_record_batch(batch)?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn read_parquet_records(path: &Path) -> Result<Vec<HistoricalOutbreakRecord>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(batch_to_records(&batch?)?);
    }
    Ok(records)
}

fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && matches!(DatasetFormat::from_path(&path), Ok(DatasetFormat::Parquet)) {
            files.push(path);
        }
    }
    Ok(files.into_iter().sorted().collect())
}
