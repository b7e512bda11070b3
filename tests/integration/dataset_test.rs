use crate::utils::{mixed_records, temp_file};
use epi_forecast::dataset::{load_historical_records, load_symptom_reports, write_historical_records_parquet};
use epi_forecast::{ForecastError, SymptomReport, calibrate, load_historical_records_dir};

#[test]
fn test_parquet_round_trip_feeds_calibration() -> epi_forecast::Result<()> {
    let records = mixed_records();
    let path = temp_file("history.parquet");
    write_historical_records_parquet(&path, &records)?;

    let loaded = load_historical_records(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(loaded, records);
    assert_eq!(
        calibrate("cholera", None, &loaded),
        calibrate("cholera", None, &records)
    );
    Ok(())
}

#[test]
fn test_directory_load_combines_files_in_name_order() -> epi_forecast::Result<()> {
    let records = mixed_records();
    let dir = temp_file("history-dir");
    std::fs::create_dir_all(&dir)?;
    let (first, second) = records.split_at(5);
    write_historical_records_parquet(&dir.join("a.parquet"), first)?;
    write_historical_records_parquet(&dir.join("b.parquet"), second)?;
    std::fs::write(dir.join("notes.txt"), "ignored")?;

    let loaded = load_historical_records_dir(&dir)?;
    std::fs::remove_dir_all(&dir)?;

    assert_eq!(loaded, records);
    Ok(())
}

#[test]
fn test_json_inputs() -> epi_forecast::Result<()> {
    let history = temp_file("history.json");
    std::fs::write(
        &history,
        r#"[{"disease":"dengue","region":"southeast-asia","year":2019,"month":9,
             "case_count":5400,"death_count":27,"duration_days":75}]"#,
    )?;
    let records = load_historical_records(&history)?;
    std::fs::remove_file(&history)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].case_count, 5400);

    let reports_path = temp_file("reports.json");
    std::fs::write(
        &reports_path,
        r#"[{"location":"clinic-7","reported_on":"2024-03-01","symptoms":["fever","rash"]}]"#,
    )?;
    let reports = load_symptom_reports(&reports_path)?;
    std::fs::remove_file(&reports_path)?;
    assert_eq!(
        reports,
        vec![SymptomReport::new(
            "clinic-7",
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ["fever", "rash"],
        )]
    );
    Ok(())
}

#[test]
fn test_unsupported_or_missing_files_are_errors() {
    assert!(matches!(
        load_historical_records(std::path::Path::new("history.csv")),
        Err(ForecastError::InvalidInput(_))
    ));
    assert!(matches!(
        load_historical_records(&temp_file("missing.json")),
        Err(ForecastError::Io(_))
    ));
    assert!(matches!(
        load_historical_records_dir(&temp_file("missing-dir")),
        Err(ForecastError::InvalidInput(_))
    ));
}
