//! Load schedule inputs (JSON) and published index series (CSV)

use super::{IndexPoint, ScheduleInput};
use crate::error::{ScheduleError, ScheduleResult};
use chrono::NaiveDate;
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row of an index series
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "EffectiveDate")]
    effective_date: String,
    #[serde(rename = "IndexValue")]
    index_value: f64,
}

impl CsvRow {
    fn to_index_point(self) -> ScheduleResult<IndexPoint> {
        Ok(IndexPoint {
            effective_date: parse_date(&self.effective_date)?,
            index_value: self.index_value,
        })
    }
}

/// Parse an ISO date, or the French DD/MM/YYYY layout used in lease documents
pub fn parse_date(value: &str) -> ScheduleResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|e| ScheduleError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Load an index series from a CSV file with `EffectiveDate,IndexValue` columns
pub fn load_index_points<P: AsRef<Path>>(path: P) -> ScheduleResult<Vec<IndexPoint>> {
    let file = File::open(path)?;
    load_index_points_from_reader(file)
}

/// Load an index series from any reader
pub fn load_index_points_from_reader<R: std::io::Read>(reader: R) -> ScheduleResult<Vec<IndexPoint>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        points.push(row.to_index_point()?);
    }

    Ok(points)
}

/// Load a single schedule input from a JSON file
pub fn load_schedule_input<P: AsRef<Path>>(path: P) -> ScheduleResult<ScheduleInput> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load a JSON array of schedule inputs
pub fn load_schedule_inputs<P: AsRef<Path>>(path: P) -> ScheduleResult<Vec<ScheduleInput>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
