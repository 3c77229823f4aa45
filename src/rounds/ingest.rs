use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, instrument, warn};

use super::models::{RoundRecord, RoundRow};
use crate::shared::AppError;

/// Loads round records from a CSV export with a header row
///
/// Only the `round_data` columns are read; any other column is ignored.
/// A row that fails to parse aborts the whole load.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RoundRecord>, AppError> {
    let file = File::open(path.as_ref()).map_err(|e| {
        warn!(error = %e, "Failed to open CSV file");
        AppError::Ingest(format!("{}: {}", path.as_ref().display(), e))
    })?;

    let rounds = read_rounds(file)?;
    info!(round_count = rounds.len(), "CSV file loaded");
    Ok(rounds)
}

pub fn read_rounds<R: Read>(reader: R) -> Result<Vec<RoundRecord>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut rounds = Vec::new();
    let mut dropped = 0usize;

    for result in csv_reader.deserialize::<RoundRow>() {
        let row = result.map_err(|e| {
            warn!(error = %e, "Failed to parse CSV row");
            AppError::Ingest(e.to_string())
        })?;

        match row.into_record() {
            Some(record) => rounds.push(record),
            None => dropped += 1,
        }
    }

    debug!(round_count = rounds.len(), dropped, "CSV rows parsed");
    Ok(rounds)
}
