use std::fmt;
use std::path::Path;

use thiserror::Error;

use super::model::{Eta, ExperimentRow, ExperimentSet, SimulationType};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// A load that could not produce a dataset at all. I/O failures arrive
/// wrapped in `csv::Error`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Why a single row was dropped. Row-level problems never abort the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// `simulation_type` was neither SIMILARITY nor REPULSIVE.
    UnknownSimulationType(String),
    /// `experiment_id` was empty.
    EmptyExperimentId,
    /// `radical_exposure_eta` was neither `NULL` nor a finite number.
    /// The original viewer let such tokens through as NaN; here they are
    /// rejected so the sort order stays well defined.
    MalformedEta(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::UnknownSimulationType(s) => {
                write!(f, "unknown simulation_type '{s}'")
            }
            DropReason::EmptyExperimentId => write!(f, "empty experiment_id"),
            DropReason::MalformedEta(s) => {
                write!(f, "malformed radical_exposure_eta '{s}'")
            }
        }
    }
}

/// A dropped row: 1-based CSV line number (header is line 1) and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub line: usize,
    pub reason: DropReason,
}

/// Result of a successful load: the grouped dataset plus a report of every
/// row that was skipped.
#[derive(Debug)]
pub struct LoadOutcome {
    pub dataset: ExperimentSet,
    pub dropped: Vec<DroppedRow>,
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

const COL_EXPERIMENT_ID: &str = "experiment_id";
const COL_ETA: &str = "radical_exposure_eta";
const COL_SIMULATION_TYPE: &str = "simulation_type";

/// Load the combined experiments CSV. Single-shot, not retried.
///
/// Expected header: at least `experiment_id`, `radical_exposure_eta`,
/// `simulation_type` (extra columns are ignored). `radical_exposure_eta` is
/// either the literal token `NULL` or a numeric string.
pub fn load_csv(path: &Path) -> Result<LoadOutcome, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let id_idx = column_index(&headers, COL_EXPERIMENT_ID)?;
    let eta_idx = column_index(&headers, COL_ETA)?;
    let type_idx = column_index(&headers, COL_SIMULATION_TYPE)?;

    let mut rows = Vec::new();
    let mut dropped = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1, first record is line 2.
        let line = row_no + 2;

        match parse_record(&record, id_idx, eta_idx, type_idx) {
            Ok(parsed) => rows.push(parsed),
            Err(reason) => {
                log::warn!("dropping CSV line {line}: {reason}");
                dropped.push(DroppedRow { line, reason });
            }
        }
    }

    Ok(LoadOutcome {
        dataset: ExperimentSet::from_rows(rows),
        dropped,
    })
}

fn column_index(headers: &[String], name: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(LoadError::MissingColumn(name))
}

fn parse_record(
    record: &csv::StringRecord,
    id_idx: usize,
    eta_idx: usize,
    type_idx: usize,
) -> Result<(SimulationType, ExperimentRow), DropReason> {
    let type_field = record.get(type_idx).unwrap_or("");
    let sim_type = SimulationType::from_csv(type_field)
        .ok_or_else(|| DropReason::UnknownSimulationType(type_field.to_string()))?;

    let experiment_id = record.get(id_idx).unwrap_or("").trim();
    if experiment_id.is_empty() {
        return Err(DropReason::EmptyExperimentId);
    }

    let eta_field = record.get(eta_idx).unwrap_or("");
    let eta: Eta = eta_field
        .parse()
        .map_err(|_| DropReason::MalformedEta(eta_field.to_string()))?;

    Ok((
        sim_type,
        ExperimentRow {
            experiment_id: experiment_id.to_string(),
            eta,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "polarization-dashboard-test-{name}-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, contents).expect("write temp csv");
        path
    }

    #[test]
    fn loads_and_groups_rows() {
        let path = write_temp_csv(
            "groups",
            "experiment_id,radical_exposure_eta,simulation_type\n\
             sim_c,0.3,SIMILARITY\n\
             rep_a,NULL,REPULSIVE\n\
             sim_a,NULL,SIMILARITY\n\
             sim_b,0.1,SIMILARITY\n\
             rep_b,0.2,REPULSIVE\n",
        );
        let outcome = load_csv(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert!(outcome.dropped.is_empty());

        let sims: Vec<&str> = outcome
            .dataset
            .group(SimulationType::Similarity)
            .iter()
            .map(|r| r.experiment_id.as_str())
            .collect();
        assert_eq!(sims, vec!["sim_a", "sim_b", "sim_c"]);

        let reps: Vec<Eta> = outcome
            .dataset
            .group(SimulationType::Repulsive)
            .iter()
            .map(|r| r.eta)
            .collect();
        assert_eq!(reps, vec![Eta::Baseline, Eta::Value(0.2)]);
    }

    #[test]
    fn extra_columns_and_any_order_are_accepted() {
        let path = write_temp_csv(
            "columns",
            "simulation_type,notes,experiment_id,radical_exposure_eta\n\
             SIMILARITY,first run,sim_a,0.5\n",
        );
        let outcome = load_csv(&path).expect("load");
        std::fs::remove_file(&path).ok();

        let sims = outcome.dataset.group(SimulationType::Similarity);
        assert_eq!(sims.len(), 1);
        assert_eq!(sims[0].eta, Eta::Value(0.5));
    }

    #[test]
    fn bad_rows_are_dropped_and_reported() {
        let path = write_temp_csv(
            "dropped",
            "experiment_id,radical_exposure_eta,simulation_type\n\
             sim_a,0.1,SIMILARITY\n\
             other,0.2,ATTRACTIVE\n\
             ,0.3,SIMILARITY\n\
             sim_d,banana,SIMILARITY\n",
        );
        let outcome = load_csv(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(
            outcome.dropped,
            vec![
                DroppedRow {
                    line: 3,
                    reason: DropReason::UnknownSimulationType("ATTRACTIVE".to_string()),
                },
                DroppedRow {
                    line: 4,
                    reason: DropReason::EmptyExperimentId,
                },
                DroppedRow {
                    line: 5,
                    reason: DropReason::MalformedEta("banana".to_string()),
                },
            ]
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let path = write_temp_csv(
            "missing",
            "experiment_id,simulation_type\nsim_a,SIMILARITY\n",
        );
        let err = load_csv(&path).expect_err("should fail");
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            err,
            LoadError::MissingColumn("radical_exposure_eta")
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_csv(Path::new("/nonexistent/combined_experiments.csv"))
            .expect_err("should fail");
        assert!(matches!(err, LoadError::Csv(_)));
    }
}
