use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Eta – the radical-exposure parameter of one experiment
// ---------------------------------------------------------------------------

/// The η parameter of an experiment. `Baseline` is the unparameterized
/// "Vanilla" control run (the literal `NULL` token in the CSV).
/// Going into `BTreeSet` downstream, so `Eta` must be `Ord`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eta {
    Baseline,
    Value(f64),
}

// -- Manual Eq/Ord so we can sort rows and put Eta in BTreeSet --
// Baseline sorts first, values ascend by total order.

impl Eq for Eta {}

impl PartialOrd for Eta {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Eta {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Eta::Baseline, Eta::Baseline) => std::cmp::Ordering::Equal,
            (Eta::Baseline, Eta::Value(_)) => std::cmp::Ordering::Less,
            (Eta::Value(_), Eta::Baseline) => std::cmp::Ordering::Greater,
            (Eta::Value(a), Eta::Value(b)) => a.total_cmp(b),
        }
    }
}

impl std::hash::Hash for Eta {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Eta::Value(v) = self {
            v.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Baseline => write!(f, "Vanilla"),
            Eta::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Error for an η token that is neither `NULL` nor a finite number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not 'NULL' or a finite number")]
pub struct ParseEtaError(pub String);

impl FromStr for Eta {
    type Err = ParseEtaError;

    /// Parse a CSV η token. `NULL` is the baseline sentinel; anything else
    /// must be a finite float. Malformed tokens are rejected here rather than
    /// carried through as NaN, so they can never corrupt the sort order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "NULL" {
            return Ok(Eta::Baseline);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Eta::Value(v)),
            _ => Err(ParseEtaError(s.to_string())),
        }
    }
}

impl Eta {
    /// Whether this is the baseline control run.
    pub fn is_baseline(&self) -> bool {
        matches!(self, Eta::Baseline)
    }

    /// Numeric value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Eta::Baseline => None,
            Eta::Value(v) => Some(*v),
        }
    }

    /// Caption shown under a figure: `Vanilla` or `η=<value>`.
    pub fn caption(&self) -> String {
        match self {
            Eta::Baseline => "Vanilla".to_string(),
            Eta::Value(v) => format!("η={v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationType – the two fixed experiment groups
// ---------------------------------------------------------------------------

/// The group discriminator. Also serves as the display mode: the UI shows one
/// group at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationType {
    Similarity,
    Repulsive,
}

impl SimulationType {
    pub const ALL: [SimulationType; 2] = [SimulationType::Similarity, SimulationType::Repulsive];

    /// Parse the CSV discriminator column. Unknown values yield `None`; the
    /// loader drops such rows.
    pub fn from_csv(s: &str) -> Option<Self> {
        match s {
            "SIMILARITY" => Some(SimulationType::Similarity),
            "REPULSIVE" => Some(SimulationType::Repulsive),
            _ => None,
        }
    }
}

impl fmt::Display for SimulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationType::Similarity => write!(f, "Similarity"),
            SimulationType::Repulsive => write!(f, "Repulsive"),
        }
    }
}

// ---------------------------------------------------------------------------
// ExperimentRow – one row of the CSV
// ---------------------------------------------------------------------------

/// A single experiment. Immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRow {
    pub experiment_id: String,
    pub eta: Eta,
}

impl ExperimentRow {
    /// Path of the row's animated figure: `<base>/figures/<experiment_id>.gif`.
    /// A naming convention, not a generated asset.
    pub fn figure_path(&self, base: &Path) -> PathBuf {
        base.join("figures")
            .join(format!("{}.gif", self.experiment_id))
    }
}

// ---------------------------------------------------------------------------
// ExperimentSet – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The two experiment groups, each sorted ascending by η with the baseline
/// row first.
#[derive(Debug, Clone, Default)]
pub struct ExperimentSet {
    similarity: Vec<ExperimentRow>,
    repulsive: Vec<ExperimentRow>,
}

impl ExperimentSet {
    /// Partition rows into the two groups and sort each by η.
    pub fn from_rows(rows: Vec<(SimulationType, ExperimentRow)>) -> Self {
        let mut similarity = Vec::new();
        let mut repulsive = Vec::new();
        for (sim_type, row) in rows {
            match sim_type {
                SimulationType::Similarity => similarity.push(row),
                SimulationType::Repulsive => repulsive.push(row),
            }
        }
        similarity.sort_by(|a, b| a.eta.cmp(&b.eta));
        repulsive.sort_by(|a, b| a.eta.cmp(&b.eta));
        ExperimentSet {
            similarity,
            repulsive,
        }
    }

    /// Rows of one group, in ascending η order.
    pub fn group(&self, sim_type: SimulationType) -> &[ExperimentRow] {
        match sim_type {
            SimulationType::Similarity => &self.similarity,
            SimulationType::Repulsive => &self.repulsive,
        }
    }

    /// Distinct non-baseline η values of the SIMILARITY group, ascending.
    /// Only the similarity group feeds the selectable set; the repulsive
    /// group reuses it.
    pub fn eligible_etas(&self) -> Vec<Eta> {
        let mut etas: Vec<Eta> = self
            .similarity
            .iter()
            .map(|row| row.eta)
            .filter(|eta| !eta.is_baseline())
            .collect();
        etas.dedup();
        etas
    }

    /// Whether a group contains a baseline (Vanilla) row.
    pub fn has_baseline(&self, sim_type: SimulationType) -> bool {
        self.group(sim_type).iter().any(|row| row.eta.is_baseline())
    }

    /// Total number of rows across both groups.
    pub fn len(&self) -> usize {
        self.similarity.len() + self.repulsive.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.similarity.is_empty() && self.repulsive.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, eta: Eta) -> ExperimentRow {
        ExperimentRow {
            experiment_id: id.to_string(),
            eta,
        }
    }

    #[test]
    fn eta_parses_null_and_numbers() {
        assert_eq!("NULL".parse::<Eta>(), Ok(Eta::Baseline));
        assert_eq!("0.25".parse::<Eta>(), Ok(Eta::Value(0.25)));
        assert_eq!(" 1e-3 ".parse::<Eta>(), Ok(Eta::Value(0.001)));
    }

    #[test]
    fn eta_rejects_malformed_tokens() {
        assert!("".parse::<Eta>().is_err());
        assert!("null".parse::<Eta>().is_err());
        assert!("abc".parse::<Eta>().is_err());
        assert!("NaN".parse::<Eta>().is_err());
        assert!("inf".parse::<Eta>().is_err());
    }

    #[test]
    fn baseline_sorts_first() {
        let mut etas = vec![Eta::Value(0.5), Eta::Baseline, Eta::Value(0.1)];
        etas.sort();
        assert_eq!(etas, vec![Eta::Baseline, Eta::Value(0.1), Eta::Value(0.5)]);
    }

    #[test]
    fn groups_are_sorted_by_eta() {
        let set = ExperimentSet::from_rows(vec![
            (SimulationType::Similarity, row("s3", Eta::Value(0.3))),
            (SimulationType::Repulsive, row("r1", Eta::Value(0.2))),
            (SimulationType::Similarity, row("s0", Eta::Baseline)),
            (SimulationType::Similarity, row("s1", Eta::Value(0.1))),
            (SimulationType::Repulsive, row("r0", Eta::Baseline)),
        ]);

        let sims: Vec<&str> = set
            .group(SimulationType::Similarity)
            .iter()
            .map(|r| r.experiment_id.as_str())
            .collect();
        assert_eq!(sims, vec!["s0", "s1", "s3"]);

        let reps: Vec<&str> = set
            .group(SimulationType::Repulsive)
            .iter()
            .map(|r| r.experiment_id.as_str())
            .collect();
        assert_eq!(reps, vec!["r0", "r1"]);
    }

    #[test]
    fn eligible_etas_come_from_similarity_only() {
        let set = ExperimentSet::from_rows(vec![
            (SimulationType::Similarity, row("s0", Eta::Baseline)),
            (SimulationType::Similarity, row("s1", Eta::Value(0.1))),
            (SimulationType::Similarity, row("s2", Eta::Value(0.2))),
            (SimulationType::Repulsive, row("r9", Eta::Value(0.9))),
        ]);
        assert_eq!(set.eligible_etas(), vec![Eta::Value(0.1), Eta::Value(0.2)]);
    }

    #[test]
    fn eligible_etas_are_distinct() {
        let set = ExperimentSet::from_rows(vec![
            (SimulationType::Similarity, row("a", Eta::Value(0.1))),
            (SimulationType::Similarity, row("b", Eta::Value(0.1))),
        ]);
        assert_eq!(set.eligible_etas(), vec![Eta::Value(0.1)]);
    }

    #[test]
    fn figure_path_follows_naming_convention() {
        let r = row("exp_42", Eta::Value(0.1));
        assert_eq!(
            r.figure_path(Path::new("data")),
            Path::new("data").join("figures").join("exp_42.gif")
        );
    }
}
