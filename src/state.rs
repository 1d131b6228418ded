use std::path::{Path, PathBuf};

use crate::color::EtaColorMap;
use crate::data::loader::{self, LoadOutcome};
use crate::data::model::{Eta, ExperimentRow, ExperimentSet, SimulationType};
use crate::data::persist::{self, MemoryStore, SelectionStore};
use crate::data::selection::{SelectionModel, SelectionOptions, ToggleOutcome};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a CSV is loaded).
    pub dataset: Option<ExperimentSet>,

    /// Which η values are displayed.
    pub selection: SelectionModel,

    /// Which group feeds the gallery. Switching mode never alters the
    /// selection.
    pub mode: SimulationType,

    /// Where the persisted `etas` query string lives.
    pub store: Box<dyn SelectionStore>,

    /// η → colour for checkbox labels and captions.
    pub color_map: Option<EtaColorMap>,

    /// Directory containing `figures/<experiment_id>.gif`, normally the
    /// CSV's parent directory.
    pub figures_base: PathBuf,

    /// Status / error / limit notice shown in the UI.
    pub status_message: Option<String>,

    /// Rows skipped by the last load.
    pub dropped_rows: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SelectionOptions::default(), Box::new(MemoryStore::default()))
    }
}

impl AppState {
    pub fn new(options: SelectionOptions, store: Box<dyn SelectionStore>) -> Self {
        AppState {
            dataset: None,
            selection: SelectionModel::new(options),
            mode: SimulationType::Similarity,
            store,
            color_map: None,
            figures_base: PathBuf::new(),
            status_message: None,
            dropped_rows: 0,
        }
    }

    /// Load a CSV and ingest it. Load failure keeps the current state and
    /// surfaces the error in the status line; there is no retry.
    pub fn load_from_path(&mut self, path: &Path) {
        match loader::load_csv(path) {
            Ok(outcome) => {
                log::info!(
                    "loaded {} experiments from {} ({} rows dropped)",
                    outcome.dataset.len(),
                    path.display(),
                    outcome.dropped.len()
                );
                let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
                self.ingest(outcome, base);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a load outcome: derive the eligible set from the similarity
    /// group, rebuild colours, and reconcile the selection with the store
    /// (persisted value wins; otherwise the default is computed and written
    /// back).
    pub fn ingest(&mut self, outcome: LoadOutcome, figures_base: PathBuf) {
        self.dropped_rows = outcome.dropped.len();

        let eligible = outcome.dataset.eligible_etas();
        self.color_map = Some(EtaColorMap::new(&eligible));
        self.selection.set_eligible(eligible);

        if self.selection.options().persist {
            persist::sync_with_store(&mut self.selection, self.store.as_mut());
        } else {
            self.selection.select_default();
        }

        self.figures_base = figures_base;
        self.dataset = Some(outcome.dataset);
        self.status_message = if self.dropped_rows > 0 {
            Some(format!("{} malformed rows skipped", self.dropped_rows))
        } else {
            None
        };
    }

    /// Toggle one η value, surfacing the limit notice when refused.
    pub fn toggle_eta(&mut self, eta: Eta) {
        match self.selection.toggle(eta) {
            ToggleOutcome::Added | ToggleOutcome::Removed => {
                self.status_message = None;
                self.persist_selection();
            }
            ToggleOutcome::LimitRejected { limit } => {
                self.status_message =
                    Some(format!("Sorry, selection is limited to {limit} values"));
            }
            ToggleOutcome::Ignored => {}
        }
    }

    /// Apply the variant's deterministic default selection.
    pub fn select_default(&mut self) {
        self.selection.select_default();
        self.status_message = None;
        self.persist_selection();
    }

    /// Clear the selection; baseline rows stay visible.
    pub fn select_none(&mut self) {
        self.selection.select_none();
        self.status_message = None;
        self.persist_selection();
    }

    pub fn set_mode(&mut self, mode: SimulationType) {
        self.mode = mode;
    }

    /// Visible rows of the current mode's group, ascending by η.
    pub fn visible_rows(&self) -> Vec<&ExperimentRow> {
        match &self.dataset {
            Some(ds) => self.selection.visible_rows(ds.group(self.mode)),
            None => Vec::new(),
        }
    }

    fn persist_selection(&mut self) {
        if self.selection.options().persist {
            self.store
                .write_etas(&persist::encode_etas(self.selection.selected()));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
