use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Eta, ExperimentRow};

// ---------------------------------------------------------------------------
// Variant options
// ---------------------------------------------------------------------------

/// How `select_default` fills the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultStrategy {
    /// First `limit` eligible η values in sorted order.
    FirstN,
    /// Every eligible η value.
    All,
    /// A fixed non-contiguous sample across the sorted range.
    SparseSample,
}

/// Where the display limit is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStrategy {
    /// `toggle` refuses to grow the selection past the limit.
    RejectOnToggle,
    /// Selection may grow freely; `visible_rows` truncates instead.
    TruncateDisplay,
}

/// Index pattern used by [`DefaultStrategy::SparseSample`]: a deliberate
/// spread across the sorted eligible list rather than a contiguous prefix.
pub const SPARSE_SAMPLE_INDICES: [usize; 6] = [0, 1, 6, 11, 16, 18];

/// The knobs distinguishing the dashboard variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub limit: usize,
    pub default_strategy: DefaultStrategy,
    pub cap_strategy: CapStrategy,
    /// Persist the selection through a [`SelectionStore`](super::persist::SelectionStore).
    pub persist: bool,
}

impl SelectionOptions {
    /// Plain checkbox panel: first-N default, toggles rejected at the limit.
    pub fn checkboxes() -> Self {
        SelectionOptions {
            limit: 6,
            default_strategy: DefaultStrategy::FirstN,
            cap_strategy: CapStrategy::RejectOnToggle,
            persist: false,
        }
    }

    /// Selection persisted in the `etas` query parameter, sparse default.
    pub fn url_persisted() -> Self {
        SelectionOptions {
            limit: 6,
            default_strategy: DefaultStrategy::SparseSample,
            cap_strategy: CapStrategy::RejectOnToggle,
            persist: true,
        }
    }

    /// Everything selected by default, display truncated to the limit.
    pub fn capped_display() -> Self {
        SelectionOptions {
            limit: 8,
            default_strategy: DefaultStrategy::All,
            cap_strategy: CapStrategy::TruncateDisplay,
            persist: false,
        }
    }
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self::checkboxes()
    }
}

/// The three original dashboard variants, nameable from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantPreset {
    Checkboxes,
    UrlPersisted,
    CappedDisplay,
}

impl From<VariantPreset> for SelectionOptions {
    fn from(preset: VariantPreset) -> Self {
        match preset {
            VariantPreset::Checkboxes => SelectionOptions::checkboxes(),
            VariantPreset::UrlPersisted => SelectionOptions::url_persisted(),
            VariantPreset::CappedDisplay => SelectionOptions::capped_display(),
        }
    }
}

/// Accepted config-file shapes: either a named preset or the full knobs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionsFile {
    Preset { preset: VariantPreset },
    Full(SelectionOptions),
}

impl SelectionOptions {
    /// Read options from an optional JSON config file, either
    /// `{"preset": "url_persisted"}` or the full option set. A missing file
    /// means the default preset; an unreadable one is logged and ignored.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<OptionsFile>(&text) {
                Ok(OptionsFile::Preset { preset }) => {
                    log::info!("using '{preset:?}' preset from {}", path.display());
                    preset.into()
                }
                Ok(OptionsFile::Full(options)) => {
                    log::info!("loaded selection options from {}", path.display());
                    options
                }
                Err(e) => {
                    log::error!("invalid options file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Toggle outcome
// ---------------------------------------------------------------------------

/// What a `toggle` call did. `LimitRejected` is the one user-visible failure
/// mode; the caller surfaces exactly one notice for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    LimitRejected { limit: usize },
    /// Baseline is implicitly visible and never a set member.
    Ignored,
}

// ---------------------------------------------------------------------------
// SelectionModel
// ---------------------------------------------------------------------------

/// The selection view-model: which η values are displayed. Constructed
/// explicitly and mutated only through its methods, so it can be unit-tested
/// without a rendering surface.
#[derive(Debug, Clone)]
pub struct SelectionModel {
    options: SelectionOptions,
    /// Selectable η values, ascending; derived from the similarity group.
    eligible: Vec<Eta>,
    /// Currently selected η values. Baseline never appears here.
    selected: BTreeSet<Eta>,
}

impl SelectionModel {
    pub fn new(options: SelectionOptions) -> Self {
        SelectionModel {
            options,
            eligible: Vec::new(),
            selected: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    pub fn eligible(&self) -> &[Eta] {
        &self.eligible
    }

    pub fn selected(&self) -> &BTreeSet<Eta> {
        &self.selected
    }

    /// Install the eligible set after a load. Selected values that are no
    /// longer eligible are dropped.
    pub fn set_eligible(&mut self, etas: Vec<Eta>) {
        self.eligible = etas;
        let eligible = &self.eligible;
        self.selected.retain(|eta| eligible.contains(eta));
    }

    /// Replace the selection wholesale (e.g. from a persisted query string).
    /// Unknown values are dropped; the baseline is never stored.
    pub fn set_selected(&mut self, etas: BTreeSet<Eta>) {
        self.selected = etas
            .into_iter()
            .filter(|eta| self.eligible.contains(eta))
            .collect();
    }

    /// Baseline is always visible; other η values when selected.
    pub fn is_selected(&self, eta: Eta) -> bool {
        eta.is_baseline() || self.selected.contains(&eta)
    }

    /// Toggle one η value. Under `RejectOnToggle` an add that would exceed
    /// the limit is refused and nothing changes.
    pub fn toggle(&mut self, eta: Eta) -> ToggleOutcome {
        if eta.is_baseline() {
            return ToggleOutcome::Ignored;
        }
        if self.selected.remove(&eta) {
            return ToggleOutcome::Removed;
        }
        if self.options.cap_strategy == CapStrategy::RejectOnToggle
            && self.selected.len() >= self.options.limit
        {
            return ToggleOutcome::LimitRejected {
                limit: self.options.limit,
            };
        }
        self.selected.insert(eta);
        ToggleOutcome::Added
    }

    /// Deterministic default selection per the configured strategy.
    pub fn select_default(&mut self) {
        self.selected = match self.options.default_strategy {
            DefaultStrategy::FirstN => self
                .eligible
                .iter()
                .take(self.options.limit)
                .copied()
                .collect(),
            DefaultStrategy::All => self.eligible.iter().copied().collect(),
            DefaultStrategy::SparseSample => SPARSE_SAMPLE_INDICES
                .iter()
                .filter_map(|&i| self.eligible.get(i))
                .copied()
                .collect(),
        };
    }

    /// Empty the selection. Baseline rows stay implicitly visible.
    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// Rows to display, in group order: baseline rows plus rows whose η is
    /// selected. Under `TruncateDisplay` the list is capped at `limit`
    /// items; baseline sorts first, so it always survives the cut.
    pub fn visible_rows<'a>(&self, rows: &'a [ExperimentRow]) -> Vec<&'a ExperimentRow> {
        let visible = rows.iter().filter(|row| self.is_selected(row.eta));
        match self.options.cap_strategy {
            CapStrategy::RejectOnToggle => visible.collect(),
            CapStrategy::TruncateDisplay => visible.take(self.options.limit).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
