use std::collections::BTreeSet;
use std::path::PathBuf;

use super::model::Eta;
use super::selection::SelectionModel;

// ---------------------------------------------------------------------------
// etas ⇔ string codec
// ---------------------------------------------------------------------------

/// Query-string key holding the persisted selection.
pub const ETAS_PARAM: &str = "etas";

/// Encode a selection as the canonical `etas` value: comma-joined, ascending
/// by numeric value. Baseline never appears (it is implicit).
pub fn encode_etas(selected: &BTreeSet<Eta>) -> String {
    let values: Vec<String> = selected
        .iter()
        .filter_map(|eta| eta.value())
        .map(|v| v.to_string())
        .collect();
    values.join(",")
}

/// Decode an `etas` value back into a selection. Empty tokens are filtered;
/// malformed or `NULL` tokens are skipped with a warning rather than
/// poisoning the whole selection.
pub fn decode_etas(encoded: &str) -> BTreeSet<Eta> {
    encoded
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(Eta::Value(v)),
            _ => {
                log::warn!("skipping malformed eta token '{token}' in persisted selection");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Query-string helpers
// ---------------------------------------------------------------------------

/// Read one `key=value` pair out of a query string (`a=b&etas=0.1,0.2`).
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Set one `key=value` pair in a query string, preserving every other pair
/// and the existing order. A missing key is appended.
pub fn set_query_param(query: &str, key: &str, value: &str) -> String {
    let mut pairs: Vec<String> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split_once('=').map(|(k, _)| k) != Some(key))
        .map(|pair| pair.to_string())
        .collect();
    pairs.push(format!("{key}={value}"));
    pairs.join("&")
}

// ---------------------------------------------------------------------------
// SelectionStore – where the query string lives
// ---------------------------------------------------------------------------

/// Abstracts the location of the persisted query string, keeping the
/// selection logic independent of any particular navigation mechanism.
pub trait SelectionStore {
    /// The current `etas` value, if one has ever been written.
    fn read_etas(&self) -> Option<String>;
    /// Persist a new `etas` value.
    fn write_etas(&mut self, encoded: &str);
}

/// Transient store: the selection lives only for the session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    query: String,
}

impl SelectionStore for MemoryStore {
    fn read_etas(&self) -> Option<String> {
        query_param(&self.query, ETAS_PARAM).map(|v| v.to_string())
    }

    fn write_etas(&mut self, encoded: &str) {
        self.query = set_query_param(&self.query, ETAS_PARAM, encoded);
    }
}

/// File-backed store: the query string lives in a sidecar file, playing the
/// role the page URL plays in a browser.
#[derive(Debug)]
pub struct QueryStringStore {
    path: PathBuf,
}

impl QueryStringStore {
    pub fn new(path: PathBuf) -> Self {
        QueryStringStore { path }
    }
}

impl SelectionStore for QueryStringStore {
    fn read_etas(&self) -> Option<String> {
        let query = std::fs::read_to_string(&self.path).ok()?;
        query_param(query.trim(), ETAS_PARAM).map(|v| v.to_string())
    }

    fn write_etas(&mut self, encoded: &str) {
        let query = std::fs::read_to_string(&self.path).unwrap_or_default();
        let updated = set_query_param(query.trim(), ETAS_PARAM, encoded);
        if let Err(e) = std::fs::write(&self.path, updated) {
            log::error!("failed to persist selection to {}: {e}", self.path.display());
        }
    }
}

// ---------------------------------------------------------------------------
// Startup sync
// ---------------------------------------------------------------------------

/// Reconcile the model with the store after a load. An existing persisted
/// value is the source of truth; a missing one computes the default and
/// writes it back, so the store always ends up carrying the selection.
pub fn sync_with_store(model: &mut SelectionModel, store: &mut dyn SelectionStore) {
    match store.read_etas() {
        Some(encoded) => {
            model.set_selected(decode_etas(&encoded));
        }
        None => {
            model.select_default();
            store.write_etas(&encode_etas(model.selected()));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::selection::SelectionOptions;

    #[test]
    fn encode_is_ascending_and_comma_joined() {
        let selected: BTreeSet<Eta> =
            [Eta::Value(0.3), Eta::Value(0.1), Eta::Value(0.2)].into();
        assert_eq!(encode_etas(&selected), "0.1,0.2,0.3");
    }

    #[test]
    fn encode_skips_baseline() {
        let selected: BTreeSet<Eta> = [Eta::Baseline, Eta::Value(0.5)].into();
        assert_eq!(encode_etas(&selected), "0.5");
    }

    #[test]
    fn decode_round_trips_encode() {
        let selected: BTreeSet<Eta> =
            [Eta::Value(0.1), Eta::Value(2.5), Eta::Value(10.0)].into();
        assert_eq!(decode_etas(&encode_etas(&selected)), selected);
    }

    #[test]
    fn decode_filters_empty_and_malformed_tokens() {
        let decoded = decode_etas("0.1,,abc,0.2,");
        let expected: BTreeSet<Eta> = [Eta::Value(0.1), Eta::Value(0.2)].into();
        assert_eq!(decoded, expected);
        assert!(decode_etas("").is_empty());
    }

    #[test]
    fn query_param_reads_and_writes_preserving_other_keys() {
        let q = set_query_param("mode=similarity", ETAS_PARAM, "0.1,0.2");
        assert_eq!(q, "mode=similarity&etas=0.1,0.2");
        assert_eq!(query_param(&q, ETAS_PARAM), Some("0.1,0.2"));
        assert_eq!(query_param(&q, "mode"), Some("similarity"));

        let q2 = set_query_param(&q, ETAS_PARAM, "0.3");
        assert_eq!(query_param(&q2, ETAS_PARAM), Some("0.3"));
        assert_eq!(query_param(&q2, "mode"), Some("similarity"));
    }

    #[test]
    fn sync_uses_persisted_value_when_present() {
        let mut model = SelectionModel::new(SelectionOptions::url_persisted());
        model.set_eligible(vec![Eta::Value(0.1), Eta::Value(0.2), Eta::Value(0.3)]);

        let mut store = MemoryStore::default();
        store.write_etas("0.2,0.3");
        sync_with_store(&mut model, &mut store);

        let expected: BTreeSet<Eta> = [Eta::Value(0.2), Eta::Value(0.3)].into();
        assert_eq!(model.selected(), &expected);
    }

    #[test]
    fn sync_writes_back_a_default_when_store_is_empty() {
        let mut model = SelectionModel::new(SelectionOptions::url_persisted());
        let etas: Vec<Eta> = (0..20).map(|i| Eta::Value(i as f64)).collect();
        model.set_eligible(etas);

        let mut store = MemoryStore::default();
        sync_with_store(&mut model, &mut store);

        // Sparse-sample default, written back as the source of truth.
        assert_eq!(store.read_etas().as_deref(), Some("0,1,6,11,16,18"));
        assert_eq!(model.selected().len(), 6);
    }

    #[test]
    fn query_string_store_round_trips_through_the_sidecar_file() {
        let path = std::env::temp_dir().join(format!(
            "polarization-dashboard-test-query-{}.query",
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();

        let mut store = QueryStringStore::new(path.clone());
        assert_eq!(store.read_etas(), None);

        store.write_etas("0.1,0.2");
        assert_eq!(store.read_etas().as_deref(), Some("0.1,0.2"));

        // A fresh store over the same file sees the persisted value.
        let reopened = QueryStringStore::new(path.clone());
        assert_eq!(reopened.read_etas().as_deref(), Some("0.1,0.2"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn sync_treats_written_empty_selection_as_authoritative() {
        let mut model = SelectionModel::new(SelectionOptions::url_persisted());
        model.set_eligible(vec![Eta::Value(0.1)]);

        let mut store = MemoryStore::default();
        store.write_etas("");
        sync_with_store(&mut model, &mut store);
        assert!(model.selected().is_empty());
    }
}
