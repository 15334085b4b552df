//! Financial data store
//!
//! Read-only lookup table of (company, metric) → {year label → value},
//! built once at startup and shared by every request.

mod loader;

use crate::models::{Company, Delta, Metric, Record};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use loader::fingerprint;

/// Where a populated store came from
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    pub path: Option<PathBuf>,
    pub fingerprint: Option<String>,
    pub records: usize,
}

/// In-memory financial table
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    table: HashMap<(Company, Metric), BTreeMap<String, f64>>,
    source: Option<SourceInfo>,
}

impl DataStore {
    /// A store that was never populated; every lookup misses
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Build a populated store from records. The first value seen for a
    /// (company, metric, year) triple wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut table: HashMap<(Company, Metric), BTreeMap<String, f64>> = HashMap::new();
        let mut count = 0;

        for record in records {
            let years = table.entry((record.company, record.metric)).or_default();
            if years.contains_key(&record.year) {
                warn!(
                    company = %record.company,
                    metric = %record.metric,
                    year = %record.year,
                    "Duplicate record ignored"
                );
                continue;
            }
            years.insert(record.year, record.value);
            count += 1;
        }

        Self {
            table,
            source: Some(SourceInfo {
                path: None,
                fingerprint: None,
                records: count,
            }),
        }
    }

    /// Load a store from a CSV file
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let loaded = loader::read_csv(path)?;

        info!(
            path = %path.display(),
            fingerprint = %loaded.fingerprint,
            records = loaded.records.len(),
            "Financial data loaded"
        );

        let mut store = Self::from_records(loaded.records);
        if let Some(source) = store.source.as_mut() {
            source.path = Some(path.to_path_buf());
            source.fingerprint = Some(loaded.fingerprint);
        }

        Ok(store)
    }

    /// Load a store, degrading to an unavailable store on any failure
    pub fn load_or_unavailable(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Financial data unavailable");
                Self::unavailable()
            }
        }
    }

    /// Whether the store was successfully populated
    pub fn is_available(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&SourceInfo> {
        self.source.as_ref()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a value.
    ///
    /// A year label that exists selects that column. Without a year, or when
    /// the label has no column, the most recent year is used.
    pub fn lookup(&self, company: Company, metric: Metric, year: Option<&str>) -> Option<f64> {
        let years = self.table.get(&(company, metric))?;

        let exact = year.and_then(|y| years.get(y).copied());
        let value = exact.or_else(|| latest_year(years).and_then(|y| years.get(y).copied()));

        if value.is_none() {
            debug!(%company, %metric, ?year, "Lookup miss");
        } else if exact.is_none() && year.is_some() {
            debug!(%company, %metric, ?year, "Year not found, using most recent");
        }
        value
    }

    /// Value for exactly this year label, with no fallback
    pub fn value_at(&self, company: Company, metric: Metric, year: &str) -> Option<f64> {
        self.table.get(&(company, metric))?.get(year).copied()
    }

    /// Change of a metric between two years.
    ///
    /// Misses on either year, or a zero baseline, yield `None`.
    pub fn delta(&self, company: Company, metric: Metric, from: &str, to: &str) -> Option<Delta> {
        let start = self.value_at(company, metric, from)?;
        let end = self.value_at(company, metric, to)?;

        if start == 0.0 {
            debug!(%company, %metric, from, "Zero baseline, delta undefined");
            return None;
        }

        let change = end - start;
        let percent = change / start * 100.0;

        if !percent.is_finite() {
            return None;
        }

        Some(Delta { change, percent })
    }
}

/// Most recent year label: numeric labels compare as numbers and sort after
/// any non-numeric ones, which compare lexicographically.
fn latest_year(years: &BTreeMap<String, f64>) -> Option<&String> {
    years
        .keys()
        .max_by(|a, b| match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Greater,
            (Err(_), Ok(_)) => std::cmp::Ordering::Less,
            (Err(_), Err(_)) => a.cmp(b),
        })
}
