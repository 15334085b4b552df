//! CSV data source
//!
//! Expected layout: `Company`, `Metric`, then one column per year label.
//! Values are millions of USD and may carry a `$` or thousands separators.

use crate::error::ResponderError;
use crate::models::{Company, Metric, Record};
use crate::Result;
use csv::StringRecord;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

const COMPANY_HEADER: &str = "Company";
const METRIC_HEADER: &str = "Metric";

/// Largest accepted magnitude, in millions of USD
const MAX_ABS_VALUE: f64 = 1e12;

pub(super) struct LoadedSource {
    pub records: Vec<Record>,
    pub fingerprint: String,
}

pub(super) fn read_csv(path: &Path) -> Result<LoadedSource> {
    let bytes = std::fs::read(path).map_err(|e| {
        ResponderError::SourceUnavailable(format!("Failed to read '{}': {}", path.display(), e))
    })?;

    let fingerprint = fingerprint(&bytes);
    let records = parse_csv(&bytes)?;

    Ok(LoadedSource {
        records,
        fingerprint,
    })
}

/// SHA256 hex digest of raw source bytes
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let company_idx = column_index(&headers, COMPANY_HEADER)?;
    let metric_idx = column_index(&headers, METRIC_HEADER)?;

    let year_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, name)| *idx != company_idx && *idx != metric_idx && !name.is_empty())
        .collect();

    if year_columns.is_empty() {
        return Err(ResponderError::MalformedSource(
            "No year columns found".to_string(),
        ));
    }

    let mut records = Vec::new();

    for (line, row) in reader.records().enumerate() {
        let row = row?;

        let company_label = row.get(company_idx).unwrap_or_default();
        let metric_label = row.get(metric_idx).unwrap_or_default();

        let (Some(company), Some(metric)) =
            (Company::from_label(company_label), Metric::from_label(metric_label))
        else {
            debug!(
                row = line + 1,
                company = company_label,
                metric = metric_label,
                "Skipping row with unknown company or metric"
            );
            continue;
        };

        for (idx, year) in &year_columns {
            let raw = row.get(*idx).unwrap_or_default();
            match parse_value(raw) {
                Some(value) => records.push(Record::new(company, metric, *year, value)),
                None => debug!(row = line + 1, year = *year, raw, "Skipping empty or non-numeric cell"),
            }
        }
    }

    Ok(records)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ResponderError::MalformedSource(format!("Missing '{}' column", name)))
}

fn parse_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= MAX_ABS_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Company,Metric,2023,2024
Microsoft,Total Revenue(in millions),\"211,915\",\"245,122\"
Tesla,Net Income(in millions),14997,7153
Apple,Gross Margin(in millions),1,2
Apple,Total Assets(in millions),,364980
";

    #[test]
    fn test_parse_known_rows() {
        let records = parse_csv(SAMPLE.as_bytes()).unwrap();

        assert!(records.contains(&Record::new(
            Company::Microsoft,
            Metric::TotalRevenue,
            "2024",
            245122.0
        )));
        assert!(records.contains(&Record::new(Company::Tesla, Metric::NetIncome, "2023", 14997.0)));
    }

    #[test]
    fn test_unknown_metric_and_blank_cells_skipped() {
        let records = parse_csv(SAMPLE.as_bytes()).unwrap();

        // 2 + 2 + 0 (unknown metric) + 1 (blank 2023 cell)
        assert_eq!(records.len(), 5);
        assert!(!records
            .iter()
            .any(|r| r.company == Company::Apple && r.metric == Metric::TotalAssets && r.year == "2023"));
    }

    #[test]
    fn test_missing_metric_header_is_malformed() {
        let err = parse_csv(b"Company,2024\nApple,1\n").unwrap_err();
        assert!(matches!(err, ResponderError::MalformedSource(_)));
    }

    #[test]
    fn test_no_year_columns_is_malformed() {
        let err = parse_csv(b"Company,Metric\nApple,Net Income(in millions)\n").unwrap_err();
        assert!(matches!(err, ResponderError::MalformedSource(_)));
    }

    #[test]
    fn test_parse_value_variants() {
        assert_eq!(parse_value("1,234"), Some(1234.0));
        assert_eq!(parse_value("$5,000.5"), Some(5000.5));
        assert_eq!(parse_value("-42"), Some(-42.0));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("n/a"), None);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert_eq!(parse_value("1e12"), Some(1e12));
        assert_eq!(parse_value("1e20"), None);
        assert_eq!(parse_value("-1e13"), None);
        assert_eq!(parse_value("inf"), None);

        let records = parse_csv(b"Company,Metric,2024\nApple,Total Revenue(in millions),1e20\n").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let path = std::env::temp_dir().join("financial-query-responder-missing.csv");
        let _ = std::fs::remove_file(&path);

        let err = read_csv(&path).err().unwrap();
        assert!(matches!(err, ResponderError::SourceUnavailable(_)));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint(SAMPLE.as_bytes()), fingerprint(SAMPLE.as_bytes()));
        assert_ne!(fingerprint(b"a"), fingerprint(b"b"));
        assert_eq!(fingerprint(b"").len(), 64);
    }
}
