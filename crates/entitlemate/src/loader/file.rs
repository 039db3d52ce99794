use super::{decode_records, EntitlementSource, FetchError};
use crate::catalog::{normalize_record, EntitlementRecord};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// Spreadsheet export whose header row names the record fields, as
/// published by the upstream sheet (`Name,Headline,...,State,AgeGroup,...`).
#[derive(Debug, Clone)]
pub struct CsvEntitlementSource {
    path: PathBuf,
}

impl CsvEntitlementSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntitlementSource for CsvEntitlementSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<EntitlementRecord>, FetchError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records = parse_csv(bytes.as_slice())?;
        info!(path = %self.path.display(), records = records.len(), "entitlements loaded from csv");
        Ok(records)
    }
}

/// Each row becomes a JSON object keyed by header and goes through the same
/// normalizer as API payloads, so comma-separated cells split into facet sets.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<EntitlementRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let object: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(normalize_record(&object));
    }

    Ok(records)
}

/// Local copy of the array the data API serves (the backend's
/// `entitlements.json` store).
#[derive(Debug, Clone)]
pub struct JsonFileEntitlementSource {
    path: PathBuf,
}

impl JsonFileEntitlementSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntitlementSource for JsonFileEntitlementSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<EntitlementRecord>, FetchError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records = decode_records(&bytes)?;
        info!(path = %self.path.display(), records = records.len(), "entitlements loaded from file");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn csv_rows_normalize_like_api_payloads() {
        let csv = "\u{feff}Name,Headline,GovLink,State,AgeGroup,PaymentType,ValueEstimate\n\
Age Pension,Income support,https://example.gov.au/ap,All,\"65–67, 67–75\",AP,\n";
        let records = parse_csv(Cursor::new(csv)).expect("csv parses");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Age Pension");
        assert_eq!(record.apply_link, "https://example.gov.au/ap");
        assert_eq!(record.age_groups.as_slice(), ["65–67", "67–75"]);
        assert!(record.value_estimate.is_none());
    }

    #[test]
    fn short_rows_leave_trailing_fields_empty() {
        let csv = "Name,Headline,State\nRent Assistance\n";
        let records = parse_csv(Cursor::new(csv)).expect("flexible rows parse");
        assert_eq!(records[0].name, "Rent Assistance");
        assert!(records[0].states.is_empty());
    }

    #[tokio::test]
    async fn missing_file_surfaces_io_error() {
        let source = CsvEntitlementSource::new("./does-not-exist.csv");
        let error = source.fetch().await.expect_err("expected io error");
        assert!(matches!(error, FetchError::Io(_)));
    }
}
