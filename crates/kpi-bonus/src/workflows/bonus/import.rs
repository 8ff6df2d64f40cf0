use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{KpiId, RealisasiInputs};

#[derive(Debug)]
pub enum RealisasiImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    DuplicateKpi(KpiId),
}

impl std::fmt::Display for RealisasiImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RealisasiImportError::Io(err) => write!(f, "failed to read realisasi file: {}", err),
            RealisasiImportError::Csv(err) => write!(f, "invalid realisasi CSV data: {}", err),
            RealisasiImportError::DuplicateKpi(id) => {
                write!(f, "realisasi for KPI {} submitted more than once", id.0)
            }
        }
    }
}

impl std::error::Error for RealisasiImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RealisasiImportError::Io(err) => Some(err),
            RealisasiImportError::Csv(err) => Some(err),
            RealisasiImportError::DuplicateKpi(_) => None,
        }
    }
}

impl From<std::io::Error> for RealisasiImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RealisasiImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads period-end realisasi submissions from a `kpi_id,realisasi` CSV export.
pub struct RealisasiImporter;

impl RealisasiImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RealisasiInputs, RealisasiImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Blank values are kept as empty strings and score as zero.
    pub fn from_reader<R: Read>(reader: R) -> Result<RealisasiInputs, RealisasiImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut inputs = RealisasiInputs::new();

        for record in csv_reader.deserialize::<RealisasiRow>() {
            let row = record?;
            let id = KpiId(row.kpi_id);
            if inputs
                .insert(id, row.realisasi.unwrap_or_default())
                .is_some()
            {
                return Err(RealisasiImportError::DuplicateKpi(id));
            }
        }

        Ok(inputs)
    }
}

#[derive(Debug, Deserialize)]
struct RealisasiRow {
    kpi_id: u64,
    #[serde(default)]
    realisasi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_currency_values() {
        let csv = "kpi_id,realisasi\n2,\"Rp 1.250.000,50\"\n11,\" 18,5 \"\n";
        let inputs = RealisasiImporter::from_reader(csv.as_bytes()).expect("csv parses");
        assert_eq!(inputs.get(&KpiId(2)).map(String::as_str), Some("Rp 1.250.000,50"));
        assert_eq!(inputs.get(&KpiId(11)).map(String::as_str), Some("18,5"));
    }

    #[test]
    fn blank_values_become_empty_strings() {
        let csv = "kpi_id,realisasi\n30,\n";
        let inputs = RealisasiImporter::from_reader(csv.as_bytes()).expect("csv parses");
        assert_eq!(inputs.get(&KpiId(30)).map(String::as_str), Some(""));
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let csv = "kpi_id,realisasi\n5,100\n5,200\n";
        match RealisasiImporter::from_reader(csv.as_bytes()) {
            Err(RealisasiImportError::DuplicateKpi(KpiId(5))) => {}
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }
}
