use std::io::Read;
use std::path::Path;

use super::domain::ApplicantRecord;

/// Column that labels a row instead of contributing an applicant attribute.
pub const ID_COLUMN: &str = "id";

#[derive(Debug, thiserror::Error)]
pub enum ApplicantImportError {
    #[error("failed to read applicant file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: '{field}' has non-numeric value '{value}'")]
    InvalidValue {
        line: u64,
        field: String,
        value: String,
    },
}

/// One applicant read from a batch file.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRow {
    pub label: String,
    pub applicant: ApplicantRecord,
}

pub struct ApplicantImporter;

impl ApplicantImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicantRow>, ApplicantImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Headers name applicant fields. Blank cells leave the field absent.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicantRow>, ApplicantImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut rows = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Quoted cells may span lines, so report where the record starts.
            let line = record
                .position()
                .map_or(index as u64 + 2, |position| position.line());
            let mut label = None;

            let applicant = headers
                .iter()
                .zip(record.iter())
                .filter_map(|(header, cell)| {
                    if header.eq_ignore_ascii_case(ID_COLUMN) {
                        label = Some(cell.to_string());
                        return None;
                    }
                    if cell.is_empty() {
                        return None;
                    }
                    Some(parse_cell(line, header, cell).map(|value| (header.to_string(), value)))
                })
                .collect::<Result<ApplicantRecord, _>>()?;

            let label = label
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| format!("row {}", index + 1));
            rows.push(ApplicantRow { label, applicant });
        }

        Ok(rows)
    }
}

fn parse_cell(line: u64, field: &str, cell: &str) -> Result<f64, ApplicantImportError> {
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ApplicantImportError::InvalidValue {
            line,
            field: field.to_string(),
            value: cell.to_string(),
        })
}
