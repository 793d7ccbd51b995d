use super::{ensure_file, open_existing};
use crate::error::MedcheckError;
use crate::model::RejectedRecord;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REJECTION_COLUMNS: [&str; 4] = ["medicine_name", "barcode", "reason", "expiry_date"];

/// Append-only log of rejected medicines.
///
/// Entries are never rewritten or de-duplicated: checking an unchanged
/// rejected record twice logs it twice.
#[derive(Debug, Clone)]
pub struct RejectionLog {
    path: PathBuf,
}

impl RejectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_exists(&self) -> Result<bool, MedcheckError> {
        ensure_file(&self.path, &REJECTION_COLUMNS)
    }

    /// Append entries to the end of the log.
    ///
    /// The header is written only when the file is new or empty.
    pub fn append(&self, records: &[RejectedRecord]) -> Result<usize, MedcheckError> {
        if records.is_empty() {
            return Ok(0);
        }

        let has_content = std::fs::metadata(&self.path)
            .map(|m| m.len() > 0)
            .unwrap_or(false);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(!has_content)
            .from_writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!(path = %self.path.display(), appended = records.len(), "appended to rejection log");
        Ok(records.len())
    }

    /// Every logged entry, oldest first. A missing log is empty.
    pub fn load(&self) -> Result<Vec<RejectedRecord>, MedcheckError> {
        let Some(file) = open_existing(&self.path)? else {
            return Ok(Vec::new());
        };
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let records = reader
            .deserialize()
            .collect::<Result<Vec<RejectedRecord>, csv::Error>>()?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RejectReason;
    use chrono::NaiveDate;

    fn entry(name: &str, reason: RejectReason) -> RejectedRecord {
        RejectedRecord {
            medicine_name: name.into(),
            barcode: "8901234567890".into(),
            reason,
            expiry_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        }
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let log = RejectionLog::new(dir.path().join("rejected_medicines.csv"));

        log.append(&[entry("Cough syrup", RejectReason::Expired)])
            .unwrap();
        log.append(&[entry("Antacid", RejectReason::LowGrade)])
            .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "medicine_name,barcode,reason,expiry_date\n\
             Cough syrup,8901234567890,Expired,2025-02-28\n\
             Antacid,8901234567890,LowGrade,2025-02-28\n"
        );
    }

    #[test]
    fn test_append_after_bootstrap_keeps_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = RejectionLog::new(dir.path().join("rejected_medicines.csv"));
        log.ensure_exists().unwrap();
        log.append(&[entry("Antacid", RejectReason::Unsealed)])
            .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("medicine_name").count(), 1);
        assert_eq!(log.load().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_append_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = RejectionLog::new(dir.path().join("rejected_medicines.csv"));
        assert_eq!(log.append(&[]).unwrap(), 0);
        assert!(!log.path().exists());
    }

    #[test]
    fn test_load_accepts_spaced_reason() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rejected_medicines.csv");
        std::fs::write(
            &path,
            "medicine_name,barcode,reason,expiry_date\nAntacid,42,Low Grade,2025-02-28\n",
        )
        .unwrap();

        let records = RejectionLog::new(&path).load().unwrap();
        assert_eq!(records, vec![RejectedRecord {
            barcode: "42".into(),
            ..entry("Antacid", RejectReason::LowGrade)
        }]);
    }
}
