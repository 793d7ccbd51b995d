use super::{ensure_file, open_existing, replace_file};
use crate::error::MedcheckError;
use crate::model::{MedicineRow, DERIVED_COLUMNS, MEDICINE_COLUMNS};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The primary medicine store.
#[derive(Debug, Clone)]
pub struct MedicineStore {
    path: PathBuf,
}

impl MedicineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store with only its header row if it is missing.
    pub fn ensure_exists(&self) -> Result<bool, MedcheckError> {
        ensure_file(&self.path, &MEDICINE_COLUMNS)
    }

    /// Load every row. A missing file is an empty store.
    ///
    /// Rows shorter than the header are padded with empty fields, so a stray
    /// hand edit surfaces as a validation failure rather than a load error.
    pub fn load(&self) -> Result<Vec<MedicineRow>, MedcheckError> {
        let Some(file) = open_existing(&self.path)? else {
            return Ok(Vec::new());
        };

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<MedicineRow>, csv::Error>>()?;

        debug!(path = %self.path.display(), rows = rows.len(), "loaded medicine store");
        Ok(rows)
    }

    /// Rewrite the whole store.
    ///
    /// The derived columns are written only when at least one row carries a
    /// derived value.
    pub fn save(&self, rows: &[MedicineRow]) -> Result<(), MedcheckError> {
        let with_derived = rows.iter().any(MedicineRow::has_derived);

        let mut header: Vec<&str> = MEDICINE_COLUMNS.to_vec();
        if with_derived {
            header.extend(DERIVED_COLUMNS);
        }

        replace_file(
            &self.path,
            &header,
            rows.iter().map(|row| row.fields(with_derived)),
        )?;

        info!(path = %self.path.display(), rows = rows.len(), "saved medicine store");
        Ok(())
    }

    /// Append one row and rewrite the store. Returns the new row count.
    pub fn append(&self, row: MedicineRow) -> Result<usize, MedcheckError> {
        let mut rows = self.load()?;
        rows.push(row);
        self.save(&rows)?;
        Ok(rows.len())
    }

    /// All rows whose barcode equals `barcode` (surrounding whitespace ignored).
    pub fn find_by_barcode(&self, barcode: &str) -> Result<Vec<MedicineRow>, MedcheckError> {
        let code = barcode.trim();
        Ok(self
            .load()?
            .into_iter()
            .filter(|row| row.barcode.trim() == code)
            .collect())
    }
}
