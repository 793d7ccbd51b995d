pub mod auth;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod parsing;
pub mod store;

use chrono::NaiveDate;
use classify::QualityReport;
use config::Config;
use error::MedcheckError;
use model::{MedicineRecord, MedicineRow, RejectedRecord};
use store::{MedicineStore, RejectionLog, UserStore};
use tracing::info;

/// The operator-facing API over the three stores.
#[derive(Debug, Clone)]
pub struct Inventory {
    medicines: MedicineStore,
    users: UserStore,
    rejections: RejectionLog,
}

impl Inventory {
    /// Open the stores named by `config`, creating the data directory and any
    /// missing store file (header row only).
    pub fn open(config: &Config) -> Result<Self, MedcheckError> {
        config.validate()?;
        std::fs::create_dir_all(&config.data_dir)?;

        let inventory = Self::with_stores(
            MedicineStore::new(config.medicine_path()),
            UserStore::new(config.users_path()),
            RejectionLog::new(config.rejected_path()),
        );
        inventory.medicines.ensure_exists()?;
        inventory.users.ensure_exists()?;
        inventory.rejections.ensure_exists()?;
        Ok(inventory)
    }

    /// Assemble an inventory from explicit stores without touching the disk.
    pub fn with_stores(medicines: MedicineStore, users: UserStore, rejections: RejectionLog) -> Self {
        Self {
            medicines,
            users,
            rejections,
        }
    }

    pub fn medicines(&self) -> &MedicineStore {
        &self.medicines
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn rejections(&self) -> &RejectionLog {
        &self.rejections
    }

    pub fn register(&self, username: &str, password: &str) -> Result<(), MedcheckError> {
        auth::register(&self.users, username, password)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<(), MedcheckError> {
        auth::login(&self.users, username, password)
    }

    /// Validate operator input and append it to the medicine store.
    ///
    /// The stored row is the canonical form of the validated record (trimmed
    /// text, ISO date, plain decimals).
    pub fn add_medicine(&self, input: &MedicineRow) -> Result<MedicineRecord, MedcheckError> {
        let record = parsing::parse_record(input)?;
        let count = self.medicines.append(record.to_row())?;
        info!(name = %record.name, barcode = %record.barcode, rows = count, "added medicine");
        Ok(record)
    }

    /// Run the quality check over the whole store as of `today`.
    ///
    /// Rewrites the store with the derived columns and appends this run's
    /// rejections to the log. An empty store is reported as
    /// [`MedcheckError::EmptyDataset`] and nothing is written.
    pub fn run_quality_check(&self, today: NaiveDate) -> Result<QualityReport, MedcheckError> {
        let mut rows = self.medicines.load()?;
        let report = classify::classify(&rows, today)?;

        classify::annotate_rows(&mut rows, &report);
        self.medicines.save(&rows)?;
        self.rejections.append(&report.rejected)?;

        info!(
            checked_on = %today,
            passed = report.passed(),
            rejected = report.rejected_count(),
            skipped = report.failures.len(),
            "quality check complete"
        );
        Ok(report)
    }

    /// Every stored row carrying `barcode`.
    pub fn search_by_barcode(&self, barcode: &str) -> Result<Vec<MedicineRow>, MedcheckError> {
        let found = self.medicines.find_by_barcode(barcode)?;
        if found.is_empty() {
            return Err(MedcheckError::NotFound {
                barcode: barcode.trim().to_string(),
            });
        }
        Ok(found)
    }

    /// The full rejection log.
    pub fn view_rejected(&self) -> Result<Vec<RejectedRecord>, MedcheckError> {
        let records = self.rejections.load()?;
        if records.is_empty() {
            return Err(MedcheckError::EmptyDataset(
                "no rejected medicines found".into(),
            ));
        }
        Ok(records)
    }
}
