use crate::error::FieldError;
use crate::model::{Grade, QualityStatus, RejectedRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Grade and status computed for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// chemical / standard composition, in percent.
    pub composition_ratio: Decimal,
    pub grade: Grade,
    pub status: QualityStatus,
}

/// Classification result for a single stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// 1-based data row number in the store (header excluded).
    pub row: usize,
    pub name: String,
    pub barcode: String,
    pub composition_ratio: Decimal,
    pub grade: Grade,
    pub status: QualityStatus,
}

/// A stored row that could not be classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFailure {
    /// 1-based data row number in the store (header excluded).
    pub row: usize,
    /// Name as stored, possibly blank.
    pub name: String,
    pub error: FieldError,
}

/// Full result of one quality check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Date expiry was evaluated against.
    pub checked_on: NaiveDate,
    pub outcomes: Vec<RecordOutcome>,
    pub failures: Vec<RecordFailure>,
    /// Entries appended to the rejection log by this run, in store order.
    pub rejected: Vec<RejectedRecord>,
}

impl QualityReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_pass()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} checked: {} passed, {} rejected, {} skipped",
            self.outcomes.len() + self.failures.len(),
            self.passed(),
            self.rejected_count(),
            self.failures.len()
        )
    }
}
