use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for every date column on disk.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Primary columns of the medicine store, in file order.
pub const MEDICINE_COLUMNS: [&str; 8] = [
    "medicine_name",
    "expiry_date",
    "is_sealed",
    "chemical_composition",
    "std_composition",
    "barcode",
    "amount",
    "batch",
];

/// Columns appended to the medicine store by a quality check.
pub const DERIVED_COLUMNS: [&str; 3] = ["composition_ratio", "grade", "quality_status"];

/// One row of the medicine store, exactly as stored on disk.
///
/// Rows stay textual so a malformed entry can be loaded, reported and
/// written back untouched. Use [`crate::parsing::parse_record`] to get a
/// typed [`MedicineRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicineRow {
    pub medicine_name: String,
    pub expiry_date: String,
    pub is_sealed: String,
    pub chemical_composition: String,
    pub std_composition: String,
    pub barcode: String,
    pub amount: String,
    pub batch: String,
    pub composition_ratio: Option<String>,
    pub grade: Option<String>,
    pub quality_status: Option<String>,
}

impl MedicineRow {
    /// True if any derived column carries a value.
    pub fn has_derived(&self) -> bool {
        self.composition_ratio.is_some() || self.grade.is_some() || self.quality_status.is_some()
    }

    pub fn clear_derived(&mut self) {
        self.composition_ratio = None;
        self.grade = None;
        self.quality_status = None;
    }

    /// Field values in file order, optionally followed by the derived columns.
    pub fn fields(&self, with_derived: bool) -> Vec<&str> {
        let mut fields = vec![
            self.medicine_name.as_str(),
            self.expiry_date.as_str(),
            self.is_sealed.as_str(),
            self.chemical_composition.as_str(),
            self.std_composition.as_str(),
            self.barcode.as_str(),
            self.amount.as_str(),
            self.batch.as_str(),
        ];
        if with_derived {
            fields.push(self.composition_ratio.as_deref().unwrap_or(""));
            fields.push(self.grade.as_deref().unwrap_or(""));
            fields.push(self.quality_status.as_deref().unwrap_or(""));
        }
        fields
    }
}

/// A validated medicine record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub name: String,
    pub expiry_date: NaiveDate,
    /// Operator-entered seal flag, kept verbatim.
    pub is_sealed: String,
    pub chemical_composition: Decimal,
    pub std_composition: Decimal,
    pub barcode: String,
    pub amount: Decimal,
    pub batch: String,
}

impl MedicineRecord {
    /// Only a case-insensitive "yes" (surrounding whitespace ignored) counts as sealed.
    pub fn is_sealed(&self) -> bool {
        self.is_sealed.trim().to_lowercase() == "yes"
    }

    pub fn to_row(&self) -> MedicineRow {
        MedicineRow {
            medicine_name: self.name.clone(),
            expiry_date: self.expiry_date.format(DATE_FORMAT).to_string(),
            is_sealed: self.is_sealed.clone(),
            chemical_composition: self.chemical_composition.to_string(),
            std_composition: self.std_composition.to_string(),
            barcode: self.barcode.clone(),
            amount: self.amount.to_string(),
            batch: self.batch.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Grade::A | Grade::B)
    }

    pub fn from_str_loose(s: &str) -> Option<Grade> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RejectReason {
    Expired,
    Unsealed,
    LowGrade,
}

impl RejectReason {
    /// Accepts both `LowGrade` and the spaced `Low Grade` spelling.
    pub fn from_str_loose(s: &str) -> Option<RejectReason> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match compact.as_str() {
            "expired" => Some(RejectReason::Expired),
            "unsealed" => Some(RejectReason::Unsealed),
            "lowgrade" => Some(RejectReason::LowGrade),
            _ => None,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Expired => write!(f, "Expired"),
            RejectReason::Unsealed => write!(f, "Unsealed"),
            RejectReason::LowGrade => write!(f, "LowGrade"),
        }
    }
}

impl TryFrom<String> for RejectReason {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        RejectReason::from_str_loose(&s).ok_or_else(|| format!("unknown reject reason '{s}'"))
    }
}

impl From<RejectReason> for String {
    fn from(reason: RejectReason) -> String {
        reason.to_string()
    }
}

/// Outcome of the quality rule for one record, written as `PASS` or `REJECTED:<reason>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QualityStatus {
    Pass,
    Rejected(RejectReason),
}

impl QualityStatus {
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            QualityStatus::Pass => None,
            QualityStatus::Rejected(reason) => Some(*reason),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, QualityStatus::Pass)
    }

    pub fn from_str_loose(s: &str) -> Option<QualityStatus> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Some(QualityStatus::Pass);
        }
        let (prefix, reason) = s.split_once(':')?;
        if !prefix.trim().eq_ignore_ascii_case("rejected") {
            return None;
        }
        RejectReason::from_str_loose(reason).map(QualityStatus::Rejected)
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityStatus::Pass => write!(f, "PASS"),
            QualityStatus::Rejected(reason) => write!(f, "REJECTED:{reason}"),
        }
    }
}

impl TryFrom<String> for QualityStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        QualityStatus::from_str_loose(&s).ok_or_else(|| format!("unknown quality status '{s}'"))
    }
}

impl From<QualityStatus> for String {
    fn from(status: QualityStatus) -> String {
        status.to_string()
    }
}

/// Entry of the rejection log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub medicine_name: String,
    pub barcode: String,
    pub reason: RejectReason,
    pub expiry_date: NaiveDate,
}

/// A registered operator. The password is stored as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}
