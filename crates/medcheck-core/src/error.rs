use serde::{Deserialize, Serialize};
use std::fmt;

/// A column of the medicine store that operator input is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    MedicineName,
    ExpiryDate,
    IsSealed,
    ChemicalComposition,
    StdComposition,
    Barcode,
    Amount,
    Batch,
}

impl Field {
    /// Column name as it appears in the store header.
    pub fn column(&self) -> &'static str {
        match self {
            Field::MedicineName => "medicine_name",
            Field::ExpiryDate => "expiry_date",
            Field::IsSealed => "is_sealed",
            Field::ChemicalComposition => "chemical_composition",
            Field::StdComposition => "std_composition",
            Field::Barcode => "barcode",
            Field::Amount => "amount",
            Field::Batch => "batch",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Why a single field of a medicine row was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{field} is required")]
    Missing { field: Field },

    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: Field, value: String },

    #[error("{field} is not a date (expected YYYY-MM-DD): '{value}'")]
    NotADate { field: Field, value: String },

    #[error("{field} must not be zero")]
    Zero { field: Field },

    #[error("{field} must not be negative")]
    Negative { field: Field },

    #[error("composition ratio cannot be represented for {field}")]
    Overflow { field: Field },
}

impl FieldError {
    /// The field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            FieldError::Missing { field }
            | FieldError::NotANumber { field, .. }
            | FieldError::NotADate { field, .. }
            | FieldError::Zero { field }
            | FieldError::Negative { field }
            | FieldError::Overflow { field } => *field,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MedcheckError {
    #[error("invalid medicine data: {0}")]
    Validation(#[from] FieldError),

    #[error("username '{username}' already exists")]
    DuplicateUser { username: String },

    #[error("username and password are both required")]
    MissingFields,

    #[error("invalid username or password")]
    AuthFailed,

    #[error("no medicine found with barcode '{barcode}'")]
    NotFound { barcode: String },

    #[error("{0}")]
    EmptyDataset(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
