pub mod values;

use crate::error::{Field, FieldError};
use crate::model::{MedicineRecord, MedicineRow};
use rust_decimal::Decimal;
use values::{parse_date, parse_decimal, required_text};

/// Validate a stored or operator-entered row into a typed record.
///
/// Fields are checked in column order and the first failure is returned,
/// naming the offending field. Compositions must not be negative, and the
/// standard composition must also be nonzero so the ratio is defined.
pub fn parse_record(row: &MedicineRow) -> Result<MedicineRecord, FieldError> {
    let name = required_text(Field::MedicineName, &row.medicine_name)?;
    let expiry_date = parse_date(Field::ExpiryDate, &row.expiry_date)?;

    // A zero measurement is a valid grade D, a negative one is not
    let chemical_composition = parse_decimal(Field::ChemicalComposition, &row.chemical_composition)?;
    if chemical_composition < Decimal::ZERO {
        return Err(FieldError::Negative {
            field: Field::ChemicalComposition,
        });
    }

    // The standard is the divisor of the ratio: it must be strictly positive
    let std_composition = parse_decimal(Field::StdComposition, &row.std_composition)?;
    if std_composition.is_zero() {
        return Err(FieldError::Zero {
            field: Field::StdComposition,
        });
    }
    if std_composition < Decimal::ZERO {
        return Err(FieldError::Negative {
            field: Field::StdComposition,
        });
    }

    // Barcode is the search key
    let barcode = required_text(Field::Barcode, &row.barcode)?;

    let amount = parse_decimal(Field::Amount, &row.amount)?;
    if amount < Decimal::ZERO {
        return Err(FieldError::Negative {
            field: Field::Amount,
        });
    }

    Ok(MedicineRecord {
        name,
        expiry_date,
        // Any value other than "yes" reads as unsealed; not an error
        is_sealed: row.is_sealed.trim().to_string(),
        chemical_composition,
        std_composition,
        barcode,
        amount,
        batch: row.batch.trim().to_string(),
    })
}
