use medcheck_core::error::MedcheckError;
use medcheck_core::model::MedicineRow;
use medcheck_core::Inventory;

use crate::output;

/// Raw form input for a new medicine, validated by the core.
pub struct NewMedicine {
    pub name: String,
    pub expiry: String,
    pub sealed: String,
    pub chemical: String,
    pub std_composition: String,
    pub barcode: String,
    pub amount: String,
    pub batch: String,
}

impl From<NewMedicine> for MedicineRow {
    fn from(m: NewMedicine) -> Self {
        MedicineRow {
            medicine_name: m.name,
            expiry_date: m.expiry,
            is_sealed: m.sealed,
            chemical_composition: m.chemical,
            std_composition: m.std_composition,
            barcode: m.barcode,
            amount: m.amount,
            batch: m.batch,
            ..Default::default()
        }
    }
}

pub fn add(inventory: &Inventory, medicine: NewMedicine) -> Result<(), MedcheckError> {
    let record = inventory.add_medicine(&medicine.into())?;
    println!(
        "Medicine '{}' (barcode {}) added successfully.",
        record.name, record.barcode
    );
    Ok(())
}

pub fn search(inventory: &Inventory, barcode: &str, output_format: &str) -> Result<(), MedcheckError> {
    let rows = inventory.search_by_barcode(barcode)?;
    match output_format {
        "json" => output::json::print(&rows)?,
        _ => output::table::print_medicines(&rows)?,
    }
    Ok(())
}
