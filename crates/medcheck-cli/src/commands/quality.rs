use chrono::NaiveDate;
use medcheck_core::error::MedcheckError;
use medcheck_core::Inventory;

use crate::output;

pub fn check(inventory: &Inventory, today: NaiveDate, output_format: &str) -> Result<(), MedcheckError> {
    let report = inventory.run_quality_check(today)?;
    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report)?,
    }
    Ok(())
}

pub fn rejected(inventory: &Inventory, output_format: &str) -> Result<(), MedcheckError> {
    let records = inventory.view_rejected()?;
    match output_format {
        "json" => output::json::print(&records)?,
        _ => output::table::print_rejected(&records)?,
    }
    Ok(())
}
