use medcheck_core::error::MedcheckError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), MedcheckError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
