use medcheck_core::error::MedcheckError;
use medcheck_core::Inventory;

pub fn register(inventory: &Inventory, username: &str, password: &str) -> Result<(), MedcheckError> {
    inventory.register(username, password)?;
    println!("Registered '{}' successfully.", username.trim());
    Ok(())
}

pub fn login(inventory: &Inventory, username: &str, password: &str) -> Result<(), MedcheckError> {
    inventory.login(username, password)?;
    println!("Login successful.");
    Ok(())
}
