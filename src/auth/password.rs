use crate::error::{AppError, Result};

pub fn hash_password(password: &str) -> Result<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<()> {
    let valid = bcrypt::verify(password, password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }
    Ok(())
}
