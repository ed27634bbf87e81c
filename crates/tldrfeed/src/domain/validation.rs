//! Input checks shared by every repository backend

use super::errors::DomainError;

/// Reject empty or whitespace-only values
pub fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} cannot be blank", field)));
    }
    Ok(())
}
