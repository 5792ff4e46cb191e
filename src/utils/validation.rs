use crate::utils::error::{RegistrarError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if display.is_empty() {
        return Err(RegistrarError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(RegistrarError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    validate_path(field_name, Path::new(name))
}

pub fn validate_separator(field_name: &str, separator: char) -> Result<()> {
    if separator == '\n' || separator == '\r' {
        return Err(RegistrarError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: separator.escape_default().to_string(),
            reason: "Separator cannot be a line terminator".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistrarError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
