//! Factory functions for creating register loaders.

use std::path::Path;
use std::sync::Arc;

use super::RegisterLoader;
use crate::error::{ReconcilerError, Result};

/// Create a register loader from a register name.
///
/// # Errors
/// Returns an error for unknown register names.
pub fn register_from_name(name: &str) -> Result<Arc<dyn RegisterLoader>> {
    match name.to_lowercase().as_str() {
        "rucc" => Ok(Arc::new(super::rucc::RuccRegister::new())),
        "hpsa" => Ok(Arc::new(super::hpsa::HpsaRegister::new())),
        "pqi" => Ok(Arc::new(super::pqi::PqiRegister::new())),
        _ => Err(ReconcilerError::Metadata(format!("Unknown register: {name}"))),
    }
}

/// Create a register loader based on a path.
///
/// Infers the register from the file or directory name.
///
/// # Errors
/// Returns an error when no register name pattern matches.
pub fn register_from_path(path: &Path) -> Result<Arc<dyn RegisterLoader>> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if name.contains("rucc") || name.contains("rural") {
        register_from_name("rucc")
    } else if name.contains("hpsa") || name.contains("shortage") {
        register_from_name("hpsa")
    } else if name.contains("pqi") || name.contains("hosp") {
        register_from_name("pqi")
    } else {
        Err(ReconcilerError::Metadata(format!(
            "Cannot infer register from path: {}",
            path.display()
        )))
    }
}
