//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod analyze;
pub mod quote;
pub mod sensitivity;
pub mod validate;

use std::path::Path;

use crate::{CliError, Result};

/// Fails with `FileNotFound` unless `path` exists.
pub(crate) fn require_file(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()))
    }
}
