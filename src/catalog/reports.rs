use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::core::error::{Result, ToolAuditError};

/// Read a JSON report. A missing file is reported as `FileNotFound`.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ToolAuditError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a report as pretty JSON (2-space indent), replacing any existing file.
pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
