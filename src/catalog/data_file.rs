use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::files;
use crate::core::error::{Result, ToolAuditError};
use crate::core::types::Tool;

/// The JavaScript file backing the directory, split around its array literal.
///
/// Everything before the first `[` and after the last `]` is kept verbatim so a
/// rewrite only touches the array itself.
#[derive(Debug, Clone)]
pub struct ToolDataFile {
    path: PathBuf,
    prefix: String,
    suffix: String,
    tools: Vec<Tool>,
}

/// Byte range of the array literal: first `[` up to and including the last `]`.
fn array_bounds(content: &str) -> Result<(usize, usize)> {
    let bytes = content.as_bytes();
    let start = memchr::memchr(b'[', bytes)
        .ok_or_else(|| ToolAuditError::DataFile("no '[' found in tool data".to_string()))?;
    let end = memchr::memrchr(b']', bytes)
        .filter(|&end| end > start)
        .ok_or_else(|| {
            ToolAuditError::DataFile("no closing ']' after the array start".to_string())
        })?;
    Ok((start, end + 1))
}

impl ToolDataFile {
    /// Split `content` into prefix, parsed tools and suffix.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let (start, end) = array_bounds(content)?;
        let tools: Vec<Tool> = serde_json::from_str(&content[start..end])?;

        Ok(Self {
            path: path.into(),
            prefix: content[..start].to_string(),
            suffix: content[end..].to_string(),
            tools,
        })
    }

    /// Read and parse the data file. A missing file is reported as `FileNotFound`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ToolAuditError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let data = Self::parse(path, &content)?;
        info!(
            "Loaded {} tools from {}",
            data.tools.len(),
            path.display()
        );
        Ok(data)
    }

    /// Prefix, pretty-printed array (2-space indent) and suffix.
    pub fn render(&self) -> Result<String> {
        let array = serde_json::to_string_pretty(&self.tools)?;
        Ok(format!("{}{}{}", self.prefix, array, self.suffix))
    }

    /// Write the file back in place.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.render()?)?;
        info!("Saved {} tools to {}", self.tools.len(), self.path.display());
        Ok(())
    }

    /// Copy the current file on disk to `<name>.backup.<timestamp>` next to it.
    pub fn backup(&self) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format(files::BACKUP_TIMESTAMP_FORMAT);
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "toolData.js".to_string());
        let backup_path = self
            .path
            .with_file_name(format!("{file_name}.{}.{timestamp}", files::BACKUP_MARKER));

        fs::copy(&self.path, &backup_path)?;
        debug!("Backed up {} to {}", self.path.display(), backup_path.display());
        Ok(backup_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut Vec<Tool> {
        &mut self.tools
    }
}

/// Decide which data file to use.
///
/// An explicit path always wins and must exist. Otherwise the well-known
/// locations under `base` are tried, then the configured path.
pub fn locate_tool_data(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    base: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.exists() {
            Ok(path.to_path_buf())
        } else {
            Err(ToolAuditError::FileNotFound(path.display().to_string()))
        };
    }

    let mut searched: Vec<PathBuf> = files::TOOL_DATA_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .collect();
    if let Some(path) = configured {
        searched.push(path.to_path_buf());
    }

    if let Some(found) = searched.iter().find(|path| path.exists()) {
        info!("Found tool data at {}", found.display());
        return Ok(found.clone());
    }

    let listing = searched
        .iter()
        .map(|path| format!("  - {}", path.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(ToolAuditError::FileNotFound(format!(
        "could not find toolData.js. Searched in:\n{listing}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const SAMPLE: &str = r#"// Generated from the sheet
export const TOOL_DATA = [
  {
    "id": "1",
    "name": "Pitch",
    "source_url": "https://pitch.com",
    "type": "personal"
  },
  {
    "id": "2",
    "name": "Cohere",
    "source_url": "https://cohere.com",
    "type": "enterprise",
    "sector": "Model Hubs & Customization"
  }
];

export default TOOL_DATA;
"#;

    #[test]
    fn test_parse_splits_prefix_and_suffix() -> TestResult {
        let data = ToolDataFile::parse("toolData.js", SAMPLE)?;

        assert_eq!(data.prefix(), "// Generated from the sheet\nexport const TOOL_DATA = ");
        assert_eq!(data.suffix(), ";\n\nexport default TOOL_DATA;\n");
        assert_eq!(data.tools().len(), 2);
        assert_eq!(data.tools()[1].name(), "Cohere");
        Ok(())
    }

    #[test]
    fn test_render_round_trip_is_identical() -> TestResult {
        let data = ToolDataFile::parse("toolData.js", SAMPLE)?;
        assert_eq!(data.render()?, SAMPLE);
        Ok(())
    }

    #[test]
    fn test_render_after_edit_only_changes_edited_field() -> TestResult {
        let mut data = ToolDataFile::parse("toolData.js", SAMPLE)?;
        data.tools_mut()[0].set_source_url("https://pitch.com/app");

        let reparsed = ToolDataFile::parse("toolData.js", &data.render()?)?;
        let original = ToolDataFile::parse("toolData.js", SAMPLE)?;

        assert_eq!(reparsed.tools()[0].source_url(), "https://pitch.com/app");
        assert_eq!(reparsed.tools()[1], original.tools()[1]);
        for (key, value) in original.tools()[0].fields() {
            if key != "source_url" {
                assert_eq!(reparsed.tools()[0].fields().get(key), Some(value));
            }
        }
        Ok(())
    }

    #[test]
    fn test_parse_without_array_fails() {
        let result = ToolDataFile::parse("toolData.js", "export const TOOL_DATA = {};");
        assert!(matches!(result, Err(ToolAuditError::DataFile(_))));
    }

    #[test]
    fn test_parse_with_closing_bracket_before_opening_fails() {
        let result = ToolDataFile::parse("toolData.js", "] nothing here [");
        assert!(matches!(result, Err(ToolAuditError::DataFile(_))));
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        let result = ToolDataFile::parse("toolData.js", "export const TOOL_DATA = [{name: 'x'}];");
        assert!(matches!(result, Err(ToolAuditError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ToolDataFile::load("definitely/not/here/toolData.js");
        assert!(matches!(result, Err(ToolAuditError::FileNotFound(_))));
    }

    #[test]
    fn test_save_and_backup() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("toolData.js");
        fs::File::create(&path)?.write_all(SAMPLE.as_bytes())?;

        let mut data = ToolDataFile::load(&path)?;
        let backup = data.backup()?;
        data.tools_mut()[1].set_name("Cohere AI");
        data.save()?;

        let backup_name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(backup_name.starts_with("toolData.js.backup."));
        assert_eq!(fs::read_to_string(&backup)?, SAMPLE);
        assert!(fs::read_to_string(&path)?.contains("\"name\": \"Cohere AI\""));
        Ok(())
    }

    #[test]
    fn test_locate_explicit_path() -> TestResult {
        let file = tempfile::NamedTempFile::new()?;
        let found = locate_tool_data(Some(file.path()), None, Path::new("."))?;
        assert_eq!(found, file.path());

        let missing = locate_tool_data(Some(Path::new("nope/toolData.js")), None, Path::new("."));
        assert!(matches!(missing, Err(ToolAuditError::FileNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_locate_searches_candidates() -> TestResult {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("frontend/src/app/utils");
        fs::create_dir_all(&nested)?;
        fs::write(nested.join("toolData.js"), "[]")?;

        let found = locate_tool_data(None, None, dir.path())?;
        assert_eq!(found, nested.join("toolData.js"));
        Ok(())
    }

    #[test]
    fn test_locate_reports_searched_paths() -> TestResult {
        let dir = tempfile::tempdir()?;
        let err = locate_tool_data(None, Some(Path::new("custom/toolData.js")), dir.path())
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("frontend/src/app/utils/toolData.js"));
        assert!(message.contains("custom/toolData.js"));
        Ok(())
    }
}
