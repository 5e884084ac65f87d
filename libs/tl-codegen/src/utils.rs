use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Write generated files to the given output directory.
/// Creates the directory and any nested subdirectories if they do not exist.
/// Existing files are overwritten.
pub fn write_modules(output_dir: &Path, modules: &BTreeMap<String, String>) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    for (filename, contents) in modules {
        let path = output_dir.join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        tracing::trace!(path = %path.display(), "wrote generated file");
    }

    tracing::debug!(
        files = modules.len(),
        dir = %output_dir.display(),
        "wrote generated files"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_modules_creates_nested_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Generated");

        let mut files = BTreeMap::new();
        files.insert("TdApi.swift".to_string(), "old".to_string());
        files.insert("Models/Ok.swift".to_string(), "ok".to_string());
        write_modules(&out, &files).unwrap();

        files.insert("TdApi.swift".to_string(), "new".to_string());
        write_modules(&out, &files).unwrap();

        assert_eq!(fs::read_to_string(out.join("TdApi.swift")).unwrap(), "new");
        assert_eq!(fs::read_to_string(out.join("Models/Ok.swift")).unwrap(), "ok");
    }
}
