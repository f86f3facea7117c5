//! Source file discovery for package directories.

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Suffix shared by every file valforge writes.
const GENERATED_SUFFIX: &str = "validation.gen.rs";

/// Lists the Rust source files of a directory, without recursing.
///
/// Previously generated validation files are skipped. Returns files sorted
/// by filename.
pub fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| ExtractError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| ExtractError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_rust = path.extension().is_some_and(|ext| ext == "rs");
        let is_generated = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(GENERATED_SUFFIX));
        if is_rust && !is_generated {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_sorted_sources_without_generated_files() {
        let dir = TempDir::new().unwrap();
        for name in ["users.rs", "accounts.rs", "users_validation.gen.rs", "validation.gen.rs", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.rs")).unwrap();

        let files = list_source_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["accounts.rs", "users.rs"]);
    }

    #[test]
    fn missing_directory() {
        let err = list_source_files(Path::new("/nonexistent/valforge/src")).unwrap_err();
        assert!(matches!(err, ExtractError::DirectoryNotFound { .. }));
    }
}
