//! Build directory handling

use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::BuildError;

/// Total size in bytes of the regular files below `path`
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .sum()
}

/// Recursively remove a directory.
///
/// Returns the number of bytes freed, or `None` when there was nothing to
/// remove. A missing directory is not an error.
pub fn remove_dir(path: &Path) -> Result<Option<u64>, BuildError> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(BuildError::filesystem("inspect", path, e)),
    };

    if !metadata.is_dir() {
        return Err(BuildError::filesystem(
            "remove",
            path,
            std::io::Error::new(ErrorKind::Other, "path exists but is not a directory"),
        ));
    }

    let size = dir_size(path);
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(Some(size)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(BuildError::filesystem("remove", path, e)),
    }
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir_all(path).map_err(|e| BuildError::filesystem("create", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_remove_dir_with_contents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let build = temp_dir.path().join("build");
        fs::create_dir_all(build.join("nested")).unwrap();
        fs::write(build.join("CMakeCache.txt"), b"cache").unwrap();
        fs::write(build.join("nested/obj.o"), b"0123456789").unwrap();

        let freed = remove_dir(&build).unwrap();
        assert_eq!(freed, Some(15));
        assert!(!build.exists());
    }

    #[test]
    fn test_remove_missing_dir_is_not_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let build = temp_dir.path().join("build");
        assert_eq!(remove_dir(&build).unwrap(), None);
    }

    #[test]
    fn test_remove_refuses_regular_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let build = temp_dir.path().join("build");
        fs::write(&build, b"not a dir").unwrap();

        let err = remove_dir(&build).unwrap_err();
        assert!(matches!(err, BuildError::Filesystem { operation: "remove", .. }));
        assert!(build.exists());
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let build = temp_dir.path().join("build");

        ensure_dir(&build).unwrap();
        fs::write(build.join("keep.txt"), b"keep").unwrap();
        ensure_dir(&build).unwrap();

        assert!(build.join("keep.txt").exists());
    }

    #[test]
    fn test_ensure_dir_reports_path_on_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        let err = ensure_dir(&blocker.join("build")).unwrap_err();
        match err {
            BuildError::Filesystem { operation, path, .. } => {
                assert_eq!(operation, "create");
                assert!(path.ends_with("file/build"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
