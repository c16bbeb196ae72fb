use anyhow::Result;
use std::path::{Component, Path, PathBuf};

fn ensure_path_exists(path: PathBuf) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path)
    } else if path.exists() {
        Err(anyhow::anyhow!("Path is not a file: {}", path.display()))
    } else {
        Err(anyhow::anyhow!("Path does not exist: {}", path.display()))
    }
}

fn to_absolute_path(path: &Path) -> Result<PathBuf> {
    let path_buf = path.to_path_buf();

    if path_buf.is_absolute() {
        return Ok(path_buf);
    }

    let current_dir = std::env::current_dir()
        .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;

    let has_parent_refs = path.components().any(|c| c == Component::ParentDir);

    if has_parent_refs {
        // canonicalize fails on missing files, keep the joined path then
        match current_dir.join(&path_buf).canonicalize() {
            Ok(canonical_path) => Ok(canonical_path),
            Err(e) => {
                log::warn!("Failed to canonicalize path with parent refs: {}, using simple join", e);
                Ok(current_dir.join(path_buf))
            }
        }
    } else {
        Ok(current_dir.join(path_buf))
    }
}

/// Resolves `path` against the current directory and checks that it names an
/// existing regular file.
pub fn to_verified_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("Path is empty"));
    }
    let absolute_path = to_absolute_path(path)?;
    ensure_path_exists(absolute_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.png");
        std::fs::write(&file, b"not really a png").unwrap();

        let result = to_verified_path(&file);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), file);
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let result = to_absolute_path(Path::new("./test.txt"));
        assert!(result.is_ok());
        let path = result.unwrap();
        assert!(path.is_absolute());
        assert!(path.starts_with(env::current_dir().unwrap()));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        let err = to_verified_path(&missing).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = to_verified_path(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a file"));
    }

    #[test]
    fn test_parent_refs_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let file = dir.path().join("scan.png");
        std::fs::write(&file, b"x").unwrap();

        let result = to_verified_path(&dir.path().join("sub").join("..").join("scan.png"));
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(OsStr::from_bytes(b"scan-\xff.png"));
        std::fs::write(&file, b"x").unwrap();

        assert_eq!(to_verified_path(&file).unwrap(), file);
    }

    #[test]
    fn test_empty_path() {
        assert!(to_verified_path(Path::new("")).is_err());
    }
}
