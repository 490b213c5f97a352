//! File operations
//!
//! Everything the editor does to the filesystem goes through `FileOps`.
//! `DiskFs` performs each operation as one direct, synchronous call with no
//! staging.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EditorError, Result};

/// One directory entry as listed by `FileOps::list_dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Filesystem operations used by the editor shell
pub trait FileOps {
    /// Read a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create or truncate a file and write `contents`
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Create an empty file; fails if anything exists at `path`
    fn create_file(&self, path: &Path) -> Result<()>;

    /// Create a directory; fails if anything exists at `path`
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Rename `from` to `to`; fails if `to` exists
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Delete a file or an empty directory
    fn delete(&self, path: &Path) -> Result<()>;

    /// List the entries of a directory, unsorted
    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// `FileOps` on the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl DiskFs {
    pub fn new() -> Self {
        Self
    }
}

/// Map an I/O error on `path` to the editor's error kinds
fn io_error(path: &Path, err: std::io::Error) -> EditorError {
    match err.kind() {
        ErrorKind::NotFound => EditorError::FileNotFound(path.to_path_buf()),
        ErrorKind::AlreadyExists => EditorError::AlreadyExists(path.to_path_buf()),
        _ => EditorError::Io(err),
    }
}

impl FileOps for DiskFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        // Binary or mis-encoded files still open; invalid sequences become U+FFFD
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| io_error(path, e))?;
        log::info!("wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    fn create_file(&self, path: &Path) -> Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| io_error(path, e))?;
        log::info!("created file {}", path.display());
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir(path).map_err(|e| io_error(path, e))?;
        log::info!("created directory {}", path.display());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if to.exists() {
            return Err(EditorError::AlreadyExists(to.to_path_buf()));
        }
        fs::rename(from, to).map_err(|e| io_error(from, e))?;
        log::info!("renamed {} to {}", from.display(), to.display());
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path).map_err(|e| io_error(path, e))?;
        if metadata.is_dir() {
            fs::remove_dir(path).map_err(|e| io_error(path, e))?;
        } else {
            fs::remove_file(path).map_err(|e| io_error(path, e))?;
        }
        log::info!("deleted {}", path.display());
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| io_error(path, e))? {
            let entry = entry?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_dir,
            });
        }
        Ok(entries)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let fs = DiskFs::new();

        fs.write(&path, "hello\n").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello\n");
        assert!(fs.exists(&path));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = DiskFs::new().read_to_string(&path).unwrap_err();
        assert!(matches!(err, EditorError::FileNotFound(p) if p == path));
    }

    #[test]
    fn test_read_binary_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [b'a', 0xff, b'b']).unwrap();
        assert_eq!(DiskFs::new().read_to_string(&path).unwrap(), "a\u{fffd}b");
    }

    #[test]
    fn test_create_file_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.py");
        let fs = DiskFs::new();

        fs.create_file(&path).unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "");
        assert!(matches!(fs.create_file(&path), Err(EditorError::AlreadyExists(_))));
    }

    #[test]
    fn test_create_dir_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let fs = DiskFs::new();
        fs.create_dir(&dir.path().join("sub")).unwrap();
        fs.write(&dir.path().join("f.html"), "").unwrap();

        let mut entries = fs.list_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "f.html");
        assert!(!entries[0].is_dir);
        assert_eq!(entries[1].name, "sub");
        assert!(entries[1].is_dir);
    }

    #[test]
    fn test_rename_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let c = dir.path().join("c.txt");
        let fs = DiskFs::new();
        fs.write(&a, "a").unwrap();
        fs.write(&b, "b").unwrap();

        assert!(matches!(fs.rename(&a, &b), Err(EditorError::AlreadyExists(_))));
        assert_eq!(fs.read_to_string(&b).unwrap(), "b");

        fs.rename(&a, &c).unwrap();
        assert!(!fs.exists(&a));
        assert_eq!(fs.read_to_string(&c).unwrap(), "a");
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let fs = DiskFs::new();
        let file = dir.path().join("x.txt");
        let sub = dir.path().join("sub");
        fs.write(&file, "x").unwrap();
        fs.create_dir(&sub).unwrap();
        fs.write(&sub.join("inner.txt"), "").unwrap();

        fs.delete(&file).unwrap();
        assert!(!fs.exists(&file));

        // Non-empty directories are refused
        assert!(fs.delete(&sub).is_err());
        fs.delete(&sub.join("inner.txt")).unwrap();
        fs.delete(&sub).unwrap();
        assert!(!fs.exists(&sub));

        assert!(matches!(fs.delete(&file), Err(EditorError::FileNotFound(_))));
    }
}
