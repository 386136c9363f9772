//! Bundle abstraction module
//!
//! The document tree is compiled into the binary with `include_dir`. The
//! loader only sees the `Bundle` capability (list a directory, read a
//! file), so it can be exercised against an in-memory fake in tests.

use include_dir::{include_dir, Dir, DirEntry};
use std::io;

/// The embedded document tree, bundled at build time
pub static DOCUMENTS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/json");

/// One entry of a bundle directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    /// Entry name without any directory prefix
    pub name: String,
    pub is_dir: bool,
}

/// Read-only view of a hierarchical file bundle
///
/// Paths are `/`-separated and relative to the bundle root, without a
/// leading slash; the empty string names the root directory.
pub trait Bundle {
    /// List the entries of a directory
    fn entries(&self, dir: &str) -> io::Result<Vec<BundleEntry>>;

    /// Read the full content of a file
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// `Bundle` over an `include_dir` tree
pub struct EmbeddedBundle<'a> {
    root: &'a Dir<'a>,
}

impl<'a> EmbeddedBundle<'a> {
    pub const fn new(root: &'a Dir<'a>) -> Self {
        Self { root }
    }
}

impl Bundle for EmbeddedBundle<'_> {
    fn entries(&self, dir: &str) -> io::Result<Vec<BundleEntry>> {
        let node = if dir.is_empty() {
            self.root
        } else {
            self.root.get_dir(dir).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("bundle directory not found: {dir}"),
                )
            })?
        };

        Ok(node
            .entries()
            .iter()
            .map(|entry| BundleEntry {
                name: entry
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                is_dir: matches!(entry, DirEntry::Dir(_)),
            })
            .collect())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.root
            .get_file(path)
            .map(|file| file.contents().to_vec())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("bundle file not found: {path}"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_root_listing() {
        let bundle = EmbeddedBundle::new(&DOCUMENTS);
        let entries = bundle.entries("").unwrap();
        assert!(entries.iter().any(|e| e.name == "versions.json" && !e.is_dir));
        assert!(entries.iter().any(|e| e.name == "templates" && e.is_dir));
    }

    #[test]
    fn test_embedded_nested_read() {
        let bundle = EmbeddedBundle::new(&DOCUMENTS);
        let content = bundle.read("templates/services.json").unwrap();
        assert!(!content.is_empty());
    }

    #[test]
    fn test_embedded_missing_directory() {
        let bundle = EmbeddedBundle::new(&DOCUMENTS);
        assert!(bundle.entries("no-such-dir").is_err());
        assert!(bundle.read("no-such-file.json").is_err());
    }
}
