//! Document store module
//!
//! Bootstrap-time loader that flattens the hierarchical document bundle
//! into a single-level lookup table. The table is built exactly once,
//! before the listener starts, and is read-only for the process lifetime.

mod bundle;

pub use bundle::{Bundle, BundleEntry, EmbeddedBundle, DOCUMENTS};

use crate::http::cache;
use crate::logger;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use std::collections::HashMap;
use std::io;

/// One served document with its caching metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// Immutable document content
    pub content: Bytes,
    /// Quoted content-hash fingerprint, served as the `ETag` value
    pub etag: String,
    /// Last-Modified basis; process start time, not the file's mtime
    pub loaded_at: DateTime<Utc>,
}

/// Lookup table from URL path to document
///
/// Keys carry a leading slash and preserve directory nesting, e.g. a file
/// at `templates/services.json` in the bundle is keyed
/// `/templates/services.json`.
pub struct DocumentStore {
    documents: HashMap<String, Document>,
}

impl DocumentStore {
    /// Load every `.json` file of the bundle into a new store
    ///
    /// A file that cannot be read is logged and skipped; a directory that
    /// cannot be listed aborts the whole load, since that would leave the
    /// table partially defined.
    pub fn load(bundle: &dyn Bundle) -> io::Result<Self> {
        let loaded_at = Utc::now();
        let mut documents = HashMap::new();
        walk(bundle, "", "", loaded_at, &mut documents)?;
        Ok(Self { documents })
    }

    /// Look up a document by its URL path
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All loaded URL paths, sorted (for startup logging)
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Recursively walk one bundle directory
///
/// `dir` is the bundle-relative directory ("" for the root), `prefix` the
/// accumulated URL prefix for files in it.
fn walk(
    bundle: &dyn Bundle,
    dir: &str,
    prefix: &str,
    loaded_at: DateTime<Utc>,
    documents: &mut HashMap<String, Document>,
) -> io::Result<()> {
    for entry in bundle.entries(dir)? {
        let bundle_path = if dir.is_empty() {
            entry.name.clone()
        } else {
            format!("{dir}/{}", entry.name)
        };

        if entry.is_dir {
            let sub_prefix = format!("{prefix}/{}", entry.name);
            walk(bundle, &bundle_path, &sub_prefix, loaded_at, documents)?;
        } else if entry.name.ends_with(".json") {
            match bundle.read(&bundle_path) {
                Ok(content) => {
                    let url_path = format!("{prefix}/{}", entry.name);
                    let etag = cache::generate_etag(&content);
                    documents.insert(
                        url_path,
                        Document {
                            content: Bytes::from(content),
                            etag,
                            loaded_at,
                        },
                    );
                }
                Err(e) => {
                    logger::log_warning(&format!(
                        "Failed to read embedded file {bundle_path}: {e}"
                    ));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
impl DocumentStore {
    /// Build a store directly from (path, content) pairs for tests
    pub(crate) fn from_entries(entries: &[(&str, &[u8])], loaded_at: DateTime<Utc>) -> Self {
        let documents = entries
            .iter()
            .map(|&(path, content)| {
                (
                    path.to_string(),
                    Document {
                        content: Bytes::from(content.to_vec()),
                        etag: cache::generate_etag(content),
                        loaded_at,
                    },
                )
            })
            .collect();
        Self { documents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// In-memory fake bundle for loader tests
    struct MemoryBundle {
        /// path -> content, paths like "a/b.json"
        files: HashMap<String, Vec<u8>>,
        unreadable_files: HashSet<String>,
        unreadable_dirs: HashSet<String>,
    }

    impl MemoryBundle {
        fn new(files: &[(&str, &[u8])]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| ((*p).to_string(), c.to_vec()))
                    .collect(),
                unreadable_files: HashSet::new(),
                unreadable_dirs: HashSet::new(),
            }
        }
    }

    impl Bundle for MemoryBundle {
        fn entries(&self, dir: &str) -> io::Result<Vec<BundleEntry>> {
            if self.unreadable_dirs.contains(dir) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }

            let mut seen = HashSet::new();
            let mut entries = Vec::new();
            for path in self.files.keys() {
                let rest = if dir.is_empty() {
                    path.as_str()
                } else if let Some(rest) = path.strip_prefix(&format!("{dir}/")) {
                    rest
                } else {
                    continue;
                };

                let (name, is_dir) = match rest.split_once('/') {
                    Some((first, _)) => (first, true),
                    None => (rest, false),
                };
                if seen.insert(name.to_string()) {
                    entries.push(BundleEntry {
                        name: name.to_string(),
                        is_dir,
                    });
                }
            }
            Ok(entries)
        }

        fn read(&self, path: &str) -> io::Result<Vec<u8>> {
            if self.unreadable_files.contains(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }
    }

    #[test]
    fn test_nested_paths_are_flattened() {
        let bundle = MemoryBundle::new(&[
            ("versions.json", b"{\"v\":1}"),
            ("a/b.json", b"{\"x\":1}"),
            ("a/deep/c.json", b"{}"),
        ]);
        let store = DocumentStore::load(&bundle).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("/versions.json").unwrap().content.as_ref(), b"{\"v\":1}");
        assert_eq!(store.get("/a/b.json").unwrap().content.as_ref(), b"{\"x\":1}");
        assert!(store.get("/a/deep/c.json").is_some());
        // Bundle-relative paths are not valid keys
        assert!(store.get("a/b.json").is_none());
    }

    #[test]
    fn test_non_json_files_are_ignored() {
        let bundle = MemoryBundle::new(&[
            ("readme.txt", b"hi"),
            ("data.json", b"{}"),
        ]);
        let store = DocumentStore::load(&bundle).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("/readme.txt").is_none());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let mut bundle = MemoryBundle::new(&[
            ("good.json", b"{}"),
            ("bad.json", b"{}"),
        ]);
        bundle.unreadable_files.insert("bad.json".to_string());

        let store = DocumentStore::load(&bundle).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("/good.json").is_some());
        assert!(store.get("/bad.json").is_none());
    }

    #[test]
    fn test_unreadable_directory_is_fatal() {
        let mut bundle = MemoryBundle::new(&[
            ("good.json", b"{}"),
            ("sub/other.json", b"{}"),
        ]);
        bundle.unreadable_dirs.insert("sub".to_string());

        assert!(DocumentStore::load(&bundle).is_err());
    }

    #[test]
    fn test_etag_is_deterministic_per_content() {
        let bundle = MemoryBundle::new(&[
            ("one.json", b"{\"same\":true}"),
            ("two.json", b"{\"same\":true}"),
            ("three.json", b"{\"same\":false}"),
        ]);
        let store = DocumentStore::load(&bundle).unwrap();

        let one = &store.get("/one.json").unwrap().etag;
        let two = &store.get("/two.json").unwrap().etag;
        let three = &store.get("/three.json").unwrap().etag;
        assert_eq!(one, two);
        assert_ne!(one, three);

        // Same content hashes the same across a fresh load
        let reloaded = DocumentStore::load(&bundle).unwrap();
        assert_eq!(one, &reloaded.get("/one.json").unwrap().etag);
    }

    #[test]
    fn test_single_shared_load_timestamp() {
        let bundle = MemoryBundle::new(&[
            ("a.json", b"{}"),
            ("b/c.json", b"{}"),
        ]);
        let store = DocumentStore::load(&bundle).unwrap();
        assert_eq!(
            store.get("/a.json").unwrap().loaded_at,
            store.get("/b/c.json").unwrap().loaded_at
        );
    }

    #[test]
    fn test_paths_are_sorted() {
        let bundle = MemoryBundle::new(&[
            ("z.json", b"{}"),
            ("a.json", b"{}"),
        ]);
        let store = DocumentStore::load(&bundle).unwrap();
        assert_eq!(store.paths(), vec!["/a.json", "/z.json"]);
    }
}
