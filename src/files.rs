//! # Linked Files
//!
//! A URL can be linked to a file on disk, in which case its `lastmod` field is
//! derived from that file's modification time every time it is updated. This
//! module holds the link table and the filesystem seam used to read it.
//!
//! ## Design
//!
//! Filesystem access goes through the **`FileStat`** trait, which only knows
//! how to check that a path exists and read its modification time.
//! `DiskFileStat` is the real implementation; tests can swap in their own to
//! simulate files without touching the disk. Modification times are read on
//! every call and never cached, so repeated updates follow the live file.

use chrono::{DateTime, Local, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Trait for filesystem metadata access - allows mocking in tests
pub trait FileStat: Debug + Send + Sync {
    /// Whether the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// The path's last modification time.
    fn modified(&self, path: &Path) -> Result<SystemTime>;
}

/// `FileStat` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileStat;

impl FileStat for DiskFileStat {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        Ok(fs::metadata(path)?.modified()?)
    }
}

/// Fail with `Error::FileNotFound` unless the path exists.
pub fn ensure_exists(stat: &dyn FileStat, path: &Path) -> Result<()> {
    if stat.exists(path) {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// The local calendar date a file was last modified.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if the file does not exist, and propagates
/// metadata read failures.
pub fn modified_date(stat: &dyn FileStat, path: &Path) -> Result<NaiveDate> {
    ensure_exists(stat, path)?;
    Ok(DateTime::<Local>::from(stat.modified(path)?).date_naive())
}

/// Mapping from canonical URL to the file that drives its `lastmod`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLinks {
    links: BTreeMap<String, PathBuf>,
}

impl FileLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a file to a URL, returning the previously linked path.
    pub(crate) fn link(&mut self, url: impl Into<String>, path: impl Into<PathBuf>) -> Option<PathBuf> {
        self.links.insert(url.into(), path.into())
    }

    pub(crate) fn unlink(&mut self, url: &str) -> Option<PathBuf> {
        self.links.remove(url)
    }

    pub fn get(&self, url: &str) -> Option<&Path> {
        self.links.get(url).map(PathBuf::as_path)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.links.contains_key(url)
    }

    /// Links ordered by URL.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.links.iter().map(|(url, path)| (url.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct MockFileStat {
        files: HashMap<PathBuf, SystemTime>,
    }

    impl FileStat for MockFileStat {
        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn modified(&self, path: &Path) -> Result<SystemTime> {
            self.files.get(path).copied().ok_or_else(|| Error::FileNotFound {
                path: path.to_path_buf(),
            })
        }
    }

    fn local_noon(year: i32, month: u32, day: u32) -> SystemTime {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap()
            .into()
    }

    #[test]
    fn test_modified_date() {
        let mut stat = MockFileStat::default();
        stat.files
            .insert(PathBuf::from("index.html"), local_noon(2016, 1, 1));

        assert_eq!(
            modified_date(&stat, Path::new("index.html")).unwrap(),
            NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_modified_date_of_missing_file() {
        let stat = MockFileStat::default();
        let result = modified_date(&stat, Path::new("missing.html"));
        assert!(matches!(result, Err(Error::FileNotFound { path }) if path == Path::new("missing.html")));
    }

    #[test]
    fn test_disk_file_stat() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let stat = DiskFileStat;
        assert!(stat.exists(temp.path()));
        assert!(stat.modified(temp.path()).is_ok());
        assert!(!stat.exists(Path::new("/definitely/not/here.html")));
        assert!(stat.modified(Path::new("/definitely/not/here.html")).is_err());
    }

    #[test]
    fn test_link_and_unlink() {
        let mut links = FileLinks::new();
        assert_eq!(links.link("http://domain.com/", "index.html"), None);
        assert_eq!(
            links.link("http://domain.com/", "home.html"),
            Some(PathBuf::from("index.html"))
        );
        assert_eq!(links.get("http://domain.com/"), Some(Path::new("home.html")));
        assert_eq!(links.len(), 1);

        assert_eq!(links.unlink("http://domain.com/"), Some(PathBuf::from("home.html")));
        assert!(links.unlink("http://domain.com/").is_none());
        assert!(links.is_empty());
    }

    #[test]
    fn test_iter_is_ordered_by_url() {
        let mut links = FileLinks::new();
        links.link("http://domain.com/b", "b.html");
        links.link("http://domain.com/a", "a.html");
        let urls: Vec<_> = links.iter().map(|(url, _)| url).collect();
        assert_eq!(urls, vec!["http://domain.com/a", "http://domain.com/b"]);
    }
}
