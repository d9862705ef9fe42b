//! Fixtures shared by the library integration tests and the CLI tests.
//!
//! Provides a temporary working directory with sitemap, manifest and page
//! files, canned sitemap snippets, and a helper to pin file modification
//! times so derived `lastmod` values are predictable.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use chrono::{Local, TimeZone};
use std::fs::File;
use std::path::Path;
use std::time::SystemTime;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::set_mtime;
    #[allow(unused_imports)]
    pub use super::sitemaps;
    pub use super::TestFixture;
}

/// Common sitemap and manifest snippets for testing.
#[allow(dead_code)]
pub mod sitemaps {
    /// A sitemap with three URLs under `http://domain.com/`.
    pub const THREE_URLS: &str = include_str!("../fixtures/test_sitemap.xml");

    /// The serialization of a sitemap without URLs.
    pub const EMPTY: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"/>";

    /// A manifest with a host, a custom option and two relative URLs.
    pub const MANIFEST: &str = r#"
host: http://domain.com/
options:
  - name: author
urls:
  - /magic
  - url: /another-page
    changefreq: weekly
    priority: 0.8
    author: jane
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: yaml: content:";
}

/// Set a file's modification time to noon local time on the given day.
#[allow(dead_code)]
pub fn set_mtime(path: &Path, year: i32, month: u32, day: u32) {
    let time: SystemTime = Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("Invalid local date")
        .into();
    let file = File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file");
    file.set_modified(time).expect("Failed to set modification time");
}

/// A test fixture that provides a temporary directory with optional files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_sitemap(sitemaps::THREE_URLS)
///     .with_file("index.html", "<html></html>");
///
/// let mut cmd = cargo_bin_cmd!("xml-sitemap");
/// cmd.current_dir(fixture.path())
///     .arg("ls")
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `sitemap.xml` with the given content.
    #[allow(dead_code)]
    pub fn with_sitemap(self, content: &str) -> Self {
        self.with_file("sitemap.xml", content)
    }

    /// Add a `sitemap.yaml` manifest with the given content.
    #[allow(dead_code)]
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("sitemap.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file from the temp directory.
    #[allow(dead_code)]
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(path)).expect("Failed to read file")
    }

    /// A command for the binary running inside the temp directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("xml-sitemap");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_sitemap() {
        let fixture = TestFixture::new().with_sitemap(sitemaps::EMPTY);
        assert_eq!(fixture.read("sitemap.xml"), sitemaps::EMPTY);
    }

    #[test]
    fn test_set_mtime() {
        let fixture = TestFixture::new().with_file("index.html", "<html></html>");
        let path = fixture.path().join("index.html");
        set_mtime(&path, 2016, 1, 1);

        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
        let local = chrono::DateTime::<Local>::from(modified);
        assert_eq!(local.format("%Y-%m-%d").to_string(), "2016-01-01");
    }
}
