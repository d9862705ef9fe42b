//! End-to-end tests for the `xml-sitemap add` command.
//!
//! These tests verify the CLI behavior of the `add` command by invoking
//! the binary directly and checking the sitemap it writes.

mod common;
use common::prelude::*;

#[test]
fn test_add_help() {
    cargo_bin_cmd!("xml-sitemap")
        .arg("add")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Add URLs to a sitemap file"));
}

#[test]
fn test_add_requires_a_url() {
    let fixture = TestFixture::new();

    fixture.command().arg("add").assert().code(2);
}

#[test]
fn test_add_creates_sitemap() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["add", "http://domain.com/", "http://domain.com/magic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 URL(s) to sitemap.xml"));

    fixture
        .child("sitemap.xml")
        .assert(predicate::str::contains("<loc>http://domain.com/</loc>"))
        .assert(predicate::str::contains("<loc>http://domain.com/magic</loc>"));
}

#[test]
fn test_add_with_host_and_options() {
    let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);

    fixture
        .command()
        .args([
            "add",
            "new-page",
            "--host",
            "http://domain.com",
            "--lastmod",
            "2016-01-01",
            "--changefreq",
            "monthly",
            "--priority",
            "0.3",
        ])
        .assert()
        .success();

    let xml = fixture.read("sitemap.xml");
    assert!(xml.contains(
        "  <url>\n    <loc>http://domain.com/new-page</loc>\n    <lastmod>2016-01-01</lastmod>\n    <changefreq>monthly</changefreq>\n    <priority>0.3</priority>\n  </url>\n</urlset>"
    ));
    // The host is only used for resolution
    assert_eq!(xml.matches("<loc>").count(), 4);
}

#[test]
fn test_add_with_linked_file() {
    let fixture = TestFixture::new().with_file("index.html", "<html></html>");
    set_mtime(&fixture.path().join("index.html"), 2016, 1, 1);

    fixture
        .command()
        .args(["add", "http://domain.com/", "--file", "index.html"])
        .assert()
        .success();

    fixture
        .child("sitemap.xml")
        .assert(predicate::str::contains("<lastmod>2016-01-01</lastmod>"));
}

#[test]
fn test_add_with_missing_file() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["add", "http://domain.com/", "--file", "missing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to resolve file missing.html"));

    fixture.child("sitemap.xml").assert(predicate::path::missing());
}

#[test]
fn test_add_duplicate_url() {
    let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);

    fixture
        .command()
        .args(["add", "http://domain.com/magic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is already in the sitemap"));

    assert_eq!(fixture.read("sitemap.xml"), sitemaps::THREE_URLS);
}

#[test]
fn test_add_invalid_option_values() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["add", "http://domain.com/", "--changefreq", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("changefreq"));

    fixture
        .command()
        .args(["add", "http://domain.com/", "--priority", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("priority"));
}

#[test]
fn test_add_invalid_host() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["add", "/page", "--host", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid host not a url"));
}
