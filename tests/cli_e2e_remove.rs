//! End-to-end tests for the `xml-sitemap remove` command.

mod common;
use common::prelude::*;

#[test]
fn test_remove_url() {
    let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);

    fixture
        .command()
        .args(["remove", "http://domain.com/magic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 URL(s) from sitemap.xml"));

    fixture
        .child("sitemap.xml")
        .assert(predicate::str::contains("http://domain.com/magic").not())
        .assert(predicate::str::contains("http://domain.com/another-page"));
}

#[test]
fn test_remove_relative_to_host() {
    let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);

    fixture
        .command()
        .args(["remove", "magic", "/another-page", "--host", "http://domain.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 URL(s)"));

    assert_eq!(fixture.read("sitemap.xml").matches("<loc>").count(), 1);
}

#[test]
fn test_remove_unknown_url_warns() {
    let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);

    fixture
        .command()
        .args(["remove", "http://elsewhere.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 URL(s)"))
        .stderr(predicate::str::contains(
            "http://elsewhere.com/ not in sitemap, can't remove it.",
        ));
}

#[test]
fn test_remove_warning_silenced_by_log_level() {
    let fixture = TestFixture::new().with_sitemap(sitemaps::THREE_URLS);

    fixture
        .command()
        .env_remove("RUST_LOG")
        .args(["--log-level", "error", "remove", "http://elsewhere.com/"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not in sitemap").not());
}

#[test]
fn test_remove_missing_sitemap() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["remove", "http://domain.com/"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sitemap sitemap.xml not found"));
}
