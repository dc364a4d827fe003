//! Worklist strategy tests

use crate::support::{read, worklist_config, SiteFetcher};
use std::collections::HashSet;
use sumi_mirror::config::Strategy;
use sumi_mirror::{run_with, DirectoryNaming, LinkScope, MirrorError};
use tempfile::TempDir;

#[tokio::test]
async fn test_cycle_is_fetched_once_per_page() {
    let site = SiteFetcher::new()
        .page("https://ex.com/", r#"<a href="/b">B</a><a href="/#top">Top</a>"#)
        .page("https://ex.com/b", r#"<a href="/">Home</a><a href="/b">Self</a>"#);
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.strategy, Strategy::Worklist);
    assert_eq!(report.pages.len(), 2);
    assert_eq!(site.requests().len(), 2);
    assert_eq!(site.request_count("https://ex.com/"), 1);
    assert_eq!(site.request_count("https://ex.com/b"), 1);
}

#[tokio::test]
async fn test_same_origin_links_outside_prefix_are_followed() {
    let site = SiteFetcher::new()
        .page("https://ex.com/docs/", r#"<a href="/blog">Blog</a>"#)
        .page("https://ex.com/blog", "<p>blog</p>");
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com/docs/", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[1].url, "https://ex.com/blog");
    assert_eq!(report.pages[1].depth, 1);
}

#[tokio::test]
async fn test_lookalike_host_is_not_followed() {
    let site = SiteFetcher::new()
        .page("https://ex.com", r#"<a href="https://ex.com.attacker.net/">Phish</a>"#)
        .page("https://ex.com.attacker.net/", "<p>gotcha</p>");
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 1);
    assert_eq!(site.request_count("https://ex.com.attacker.net/"), 0);
}

#[tokio::test]
async fn test_lookalike_host_passes_prefix_scope() {
    let site = SiteFetcher::new()
        .page("https://ex.com", r#"<a href="https://ex.com.attacker.net/">Phish</a>"#)
        .page("https://ex.com.attacker.net/", "<p>gotcha</p>");
    let temp_dir = TempDir::new().unwrap();
    let mut config = worklist_config();
    config.link_scope = LinkScope::Prefix;

    let report = run_with(&site, &config, "https://ex.com", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(site.request_count("https://ex.com.attacker.net/"), 1);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_siblings() {
    let site = SiteFetcher::new()
        .page(
            "https://ex.com/",
            r#"<a href="/missing">Missing</a><a href="/ok">Ok</a>"#,
        )
        .page("https://ex.com/ok", "<p>ok</p>");
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, "https://ex.com/missing");
    assert_eq!(report.failures[0].depth, 1);
    assert!(report.failures[0].error.contains("404"));
    assert!(!report.root_failed());
    assert!(!report.failures[0].directory.exists());
    assert!((report.success_rate() - 200.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_root_failure_is_reported() {
    let site = SiteFetcher::new();
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    assert!(report.pages.is_empty());
    assert!(report.root_failed());
}

#[tokio::test]
async fn test_malformed_root_is_an_error() {
    let site = SiteFetcher::new();
    let temp_dir = TempDir::new().unwrap();

    let result = run_with(&site, &worklist_config(), "relative/path", temp_dir.path()).await;

    assert!(matches!(result, Err(MirrorError::MalformedUrl { .. })));
}

#[tokio::test]
async fn test_hashed_directories_are_distinct() {
    // Relative naming maps both links to "_a_b"
    let site = SiteFetcher::new()
        .page("https://ex.com", r#"<a href="/a/b">1</a><a href="/a_b">2</a>"#)
        .page("https://ex.com/a/b", "<p>first</p>")
        .page("https://ex.com/a_b", "<p>second</p>");
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 3);
    let directories: HashSet<_> = report.pages.iter().map(|p| p.directory.clone()).collect();
    assert_eq!(directories.len(), 3);

    let first = &report.pages[1];
    let second = &report.pages[2];
    assert_eq!(first.directory.parent(), Some(temp_dir.path()));
    assert!(first
        .directory
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("b-"));
    assert_eq!(read(&first.directory.join("index.html")), "<p>first</p>");
    assert_eq!(read(&second.directory.join("index.html")), "<p>second</p>");
}

#[tokio::test]
async fn test_relative_naming_collision_overwrites() {
    let site = SiteFetcher::new()
        .page("https://ex.com", r#"<a href="/a/b">1</a><a href="/a_b">2</a>"#)
        .page("https://ex.com/a/b", "<p>first</p>")
        .page("https://ex.com/a_b", "<p>second</p>");
    let temp_dir = TempDir::new().unwrap();
    let mut config = worklist_config();
    config.directory_naming = DirectoryNaming::Relative;
    config.max_concurrent_pages = 1;

    let report = run_with(&site, &config, "https://ex.com", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.pages[1].directory, report.pages[2].directory);
    assert_eq!(
        read(&temp_dir.path().join("_a_b").join("index.html")),
        "<p>second</p>"
    );
}

#[tokio::test]
async fn test_max_depth_stops_following_links() {
    let site = SiteFetcher::new()
        .page("https://ex.com/", r#"<a href="/one">1</a>"#)
        .page("https://ex.com/one", r#"<a href="/two">2</a>"#)
        .page("https://ex.com/two", "<p>two</p>");
    let temp_dir = TempDir::new().unwrap();
    let mut config = worklist_config();
    config.max_depth = Some(1);

    let report = run_with(&site, &config, "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[1].depth, 1);
    assert_eq!(site.request_count("https://ex.com/two"), 0);
}

#[tokio::test]
async fn test_results_keep_worklist_order_under_concurrency() {
    let mut root = String::new();
    let mut site = SiteFetcher::new();
    for i in 0..10 {
        root.push_str(&format!(r#"<a href="/p{}">{}</a>"#, i, i));
        site = site.page(&format!("https://ex.com/p{}", i), "<p>page</p>");
    }
    let site = site.page("https://ex.com/", &root);
    let temp_dir = TempDir::new().unwrap();
    let mut config = worklist_config();
    config.max_concurrent_pages = 8;

    let report = run_with(&site, &config, "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    let urls: Vec<_> = report.pages.iter().skip(1).map(|p| p.url.clone()).collect();
    let expected: Vec<_> = (0..10).map(|i| format!("https://ex.com/p{}", i)).collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_asset_cache_fetches_shared_stylesheet_once() {
    let shared = r#"<link rel="stylesheet" href="/shared.css">"#;
    let build_site = || {
        SiteFetcher::new()
            .page("https://ex.com/", &format!(r#"{}<a href="/next">Next</a>"#, shared))
            .page("https://ex.com/next", shared)
            .page("https://ex.com/shared.css", "p { margin: 0; }")
    };

    let cached_site = build_site();
    let temp_dir = TempDir::new().unwrap();
    let mut config = worklist_config();
    config.cache_assets = true;
    run_with(&cached_site, &config, "https://ex.com/", temp_dir.path())
        .await
        .unwrap();
    assert_eq!(cached_site.request_count("https://ex.com/shared.css"), 1);

    let uncached_site = build_site();
    let temp_dir = TempDir::new().unwrap();
    let report = run_with(&uncached_site, &worklist_config(), "https://ex.com/", temp_dir.path())
        .await
        .unwrap();
    assert_eq!(uncached_site.request_count("https://ex.com/shared.css"), 2);

    for page in &report.pages {
        assert_eq!(read(&page.directory.join("styles.css")), "p { margin: 0; }\n");
    }
}

#[tokio::test]
async fn test_unresolvable_reference_is_skipped() {
    let site = SiteFetcher::new()
        .page(
            "https://ex.com/",
            r#"<script src="http://[bad"></script><script>ok();</script><a href="http://[bad">x</a>"#,
        );
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 1);
    assert_eq!(read(&temp_dir.path().join("scripts.js")), "ok();\n");
    assert_eq!(report.asset_failures.len(), 1);
    assert_eq!(report.asset_failures[0].asset, "http://[bad");
}

#[tokio::test]
async fn test_latin1_root_links_are_followed() {
    let site = SiteFetcher::new()
        .raw("https://ex.com/", b"<p>caf\xE9</p><a href=\"/next\">Next</a>")
        .page("https://ex.com/next", "<p>next</p>");
    let temp_dir = TempDir::new().unwrap();

    let report = run_with(&site, &worklist_config(), "https://ex.com/", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert!(report.failures.is_empty());
    assert!(!report.root_failed());
    assert_eq!(site.request_count("https://ex.com/next"), 1);
}
