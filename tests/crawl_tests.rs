//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the HTTP
//! browser, the crawl engine and the NDJSON log end-to-end.

use find404_crawler::config::Config;
use find404_crawler::crawler::{run_crawl, Browser, BrowserError, CrawlEngine, HttpBrowser, Page};
use find404_crawler::output::{read_reports, summarize_log, NdjsonSink, CRAWL_LOG_FILE_NAME};
use find404_crawler::report::UrlReport;
use find404_crawler::url::Scope;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn html(links: &str) -> String {
    format!("<html><head><title>Test</title></head><body>{}</body></html>", links)
}

fn browser() -> HttpBrowser {
    HttpBrowser::new(&Config::default().crawler).expect("Failed to build browser")
}

fn link_keys(report: &UrlReport) -> Vec<(String, bool)> {
    report
        .links()
        .iter()
        .map(|link| (link.url.clone(), link.in_scope))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_writes_one_report_per_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        200,
        html(
            r##"<a href="/about">About</a>
                <a href="/about#team">Team</a>
                <a href="https://y.com/">Elsewhere</a>
                <a name="bottom">No href</a>"##,
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        200,
        html(r#"<a href="/">Home</a><a href="/missing">Gone</a>"#),
    )
    .await;
    mount_page(&mock_server, "/missing", 404, html(r#"<a href="/">Home</a>"#)).await;

    let output = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.folder = output.path().to_path_buf();

    let stats = run_crawl(&config, &[format!("{}/", base_url)])
        .await
        .expect("Crawl failed to start");

    assert_eq!(stats.pages_crawled, 3);
    assert_eq!(stats.pages_failed, 0);
    assert_eq!(stats.urls_out_of_scope, 1);

    let reports = read_reports(&output.path().join(CRAWL_LOG_FILE_NAME)).unwrap();
    let urls: Vec<&str> = reports.iter().map(|r| r.url()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base_url),
            format!("{}/about", base_url),
            format!("{}/missing", base_url),
        ]
    );

    assert_eq!(
        link_keys(&reports[0]),
        vec![
            (format!("{}/about", base_url), true),
            (format!("{}/about#team", base_url), true),
            ("https://y.com/".to_string(), false),
        ]
    );

    // The 404 page is still reported with the links it renders
    assert_eq!(
        link_keys(&reports[2]),
        vec![(format!("{}/", base_url), true)]
    );
}

#[tokio::test]
async fn test_log_lines_have_expected_shape() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/", 200, html(r#"<a href="https://y.com/">Out</a>"#)).await;

    let output = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.folder = output.path().to_path_buf();

    run_crawl(&config, &[format!("{}/", base_url)]).await.unwrap();

    let content = std::fs::read_to_string(output.path().join(CRAWL_LOG_FILE_NAME)).unwrap();
    let line = content.lines().next().expect("log is empty");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "url": format!("{}/", base_url),
            "links": {
                "https://y.com/": {"url": "https://y.com/", "in-scope": false}
            }
        })
    );

    let summary = summarize_log(output.path()).unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.out_of_scope_targets, vec!["https://y.com/".to_string()]);
}

#[tokio::test]
async fn test_slow_page_times_out_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        200,
        html(r#"<a href="/fast">Fast</a><a href="/slow">Slow</a>"#),
    )
    .await;
    mount_page(&mock_server, "/fast", 200, html("")).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html(r#"<a href="/never-seen">Hidden</a>"#))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let sink = NdjsonSink::new(output.path()).unwrap();
    let seed = format!("{}/", base_url);
    let scope = Scope::for_seeds(&[seed.as_str()], &[] as &[&str], &[] as &[&str]).unwrap();

    let mut engine = CrawlEngine::new(browser(), sink, scope)
        .with_page_timeout(Duration::from_millis(300));
    let stats = engine.crawl([seed.as_str()]).await;

    assert_eq!(stats.pages_crawled, 3);
    assert_eq!(stats.pages_timed_out, 1);
    assert!(!engine.frontier().is_known(&format!("{}/never-seen", base_url)));

    let reports = read_reports(engine.sink().path()).unwrap();
    assert_eq!(reports.len(), 3);

    let slow = reports
        .iter()
        .find(|r| r.url() == format!("{}/slow", base_url))
        .expect("No report for the slow page");
    assert!(slow.is_empty());
}

#[tokio::test]
async fn test_forbidden_pages_are_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        200,
        html(r#"<a href="/admin/login">Admin</a><a href="/docs">Docs</a>"#),
    )
    .await;
    mount_page(&mock_server, "/docs", 200, html("")).await;
    Mock::given(method("GET"))
        .and(path("/admin/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let output = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.folder = output.path().to_path_buf();
    config.scope.forbidden = vec!["/admin".to_string()];

    let stats = run_crawl(&config, &[format!("{}/", base_url)]).await.unwrap();
    assert_eq!(stats.pages_crawled, 2);

    let reports = read_reports(&output.path().join(CRAWL_LOG_FILE_NAME)).unwrap();
    let admin = reports[0]
        .link(&format!("{}/admin/login", base_url))
        .expect("Admin link not recorded");
    assert!(!admin.in_scope);

    // Verifies the `expect(0)` on the admin mock
    mock_server.verify().await;
}

#[tokio::test]
async fn test_http_page_follows_redirects() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/docs/target"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/docs/target",
        200,
        html(r#"<a href="child">Child</a><a>Nothing</a>"#),
    )
    .await;

    let browser = browser();
    let mut page = browser.new_page().await.unwrap();
    page.goto(&format!("{}/old", base_url), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(
        page.final_url().map(|url| url.as_str().to_string()),
        Some(format!("{}/docs/target", base_url))
    );

    let anchors = page.query_anchors().await.unwrap();
    let hrefs: Vec<Option<String>> = anchors.into_iter().map(|a| a.href).collect();
    assert_eq!(hrefs, vec![Some(format!("{}/docs/child", base_url)), None]);

    page.close().await.unwrap();
    assert!(matches!(
        page.query_anchors().await,
        Err(BrowserError::PageNotLoaded)
    ));
}

#[tokio::test]
async fn test_http_page_reports_error_status() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/gone", 404, html(r#"<a href="/">Home</a>"#)).await;

    let browser = browser();
    let mut page = browser.new_page().await.unwrap();
    page.goto(&format!("{}/gone", base_url), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(page.status().map(|s| s.as_u16()), Some(404));
    assert_eq!(page.query_anchors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_http_page_timeout() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let browser = browser();
    let mut page = browser.new_page().await.unwrap();
    let err = page
        .goto(&format!("{}/slow", base_url), Duration::from_millis(200))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(page.final_url().is_none());
}
