//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a fake category index and fake
//! nationality pages, and run the full discovery, extraction and output cycle.

use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;
use visa_harvest::config::{Config, CrawlerConfig, OutputConfig, SourceConfig};
use visa_harvest::crawler::{harvest, Harvester};
use visa_harvest::extract::{PageExtractor, RequirementClassifier, TableClassifier};
use visa_harvest::output::{OutputError, OutputHandler, OutputResult};
use visa_harvest::url::IdentifierResolver;
use visa_harvest::{AggregateDocument, HarvestError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY_PATH: &str = "/wiki/Category:Visa_requirements_by_nationality";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, json_path: &str) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
            category_path: CATEGORY_PATH.to_string(),
        },
        crawler: CrawlerConfig {
            max_concurrent_pages_open: 5,
            request_timeout_secs: 5,
        },
        output: OutputConfig {
            json_path: json_path.to_string(),
        },
        ..Config::default()
    }
}

/// Output handler keeping the document in memory
#[derive(Default)]
struct MemoryOutput {
    document: Mutex<Option<AggregateDocument>>,
    calls: AtomicUsize,
}

impl OutputHandler for MemoryOutput {
    fn destination(&self) -> String {
        "memory".to_string()
    }

    fn persist(&self, document: &AggregateDocument) -> OutputResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}

impl MemoryOutput {
    fn json(&self) -> serde_json::Value {
        let document = self.document.lock().unwrap();
        serde_json::to_value(document.as_ref().expect("document not persisted")).unwrap()
    }
}

/// Output handler that always fails
struct FailingOutput;

impl OutputHandler for FailingOutput {
    fn destination(&self) -> String {
        "nowhere".to_string()
    }

    fn persist(&self, _document: &AggregateDocument) -> OutputResult<()> {
        Err(OutputError::Write("disk full".to_string()))
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn category_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<li><a href="{}">link</a></li>"#, href))
        .collect();
    format!(
        r#"<html><body><a href="/wiki/Main_Page">Main page</a><ul>{}</ul></body></html>"#,
        anchors
    )
}

fn foo_page() -> String {
    r##"<html><body>
        <table class="wikitable">
            <tr><th>Rank</th><th>Passport</th></tr>
            <tr><td>1</td><td>Visa required</td></tr>
        </table>
        <table class="wikitable">
            <tr><th>Country</th><th>Visa requirement</th><th>Notes</th></tr>
            <tr><td>Bar</td><td>Visa required</td><td>Max 90 days<sup class="reference"><a href="#cite_note-1">[1]</a></sup></td></tr>
        </table>
        <ol class="references">
            <li id="cite_note-1"><a href="#cite_ref-1">^</a>
                <span class="reference-text"><a class="external text" href="https://example.com/src">Source</a></span></li>
        </ol>
    </body></html>"##
        .to_string()
}

async fn mount_category(server: &MockServer, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(html(category_page(links)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_nationality() {
    let mock_server = MockServer::start().await;
    mount_category(&mock_server, &["/wiki/Visa_requirements_for_Foo_citizens"]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Foo_citizens"))
        .respond_with(html(foo_page()))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("visa.json");
    let config = create_test_config(&mock_server.uri(), &json_path.display().to_string());

    let report = harvest(config).await.expect("Harvest failed");

    assert_eq!(report.identifiers_discovered, 1);
    assert_eq!(report.pages_extracted, 1);
    assert_eq!(report.pages_failed, 0);
    assert_eq!(report.tables_total, 2);
    assert_eq!(report.tables_matched, 1);
    assert_eq!(report.countries_recorded, 1);
    assert!(report.persisted);

    let written = std::fs::read_to_string(&json_path).expect("Failed to read output");
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        value,
        json!({
            "Foo": {
                "Bar": {
                    "visaRequirement": true,
                    "notes": "Max 90 days",
                    "refs": ["https://example.com/src"]
                }
            }
        })
    );
    assert!(written.contains("\n  \"Foo\": {"));
}

#[tokio::test]
async fn test_duplicate_links_fetch_once() {
    let mock_server = MockServer::start().await;
    mount_category(
        &mock_server,
        &[
            "/wiki/Visa_requirements_for_Foo_citizens",
            "/wiki/Visa_requirements_for_Foo_citizens",
            "/wiki/Visa_requirements_for_Foo_citizens#Asia",
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Foo_citizens"))
        .respond_with(html(foo_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.json");
    let output = MemoryOutput::default();
    let report = Harvester::new(config)
        .unwrap()
        .run(&output)
        .await
        .expect("Harvest failed");

    assert_eq!(report.links_matched, 3);
    assert_eq!(report.identifiers_discovered, 1);
    assert_eq!(output.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_page_leaves_empty_slot() {
    let mock_server = MockServer::start().await;
    mount_category(
        &mock_server,
        &[
            "/wiki/Visa_requirements_for_Foo_citizens",
            "/wiki/Visa_requirements_for_Chinese_citizens_of_Macau",
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Foo_citizens"))
        .respond_with(html(foo_page()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Chinese_citizens_of_Macau"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.json");
    let output = MemoryOutput::default();
    let report = Harvester::new(config)
        .unwrap()
        .run(&output)
        .await
        .expect("Harvest failed");

    assert_eq!(report.identifiers_discovered, 2);
    assert_eq!(report.pages_extracted, 1);
    assert_eq!(report.pages_failed, 1);

    let value = output.json();
    assert_eq!(value["Chinese_Macau"], json!({}));
    assert_eq!(value["Foo"]["Bar"]["visaRequirement"], json!(true));
}

#[tokio::test]
async fn test_many_pages_under_small_worker_cap() {
    let mock_server = MockServer::start().await;
    let names: Vec<String> = (0..12).map(|i| format!("Nation{}", i)).collect();
    let links: Vec<String> = names
        .iter()
        .map(|name| format!("/wiki/Visa_requirements_for_{}_citizens", name))
        .collect();
    let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
    mount_category(&mock_server, &link_refs).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Nation0_citizens"))
        .respond_with(html(foo_page()))
        .mount(&mock_server)
        .await;

    // Every other nationality page shares one generic table
    Mock::given(method("GET"))
        .respond_with(html(
            r#"<html><body><table class="wikitable">
                <tr><th>Countries and territories</th><th>Visa requirement</th></tr>
                <tr><td>Baz</td><td>Visa not required</td></tr>
                <tr><td>Qux</td><td>Visa on arrival</td></tr>
            </table></body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), "unused.json");
    config.crawler.max_concurrent_pages_open = 2;

    let output = MemoryOutput::default();
    let report = Harvester::new(config)
        .unwrap()
        .run(&output)
        .await
        .expect("Harvest failed");

    assert_eq!(report.identifiers_discovered, 12);
    assert_eq!(report.pages_extracted, 12);
    assert_eq!(report.countries_recorded, 1 + 11 * 2);

    let value = output.json();
    assert_eq!(value.as_object().unwrap().len(), 12);
    assert_eq!(value["Nation5"]["Baz"]["visaRequirement"], json!(false));
    assert_eq!(value["Nation5"]["Qux"]["visaRequirement"], json!("Visa on arrival"));
}

#[tokio::test]
async fn test_category_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.json");
    let output = MemoryOutput::default();
    let result = Harvester::new(config).unwrap().run(&output).await;

    assert!(matches!(result, Err(HarvestError::Discovery { .. })));
    assert_eq!(output.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_category_writes_empty_document() {
    let mock_server = MockServer::start().await;
    mount_category(&mock_server, &[]).await;

    let config = create_test_config(&mock_server.uri(), "unused.json");
    let output = MemoryOutput::default();
    let report = Harvester::new(config)
        .unwrap()
        .run(&output)
        .await
        .expect("Harvest failed");

    assert_eq!(report.identifiers_discovered, 0);
    assert!(report.persisted);
    assert_eq!(output.json(), json!({}));
}

#[tokio::test]
async fn test_output_failure_is_not_fatal() {
    let mock_server = MockServer::start().await;
    mount_category(&mock_server, &["/wiki/Visa_requirements_for_Foo_citizens"]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Foo_citizens"))
        .respond_with(html(foo_page()))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.json");
    let report = Harvester::new(config)
        .unwrap()
        .run(&FailingOutput)
        .await
        .expect("Output failure must not abort the harvest");

    assert_eq!(report.pages_extracted, 1);
    assert!(!report.persisted);
}

#[tokio::test]
async fn test_custom_policies_reach_extraction() {
    let mock_server = MockServer::start().await;
    mount_category(&mock_server, &["/wiki/Visa_requirements_for_Foo_citizens"]).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Foo_citizens"))
        .respond_with(html(foo_page()))
        .mount(&mock_server)
        .await;

    // Accept only the ranking table, which the default classifier skips
    let extractor = PageExtractor::new(
        TableClassifier::with_pattern(r"(?i)^rank$").unwrap(),
        RequirementClassifier::default(),
    );
    let config = create_test_config(&mock_server.uri(), "unused.json");
    let output = MemoryOutput::default();
    let report = Harvester::with_policies(config, IdentifierResolver::default(), extractor)
        .unwrap()
        .run(&output)
        .await
        .expect("Harvest failed");

    assert_eq!(report.tables_total, 2);
    assert_eq!(report.tables_matched, 1);
    assert_eq!(
        output.json(),
        json!({
            "Foo": {
                "1": {
                    "visaRequirement": true,
                    "notes": "Visa required",
                    "refs": []
                }
            }
        })
    );
}

#[tokio::test]
async fn test_xhtml_category_and_pages_are_parsed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            category_page(&["/wiki/Visa_requirements_for_Foo_citizens"]),
            "application/xhtml+xml",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Visa_requirements_for_Foo_citizens"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(foo_page(), "application/xhtml+xml"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.json");
    let output = MemoryOutput::default();
    let report = Harvester::new(config)
        .unwrap()
        .run(&output)
        .await
        .expect("Harvest failed");

    assert_eq!(report.pages_extracted, 1);
    assert_eq!(report.pages_failed, 0);
    assert_eq!(output.json()["Foo"]["Bar"]["visaRequirement"], json!(true));
}
