use httpmock::prelude::*;
use invoice_lookup::adapters::{HttpCrmLookup, HttpFieldExtractor};
use invoice_lookup::view::results_page;
use invoice_lookup::{LookupEngine, LookupError};
use std::time::Duration;

fn extractor_for(server: &MockServer) -> HttpFieldExtractor {
    HttpFieldExtractor::new(server.url("/extract"), Duration::from_secs(5))
}

fn crm_for(server: &MockServer) -> HttpCrmLookup {
    HttpCrmLookup::new(server.url("/opportunities"), Duration::from_secs(5))
}

#[tokio::test]
async fn test_end_to_end_lookup_with_matches() {
    let server = MockServer::start();

    let extract_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/extract")
            .json_body(serde_json::json!({ "document": "uploads/advice-001.pdf" }));
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"date":"2025-07-09","amount":"HKD 1,200.00","payee":"Acme Ltd","invoice":"25-AVS-RES-00109-RN"}"#);
    });

    let crm_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/opportunities")
            .query_param("invoice", "25-AVS-RES-00109-RN");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"company": "Acme Ltd", "premises": "12/F Tower A", "stage": "Won", "invoice": "25-AVS-RES-00109-RN"},
                {"company": "Acme Ltd", "premises": "3/F Annex", "stage": "Quoted", "invoice": "25-AVS-RES-00109-RN"}
            ]));
    });

    let engine = LookupEngine::new(extractor_for(&server), crm_for(&server));
    let page = engine.run("uploads/advice-001.pdf").await.unwrap();

    extract_mock.assert();
    crm_mock.assert();

    assert_eq!(page.extraction.len(), 4);
    assert_eq!(page.query.as_deref(), Some("25-AVS-RES-00109-RN"));
    assert_eq!(page.rows.len(), 2);

    let html = results_page(&page, "/").unwrap();
    assert!(html.contains("2 records found"));
    assert!(html.contains("<tr><th scope=\"row\">Date</th><td>2025-07-09</td></tr>"));
    assert!(html.contains("<td>12/F Tower A</td>"));
    assert!(html.contains("Run Another"));
}

#[tokio::test]
async fn test_end_to_end_lookup_without_matches() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/extract");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"invoice_number":"INV-404"}"#);
    });

    let crm_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/opportunities")
            .query_param("invoice", "INV-404");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let engine = LookupEngine::new(extractor_for(&server), crm_for(&server));
    let page = engine.run("doc").await.unwrap();

    crm_mock.assert();

    let html = results_page(&page, "/").unwrap();
    assert!(html.contains("0 records found"));
    assert!(html.contains("No matching records found in the CRM for invoice: INV-404"));
}

#[tokio::test]
async fn test_end_to_end_no_invoice_extracted_skips_crm() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/extract");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"payee":"Acme Ltd","amount":"HKD 500.00"}"#);
    });

    // No CRM mock registered: a request to it would make the test fail
    // with a connection refused error from the engine.
    let crm = HttpCrmLookup::new(
        "http://127.0.0.1:1/opportunities".to_string(),
        Duration::from_secs(1),
    );

    let engine = LookupEngine::new(extractor_for(&server), crm);
    let page = engine.run("doc").await.unwrap();

    assert_eq!(page.query, None);
    assert!(page.rows.is_empty());

    let html = results_page(&page, "/").unwrap();
    assert!(html.contains("No matching records found in the CRM for invoice: N/A"));
}

#[tokio::test]
async fn test_end_to_end_malformed_crm_row_is_render_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/extract");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"invoice":"INV-1"}"#);
    });

    server.mock(|when, then| {
        when.method(GET).path("/opportunities");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"company": "Acme Ltd", "premises": "12/F Tower A", "stage": "Won"}
            ]));
    });

    let engine = LookupEngine::new(extractor_for(&server), crm_for(&server));
    let page = engine.run("doc").await.unwrap();

    let err = results_page(&page, "/").unwrap_err();
    match err {
        LookupError::TemplateRenderError { message } => {
            assert!(message.contains("invoice"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_end_to_end_extractor_failure_propagates() {
    let server = MockServer::start();

    let extract_mock = server.mock(|when, then| {
        when.method(POST).path("/extract");
        then.status(503);
    });

    let engine = LookupEngine::new(extractor_for(&server), crm_for(&server));
    let err = engine.run("doc").await.unwrap_err();

    extract_mock.assert();
    assert!(matches!(err, LookupError::ApiError(_)));
}
