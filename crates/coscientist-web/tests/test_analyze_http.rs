//! End-to-end submission cycles against a stub analysis service.
//!
//! Run with: cargo test --package coscientist-web --test test_analyze_http

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use coscientist_common::{ElementIds, EndpointConfig, OverlapPolicy, Query};
use coscientist_web::dom::{MemoryDocument, Node};
use coscientist_web::page::skeleton;
use coscientist_web::state::{Page, Phase};
use coscientist_web::status::StatusState;
use coscientist_web::submit::Orchestrator;
use coscientist_web::transport::HttpTransport;

type Seen = Arc<Mutex<Vec<Query>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn stub(seen: Seen, status: StatusCode, body: Value) -> Router {
    Router::new()
        .route(
            "/api/analyze",
            post(move |State(seen): State<Seen>, Json(query): Json<Query>| {
                let body = body.clone();
                async move {
                    seen.lock().unwrap().push(query);
                    (status, Json(body))
                }
            }),
        )
        .route("/api/health", get(|| async { Json(json!({"status": "ok"})) }))
        .with_state(seen)
}

fn orchestrator(base_url: &str) -> Orchestrator<HttpTransport> {
    let endpoint = EndpointConfig {
        base_url: base_url.to_string(),
        ..Default::default()
    };
    Orchestrator::new(HttpTransport::new(&endpoint).unwrap(), OverlapPolicy::default())
}

fn page(query: &str, organism: &str, focus: &str) -> Mutex<Page<MemoryDocument>> {
    let ids = ElementIds::default();
    let mut doc = skeleton(&ids);
    doc.set_value(&ids.query, query).unwrap();
    doc.set_value(&ids.organism, organism).unwrap();
    doc.set_value(&ids.focus, focus).unwrap();
    Mutex::new(Page::new(doc, ids))
}

fn texts(doc: &MemoryDocument, id: &str) -> Vec<String> {
    doc.children(id).unwrap().iter().map(Node::text_content).collect()
}

#[tokio::test]
async fn test_success_with_empty_lists() {
    let seen = Seen::default();
    let base = serve(stub(
        seen.clone(),
        StatusCode::OK,
        json!({"summary": "S", "entries": [], "hypotheses": [], "tasks": [], "interpretation": []}),
    ))
    .await;
    let page = page("insulin", "human", "structure");

    let report = orchestrator(&base).submit(&page).await;

    assert_eq!(report.phase(), Some(Phase::Success));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![Query::from_form("insulin", "human", "structure")]
    );
    let page = page.lock().unwrap();
    let doc = page.document();
    assert_eq!(doc.text("summary").unwrap(), "S");
    assert_eq!(texts(doc, "entries"), vec!["No items yet."]);
    assert_eq!(texts(doc, "hypotheses"), vec!["No items yet."]);
    assert_eq!(texts(doc, "tasks"), vec!["No items yet."]);
    assert_eq!(texts(doc, "interpretation"), vec!["No interpretation cues yet."]);
    assert_eq!(page.status().message, "Analysis ready.");
    assert_eq!(page.status().state, StatusState::Success);
}

#[tokio::test]
async fn test_success_renders_service_payload() {
    let seen = Seen::default();
    let base = serve(stub(
        seen.clone(),
        StatusCode::OK,
        json!({
            "summary": "Prioritized UniProt entries with functional context.",
            "entries": [
                {"accession": "P01308", "id": "INS_HUMAN", "protein_name": "Insulin",
                 "gene": "INS", "organism": "Homo sapiens", "function": null}
            ],
            "hypotheses": [{"statement": "Insulin (INS) may influence structure.",
                            "rationale": "Derived from UniProt functional annotation."}],
            "tasks": [{"task": "Retrieve pathway partners for Insulin.",
                       "data_needed": "Pathway databases, reagent catalogs."}],
            "interpretation": ["Insulin shows functional annotation linked to structure."],
            "meta": {"query": "insulin", "organism": "", "focus": "structure", "requestor": "127.0.0.1"}
        }),
    ))
    .await;
    let page = page("insulin", "", "structure");

    let report = orchestrator(&base).submit(&page).await;

    assert_eq!(report.phase(), Some(Phase::Success));
    let page = page.lock().unwrap();
    assert_eq!(
        texts(page.document(), "entries"),
        vec!["Insulin (P01308)Homo sapiens · INS\nNo function available."]
    );
    assert_eq!(texts(page.document(), "interpretation").len(), 1);
}

#[tokio::test]
async fn test_rejected_request_uses_detail() {
    let seen = Seen::default();
    let base = serve(stub(seen.clone(), StatusCode::BAD_REQUEST, json!({"detail": "bad organism"}))).await;
    let page = page("x", "", "");
    let before = page.lock().unwrap().document().element_html("entries");

    let report = orchestrator(&base).submit(&page).await;

    assert_eq!(report.phase(), Some(Phase::Error));
    let page = page.lock().unwrap();
    assert_eq!(page.status().message, "Error: bad organism");
    assert_eq!(page.status().state, StatusState::Error);
    assert_eq!(page.document().element_html("entries"), before);
    assert_eq!(page.document().text("summary").unwrap(), "");
}

#[tokio::test]
async fn test_rejected_request_without_detail_falls_back() {
    let router = Router::new().route(
        "/api/analyze",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded").into_response() }),
    );
    let base = serve(router).await;
    let page = page("x", "", "");

    orchestrator(&base).submit(&page).await;

    assert_eq!(page.lock().unwrap().status().message, "Error: Request failed");
}

#[tokio::test]
async fn test_malformed_success_body_is_an_error() {
    let router = Router::new().route("/api/analyze", post(|| async { "not json" }));
    let base = serve(router).await;
    let page = page("x", "", "");

    let report = orchestrator(&base).submit(&page).await;

    assert_eq!(report.phase(), Some(Phase::Error));
    let message = page.lock().unwrap().status().message.clone();
    assert!(message.starts_with("Error: malformed analysis response"), "{message}");
}

#[tokio::test]
async fn test_connection_failure_surfaces_transport_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let page = page("y", "", "");

    let report = orchestrator(&base).submit(&page).await;

    assert_eq!(report.phase(), Some(Phase::Error));
    let page = page.lock().unwrap();
    assert!(page.status().message.starts_with("Error: "));
    assert!(page.status().message.len() > "Error: ".len());
    assert_eq!(page.status().state, StatusState::Error);
}

#[tokio::test]
async fn test_health_probe() {
    let base = serve(stub(Seen::default(), StatusCode::OK, json!({}))).await;
    let endpoint = EndpointConfig { base_url: base, ..Default::default() };
    let transport = HttpTransport::new(&endpoint).unwrap();
    assert_eq!(transport.health().await.unwrap(), "ok");
}
