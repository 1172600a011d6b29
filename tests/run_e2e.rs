//! End-to-end tests for the run endpoint.
//!
//! The real router is driven with `oneshot`; the document host, the LLM and
//! the embedding API are small axum servers on ephemeral ports.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use doc_answer::api;
use doc_answer::config::Config;
use doc_answer::state::AppState;

const TOKEN: &str = "test-token";

const POLICY: &str = "Grace period: A grace period of thirty days is provided for premium payment after the due date to renew or continue the policy.

Waiting period: Pre-existing diseases are covered after thirty-six months of continuous coverage since the first policy inception.

Maternity: The policy covers maternity expenses, including childbirth, after twenty-four months of continuous coverage.

Cataract: The policy has a specific waiting period of two years for cataract surgery.";

type Hits = Arc<AtomicUsize>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ─── Document host ───────────────────────────────────────

async fn policy_text(State(hits): State<Hits>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    POLICY
}

async fn binary_blob(State(hits): State<Hits>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        vec![0x7fu8, 0x45, 0x4c, 0x46, 0x00, 0x01, 0x00, 0x00],
    )
        .into_response()
}

/// The policy as a Word document.
async fn policy_docx() -> Response {
    let docx = POLICY
        .split("\n\n")
        .fold(docx_rs::Docx::new(), |docx, paragraph| {
            docx.add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(paragraph)),
            )
        });
    let mut bytes = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut bytes).unwrap();
    (
        [(
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        )],
        bytes.into_inner(),
    )
        .into_response()
}

/// Sent with a Content-Length header.
async fn large_text() -> String {
    POLICY.repeat(8)
}

/// Sent chunked, so the size is only known while reading.
async fn large_stream() -> Body {
    let chunks = (0..8).map(|_| Ok::<_, std::io::Error>(POLICY.to_string()));
    Body::from_stream(futures_util::stream::iter(chunks))
}

async fn spawn_document_server() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/policy.txt", get(policy_text))
        .route("/policy.docx", get(policy_docx))
        .route("/large.txt", get(large_text))
        .route("/large-stream.txt", get(large_stream))
        .route("/blob.bin", get(binary_blob))
        .with_state(hits.clone());
    (spawn(app).await, hits)
}

// ─── LLM ─────────────────────────────────────────────────

fn question_from_prompt(prompt: &str) -> String {
    prompt
        .rsplit_once("Question: ")
        .map(|(_, rest)| rest.trim_end_matches("Answer:").trim().to_string())
        .unwrap_or_default()
}

/// Answer text for a prompt. Questions mentioning `slow` or `fail` misbehave;
/// `#n` delays scramble completion order.
async fn mock_answer(prompt: &str) -> Result<String, Response> {
    let question = question_from_prompt(prompt);
    if question.contains("fail") {
        return Err((StatusCode::SERVICE_UNAVAILABLE, "model overloaded").into_response());
    }
    if question.contains("slow") {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    if let Some(n) = question
        .split_once('#')
        .and_then(|(_, rest)| rest.chars().next())
        .and_then(|c| c.to_digit(10))
    {
        tokio::time::sleep(Duration::from_millis(u64::from(9 - n.min(9)) * 25)).await;
    }

    let mut answer = format!("answer to: {question}");
    if prompt.contains("thirty days") {
        answer.push_str(" [grounded]");
    }
    Ok(answer)
}

async fn mock_openai_chat(State(hits): State<Hits>, Json(body): Json<Value>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    match mock_answer(prompt).await {
        Ok(answer) => Json(json!({
            "choices": [{"message": {"role": "assistant", "content": answer}}]
        }))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn spawn_llm_server() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(mock_openai_chat))
        .with_state(hits.clone());
    (spawn(app).await, hits)
}

async fn mock_gemini(headers: http::HeaderMap, Json(body): Json<Value>) -> Response {
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some("gemini-key") {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    match mock_answer(prompt).await {
        Ok(answer) => {
            let (head, tail) = answer.split_at(answer.len() / 2);
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": head}, {"text": tail}]},
                    "finishReason": "STOP"
                }]
            }))
            .into_response()
        }
        Err(resp) => resp,
    }
}

// ─── Embeddings ──────────────────────────────────────────

fn mock_vector(text: &str) -> Vec<f32> {
    if text.to_lowercase().contains("grace") {
        vec![1.0, 0.0]
    } else {
        vec![0.0, 1.0]
    }
}

async fn mock_embeddings(State(hits): State<Hits>, Json(body): Json<Value>) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    let data: Vec<Value> = body["input"]
        .as_array()
        .map(|inputs| {
            inputs
                .iter()
                .enumerate()
                .map(|(index, t)| {
                    json!({"index": index, "embedding": mock_vector(t.as_str().unwrap_or_default())})
                })
                .collect()
        })
        .unwrap_or_default();
    Json(json!({ "data": data }))
}

/// Always returns one vector fewer than requested.
async fn mock_short_embeddings(Json(body): Json<Value>) -> Json<Value> {
    let count = body["input"].as_array().map_or(0, |a| a.len());
    let data: Vec<Value> = (0..count.saturating_sub(1))
        .map(|index| json!({"index": index, "embedding": [1.0, 0.0]}))
        .collect();
    Json(json!({ "data": data }))
}

async fn spawn_embedding_server() -> (String, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/v1/embeddings", post(mock_embeddings))
        .route("/short/v1/embeddings", post(mock_short_embeddings))
        .with_state(hits.clone());
    (spawn(app).await, hits)
}

// ─── Helpers ─────────────────────────────────────────────

fn test_config(llm_url: &str) -> Config {
    let mut config = Config::default();
    config.auth_token = TOKEN.to_string();
    config.llm.provider = "openai".to_string();
    config.llm.base_url = llm_url.to_string();
    config.llm.model = "mock-model".to_string();
    config.llm.api_key = Some("llm-key".to_string());
    config
}

fn build_app(config: Config) -> Router {
    api::router(AppState::new(config).unwrap())
}

fn run_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/hackrx/run")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn answers(body: &Value) -> Vec<String> {
    body["answers"]
        .as_array()
        .expect("answers array")
        .iter()
        .map(|a| a.as_str().unwrap().to_string())
        .collect()
}

// ─── Tests ───────────────────────────────────────────────

#[tokio::test]
async fn e2e_single_question_returns_one_answer() {
    let (docs, _) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;
    let app = build_app(test_config(&llm));

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/policy.txt"), "questions": ["What is the grace period?"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        answers(&body),
        vec!["answer to: What is the grace period? [grounded]"]
    );
    assert_eq!(llm_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn e2e_answers_keep_question_order() {
    let (docs, _) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;
    let app = build_app(test_config(&llm));

    let questions: Vec<String> = (1..=7).map(|n| format!("Clause #{n} coverage?")).collect();
    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/policy.txt"), "questions": questions}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let got = answers(&body);
    assert_eq!(got.len(), questions.len());
    for (answer, question) in got.iter().zip(&questions) {
        assert!(
            answer.starts_with(&format!("answer to: {question}")),
            "{answer:?} does not answer {question:?}"
        );
    }
    assert_eq!(llm_hits.load(Ordering::SeqCst), 7);
}

#[tokio::test]
async fn e2e_retrieval_selects_relevant_segment() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let mut config = test_config(&llm);
    config.retrieval.top_k = 1;
    config.chunking.chunk_size = 200;
    config.chunking.chunk_overlap = 0;
    let app = build_app(config);

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({
                "documents": format!("{docs}/policy.txt"),
                "questions": [
                    "What is the grace period for premium payment?",
                    "What is the waiting period for cataract surgery?"
                ]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let got = answers(&body);
    assert!(got[0].ends_with("[grounded]"), "{:?}", got[0]);
    assert!(!got[1].ends_with("[grounded]"), "{:?}", got[1]);
}

#[tokio::test]
async fn e2e_missing_or_wrong_token_is_401_without_fetch() {
    let (docs, doc_hits) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;
    let body = json!({"documents": format!("{docs}/policy.txt"), "questions": ["q?"]});

    for token in [None, Some("wrong-token")] {
        let app = build_app(test_config(&llm));
        let (status, json) = send(app, run_request(token, body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "invalid or missing bearer token");
    }

    let app = build_app(test_config(&llm));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/hackrx/run")
        .header("content-type", "application/json")
        .header("authorization", TOKEN)
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(doc_hits.load(Ordering::SeqCst), 0);
    assert_eq!(llm_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_empty_questions_still_fetch_document() {
    let (docs, doc_hits) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;
    let app = build_app(test_config(&llm));

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/policy.txt"), "questions": []}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"answers": []}));
    assert_eq!(doc_hits.load(Ordering::SeqCst), 1);
    assert_eq!(llm_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_unreachable_document_is_error_without_answers() {
    let (docs, _) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;

    for path in ["/missing.pdf", "/blob.bin"] {
        let app = build_app(test_config(&llm));
        let (status, body) = send(
            app,
            run_request(
                Some(TOKEN),
                json!({"documents": format!("{docs}{path}"), "questions": ["q?"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert!(body.get("answers").is_none());
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("failed to load document"));
    }

    // Nothing listening on port 9
    let app = build_app(test_config(&llm));
    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": "http://127.0.0.1:9/policy.pdf", "questions": ["q?"]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("answers").is_none());
    assert_eq!(llm_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_oversized_document_is_rejected() {
    let (docs, _) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;

    for path in ["/large.txt", "/large-stream.txt"] {
        let mut config = test_config(&llm);
        config.fetch.max_bytes = POLICY.len() * 2;
        let app = build_app(config);
        let (status, body) = send(
            app,
            run_request(
                Some(TOKEN),
                json!({"documents": format!("{docs}{path}"), "questions": ["q?"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        let error = body["error"].as_str().unwrap();
        assert!(
            error.starts_with("failed to load document: document too large"),
            "{path}: {error}"
        );
    }
    assert_eq!(llm_hits.load(Ordering::SeqCst), 0);

    // The same documents pass under the default limit
    let app = build_app(test_config(&llm));
    let (status, _) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/large-stream.txt"), "questions": ["q?"]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn e2e_docx_document_is_answered() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let mut config = test_config(&llm);
    config.retrieval.top_k = 1;
    config.chunking.chunk_size = 200;
    config.chunking.chunk_overlap = 0;
    let app = build_app(config);

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({
                "documents": format!("{docs}/policy.docx"),
                "questions": ["What is the grace period for premium payment?"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        answers(&body),
        vec!["answer to: What is the grace period for premium payment? [grounded]"]
    );
}

#[tokio::test]
async fn e2e_invalid_requests_are_400() {
    let (llm, _) = spawn_llm_server().await;

    let cases = [
        json!({"documents": "ftp://example.com/policy.pdf", "questions": ["q?"]}),
        json!({"documents": "   ", "questions": ["q?"]}),
        json!({"documents": [], "questions": ["q?"]}),
        json!({"documents": "https://example.com/a.pdf", "questions": ["q?", "  "]}),
        json!({"questions": ["q?"]}),
    ];
    for case in cases {
        let app = build_app(test_config(&llm));
        let (status, body) = send(app, run_request(Some(TOKEN), case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert!(body["error"].is_string(), "{case}");
    }

    let app = build_app(test_config(&llm));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/hackrx/run")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn e2e_one_failed_question_fails_the_run() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let app = build_app(test_config(&llm));

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({
                "documents": format!("{docs}/policy.txt"),
                "questions": ["What is the grace period?", "please fail", "Cataract?"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("answers").is_none());
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("upstream service error"), "{error}");
    assert!(error.contains("question 2"), "{error}");
}

#[tokio::test]
async fn e2e_slow_llm_hits_request_budget() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let mut config = test_config(&llm);
    config.request_timeout_secs = 1;
    let app = build_app(config);

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/policy.txt"), "questions": ["a slow question"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "request exceeded 1s budget");
}

#[tokio::test]
async fn e2e_gemini_provider() {
    let (docs, _) = spawn_document_server().await;
    let gemini = spawn(Router::new().route("/v1beta/models/{*rest}", post(mock_gemini))).await;

    let mut config = test_config(&gemini);
    config.llm.provider = "gemini".to_string();
    config.llm.model = "gemini-2.5-flash".to_string();
    config.llm.api_key = Some("gemini-key".to_string());
    let app = build_app(config);

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/policy.txt"), "questions": ["What is the grace period?"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        answers(&body),
        vec!["answer to: What is the grace period? [grounded]"]
    );
}

#[tokio::test]
async fn e2e_embeddings_join_retrieval() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let (embed, embed_hits) = spawn_embedding_server().await;

    let mut config = test_config(&llm);
    config.embedding.provider = "openai".to_string();
    config.embedding.base_url = embed.clone();
    config.embedding.api_key = Some("embed-key".to_string());
    config.retrieval.top_k = 1;
    config.chunking.chunk_size = 200;
    config.chunking.chunk_overlap = 0;
    let app = build_app(config);

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({
                "documents": format!("{docs}/policy.txt"),
                "questions": ["How long is the grace period?", "Is maternity covered?"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let got = answers(&body);
    assert_eq!(got.len(), 2);
    assert!(got[0].ends_with("[grounded]"), "{:?}", got[0]);
    // One batch for the segments plus one call per question
    assert_eq!(embed_hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn e2e_embedding_count_mismatch_is_502() {
    let (docs, _) = spawn_document_server().await;
    let (llm, llm_hits) = spawn_llm_server().await;
    let (embed, _) = spawn_embedding_server().await;

    let mut config = test_config(&llm);
    config.embedding.provider = "openai".to_string();
    config.embedding.base_url = format!("{embed}/short");
    let app = build_app(config);

    let (status, body) = send(
        app,
        run_request(
            Some(TOKEN),
            json!({"documents": format!("{docs}/policy.txt"), "questions": ["q?"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("answers").is_none());
    assert_eq!(llm_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_resubmission_updates_one_logged_record() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("queries.json");

    let mut config = test_config(&llm);
    config.database_url = Some(format!("file://{}", log_path.display()));
    let app = build_app(config);

    let request = json!({"documents": format!("{docs}/policy.txt"), "questions": ["What is the grace period?"]});
    for _ in 0..2 {
        let (status, _) = send(app.clone(), run_request(Some(TOKEN), request.clone())).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, records) = send(app.clone(), get_request("/queries", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    let records = records.as_array().unwrap().clone();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["submissions"], 2);
    assert_eq!(records[0]["questions"], json!(["What is the grace period?"]));

    let id = records[0]["id"].as_str().unwrap();
    let (status, record) = send(app.clone(), get_request(&format!("/queries/{id}"), Some(TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], id);

    let (status, _) = send(app.clone(), get_request("/queries/unknown", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app, get_request("/queries", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(log_path.exists());
}

#[tokio::test]
async fn e2e_alias_route_and_service_endpoints() {
    let (docs, _) = spawn_document_server().await;
    let (llm, _) = spawn_llm_server().await;
    let app = build_app(test_config(&llm));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/hackrx/run")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::from(
            json!({"documents": format!("{docs}/policy.txt"), "questions": ["q?"]}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answers(&body).len(), 1);

    let (status, body) = send(app.clone(), get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(app.clone(), get_request("/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "doc-answer");

    let (status, body) = send(app, get_request("/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "route not found");

    // Empty log when DATABASE_URL is unset
    let app = build_app(test_config(&llm));
    let (status, body) = send(app, get_request("/queries", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
