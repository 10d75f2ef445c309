use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use journal_client::fallback::fallback_articles;
use journal_client::forms::{ARTICLE_SAVE_FAILED, ArticleForm, FormErrors};
use journal_client::listing::{
    ARTICLE_SEARCH_FIELDS, READER_PAGE_SIZE, ListQuery, load_listing,
};
use journal_client::models::LoginPayload;
use journal_client::{ClientError, JournalClient, Role};

const TOKEN: &str = "tok-1";

#[derive(Clone, Default)]
struct MockApi {
    article_requests: Arc<Mutex<Vec<(HashMap<String, String>, Option<String>)>>>,
    deleted_categories: Arc<Mutex<Vec<String>>>,
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["username"] == "johndoe" && body["password"] == "secret123" {
        (
            StatusCode::OK,
            Json(json!({"token": TOKEN, "role": "Admin", "refreshToken": "ref-1"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn profile(headers: HeaderMap) -> impl IntoResponse {
    if bearer(&headers).as_deref() == Some("Bearer tok-1") {
        (
            StatusCode::OK,
            Json(json!({"id": "u1", "username": "johndoe", "role": "Admin"})),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid token"})))
    }
}

async fn list_articles(
    State(state): State<MockApi>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state
        .article_requests
        .lock()
        .expect("article requests mutex poisoned")
        .push((query, bearer(&headers)));

    Json(json!({
        "data": [{
            "id": "a1",
            "title": "Rust at the edge",
            "content": "body",
            "category": {"id": "c1", "name": "Technology"},
            "createdAt": "2025-04-13T10:55:12.000Z"
        }],
        "total": 31,
        "page": 1,
        "limit": 9
    }))
}

async fn list_categories() -> Json<Value> {
    Json(json!([
        {"id": "c1", "name": "Technology", "createdAt": "2025-01-15T09:00:00Z"},
        {"id": "c2", "name": "Design"}
    ]))
}

async fn create_article() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "Validation failed",
            "errors": {"title": ["Title already exists"]}
        })),
    )
}

async fn delete_category(State(state): State<MockApi>, Path(id): Path<String>) -> StatusCode {
    state
        .deleted_categories
        .lock()
        .expect("deleted categories mutex poisoned")
        .push(id);
    StatusCode::NO_CONTENT
}

async fn spawn_api(state: MockApi) -> String {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/articles", get(list_articles).post(create_article))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", delete(delete_category))
        .with_state(state);
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock api must bind");
    let addr = listener.local_addr().expect("mock api must have address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock api must serve");
    });

    format!("http://{addr}/api")
}

async fn logged_in_client(base_url: String) -> JournalClient {
    let mut client = JournalClient::new(base_url).expect("client must build");
    client
        .login(&LoginPayload {
            username: "johndoe".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .expect("login must succeed");
    client
}

#[tokio::test]
async fn login_stores_token_and_list_requests_carry_it() {
    let state = MockApi::default();
    let client = logged_in_client(spawn_api(state.clone()).await).await;
    assert_eq!(client.get_token(), Some(TOKEN));

    let query = ListQuery::new(READER_PAGE_SIZE)
        .with_search("rust")
        .with_category(Some("c1"))
        .with_page(2)
        .with_search_fields(ARTICLE_SEARCH_FIELDS);
    let page = client.list_articles(&query).await.expect("list must succeed");

    assert_eq!(page.total, Some(31));
    assert_eq!(page.items[0].category_name(), "Technology");

    let requests = state
        .article_requests
        .lock()
        .expect("article requests mutex poisoned")
        .clone();
    assert_eq!(requests.len(), 1);
    let (params, auth) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer tok-1"));
    assert_eq!(params.get("search").map(String::as_str), Some("rust"));
    assert_eq!(params.get("category").map(String::as_str), Some("c1"));
    assert_eq!(params.get("page").map(String::as_str), Some("2"));
    assert_eq!(params.get("limit").map(String::as_str), Some("9"));
    assert_eq!(
        params.get("searchFields").map(String::as_str),
        Some(ARTICLE_SEARCH_FIELDS)
    );
}

#[tokio::test]
async fn wrong_credentials_keep_client_logged_out() {
    let base_url = spawn_api(MockApi::default()).await;
    let mut client = JournalClient::new(base_url).expect("client must build");

    let err = client
        .login(&LoginPayload {
            username: "johndoe".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .expect_err("login must fail");

    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Invalid credentials"));
    assert!(client.get_token().is_none());
}

#[tokio::test]
async fn verify_token_distinguishes_valid_and_rejected_tokens() {
    let client = JournalClient::new(spawn_api(MockApi::default()).await).expect("client");

    assert!(client.verify_token(TOKEN).await.expect("verification must run"));
    assert!(!client.verify_token("forged").await.expect("verification must run"));
}

#[tokio::test]
async fn profile_uses_stored_token() {
    let client = logged_in_client(spawn_api(MockApi::default()).await).await;
    let profile = client.profile().await.expect("profile must load");
    assert_eq!(profile.username, "johndoe");
    assert_eq!(profile.role, Role::Admin);
}

#[tokio::test]
async fn categories_accept_bare_array_response() {
    let client = JournalClient::new(spawn_api(MockApi::default()).await).expect("client");
    let page = client
        .list_categories(&ListQuery::new(10))
        .await
        .expect("list must succeed");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, None);
    assert!(page.items[1].created_at.is_none());
}

#[tokio::test]
async fn structured_validation_errors_reach_the_form() {
    let client = logged_in_client(spawn_api(MockApi::default()).await).await;
    let payload = ArticleForm {
        title: "Duplicate".to_string(),
        content: "Body".to_string(),
        category_id: "c1".to_string(),
        image_url: None,
    }
    .submit(&[])
    .expect("form must be valid locally");

    let err = client
        .create_article(&payload)
        .await
        .expect_err("api must reject");
    let errors = FormErrors::from_submit_error(&err, ARTICLE_SAVE_FAILED);
    assert_eq!(errors.field("title"), Some("Title already exists"));
}

#[tokio::test]
async fn delete_category_requires_token_and_hits_api() {
    let state = MockApi::default();
    let base_url = spawn_api(state.clone()).await;

    let anonymous = JournalClient::new(base_url.clone()).expect("client");
    let err = anonymous
        .delete_category("c1")
        .await
        .expect_err("anonymous delete must fail locally");
    assert!(matches!(err, ClientError::Unauthorized(_)));

    let client = logged_in_client(base_url).await;
    client.delete_category("c2").await.expect("delete must succeed");
    let deleted = state
        .deleted_categories
        .lock()
        .expect("deleted categories mutex poisoned")
        .clone();
    assert_eq!(deleted, vec!["c2".to_string()]);
}

#[tokio::test]
async fn unreachable_api_degrades_to_fallback_articles() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe must bind");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);

    let client = JournalClient::new(format!("http://{addr}/api")).expect("client");
    let fallback = fallback_articles();
    let listing = load_listing(&client, &ListQuery::new(READER_PAGE_SIZE), &fallback).await;

    assert!(listing.degraded);
    assert_eq!(listing.items, fallback);
}
