//! The reqwest client and the session manager against an in-process HTTP
//! server that speaks the identity and catalog API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use recipebook_core::api::{ApiClient, ApiError};
use recipebook_core::auth::{
    AuthError, AuthProvider, MemoryTokenStore, SessionManager, TokenStore, ValidationError,
};
use recipebook_core::navigation::{History, Route};
use recipebook_core::views::{seasons_page, SeasonsPage};

const TOKEN: &str = "T";

#[derive(Clone, Default)]
struct Counters {
    profile_calls: Arc<AtomicUsize>,
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer T")
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body == json!({"Email": "a@b.com", "Password": "pw"}) {
        (StatusCode::OK, Json(json!({"access_token": TOKEN})))
    } else if body == json!({"Email": "empty@b.com", "Password": "pw"}) {
        (StatusCode::OK, Json(json!({})))
    } else if body["Email"] == "paywall@b.com" {
        (StatusCode::PAYMENT_REQUIRED, Json(json!({"message": "bad credentials"})))
    } else if body["Email"] == "teapot@b.com" {
        (StatusCode::IM_A_TEAPOT, Json(json!({})))
    } else if body["Email"] == "slow@b.com" {
        (StatusCode::TOO_MANY_REQUESTS, Json(json!({"message": "slow down"})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": 401, "status": "Unauthorized", "message": "bad credentials"})),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["Email"] == "gone@b.com" {
        (StatusCode::METHOD_NOT_ALLOWED, Json(json!({})))
    } else if body["Email"] == "taken@b.com" {
        (
            StatusCode::CONFLICT,
            Json(json!({"message": "A user with this email already exists."})),
        )
    } else if body["Username"].is_string() && body["Password"].is_string() {
        (
            StatusCode::CREATED,
            Json(json!({"message": "User registered successfully."})),
        )
    } else {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({})))
    }
}

async fn profile(State(counters): State<Counters>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    counters.profile_calls.fetch_add(1, Ordering::SeqCst);
    if bearer_ok(&headers) {
        (
            StatusCode::OK,
            Json(json!({
                "ID": 1,
                "Username": "a",
                "Email": "a@b.com",
                "Role": "user",
                "Recipes": [{"RecipeID": 10, "Name": "Brik", "UserID": 1, "Status": "Pending"}]
            })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"msg": "Token has expired"})))
    }
}

async fn seasons(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer_ok(&headers) {
        (
            StatusCode::OK,
            Json(json!([
                {"SeasonID": 1, "Season": "Summer", "Description": "Hot days"},
                {"SeasonID": 2, "Season": "Winter", "Description": null}
            ])),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"msg": "Missing Authorization Header"})))
    }
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let all = [(1, "Couscous"), (2, "Brik"), (3, "Lablabi")];
    let keyword = params.get("keyword").cloned().unwrap_or_default().to_lowercase();
    let found: Vec<Value> = all
        .iter()
        .filter(|(_, name)| name.to_lowercase().contains(&keyword))
        .map(|(id, name)| json!({"RecipeID": id, "Name": name, "Status": "approved"}))
        .collect();
    Json(Value::Array(found))
}

async fn spawn_server() -> (String, Counters) {
    let counters = Counters::default();
    let router = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/profile", get(profile))
        .route("/seasons", get(seasons))
        .route("/recipe/search", get(search))
        .with_state(counters.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    (format!("http://{}", addr), counters)
}

/// A base URL nothing is listening on
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

fn manager_for(api: &ApiClient, store: Arc<MemoryTokenStore>, history: Arc<History>) -> SessionManager {
    SessionManager::new(Arc::new(api.clone()), store, history)
}

#[tokio::test]
async fn login_round_trips_profile_unmodified() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let store = Arc::new(MemoryTokenStore::new());
    let history = Arc::new(History::default());
    let manager = manager_for(&api, store.clone(), history.clone());

    manager.login("a@b.com", "pw").await.expect("login");

    let user = manager.user().expect("session");
    assert_eq!(user.id, 1);
    assert_eq!(user.username, "a");
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.role, "user");
    assert_eq!(user.recipes.len(), 1);
    assert_eq!(user.recipes[0].name, "Brik");
    assert_eq!(store.load().expect("load").as_deref(), Some(TOKEN));
    assert_eq!(history.current(), Route::Home);
}

#[tokio::test]
async fn login_rejection_message_comes_from_body() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let store = Arc::new(MemoryTokenStore::new());
    let manager = manager_for(&api, store.clone(), Arc::new(History::default()));

    let err = manager.login("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "bad credentials");
    assert_eq!(store.load().expect("load"), None);
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn login_without_access_token_fails() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");

    let err = api.login("empty@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn unmapped_login_status_keeps_server_message() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let store = Arc::new(MemoryTokenStore::new());
    let manager = manager_for(&api, store.clone(), Arc::new(History::default()));

    let err = manager.login("paywall@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.to_string(), "bad credentials");
    assert_eq!(err.user_message(), "bad credentials");
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn unmapped_login_status_without_message_uses_generic_text() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    let err = manager.login("teapot@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.to_string(), "Login failed");
}

#[tokio::test]
async fn rate_limited_login_keeps_server_message() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    let err = manager.login("slow@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.to_string(), "slow down");
}

#[tokio::test]
async fn unmapped_register_status_without_message_uses_generic_text() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    let err = manager.register("a", "gone@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.to_string(), "Registration failed");
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn register_then_login() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    manager.register("a", "a@b.com", "pw").await.expect("register");

    assert!(manager.is_authenticated());
}

#[tokio::test]
async fn register_conflict_message() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    let err = manager.register("a", "taken@b.com", "pw").await.unwrap_err();

    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(err.to_string(), "A user with this email already exists.");
}

#[tokio::test]
async fn initialize_discards_expired_token() {
    let (url, counters) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let store = Arc::new(MemoryTokenStore::with_token("expired"));
    let history = Arc::new(History::default());
    let manager = manager_for(&api, store.clone(), history.clone());

    manager.initialize().await;

    assert_eq!(counters.profile_calls.load(Ordering::SeqCst), 1);
    assert!(manager.user().is_none());
    assert_eq!(store.load().expect("load"), None);
    assert_eq!(history.current(), Route::Login);
}

#[tokio::test]
async fn initialize_without_token_sends_nothing() {
    let (url, counters) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    manager.initialize().await;

    assert_eq!(counters.profile_calls.load(Ordering::SeqCst), 0);
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn unreachable_server() {
    let api = ApiClient::new(dead_url().await).expect("client");

    // Login: generic failure, not a rejection
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));
    let err = manager.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Api(ApiError::NetworkError(_))));

    // Hydration: collapses to logout
    let store = Arc::new(MemoryTokenStore::with_token(TOKEN));
    let history = Arc::new(History::default());
    let manager = manager_for(&api, store.clone(), history.clone());
    manager.initialize().await;
    assert!(manager.user().is_none());
    assert_eq!(store.load().expect("load"), None);
    assert_eq!(history.current(), Route::Login);

    assert!(matches!(
        ValidationError::from(&api.profile(TOKEN).await.unwrap_err()),
        ValidationError::Network(_)
    ));
}

#[tokio::test]
async fn search_sends_keyword() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client").with_token(TOKEN.to_string());

    let found = api.search_recipes("bri").await.expect("search");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Brik");
}

#[tokio::test]
async fn seasons_page_requires_login() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(&api, Arc::new(MemoryTokenStore::new()), Arc::new(History::default()));

    let page = AuthProvider::new(manager).mount(seasons_page(&api)).await;

    assert_eq!(page, SeasonsPage::LoginRequired);
}

#[tokio::test]
async fn seasons_page_lists_seasons_when_logged_in() {
    let (url, _) = spawn_server().await;
    let api = ApiClient::new(url).expect("client");
    let manager = manager_for(
        &api,
        Arc::new(MemoryTokenStore::with_token(TOKEN)),
        Arc::new(History::default()),
    );

    let page = AuthProvider::new(manager).mount(seasons_page(&api)).await;

    let SeasonsPage::Loaded(cards) = page else {
        panic!("expected seasons, got {:?}", page);
    };
    let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Summer", "Winter"]);
    assert_eq!(cards[1].route, Route::SeasonRecipes(2));
}
