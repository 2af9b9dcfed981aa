//! Route-level tests: every tutorial endpoint driven through `Router::handle`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use tutorials::store::{InMemoryTutorialStore, SharedStore, StoreError, TutorialStore};
use tutorials::tutorial::Tutorial;
use tutorials::{Method, Request, Response, Router, api};

/// A store whose every call fails, for the 500 paths.
struct BrokenStore;

#[async_trait]
impl TutorialStore for BrokenStore {
    async fn find_all(&self) -> Result<Vec<Tutorial>, StoreError> { Err(StoreError::Poisoned) }
    async fn find_by_title_containing(&self, _: &str) -> Result<Vec<Tutorial>, StoreError> {
        Err(StoreError::Poisoned)
    }
    async fn find_by_published(&self, _: bool) -> Result<Vec<Tutorial>, StoreError> {
        Err(StoreError::Poisoned)
    }
    async fn find_by_id(&self, _: &str) -> Result<Option<Tutorial>, StoreError> {
        Err(StoreError::Poisoned)
    }
    async fn save(&self, _: Tutorial) -> Result<Tutorial, StoreError> { Err(StoreError::Poisoned) }
    async fn delete_by_id(&self, _: &str) -> Result<(), StoreError> { Err(StoreError::Poisoned) }
    async fn delete_all(&self) -> Result<(), StoreError> { Err(StoreError::Poisoned) }
    async fn ping(&self) -> Result<(), StoreError> { Err(StoreError::Poisoned) }
}

struct TestApp {
    store: Arc<InMemoryTutorialStore>,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemoryTutorialStore::new());
        let router = api::routes(store.clone() as SharedStore);
        Self { store, router }
    }

    async fn send(&self, method: Method, target: &str) -> Response {
        self.router.handle(Request::new(method, target, "")).await
    }

    async fn send_json(&self, method: Method, target: &str, body: Value) -> Response {
        let req = Request::new(method, target, body.to_string())
            .with_header("content-type", "application/json");
        self.router.handle(req).await
    }

    async fn create(&self, title: &str, description: &str) -> Value {
        let res = self
            .send_json(Method::Post, "/api/tutorials", json!({"title": title, "description": description}))
            .await;
        assert_eq!(res.status_code(), 201);
        body(&res)
    }

    async fn publish(&self, id: &str, title: &str) {
        let res = self
            .send_json(
                Method::Put,
                &format!("/api/tutorials/{id}"),
                json!({"title": title, "description": "", "published": true}),
            )
            .await;
        assert_eq!(res.status_code(), 200);
    }
}

fn body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).expect("response body is JSON")
}

fn titles(res: &Response) -> Vec<String> {
    body(res).as_array().expect("array body").iter()
        .map(|t| t["title"].as_str().unwrap().to_owned())
        .collect()
}

fn broken_router() -> Router {
    api::routes(Arc::new(BrokenStore))
}

#[tokio::test]
async fn create_assigns_id_and_forces_unpublished() {
    let app = TestApp::new();
    let res = app
        .send_json(
            Method::Post,
            "/api/tutorials",
            json!({"title": "Go", "description": "Guide", "published": true, "id": "mine"}),
        )
        .await;

    assert_eq!(res.status_code(), 201);
    assert_eq!(res.header("content-type"), Some("application/json"));
    let created = body(&res);
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_ne!(id, "mine");
    assert_eq!(created["published"], false);
    assert_eq!(res.header("location"), Some(format!("/api/tutorials/{id}").as_str()));
}

#[tokio::test]
async fn get_by_id_returns_what_was_stored() {
    let app = TestApp::new();
    let created = app.create("Go", "Guide").await;
    let id = created["id"].as_str().unwrap();

    let res = app.send(Method::Get, &format!("/api/tutorials/{id}")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body(&res), created);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let app = TestApp::new();
    let res = app.send(Method::Get, "/api/tutorials/0123456789abcdef01234567").await;
    assert_eq!(res.status_code(), 404);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn list_returns_all_or_no_content() {
    let app = TestApp::new();
    assert_eq!(app.send(Method::Get, "/api/tutorials").await.status_code(), 204);

    app.create("Rust Book", "").await;
    app.create("Go Guide", "").await;

    let res = app.send(Method::Get, "/api/tutorials").await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(titles(&res), ["Rust Book", "Go Guide"]);
}

#[tokio::test]
async fn list_filters_by_case_sensitive_title_substring() {
    let app = TestApp::new();
    app.create("Rust Book", "").await;
    app.create("rust async", "").await;
    app.create("Go Guide", "").await;

    let res = app.send(Method::Get, "/api/tutorials?title=Rust").await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(titles(&res), ["Rust Book"]);

    let res = app.send(Method::Get, "/api/tutorials?title=Go%20Gu").await;
    assert_eq!(titles(&res), ["Go Guide"]);

    let res = app.send(Method::Get, "/api/tutorials?title=Java").await;
    assert_eq!(res.status_code(), 204);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn list_published_returns_only_published() {
    let app = TestApp::new();
    assert_eq!(app.send(Method::Get, "/api/tutorials/published").await.status_code(), 204);

    let first = app.create("Rust Book", "").await;
    app.create("Go Guide", "").await;
    assert_eq!(app.send(Method::Get, "/api/tutorials/published").await.status_code(), 204);

    app.publish(first["id"].as_str().unwrap(), "Rust Book").await;

    let res = app.send(Method::Get, "/api/tutorials/published").await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(titles(&res), ["Rust Book"]);
    assert!(body(&res).as_array().unwrap().iter().all(|t| t["published"] == true));
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = TestApp::new();
    let created = app.create("Go", "Guide").await;
    let id = created["id"].as_str().unwrap();

    let res = app
        .send_json(
            Method::Put,
            &format!("/api/tutorials/{id}"),
            json!({"id": "ignored", "title": "Go2", "description": "Guide2", "published": true}),
        )
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(
        body(&res),
        json!({"id": id, "title": "Go2", "description": "Guide2", "published": true})
    );
    assert_eq!(app.store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_unknown_id_is_not_found_and_creates_nothing() {
    let app = TestApp::new();
    let res = app
        .send_json(
            Method::Put,
            "/api/tutorials/0123456789abcdef01234567",
            json!({"title": "Go", "description": "Guide", "published": true}),
        )
        .await;
    assert_eq!(res.status_code(), 404);
    assert!(app.store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_one_removes_only_that_record() {
    let app = TestApp::new();
    let keep = app.create("keep", "").await;
    let gone = app.create("gone", "").await;

    let res = app
        .send(Method::Delete, &format!("/api/tutorials/{}", gone["id"].as_str().unwrap()))
        .await;
    assert_eq!(res.status_code(), 204);

    let remaining = app.store.find_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id.as_deref(), keep["id"].as_str());
}

#[tokio::test]
async fn delete_unknown_id_is_still_no_content() {
    let app = TestApp::new();
    let res = app.send(Method::Delete, "/api/tutorials/nope").await;
    assert_eq!(res.status_code(), 204);
}

#[tokio::test]
async fn delete_all_leaves_list_empty() {
    let app = TestApp::new();
    app.create("a", "").await;
    app.create("b", "").await;

    assert_eq!(app.send(Method::Delete, "/api/tutorials").await.status_code(), 204);
    assert_eq!(app.send(Method::Get, "/api/tutorials").await.status_code(), 204);
}

#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = TestApp::new();

    let created = app.create("Go", "Guide").await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert!(!id.is_empty());
    assert_eq!(created["published"], false);
    let path = format!("/api/tutorials/{id}");

    let res = app.send(Method::Get, &path).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body(&res)["title"], "Go");
    assert_eq!(body(&res)["description"], "Guide");

    let res = app
        .send_json(Method::Put, &path, json!({"title": "Go2", "description": "Guide2", "published": true}))
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body(&res)["published"], true);

    assert_eq!(app.send(Method::Delete, &path).await.status_code(), 204);
    assert_eq!(app.send(Method::Get, &path).await.status_code(), 404);
}

#[tokio::test]
async fn bodies_must_be_json() {
    let app = TestApp::new();

    let res = app
        .router
        .handle(Request::new(Method::Post, "/api/tutorials", r#"{"title":"Go"}"#))
        .await;
    assert_eq!(res.status_code(), 415);

    let res = app
        .router
        .handle(
            Request::new(Method::Post, "/api/tutorials", "{")
                .with_header("Content-Type", "application/json"),
        )
        .await;
    assert_eq!(res.status_code(), 400);
    assert!(app.store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_failures_answer_internal_server_error() {
    let router = broken_router();
    let json_req = |method, target: &str| {
        Request::new(method, target, r#"{"title":"a","description":"b","published":true}"#)
            .with_header("content-type", "application/json")
    };

    let cases = [
        Request::new(Method::Get, "/api/tutorials", ""),
        Request::new(Method::Get, "/api/tutorials?title=a", ""),
        Request::new(Method::Get, "/api/tutorials/published", ""),
        Request::new(Method::Get, "/api/tutorials/0123456789abcdef01234567", ""),
        json_req(Method::Post, "/api/tutorials"),
        json_req(Method::Put, "/api/tutorials/0123456789abcdef01234567"),
        Request::new(Method::Delete, "/api/tutorials/0123456789abcdef01234567", ""),
        Request::new(Method::Delete, "/api/tutorials", ""),
    ];
    for req in cases {
        let target = format!("{} {}", req.method(), req.path());
        let res = router.handle(req).await;
        assert_eq!(res.status_code(), 500, "{target}");
        assert!(res.body().is_empty(), "{target}");
    }
}

#[tokio::test]
async fn health_probes() {
    let app = TestApp::new();
    let res = app.send(Method::Get, "/healthz").await;
    assert_eq!((res.status_code(), res.body()), (200, &b"ok"[..]));
    let res = app.send(Method::Get, "/readyz").await;
    assert_eq!((res.status_code(), res.body()), (200, &b"ready"[..]));

    let router = broken_router();
    let res = router.handle(Request::new(Method::Get, "/healthz", "")).await;
    assert_eq!(res.status_code(), 200);
    let res = router.handle(Request::new(Method::Get, "/readyz", "")).await;
    assert_eq!(res.status_code(), 503);
}

#[tokio::test]
async fn unrouted_requests() {
    let app = TestApp::new();
    assert_eq!(app.send(Method::Get, "/tutorials").await.status_code(), 404);
    assert_eq!(app.send(Method::Patch, "/api/tutorials").await.status_code(), 405);
    assert_eq!(app.send(Method::Post, "/api/tutorials/published").await.status_code(), 405);
}
