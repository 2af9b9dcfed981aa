//! Tutorial HTTP routes.
//!
//! Every handler makes exactly one store call (update makes two: a lookup,
//! then the save) and picks the status from the shape of the result. Store
//! failures are logged and answered with a bare `500`.
//!
//! | Method | Path | Success | Empty / absent |
//! |---|---|---|---|
//! | GET | `/api/tutorials[?title=]` | 200 array | 204 |
//! | GET | `/api/tutorials/published` | 200 array | 204 |
//! | GET | `/api/tutorials/{id}` | 200 object | 404 |
//! | POST | `/api/tutorials` | 201 object | — |
//! | PUT | `/api/tutorials/{id}` | 200 object | 404 |
//! | DELETE | `/api/tutorials/{id}` | 204 | — |
//! | DELETE | `/api/tutorials` | 204 | — |

use std::future::Future;
use std::sync::Arc;

use tracing::error;

use crate::handler::Handler;
use crate::health;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{SharedStore, StoreError};
use crate::tutorial::{Tutorial, TutorialPayload};

pub const BASE_PATH: &str = "/api/tutorials";

/// Builds the full application router around one shared store handle.
pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .on(Method::Get,    BASE_PATH,                        with_store(&store, list))
        .on(Method::Get,    &format!("{BASE_PATH}/published"), with_store(&store, list_published))
        .on(Method::Get,    &format!("{BASE_PATH}/{{id}}"),    with_store(&store, get_one))
        .on(Method::Post,   BASE_PATH,                        with_store(&store, create))
        .on(Method::Put,    &format!("{BASE_PATH}/{{id}}"),    with_store(&store, update))
        .on(Method::Delete, &format!("{BASE_PATH}/{{id}}"),    with_store(&store, delete_one))
        .on(Method::Delete, BASE_PATH,                        with_store(&store, delete_all))
        .on(Method::Get,    "/healthz",                       health::liveness)
        .on(Method::Get,    "/readyz",                        with_store(&store, health::readiness))
}

/// Adapts `f(store, req)` into a plain `Fn(Request)` route handler.
fn with_store<F, Fut>(store: &SharedStore, f: F) -> impl Handler
where
    F: Fn(SharedStore, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let store = Arc::clone(store);
    move |req: Request| f(Arc::clone(&store), req)
}

// GET /api/tutorials[?title=text]
async fn list(store: SharedStore, req: Request) -> Response {
    let found = match req.query("title") {
        Some(text) => store.find_by_title_containing(&text).await,
        None => store.find_all().await,
    };
    many(found)
}

// GET /api/tutorials/published
async fn list_published(store: SharedStore, _req: Request) -> Response {
    many(store.find_by_published(true).await)
}

// GET /api/tutorials/{id}
async fn get_one(store: SharedStore, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    match store.find_by_id(id).await {
        Ok(Some(tutorial)) => Json(tutorial).into_response(),
        Ok(None) => Response::status(Status::NotFound),
        Err(e) => store_failure("get tutorial", e),
    }
}

// POST /api/tutorials
async fn create(store: SharedStore, req: Request) -> Response {
    let payload: TutorialPayload = match req.json() {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    match store.save(payload.into_new()).await {
        Ok(tutorial) => {
            let location = format!("{BASE_PATH}/{}", tutorial.id.as_deref().unwrap_or_default());
            Json(tutorial).with(
                Response::builder()
                    .status(Status::Created)
                    .header("location", &location),
            )
        }
        Err(e) => store_failure("create tutorial", e),
    }
}

// PUT /api/tutorials/{id}
async fn update(store: SharedStore, req: Request) -> Response {
    let payload: TutorialPayload = match req.json() {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    let id = req.param("id").unwrap_or_default();
    let existing = match store.find_by_id(id).await {
        Ok(Some(existing)) => existing,
        Ok(None) => return Response::status(Status::NotFound),
        Err(e) => return store_failure("update tutorial", e),
    };
    match store.save(payload.apply_to(existing)).await {
        Ok(tutorial) => Json(tutorial).into_response(),
        Err(e) => store_failure("update tutorial", e),
    }
}

// DELETE /api/tutorials/{id}
async fn delete_one(store: SharedStore, req: Request) -> Response {
    let id = req.param("id").unwrap_or_default();
    match store.delete_by_id(id).await {
        Ok(()) => Response::status(Status::NoContent),
        Err(e) => store_failure("delete tutorial", e),
    }
}

// DELETE /api/tutorials
async fn delete_all(store: SharedStore, _req: Request) -> Response {
    match store.delete_all().await {
        Ok(()) => Response::status(Status::NoContent),
        Err(e) => store_failure("delete all tutorials", e),
    }
}

/// 200 with the records, or 204 when there are none.
fn many(found: Result<Vec<Tutorial>, StoreError>) -> Response {
    match found {
        Ok(tutorials) if tutorials.is_empty() => Response::status(Status::NoContent),
        Ok(tutorials) => Json(tutorials).into_response(),
        Err(e) => store_failure("list tutorials", e),
    }
}

fn store_failure(operation: &str, e: StoreError) -> Response {
    error!(operation, "store call failed: {e}");
    Response::status(Status::InternalServerError)
}
