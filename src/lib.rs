//! # tutorials
//!
//! A small JSON CRUD service for one resource, the tutorial
//! (`id`, `title`, `description`, `published`), stored in MongoDB.
//!
//! The crate carries its own thin HTTP layer on top of hyper: a radix-tree
//! [`Router`], sealed [`Handler`]s, and a [`Server`] with graceful shutdown.
//! The tutorial routes live in [`api`]; persistence sits behind the
//! [`store::TutorialStore`] trait.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tutorials::store::InMemoryTutorialStore;
//! use tutorials::{Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tutorials::Error> {
//!     let app = api::routes(Arc::new(InMemoryTutorialStore::new()));
//!     Server::bind("0.0.0.0:8080".parse().unwrap()).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod health;
pub mod store;
pub mod tutorial;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::{Rejection, Request};
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
