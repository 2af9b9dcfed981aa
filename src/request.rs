//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::method::Method;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// An incoming HTTP request with its body fully buffered.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a method, a request target (`/path?query`) and a
    /// body. The server builds requests from the wire; tests build them here.
    pub fn new(method: Method, target: &str, body: impl Into<Bytes>) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (target.to_owned(), None),
        };
        Self::from_parts(method, path, query, Vec::new(), body.into())
    }

    pub(crate) fn from_parts(
        method: Method,
        path: String,
        query: Option<String>,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self { method, path, query, headers, body, params: HashMap::new() }
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/api/tutorials/{id}`, `req.param("id")` on
    /// `/api/tutorials/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first query parameter named `key`, percent-decoded.
    ///
    /// `?title=` yields `Some("")`, which is distinct from an absent parameter.
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Deserializes the body as JSON.
    ///
    /// The request must declare a JSON content type (`application/json`, with
    /// optional parameters, or any `+json` suffix).
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Rejection> {
        let is_json = self.header("content-type")
            .map(|ct| {
                let mime = ct.split(';').next().unwrap_or_default().trim();
                mime.eq_ignore_ascii_case("application/json")
                    || mime.to_ascii_lowercase().ends_with("+json")
            })
            .unwrap_or(false);
        if !is_json {
            return Err(Rejection::UnsupportedMediaType);
        }
        serde_json::from_slice(&self.body).map_err(Rejection::Malformed)
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }
}

/// Why a request body could not be turned into a typed value.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    #[error("content type is not JSON")]
    UnsupportedMediaType,

    #[error("malformed JSON body: {0}")]
    Malformed(serde_json::Error),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Self::UnsupportedMediaType => Response::status(Status::UnsupportedMediaType),
            Self::Malformed(_) => Response::status(Status::BadRequest),
        }
    }
}
