//! Intercepted requests and the responses that answer them.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use url::Url;

/// A network request intercepted on its way out of the application.
#[derive(Debug, Clone)]
pub struct WorkerRequest {
    pub method: String,
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl WorkerRequest {
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Vec::new(),
        }
    }

    /// Shorthand for the overwhelmingly common case.
    pub fn get(url: Url) -> Self {
        Self::new("GET", url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The cache slot this request maps to.
    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method.to_ascii_uppercase(),
            url: self.url.to_string(),
        }
    }
}

/// The effective cache key: method plus absolute URL.
///
/// Two requests with the same descriptor refer to the same cache slot.
/// Vary-relevant headers are not part of the key; the stores in this
/// crate do not support Vary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A response as the router handles it: fully buffered, cheap to clone.
///
/// Cloning shares the body buffer, standing in for the platform's
/// one-shot body streams where a response must be cloned before one copy
/// goes to the cache and the other back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl FetchResponse {
    /// A plain 200 response, mostly useful to hosts wiring up fakes.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Case-insensitive header lookup, first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
