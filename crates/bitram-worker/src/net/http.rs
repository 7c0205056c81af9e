//! reqwest-backed transport.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::{FetchError, Network};
use crate::models::{FetchResponse, WorkerRequest};

/// Production transport.
///
/// Clone is cheap: `reqwest::Client` uses Arc internally for connection
/// pooling. The client is built without a timeout: the calling page owns
/// cancellation, and a hung fetch blocks only its own request.
#[derive(Clone)]
pub struct HttpNetwork {
    client: Client,
}

impl HttpNetwork {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &WorkerRequest) -> Result<FetchResponse, FetchError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| FetchError::Network(e.into()))?;

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.into()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.into()))?;

        Ok(FetchResponse {
            status,
            headers,
            body,
        })
    }
}
