use async_trait::async_trait;
use reqwest::Client;

use super::{ApiRequest, ApiResponse, ApiTransport, Method};
use crate::{ClientConfig, ClientError};

/// [`ApiTransport`] backed by a `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Builds the HTTP client from the configuration.
    ///
    /// # Errors
    /// Returns `ClientError::ConfigurationError` if the configuration is
    /// invalid or the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::ConfigurationError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.config.url(&request.path);

        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .query(&request.query);
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!(target: "todo_client::transport", "msg=\"request failed\" method={} path={} error=\"{}\"", request.method, request.path, e);
            ClientError::TransportFailure(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::TransportFailure(e.to_string()))?;

        log::debug!(target: "todo_client::transport", "method={} path={} status={}", request.method, request.path, status);

        Ok(ApiResponse { status, body })
    }
}
