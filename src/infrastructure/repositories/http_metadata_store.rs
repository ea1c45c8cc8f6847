//! HTTP implementation of MetadataStore
//!
//! Fetches item metadata XML from a portal or map server. The URL template
//! carries a `{name}` placeholder, e.g.
//! `https://gis.example.org/metadata/{name}.xml`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{DomainError, MetadataStore, ServiceError};

pub struct HttpMetadataStore {
    client: reqwest::Client,
    url_template: String,
}

impl HttpMetadataStore {
    /// Fails with `DomainError::Config` when the template has no `{name}`.
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let url_template = url_template.into();
        if !url_template.contains("{name}") {
            return Err(DomainError::Config(format!(
                "Metadata URL '{}' has no {{name}} placeholder",
                url_template
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_template,
        })
    }

    fn url_for(&self, feature_class: &str) -> String {
        self.url_template
            .replace("{name}", &urlencoding::encode(feature_class))
    }
}

fn classify_request_error(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Transient(format!("Metadata request timed out: {}", e))
    } else if e.is_connect() {
        ServiceError::Connectivity(format!("Metadata service unreachable: {}", e))
    } else {
        ServiceError::Unknown(format!("Metadata request failed: {}", e))
    }
}

fn classify_status(status: StatusCode, url: &str) -> ServiceError {
    let msg = format!("Metadata service returned {} for {}", status, url);
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => ServiceError::NotFound(msg),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ServiceError::Connectivity(msg),
        StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => ServiceError::Transient(msg),
        _ => ServiceError::Unknown(msg),
    }
}

#[async_trait]
impl MetadataStore for HttpMetadataStore {
    async fn export_metadata(&self, feature_class: &str) -> Result<Vec<u8>, ServiceError> {
        let url = self.url_for(feature_class);
        tracing::debug!("Fetching metadata for {} from {}", feature_class, url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/xml")
            .send()
            .await
            .map_err(classify_request_error)?;

        if !response.status().is_success() {
            return Err(classify_status(response.status(), &url));
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| ServiceError::Transient(format!("Failed to read metadata body: {}", e)))
    }
}
