use crate::core::{BatchResult, ValidatorClient};
use crate::utils::error::{NumcheckError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ValidateRequestBody<'a> {
    numbers: &'a [String],
}

/// Posts batches to the validator service. No retry and no timeout.
#[derive(Debug, Clone)]
pub struct HttpValidatorClient {
    client: Client,
    endpoint: String,
}

impl HttpValidatorClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ValidatorClient for HttpValidatorClient {
    async fn validate(&self, numbers: &[String]) -> Result<BatchResult> {
        tracing::debug!("Submitting {} numbers to {}", numbers.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ValidateRequestBody { numbers })
            .send()
            .await?;

        tracing::debug!("Validator response status: {}", response.status());

        if !response.status().is_success() {
            return Err(NumcheckError::UpstreamStatus {
                status: response.status().as_u16(),
            });
        }

        let batch: BatchResult = response.json().await?;
        Ok(batch)
    }
}
