use crate::domain::model::{BatchResult, Classification};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Insert-only access to a document store with named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Checks the store is reachable before a request starts writing.
    async fn ping(&self) -> Result<()>;

    async fn insert_one(&self, collection: &str, document: serde_json::Value) -> Result<()>;
}

/// Parses and classifies a single phone number string.
pub trait PhoneClassifier: Send + Sync {
    /// Returns a human-readable message when the input cannot be parsed.
    fn classify(&self, raw: &str) -> std::result::Result<Classification, String>;
}

/// Client side of the validator service.
#[async_trait]
pub trait ValidatorClient: Send + Sync {
    async fn validate(&self, numbers: &[String]) -> Result<BatchResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn generated_collection(&self) -> &str;
    fn validation_collection(&self) -> &str;
}
