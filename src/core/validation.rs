use crate::core::{BatchResult, DocumentStore, PhoneClassifier, ValidationOutcome};
use crate::utils::error::Result;
use std::sync::Arc;

/// Validator-side batch loop: classify, persist, append, in input order.
pub struct BatchValidator {
    classifier: Arc<dyn PhoneClassifier>,
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl BatchValidator {
    pub fn new(
        classifier: Arc<dyn PhoneClassifier>,
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            store,
            collection: collection.into(),
        }
    }

    pub fn classify(&self, raw: &str) -> ValidationOutcome {
        match self.classifier.classify(raw) {
            Ok(classification) => ValidationOutcome::checked(raw, classification),
            Err(message) => ValidationOutcome::failed(raw, message),
        }
    }

    /// Fails only when the store cannot be reached up front. Individual
    /// numbers never fail the batch and write errors are only logged.
    pub async fn validate_batch(&self, numbers: &[String]) -> Result<BatchResult> {
        self.store.ping().await?;

        let mut outcomes = Vec::with_capacity(numbers.len());
        for raw in numbers {
            let outcome = self.classify(raw);

            if let ValidationOutcome::Failed(failed) = &outcome {
                tracing::debug!("Could not parse {}: {}", failed.number, failed.error);
            }

            self.persist(&outcome).await;
            outcomes.push(outcome);
        }

        let result = BatchResult::from_outcomes(outcomes);
        tracing::info!(
            "✅ Validated {} numbers ({} valid, {} errors)",
            result.len(),
            result.valid_count(),
            result.error_count()
        );
        Ok(result)
    }

    async fn persist(&self, outcome: &ValidationOutcome) {
        let document = match serde_json::to_value(outcome) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Skipping persistence of {}: {}", outcome.number(), e);
                return;
            }
        };

        if let Err(e) = self.store.insert_one(&self.collection, document).await {
            tracing::warn!(
                "⚠️ Failed to store validation result for {}: {}",
                outcome.number(),
                e
            );
        }
    }
}
