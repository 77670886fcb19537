use crate::core::summary::Summary;
use crate::core::synthesizer::{self, CountryCode};
use crate::core::{BatchResult, DocumentStore, GeneratedNumber, ValidatorClient};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub quantity: u32,
    pub country_code: String,
}

/// Candidates ready to be persisted and submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub country: CountryCode,
    pub numbers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub country: CountryCode,
    pub generated: Vec<String>,
    /// `None` when the validator could not be reached or answered garbage.
    pub batch: Option<BatchResult>,
}

impl PipelineReport {
    pub fn summary(&self) -> Option<Summary> {
        self.batch.as_ref().map(Summary::from_batch)
    }
}

/// Presenter-side pipeline: synthesize, store candidates, ask the validator.
pub struct PipelineEngine {
    store: Arc<dyn DocumentStore>,
    validator: Arc<dyn ValidatorClient>,
    collection: String,
}

impl PipelineEngine {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        validator: Arc<dyn ValidatorClient>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            store,
            validator,
            collection: collection.into(),
        }
    }

    /// Input checks and generation. Nothing is written if this fails.
    pub fn plan(&self, request: &GenerationRequest) -> Result<Generation> {
        let country: CountryCode = request.country_code.parse()?;
        synthesizer::check_quantity(request.quantity)?;

        let numbers = synthesizer::synthesize(request.quantity, country, &mut rand::rng());
        tracing::debug!("Generated {} candidates for {}", numbers.len(), country);

        Ok(Generation { country, numbers })
    }

    pub async fn execute(&self, generation: Generation) -> PipelineReport {
        let Generation { country, numbers } = generation;

        // 儲存候選號碼 (失敗只記錄，不中斷)
        let mut stored = 0usize;
        for number in &numbers {
            let record = GeneratedNumber::new(number.as_str(), country.prefix());
            match serde_json::to_value(&record) {
                Ok(document) => match self.store.insert_one(&self.collection, document).await {
                    Ok(()) => stored += 1,
                    Err(e) => tracing::warn!("⚠️ Failed to store generated number {}: {}", number, e),
                },
                Err(e) => tracing::warn!("⚠️ Could not encode generated number {}: {}", number, e),
            }
        }
        tracing::debug!("Stored {}/{} generated numbers", stored, numbers.len());

        let batch = match self.validator.validate(&numbers).await {
            Ok(batch) => Some(batch),
            Err(e) => {
                tracing::warn!("❌ Validator unavailable, rendering without results: {}", e);
                None
            }
        };

        PipelineReport {
            country,
            generated: numbers,
            batch,
        }
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<PipelineReport> {
        tracing::info!(
            "🚀 Generating {} numbers for {}",
            request.quantity,
            request.country_code
        );

        let generation = self.plan(request)?;
        let report = self.execute(generation).await;

        if let Some(batch) = &report.batch {
            tracing::info!(
                "📊 {} of {} numbers valid",
                batch.valid_count(),
                batch.len()
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::utils::error::NumcheckError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingValidator {
        calls: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl ValidatorClient for RecordingValidator {
        async fn validate(&self, numbers: &[String]) -> Result<BatchResult> {
            self.calls.lock().unwrap().push(numbers.to_vec());
            if self.fail {
                return Err(NumcheckError::UpstreamStatus { status: 502 });
            }
            Ok(BatchResult::from_outcomes(
                numbers
                    .iter()
                    .map(|n| crate::core::ValidationOutcome::failed(n.as_str(), "not checked"))
                    .collect(),
            ))
        }
    }

    fn request(quantity: u32, country_code: &str) -> GenerationRequest {
        GenerationRequest {
            quantity,
            country_code: country_code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_stores_candidates_and_submits_them_in_order() {
        let store = Arc::new(MemoryStore::new());
        let validator = Arc::new(RecordingValidator::default());
        let engine = PipelineEngine::new(store.clone(), validator.clone(), "generated");

        let report = engine.run(&request(5, "+254")).await.unwrap();

        assert_eq!(report.country, CountryCode::Kenya);
        assert_eq!(report.generated.len(), 5);

        let stored = store.documents("generated").await;
        assert_eq!(stored.len(), 5);
        for (doc, number) in stored.iter().zip(&report.generated) {
            assert_eq!(doc["number"], number.as_str());
            assert_eq!(doc["country_code"], "+254");
            assert!(doc["created_at"].is_string());
        }

        let calls = validator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], report.generated);

        let batch = report.batch.as_ref().unwrap();
        assert_eq!(batch.len(), 5);
    }

    #[tokio::test]
    async fn test_unsupported_country_writes_nothing_and_skips_validator() {
        let store = Arc::new(MemoryStore::new());
        let validator = Arc::new(RecordingValidator::default());
        let engine = PipelineEngine::new(store.clone(), validator.clone(), "generated");

        let err = engine.run(&request(10, "+999")).await.unwrap_err();

        assert!(matches!(err, NumcheckError::UnsupportedCountryCode { .. }));
        assert!(store.documents("generated").await.is_empty());
        assert!(validator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quantity_out_of_range_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let validator = Arc::new(RecordingValidator::default());
        let engine = PipelineEngine::new(store.clone(), validator.clone(), "generated");

        let err = engine.run(&request(101, "+27")).await.unwrap_err();

        assert!(err.is_input_error());
        assert!(store.documents("generated").await.is_empty());
        assert!(validator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validator_failure_degrades_to_no_results() {
        let store = Arc::new(MemoryStore::new());
        let validator = Arc::new(RecordingValidator {
            fail: true,
            ..Default::default()
        });
        let engine = PipelineEngine::new(store.clone(), validator, "generated");

        let report = engine.run(&request(3, "+233")).await.unwrap();

        assert!(report.batch.is_none());
        assert!(report.summary().is_none());
        // 候選號碼仍然已經儲存
        assert_eq!(store.documents("generated").await.len(), 3);
    }
}
