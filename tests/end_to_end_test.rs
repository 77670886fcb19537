use axum_test::TestServer;
use numcheck::core::engine::GenerationRequest;
use numcheck::core::{DocumentStore, ValidatorClient};
use numcheck::{
    presenter_router, validator_router, BatchValidator, HttpValidatorClient, JsonLinesStore,
    LibPhoneNumberClassifier, PipelineEngine, PresenterState, ValidatorState,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Starts the validator on an ephemeral port and returns its /validate URL.
async fn spawn_validator(store: Arc<dyn DocumentStore>) -> String {
    let validator = BatchValidator::new(
        Arc::new(LibPhoneNumberClassifier::new()),
        store,
        "validation_results",
    );
    let router = validator_router(ValidatorState::new(validator));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/validate", addr)
}

fn read_lines(path: std::path::PathBuf) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_pipeline_against_running_validator() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonLinesStore::new(temp_dir.path()));
    let validator_url = spawn_validator(store.clone()).await;

    let engine = PipelineEngine::new(
        store.clone(),
        Arc::new(HttpValidatorClient::new(validator_url)),
        "generated_numbers",
    );

    let report = engine
        .run(&GenerationRequest {
            quantity: 20,
            country_code: "+254".to_string(),
        })
        .await
        .unwrap();

    let batch = report.batch.as_ref().expect("validator answered");
    assert_eq!(batch.len(), 20);

    let returned: Vec<&str> = batch.numbers().iter().map(|o| o.number()).collect();
    let generated: Vec<&str> = report.generated.iter().map(|s| s.as_str()).collect();
    assert_eq!(returned, generated);

    let valid = batch.numbers().iter().filter(|o| o.is_valid()).count();
    assert_eq!(batch.valid_count(), valid);

    let generated_docs = read_lines(store.collection_path("generated_numbers").unwrap());
    let result_docs = read_lines(store.collection_path("validation_results").unwrap());
    assert_eq!(generated_docs.len(), 20);
    assert_eq!(result_docs.len(), 20);
    assert_eq!(generated_docs[0]["number"], result_docs[0]["number"]);
}

#[tokio::test]
async fn test_resubmission_duplicates_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonLinesStore::new(temp_dir.path()));
    let validator_url = spawn_validator(store.clone()).await;

    let client = HttpValidatorClient::new(validator_url);
    let numbers = vec!["+14155552671".to_string()];

    let first = client.validate(&numbers).await.unwrap();
    let second = client.validate(&numbers).await.unwrap();

    assert_eq!(first.valid_count(), 1);
    assert_eq!(second.valid_count(), 1);
    let result_docs = read_lines(store.collection_path("validation_results").unwrap());
    assert_eq!(result_docs.len(), 2);
}

#[tokio::test]
async fn test_presenter_form_against_running_validator() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(JsonLinesStore::new(temp_dir.path()));
    let validator_url = spawn_validator(store.clone()).await;

    let engine = PipelineEngine::new(
        store.clone(),
        Arc::new(HttpValidatorClient::new(validator_url)),
        "generated_numbers",
    );
    let server = TestServer::new(presenter_router(PresenterState::new(engine))).unwrap();

    let response = server
        .post("/")
        .form(&[("quantity", "7"), ("country_code", "234")])
        .await;

    assert_eq!(response.status_code(), 200);
    let html = response.text();
    assert!(html.contains("id=\"results\""));
    assert_eq!(html.matches("<tr class=").count(), 7);

    let generated_docs = read_lines(store.collection_path("generated_numbers").unwrap());
    assert_eq!(generated_docs.len(), 7);
    assert!(generated_docs.iter().all(|d| d["country_code"] == "+234"));
}
