pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{HttpValidatorClient, JsonLinesStore, LibPhoneNumberClassifier, MemoryStore};
pub use app::{presenter_router, validator_router, PresenterState, ValidatorState};
pub use config::AppConfig;
pub use core::{engine::PipelineEngine, validation::BatchValidator};
pub use utils::error::{NumcheckError, Result};
