pub mod engine;
pub mod summary;
pub mod synthesizer;
pub mod validation;

pub use crate::domain::model::{
    BatchResult, CheckedNumber, Classification, FailedNumber, GeneratedNumber, NumberType,
    ValidationOutcome,
};
pub use crate::domain::ports::{ConfigProvider, DocumentStore, PhoneClassifier, ValidatorClient};
pub use crate::utils::error::Result;
