// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod phone;
pub mod storage;

pub use http::HttpValidatorClient;
pub use phone::LibPhoneNumberClassifier;
pub use storage::{build_store, JsonLinesStore, MemoryStore};
