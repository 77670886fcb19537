// HTTP surfaces of the two services.

pub mod error;
pub mod presenter;
pub mod render;
pub mod server;
pub mod validator;

pub use presenter::{presenter_router, PresenterState};
pub use validator::{validator_router, ValidatorState};
