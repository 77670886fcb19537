#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliArgs, Command};
pub use toml_config::{
    AppConfig, LoggingConfig, PresenterConfig, StoreConfig, StoreKind, ValidatorConfig,
};
