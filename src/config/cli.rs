use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "numcheck")]
#[command(about = "Generate random phone numbers and check them against libphonenumber metadata")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "numcheck.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the validation service
    Validator {
        /// Override validator.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run the web form that generates numbers and renders results
    Presenter {
        /// Override presenter.bind
        #[arg(long)]
        bind: Option<String>,

        /// Override presenter.validator_url
        #[arg(long)]
        validator_url: Option<String>,
    },
    /// Generate, store and validate a single batch, then print the table
    Generate {
        #[arg(short, long, default_value = "10")]
        quantity: u32,

        #[arg(long, allow_hyphen_values = true)]
        country_code: String,

        /// Override presenter.validator_url
        #[arg(long)]
        validator_url: Option<String>,
    },
}

impl CliArgs {
    /// 將命令列覆蓋套用到設定
    pub fn apply_overrides(&self, config: &mut crate::config::AppConfig) {
        match &self.command {
            Command::Validator { bind } => {
                if let Some(bind) = bind {
                    config.validator.bind = bind.clone();
                }
            }
            Command::Presenter {
                bind,
                validator_url,
            } => {
                if let Some(bind) = bind {
                    config.presenter.bind = bind.clone();
                }
                if let Some(url) = validator_url {
                    config.presenter.validator_url = url.clone();
                }
            }
            Command::Generate { validator_url, .. } => {
                if let Some(url) = validator_url {
                    config.presenter.validator_url = url.clone();
                }
            }
        }
    }
}
