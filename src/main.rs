use anyhow::Context;
use clap::Parser;
use numcheck::adapters::{build_store, HttpValidatorClient};
use numcheck::app::server;
use numcheck::config::Command;
use numcheck::core::engine::GenerationRequest;
use numcheck::core::summary::Summary;
use numcheck::core::ConfigProvider;
use numcheck::utils::logger::{self, LogFormat};
use numcheck::utils::validation::{validate_socket_addr, Validate};
use numcheck::{
    presenter_router, validator_router, AppConfig, CliArgs, PipelineEngine, PresenterState,
    ValidatorState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match AppConfig::from_file_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    let format = LogFormat::from_name(&config.logging.format).unwrap_or(LogFormat::Compact);
    logger::init_logger(args.verbose, Some(&config.logging.level), format);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    tracing::debug!("Config: {:?}", config);

    match &args.command {
        Command::Validator { .. } => {
            let addr = validate_socket_addr("validator.bind", &config.validator.bind)?;
            let router = validator_router(ValidatorState::from_config(&config));
            server::serve(router, addr, "validator")
                .await
                .context("validator service failed")?;
        }
        Command::Presenter { .. } => {
            let addr = validate_socket_addr("presenter.bind", &config.presenter.bind)?;
            tracing::info!("🔗 Validator endpoint: {}", config.presenter.validator_url);
            let router = presenter_router(PresenterState::from_config(&config));
            server::serve(router, addr, "presenter")
                .await
                .context("presenter service failed")?;
        }
        Command::Generate {
            quantity,
            country_code,
            ..
        } => {
            let engine = PipelineEngine::new(
                build_store(&config.store),
                Arc::new(HttpValidatorClient::new(config.presenter.validator_url.clone())),
                config.store.generated_collection(),
            );
            let request = GenerationRequest {
                quantity: *quantity,
                country_code: country_code.clone(),
            };

            let report = match engine.run(&request).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!("❌ Generation rejected: {}", e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(2);
                }
            };

            match report.summary() {
                Some(summary) => print_summary(&summary),
                None => {
                    for number in &report.generated {
                        println!("{}", number);
                    }
                    eprintln!("⚠️ Validator unavailable, no results");
                }
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    println!(
        "{:<18} {:<8} {:<22} {:<9} {:<6}",
        "NUMBER", "CODE", "TYPE", "POSSIBLE", "VALID"
    );
    for row in &summary.rows {
        let marker = if row.highlighted { "*" } else { " " };
        println!(
            "{:<18} {:<8} {:<22} {:<9} {:<6}{}",
            row.number, row.country_code, row.number_type, row.is_possible, row.is_valid, marker
        );
        if let Some(error) = &row.error {
            println!("    error: {}", error);
        }
    }
    println!(
        "\n📊 Valid: {} / {} ({}%)",
        summary.valid_count,
        summary.valid_count + summary.invalid_count,
        summary.formatted_percentage()
    );
}
