use anyhow::Context;
use clap::Parser;
use cxo_outreach::config::credentials::Credentials;
use cxo_outreach::core::input;
use cxo_outreach::utils::error::ErrorSeverity;
use cxo_outreach::utils::{logger, validation::Validate};
use cxo_outreach::{
    AnthropicClient, AnthropicSettings, BatchEngine, CliConfig, CredentialChain, LocalStorage,
    OutreachError, OutreachPipeline,
};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.json_logs);

    tracing::info!("🚀 Starting cxo-outreach");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    // 憑證：config.toml → api_keys.json → 環境變數
    let (credentials, source) =
        match CredentialChain::standard(&config.script_config, &config.json_config).resolve() {
            Ok(resolved) => resolved,
            Err(e) => fail(&e),
        };

    if !Path::new(&config.input).is_file() {
        fail(&OutreachError::InputFileError {
            path: config.input.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    display_config_summary(&config, &source);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No API calls will be made");
        return perform_dry_run(&config);
    }

    run_batch(config, credentials).await
}

async fn run_batch(config: CliConfig, credentials: Credentials) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.results_dir)
        .with_context(|| format!("creating results directory '{}'", config.results_dir))?;

    let model = AnthropicClient::new(
        credentials.llm_api_key,
        AnthropicSettings::from_config(&config),
    );
    let storage = LocalStorage::new(config.results_dir.clone());
    let monitor_enabled = config.monitor;
    let pipeline = OutreachPipeline::new(model, storage, config);

    let engine = BatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "✅ Processed {} companies ({} succeeded, {} failed)",
                summary.total, summary.succeeded, summary.failed
            );
            println!("📁 Results:");
            for path in &summary.report.written {
                println!("  - {}", path);
            }
            for (path, reason) in &summary.report.failures {
                eprintln!("❌ Could not write {}: {}", path, reason);
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &OutreachError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &CliConfig, credential_source: &str) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input);
    println!("  Results: {}", config.results_dir);
    println!("  Credentials: {}", credential_source);
    println!("  Model: {} (max_tokens {})", config.model, config.max_tokens);
    println!("  Endpoint: {}", config.api_base_url);
    println!("  Search first: {} (not implemented)", config.search_first);
    println!("  Persist responses: {}", config.persist_responses);
    if let Some(max_records) = config.max_records {
        println!("  Max Records: {}", max_records);
    }
    if config.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn perform_dry_run(config: &CliConfig) -> anyhow::Result<()> {
    let companies = input::read_companies(&config.input)
        .with_context(|| format!("reading input file '{}'", config.input))?;
    let limit = config.max_records.unwrap_or(companies.len());

    println!("🔍 Dry Run Analysis:");
    println!("  Companies found: {}", companies.len());
    println!("  Would process: {}", limit.min(companies.len()));
    println!("  Model calls per company: 5");
    println!();

    for company in companies.iter().take(limit) {
        let representative = if company.representative_name.is_empty() {
            String::new()
        } else {
            format!(" ({} {})", company.representative_title, company.representative_name)
        };
        println!("  • {} - {}{}", company.name, company.address, representative);
    }

    Ok(())
}
