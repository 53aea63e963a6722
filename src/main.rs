use anyhow::Context;
use clap::Parser;
use small_leaderboard::adapters::http;
use small_leaderboard::core::ConfigProvider;
use small_leaderboard::utils::{logger, validation::Validate};
use small_leaderboard::{CliConfig, LeaderboardError, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            let config = TomlConfig::from_file(path).unwrap_or_else(|e| exit_with(e));
            run(config).await
        }
        None => run(cli.clone()).await,
    }
}

async fn run<C: ConfigProvider + Validate + std::fmt::Debug>(config: C) -> anyhow::Result<()> {
    tracing::debug!("Server config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(e);
    }

    let router = http::build_router(&config).unwrap_or_else(|e| exit_with(e));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    tracing::info!("🚀 Leaderboard listening on {}", listener.local_addr()?);
    tracing::info!("📁 Store: {}", config.store_path());
    tracing::info!("🌐 Allowed origins: {}", config.allowed_origins().join(", "));

    http::serve(listener, router).await.context("server error")?;

    tracing::info!("✅ Server stopped");
    Ok(())
}

fn exit_with(e: LeaderboardError) -> ! {
    tracing::error!("❌ Configuration failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}
