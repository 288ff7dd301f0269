use clap::Parser;
use resume_api::utils::logger;
use resume_api::{create_router, AppState, CliConfig, SupabaseSource};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting resume-api");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置，缺少連線設定時不啟動
    let (service_config, bind_address) = match cli.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Upstream config: {:?}", service_config);

    let source = SupabaseSource::new(&service_config)?;
    tracing::info!("Upstream endpoint: {}", source.endpoint());

    let app = create_router(AppState::new(Arc::new(source)));

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("✅ Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
