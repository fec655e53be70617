use clap::Parser;
use esim_relay::app::server;
use esim_relay::utils::{logger, validation::Validate};
use esim_relay::{CliConfig, EsimApi, EthereumOracle, PurchaseService, RelayConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(cli.verbose);
    }

    tracing::info!("Starting esim-relay");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let config = match RelayConfig::load(cli.config_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let oracle = EthereumOracle::new(&config.oracle)?;
    let provider = EsimApi::new(&config.fulfillment)?;
    let service = PurchaseService::new(oracle, provider, config.purchase_policy());

    let app = server::router(service, Path::new(&cli.static_dir));

    // 原部署以 PORT 環境變數指定埠號
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cli.port);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("🚀 Server running on port {}", port);
    tracing::info!("📁 Serving static files from {}", cli.static_dir);

    axum::serve(listener, app).await?;

    Ok(())
}
