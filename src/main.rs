//! KAIA Price API Server
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌─────────────────────┐
//! │    Client    │────▶│  Axum /price     │────▶│  Kaia JSON-RPC      │
//! └──────────────┘     │  ChainOracle     │     │  KAIA/USDT feed     │
//!                      └──────────────────┘     │  ETH/USDT feed      │
//!                                               └─────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use ethers::providers::{Http, Provider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaia_price_api::{create_router, AppState, ChainOracle, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    // RUST_LOG=debug,ethers=warn 형태로 레벨 제어 가능
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "kaia_price_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!(
        rpc_url = %config.rpc_url,
        kaia_usdt_feed = ?config.kaia_usdt_feed,
        eth_usdt_feed = ?config.eth_usdt_feed,
        "Configuration loaded"
    );

    // RPC 클라이언트
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .with_context(|| format!("Invalid KAIA_RPC_URL '{}'", config.rpc_url))?;
    let oracle = ChainOracle::new(Arc::new(provider));

    // 앱 상태 구성
    let state = AppState {
        oracle: Arc::new(oracle),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Kaia price API running on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
