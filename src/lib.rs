//! KAIA Price API Library
//!
//! # Overview
//!
//! Kaia 체인의 가격 오라클 컨트랙트를 읽어 KAIA 가격을 USD 또는 ETH 기준으로
//! 제공하는 HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! GET /price ──▶ routes::price ──▶ OracleReader (KAIA/USDT, ETH/USDT)
//!                     │
//!                     ▼
//!               aggregator (10^8 스케일) ──▶ format_fixed_point ──▶ JSON
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 오라클 조회 및 가격 변환
//! - `types`: 공통 타입 정의
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kaia_price_api::{config::Config, services::ChainOracle};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let provider = Provider::<Http>::try_from(config.rpc_url.as_str())?;
//!     let oracle = ChainOracle::new(Arc::new(provider));
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ApiError;
pub use services::{ChainOracle, OracleReader};

/// 애플리케이션 전역 상태
///
/// 요청 간 공유되는 값은 읽기 전용 핸들뿐
#[derive(Clone)]
pub struct AppState {
    pub oracle: Arc<dyn OracleReader>,
    pub config: Arc<Config>,
}

/// 라우터 생성
///
/// # Route Structure
///
/// ```text
/// GET  /price?denom={usd|eth}   - KAIA 가격 조회
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/price", get(routes::price::get_price))
        // 미들웨어
        .layer(TraceLayer::new_for_http())
        // 상태 주입
        .with_state(state)
}
