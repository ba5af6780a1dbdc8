//! Services Module
//!
//! 비즈니스 로직을 담당하는 서비스 레이어
//!
//! # Services
//! - `OracleReader` / `ChainOracle`: 온체인 가격 피드 조회
//! - `aggregator`: 스케일 변환 및 교차 환율 계산

pub mod aggregator;
mod price_oracle;

pub use aggregator::{cross_rate, to_usd_scaled, AggregationError};
pub use price_oracle::{ChainOracle, OracleError, OracleReader, PriceFeedContract};
