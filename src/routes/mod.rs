//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `/price` - KAIA 가격 (USD 또는 ETH 기준)

pub mod price;
