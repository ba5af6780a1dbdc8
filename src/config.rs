//! Configuration Module
//!
//! Environment-driven settings, validated once at startup. Every value has a
//! default pointing at Kaia mainnet.

use std::env;

use anyhow::{Context, Result};
use ethers::types::Address;

/// Kaia mainnet 공개 RPC
pub const DEFAULT_RPC_URL: &str = "https://public-en.node.kaia.io";

/// KAIA/USDT 가격 피드 프록시
pub const KAIA_USDT_FEED: &str = "0x9254cd72f207cc231a2307eac5e4bfa316eb0c2e";

/// ETH/USDT 가격 피드 프록시
pub const ETH_USDT_FEED: &str = "0xbf61f1f8d45ecb33006a335e7c76f306689dcaab";

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트 (기본값: 3000)
    pub port: u16,

    /// Kaia JSON-RPC URL
    pub rpc_url: String,

    /// KAIA/USDT 피드 주소
    pub kaia_usdt_feed: Address,

    /// ETH/USDT 피드 주소
    pub eth_usdt_feed: Address,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            kaia_usdt_feed: parse_feed(KAIA_USDT_FEED, "KAIA_USDT_FEED")
                .unwrap_or_default(),
            eth_usdt_feed: parse_feed(ETH_USDT_FEED, "ETH_USDT_FEED")
                .unwrap_or_default(),
        }
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    ///
    /// # Optional Environment Variables
    ///
    /// - `PORT`: 서버 포트 (기본값: 3000)
    /// - `KAIA_RPC_URL`: Kaia RPC URL
    /// - `KAIA_USDT_FEED`: KAIA/USDT 피드 주소
    /// - `ETH_USDT_FEED`: ETH/USDT 피드 주소
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let rpc_url = env::var("KAIA_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let kaia_usdt_feed = parse_feed(
            &env::var("KAIA_USDT_FEED").unwrap_or_else(|_| KAIA_USDT_FEED.to_string()),
            "KAIA_USDT_FEED",
        )?;

        let eth_usdt_feed = parse_feed(
            &env::var("ETH_USDT_FEED").unwrap_or_else(|_| ETH_USDT_FEED.to_string()),
            "ETH_USDT_FEED",
        )?;

        Ok(Config {
            port,
            rpc_url,
            kaia_usdt_feed,
            eth_usdt_feed,
        })
    }
}

fn parse_feed(value: &str, name: &str) -> Result<Address> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a 20-byte hex address, got '{}'", name, value))
}
