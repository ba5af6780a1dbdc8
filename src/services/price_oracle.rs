//! Price Oracle Service
//!
//! Reads on-chain price feeds exposing `latestRoundData()` and `decimals()`.
//! Every call goes to the chain; nothing is cached between requests.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::contract::abigen;
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use thiserror::Error;

use crate::types::OracleQuote;

abigen!(
    PriceFeedContract,
    r#"[
        function latestRoundData() external view returns (uint64 roundId, int256 answer, uint256 updatedAt)
        function decimals() external view returns (uint8)
    ]"#
);

/// 오라클 조회 에러
#[derive(Debug, Error)]
pub enum OracleError {
    /// RPC 호출 실패 (네트워크, revert, 디코딩 실패 등)
    ///
    /// 클라이언트 메시지를 그대로 노출, 피드 주소는 로그로만 남김
    #[error("{message}")]
    Transport { feed: Address, message: String },

    #[error("Feed {feed:?} returned malformed data: {message}")]
    Malformed { feed: Address, message: String },
}

/// 가격 피드 리더
///
/// HTTP 레이어는 이 trait에만 의존함 (테스트에서는 in-memory 구현 사용)
#[async_trait]
pub trait OracleReader: Send + Sync {
    /// 피드의 최신 라운드와 스케일을 함께 조회
    async fn fetch(&self, feed: Address) -> Result<OracleQuote, OracleError>;
}

/// 온체인 가격 오라클
///
/// # Example
/// ```ignore
/// let provider = Provider::<Http>::try_from("https://public-en.node.kaia.io")?;
/// let oracle = ChainOracle::new(Arc::new(provider));
/// let quote = oracle.fetch(KAIA_USDT_FEED.parse()?).await?;
/// ```
pub struct ChainOracle<M> {
    client: Arc<M>,
}

impl<M: Middleware + 'static> ChainOracle<M> {
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<M: Middleware + 'static> OracleReader for ChainOracle<M> {
    async fn fetch(&self, feed: Address) -> Result<OracleQuote, OracleError> {
        let contract = PriceFeedContract::new(feed, self.client.clone());

        let round_call = contract.latest_round_data();
        let decimals_call = contract.decimals();

        // 두 조회는 독립적 → 동시에 실행, 하나라도 실패하면 전체 실패
        let ((round_id, answer, updated_at), decimals) =
            tokio::try_join!(round_call.call(), decimals_call.call()).map_err(|e| {
                tracing::warn!(feed = ?feed, error = %e, "Oracle read failed");
                OracleError::Transport {
                    feed,
                    message: e.to_string(),
                }
            })?;

        if updated_at > U256::from(u64::MAX) {
            return Err(OracleError::Malformed {
                feed,
                message: format!("updatedAt {} exceeds u64", updated_at),
            });
        }

        let quote = OracleQuote {
            round_id,
            answer,
            updated_at: updated_at.as_u64(),
            decimals,
        };

        tracing::debug!(
            feed = ?feed,
            round_id = quote.round_id,
            answer = %quote.answer,
            decimals = quote.decimals,
            updated_at = ?quote.updated_at_utc().map(|t| t.to_rfc3339()),
            "Read oracle quote"
        );

        Ok(quote)
    }
}
