//! Price Endpoint
//!
//! `GET /price?denom={usd|eth}` returns the KAIA price either in USD (from the
//! KAIA/USDT feed) or in ETH (cross rate against the ETH/USDT feed).

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::{
    error::ApiError,
    services::{cross_rate, to_usd_scaled},
    types::{format_fixed_point, Denom, QuotedPrice, PRICE_DECIMALS},
    AppState,
};

/// 응답 심볼
pub const SYMBOL: &str = "KAIA";

/// 가격 쿼리 파라미터
///
/// 원시 key/value 쌍에서 만들어지므로 `denom` 키가 반복되어도 요청이 거부되지 않음
#[derive(Debug, Default)]
pub struct PriceQuery {
    /// `usd` (기본값) 또는 `eth`
    pub denom: Option<String>,
}

impl PriceQuery {
    /// `denom`이 정확히 한 번 주어졌을 때만 값을 사용, 반복되면 기본값(USD)
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values = pairs
            .into_iter()
            .filter(|(key, _)| key == "denom")
            .map(|(_, value)| value);

        match (values.next(), values.next()) {
            (Some(denom), None) => PriceQuery { denom: Some(denom) },
            _ => PriceQuery::default(),
        }
    }
}

/// 가격 응답
///
/// ```json
/// { "symbol": "KAIA", "price_usd": "0.15000000" }
/// { "symbol": "KAIA", "price_eth": "0.00005000" }
/// ```
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub symbol: &'static str,
    #[serde(flatten)]
    pub price: QuotedPrice,
}

/// GET /price
///
/// # Flow
///
/// 1. `denom` 파싱 (`eth` 외에는 전부 USD)
/// 2. KAIA/USDT 피드 조회 (ETH 요청 시 ETH/USDT 피드도 동시에 조회)
/// 3. 10^8 스케일로 변환, ETH 요청이면 교차 환율 계산
/// 4. 소수 8자리 문자열로 응답
pub async fn get_price(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PriceResponse>, ApiError> {
    let query = PriceQuery::from_pairs(pairs);
    let denom = Denom::from_query(query.denom.as_deref());
    let kaia_feed = state.config.kaia_usdt_feed;

    let scaled = match denom {
        Denom::Usd => {
            let kaia = state.oracle.fetch(kaia_feed).await?;
            to_usd_scaled(&kaia)?
        }
        Denom::Eth => {
            let eth_feed = state.config.eth_usdt_feed;
            let (kaia, eth) = tokio::try_join!(
                state.oracle.fetch(kaia_feed),
                state.oracle.fetch(eth_feed),
            )?;
            cross_rate(&kaia, &eth)?
        }
    };

    let formatted = format_fixed_point(scaled, PRICE_DECIMALS);
    tracing::info!(denom = ?denom, price = %formatted, "Served KAIA price");

    Ok(Json(PriceResponse {
        symbol: SYMBOL,
        price: QuotedPrice::new(denom, formatted),
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use ethers::types::{Address, I256};
    use tower::ServiceExt;

    use super::PriceQuery;
    use crate::{
        create_router,
        services::{OracleError, OracleReader},
        types::OracleQuote,
        AppState, Config,
    };

    /// 주소별 고정 시세를 돌려주는 in-memory 오라클
    struct StaticOracle {
        quotes: HashMap<Address, OracleQuote>,
    }

    #[async_trait]
    impl OracleReader for StaticOracle {
        async fn fetch(&self, feed: Address) -> Result<OracleQuote, OracleError> {
            self.quotes
                .get(&feed)
                .copied()
                .ok_or_else(|| OracleError::Transport {
                    feed,
                    message: "execution reverted".to_string(),
                })
        }
    }

    fn quote(answer: i64, decimals: u8) -> OracleQuote {
        OracleQuote {
            round_id: 42,
            answer: I256::from(answer),
            updated_at: 1_700_000_000,
            decimals,
        }
    }

    fn app(kaia: Option<OracleQuote>, eth: Option<OracleQuote>) -> Router {
        let config = Config::default();
        let mut quotes = HashMap::new();
        if let Some(q) = kaia {
            quotes.insert(config.kaia_usdt_feed, q);
        }
        if let Some(q) = eth {
            quotes.insert(config.eth_usdt_feed, q);
        }

        create_router(AppState {
            oracle: Arc::new(StaticOracle { quotes }),
            config: Arc::new(config),
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_price_usd() {
        let app = app(Some(quote(15_000_000, 8)), None);
        let (status, body) = get(app, "/price?denom=usd").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"symbol":"KAIA","price_usd":"0.15000000"}"#);
    }

    #[tokio::test]
    async fn test_price_defaults_to_usd() {
        let app = app(Some(quote(15_000_000, 8)), None);
        let (status, body) = get(app, "/price").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"symbol":"KAIA","price_usd":"0.15000000"}"#);
    }

    #[tokio::test]
    async fn test_unknown_denom_is_usd() {
        let (_, usd) = get(app(Some(quote(15_000_000, 8)), None), "/price?denom=usd").await;
        let (status, xyz) = get(app(Some(quote(15_000_000, 8)), None), "/price?denom=xyz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(usd, xyz);
    }

    #[tokio::test]
    async fn test_repeated_denom_is_usd() {
        let kaia = Some(quote(15_000_000, 8));
        let eth = Some(quote(300_000_000_000, 8));

        for uri in ["/price?denom=xyz&denom=eth", "/price?denom=eth&denom=eth"] {
            let (status, body) = get(app(kaia, eth), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body, r#"{"symbol":"KAIA","price_usd":"0.15000000"}"#, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_other_params_are_ignored() {
        let app = app(Some(quote(15_000_000, 8)), Some(quote(300_000_000_000, 8)));
        let (status, body) = get(app, "/price?foo=bar&denom=eth").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"symbol":"KAIA","price_eth":"0.00005000"}"#);
    }

    #[test]
    fn test_price_query_from_pairs() {
        let pairs = |items: &[(&str, &str)]| {
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>()
        };

        let single = PriceQuery::from_pairs(pairs(&[("denom", "eth")]));
        assert_eq!(single.denom.as_deref(), Some("eth"));

        let repeated = PriceQuery::from_pairs(pairs(&[("denom", "xyz"), ("denom", "eth")]));
        assert_eq!(repeated.denom, None);

        assert_eq!(PriceQuery::from_pairs(Vec::new()).denom, None);
    }

    #[tokio::test]
    async fn test_price_eth() {
        let app = app(Some(quote(15_000_000, 8)), Some(quote(300_000_000_000, 8)));
        let (status, body) = get(app, "/price?denom=eth").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"symbol":"KAIA","price_eth":"0.00005000"}"#);
    }

    #[tokio::test]
    async fn test_price_usd_rescales_feed_decimals() {
        // 18 decimals 피드
        let app = app(Some(quote(150_000_000_000_000_000, 18)), None);
        let (status, body) = get(app, "/price").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"symbol":"KAIA","price_usd":"0.15000000"}"#);
    }

    #[tokio::test]
    async fn test_usd_does_not_need_eth_feed() {
        // ETH 피드가 없어도 USD 요청은 성공
        let app = app(Some(quote(15_000_000, 8)), None);
        let (status, _) = get(app, "/price?denom=usd").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_eth_feed_failure_fails_request() {
        let app = app(Some(quote(15_000_000, 8)), None);
        let (status, body) = get(app, "/price?denom=eth").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "execution reverted" }));
    }

    #[tokio::test]
    async fn test_kaia_feed_failure_fails_request() {
        let app = app(None, Some(quote(300_000_000_000, 8)));
        let (status, body) = get(app, "/price").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], "execution reverted");
        assert!(body.get("symbol").is_none());
    }

    #[tokio::test]
    async fn test_zero_eth_price_is_division_by_zero() {
        let app = app(Some(quote(15_000_000, 8)), Some(quote(0, 8)));
        let (status, body) = get(app, "/price?denom=eth").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            r#"{"error":"Division by zero: quote feed reported a zero price"}"#
        );
    }
}
