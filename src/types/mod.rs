//! Common Types Module
//!
//! Oracle quotes, the shared fixed-point scale and its string rendering.

use chrono::{DateTime, TimeZone, Utc};
use ethers::types::I256;
use serde::Serialize;

/// 공통 가격 스케일 (10^8)
///
/// Aggregator와 formatter가 동일한 값을 사용해야 함
pub const PRICE_DECIMALS: u8 = 8;

/// 10^8 스케일의 정수 가격
pub type ScaledPrice = I256;

/// 오라클 피드에서 읽은 원본 시세
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleQuote {
    pub round_id: u64,
    /// 피드 고유 스케일의 가격
    pub answer: I256,
    /// 마지막 업데이트 (unix seconds)
    pub updated_at: u64,
    /// 피드 스케일 지수
    pub decimals: u8,
}

impl OracleQuote {
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.updated_at).ok()?;
        Utc.timestamp_opt(secs, 0).single()
    }
}

/// 응답 가격의 표시 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Denom {
    #[default]
    Usd,
    Eth,
}

impl Denom {
    /// `"eth"`만 ETH로, 그 외 값은 전부 USD로 취급
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("eth") => Denom::Eth,
            _ => Denom::Usd,
        }
    }
}

/// 단위별 가격 필드
///
/// `symbol`과 함께 flatten되어 `price_usd` / `price_eth` 키로 직렬화됨
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QuotedPrice {
    #[serde(rename = "price_usd")]
    Usd(String),
    #[serde(rename = "price_eth")]
    Eth(String),
}

impl QuotedPrice {
    pub fn new(denom: Denom, formatted: String) -> Self {
        match denom {
            Denom::Usd => QuotedPrice::Usd(formatted),
            Denom::Eth => QuotedPrice::Eth(formatted),
        }
    }
}

/// 스케일된 정수를 소수 문자열로 변환
///
/// 소수부는 항상 `decimals` 자리로 0 패딩되며 반올림하지 않음.
/// 음수는 부호를 한 번만 붙이고 절댓값을 렌더링함 (`-1` → `"-0.00000001"`).
pub fn format_fixed_point(value: I256, decimals: u8) -> String {
    let width = usize::from(decimals);
    let digits = value.unsigned_abs().to_string();
    let digits = format!("{:0>1$}", digits, width + 1);
    let (integer_part, fractional_part) = digits.split_at(digits.len() - width);

    let sign = if value.is_negative() { "-" } else { "" };
    if width == 0 {
        format!("{}{}", sign, integer_part)
    } else {
        format!("{}{}.{}", sign, integer_part, fractional_part)
    }
}
