//! Price Aggregator
//!
//! Rescales raw oracle answers to the shared 8-decimal scale and derives
//! cross rates between two USD-quoted feeds. All arithmetic stays in `I256`
//! with truncating division.

use ethers::types::I256;
use thiserror::Error;

use crate::types::{OracleQuote, ScaledPrice, PRICE_DECIMALS};

/// 가격 변환 에러
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Division by zero: quote feed reported a zero price")]
    DivisionByZero,

    #[error("Arithmetic overflow while scaling price (decimals = {decimals})")]
    Overflow { decimals: u8 },
}

fn pow10(decimals: u8) -> Result<I256, AggregationError> {
    I256::from(10)
        .checked_pow(u32::from(decimals))
        .ok_or(AggregationError::Overflow { decimals })
}

/// 피드 고유 스케일 → 10^8 스케일
///
/// `answer * 10^8 / 10^decimals`
pub fn to_usd_scaled(quote: &OracleQuote) -> Result<ScaledPrice, AggregationError> {
    let scaled = quote
        .answer
        .checked_mul(pow10(PRICE_DECIMALS)?)
        .ok_or(AggregationError::Overflow { decimals: quote.decimals })?;

    // 분모가 10^n 이므로 0이 될 수 없음
    Ok(scaled / pow10(quote.decimals)?)
}

/// base 1단위가 quote 몇 단위인지 (10^8 스케일)
///
/// `base_usd * 10^8 / quote_usd`
pub fn cross_rate(
    base: &OracleQuote,
    quote: &OracleQuote,
) -> Result<ScaledPrice, AggregationError> {
    let base_usd = to_usd_scaled(base)?;
    let quote_usd = to_usd_scaled(quote)?;

    if quote_usd.is_zero() {
        return Err(AggregationError::DivisionByZero);
    }

    let numerator = base_usd
        .checked_mul(pow10(PRICE_DECIMALS)?)
        .ok_or(AggregationError::Overflow { decimals: PRICE_DECIMALS })?;

    numerator
        .checked_div(quote_usd)
        .ok_or(AggregationError::Overflow { decimals: PRICE_DECIMALS })
}
