use bigdecimal::{BigDecimal, RoundingMode};
use serde_json::Value;
use std::{fmt, str::FromStr};

use crate::common::error::ServiceError;

/// How many units of `quote` one unit of `base` buys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    pub base: String,
    pub quote: String,
    pub rate: BigDecimal,
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 1 = {} {}",
            self.base,
            self.quote,
            self.rate.with_scale_round(2, RoundingMode::HalfUp)
        )
    }
}

/// Reads a rate from either `{"rates": {"BRL": 5.43}}` (latest-rates APIs,
/// base implied by the request) or `{"USDBRL": {"bid": "5.43"}}` (quote
/// APIs keyed by currency pair).
pub fn parse_rate(json: &str, base: &str, quote: &str) -> Result<ExchangeRate, ServiceError> {
    let doc: Value = serde_json::from_str(json)?;
    let pair = format!("{base}{quote}");

    let raw = doc
        .get("rates")
        .and_then(|rates| rates.get(quote))
        .or_else(|| doc.get(&pair).and_then(|p| p.get("bid")))
        .ok_or_else(|| ServiceError::MissingRate(pair.clone()))?;

    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(ServiceError::InvalidRate(other.to_string())),
    };
    let rate = BigDecimal::from_str(&text).map_err(|_| ServiceError::InvalidRate(text.clone()))?;
    if rate <= BigDecimal::from(0) {
        return Err(ServiceError::InvalidRate(text));
    }

    Ok(ExchangeRate {
        base: base.to_string(),
        quote: quote.to_string(),
        rate,
    })
}
