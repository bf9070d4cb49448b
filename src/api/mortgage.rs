//! Mortgage Quote Endpoint
//! Mission: Stateless monthly-payment simulation

use crate::api::ApiError;
use axum::response::Json;
use serde::{Deserialize, Serialize};

/// Fixed annual interest rate used by the simulator.
const ANNUAL_RATE: f64 = 0.05;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub property_price: f64,
    pub principal: f64,
    pub years: u32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct QuoteResponse {
    pub monthly_payment: f64,
    pub total_repaid: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Standard annuity formula: `p*i / (1 - (1+i)^-n)` with a monthly rate.
fn quote_for(principal: f64, years: u32) -> QuoteResponse {
    let monthly_rate = ANNUAL_RATE / 12.0;
    let payments = (years * 12) as f64;
    let monthly_payment = principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-payments));

    QuoteResponse {
        monthly_payment: round2(monthly_payment),
        total_repaid: round2(monthly_payment * payments),
    }
}

/// Mortgage quote - POST /api/mortgage/quote (public)
///
/// Pure arithmetic, no state; the property price is only sanity-checked, the
/// quote depends on the principal and the term alone.
pub async fn quote(Json(payload): Json<QuoteRequest>) -> Result<Json<QuoteResponse>, ApiError> {
    if payload.property_price <= 0.0 || payload.principal <= 0.0 || payload.years == 0 {
        return Err(ApiError::BadRequest("missing data".to_string()));
    }

    Ok(Json(quote_for(payload.principal, payload.years)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_twenty_years() {
        let q = quote_for(100_000.0, 20);
        assert_eq!(q.monthly_payment, 659.96);
        assert_eq!(q.total_repaid, 158_389.38);
    }

    #[test]
    fn test_quote_thirty_years() {
        let q = quote_for(200_000.0, 30);
        assert_eq!(q.monthly_payment, 1073.64);
        assert_eq!(q.total_repaid, 386_511.57);
    }

    #[test]
    fn test_longer_term_lowers_payment_raises_total() {
        let short = quote_for(150_000.0, 10);
        let long = quote_for(150_000.0, 30);

        assert!(long.monthly_payment < short.monthly_payment);
        assert!(long.total_repaid > short.total_repaid);
    }
}
