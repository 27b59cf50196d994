use crate::domain::metrics::{RawField, RawMetrics};
use serde::{Deserialize, Serialize};

/// Absent metrics are treated as zero rather than rejected; a security with no
/// data at all still yields an all-default input that normalizes cleanly.
const MISSING_DEFAULT: f64 = 0.0;

/// Fraction-scale provider fields are converted to percentage units here,
/// exactly once, so every downstream formula operates on percentage-scale
/// numbers.
const FRACTION_TO_PCT: f64 = 100.0;

/// Defaulted, percentage-scale view of one `RawMetrics` record. This is the
/// only representation the normalizer and classifier ever see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInput {
    pub pe: f64,
    pub roe_pct: f64,
    pub dividend_yield_pct: f64,
    pub revenue_growth_pct: f64,
    pub debt_to_equity: f64,
    pub gross_margin_pct: f64,
}

impl NormalizedInput {
    pub fn get(&self, field: RawField) -> f64 {
        match field {
            RawField::PriceToEarnings => self.pe,
            RawField::ReturnOnEquity => self.roe_pct,
            RawField::DividendYield => self.dividend_yield_pct,
            RawField::RevenueGrowth => self.revenue_growth_pct,
            RawField::DebtToEquity => self.debt_to_equity,
            RawField::GrossMargin => self.gross_margin_pct,
        }
    }
}

pub fn extract(raw: &RawMetrics) -> NormalizedInput {
    NormalizedInput {
        pe: raw.price_to_earnings.unwrap_or(MISSING_DEFAULT),
        roe_pct: to_pct(raw.return_on_equity),
        dividend_yield_pct: to_pct(raw.dividend_yield),
        revenue_growth_pct: to_pct(raw.revenue_growth),
        // Already a percentage-like ratio at the provider.
        debt_to_equity: raw.debt_to_equity.unwrap_or(MISSING_DEFAULT),
        gross_margin_pct: to_pct(raw.gross_margin),
    }
}

fn to_pct(fraction: Option<f64>) -> f64 {
    fraction.unwrap_or(MISSING_DEFAULT) * FRACTION_TO_PCT
}
