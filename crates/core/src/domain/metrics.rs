use serde::{Deserialize, Serialize};

/// Raw fundamental ratios for one security, exactly as supplied by the data
/// provider. Every field may be absent; the extractor applies defaults and the
/// record is never mutated after it arrives.
///
/// Fraction-valued fields (ROE, dividend yield, revenue growth, gross margin)
/// stay on the provider's fraction scale here. Conversion to percentage units
/// happens once, in `scoring::extract`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetrics {
    pub price_to_earnings: Option<f64>,
    /// Fraction (0.18 = 18%).
    pub return_on_equity: Option<f64>,
    /// Fraction.
    pub dividend_yield: Option<f64>,
    /// Fraction, may be negative.
    pub revenue_growth: Option<f64>,
    /// Percentage-like ratio (40.0 = 40%).
    pub debt_to_equity: Option<f64>,
    /// Fraction.
    pub gross_margin: Option<f64>,
}

/// Named raw field, used for ranking by an un-normalized metric
/// (e.g. "highest ROE") and for raw-ratio classifier rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawField {
    PriceToEarnings,
    ReturnOnEquity,
    DividendYield,
    RevenueGrowth,
    DebtToEquity,
    GrossMargin,
}

/// What the provider hands back for one resolvable security code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fundamentals {
    pub name: String,
    pub metrics: RawMetrics,
}
