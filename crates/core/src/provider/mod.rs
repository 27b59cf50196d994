use crate::domain::metrics::{Fundamentals, RawMetrics};
use std::collections::BTreeMap;

/// Seam to the external financial-data collaborator. `Ok(None)` means the
/// provider cannot resolve the code; the caller excludes that security from
/// the batch instead of synthesizing placeholder scores. Fetching, caching,
/// and retry policy live behind this trait, outside the scoring core.
#[async_trait::async_trait]
pub trait FundamentalsProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_fundamentals(&self, code: &str) -> anyhow::Result<Option<Fundamentals>>;
}

/// In-memory provider backed by a fixed code -> fundamentals map. Used by the
/// CLI, the API's default wiring, and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticFundamentalsProvider {
    securities: BTreeMap<String, Fundamentals>,
}

impl StaticFundamentalsProvider {
    pub fn new(securities: BTreeMap<String, Fundamentals>) -> Self {
        Self { securities }
    }

    pub fn insert(&mut self, code: impl Into<String>, fundamentals: Fundamentals) {
        self.securities.insert(code.into(), fundamentals);
    }

    /// Demo provider that resolves every non-empty code to deterministic,
    /// plausible fundamentals derived from the code's bytes. Same code, same
    /// metrics, across runs and machines.
    pub fn synthetic() -> SyntheticFundamentalsProvider {
        SyntheticFundamentalsProvider
    }
}

#[async_trait::async_trait]
impl FundamentalsProvider for StaticFundamentalsProvider {
    fn provider_name(&self) -> &'static str {
        "static"
    }

    async fn fetch_fundamentals(&self, code: &str) -> anyhow::Result<Option<Fundamentals>> {
        Ok(self.securities.get(code.trim()).cloned())
    }
}

/// Deterministic synthetic fundamentals, for demos and smoke runs when no real
/// data source is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticFundamentalsProvider;

impl SyntheticFundamentalsProvider {
    fn generate(code: &str) -> Option<Fundamentals> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        // Cheap stable hash of the code, spread over a prime modulus so
        // nearby codes land on different metric mixes.
        let seed: u64 = code.bytes().map(u64::from).sum::<u64>() % 97;
        let s = seed as f64;

        let metrics = RawMetrics {
            price_to_earnings: Some(6.0 + (seed % 40) as f64),
            return_on_equity: Some(0.02 + (seed % 25) as f64 / 100.0),
            dividend_yield: Some((seed % 7) as f64 / 200.0),
            revenue_growth: Some(-0.05 + (seed % 30) as f64 / 100.0),
            debt_to_equity: Some(10.0 + (s * 7.0) % 180.0),
            gross_margin: Some(0.15 + (seed % 50) as f64 / 100.0),
        };

        Some(Fundamentals {
            name: format!("Security {code}"),
            metrics,
        })
    }
}

#[async_trait::async_trait]
impl FundamentalsProvider for SyntheticFundamentalsProvider {
    fn provider_name(&self) -> &'static str {
        "synthetic"
    }

    async fn fetch_fundamentals(&self, code: &str) -> anyhow::Result<Option<Fundamentals>> {
        Ok(Self::generate(code))
    }
}
