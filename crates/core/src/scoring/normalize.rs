use crate::domain::score::{ScoreBounds, ScoreVector};
use crate::scoring::extract::NormalizedInput;
use serde::{Deserialize, Serialize};

/// All tunable scoring constants in one place. The observed presentation
/// variants of this tool differ only in these multipliers and in the bound
/// policy, so one engine covers every variant; nothing here is structural.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub bounds: ScoreBounds,
    /// Cheapness numerator: score before clamp is `pe_base / PE * pe_scale`.
    pub pe_base: f64,
    pub pe_scale: f64,
    /// Score assigned when PE <= 0. Degenerate or negative earnings are
    /// unattractive, not infinitely cheap.
    pub pe_degenerate_score: f64,
    /// ProfitStrength: percentage ROE divided by this.
    pub roe_divisor: f64,
    /// PayoutSpeed: percentage dividend yield times this.
    pub payout_multiplier: f64,
    /// Resilience: `resilience_base - debt_to_equity / leverage_divisor`.
    pub resilience_base: f64,
    pub leverage_divisor: f64,
    /// GrowthPotential: percentage revenue growth times this.
    pub growth_multiplier: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bounds: ScoreBounds::CANONICAL,
            pe_base: 50.0,
            pe_scale: 5.0,
            pe_degenerate_score: 2.0,
            roe_divisor: 3.0,
            payout_multiplier: 2.0,
            resilience_base: 10.0,
            leverage_divisor: 20.0,
            growth_multiplier: 5.0,
        }
    }
}

impl ScoringConfig {
    /// Env-driven overrides so a deployment can select a scoring variant
    /// without code changes.
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Some(v) = env_f64("SCORE_LOWER_BOUND") {
            out.bounds.lower = v;
        }
        if let Some(v) = env_f64("SCORE_UPPER_BOUND") {
            out.bounds.upper = v;
        }
        if let Some(v) = env_f64("SCORE_PE_BASE") {
            out.pe_base = v;
        }
        if let Some(v) = env_f64("SCORE_PE_SCALE") {
            out.pe_scale = v;
        }
        if let Some(v) = env_f64("SCORE_PE_DEGENERATE") {
            out.pe_degenerate_score = v;
        }
        if let Some(v) = env_f64("SCORE_ROE_DIVISOR") {
            out.roe_divisor = v;
        }
        if let Some(v) = env_f64("SCORE_PAYOUT_MULTIPLIER") {
            out.payout_multiplier = v;
        }
        if let Some(v) = env_f64("SCORE_RESILIENCE_BASE") {
            out.resilience_base = v;
        }
        if let Some(v) = env_f64("SCORE_LEVERAGE_DIVISOR") {
            out.leverage_divisor = v;
        }
        if let Some(v) = env_f64("SCORE_GROWTH_MULTIPLIER") {
            out.growth_multiplier = v;
        }

        out
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|s| s.parse::<f64>().ok())
}

/// Pure per-security transform: defaulted percentage-scale inputs to one
/// bounded score per dimension, in fixed dimension order.
pub fn normalize(input: &NormalizedInput, config: &ScoringConfig) -> ScoreVector {
    let b = &config.bounds;

    let cheapness = if input.pe > 0.0 {
        b.clamp(config.pe_base / input.pe * config.pe_scale)
    } else {
        config.pe_degenerate_score
    };

    let profit_strength = b.clamp(input.roe_pct / config.roe_divisor);
    let payout_speed = b.clamp(input.dividend_yield_pct * config.payout_multiplier);
    let resilience = b.clamp(config.resilience_base - input.debt_to_equity / config.leverage_divisor);
    let growth_potential = b.clamp(input.revenue_growth_pct * config.growth_multiplier);

    ScoreVector::new([
        cheapness,
        profit_strength,
        payout_speed,
        resilience,
        growth_potential,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::RawMetrics;
    use crate::domain::score::Dimension;
    use crate::scoring::extract::extract;

    fn input(raw: RawMetrics) -> NormalizedInput {
        extract(&raw)
    }

    #[test]
    fn worked_example_matches_expected_scores() {
        let raw = RawMetrics {
            price_to_earnings: Some(20.0),
            return_on_equity: Some(0.18),
            dividend_yield: Some(0.02),
            revenue_growth: Some(0.05),
            debt_to_equity: Some(40.0),
            gross_margin: None,
        };

        let v = normalize(&input(raw), &ScoringConfig::default());
        // 50/20*5 = 12.5, clamped to the upper bound.
        assert_eq!(v.get(Dimension::Cheapness), 10.0);
        // 18 / 3.
        assert_eq!(v.get(Dimension::ProfitStrength), 6.0);
        // 10 - 40/20.
        assert_eq!(v.get(Dimension::Resilience), 8.0);
        // 2% yield * 2.
        assert_eq!(v.get(Dimension::PayoutSpeed), 4.0);
    }

    #[test]
    fn zero_pe_gets_the_fixed_sentinel() {
        let raw = RawMetrics {
            price_to_earnings: Some(0.0),
            ..RawMetrics::default()
        };
        let v = normalize(&input(raw), &ScoringConfig::default());
        assert_eq!(v.get(Dimension::Cheapness), 2.0);
    }

    #[test]
    fn negative_pe_gets_the_fixed_sentinel() {
        let raw = RawMetrics {
            price_to_earnings: Some(-8.5),
            ..RawMetrics::default()
        };
        let v = normalize(&input(raw), &ScoringConfig::default());
        assert_eq!(v.get(Dimension::Cheapness), 2.0);
    }

    #[test]
    fn outliers_never_escape_the_bounds() {
        let config = ScoringConfig::default();
        let cases = [
            RawMetrics::default(),
            RawMetrics {
                price_to_earnings: Some(0.5),
                return_on_equity: Some(-0.40),
                dividend_yield: Some(0.30),
                revenue_growth: Some(-0.80),
                debt_to_equity: Some(900.0),
                gross_margin: Some(0.99),
            },
            RawMetrics {
                price_to_earnings: Some(10_000.0),
                return_on_equity: Some(3.5),
                dividend_yield: Some(0.0),
                revenue_growth: Some(9.0),
                debt_to_equity: Some(0.0),
                gross_margin: Some(0.0),
            },
        ];

        for raw in cases {
            let v = normalize(&input(raw), &config);
            assert!(v.within(&config.bounds), "out of bounds: {v:?}");
        }
    }

    #[test]
    fn negative_growth_clamps_to_lower_bound() {
        let raw = RawMetrics {
            revenue_growth: Some(-0.25),
            ..RawMetrics::default()
        };
        let v = normalize(&input(raw), &ScoringConfig::default());
        assert_eq!(v.get(Dimension::GrowthPotential), 1.0);
    }

    #[test]
    fn normalize_is_deterministic() {
        let raw = RawMetrics {
            price_to_earnings: Some(17.3),
            return_on_equity: Some(0.11),
            dividend_yield: Some(0.015),
            revenue_growth: Some(0.004),
            debt_to_equity: Some(63.0),
            gross_margin: Some(0.31),
        };
        let config = ScoringConfig::default();
        let a = normalize(&input(raw.clone()), &config);
        let b = normalize(&input(raw), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn every_constant_is_overridable_from_env() {
        let vars = [
            ("SCORE_LOWER_BOUND", "0"),
            ("SCORE_UPPER_BOUND", "9"),
            ("SCORE_PE_BASE", "40"),
            ("SCORE_PE_SCALE", "4"),
            ("SCORE_PE_DEGENERATE", "1.5"),
            ("SCORE_ROE_DIVISOR", "2"),
            ("SCORE_PAYOUT_MULTIPLIER", "200"),
            ("SCORE_RESILIENCE_BASE", "9"),
            ("SCORE_LEVERAGE_DIVISOR", "25"),
            ("SCORE_GROWTH_MULTIPLIER", "10"),
        ];
        for (k, v) in vars {
            std::env::set_var(k, v);
        }

        let config = ScoringConfig::from_env();

        for (k, _) in vars {
            std::env::remove_var(k);
        }

        assert_eq!(config.bounds.lower, 0.0);
        assert_eq!(config.bounds.upper, 9.0);
        assert_eq!(config.pe_base, 40.0);
        assert_eq!(config.pe_scale, 4.0);
        assert_eq!(config.pe_degenerate_score, 1.5);
        assert_eq!(config.roe_divisor, 2.0);
        assert_eq!(config.payout_multiplier, 200.0);
        assert_eq!(config.resilience_base, 9.0);
        assert_eq!(config.leverage_divisor, 25.0);
        assert_eq!(config.growth_multiplier, 10.0);
    }

    #[test]
    fn zero_to_ten_variant_applies_uniformly() {
        let mut config = ScoringConfig::default();
        config.bounds.lower = 0.0;

        let v = normalize(&input(RawMetrics::default()), &config);
        // PE absent -> sentinel; everything else bottoms out at the variant's
        // lower bound, not at a mix of bounds.
        assert_eq!(v.get(Dimension::ProfitStrength), 0.0);
        assert_eq!(v.get(Dimension::PayoutSpeed), 0.0);
        assert_eq!(v.get(Dimension::GrowthPotential), 0.0);
        assert!(v.within(&config.bounds));
    }
}
