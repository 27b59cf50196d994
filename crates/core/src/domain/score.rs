use serde::{Deserialize, Serialize};

/// Comparison dimensions, in the fixed presentation order shared by every
/// score vector in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Cheapness,
    ProfitStrength,
    PayoutSpeed,
    Resilience,
    GrowthPotential,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Cheapness,
        Dimension::ProfitStrength,
        Dimension::PayoutSpeed,
        Dimension::Resilience,
        Dimension::GrowthPotential,
    ];

    fn index(self) -> usize {
        match self {
            Dimension::Cheapness => 0,
            Dimension::ProfitStrength => 1,
            Dimension::PayoutSpeed => 2,
            Dimension::Resilience => 3,
            Dimension::GrowthPotential => 4,
        }
    }
}

/// Closed score range applied uniformly to every dimension.
///
/// [1, 10] is the canonical policy; [0, 10] is selectable but must apply to the
/// whole vector, never per-dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub lower: f64,
    pub upper: f64,
}

impl ScoreBounds {
    pub const CANONICAL: ScoreBounds = ScoreBounds {
        lower: 1.0,
        upper: 10.0,
    };

    /// `max(lower, min(upper, value))`: the universal guard that keeps any
    /// raw-metric outlier inside the display range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.min(self.upper).max(self.lower)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// The five-dimension normalized profile of one security. Immutable once
/// computed; every element lies inside the bounds it was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector([f64; 5]);

impl ScoreVector {
    pub fn new(scores: [f64; 5]) -> Self {
        Self(scores)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0[dimension.index()]
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.0
    }

    /// Composite dimension: the plain mean of the five scores. Shares the
    /// per-dimension bounds by construction.
    pub fn overall(&self) -> f64 {
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }

    pub fn within(&self, bounds: &ScoreBounds) -> bool {
        self.0.iter().all(|s| bounds.contains(*s))
    }
}
