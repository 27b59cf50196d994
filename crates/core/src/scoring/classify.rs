use crate::domain::metrics::RawField;
use crate::domain::score::{Dimension, ScoreVector};
use crate::scoring::extract::NormalizedInput;
use serde::{Deserialize, Serialize};

/// Investor-archetype tag for one security, derived from its own scores and
/// raw ratios only, never from other batch members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileLabel {
    IncomeDefensive,
    AggressiveGrowth,
    ValueBargain,
    Balanced,
}

/// A single classifier condition. Raw-field conditions see the same defaulted
/// percentage-scale values the normalizer consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum RuleCondition {
    ScoreAbove { dimension: Dimension, threshold: f64 },
    RawAbove { field: RawField, threshold: f64 },
}

impl RuleCondition {
    fn matches(&self, scores: &ScoreVector, input: &NormalizedInput) -> bool {
        match *self {
            RuleCondition::ScoreAbove {
                dimension,
                threshold,
            } => scores.get(dimension) > threshold,
            RuleCondition::RawAbove { field, threshold } => input.get(field) > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileRule {
    pub condition: RuleCondition,
    pub label: ProfileLabel,
}

/// Ordered decision list: the first matching rule wins and later rules are
/// unreachable once an earlier one matches. Default priority checks
/// payout-driven safety before growth, then cheapness. Thresholds are
/// tunable data, not code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRules {
    pub rules: Vec<ProfileRule>,
    pub fallback: ProfileLabel,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            rules: vec![
                ProfileRule {
                    condition: RuleCondition::ScoreAbove {
                        dimension: Dimension::PayoutSpeed,
                        threshold: 6.0,
                    },
                    label: ProfileLabel::IncomeDefensive,
                },
                ProfileRule {
                    condition: RuleCondition::ScoreAbove {
                        dimension: Dimension::GrowthPotential,
                        threshold: 7.0,
                    },
                    label: ProfileLabel::AggressiveGrowth,
                },
                ProfileRule {
                    condition: RuleCondition::ScoreAbove {
                        dimension: Dimension::Cheapness,
                        threshold: 7.0,
                    },
                    label: ProfileLabel::ValueBargain,
                },
            ],
            fallback: ProfileLabel::Balanced,
        }
    }
}

impl ProfileRules {
    pub fn classify(&self, scores: &ScoreVector, input: &NormalizedInput) -> ProfileLabel {
        for rule in &self.rules {
            if rule.condition.matches(scores, input) {
                return rule.label;
            }
        }
        self.fallback
    }
}
