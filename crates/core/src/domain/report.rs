use crate::domain::metrics::{RawField, RawMetrics};
use crate::domain::score::{Dimension, ScoreVector};
use crate::scoring::classify::ProfileLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a pick was ranked on: a scored dimension, the overall composite, or an
/// un-normalized raw field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum PickBasis {
    Dimension(Dimension),
    Overall,
    Raw(RawField),
}

/// The batch member holding the maximum on one basis. `value` is the winning
/// score, or the percentage-scale raw value for raw-field picks so the
/// presentation layer can quote it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPick {
    pub basis: PickBasis,
    pub code: String,
    pub value: f64,
}

/// One security's share of the report: its raw inputs, normalized profile,
/// composite score, and investor-archetype label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityProfile {
    pub code: String,
    pub name: String,
    pub metrics: RawMetrics,
    pub scores: ScoreVector,
    pub overall: f64,
    pub label: ProfileLabel,
}

/// The read-only output of one comparison request. Consumed as-is by the
/// presentation and text-generation collaborators; nothing here is
/// pre-formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<SecurityProfile>,
    pub picks: Vec<RecommendationPick>,
    /// Codes the provider could not resolve; excluded from the batch rather
    /// than scored with placeholder data.
    pub excluded: Vec<String>,
}
