use crate::domain::metrics::{RawField, RawMetrics};
use crate::domain::score::{Dimension, ScoreVector};
use crate::error::ScoreError;
use crate::scoring::extract::NormalizedInput;

/// One scored member of a comparison batch.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub code: String,
    pub name: String,
    pub raw: RawMetrics,
    /// Defaulted percentage-scale inputs, kept so raw-field ranking and
    /// classifier rules use the same defaulting as the normalizer did.
    pub input: NormalizedInput,
    pub scores: ScoreVector,
}

/// The set of securities compared in one request, in caller order. Caller
/// order is load-bearing: every ranking operation breaks ties toward the
/// earliest entry so repeated runs on the same input stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct ComparisonBatch {
    entries: Vec<BatchEntry>,
}

impl ComparisonBatch {
    pub fn new(entries: Vec<BatchEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest entry with the strictly greatest score on `dimension`.
    pub fn pick_best(&self, dimension: Dimension) -> Result<&BatchEntry, ScoreError> {
        self.pick_by(|e| e.scores.get(dimension))
    }

    /// Earliest entry with the greatest overall composite score.
    pub fn pick_best_overall(&self) -> Result<&BatchEntry, ScoreError> {
        self.pick_by(|e| e.scores.overall())
    }

    /// Earliest entry with the greatest un-normalized value on `field`
    /// (percentage scale, extractor defaults applied). Same tie-break rule as
    /// score-based ranking.
    pub fn pick_best_raw(&self, field: RawField) -> Result<&BatchEntry, ScoreError> {
        self.pick_by(|e| e.input.get(field))
    }

    fn pick_by(&self, key: impl Fn(&BatchEntry) -> f64) -> Result<&BatchEntry, ScoreError> {
        let mut best: Option<(&BatchEntry, f64)> = None;
        for entry in &self.entries {
            let value = key(entry);
            // Strict comparison: an equal later value never displaces the
            // earlier winner.
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((entry, value));
            }
        }
        best.map(|(e, _)| e).ok_or(ScoreError::EmptyBatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, scores: [f64; 5]) -> BatchEntry {
        BatchEntry {
            code: code.to_string(),
            name: format!("Security {code}"),
            raw: RawMetrics::default(),
            input: NormalizedInput::default(),
            scores: ScoreVector::new(scores),
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let batch = ComparisonBatch::default();
        assert!(matches!(
            batch.pick_best(Dimension::Cheapness),
            Err(ScoreError::EmptyBatch)
        ));
        assert!(matches!(
            batch.pick_best_raw(RawField::ReturnOnEquity),
            Err(ScoreError::EmptyBatch)
        ));
    }

    #[test]
    fn singleton_batch_always_wins() {
        let batch = ComparisonBatch::new(vec![entry("600519", [1.0, 1.0, 1.0, 1.0, 1.0])]);
        let best = batch.pick_best(Dimension::Resilience).unwrap();
        assert_eq!(best.code, "600519");
    }

    #[test]
    fn tie_breaks_to_the_earliest_entry() {
        // GrowthPotential scores [4, 9, 9]: the first of the tied maxima wins.
        let batch = ComparisonBatch::new(vec![
            entry("a", [5.0, 5.0, 5.0, 5.0, 4.0]),
            entry("b", [5.0, 5.0, 5.0, 5.0, 9.0]),
            entry("c", [5.0, 5.0, 5.0, 5.0, 9.0]),
        ]);
        let best = batch.pick_best(Dimension::GrowthPotential).unwrap();
        assert_eq!(best.code, "b");
    }

    #[test]
    fn tie_break_holds_under_permutation() {
        let scores = [
            [7.0, 1.0, 1.0, 1.0, 1.0],
            [7.0, 2.0, 2.0, 2.0, 2.0],
            [3.0, 9.0, 9.0, 9.0, 9.0],
        ];
        let orders: [[usize; 3]; 3] = [[0, 1, 2], [1, 0, 2], [2, 0, 1]];
        for order in orders {
            let batch = ComparisonBatch::new(
                order
                    .iter()
                    .map(|&i| entry(&format!("s{i}"), scores[i]))
                    .collect(),
            );
            let best = batch.pick_best(Dimension::Cheapness).unwrap();
            // Both 7.0 holders tie; the one placed earlier must win.
            let first_seven = order
                .iter()
                .position(|&i| i != 2)
                .map(|pos| format!("s{}", order[pos]))
                .unwrap();
            assert_eq!(best.code, first_seven);
        }
    }

    #[test]
    fn raw_ranking_uses_percentage_scale_values() {
        let mut low = entry("low", [5.0; 5]);
        low.input.roe_pct = 8.0;
        let mut high = entry("high", [1.0; 5]);
        high.input.roe_pct = 21.0;

        let batch = ComparisonBatch::new(vec![low, high]);
        let best = batch.pick_best_raw(RawField::ReturnOnEquity).unwrap();
        // Raw ranking ignores the normalized scores entirely.
        assert_eq!(best.code, "high");
    }

    #[test]
    fn overall_pick_uses_the_composite_mean() {
        let batch = ComparisonBatch::new(vec![
            entry("spiky", [10.0, 1.0, 1.0, 1.0, 1.0]),
            entry("steady", [6.0, 6.0, 6.0, 6.0, 6.0]),
        ]);
        let best = batch.pick_best_overall().unwrap();
        assert_eq!(best.code, "steady");
    }

    #[test]
    fn score_and_raw_modes_share_the_tie_break() {
        let mut a = entry("a", [5.0; 5]);
        a.input.dividend_yield_pct = 3.0;
        let mut b = entry("b", [5.0; 5]);
        b.input.dividend_yield_pct = 3.0;

        let batch = ComparisonBatch::new(vec![a, b]);
        assert_eq!(batch.pick_best(Dimension::PayoutSpeed).unwrap().code, "a");
        assert_eq!(
            batch.pick_best_raw(RawField::DividendYield).unwrap().code,
            "a"
        );
    }

    #[test]
    fn ranks_each_dimension_independently() {
        let batch = ComparisonBatch::new(vec![
            entry("x", [2.0, 3.0, 4.0, 5.0, 6.0]),
            entry("y", [6.0, 5.0, 4.0, 3.0, 2.0]),
        ]);
        assert_eq!(batch.pick_best(Dimension::Cheapness).unwrap().code, "y");
        assert_eq!(
            batch.pick_best(Dimension::GrowthPotential).unwrap().code,
            "x"
        );
    }
}
