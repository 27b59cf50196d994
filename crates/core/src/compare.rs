use crate::domain::metrics::RawField;
use crate::domain::report::{ComparisonReport, PickBasis, RecommendationPick, SecurityProfile};
use crate::domain::score::Dimension;
use crate::provider::FundamentalsProvider;
use crate::scoring::classify::ProfileRules;
use crate::scoring::extract::extract;
use crate::scoring::normalize::{normalize, ScoringConfig};
use crate::scoring::rank::{BatchEntry, ComparisonBatch};
use std::collections::BTreeSet;

/// One comparison request end to end: resolve each code through the provider,
/// score the resolvable ones, rank the batch, label each member. Unresolvable
/// codes are excluded and reported, never scored with placeholder data, and
/// never abort the rest of the batch.
pub async fn run_comparison(
    provider: &dyn FundamentalsProvider,
    codes: &[String],
    config: &ScoringConfig,
    rules: &ProfileRules,
) -> anyhow::Result<ComparisonReport> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();
    let mut excluded = Vec::new();

    for raw_code in codes {
        let code = raw_code.trim();
        if code.is_empty() || !seen.insert(code.to_string()) {
            continue;
        }

        match provider.fetch_fundamentals(code).await? {
            Some(fundamentals) => {
                let input = extract(&fundamentals.metrics);
                let scores = normalize(&input, config);
                entries.push(BatchEntry {
                    code: code.to_string(),
                    name: fundamentals.name,
                    raw: fundamentals.metrics,
                    input,
                    scores,
                });
            }
            None => {
                tracing::warn!(code, provider = provider.provider_name(), "security unavailable; excluded from comparison");
                excluded.push(code.to_string());
            }
        }
    }

    let batch = ComparisonBatch::new(entries);
    let picks = collect_picks(&batch);

    let entries = batch
        .entries()
        .iter()
        .map(|e| SecurityProfile {
            code: e.code.clone(),
            name: e.name.clone(),
            metrics: e.raw.clone(),
            scores: e.scores,
            overall: e.scores.overall(),
            label: rules.classify(&e.scores, &e.input),
        })
        .collect();

    Ok(ComparisonReport {
        generated_at: chrono::Utc::now(),
        entries,
        picks,
        excluded,
    })
}

/// Best-per-dimension picks plus the composite and the raw-ROE pick the
/// recommendation text quotes as a percentage. Empty batches produce no picks
/// rather than an error at this level; direct `ComparisonBatch` callers still
/// get the fail-fast `EmptyBatch` contract.
fn collect_picks(batch: &ComparisonBatch) -> Vec<RecommendationPick> {
    if batch.is_empty() {
        return Vec::new();
    }

    let mut picks = Vec::with_capacity(Dimension::ALL.len() + 2);

    for dimension in Dimension::ALL {
        if let Ok(best) = batch.pick_best(dimension) {
            picks.push(RecommendationPick {
                basis: PickBasis::Dimension(dimension),
                code: best.code.clone(),
                value: best.scores.get(dimension),
            });
        }
    }

    if let Ok(best) = batch.pick_best_overall() {
        picks.push(RecommendationPick {
            basis: PickBasis::Overall,
            code: best.code.clone(),
            value: best.scores.overall(),
        });
    }

    if let Ok(best) = batch.pick_best_raw(RawField::ReturnOnEquity) {
        picks.push(RecommendationPick {
            basis: PickBasis::Raw(RawField::ReturnOnEquity),
            code: best.code.clone(),
            value: best.input.roe_pct,
        });
    }

    picks
}
