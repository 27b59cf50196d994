use thiserror::Error;

/// Contract violations surfaced by the scoring core. Missing or degenerate
/// metric values are not errors; they are absorbed by the extractor defaults
/// and normalizer guards.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("ranking over an empty batch")]
    EmptyBatch,
}
