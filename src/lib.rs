//! Bayesian confirmation analysis of competing hypotheses.
//!
//! Each evidence cluster is scored on its own ([`score_cluster`]) into
//! normalized priors, catch-all likelihoods and bounded likelihood ratios;
//! [`combine`] multiplies the ratios across clusters into a cumulative score
//! per hypothesis.

pub mod history;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use model::{
    ClusterResult, CumulativeScore, HypothesisId, HypothesisScore, Judgment, ScoringPolicy,
    ZeroMassPolicy,
};
pub use pipeline::stage2_score::{score, score_cluster};
pub use pipeline::stage3_combine::{combine, combine_results, rank};
