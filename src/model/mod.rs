pub mod analysis;
pub mod float_repr;
pub mod hypothesis;
pub mod policy;
pub mod scores;

pub use hypothesis::{HypothesisId, Judgment};
pub use policy::{PolicyError, ScoringPolicy, ZeroMassPolicy};
pub use scores::{ClusterResult, CumulativeScore, HypothesisScore};
