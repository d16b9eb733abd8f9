use serde::Serialize;
use thiserror::Error;

/// Lower bound of every likelihood ratio emitted by the cluster scorer.
pub const LR_MIN: f64 = 0.001;
/// Upper bound of every likelihood ratio emitted by the cluster scorer.
pub const LR_MAX: f64 = 1000.0;
/// Stand-in for a catch-all likelihood that accumulated to exactly zero.
pub const CATCHALL_FLOOR: f64 = 0.001;
/// `1 - P(H)` at or below this value makes "not H" undefined.
pub const NEAR_CERTAIN_EPS: f64 = 1e-4;

/// What the scorer does when a cluster's prior plausibility ratios sum to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroMassPolicy {
    /// Divide by 1 instead of 0: every prior becomes 0.
    ZeroPriors,
    /// Spread the prior mass evenly: every prior becomes 1/M.
    Uniform,
}

impl ZeroMassPolicy {
    pub fn label(self) -> &'static str {
        match self {
            ZeroMassPolicy::ZeroPriors => "zero-priors",
            ZeroMassPolicy::Uniform => "uniform",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("LR bound {0} is not a finite positive number")]
    InvalidBound(f64),
    #[error("LR lower bound {min} exceeds upper bound {max}")]
    InvertedBounds { min: f64, max: f64 },
}

/// Fixed constants of one scoring run. Fields are read-only so the LR
/// bounds always satisfy `0 < lr_min <= lr_max`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringPolicy {
    lr_min: f64,
    lr_max: f64,
    catchall_floor: f64,
    near_certain_eps: f64,
    zero_mass: ZeroMassPolicy,
}

impl ScoringPolicy {
    pub fn default_v1() -> Self {
        Self {
            lr_min: LR_MIN,
            lr_max: LR_MAX,
            catchall_floor: CATCHALL_FLOOR,
            near_certain_eps: NEAR_CERTAIN_EPS,
            zero_mass: ZeroMassPolicy::ZeroPriors,
        }
    }

    pub fn uniform_v1() -> Self {
        Self::default_v1().with_zero_mass(ZeroMassPolicy::Uniform)
    }

    /// Replace the LR bounds, rejecting NaN, infinite, non-positive or
    /// inverted pairs.
    pub fn with_bounds(self, lr_min: f64, lr_max: f64) -> Result<Self, PolicyError> {
        for bound in [lr_min, lr_max] {
            if !bound.is_finite() || bound <= 0.0 {
                return Err(PolicyError::InvalidBound(bound));
            }
        }
        if lr_min > lr_max {
            return Err(PolicyError::InvertedBounds {
                min: lr_min,
                max: lr_max,
            });
        }
        Ok(Self {
            lr_min,
            lr_max,
            ..self
        })
    }

    pub fn with_zero_mass(self, zero_mass: ZeroMassPolicy) -> Self {
        Self { zero_mass, ..self }
    }

    pub fn lr_min(&self) -> f64 {
        self.lr_min
    }

    pub fn lr_max(&self) -> f64 {
        self.lr_max
    }

    pub fn catchall_floor(&self) -> f64 {
        self.catchall_floor
    }

    pub fn near_certain_eps(&self) -> f64 {
        self.near_certain_eps
    }

    pub fn zero_mass(&self) -> ZeroMassPolicy {
        self.zero_mass
    }

    /// Clamp a raw ratio into `[lr_min, lr_max]`. NaN maps to neutral 1.0.
    pub fn clamp_lr(&self, lr: f64) -> f64 {
        if lr.is_nan() {
            return 1.0;
        }
        lr.max(self.lr_min).min(self.lr_max)
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/policy.rs"]
mod tests;
