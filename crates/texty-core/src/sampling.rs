//! Front-weighted random index selection.
//!
//! A review session should mostly revisit the sections at the front of the
//! collection (the weakest ones once it has been ranked) while still touching
//! the rest now and then. Indices are drawn from a trimmed log-normal scheme:
//!
//! 1. draw `y` from a log-normal distribution whose log has mean
//!    `μ = mean_factor · (N − 1)` and standard deviation
//!    `σ = spread_factor · (N − 1)`;
//! 2. take `ln y` and mirror it onto the collection, measuring its distance
//!    back from the last index `N − 1`;
//! 3. truncate to an integer and reject and redraw anything past `N − 1`.
//!
//! The mirrored draw is a folded normal centred on `(1 − mean_factor)(N − 1)`.
//! With the defaults the centre sits within one spread of 0, so index 0 is the
//! most likely outcome and the odds fall off smoothly toward the back. Lower
//! `mean_factor` values move the peak toward the back.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextyError};

/// Tuning for [`weighted_index`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Centre of the log draw as a fraction of the last index. `1.0` peaks
    /// at the front, `0.0` at the back.
    #[serde(default = "default_mean_factor")]
    pub mean_factor: f64,
    /// Spread of the log draw as a fraction of the last index.
    #[serde(default = "default_spread_factor")]
    pub spread_factor: f64,
    /// Redraws allowed before clamping to the last index.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_mean_factor() -> f64 {
    0.8
}
fn default_spread_factor() -> f64 {
    0.3
}
fn default_max_retries() -> u32 {
    100
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            mean_factor: default_mean_factor(),
            spread_factor: default_spread_factor(),
            max_retries: default_max_retries(),
        }
    }
}

impl SamplingConfig {
    /// Reject factors that cannot parameterise the distribution.
    pub fn validate(&self) -> Result<()> {
        if !self.mean_factor.is_finite() {
            return Err(TextyError::Domain(format!(
                "sampling mean_factor must be finite, got {}",
                self.mean_factor
            )));
        }
        if !self.spread_factor.is_finite() || self.spread_factor < 0.0 {
            return Err(TextyError::Domain(format!(
                "sampling spread_factor must be a non-negative number, got {}",
                self.spread_factor
            )));
        }
        Ok(())
    }
}

/// Draw an index in `0..len`, biased toward 0.
///
/// Fails with [`TextyError::Domain`] when `len` is zero or the configuration
/// is unusable.
pub fn weighted_index<R: Rng + ?Sized>(
    len: usize,
    config: &SamplingConfig,
    rng: &mut R,
) -> Result<usize> {
    if len == 0 {
        return Err(TextyError::Domain("the collection is empty".into()));
    }
    config.validate()?;

    let last = len - 1;
    if last == 0 {
        return Ok(0);
    }

    let mean = config.mean_factor * last as f64;
    let sigma = config.spread_factor * last as f64;
    // ln of a log-normal variate is normal; sampling the normal directly
    // keeps exp(mean) from overflowing on large collections.
    let log_draw = Normal::new(mean, sigma)
        .map_err(|e| TextyError::Domain(format!("invalid sampling parameters: {e}")))?;

    for _ in 0..=config.max_retries {
        let offset = (last as f64 - log_draw.sample(rng)).abs().trunc();
        if offset <= last as f64 {
            return Ok(offset as usize);
        }
    }

    tracing::debug!(
        len,
        retries = config.max_retries,
        "weighted draw kept landing out of range, clamping to last index"
    );
    Ok(last)
}
