//! Per-variable random draws.

use std::f64::consts::TAU;

use foresight_core::constants::{NORMAL_RANGE_SIGMAS, SKEW_DECAY_RATE, SKEW_TRANSFORM_CAP};
use foresight_core::models::{Distribution, Variable};
use rand::Rng;

/// Draw one value for `variable`.
///
/// Every non-fixed shape stays inside `[min, max]`. Unknown distribution names
/// sample as uniform; the engine reports them once per run.
pub fn sample<R: Rng + ?Sized>(variable: &Variable, rng: &mut R) -> f64 {
    match variable.distribution {
        Distribution::Fixed => variable.value,
        Distribution::Uniform | Distribution::Unknown(_) => uniform(variable, rng),
        Distribution::Normal => normal(variable, rng),
        Distribution::RightSkewed => {
            let (lo, hi) = variable.bounds();
            clamp(lo + skew_fraction(rng) * (hi - lo), lo, hi)
        }
        Distribution::LeftSkewed => {
            let (lo, hi) = variable.bounds();
            clamp(hi - skew_fraction(rng) * (hi - lo), lo, hi)
        }
    }
}

fn uniform<R: Rng + ?Sized>(variable: &Variable, rng: &mut R) -> f64 {
    let (lo, hi) = variable.bounds();
    clamp(lo + rng.gen::<f64>() * (hi - lo), lo, hi)
}

/// Box-Muller deviate scaled so the declared range covers ±3σ, then clamped.
fn normal<R: Rng + ?Sized>(variable: &Variable, rng: &mut R) -> f64 {
    let (lo, hi) = variable.bounds();
    let std_dev = (hi - lo) / NORMAL_RANGE_SIGMAS;
    // u1 in (0, 1] so ln(u1) is finite.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    clamp(variable.value + z * std_dev, lo, hi)
}

/// Exponential-decay draw normalized into [0, 1], mass near 0.
fn skew_fraction<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.gen::<f64>();
    let t = -(1.0 - u).ln() / SKEW_DECAY_RATE;
    t.min(SKEW_TRANSFORM_CAP) / SKEW_TRANSFORM_CAP
}

// Also absorbs rounding at the range ends. f64::clamp would panic on NaN bounds.
fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}
