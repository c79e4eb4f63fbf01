//! Comparison of a finished run against a reference particle set.
//!
//! Only positions are compared. A particle mismatches when any of its three
//! coordinates differs at all; the error of mismatching particles is then
//! measured as a relative percentage per axis.

use std::fmt;

use nbody_core::{MISMATCH_PERCENT_LIMIT, ParticleBlock, RELATIVE_ERROR_LIMIT};
use serde::{Deserialize, Serialize};

/// Outcome of checking a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verification {
    Fail,
    /// No reference was available
    NotApplicable,
    Success,
}

impl Verification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::NotApplicable => "n/a",
            Self::Success => "successful",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mismatch statistics between computed and reference positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonStats {
    pub mismatched: usize,
    pub total: usize,
    /// Mean of |100 * (computed - reference) / reference| over the three
    /// axes of every mismatching particle; zero when nothing mismatches.
    pub mean_relative_error: f64,
}

impl ComparisonStats {
    pub fn mismatch_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.mismatched as f64 * 100.0 / self.total as f64
    }

    pub fn verdict(&self) -> Verification {
        if self.mismatch_percent() > MISMATCH_PERCENT_LIMIT
            || self.mean_relative_error > RELATIVE_ERROR_LIMIT
        {
            Verification::Fail
        } else {
            Verification::Success
        }
    }
}

fn relative_percent(computed: f32, reference: f32) -> f64 {
    (((computed - reference) as f64 * 100.0) / reference as f64).abs()
}

pub fn compare_positions<const B: usize>(
    computed: &[ParticleBlock<B>],
    reference: &[ParticleBlock<B>],
) -> ComparisonStats {
    debug_assert_eq!(computed.len(), reference.len());

    let mut error = 0.0f64;
    let mut mismatched = 0usize;
    for (local, expected) in computed.iter().zip(reference) {
        for e in 0..B {
            if local.position_x[e] != expected.position_x[e]
                || local.position_y[e] != expected.position_y[e]
                || local.position_z[e] != expected.position_z[e]
            {
                error += relative_percent(local.position_x[e], expected.position_x[e])
                    + relative_percent(local.position_y[e], expected.position_y[e])
                    + relative_percent(local.position_z[e], expected.position_z[e]);
                mismatched += 1;
            }
        }
    }

    let mean_relative_error = if mismatched == 0 {
        0.0
    } else {
        error / (3.0 * mismatched as f64)
    };

    ComparisonStats {
        mismatched,
        total: computed.len() * B,
        mean_relative_error,
    }
}

/// Check a run; without a reference the result is [`Verification::NotApplicable`]
pub fn verify<const B: usize>(
    computed: &[ParticleBlock<B>],
    reference: Option<&[ParticleBlock<B>]>,
) -> (Verification, Option<ComparisonStats>) {
    match reference {
        Some(reference) => {
            let stats = compare_positions(computed, reference);
            (stats.verdict(), Some(stats))
        }
        None => (Verification::NotApplicable, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbody_core::Zeroable;

    const B: usize = 250;

    fn reference_blocks() -> Vec<ParticleBlock<B>> {
        let mut blocks = vec![ParticleBlock::<B>::zeroed(); 4];
        for (b, block) in blocks.iter_mut().enumerate() {
            for k in 0..B {
                let p = (b * B + k) as f32;
                block.set_particle(k, [1.5 + p, 1000.0 + p * 3.0, 7.25 * (p + 1.0)], [0.0; 3], 1.0);
            }
        }
        blocks
    }

    fn one_ulp_up(x: f32) -> f32 {
        f32::from_bits(x.to_bits() + 1)
    }

    #[test]
    fn test_identical_passes() {
        let reference = reference_blocks();
        let computed = reference.clone();

        let (verdict, stats) = verify(&computed, Some(&reference));
        assert_eq!(verdict, Verification::Success);
        let stats = stats.unwrap();
        assert_eq!(stats.mismatched, 0);
        assert_eq!(stats.total, 1000);
        assert_eq!(stats.mean_relative_error, 0.0);
    }

    #[test]
    fn test_no_reference_is_not_applicable() {
        let computed = reference_blocks();
        let (verdict, stats) = verify::<B>(&computed, None);
        assert_eq!(verdict, Verification::NotApplicable);
        assert!(stats.is_none());
        assert_eq!(verdict.to_string(), "n/a");
    }

    #[test]
    fn test_few_tiny_mismatches_pass() {
        let reference = reference_blocks();
        let mut computed = reference.clone();
        // 5 of 1000 particles (0.5%) off by one ulp on x only
        for k in 0..5 {
            computed[0].position_x[k] = one_ulp_up(computed[0].position_x[k]);
        }

        let stats = compare_positions(&computed, &reference);
        assert_eq!(stats.mismatched, 5);
        assert!(stats.mean_relative_error < RELATIVE_ERROR_LIMIT, "{}", stats.mean_relative_error);
        assert_eq!(stats.verdict(), Verification::Success);
    }

    #[test]
    fn test_too_many_mismatches_fail() {
        let reference = reference_blocks();
        let mut computed = reference.clone();
        // 7 of 1000 particles (0.7%) off by one ulp
        for k in 0..7 {
            computed[1].position_x[k] = one_ulp_up(computed[1].position_x[k]);
        }

        let (verdict, _) = verify(&computed, Some(&reference));
        assert_eq!(verdict, Verification::Fail);
        assert!(verdict.is_failure());
    }

    #[test]
    fn test_large_error_fails() {
        let reference = reference_blocks();
        let mut computed = reference.clone();
        computed[3].position_z[10] *= 1.01;

        let stats = compare_positions(&computed, &reference);
        assert_eq!(stats.mismatched, 1);
        // 1% on one axis averages to a third of a percent
        assert!((stats.mean_relative_error - 1.0 / 3.0).abs() < 1e-4);
        assert_eq!(stats.verdict(), Verification::Fail);
    }
}
