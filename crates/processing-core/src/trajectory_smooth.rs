//! Gaussian smoothing of a scene's horizontal trajectory.
//!
//! Only `x` is filtered. Each scene is smoothed on its own, so a cut is
//! always allowed to be a hard discontinuity. Ends are handled by
//! reflection (`d c b a | a b c d | d c b a`); the kernel is truncated at
//! four standard deviations.

use reframe_schedule_model::Step;

/// Number of standard deviations the kernel extends on each side.
const KERNEL_TRUNCATE: f64 = 4.0;

/// Fixed-kernel Gaussian smoother over step positions.
#[derive(Debug, Clone, Copy)]
pub struct TrajectorySmoother {
    sigma: f64,
}

impl TrajectorySmoother {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Smooth one scene's steps. Length, `y` and frame ranges are preserved.
    pub fn smooth(&self, steps: &[Step]) -> Vec<Step> {
        let xs: Vec<f64> = steps.iter().map(|s| s.x).collect();
        let smoothed = gaussian_filter_1d(&xs, self.sigma);
        steps
            .iter()
            .zip(smoothed)
            .map(|(step, x)| step.with_x(x))
            .collect()
    }
}

/// Normalized Gaussian weights for offsets `-radius..=radius`.
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (KERNEL_TRUNCATE * sigma + 0.5) as i64;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|k| (-0.5 * (k * k) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Convolve `data` with a Gaussian kernel, reflecting at both ends.
///
/// `sigma <= 0` returns the input unchanged.
pub fn gaussian_filter_1d(data: &[f64], sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 || data.len() < 2 {
        return data.to_vec();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;
    let n = data.len() as i64;

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * data[reflect_index(i + k as i64 - radius, n)])
                .sum()
        })
        .collect()
}

/// Map any index onto `[0, n)` by mirror reflection with the edge repeated.
fn reflect_index(index: i64, n: i64) -> usize {
    let period = 2 * n;
    let m = index.rem_euclid(period);
    (if m < n { m } else { period - 1 - m }) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn steps_from(xs: &[f64]) -> Vec<Step> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| Step::single(x, 540.0, 100 + i as u64))
            .collect()
    }

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let kernel = gaussian_kernel(5.0);
        assert_eq!(kernel.len(), 41);
        assert!((kernel.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        for k in 0..kernel.len() / 2 {
            assert!((kernel[k] - kernel[kernel.len() - 1 - k]).abs() < 1e-15);
        }
        assert!(kernel[20] > kernel[19]);
    }

    #[test]
    fn test_reflect_index() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(9, 4), 1);
        assert_eq!(reflect_index(-9, 4), 0);
    }

    #[test]
    fn test_constant_signal_unchanged() {
        let smoothed = gaussian_filter_1d(&[300.0; 12], 5.0);
        for x in smoothed {
            assert!((x - 300.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sigma_zero_is_identity() {
        let steps = steps_from(&[1.5, 7.25, 300.0, -4.0]);
        assert_eq!(TrajectorySmoother::new(0.0).smooth(&steps), steps);
    }

    #[test]
    fn test_smoothing_softens_a_jump() {
        let mut xs = vec![0.0; 10];
        xs.extend(vec![100.0; 10]);
        let smoothed = gaussian_filter_1d(&xs, 2.0);
        assert!(smoothed[9] > 0.0 && smoothed[9] < 50.0);
        assert!(smoothed[10] > 50.0 && smoothed[10] < 100.0);
        assert!(smoothed.windows(2).all(|w| w[1] >= w[0] - 1e-12));
    }

    #[test]
    fn test_single_step_untouched() {
        let steps = steps_from(&[42.0]);
        assert_eq!(TrajectorySmoother::new(5.0).smooth(&steps), steps);
    }

    proptest! {
        #[test]
        fn prop_smoothing_preserves_everything_but_x(
            xs in prop::collection::vec(0.0f64..1920.0, 0..80),
            sigma in 0.0f64..10.0,
        ) {
            let steps = steps_from(&xs);
            let smoothed = TrajectorySmoother::new(sigma).smooth(&steps);
            prop_assert_eq!(smoothed.len(), steps.len());
            for (a, b) in steps.iter().zip(&smoothed) {
                prop_assert_eq!(a.y, b.y);
                prop_assert_eq!(a.frame_start, b.frame_start);
                prop_assert_eq!(a.frame_end, b.frame_end);
            }
        }

        #[test]
        fn prop_smoothing_stays_within_range(
            xs in prop::collection::vec(0.0f64..1920.0, 1..80),
            sigma in 0.1f64..10.0,
        ) {
            let smoothed = gaussian_filter_1d(&xs, sigma);
            let lo = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            for x in smoothed {
                prop_assert!(x >= lo - 1e-9 && x <= hi + 1e-9);
            }
        }
    }
}
