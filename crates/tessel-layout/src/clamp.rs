//! Batched min/max clamping
//!
//! The flex solver clamps every sibling of a container after each
//! distribution round. The batch form is a pure element-wise map over three
//! equally long columns; with the `parallel` feature, batches at or above a
//! threshold are split across rayon's worker pool.

/// Clamp one size into `[min, max]`.
///
/// The lower bound is floored at zero, and when `min > max` the minimum
/// wins.
#[inline]
pub fn clamp_size(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min.max(0.0))
}

/// Clamp `values[i]` into `[mins[i], maxs[i]]` in place.
pub fn clamp_batch(values: &mut [f32], mins: &[f32], maxs: &[f32]) {
    debug_assert_eq!(values.len(), mins.len());
    debug_assert_eq!(values.len(), maxs.len());

    for ((value, &min), &max) in values.iter_mut().zip(mins).zip(maxs) {
        *value = clamp_size(*value, min, max);
    }
}

/// Like [`clamp_batch`], fanning out across threads once `values.len()`
/// reaches `parallel_threshold`. Without the `parallel` feature this is
/// always sequential.
pub fn clamp_batch_with_threshold(
    values: &mut [f32],
    mins: &[f32],
    maxs: &[f32],
    parallel_threshold: usize,
) {
    #[cfg(feature = "parallel")]
    {
        if values.len() >= parallel_threshold {
            use rayon::prelude::*;

            debug_assert_eq!(values.len(), mins.len());
            debug_assert_eq!(values.len(), maxs.len());

            values
                .par_iter_mut()
                .zip(mins.par_iter())
                .zip(maxs.par_iter())
                .for_each(|((value, &min), &max)| *value = clamp_size(*value, min, max));
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    clamp_batch(values, mins, maxs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_size() {
        assert_eq!(clamp_size(50.0, 10.0, 100.0), 50.0);
        assert_eq!(clamp_size(5.0, 10.0, 100.0), 10.0);
        assert_eq!(clamp_size(500.0, 10.0, 100.0), 100.0);
    }

    #[test]
    fn test_min_wins_over_max() {
        assert_eq!(clamp_size(50.0, 80.0, 20.0), 80.0);
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(clamp_size(-5.0, -10.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_batch() {
        let mut values = [0.0, 50.0, 150.0, 75.0];
        let mins = [10.0, 10.0, 10.0, 80.0];
        let maxs = [100.0, 100.0, 100.0, 60.0];

        clamp_batch(&mut values, &mins, &maxs);
        assert_eq!(values, [10.0, 50.0, 100.0, 80.0]);
    }

    #[test]
    fn test_threshold_matches_sequential() {
        let count = 10_000;
        let mins: Vec<f32> = (0..count).map(|i| (i % 7) as f32 * 10.0).collect();
        let maxs: Vec<f32> = (0..count).map(|i| 40.0 + (i % 5) as f32 * 10.0).collect();
        let input: Vec<f32> = (0..count).map(|i| (i % 13) as f32 * 9.0).collect();

        let mut sequential = input.clone();
        clamp_batch(&mut sequential, &mins, &maxs);

        let mut batched = input;
        clamp_batch_with_threshold(&mut batched, &mins, &maxs, 1024);

        assert_eq!(sequential, batched);
    }
}
