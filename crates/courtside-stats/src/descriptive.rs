/// Descriptive statistics summarizing a dataset.
///
/// This structure contains the measures of central tendency and dispersion used
/// to build league baselines. Dispersion is reported as the *sample* variance
/// (divisor `n - 1`), which is what the attention scorer standardizes against.
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// Number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The sample variance of the dataset (`0.0` when `count <= 1`).
    pub variance: f64,
    /// The sample standard deviation of the dataset (`0.0` when `count <= 1`).
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in arbitrary order.
    ///
    /// Values are summed in iteration order, so callers that need bit-exact
    /// means should feed values in a stable order.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use courtside_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.count, 8);
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let min = values.iter().copied().reduce(f64::min)?;
        let max = values.iter().copied().reduce(f64::max)?;
        let count = values.len();
        let mean = mean(&values);
        let std_dev = sample_std_dev(&values, mean);
        Some(Self {
            count,
            min,
            max,
            mean,
            variance: std_dev * std_dev,
            std_dev,
        })
    }
}

/// Arithmetic mean of `values`, or `0.0` for an empty slice.
///
/// ```
/// # use courtside_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation of `values` around a precomputed `mean`.
///
/// Uses the `n - 1` divisor. Datasets with at most one value have no spread and
/// return `0.0`.
///
/// ```
/// # use courtside_stats::descriptive::sample_std_dev;
/// assert_eq!(sample_std_dev(&[3.0], 3.0), 0.0);
/// assert_eq!(sample_std_dev(&[1.0, 3.0], 2.0), 2.0_f64.sqrt());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new(Vec::<f64>::new()).is_none());
    }

    #[test]
    fn test_single_value_has_no_spread() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_constant_values() {
        let stats = DescriptiveStats::new([0.5; 10]).unwrap();
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_sample_divisor() {
        // population sd of [1, 2, 3, 4] is sqrt(1.25); sample sd is sqrt(5/3)
        let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((stats.std_dev - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_ignore_order() {
        let stats = DescriptiveStats::new([3.0, -1.0, 7.5, 2.0]).unwrap();
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 7.5);
    }
}
