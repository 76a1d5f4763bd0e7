//! Summary statistics over raw value lists.
//!
//! Values are sorted once on construction and every statistic is computed
//! from the sorted list, so the result depends only on the multiset of
//! values and never on the order they arrived in. Every accessor returns
//! `None` for empty input so that "no data" is never confused with a
//! genuine zero.

/// Values in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedValues(Vec<f64>);

impl SortedValues {
    pub fn new(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum, accumulated in ascending order.
    pub fn total(&self) -> Option<f64> {
        (!self.0.is_empty()).then(|| self.0.iter().sum())
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> Option<f64> {
        self.total().map(|total| total / self.0.len() as f64)
    }

    /// Median; the average of the two central values for even lengths.
    pub fn median(&self) -> Option<f64> {
        if self.0.is_empty() {
            return None;
        }
        let mid = self.0.len() / 2;
        if self.0.len() % 2 == 0 {
            Some((self.0[mid - 1] + self.0[mid]) / 2.0)
        } else {
            Some(self.0[mid])
        }
    }

    /// Smallest value.
    pub fn min(&self) -> Option<f64> {
        self.0.first().copied()
    }

    /// Largest value.
    pub fn max(&self) -> Option<f64> {
        self.0.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[f64]) -> SortedValues {
        SortedValues::new(values.to_vec())
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(sorted(&[2.0, 4.0, 6.0]).median(), Some(4.0));
        assert_eq!(sorted(&[2.0, 4.0, 6.0, 8.0]).median(), Some(5.0));
        assert_eq!(sorted(&[8.0, 2.0, 6.0, 4.0]).median(), Some(5.0));
        assert_eq!(sorted(&[7.0]).median(), Some(7.0));
    }

    #[test]
    fn test_empty_input_is_none() {
        let empty = SortedValues::default();
        assert!(empty.is_empty());
        assert_eq!(empty.total(), None);
        assert_eq!(empty.mean(), None);
        assert_eq!(empty.median(), None);
        assert_eq!(empty.min(), None);
        assert_eq!(empty.max(), None);
    }

    #[test]
    fn test_mean_min_max() {
        let values = sorted(&[3.0, 1.0, 2.0]);
        assert_eq!(values.len(), 3);
        assert_eq!(values.total(), Some(6.0));
        assert_eq!(values.mean(), Some(2.0));
        assert_eq!(values.min(), Some(1.0));
        assert_eq!(values.max(), Some(3.0));
    }

    #[test]
    fn test_total_ignores_arrival_order() {
        let forward = sorted(&[0.1, 0.2, 0.3]);
        let backward = sorted(&[0.3, 0.1, 0.2]);
        assert_eq!(forward.total(), backward.total());
        assert_eq!(forward.mean(), backward.mean());
    }

    #[test]
    fn test_all_zero_is_not_empty() {
        assert_eq!(sorted(&[0.0, 0.0]).mean(), Some(0.0));
    }
}
