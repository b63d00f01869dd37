//! Small statistics helpers for summarizing the sample window.

/// Arithmetic mean of the values, or None when empty.
pub fn mean_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of the values, or None when empty.
///
/// Sorts a copy; window sizes here are tiny.
pub fn median_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        mean_f64(&sorted[mid - 1..=mid])
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(mean_f64(&[]), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean_f64(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean_f64(&[4.0]), Some(4.0));
    }

    #[test]
    fn test_median_odd_count() {
        assert_eq!(median_f64(&[18.0, 10.0, 14.0, 12.0, 15.0]), Some(14.0));
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median_f64(&[10.0, 20.0, 30.0, 40.0]), Some(25.0));
    }

    #[test]
    fn test_median_of_empty_is_none() {
        assert_eq!(median_f64(&[]), None);
    }
}
