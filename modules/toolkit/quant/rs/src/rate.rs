use derive_getters::Dissolve;

/// Library-wide fragment total, fixed once the first counting pass over all
/// gene regions has fully completed. Per-feature rates can only be computed
/// against a finished basis, which is what keeps the two counting phases in
/// order: phase two borrows the basis and never feeds anything back into it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Dissolve)]
pub struct RateBasis {
    total: u64,
}

impl RateBasis {
    pub fn new(total: u64) -> Self {
        Self { total }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Length- and library-size-normalized fragment rate: fragments per
    /// kilobase of feature per million library fragments. An empty library
    /// has no meaningful rate, so the result is None rather than a division
    /// by zero.
    pub fn rate(&self, count: u64, length: u64) -> Option<f64> {
        debug_assert!(length > 0);
        if self.total == 0 {
            return None;
        }
        Some(count as f64 / (self.total as f64 / 1e6) / length as f64 * 1e3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate() {
        let basis = RateBasis::new(1_000_000);
        assert_eq!(basis.rate(10, 100), Some(100.0));
        assert_eq!(basis.rate(0, 100), Some(0.0));

        // Double the library, half the rate
        let basis = RateBasis::new(2_000_000);
        assert_eq!(basis.rate(10, 100), Some(50.0));

        // Twice the feature length, half the rate
        assert_eq!(basis.rate(10, 200), Some(25.0));
    }

    #[test]
    fn test_empty_library() {
        let basis = RateBasis::new(0);
        assert_eq!(basis.rate(10, 100), None);
        assert_eq!(basis.rate(0, 100), None);
    }
}
