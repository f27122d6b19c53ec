use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when constructing a [Percentage] outside 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("rollout percentage must be between 0 and 100, got {0}")]
pub struct PercentageError(pub u8);

/// A rollout proportion in the closed range 0..=100.
///
/// The range is enforced at construction (and during deserialization), so an
/// in-memory `Percentage` is always valid; evaluation never has to consider
/// out-of-range thresholds. 0 enables no one through the rollout path, 100
/// enables everyone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// No actors enabled through the rollout path.
    pub const ZERO: Percentage = Percentage(0);
    /// Every actor enabled through the rollout path.
    pub const MAX: Percentage = Percentage(100);

    /// Construct a percentage, rejecting values above 100.
    pub fn new(value: u8) -> Result<Self, PercentageError> {
        if value > 100 {
            Err(PercentageError(value))
        } else {
            Ok(Self(value))
        }
    }

    /// The numeric value, guaranteed to be in 0..=100.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percentage {
    type Error = PercentageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(percentage: Percentage) -> Self {
        percentage.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral::prelude::*;
    use test_case::test_case;

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(50)]
    #[test_case(100)]
    fn accepts_in_range_values(value: u8) {
        assert_that!(Percentage::new(value).map(Percentage::value)).is_equal_to(Ok(value));
    }

    #[test_case(101)]
    #[test_case(255)]
    fn rejects_out_of_range_values(value: u8) {
        assert_that!(Percentage::new(value)).is_equal_to(Err(PercentageError(value)));
    }

    #[test]
    fn default_is_zero() {
        assert_that!(Percentage::default()).is_equal_to(Percentage::ZERO);
    }

    #[test]
    fn constants_bound_the_range() {
        assert_that!(Percentage::new(0)).is_equal_to(Ok(Percentage::ZERO));
        assert_that!(Percentage::new(100)).is_equal_to(Ok(Percentage::MAX));
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: Percentage = serde_json::from_str("42").unwrap();
        assert_that!(ok.value()).is_equal_to(42);

        let err = serde_json::from_str::<Percentage>("101");
        assert_that!(err.is_err()).is_true();
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&Percentage::new(25).unwrap()).unwrap();
        assert_that!(json).is_equal_to("25".to_string());
    }
}
