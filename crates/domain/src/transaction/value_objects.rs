//! Value objects for the transaction domain.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Number of units purchased in a transaction.
///
/// Always at least 1 and at most `i32::MAX`, so it fits the `INTEGER`
/// column of the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Largest storable quantity.
    pub const MAX: i32 = i32::MAX;

    /// Creates a quantity, rejecting values outside `1..=Quantity::MAX`.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 1 || value > i64::from(Self::MAX) {
            return Err(DomainError::InvalidQuantity {
                quantity: value,
                max: Self::MAX,
            });
        }
        // Range checked above.
        Ok(Self(value as i32))
    }

    /// Returns the raw value.
    pub fn get(&self) -> i32 {
        self.0
    }

    /// Returns the value as a float for pricing.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_values() {
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
        assert_eq!(Quantity::new(250).unwrap().get(), 250);
        assert_eq!(Quantity::new(i64::from(i32::MAX)).unwrap().get(), i32::MAX);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(
            Quantity::new(0),
            Err(DomainError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(matches!(
            Quantity::new(-4),
            Err(DomainError::InvalidQuantity { quantity: -4, .. })
        ));
    }

    #[test]
    fn rejects_values_that_do_not_fit_the_column() {
        assert!(Quantity::new(i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(ok.get(), 3);

        let bad: Result<Quantity, _> = serde_json::from_str("0");
        assert!(bad.is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Quantity::new(5).unwrap()).unwrap();
        assert_eq!(json, "5");
    }
}
