use serde::{Deserialize, Serialize};
use serde_json::Value;

use sweetshop_core::validation;
use sweetshop_core::{DomainError, DomainResult, ValueObject};

use crate::sweet::Sweet;

/// Positive whole number of units moved by a stock transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct StockAmount(u64);

impl StockAmount {
    pub fn new(raw: i64) -> DomainResult<Self> {
        validation::check_positive_integer("quantity", raw)
            .map(Self)
            .map_err(|v| DomainError::invalid_quantity(v.to_string()))
    }

    /// Validate an untyped amount (rejects strings, fractions, zero, negatives).
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        validation::positive_integer("quantity", Some(value))
            .map(Self)
            .map_err(|v| DomainError::invalid_quantity(v.to_string()))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for StockAmount {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(DomainError::invalid_quantity(
                "quantity: must be a positive integer",
            ));
        }
        Ok(Self(value))
    }
}

impl From<StockAmount> for u64 {
    fn from(value: StockAmount) -> Self {
        value.0
    }
}

impl ValueObject for StockAmount {}

/// A validated change to a sweet's stock level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum StockTransition {
    /// Sell units; only allowed while enough stock remains.
    Purchase(StockAmount),
    /// Add units; always allowed, including on an empty shelf.
    Restock(StockAmount),
}

impl StockTransition {
    pub fn amount(self) -> StockAmount {
        match self {
            StockTransition::Purchase(a) | StockTransition::Restock(a) => a,
        }
    }

    /// Decide the next snapshot of `sweet`.
    ///
    /// Pure: the input is never mutated, so a rejected transition leaves no
    /// trace.
    pub fn apply(self, sweet: &Sweet) -> DomainResult<Sweet> {
        let available = sweet.quantity();
        match self {
            StockTransition::Purchase(amount) => {
                if !sweet.can_purchase(amount.get()) {
                    return Err(DomainError::InsufficientStock {
                        requested: amount.get(),
                        available,
                    });
                }
                Ok(sweet.with_quantity(available - amount.get()))
            }
            StockTransition::Restock(amount) => {
                let next = available.checked_add(amount.get()).ok_or_else(|| {
                    DomainError::invalid_quantity(format!(
                        "restocking {} would overflow current stock of {available}",
                        amount.get()
                    ))
                })?;
                Ok(sweet.with_quantity(next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use sweetshop_core::Entity;

    fn sweet(quantity: i64) -> Sweet {
        Sweet::new(1, "Dark Chocolate", "chocolate", 4.99, quantity).unwrap()
    }

    fn amount(raw: i64) -> StockAmount {
        StockAmount::new(raw).unwrap()
    }

    #[test]
    fn amount_must_be_positive_whole_number() {
        assert!(matches!(StockAmount::new(0), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(StockAmount::new(-2), Err(DomainError::InvalidQuantity(_))));
        assert!(matches!(
            StockAmount::from_json(&json!(1.5)),
            Err(DomainError::InvalidQuantity(_))
        ));
        assert!(matches!(
            StockAmount::from_json(&json!("3")),
            Err(DomainError::InvalidQuantity(_))
        ));
        assert_eq!(StockAmount::from_json(&json!(3)).unwrap().get(), 3);
    }

    #[test]
    fn purchase_decrements_and_keeps_other_fields() {
        let before = sweet(20);
        let after = StockTransition::Purchase(amount(5)).apply(&before).unwrap();
        assert_eq!(after.quantity(), 15);
        assert_eq!(after.id(), before.id());
        assert_eq!(after.name(), before.name());
        assert_eq!(after.category(), before.category());
        assert_eq!(after.price(), before.price());
    }

    #[test]
    fn purchase_of_entire_stock_empties_shelf() {
        let after = StockTransition::Purchase(amount(20)).apply(&sweet(20)).unwrap();
        assert_eq!(after.quantity(), 0);
    }

    #[test]
    fn purchase_from_empty_shelf_is_insufficient() {
        let err = StockTransition::Purchase(amount(1)).apply(&sweet(0)).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                requested: 1,
                available: 0
            }
        );
    }

    #[test]
    fn restock_works_on_empty_shelf() {
        let after = StockTransition::Restock(amount(15)).apply(&sweet(0)).unwrap();
        assert_eq!(after.quantity(), 15);
    }

    #[test]
    fn restock_overflow_is_rejected() {
        let full = sweet(0).with_quantity(u64::MAX);
        let err = StockTransition::Restock(amount(1)).apply(&full).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
    }

    #[test]
    fn transitions_serialize_with_kind_tag() {
        let t = StockTransition::Restock(amount(4));
        assert_eq!(
            serde_json::to_value(t).unwrap(),
            json!({ "kind": "restock", "amount": 4 })
        );
        assert_eq!(t.amount().get(), 4);
    }

    fn transition() -> impl Strategy<Value = StockTransition> {
        prop_oneof![
            (1u64..50).prop_map(|n| StockTransition::Purchase(StockAmount(n))),
            (1u64..50).prop_map(|n| StockTransition::Restock(StockAmount(n))),
        ]
    }

    proptest! {
        #[test]
        fn quantity_tracks_accepted_transitions_only(
            start in 0i64..100,
            steps in proptest::collection::vec(transition(), 0..40),
        ) {
            let mut current = sweet(start);
            let mut expected = start as u64;

            for step in steps {
                match step.apply(&current) {
                    Ok(next) => {
                        match step {
                            StockTransition::Purchase(a) => expected -= a.get(),
                            StockTransition::Restock(a) => expected += a.get(),
                        }
                        current = next;
                    }
                    Err(DomainError::InsufficientStock { requested, available }) => {
                        prop_assert!(requested > available);
                        prop_assert_eq!(available, current.quantity());
                    }
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
                prop_assert_eq!(current.quantity(), expected);
            }
        }

        #[test]
        fn purchase_then_restock_conserves_quantity(start in 1i64..1000, k in 1i64..1000) {
            prop_assume!(k <= start);
            let before = sweet(start);
            let bought = StockTransition::Purchase(amount(k)).apply(&before).unwrap();
            let back = StockTransition::Restock(amount(k)).apply(&bought).unwrap();
            prop_assert_eq!(back, before);
        }
    }
}
