//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two with the same attributes are equal.
/// They are immutable once constructed, so a value object that exists has
/// already passed validation:
///
/// - `Price(4.99)` and `StockAmount(5)` are value objects
/// - `Sweet { id: SweetId(1), .. }` is an entity
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Price(f64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(4.99), Price(4.99));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
