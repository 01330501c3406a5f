//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stores key entities by [`Entity::id`]; two snapshots with the same id are
/// the same entity at different points in time.
pub trait Entity: Clone {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
