//! Entity trait: identity that survives field changes.

/// Entity marker + minimal interface.
///
/// Records fetched from the document store (user profiles, for now) are
/// compared by identity, not by field values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Returns `true` if both records refer to the same entity.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
