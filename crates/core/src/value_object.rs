//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An
/// `AccountCode` is the canonical example here: `"1-01-002"` is the same code
/// wherever it appears, while two students who happen to share a name are
/// still distinct entities.
///
/// To "modify" a value object, construct a new one. The trait only requires
/// what every value needs: cheap cloning, value equality, and debuggability.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
