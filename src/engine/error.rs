//! Error types for type-erased storage and constraint-set construction.
//!
//! This module declares focused, composable error types used across the
//! storage and constraint layers. Each error carries enough context to make
//! failures actionable while remaining small and cheap to pass around or
//! convert into higher-level variants like [`StorageError`].
//!
//! ## Two failure classes
//!
//! The crate distinguishes **recoverable validation failures** from
//! **contract violations**, and only the former appear here:
//!
//! * Validation failures — pushing an opaque value through a checked boundary
//!   with the wrong asserted fingerprint, unwrapping an [`ElementHandle`]
//!   as the wrong type through `try_get`, or constructing a malformed
//!   constraint set. These return `Result` and implement
//!   [`std::error::Error`].
//! * Contract violations — out-of-bounds indices on the storage hot path,
//!   or mistyped unwraps through the unchecked accessors. These are
//!   programmer errors and fail loud with a panic; they are deliberately
//!   *not* representable in this module's types.
//!
//! [`ElementHandle`]: crate::engine::storage::ElementHandle
//!
//! ## Display vs. Debug
//! * [`fmt::Display`] is optimized for operator logs (short, imperative
//!   phrasing).
//! * [`fmt::Debug`] (derived) retains full structure for diagnostics.

use std::fmt;

use crate::engine::constraint::AccessMode;
use crate::engine::types::Fingerprint;

/// Returned when an operation addressed a container or handle whose component
/// fingerprint does not match the caller's asserted type.
///
/// This is a logic/configuration error surfaced at checked API boundaries
/// (e.g. pushing a `Velocity` value into a `Position` container).
///
/// ### Fields
/// * `expected` — The fingerprint the destination storage or handle declares.
/// * `actual` — The fingerprint asserted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatchError {
    /// Fingerprint declared by the storage or handle.
    pub expected: Fingerprint,

    /// Fingerprint asserted by the caller.
    pub actual: Fingerprint,
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "component fingerprint mismatch: expected {:#018x}, got {:#018x}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for TypeMismatchError {}

/// Aggregate error for type-erased container operations.
///
/// Wraps the precise low-level failures that can occur when pushing opaque
/// values through the checked [`ErasedContainer`] boundary.
///
/// [`ErasedContainer`]: crate::engine::storage::ErasedContainer
///
/// Conversions (`From<T>`) are implemented for the low-level errors so callers
/// can write `?` and still return a single, expressive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The asserted fingerprint did not match the container's component type.
    TypeMismatch(TypeMismatchError),

    /// An internal invariant was violated.
    ///
    /// The string identifies the broken invariant. Reaching this variant
    /// indicates a bug in the storage layer, not caller misuse.
    InternalInvariant(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::TypeMismatch(e) => write!(f, "{e}"),
            StorageError::InternalInvariant(what) => {
                write!(f, "internal storage invariant violated: {}", what)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<TypeMismatchError> for StorageError {
    fn from(e: TypeMismatchError) -> Self {
        StorageError::TypeMismatch(e)
    }
}

/// Returned when a constraint set is declaratively malformed.
///
/// ## Context
/// A well-formed constraint set never declares the same component with two
/// different data-touching access modes: a unit of work either reads a
/// component or writes it, not both (a write subsumes the read). Mixing the
/// two in one set would make the conflict relation ambiguous, so construction
/// rejects it up front rather than letting the scheduler act on an
/// inconsistent declaration.
///
/// Duplicate constraints with the *same* mode are permitted and harmless, as
/// is pairing `Exclude` with any mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSetError {
    /// One component was declared with both `Read` and `Write` access.
    ConflictingModes {
        /// Fingerprint of the component declared twice.
        fingerprint: Fingerprint,

        /// First of the two clashing modes, in sorted order.
        first: AccessMode,

        /// Second of the two clashing modes, in sorted order.
        second: AccessMode,
    },
}

impl fmt::Display for ConstraintSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintSetError::ConflictingModes {
                fingerprint,
                first,
                second,
            } => write!(
                f,
                "component {:#018x} declared with conflicting access modes {:?} and {:?} in one constraint set",
                fingerprint, first, second
            ),
        }
    }
}

impl std::error::Error for ConstraintSetError {}
