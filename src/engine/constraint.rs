//! # Access Constraints
//!
//! Declarative access requirements over components, and the pairwise
//! conflict relation a scheduler uses to decide which units of work may run
//! concurrently.
//!
//! ## Purpose
//! A unit of work (a system, a job) declares up front which components it
//! reads, which it writes, and which must be absent from the data it runs
//! over. Given two such declarations, [`ConstraintSet::may_run_concurrently_with`]
//! answers whether the pair is data-race free without inspecting any actual
//! storage.
//!
//! ## Conflict model
//! Two constraints on the *same* component conflict exactly when at least
//! one of them writes and the other touches the data (`Write`/`Write` or
//! `Write`/`Read`). Shared reads never conflict. `Exclude` is a filter, not
//! a data access: an excluding constraint guarantees its unit of work never
//! touches that component's data, so the pair it appears in can never race
//! and is skipped outright.
//!
//! ## Invariants
//! - A constraint set's constraints are always held sorted (mode-major:
//!   `Exclude < Write < Read`, then by fingerprint). Construction sorts;
//!   nothing mutates after.
//! - No component appears in one set with both `Read` and `Write`;
//!   construction rejects such sets.
//! - The concurrency relation is symmetric: `a.may_run_concurrently_with(&b)`
//!   equals `b.may_run_concurrently_with(&a)`.
//!
//! ## Concurrency
//! All types here are immutable after construction and freely shareable
//! across threads.

use std::slice;

use crate::engine::component::{fingerprint_of, Component};
use crate::engine::error::ConstraintSetError;
use crate::engine::types::Fingerprint;

/// How a unit of work touches one component type.
///
/// The declaration order fixes the sort rank used throughout the constraint
/// layer: excluding constraints sort first so the pairwise walk can skip
/// them cheaply, writers come before readers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessMode {
    /// The component must be absent; its data is never touched.
    Exclude,

    /// Exclusive read-write access to the component's data.
    Write,

    /// Shared read-only access to the component's data.
    Read,
}

/// One access requirement: a mode applied to one component type.
///
/// Ordering is mode-major, then by fingerprint, matching the sort invariant
/// of [`ConstraintSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessConstraint {
    mode: AccessMode,
    fingerprint: Fingerprint,
}

impl AccessConstraint {
    /// Creates a constraint from a mode and a raw fingerprint.
    ///
    /// Prefer the typed constructors ([`read`](Self::read),
    /// [`write`](Self::write), [`exclude`](Self::exclude)) when the component
    /// type is statically known; this entry point exists for callers that
    /// resolve fingerprints dynamically.
    #[inline]
    pub fn new(mode: AccessMode, fingerprint: Fingerprint) -> Self {
        Self { mode, fingerprint }
    }

    /// Declares shared read access to component type `T`.
    #[inline]
    pub fn read<T: Component>() -> Self {
        Self::new(AccessMode::Read, fingerprint_of::<T>())
    }

    /// Declares exclusive write access to component type `T`.
    #[inline]
    pub fn write<T: Component>() -> Self {
        Self::new(AccessMode::Write, fingerprint_of::<T>())
    }

    /// Declares that component type `T` must be absent.
    #[inline]
    pub fn exclude<T: Component>() -> Self {
        Self::new(AccessMode::Exclude, fingerprint_of::<T>())
    }

    /// Returns the access mode.
    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Returns the component fingerprint this constraint applies to.
    #[inline]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Returns `true` if this constraint and `other` cannot be satisfied by
    /// two concurrently running units of work.
    ///
    /// Constraints on different components never conflict. On the same
    /// component, `Exclude` never conflicts (no data access), shared reads
    /// never conflict, and any pairing that includes a `Write` does.
    pub fn conflicts_with(&self, other: &AccessConstraint) -> bool {
        if self.fingerprint != other.fingerprint {
            return false;
        }
        if self.mode == AccessMode::Exclude || other.mode == AccessMode::Exclude {
            return false;
        }
        !(self.mode == AccessMode::Read && other.mode == AccessMode::Read)
    }
}

/// The full access declaration of one unit of work.
///
/// Construction validates the declaration and sorts it into the canonical
/// order ([`AccessMode`] rank, then fingerprint); the set is immutable
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<AccessConstraint>,
}

impl ConstraintSet {
    /// Builds a constraint set from an arbitrary list of constraints.
    ///
    /// The list is sorted into canonical order. Duplicate constraints are
    /// permitted (they are idempotent declarations), as is pairing `Exclude`
    /// with a data-access mode for the same component.
    ///
    /// ## Errors
    /// [`ConstraintSetError::ConflictingModes`] when any component appears
    /// with both `Read` and `Write`.
    pub fn new(mut constraints: Vec<AccessConstraint>) -> Result<Self, ConstraintSetError> {
        constraints.sort_unstable();

        for a in &constraints {
            if a.mode == AccessMode::Exclude {
                continue;
            }
            for b in &constraints {
                if b.mode == AccessMode::Exclude {
                    continue;
                }
                if a.fingerprint == b.fingerprint && a.mode != b.mode {
                    // Sorted order puts Write before Read.
                    return Err(ConstraintSetError::ConflictingModes {
                        fingerprint: a.fingerprint,
                        first: a.mode.min(b.mode),
                        second: a.mode.max(b.mode),
                    });
                }
            }
        }

        Ok(Self { constraints })
    }

    /// Returns the constraints in canonical sorted order.
    #[inline]
    pub fn constraints(&self) -> &[AccessConstraint] {
        &self.constraints
    }

    /// Returns the number of constraints in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if the set declares no constraints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates over the constraints in canonical sorted order.
    pub fn iter(&self) -> slice::Iter<'_, AccessConstraint> {
        self.constraints.iter()
    }

    /// Returns `true` if the units of work declaring `self` and `other` may
    /// execute concurrently without a data race.
    ///
    /// The relation is symmetric and conservative: `false` means at least
    /// one component is written by one side and touched by the other.
    /// Excluding constraints are filters, not accesses, and are skipped.
    ///
    /// The sort invariant puts every `Exclude` at the front of each set, so
    /// the pairwise walk runs over the data-access tails only.
    pub fn may_run_concurrently_with(&self, other: &ConstraintSet) -> bool {
        let ours = &self.constraints[self.first_data_access()..];
        let theirs = &other.constraints[other.first_data_access()..];

        for a in ours {
            for b in theirs {
                if a.conflicts_with(b) {
                    return false;
                }
            }
        }
        true
    }

    /// Index of the first non-`Exclude` constraint in the sorted list.
    fn first_data_access(&self) -> usize {
        self.constraints
            .partition_point(|c| c.mode == AccessMode::Exclude)
    }
}
