//! # ecs-core
//!
//! A type-erased component storage and access-constraint scheduling core for
//! entity-component-system style frameworks.
//!
//! ## Design Goals
//! - **Runtime type identity without runtime type information.** Every
//!   component type resolves to a stable 64-bit fingerprint derived from its
//!   name; storage and scheduling route on that one word.
//! - **Dense, relocatable storage.** Component values are plain `Copy` data
//!   held in gap-free columns with O(1) append and O(1) swap-remove.
//! - **Tags cost nothing.** Zero-sized marker components are stored as a
//!   count, selected automatically by the container policy.
//! - **Schedulers decide from declarations.** Units of work declare
//!   read/write/exclude requirements per component; a pure pairwise
//!   predicate tells a scheduler which pairs may overlap, with no storage
//!   inspection and no locks.
//!
//! ## Quick Start
//! ```
//! use ecs_core::prelude::*;
//!
//! #[derive(Clone, Copy)]
//! struct Position { x: f32, y: f32 }
//! impl Component for Position {}
//!
//! let mut container = Position::make_container();
//! container.push(Position { x: 1.0, y: 2.0 })?;
//! assert_eq!(container.len(), 1);
//!
//! let movement = ConstraintSet::new(vec![AccessConstraint::write::<Position>()])?;
//! let render = ConstraintSet::new(vec![AccessConstraint::read::<Position>()])?;
//! assert!(!movement.may_run_concurrently_with(&render));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod engine;

pub use engine::component::{
    fingerprint_of, resolve_fingerprint, resolve_name, Component, ComponentIdentity,
};
pub use engine::constraint::{AccessConstraint, AccessMode, ConstraintSet};
pub use engine::error::{ConstraintSetError, StorageError, TypeMismatchError};
pub use engine::storage::{
    ComponentStore, DenseStore, ElementHandle, ErasedContainer, TagStore, WrappedContainer,
};
pub use engine::types::Fingerprint;

/// Convenience re-exports for downstream crates.
///
/// `use ecs_core::prelude::*;` pulls in the component trait, the container
/// surface, and the constraint types in one line.
pub mod prelude {
    pub use crate::engine::component::{
        fingerprint_of, resolve_fingerprint, resolve_name, Component, ComponentIdentity,
    };
    pub use crate::engine::constraint::{AccessConstraint, AccessMode, ConstraintSet};
    pub use crate::engine::error::{ConstraintSetError, StorageError, TypeMismatchError};
    pub use crate::engine::storage::{
        ComponentStore, DenseStore, ElementHandle, ErasedContainer, TagStore, WrappedContainer,
    };
    pub use crate::engine::types::Fingerprint;
}
