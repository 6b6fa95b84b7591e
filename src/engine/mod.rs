//! # Engine Core
//!
//! The storage-and-scheduling core: component identity, typed and
//! type-erased component containers, and the access-constraint conflict
//! model schedulers build on.
//!
//! ## Layering
//! - [`types`] — shared identifier types (the component fingerprint).
//! - [`component`] — the [`Component`](component::Component) trait and
//!   identity resolution (names, fingerprints, tag classification).
//! - [`storage`] — dense and counting component stores behind the
//!   type-erased [`ErasedContainer`](storage::ErasedContainer) interface.
//! - [`constraint`] — declarative access requirements and the pairwise
//!   concurrency predicate.
//! - [`error`] — the recoverable error types the checked boundaries return.
//!
//! Identity flows downward: `component` assigns fingerprints, `storage`
//! routes by them, `constraint` reasons about them. No layer reaches back
//! up.

pub mod component;
pub mod constraint;
pub mod error;
pub mod storage;
pub mod types;
