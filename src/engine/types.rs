//! Core identifier types shared across the storage and constraint layers.
//!
//! ## Design Philosophy
//!
//! Component types are identified at runtime by a **fingerprint**: a digest of
//! the component's resolved name, truncated to native word width. Fingerprints
//! are:
//!
//! - stable for the lifetime of the process,
//! - cheap to copy and compare (one machine word),
//! - usable directly as hashtable keys,
//! - collision-resistant enough that two distinct component types sharing a
//!   fingerprint is treated as impossible in practice (the same risk any
//!   hash-keyed type tag accepts).
//!
//! Everything that routes operations between the type-erased storage layer and
//! its callers — element handles, erased containers, access constraints — keys
//! on this one value rather than on compile-time type information.

/// Truncated digest identifying a component type.
///
/// Produced by [`resolve_fingerprint`](crate::engine::component::resolve_fingerprint)
/// from the component's resolved name; see `engine::component` for the
/// resolution rules.
pub type Fingerprint = u64;

/// Number of digest bytes folded into a [`Fingerprint`].
pub const FINGERPRINT_BYTES: usize = std::mem::size_of::<Fingerprint>();
