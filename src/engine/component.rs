//! # Component Identity
//!
//! This module defines what a component *is* and assigns every component type
//! a stable runtime identity: a human-readable name, a fixed-width
//! fingerprint, and a tag classification.
//!
//! ## Purpose
//! The identity decouples component type information from runtime storage:
//! the type-erased container layer and the constraint layer both route
//! operations by fingerprint, never by compile-time type.
//!
//! ## Design
//! - [`Component`] is the registration boundary. Its `Copy` supertrait
//!   enforces the storage contract that component values carry no custom
//!   drop/copy behaviour and can be relocated freely (swap-remove and bulk
//!   moves assume this).
//! - Name resolution is an explicit two-step precedence chain: the type's
//!   [`Component::NAME`] override wins, otherwise the canonical compiler
//!   name from [`std::any::type_name`] is used.
//! - `fingerprint = SHA-1(name)` truncated to the most significant eight
//!   bytes of the digest. Taking the leading bytes preserves avalanche
//!   behaviour in the low bits used for hashtable bucketing.
//! - Identities are computed once per type and cached in a process-wide
//!   read-mostly table keyed by [`TypeId`].
//!
//! ## Invariants
//! - Identity resolution is a pure function of the type: two calls in the
//!   same process always return the same value.
//! - Two distinct component types must not share a fingerprint in practice;
//!   the design accepts the same collision risk as any hash-keyed type tag.
//! - `is_tag` selects a storage representation only; it never changes
//!   identity semantics.
//!
//! ## Concurrency
//! The identity cache is protected by `RwLock` for concurrent reads and
//! serialized writes. Writes happen only the first time a type is used as a
//! component; every later lookup takes the read path.

use std::{
    any::{type_name, TypeId},
    collections::HashMap,
    fmt,
    mem::size_of,
    sync::{OnceLock, RwLock},
};

use sha1::{Digest, Sha1};

use crate::engine::storage::{DenseStore, ErasedContainer, TagStore, WrappedContainer};
use crate::engine::types::{Fingerprint, FINGERPRINT_BYTES};

/// A value type storable in component containers.
///
/// ## Contract
/// Implementors must be plain data: the `Copy` bound rejects, at compile
/// time, any type with a destructor or custom copy/move semantics. Storage
/// relies on this to relocate values during swap-remove without observable
/// side effects.
///
/// ## Customization
/// Both associated items are precedence hooks with sensible defaults:
///
/// * [`NAME`](Component::NAME) — override to pin a stable explicit name
///   (recommended for components that cross tool or process boundaries,
///   where the compiler-derived name is too brittle).
/// * [`make_container`](Component::make_container) — override to supply a
///   custom storage container; the default selects the counting
///   representation for zero-sized types and a dense column otherwise.
///
/// ## Example
/// ```
/// use ecs_core::prelude::*;
///
/// #[derive(Clone, Copy)]
/// struct Position { x: f32, y: f32 }
///
/// impl Component for Position {
///     const NAME: Option<&'static str> = Some("position");
/// }
///
/// assert_eq!(ComponentIdentity::of::<Position>().name, "position");
/// ```
pub trait Component: Copy + Send + Sync + 'static {
    /// Explicit name override.
    ///
    /// When `None`, the canonical compiler-derived type name is used. The
    /// resolved name feeds the fingerprint, so changing it changes the
    /// component's identity.
    const NAME: Option<&'static str> = None;

    /// Constructs the storage container used for this component type.
    ///
    /// ## Selection precedence
    /// 1. A type overriding this method supplies its container verbatim.
    /// 2. An override may wrap a custom [`ComponentStore`] in
    ///    [`WrappedContainer`] to replace only the backing sequence.
    /// 3. The default body selects the counting representation
    ///    ([`TagStore`]) for zero-sized types.
    /// 4. Otherwise the default dense column ([`DenseStore`]) is used.
    ///
    /// Exactly one branch applies per type; the result is deterministic.
    ///
    /// [`ComponentStore`]: crate::engine::storage::ComponentStore
    fn make_container() -> Box<dyn ErasedContainer> {
        if size_of::<Self>() == 0 {
            Box::new(WrappedContainer::<Self, TagStore<Self>>::new())
        } else {
            Box::new(WrappedContainer::<Self, DenseStore<Self>>::new())
        }
    }
}

/// Resolves the stable name of component type `T`.
///
/// Precedence: the type's [`Component::NAME`] override, else the canonical
/// compiler-derived type name. Pure and total over component types.
pub fn resolve_name<T: Component>() -> &'static str {
    T::NAME.unwrap_or_else(type_name::<T>)
}

/// Computes the fingerprint for a component name.
///
/// The name is digested with SHA-1 and the result truncated to the most
/// significant [`FINGERPRINT_BYTES`] bytes, read big-endian. Pure: equal
/// names always produce equal fingerprints, in any process, on any platform.
pub fn resolve_fingerprint(name: &str) -> Fingerprint {
    let digest = Sha1::digest(name.as_bytes());
    let mut truncated = [0u8; FINGERPRINT_BYTES];
    truncated.copy_from_slice(&digest[..FINGERPRINT_BYTES]);
    Fingerprint::from_be_bytes(truncated)
}

/// Returns the cached fingerprint of component type `T`.
#[inline]
pub fn fingerprint_of<T: Component>() -> Fingerprint {
    ComponentIdentity::of::<T>().fingerprint
}

/// Runtime identity of a registered component type.
///
/// ## Fields
/// - `name` — The resolved stable name (explicit override or compiler name).
/// - `fingerprint` — Truncated digest of `name`; the routing key used by the
///   storage and constraint layers.
/// - `is_tag` — Whether the type is zero-sized and therefore stored in the
///   counting representation.
/// - `type_id` — The Rust [`TypeId`], kept for diagnostics and cache keying.
///
/// `ComponentIdentity` is `Copy` and safe to pass around freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentIdentity {
    /// Resolved stable name.
    pub name: &'static str,

    /// Truncated digest of `name`.
    pub fingerprint: Fingerprint,

    /// `true` iff the component type is zero-sized.
    pub is_tag: bool,

    /// Runtime `TypeId` of the component type.
    pub type_id: TypeId,
}

/// Process-wide identity cache.
///
/// ## Invariants
/// - An entry, once inserted, is never mutated or removed.
/// - `cache[TypeId::of::<T>()]` always equals the value `compute::<T>()`
///   would produce.
static IDENTITIES: OnceLock<RwLock<HashMap<TypeId, ComponentIdentity>>> = OnceLock::new();

fn identity_cache() -> &'static RwLock<HashMap<TypeId, ComponentIdentity>> {
    IDENTITIES.get_or_init(|| RwLock::new(HashMap::new()))
}

impl ComponentIdentity {
    fn compute<T: Component>() -> Self {
        let name = resolve_name::<T>();
        Self {
            name,
            fingerprint: resolve_fingerprint(name),
            is_tag: size_of::<T>() == 0,
            type_id: TypeId::of::<T>(),
        }
    }

    /// Returns the identity of component type `T`, computing and caching it
    /// on first use.
    ///
    /// ## Panics
    /// Panics if the identity cache lock is poisoned.
    pub fn of<T: Component>() -> Self {
        let cache = identity_cache();

        if let Some(identity) = cache.read().unwrap().get(&TypeId::of::<T>()) {
            return *identity;
        }

        let identity = Self::compute::<T>();
        cache
            .write()
            .unwrap()
            .entry(TypeId::of::<T>())
            .or_insert(identity);
        identity
    }

    /// Returns `true` if this identity refers to type `T`.
    #[inline]
    pub fn matches_type<T: Component>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComponentIdentity {{ name: {}, fingerprint: {:#018x}, is_tag: {} }}",
            self.name, self.fingerprint, self.is_tag
        )
    }
}
