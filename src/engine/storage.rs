//! Typed component columns and type-erased access to them.
//!
//! This module implements the storage half of the crate: homogeneous
//! containers holding a dense, order-irrelevant sequence of one component
//! type, manipulated through a single non-generic interface.
//!
//! # What this module provides
//!
//! - **`ComponentStore<T>`**: the backing-sequence abstraction a component's
//!   values live in. Two implementations ship with the crate:
//!   [`DenseStore<T>`] (a growable dense column, the default) and
//!   [`TagStore<T>`] (a counting representation for zero-sized types).
//! - **`WrappedContainer<T, S>`**: binds a concrete store to a
//!   [`ComponentIdentity`] and implements the erased interface over it.
//! - **`ErasedContainer`**: the dynamically-typed interface a storage
//!   registry keeps one-per-component-type, with identity-checked element
//!   access and opaque appends.
//! - **`ElementHandle`**: a transient, fingerprint-tagged reference to one
//!   element inside a container.
//!
//! # Storage model
//!
//! Values are stored densely with no gaps. Appending is amortized O(1);
//! removal is O(1) **swap-remove**: the removed slot is filled by the last
//! element, trading stable ordering for constant-time deletion. Any index
//! held across a `swap_remove` must be re-validated by the caller.
//!
//! # Contract violations vs. recoverable errors
//!
//! Indexed access and removal treat `index < len()` as a hard precondition:
//! violating it panics rather than returning an error, mirroring a hot-path
//! bounds contract rather than user-input validation. The checked entry
//! points (`push_erased`, `ElementHandle::try_get`) return structured errors
//! and are meant for API boundaries where the caller's type assertion comes
//! from outside the crate.
//!
//! # Concurrency
//!
//! Containers take no locks. A container must not be mutated from two
//! threads at once, nor mutated while an [`ElementHandle`] from it is live;
//! the constraint layer (see `engine::constraint`) gives schedulers the
//! predicate they need to uphold this, and `ElementHandle`'s borrow ties the
//! handle's lifetime to the container so the single-threaded half of the rule
//! is enforced by the compiler.

use std::{any::Any, marker::PhantomData, ptr::NonNull};

use crate::engine::component::{fingerprint_of, Component, ComponentIdentity};
use crate::engine::error::{StorageError, TypeMismatchError};
use crate::engine::types::Fingerprint;

/// Backing sequence for one component type.
///
/// A store owns the values of exactly one component type. Implementations
/// must keep values dense: every index in `0..len()` refers to a live value.
///
/// ## Contract
/// `get_mut` and `swap_remove` may assume `index < len()`; implementations
/// must fail loud (panic) when the contract is violated rather than return
/// garbage.
pub trait ComponentStore<T>: Send + Sync + 'static {
    /// Creates an empty store.
    fn empty() -> Self
    where
        Self: Sized;

    /// Returns the number of values held.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no values.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a value.
    fn push(&mut self, value: T);

    /// Returns a mutable reference to the value at `index`.
    ///
    /// ## Panics
    /// Panics if `index >= len()`.
    fn get_mut(&mut self, index: usize) -> &mut T;

    /// Removes the value at `index` in O(1) by swapping in the last value.
    ///
    /// ## Panics
    /// Panics if `index >= len()`.
    fn swap_remove(&mut self, index: usize);
}

/// Default dense column: a growable sequence with O(1) append and
/// O(1) swap-remove.
///
/// ## Ordering
/// `swap_remove(i)` moves the last element into slot `i`; all other elements
/// keep their positions. Element order carries no meaning.
pub struct DenseStore<T> {
    values: Vec<T>,
}

impl<T> DenseStore<T> {
    /// Returns the stored values as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns the stored values as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterates over the stored values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Component> ComponentStore<T> for DenseStore<T> {
    fn empty() -> Self {
        Self { values: Vec::new() }
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn push(&mut self, value: T) {
        self.values.push(value);
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }

    #[inline]
    fn swap_remove(&mut self, index: usize) {
        self.values.swap_remove(index);
    }
}

/// Counting representation for zero-sized (tag) components.
///
/// Physically storing N empty instances is wasted work, so this store keeps
/// only a count plus one canonical instance captured from the first append
/// (zero-sized `Copy` values are all identical, so every index is
/// interchangeable).
///
/// ## Invariants
/// - `count > 0` implies `canonical` is populated.
/// - A value that fails to construct never reaches `push`, so the count
///   only ever reflects fully constructed values.
pub struct TagStore<T> {
    count: usize,
    canonical: Option<T>,
}

impl<T> TagStore<T> {
    /// Iterates over the logical positions held.
    ///
    /// Yields the canonical instance once per position; order carries no
    /// meaning.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.canonical.iter().flat_map(move |c| {
            std::iter::repeat(c).take(self.count)
        })
    }
}

impl<T: Component> ComponentStore<T> for TagStore<T> {
    fn empty() -> Self {
        Self {
            count: 0,
            canonical: None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.count
    }

    /// Counts the append.
    ///
    /// The caller constructs `value` before this call, so any observable
    /// side effects of construction have already occurred; a construction
    /// that panics never increments the count.
    #[inline]
    fn push(&mut self, value: T) {
        self.canonical.get_or_insert(value);
        self.count += 1;
    }

    fn get_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.count,
            "tag index {} out of bounds (count {})",
            index,
            self.count
        );
        // count > 0 here, so the canonical instance exists.
        self.canonical.as_mut().expect("canonical tag instance missing")
    }

    fn swap_remove(&mut self, index: usize) {
        assert!(
            index < self.count,
            "tag index {} out of bounds (count {})",
            index,
            self.count
        );
        // All positions are indistinguishable; no swap needed.
        self.count -= 1;
    }
}

/// A transient, non-owning reference to one element inside an erased
/// container, tagged with the fingerprint of the element's true type.
///
/// ## Lifetime
/// The handle borrows the container exclusively for `'a`, so it cannot
/// outlive a mutation that could relocate or invalidate the element — the
/// borrow checker rejects such code.
///
/// ## Type safety
/// The fingerprint is the only runtime guard against mistyped access.
/// `try_get`/`try_get_mut` report a mismatch as an error; `get`/`get_mut`
/// treat it as a contract violation and panic. A fingerprint match is taken
/// as proof of type identity (the accepted collision risk of any hash-keyed
/// type tag).
pub struct ElementHandle<'a> {
    ptr: NonNull<()>,
    fingerprint: Fingerprint,
    _borrow: PhantomData<&'a mut ()>,
}

impl<'a> ElementHandle<'a> {
    /// Creates a handle to `value`, tagged with `T`'s fingerprint.
    pub fn new<T: Component>(value: &'a mut T) -> Self {
        Self {
            ptr: NonNull::from(value).cast(),
            fingerprint: fingerprint_of::<T>(),
            _borrow: PhantomData,
        }
    }

    /// Returns the fingerprint of the element's true type.
    #[inline]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    fn check<T: Component>(&self) -> Result<(), TypeMismatchError> {
        let requested = fingerprint_of::<T>();
        if requested == self.fingerprint {
            Ok(())
        } else {
            Err(TypeMismatchError {
                expected: self.fingerprint,
                actual: requested,
            })
        }
    }

    /// Unwraps the handle as a shared `&T`, reporting a mismatch.
    pub fn try_get<T: Component>(&self) -> Result<&T, TypeMismatchError> {
        self.check::<T>()?;
        // Fingerprint match established the element is a T; the handle's
        // borrow keeps the pointer valid.
        Ok(unsafe { self.ptr.cast::<T>().as_ref() })
    }

    /// Unwraps the handle as an exclusive `&mut T`, reporting a mismatch.
    pub fn try_get_mut<T: Component>(&mut self) -> Result<&mut T, TypeMismatchError> {
        self.check::<T>()?;
        Ok(unsafe { self.ptr.cast::<T>().as_mut() })
    }

    /// Unwraps the handle as a shared `&T`.
    ///
    /// ## Panics
    /// Panics if `T`'s fingerprint does not match the element's. Reserved
    /// for call sites where the type is already proven; use
    /// [`try_get`](Self::try_get) at API boundaries.
    pub fn get<T: Component>(&self) -> &T {
        match self.try_get::<T>() {
            Ok(value) => value,
            Err(e) => panic!("mistyped element access: {e}"),
        }
    }

    /// Unwraps the handle as an exclusive `&mut T`.
    ///
    /// ## Panics
    /// Panics if `T`'s fingerprint does not match the element's.
    pub fn get_mut<T: Component>(&mut self) -> &mut T {
        match self.try_get_mut::<T>() {
            Ok(value) => value,
            Err(e) => panic!("mistyped element access: {e}"),
        }
    }
}

/// Type-erased interface over a concrete component container.
///
/// A storage registry keeps one `Box<dyn ErasedContainer>` per component
/// type currently in use and routes operations to the right one by
/// fingerprint. The concrete element type is fixed at construction and
/// hidden behind this trait.
///
/// ## Invariants
/// - `len()` equals the number of live elements.
/// - Every index in `0..len()` refers to a live element.
/// - `identity()` never changes over the container's lifetime.
///
/// ## Downcasting
/// Implementers return `self` from `as_any` / `as_any_mut` so callers can
/// recover the concrete container when they do know the type; see
/// [`typed`](trait.ErasedContainer.html#method.typed).
pub trait ErasedContainer: Any + Send + Sync {
    /// Returns the current element count.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a fingerprint-tagged handle to the element at `index`.
    ///
    /// ## Panics
    /// `index < len()` is a hard precondition; violating it panics.
    fn get(&mut self, index: usize) -> ElementHandle<'_>;

    /// Appends an opaque value after checking the caller's asserted
    /// fingerprint against the container's own.
    ///
    /// ## Errors
    /// [`StorageError::TypeMismatch`] when `fingerprint` differs from
    /// `identity().fingerprint`. A fingerprint match followed by a failed
    /// dynamic downcast is reported as
    /// [`StorageError::InternalInvariant`]; it indicates the caller forged
    /// the fingerprint.
    fn push_erased(
        &mut self,
        fingerprint: Fingerprint,
        value: Box<dyn Any>,
    ) -> Result<(), StorageError>;

    /// Removes the element at `index` in O(1) by swapping in the last
    /// element.
    ///
    /// All elements except the removed one and the previously-last one keep
    /// their positions; indices held across this call must be re-validated.
    ///
    /// ## Panics
    /// `index < len()` is a hard precondition; violating it panics.
    fn swap_remove(&mut self, index: usize);

    /// Produces a new, empty container of the same concrete type.
    ///
    /// Used to clone storage shape when splitting or merging component
    /// registries, without static knowledge of the element type.
    fn replicate_empty(&self) -> Box<dyn ErasedContainer>;

    /// Returns the identity this container was built for.
    fn identity(&self) -> ComponentIdentity;

    /// Returns an immutable type-erased reference for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable type-erased reference for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn ErasedContainer {
    /// Returns `true` if this container stores component type `T`.
    #[inline]
    pub fn has_component<T: Component>(&self) -> bool {
        self.identity().fingerprint == fingerprint_of::<T>()
    }

    /// Appends a typed value through the erased interface.
    ///
    /// Convenience over [`push_erased`](ErasedContainer::push_erased) that
    /// asserts `T`'s own fingerprint.
    pub fn push<T: Component>(&mut self, value: T) -> Result<(), StorageError> {
        self.push_erased(fingerprint_of::<T>(), Box::new(value))
    }

    /// Recovers the concrete default-store container for `T`, if that is
    /// what this container is.
    pub fn typed<T: Component>(&self) -> Option<&WrappedContainer<T>> {
        self.as_any().downcast_ref()
    }

    /// Mutable variant of [`typed`](Self::typed).
    pub fn typed_mut<T: Component>(&mut self) -> Option<&mut WrappedContainer<T>> {
        self.as_any_mut().downcast_mut()
    }
}

/// Binds a concrete [`ComponentStore`] to a [`ComponentIdentity`] and
/// implements the erased interface over it.
///
/// The store parameter defaults to [`DenseStore`]; the typed-container
/// policy in [`Component::make_container`] substitutes [`TagStore`] for
/// zero-sized types, and component types may substitute their own store.
pub struct WrappedContainer<T: Component, S: ComponentStore<T> = DenseStore<T>> {
    identity: ComponentIdentity,
    store: S,
    _element: PhantomData<fn() -> T>,
}

impl<T: Component, S: ComponentStore<T>> WrappedContainer<T, S> {
    /// Creates an empty container for `T` with a fresh store.
    pub fn new() -> Self {
        Self {
            identity: ComponentIdentity::of::<T>(),
            store: S::empty(),
            _element: PhantomData,
        }
    }

    /// Creates a container around an existing store.
    pub fn with_store(store: S) -> Self {
        Self {
            identity: ComponentIdentity::of::<T>(),
            store,
            _element: PhantomData,
        }
    }

    /// Returns the backing store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the backing store mutably.
    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Appends a value through the typed interface.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.store.push(value);
    }
}

impl<T: Component, S: ComponentStore<T>> Default for WrappedContainer<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component, S: ComponentStore<T>> ErasedContainer for WrappedContainer<T, S> {
    fn len(&self) -> usize {
        self.store.len()
    }

    fn get(&mut self, index: usize) -> ElementHandle<'_> {
        ElementHandle::new(self.store.get_mut(index))
    }

    fn push_erased(
        &mut self,
        fingerprint: Fingerprint,
        value: Box<dyn Any>,
    ) -> Result<(), StorageError> {
        if fingerprint != self.identity.fingerprint {
            return Err(TypeMismatchError {
                expected: self.identity.fingerprint,
                actual: fingerprint,
            }
            .into());
        }

        let value = value.downcast::<T>().map_err(|_| {
            StorageError::InternalInvariant("asserted fingerprint matched but dynamic type did not")
        })?;

        self.store.push(*value);
        Ok(())
    }

    fn swap_remove(&mut self, index: usize) {
        self.store.swap_remove(index);
    }

    fn replicate_empty(&self) -> Box<dyn ErasedContainer> {
        Box::new(Self::new())
    }

    fn identity(&self) -> ComponentIdentity {
        self.identity
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
