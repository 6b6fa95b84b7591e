//! Counting storage for zero-sized tag components.

use std::sync::atomic::{AtomicUsize, Ordering};

use ecs_core::prelude::*;

#[derive(Clone, Copy)]
struct Stunned;

impl Component for Stunned {
    const NAME: Option<&'static str> = Some("stunned");
}

#[derive(Clone, Copy)]
struct Burning;

impl Component for Burning {}

#[test]
fn zero_sized_components_get_the_counting_container() {
    let container = Stunned::make_container();
    assert!(container.identity().is_tag);
    assert!(container.typed::<Stunned>().is_none());
    assert!(container
        .as_any()
        .downcast_ref::<WrappedContainer<Stunned, TagStore<Stunned>>>()
        .is_some());
}

#[test]
fn pushes_count_instead_of_storing() {
    let mut container = Stunned::make_container();
    assert!(container.is_empty());

    for _ in 0..5 {
        container.push(Stunned).unwrap();
    }

    assert_eq!(container.len(), 5);
}

#[test]
fn construction_side_effects_happen_before_the_count_moves() {
    // Building the tag value is observable work even though the container
    // keeps only a count of it.
    static BUILT: AtomicUsize = AtomicUsize::new(0);

    fn acquire_burning() -> Burning {
        BUILT.fetch_add(1, Ordering::SeqCst);
        Burning
    }

    let mut container = Burning::make_container();
    container.push(acquire_burning()).unwrap();
    container.push(acquire_burning()).unwrap();

    assert_eq!(BUILT.load(Ordering::SeqCst), 2);
    assert_eq!(container.len(), 2);
}

#[test]
fn removal_decrements_the_count() {
    let mut container = Stunned::make_container();
    for _ in 0..3 {
        container.push(Stunned).unwrap();
    }

    container.swap_remove(1);
    assert_eq!(container.len(), 2);

    container.swap_remove(0);
    container.swap_remove(0);
    assert!(container.is_empty());
}

#[test]
fn every_position_yields_the_canonical_instance() {
    let mut container = Stunned::make_container();
    for _ in 0..3 {
        container.push(Stunned).unwrap();
    }

    for index in 0..3 {
        let handle = container.get(index);
        assert_eq!(handle.fingerprint(), fingerprint_of::<Stunned>());
        let _: &Stunned = handle.get::<Stunned>();
    }
}

#[test]
fn tag_store_iter_repeats_the_canonical_instance() {
    let mut store: TagStore<Stunned> = TagStore::empty();
    assert_eq!(store.iter().count(), 0);

    store.push(Stunned);
    store.push(Stunned);
    store.push(Stunned);
    assert_eq!(store.iter().count(), 3);

    store.swap_remove(2);
    assert_eq!(store.iter().count(), 2);
}

#[test]
fn erased_push_checks_the_tag_fingerprint_too() {
    let mut container = Stunned::make_container();

    let result = container.push(Burning);

    assert!(matches!(result, Err(StorageError::TypeMismatch(_))));
    assert!(container.is_empty());
}

#[test]
#[should_panic]
fn tag_access_past_the_count_panics() {
    let mut container = Stunned::make_container();
    container.push(Stunned).unwrap();
    let _ = container.get(1);
}

#[test]
#[should_panic]
fn tag_removal_past_the_count_panics() {
    let mut container = Stunned::make_container();
    container.swap_remove(0);
}
