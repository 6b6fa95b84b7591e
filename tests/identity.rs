//! Component identity resolution: names, fingerprints, tag classification.

use ecs_core::prelude::*;

#[derive(Clone, Copy)]
struct Position {
    _x: f32,
    _y: f32,
}

impl Component for Position {
    const NAME: Option<&'static str> = Some("position");
}

#[derive(Clone, Copy)]
struct Velocity {
    _dx: f32,
    _dy: f32,
}

impl Component for Velocity {}

#[derive(Clone, Copy)]
struct Frozen;

impl Component for Frozen {}

#[test]
fn fingerprint_matches_sha1_reference_vectors() {
    // Leading eight bytes of the full SHA-1 digests, big-endian.
    assert_eq!(resolve_fingerprint("abc"), 0xa9993e364706816a);
    assert_eq!(resolve_fingerprint(""), 0xda39a3ee5e6b4b0d);
}

#[test]
fn fingerprint_is_stable_across_calls() {
    assert_eq!(fingerprint_of::<Position>(), fingerprint_of::<Position>());
    assert_eq!(
        ComponentIdentity::of::<Velocity>(),
        ComponentIdentity::of::<Velocity>()
    );
}

#[test]
fn explicit_name_override_wins() {
    assert_eq!(resolve_name::<Position>(), "position");
    assert_eq!(
        fingerprint_of::<Position>(),
        resolve_fingerprint("position")
    );
}

#[test]
fn compiler_name_used_when_no_override() {
    let name = resolve_name::<Velocity>();
    assert_eq!(name, std::any::type_name::<Velocity>());
    assert!(name.contains("Velocity"));
    assert_eq!(fingerprint_of::<Velocity>(), resolve_fingerprint(name));
}

#[test]
fn distinct_types_get_distinct_fingerprints() {
    let position = fingerprint_of::<Position>();
    let velocity = fingerprint_of::<Velocity>();
    let frozen = fingerprint_of::<Frozen>();
    assert_ne!(position, velocity);
    assert_ne!(position, frozen);
    assert_ne!(velocity, frozen);
}

#[test]
fn zero_sized_types_classify_as_tags() {
    assert!(ComponentIdentity::of::<Frozen>().is_tag);
    assert!(!ComponentIdentity::of::<Position>().is_tag);
    assert!(!ComponentIdentity::of::<Velocity>().is_tag);
}

#[test]
fn identity_tracks_the_concrete_type() {
    let identity = ComponentIdentity::of::<Position>();
    assert!(identity.matches_type::<Position>());
    assert!(!identity.matches_type::<Velocity>());
}

#[test]
fn renaming_changes_identity() {
    // Same layout, different declared name: identities must diverge.
    #[derive(Clone, Copy)]
    struct PositionV2 {
        _x: f32,
        _y: f32,
    }
    impl Component for PositionV2 {
        const NAME: Option<&'static str> = Some("position_v2");
    }

    assert_ne!(fingerprint_of::<Position>(), fingerprint_of::<PositionV2>());
}
