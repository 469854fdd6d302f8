//! Serialization tests for the shared vocabulary.

use crate::components::{BulletFactory, FadeFlags, Shape, SpriteKind};
use crate::events::SimEvent;
use crate::pattern::{BulletSource, Heartbeat, Ring};
use crate::timing::{Ease, LerpThing, Repeat};
use crate::types::EntityId;

#[test]
fn test_bullet_factory_json_shape() {
    let json = r#"{
        "sprite": "green",
        "speed": -150,
        "fade": 3,
        "lifetime": 8,
        "angular_momentum": 45
    }"#;
    let factory: BulletFactory = serde_json::from_str(json).unwrap();
    assert_eq!(factory.sprite, SpriteKind::Green);
    assert_eq!(factory.speed, -150.0);
    assert_eq!(factory.fade, FadeFlags::BOTH);
    assert_eq!(factory.extras.lifetime, Some(8.0));
    assert_eq!(factory.extras.angular_momentum, Some(45.0));
}

#[test]
fn test_bullet_factory_with_rotation_round_trip() {
    let factory = BulletFactory::new(SpriteKind::Yellow, 10.0).with_rotation(
        LerpThing::new(0.0, 360.0, 8.0)
            .with_ease(Ease::OutSine)
            .with_repeat(Repeat::Forever),
    );
    let json = serde_json::to_string(&factory).unwrap();
    let back: BulletFactory = serde_json::from_str(&json).unwrap();
    assert_eq!(back, factory);
}

#[test]
fn test_bullet_source_json() {
    let json = r##"{
        "bullets": 18,
        "ring": {"radius": 50, "count": 18, "aim": 90, "width": 180},
        "heartbeat": {"period": 1, "pattern": "#...#...#...#..."},
        "aim": 10
    }"##;
    let source: BulletSource = serde_json::from_str(json).unwrap();
    assert_eq!(source.bullets, 18);
    assert_eq!(source.ring.width(), 180.0);
    assert_eq!(source.heartbeat.len(), 16);
    assert_eq!(source.aim, 10.0);
    assert_eq!(source.rotation, 0.0);
}

#[test]
fn test_bullet_source_rejects_bad_heartbeat() {
    let json = r##"{
        "bullets": 4,
        "ring": {"radius": 50, "count": 4},
        "heartbeat": {"period": 1, "pattern": ""}
    }"##;
    assert!(serde_json::from_str::<BulletSource>(json).is_err());
}

#[test]
fn test_heartbeat_serializes_as_pattern_string() {
    let hb = Heartbeat::new(2.0, "#.#.").unwrap();
    let value = serde_json::to_value(&hb).unwrap();
    assert_eq!(value["pattern"], "#.#.");
    assert_eq!(value["period"], 2.0);
}

#[test]
fn test_ring_serializes_all_fields() {
    let ring = Ring::new(10.0, 2).unwrap();
    let value = serde_json::to_value(ring).unwrap();
    assert_eq!(value["width"], 360.0);
}

#[test]
fn test_shape_and_event_tags() {
    let shape = Shape::Circle {
        radius: 16.0,
        color: "red".into(),
    };
    let value = serde_json::to_value(&shape).unwrap();
    assert_eq!(value["kind"], "circle");

    let event = SimEvent::PatternSpawned {
        at: 3.0,
        entity: EntityId::new(5, 0),
        bullets: 4,
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "PatternSpawned");
    assert_eq!(value["entity"]["index"], 5);
}
