//! Scenarios loaded from JSON and driven through the public engine API.

use barrage_core::events::SimEvent;
use barrage_sim::cron::Flow;
use barrage_sim::engine::{SimConfig, SimulationEngine};
use barrage_sim::scenario::{Scenario, ScenarioError};

const SMALL: &str = r##"{
    "entries": [
        {"at": 0.5, "action": {"type": "set_label", "text": "Eight way"}},
        {"at": 0.5, "action": {
            "type": "spawn_pattern",
            "position": [512, 384],
            "source": {
                "bullets": 8,
                "ring": {"radius": 20, "count": 8},
                "heartbeat": {"period": 0.5, "pattern": "#."}
            },
            "bullet": {"sprite": "cyan", "speed": 50, "fade": 1, "lifetime": 5},
            "lifetime": 1.4
        }},
        {"at": 2.0, "action": {"type": "show_stats"}},
        {"at": 2.5, "action": {"type": "stop"}}
    ]
}"##;

fn run_to_stop(engine: &mut SimulationEngine, dt: f64, max_frames: usize) -> (usize, Vec<SimEvent>) {
    let mut events = Vec::new();
    for frame in 0..max_frames {
        let flow = engine.tick(dt).unwrap();
        events.extend(engine.drain_events());
        if flow == Flow::Stop {
            return (frame + 1, events);
        }
    }
    panic!("scenario did not stop within {max_frames} frames");
}

#[test]
fn test_json_scenario_runs_to_stop() {
    let scenario = Scenario::from_json(SMALL).unwrap();
    assert_eq!(scenario.entries.len(), 4);
    assert_eq!(scenario.end_time(), 2.5);

    let mut engine = SimulationEngine::new(SimConfig::default(), scenario).unwrap();
    let (frames, events) = run_to_stop(&mut engine, 1.0 / 60.0, 1000);
    assert!((149..=151).contains(&frames), "{frames}");
    assert!(engine.is_finished());

    let labels: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::LabelChanged { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Eight way"]);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::PatternSpawned { bullets: 8, .. })));
    assert!(matches!(events.last(), Some(SimEvent::Stopped { .. })));

    // the pattern expired at 1.9 after three volleys
    assert_eq!(engine.snapshot().counts.patterns, 0);
    assert_eq!(engine.snapshot().counts.sprites, 24);

    let stats = engine.stats();
    assert_eq!(stats.most_sprites, 24);
    assert_eq!(stats.slowest_fps, 999);
    let world = engine.world();
    let texts: Vec<String> = engine
        .snapshot()
        .texts
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert!(texts.contains(&"Most: 24 Sprites at 60 FPS".to_string()), "{texts:?}");
    assert_eq!(engine.hud().title_text(world), Some("Eight way"));
}

#[test]
fn test_scenario_json_round_trip_through_engine() {
    let scenario = Scenario::from_json(SMALL).unwrap();
    let dumped = scenario.to_json().unwrap();
    let reloaded = Scenario::from_json(&dumped).unwrap();
    assert_eq!(reloaded, scenario);
}

#[test]
fn test_rejects_negative_time() {
    let json = r#"{"entries": [{"at": -1, "action": {"type": "stop"}}]}"#;
    assert!(matches!(
        Scenario::from_json(json),
        Err(ScenarioError::InvalidTime { index: 0, .. })
    ));
}

#[test]
fn test_rejects_malformed_pattern() {
    let json = r##"{"entries": [{"at": 1, "action": {
        "type": "spawn_pattern",
        "position": [0, 0],
        "source": {
            "bullets": 4,
            "ring": {"radius": 20, "count": 0},
            "heartbeat": {"period": 1, "pattern": "#"}
        },
        "bullet": {"sprite": "red", "speed": 50}
    }}]}"##;
    assert!(Scenario::from_json(json).is_err());
}

#[test]
fn test_full_demo_reaches_stop() {
    let config = SimConfig::default();
    let dt = config.max_dt();
    let mut engine = SimulationEngine::demo(config).unwrap();
    let (_, events) = run_to_stop(&mut engine, dt, 10_000);

    let stopped_at = events.iter().find_map(|e| match e {
        SimEvent::Stopped { at } => Some(*at),
        _ => None,
    });
    assert!(stopped_at.is_some_and(|t| (215.0..215.1).contains(&t)));
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::StatsShown { .. })));
    assert!(!events
        .iter()
        .any(|e| matches!(e, SimEvent::PatternRejected { .. })));
    assert!(engine.stats().slowest_sprites > 100);
}
