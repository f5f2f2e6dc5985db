// Pure pieces: predicates, speed model, configuration, easing, labels, events.

use scroll_core::constants::*;
use scroll_core::*;
use serde_json::json;

fn info(scroll_height: f64, client_height: f64, overflow: &str) -> ElementInfo {
    ElementInfo {
        is_root: false,
        scroll_height,
        client_height,
        overflow_y: OverflowY::parse(overflow),
    }
}

#[test]
fn scrollable_needs_overflowing_content_and_scroll_style() {
    assert!(is_scrollable(&info(800.0, 200.0, "auto")));
    assert!(is_scrollable(&info(800.0, 200.0, "scroll")));
    assert!(!is_scrollable(&info(800.0, 200.0, "hidden")));
    assert!(!is_scrollable(&info(800.0, 200.0, "visible")));
    assert!(!is_scrollable(&info(200.0, 200.0, "auto")));
    assert!(!is_scrollable(&info(100.0, 200.0, "scroll")));

    let mut root = info(800.0, 200.0, "auto");
    root.is_root = true;
    assert!(!is_scrollable(&root));
}

#[test]
fn page_scrollable_when_taller_than_viewport() {
    assert!(is_page_scrollable(1000.0, 500.0));
    assert!(!is_page_scrollable(500.0, 500.0));
    assert!(!is_page_scrollable(300.0, 500.0));
}

#[test]
fn overflow_keywords_parse_leniently() {
    assert_eq!(OverflowY::parse("AUTO"), OverflowY::Auto);
    assert_eq!(OverflowY::parse(" scroll "), OverflowY::Scroll);
    assert_eq!(OverflowY::parse("clip"), OverflowY::Clip);
    assert_eq!(OverflowY::parse("overlay"), OverflowY::Visible);
    assert_eq!(OverflowY::parse(""), OverflowY::Visible);
}

#[test]
fn position_limits() {
    let p = Position::from_box(120.0, 1000.0, 500.0);
    assert_eq!(p.max, 500.0);
    assert_eq!(p.room(), 380.0);
    assert!(!p.at_end());
    assert!(Position::new(600.0, 500.0).at_end());
    assert_eq!(Position::new(600.0, 500.0).room(), 0.0);
}

#[test]
fn presets_keep_a_one_two_three_ratio() {
    let table = SpeedTable::default();
    assert!(table.slow < table.medium && table.medium < table.fast);
    assert!((table.medium / table.slow - 2.0).abs() < 1e-9);
    assert!((table.fast / table.slow - 3.0).abs() < 1e-9);
    assert_eq!(table.rate(SpeedPreset::Medium), MEDIUM_PX_PER_TICK);
}

#[test]
fn preset_names_round_trip() {
    for preset in SpeedPreset::ALL {
        assert_eq!(preset.name().parse::<SpeedPreset>(), Ok(preset));
        assert_eq!(preset.to_string(), preset.name());
    }
    assert_eq!(
        "turbo".parse::<SpeedPreset>(),
        Err(UnknownPreset("turbo".to_string()))
    );
}

#[test]
fn multiplier_mapping_stays_in_bounds() {
    let model = SpeedModel::default();
    assert_eq!(model.speed_for_multiplier(f64::NAN), None);
    let (speed, m) = model.speed_for_multiplier(9.0).unwrap();
    assert_eq!(m, MAX_SPEED_MULTIPLIER);
    assert!((speed - MEDIUM_PX_PER_TICK * MAX_SPEED_MULTIPLIER).abs() < 1e-12);
    assert_eq!(model.multiplier_for_speed(1000.0), MAX_SPEED_MULTIPLIER);
    assert_eq!(model.multiplier_for_speed(0.0), MIN_SPEED_MULTIPLIER);
    assert!((model.multiplier_for_speed(FAST_PX_PER_TICK) - 1.5).abs() < 1e-9);
}

#[test]
fn config_defaults_and_partial_json() {
    let config = EngineConfig::from_json("{}").unwrap();
    assert_eq!(config, EngineConfig::default());

    let config =
        EngineConfig::from_json(r#"{"defaultSpeed": "fast", "maxMultiplier": 2.0}"#).unwrap();
    assert_eq!(config.default_preset, SpeedPreset::Fast);
    assert_eq!(config.max_multiplier, 2.0);
    assert_eq!(config.min_multiplier, MIN_SPEED_MULTIPLIER);

    let config =
        EngineConfig::from_json(r#"{"presets": {"fast": 1.2}, "resetDurationMs": 0}"#).unwrap();
    assert_eq!(config.presets.fast, 1.2);
    assert_eq!(config.presets.slow, SLOW_PX_PER_TICK);
    assert_eq!(config.reset_duration_ms, 0.0);
}

#[test]
fn config_rejects_bad_values() {
    assert!(matches!(
        EngineConfig::from_json("{"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{"presets": {"slow": 0.5, "medium": 0.4}}"#),
        Err(ConfigError::Presets)
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{"minMultiplier": 2.0, "maxMultiplier": 1.0}"#),
        Err(ConfigError::MultiplierBounds { .. })
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{"minMultiplier": 0}"#),
        Err(ConfigError::MultiplierBounds { .. })
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{"resetDurationMs": -5}"#),
        Err(ConfigError::ResetDuration)
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{"defaultPreset": "warp"}"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn ease_out_cubic_endpoints_and_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(ease_out_cubic(-1.0), 0.0);
    assert_eq!(ease_out_cubic(2.0), 1.0);
    assert!(ease_out_cubic(0.5) > 0.5, "ease-out front-loads motion");
    let mut prev = 0.0;
    for i in 1..=20 {
        let v = ease_out_cubic(i as f64 / 20.0);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn rewind_anchors_on_first_sample() {
    let mut rewind = Rewind::new(400.0, 100.0);
    assert_eq!(rewind.sample(1_000.0), (400.0, false));
    let (mid, done) = rewind.sample(1_050.0);
    assert!(!done);
    assert!(mid > 0.0 && mid < 200.0);
    assert_eq!(rewind.sample(1_100.0), (0.0, true));

    let mut instant = Rewind::new(50.0, 0.0);
    assert_eq!(instant.sample(5.0), (0.0, true));
}

#[test]
fn candidate_labels_prefer_id_then_class_then_tag() {
    assert_eq!(candidate_label("DIV", "feed", "list big"), "#feed");
    assert_eq!(candidate_label("DIV", "", "list big"), ".list");
    assert_eq!(candidate_label("SECTION", "", ""), "section");
    assert_eq!(candidate_label("UL", "", "   "), "ul");
}

#[test]
fn candidates_serialize_for_the_picker() {
    let list = vec![
        Candidate::page(),
        Candidate::element(TargetId(3), "#feed".into()),
    ];
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        json!([
            {"target": null, "label": PAGE_LABEL, "type": "page"},
            {"target": 3, "label": "#feed", "type": "element"}
        ])
    );
}

#[test]
fn event_names_match_the_dom_event_suffixes() {
    for kind in EventKind::ALL {
        assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        assert_eq!(kind.name(), kind.name().to_ascii_lowercase());
    }
    assert_eq!(EventKind::from_name("exploded"), None);
}

#[test]
fn event_details_carry_payloads() {
    let ev = EngineEvent::SpeedChanged {
        speed: 0.6,
        preset: Some(SpeedPreset::Fast),
        multiplier: 1.5,
    };
    assert_eq!(
        ev.detail(),
        json!({"speed": 0.6, "preset": "fast", "multiplier": 1.5})
    );
    let ev = EngineEvent::TargetChanged {
        target: ScrollTarget::Element(TargetId(2)),
    };
    assert_eq!(ev.detail(), json!({"element": 2}));
    assert_eq!(EngineEvent::Ended.detail(), serde_json::Value::Null);
    assert_eq!(
        EngineEvent::Widget(WidgetSignal::Toggle).kind(),
        EventKind::ToggleWidget
    );
}

#[test]
fn svg_class_attribute_labels_like_any_other() {
    assert_eq!(candidate_label("svg", "", "icon chart"), ".icon");
    assert_eq!(candidate_label("svg", "", ""), "svg");
}

#[test]
fn registry_reuses_known_handles_and_never_recycles() {
    let mut reg: HandleRegistry<&str> = HandleRegistry::new();
    let a = reg.register(None, "a");
    let b = reg.register(None, "b");
    assert_ne!(a, b);

    // The host's reverse lookup finds `a` again without a scan.
    assert_eq!(reg.register(Some(a), "a"), a);
    assert_eq!(reg.len(), 2);

    assert_eq!(reg.retain(|el| *el != "a"), 1);
    assert_eq!(reg.get(a), None);

    // A handle that was pruned is not revived; the element gets a new one.
    let again = reg.register(Some(a), "a");
    assert_ne!(again, a);
    assert_ne!(again, b);
    assert_eq!(reg.get(again), Some(&"a"));
    assert_eq!(reg.len(), 2);
    assert!(!reg.is_empty());
}
