// tests/growth_config.rs
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use symbios_meristem::{Error, Grammar, GrowthConfig, Preset, RuleSet, grow, interpret};

const MINIMAL: &str = r#"{
    "grammar": { "axiom": "X", "rules": { "X": "F[+X]-X", "F": "FF" } },
    "generations": 2,
    "branch_length": 5.0,
    "branch_width": 1.0,
    "turn_angle": 0.5,
    "initial_phase": 0.0,
    "initial_position": [0.0, 0.0],
    "canvas_size": 100,
    "stroke": "black",
    "output": "out.svg"
}"#;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("meristem-cfg-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn with_field(field: &str, value: serde_json::Value) -> String {
    let mut json: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
    json[field] = value;
    json.to_string()
}

#[test]
fn test_minimal_json_fills_defaults() {
    let config = GrowthConfig::from_json(MINIMAL).unwrap();
    assert_eq!(config.generations, 2);
    assert_eq!(config.grammar.axiom.as_str(), "X");
    assert_eq!(config.background, None);
    assert!(!config.fit_to_content);
    assert!(!config.snapshot_per_step);
    assert_eq!(config.max_symbols, 10_000_000);
}

#[test]
fn test_json_round_trip() {
    let config = GrowthConfig::from_preset(Preset::Dragon);
    let back = GrowthConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(back.grammar, config.grammar);
    assert_eq!(back.generations, config.generations);
    assert_eq!(back.output, config.output);
    assert_eq!(back.canvas_size, config.canvas_size);
    assert!((back.turn_angle - config.turn_angle).abs() < 1e-12);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("branch_length", serde_json::json!(0.0)),
        ("branch_length", serde_json::json!(-3.0)),
        ("branch_width", serde_json::json!(0.0)),
        ("canvas_size", serde_json::json!(0)),
    ];
    for (field, value) in cases {
        let err = GrowthConfig::from_json(&with_field(field, value.clone())).unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfiguration(_)),
            "{field} = {value}: {err}"
        );
    }
}

#[test]
fn test_malformed_json_is_rejected() {
    let negative = with_field("generations", serde_json::json!(-1));
    assert!(matches!(
        GrowthConfig::from_json(&negative).unwrap_err(),
        Error::Config(_)
    ));

    let empty_rule = with_field(
        "grammar",
        serde_json::json!({ "axiom": "X", "rules": { "X": "" } }),
    );
    assert!(matches!(
        GrowthConfig::from_json(&empty_rule).unwrap_err(),
        Error::Config(_)
    ));
}

#[test]
fn test_load_missing_file() {
    let path = scratch("missing").join("nope.json");
    let err = GrowthConfig::load(&path).unwrap_err();
    assert!(err.to_string().starts_with("i/o error on "), "{err}");
    assert!(matches!(err, Error::Io { path: p, .. } if p == path));
}

#[test]
fn test_load_from_disk() {
    let dir = scratch("load");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("plant.json");
    std::fs::write(&path, MINIMAL).unwrap();

    let config = GrowthConfig::load(&path).unwrap();
    assert_eq!(config.canvas_size, 100);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_presets_are_valid_and_balanced() {
    for preset in [Preset::Plant, Preset::Koch, Preset::Sierpinski, Preset::Dragon] {
        let config = GrowthConfig::from_preset(preset);
        config.validate().unwrap();
        let symbols = config.grammar.expand(config.generations);
        let commands = interpret(&symbols, &config.turtle_params()).unwrap();
        assert!(!commands.is_empty(), "{preset:?}");
    }
}

#[test]
fn test_default_is_the_plant() {
    let config = GrowthConfig::default();
    assert_eq!(config.grammar, Preset::Plant.grammar());
    assert_eq!(config.generations, 4);
    assert_eq!(config.canvas_size, 500);
}

#[test]
fn test_grow_writes_a_drawing() {
    let dir = scratch("grow");
    let config = GrowthConfig {
        generations: 2,
        output: dir.join("plant.svg"),
        ..GrowthConfig::from_preset(Preset::Plant)
    };

    let report = grow(&config).unwrap();
    let symbols = config.grammar.expand(2);
    assert_eq!(report.symbols, symbols.len());
    assert_eq!(report.segments, symbols.symbols().filter(|&c| c == 'F').count());
    assert_eq!(report.files_written, 1);
    assert!(config.output.is_file());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_grow_with_snapshots() {
    let dir = scratch("grow-frames");
    let config = GrowthConfig {
        generations: 1,
        snapshot_per_step: true,
        output: dir.clone(),
        ..GrowthConfig::from_preset(Preset::Plant)
    };

    let report = grow(&config).unwrap();
    assert_eq!(report.segments, 3);
    assert_eq!(report.files_written, 4);
    assert!(dir.join("final.svg").is_file());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_grow_refuses_oversized_expansion() {
    let config = GrowthConfig {
        max_symbols: 100,
        ..GrowthConfig::from_preset(Preset::Plant)
    };
    match grow(&config).unwrap_err() {
        Error::ExpansionTooLarge { predicted, limit } => {
            assert_eq!(limit, 100);
            assert!(predicted.unwrap() > 100);
        }
        other => panic!("expected ExpansionTooLarge, got {other:?}"),
    }
}

#[test]
fn test_grow_accepts_small_expansion_with_unreachable_growth() {
    let dir = scratch("unreachable");
    let rules = RuleSet::from_rules([('F', "F+"), ('Z', "ZZ")]).unwrap();
    let config = GrowthConfig {
        grammar: Grammar::new("F", rules),
        generations: 70,
        output: dir.join("line.svg"),
        ..GrowthConfig::from_preset(Preset::Plant)
    };

    let report = grow(&config).unwrap();
    assert_eq!(report.symbols, 71);
    assert_eq!(report.segments, 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_preset_names_match_between_cli_and_json() {
    use clap::ValueEnum;

    for preset in Preset::value_variants() {
        let name = preset.to_possible_value().unwrap().get_name().to_owned();
        assert_eq!(Preset::from_str(&name, false).unwrap(), *preset);
        let json: Preset = serde_json::from_str(&format!("\"{name}\"")).unwrap();
        assert_eq!(json, *preset);
    }
}
