use gem_layout::{ConfigError, GemConfig};
use serde_json::json;

#[test]
fn out_of_range_values_keep_the_previous_setting() {
    let mut config = GemConfig::default();
    let err = config.set("insertion.gravity", 1.5).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { max, .. } if max == 1.0));
    assert_eq!(config.insertion.gravity, 0.05);

    assert!(config.set("edge_length", 0.0).is_err());
    assert_eq!(config.edge_length, 128.0);
}

#[test]
fn unknown_keys_are_rejected() {
    let mut config = GemConfig::default();
    for key in ["gravity", "insertion.speed", "cooling.shake", ""] {
        assert_eq!(
            config.set(key, 0.1),
            Err(ConfigError::UnknownKey {
                key: key.to_string()
            })
        );
    }
    assert_eq!(config, GemConfig::default());
}

#[test]
fn nested_and_dotted_json_overrides() {
    let mut config = GemConfig::default();
    let rejected = config.apply_json(&json!({
        "edge_length": 64,
        "arrangement": { "shake": 0.0, "max_iterations": 5 },
        "optimization.final_temperature": 0.2,
        "insertion": { "rotation": "fast", "gravity": 7 },
    }));

    assert_eq!(config.edge_length, 64.0);
    assert_eq!(config.arrangement.shake, 0.0);
    assert_eq!(config.arrangement.max_iterations, 5);
    assert!(config.optimization.is_enabled());
    assert_eq!(config.insertion.rotation, 0.5);
    assert_eq!(config.insertion.gravity, 0.05);

    assert_eq!(rejected.len(), 2);
    assert!(rejected.contains(&ConfigError::NotANumber {
        key: "insertion.rotation".to_string()
    }));
    assert!(
        rejected
            .iter()
            .any(|e| matches!(e, ConfigError::OutOfRange { key, .. } if key == "insertion.gravity"))
    );
}

#[test]
fn non_object_overrides_are_ignored() {
    let mut config = GemConfig::default();
    assert_eq!(config.apply_json(&json!([1, 2])), vec![ConfigError::NotAnObject]);
    assert_eq!(config, GemConfig::default());
}

#[test]
fn config_from_a_json_string() {
    let (config, rejected) = GemConfig::from_json_str(r#"{"seed": 17, "foo": 1}"#).unwrap();
    assert_eq!(config.random_seed, 17);
    assert_eq!(rejected.len(), 1);
    assert!(GemConfig::from_json_str("{not json").is_err());
}

#[test]
fn config_serializes_with_field_names() {
    let value = serde_json::to_value(GemConfig::default()).unwrap();
    assert_eq!(value["edge_length"], json!(128.0));
    assert_eq!(value["arrangement"]["max_iterations"], json!(3));
}

#[test]
fn phase_parameters_accept_their_bounds_and_nothing_beyond() {
    // (name, lowest, highest) shared by every phase.
    let shared = [
        ("start_temperature", 0.01, 10.0),
        ("max_temperature", 0.01, 10.0),
        ("max_iterations", 1.0, 100.0),
        ("gravity", 0.0, 1.0),
        ("oscillation", 0.0, 2.0),
        ("rotation", 0.0, 2.0),
        ("shake", 0.0, 5.0),
    ];
    for phase in ["insertion", "arrangement", "optimization"] {
        for (name, lo, hi) in shared {
            let key = format!("{phase}.{name}");
            let mut config = GemConfig::default();
            assert_eq!(config.set(&key, lo), Ok(()), "{key} = {lo}");
            assert_eq!(config.set(&key, hi), Ok(()), "{key} = {hi}");
            let below = if lo > 0.0 { lo - 0.005 } else { -0.1 };
            let above = if name == "max_iterations" { hi + 1.0 } else { hi + 0.1 };
            assert!(
                matches!(config.set(&key, below), Err(ConfigError::OutOfRange { .. })),
                "{key} = {below}"
            );
            assert!(
                matches!(config.set(&key, above), Err(ConfigError::OutOfRange { .. })),
                "{key} = {above}"
            );
        }
    }
}

#[test]
fn final_temperature_ranges_differ_per_phase() {
    let mut config = GemConfig::default();
    assert_eq!(config.set("insertion.final_temperature", 0.5), Ok(()));
    assert!(config.set("insertion.final_temperature", 5.0).is_err());
    assert!(config.set("insertion.final_temperature", 0.0).is_err());
    assert_eq!(config.insertion.final_temperature, 0.5);

    for key in ["arrangement.final_temperature", "optimization.final_temperature"] {
        assert_eq!(config.set(key, 0.01), Ok(()));
        assert_eq!(config.set(key, 10.0), Ok(()));
        assert!(config.set(key, 10.5).is_err());
        assert!(config.set(key, 0.0).is_err());
    }
}

#[test]
fn shake_range_is_wide_and_iteration_range_is_narrow() {
    let mut config = GemConfig::default();
    assert_eq!(config.set("insertion.shake", 2.0), Ok(()));
    assert_eq!(config.insertion.shake, 2.0);
    assert!(config.set("arrangement.max_iterations", 0.0).is_err());
    assert!(config.set("arrangement.max_iterations", 500.0).is_err());
    assert!(config.set("insertion.start_temperature", 0.0).is_err());
    assert_eq!(config.arrangement.max_iterations, 3);
    assert_eq!(config.insertion.start_temperature, 0.3);
}

#[test]
fn random_start_from_json() {
    let (config, rejected) = GemConfig::from_json_str(r#"{"random_start": true}"#).unwrap();
    assert!(config.random_start);
    assert!(rejected.is_empty());

    let mut config = GemConfig::default();
    assert!(config.set("random_start", 0.5).is_err());
    assert_eq!(config.set("random_start", 1.0), Ok(()));
    assert!(config.random_start);
}
