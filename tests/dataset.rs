use std::fs;

use dv_map::calculator::DeltaVCalculator;
use dv_map::config::{ConfigError, load_dataset};
use dv_map::registry::InvalidDataError;
use dv_map::{LoadError, load_registry};

const SAMPLE_YAML: &str = "\
home:
  name: kerbin
  costs: [0, 3400, 1115, 950]
bodies:
  - name: mun
    parent: kerbin
    costs: [860, 310, 580]
  - name: duna
    costs: [130, 250, 360, 1450]
  - name: ike
    parent: duna
    costs: [30, 180, 390]
";

const SAMPLE_TOML: &str = r#"
[home]
name = "kerbin"
costs = [0, 3400, 1115, 950]

[[bodies]]
name = "mun"
parent = "kerbin"
costs = [860, 310, 580]

[[bodies]]
name = "duna"
costs = [130, 250, 360, 1450]

[[bodies]]
name = "ike"
parent = "duna"
costs = [30, 180, 390]
"#;

#[test]
fn yaml_and_toml_datasets_agree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let yaml_path = dir.path().join("system.yaml");
    let toml_path = dir.path().join("system.toml");
    fs::write(&yaml_path, SAMPLE_YAML).unwrap();
    fs::write(&toml_path, SAMPLE_TOML).unwrap();

    let yaml = load_dataset(&yaml_path).expect("yaml dataset");
    let toml = load_dataset(&toml_path).expect("toml dataset");
    assert_eq!(yaml, toml);

    let registry = load_registry(Some(toml_path.as_path())).expect("registry");
    let calc = DeltaVCalculator::new(&registry);
    assert_eq!(calc.dv_to("ike"), Ok(5330.0));
}

#[test]
fn invalid_vectors_fail_at_load_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        SAMPLE_YAML.replace("[30, 180, 390]", "[30, 180, 390, 1, 2]"),
    )
    .unwrap();

    match load_registry(Some(path.as_path())) {
        Err(LoadError::InvalidData(InvalidDataError::BadLength { name, len })) => {
            assert_eq!(name, "ike");
            assert_eq!(len, 5);
        }
        other => panic!("expected BadLength, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_dataset(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
