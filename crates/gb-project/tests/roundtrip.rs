//! Serialization round-trip tests for project files.

use gb_project::{BlendProject, parse_project, resolve_project, validate_project};

fn full_yaml() -> &'static str {
    r#"
version: 1
settings:
  unit: psi
  cost:
    price_per_cuft_o2: 0.45
    price_per_cuft_he: 2.25
    tank_volume_cuft: 80
    tank_rated_pressure: 3000
  banks:
    - { id: tmx-2135, name: Trimix 21/35, o2: 21, he: 35 }
    - { id: ean50, o2: 50 }
  max_alternatives: 3
request:
  start: { pressure: 500, o2: 21, he: 35 }
  target: { pressure: 3000, o2: 21, he: 10 }
  top_off: { type: air }
  sources:
    - { type: air }
    - { type: oxygen }
    - { type: helium }
    - { type: bank, id: tmx-2135 }
"#
}

#[test]
fn parse_serialize_parse_is_identity() {
    let project = parse_project(full_yaml()).unwrap();
    let serialized = serde_yaml::to_string(&project).unwrap();
    let reparsed: BlendProject = serde_yaml::from_str(&serialized).unwrap();
    assert_eq!(project, reparsed);
}

#[test]
fn full_project_validates_and_resolves() {
    let project = parse_project(full_yaml()).unwrap();
    validate_project(&project).unwrap();

    let resolved = resolve_project(&project).unwrap();
    assert_eq!(resolved.max_alternatives, 3);
    assert_eq!(resolved.sources.len(), 4);
    assert_eq!(resolved.top_off.as_ref().unwrap().name, "Air");
    assert_eq!(resolved.start.pressure, 500.0);
    // Bank without an explicit name falls back to its id elsewhere; this
    // one has a display name.
    assert_eq!(resolved.sources[3].name, "Trimix 21/35");
    assert_eq!(resolved.cost.price_per_cuft_he, 2.25);
}

#[test]
fn garbage_yaml_is_a_parse_error() {
    assert!(parse_project("version: [not, a, number]").is_err());
}
