use tessera_compiler::{CharacterRegistry, IdentityBudget};
use tessera_core::{CharacterTag, IdentityConfig};
use tessera_error::CompilerErrorKind;

fn registry() -> CharacterRegistry {
    "[Amy]a young woman\n[Bob]an old man".parse().unwrap()
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn solo_counts_clamp_to_the_identity_cap() {
    let registry = registry();
    let config = IdentityConfig::default();
    let script = lines(&[
        "[Amy] tends the garden",
        "[Amy] hums a tune",
        "[Amy] waters the roses",
        "[Bob] reads by the fire",
        "[Bob] dozes off",
        "[Bob] wakes with a start",
        "[Amy] and [Bob] meet at dawn",
    ]);

    let budget = IdentityBudget::resolve(&script, &registry, &config).unwrap();
    assert_eq!(budget.id_length(), 2);
}

#[test]
fn a_character_with_no_solo_line_zeroes_the_budget() {
    let registry = registry();
    let config = IdentityConfig::default();
    let script = lines(&[
        "[Amy] tends the garden",
        "[Amy] and [Bob] meet at dawn",
    ]);

    let budget = IdentityBudget::resolve(&script, &registry, &config).unwrap();
    assert_eq!(budget.id_length(), 0);
}

#[test]
fn script_without_characters_keeps_the_cap() {
    let registry = registry();
    let config = IdentityConfig::default();
    let script = lines(&["A quiet morning.", "Wind in the trees."]);

    let budget = IdentityBudget::resolve(&script, &registry, &config).unwrap();
    assert_eq!(budget.id_length(), 2);
    assert!(budget.anchors().is_empty());
}

#[test]
fn undefined_tag_is_fatal_with_line_position() {
    let registry = registry();
    let config = IdentityConfig::default();
    let script = lines(&["[Amy] tends the garden", "[Zoe] arrives unannounced"]);

    let err = IdentityBudget::resolve(&script, &registry, &config).unwrap_err();
    match err.kind {
        CompilerErrorKind::MissingDescription { tag, line_index } => {
            assert_eq!(tag, "[Zoe]");
            assert_eq!(line_index, 1);
        }
        other => panic!("expected MissingDescription, got {other}"),
    }
}

#[test]
fn no_character_marker_is_exempt_from_validation() {
    let registry = registry();
    let config = IdentityConfig::default();
    let script = lines(&["[NC]A quiet morning.", "[Amy] tends the garden"]);

    let budget = IdentityBudget::resolve(&script, &registry, &config).unwrap();
    assert_eq!(budget.id_length(), 1);
}

#[test]
fn anchor_indices_take_the_earliest_solo_lines() {
    let registry = registry();
    let config = IdentityConfig::default();
    let script = lines(&[
        "[Bob] reads by the fire",
        "[Amy] tends the garden",
        "[Amy] hums a tune",
        "[Bob] dozes off",
    ]);

    let budget = IdentityBudget::resolve(&script, &registry, &config).unwrap();
    assert_eq!(budget.id_length(), 2);
    assert_eq!(
        budget.anchor_indices(&CharacterTag::new("Amy")),
        Some(&[1, 2][..])
    );
    assert_eq!(
        budget.anchor_indices(&CharacterTag::new("Bob")),
        Some(&[0, 3][..])
    );
    assert_eq!(budget.anchor_indices(&CharacterTag::new("Cleo")), None);
}

#[test]
fn custom_cap_bounds_the_budget() {
    let registry = registry();
    let config = IdentityConfig::builder().max_simultaneous_identities(1).build();
    let script = lines(&[
        "[Amy] tends the garden",
        "[Amy] hums a tune",
        "[Bob] reads by the fire",
        "[Bob] dozes off",
    ]);

    let budget = IdentityBudget::resolve(&script, &registry, &config).unwrap();
    assert_eq!(budget.id_length(), 1);
}
