use tessera_compiler::{CharacterRegistry, TagOccurrenceCount};
use tessera_core::CharacterTag;

fn registry() -> CharacterRegistry {
    "[Amy]a young woman\n[Bob]an old man\n[Cleo]a curious girl"
        .parse()
        .unwrap()
}

#[test]
fn counts_repeated_occurrences() {
    let registry = registry();
    let counts = TagOccurrenceCount::scan("[Amy] waves while [Amy] smiles at [Bob]", &registry);

    assert_eq!(counts.count(&CharacterTag::new("Amy")), 2);
    assert_eq!(counts.count(&CharacterTag::new("Bob")), 1);
    assert_eq!(counts.count(&CharacterTag::new("Cleo")), 0);
    assert_eq!(counts.total(), 3);
    assert_eq!(counts.distinct_characters(), 2);
}

#[test]
fn entries_follow_registry_order_not_line_order() {
    let registry = registry();
    let counts = TagOccurrenceCount::scan("[Cleo] runs past [Amy]", &registry);
    let tags: Vec<&str> = counts.tags().map(|t| t.as_str()).collect();
    assert_eq!(tags, vec!["[Amy]", "[Cleo]"]);
}

#[test]
fn tagless_line_gets_no_character_sentinel() {
    let registry = registry();
    let counts = TagOccurrenceCount::scan("A quiet morning in the village.", &registry);

    assert!(counts.is_no_character());
    assert_eq!(counts.counts(), &[(CharacterTag::no_character(), 1)]);
    assert_eq!(counts.distinct_characters(), 0);
    assert_eq!(counts.total(), 1);
}

#[test]
fn unknown_bracket_text_is_not_counted() {
    let registry = registry();
    let counts = TagOccurrenceCount::scan("[Zoe] arrives unannounced", &registry);
    assert!(counts.is_no_character());
}

#[test]
fn character_tags_excludes_the_sentinel() {
    let registry = registry();
    let counts = TagOccurrenceCount::scan("wind in the trees", &registry);
    assert_eq!(counts.character_tags().count(), 0);
    assert_eq!(counts.tags().count(), 1);
}
