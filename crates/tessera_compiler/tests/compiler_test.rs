use tessera_compiler::ScriptCompiler;
use tessera_core::{CharacterTag, IdentityConfig, ImageMap, ImageSource};
use tessera_error::{TesseraError, TesseraErrorKind};

const GENERAL_PROMPT: &str = "[Amy]a young woman\n[Bob]an old man\n[Cleo]a curious girl";

fn compiler() -> ScriptCompiler {
    ScriptCompiler::from_general_prompt(GENERAL_PROMPT, IdentityConfig::default()).unwrap()
}

fn images_for(names: &[&str]) -> ImageMap {
    let mut images = ImageMap::new();
    for name in names {
        images.insert(
            CharacterTag::new(*name),
            ImageSource::Base64(format!("{name}-portrait")),
        );
    }
    images
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn joint_line_keeps_both_tags_and_zeroes_id_length() {
    let compiler = compiler();
    let images = images_for(&["Amy", "Bob"]);
    let script = lines(&["[Amy] and [Bob] meet at dawn"]);

    let requests = compiler.compile(&script, &images).unwrap();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(*request.id_length(), 0);
    assert_eq!(
        request.prompt_array(),
        &vec!["[Amy] and [Bob] meet at dawn#[Amy] and [Bob] meet at dawn".to_string()]
    );
    assert_eq!(
        request.general_prompt(),
        "[Amy] a young woman img\n[Bob] an old man img"
    );
    assert_eq!(request.ref_images().len(), 2);
}

#[test]
fn tagless_line_is_a_no_character_request() {
    let compiler = compiler();
    let script = lines(&["A quiet morning in the village."]);

    let requests = compiler.compile(&script, &ImageMap::default()).unwrap();
    let request = &requests[0];

    assert_eq!(request.general_prompt(), "[NC]");
    assert!(request.ref_images().is_empty());
    let first = &request.prompt_array()[0];
    assert!(first.starts_with("[NC]A quiet morning"));
    assert!(first.contains("#A quiet morning in the village."));
}

#[test]
fn three_character_line_is_capped_at_two_identities() {
    let compiler = compiler();
    let images = images_for(&["Amy", "Bob", "Cleo"]);
    let script = lines(&["[Amy] greets [Bob] while [Cleo] watches"]);

    let requests = compiler.compile(&script, &images).unwrap();
    let request = &requests[0];

    assert_eq!(request.ref_images().len(), 2);
    let prompt = &request.prompt_array()[0];
    let body = prompt.split('#').next().unwrap();
    assert!(body.contains("[Amy]"));
    assert!(body.contains("[Bob]"));
    assert!(!body.contains("[Cleo]"));
    assert!(body.contains("a curious girl"));

    // Figure lines are also capped, in definition order.
    assert_eq!(
        request.general_prompt(),
        "[Amy] a young woman img\n[Bob] an old man img"
    );
}

#[test]
fn identity_scope_matches_figures_and_reference_images() {
    let compiler = compiler();
    let images = images_for(&["Amy", "Bob", "Cleo"]);
    let script = lines(&["[Amy] greets [Cleo] while [Bob] watches"]);

    let requests = compiler.compile(&script, &images).unwrap();
    let request = &requests[0];

    // The kept tags, the figure lines, and the reference images all cover
    // the same two characters in definition order, regardless of where
    // each tag appears in the line.
    let body = request.prompt_array()[0].split('#').next().unwrap();
    assert!(body.contains("[Amy]"));
    assert!(body.contains("[Bob]"));
    assert!(!body.contains("[Cleo]"));
    assert!(body.contains("a curious girl"));

    assert_eq!(
        request.general_prompt(),
        "[Amy] a young woman img\n[Bob] an old man img"
    );
    let anchored: Vec<&str> = request
        .ref_images()
        .iter()
        .map(|image| image.tag().as_str())
        .collect();
    assert_eq!(anchored, vec!["[Amy]", "[Bob]"]);
}

#[test]
fn duplicate_definition_aborts_before_compiling() {
    let result = ScriptCompiler::from_general_prompt(
        "[Amy]a young woman\n[Amy]an impostor",
        IdentityConfig::default(),
    );
    let err: TesseraError = result.unwrap_err();
    assert!(matches!(err.kind(), TesseraErrorKind::Compiler(_)));
    assert!(format!("{err}").contains("[Amy]"));
}

#[test]
fn undefined_tag_aborts_with_no_partial_output() {
    let compiler = compiler();
    let script = lines(&["[Amy] tends the garden", "[Zoe] arrives unannounced"]);

    let result = compiler.compile(&script, &ImageMap::default());
    let err = result.unwrap_err();
    assert!(format!("{err}").contains("[Zoe]"));
}

#[test]
fn solo_lines_earn_identity_anchors() {
    let compiler = compiler();
    let images = images_for(&["Amy", "Bob"]);
    let script = lines(&[
        "[Amy] tends the garden",
        "[Bob] reads by the fire",
        "[Amy] and [Bob] meet at dawn",
    ]);

    let requests = compiler.compile(&script, &images).unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| *r.id_length() == 1));

    // Anchor prompts lead the array, identity suffix stripped.
    let joint = &requests[2];
    assert_eq!(joint.prompt_array().len(), 2);
    assert_eq!(joint.prompt_array()[0], "[Amy] a young woman");
    assert!(joint.prompt_array()[1].starts_with("[Amy] and [Bob] meet at dawn#"));
}

#[test]
fn inlining_an_excess_tag_restores_the_budget() {
    let compiler = compiler();
    let script = lines(&[
        "[Amy] tends the garden",
        "[Bob] reads by the fire",
        "[Amy] greets [Bob] while [Cleo] watches",
    ]);

    // Raw text never shows [Cleo] alone, which would zero the budget; the
    // rewrite removes [Cleo] entirely, so the final budget recovers.
    let requests = compiler.compile(&script, &ImageMap::default()).unwrap();
    assert!(requests.iter().all(|r| *r.id_length() == 1));
}

#[test]
fn embedded_newlines_become_separate_prompt_segments() {
    let compiler = compiler();
    let script = lines(&["[Amy] tends the garden\nShe hums a tune"]);

    let requests = compiler.compile(&script, &ImageMap::default()).unwrap();
    assert_eq!(requests.len(), 1);

    // One anchor prompt (the line is solo for Amy), then one entry per
    // newline-separated segment.
    let array = requests[0].prompt_array();
    assert_eq!(array.len(), 3);
    assert_eq!(array[0], "[Amy] a young woman");
    assert!(array[1].starts_with("[Amy] tends the garden#"));
    assert!(array[2].starts_with("[NC]She hums a tune#"));
}

#[test]
fn missing_reference_images_are_skipped_not_fatal() {
    let compiler = compiler();
    let images = images_for(&["Amy"]);
    let script = lines(&["[Amy] and [Bob] meet at dawn"]);

    let requests = compiler.compile(&script, &images).unwrap();
    assert_eq!(requests[0].ref_images().len(), 1);
    assert_eq!(requests[0].ref_images()[0].tag().name(), "Amy");
}

#[test]
fn compile_iter_is_restartable() {
    let compiler = compiler();
    let images = images_for(&["Amy", "Bob"]);
    let script = lines(&[
        "[Amy] tends the garden",
        "[Amy] and [Bob] meet at dawn",
    ]);

    let first: Vec<_> = compiler.compile_iter(&script, &images).unwrap().collect();
    let second: Vec<_> = compiler.compile_iter(&script, &images).unwrap().collect();
    assert_eq!(first, second);
}

#[test]
fn empty_registry_compiles_everything_as_no_character() {
    let compiler =
        ScriptCompiler::from_general_prompt("just scenery notes", IdentityConfig::default())
            .unwrap();
    let script = lines(&["Dawn over the harbor.", "Gulls wheel overhead."]);

    let requests = compiler.compile(&script, &ImageMap::default()).unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.general_prompt() == "[NC]"));
    assert!(requests.iter().all(|r| r.ref_images().is_empty()));
}
