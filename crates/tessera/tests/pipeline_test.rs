use tessera::{
    CharacterTag, DiffusionConfig, DiffusionRequest, IdentityConfig, ImageMap, ImageSource,
    ScriptCompiler, StylePreset,
};

#[test]
fn compiled_script_serializes_to_the_endpoint_schema() {
    let compiler = ScriptCompiler::from_general_prompt(
        "[Amy]a young woman\n[Bob]an old man",
        IdentityConfig::default(),
    )
    .unwrap();

    let mut images = ImageMap::new();
    images.insert(
        CharacterTag::new("Amy"),
        ImageSource::Base64("amy-portrait".to_string()),
    );
    images.insert(
        CharacterTag::new("Bob"),
        ImageSource::Base64("bob-portrait".to_string()),
    );

    let script = vec![
        "[Amy] tends the garden".to_string(),
        "[Bob] reads by the fire".to_string(),
        "[Amy] and [Bob] meet at dawn".to_string(),
    ];
    let requests = compiler.compile(&script, &images).unwrap();
    assert_eq!(requests.len(), 3);

    let config = DiffusionConfig::builder()
        .endpoint_url("http://localhost:8080/invocations")
        .style(StylePreset::ComicBook)
        .build();

    let payload = DiffusionRequest::from_parts(&requests[2], &config);
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["id_length_"], 1);
    assert_eq!(json["style"], "Comic book");
    assert_eq!(json["G_height"], 768);
    assert_eq!(json["G_width"], 768);
    assert_eq!(json["sd_type"], "Unstable");
    assert_eq!(
        json["general_prompt"],
        "[Amy] a young woman img\n[Bob] an old man img"
    );
    assert_eq!(json["files"].as_array().unwrap().len(), 2);
    assert_eq!(json["prompt_array"][0], "[Amy] a young woman");
}

#[test]
fn no_character_payload_carries_no_files() {
    let compiler = ScriptCompiler::from_general_prompt("[Amy]a young woman", IdentityConfig::default())
        .unwrap();
    let script = vec!["A quiet morning in the village.".to_string()];
    let requests = compiler.compile(&script, &ImageMap::default()).unwrap();

    let config = DiffusionConfig::builder().endpoint_url("http://x").build();
    let json = serde_json::to_value(DiffusionRequest::from_parts(&requests[0], &config)).unwrap();

    assert!(json.get("files").is_none());
    assert_eq!(json["general_prompt"], "[NC]");
}
