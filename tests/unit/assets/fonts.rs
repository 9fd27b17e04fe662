use super::*;

#[test]
fn family_list_is_split_and_unquoted() {
    assert_eq!(
        parse_family_list(" 'Open Sans', \"Helvetica Neue\" ,Arial, sans-serif "),
        vec!["Open Sans", "Helvetica Neue", "Arial", "sans-serif"]
    );
    assert!(parse_family_list(" , ").is_empty());
}

#[test]
fn generic_names_are_case_insensitive() {
    assert!(matches!(
        generic_family("Sans-Serif"),
        Some(fontdb::Family::SansSerif)
    ));
    assert!(generic_family("Arial").is_none());
}

#[test]
fn empty_library_cannot_resolve() {
    let lib = FontLibrary::new();
    assert_eq!(lib.face_count(), 0);
    let err = lib.resolve("Arial, sans-serif").unwrap_err();
    assert!(matches!(err, WalliError::Render(_)));
}

#[test]
fn family_names_are_sorted_and_unique() {
    assert!(FontLibrary::new().family_names().is_empty());

    let lib = FontLibrary::with_system_fonts();
    let names = lib.family_names();
    assert!(names.len() <= lib.face_count());
    assert!(names.windows(2).all(|w| w[0] < w[1]), "{names:?}");
}

#[test]
fn layout_rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new();
    let font = ResolvedFont {
        family: "none".to_owned(),
        index: 0,
        data: Arc::new(Vec::new()),
        key: 0,
    };
    assert!(
        engine
            .layout_line("x", &font, 0.0, TextBrushRgba8::default())
            .is_err()
    );
}
