use super::*;

#[test]
fn empty_font_dir_falls_back_without_panicking() {
    let dir = std::env::temp_dir().join(format!("luckywheel-fonts-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("notes.txt"), b"not a font").unwrap();

    // Hosts without any fonts yield None; hosts with fonts yield real bytes.
    if let Some(font) = resolve_label_font(Some(&dir)) {
        assert!(!font.data.is_empty());
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_font_dir_is_ignored() {
    let dir = std::path::Path::new("/definitely/not/a/font/dir");
    let mut db = fontdb::Database::new();
    load_fonts_from_dir(&mut db, dir);
    assert_eq!(db.len(), 0);
    assert!(pick_face(&db).is_none());
}

#[test]
fn layout_line_shapes_with_system_font() {
    let Some(font) = resolve_label_font(None) else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let brush = TextBrushRgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    let layout = engine.layout_line("Carol", 16.0, brush).unwrap();
    assert!(layout.width() > 0.0);
    assert_eq!(layout.lines().count(), 1);

    assert!(engine.layout_line("Carol", 0.0, brush).is_err());
    assert!(engine.layout_line("Carol", f32::NAN, brush).is_err());
}
