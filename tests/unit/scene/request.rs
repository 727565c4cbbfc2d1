use super::*;
use crate::animation::ease::Ease;
use crate::animation::schedule::Landing;
use crate::foundation::core::Rgb8;
use crate::render::cpu::AvatarPolicy;

const MINIMAL: &str = r##"{
    "candidates": [
        {"label": "Alice", "color": "#FF0000"},
        {"label": "Bob", "color": "#0f0"}
    ],
    "selected_index": 1,
    "avatar": {"path": "avatar.png"}
}"##;

#[test]
fn minimal_request_uses_defaults() {
    let req = SpinRequest::from_json_str(MINIMAL).unwrap();
    assert_eq!(req.candidates.len(), 2);
    assert_eq!(req.candidates[1].color, Rgb8::new(0, 255, 0));
    assert_eq!(req.avatar, AssetRef::Path("avatar.png".into()));
    assert_eq!(req.pointer, None);
    assert_eq!(req.options, SpinOpts::default());

    let o = &req.options;
    assert_eq!(o.geometry.canvas_size, 500);
    assert_eq!(o.schedule.frame_count, 40);
    assert_eq!(o.schedule.hold_frames, 10);
    assert_eq!(o.encode.delay_ms, 50);
    assert_eq!(o.encode.quality, 10);
    assert!(o.encode.transparent);
    assert_eq!(o.render.avatar_policy, AvatarPolicy::CoRotating);
    assert!(o.validate().is_ok());
}

#[test]
fn nested_options_override_selectively() {
    let json = r##"{
        "candidates": [{"label": "A", "color": "#123456"}],
        "selected_index": 0,
        "avatar": {"url": "https://example.com/a.png"},
        "pointer": {"path": "pin.png"},
        "options": {
            "geometry": {"canvas_size": 300, "wheel_radius": 140},
            "schedule": {"ease": "out_cubic", "landing": {"jitter": {"seed": 7}}},
            "render": {"avatar_policy": "fixed", "label_color": "#000"},
            "encode": {"loop_count": 2, "transparent": false}
        }
    }"##;
    let req = SpinRequest::from_json_str(json).unwrap();
    let o = &req.options;
    assert_eq!(o.geometry.canvas_size, 300);
    assert_eq!(o.geometry.center_radius, 50.0);
    assert_eq!(o.schedule.ease, Ease::OutCubic);
    assert_eq!(o.schedule.landing, Landing::Jitter { seed: 7 });
    assert_eq!(o.schedule.frame_count, 40);
    assert_eq!(o.render.avatar_policy, AvatarPolicy::Fixed);
    assert_eq!(o.render.label_color, Rgb8::new(0, 0, 0));
    assert_eq!(o.encode.loop_count, 2);
    assert!(!o.encode.transparent);
    assert_eq!(req.pointer, Some(AssetRef::Path("pin.png".into())));
}

#[test]
fn bad_colors_and_shapes_are_validation_errors() {
    let bad_color = MINIMAL.replace("#FF0000", "#GG0000");
    assert!(matches!(
        SpinRequest::from_json_str(&bad_color),
        Err(WheelError::Validation(_))
    ));
    assert!(matches!(
        SpinRequest::from_json_str("{}"),
        Err(WheelError::Validation(_))
    ));
}

#[test]
fn option_validation_catches_bad_values() {
    let mut o = SpinOpts::default();
    o.geometry.wheel_radius = 400.0;
    assert!(o.validate().is_err());

    let mut o = SpinOpts::default();
    o.schedule.full_rotations = 1;
    assert!(o.validate().is_err());

    let mut o = SpinOpts::default();
    o.encode.quality = 0;
    assert!(o.validate().is_err());
}

#[test]
fn from_reader_and_from_path_agree() {
    let a = SpinRequest::from_reader(MINIMAL.as_bytes()).unwrap();
    let path = std::env::temp_dir().join(format!("luckywheel-req-{}.json", std::process::id()));
    std::fs::write(&path, MINIMAL).unwrap();
    let b = SpinRequest::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(a, b);

    assert!(SpinRequest::from_path("/no/such/request.json").is_err());
}
