use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Rgb8;
use crate::wheel::geometry::WheelGeometry;

struct CountingLoader {
    calls: AtomicUsize,
}

impl CountingLoader {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl AssetLoader for CountingLoader {
    fn load(&self, _asset: &AssetRef) -> WheelResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let img = image::RgbaImage::from_pixel(6, 6, image::Rgba([0, 128, 255, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| WheelError::asset_load(e.to_string()))?;
        Ok(out.into_inner())
    }
}

fn small_request(selected_index: usize) -> SpinRequest {
    let candidates = vec![
        Candidate::new("Alice", Rgb8::new(255, 0, 0)),
        Candidate::new("Bob", Rgb8::new(0, 255, 0)),
        Candidate::new("Carol", Rgb8::new(0, 0, 255)),
    ];
    let mut req = SpinRequest::new(candidates, selected_index, AssetRef::Url("mem://a".into()));
    req.options.geometry = WheelGeometry {
        canvas_size: 120,
        wheel_radius: 50.0,
        center_radius: 15.0,
    };
    req.options.schedule.frame_count = 6;
    req.options.schedule.hold_frames = 3;
    req
}

#[test]
fn session_streams_spin_then_hold() {
    let loader = CountingLoader::new();
    let mut session = SpinSession::new(&small_request(1), &loader).unwrap();
    assert_eq!(session.frame_count(), 7 + 3);
    assert_eq!(session.wheel().winner().label, "Bob");

    let mut sink = InMemorySink::new();
    let stats = session.render_to_sink(&mut sink).unwrap();
    assert_eq!(stats.frames_total, 10);
    // The settled frame is rendered once, then reused for every hold frame.
    assert_eq!(stats.frames_reused, 3);
    assert_eq!(stats.frames_rendered, 7);

    let frames = sink.frames();
    assert_eq!(frames.len(), 10);
    assert!(frames.windows(2).all(|w| w[0].0 < w[1].0));
    let settled = &frames[6].1;
    for (_, f) in &frames[7..] {
        assert_eq!(f, settled);
    }
}

#[test]
fn hold_frames_match_fresh_render_of_terminal_angle() {
    let loader = CountingLoader::new();
    let mut session = SpinSession::new(&small_request(2), &loader).unwrap();
    let last = FrameIndex(session.frame_count() as u64 - 1);
    let direct = session.render_frame(last).unwrap();
    let settled = session
        .render_frame(FrameIndex(session.plan().frames().len() as u64 - 1))
        .unwrap();
    assert_eq!(direct, settled);
}

#[test]
fn render_frame_rejects_out_of_range_index() {
    let loader = CountingLoader::new();
    let mut session = SpinSession::new(&small_request(0), &loader).unwrap();
    let past = FrameIndex(session.frame_count() as u64);
    assert!(matches!(
        session.render_frame(past),
        Err(WheelError::Validation(_))
    ));
}

#[test]
fn selection_errors_happen_before_any_asset_load() {
    let loader = CountingLoader::new();
    let err = SpinSession::new(&small_request(99), &loader).err().unwrap();
    assert!(matches!(
        err,
        WheelError::InvalidSelection { index: 99, len: 3 }
    ));

    let mut empty = small_request(0);
    empty.candidates.clear();
    assert!(matches!(
        SpinSession::new(&empty, &loader),
        Err(WheelError::EmptyInput)
    ));
    assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn avatar_and_custom_pointer_both_go_through_the_loader() {
    let loader = CountingLoader::new();
    let mut req = small_request(0);
    req.pointer = Some(AssetRef::Url("mem://pin".into()));
    SpinSession::new(&req, &loader).unwrap();
    assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn gif_bytes_come_out_whole() {
    let loader = CountingLoader::new();
    let mut session = SpinSession::new(&small_request(1), &loader).unwrap();
    let bytes = session.render_gif().unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert_eq!(bytes.last(), Some(&0x3b));
}
