use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

fn decode(bytes: &[u8]) -> Vec<image::Frame> {
    let dec = GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    dec.into_frames().collect_frames().unwrap()
}

#[test]
fn assembles_all_frames_with_delay() {
    let frames: Vec<_> = (0..5u8)
        .map(|i| solid(8, 6, [i * 40, 0, 0, 255]))
        .collect();
    let bytes = assemble(&frames, &GifOpts::default()).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");

    let decoded = decode(&bytes);
    assert_eq!(decoded.len(), 5);
    for f in &decoded {
        assert_eq!(f.buffer().dimensions(), (8, 6));
        let (num, den) = f.delay().numer_denom_ms();
        assert_eq!(num / den, 50);
    }
}

#[test]
fn transparent_output_thresholds_alpha() {
    let mut frame = solid(4, 1, [0, 0, 0, 0]);
    // Premultiplied half-alpha red is kept opaque; low alpha becomes transparent.
    frame.data[4..8].copy_from_slice(&[128, 0, 0, 128]);
    frame.data[8..12].copy_from_slice(&[50, 0, 0, 50]);
    frame.data[12..16].copy_from_slice(&[0, 0, 255, 255]);

    let bytes = assemble(std::slice::from_ref(&frame), &GifOpts::default()).unwrap();
    let decoded = decode(&bytes);
    let buf = decoded[0].buffer();
    assert_eq!(buf.get_pixel(0, 0).0[3], 0);
    assert_eq!(buf.get_pixel(1, 0).0[3], 255);
    assert_eq!(buf.get_pixel(2, 0).0[3], 0);
    assert_eq!(buf.get_pixel(3, 0).0[3], 255);
}

#[test]
fn opaque_output_flattens_over_background() {
    let frame = solid(2, 2, [0, 0, 0, 0]);
    let opts = GifOpts {
        transparent: false,
        background: Rgb8::new(255, 255, 255),
        ..GifOpts::default()
    };
    let bytes = assemble(std::slice::from_ref(&frame), &opts).unwrap();
    let px = decode(&bytes)[0].buffer().get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert!(px[0] > 240 && px[1] > 240 && px[2] > 240, "got {px:?}");
}

#[test]
fn empty_sequence_is_an_encoding_error() {
    let err = assemble(&[], &GifOpts::default()).unwrap_err();
    assert!(matches!(err, WheelError::Encoding(_)));

    let mut sink = GifSink::new(GifOpts::default()).unwrap();
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
    })
    .unwrap();
    assert!(matches!(sink.end(), Err(WheelError::Encoding(_))));
}

#[test]
fn mismatched_frame_size_is_rejected() {
    let frames = [solid(4, 4, [0, 0, 0, 255]), solid(4, 5, [0, 0, 0, 255])];
    let err = assemble(&frames, &GifOpts::default()).unwrap_err();
    assert!(matches!(err, WheelError::Encoding(_)));
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = GifSink::new(GifOpts::default()).unwrap();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
    })
    .unwrap();
    let f = solid(1, 1, [1, 2, 3, 255]);
    sink.push_frame(FrameIndex(3), &f).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(3), &f),
        Err(WheelError::Encoding(_))
    ));
    assert!(matches!(
        sink.push_frame(FrameIndex(1), &f),
        Err(WheelError::Encoding(_))
    ));
}

#[test]
fn finish_requires_end() {
    let sink = GifSink::new(GifOpts::default()).unwrap();
    assert!(matches!(sink.finish(), Err(WheelError::Encoding(_))));

    let mut sink = GifSink::new(GifOpts::default()).unwrap();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &solid(1, 1, [0, 0, 0, 255]))
        .unwrap();
    assert!(matches!(sink.finish(), Err(WheelError::Encoding(_))));
}

#[test]
fn option_ranges_are_validated() {
    for quality in [0u8, 31] {
        let opts = GifOpts {
            quality,
            ..GifOpts::default()
        };
        assert!(matches!(GifSink::new(opts), Err(WheelError::Validation(_))));
    }
    let opts = GifOpts {
        delay_ms: MAX_DELAY_MS + 1,
        ..GifOpts::default()
    };
    assert!(matches!(opts.validate(), Err(WheelError::Validation(_))));
    assert!(GifOpts::default().validate().is_ok());
}

#[test]
fn finite_loop_count_encodes() {
    let opts = GifOpts {
        loop_count: 3,
        ..GifOpts::default()
    };
    let bytes = assemble(&[solid(2, 2, [9, 9, 9, 255])], &opts).unwrap();
    assert_eq!(decode(&bytes).len(), 1);
}
