use std::io::BufReader;

use image::AnimationDecoder as _;

use super::*;

fn cfg(name: &str) -> EncodeConfig {
    EncodeConfig {
        width: 8,
        height: 6,
        fps: 10,
        delay_ms: 100,
        out_path: PathBuf::from("target").join("encode_unit").join(name),
        overwrite: true,
        bg_rgba: [255, 255, 255, 255],
    }
}

fn solid(width: u32, height: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied: true,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(
        EncodeConfig {
            width: 0,
            ..cfg("x.gif")
        }
        .validate()
        .is_err()
    );
    assert!(EncodeConfig { fps: 0, ..cfg("x.gif") }.validate().is_err());
    assert!(
        EncodeConfig {
            delay_ms: 0,
            ..cfg("x.gif")
        }
        .validate()
        .is_err()
    );
    cfg("x.gif").validate().unwrap();
}

#[test]
fn encode_config_follows_animation_config() {
    let anim = AnimationConfig::default();
    let enc = EncodeConfig::from_animation(&anim);
    assert_eq!((enc.width, enc.height), (1000, 500));
    assert_eq!(enc.fps, 10);
    assert_eq!(enc.delay_ms, 100);
    assert_eq!(enc.bg_rgba, [255, 255, 255, 255]);
    let moved = enc.with_out_path("elsewhere.gif");
    assert_eq!(moved.out_path, PathBuf::from("elsewhere.gif"));
}

#[test]
fn mp4_needs_even_dimensions() {
    assert!(ffmpeg::validate_mp4_dims(1000, 500).is_ok());
    assert!(ffmpeg::validate_mp4_dims(999, 500).is_err());
    let err = match create_sink(
        OutputFormat::Mp4,
        EncodeConfig {
            width: 7,
            ..cfg("odd.mp4")
        },
    ) {
        Ok(_) => panic!("odd-sized mp4 sink should be rejected"),
        Err(e) => e,
    };
    assert!(matches!(err, FourierError::Configuration(_)));
}

#[test]
fn gif_sink_writes_every_frame() {
    let c = cfg("three.gif");
    let path = c.out_path.clone();
    let _ = std::fs::remove_file(&path);

    let mut sink = create_sink(OutputFormat::Gif, c).unwrap();
    for px in [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]] {
        sink.encode_frame(&solid(8, 6, px)).unwrap();
    }
    sink.finish().unwrap();

    let f = std::fs::File::open(&path).unwrap();
    let decoder = image::codecs::gif::GifDecoder::new(BufReader::new(f)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 100);
}

#[test]
fn gif_sink_rejects_mismatched_frames() {
    let mut sink = create_sink(OutputFormat::Gif, cfg("mismatch.gif")).unwrap();
    let err = sink.encode_frame(&solid(4, 4, [0, 0, 0, 255])).unwrap_err();
    assert!(matches!(err, FourierError::Export(_)));
}

#[test]
fn gif_sink_without_frames_fails() {
    let sink = create_sink(OutputFormat::Gif, cfg("empty.gif")).unwrap();
    assert!(sink.finish().is_err());
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let c = cfg("keep.gif");
    ensure_parent_dir(&c.out_path).unwrap();
    std::fs::write(&c.out_path, b"existing").unwrap();

    let result = create_sink(
        OutputFormat::Gif,
        EncodeConfig {
            overwrite: false,
            ..c.clone()
        },
    );
    assert!(matches!(result, Err(FourierError::Export(_))));
    assert_eq!(std::fs::read(&c.out_path).unwrap(), b"existing");
}
