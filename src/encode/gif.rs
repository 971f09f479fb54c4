use std::{cell::RefCell, io::Write, rc::Rc};

use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    encode::{EncodeConfig, FrameSink, ensure_parent_dir},
    foundation::error::{FourierError, FourierResult},
    render::{backend::FrameRGBA, composite::flatten_to_opaque_rgba8},
};

// NeuQuant sampling factor: 1 is slowest/best, 30 fastest.
const GIF_QUANT_SPEED: i32 = 10;

// The GIF trailer is only written when the encoder is dropped, so frames go to memory first and
// the file is written in `finish` where IO errors can still be reported.
#[derive(Clone, Default)]
struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Looping animated GIF writer.
pub struct GifSink {
    cfg: EncodeConfig,
    buf: SharedBuf,
    encoder: GifEncoder<SharedBuf>,
    scratch: Vec<u8>,
    frames: u64,
}

impl GifSink {
    pub fn new(cfg: EncodeConfig) -> FourierResult<Self> {
        cfg.validate()?;
        cfg.check_overwrite()?;
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(FourierError::configuration(format!(
                "gif frames are limited to {}x{}",
                u16::MAX,
                u16::MAX
            )));
        }

        let buf = SharedBuf::default();
        let mut encoder = GifEncoder::new_with_speed(buf.clone(), GIF_QUANT_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| FourierError::export(format!("gif header: {e}")))?;

        Ok(Self {
            scratch: vec![0u8; FrameRGBA::expected_len(cfg.width, cfg.height)],
            cfg,
            buf,
            encoder,
            frames: 0,
        })
    }
}

impl FrameSink for GifSink {
    fn encode_frame(&mut self, frame: &FrameRGBA) -> FourierResult<()> {
        self.cfg.check_frame(frame)?;
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.bg_rgba,
        )?;

        let image = RgbaImage::from_raw(self.cfg.width, self.cfg.height, self.scratch.clone())
            .ok_or_else(|| FourierError::export("gif frame buffer has the wrong length"))?;
        let delay = Delay::from_numer_denom_ms(self.cfg.delay_ms, 1);
        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, delay))
            .map_err(|e| FourierError::export(format!("gif frame {}: {e}", self.frames)))?;
        self.frames += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> FourierResult<()> {
        let Self {
            cfg,
            buf,
            encoder,
            frames,
            ..
        } = *self;
        if frames == 0 {
            return Err(FourierError::export("no frames were encoded"));
        }
        drop(encoder);

        let bytes = buf.0.take();
        ensure_parent_dir(&cfg.out_path)?;
        std::fs::write(&cfg.out_path, &bytes).map_err(|e| {
            FourierError::export(format!(
                "failed to write '{}': {e}",
                cfg.out_path.display()
            ))
        })?;
        tracing::debug!(
            path = %cfg.out_path.display(),
            frames,
            bytes = bytes.len(),
            "gif written"
        );
        Ok(())
    }
}
