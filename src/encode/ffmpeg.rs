use std::process::{Child, ChildStdin, Command, Stdio};

use crate::{
    encode::{EncodeConfig, FrameSink, ensure_parent_dir},
    foundation::error::{FourierError, FourierResult},
    render::{backend::FrameRGBA, composite::flatten_to_opaque_rgba8},
};

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// yuv420p subsamples chroma 2x2, so both dimensions must be even.
pub fn validate_mp4_dims(width: u32, height: u32) -> FourierResult<()> {
    if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
        return Err(FourierError::configuration(format!(
            "mp4 output needs even width/height, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Streams raw RGBA frames into the system `ffmpeg` binary (H.264 in MP4).
///
/// Dropping the encoder without [`FrameSink::finish`] kills `ffmpeg` and removes the partial
/// output file.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> FourierResult<Self> {
        cfg.validate()?;
        validate_mp4_dims(cfg.width, cfg.height)?;
        cfg.check_overwrite()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !is_ffmpeg_on_path() {
            return Err(FourierError::export(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            FourierError::export(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FourierError::export("failed to open ffmpeg stdin"))?;

        Ok(Self {
            scratch: vec![0u8; FrameRGBA::expected_len(cfg.width, cfg.height)],
            cfg,
            child: Some(child),
            stdin: Some(stdin),
        })
    }
}

impl FrameSink for FfmpegEncoder {
    fn encode_frame(&mut self, frame: &FrameRGBA) -> FourierResult<()> {
        self.cfg.check_frame(frame)?;
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FourierError::export("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            FourierError::export(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    fn finish(mut self: Box<Self>) -> FourierResult<()> {
        drop(self.stdin.take());

        let Some(child) = self.child.take() else {
            return Err(FourierError::export("ffmpeg encoder is already finalized"));
        };
        let output = child.wait_with_output().map_err(|e| {
            FourierError::export(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FourierError::export(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        drop(self.stdin.take());
        let _ = child.kill();
        let _ = child.wait();
        if self.cfg.out_path.exists() {
            let _ = std::fs::remove_file(&self.cfg.out_path);
        }
        tracing::debug!(
            path = %self.cfg.out_path.display(),
            "ffmpeg encoder dropped before finish; partial output removed"
        );
    }
}
