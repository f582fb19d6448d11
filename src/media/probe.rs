use crate::foundation::{
    core::{Canvas, Fps},
    error::{CutlineError, CutlineResult},
};

/// Result of probing one clip's media.
///
/// Probing happens outside this crate and completes independently per clip;
/// the result is fed back through the reducer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Natural duration in seconds.
    pub duration_seconds: f64,
    /// Frame rate as reported, e.g. 29.97.
    pub fps: f64,
}

impl MediaMetadata {
    /// Reject empty frames, non-positive durations and unusable frame rates.
    pub fn validate(&self) -> CutlineResult<()> {
        self.canvas().validate()?;
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(CutlineError::validation(format!(
                "probed duration must be finite and > 0 (got {})",
                self.duration_seconds
            )));
        }
        Fps::new(self.fps)?;
        Ok(())
    }

    /// Frame size as a canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}
