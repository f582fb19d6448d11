use crate::foundation::error::{CutlineError, CutlineResult};

/// A frame position on the master timeline.
///
/// Signed because crossfades longer than the preceding clip legitimately
/// produce start frames before zero; callers clamp, this type does not.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub i64);

impl FrameIndex {
    /// Frame zero.
    pub const ZERO: Self = Self(0);

    /// Shift by a signed number of frames.
    pub fn offset(self, frames: i64) -> Self {
        Self(self.0.saturating_add(frames))
    }
}

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> CutlineResult<Self> {
        if start.0 > end.0 {
            return Err(CutlineError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Build a range from a start frame and a length. Negative lengths collapse to empty.
    pub fn from_start_len(start: FrameIndex, len: i64) -> Self {
        Self {
            start,
            end: start.offset(len.max(0)),
        }
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> i64 {
        self.end.0.saturating_sub(self.start.0).max(0)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.end.0 <= self.start.0
    }

    /// `true` when `f` is in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Frame offset of `f` relative to `start`, if `f` is inside the range.
    pub fn local(self, f: FrameIndex) -> Option<i64> {
        self.contains(f).then(|| f.0 - self.start.0)
    }
}

/// Project frame rate in frames per second.
///
/// All seconds-to-frames conversions go through [`Fps::secs_to_frames`], which
/// rounds to the nearest frame independently for every value. Drift across many
/// clips is therefore bounded by one frame per converted field, and is not
/// carried forward.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fps(f64);

impl Fps {
    /// Default rate used until the first clip's metadata has been probed.
    pub const DEFAULT: Self = Self(30.0);

    /// Build a frame rate; must be finite and `> 0`.
    pub fn new(fps: f64) -> CutlineResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(CutlineError::validation(format!(
                "fps must be finite and > 0 (got {fps})"
            )));
        }
        Ok(Self(fps))
    }

    /// Raw frames-per-second value.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Unrounded frame position of `secs`.
    pub fn secs_to_frames_exact(self, secs: f64) -> f64 {
        secs * self.0
    }

    /// Nearest-integer frame count for `secs`.
    pub fn secs_to_frames(self, secs: f64) -> i64 {
        self.secs_to_frames_exact(secs).round() as i64
    }

    /// Seconds covered by `frames`.
    pub fn frames_to_secs(self, frames: i64) -> f64 {
        frames as f64 / self.0
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Fps {
    type Error = CutlineError;

    fn try_from(v: f64) -> CutlineResult<Self> {
        Self::new(v)
    }
}

impl From<Fps> for f64 {
    fn from(v: Fps) -> Self {
        v.0
    }
}

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Canvas {
    /// Reject zero-sized canvases.
    pub fn validate(self) -> CutlineResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CutlineError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Resolve a percentage box (0-100 on each axis) into pixel space.
    pub fn percent_rect(self, x_pct: f64, y_pct: f64, w_pct: f64, h_pct: f64) -> kurbo::Rect {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        kurbo::Rect::from_origin_size(
            (x_pct / 100.0 * w, y_pct / 100.0 * h),
            (w_pct / 100.0 * w, h_pct / 100.0 * h),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
