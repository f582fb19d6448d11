use std::{collections::BTreeSet, fmt, path::PathBuf};

use crate::foundation::{
    core::{Canvas, Fps},
    error::{CutlineError, CutlineResult},
};

/// Shortest effective duration a trimmed clip may have, in seconds.
pub const MIN_CLIP_DURATION: f64 = 1.0;

/// Longest duration accepted anywhere in a project, in seconds (24 hours).
pub const MAX_MEDIA_DURATION: f64 = 86_400.0;

/// Stable clip identity, assigned at import and never reused within a session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ClipId(pub u64);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip-{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A transcript-derived caption span.
///
/// `start`/`end` are seconds on the clip's natural (untrimmed) timeline until
/// re-based by [`crate::adjust_captions_for_trim`].
pub struct CaptionSegment {
    /// Segment identifier.
    pub id: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Spoken text.
    pub text: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Lifecycle of the external transcription call for one clip.
pub enum CaptionStatus {
    /// No transcription requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Transcribing,
    /// Captions were delivered.
    Done,
    /// The request failed; never retried automatically.
    Error,
}

impl CaptionStatus {
    /// Inline label shown next to the clip.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Transcribing => "transcribing...",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One source video segment on the timeline.
pub struct Clip {
    /// Stable identity.
    pub id: ClipId,
    /// Opaque media locator handed to the preview surface and render backend.
    pub source: String,
    /// Local file path used for transcription.
    pub file_path: PathBuf,
    /// Probed duration in seconds; `0` while metadata is pending.
    pub natural_duration: f64,
    /// Seconds removed from the start.
    #[serde(default)]
    pub trim_start: f64,
    /// Seconds removed from the end.
    #[serde(default)]
    pub trim_end: f64,
    /// Overlap with the previous clip in seconds; ignored for the first clip.
    #[serde(default)]
    pub crossfade_duration: f64,
    /// Caption segments on the natural timeline.
    #[serde(default)]
    pub captions: Vec<CaptionSegment>,
    /// Transcription lifecycle.
    #[serde(default)]
    pub caption_status: CaptionStatus,
}

impl Clip {
    /// A freshly imported clip with pending metadata and idle captions.
    pub fn new(id: ClipId, source: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            source: source.into(),
            file_path: file_path.into(),
            natural_duration: 0.0,
            trim_start: 0.0,
            trim_end: 0.0,
            crossfade_duration: 0.0,
            captions: Vec::new(),
            caption_status: CaptionStatus::Idle,
        }
    }

    /// `true` until the metadata probe has delivered a duration.
    pub fn is_pending(&self) -> bool {
        self.natural_duration <= 0.0
    }

    /// Natural duration minus both trims; `0` while pending.
    pub fn effective_duration(&self) -> f64 {
        if self.is_pending() {
            return 0.0;
        }
        self.natural_duration - self.trim_start - self.trim_end
    }

    fn validate(&self) -> CutlineResult<()> {
        let fields = [
            ("natural_duration", self.natural_duration),
            ("trim_start", self.trim_start),
            ("trim_end", self.trim_end),
            ("crossfade_duration", self.crossfade_duration),
        ];
        for (name, v) in fields {
            if !(0.0..=MAX_MEDIA_DURATION).contains(&v) {
                return Err(CutlineError::validation(format!(
                    "{} has invalid {name} ({v})",
                    self.id
                )));
            }
        }
        for seg in &self.captions {
            if !seg.start.is_finite() || !seg.end.is_finite() {
                return Err(CutlineError::validation(format!(
                    "{} caption '{}' has non-finite bounds",
                    self.id, seg.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Timed image overlay placed in percentages of the frame.
pub struct OverlaySettings {
    /// Image locator; no overlay layer is produced when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Local image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Left edge, percent of frame width.
    pub x: f64,
    /// Top edge, percent of frame height.
    pub y: f64,
    /// Width, percent of frame width.
    pub width: f64,
    /// Height, percent of frame height.
    pub height: f64,
    /// Height/width ratio kept during proportional resizing.
    pub aspect: f64,
    /// Seconds from timeline start during which the overlay is shown.
    pub duration: f64,
    /// Tail of `duration` over which opacity ramps 1 to 0.
    pub fade_duration: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            source: None,
            file_path: None,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            aspect: 1.0,
            duration: 5.0,
            fade_duration: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Vertical placement of the caption block.
pub enum CaptionPosition {
    /// Near the top edge.
    Top,
    /// Vertically centered.
    Center,
    /// Near the bottom edge.
    #[default]
    Bottom,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Caption display settings.
pub struct CaptionSettings {
    /// Whether the caption layer is produced at all.
    pub enabled: bool,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS-style color string.
    pub color: String,
    /// Vertical placement.
    pub position: CaptionPosition,
    /// Maximum words per displayed chunk.
    pub max_words: usize,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            font_size: 48.0,
            color: "#FFFFFF".to_string(),
            position: CaptionPosition::Bottom,
            max_words: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One line of the closing summary slide.
pub struct SummaryItem {
    /// Item identifier.
    pub id: String,
    /// Leading emoji.
    pub emoji: String,
    /// Item text.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Closing summary slide appended after all clips.
pub struct SummarySettings {
    /// Whether the slide is appended.
    pub enabled: bool,
    /// Ordered items.
    pub items: Vec<SummaryItem>,
    /// Slide duration in seconds.
    pub duration: f64,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            items: Vec::new(),
            duration: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The full composable project: ordered clips plus overlay, caption and summary settings.
///
/// A project is plain data. Preview and export both turn it into a
/// [`crate::CompositionPlan`] through the same builder.
pub struct Project {
    /// Clips in timeline order.
    pub clips: Vec<Clip>,
    /// Image overlay.
    pub overlay: OverlaySettings,
    /// Caption display.
    pub captions: CaptionSettings,
    /// Summary slide.
    pub summary: SummarySettings,
    /// Frame rate, fixed once the first clip is probed.
    pub fps: Fps,
    /// Frame dimensions, fixed once the first clip is probed.
    pub canvas: Canvas,
    /// Set once `fps`/`canvas` have been taken from the first clip's metadata.
    #[serde(default)]
    pub format_locked: bool,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            clips: Vec::new(),
            overlay: OverlaySettings::default(),
            captions: CaptionSettings::default(),
            summary: SummarySettings::default(),
            fps: Fps::DEFAULT,
            canvas: Canvas::default(),
            format_locked: false,
        }
    }
}

impl Project {
    /// Look up a clip by id.
    pub fn clip(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Timeline position of a clip.
    pub fn clip_index(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id == id)
    }

    /// Reject malformed data. Trim/crossfade consistency is not checked here;
    /// that is enforced by the clamping rules in [`crate::reduce`].
    pub fn validate(&self) -> CutlineResult<()> {
        self.canvas.validate()?;

        let mut seen = BTreeSet::new();
        for clip in &self.clips {
            if !seen.insert(clip.id) {
                return Err(CutlineError::validation(format!(
                    "duplicate clip id '{}'",
                    clip.id
                )));
            }
            clip.validate()?;
        }

        let o = &self.overlay;
        for (name, v) in [
            ("overlay duration", o.duration),
            ("overlay fade duration", o.fade_duration),
        ] {
            if !(0.0..=MAX_MEDIA_DURATION).contains(&v) {
                return Err(CutlineError::validation(format!(
                    "{name} must be within [0, {MAX_MEDIA_DURATION}] (got {v})"
                )));
            }
        }
        for v in [o.x, o.y, o.width, o.height] {
            if !v.is_finite() {
                return Err(CutlineError::validation("overlay placement must be finite"));
            }
        }

        if self.captions.max_words == 0 {
            return Err(CutlineError::validation("caption maxWords must be >= 1"));
        }
        let d = self.summary.duration;
        if !(0.0..=MAX_MEDIA_DURATION).contains(&d) {
            return Err(CutlineError::validation(format!(
                "summary duration must be within [0, {MAX_MEDIA_DURATION}] (got {d})"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
