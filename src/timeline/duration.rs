use crate::{
    composition::model::Clip,
    foundation::core::{Fps, FrameIndex},
    timeline::starts::{ClipFrames, compute_clip_starts, total_clip_frames},
};

/// Clips that contribute to the timeline: everything whose metadata has arrived.
///
/// Pending clips have no duration yet and take no part in start, crossfade or
/// total computations until their probe result is applied.
pub fn contributing_clips(clips: &[Clip]) -> impl Iterator<Item = &Clip> {
    clips.iter().filter(|c| !c.is_pending())
}

/// Total clip-section length in seconds.
///
/// Sums effective durations and subtracts each crossfade except the first
/// contributing clip's. Floored at zero.
pub fn total_duration_secs(clips: &[Clip]) -> f64 {
    let mut total = 0.0;
    for (i, clip) in contributing_clips(clips).enumerate() {
        total += clip.effective_duration();
        if i > 0 {
            total -= clip.crossfade_duration;
        }
    }
    total.max(0.0)
}

/// Frame counts for one clip, each field rounded independently.
pub fn clip_frames(clip: &Clip, fps: Fps) -> ClipFrames {
    ClipFrames {
        duration_in_frames: fps.secs_to_frames(clip.effective_duration()),
        crossfade_in_frames: fps.secs_to_frames(clip.crossfade_duration),
    }
}

/// Frame-domain layout of the whole timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimelineLength {
    /// Per contributing clip frame counts, in order.
    pub clips: Vec<ClipFrames>,
    /// Start frame of each contributing clip.
    pub starts: Vec<FrameIndex>,
    /// Frames covered by the clip section (at least 1).
    pub clip_frames: i64,
    /// Frames of the trailing summary slide, `0` when disabled.
    pub summary_frames: i64,
}

impl TimelineLength {
    /// Measure `clips` at `fps`, appending `summary_secs` when given.
    pub fn measure(clips: &[Clip], fps: Fps, summary_secs: Option<f64>) -> Self {
        let frames: Vec<ClipFrames> = contributing_clips(clips)
            .map(|c| clip_frames(c, fps))
            .collect();
        let starts = compute_clip_starts(&frames);
        let clip_frames = total_clip_frames(&frames, &starts);
        let summary_frames = summary_secs
            .map(|s| fps.secs_to_frames(s).max(0))
            .unwrap_or(0);
        Self {
            clips: frames,
            starts,
            clip_frames,
            summary_frames,
        }
    }

    /// Clip section plus summary slide.
    pub fn total_frames(&self) -> i64 {
        self.clip_frames.saturating_add(self.summary_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
