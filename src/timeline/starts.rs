use crate::foundation::core::FrameIndex;

/// Per-clip frame counts fed to [`compute_clip_starts`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClipFrames {
    /// Post-trim length in frames.
    pub duration_in_frames: i64,
    /// Overlap with the previous clip in frames. Ignored for the first clip.
    pub crossfade_in_frames: i64,
}

/// Start frame of every clip on the master timeline.
///
/// Clip 0 starts at frame 0. Each later clip starts where the previous one
/// ends, pulled back by its own crossfade. Nothing is clamped: a crossfade
/// longer than the previous clip yields a start before that clip's start.
/// Frame sums saturate at the `i64` bounds.
pub fn compute_clip_starts(clips: &[ClipFrames]) -> Vec<FrameIndex> {
    let mut starts = Vec::with_capacity(clips.len());
    let mut cursor = 0i64;
    for (i, clip) in clips.iter().enumerate() {
        if i > 0 {
            cursor = cursor.saturating_sub(clip.crossfade_in_frames);
        }
        starts.push(FrameIndex(cursor));
        cursor = cursor.saturating_add(clip.duration_in_frames);
    }
    starts
}

/// Frame count covered by the clips: last start plus last duration, at least 1.
pub fn total_clip_frames(clips: &[ClipFrames], starts: &[FrameIndex]) -> i64 {
    match (clips.last(), starts.last()) {
        (Some(clip), Some(start)) => start.0.saturating_add(clip.duration_in_frames).max(1),
        _ => 1,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/starts.rs"]
mod tests;
