use crate::{
    captions::split::CaptionChunk,
    composition::model::ClipId,
    foundation::core::{Fps, FrameIndex, FrameRange},
};

/// Text of the chunk visible at `current`, if any.
///
/// Returns `None` as soon as `current` falls outside the clip's window, so a
/// clip's chunk list is never consulted while another clip is current.
pub fn active_chunk(
    current: FrameIndex,
    clip_start: FrameIndex,
    clip_duration_in_frames: i64,
    chunks: &[CaptionChunk],
    fps: Fps,
) -> Option<&str> {
    let window = FrameRange::from_start_len(clip_start, clip_duration_in_frames);
    let local_frames = window.local(current)?;
    let local_secs = fps.frames_to_secs(local_frames);
    chunks
        .iter()
        .find(|c| local_secs >= c.start && local_secs < c.end)
        .map(|c| c.text.as_str())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Display-ready captions of one clip, placed on the master timeline.
pub struct CaptionTrack {
    /// Owning clip.
    pub clip_id: ClipId,
    /// Clip start frame.
    pub start: FrameIndex,
    /// Clip length in frames.
    pub duration_in_frames: i64,
    /// Chunks on the clip's post-trim local timeline.
    pub chunks: Vec<CaptionChunk>,
}

impl CaptionTrack {
    /// Frames during which this clip's captions may show.
    pub fn window(&self) -> FrameRange {
        FrameRange::from_start_len(self.start, self.duration_in_frames)
    }
}

/// The track whose clip is current at `frame`.
///
/// During a crossfade two clip windows overlap; the earlier clip stays
/// current until its window ends.
pub fn current_track(frame: FrameIndex, tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks.iter().find(|t| t.window().contains(frame))
}

/// Caption text for `frame` across the whole timeline.
pub fn active_caption(frame: FrameIndex, tracks: &[CaptionTrack], fps: Fps) -> Option<&str> {
    let track = current_track(frame, tracks)?;
    active_chunk(
        frame,
        track.start,
        track.duration_in_frames,
        &track.chunks,
        fps,
    )
}

/// Timeline frame to seek to when a transcript line is selected.
pub fn transcript_seek_frame(clip_start: FrameIndex, segment_start: f64, fps: Fps) -> FrameIndex {
    clip_start.offset(fps.secs_to_frames(segment_start))
}

#[cfg(test)]
#[path = "../../tests/unit/captions/resolve.rs"]
mod tests;
