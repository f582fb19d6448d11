use crate::{
    composition::model::CaptionSegment,
    foundation::core::{Fps, FrameIndex},
};

/// One occurrence of a search query inside a transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TranscriptMatch {
    /// Index into the searched segment list.
    pub segment_index: usize,
    /// Start byte offset into the lowercased segment text.
    ///
    /// Offsets can differ from the original text where a character's
    /// lowercase form has a different UTF-8 length.
    pub byte_start: usize,
    /// End byte offset (exclusive) into the lowercased segment text.
    pub byte_end: usize,
}

/// Case-insensitive search over segment texts. Overlapping matches are all reported.
///
/// A blank query matches nothing.
pub fn search_transcript(segments: &[CaptionSegment], query: &str) -> Vec<TranscriptMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut out = Vec::new();
    for (segment_index, seg) in segments.iter().enumerate() {
        let hay = seg.text.to_lowercase();
        let mut pos = 0;
        while let Some(found) = hay.get(pos..).and_then(|rest| rest.find(&needle)) {
            let start = pos + found;
            out.push(TranscriptMatch {
                segment_index,
                byte_start: start,
                byte_end: start + needle.len(),
            });
            // Step one character forward so overlapping hits are found.
            pos = start + hay[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    out
}

/// Index of the segment under `current`, for highlighting while playing.
///
/// Segment times are compared against the time elapsed since `clip_start`.
pub fn active_segment_index(
    current: FrameIndex,
    clip_start: FrameIndex,
    segments: &[CaptionSegment],
    fps: Fps,
) -> Option<usize> {
    let t = fps.frames_to_secs(current.0 - clip_start.0);
    segments.iter().position(|s| t >= s.start && t < s.end)
}
