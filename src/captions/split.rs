use crate::composition::model::CaptionSegment;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A word-limited slice of a caption segment, ready for display.
pub struct CaptionChunk {
    /// Start time in seconds (same axis as the source segment).
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Words joined with single spaces.
    pub text: String,
}

/// Split `seg` into chunks of at most `max_words` words.
///
/// Segments that already fit are returned whole with their original text.
/// Otherwise the segment's span is cut into equal-length time slices, one per
/// chunk, regardless of how many words each chunk carries.
pub fn split_segment(seg: &CaptionSegment, max_words: usize) -> Vec<CaptionChunk> {
    let max_words = max_words.max(1);
    let words: Vec<&str> = seg.text.split_whitespace().collect();
    if words.len() <= max_words {
        return vec![CaptionChunk {
            start: seg.start,
            end: seg.end,
            text: seg.text.clone(),
        }];
    }

    let num_chunks = words.len().div_ceil(max_words);
    let chunk_duration = (seg.end - seg.start) / num_chunks as f64;

    words
        .chunks(max_words)
        .enumerate()
        .map(|(i, chunk_words)| CaptionChunk {
            start: seg.start + i as f64 * chunk_duration,
            end: seg.start + (i + 1) as f64 * chunk_duration,
            text: chunk_words.join(" "),
        })
        .collect()
}

/// Split every segment in order and concatenate the chunks.
pub fn split_segments(segments: &[CaptionSegment], max_words: usize) -> Vec<CaptionChunk> {
    segments
        .iter()
        .flat_map(|seg| split_segment(seg, max_words))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/captions/split.rs"]
mod tests;
