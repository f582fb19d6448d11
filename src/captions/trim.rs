use crate::composition::model::CaptionSegment;

/// Keep the captions that overlap the retained window of a trimmed clip and
/// re-base them onto the clip's post-trim local timeline.
///
/// Boundaries are clipped to the window before offsetting, so a caption that
/// straddles a trim edge is shortened rather than dropped.
pub fn adjust_captions_for_trim(
    captions: &[CaptionSegment],
    trim_start: f64,
    trim_end: f64,
    natural_duration: f64,
) -> Vec<CaptionSegment> {
    let trim_end_time = natural_duration - trim_end;
    let window = trim_end_time - trim_start;

    captions
        .iter()
        .filter(|cap| cap.end > trim_start && cap.start < trim_end_time)
        .map(|cap| CaptionSegment {
            id: cap.id.clone(),
            start: (cap.start - trim_start).max(0.0),
            end: window.min(cap.end - trim_start),
            text: cap.text.clone(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/captions/trim.rs"]
mod tests;
