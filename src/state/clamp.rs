//! Editing limits applied before values reach the project.
//!
//! The timeline math trusts its inputs; these functions keep user edits inside
//! the range where that math gives a sensible picture.

use crate::composition::model::MIN_CLIP_DURATION;

/// Longest crossfade between two clips, in seconds.
pub const MAX_CROSSFADE: f64 = 2.0;
/// Shortest overlay lifetime, in seconds.
pub const MIN_OVERLAY_DURATION: f64 = 0.5;
/// Longest overlay fade-out, in seconds.
pub const MAX_FADE: f64 = 5.0;
/// Smallest caption font size, in pixels.
pub const MIN_FONT_SIZE: f64 = 1.0;

fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    v.clamp(lo, hi.max(lo))
}

/// Clamp a trim pair so at least [`MIN_CLIP_DURATION`] of the clip remains.
///
/// Trim start is honored first; trim end gets what is left. A pending clip
/// (`natural_duration <= 0`) cannot be trimmed.
pub fn clamp_trim(natural_duration: f64, trim_start: f64, trim_end: f64) -> (f64, f64) {
    if !(natural_duration > 0.0) {
        return (0.0, 0.0);
    }
    let budget = (natural_duration - MIN_CLIP_DURATION).max(0.0);
    let start = clamp_finite(trim_start, 0.0, budget);
    let end = clamp_finite(trim_end, 0.0, budget - start);
    (start, end)
}

/// Clamp a crossfade against [`MAX_CROSSFADE`] and both neighbours' effective
/// durations. Pass `None` for a neighbour whose duration is not known yet.
pub fn clamp_crossfade(
    seconds: f64,
    prev_effective: Option<f64>,
    this_effective: Option<f64>,
) -> f64 {
    let mut hi = MAX_CROSSFADE;
    for d in [prev_effective, this_effective].into_iter().flatten() {
        hi = hi.min(d.max(0.0));
    }
    clamp_finite(seconds, 0.0, hi)
}

/// Clamp the overlay duration; the upper bound applies once the timeline length is known.
pub fn clamp_overlay_duration(seconds: f64, timeline_secs: Option<f64>) -> f64 {
    let hi = timeline_secs
        .filter(|t| *t > 0.0)
        .map(|t| t.max(MIN_OVERLAY_DURATION))
        .unwrap_or(f64::INFINITY);
    clamp_finite(seconds, MIN_OVERLAY_DURATION, hi)
}

/// Clamp the overlay fade-out to [`MAX_FADE`] and the overlay's own lifetime.
pub fn clamp_fade_duration(seconds: f64, overlay_duration: f64) -> f64 {
    clamp_finite(seconds, 0.0, overlay_duration.min(MAX_FADE))
}

/// Clamp an overlay position or size percentage.
pub fn clamp_percent(v: f64) -> f64 {
    clamp_finite(v, 0.0, 100.0)
}

/// Clamp a caption font size to at least [`MIN_FONT_SIZE`].
pub fn clamp_font_size(v: f64) -> f64 {
    clamp_finite(v, MIN_FONT_SIZE, f64::INFINITY)
}

/// Clamp the summary slide duration to be non-negative.
pub fn clamp_summary_duration(v: f64) -> f64 {
    clamp_finite(v, 0.0, f64::INFINITY)
}

#[cfg(test)]
#[path = "../../tests/unit/state/clamp.rs"]
mod tests;
