use crate::foundation::{
    core::{Fps, FrameIndex},
    math::interpolate_clamped,
};

/// Scheduled fade-out of the image overlay.
///
/// Frame bounds are kept unrounded: the overlay is timed from the project
/// start in seconds, not snapped to clip boundaries.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OverlayFade {
    /// Frame at which the overlay is fully gone.
    pub end_frame: f64,
    /// Frame at which the fade-out begins. May be `<= 0`.
    pub fade_start_frame: f64,
}

impl OverlayFade {
    /// Fade window for an overlay shown for `overlay_duration` seconds whose
    /// last `fade_duration` seconds ramp down.
    pub fn new(overlay_duration: f64, fade_duration: f64, fps: Fps) -> Self {
        let end_frame = fps.secs_to_frames_exact(overlay_duration);
        Self {
            end_frame,
            fade_start_frame: end_frame - fps.secs_to_frames_exact(fade_duration),
        }
    }

    /// Opacity at `frame`: 1 before the fade, linear down to 0 across it, 0 after.
    pub fn opacity_at(self, frame: FrameIndex) -> f64 {
        let f = frame.0 as f64;
        if f >= self.end_frame {
            0.0
        } else if f >= self.fade_start_frame {
            interpolate_clamped(f, (self.fade_start_frame, self.end_frame), (1.0, 0.0))
        } else {
            1.0
        }
    }
}

/// Overlay opacity at `frame`; see [`OverlayFade`].
pub fn overlay_opacity(
    frame: FrameIndex,
    overlay_duration: f64,
    fade_duration: f64,
    fps: Fps,
) -> f64 {
    OverlayFade::new(overlay_duration, fade_duration, fps).opacity_at(frame)
}

/// Crossfade ramps of one clip segment, in the clip's own frame space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ClipFade {
    /// Segment length in frames.
    pub duration_in_frames: i64,
    /// Fade-in length, taken from this clip's crossfade with its predecessor.
    pub crossfade_in_frames: i64,
    /// Fade-out length, taken from the next clip's crossfade.
    pub crossfade_out_frames: i64,
    /// First clip never fades in.
    pub is_first: bool,
    /// Last clip never fades out.
    pub is_last: bool,
}

impl ClipFade {
    /// Opacity at `local_frame` (0-based within the segment).
    ///
    /// The fade-in and fade-out ramps are combined with `min`, so on a clip
    /// shorter than both ramps the result never exceeds either one.
    pub fn opacity_at(self, local_frame: i64) -> f64 {
        let f = local_frame as f64;
        let mut opacity = 1.0;
        if !self.is_first && self.crossfade_in_frames > 0 {
            opacity = interpolate_clamped(f, (0.0, self.crossfade_in_frames as f64), (0.0, 1.0));
        }
        if !self.is_last && self.crossfade_out_frames > 0 {
            let d = self.duration_in_frames as f64;
            let fade_out = interpolate_clamped(
                f,
                (d - self.crossfade_out_frames as f64, d),
                (1.0, 0.0),
            );
            opacity = f64::min(opacity, fade_out);
        }
        opacity
    }
}

/// Frames between successive summary items starting their reveal.
pub const SUMMARY_ITEM_STAGGER_FRAMES: i64 = 10;
/// Length of one item's reveal ramp.
pub const SUMMARY_ITEM_REVEAL_FRAMES: i64 = 15;
/// Vertical distance an item rises while revealing, in pixels.
pub const SUMMARY_ITEM_RISE_PX: f64 = 20.0;

/// Reveal state of one summary item.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SummaryReveal {
    /// Item opacity.
    pub opacity: f64,
    /// Downward offset in pixels, reaching 0 when fully revealed.
    pub translate_y: f64,
}

/// Staggered reveal of summary item `index` at `local_frame` of the summary slide.
pub fn summary_item_reveal(local_frame: i64, index: usize) -> SummaryReveal {
    let delay = (index as i64 * SUMMARY_ITEM_STAGGER_FRAMES) as f64;
    let window = (delay, delay + SUMMARY_ITEM_REVEAL_FRAMES as f64);
    let f = local_frame as f64;
    SummaryReveal {
        opacity: interpolate_clamped(f, window, (0.0, 1.0)),
        translate_y: interpolate_clamped(f, window, (SUMMARY_ITEM_RISE_PX, 0.0)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fade.rs"]
mod tests;
