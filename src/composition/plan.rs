use std::path::PathBuf;

use crate::{
    captions::{resolve::CaptionTrack, split::split_segments, trim::adjust_captions_for_trim},
    composition::model::{CaptionPosition, CaptionSettings, ClipId, Project, SummaryItem},
    effects::fade::{ClipFade, OverlayFade},
    foundation::{
        core::{Fps, FrameIndex, FrameRange},
        error::CutlineResult,
    },
    timeline::duration::{TimelineLength, contributing_clips},
};

/// Resolved structure of a project, shared by live preview and export.
///
/// Built once per project state; every per-frame question (segment timing,
/// opacity, active caption) is answered from this value alone.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompositionPlan {
    /// Output format and total length.
    pub target: RenderTarget,
    /// Contributing clips in timeline order. Pending clips are left out.
    pub segments: Vec<ClipSegment>,
    /// Frames covered by the clip section (before any summary slide).
    pub clip_frames: i64,
    /// Image overlay, when the project has an overlay source.
    pub overlay: Option<OverlayLayer>,
    /// Caption tracks, when captions are enabled.
    pub captions: Option<CaptionLayer>,
    /// Summary slide after the clip section, when enabled and non-empty in frames.
    pub summary: Option<SummaryLayer>,
}

/// Output format handed to a render backend.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderTarget {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Clip section plus summary slide.
    pub total_duration_in_frames: i64,
}

/// One clip placed on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipSegment {
    /// Clip this segment plays.
    pub clip_id: ClipId,
    /// Served locator of the clip's media.
    pub source: String,
    /// Local path of the clip's media.
    pub file_path: PathBuf,
    /// First timeline frame of the segment.
    pub start: FrameIndex,
    /// Trimmed length in frames.
    pub duration_in_frames: i64,
    /// Always 0 on the first segment.
    pub crossfade_in_frames: i64,
    /// The next segment's fade-in, or 0 on the last segment.
    pub crossfade_out_frames: i64,
    /// First segment of the timeline; it never fades in.
    pub is_first: bool,
    /// Last segment of the timeline; it never fades out.
    pub is_last: bool,
    /// Source media frame shown at the segment's first frame, i.e. the trim-in point.
    pub source_start_frame: i64,
}

impl ClipSegment {
    /// Timeline frames covered by the segment.
    pub fn window(&self) -> FrameRange {
        FrameRange::from_start_len(self.start, self.duration_in_frames)
    }

    /// Crossfade ramps of the segment.
    pub fn fade(&self) -> ClipFade {
        ClipFade {
            duration_in_frames: self.duration_in_frames,
            crossfade_in_frames: self.crossfade_in_frames,
            crossfade_out_frames: self.crossfade_out_frames,
            is_first: self.is_first,
            is_last: self.is_last,
        }
    }
}

/// Image shown over the clip section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayLayer {
    /// Served locator of the image.
    pub source: String,
    /// Placement in canvas pixels.
    pub rect: kurbo::Rect,
    /// Opacity ramp over the overlay's lifetime.
    pub fade: OverlayFade,
}

/// Caption anchor within the canvas, in percent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CaptionPlacement {
    /// Vertical anchor.
    pub position: CaptionPosition,
    /// Distance from the anchored edge.
    ///
    /// Measured from the top edge for `Top` and `Center`, from the bottom edge for `Bottom`.
    pub offset_pct: f64,
    /// Left and right inset.
    pub inset_x_pct: f64,
}

impl CaptionPlacement {
    /// Offset from the edge for `Top` and `Bottom` captions.
    pub const EDGE_OFFSET_PCT: f64 = 8.0;
    /// Horizontal inset on both sides.
    pub const INSET_X_PCT: f64 = 10.0;

    /// Placement used for `position`.
    pub fn for_position(position: CaptionPosition) -> Self {
        let offset_pct = match position {
            CaptionPosition::Top | CaptionPosition::Bottom => Self::EDGE_OFFSET_PCT,
            CaptionPosition::Center => 50.0,
        };
        Self {
            position,
            offset_pct,
            inset_x_pct: Self::INSET_X_PCT,
        }
    }
}

/// Captions drawn over the clip section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionLayer {
    /// Styling and chunking settings.
    pub settings: CaptionSettings,
    /// Where captions are anchored.
    pub placement: CaptionPlacement,
    /// One track per segment, in segment order, with chunks in the clip's trimmed time.
    pub tracks: Vec<CaptionTrack>,
}

/// Summary slide appended after the clips.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SummaryLayer {
    /// First frame of the slide, right after the clip section.
    pub start: FrameIndex,
    /// Length of the slide in frames.
    pub duration_in_frames: i64,
    /// Items revealed one after another.
    pub items: Vec<SummaryItem>,
}

impl SummaryLayer {
    /// Timeline frames covered by the slide.
    pub fn window(&self) -> FrameRange {
        FrameRange::from_start_len(self.start, self.duration_in_frames)
    }
}

impl CompositionPlan {
    /// Resolve `project` into segment timings and layer descriptors.
    #[tracing::instrument(skip(project), fields(clips = project.clips.len()))]
    pub fn build(project: &Project) -> CutlineResult<Self> {
        project.validate()?;
        let fps = project.fps;

        let summary_secs = project.summary.enabled.then_some(project.summary.duration);
        let length = TimelineLength::measure(&project.clips, fps, summary_secs);

        let clips: Vec<_> = contributing_clips(&project.clips).collect();
        let count = clips.len();
        let mut segments = Vec::with_capacity(count);
        for (i, clip) in clips.iter().enumerate() {
            let frames = length.clips[i];
            let crossfade_in_frames = match i {
                0 => 0,
                _ => frames.crossfade_in_frames,
            };
            // Past the last segment there is nothing to fade into.
            let crossfade_out_frames = length
                .clips
                .get(i + 1)
                .map_or(0, |next| next.crossfade_in_frames);
            segments.push(ClipSegment {
                clip_id: clip.id,
                source: clip.source.clone(),
                file_path: clip.file_path.clone(),
                start: length.starts[i],
                duration_in_frames: frames.duration_in_frames,
                crossfade_in_frames,
                crossfade_out_frames,
                is_first: i == 0,
                is_last: i + 1 == count,
                source_start_frame: fps.secs_to_frames(clip.trim_start),
            });
        }

        let overlay = project
            .overlay
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|source| {
                let o = &project.overlay;
                OverlayLayer {
                    source: source.to_string(),
                    rect: project.canvas.percent_rect(o.x, o.y, o.width, o.height),
                    fade: OverlayFade::new(o.duration, o.fade_duration, fps),
                }
            });

        let captions = project.captions.enabled.then(|| {
            let tracks = clips
                .iter()
                .zip(&segments)
                .map(|(clip, seg)| {
                    let trimmed = adjust_captions_for_trim(
                        &clip.captions,
                        clip.trim_start,
                        clip.trim_end,
                        clip.natural_duration,
                    );
                    CaptionTrack {
                        clip_id: clip.id,
                        start: seg.start,
                        duration_in_frames: seg.duration_in_frames,
                        chunks: split_segments(&trimmed, project.captions.max_words),
                    }
                })
                .collect();
            CaptionLayer {
                settings: project.captions.clone(),
                placement: CaptionPlacement::for_position(project.captions.position),
                tracks,
            }
        });

        let summary = (project.summary.enabled && length.summary_frames > 0).then(|| SummaryLayer {
            start: FrameIndex(length.clip_frames),
            duration_in_frames: length.summary_frames,
            items: project.summary.items.clone(),
        });

        let plan = Self {
            target: RenderTarget {
                width: project.canvas.width,
                height: project.canvas.height,
                fps,
                total_duration_in_frames: length.total_frames(),
            },
            segments,
            clip_frames: length.clip_frames,
            overlay,
            captions,
            summary,
        };
        tracing::debug!(
            segments = plan.segments.len(),
            total_frames = plan.target.total_duration_in_frames,
            "built composition plan"
        );
        Ok(plan)
    }

    /// Length of the whole video in frames.
    pub fn total_frames(&self) -> i64 {
        self.target.total_duration_in_frames
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.target.fps
    }

    /// Range of frames covered by the clip section, where the overlay and captions live.
    pub fn clip_section(&self) -> FrameRange {
        FrameRange::from_start_len(FrameIndex::ZERO, self.clip_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/plan.rs"]
mod tests;
