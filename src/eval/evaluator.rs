use crate::{
    captions::resolve::{active_chunk, current_track},
    composition::{
        model::ClipId,
        plan::{CaptionPlacement, CompositionPlan},
    },
    effects::fade::summary_item_reveal,
    foundation::{
        core::FrameIndex,
        error::{CutlineError, CutlineResult},
    },
};

/// Everything visible at one frame, back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameGraph {
    /// Timeline frame this graph was evaluated at.
    pub frame: FrameIndex,
    /// Visible layers, bottom first.
    pub layers: Vec<Layer>,
}

impl FrameGraph {
    /// Clip layers in timeline order; two of them during a crossfade.
    pub fn clip_layers(&self) -> impl Iterator<Item = &ClipLayer> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Clip(c) => Some(c),
            _ => None,
        })
    }

    /// The overlay, if visible at this frame.
    pub fn overlay(&self) -> Option<&OverlayNode> {
        self.layers.iter().find_map(|l| match l {
            Layer::Overlay(o) => Some(o),
            _ => None,
        })
    }

    /// The caption chunk on screen, if any.
    pub fn caption(&self) -> Option<&CaptionNode> {
        self.layers.iter().find_map(|l| match l {
            Layer::Caption(c) => Some(c),
            _ => None,
        })
    }

    /// The summary slide, if this frame is past the clips.
    pub fn summary(&self) -> Option<&SummaryNode> {
        self.layers.iter().find_map(|l| match l {
            Layer::Summary(s) => Some(s),
            _ => None,
        })
    }
}

/// One drawable element of a [`FrameGraph`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    /// A frame of a clip's video.
    Clip(ClipLayer),
    /// The overlay image.
    Overlay(OverlayNode),
    /// The active caption chunk.
    Caption(CaptionNode),
    /// The summary slide.
    Summary(SummaryNode),
}

/// A clip's video at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipLayer {
    /// Clip being shown.
    pub clip_id: ClipId,
    /// Served locator of the clip's media.
    pub source: String,
    /// Frame within the segment.
    pub local_frame: i64,
    /// Frame within the source media, trim offset included.
    pub source_frame: i64,
    /// Crossfade opacity in `[0, 1]`.
    pub opacity: f64,
}

/// The overlay image at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayNode {
    /// Served locator of the image.
    pub source: String,
    /// Placement in canvas pixels.
    pub rect: kurbo::Rect,
    /// Fade opacity, always above 0.
    pub opacity: f64,
}

/// The caption chunk on screen.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionNode {
    /// Clip whose transcript the chunk comes from.
    pub clip_id: ClipId,
    /// Chunk text.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// CSS color string.
    pub color: String,
    /// Anchor within the canvas.
    pub placement: CaptionPlacement,
}

/// The summary slide at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SummaryNode {
    /// Frame within the slide.
    pub local_frame: i64,
    /// Items in list order, each with its own reveal state.
    pub items: Vec<SummaryItemNode>,
}

/// One summary item mid-reveal.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SummaryItemNode {
    /// Item id.
    pub id: String,
    /// Leading emoji.
    pub emoji: String,
    /// Item text.
    pub text: String,
    /// Reveal opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical slide offset in pixels; 0 once fully revealed.
    pub translate_y: f64,
}

/// Stateless per-frame evaluator over a [`CompositionPlan`].
pub struct Evaluator;

impl Evaluator {
    /// Evaluate `plan` at `frame`.
    ///
    /// Preview and export both call this; the result depends only on the plan
    /// and the frame.
    #[tracing::instrument(skip(plan))]
    pub fn eval_frame(plan: &CompositionPlan, frame: FrameIndex) -> CutlineResult<FrameGraph> {
        if frame.0 < 0 || frame.0 >= plan.total_frames() {
            return Err(CutlineError::evaluation(format!(
                "frame {} is out of bounds (total {})",
                frame.0,
                plan.total_frames()
            )));
        }

        let mut layers = Vec::new();

        for seg in &plan.segments {
            let Some(local) = seg.window().local(frame) else {
                continue;
            };
            layers.push(Layer::Clip(ClipLayer {
                clip_id: seg.clip_id,
                source: seg.source.clone(),
                local_frame: local,
                source_frame: seg.source_start_frame.saturating_add(local),
                opacity: seg.fade().opacity_at(local),
            }));
        }

        if plan.clip_section().contains(frame) {
            if let Some(overlay) = &plan.overlay {
                let opacity = overlay.fade.opacity_at(frame);
                if opacity > 0.0 {
                    layers.push(Layer::Overlay(OverlayNode {
                        source: overlay.source.clone(),
                        rect: overlay.rect,
                        opacity,
                    }));
                }
            }

            if let Some(captions) = &plan.captions {
                let active = current_track(frame, &captions.tracks).and_then(|track| {
                    active_chunk(
                        frame,
                        track.start,
                        track.duration_in_frames,
                        &track.chunks,
                        plan.fps(),
                    )
                    .map(|text| (track, text))
                });
                if let Some((track, text)) = active {
                    layers.push(Layer::Caption(CaptionNode {
                        clip_id: track.clip_id,
                        text: text.to_string(),
                        font_size: captions.settings.font_size,
                        color: captions.settings.color.clone(),
                        placement: captions.placement,
                    }));
                }
            }
        }

        if let Some(summary) = &plan.summary {
            if let Some(local) = summary.window().local(frame) {
                let items = summary
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let reveal = summary_item_reveal(local, i);
                        SummaryItemNode {
                            id: item.id.clone(),
                            emoji: item.emoji.clone(),
                            text: item.text.clone(),
                            opacity: reveal.opacity,
                            translate_y: reveal.translate_y,
                        }
                    })
                    .collect();
                layers.push(Layer::Summary(SummaryNode {
                    local_frame: local,
                    items,
                }));
            }
        }

        Ok(FrameGraph { frame, layers })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
