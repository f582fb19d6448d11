//! Cutline composes short videos from an ordered list of clips.
//!
//! Clips are trimmed and crossfaded on one master timeline, optionally topped
//! with a fading image overlay and word-chunked captions, and followed by a
//! summary slide. The public API is plan-oriented:
//!
//! - Edit a [`Project`] through [`reduce`] or an [`EditorSession`]
//! - Build a [`CompositionPlan`] from it
//! - Evaluate single frames with [`Evaluator`], or hand the plan to a [`RenderBackend`]
//!
//! Preview and export share the same plan builder, so both draw identical frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod captions;
pub(crate) mod composition;
pub(crate) mod effects;
pub(crate) mod eval;
pub(crate) mod export;
pub(crate) mod media;
/// Editing session tying state, media, transcription and export together.
pub mod session;
pub(crate) mod state;
pub(crate) mod timeline;
pub(crate) mod transcribe;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{CutlineError, CutlineResult};
pub use crate::foundation::math::interpolate_clamped;

pub use crate::captions::resolve::{
    CaptionTrack, active_caption, active_chunk, current_track, transcript_seek_frame,
};
pub use crate::captions::search::{TranscriptMatch, active_segment_index, search_transcript};
pub use crate::captions::split::{CaptionChunk, split_segment, split_segments};
pub use crate::captions::trim::adjust_captions_for_trim;
pub use crate::captions::whisper::{parse_timestamp, parse_transcript};
pub use crate::composition::model::{
    CaptionPosition, CaptionSegment, CaptionSettings, CaptionStatus, Clip, ClipId,
    MIN_CLIP_DURATION, OverlaySettings, Project, SummaryItem, SummarySettings,
};
pub use crate::composition::plan::{
    CaptionLayer, CaptionPlacement, ClipSegment, CompositionPlan, OverlayLayer, RenderTarget,
    SummaryLayer,
};
pub use crate::effects::fade::{
    ClipFade, OverlayFade, SummaryReveal, overlay_opacity, summary_item_reveal,
};
pub use crate::eval::evaluator::{
    CaptionNode, ClipLayer, Evaluator, FrameGraph, Layer, OverlayNode, SummaryItemNode,
    SummaryNode,
};
pub use crate::export::backend::{
    ExportReport, ExportStatus, ProgressReporter, RenderBackend, run_export,
};
pub use crate::export::dump::FrameGraphDump;
pub use crate::export::request::{ClipCaptions, ExportClip, ExportRequest};
pub use crate::media::probe::MediaMetadata;
pub use crate::media::registry::{ByteRange, MediaRegistry, mime_type};
pub use crate::session::EditorSession;
pub use crate::state::clamp::{
    clamp_crossfade, clamp_fade_duration, clamp_font_size, clamp_overlay_duration,
    clamp_percent, clamp_summary_duration, clamp_trim,
};
pub use crate::state::reducer::{Action, ProjectState, TrimDraft, reduce};
pub use crate::timeline::duration::{TimelineLength, clip_frames, total_duration_secs};
pub use crate::timeline::starts::{ClipFrames, compute_clip_starts, total_clip_frames};
pub use crate::transcribe::command::WhisperCommand;
pub use crate::transcribe::queue::{
    TranscriptionOutcome, TranscriptionQueue, TranscriptionRequest, TranscriptionService,
};
