use std::path::PathBuf;

use crate::{
    composition::model::{
        CaptionPosition, CaptionSegment, CaptionStatus, Clip, ClipId, Project, SummaryItem,
    },
    foundation::core::Fps,
    media::probe::MediaMetadata,
    state::clamp::{
        clamp_crossfade, clamp_fade_duration, clamp_font_size, clamp_overlay_duration,
        clamp_percent, clamp_summary_duration, clamp_trim,
    },
    timeline::duration::total_duration_secs,
};

/// Default emoji for a freshly added summary item.
pub const DEFAULT_SUMMARY_EMOJI: &str = "\u{2705}";

/// Trim values being edited but not yet applied to the clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TrimDraft {
    /// Clip being trimmed.
    pub clip_id: ClipId,
    /// Draft seconds removed from the start.
    pub trim_start: f64,
    /// Draft seconds removed from the end.
    pub trim_end: f64,
}

/// Editor state for one session.
///
/// Transitions go through [`reduce`], which never mutates its input.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProjectState {
    /// Committed project. Rendering and export only ever see this.
    pub project: Project,
    /// Open trim draft, at most one at a time.
    pub trim_draft: Option<TrimDraft>,
    next_clip_id: u64,
    next_summary_id: u64,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(Project::default())
    }
}

impl ProjectState {
    /// Wrap an existing project; new clip ids continue after its highest one.
    pub fn new(project: Project) -> Self {
        let next_clip_id = project.clips.iter().map(|c| c.id.0 + 1).max().unwrap_or(1);
        Self {
            project,
            trim_draft: None,
            next_clip_id,
            next_summary_id: 1,
        }
    }

    /// Id the next `AddClip` will receive.
    pub fn peek_next_clip_id(&self) -> ClipId {
        ClipId(self.next_clip_id)
    }

    /// Total timeline length in seconds, or `None` while no clip has been probed.
    pub fn timeline_secs(&self) -> Option<f64> {
        let secs = total_duration_secs(&self.project.clips);
        (secs > 0.0).then_some(secs)
    }
}

/// State transitions. Actions naming a clip id that is no longer present are no-ops.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Append a pending clip for an imported video.
    AddClip {
        /// Served locator of the video.
        source: String,
        /// Local path of the video.
        file_path: PathBuf,
    },
    /// Remove a clip, dropping its trim draft if one is open.
    RemoveClip(ClipId),
    /// Move a clip to `to_index`, clamped to the end of the list.
    MoveClip {
        /// Clip to move.
        id: ClipId,
        /// Position in the list after the move.
        to_index: usize,
    },
    /// Probed metadata arrived for a clip.
    ApplyMetadata {
        /// Probed clip.
        id: ClipId,
        /// What the probe reported.
        meta: MediaMetadata,
    },
    /// Set a clip's crossfade with the clip before it.
    SetCrossfade {
        /// Clip fading in.
        id: ClipId,
        /// Requested overlap in seconds.
        seconds: f64,
    },

    /// Open a trim draft for a clip. Ignored while another draft is open.
    BeginTrim(ClipId),
    /// Change the open draft's trims.
    UpdateTrim {
        /// Seconds removed from the start.
        trim_start: f64,
        /// Seconds removed from the end.
        trim_end: f64,
    },
    /// Apply the open draft to its clip.
    CommitTrim,
    /// Close the open draft without applying it.
    DiscardTrim,

    /// Record a clip's transcription lifecycle.
    SetCaptionStatus {
        /// Transcribed clip.
        id: ClipId,
        /// New status.
        status: CaptionStatus,
    },
    /// Store a clip's transcript and mark it done.
    SetClipCaptions {
        /// Transcribed clip.
        id: ClipId,
        /// Segments on the clip's natural timeline.
        captions: Vec<CaptionSegment>,
    },
    /// Edit the text of one transcript segment.
    UpdateCaptionText {
        /// Clip owning the segment.
        id: ClipId,
        /// Segment to edit.
        caption_id: String,
        /// Replacement text.
        text: String,
    },

    /// Use an image as the overlay.
    SetOverlay {
        /// Served locator of the image.
        source: String,
        /// Local path of the image.
        file_path: PathBuf,
    },
    /// Remove the overlay image.
    ClearOverlay,
    /// Move the overlay, in canvas percent.
    SetOverlayPosition {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
    },
    /// Resize the overlay, in canvas percent.
    SetOverlaySize {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// The overlay image's pixel size became known.
    SetOverlayNaturalSize {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// Set how long the overlay stays, in seconds.
    SetOverlayDuration(f64),
    /// Set the overlay fade-out, in seconds.
    SetFadeDuration(f64),

    /// Show or hide captions.
    SetCaptionsEnabled(bool),
    /// Set the caption font size in pixels.
    SetCaptionFontSize(f64),
    /// Set the caption color.
    SetCaptionColor(String),
    /// Set where captions are anchored.
    SetCaptionPosition(CaptionPosition),
    /// Set the maximum words per caption chunk.
    SetCaptionMaxWords(usize),

    /// Show or hide the summary slide.
    SetSummaryEnabled(bool),
    /// Append an empty summary item.
    AddSummaryItem,
    /// Remove the summary item with this id.
    RemoveSummaryItem(String),
    /// Replace a summary item's emoji and text.
    UpdateSummaryItem {
        /// Item to edit.
        id: String,
        /// New emoji.
        emoji: String,
        /// New text.
        text: String,
    },
    /// Set the summary slide duration in seconds.
    SetSummaryDuration(f64),
}

/// Apply `action` to `state`, returning the new state.
pub fn reduce(state: &ProjectState, action: Action) -> ProjectState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut ProjectState, action: Action) {
    let p = &mut state.project;
    match action {
        Action::AddClip { source, file_path } => {
            let id = ClipId(state.next_clip_id);
            state.next_clip_id += 1;
            tracing::debug!(%id, "add clip");
            p.clips.push(Clip::new(id, source, file_path));
        }
        Action::RemoveClip(id) => {
            let Some(idx) = p.clip_index(id) else {
                return ignored(id, "remove");
            };
            p.clips.remove(idx);
            if state.trim_draft.is_some_and(|d| d.clip_id == id) {
                state.trim_draft = None;
            }
            reclamp_crossfades(p);
            tracing::debug!(%id, "removed clip");
        }
        Action::MoveClip { id, to_index } => {
            let Some(from) = p.clip_index(id) else {
                return ignored(id, "move");
            };
            let clip = p.clips.remove(from);
            let to = to_index.min(p.clips.len());
            p.clips.insert(to, clip);
            reclamp_crossfades(p);
            tracing::debug!(%id, from, to, "moved clip");
        }
        Action::ApplyMetadata { id, meta } => apply_metadata(state, id, meta),
        Action::SetCrossfade { id, seconds } => {
            let Some(idx) = p.clip_index(id) else {
                return ignored(id, "crossfade");
            };
            let prev = prev_known_effective(&p.clips, idx);
            let this = known_effective(&p.clips[idx]);
            p.clips[idx].crossfade_duration = clamp_crossfade(seconds, prev, this);
        }

        Action::BeginTrim(id) => {
            if let Some(draft) = state.trim_draft {
                tracing::debug!(
                    pending = %draft.clip_id,
                    requested = %id,
                    "trim draft already open"
                );
                return;
            }
            let Some(clip) = p.clip(id) else {
                return ignored(id, "begin trim");
            };
            state.trim_draft = Some(TrimDraft {
                clip_id: id,
                trim_start: clip.trim_start,
                trim_end: clip.trim_end,
            });
        }
        Action::UpdateTrim {
            trim_start,
            trim_end,
        } => {
            let Some(draft) = state.trim_draft.as_mut() else {
                return;
            };
            let natural = p.clip(draft.clip_id).map_or(0.0, |c| c.natural_duration);
            (draft.trim_start, draft.trim_end) = clamp_trim(natural, trim_start, trim_end);
        }
        Action::CommitTrim => {
            let Some(draft) = state.trim_draft.take() else {
                return;
            };
            let Some(idx) = p.clip_index(draft.clip_id) else {
                return ignored(draft.clip_id, "commit trim");
            };
            let clip = &mut p.clips[idx];
            (clip.trim_start, clip.trim_end) =
                clamp_trim(clip.natural_duration, draft.trim_start, draft.trim_end);
            tracing::debug!(
                id = %draft.clip_id,
                trim_start = clip.trim_start,
                trim_end = clip.trim_end,
                "committed trim"
            );
            reclamp_crossfades(p);
        }
        Action::DiscardTrim => {
            state.trim_draft = None;
        }

        Action::SetCaptionStatus { id, status } => {
            let Some(idx) = p.clip_index(id) else {
                return ignored(id, "caption status");
            };
            p.clips[idx].caption_status = status;
        }
        Action::SetClipCaptions { id, captions } => {
            let Some(idx) = p.clip_index(id) else {
                return ignored(id, "captions");
            };
            let clip = &mut p.clips[idx];
            clip.captions = captions;
            clip.caption_status = CaptionStatus::Done;
        }
        Action::UpdateCaptionText {
            id,
            caption_id,
            text,
        } => {
            let Some(idx) = p.clip_index(id) else {
                return ignored(id, "caption text");
            };
            let captions = &mut p.clips[idx].captions;
            if let Some(seg) = captions.iter_mut().find(|s| s.id == caption_id) {
                seg.text = text;
            }
        }

        Action::SetOverlay { source, file_path } => {
            p.overlay.source = Some(source);
            p.overlay.file_path = Some(file_path);
        }
        Action::ClearOverlay => {
            p.overlay.source = None;
            p.overlay.file_path = None;
        }
        Action::SetOverlayPosition { x, y } => {
            p.overlay.x = clamp_percent(x);
            p.overlay.y = clamp_percent(y);
        }
        Action::SetOverlaySize { width, height } => {
            let (width, height) = (clamp_percent(width), clamp_percent(height));
            p.overlay.width = width;
            p.overlay.height = height;
            if width > 0.0 {
                p.overlay.aspect = height / width;
            }
        }
        Action::SetOverlayNaturalSize { width, height } => {
            if width == 0 || height == 0 {
                tracing::warn!(width, height, "ignoring empty overlay image size");
                return;
            }
            let width_pct = 100.0;
            let height_pct =
                width_pct * (f64::from(height) / f64::from(width)) * p.canvas.aspect();
            p.overlay.x = 0.0;
            p.overlay.y = 0.0;
            p.overlay.width = width_pct;
            p.overlay.height = height_pct;
            p.overlay.aspect = height_pct / width_pct;
        }
        Action::SetOverlayDuration(seconds) => {
            let timeline = state.timeline_secs();
            let p = &mut state.project;
            p.overlay.duration = clamp_overlay_duration(seconds, timeline);
            p.overlay.fade_duration =
                clamp_fade_duration(p.overlay.fade_duration, p.overlay.duration);
        }
        Action::SetFadeDuration(seconds) => {
            p.overlay.fade_duration = clamp_fade_duration(seconds, p.overlay.duration);
        }

        Action::SetCaptionsEnabled(enabled) => p.captions.enabled = enabled,
        Action::SetCaptionFontSize(size) => p.captions.font_size = clamp_font_size(size),
        Action::SetCaptionColor(color) => p.captions.color = color,
        Action::SetCaptionPosition(position) => p.captions.position = position,
        Action::SetCaptionMaxWords(n) => p.captions.max_words = n.max(1),

        Action::SetSummaryEnabled(enabled) => p.summary.enabled = enabled,
        Action::AddSummaryItem => {
            let id = format!("summary-{}", state.next_summary_id);
            state.next_summary_id += 1;
            state.project.summary.items.push(SummaryItem {
                id,
                emoji: DEFAULT_SUMMARY_EMOJI.to_string(),
                text: String::new(),
            });
        }
        Action::RemoveSummaryItem(id) => p.summary.items.retain(|i| i.id != id),
        Action::UpdateSummaryItem { id, emoji, text } => {
            if let Some(item) = p.summary.items.iter_mut().find(|i| i.id == id) {
                item.emoji = emoji;
                item.text = text;
            }
        }
        Action::SetSummaryDuration(seconds) => {
            p.summary.duration = clamp_summary_duration(seconds);
        }
    }
}

fn apply_metadata(state: &mut ProjectState, id: ClipId, meta: MediaMetadata) {
    if let Err(err) = meta.validate() {
        tracing::warn!(%id, %err, "ignoring invalid media metadata");
        return;
    }
    let p = &mut state.project;
    let Some(idx) = p.clip_index(id) else {
        return ignored(id, "metadata");
    };

    let clip = &mut p.clips[idx];
    clip.natural_duration = meta.duration_seconds;
    (clip.trim_start, clip.trim_end) =
        clamp_trim(clip.natural_duration, clip.trim_start, clip.trim_end);

    if idx == 0 && !p.format_locked {
        if let Ok(fps) = Fps::new(meta.fps) {
            p.fps = fps;
            p.canvas = meta.canvas();
            p.format_locked = true;
            tracing::debug!(
                fps = meta.fps,
                width = meta.width,
                height = meta.height,
                "locked output format"
            );
        }
    }
    reclamp_crossfades(p);

    if let Some(timeline) = state.timeline_secs() {
        let o = &mut state.project.overlay;
        o.duration = clamp_overlay_duration(o.duration, Some(timeline));
        o.fade_duration = clamp_fade_duration(o.fade_duration, o.duration);
    }
}

fn known_effective(clip: &Clip) -> Option<f64> {
    (!clip.is_pending()).then(|| clip.effective_duration())
}

// Pending clips are off the timeline, so the clip a crossfade overlaps is the
// nearest earlier clip whose duration is known.
fn prev_known_effective(clips: &[Clip], idx: usize) -> Option<f64> {
    clips[..idx].iter().rev().find_map(known_effective)
}

// Durations changed or neighbours moved: keep every crossfade within bounds.
fn reclamp_crossfades(p: &mut Project) {
    for i in 0..p.clips.len() {
        let prev = prev_known_effective(&p.clips, i);
        let this = known_effective(&p.clips[i]);
        let clamped = clamp_crossfade(p.clips[i].crossfade_duration, prev, this);
        p.clips[i].crossfade_duration = clamped;
    }
}

fn ignored(id: ClipId, what: &str) {
    tracing::warn!(%id, what, "ignoring action for unknown clip");
}

#[cfg(test)]
#[path = "../../tests/unit/state/reducer.rs"]
mod tests;
