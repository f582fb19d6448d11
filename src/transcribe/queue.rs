use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use crate::{
    composition::model::{CaptionSegment, CaptionStatus, ClipId},
    state::reducer::{Action, ProjectState},
};

/// One clip to transcribe.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TranscriptionRequest {
    /// Clip to transcribe.
    pub clip_id: ClipId,
    /// Local media path handed to the service.
    pub file_path: PathBuf,
}

impl TranscriptionRequest {
    /// Action marking the clip as in progress.
    pub fn started(&self) -> Action {
        Action::SetCaptionStatus {
            id: self.clip_id,
            status: CaptionStatus::Transcribing,
        }
    }
}

/// Result of one transcription call.
///
/// On the wire this is `{"success": true, "segments": [...]}` or
/// `{"success": false, "error": "..."}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "OutcomeWire", into = "OutcomeWire")]
pub enum TranscriptionOutcome {
    /// Segments on the clip's natural timeline.
    Success(Vec<CaptionSegment>),
    /// Error message from the service.
    Failure(String),
}

#[derive(serde::Serialize, serde::Deserialize)]
struct OutcomeWire {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    segments: Option<Vec<CaptionSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TryFrom<OutcomeWire> for TranscriptionOutcome {
    type Error = String;

    fn try_from(w: OutcomeWire) -> Result<Self, Self::Error> {
        if w.success {
            Ok(Self::Success(w.segments.unwrap_or_default()))
        } else {
            let msg = "failed transcription outcome is missing 'error'";
            w.error.map(Self::Failure).ok_or_else(|| msg.to_string())
        }
    }
}

impl From<TranscriptionOutcome> for OutcomeWire {
    fn from(o: TranscriptionOutcome) -> Self {
        match o {
            TranscriptionOutcome::Success(segments) => Self {
                success: true,
                segments: Some(segments),
                error: None,
            },
            TranscriptionOutcome::Failure(error) => Self {
                success: false,
                segments: None,
                error: Some(error),
            },
        }
    }
}

/// Speech-to-text collaborator. Segment times are relative to the untrimmed media.
pub trait TranscriptionService {
    /// Transcribe the media at `file_path`. Failures are part of the outcome.
    fn transcribe(&mut self, file_path: &Path) -> TranscriptionOutcome;
}

/// Tracks which clips have a transcription in flight.
///
/// A clip is requested at most once while its request is outstanding, and only
/// while its status is idle, so finished or failed clips are never retried.
#[derive(Clone, Debug, Default)]
pub struct TranscriptionQueue {
    in_flight: BTreeSet<ClipId>,
}

impl TranscriptionQueue {
    /// Queue with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a request for `id` is outstanding.
    pub fn is_in_flight(&self, id: ClipId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Number of outstanding requests.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Claim every clip that should be transcribed now.
    ///
    /// Nothing is requested while captions are disabled. Clips still waiting for
    /// metadata are skipped until their duration is known.
    pub fn next_requests(&mut self, state: &ProjectState) -> Vec<TranscriptionRequest> {
        if !state.project.captions.enabled {
            return Vec::new();
        }
        let mut out = Vec::new();
        for clip in &state.project.clips {
            if clip.caption_status != CaptionStatus::Idle
                || clip.is_pending()
                || self.in_flight.contains(&clip.id)
            {
                continue;
            }
            self.in_flight.insert(clip.id);
            out.push(TranscriptionRequest {
                clip_id: clip.id,
                file_path: clip.file_path.clone(),
            });
        }
        if !out.is_empty() {
            tracing::debug!(count = out.len(), "queued transcriptions");
        }
        out
    }

    /// Release `id` and turn its outcome into a state action.
    ///
    /// Returns `None` when the clip has been removed in the meantime, or when
    /// `id` has no request outstanding (a duplicate or stale result).
    pub fn complete(
        &mut self,
        state: &ProjectState,
        id: ClipId,
        outcome: TranscriptionOutcome,
    ) -> Option<Action> {
        if !self.in_flight.remove(&id) {
            tracing::warn!(%id, "dropping transcription result with no request in flight");
            return None;
        }
        if state.project.clip(id).is_none() {
            tracing::warn!(%id, "dropping transcription for removed clip");
            return None;
        }
        match outcome {
            TranscriptionOutcome::Success(captions) => {
                tracing::debug!(%id, segments = captions.len(), "transcription done");
                Some(Action::SetClipCaptions { id, captions })
            }
            TranscriptionOutcome::Failure(error) => {
                tracing::warn!(%id, %error, "transcription failed");
                Some(Action::SetCaptionStatus {
                    id,
                    status: CaptionStatus::Error,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcribe/queue.rs"]
mod tests;
