use std::path::{Path, PathBuf};

use crate::{
    captions::{resolve::transcript_seek_frame, trim::adjust_captions_for_trim},
    composition::{
        model::{ClipId, Project},
        plan::CompositionPlan,
    },
    eval::evaluator::{Evaluator, FrameGraph},
    export::{
        backend::{ExportReport, ExportStatus, RenderBackend, run_export},
        request::ExportRequest,
    },
    foundation::{core::FrameIndex, error::CutlineResult},
    media::{probe::MediaMetadata, registry::MediaRegistry},
    state::reducer::{Action, ProjectState, reduce},
    transcribe::queue::{
        TranscriptionOutcome, TranscriptionQueue, TranscriptionRequest, TranscriptionService,
    },
};

/// One editing session: project state plus the collaborators it owns.
///
/// Preview and export both go through [`CompositionPlan`], so a frame looks the
/// same in either path.
pub struct EditorSession {
    state: ProjectState,
    registry: MediaRegistry,
    transcriptions: TranscriptionQueue,
    export_status: ExportStatus,
    plan: Option<CompositionPlan>,
}

impl EditorSession {
    /// `port` is where the media file server listens; `seed` feeds token generation.
    pub fn new(port: u16, seed: u64) -> Self {
        Self {
            state: ProjectState::default(),
            registry: MediaRegistry::new(port, seed),
            transcriptions: TranscriptionQueue::new(),
            export_status: ExportStatus::Idle,
            plan: None,
        }
    }

    /// Current editor state, trim draft included.
    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    /// Committed project.
    pub fn project(&self) -> &Project {
        &self.state.project
    }

    /// Media registered in this session.
    pub fn registry(&self) -> &MediaRegistry {
        &self.registry
    }

    /// Outcome of the last export, or its progress while running.
    pub fn export_status(&self) -> &ExportStatus {
        &self.export_status
    }

    /// Apply one action. The cached plan is dropped when the project changes.
    pub fn dispatch(&mut self, action: Action) -> &ProjectState {
        let next = reduce(&self.state, action);
        if next.project != self.state.project {
            self.plan = None;
        }
        self.state = next;
        &self.state
    }

    /// Register a video file and append it as a new (pending) clip.
    pub fn import_clip(&mut self, file_path: impl AsRef<Path>) -> ClipId {
        let file_path = file_path.as_ref();
        let source = self.registry.register(file_path);
        let id = self.state.peek_next_clip_id();
        self.dispatch(Action::AddClip {
            source,
            file_path: file_path.to_path_buf(),
        });
        id
    }

    /// Register an overlay image; sizes it to the canvas width when its pixel size is known.
    pub fn set_overlay_image(
        &mut self,
        file_path: impl AsRef<Path>,
        natural_size: Option<(u32, u32)>,
    ) {
        let file_path = file_path.as_ref();
        let source = self.registry.register(file_path);
        self.dispatch(Action::SetOverlay {
            source,
            file_path: file_path.to_path_buf(),
        });
        if let Some((width, height)) = natural_size {
            self.dispatch(Action::SetOverlayNaturalSize { width, height });
        }
    }

    /// Feed a clip's probe result back into the project.
    pub fn apply_metadata(&mut self, id: ClipId, meta: MediaMetadata) {
        self.dispatch(Action::ApplyMetadata { id, meta });
    }

    /// Composition plan for the committed project, rebuilt only after edits.
    pub fn plan(&mut self) -> CutlineResult<&CompositionPlan> {
        let plan = match self.plan.take() {
            Some(plan) => plan,
            None => CompositionPlan::build(&self.state.project)?,
        };
        Ok(&*self.plan.insert(plan))
    }

    /// Evaluate one frame for the live preview.
    pub fn preview_frame(&mut self, frame: FrameIndex) -> CutlineResult<FrameGraph> {
        let plan = self.plan()?;
        Evaluator::eval_frame(plan, frame)
    }

    /// Timeline frame where a transcript segment of `clip` begins.
    ///
    /// Returns `None` if the clip is not on the timeline or the segment is
    /// unknown or cut away by the clip's trim.
    pub fn transcript_seek(
        &mut self,
        clip: ClipId,
        segment_id: &str,
    ) -> CutlineResult<Option<FrameIndex>> {
        let Some(c) = self.state.project.clip(clip).cloned() else {
            return Ok(None);
        };
        let plan = self.plan()?;
        let Some(seg) = plan.segments.iter().find(|s| s.clip_id == clip) else {
            return Ok(None);
        };
        let trimmed =
            adjust_captions_for_trim(&c.captions, c.trim_start, c.trim_end, c.natural_duration);
        Ok(trimmed
            .iter()
            .find(|s| s.id == segment_id)
            .map(|s| transcript_seek_frame(seg.start, s.start, plan.fps())))
    }

    /// Claim clips needing transcription and mark them as in progress.
    pub fn start_transcriptions(&mut self) -> Vec<TranscriptionRequest> {
        let requests = self.transcriptions.next_requests(&self.state);
        for r in &requests {
            self.dispatch(r.started());
        }
        requests
    }

    /// Record a transcription result. Results for removed clips and duplicates are dropped.
    pub fn finish_transcription(&mut self, id: ClipId, outcome: TranscriptionOutcome) {
        if let Some(action) = self.transcriptions.complete(&self.state, id, outcome) {
            self.dispatch(action);
        }
    }

    /// Run every due transcription through `service`, one after another.
    pub fn transcribe_pending(&mut self, service: &mut dyn TranscriptionService) -> usize {
        let requests = self.start_transcriptions();
        for r in &requests {
            let outcome = service.transcribe(&r.file_path);
            self.finish_transcription(r.clip_id, outcome);
        }
        requests.len()
    }

    /// Snapshot the committed project as an export request.
    pub fn export_request(&self, output_path: impl Into<PathBuf>) -> ExportRequest {
        ExportRequest::from_project(&self.state.project, output_path)
    }

    /// Export the committed project. The outcome is kept in [`EditorSession::export_status`].
    pub fn export(
        &mut self,
        output_path: impl Into<PathBuf>,
        backend: &mut dyn RenderBackend,
        mut on_progress: impl FnMut(f64),
    ) -> CutlineResult<ExportReport> {
        let request = self.export_request(output_path);
        self.export_status = ExportStatus::Exporting { progress: 0.0 };
        let status = &mut self.export_status;
        let result = run_export(&request, backend, |p| {
            *status = ExportStatus::Exporting { progress: p };
            on_progress(p);
        });
        self.export_status = ExportStatus::from_result(&result);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "export failed");
        }
        result
    }

    /// End the session: media locators stop resolving.
    pub fn teardown(&mut self) {
        self.registry.teardown();
        self.plan = None;
    }
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
