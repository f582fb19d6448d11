use std::path::{Path, PathBuf};

use crate::{
    composition::plan::CompositionPlan,
    export::request::ExportRequest,
    foundation::error::{CutlineError, CutlineResult},
};

/// Overall progress when [`RenderBackend::prepare`] starts.
pub const PREPARE_START: f64 = 0.0;
/// Overall progress when [`RenderBackend::prepare`] is done.
pub const PREPARE_END: f64 = 0.2;
/// Overall progress when [`RenderBackend::render`] starts.
pub const RENDER_START: f64 = 0.2;
/// Overall progress when [`RenderBackend::render`] is done.
pub const RENDER_END: f64 = 1.0;

/// Turns a composition plan into an output file.
///
/// Both phases report their own fraction in `[0, 1]`; [`run_export`] maps
/// those into overall progress.
pub trait RenderBackend {
    /// One-time setup before frames are produced.
    fn prepare(
        &mut self,
        plan: &CompositionPlan,
        progress: &mut dyn FnMut(f64),
    ) -> CutlineResult<()>;

    /// Produce every frame of `plan` and write the result to `output`.
    fn render(
        &mut self,
        plan: &CompositionPlan,
        output: &Path,
        progress: &mut dyn FnMut(f64),
    ) -> CutlineResult<()>;
}

/// Clamped, non-decreasing overall progress fed to a caller's callback.
pub struct ProgressReporter<F: FnMut(f64)> {
    sink: F,
    last: f64,
}

impl<F: FnMut(f64)> ProgressReporter<F> {
    /// Reporter forwarding to `sink`, starting at 0.
    pub fn new(sink: F) -> Self {
        Self { sink, last: 0.0 }
    }

    /// Report `fraction` of the phase spanning `[start, end]` of overall progress.
    pub fn phase(&mut self, (start, end): (f64, f64), fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let overall = (start + (end - start) * fraction).clamp(0.0, 1.0);
        if overall < self.last {
            return;
        }
        self.last = overall;
        (self.sink)(overall);
    }

    /// Last value passed to the sink.
    pub fn last(&self) -> f64 {
        self.last
    }
}

/// What a finished export produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ExportReport {
    /// File the backend wrote.
    pub output_path: PathBuf,
    /// Frames in the exported video.
    pub total_frames: i64,
}

/// Build the plan for `request` and drive `backend` through both phases.
///
/// Any backend error is reported as [`CutlineError::Render`]. Partially
/// written output is left to the backend.
#[tracing::instrument(
    skip(request, backend, on_progress),
    fields(output = %request.output_path.display())
)]
pub fn run_export(
    request: &ExportRequest,
    backend: &mut dyn RenderBackend,
    on_progress: impl FnMut(f64),
) -> CutlineResult<ExportReport> {
    if request.output_path.as_os_str().is_empty() {
        return Err(CutlineError::validation("export output path is empty"));
    }
    let plan = request.plan()?;
    let mut reporter = ProgressReporter::new(on_progress);

    backend
        .prepare(&plan, &mut |p| {
            reporter.phase((PREPARE_START, PREPARE_END), p)
        })
        .map_err(into_render_error)?;
    backend
        .render(&plan, &request.output_path, &mut |p| {
            reporter.phase((RENDER_START, RENDER_END), p)
        })
        .map_err(into_render_error)?;
    reporter.phase((RENDER_START, RENDER_END), 1.0);

    tracing::debug!(total_frames = plan.total_frames(), "export finished");
    Ok(ExportReport {
        output_path: request.output_path.clone(),
        total_frames: plan.total_frames(),
    })
}

fn into_render_error(err: CutlineError) -> CutlineError {
    match err {
        CutlineError::Render(_) => err,
        other => CutlineError::render(other.to_string()),
    }
}

/// Export state shown next to the export action.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportStatus {
    /// No export started yet.
    #[default]
    Idle,
    /// An export is running.
    Exporting {
        /// Overall progress in `[0, 1]`.
        progress: f64,
    },
    /// The last export succeeded.
    Done {
        /// File that was written.
        output_path: PathBuf,
    },
    /// The last export failed.
    Failed {
        /// Error as shown to the user.
        message: String,
    },
}

impl ExportStatus {
    /// Final status for a finished export.
    pub fn from_result(result: &CutlineResult<ExportReport>) -> Self {
        match result {
            Ok(report) => Self::Done {
                output_path: report.output_path.clone(),
            },
            Err(e) => Self::Failed {
                message: e.to_string(),
            },
        }
    }

    /// `true` while an export is running.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Exporting { .. })
    }

    /// Short label for the export panel.
    pub fn message(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Exporting { progress } => format!("Exporting... {:.0}%", progress * 100.0),
            Self::Done { output_path } => format!("Exported to {}", output_path.display()),
            Self::Failed { message } => format!("Export failed: {message}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/backend.rs"]
mod tests;
