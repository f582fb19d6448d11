use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    composition::plan::CompositionPlan,
    eval::evaluator::Evaluator,
    export::backend::RenderBackend,
    foundation::{core::FrameIndex, error::CutlineResult},
};

/// Backend that writes every evaluated frame as one JSON line.
///
/// Useful for inspecting what a pixel renderer would be asked to draw.
#[derive(Clone, Debug)]
pub struct FrameGraphDump {
    /// Number of progress callbacks per render pass.
    pub progress_steps: u32,
}

impl FrameGraphDump {
    /// Dump backend reporting progress 20 times per pass.
    pub fn new() -> Self {
        Self { progress_steps: 20 }
    }
}

impl Default for FrameGraphDump {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for FrameGraphDump {
    fn prepare(
        &mut self,
        plan: &CompositionPlan,
        progress: &mut dyn FnMut(f64),
    ) -> CutlineResult<()> {
        tracing::debug!(
            width = plan.target.width,
            height = plan.target.height,
            frames = plan.total_frames(),
            "frame dump prepare"
        );
        progress(1.0);
        Ok(())
    }

    fn render(
        &mut self,
        plan: &CompositionPlan,
        output: &Path,
        progress: &mut dyn FnMut(f64),
    ) -> CutlineResult<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory '{}'", parent.display())
            })?;
        }
        let file = File::create(output)
            .with_context(|| format!("failed to create '{}'", output.display()))?;
        let mut out = BufWriter::new(file);

        let total = plan.total_frames();
        let step = (total / i64::from(self.progress_steps.max(1))).max(1);
        for f in 0..total {
            let graph = Evaluator::eval_frame(plan, FrameIndex(f))?;
            serde_json::to_writer(&mut out, &graph)?;
            out.write_all(b"\n")
                .with_context(|| format!("failed to write '{}'", output.display()))?;
            if (f + 1) % step == 0 {
                progress((f + 1) as f64 / total as f64);
            }
        }
        out.flush()
            .with_context(|| format!("failed to flush '{}'", output.display()))?;
        progress(1.0);
        Ok(())
    }
}
