use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    composition::{
        model::{
            CaptionSegment, CaptionSettings, Clip, ClipId, OverlaySettings, Project, SummaryItem,
            SummarySettings,
        },
        plan::CompositionPlan,
    },
    foundation::{
        core::{Canvas, Fps},
        error::CutlineResult,
    },
    timeline::duration::contributing_clips,
};

/// One clip as handed to the exporter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportClip {
    /// Clip identity, used to match captions.
    pub id: ClipId,
    /// Served locator of the clip's media.
    pub src: String,
    /// Local path of the clip's media.
    #[serde(default)]
    pub file_path: PathBuf,
    /// Natural (untrimmed) duration in seconds.
    pub duration: f64,
    /// Overlap with the previous clip in seconds.
    #[serde(default)]
    pub crossfade_duration: f64,
    /// Seconds removed from the start.
    #[serde(default)]
    pub trim_start: f64,
    /// Seconds removed from the end.
    #[serde(default)]
    pub trim_end: f64,
}

/// Untrimmed transcript of one clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipCaptions {
    /// Clip the transcript belongs to.
    pub clip_id: ClipId,
    /// Segments on the clip's natural timeline.
    pub captions: Vec<CaptionSegment>,
}

/// Everything an export needs, as one serializable value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Clips in timeline order; pending ones are skipped.
    pub clips: Vec<ExportClip>,
    /// Overlay locator; empty for no overlay.
    #[serde(default)]
    pub overlay_src: String,
    /// Overlay left edge in canvas percent.
    #[serde(default)]
    pub overlay_x: f64,
    /// Overlay top edge in canvas percent.
    #[serde(default)]
    pub overlay_y: f64,
    /// Overlay width in canvas percent.
    #[serde(default = "full_percent")]
    pub overlay_width: f64,
    /// Overlay height in canvas percent.
    #[serde(default = "full_percent")]
    pub overlay_height: f64,
    /// How long the overlay stays, in seconds.
    #[serde(default = "default_overlay_duration")]
    pub overlay_duration: f64,
    /// Overlay fade-out in seconds.
    #[serde(default = "default_fade_duration")]
    pub fade_duration: f64,
    /// Output width in pixels.
    pub video_width: u32,
    /// Output height in pixels.
    pub video_height: u32,
    /// Output frame rate.
    pub fps: f64,
    /// Where the backend writes the result.
    #[serde(default)]
    pub output_path: PathBuf,
    /// Append the summary slide.
    #[serde(default)]
    pub summary_enabled: bool,
    /// Summary slide items.
    #[serde(default)]
    pub summary_items: Vec<SummaryItem>,
    /// Summary slide length in seconds.
    #[serde(default = "default_summary_duration")]
    pub summary_duration: f64,
    /// Caption styling; disabled captions are not drawn.
    #[serde(default)]
    pub caption_settings: CaptionSettings,
    /// Transcripts per clip.
    #[serde(default)]
    pub clip_captions: Vec<ClipCaptions>,
}

fn full_percent() -> f64 {
    100.0
}

fn default_overlay_duration() -> f64 {
    OverlaySettings::default().duration
}

fn default_fade_duration() -> f64 {
    OverlaySettings::default().fade_duration
}

fn default_summary_duration() -> f64 {
    SummarySettings::default().duration
}

impl ExportRequest {
    /// Snapshot `project` for export to `output_path`. Clips still waiting for
    /// metadata are left out.
    pub fn from_project(project: &Project, output_path: impl Into<PathBuf>) -> Self {
        let clips: Vec<&Clip> = contributing_clips(&project.clips).collect();
        let o = &project.overlay;
        Self {
            clips: clips
                .iter()
                .map(|c| ExportClip {
                    id: c.id,
                    src: c.source.clone(),
                    file_path: c.file_path.clone(),
                    duration: c.natural_duration,
                    crossfade_duration: c.crossfade_duration,
                    trim_start: c.trim_start,
                    trim_end: c.trim_end,
                })
                .collect(),
            overlay_src: o.source.clone().unwrap_or_default(),
            overlay_x: o.x,
            overlay_y: o.y,
            overlay_width: o.width,
            overlay_height: o.height,
            overlay_duration: o.duration,
            fade_duration: o.fade_duration,
            video_width: project.canvas.width,
            video_height: project.canvas.height,
            fps: project.fps.as_f64(),
            output_path: output_path.into(),
            summary_enabled: project.summary.enabled,
            summary_items: project.summary.items.clone(),
            summary_duration: project.summary.duration,
            caption_settings: project.captions.clone(),
            clip_captions: clips
                .iter()
                .filter(|c| !c.captions.is_empty())
                .map(|c| ClipCaptions {
                    clip_id: c.id,
                    captions: c.captions.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild the project this request describes.
    pub fn to_project(&self) -> CutlineResult<Project> {
        let fps = Fps::new(self.fps)?;
        let canvas = Canvas {
            width: self.video_width,
            height: self.video_height,
        };
        canvas.validate()?;

        let mut captions: BTreeMap<ClipId, &[CaptionSegment]> = BTreeMap::new();
        for cc in &self.clip_captions {
            captions.insert(cc.clip_id, &cc.captions);
        }

        let clips = self
            .clips
            .iter()
            .map(|c| {
                let mut clip = Clip::new(c.id, c.src.clone(), c.file_path.clone());
                clip.natural_duration = c.duration;
                clip.trim_start = c.trim_start;
                clip.trim_end = c.trim_end;
                clip.crossfade_duration = c.crossfade_duration;
                if let Some(segs) = captions.get(&c.id) {
                    clip.captions = segs.to_vec();
                }
                clip
            })
            .collect();

        let overlay = OverlaySettings {
            source: (!self.overlay_src.is_empty()).then(|| self.overlay_src.clone()),
            file_path: None,
            x: self.overlay_x,
            y: self.overlay_y,
            width: self.overlay_width,
            height: self.overlay_height,
            aspect: if self.overlay_width > 0.0 {
                self.overlay_height / self.overlay_width
            } else {
                1.0
            },
            duration: self.overlay_duration,
            fade_duration: self.fade_duration,
        };

        let project = Project {
            clips,
            overlay,
            captions: self.caption_settings.clone(),
            summary: SummarySettings {
                enabled: self.summary_enabled,
                items: self.summary_items.clone(),
                duration: self.summary_duration,
            },
            fps,
            canvas,
            format_locked: true,
        };
        project.validate()?;
        Ok(project)
    }

    /// Composition plan for this request; same builder as the live preview.
    pub fn plan(&self) -> CutlineResult<CompositionPlan> {
        CompositionPlan::build(&self.to_project()?)
    }

    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> CutlineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> CutlineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/request.rs"]
mod tests;
