use super::*;
use crate::export::request::ExportClip;

fn request(output: &str) -> ExportRequest {
    ExportRequest {
        clips: vec![
            ExportClip {
                id: crate::composition::model::ClipId(1),
                src: "media://a".into(),
                file_path: "/v/a.mp4".into(),
                duration: 4.0,
                crossfade_duration: 0.0,
                trim_start: 0.0,
                trim_end: 0.0,
            },
            ExportClip {
                id: crate::composition::model::ClipId(2),
                src: "media://b".into(),
                file_path: "/v/b.mp4".into(),
                duration: 6.0,
                crossfade_duration: 1.0,
                trim_start: 0.0,
                trim_end: 0.0,
            },
        ],
        overlay_src: String::new(),
        overlay_x: 0.0,
        overlay_y: 0.0,
        overlay_width: 100.0,
        overlay_height: 100.0,
        overlay_duration: 5.0,
        fade_duration: 1.0,
        video_width: 640,
        video_height: 360,
        fps: 30.0,
        output_path: output.into(),
        summary_enabled: false,
        summary_items: Vec::new(),
        summary_duration: 5.0,
        caption_settings: Default::default(),
        clip_captions: Vec::new(),
    }
}

/// Backend that replays scripted progress values.
struct Scripted {
    prepare: Vec<f64>,
    render: Vec<f64>,
    fail_render: bool,
    seen_frames: i64,
}

impl RenderBackend for Scripted {
    fn prepare(&mut self, _: &CompositionPlan, progress: &mut dyn FnMut(f64)) -> CutlineResult<()> {
        for p in &self.prepare {
            progress(*p);
        }
        Ok(())
    }

    fn render(
        &mut self,
        plan: &CompositionPlan,
        _: &Path,
        progress: &mut dyn FnMut(f64),
    ) -> CutlineResult<()> {
        self.seen_frames = plan.total_frames();
        for p in &self.render {
            progress(*p);
        }
        if self.fail_render {
            return Err(CutlineError::evaluation("decoder exploded"));
        }
        Ok(())
    }
}

#[test]
fn progress_is_phase_mapped() {
    let mut backend = Scripted {
        prepare: vec![0.0, 0.5, 1.0],
        render: vec![0.0, 0.5, 1.0],
        fail_render: false,
        seen_frames: 0,
    };
    let mut seen = Vec::new();
    let report = run_export(&request("/out.mp4"), &mut backend, |p| seen.push(p)).unwrap();
    assert_eq!(report.total_frames, 270);
    assert_eq!(backend.seen_frames, 270);
    let expected = [0.0, 0.1, 0.2, 0.2, 0.6, 1.0, 1.0];
    assert_eq!(seen.len(), expected.len());
    for (got, want) in seen.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{seen:?}");
    }
}

#[test]
fn progress_is_clamped_and_never_decreases() {
    let mut backend = Scripted {
        prepare: vec![2.0, -1.0, f64::NAN],
        render: vec![0.5, 0.25, 3.0],
        fail_render: false,
        seen_frames: 0,
    };
    let mut seen = Vec::new();
    run_export(&request("/out.mp4"), &mut backend, |p| seen.push(p)).unwrap();
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last(), Some(&1.0));
}

#[test]
fn backend_failure_becomes_render_error() {
    let mut backend = Scripted {
        prepare: vec![1.0],
        render: vec![0.3],
        fail_render: true,
        seen_frames: 0,
    };
    let result = run_export(&request("/out.mp4"), &mut backend, |_| {});
    let err = result.as_ref().unwrap_err();
    assert!(matches!(err, CutlineError::Render(_)));
    assert!(err.to_string().contains("decoder exploded"));

    let status = ExportStatus::from_result(&result);
    assert!(status.message().starts_with("Export failed: "));
}

#[test]
fn empty_output_path_is_rejected_before_rendering() {
    let mut backend = Scripted {
        prepare: vec![],
        render: vec![],
        fail_render: false,
        seen_frames: 0,
    };
    assert!(run_export(&request(""), &mut backend, |_| {}).is_err());
    assert_eq!(backend.seen_frames, 0);
}

#[test]
fn status_labels() {
    assert_eq!(ExportStatus::default().message(), "");
    let busy = ExportStatus::Exporting { progress: 0.42 };
    assert!(busy.is_busy());
    assert_eq!(busy.message(), "Exporting... 42%");
    let done = ExportStatus::Done {
        output_path: "/out.mp4".into(),
    };
    assert_eq!(done.message(), "Exported to /out.mp4");
}
