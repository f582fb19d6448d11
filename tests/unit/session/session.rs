use super::*;
use crate::composition::model::{CaptionSegment, CaptionStatus};

fn meta(secs: f64) -> MediaMetadata {
    MediaMetadata {
        width: 1920,
        height: 1080,
        duration_seconds: secs,
        fps: 30.0,
    }
}

fn two_clip_session() -> (EditorSession, ClipId, ClipId) {
    let mut s = EditorSession::new(4321, 7);
    let a = s.import_clip("/videos/a.mp4");
    let b = s.import_clip("/videos/b.mp4");
    s.apply_metadata(a, meta(4.0));
    s.apply_metadata(b, meta(6.0));
    s.dispatch(Action::SetCrossfade {
        id: b,
        seconds: 1.0,
    });
    (s, a, b)
}

struct Canned {
    calls: Vec<PathBuf>,
}

impl TranscriptionService for Canned {
    fn transcribe(&mut self, file_path: &Path) -> TranscriptionOutcome {
        self.calls.push(file_path.to_path_buf());
        if file_path.ends_with("b.mp4") {
            return TranscriptionOutcome::Failure("no speech".into());
        }
        TranscriptionOutcome::Success(vec![CaptionSegment {
            id: "seg-0".into(),
            start: 0.0,
            end: 2.0,
            text: "hello there".into(),
        }])
    }
}

#[test]
fn imported_clips_get_served_locators() {
    let mut s = EditorSession::new(4321, 7);
    let id = s.import_clip("/videos/a.mp4");
    assert_eq!(id, ClipId(1));
    let clip = &s.project().clips[0];
    assert!(clip.source.starts_with("http://localhost:4321/media/"));
    assert!(clip.is_pending());
    assert_eq!(
        s.registry().resolve_locator(&clip.source),
        Some(Path::new("/videos/a.mp4"))
    );

    s.teardown();
    assert!(s.registry().is_empty());
}

#[test]
fn first_probe_locks_the_format() {
    let (s, _, _) = two_clip_session();
    assert!(s.project().format_locked);
    assert_eq!(s.project().canvas.width, 1920);
}

#[test]
fn preview_tracks_edits() {
    let (mut s, a, _) = two_clip_session();
    assert_eq!(s.plan().unwrap().total_frames(), 270);

    let graph = s.preview_frame(FrameIndex(105)).unwrap();
    assert_eq!(graph.clip_layers().count(), 2);

    s.dispatch(Action::RemoveClip(a));
    assert_eq!(s.plan().unwrap().total_frames(), 180);
    assert!(s.preview_frame(FrameIndex(200)).is_err());
}

#[test]
fn preview_matches_export_plan() {
    let (mut s, _, _) = two_clip_session();
    s.set_overlay_image("/img/logo.png", Some((400, 100)));
    s.dispatch(Action::SetSummaryEnabled(true));
    s.dispatch(Action::AddSummaryItem);

    let export_plan = s.export_request("/out.mp4").plan().unwrap();
    let total = s.plan().unwrap().total_frames();
    assert_eq!(total, export_plan.total_frames());
    for f in [0, 60, 105, 149, 150, 269, 270, total - 1] {
        let preview = s.preview_frame(FrameIndex(f)).unwrap();
        let export = Evaluator::eval_frame(&export_plan, FrameIndex(f)).unwrap();
        assert_eq!(preview, export, "frame {f}");
    }
}

#[test]
fn transcript_seek_uses_trimmed_start() {
    let (mut s, _, b) = two_clip_session();
    s.dispatch(Action::SetClipCaptions {
        id: b,
        captions: vec![
            CaptionSegment {
                id: "seg-0".into(),
                start: 0.0,
                end: 0.4,
                text: "cut".into(),
            },
            CaptionSegment {
                id: "seg-1".into(),
                start: 2.0,
                end: 3.0,
                text: "kept".into(),
            },
        ],
    });
    s.dispatch(Action::BeginTrim(b));
    s.dispatch(Action::UpdateTrim {
        trim_start: 0.5,
        trim_end: 0.0,
    });
    s.dispatch(Action::CommitTrim);

    let frame = s.transcript_seek(b, "seg-1").unwrap();
    assert_eq!(frame, Some(FrameIndex(135)));
    assert_eq!(s.transcript_seek(b, "seg-0").unwrap(), None);
    assert_eq!(s.transcript_seek(ClipId(99), "seg-1").unwrap(), None);
}

#[test]
fn transcription_runs_once_per_clip() {
    let (mut s, a, b) = two_clip_session();
    let mut service = Canned { calls: Vec::new() };

    assert_eq!(s.transcribe_pending(&mut service), 0);

    s.dispatch(Action::SetCaptionsEnabled(true));
    assert_eq!(s.transcribe_pending(&mut service), 2);
    assert_eq!(
        s.project().clip(a).unwrap().caption_status,
        CaptionStatus::Done
    );
    assert_eq!(
        s.project().clip(b).unwrap().caption_status,
        CaptionStatus::Error
    );

    assert_eq!(s.transcribe_pending(&mut service), 0);
    assert_eq!(service.calls.len(), 2);

    let graph = s.preview_frame(FrameIndex(10)).unwrap();
    assert_eq!(graph.caption().unwrap().text, "hello there");
}

#[test]
fn removed_clip_drops_late_transcription() {
    let (mut s, a, _) = two_clip_session();
    s.dispatch(Action::SetCaptionsEnabled(true));
    let reqs = s.start_transcriptions();
    assert_eq!(reqs.len(), 2);

    s.dispatch(Action::RemoveClip(a));
    s.finish_transcription(a, TranscriptionOutcome::Success(Vec::new()));
    assert!(s.project().clip(a).is_none());
    assert_eq!(s.project().clips.len(), 1);
}

#[test]
fn late_duplicate_result_keeps_first_outcome() {
    let (mut s, a, _) = two_clip_session();
    s.dispatch(Action::SetCaptionsEnabled(true));
    s.start_transcriptions();

    s.finish_transcription(a, TranscriptionOutcome::Failure("timeout".into()));
    s.finish_transcription(a, TranscriptionOutcome::Success(Vec::new()));
    assert_eq!(
        s.project().clip(a).unwrap().caption_status,
        CaptionStatus::Error
    );
}

struct Broken;

impl RenderBackend for Broken {
    fn prepare(&mut self, _: &CompositionPlan, progress: &mut dyn FnMut(f64)) -> CutlineResult<()> {
        progress(1.0);
        Ok(())
    }

    fn render(
        &mut self,
        _: &CompositionPlan,
        _: &Path,
        _: &mut dyn FnMut(f64),
    ) -> CutlineResult<()> {
        Err(crate::CutlineError::render("encoder missing"))
    }
}

#[test]
fn export_outcome_is_kept_in_status() {
    let (mut s, _, _) = two_clip_session();
    let mut seen = Vec::new();
    let err = s
        .export("/tmp/out.mp4", &mut Broken, |p| seen.push(p))
        .unwrap_err();
    assert!(err.to_string().contains("encoder missing"));
    assert_eq!(seen, vec![0.2]);
    assert_eq!(
        s.export_status().message(),
        "Export failed: render error: encoder missing"
    );
}

#[test]
fn export_with_frame_dump_writes_every_frame() {
    let (mut s, _, _) = two_clip_session();
    let out = std::env::temp_dir()
        .join(format!("cutline-session-{}", std::process::id()))
        .join("frames.jsonl");
    let mut last = 0.0;
    let mut dump = crate::export::dump::FrameGraphDump::new();
    let report = s.export(&out, &mut dump, |p| last = p).unwrap();
    assert_eq!(report.total_frames, 270);
    assert_eq!(last, 1.0);
    assert!(matches!(s.export_status(), ExportStatus::Done { .. }));

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 270);
    if let Some(dir) = out.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
