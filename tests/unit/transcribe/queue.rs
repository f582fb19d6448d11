use super::*;
use crate::{media::probe::MediaMetadata, state::reducer::reduce};

fn state(n: usize, probed: usize, captions: bool) -> ProjectState {
    let mut s = ProjectState::default();
    for i in 0..n {
        s = reduce(
            &s,
            Action::AddClip {
                source: format!("media://{i}"),
                file_path: PathBuf::from(format!("/v/{i}.mp4")),
            },
        );
    }
    for i in 0..probed {
        s = reduce(
            &s,
            Action::ApplyMetadata {
                id: ClipId(i as u64 + 1),
                meta: MediaMetadata {
                    width: 1920,
                    height: 1080,
                    duration_seconds: 5.0,
                    fps: 30.0,
                },
            },
        );
    }
    reduce(&s, Action::SetCaptionsEnabled(captions))
}

#[test]
fn nothing_requested_while_captions_disabled() {
    let mut q = TranscriptionQueue::new();
    assert!(q.next_requests(&state(2, 2, false)).is_empty());
}

#[test]
fn requests_only_probed_idle_clips_once() {
    let mut q = TranscriptionQueue::new();
    let s = state(3, 2, true);
    let reqs = q.next_requests(&s);
    let ids: Vec<_> = reqs.iter().map(|r| r.clip_id).collect();
    assert_eq!(ids, vec![ClipId(1), ClipId(2)]);
    assert_eq!(reqs[0].file_path, PathBuf::from("/v/0.mp4"));
    assert!(q.is_in_flight(ClipId(1)));

    // Still idle in state (start action not applied yet): no duplicate request.
    assert!(q.next_requests(&s).is_empty());
    assert_eq!(q.in_flight_len(), 2);
}

#[test]
fn success_sets_captions_and_is_not_retried() {
    let mut q = TranscriptionQueue::new();
    let mut s = state(1, 1, true);
    let req = q.next_requests(&s).remove(0);
    s = reduce(&s, req.started());
    assert_eq!(
        s.project.clips[0].caption_status,
        CaptionStatus::Transcribing
    );

    let segs = vec![CaptionSegment {
        id: "seg-0".into(),
        start: 0.0,
        end: 1.0,
        text: "hi".into(),
    }];
    let action = q
        .complete(&s, req.clip_id, TranscriptionOutcome::Success(segs.clone()))
        .unwrap();
    s = reduce(&s, action);
    assert_eq!(s.project.clips[0].captions, segs);
    assert_eq!(s.project.clips[0].caption_status, CaptionStatus::Done);
    assert!(!q.is_in_flight(req.clip_id));
    assert!(q.next_requests(&s).is_empty());
}

#[test]
fn failure_marks_error_without_retry() {
    let mut q = TranscriptionQueue::new();
    let mut s = state(1, 1, true);
    let req = q.next_requests(&s).remove(0);
    s = reduce(&s, req.started());
    let failed = TranscriptionOutcome::Failure("boom".into());
    let action = q.complete(&s, req.clip_id, failed).unwrap();
    s = reduce(&s, action);
    assert_eq!(s.project.clips[0].caption_status, CaptionStatus::Error);
    assert_eq!(s.project.clips[0].caption_status.badge(), "error");
    assert!(q.next_requests(&s).is_empty());
}

#[test]
fn completion_for_removed_clip_is_dropped() {
    let mut q = TranscriptionQueue::new();
    let s = state(1, 1, true);
    let req = q.next_requests(&s).remove(0);
    let s = reduce(&s, Action::RemoveClip(req.clip_id));
    assert_eq!(
        q.complete(&s, req.clip_id, TranscriptionOutcome::Success(Vec::new())),
        None
    );
    assert_eq!(q.in_flight_len(), 0);
}

#[test]
fn duplicate_completion_does_not_change_status_again() {
    let mut q = TranscriptionQueue::new();
    let mut s = state(1, 1, true);
    let req = q.next_requests(&s).remove(0);
    s = reduce(&s, req.started());
    let failed = TranscriptionOutcome::Failure("boom".into());
    let action = q.complete(&s, req.clip_id, failed).unwrap();
    s = reduce(&s, action);
    assert_eq!(s.project.clips[0].caption_status, CaptionStatus::Error);

    let late = q.complete(&s, req.clip_id, TranscriptionOutcome::Success(Vec::new()));
    assert_eq!(late, None);
    assert_eq!(s.project.clips[0].caption_status, CaptionStatus::Error);
}

#[test]
fn completion_without_request_is_dropped() {
    let mut q = TranscriptionQueue::new();
    let s = state(1, 1, true);
    assert_eq!(
        q.complete(&s, ClipId(1), TranscriptionOutcome::Success(Vec::new())),
        None
    );
}

#[test]
fn outcome_wire_format() {
    let ok: TranscriptionOutcome = serde_json::from_str(
        r#"{"success":true,"segments":[{"id":"seg-0","start":0.0,"end":1.5,"text":"Hi"}]}"#,
    )
    .unwrap();
    assert!(matches!(ok, TranscriptionOutcome::Success(ref s) if s.len() == 1));

    let err: TranscriptionOutcome =
        serde_json::from_str(r#"{"success":false,"error":"no model"}"#).unwrap();
    assert_eq!(err, TranscriptionOutcome::Failure("no model".into()));

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"success": false, "error": "no model"})
    );

    let missing = serde_json::from_str::<TranscriptionOutcome>(r#"{"success":false}"#);
    assert!(missing.is_err());
}
