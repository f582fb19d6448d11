use super::*;

fn loaded_clip(id: u64, natural: f64) -> Clip {
    let mut c = Clip::new(
        ClipId(id),
        format!("media://{id}"),
        format!("/tmp/{id}.mp4"),
    );
    c.natural_duration = natural;
    c
}

#[test]
fn effective_duration_subtracts_trims() {
    let mut c = loaded_clip(1, 20.0);
    c.trim_start = 3.0;
    c.trim_end = 2.0;
    assert_eq!(c.effective_duration(), 15.0);
}

#[test]
fn pending_clip_contributes_nothing() {
    let c = Clip::new(ClipId(7), "media://7", "/tmp/7.mp4");
    assert!(c.is_pending());
    assert_eq!(c.effective_duration(), 0.0);
    assert_eq!(c.caption_status, CaptionStatus::Idle);
}

#[test]
fn caption_status_badges() {
    assert_eq!(CaptionStatus::Idle.badge(), "");
    assert_eq!(CaptionStatus::Transcribing.badge(), "transcribing...");
    assert_eq!(CaptionStatus::Error.badge(), "error");
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut p = Project::default();
    p.clips = vec![loaded_clip(1, 5.0), loaded_clip(1, 6.0)];
    assert!(p.validate().is_err());
}

#[test]
fn validate_rejects_negative_and_nan_fields() {
    let mut p = Project::default();
    let mut c = loaded_clip(1, 5.0);
    c.trim_start = -1.0;
    p.clips = vec![c];
    assert!(p.validate().is_err());

    let mut p = Project::default();
    p.overlay.fade_duration = f64::NAN;
    assert!(p.validate().is_err());
}

#[test]
fn validate_rejects_zero_max_words() {
    let mut p = Project::default();
    p.captions.max_words = 0;
    assert!(p.validate().is_err());
}

#[test]
fn json_roundtrip_keeps_lowercase_enums() {
    let mut p = Project::default();
    p.clips = vec![loaded_clip(3, 8.0)];
    p.captions.position = CaptionPosition::Center;
    let s = serde_json::to_string(&p).unwrap();
    assert!(s.contains("\"center\""));
    assert!(s.contains("\"idle\""));
    let de: Project = serde_json::from_str(&s).unwrap();
    assert_eq!(de, p);
}

#[test]
fn validate_rejects_absurd_durations() {
    let mut p = Project::default();
    p.clips = vec![loaded_clip(1, 1e300)];
    assert!(p.validate().is_err());

    let mut p = Project::default();
    p.clips = vec![loaded_clip(1, MAX_MEDIA_DURATION)];
    assert!(p.validate().is_ok());

    let mut p = Project::default();
    p.summary.duration = f64::INFINITY;
    assert!(p.validate().is_err());
}
