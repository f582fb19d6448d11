use super::*;

fn chunk(start: f64, end: f64, text: &str) -> CaptionChunk {
    CaptionChunk {
        start,
        end,
        text: text.to_string(),
    }
}

fn fps30() -> Fps {
    Fps::new(30.0).unwrap()
}

#[test]
fn finds_chunk_containing_local_time() {
    let chunks = [chunk(0.0, 1.0, "first"), chunk(1.0, 2.0, "second")];
    let at = |f| active_chunk(FrameIndex(f), FrameIndex(90), 120, &chunks, fps30());
    assert_eq!(at(90), Some("first"));
    assert_eq!(at(119), Some("first"));
    assert_eq!(at(120), Some("second"));
}

#[test]
fn gaps_between_words_show_nothing() {
    let chunks = [chunk(0.0, 1.0, "a"), chunk(2.0, 3.0, "b")];
    let text = active_chunk(FrameIndex(45), FrameIndex(0), 120, &chunks, fps30());
    assert_eq!(text, None);
}

#[test]
fn outside_clip_window_returns_none_even_if_time_matches() {
    // Stale chunk list whose local times would match frame 150 if we ignored the window.
    let chunks = [chunk(0.0, 100.0, "stale")];
    let at = |f| active_chunk(FrameIndex(f), FrameIndex(0), 120, &chunks, fps30());
    assert_eq!(at(150), None);
    assert_eq!(at(-1), None);
}

#[test]
fn only_the_current_clip_is_consulted() {
    let a = CaptionTrack {
        clip_id: ClipId(1),
        start: FrameIndex(0),
        duration_in_frames: 120,
        chunks: vec![chunk(0.0, 10.0, "from A")],
    };
    let b = CaptionTrack {
        clip_id: ClipId(2),
        start: FrameIndex(90),
        duration_in_frames: 180,
        chunks: vec![chunk(3.0, 4.0, "from B")],
    };
    let tracks = [a, b];

    // Frame 100 is inside both windows: A stays current.
    let current = current_track(FrameIndex(100), &tracks).unwrap();
    assert_eq!(current.clip_id, ClipId(1));
    let at = |f| active_caption(FrameIndex(f), &tracks, fps30());
    assert_eq!(at(100), Some("from A"));

    // Frame 150 belongs to B; A's long chunk must not leak through.
    assert_eq!(at(150), None);
    assert_eq!(at(180), Some("from B"));
    assert_eq!(at(270), None);
}

#[test]
fn transcript_seek_rounds_segment_start() {
    assert_eq!(
        transcript_seek_frame(FrameIndex(90), 1.51, fps30()),
        FrameIndex(135)
    );
}
