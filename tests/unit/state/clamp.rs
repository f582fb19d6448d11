use super::*;

#[test]
fn trims_leave_minimum_duration() {
    assert_eq!(clamp_trim(20.0, 3.0, 2.0), (3.0, 2.0));
    assert_eq!(clamp_trim(10.0, 12.0, 0.0), (9.0, 0.0));
    assert_eq!(clamp_trim(10.0, 5.0, 8.0), (5.0, 4.0));
    assert_eq!(clamp_trim(10.0, -1.0, -1.0), (0.0, 0.0));
    let (s, e) = clamp_trim(10.0, 4.5, 4.5);
    assert!(10.0 - s - e >= MIN_CLIP_DURATION);
}

#[test]
fn pending_clip_cannot_be_trimmed() {
    assert_eq!(clamp_trim(0.0, 3.0, 1.0), (0.0, 0.0));
    assert_eq!(clamp_trim(f64::NAN, 3.0, 1.0), (0.0, 0.0));
}

#[test]
fn clip_shorter_than_minimum_keeps_whole() {
    assert_eq!(clamp_trim(0.5, 0.2, 0.2), (0.0, 0.0));
}

#[test]
fn crossfade_bounded_by_max_and_neighbours() {
    assert_eq!(clamp_crossfade(1.0, Some(4.0), Some(6.0)), 1.0);
    assert_eq!(clamp_crossfade(3.0, Some(4.0), Some(6.0)), MAX_CROSSFADE);
    assert_eq!(clamp_crossfade(1.8, Some(1.5), Some(6.0)), 1.5);
    assert_eq!(clamp_crossfade(1.8, Some(4.0), Some(1.2)), 1.2);
    assert_eq!(clamp_crossfade(-1.0, None, None), 0.0);
    assert_eq!(clamp_crossfade(5.0, None, None), MAX_CROSSFADE);
}

#[test]
fn overlay_duration_bounds() {
    assert_eq!(clamp_overlay_duration(0.1, None), MIN_OVERLAY_DURATION);
    assert_eq!(clamp_overlay_duration(30.0, None), 30.0);
    assert_eq!(clamp_overlay_duration(30.0, Some(9.0)), 9.0);
    assert_eq!(clamp_overlay_duration(3.0, Some(0.2)), MIN_OVERLAY_DURATION);
}

#[test]
fn fade_bounded_by_overlay_and_max() {
    assert_eq!(clamp_fade_duration(2.0, 1.5), 1.5);
    assert_eq!(clamp_fade_duration(8.0, 20.0), MAX_FADE);
    assert_eq!(clamp_fade_duration(-1.0, 20.0), 0.0);
}

#[test]
fn percent_and_misc() {
    assert_eq!(clamp_percent(120.0), 100.0);
    assert_eq!(clamp_percent(-3.0), 0.0);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
    assert_eq!(clamp_font_size(0.0), MIN_FONT_SIZE);
    assert_eq!(clamp_summary_duration(-2.0), 0.0);
}
