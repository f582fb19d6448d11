use super::*;

#[test]
fn parses_timestamps() {
    assert_eq!(parse_timestamp("00:00:03.500"), Some(3.5));
    assert_eq!(parse_timestamp("01:02:03.250"), Some(3723.25));
    assert_eq!(parse_timestamp("00:03.5"), None);
    assert_eq!(parse_timestamp("aa:00:00.000"), None);
}

#[test]
fn parses_segments_and_skips_noise() {
    let stdout = "\
whisper_init_from_file: loading model
[00:00:00.000 --> 00:00:03.000]   Hello there.
[00:00:03.000 --> 00:00:04.000]
[00:00:04.000 --> 00:00:06.500]   General Kenobi!
main: total time = 1234 ms
";
    let segs = parse_transcript(stdout);
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].id, "seg-0");
    assert_eq!(segs[0].text, "Hello there.");
    assert_eq!((segs[0].start, segs[0].end), (0.0, 3.0));
    assert_eq!(segs[1].id, "seg-1");
    assert_eq!(segs[1].text, "General Kenobi!");
    assert_eq!((segs[1].start, segs[1].end), (4.0, 6.5));
}

#[test]
fn empty_output_yields_no_segments() {
    assert!(parse_transcript("").is_empty());
}
