use super::*;

fn seg(start: f64, end: f64, text: &str) -> CaptionSegment {
    CaptionSegment {
        id: "s0".to_string(),
        start,
        end,
        text: text.to_string(),
    }
}

#[test]
fn twelve_words_split_into_three_equal_slices() {
    let s = seg(
        10.0,
        16.0,
        "one two three four five six seven eight nine ten eleven twelve",
    );
    let chunks = split_segment(&s, 5);
    assert_eq!(chunks.len(), 3);

    let counts: Vec<usize> = chunks.iter().map(|c| c.text.split(' ').count()).collect();
    assert_eq!(counts, vec![5, 5, 2]);

    for c in &chunks {
        assert_eq!(c.end - c.start, 2.0);
    }
    assert_eq!(chunks[0].start, 10.0);
    assert_eq!(chunks[2].end, 16.0);

    let joined: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(joined.join(" "), s.text);
}

#[test]
fn short_segment_is_returned_unchanged() {
    let s = seg(1.0, 2.5, "  hello   there ");
    let chunks = split_segment(&s, 5);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "  hello   there ");
    assert_eq!((chunks[0].start, chunks[0].end), (1.0, 2.5));
}

#[test]
fn whitespace_runs_are_collapsed_when_splitting() {
    let s = seg(0.0, 4.0, "a\tb  c\n d");
    let chunks = split_segment(&s, 2);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text, "a b");
    assert_eq!(chunks[1].text, "c d");
    assert_eq!(chunks[1].start, 2.0);
}

#[test]
fn time_is_uniform_regardless_of_word_count() {
    let s = seg(0.0, 3.0, "w1 w2 w3 w4 w5 w6 w7");
    let chunks = split_segment(&s, 3);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2].text, "w7");
    assert_eq!(chunks[2].start, 2.0);
    assert_eq!(chunks[2].end, 3.0);
}

#[test]
fn split_segments_keeps_order() {
    let chunks = split_segments(&[seg(0.0, 1.0, "a b c"), seg(1.0, 2.0, "d")], 2);
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["a b", "c", "d"]);
}
