//! Parser for speech-to-text console output.
//!
//! The transcriber prints one line per segment:
//!
//! ```text
//! [00:00:00.000 --> 00:00:03.000]   Some text
//! ```
//!
//! Everything else (banner lines, timing stats) is ignored.

use crate::composition::model::CaptionSegment;

/// Parse transcriber stdout into caption segments, in output order.
///
/// Lines with malformed timestamps or blank text are skipped. Segment ids are
/// `seg-<n>` numbered over the kept segments.
pub fn parse_transcript(stdout: &str) -> Vec<CaptionSegment> {
    let mut segments = Vec::new();
    for line in stdout.lines() {
        let Some((start, end, text)) = parse_line(line) else {
            continue;
        };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        segments.push(CaptionSegment {
            id: format!("seg-{}", segments.len()),
            start,
            end,
            text: text.to_string(),
        });
    }
    tracing::debug!(segments = segments.len(), "parsed transcript");
    segments
}

fn parse_line(line: &str) -> Option<(f64, f64, &str)> {
    let open = line.find('[')?;
    let rest = &line[open + 1..];
    let close = rest.find(']')?;
    let (stamps, text) = (&rest[..close], &rest[close + 1..]);
    let (start, end) = stamps.split_once("-->")?;
    Some((
        parse_timestamp(start.trim())?,
        parse_timestamp(end.trim())?,
        text,
    ))
}

/// Parse `HH:MM:SS.mmm` into seconds.
pub fn parse_timestamp(ts: &str) -> Option<f64> {
    let mut parts = ts.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let secs = f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds;
    Some(secs)
}

#[cfg(test)]
#[path = "../../tests/unit/captions/whisper.rs"]
mod tests;
