use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    captions::whisper::parse_transcript,
    composition::model::CaptionSegment,
    foundation::error::{CutlineError, CutlineResult},
    transcribe::queue::{TranscriptionOutcome, TranscriptionService},
};

/// Transcribes by extracting 16 kHz mono audio with ffmpeg and running a
/// whisper.cpp style binary over it.
#[derive(Clone, Debug)]
pub struct WhisperCommand {
    /// ffmpeg binary used for audio extraction.
    pub ffmpeg: PathBuf,
    /// whisper binary.
    pub whisper: PathBuf,
    /// whisper model file.
    pub model: PathBuf,
    /// Where the intermediate WAV files go.
    pub scratch_dir: PathBuf,
    runs: u64,
}

impl WhisperCommand {
    /// Command using the system temp dir for scratch audio.
    pub fn new(
        ffmpeg: impl Into<PathBuf>,
        whisper: impl Into<PathBuf>,
        model: impl Into<PathBuf>,
    ) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            whisper: whisper.into(),
            model: model.into(),
            scratch_dir: std::env::temp_dir(),
            runs: 0,
        }
    }

    /// Put intermediate WAV files in `dir`.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Transcribe `file_path`, returning segments on its natural timeline.
    ///
    /// The scratch WAV is removed whether or not transcription succeeds.
    pub fn run(&mut self, file_path: &Path) -> CutlineResult<Vec<CaptionSegment>> {
        if !self.whisper.exists() {
            return Err(CutlineError::transcription(format!(
                "whisper binary not found at '{}'",
                self.whisper.display()
            )));
        }
        if !self.model.exists() {
            return Err(CutlineError::transcription(format!(
                "whisper model not found at '{}'",
                self.model.display()
            )));
        }

        self.runs += 1;
        let wav = self.scratch_dir.join(format!(
            "cutline-whisper-{}-{}.wav",
            std::process::id(),
            self.runs
        ));
        let result = self.extract_and_transcribe(file_path, &wav);
        remove_scratch(&wav);
        result
    }

    fn extract_and_transcribe(
        &self,
        input: &Path,
        wav: &Path,
    ) -> CutlineResult<Vec<CaptionSegment>> {
        let mut extract = Command::new(&self.ffmpeg);
        extract
            .arg("-i")
            .arg(input)
            .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le", "-y"])
            .arg(wav);
        run_captured(extract, "ffmpeg")?;

        let mut whisper = Command::new(&self.whisper);
        whisper.arg("-m").arg(&self.model).arg("-f").arg(wav);
        let stdout = run_captured(whisper, "whisper")?;
        Ok(parse_transcript(&stdout))
    }
}

impl TranscriptionService for WhisperCommand {
    fn transcribe(&mut self, file_path: &Path) -> TranscriptionOutcome {
        match self.run(file_path) {
            Ok(segments) => TranscriptionOutcome::Success(segments),
            Err(e) => TranscriptionOutcome::Failure(e.to_string()),
        }
    }
}

// A leftover scratch file is not fatal to the transcription, only reported.
fn remove_scratch(path: &Path) -> bool {
    if !path.exists() {
        return true;
    }
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove scratch audio");
            false
        }
    }
}

fn run_captured(mut cmd: Command, name: &str) -> CutlineResult<String> {
    let output = cmd.output().map_err(|e| {
        CutlineError::transcription(format!("failed to spawn {name}: {e}"))
    })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CutlineError::transcription(format!(
            "{name} exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
