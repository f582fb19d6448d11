use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cutline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the composition plan of an export request as JSON.
    Plan(InArgs),
    /// Print the evaluated layers of one frame as JSON.
    Frame(FrameArgs),
    /// Split a whisper transcript into caption chunks.
    Captions(CaptionsArgs),
    /// Export a request, writing one frame graph per line.
    Export(ExportArgs),
    /// Transcribe a video with ffmpeg and a whisper binary.
    Transcribe(TranscribeArgs),
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input export request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input export request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: i64,
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    /// Whisper stdout capture.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Maximum words per chunk.
    #[arg(long, default_value_t = 10)]
    max_words: usize,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input export request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; defaults to the request's `outputPath`.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Video file to transcribe.
    #[arg(long)]
    file: PathBuf,

    /// Whisper binary.
    #[arg(long)]
    whisper: PathBuf,

    /// Whisper model file.
    #[arg(long)]
    model: PathBuf,

    /// ffmpeg binary.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Captions(args) => cmd_captions(args),
        Command::Export(args) => cmd_export(args),
        Command::Transcribe(args) => cmd_transcribe(args),
    }
}

fn read_request(path: &std::path::Path) -> anyhow::Result<cutline::ExportRequest> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read request '{}'", path.display()))?;
    let req = cutline::ExportRequest::from_json(&json)
        .with_context(|| format!("parse request '{}'", path.display()))?;
    Ok(req)
}

fn cmd_plan(args: InArgs) -> anyhow::Result<()> {
    let plan = read_request(&args.in_path)?.plan()?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let plan = read_request(&args.in_path)?.plan()?;
    let graph = cutline::Evaluator::eval_frame(&plan, cutline::FrameIndex(args.frame))?;
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let stdout = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read transcript '{}'", args.in_path.display()))?;
    let segments = cutline::parse_transcript(&stdout);
    let chunks = cutline::split_segments(&segments, args.max_words.max(1));
    println!("{}", serde_json::to_string_pretty(&chunks)?);
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut req = read_request(&args.in_path)?;
    if let Some(out) = args.out {
        req.output_path = out;
    }
    let mut backend = cutline::FrameGraphDump::new();
    let mut last_pct = -1;
    let report = cutline::run_export(&req, &mut backend, |p| {
        let pct = (p * 100.0).round() as i64;
        if pct != last_pct {
            last_pct = pct;
            let status = cutline::ExportStatus::Exporting { progress: p };
            eprintln!("{}", status.message());
        }
    })?;
    eprintln!(
        "wrote {} ({} frames)",
        report.output_path.display(),
        report.total_frames
    );
    Ok(())
}

fn cmd_transcribe(args: TranscribeArgs) -> anyhow::Result<()> {
    let mut whisper = cutline::WhisperCommand::new(args.ffmpeg, args.whisper, args.model);
    let segments = whisper.run(&args.file)?;
    println!("{}", serde_json::to_string_pretty(&segments)?);
    Ok(())
}
