use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use stickerboard::{
    AnimatedCodec, Background, BoardConfig, FfmpegSink, JsonItemStore, Stickerboard,
};

#[derive(Parser, Debug)]
#[command(name = "stickerboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the board from a data directory (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the detected container format of each file.
    Sniff(SniffArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Directory holding `database.json`, sticker blobs and an optional `background.png`.
    #[arg(long, env = "STICKERBOARD_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Output file name inside the data directory [default: stickerboard.<codec extension>].
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optional board configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override decode and encoder thread counts.
    #[arg(long)]
    threads: Option<usize>,

    /// Override the output container.
    #[arg(long, value_enum)]
    codec: Option<CodecChoice>,
}

#[derive(Parser, Debug)]
struct SniffArgs {
    /// Files to classify.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CodecChoice {
    Webp,
    Gif,
}

impl From<CodecChoice> for AnimatedCodec {
    fn from(c: CodecChoice) -> Self {
        match c {
            CodecChoice::Webp => AnimatedCodec::Webp,
            CodecChoice::Gif => AnimatedCodec::Gif,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Sniff(args) => cmd_sniff(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => BoardConfig::from_path(path)?,
        None => BoardConfig::default(),
    };
    if let Some(n) = args.threads {
        cfg.decode_workers = Some(n);
        cfg.encoder_threads = Some(n);
    }
    if let Some(codec) = args.codec {
        cfg.codec = codec.into();
    }

    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data directory '{}'", args.data_dir.display()))?;

    let board = Stickerboard::new(cfg.clone())?;
    let bg_path = args.data_dir.join("background.png");
    if bg_path.exists() {
        match std::fs::read(&bg_path)
            .map_err(anyhow::Error::from)
            .and_then(|b| Ok(Background::from_image_bytes(cfg.canvas, &b)?))
        {
            Ok(bg) => board.set_background(bg)?,
            Err(e) => tracing::warn!(path = %bg_path.display(), "ignoring background: {e:#}"),
        }
    }

    let store = JsonItemStore::new(&args.data_dir);
    let out_name = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("stickerboard.{}", cfg.codec.extension())));
    let out_path = args.data_dir.join(out_name);
    let mut sink = FfmpegSink::new(cfg.ffmpeg_opts(&out_path));

    let report = board
        .render(&store, &mut sink)
        .with_context(|| format!("render board into '{}'", out_path.display()))?;
    println!(
        "rendered {} stickers, {} ticks, {} bytes in {:.2?} -> {}",
        report.items,
        report.ticks,
        report.bytes,
        report.elapsed,
        out_path.display()
    );
    Ok(())
}

fn cmd_sniff(args: SniffArgs) -> anyhow::Result<()> {
    for path in args.files {
        let bytes =
            std::fs::read(&path).with_context(|| format!("read '{}'", path.display()))?;
        println!("{}\t{}", stickerboard::sniff(&bytes), path.display());
    }
    Ok(())
}
