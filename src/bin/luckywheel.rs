use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "luckywheel", version)]
struct Cli {
    /// Log pipeline progress to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole spin as a looping GIF.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the candidate order and rotation plan as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input spin request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Extra directory searched for label fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input spin request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based, hold frames included).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Extra directory searched for label fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input spin request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(serde::Serialize)]
struct PlanReport<'a> {
    order: Vec<&'a str>,
    source_indices: &'a [usize],
    terminal_segment_index: usize,
    plan: &'a luckywheel::AnimationPlan,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_request(
    in_path: &Path,
    font_dir: Option<PathBuf>,
) -> anyhow::Result<(luckywheel::SpinRequest, luckywheel::FsAssetLoader)> {
    let mut req = luckywheel::SpinRequest::from_path(in_path)?;
    if font_dir.is_some() {
        req.options.render.font_dir = font_dir;
    }
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    Ok((req, luckywheel::FsAssetLoader::new(assets_root)))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (req, loader) = load_request(&args.in_path, args.font_dir)?;
    let mut sess = luckywheel::SpinSession::new(&req, &loader)?;
    let bytes = sess.render_gif()?;

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} bytes)",
        args.out.display(),
        sess.frame_count(),
        bytes.len()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (req, loader) = load_request(&args.in_path, args.font_dir)?;
    let mut sess = luckywheel::SpinSession::new(&req, &loader)?;
    let frame = sess.render_frame(luckywheel::FrameIndex(args.frame))?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let req = luckywheel::SpinRequest::from_path(&args.in_path)?;
    req.options.validate()?;
    let wheel = luckywheel::order(&req.candidates, req.selected_index)?;
    let plan = luckywheel::plan_with(
        &req.options.schedule,
        wheel.segment_count(),
        wheel.terminal_segment_index(),
    )?;

    let report = PlanReport {
        order: wheel.candidates().iter().map(|c| c.label.as_str()).collect(),
        source_indices: wheel.source_indices(),
        terminal_segment_index: wheel.terminal_segment_index(),
        plan: &plan,
    };
    let json = serde_json::to_string_pretty(&report).context("serialize plan")?;
    println!("{json}");
    Ok(())
}
