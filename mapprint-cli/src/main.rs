use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mapprint::{render_job, PrintConfig, RecordingSurface, RenderContext};
use std::path::PathBuf;
use std::sync::Arc;

/// Lays out a print job and prints the resulting draw commands as JSON
#[derive(Debug, Parser)]
#[command(name = "mapprint", version)]
struct Args {
    /// Deployment configuration (allowed DPIs, scales, layouts)
    #[arg(short, long)]
    config: PathBuf,

    /// Print job description
    #[arg(short, long, required_unless_present = "info")]
    job: Option<PathBuf>,

    /// Layout to use instead of the job's `layout` field
    #[arg(short, long)]
    layout: Option<String>,

    /// Print the client-side configuration summary and exit
    #[arg(long)]
    info: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = PrintConfig::from_path(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    if args.info {
        println!("{}", serde_json::to_string_pretty(&config.client_info())?);
        return Ok(());
    }

    let job_path = args.job.ok_or_else(|| anyhow!("--job is required"))?;
    let text = std::fs::read_to_string(&job_path)
        .with_context(|| format!("reading {}", job_path.display()))?;
    let job: serde_json::Value = serde_json::from_str(&text)?;

    let layout_name = match args.layout {
        Some(name) => name,
        None => job
            .get("layout")
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("no layout given on the command line or in the job"))?,
    };

    let config = Arc::new(config);
    let layout = config
        .layout(&layout_name)
        .ok_or_else(|| anyhow!("unknown layout '{}'", layout_name))?;
    log::info!("printing with layout '{}'", layout_name);

    let mut context = RenderContext::new(config.clone(), job)?;
    let pages: Vec<RecordingSurface> = render_job(layout, &mut context)?;

    let output: Vec<_> = pages
        .iter()
        .enumerate()
        .map(|(index, page)| serde_json::json!({ "page": index, "commands": page.commands }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
