use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prism_renderer::{build_world, Framebuffer, JobEvent, RenderWorker};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let options = args.render_options()?;
    let scene = args.scene()?;

    log::info!("Starting Prism");

    let start = Instant::now();
    let world = build_world(&scene).context("Failed to build world")?;
    log::info!("World built in {:?}: {} spheres", start.elapsed(), world.len());

    if let Some(dir) = &args.snapshots {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create snapshot directory {}", dir.display()))?;
    }

    let height = options.height;
    let worker = RenderWorker::spawn(world)?;
    worker.start(options, args.seed)?;

    loop {
        match worker.recv() {
            Some(JobEvent::Partial {
                rows_completed,
                framebuffer,
            }) => {
                log::info!("{}/{} scanlines", rows_completed, height);
                if let Some(dir) = &args.snapshots {
                    let path = dir.join(format!("partial_{rows_completed:05}.png"));
                    save(&framebuffer, &path)?;
                }
            }
            Some(JobEvent::Result(framebuffer)) => {
                save(&framebuffer, &args.output)?;
                log::info!("Saved to {}", args.output.display());
                break;
            }
            Some(JobEvent::Rejected(err)) => bail!("Render rejected: {err}"),
            None => bail!("Render worker exited without a result"),
        }
    }

    worker.shutdown()?;
    Ok(())
}

fn save(framebuffer: &Framebuffer, path: &Path) -> Result<()> {
    framebuffer
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
