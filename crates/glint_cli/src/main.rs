mod cli;
mod logger;
mod scene_file;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Args;
use glint_core::CubeMap;
use glint_renderer::Tracer;
use logger::init_logger;
use scene_file::SceneFile;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let start = Instant::now();
    let loaded = SceneFile::load(&args.scene)?;

    let mut config = loaded.config;
    args.apply_overrides(&mut config);
    config.validate()?;

    let camera = loaded.camera.build(config.aspect());
    let mut tracer = Tracer::from_scene(&loaded.scene, camera, config)
        .context("failed to prepare scene for rendering")?;

    if let Some(dir) = &loaded.environment {
        let cube_map = CubeMap::load_dir(dir)
            .with_context(|| format!("failed to load environment map from {}", dir.display()))?;
        tracer = tracer.with_environment(Arc::new(cube_map));
    }

    log::info!(
        "Scene '{}' ready in {:.2?} ({} objects, {} lights)",
        loaded.scene.name,
        start.elapsed(),
        tracer.world().objects().len(),
        tracer.world().lights().len()
    );

    let image = tracer.render().context("render failed")?;
    image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("Total time {:.2?}", start.elapsed());
    Ok(())
}
