use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ivar_renderer::{render, RenderConfig};

mod cli;
mod demo;
mod logger;
mod scene_file;

use cli::{Args, DemoScene};
use logger::init_logger;
use scene_file::{load_scene, SceneSetup};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut config = RenderConfig::default()
        .with_resolution(args.width, args.height())
        .with_quality(args.samples, args.max_depth)
        .with_seed(args.seed);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let SceneSetup { scene, camera } = build_scene(&args)?;
    info!("Scene has {} spheres", scene.len());

    let mut camera = camera.with_aspect_ratio(config.aspect_ratio());
    camera.initialize();

    let framebuffer = render(&camera, &scene, &config).context("Render failed")?;

    framebuffer
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}

fn build_scene(args: &Args) -> Result<SceneSetup> {
    if let Some(path) = &args.scene {
        return load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()));
    }

    let setup = match args.demo {
        DemoScene::BookCover => {
            // Scene layout draws from its own generator so it stays fixed per seed
            let mut rng = StdRng::seed_from_u64(args.seed);
            demo::book_cover(&mut rng)
        }
        DemoScene::Bubble => demo::bubble(),
    };
    setup.context("Failed to build demo scene")
}
