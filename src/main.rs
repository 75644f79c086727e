use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use glint::consts::{ DEFAULT_OUT_FILE, DEFAULT_THREADS };
use glint::obj::ObjParser;
use glint::parallel;
use glint::scene::Scene;

/// Renders a JSON scene description to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// The scene description to render.
    scene: PathBuf,

    /// Where to write the image.
    #[clap(short, long, default_value = DEFAULT_OUT_FILE)]
    out: PathBuf,

    /// How many render threads to use.
    #[clap(short = 'j', long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Overrides the scene's reflection and refraction depth.
    #[clap(long)]
    max_bounces: Option<usize>,

    /// An OBJ model to add to the scene, untransformed.
    #[clap(short, long)]
    model: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let args = Args::parse();

    let Scene { mut world, mut camera } = Scene::load(&args.scene)
        .with_context(|| format!("couldn't load {}", args.scene.display()))?;

    if let Some(ref model) = args.model {
        let group = ObjParser::open(model)
            .with_context(|| format!("couldn't import {}", model.display()))?
            .into_group();
        world = world.with_object(group);
    }

    if let Some(max_bounces) = args.max_bounces {
        camera = camera.with_max_bounces(max_bounces);
    }

    let start = Instant::now();
    let canvas = parallel::render(&world, &camera, args.threads)?;
    log::info!("render took {:.2?}", start.elapsed());

    canvas.save(&args.out)
        .with_context(|| format!("couldn't save {}", args.out.display()))?;

    Ok(())
}
