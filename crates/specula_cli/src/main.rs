//! `specula` - render a JSON scene file to a PNG.
//!
//! Usage: specula <scene.json> [output.png] [--bounces N] [--gamma]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use specula_core::load_scene;
use specula_renderer::{render, Camera, RenderConfig};

const USAGE: &str = "Usage: specula <scene.json> [output.png] [--bounces N] [--gamma]";

/// Command-line options. Flags override the scene file's render settings.
#[derive(Debug, PartialEq)]
struct Args {
    scene: PathBuf,
    output: PathBuf,
    bounces: Option<u32>,
    gamma: bool,
}

impl Args {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut positional = Vec::new();
        let mut bounces = None;
        let mut gamma = false;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--bounces" | "-b" => {
                    let value = iter.next().context("--bounces needs a value")?;
                    let n = value
                        .parse::<u32>()
                        .with_context(|| format!("invalid bounce count '{value}'"))?;
                    bounces = Some(n);
                }
                "--gamma" => gamma = true,
                flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n{USAGE}"),
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let scene = positional.next().context(USAGE)?;
        let output = positional.next().unwrap_or_else(|| scene.with_extension("png"));
        if let Some(extra) = positional.next() {
            bail!("unexpected argument '{}'\n{USAGE}", extra.display());
        }

        Ok(Self {
            scene,
            output,
            bounces,
            gamma,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    log::info!("Loading scene {}", args.scene.display());
    let scene = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    let mut config = RenderConfig::from_settings(&scene.render);
    if let Some(bounces) = args.bounces {
        config = config.with_bounce_limit(bounces);
    }
    if args.gamma {
        config = config.with_gamma(true);
    }

    let camera = Camera::from_settings(&scene.camera, scene.render.width, scene.render.height);
    let image = render(&camera, &scene, &config);

    image
        .save(&args.output, config.gamma)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
