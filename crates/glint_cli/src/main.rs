use anyhow::{Context, Result};
use glint_renderer::{render, Camera, RenderConfig, Scene};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting glint");

    let config = RenderConfig::default();
    let scene = Scene::reference();
    let camera = Camera::reference(config.aspect()).context("Failed to set up camera")?;

    let image = render(&scene, &camera, &config)?;
    image
        .save(&config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    println!("Fin.");
    Ok(())
}
