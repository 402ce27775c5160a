//! The Utah teapot built from 28 bicubic patches.
//! Space cycles markers, wireframe and surface, I/J/K/L orbit the camera.

use bernstein::cli::{self, DemoArgs};
use bernstein::demo::TeapotDemo;
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DemoArgs::parse();
    args.init_logging();
    let config = args.load_config()?;

    let mut demo = TeapotDemo::new(config.surface.resolution)?;
    cli::run_with_config(&mut demo, &config)?;
    Ok(())
}
