//! Shape a bicubic Bezier patch through its 16 control points.
//! Left/Right select a point, W/A/S/D/Q/E move it, Space hides the markers,
//! I/J/K/L orbit the camera.

use bernstein::cli::{self, DemoArgs};
use bernstein::demo::SurfaceDemo;
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DemoArgs::parse();
    args.init_logging();
    let config = args.load_config()?;

    let mut demo = SurfaceDemo::new(config.surface.resolution)?;
    cli::run_with_config(&mut demo, &config)?;
    Ok(())
}
