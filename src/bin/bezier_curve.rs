//! Drag the four control points of a cubic Bezier curve.
//! Left/Right select a point, W/A/S/D move it, Up/Down double or halve the
//! number of curve vertices.

use bernstein::cli::{self, DemoArgs};
use bernstein::demo::CurveDemo;
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DemoArgs::parse();
    args.init_logging();
    let config = args.load_config()?;

    let mut demo = CurveDemo::new(config.curve.max_vertices);
    cli::run_with_config(&mut demo, &config)?;
    Ok(())
}
