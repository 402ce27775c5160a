//! The demo frame loop: poll input, update the scene, re-derive geometry, draw.

pub mod curve;
pub mod surface;
pub mod teapot;

use std::path::PathBuf;

use tracing::{info, trace};

use crate::camera::Camera;
use crate::config::DemoConfig;
use crate::error::Result;
use crate::input::{InputState, Key};
use crate::render::FrameRenderer;
use crate::scene::Scene;
use crate::script::InputScript;

pub use curve::CurveDemo;
pub use surface::SurfaceDemo;
pub use teapot::TeapotDemo;

/// Fixed simulation step, one frame at 60 Hz
pub const FRAME_DT: f64 = 1.0 / 60.0;

pub trait Demo {
    fn title(&self) -> &str;

    /// The camera the demo is viewed through
    fn camera(&self, config: &DemoConfig) -> Camera {
        Camera::perspective(&config.camera, config.window.aspect())
    }

    /// Add the demo's shapes to an empty scene
    fn init(&mut self, scene: &mut Scene) -> Result<()>;

    /// Re-derive geometry after the scene applied this frame's interaction
    fn update(&mut self, scene: &mut Scene, input: &InputState, dt: f64) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    pub written: Vec<PathBuf>,
}

/// Run `demo` for `config.frames` frames, replaying `script` as input.
/// Escape ends the loop early.
pub fn run<D: Demo + ?Sized>(demo: &mut D, config: &DemoConfig, script: &InputScript) -> Result<RunSummary> {
    let mut scene = Scene::new();
    demo.init(&mut scene)?;
    scene.resolve_models();
    let mut camera = demo.camera(config);
    let mut input = InputState::new();
    let renderer = FrameRenderer::new(config.window.width, config.window.height);
    if config.render_every > 0 {
        std::fs::create_dir_all(&config.output)?;
    }
    info!(demo = demo.title(), frames = config.frames, "demo started");

    let mut summary = RunSummary::default();
    for frame in 0..config.frames {
        input.begin_frame();
        for event in script.events_for(frame) {
            input.apply(*event);
        }
        if input.pressed(Key::Escape) {
            info!(frame, "escape pressed");
            break;
        }
        camera.update(&input, FRAME_DT);
        scene.update(&input, &camera, FRAME_DT);
        demo.update(&mut scene, &input, FRAME_DT)?;
        scene.resolve_models();
        summary.frames += 1;
        trace!(frame, "frame updated");

        if config.render_every > 0 && frame % config.render_every == 0 {
            let path = config.output.join(format!("frame_{frame:04}.png"));
            renderer.render(&scene, &camera, &path)?;
            summary.written.push(path);
        }
    }
    info!(demo = demo.title(), frames = summary.frames, written = summary.written.len(), "demo finished");
    Ok(summary)
}
