//! Demo configuration loaded from TOML. Every field has a default, so an
//! empty file (or no file at all) gives the stock 800x600 demo.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::script::ScriptEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub surface: SurfaceConfig,
    pub curve: CurveConfig,
    /// number of frames to simulate
    pub frames: usize,
    /// write every n-th frame as an image, 0 disables rendering
    pub render_every: usize,
    /// directory the frames are written to
    pub output: PathBuf,
    pub script: Vec<ScriptEntry>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            surface: SurfaceConfig::default(),
            curve: CurveConfig::default(),
            frames: 120,
            render_every: 30,
            output: PathBuf::from("frames"),
            script: Vec::new(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// orbit radius around the origin
    pub distance: f64,
    pub yaw_degrees: f64,
    pub pitch_degrees: f64,
    /// orbit speed of the I/J/K/L keys in degrees per second
    pub turn_speed: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            distance: 3.0,
            yaw_degrees: 0.0,
            pitch_degrees: 20.0,
            turn_speed: 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SurfaceConfig {
    /// vertices per side of a tessellated patch
    pub resolution: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig { resolution: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveConfig {
    pub max_vertices: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig { max_vertices: 64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};

    #[test]
    fn empty_file_gives_defaults() {
        let config = DemoConfig::from_toml("").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.surface.resolution, 10);
        assert_eq!(config.curve.max_vertices, 64);
        assert!((config.window.aspect() - 800.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn partial_sections_and_script() {
        let config = DemoConfig::from_toml(
            r#"
            frames = 10
            render_every = 0

            [camera]
            fov_degrees = 45.0

            [[script]]
            frame = 2
            events = [{ kind = "key_down", key = "right" }]
            "#,
        )
        .unwrap();
        assert_eq!(config.frames, 10);
        assert_eq!(config.render_every, 0);
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.far, 100.0);
        assert_eq!(config.script.len(), 1);
        assert_eq!(config.script[0].frame, 2);
        assert_eq!(config.script[0].events, vec![InputEvent::KeyDown { key: Key::Right }]);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            DemoConfig::from_toml("framez = 3"),
            Err(crate::Error::Config(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml(
                r#"
                [[script]]
                frame = 0
                events = [{ kind = "key_down", key = "f1" }]
                "#
            ),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn bundled_demo_configs_parse() {
        for text in [
            include_str!("../demos/curve.toml"),
            include_str!("../demos/surface.toml"),
            include_str!("../demos/teapot.toml"),
        ] {
            let config = DemoConfig::from_toml(text).unwrap();
            assert!(!config.script.is_empty());
            assert!(config.render_every > 0);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            DemoConfig::load("/nonexistent/bernstein.toml"),
            Err(crate::Error::Io(_))
        ));
    }
}
