//! Cameras: an orbiting perspective camera for the 3D demos and an identity
//! orthographic one for the flat curve demo.

use ::glam::{DMat4, DVec3};

use crate::config::CameraConfig;
use crate::input::{InputState, Key};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fov_degrees: f64,
        aspect: f64,
        near: f64,
        far: f64,
    },
    /// world coordinates are normalized device coordinates
    Orthographic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    projection: Projection,
    target: DVec3,
    distance: f64,
    yaw: f64,
    pitch: f64,
    /// radians per second
    turn_speed: f64,
}

const PITCH_LIMIT: f64 = 89.0 * std::f64::consts::PI / 180.0;

impl Camera {
    pub fn perspective(config: &CameraConfig, aspect: f64) -> Self {
        Camera {
            projection: Projection::Perspective {
                fov_degrees: config.fov_degrees,
                aspect,
                near: config.near,
                far: config.far,
            },
            target: DVec3::ZERO,
            distance: config.distance,
            yaw: config.yaw_degrees.to_radians(),
            pitch: config.pitch_degrees.to_radians().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            turn_speed: config.turn_speed.to_radians(),
        }
    }

    pub fn orthographic() -> Self {
        Camera {
            projection: Projection::Orthographic,
            target: DVec3::ZERO,
            distance: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            turn_speed: 0.0,
        }
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// I/K pitch and J/L yaw the orbit. The orthographic camera is fixed.
    pub fn update(&mut self, input: &InputState, dt: f64) {
        if self.projection == Projection::Orthographic {
            return;
        }
        let step = self.turn_speed * dt;
        self.pitch = (self.pitch + input.axis(Key::K, Key::I) * step).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw += input.axis(Key::J, Key::L) * step;
    }

    pub fn eye(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * DVec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view(&self) -> DMat4 {
        match self.projection {
            Projection::Orthographic => DMat4::IDENTITY,
            Projection::Perspective { .. } => DMat4::look_at_rh(self.eye(), self.target, DVec3::Y),
        }
    }

    pub fn projection(&self) -> DMat4 {
        match self.projection {
            Projection::Orthographic => DMat4::IDENTITY,
            Projection::Perspective {
                fov_degrees,
                aspect,
                near,
                far,
            } => DMat4::perspective_rh_gl(fov_degrees.to_radians(), aspect, near, far),
        }
    }

    pub fn view_proj(&self) -> DMat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;

    #[test]
    fn orthographic_is_identity() {
        let camera = Camera::orthographic();
        assert_eq!(camera.view_proj(), DMat4::IDENTITY);
        let p = DVec3::new(0.25, -0.5, 0.0);
        assert_eq!(camera.view_proj().project_point3(p), p);
    }

    #[test]
    fn target_projects_to_center() {
        let camera = Camera::perspective(&CameraConfig::default(), 800.0 / 600.0);
        let ndc = camera.view_proj().project_point3(DVec3::ZERO);
        assert!(ndc.x.abs() < 1e-12 && ndc.y.abs() < 1e-12);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
        assert!((camera.eye().length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn keys_orbit() {
        let mut config = CameraConfig::default();
        config.pitch_degrees = 0.0;
        let mut camera = Camera::perspective(&config, 1.0);
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown { key: Key::L });
        input.apply(InputEvent::KeyDown { key: Key::I });
        camera.update(&input, 0.5);
        assert!((camera.yaw() - 45f64.to_radians()).abs() < 1e-12);
        assert!((camera.pitch() - 45f64.to_radians()).abs() < 1e-12);
        // pitch stops short of the pole
        camera.update(&input, 10.0);
        assert!((camera.pitch() - PITCH_LIMIT).abs() < 1e-12);

        let mut flat = Camera::orthographic();
        flat.update(&input, 1.0);
        assert_eq!(flat.view_proj(), DMat4::IDENTITY);
    }
}
