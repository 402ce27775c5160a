//! Drawable shapes and the mouse pickable variant.

use ::glam::{DVec2, DVec3};

use crate::mesh::SurfaceMesh;
use crate::transform::Transform;

/// Linear RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
    pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }

    pub const fn gray(value: f64) -> Self {
        Rgb::new(value, value, value)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Rgb::new(
            (self.r * factor).clamp(0.0, 1.0),
            (self.g * factor).clamp(0.0, 1.0),
            (self.b * factor).clamp(0.0, 1.0),
        )
    }

    /// 8 bit channels
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// What a shape draws, in model space
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A square of half size 1 centered on the origin
    Marker,
    /// The slope template from (-1, -1, -1) to (1, 1, 1)
    Segment,
    LineStrip(Vec<DVec3>),
    /// Filled, shaded triangles of a mesh
    Triangles(SurfaceMesh<DVec3>),
    /// The wireframe lines of a mesh
    Lines(SurfaceMesh<DVec3>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderShape {
    pub geometry: Geometry,
    pub transform: Transform,
    pub color: Rgb,
    /// inactive shapes are neither drawn nor picked
    pub active: bool,
    /// shapes without depth test are drawn on top of everything else
    pub depth_test: bool,
}

impl RenderShape {
    pub fn new(geometry: Geometry, transform: Transform, color: Rgb) -> Self {
        RenderShape {
            geometry,
            transform,
            color,
            active: true,
            depth_test: true,
        }
    }

    pub fn without_depth_test(mut self) -> Self {
        self.depth_test = false;
        self
    }

    /// Mesh of a `Triangles` or `Lines` shape
    pub fn mesh_mut(&mut self) -> Option<&mut SurfaceMesh<DVec3>> {
        match &mut self.geometry {
            Geometry::Triangles(mesh) | Geometry::Lines(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Screen space pick rectangle centered on the projected shape origin,
/// sized in normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub width: f64,
    pub height: f64,
}

impl Collider {
    pub fn new(width: f64, height: f64) -> Self {
        Collider { width, height }
    }

    pub fn hit(&self, center: DVec2, cursor: DVec2) -> bool {
        let d = (cursor - center).abs();
        d.x <= self.width * 0.5 && d.y <= self.height * 0.5
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveShape {
    pub shape: RenderShape,
    pub collider: Collider,
    pub(crate) selected: bool,
    pub(crate) dragging: bool,
}

impl InteractiveShape {
    pub fn new(shape: RenderShape, collider: Collider) -> Self {
        InteractiveShape {
            shape,
            collider,
            selected: false,
            dragging: false,
        }
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn position(&self) -> DVec3 {
        self.shape.transform.position
    }
}
