//! One bicubic patch with sixteen draggable control points. The surface is
//! re-tessellated every frame from the marker positions.

use ::glam::DVec3;
use tracing::debug;

use crate::blend::BlendTable;
use crate::error::{Error, Result};
use crate::input::{InputState, Key};
use crate::patch::BezierPatch;
use crate::scene::{InteractiveHandle, Scene, ShapeHandle};
use crate::shape::{Collider, Geometry, InteractiveShape, RenderShape, Rgb};
use crate::slope::SlopeIndicator;
use crate::transform::Transform;

use super::curve::{MARKER_COLOR, MARKER_SCALE};
use super::Demo;

pub const SURFACE_COLOR: Rgb = Rgb::gray(0.6);

#[derive(Debug)]
struct Handles {
    markers: [InteractiveHandle; 16],
    slopes: [ShapeHandle; 8],
    surface: ShapeHandle,
}

#[derive(Debug)]
pub struct SurfaceDemo {
    patch: BezierPatch<DVec3>,
    resolution: usize,
    table: BlendTable,
    markers_visible: bool,
    /// scratch buffer the vertex grid is evaluated into
    vertices: Vec<DVec3>,
    handles: Option<Handles>,
}

impl SurfaceDemo {
    pub fn new(resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(Error::InvalidResolution(resolution));
        }
        Ok(SurfaceDemo {
            patch: BezierPatch::flat(),
            resolution,
            table: BlendTable::new(resolution),
            markers_visible: true,
            vertices: Vec::with_capacity(resolution * resolution),
            handles: None,
        })
    }

    pub fn patch(&self) -> &BezierPatch<DVec3> {
        &self.patch
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn markers_visible(&self) -> bool {
        self.markers_visible
    }

    fn derive(&mut self, scene: &mut Scene, handles: &Handles) -> Result<()> {
        for (index, marker) in handles.markers.iter().enumerate() {
            self.patch.set_control_point(index, scene.interactive(*marker).position())?;
        }
        self.patch.tessellate_into(&self.table, &mut self.vertices);
        if let Some(mesh) = scene.shape_mut(handles.surface).mesh_mut() {
            mesh.vertices_mut().copy_from_slice(&self.vertices);
        }
        for (line, slope) in self.patch.slope_lines().iter().zip(handles.slopes) {
            SlopeIndicator::place(&mut scene.shape_mut(slope).transform, line.start(), line.end());
        }
        Ok(())
    }

    fn set_markers_visible(&mut self, scene: &mut Scene, handles: &Handles, visible: bool) {
        self.markers_visible = visible;
        for marker in handles.markers {
            scene.interactive_mut(marker).shape.active = visible;
        }
        for slope in handles.slopes {
            scene.shape_mut(slope).active = visible;
        }
        debug!(visible, "control point markers toggled");
    }
}

impl Demo for SurfaceDemo {
    fn title(&self) -> &str {
        "Bezier Surface"
    }

    fn init(&mut self, scene: &mut Scene) -> Result<()> {
        let markers = self.patch.control_points().map(|p| {
            let shape = RenderShape::new(
                Geometry::Marker,
                Transform::at(p).with_scale(DVec3::splat(MARKER_SCALE)),
                MARKER_COLOR,
            );
            scene.add_interactive(InteractiveShape::new(shape, Collider::new(0.05, 0.05)))
        });
        let slopes = self.patch.slope_lines().map(|line| {
            let transform = SlopeIndicator::between(line.start(), line.end());
            scene.add_shape(RenderShape::new(Geometry::Segment, transform, MARKER_COLOR))
        });
        let mesh = self.patch.tessellate(self.resolution)?;
        let surface = scene.add_shape(RenderShape::new(Geometry::Triangles(mesh), Transform::default(), SURFACE_COLOR));
        let handles = Handles {
            markers,
            slopes,
            surface,
        };
        self.derive(scene, &handles)?;
        self.handles = Some(handles);
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, input: &InputState, _dt: f64) -> Result<()> {
        let Some(handles) = self.handles.take() else {
            return Ok(());
        };
        if input.pressed(Key::Space) {
            self.set_markers_visible(scene, &handles, !self.markers_visible);
        }
        let result = self.derive(scene, &handles);
        self.handles = Some(handles);
        result
    }
}
