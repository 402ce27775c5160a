//! The Utah teapot as a spline of 28 bicubic patches, placed by one shared
//! transform node. Space cycles which layers are drawn.

use ::glam::DVec3;
use tracing::debug;

use crate::blend::BlendTable;
use crate::camera::Camera;
use crate::config::{CameraConfig, DemoConfig};
use crate::error::{Error, Result};
use crate::input::{InputState, Key};
use crate::patch_spline::PatchSpline;
use crate::scene::{Scene, ShapeHandle};
use crate::shape::{Geometry, RenderShape, Rgb};
use crate::slope::SlopeIndicator;
use crate::teapot::teapot;
use crate::transform::{Transform, TransformHandle};

use super::surface::SURFACE_COLOR;
use super::Demo;

pub const TEAPOT_POSITION: DVec3 = DVec3::new(0.0, -1.5, 0.0);
pub const MARKER_SCALE: f64 = 0.01;
pub const MARKER_COLOR: Rgb = Rgb::new(0.0, 1.0, 0.0);
pub const WIREFRAME_COLOR: Rgb = Rgb::new(0.0, 0.8, 0.0);
/// Orbit radius that fits the whole teapot in view
pub const VIEW_DISTANCE: f64 = 8.0;

/// Which layers of the teapot are drawn, in Space press order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    All,
    NoMarkers,
    SurfaceOnly,
    WireframeOnly,
}

impl Visibility {
    pub fn next(self) -> Self {
        match self {
            Visibility::All => Visibility::NoMarkers,
            Visibility::NoMarkers => Visibility::SurfaceOnly,
            Visibility::SurfaceOnly => Visibility::WireframeOnly,
            Visibility::WireframeOnly => Visibility::All,
        }
    }

    /// Control point markers and slope lines
    pub fn markers(self) -> bool {
        self == Visibility::All
    }

    pub fn wireframe(self) -> bool {
        matches!(self, Visibility::All | Visibility::NoMarkers | Visibility::WireframeOnly)
    }

    pub fn surface(self) -> bool {
        self != Visibility::WireframeOnly
    }
}

#[derive(Debug)]
struct PatchShapes {
    surface: ShapeHandle,
    wireframe: ShapeHandle,
    markers: [ShapeHandle; 16],
    slopes: [ShapeHandle; 8],
}

#[derive(Debug)]
pub struct TeapotDemo {
    spline: PatchSpline<DVec3, 32>,
    resolution: usize,
    table: BlendTable,
    visibility: Visibility,
    view_distance: f64,
    anchor: Option<TransformHandle>,
    patches: Vec<PatchShapes>,
    vertices: Vec<DVec3>,
    rederived: usize,
}

impl TeapotDemo {
    pub fn new(resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(Error::InvalidResolution(resolution));
        }
        Ok(TeapotDemo {
            spline: teapot(),
            resolution,
            table: BlendTable::new(resolution),
            visibility: Visibility::default(),
            view_distance: VIEW_DISTANCE,
            anchor: None,
            patches: Vec::new(),
            vertices: Vec::with_capacity(resolution * resolution),
            rederived: 0,
        })
    }

    pub fn with_view_distance(mut self, distance: f64) -> Self {
        self.view_distance = distance;
        self
    }

    pub fn spline(&self) -> &PatchSpline<DVec3, 32> {
        &self.spline
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The node every teapot shape is parented to
    pub fn anchor(&self) -> Option<TransformHandle> {
        self.anchor
    }

    /// Number of patch re-derivations since init
    pub fn rederive_count(&self) -> usize {
        self.rederived
    }

    /// Move control point `index` of patch `patch` to `position` in teapot
    /// space. The patch is re-derived on the next update.
    pub fn set_control_point(&mut self, scene: &mut Scene, patch: usize, index: usize, position: DVec3) -> Result<()> {
        let len = self.patches.len();
        let shapes = self.patches.get(patch).ok_or(Error::PatchIndex { index: patch, len })?;
        let marker = shapes.markers.get(index).ok_or(Error::ControlPointIndex(index))?;
        scene.shape_mut(*marker).transform.position = position;
        Ok(())
    }

    fn apply_visibility(&self, scene: &mut Scene) {
        let v = self.visibility;
        for shapes in &self.patches {
            scene.shape_mut(shapes.surface).active = v.surface();
            scene.shape_mut(shapes.wireframe).active = v.wireframe();
            for handle in shapes.markers.iter().chain(shapes.slopes.iter()) {
                scene.shape_mut(*handle).active = v.markers();
            }
        }
    }

    /// Re-tessellate patch `index` into its surface and wireframe shapes
    fn rederive(&mut self, scene: &mut Scene, index: usize) -> Result<()> {
        let patch = *self.spline.patch(index).ok_or(Error::PatchIndex {
            index,
            len: self.spline.len(),
        })?;
        let shapes = &self.patches[index];
        patch.tessellate_into(&self.table, &mut self.vertices);
        for handle in [shapes.surface, shapes.wireframe] {
            if let Some(mesh) = scene.shape_mut(handle).mesh_mut() {
                mesh.vertices_mut().copy_from_slice(&self.vertices);
            }
        }
        for (line, slope) in patch.slope_lines().iter().zip(shapes.slopes) {
            SlopeIndicator::place(&mut scene.shape_mut(slope).transform, line.start(), line.end());
        }
        self.rederived += 1;
        Ok(())
    }
}

impl Demo for TeapotDemo {
    fn title(&self) -> &str {
        "Bezier Teapot"
    }

    fn camera(&self, config: &DemoConfig) -> Camera {
        let mut camera = config.camera;
        // the stock orbit radius is too close for the whole pot
        if camera.distance == CameraConfig::default().distance {
            camera.distance = self.view_distance;
        }
        Camera::perspective(&camera, config.window.aspect())
    }

    fn init(&mut self, scene: &mut Scene) -> Result<()> {
        let anchor = scene.add_node(Transform::at(TEAPOT_POSITION));
        for patch in self.spline.patches() {
            let mesh = patch.tessellate(self.resolution)?;
            let surface = scene.add_shape(RenderShape::new(
                Geometry::Triangles(mesh.clone()),
                Transform::default().with_parent(anchor),
                SURFACE_COLOR,
            ));
            let wireframe = scene.add_shape(RenderShape::new(
                Geometry::Lines(mesh),
                Transform::default().with_parent(anchor),
                WIREFRAME_COLOR,
            )
            .without_depth_test());
            let markers = patch.control_points().map(|p| {
                let transform = Transform::at(p)
                    .with_scale(DVec3::splat(MARKER_SCALE))
                    .with_parent(anchor);
                scene.add_shape(RenderShape::new(Geometry::Marker, transform, MARKER_COLOR).without_depth_test())
            });
            let slopes = patch.slope_lines().map(|line| {
                let transform = SlopeIndicator::between(line.start(), line.end()).with_parent(anchor);
                scene.add_shape(RenderShape::new(Geometry::Segment, transform, MARKER_COLOR).without_depth_test())
            });
            self.patches.push(PatchShapes {
                surface,
                wireframe,
                markers,
                slopes,
            });
        }
        self.anchor = Some(anchor);
        self.apply_visibility(scene);
        debug!(patches = self.patches.len(), "teapot loaded");
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, input: &InputState, _dt: f64) -> Result<()> {
        if input.pressed(Key::Space) {
            self.visibility = self.visibility.next();
            debug!(visibility = ?self.visibility, "teapot layers changed");
            self.apply_visibility(scene);
        }
        for index in 0..self.patches.len() {
            let positions = self.patches[index]
                .markers
                .map(|marker| scene.shape(marker).transform.position);
            let changed = self
                .spline
                .patch(index)
                .is_some_and(|patch| *patch.control_points() != positions);
            if changed {
                self.spline.set_control_points(index, positions)?;
                self.rederive(scene, index)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;

    fn loaded(resolution: usize) -> (Scene, TeapotDemo) {
        let mut scene = Scene::new();
        let mut demo = TeapotDemo::new(resolution).unwrap();
        demo.init(&mut scene).unwrap();
        scene.resolve_models();
        (scene, demo)
    }

    #[test]
    fn visibility_cycle() {
        let order = [
            Visibility::All,
            Visibility::NoMarkers,
            Visibility::SurfaceOnly,
            Visibility::WireframeOnly,
            Visibility::All,
        ];
        for pair in order.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        let layers: Vec<_> = order[..4]
            .iter()
            .map(|v| (v.markers(), v.wireframe(), v.surface()))
            .collect();
        assert_eq!(
            layers,
            vec![
                (true, true, true),
                (false, true, true),
                (false, false, true),
                (false, true, false)
            ]
        );
    }

    #[test]
    fn scene_layout() {
        let (scene, demo) = loaded(4);
        assert_eq!(demo.spline().len(), 28);
        // surface, wireframe, 16 markers and 8 slope lines per patch
        assert_eq!(scene.shape_count(), 28 * 26);
        assert_eq!(scene.interactive_count(), 0);
        let list = scene.draw_list();
        assert_eq!(list.len(), 28 * 26);
        // only the surfaces are depth tested; wireframes, slope lines and markers draw on top
        assert!(list[..28].iter().all(|s| s.depth_test && matches!(s.geometry, Geometry::Triangles(_))));
        assert!(list[28..].iter().all(|s| !s.depth_test));
        let segments = list.iter().filter(|s| s.geometry == Geometry::Segment).count();
        assert_eq!(segments, 28 * 8);
    }

    #[test]
    fn markers_follow_anchor() {
        let (scene, demo) = loaded(4);
        let first = demo.patches[0].markers[0];
        let local = demo.spline().patch(0).unwrap().control_points()[0];
        let world = scene.shape(first).transform.world_position();
        assert!((world - (local + TEAPOT_POSITION)).length() < 1e-12);
        assert_eq!(scene.node(demo.anchor().unwrap()).position, TEAPOT_POSITION);
    }

    #[test]
    fn space_cycles_layers() {
        let (mut scene, mut demo) = loaded(4);
        let mut input = InputState::new();
        let mut counts = Vec::new();
        for _ in 0..4 {
            input.begin_frame();
            input.apply(InputEvent::KeyDown { key: Key::Space });
            demo.update(&mut scene, &input, 0.0).unwrap();
            input.begin_frame();
            input.apply(InputEvent::KeyUp { key: Key::Space });
            demo.update(&mut scene, &input, 0.0).unwrap();
            counts.push((demo.visibility(), scene.draw_list().len()));
        }
        assert_eq!(
            counts,
            vec![
                (Visibility::NoMarkers, 28 * 2),
                (Visibility::SurfaceOnly, 28),
                (Visibility::WireframeOnly, 28),
                (Visibility::All, 28 * 26),
            ]
        );
        assert_eq!(demo.rederive_count(), 0);
    }

    #[test]
    fn moved_control_point_rederives_one_patch() {
        let (mut scene, mut demo) = loaded(4);
        let input = InputState::new();
        let lifted = DVec3::new(1.4, 3.0, 0.0);
        demo.set_control_point(&mut scene, 2, 0, lifted).unwrap();
        demo.update(&mut scene, &input, 0.0).unwrap();
        assert_eq!(demo.rederive_count(), 1);
        assert_eq!(demo.spline().patch(2).unwrap().control_points()[0], lifted);

        // the surface corner of patch 2 moved with it
        match &scene.shape(demo.patches[2].surface).geometry {
            Geometry::Triangles(mesh) => assert_eq!(mesh.vertices()[0], lifted),
            other => panic!("unexpected geometry {other:?}"),
        }
        demo.update(&mut scene, &input, 0.0).unwrap();
        assert_eq!(demo.rederive_count(), 1);
    }

    #[test]
    fn set_control_point_bounds() {
        let (mut scene, mut demo) = loaded(2);
        assert!(matches!(
            demo.set_control_point(&mut scene, 28, 0, DVec3::ZERO),
            Err(Error::PatchIndex { index: 28, len: 28 })
        ));
        assert!(matches!(
            demo.set_control_point(&mut scene, 0, 16, DVec3::ZERO),
            Err(Error::ControlPointIndex(16))
        ));
    }

    #[test]
    fn camera_distance_from_config() {
        let demo = TeapotDemo::new(4).unwrap();
        let stock = demo.camera(&DemoConfig::default());
        assert!((stock.eye().length() - VIEW_DISTANCE).abs() < 1e-12);

        let mut config = DemoConfig::default();
        config.camera.distance = 12.0;
        let configured = demo.camera(&config);
        assert!((configured.eye().length() - 12.0).abs() < 1e-12);
    }
}
