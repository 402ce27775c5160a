//! A single cubic Bezier curve in the screen plane with four draggable
//! control points and slope lines from each end point to its neighbour.

use ::glam::DVec3;
use tracing::debug;

use crate::blend::BlendTable;
use crate::camera::Camera;
use crate::config::DemoConfig;
use crate::cubic_bezier::CubicBezier;
use crate::error::Result;
use crate::input::{InputState, Key};
use crate::scene::{InteractiveHandle, Scene, ShapeHandle};
use crate::shape::{Collider, Geometry, InteractiveShape, RenderShape, Rgb};
use crate::slope::SlopeIndicator;
use crate::transform::Transform;

use super::Demo;

pub const CONTROL_X: [f64; 4] = [-0.75, -0.25, 0.25, 0.75];
pub const MARKER_SCALE: f64 = 0.025;
pub const MARKER_COLOR: Rgb = Rgb::new(0.0, 1.0, 0.0);
/// Control point pairs joined by a slope line
pub const SLOPES: [(usize, usize); 2] = [(0, 1), (2, 3)];

#[derive(Debug)]
struct Handles {
    markers: [InteractiveHandle; 4],
    slopes: [ShapeHandle; 2],
    curve: ShapeHandle,
}

#[derive(Debug)]
pub struct CurveDemo {
    max_vertices: usize,
    vertex_count: usize,
    table: BlendTable,
    /// control points the curve was last derived from
    control_points: [DVec3; 4],
    /// set when the vertex count changed since the last derivation
    dirty: bool,
    recomputed: usize,
    handles: Option<Handles>,
}

impl CurveDemo {
    /// Starts with the maximum number of curve vertices
    pub fn new(max_vertices: usize) -> Self {
        let max_vertices = max_vertices.max(1);
        CurveDemo {
            max_vertices,
            vertex_count: max_vertices,
            table: BlendTable::new(max_vertices),
            control_points: CONTROL_X.map(|x| DVec3::new(x, 0.0, 0.0)),
            dirty: true,
            recomputed: 0,
            handles: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// How often the curve geometry was re-derived
    pub fn recompute_count(&self) -> usize {
        self.recomputed
    }

    pub fn control_points(&self) -> [DVec3; 4] {
        self.control_points
    }

    /// Change the number of curve vertices. Counts outside `1..=max` and the
    /// current count are ignored; returns whether the count changed.
    pub fn set_vertex_count(&mut self, count: usize) -> bool {
        if count == self.vertex_count || count < 1 || count > self.max_vertices {
            return false;
        }
        debug!(from = self.vertex_count, to = count, "vertex count changed");
        self.vertex_count = count;
        self.table = BlendTable::new(count);
        self.dirty = true;
        true
    }

    fn derive(&mut self, scene: &mut Scene, handles: &Handles) {
        let curve = CubicBezier::from_control_points(self.control_points);
        scene.shape_mut(handles.curve).geometry = Geometry::LineStrip(curve.sample_with(&self.table));
        for ((a, b), slope) in SLOPES.iter().zip(handles.slopes) {
            let transform = &mut scene.shape_mut(slope).transform;
            SlopeIndicator::place(transform, self.control_points[*a], self.control_points[*b]);
        }
        self.dirty = false;
        self.recomputed += 1;
    }
}

impl Default for CurveDemo {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Demo for CurveDemo {
    fn title(&self) -> &str {
        "Bezier Curve"
    }

    fn camera(&self, _config: &DemoConfig) -> Camera {
        Camera::orthographic()
    }

    fn init(&mut self, scene: &mut Scene) -> Result<()> {
        let markers = self.control_points.map(|p| {
            let shape = RenderShape::new(
                Geometry::Marker,
                Transform::at(p).with_scale(DVec3::splat(MARKER_SCALE)),
                MARKER_COLOR,
            );
            scene.add_interactive(InteractiveShape::new(shape, Collider::new(0.05, 0.05)))
        });
        let slopes = SLOPES.map(|(a, b)| {
            let transform = SlopeIndicator::between(self.control_points[a], self.control_points[b]);
            scene.add_shape(RenderShape::new(Geometry::Segment, transform, MARKER_COLOR))
        });
        let curve = scene.add_shape(RenderShape::new(
            Geometry::LineStrip(Vec::new()),
            Transform::default(),
            Rgb::WHITE,
        ));
        let handles = Handles {
            markers,
            slopes,
            curve,
        };
        self.derive(scene, &handles);
        self.handles = Some(handles);
        Ok(())
    }

    fn update(&mut self, scene: &mut Scene, input: &InputState, _dt: f64) -> Result<()> {
        // both keys in one frame combine into a single target count
        let mut count = self.vertex_count;
        if input.pressed(Key::Down) {
            count /= 2;
        }
        if input.pressed(Key::Up) {
            count *= 2;
        }
        self.set_vertex_count(count);
        let Some(handles) = self.handles.take() else {
            return Ok(());
        };
        let positions = handles.markers.map(|marker| scene.interactive(marker).position());
        if positions != self.control_points || self.dirty {
            self.control_points = positions;
            self.derive(scene, &handles);
        }
        self.handles = Some(handles);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::slope::{TEMPLATE_END, TEMPLATE_START};

    fn curve_points(scene: &Scene, demo: &CurveDemo) -> Vec<DVec3> {
        let handles = demo.handles.as_ref().unwrap();
        match &scene.shape(handles.curve).geometry {
            Geometry::LineStrip(points) => points.clone(),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn vertex_count_bounds() {
        let mut demo = CurveDemo::new(64);
        assert_eq!(demo.vertex_count(), 64);
        assert!(!demo.set_vertex_count(64));
        assert!(!demo.set_vertex_count(128));
        assert!(!demo.set_vertex_count(0));
        assert!(demo.set_vertex_count(32));
        assert!(demo.set_vertex_count(1));
        assert_eq!(demo.vertex_count(), 1);
    }

    #[test]
    fn initial_curve() {
        let mut scene = Scene::new();
        let mut demo = CurveDemo::default();
        demo.init(&mut scene).unwrap();
        let points = curve_points(&scene, &demo);
        assert_eq!(points.len(), 64);
        assert_eq!(points[0], DVec3::new(-0.75, 0.0, 0.0));
        assert!((points[63] - DVec3::new(0.75, 0.0, 0.0)).length() < 1e-12);
        assert_eq!(scene.interactive_count(), 4);
    }

    #[test]
    fn only_recomputes_on_change() {
        let mut scene = Scene::new();
        let mut demo = CurveDemo::default();
        demo.init(&mut scene).unwrap();
        let camera = Camera::orthographic();
        let mut input = InputState::new();
        for _ in 0..3 {
            input.begin_frame();
            scene.update(&input, &camera, 1.0 / 60.0);
            demo.update(&mut scene, &input, 1.0 / 60.0).unwrap();
        }
        assert_eq!(demo.recompute_count(), 1);

        // hold W for one frame: the selected (first) marker moves up
        input.begin_frame();
        input.apply(InputEvent::KeyDown { key: Key::W });
        scene.update(&input, &camera, 0.1);
        demo.update(&mut scene, &input, 0.1).unwrap();
        assert_eq!(demo.recompute_count(), 2);
        assert!(demo.control_points()[0].y > 0.0);
        assert_eq!(curve_points(&scene, &demo)[0], demo.control_points()[0]);

        // slope line 0 follows the moved marker
        scene.resolve_models();
        let slope = scene.shape(demo.handles.as_ref().unwrap().slopes[0]).transform.model();
        assert!((slope.transform_point3(TEMPLATE_START) - demo.control_points()[0]).length() < 1e-12);
        assert!((slope.transform_point3(TEMPLATE_END) - demo.control_points()[1]).length() < 1e-12);
    }

    #[test]
    fn up_down_keys_change_resolution() {
        let mut scene = Scene::new();
        let mut demo = CurveDemo::default();
        demo.init(&mut scene).unwrap();
        let mut input = InputState::new();

        let mut tap = |demo: &mut CurveDemo, key: Key| {
            input.begin_frame();
            input.apply(InputEvent::KeyDown { key });
            demo.update(&mut scene, &input, 0.0).unwrap();
            input.begin_frame();
            input.apply(InputEvent::KeyUp { key });
            demo.update(&mut scene, &input, 0.0).unwrap();
        };
        tap(&mut demo, Key::Down);
        assert_eq!(demo.vertex_count(), 32);
        tap(&mut demo, Key::Up);
        tap(&mut demo, Key::Up);
        assert_eq!(demo.vertex_count(), 64);
        for _ in 0..10 {
            tap(&mut demo, Key::Down);
        }
        assert_eq!(demo.vertex_count(), 1);
        assert_eq!(demo.recompute_count(), 1 + 1 + 1 + 6);
        assert_eq!(curve_points(&scene, &demo), vec![DVec3::new(-0.75, 0.0, 0.0)]);
    }

    #[test]
    fn up_and_down_in_one_frame() {
        let mut scene = Scene::new();
        let mut demo = CurveDemo::default();
        demo.init(&mut scene).unwrap();
        let mut input = InputState::new();
        let mut both = |demo: &mut CurveDemo| {
            input.begin_frame();
            input.apply(InputEvent::KeyDown { key: Key::Up });
            input.apply(InputEvent::KeyDown { key: Key::Down });
            demo.update(&mut scene, &input, 0.0).unwrap();
            input.begin_frame();
            input.apply(InputEvent::KeyUp { key: Key::Up });
            input.apply(InputEvent::KeyUp { key: Key::Down });
            demo.update(&mut scene, &input, 0.0).unwrap();
        };
        // halving then doubling lands back on the maximum
        both(&mut demo);
        assert_eq!(demo.vertex_count(), 64);
        assert_eq!(demo.recompute_count(), 1);
        // an odd count rounds down before doubling
        assert!(demo.set_vertex_count(5));
        both(&mut demo);
        assert_eq!(demo.vertex_count(), 4);
    }
}
