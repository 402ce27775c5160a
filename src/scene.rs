//! The render manager: owns every shape of a demo and runs the per frame
//! interaction (selection, keyboard nudging, mouse dragging) before
//! resolving world matrices.

use ::glam::{DMat4, DVec2, DVec3};
use tracing::debug;

use crate::camera::Camera;
use crate::input::{InputState, Key, MouseButton};
use crate::shape::{InteractiveShape, RenderShape};
use crate::transform::{Transform, TransformHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractiveHandle(usize);

/// Units per second the selected shape moves while a nudge key is held
pub const NUDGE_SPEED: f64 = 0.5;

#[derive(Debug, Default)]
pub struct Scene {
    /// free standing nodes shapes can be parented to, parents come first
    nodes: Vec<Transform>,
    shapes: Vec<RenderShape>,
    interactive: Vec<InteractiveShape>,
    selected: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a transform node. A parent must already be in the scene.
    pub fn add_node(&mut self, transform: Transform) -> TransformHandle {
        self.nodes.push(transform);
        TransformHandle(self.nodes.len() - 1)
    }

    pub fn node(&self, handle: TransformHandle) -> &Transform {
        &self.nodes[handle.0]
    }

    pub fn node_mut(&mut self, handle: TransformHandle) -> &mut Transform {
        &mut self.nodes[handle.0]
    }

    pub fn add_shape(&mut self, shape: RenderShape) -> ShapeHandle {
        self.shapes.push(shape);
        ShapeHandle(self.shapes.len() - 1)
    }

    pub fn shape(&self, handle: ShapeHandle) -> &RenderShape {
        &self.shapes[handle.0]
    }

    pub fn shape_mut(&mut self, handle: ShapeHandle) -> &mut RenderShape {
        &mut self.shapes[handle.0]
    }

    pub fn add_interactive(&mut self, shape: InteractiveShape) -> InteractiveHandle {
        self.interactive.push(shape);
        let handle = InteractiveHandle(self.interactive.len() - 1);
        self.refresh_selection();
        handle
    }

    pub fn interactive(&self, handle: InteractiveHandle) -> &InteractiveShape {
        &self.interactive[handle.0]
    }

    pub fn interactive_mut(&mut self, handle: InteractiveHandle) -> &mut InteractiveShape {
        &mut self.interactive[handle.0]
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn interactive_count(&self) -> usize {
        self.interactive.len()
    }

    pub fn selected(&self) -> Option<InteractiveHandle> {
        (!self.interactive.is_empty()).then_some(InteractiveHandle(self.selected))
    }

    /// The shape of the interactive flagged as selected
    pub fn highlighted(&self) -> Option<&RenderShape> {
        self.interactive
            .iter()
            .find(|shape| shape.selected())
            .map(|shape| &shape.shape)
    }

    pub fn select(&mut self, handle: InteractiveHandle) {
        if handle.0 < self.interactive.len() && handle.0 != self.selected {
            self.selected = handle.0;
            debug!(selected = self.selected, "selection changed");
        }
        self.refresh_selection();
    }

    /// One frame of interaction, then world matrices are re-resolved
    pub fn update(&mut self, input: &InputState, camera: &Camera, dt: f64) {
        self.resolve_models();
        self.cycle_selection(input);
        self.nudge_selected(input, dt);
        self.drag(input, &camera.view_proj());
        for node in self.nodes.iter_mut() {
            node.integrate(dt);
        }
        for shape in self.shapes.iter_mut() {
            shape.transform.integrate(dt);
        }
        for shape in self.interactive.iter_mut() {
            shape.shape.transform.integrate(dt);
        }
        self.resolve_models();
    }

    fn cycle_selection(&mut self, input: &InputState) {
        let count = self.interactive.len();
        if count == 0 {
            return;
        }
        let step = input.pressed(Key::Right) as isize - input.pressed(Key::Left) as isize;
        if step != 0 {
            self.selected = (self.selected as isize + step).rem_euclid(count as isize) as usize;
            debug!(selected = self.selected, "selection changed");
        }
        self.refresh_selection();
    }

    fn refresh_selection(&mut self) {
        let selected = self.selected;
        for (i, shape) in self.interactive.iter_mut().enumerate() {
            shape.selected = i == selected;
        }
    }

    fn nudge_selected(&mut self, input: &InputState, dt: f64) {
        let direction = DVec3::new(
            input.axis(Key::A, Key::D),
            input.axis(Key::S, Key::W),
            input.axis(Key::Q, Key::E),
        );
        if direction == DVec3::ZERO {
            return;
        }
        if let Some(shape) = self.interactive.get_mut(self.selected) {
            if shape.shape.active {
                shape.shape.transform.position += direction * NUDGE_SPEED * dt;
            }
        }
    }

    fn drag(&mut self, input: &InputState, view_proj: &DMat4) {
        let cursor = input.cursor();
        if input.button_pressed(MouseButton::Left) {
            let picked = self.interactive.iter().position(|shape| {
                shape.shape.active && {
                    let center = view_proj.project_point3(shape.shape.transform.world_position());
                    shape.collider.hit(DVec2::new(center.x, center.y), cursor)
                }
            });
            if let Some(index) = picked {
                self.select(InteractiveHandle(index));
                self.interactive[index].dragging = true;
                debug!(shape = index, "drag started");
            }
        }
        if input.button_released(MouseButton::Left) {
            for (index, shape) in self.interactive.iter_mut().enumerate() {
                if shape.dragging {
                    shape.dragging = false;
                    debug!(shape = index, "drag ended");
                }
            }
            return;
        }
        let inverse_view_proj = view_proj.inverse();
        for shape in self.interactive.iter_mut().filter(|shape| shape.dragging) {
            let transform = &mut shape.shape.transform;
            // keep the shape at its current depth and move it under the cursor
            let depth = view_proj.project_point3(transform.world_position()).z;
            let world = inverse_view_proj.project_point3(DVec3::new(cursor.x, cursor.y, depth));
            let parent_model = transform
                .parent
                .map(|parent| self.nodes[parent.0].model())
                .unwrap_or(DMat4::IDENTITY);
            transform.position = parent_model.inverse().transform_point3(world);
        }
    }

    /// Compose every transform with its parent. Nodes are resolved in
    /// insertion order, so a parent is always resolved before its children.
    pub fn resolve_models(&mut self) {
        for i in 0..self.nodes.len() {
            let parent = self.nodes[i].parent.filter(|p| p.0 < i).map(|p| self.nodes[p.0].model());
            self.nodes[i].resolve(parent);
        }
        let nodes = &self.nodes;
        let parent_of = |t: &Transform| t.parent.and_then(|p| nodes.get(p.0)).map(Transform::model);
        for shape in self.shapes.iter_mut() {
            let parent = parent_of(&shape.transform);
            shape.transform.resolve(parent);
        }
        for shape in self.interactive.iter_mut() {
            let parent = parent_of(&shape.shape.transform);
            shape.shape.transform.resolve(parent);
        }
    }

    /// Active shapes in draw order: depth tested shapes first, the overlay
    /// shapes without depth test after them
    pub fn draw_list(&self) -> Vec<&RenderShape> {
        let all = self
            .shapes
            .iter()
            .chain(self.interactive.iter().map(|shape| &shape.shape))
            .filter(|shape| shape.active);
        let (mut list, overlay): (Vec<_>, Vec<_>) = all.partition(|shape| shape.depth_test);
        list.extend(overlay);
        list
    }
}
